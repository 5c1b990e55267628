pub mod category;
pub mod classify;
pub mod color;
pub mod locate;
pub mod snapshot;

pub use category::FileStatusCategory;
pub use classify::classify;
pub use color::{invert, resolve_color, ColorCustomization, DisplayColorState};
pub use locate::{FsMarkerProbe, MarkerProbe, RepoLocator};
pub use snapshot::StatusSnapshot;
