pub mod ops;
pub mod status;

pub use ops::{BackendStatus, GitCliStatus, GixStatus};
pub use status::parse_porcelain;
