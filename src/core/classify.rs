use crate::core::category::FileStatusCategory;
use crate::core::snapshot::StatusSnapshot;

/// Classify `relative_path` against `snapshot`; the first matching collection wins.
///
/// Conflicts outrank every edit state so a conflicted file that is also
/// modified reads as conflicting. Ignored is checked last, after staged.
/// An entry ending in `/` is a whole directory and matches every path under it.
pub fn classify(relative_path: &str, snapshot: &StatusSnapshot) -> FileStatusCategory {
    let contains = |paths: &[String]| paths.iter().any(|entry| covers(entry, relative_path));

    if contains(&snapshot.created) {
        FileStatusCategory::Untracked
    } else if contains(&snapshot.conflicted) {
        FileStatusCategory::Conflicting
    } else if contains(&snapshot.deleted) {
        FileStatusCategory::Deleted
    } else if contains(&snapshot.modified) {
        FileStatusCategory::Modified
    } else if contains(&snapshot.not_added) {
        FileStatusCategory::Untracked
    } else if contains(&snapshot.staged) {
        FileStatusCategory::Added
    } else if contains(&snapshot.ignored) {
        FileStatusCategory::Ignored
    } else {
        FileStatusCategory::Unknown
    }
}

fn covers(entry: &str, relative_path: &str) -> bool {
    if entry.ends_with('/') {
        relative_path.starts_with(entry)
    } else {
        entry == relative_path
    }
}
