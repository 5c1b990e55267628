use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatusCategory {
    Added,
    Conflicting,
    Deleted,
    Modified,
    Untracked,
    Ignored,
    Unknown,
}

impl FileStatusCategory {
    pub const ALL: [FileStatusCategory; 7] = [
        FileStatusCategory::Added,
        FileStatusCategory::Conflicting,
        FileStatusCategory::Deleted,
        FileStatusCategory::Modified,
        FileStatusCategory::Untracked,
        FileStatusCategory::Ignored,
        FileStatusCategory::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FileStatusCategory::Added => "added",
            FileStatusCategory::Conflicting => "conflicting",
            FileStatusCategory::Deleted => "deleted",
            FileStatusCategory::Modified => "modified",
            FileStatusCategory::Untracked => "untracked",
            FileStatusCategory::Ignored => "ignored",
            FileStatusCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FileStatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
