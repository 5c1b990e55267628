use serde::Serialize;

/// Paths per raw status for one repository at one point in time.
///
/// Paths are relative to the repository root and use `/` separators. The
/// collections are disjoint by convention only; a staged new file that was
/// edited afterwards shows up in `created`, `staged` and `modified`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub current: String,
    pub created: Vec<String>,
    pub not_added: Vec<String>,
    pub staged: Vec<String>,
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
    pub renamed: Vec<String>,
    pub conflicted: Vec<String>,
    pub ignored: Vec<String>,
}

impl StatusSnapshot {
    pub fn is_clean(&self) -> bool {
        self.created.is_empty()
            && self.not_added.is_empty()
            && self.staged.is_empty()
            && self.modified.is_empty()
            && self.deleted.is_empty()
            && self.renamed.is_empty()
            && self.conflicted.is_empty()
    }

    /// One-line summary: branch name plus the six change counters.
    pub fn summary_text(&self) -> String {
        let branch = if self.current.is_empty() {
            "(no branch)"
        } else {
            self.current.as_str()
        };
        format!(
            "{branch}  new {} | modified {} | staged {} | deleted {} | renamed {} | conflicted {}",
            self.created.len() + self.not_added.len(),
            self.modified.len(),
            self.staged.len(),
            self.deleted.len(),
            self.renamed.len(),
            self.conflicted.len(),
        )
    }
}
