use std::path::{Path, PathBuf};

use gix::bstr::ByteSlice;
use gix::progress::Discard;
use gix::status::index_worktree::iter::Summary;

use crate::config::StatusBackend;
use crate::core::snapshot::StatusSnapshot;
use crate::error::{GitTabsError, Result};
use crate::git::status::parse_porcelain;
use crate::session::StatusQuery;

const PORCELAIN_ARGS: [&str; 6] = [
    "status",
    "--porcelain=v1",
    "-z",
    "--branch",
    "--untracked-files=all",
    "--ignored=matching",
];

/// Runs the `git` binary and parses its porcelain output.
#[derive(Debug, Clone, Default)]
pub struct GitCliStatus;

impl StatusQuery for GitCliStatus {
    async fn query(&self, root: &Path) -> Result<StatusSnapshot> {
        let output = tokio::process::Command::new("git")
            .current_dir(root)
            .args(PORCELAIN_ARGS)
            .output()
            .await
            .map_err(|err| {
                GitTabsError::Git(anyhow::Error::new(err).context("failed to run git status"))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitTabsError::Git(anyhow::anyhow!(
                "git status failed in {}: {}",
                root.display(),
                stderr
            )));
        }

        Ok(parse_porcelain(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// In-process status through gix. Does not report ignored files.
#[derive(Debug, Clone, Default)]
pub struct GixStatus;

impl StatusQuery for GixStatus {
    async fn query(&self, root: &Path) -> Result<StatusSnapshot> {
        let root: PathBuf = root.to_path_buf();
        tokio::task::spawn_blocking(move || {
            let repo = open_repo(&root)?;
            repo_status(&repo)
        })
        .await
        .map_err(|err| GitTabsError::Other(anyhow::Error::new(err)))?
    }
}

pub fn open_repo(path: &Path) -> Result<gix::Repository> {
    gix::open(path).map_err(|err| GitTabsError::Git(anyhow::Error::new(err)))
}

pub fn repo_status(repo: &gix::Repository) -> Result<StatusSnapshot> {
    let platform = repo
        .status(Discard)
        .map_err(|err| GitTabsError::Git(anyhow::Error::new(err)))?
        .untracked_files(gix::status::UntrackedFiles::Files);
    let mut snapshot = StatusSnapshot {
        current: current_branch(repo)?,
        ..StatusSnapshot::default()
    };

    for item in platform
        .into_iter(Vec::new())
        .map_err(|err| GitTabsError::Git(anyhow::Error::new(err)))?
    {
        let item = item.map_err(|err| GitTabsError::Git(anyhow::Error::new(err)))?;
        match item {
            gix::status::Item::TreeIndex(change) => {
                let path = change.location().to_str_lossy().to_string();
                match change {
                    gix::diff::index::ChangeRef::Addition { .. } => {
                        snapshot.created.push(path.clone());
                    }
                    gix::diff::index::ChangeRef::Deletion { .. } => {
                        snapshot.deleted.push(path.clone());
                    }
                    gix::diff::index::ChangeRef::Rewrite { .. } => {
                        snapshot.renamed.push(path.clone());
                    }
                    gix::diff::index::ChangeRef::Modification { .. } => {
                        snapshot.modified.push(path.clone());
                    }
                }
                snapshot.staged.push(path);
            }
            gix::status::Item::IndexWorktree(index_item) => {
                let path = index_item.rela_path().to_str_lossy().to_string();
                match index_item.summary() {
                    Some(Summary::Added) => snapshot.not_added.push(path),
                    Some(Summary::IntentToAdd) => snapshot.created.push(path),
                    Some(Summary::Conflict) => snapshot.conflicted.push(path),
                    Some(Summary::Removed) => snapshot.deleted.push(path),
                    Some(Summary::Renamed) | Some(Summary::Copied) => {
                        snapshot.renamed.push(path);
                    }
                    Some(Summary::Modified) | Some(Summary::TypeChange) => {
                        snapshot.modified.push(path);
                    }
                    None => {}
                }
            }
        }
    }

    Ok(snapshot)
}

pub fn current_branch(repo: &gix::Repository) -> Result<String> {
    let head = repo
        .head()
        .map_err(|err| GitTabsError::Git(anyhow::Error::new(err)))?;
    if matches!(head.kind, gix::head::Kind::Detached { .. }) {
        return Ok("HEAD".to_string());
    }

    Ok(head.name().shorten().to_string())
}

/// Status backend chosen at runtime from configuration.
#[derive(Debug, Clone)]
pub enum BackendStatus {
    Git(GitCliStatus),
    Gix(GixStatus),
}

impl BackendStatus {
    pub fn for_backend(backend: StatusBackend) -> Self {
        match backend {
            StatusBackend::Git => BackendStatus::Git(GitCliStatus),
            StatusBackend::Gix => BackendStatus::Gix(GixStatus),
        }
    }
}

impl StatusQuery for BackendStatus {
    async fn query(&self, root: &Path) -> Result<StatusSnapshot> {
        match self {
            BackendStatus::Git(query) => query.query(root).await,
            BackendStatus::Gix(query) => query.query(root).await,
        }
    }
}
