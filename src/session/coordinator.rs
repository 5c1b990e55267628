use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::core::category::FileStatusCategory;
use crate::core::classify::classify;
use crate::core::color::{resolve_color, ColorCustomization, DisplayColorState};
use crate::core::locate::{MarkerProbe, RepoLocator};
use crate::core::snapshot::StatusSnapshot;
use crate::error::Result;
use crate::session::{OverlayStore, StatusQuery, SummaryDisplay, Trigger};

impl<Q: StatusQuery + ?Sized> StatusQuery for &Q {
    fn query(&self, root: &Path) -> impl Future<Output = Result<StatusSnapshot>> {
        (**self).query(root)
    }
}

impl<S: OverlayStore + ?Sized> OverlayStore for &S {
    fn read(&self) -> impl Future<Output = Result<ColorCustomization>> {
        (**self).read()
    }

    fn write(&self, overlay: Option<ColorCustomization>) -> impl Future<Output = Result<()>> {
        (**self).write(overlay)
    }
}

impl<D: SummaryDisplay + ?Sized> SummaryDisplay for &D {
    fn show(&self, text: &str) {
        (**self).show(text)
    }
}

/// Mutable state shared by every cycle of one editor session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    workspace_root: Option<PathBuf>,
    repo_root: Option<PathBuf>,
    active_file: Option<PathBuf>,
    next_sequence: u64,
    applied_sequence: u64,
}

impl Session {
    pub fn workspace_root(&self) -> Option<&Path> {
        self.workspace_root.as_deref()
    }

    pub fn repo_root(&self) -> Option<&Path> {
        self.repo_root.as_deref()
    }

    pub fn active_file(&self) -> Option<&Path> {
        self.active_file.as_deref()
    }

    pub fn applied_sequence(&self) -> u64 {
        self.applied_sequence
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No repository above the workspace root; nothing was queried.
    NoRepository,
    /// The status query failed and nothing was updated.
    Failed,
    /// A newer cycle was applied while this one was suspended.
    Stale { sequence: u64 },
    Applied(CycleReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub sequence: u64,
    pub repo_root: PathBuf,
    pub summary: String,
    pub snapshot: StatusSnapshot,
    pub visuals: Option<FileVisual>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileVisual {
    pub relative_path: Option<String>,
    pub category: FileStatusCategory,
    pub color: String,
    pub state: DisplayColorState,
    pub written: bool,
}

pub struct StatusCoordinator<P, Q, S, D> {
    locator: RepoLocator<P>,
    query: Q,
    store: S,
    display: D,
    session: Mutex<Session>,
    // Held across each overlay read-modify-write.
    overlay_lock: tokio::sync::Mutex<()>,
}

impl<P, Q, S, D> StatusCoordinator<P, Q, S, D>
where
    P: MarkerProbe,
    Q: StatusQuery,
    S: OverlayStore,
    D: SummaryDisplay,
{
    pub fn new(locator: RepoLocator<P>, query: Q, store: S, display: D) -> Self {
        Self {
            locator,
            query,
            store,
            display,
            session: Mutex::new(Session::default()),
            overlay_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn session(&self) -> Session {
        self.lock().clone()
    }

    pub fn repo_root(&self) -> Option<PathBuf> {
        self.lock().repo_root.clone()
    }

    pub fn set_workspace_root(&self, root: Option<PathBuf>) {
        let mut session = self.lock();
        session.workspace_root = root;
        self.relocate(&mut session);
    }

    pub fn set_active_file(&self, file: Option<PathBuf>) {
        let mut session = self.lock();
        session.active_file = file;
        self.relocate(&mut session);
    }

    pub async fn handle(&self, trigger: Trigger) -> CycleOutcome {
        log::trace!("trigger {trigger:?}");
        self.on_trigger(trigger.updates_visuals()).await
    }

    /// Query status for the known repository and refresh the summary, and
    /// with `update_visuals` also recolor the active file's chrome.
    pub async fn on_trigger(&self, update_visuals: bool) -> CycleOutcome {
        let (root, sequence) = {
            let mut session = self.lock();
            let Some(root) = session.repo_root.clone() else {
                return CycleOutcome::NoRepository;
            };
            session.next_sequence += 1;
            (root, session.next_sequence)
        };

        let snapshot = match self.query.query(&root).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::error!("Error getting git status for {}: {err}", root.display());
                return CycleOutcome::Failed;
            }
        };

        let (workspace_root, active_file) = {
            let mut session = self.lock();
            if sequence < session.applied_sequence {
                log::debug!(
                    "discarding status #{sequence}, #{} already applied",
                    session.applied_sequence
                );
                return CycleOutcome::Stale { sequence };
            }
            session.applied_sequence = sequence;
            (session.workspace_root.clone(), session.active_file.clone())
        };

        let summary = snapshot.summary_text();
        self.display.show(&summary);

        let visuals = if update_visuals {
            let relative_path = active_file
                .as_deref()
                .and_then(|file| relative_to_repo(&root, workspace_root.as_deref(), file));
            let category = relative_path
                .as_deref()
                .map_or(FileStatusCategory::Unknown, |path| classify(path, &snapshot));
            self.apply_visuals(sequence, relative_path, category).await
        } else {
            None
        };

        CycleOutcome::Applied(CycleReport {
            sequence,
            repo_root: root,
            summary,
            snapshot,
            visuals,
        })
    }

    async fn apply_visuals(
        &self,
        sequence: u64,
        relative_path: Option<String>,
        category: FileStatusCategory,
    ) -> Option<FileVisual> {
        let _overlay_guard = self.overlay_lock.lock().await;
        let overlay = match self.store.read().await {
            Ok(overlay) => overlay,
            Err(err) => {
                log::error!("Error reading color customizations: {err}");
                return None;
            }
        };

        let color = resolve_color(category, &overlay);
        let state = DisplayColorState::for_color(&color);
        log::debug!(
            "{} is {category}, color {color}",
            relative_path.as_deref().unwrap_or("<no file>")
        );

        let superseded = self.lock().applied_sequence > sequence;
        if superseded || state.is_empty() {
            if superseded {
                log::debug!("skipping color write for status #{sequence}, a newer one was applied");
            }
            return Some(FileVisual {
                relative_path,
                category,
                color,
                state,
                written: false,
            });
        }

        let written = match self.store.write(state.merge_into(&overlay)).await {
            Ok(()) => true,
            Err(err) => {
                log::error!("Error writing color customizations: {err}");
                false
            }
        };

        Some(FileVisual {
            relative_path,
            category,
            color,
            state,
            written,
        })
    }

    fn relocate(&self, session: &mut Session) {
        let repo_root = session
            .workspace_root
            .as_deref()
            .and_then(|root| self.locator.locate(root));
        match &repo_root {
            Some(root) => log::info!("using repository at {}", root.display()),
            None => log::info!("no repository found above the workspace root"),
        }
        session.repo_root = repo_root;
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// `file` relative to `repo_root` with `/` separators, as git reports paths.
fn relative_to_repo(repo_root: &Path, workspace_root: Option<&Path>, file: &Path) -> Option<String> {
    let file = if file.is_absolute() {
        file.to_path_buf()
    } else {
        workspace_root.unwrap_or(repo_root).join(file)
    };
    let relative = file.strip_prefix(repo_root).ok()?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop()?;
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    (!parts.is_empty()).then(|| parts.join("/"))
}
