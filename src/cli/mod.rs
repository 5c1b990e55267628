use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::config::resolve::{resolve_workspace, ResolvedWorkspace};
use crate::core::category::FileStatusCategory;
use crate::core::color::{invert, resolve_color};
use crate::core::locate::{FsMarkerProbe, RepoLocator};
use crate::error::{GitTabsError, Result};
use crate::git::BackendStatus;
use crate::session::{
    ConsoleSummary, CycleOutcome, CycleReport, JsonSettingsStore, OverlayStore, StatusCoordinator,
};
use crate::util::{logging, output};

const MIN_POLL_INTERVAL_MS: u64 = 100;

type CliCoordinator =
    StatusCoordinator<FsMarkerProbe, BackendStatus, JsonSettingsStore, ConsoleSummary>;

#[derive(Parser, Debug)]
#[command(name = "git-tabs")]
#[command(about = "Color editor tabs by the git status of the active file", long_about = None)]
pub struct Cli {
    #[arg(short, long)]
    pub workspace: Option<PathBuf>,
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[arg(short, long)]
    pub quiet: bool,
    #[arg(long)]
    pub no_color: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Locate(LocateArgs),
    Status(StatusArgs),
    Watch(WatchArgs),
    Colors(ColorsArgs),
}

#[derive(Args, Debug)]
pub struct LocateArgs {
    pub dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,
    #[arg(long)]
    pub no_visuals: bool,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,
    #[arg(short = 'i', long)]
    pub interval: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ColorsArgs {
    #[arg(long)]
    pub json: bool,
}

pub fn run() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    if cli.no_color {
        output::set_colors(false);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build();
    let result = match runtime {
        Ok(runtime) => runtime.block_on(dispatch(cli)),
        Err(err) => Err(GitTabsError::Io(err)),
    };
    if let Err(err) = result {
        output::error(&err.to_string());
        std::process::exit(1);
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Locate(args) => handle_locate(args, cli.workspace, cli.config),
        Commands::Status(args) => handle_status(args, cli.workspace, cli.config).await,
        Commands::Watch(args) => handle_watch(args, cli.workspace, cli.config).await,
        Commands::Colors(args) => handle_colors(args, cli.workspace, cli.config).await,
    }
}

fn handle_locate(
    args: LocateArgs,
    workspace_root: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let workspace = resolve_workspace(workspace_root, config_path)?;
    let start = match args.dir {
        Some(dir) => absolute_path(dir)?,
        None => workspace.root.clone(),
    };
    let locator = RepoLocator::new(FsMarkerProbe::new(&workspace.config.status.marker));

    match locator.locate(&start) {
        Some(root) => {
            println!("{}", root.display());
            Ok(())
        }
        None => Err(no_repository(&start)),
    }
}

async fn handle_status(
    args: StatusArgs,
    workspace_root: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let workspace = resolve_workspace(workspace_root, config_path)?;
    let coordinator = build_coordinator(&workspace);
    coordinator.set_workspace_root(Some(workspace.root.clone()));
    coordinator.set_active_file(args.file.map(absolute_path).transpose()?);

    match coordinator.on_trigger(!args.no_visuals).await {
        CycleOutcome::NoRepository => Err(no_repository(&workspace.root)),
        CycleOutcome::Failed => Err(GitTabsError::Git(anyhow::anyhow!(
            "status query failed, see log output"
        ))),
        CycleOutcome::Stale { sequence } => {
            output::warn(&format!("status #{sequence} was superseded"));
            Ok(())
        }
        CycleOutcome::Applied(report) => {
            if args.json {
                print_json(&report)
            } else {
                print_report(&report);
                Ok(())
            }
        }
    }
}

async fn handle_watch(
    args: WatchArgs,
    workspace_root: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let workspace = resolve_workspace(workspace_root, config_path)?;
    let interval_ms = args
        .interval
        .unwrap_or(workspace.config.status.poll_interval_ms)
        .max(MIN_POLL_INTERVAL_MS);
    let coordinator = build_coordinator(&workspace);
    coordinator.set_workspace_root(Some(workspace.root.clone()));
    coordinator.set_active_file(args.file.map(absolute_path).transpose()?);

    output::info(&format!(
        "watching {} every {interval_ms}ms, Ctrl-C to stop",
        workspace.root.display()
    ));

    let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    let mut last_shown: Option<(FileStatusCategory, String)> = None;
    let mut warned_missing = false;

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                output::info("stopped");
                return Ok(());
            }
            _ = ticker.tick() => {
                if coordinator.repo_root().is_none() {
                    coordinator.set_workspace_root(Some(workspace.root.clone()));
                }
                match coordinator.on_trigger(true).await {
                    CycleOutcome::NoRepository if !warned_missing => {
                        output::warn(&no_repository(&workspace.root).to_string());
                        warned_missing = true;
                    }
                    CycleOutcome::Applied(report) => {
                        warned_missing = false;
                        let Some(visual) = report.visuals else {
                            continue;
                        };
                        let current = (visual.category, visual.color.clone());
                        if last_shown.as_ref() != Some(&current) {
                            print_visual_line(
                                visual.relative_path.as_deref(),
                                visual.category,
                                &visual.color,
                            );
                            last_shown = Some(current);
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}

async fn handle_colors(
    args: ColorsArgs,
    workspace_root: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let workspace = resolve_workspace(workspace_root, config_path)?;
    let store = settings_store(&workspace);
    let overlay = store.read().await?;

    let rows: Vec<ColorRow> = FileStatusCategory::ALL
        .into_iter()
        .map(|category| {
            let color = resolve_color(category, &overlay);
            let foreground = invert(Some(color.as_str())).map(str::to_string);
            ColorRow {
                category,
                color,
                foreground,
            }
        })
        .collect();

    if args.json {
        return print_json(&rows);
    }

    println!("Settings: {}", store.path().display());
    println!();
    println!("Category      Color     Status bar text");
    println!("---------------------------------------");
    for row in rows {
        let label = output::category_style(row.category).apply_to(format!("{:<12}", row.category));
        println!(
            "{} {:<9} {}",
            label,
            row.color,
            row.foreground.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ColorRow {
    category: FileStatusCategory,
    color: String,
    foreground: Option<String>,
}

fn build_coordinator(workspace: &ResolvedWorkspace) -> CliCoordinator {
    let status = &workspace.config.status;
    StatusCoordinator::new(
        RepoLocator::new(FsMarkerProbe::new(&status.marker)),
        BackendStatus::for_backend(status.backend),
        settings_store(workspace),
        ConsoleSummary::default(),
    )
}

fn settings_store(workspace: &ResolvedWorkspace) -> JsonSettingsStore {
    JsonSettingsStore::new(workspace.config.settings.path_in(&workspace.root))
}

fn print_report(report: &CycleReport) {
    println!("Repository: {}", report.repo_root.display());
    println!("Branch: {}", display_branch(&report.snapshot.current));
    if let Some(visual) = &report.visuals {
        print_visual_line(visual.relative_path.as_deref(), visual.category, &visual.color);
        if !visual.written {
            output::warn("color customizations were not updated");
        }
    }
}

fn print_visual_line(path: Option<&str>, category: FileStatusCategory, color: &str) {
    println!(
        "{}: {} {}",
        path.unwrap_or("(no file)"),
        output::category_style(category).apply_to(category),
        color
    );
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|err| GitTabsError::Other(anyhow::Error::new(err)))?;
    println!("{}", json);
    Ok(())
}

fn display_branch(branch: &str) -> &str {
    if branch.is_empty() {
        "(no branch)"
    } else {
        branch
    }
}

fn no_repository(start: &Path) -> GitTabsError {
    GitTabsError::Other(anyhow::anyhow!(
        "no repository found above {}",
        start.display()
    ))
}

/// Resolve symlinks when the file exists so paths line up with the
/// canonical workspace root; deleted files keep their absolute form.
fn absolute_path(path: PathBuf) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path
    } else {
        env::current_dir()?.join(path)
    };
    Ok(fs::canonicalize(&absolute).unwrap_or(absolute))
}
