use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

struct TempTree {
    root: PathBuf,
}

impl TempTree {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before unix epoch")
            .as_nanos();
        let pid = std::process::id();
        let root = std::env::temp_dir().join(format!("git-tabs-{prefix}-{pid}-{nanos}"));
        fs::create_dir_all(&root).expect("create temp root");
        let root = root.canonicalize().expect("canonicalize temp root");
        Self { root }
    }
}

impl Drop for TempTree {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

fn run_locate(workspace: &PathBuf, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_git-tabs"))
        .env_remove("GIT_TABS_CONFIG")
        .env_remove("GIT_TABS_WORKSPACE")
        .arg("--workspace")
        .arg(workspace)
        .arg("locate")
        .args(args)
        .output()
        .expect("run git-tabs locate")
}

#[test]
fn locate_walks_up_to_nearest_marker() {
    let tree = TempTree::new("locate-nearest");
    let repo = tree.root.join("a");
    let nested = repo.join("b").join("c");
    fs::create_dir_all(&nested).expect("create nested dirs");
    fs::create_dir_all(repo.join(".git")).expect("create marker");

    let output = run_locate(&nested, &[]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        repo.display().to_string()
    );
}

#[test]
fn locate_prefers_inner_repository() {
    let tree = TempTree::new("locate-inner");
    let outer = tree.root.join("outer");
    let inner = outer.join("vendor").join("inner");
    fs::create_dir_all(inner.join(".git")).expect("create inner marker");
    fs::create_dir_all(outer.join(".git")).expect("create outer marker");

    let output = run_locate(&outer, &[inner.join("src").to_str().expect("utf-8 path")]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        inner.display().to_string()
    );
}

#[test]
fn locate_uses_configured_marker() {
    let tree = TempTree::new("locate-config");
    let repo = tree.root.join("hg-repo");
    let nested = repo.join("pkg");
    fs::create_dir_all(&nested).expect("create nested dirs");
    fs::create_dir_all(repo.join(".hg")).expect("create marker");
    fs::write(nested.join(".git-tabs.toml"), "[status]\nmarker = \".hg\"\n")
        .expect("write config");

    let output = run_locate(&nested, &[]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        repo.display().to_string()
    );
}

#[test]
fn locate_without_marker_fails() {
    let tree = TempTree::new("locate-missing");
    let nested = tree.root.join("plain").join("dir");
    fs::create_dir_all(&nested).expect("create nested dirs");
    fs::write(nested.join(".git-tabs.toml"), "[status]\nmarker = \".no-such-marker\"\n")
        .expect("write config");

    let output = run_locate(&nested, &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no repository found above"), "stderr:\n{stderr}");
}
