use crate::core::snapshot::StatusSnapshot;

const CONFLICT_CODES: [(char, char); 7] = [
    ('D', 'D'),
    ('A', 'U'),
    ('U', 'D'),
    ('U', 'A'),
    ('D', 'U'),
    ('A', 'A'),
    ('U', 'U'),
];

/// Parse `git status --porcelain=v1 -z --branch` output.
pub fn parse_porcelain(output: &str) -> StatusSnapshot {
    let mut snapshot = StatusSnapshot::default();
    let mut fields = output.split('\0');

    while let Some(entry) = fields.next() {
        if entry.is_empty() {
            continue;
        }
        if let Some(header) = entry.strip_prefix("## ") {
            snapshot.current = parse_branch_header(header);
            continue;
        }

        let mut codes = entry.chars();
        let (Some(index), Some(worktree)) = (codes.next(), codes.next()) else {
            continue;
        };
        let Some(path) = entry.get(3..).filter(|path| !path.is_empty()) else {
            continue;
        };
        // Renames and copies carry their origin path in the next field.
        if matches!(index, 'R' | 'C') || matches!(worktree, 'R' | 'C') {
            fields.next();
        }

        record_entry(&mut snapshot, index, worktree, path.to_string());
    }

    snapshot
}

fn record_entry(snapshot: &mut StatusSnapshot, index: char, worktree: char, path: String) {
    match (index, worktree) {
        ('?', '?') => {
            snapshot.not_added.push(path);
            return;
        }
        ('!', '!') => {
            snapshot.ignored.push(path);
            return;
        }
        codes if CONFLICT_CODES.contains(&codes) => {
            snapshot.conflicted.push(path);
            return;
        }
        _ => {}
    }

    if index == 'A' {
        snapshot.created.push(path.clone());
    }
    if index == 'R' || worktree == 'R' {
        snapshot.renamed.push(path.clone());
    }
    if index == 'D' || worktree == 'D' {
        snapshot.deleted.push(path.clone());
    }
    if index == 'M' || worktree == 'M' {
        snapshot.modified.push(path.clone());
    }
    if matches!(index, 'M' | 'A' | 'D' | 'R' | 'C' | 'T') {
        snapshot.staged.push(path);
    }
}

fn parse_branch_header(header: &str) -> String {
    let header = header.trim();
    for prefix in ["No commits yet on ", "Initial commit on "] {
        if let Some(branch) = header.strip_prefix(prefix) {
            return branch.trim().to_string();
        }
    }
    if header.starts_with("HEAD (no branch)") {
        return "HEAD".to_string();
    }

    let branch = header.split("...").next().unwrap_or(header);
    branch
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}
