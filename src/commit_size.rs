//! Commit diff size statistics from `git diff --numstat`.

use std::fmt;
use std::path::Path;
use std::process::Command;

use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to launch git process")]
    Launch(#[from] std::io::Error),
    #[error("git diff exited with {status}: {stderr}")]
    NonZero {
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// T-shirt size classification of a commit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitSize {
    ExtraSmall,
    Small,
    Medium,
    Large,
    ExtraLarge,
    Massive,
}

impl CommitSize {
    pub fn label(&self) -> &'static str {
        match self {
            CommitSize::ExtraSmall => "XS",
            CommitSize::Small => "S",
            CommitSize::Medium => "M",
            CommitSize::Large => "L",
            CommitSize::ExtraLarge => "XL",
            CommitSize::Massive => "XXL",
        }
    }
}

impl fmt::Display for CommitSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify by total lines changed (insertions + deletions).
pub fn classify(total_lines: u64) -> CommitSize {
    match total_lines {
        0..=10 => CommitSize::ExtraSmall,
        11..=50 => CommitSize::Small,
        51..=200 => CommitSize::Medium,
        201..=500 => CommitSize::Large,
        501..=1000 => CommitSize::ExtraLarge,
        _ => CommitSize::Massive,
    }
}

/// Aggregate statistics over a commit range.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiffStats {
    pub files_changed: u64,
    pub insertions: u64,
    pub deletions: u64,
}

impl DiffStats {
    pub fn total_lines(&self) -> u64 {
        self.insertions + self.deletions
    }
}

/// One changed file with its insertion/deletion counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub insertions: u64,
    pub deletions: u64,
}

fn run_numstat(repo: &Path, base: &str, target: &str) -> Result<String, GitError> {
    let range = format!("{base}..{target}");
    debug!(repo = %repo.display(), range = %range, "Running git diff --numstat");

    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .arg("diff")
        .arg("--numstat")
        .arg(&range)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        error!(
            repo = %repo.display(),
            range = %range,
            status = ?output.status,
            stderr = %stderr,
            "git diff exited with non-zero code"
        );
        return Err(GitError::NonZero {
            status: output.status,
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `--numstat` output lines (`<insertions>\t<deletions>\t<path>`).
/// Binary files report `-` counts, which read as zero; malformed lines are
/// skipped.
pub fn parse_numstat(output: &str) -> Vec<FileChange> {
    let mut files = Vec::new();
    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let mut parts = line.splitn(3, '\t');
        let (Some(ins), Some(del), Some(path)) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };
        let insertions = match ins {
            "-" => 0,
            n => match n.parse() {
                Ok(v) => v,
                Err(_) => continue,
            },
        };
        let deletions = match del {
            "-" => 0,
            n => match n.parse() {
                Ok(v) => v,
                Err(_) => continue,
            },
        };
        files.push(FileChange {
            path: path.to_string(),
            insertions,
            deletions,
        });
    }
    files
}

/// List changed files between two commits (`target` defaults to `HEAD` at
/// the CLI layer).
pub fn changed_files(repo: &Path, base: &str, target: &str) -> Result<Vec<FileChange>, GitError> {
    Ok(parse_numstat(&run_numstat(repo, base, target)?))
}

/// Aggregate diff statistics between two commits.
pub fn diff_stats(repo: &Path, base: &str, target: &str) -> Result<DiffStats, GitError> {
    let files = changed_files(repo, base, target)?;
    let mut stats = DiffStats::default();
    for file in files {
        stats.files_changed += 1;
        stats.insertions += file.insertions;
        stats.deletions += file.deletions;
    }
    Ok(stats)
}
