// Tests for commit size classification and `git diff --numstat` parsing,
// plus an end-to-end check against a real throwaway git repository.

use std::path::Path;
use std::process::Command;

use ai_docs::commit_size::{
    changed_files, classify, diff_stats, parse_numstat, CommitSize, GitError,
};
use tempfile::tempdir;

#[test]
fn classification_thresholds_match_the_size_bands() {
    struct TestCase {
        total_lines: u64,
        expected: CommitSize,
    }

    let test_cases = vec![
        TestCase { total_lines: 0, expected: CommitSize::ExtraSmall },
        TestCase { total_lines: 10, expected: CommitSize::ExtraSmall },
        TestCase { total_lines: 11, expected: CommitSize::Small },
        TestCase { total_lines: 50, expected: CommitSize::Small },
        TestCase { total_lines: 51, expected: CommitSize::Medium },
        TestCase { total_lines: 200, expected: CommitSize::Medium },
        TestCase { total_lines: 201, expected: CommitSize::Large },
        TestCase { total_lines: 500, expected: CommitSize::Large },
        TestCase { total_lines: 501, expected: CommitSize::ExtraLarge },
        TestCase { total_lines: 1000, expected: CommitSize::ExtraLarge },
        TestCase { total_lines: 1001, expected: CommitSize::Massive },
    ];

    for tc in test_cases {
        assert_eq!(
            classify(tc.total_lines),
            tc.expected,
            "total_lines = {}",
            tc.total_lines
        );
    }
}

#[test]
fn size_labels_are_t_shirt_sizes() {
    assert_eq!(CommitSize::ExtraSmall.to_string(), "XS");
    assert_eq!(CommitSize::Small.to_string(), "S");
    assert_eq!(CommitSize::Medium.to_string(), "M");
    assert_eq!(CommitSize::Large.to_string(), "L");
    assert_eq!(CommitSize::ExtraLarge.to_string(), "XL");
    assert_eq!(CommitSize::Massive.to_string(), "XXL");
}

#[test]
fn parse_numstat_reads_tab_separated_counts() {
    let output = "10\t2\tsrc/lib.rs\n0\t5\tREADME.md\n";
    let files = parse_numstat(output);

    assert_eq!(files.len(), 2);
    assert_eq!(files[0].path, "src/lib.rs");
    assert_eq!(files[0].insertions, 10);
    assert_eq!(files[0].deletions, 2);
    assert_eq!(files[1].path, "README.md");
    assert_eq!(files[1].deletions, 5);
}

#[test]
fn parse_numstat_treats_binary_dashes_as_zero() {
    let files = parse_numstat("-\t-\tassets/logo.png\n3\t1\tmain.py\n");

    assert_eq!(files.len(), 2);
    assert_eq!(files[0].path, "assets/logo.png");
    assert_eq!(files[0].insertions, 0);
    assert_eq!(files[0].deletions, 0);
}

#[test]
fn parse_numstat_skips_blank_and_malformed_lines() {
    let output = "\n   \nnot numstat at all\nabc\tdef\tx.py\n7\t0\tok.py\n";
    let files = parse_numstat(output);

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "ok.py");
    assert_eq!(files[0].insertions, 7);
}

#[test]
fn parse_numstat_keeps_paths_containing_spaces() {
    let files = parse_numstat("1\t1\tdocs/release notes.md\n");

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "docs/release notes.md");
}

fn git(repo: &Path, args: &[&str]) {
    let status = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .status()
        .expect("git should launch");
    assert!(status.success(), "git {args:?} failed");
}

fn init_repo_with_two_commits(repo: &Path) {
    git(repo, &["init", "--quiet"]);
    git(repo, &["config", "user.email", "test@example.com"]);
    git(repo, &["config", "user.name", "Test"]);

    std::fs::write(repo.join("a.txt"), "one\ntwo\n").expect("write a.txt");
    git(repo, &["add", "."]);
    git(repo, &["commit", "--quiet", "-m", "first"]);

    std::fs::write(repo.join("a.txt"), "one\ntwo\nthree\nfour\n").expect("rewrite a.txt");
    git(repo, &["add", "."]);
    git(repo, &["commit", "--quiet", "-m", "second"]);
}

#[test]
fn diff_stats_on_a_real_repository() {
    let dir = tempdir().expect("tempdir");
    init_repo_with_two_commits(dir.path());

    let stats = diff_stats(dir.path(), "HEAD~1", "HEAD").expect("diff_stats should succeed");

    assert_eq!(stats.files_changed, 1);
    assert_eq!(stats.insertions, 2);
    assert_eq!(stats.deletions, 0);
    assert_eq!(stats.total_lines(), 2);
}

#[test]
fn changed_files_on_a_real_repository() {
    let dir = tempdir().expect("tempdir");
    init_repo_with_two_commits(dir.path());

    let files = changed_files(dir.path(), "HEAD~1", "HEAD").expect("changed_files should succeed");

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "a.txt");
    assert_eq!(files[0].insertions, 2);
}

#[test]
fn unknown_revision_surfaces_git_stderr() {
    let dir = tempdir().expect("tempdir");
    init_repo_with_two_commits(dir.path());

    let err = diff_stats(dir.path(), "no-such-rev", "HEAD")
        .expect_err("unknown revision must fail");

    match err {
        GitError::NonZero { stderr, .. } => {
            assert!(!stderr.is_empty(), "stderr should explain the failure")
        }
        other => panic!("expected NonZero, got: {other:?}"),
    }
}
