use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A throwaway git repository for end-to-end tests.
///
/// The benchmark "tool" is a committed `bench.sh`, so switching revisions
/// changes what the benchmark reports — exactly the situation the real tool
/// runs in.
pub struct TestRepo {
    _temp: TempDir,
    pub root: PathBuf,
}

impl TestRepo {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("temp dir");
        let root = temp.path().to_path_buf();
        let repo = Self { _temp: temp, root };
        repo.git(&["init", "-q"]);
        repo.git(&["config", "user.email", "benchdiff@test"]);
        repo.git(&["config", "user.name", "benchdiff tests"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    /// Write a file relative to the repository root.
    pub fn write(&self, path: &str, contents: &str) {
        let full = self.root.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(full, contents).expect("write file");
    }

    /// Commit a `bench.sh` that prints the given benchmark output.
    pub fn commit_bench_output(&self, message: &str, output: &str) {
        self.write(
            "bench.sh",
            &format!("#!/bin/sh\ncat <<'EOF'\n{output}\nEOF\n"),
        );
        self.commit_all(message);
    }

    pub fn commit_all(&self, message: &str) {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "--allow-empty", "-m", message]);
    }

    /// Current HEAD hash.
    pub fn head(&self) -> String {
        let out = self.git_output(&["rev-parse", "HEAD"]);
        String::from_utf8_lossy(&out.stdout).trim().to_string()
    }

    /// Contents of a committed file, for restore-postcondition checks.
    pub fn read(&self, path: &str) -> String {
        fs::read_to_string(self.root.join(path)).expect("read file")
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    fn git(&self, args: &[&str]) {
        let out = self.git_output(args);
        assert!(
            out.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&out.stderr)
        );
    }

    fn git_output(&self, args: &[&str]) -> std::process::Output {
        Command::new("git")
            .current_dir(&self.root)
            .args(args)
            .output()
            .expect("run git")
    }
}
