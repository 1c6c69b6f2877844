//! Version-control collaborator.
//!
//! The rest of the tool only sees the [`Vcs`] trait: head lookup, revision
//! resolution, cleanliness check, hard reset. The production implementation
//! shells out to the `git` binary; tests substitute a recording mock.

pub mod switch;

pub use switch::with_revision;

use crate::error::{BenchDiffError, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::process::Command;

/// A resolved, concrete revision identifier (full commit hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RevisionId(String);

impl RevisionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for logs and table labels.
    #[must_use]
    pub fn short(&self) -> &str {
        let end = self.0.len().min(12);
        &self.0[..end]
    }
}

impl std::fmt::Display for RevisionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Revision-control operations the comparator needs.
pub trait Vcs {
    /// The currently checked-out revision.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository has no resolvable HEAD.
    fn head(&self) -> Result<RevisionId>;

    /// Resolve a revision expression (e.g. `HEAD~1`, a branch, a tag) to a
    /// concrete identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BenchDiffError::RevisionResolution`] when the expression
    /// does not name a commit.
    fn resolve(&self, expr: &str) -> Result<RevisionId>;

    /// Whether the working copy has no uncommitted modifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the working-copy status cannot be read.
    fn is_clean(&self) -> Result<bool>;

    /// Hard-reset the working copy to the given revision.
    ///
    /// # Errors
    ///
    /// Returns [`BenchDiffError::Reset`] when the reset fails.
    fn hard_reset(&self, revision: &RevisionId) -> Result<()>;
}

/// `Vcs` implementation backed by the `git` command-line tool.
#[derive(Debug)]
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    /// Wrap the repository at `root` without touching it.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open the repository enclosing the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory is not inside a git work
    /// tree.
    pub fn open_current_dir() -> Result<Self> {
        let repo = Self::new(".");
        let out = repo.run_git(&["rev-parse", "--show-toplevel"])?;
        if !out.status.success() {
            return Err(BenchDiffError::Git {
                subcommand: "rev-parse".to_string(),
                detail: stderr_detail(&out.stderr, "not a git repository"),
            });
        }
        Ok(Self::new(
            String::from_utf8_lossy(&out.stdout).trim().to_string(),
        ))
    }

    fn run_git(&self, args: &[&str]) -> Result<std::process::Output> {
        tracing::trace!(?args, "invoking git");
        let output = Command::new("git")
            .current_dir(&self.root)
            .args(args)
            .output()?;
        Ok(output)
    }
}

fn stderr_detail(stderr: &[u8], fallback: &str) -> String {
    let s = String::from_utf8_lossy(stderr).trim().to_string();
    if s.is_empty() { fallback.to_string() } else { s }
}

impl Vcs for GitCli {
    fn head(&self) -> Result<RevisionId> {
        let out = self.run_git(&["rev-parse", "--verify", "HEAD"])?;
        if !out.status.success() {
            return Err(BenchDiffError::Git {
                subcommand: "rev-parse".to_string(),
                detail: stderr_detail(&out.stderr, "HEAD is not a commit"),
            });
        }
        Ok(RevisionId::new(
            String::from_utf8_lossy(&out.stdout).trim().to_string(),
        ))
    }

    fn resolve(&self, expr: &str) -> Result<RevisionId> {
        let revspec = format!("{expr}^{{commit}}");
        let out = self.run_git(&["rev-parse", "--verify", "--quiet", &revspec])?;
        if !out.status.success() {
            return Err(BenchDiffError::RevisionResolution {
                expr: expr.to_string(),
                detail: stderr_detail(&out.stderr, "unknown revision"),
            });
        }
        Ok(RevisionId::new(
            String::from_utf8_lossy(&out.stdout).trim().to_string(),
        ))
    }

    fn is_clean(&self) -> Result<bool> {
        let out = self.run_git(&["status", "--porcelain"])?;
        if !out.status.success() {
            return Err(BenchDiffError::Git {
                subcommand: "status".to_string(),
                detail: stderr_detail(&out.stderr, "status failed"),
            });
        }
        Ok(out.stdout.iter().all(u8::is_ascii_whitespace))
    }

    fn hard_reset(&self, revision: &RevisionId) -> Result<()> {
        let out = self.run_git(&["reset", "--hard", "--quiet", revision.as_str()])?;
        if !out.status.success() {
            return Err(BenchDiffError::Reset {
                revision: revision.short().to_string(),
                detail: stderr_detail(&out.stderr, "reset failed"),
            });
        }
        Ok(())
    }
}
