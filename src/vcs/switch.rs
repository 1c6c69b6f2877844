//! Revision-switch controller.
//!
//! Wraps an action (running a benchmark) in a guaranteed-restore protocol:
//! the working copy is hard-reset to a target revision for the duration of
//! the action and restored to the original head on every exit path. Leaving
//! the caller's checkout on the wrong revision is the most severe fault this
//! tool can produce, so a failed restore supersedes a successful action.

use super::{RevisionId, Vcs};
use crate::error::{BenchDiffError, Result};
use tracing::debug;

/// Run `action` with the working copy switched to `target_expr`.
///
/// Protocol:
/// 1. Precondition: the working copy must be clean, otherwise
///    [`BenchDiffError::DirtyWorkingCopy`] with no mutation.
/// 2. Resolve `target_expr`, hard-reset to it. If the reset fails, a
///    best-effort restore runs before the reset error surfaces.
/// 3. Run `action`, then restore the original head unconditionally. The
///    restore also runs when `action` fails, and (best-effort) when it
///    panics.
///
/// # Errors
///
/// Propagates precondition, resolution, reset, and action errors; a restore
/// failure supersedes whatever the action returned.
pub fn with_revision<V, T, F>(vcs: &V, target_expr: &str, action: F) -> Result<T>
where
    V: Vcs,
    F: FnOnce() -> Result<T>,
{
    if !vcs.is_clean()? {
        return Err(BenchDiffError::DirtyWorkingCopy);
    }

    let original = vcs.head()?;
    let target = vcs.resolve(target_expr)?;
    debug!(target = %target.short(), original = %original.short(), "switching working copy");

    if let Err(e) = vcs.hard_reset(&target) {
        // The reset may have partially mutated the tree before failing.
        let _ = vcs.hard_reset(&original);
        return Err(e);
    }

    let guard = RestoreGuard::new(vcs, original);
    let result = action();

    match guard.restore() {
        Ok(()) => result,
        Err(restore_err) => Err(restore_err),
    }
}

/// Scope guard that restores the original revision.
///
/// `restore` is the normal path and reports the reset error; `Drop` is the
/// backstop for unwinding, where the error can only be logged.
struct RestoreGuard<'a, V: Vcs> {
    vcs: &'a V,
    original: RevisionId,
    done: bool,
}

impl<'a, V: Vcs> RestoreGuard<'a, V> {
    fn new(vcs: &'a V, original: RevisionId) -> Self {
        Self {
            vcs,
            original,
            done: false,
        }
    }

    fn restore(mut self) -> Result<()> {
        self.done = true;
        debug!(original = %self.original.short(), "restoring working copy");
        self.vcs.hard_reset(&self.original)
    }
}

impl<V: Vcs> Drop for RestoreGuard<'_, V> {
    fn drop(&mut self) {
        if !self.done {
            if let Err(e) = self.vcs.hard_reset(&self.original) {
                tracing::error!(error = %e, "failed to restore working copy during unwind");
            }
        }
    }
}
