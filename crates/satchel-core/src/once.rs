//! One-shot action gate
//!
//! [`OnceGate`] runs an action at most once across every caller that shares
//! the gate. The first caller claims the gate with a single compare-and-swap;
//! everybody else returns immediately without waiting for the winner.
//!
//! ```text
//! NotRun ──claim──► Running ──┬──► Complete
//!    ▲                        ├──► Errored          (failure)
//!    └────────────────────────┘                     (failure, reset_on_error)
//! ```

use std::convert::Infallible;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use tracing::{debug, trace, warn};

/// Lifecycle state of a [`OnceGate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GateStatus {
    NotRun = 0,
    Running = 1,
    Complete = 2,
    Errored = 3,
}

impl GateStatus {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => GateStatus::NotRun,
            1 => GateStatus::Running,
            2 => GateStatus::Complete,
            _ => GateStatus::Errored,
        }
    }
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GateStatus::NotRun => "not run",
            GateStatus::Running => "running",
            GateStatus::Complete => "complete",
            GateStatus::Errored => "errored",
        };
        f.write_str(name)
    }
}

/// A thread-safe gate ensuring an action is only performed one time
pub struct OnceGate {
    state: AtomicU8,
}

impl OnceGate {
    /// Create a gate that has never run
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(GateStatus::NotRun as u8),
        }
    }

    /// Current status of the gate
    pub fn status(&self) -> GateStatus {
        GateStatus::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Run `action` if no caller has claimed this gate yet.
    ///
    /// Returns `Ok(true)` when this call ran the action and `Ok(false)` when
    /// another call already claimed the gate, whether or not that call has
    /// finished. An error from the action is handed back unchanged; the gate
    /// is then `Errored`, or back to `NotRun` when `reset_on_error` is set.
    /// A panicking action is treated like a failing one before the panic
    /// continues to unwind.
    pub fn ensure<F, E>(&self, action: F, reset_on_error: bool) -> Result<bool, E>
    where
        F: FnOnce() -> Result<(), E>,
    {
        if !self.try_claim() {
            trace!(status = %self.status(), "gate already claimed, skipping action");
            return Ok(false);
        }

        let guard = RunGuard {
            gate: self,
            reset_on_error,
            armed: true,
        };

        match action() {
            Ok(()) => {
                guard.complete();
                Ok(true)
            }
            Err(err) => {
                drop(guard);
                Err(err)
            }
        }
    }

    /// Run an action that cannot fail. Returns whether this call ran it.
    pub fn ensure_infallible<F>(&self, action: F) -> bool
    where
        F: FnOnce(),
    {
        let result: Result<bool, Infallible> = self.ensure(
            || {
                action();
                Ok(())
            },
            false,
        );
        match result {
            Ok(ran) => ran,
            Err(never) => match never {},
        }
    }

    fn try_claim(&self) -> bool {
        self.state
            .compare_exchange(
                GateStatus::NotRun as u8,
                GateStatus::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    fn finish(&self, status: GateStatus) {
        self.state.store(status as u8, Ordering::Release);
    }
}

impl Default for OnceGate {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OnceGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnceGate")
            .field("status", &self.status())
            .finish()
    }
}

/// Moves a claimed gate out of `Running` however the action exits
struct RunGuard<'a> {
    gate: &'a OnceGate,
    reset_on_error: bool,
    armed: bool,
}

impl RunGuard<'_> {
    fn complete(mut self) {
        self.armed = false;
        self.gate.finish(GateStatus::Complete);
        debug!("gated action completed");
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if self.reset_on_error {
            self.gate.finish(GateStatus::NotRun);
            warn!("gated action failed, gate reset for retry");
        } else {
            self.gate.finish(GateStatus::Errored);
            warn!("gated action failed, gate closed");
        }
    }
}
