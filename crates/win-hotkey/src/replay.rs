//! The unregister → inject → re-register pass-through sequence.

use tracing::{trace, warn};

use crate::{Manager, RegisteredHotkey, Result};

/// One pass-through of an unconsumed hotkey press, as an explicit
/// three-step sequence.
///
/// The steps are order-sensitive: the binding must be gone before the
/// injection (or the injected keystroke would re-enter as the same
/// hotkey), and the gesture must be re-registered afterwards so future
/// presses keep working. Re-registration uses a fresh id; the retired id
/// is never reused, so a late OS notification for it is ignored.
///
/// Known re-entrancy hazard: the dispatch channel is single-threaded, so
/// no second notification for *this* gesture can interleave, but the
/// injected keystroke can legitimately match a *different* still-registered
/// hotkey and fire it. That is accepted behavior, not suppressed here.
pub(crate) struct ReplaySequence {
    entry: RegisteredHotkey,
    step: Step,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Unregister,
    Inject,
    Reregister,
}

impl ReplaySequence {
    pub(crate) fn new(entry: RegisteredHotkey) -> Self {
        Self {
            entry,
            step: Step::Unregister,
        }
    }

    /// Runs the sequence to completion and returns the fresh id.
    ///
    /// Unbind and inject failures are logged and do not abort: the
    /// re-registration step always runs, so a single failed replay cannot
    /// take the gesture out of service. Only a failed re-registration is
    /// returned to the caller.
    pub(crate) fn run(mut self, mgr: &mut Manager) -> Result<u32> {
        loop {
            trace!(step = ?self.step, gesture = %self.entry.gesture, "replay_step");
            match self.step {
                Step::Unregister => {
                    if let Some(pos) = mgr.entries.iter().position(|e| e.id == self.entry.id) {
                        mgr.entries.remove(pos);
                    }
                    if let Err(e) = mgr.os.unbind(self.entry.id) {
                        warn!(id = self.entry.id, error = %e, "replay_unbind_failed");
                    }
                    self.step = Step::Inject;
                }
                Step::Inject => {
                    if let Err(e) = mgr.relay.replay(&self.entry.gesture) {
                        warn!(gesture = %self.entry.gesture, error = %e, "replay_inject_failed");
                    }
                    self.step = Step::Reregister;
                }
                Step::Reregister => {
                    let id = mgr.fresh_id();
                    mgr.os.bind(id, self.entry.flags, self.entry.vk)?;
                    mgr.entries.push(RegisteredHotkey {
                        id,
                        gesture: self.entry.gesture,
                        flags: self.entry.flags,
                        vk: self.entry.vk,
                    });
                    return Ok(id);
                }
            }
        }
    }
}
