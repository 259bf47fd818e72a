//! Global hotkey registry and dispatcher.
//!
//! The OS delivers hotkey notifications as bare registration ids on a
//! single-threaded message channel; the [`Manager`] owns the id → gesture
//! mapping and the consumed/pass-through decision. OS binding is behind the
//! [`Registrar`] trait and keystroke replay behind the [`Replay`] trait, so
//! the whole dispatch path is drivable with synthetic notifications in
//! tests. The Win32 message-loop backend lives in [`sys`].
//!
//! Global hotkeys are exclusive-or: either we swallow the keystroke, or the
//! OS already intercepted it and the previously focused application never
//! saw it. An unconsumed press therefore runs the pass-through sequence:
//! unregister, re-inject the gesture, register again under a fresh id.

mod error;
mod replay;
#[cfg(target_os = "windows")]
pub mod sys;

use std::sync::Arc;

use tracing::{debug, trace, warn};
use win_keycode::Gesture;

pub use crate::error::{Error, Result};
use crate::replay::ReplaySequence;

/// OS-level hotkey binding operations.
pub trait Registrar: Send + Sync {
    /// Binds `id` to the native modifier flags and virtual key.
    fn bind(&self, id: u32, flags: u32, vk: u16) -> Result<()>;
    /// Releases the binding for `id`.
    fn unbind(&self, id: u32) -> Result<()>;
    /// Releases the underlying notification channel. Must be idempotent.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Replays a gesture to the foreground application as if typed.
pub trait Replay: Send + Sync {
    /// Injects the gesture's full down/up sequence.
    fn replay(&self, gesture: &Gesture) -> Result<()>;
}

/// A live registration owned by the manager.
#[derive(Clone, Debug)]
struct RegisteredHotkey {
    id: u32,
    gesture: Gesture,
    flags: u32,
    vk: u16,
}

/// Outcome of dispatching one hotkey notification, observable by the
/// caller for logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The id matched no live registration. Expected during the
    /// pass-through sequence; never an error.
    Ignored,
    /// The handler consumed the press; the keystroke stays swallowed.
    Consumed(Gesture),
    /// The handler declined; the keystroke was re-injected and the gesture
    /// re-registered under a fresh id.
    Replayed(Gesture),
    /// The handler declined and the pass-through sequence could not
    /// re-register the gesture. The gesture is out of service until
    /// registered again.
    ReplayFailed(Gesture),
}

/// Registry and dispatcher for global hotkeys.
pub struct Manager {
    os: Arc<dyn Registrar>,
    relay: Arc<dyn Replay>,
    entries: Vec<RegisteredHotkey>,
    // Monotonic; never reused while this manager lives, so a late
    // notification for a dead id can never alias a new registration.
    next_id: u32,
    disposed: bool,
}

impl Manager {
    /// Creates a manager over the given OS binding and replay backends.
    pub fn new(os: Arc<dyn Registrar>, relay: Arc<dyn Replay>) -> Self {
        Self {
            os,
            relay,
            entries: Vec::new(),
            next_id: 1,
            disposed: false,
        }
    }

    fn fresh_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Registers a gesture and returns its registration id.
    pub fn register(&mut self, gesture: Gesture) -> Result<u32> {
        if self.entries.iter().any(|e| e.gesture == gesture) {
            return Err(Error::AlreadyRegistered(gesture));
        }
        let id = self.fresh_id();
        let flags = gesture.mods.bits();
        let vk = gesture.key.vk();
        self.os.bind(id, flags, vk).map_err(|e| match e {
            Error::Os(reason) => Error::OsRegistrationFailed { gesture, reason },
            other => other,
        })?;
        debug!(id, %gesture, "registered_hotkey");
        self.entries.push(RegisteredHotkey {
            id,
            gesture,
            flags,
            vk,
        });
        Ok(id)
    }

    /// Unregisters a gesture, releasing its OS binding.
    pub fn unregister(&mut self, gesture: &Gesture) -> Result<()> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.gesture == *gesture)
            .ok_or(Error::NotRegistered(*gesture))?;
        let entry = self.entries.remove(pos);
        let res = self.os.unbind(entry.id);
        debug!(id = entry.id, %gesture, "unregistered_hotkey");
        res
    }

    /// Whether the gesture currently has a live registration.
    pub fn is_registered(&self, gesture: &Gesture) -> bool {
        self.entries.iter().any(|e| e.gesture == *gesture)
    }

    /// The live registration id for a gesture, if any.
    pub fn registration_id(&self, gesture: &Gesture) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.gesture == *gesture)
            .map(|e| e.id)
    }

    /// Dispatches one OS notification carrying a registration id.
    ///
    /// The handler decides whether the press is consumed. If it declines,
    /// the original keystroke is replayed and the gesture re-registered;
    /// failures in that sequence are logged and reflected in the returned
    /// outcome, never propagated as errors, so one failed replay cannot
    /// disable the rest of the hotkey set.
    pub fn dispatch<F>(&mut self, id: u32, handler: F) -> Dispatch
    where
        F: FnOnce(&Gesture) -> bool,
    {
        let Some(entry) = self.entries.iter().find(|e| e.id == id).cloned() else {
            // Expected for ids retired by the pass-through sequence.
            trace!(id, "unknown_hotkey_id_ignored");
            return Dispatch::Ignored;
        };
        if handler(&entry.gesture) {
            trace!(id, gesture = %entry.gesture, "hotkey_consumed");
            return Dispatch::Consumed(entry.gesture);
        }
        let gesture = entry.gesture;
        match ReplaySequence::new(entry).run(self) {
            Ok(new_id) => {
                trace!(%gesture, new_id, "hotkey_replayed");
                Dispatch::Replayed(gesture)
            }
            Err(e) => {
                warn!(%gesture, error = %e, "replay_sequence_failed");
                Dispatch::ReplayFailed(gesture)
            }
        }
    }

    /// Unregisters every remaining hotkey and releases the OS message
    /// channel. Best-effort and idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        for entry in self.entries.drain(..) {
            if let Err(e) = self.os.unbind(entry.id) {
                warn!(id = entry.id, gesture = %entry.gesture, error = %e, "unbind_failed_on_dispose");
            }
        }
        if let Err(e) = self.os.close() {
            warn!(error = %e, "channel_close_failed_on_dispose");
        }
    }
}

impl Drop for Manager {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use win_keycode::{Key, Modifiers};

    use super::*;

    /// Records bind/unbind/close calls; optionally refuses binds.
    #[derive(Default)]
    struct FakeOs {
        calls: Mutex<Vec<String>>,
        refuse_binds: Mutex<bool>,
    }

    impl FakeOs {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Registrar for FakeOs {
        fn bind(&self, id: u32, _flags: u32, _vk: u16) -> Result<()> {
            if *self.refuse_binds.lock().unwrap() {
                return Err(Error::Os("chord claimed elsewhere".into()));
            }
            self.calls.lock().unwrap().push(format!("bind:{}", id));
            Ok(())
        }
        fn unbind(&self, id: u32) -> Result<()> {
            self.calls.lock().unwrap().push(format!("unbind:{}", id));
            Ok(())
        }
        fn close(&self) -> Result<()> {
            self.calls.lock().unwrap().push("close".into());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeRelay {
        replayed: Mutex<Vec<Gesture>>,
    }

    impl Replay for FakeRelay {
        fn replay(&self, gesture: &Gesture) -> Result<()> {
            self.replayed.lock().unwrap().push(*gesture);
            Ok(())
        }
    }

    fn gesture() -> Gesture {
        Gesture::new(Modifiers::ALT, Key::Digit1)
    }

    fn manager() -> (Manager, Arc<FakeOs>, Arc<FakeRelay>) {
        let os = Arc::new(FakeOs::default());
        let relay = Arc::new(FakeRelay::default());
        (Manager::new(os.clone(), relay.clone()), os, relay)
    }

    #[test]
    fn duplicate_registration_fails() {
        let (mut mgr, _os, _relay) = manager();
        mgr.register(gesture()).expect("first");
        assert_eq!(
            mgr.register(gesture()),
            Err(Error::AlreadyRegistered(gesture()))
        );
    }

    #[test]
    fn reregister_after_unregister_gets_fresh_id() {
        let (mut mgr, _os, _relay) = manager();
        let first = mgr.register(gesture()).expect("first");
        mgr.unregister(&gesture()).expect("unregister");
        let second = mgr.register(gesture()).expect("second");
        assert_ne!(first, second);
    }

    #[test]
    fn unregister_missing_fails() {
        let (mut mgr, _os, _relay) = manager();
        assert_eq!(
            mgr.unregister(&gesture()),
            Err(Error::NotRegistered(gesture()))
        );
    }

    #[test]
    fn os_refusal_surfaces_and_adds_no_entry() {
        let (mut mgr, os, _relay) = manager();
        *os.refuse_binds.lock().unwrap() = true;
        let err = mgr.register(gesture()).expect_err("refused");
        assert!(matches!(err, Error::OsRegistrationFailed { .. }));
        assert!(!mgr.is_registered(&gesture()));
    }

    #[test]
    fn unknown_id_is_silently_ignored() {
        let (mut mgr, _os, _relay) = manager();
        assert_eq!(mgr.dispatch(42, |_| panic!("no lookup hit")), Dispatch::Ignored);
    }

    #[test]
    fn consumed_press_leaves_registration_alone() {
        let (mut mgr, os, relay) = manager();
        let id = mgr.register(gesture()).expect("register");
        let d = mgr.dispatch(id, |_| true);
        assert_eq!(d, Dispatch::Consumed(gesture()));
        assert_eq!(mgr.registration_id(&gesture()), Some(id));
        assert!(relay.replayed.lock().unwrap().is_empty());
        assert_eq!(os.calls(), vec![format!("bind:{}", id)]);
    }

    #[test]
    fn unconsumed_press_runs_unbind_inject_rebind_in_order() {
        let (mut mgr, os, relay) = manager();
        let id = mgr.register(gesture()).expect("register");
        let d = mgr.dispatch(id, |_| false);
        assert_eq!(d, Dispatch::Replayed(gesture()));
        assert_eq!(relay.replayed.lock().unwrap().as_slice(), &[gesture()]);
        let new_id = mgr.registration_id(&gesture()).expect("re-registered");
        assert_ne!(new_id, id);
        assert_eq!(
            os.calls(),
            vec![
                format!("bind:{}", id),
                format!("unbind:{}", id),
                format!("bind:{}", new_id),
            ]
        );
        // A second fire of the same physical key resolves via the new id.
        assert_eq!(mgr.dispatch(id, |_| true), Dispatch::Ignored);
        assert_eq!(mgr.dispatch(new_id, |_| true), Dispatch::Consumed(gesture()));
    }

    #[test]
    fn failed_reregistration_surfaces_in_outcome() {
        let (mut mgr, os, relay) = manager();
        let id = mgr.register(gesture()).expect("register");
        *os.refuse_binds.lock().unwrap() = true;
        let d = mgr.dispatch(id, |_| false);
        assert_eq!(d, Dispatch::ReplayFailed(gesture()));
        // The keystroke was still injected, but the gesture dropped out of
        // the registry.
        assert_eq!(relay.replayed.lock().unwrap().as_slice(), &[gesture()]);
        assert!(!mgr.is_registered(&gesture()));
    }

    #[test]
    fn dispose_unbinds_everything_and_is_idempotent() {
        let (mut mgr, os, _relay) = manager();
        let a = mgr.register(gesture()).expect("a");
        let b = mgr
            .register(Gesture::new(Modifiers::ALT, Key::Digit2))
            .expect("b");
        mgr.dispose();
        mgr.dispose();
        let calls = os.calls();
        assert_eq!(
            calls,
            vec![
                format!("bind:{}", a),
                format!("bind:{}", b),
                format!("unbind:{}", a),
                format!("unbind:{}", b),
                "close".to_string(),
            ]
        );
    }
}
