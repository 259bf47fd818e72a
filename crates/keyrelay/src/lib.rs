//! Re-injects intercepted key gestures to the foreground application.
//!
//! A [`KeyRelay`] encodes a gesture into an ordered down/up transition
//! sequence via [`encode`] and submits it through a [`Poster`]. The Win32
//! SendInput backend lives in [`sys`]; tests and non-Windows hosts supply
//! their own poster. [`KeyRelay`] implements [`win_hotkey::Replay`], which
//! is how the dispatcher's pass-through sequence reaches it.

mod encode;
mod error;
#[cfg(target_os = "windows")]
pub mod sys;

use std::sync::Arc;

use tracing::{info, trace};
use win_keycode::Gesture;

pub use crate::{
    encode::{KeyEvent, encode},
    error::{Error, Result},
};

/// Submits encoded key transitions to the OS input queue.
pub trait Poster: Send + Sync {
    /// Injects the whole sequence, all-or-nothing.
    fn post(&self, events: &[KeyEvent]) -> Result<()>;
}

/// Gesture re-injector over a pluggable [`Poster`].
#[derive(Clone)]
pub struct KeyRelay {
    poster: Arc<dyn Poster>,
}

impl KeyRelay {
    /// Creates a relay backed by Win32 SendInput.
    #[cfg(target_os = "windows")]
    pub fn new() -> Self {
        Self::with_poster(Arc::new(sys::Win32Poster))
    }

    /// Creates a relay over a custom poster.
    pub fn with_poster(poster: Arc<dyn Poster>) -> Self {
        Self { poster }
    }

    /// Encodes and injects one gesture.
    pub fn send(&self, gesture: &Gesture) -> Result<()> {
        let events = encode(gesture);
        trace!(%gesture, count = events.len(), "posting_gesture");
        self.poster.post(&events)?;
        info!(%gesture, "replayed_gesture");
        Ok(())
    }
}

#[cfg(target_os = "windows")]
impl Default for KeyRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl win_hotkey::Replay for KeyRelay {
    fn replay(&self, gesture: &Gesture) -> win_hotkey::Result<()> {
        self.send(gesture)
            .map_err(|e| win_hotkey::Error::Replay(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use win_keycode::{Key, Modifiers};

    use super::*;

    struct CountingPoster(AtomicUsize, Mutex<Vec<KeyEvent>>);

    impl CountingPoster {
        fn new() -> Self {
            Self(AtomicUsize::new(0), Mutex::new(Vec::new()))
        }
    }

    impl Poster for CountingPoster {
        fn post(&self, events: &[KeyEvent]) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            self.1.lock().unwrap().extend_from_slice(events);
            Ok(())
        }
    }

    struct TruncatingPoster;

    impl Poster for TruncatingPoster {
        fn post(&self, events: &[KeyEvent]) -> Result<()> {
            Err(Error::InjectionPartial {
                submitted: events.len(),
                injected: events.len() - 1,
            })
        }
    }

    #[test]
    fn send_posts_one_full_sequence() {
        let poster = Arc::new(CountingPoster::new());
        let relay = KeyRelay::with_poster(poster.clone());
        let g = Gesture::new(Modifiers::ALT, Key::Digit3);
        relay.send(&g).expect("send");
        assert_eq!(poster.0.load(Ordering::SeqCst), 1);
        assert_eq!(poster.1.lock().unwrap().as_slice(), encode(&g).as_slice());
    }

    #[test]
    fn partial_injection_surfaces_as_error() {
        let relay = KeyRelay::with_poster(Arc::new(TruncatingPoster));
        let err = relay
            .send(&Gesture::new(Modifiers::empty(), Key::F5))
            .expect_err("partial");
        assert!(matches!(err, Error::InjectionPartial { submitted: 2, injected: 1 }));
    }

    #[test]
    fn replay_trait_maps_errors() {
        use win_hotkey::Replay as _;
        let relay = KeyRelay::with_poster(Arc::new(TruncatingPoster));
        let err = relay
            .replay(&Gesture::new(Modifiers::empty(), Key::F5))
            .expect_err("partial");
        assert!(matches!(err, win_hotkey::Error::Replay(_)));
    }
}
