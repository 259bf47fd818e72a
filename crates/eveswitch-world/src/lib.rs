//! Window snapshot service and target resolution.
//!
//! A [`World`] polls the OS process/window table on a fixed interval and
//! caches the latest complete [`WindowSnapshot`] behind an atomically
//! swapped `Arc`: readers never block and never observe a torn snapshot,
//! at the cost of being at most one poll interval stale. Enumeration is
//! supplied through the [`WindowEnumerator`] trait; no filtering by naming
//! convention happens here — that is [`resolve`]'s job, so the snapshot
//! stays a generic, cheaply testable primitive.

mod error;
pub mod resolve;
#[cfg(target_os = "windows")]
pub mod sys;

use std::{
    fmt,
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crossbeam_channel::{Sender, bounded, select, tick};
use parking_lot::RwLock;
use tracing::{debug, warn};

pub use crate::error::{Error, Result};

/// Native top-level window handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// One enumerated top-level window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowInfo {
    /// Owning process id.
    pub pid: u32,
    /// Window title at enumeration time.
    pub title: String,
    /// Native handle.
    pub hwnd: WindowHandle,
}

/// Immutable point-in-time view of the enumerated windows.
#[derive(Clone, Debug)]
pub struct WindowSnapshot {
    /// Windows in raw enumeration order.
    pub windows: Vec<WindowInfo>,
    /// When the enumeration completed.
    pub taken: Instant,
}

impl WindowSnapshot {
    /// The snapshot visible before the first poll completes.
    pub fn empty() -> Self {
        Self {
            windows: Vec::new(),
            taken: Instant::now(),
        }
    }

    /// The enumerated window carrying `hwnd`, if present.
    pub fn window_at(&self, hwnd: WindowHandle) -> Option<&WindowInfo> {
        self.windows.iter().find(|w| w.hwnd == hwnd)
    }
}

/// Supplies full window enumerations for the polled process family.
pub trait WindowEnumerator: Send + Sync {
    /// Enumerates the current top-level windows.
    fn enumerate(&self) -> Result<Vec<WindowInfo>>;
}

/// Foreground-window queries and activation, delegated to the OS.
pub trait Desktop: Send + Sync {
    /// Handle of the currently focused window, if any.
    fn foreground(&self) -> Option<WindowHandle>;
    /// Brings `hwnd` to the foreground; false if the OS refused.
    fn activate(&self, hwnd: WindowHandle) -> bool;
}

/// Polling configuration.
#[derive(Clone, Debug)]
pub struct WorldCfg {
    /// Poll interval; balances input latency against enumeration cost.
    pub poll_interval: Duration,
}

impl Default for WorldCfg {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
        }
    }
}

struct Shared {
    snapshot: RwLock<Arc<WindowSnapshot>>,
}

/// Periodic snapshot provider. Owns the polling thread; hand out
/// [`WorldView`] clones to readers.
pub struct World {
    shared: Arc<Shared>,
    enumerator: Arc<dyn WindowEnumerator>,
    poll_interval: Duration,
    worker: Option<(Sender<()>, JoinHandle<()>)>,
}

impl World {
    /// Creates a stopped world over the given enumerator.
    pub fn new(enumerator: Arc<dyn WindowEnumerator>, cfg: &WorldCfg) -> Self {
        Self {
            shared: Arc::new(Shared {
                snapshot: RwLock::new(Arc::new(WindowSnapshot::empty())),
            }),
            enumerator,
            poll_interval: cfg.poll_interval,
            worker: None,
        }
    }

    /// Performs one enumeration immediately. A failed enumeration leaves
    /// the previous snapshot visible.
    pub fn refresh(&self) {
        poll(&self.shared, self.enumerator.as_ref());
    }

    /// Starts the polling thread. No-op if already running.
    pub fn start(&mut self) {
        if self.worker.is_some() {
            return;
        }
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let shared = self.shared.clone();
        let enumerator = self.enumerator.clone();
        let ticker = tick(self.poll_interval);
        let handle = thread::spawn(move || {
            debug!("world_poll_started");
            poll(&shared, enumerator.as_ref());
            loop {
                select! {
                    recv(stop_rx) -> _ => break,
                    recv(ticker) -> _ => poll(&shared, enumerator.as_ref()),
                }
            }
            debug!("world_poll_stopped");
        });
        self.worker = Some((stop_tx, handle));
    }

    /// Stops the polling thread. After this returns, no further snapshot
    /// replacement occurs.
    pub fn stop(&mut self) {
        if let Some((stop_tx, handle)) = self.worker.take() {
            let _ = stop_tx.send(());
            let _ = handle.join();
        }
    }

    /// Latest completed snapshot.
    pub fn snapshot(&self) -> Arc<WindowSnapshot> {
        self.shared.snapshot.read().clone()
    }

    /// Cheap clonable read handle.
    pub fn view(&self) -> WorldView {
        WorldView {
            shared: self.shared.clone(),
        }
    }
}

impl Drop for World {
    fn drop(&mut self) {
        self.stop();
    }
}

fn poll(shared: &Shared, enumerator: &dyn WindowEnumerator) {
    match enumerator.enumerate() {
        Ok(windows) => {
            let snap = Arc::new(WindowSnapshot {
                windows,
                taken: Instant::now(),
            });
            *shared.snapshot.write() = snap;
        }
        // Keep the previous snapshot rather than exposing a partial one.
        Err(e) => warn!(error = %e, "snapshot_failed"),
    }
}

/// Read-only handle to the latest snapshot.
#[derive(Clone)]
pub struct WorldView {
    shared: Arc<Shared>,
}

impl WorldView {
    /// Latest completed snapshot.
    pub fn snapshot(&self) -> Arc<WindowSnapshot> {
        self.shared.snapshot.read().clone()
    }
}
