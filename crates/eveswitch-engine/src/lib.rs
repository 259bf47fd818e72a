//! Hotkey orchestration: ties gestures to window cycling.
//!
//! The [`Engine`] is the handler behind the dispatcher: given a fired
//! gesture it gates on client focus, resolves the active targets from the
//! latest world snapshot, asks the pure selection functions in [`select`]
//! for the next target, activates it through the [`Desktop`] capability and
//! records the result in [`select::SelectionMemory`]. It returns the
//! consumed decision the dispatcher acts on: an unconsumed press is
//! replayed to the previously focused application.

mod error;
pub mod select;

use std::{collections::HashMap, sync::Arc};

use eveswitch_world::{Desktop, WindowSnapshot, WorldView, resolve};
use tracing::{info, trace, warn};
use win_keycode::Gesture;

pub use crate::error::{Error, Result};
use crate::select::SelectionMemory;

/// Parsed hotkey configuration consumed from the configuration layer.
#[derive(Clone, Debug)]
pub struct EngineCfg {
    /// Gesture → configured character cycling order.
    pub character_hotkeys: HashMap<Gesture, Vec<String>>,
    /// Character gestures in configuration order; registration follows it.
    pub character_order: Vec<Gesture>,
    /// The distinguished gesture cycling login-screen windows.
    pub login_hotkey: Gesture,
    /// Only act while a client-family window has foreground focus.
    pub require_active_client: bool,
}

impl EngineCfg {
    /// Builds a config from raw gesture spec strings. Reports the first
    /// unparseable spec and the first pair of specs naming the same chord
    /// (two spellings such as "ctrl+1" and "control+1" parse to one
    /// gesture, and a silent collapse would drop a target list).
    pub fn from_specs(
        login_hotkey: &str,
        hotkeys: &[(String, Vec<String>)],
        require_active_client: bool,
    ) -> Result<Self> {
        let login = Gesture::parse(login_hotkey)
            .ok_or_else(|| Error::BadGesture(login_hotkey.to_string()))?;
        let mut character_hotkeys = HashMap::new();
        let mut character_order = Vec::new();
        for (spec, targets) in hotkeys {
            let gesture =
                Gesture::parse(spec).ok_or_else(|| Error::BadGesture(spec.to_string()))?;
            if gesture == login || character_hotkeys.insert(gesture, targets.clone()).is_some() {
                return Err(Error::DuplicateGesture(gesture));
            }
            character_order.push(gesture);
        }
        Ok(Self {
            character_hotkeys,
            character_order,
            login_hotkey: login,
            require_active_client,
        })
    }

    /// Every gesture that must be registered: login hotkey first, then the
    /// character gestures in configuration order.
    pub fn gestures(&self) -> Vec<Gesture> {
        let mut out = vec![self.login_hotkey];
        out.extend(self.character_order.iter().copied());
        out
    }
}

/// Hotkey handler: cycling policy over the live window world.
pub struct Engine {
    cfg: EngineCfg,
    world: WorldView,
    desktop: Arc<dyn Desktop>,
    memory: SelectionMemory,
}

impl Engine {
    /// Creates an engine over a world view and desktop capability.
    pub fn new(cfg: EngineCfg, world: WorldView, desktop: Arc<dyn Desktop>) -> Self {
        Self {
            cfg,
            world,
            desktop,
            memory: SelectionMemory::new(),
        }
    }

    /// Handles one fired gesture; returns whether the press is consumed.
    ///
    /// Not consumed when the focus gate rejects the press or no target is
    /// currently active, so the dispatcher replays the keystroke to the
    /// previously focused application.
    pub fn on_hotkey(&mut self, gesture: &Gesture) -> bool {
        let snapshot = self.world.snapshot();
        if self.cfg.require_active_client && !client_has_focus(self.desktop.as_ref(), &snapshot) {
            trace!(%gesture, "gated_client_not_focused");
            return false;
        }
        if *gesture == self.cfg.login_hotkey {
            return self.cycle_login(&snapshot);
        }
        self.cycle_character(gesture, &snapshot)
    }

    fn cycle_character(&mut self, gesture: &Gesture, snapshot: &WindowSnapshot) -> bool {
        let Some(targets) = self.cfg.character_hotkeys.get(gesture).cloned() else {
            // Registered but unconfigured gestures shouldn't exist; pass through.
            warn!(%gesture, "gesture_has_no_targets");
            return false;
        };
        let active = resolve::active_characters(snapshot, &targets);
        let current = self
            .desktop
            .foreground()
            .and_then(|hwnd| resolve::character_at(snapshot, hwnd));
        let remembered = self.memory.last_character(gesture).map(ToOwned::to_owned);
        let Some(next) = select::next_character(&active, current, remembered.as_deref()) else {
            trace!(%gesture, "no_active_character");
            return false;
        };
        let Some(hwnd) = resolve::character_window(snapshot, next) else {
            // The snapshot changed out from under the selection; let the
            // next poll catch up.
            warn!(character = next, "selected_character_window_missing");
            return false;
        };
        if !self.desktop.activate(hwnd) {
            // No focus change happened; pass the press through and leave
            // the memory pointing at the last window actually activated.
            warn!(character = next, %hwnd, "activation_refused");
            return false;
        }
        info!(%gesture, from = ?current, character = next, "activated_character");
        self.memory.remember_character(*gesture, next.to_string());
        true
    }

    fn cycle_login(&mut self, snapshot: &WindowSnapshot) -> bool {
        let active = resolve::login_windows(snapshot);
        let Some(hwnd) = select::next_login(&active, self.memory.last_login()) else {
            trace!("no_active_login_window");
            return false;
        };
        if !self.desktop.activate(hwnd) {
            warn!(%hwnd, "activation_refused");
            return false;
        }
        info!(%hwnd, "activated_login_window");
        self.memory.remember_login(hwnd);
        true
    }
}

fn client_has_focus(desktop: &dyn Desktop, snapshot: &WindowSnapshot) -> bool {
    desktop
        .foreground()
        .is_some_and(|hwnd| snapshot.window_at(hwnd).is_some())
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicBool, AtomicIsize, Ordering},
    };

    use eveswitch_world::{WindowEnumerator, WindowHandle, WindowInfo, World, WorldCfg};

    use super::*;

    struct FakeDesktop {
        foreground: AtomicIsize, // 0 = none
        activated: Mutex<Vec<WindowHandle>>,
        refuse: AtomicBool,
    }

    impl FakeDesktop {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                foreground: AtomicIsize::new(0),
                activated: Mutex::new(Vec::new()),
                refuse: AtomicBool::new(false),
            })
        }
        fn focus(&self, hwnd: isize) {
            self.foreground.store(hwnd, Ordering::SeqCst);
        }
        fn activated(&self) -> Vec<WindowHandle> {
            self.activated.lock().unwrap().clone()
        }
        fn refuse_activation(&self) {
            self.refuse.store(true, Ordering::SeqCst);
        }
    }

    impl Desktop for FakeDesktop {
        fn foreground(&self) -> Option<WindowHandle> {
            match self.foreground.load(Ordering::SeqCst) {
                0 => None,
                h => Some(WindowHandle(h)),
            }
        }
        fn activate(&self, hwnd: WindowHandle) -> bool {
            if self.refuse.load(Ordering::SeqCst) {
                return false;
            }
            self.activated.lock().unwrap().push(hwnd);
            // Activation moves focus, as SetForegroundWindow would.
            self.focus(hwnd.0);
            true
        }
    }

    struct FixedWindows(Mutex<Vec<WindowInfo>>);

    impl WindowEnumerator for FixedWindows {
        fn enumerate(&self) -> eveswitch_world::Result<Vec<WindowInfo>> {
            Ok(self.0.lock().unwrap().clone())
        }
    }

    fn win(title: &str, hwnd: isize) -> WindowInfo {
        WindowInfo {
            pid: 42,
            title: title.to_string(),
            hwnd: WindowHandle(hwnd),
        }
    }

    fn engine(windows: Vec<WindowInfo>, require_focus: bool) -> (Engine, Arc<FakeDesktop>, World) {
        let world = World::new(
            Arc::new(FixedWindows(Mutex::new(windows))),
            &WorldCfg::default(),
        );
        world.refresh();
        let desktop = FakeDesktop::new();
        let cfg = EngineCfg::from_specs(
            "alt+f1",
            &[(
                "alt+1".to_string(),
                vec!["A".to_string(), "B".to_string(), "C".to_string()],
            )],
            require_focus,
        )
        .expect("cfg");
        let eng = Engine::new(cfg, world.view(), desktop.clone());
        (eng, desktop, world)
    }

    fn alt1() -> Gesture {
        Gesture::parse("alt+1").unwrap()
    }

    #[test]
    fn cycles_skipping_inactive_characters() {
        // Configured [A, B, C]; B's client is closed.
        let (mut eng, desktop, _world) = engine(
            vec![win("EVE - A", 1), win("EVE - C", 3)],
            false,
        );
        desktop.focus(1); // A focused
        assert!(eng.on_hotkey(&alt1()));
        assert_eq!(desktop.activated(), vec![WindowHandle(3)]); // A -> C
        assert!(eng.on_hotkey(&alt1()));
        assert_eq!(
            desktop.activated(),
            vec![WindowHandle(3), WindowHandle(1)] // C wraps to A
        );
    }

    #[test]
    fn falls_back_to_memory_when_focus_left_the_set() {
        let (mut eng, desktop, _world) = engine(
            vec![win("EVE - A", 1), win("EVE - B", 2), win("Other", 9)],
            false,
        );
        desktop.focus(1);
        assert!(eng.on_hotkey(&alt1())); // A -> B, remembered
        desktop.focus(9); // user switched to an unrelated window
        assert!(eng.on_hotkey(&alt1())); // remembered B is still active
        assert_eq!(
            desktop.activated(),
            vec![WindowHandle(2), WindowHandle(2)]
        );
    }

    #[test]
    fn no_active_target_passes_through() {
        let (mut eng, _desktop, _world) = engine(vec![win("EVE", 5)], false);
        assert!(!eng.on_hotkey(&alt1()));
    }

    #[test]
    fn focus_gate_blocks_when_client_family_unfocused() {
        let (mut eng, desktop, _world) = engine(vec![win("EVE - A", 1)], true);
        // Foreground window is not in the snapshot.
        desktop.focus(0x999);
        assert!(!eng.on_hotkey(&alt1()));
        assert!(desktop.activated().is_empty());
        // Focus a client window; the gate opens.
        desktop.focus(1);
        assert!(eng.on_hotkey(&alt1()));
    }

    #[test]
    fn login_hotkey_cycles_login_windows_in_snapshot_order() {
        let (mut eng, desktop, _world) = engine(
            vec![win("EVE", 10), win("EVE - A", 1), win("EVE", 20)],
            false,
        );
        let login = Gesture::parse("alt+f1").unwrap();
        assert!(eng.on_hotkey(&login));
        assert!(eng.on_hotkey(&login));
        assert!(eng.on_hotkey(&login));
        assert_eq!(
            desktop.activated(),
            vec![WindowHandle(10), WindowHandle(20), WindowHandle(10)]
        );
    }

    #[test]
    fn unconfigured_gesture_passes_through() {
        let (mut eng, _desktop, _world) = engine(vec![win("EVE - A", 1)], false);
        assert!(!eng.on_hotkey(&Gesture::parse("ctrl+alt+z").unwrap()));
    }

    #[test]
    fn bad_spec_is_reported() {
        let err = EngineCfg::from_specs("win+q", &[], false).expect_err("bad");
        assert!(matches!(err, Error::BadGesture(_)));
    }

    #[test]
    fn same_chord_spelled_twice_is_reported() {
        // "ctrl" and "control" are aliases; both keys name one gesture.
        let err = EngineCfg::from_specs(
            "alt+f1",
            &[
                ("ctrl+1".to_string(), vec!["A".to_string()]),
                ("control+1".to_string(), vec!["B".to_string()]),
            ],
            false,
        )
        .expect_err("duplicate");
        assert!(matches!(err, Error::DuplicateGesture(_)));
    }

    #[test]
    fn character_spec_clashing_with_login_is_reported() {
        let err = EngineCfg::from_specs(
            "alt+f1",
            &[("alt+f1".to_string(), vec!["A".to_string()])],
            false,
        )
        .expect_err("clash");
        assert!(matches!(err, Error::DuplicateGesture(_)));
    }

    #[test]
    fn gestures_follow_configuration_order() {
        let cfg = EngineCfg::from_specs(
            "alt+f1",
            &[
                ("alt+3".to_string(), vec!["C".to_string()]),
                ("alt+1".to_string(), vec!["A".to_string()]),
                ("alt+2".to_string(), vec!["B".to_string()]),
            ],
            false,
        )
        .expect("cfg");
        let specs: Vec<String> = cfg.gestures().iter().map(Gesture::to_string).collect();
        assert_eq!(specs, ["alt+f1", "alt+3", "alt+1", "alt+2"]);
    }

    #[test]
    fn refused_activation_passes_through_and_leaves_no_memory() {
        let (mut eng, desktop, _world) = engine(vec![win("EVE - A", 1), win("EVE", 5)], false);
        desktop.refuse_activation();
        assert!(!eng.on_hotkey(&alt1()));
        assert_eq!(eng.memory.last_character(&alt1()), None);
        let login = Gesture::parse("alt+f1").unwrap();
        assert!(!eng.on_hotkey(&login));
        assert_eq!(eng.memory.last_login(), None);
        assert!(desktop.activated().is_empty());
    }
}
