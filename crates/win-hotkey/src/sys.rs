//! Win32 backend: a hidden message-only window plus a dedicated message
//! loop thread. WM_HOTKEY notifications are forwarded as bare registration
//! ids over a crossbeam channel; RegisterHotKey/UnregisterHotKey target the
//! hidden window so notifications always land on the loop thread.

use std::{
    ffi::c_void,
    sync::{Arc, Mutex},
    thread::{self, JoinHandle},
};

use crossbeam_channel::{Receiver, bounded, unbounded};
use tracing::{debug, warn};
use windows::{
    Win32::{
        Foundation::{HWND, LPARAM, WPARAM},
        System::LibraryLoader::GetModuleHandleW,
        UI::{
            Input::KeyboardAndMouse::{HOT_KEY_MODIFIERS, RegisterHotKey, UnregisterHotKey},
            WindowsAndMessaging::{
                CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW,
                HWND_MESSAGE, MSG, PostMessageW, RegisterClassW, TranslateMessage, WINDOW_EX_STYLE,
                WINDOW_STYLE, WM_APP, WM_HOTKEY, WNDCLASSW,
            },
        },
    },
    core::w,
};

use crate::{Error, Registrar, Result};

/// Private message asking the loop thread to shut down.
const WM_STOP_LOOP: u32 = WM_APP + 1;

/// Handle to the hidden window and its message loop thread.
pub struct Win32Hotkeys {
    hwnd: isize,
    thread: Mutex<Option<JoinHandle<()>>>,
}

// The raw HWND is only ever used with thread-safe user32 calls
// (RegisterHotKey/UnregisterHotKey/PostMessageW).
unsafe impl Send for Win32Hotkeys {}
unsafe impl Sync for Win32Hotkeys {}

impl Win32Hotkeys {
    /// Spawns the message loop thread and returns the registrar handle plus
    /// the channel of fired registration ids.
    pub fn spawn() -> Result<(Arc<Self>, Receiver<u32>)> {
        let (fired_tx, fired_rx) = unbounded::<u32>();
        let (ready_tx, ready_rx) = bounded::<Result<isize>>(1);

        let handle = thread::Builder::new()
            .name("win-hotkey-loop".into())
            .spawn(move || {
                let hwnd = match create_message_window() {
                    Ok(h) => h,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(hwnd));
                debug!(hwnd, "hotkey_message_loop_started");
                run_message_loop(hwnd, &fired_tx);
                unsafe {
                    let _ = DestroyWindow(HWND(hwnd as *mut c_void));
                }
                debug!("hotkey_message_loop_exited");
            })
            .map_err(|e| Error::Os(e.to_string()))?;

        let hwnd = ready_rx
            .recv()
            .map_err(|_| Error::Os("message loop thread died during startup".into()))??;
        let this = Arc::new(Self {
            hwnd,
            thread: Mutex::new(Some(handle)),
        });
        Ok((this, fired_rx))
    }

    fn hwnd(&self) -> HWND {
        HWND(self.hwnd as *mut c_void)
    }
}

impl Registrar for Win32Hotkeys {
    fn bind(&self, id: u32, flags: u32, vk: u16) -> Result<()> {
        unsafe {
            RegisterHotKey(
                Some(self.hwnd()),
                id as i32,
                HOT_KEY_MODIFIERS(flags),
                u32::from(vk),
            )
        }
        .map_err(|e| Error::Os(e.message()))
    }

    fn unbind(&self, id: u32) -> Result<()> {
        unsafe { UnregisterHotKey(Some(self.hwnd()), id as i32) }
            .map_err(|e| Error::Os(e.message()))
    }

    fn close(&self) -> Result<()> {
        let Some(handle) = self.thread.lock().unwrap().take() else {
            return Ok(());
        };
        unsafe {
            PostMessageW(Some(self.hwnd()), WM_STOP_LOOP, WPARAM(0), LPARAM(0))
                .map_err(|e| Error::Os(e.message()))?;
        }
        if handle.join().is_err() {
            warn!("hotkey_loop_thread_panicked");
        }
        Ok(())
    }
}

fn create_message_window() -> Result<isize> {
    unsafe {
        let instance = GetModuleHandleW(None).map_err(|e| Error::Os(e.message()))?;
        let class_name = w!("eveswitch-hotkey");
        let class = WNDCLASSW {
            lpfnWndProc: Some(DefWindowProcW),
            hInstance: instance.into(),
            lpszClassName: class_name,
            ..Default::default()
        };
        // Re-registering an existing class fails; ignore and reuse it.
        let _ = RegisterClassW(&class);
        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE(0),
            class_name,
            w!("eveswitch hotkeys"),
            WINDOW_STYLE(0),
            0,
            0,
            0,
            0,
            Some(HWND_MESSAGE),
            None,
            Some(instance.into()),
            None,
        )
        .map_err(|e| Error::Os(e.message()))?;
        Ok(hwnd.0 as isize)
    }
}

fn run_message_loop(hwnd: isize, fired: &crossbeam_channel::Sender<u32>) {
    let hwnd = HWND(hwnd as *mut c_void);
    let mut msg = MSG::default();
    loop {
        let got = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        if got.0 <= 0 {
            break;
        }
        match msg.message {
            WM_HOTKEY => {
                // wParam carries the registration id.
                if fired.send(msg.wParam.0 as u32).is_err() {
                    break;
                }
            }
            WM_STOP_LOOP if msg.hwnd == hwnd => break,
            _ => unsafe {
                let _ = TranslateMessage(&msg);
                let _ = DispatchMessageW(&msg);
            },
        }
    }
}
