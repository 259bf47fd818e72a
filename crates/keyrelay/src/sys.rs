//! Win32 SendInput backend.

use windows::Win32::UI::Input::KeyboardAndMouse::{
    INPUT, INPUT_0, INPUT_KEYBOARD, KEYBD_EVENT_FLAGS, KEYBDINPUT, KEYEVENTF_EXTENDEDKEY,
    KEYEVENTF_KEYUP, SendInput, VIRTUAL_KEY,
};

use crate::{Error, KeyEvent, Poster, Result};

/// Poster that submits transitions through SendInput.
pub struct Win32Poster;

fn to_input(event: &KeyEvent) -> INPUT {
    let mut flags = KEYBD_EVENT_FLAGS(0);
    if event.up {
        flags |= KEYEVENTF_KEYUP;
    }
    if event.extended {
        flags |= KEYEVENTF_EXTENDEDKEY;
    }
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(event.vk),
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

impl Poster for Win32Poster {
    fn post(&self, events: &[KeyEvent]) -> Result<()> {
        let inputs: Vec<INPUT> = events.iter().map(to_input).collect();
        let injected = unsafe { SendInput(&inputs, std::mem::size_of::<INPUT>() as i32) };
        if injected as usize != inputs.len() {
            return Err(Error::InjectionPartial {
                submitted: inputs.len(),
                injected: injected as usize,
            });
        }
        Ok(())
    }
}
