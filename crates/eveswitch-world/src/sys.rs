//! Win32 backend: Toolhelp process filter + EnumWindows enumeration, and
//! foreground-window operations.

use std::{collections::HashSet, ffi::c_void};

use tracing::trace;
use windows::Win32::{
    Foundation::{HWND, LPARAM},
    System::Diagnostics::ToolHelp::{
        CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW,
        TH32CS_SNAPPROCESS,
    },
    UI::WindowsAndMessaging::{
        EnumWindows, GetForegroundWindow, GetWindowTextW, GetWindowThreadProcessId,
        IsWindowVisible, SetForegroundWindow,
    },
};

use crate::{Desktop, Error, Result, WindowEnumerator, WindowHandle, WindowInfo};

/// Enumerates top-level visible windows of processes whose executable name
/// matches the configured client process.
pub struct Win32Enumerator {
    process_name: String,
}

impl Win32Enumerator {
    /// Creates an enumerator filtering on `process_name` (e.g. "exefile.exe").
    pub fn new(process_name: &str) -> Self {
        Self {
            process_name: process_name.to_ascii_lowercase(),
        }
    }

    fn client_pids(&self) -> Result<HashSet<u32>> {
        let mut pids = HashSet::new();
        unsafe {
            let snap = CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0)
                .map_err(|e| Error::Enumeration(e.message()))?;
            let mut entry = PROCESSENTRY32W {
                dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
                ..Default::default()
            };
            if Process32FirstW(snap, &mut entry).is_ok() {
                loop {
                    let len = entry
                        .szExeFile
                        .iter()
                        .position(|c| *c == 0)
                        .unwrap_or(entry.szExeFile.len());
                    let exe = String::from_utf16_lossy(&entry.szExeFile[..len]);
                    if exe.eq_ignore_ascii_case(&self.process_name) {
                        pids.insert(entry.th32ProcessID);
                    }
                    if Process32NextW(snap, &mut entry).is_err() {
                        break;
                    }
                }
            }
        }
        Ok(pids)
    }
}

struct EnumCtx {
    pids: HashSet<u32>,
    out: Vec<WindowInfo>,
}

extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> windows::core::BOOL {
    let ctx = unsafe { &mut *(lparam.0 as *mut EnumCtx) };
    unsafe {
        if !IsWindowVisible(hwnd).as_bool() {
            return true.into();
        }
        let mut pid = 0u32;
        let _ = GetWindowThreadProcessId(hwnd, Some(&mut pid));
        if !ctx.pids.contains(&pid) {
            return true.into();
        }
        let mut buf = [0u16; 512];
        let len = GetWindowTextW(hwnd, &mut buf);
        if len <= 0 {
            return true.into();
        }
        ctx.out.push(WindowInfo {
            pid,
            title: String::from_utf16_lossy(&buf[..len as usize]),
            hwnd: WindowHandle(hwnd.0 as isize),
        });
    }
    true.into()
}

impl WindowEnumerator for Win32Enumerator {
    fn enumerate(&self) -> Result<Vec<WindowInfo>> {
        let pids = self.client_pids()?;
        let mut ctx = EnumCtx {
            pids,
            out: Vec::new(),
        };
        unsafe {
            EnumWindows(Some(collect_window), LPARAM(&mut ctx as *mut EnumCtx as isize))
                .map_err(|e| Error::Enumeration(e.message()))?;
        }
        trace!(count = ctx.out.len(), "enumerated_client_windows");
        Ok(ctx.out)
    }
}

/// Foreground operations through user32.
pub struct Win32Desktop;

impl Desktop for Win32Desktop {
    fn foreground(&self) -> Option<WindowHandle> {
        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd.0.is_null() {
            None
        } else {
            Some(WindowHandle(hwnd.0 as isize))
        }
    }

    fn activate(&self, hwnd: WindowHandle) -> bool {
        unsafe { SetForegroundWindow(HWND(hwnd.0 as *mut c_void)).as_bool() }
    }
}
