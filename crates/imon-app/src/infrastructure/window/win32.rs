//! Win32 window shell: the native event-log window.
//!
//! Creates the top-level window, runs the message loop, and bridges window
//! messages into the [`MonitorSession`]. Rendering pulls a snapshot from the
//! session on every `WM_PAINT` and draws it with `TabbedTextOutW` using the
//! per-category tab stops scaled to the active font.
//!
//! Session state hangs off the window user data rather than process globals:
//! the host struct is allocated before `CreateWindowExW`, attached at
//! `WM_NCCREATE`, and reclaimed at `WM_NCDESTROY`.
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use std::cell::Cell;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, CreateFontIndirectW, DeleteObject, EndPaint, GetTextMetricsW, InvalidateRect,
    SelectObject, SetTextColor, TabbedTextOutW, UpdateWindow, FONT_CHARSET, FONT_CLIP_PRECISION,
    FONT_OUTPUT_PRECISION, FONT_PITCH_AND_FAMILY, FONT_QUALITY, HBRUSH, LOGFONTW, PAINTSTRUCT,
    TEXTMETRICW,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Controls::Dialogs::{
    ChooseFontW, CF_EFFECTS, CF_FIXEDPITCHONLY, CF_INITTOLOGFONTSTRUCT, CHOOSEFONTW,
};
use windows::Win32::UI::Input::KeyboardAndMouse::{ReleaseCapture, SetCapture};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreateMenu, CreatePopupMenu, CreateWindowExW, DefWindowProcW, DestroyWindow,
    DispatchMessageW, GetMessageW, GetWindowLongPtrW, GetWindowPlacement, LoadCursorW,
    MessageBoxW, PostQuitMessage, RegisterClassExW, SetMenu, SetWindowLongPtrW,
    SetWindowPlacement, ShowWindow, TranslateMessage, COLOR_WINDOW, CREATESTRUCTW, CS_DBLCLKS,
    CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, GWLP_USERDATA, IDC_ARROW, MB_ICONINFORMATION, MB_OK,
    MF_POPUP, MF_STRING, MSG, SHOW_WINDOW_CMD, SW_MINIMIZE, SW_SHOW, WINDOWPLACEMENT,
    WINDOWPLACEMENT_FLAGS, WM_COMMAND, WM_DESTROY, WM_NCCREATE, WM_NCDESTROY, WM_PAINT,
    WNDCLASSEXW, WPF_SETMINPOSITION, WS_OVERLAPPEDWINDOW,
};

use crate::application::monitor::{CaptureHandle, MonitorSession};
use crate::application::preferences::{
    load_font, load_placement, save_font, save_placement, BlobStore, FontChoice, LogFont,
    PlacementPoint, PlacementRect, WindowPlacement,
};
use crate::infrastructure::storage::AppConfig;
use imon_core::{format_row, is_monitored, tab_stops};

/// Menu command identifiers.
const IDM_FONT: usize = 101;
const IDM_EXIT: usize = 102;
const IDM_ABOUT: usize = 103;

/// Error type for window shell startup.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("failed to register window class")]
    RegisterClassFailed,
    #[error("failed to create window: {0}")]
    CreateWindowFailed(String),
}

// ── Capture handle ────────────────────────────────────────────────────────────

/// Capture handle backed by `SetCapture`/`ReleaseCapture`.
///
/// The window handle is filled in after creation; both calls are
/// fire-and-forget per the platform contract.
struct Win32CaptureHandle {
    hwnd: Cell<isize>,
}

impl Win32CaptureHandle {
    fn new() -> Self {
        Self { hwnd: Cell::new(0) }
    }

    fn attach(&self, hwnd: HWND) {
        self.hwnd.set(hwnd.0 as isize);
    }
}

impl CaptureHandle for Win32CaptureHandle {
    fn acquire(&self) {
        let hwnd = HWND(self.hwnd.get() as *mut core::ffi::c_void);
        // SAFETY: plain FFI call; an invalid handle makes SetCapture a no-op.
        unsafe {
            SetCapture(hwnd);
        }
    }

    fn release(&self) {
        // SAFETY: plain FFI call; releasing without capture is harmless.
        unsafe {
            ReleaseCapture().ok();
        }
    }
}

// ── Window host ───────────────────────────────────────────────────────────────

/// Per-window state reachable from the window procedure via user data.
struct WindowHost {
    session: MonitorSession,
    store: Option<Arc<dyn BlobStore>>,
    font: Option<(FontChoice, LogFont)>,
}

/// Events the window procedure routes explicitly; everything else goes to
/// `DefWindowProcW`.
enum WindowEvent {
    Input,
    Paint,
    FontDialog,
    Exit,
    About,
    Destroy,
    Other,
}

/// Classifies a window message for dispatch.
fn route(message: u32, wparam: WPARAM) -> WindowEvent {
    match message {
        WM_PAINT => WindowEvent::Paint,
        WM_DESTROY => WindowEvent::Destroy,
        WM_COMMAND => match wparam.0 & 0xFFFF {
            IDM_FONT => WindowEvent::FontDialog,
            IDM_EXIT => WindowEvent::Exit,
            IDM_ABOUT => WindowEvent::About,
            _ => WindowEvent::Other,
        },
        m if is_monitored(m) => WindowEvent::Input,
        _ => WindowEvent::Other,
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Creates the monitor window and runs its message loop until close.
pub fn run(config: &AppConfig, store: Option<Arc<dyn BlobStore>>) -> Result<(), ShellError> {
    let capture = Arc::new(Win32CaptureHandle::new());
    let font = store.as_deref().and_then(load_font);

    let host = Box::new(WindowHost {
        session: MonitorSession::new(Arc::clone(&capture) as Arc<dyn CaptureHandle>),
        store: store.clone(),
        font,
    });

    // SAFETY: standard window class registration; the class name literal
    // outlives the call.
    let instance = unsafe { GetModuleHandleW(None) }
        .map_err(|e| ShellError::CreateWindowFailed(e.to_string()))?;
    let class_name = w!("InputMonitorWindow");

    let wcex = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW | CS_DBLCLKS,
        lpfnWndProc: Some(wndproc),
        hInstance: instance.into(),
        // SAFETY: stock cursor load cannot keep a dangling reference.
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.unwrap_or_default(),
        hbrBackground: HBRUSH((COLOR_WINDOW.0 + 1) as isize as *mut core::ffi::c_void),
        lpszClassName: class_name,
        ..Default::default()
    };

    // SAFETY: wcex is fully initialised above.
    if unsafe { RegisterClassExW(&wcex) } == 0 {
        return Err(ShellError::RegisterClassFailed);
    }

    let title: Vec<u16> = config.window.title.encode_utf16().chain(Some(0)).collect();
    let host_ptr = Box::into_raw(host);

    // SAFETY: host_ptr stays valid until WM_NCDESTROY reclaims it; the title
    // buffer outlives the call.
    let hwnd = unsafe {
        CreateWindowExW(
            Default::default(),
            class_name,
            PCWSTR(title.as_ptr()),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            0,
            config.window.default_width as i32,
            config.window.default_height as i32,
            None,
            None,
            Some(instance.into()),
            Some(host_ptr as *const core::ffi::c_void),
        )
    }
    .map_err(|e| {
        // SAFETY: creation failed, so the window never took ownership.
        drop(unsafe { Box::from_raw(host_ptr) });
        ShellError::CreateWindowFailed(e.to_string())
    })?;

    capture.attach(hwnd);
    build_menu(hwnd);

    // Restore the persisted placement, or show at the configured default.
    match store.as_deref().and_then(load_placement) {
        Some(placement) => {
            // SAFETY: wp is a fully initialised WINDOWPLACEMENT.
            unsafe {
                SetWindowPlacement(hwnd, &to_native_placement(&placement)).ok();
            }
        }
        None => {
            // SAFETY: plain show/update of the window just created.
            unsafe {
                let _ = ShowWindow(hwnd, SW_SHOW);
                let _ = UpdateWindow(hwnd);
            }
        }
    }

    info!("monitor window ready");

    // Win32 message loop – blocks until WM_QUIT is posted.
    let mut msg = MSG::default();
    // SAFETY: standard GetMessage/TranslateMessage/DispatchMessage pattern.
    unsafe {
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    Ok(())
}

/// Builds the `Edit` / `Help` menu bar.
fn build_menu(hwnd: HWND) {
    // SAFETY: menu handles are owned by the window once SetMenu succeeds and
    // are destroyed with it.
    unsafe {
        let Ok(bar) = CreateMenu() else { return };
        if let Ok(edit) = CreatePopupMenu() {
            AppendMenuW(edit, MF_STRING, IDM_FONT, w!("&Font...")).ok();
            AppendMenuW(edit, MF_STRING, IDM_EXIT, w!("E&xit")).ok();
            AppendMenuW(bar, MF_POPUP, edit.0 as usize, w!("&Edit")).ok();
        }
        if let Ok(help) = CreatePopupMenu() {
            AppendMenuW(help, MF_STRING, IDM_ABOUT, w!("&About...")).ok();
            AppendMenuW(bar, MF_POPUP, help.0 as usize, w!("&Help")).ok();
        }
        SetMenu(hwnd, Some(bar)).ok();
    }
}

// ── Window procedure ──────────────────────────────────────────────────────────

/// Main window procedure; dispatches through [`route`] into the host.
///
/// # Safety
///
/// Called by the system on the window's dispatch thread only.
unsafe extern "system" fn wndproc(
    hwnd: HWND,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if message == WM_NCCREATE {
        // SAFETY: lparam points to the CREATESTRUCTW for this window.
        let create = &*(lparam.0 as *const CREATESTRUCTW);
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, create.lpCreateParams as isize);
        return DefWindowProcW(hwnd, message, wparam, lparam);
    }
    if message == WM_NCDESTROY {
        let ptr = SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) as *mut WindowHost;
        if !ptr.is_null() {
            // SAFETY: pointer was produced by Box::into_raw in run(); this is
            // the single reclaim point.
            drop(Box::from_raw(ptr));
        }
        return DefWindowProcW(hwnd, message, wparam, lparam);
    }

    let host_ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut WindowHost;
    if host_ptr.is_null() {
        return DefWindowProcW(hwnd, message, wparam, lparam);
    }
    // SAFETY: the host outlives the window; messages arrive on one thread.
    let host = &mut *host_ptr;

    match route(message, wparam) {
        WindowEvent::Input => {
            if host
                .session
                .handle_notification(message, wparam.0 as u64, lparam.0 as i64)
            {
                // Repaint without erasing so the page does not flicker; the
                // update is synchronous to keep the log at most one event stale.
                InvalidateRect(Some(hwnd), None, false).ok();
                let _ = UpdateWindow(hwnd);
            }
            LRESULT(0)
        }
        WindowEvent::Paint => {
            paint(hwnd, host);
            LRESULT(0)
        }
        WindowEvent::FontDialog => {
            run_font_dialog(hwnd, host);
            LRESULT(0)
        }
        WindowEvent::Exit => {
            DestroyWindow(hwnd).ok();
            LRESULT(0)
        }
        WindowEvent::About => {
            MessageBoxW(
                Some(hwnd),
                w!("Input Monitor\n\nDisplays decoded keyboard and mouse input events."),
                w!("About Input Monitor"),
                MB_OK | MB_ICONINFORMATION,
            );
            LRESULT(0)
        }
        WindowEvent::Destroy => {
            persist_placement(hwnd, host);
            PostQuitMessage(0);
            LRESULT(0)
        }
        WindowEvent::Other => DefWindowProcW(hwnd, message, wparam, lparam),
    }
}

// ── Message handlers ──────────────────────────────────────────────────────────

/// Renders the full event page: one row per history slot, blanks for
/// unfilled slots so the page height stays constant.
///
/// # Safety
///
/// Must be called from the window procedure with a valid `hwnd`.
unsafe fn paint(hwnd: HWND, host: &WindowHost) {
    let mut ps = PAINTSTRUCT::default();
    let hdc = BeginPaint(hwnd, &mut ps);

    let selected_font = host.font.as_ref().map(|(choice, log_font)| {
        let hfont = CreateFontIndirectW(&to_native_logfont(log_font));
        let previous = SelectObject(hdc, hfont.into());
        SetTextColor(hdc, COLORREF(choice.color));
        (hfont, previous)
    });

    let mut tm = TEXTMETRICW::default();
    let _ = GetTextMetricsW(hdc, &mut tm);

    // Text starts near the upper-left corner of the client area.
    let x = 10;
    let mut y = 10;

    for slot in host.session.log().rows() {
        if let Some(event) = slot {
            let row = format_row(event);
            let wide: Vec<u16> = row.encode_utf16().collect();
            let stops = tab_stops(event.category(), tm.tmMaxCharWidth);
            TabbedTextOutW(hdc, x, y, &wide, Some(&stops), x);
        }
        y += tm.tmHeight;
    }

    if let Some((hfont, previous)) = selected_font {
        SelectObject(hdc, previous);
        let _ = DeleteObject(hfont.into());
    }

    let _ = EndPaint(hwnd, &ps);
}

/// Runs the font chooser and persists the result on OK.
///
/// # Safety
///
/// Must be called from the window procedure with a valid `hwnd`.
unsafe fn run_font_dialog(hwnd: HWND, host: &mut WindowHost) {
    let (mut choice, log_font) = host.font.unwrap_or_default();
    let mut native = to_native_logfont(&log_font);

    let mut cf = CHOOSEFONTW {
        lStructSize: std::mem::size_of::<CHOOSEFONTW>() as u32,
        hwndOwner: hwnd,
        lpLogFont: &mut native,
        Flags: CF_INITTOLOGFONTSTRUCT | CF_FIXEDPITCHONLY | CF_EFFECTS,
        rgbColors: COLORREF(choice.color),
        iPointSize: choice.point_size,
        ..Default::default()
    };

    if !ChooseFontW(&mut cf).as_bool() {
        return;
    }

    choice.color = cf.rgbColors.0;
    choice.point_size = cf.iPointSize;
    let log_font = from_native_logfont(&native);

    // Apply the new font only when the choice was stored, so the persisted
    // state and the on-screen state cannot drift apart.
    if let Some(store) = host.store.as_deref() {
        if save_font(store, &choice, &log_font) {
            host.font = Some((choice, log_font));
            InvalidateRect(Some(hwnd), None, true).ok();
        }
    } else {
        warn!("font changed but no preference store; change lasts this session only");
        host.font = Some((choice, log_font));
        InvalidateRect(Some(hwnd), None, true).ok();
    }
}

/// Saves the current window placement on teardown.
///
/// # Safety
///
/// Must be called from the window procedure with a valid `hwnd`.
unsafe fn persist_placement(hwnd: HWND, host: &WindowHost) {
    let Some(store) = host.store.as_deref() else {
        return;
    };
    let mut wp = WINDOWPLACEMENT {
        length: std::mem::size_of::<WINDOWPLACEMENT>() as u32,
        ..Default::default()
    };
    if GetWindowPlacement(hwnd, &mut wp).is_ok() {
        save_placement(store, &from_native_placement(&wp));
    }
}

// ── Native struct conversions ─────────────────────────────────────────────────

fn to_native_placement(placement: &WindowPlacement) -> WINDOWPLACEMENT {
    let mut flags = WINDOWPLACEMENT_FLAGS(placement.flags);
    let show_cmd = placement.show_cmd;
    // A window minimised at save time restores off-screen unless the
    // min-position flag is set.
    if placement.flags == 0 && show_cmd == SW_MINIMIZE.0 as u32 {
        flags = WPF_SETMINPOSITION;
    }
    WINDOWPLACEMENT {
        length: std::mem::size_of::<WINDOWPLACEMENT>() as u32,
        flags,
        showCmd: SHOW_WINDOW_CMD(show_cmd as i32),
        ptMinPosition: POINT {
            x: placement.min_position.x,
            y: placement.min_position.y,
        },
        ptMaxPosition: POINT {
            x: placement.max_position.x,
            y: placement.max_position.y,
        },
        rcNormalPosition: RECT {
            left: placement.normal_rect.left,
            top: placement.normal_rect.top,
            right: placement.normal_rect.right,
            bottom: placement.normal_rect.bottom,
        },
    }
}

fn from_native_placement(wp: &WINDOWPLACEMENT) -> WindowPlacement {
    WindowPlacement {
        flags: wp.flags.0,
        show_cmd: wp.showCmd.0 as u32,
        min_position: PlacementPoint {
            x: wp.ptMinPosition.x,
            y: wp.ptMinPosition.y,
        },
        max_position: PlacementPoint {
            x: wp.ptMaxPosition.x,
            y: wp.ptMaxPosition.y,
        },
        normal_rect: PlacementRect {
            left: wp.rcNormalPosition.left,
            top: wp.rcNormalPosition.top,
            right: wp.rcNormalPosition.right,
            bottom: wp.rcNormalPosition.bottom,
        },
    }
}

fn to_native_logfont(log_font: &LogFont) -> LOGFONTW {
    LOGFONTW {
        lfHeight: log_font.height,
        lfWidth: log_font.width,
        lfEscapement: log_font.escapement,
        lfOrientation: log_font.orientation,
        lfWeight: log_font.weight,
        lfItalic: log_font.italic,
        lfUnderline: log_font.underline,
        lfStrikeOut: log_font.strike_out,
        lfCharSet: FONT_CHARSET(log_font.charset),
        lfOutPrecision: FONT_OUTPUT_PRECISION(log_font.out_precision),
        lfClipPrecision: FONT_CLIP_PRECISION(log_font.clip_precision),
        lfQuality: FONT_QUALITY(log_font.quality),
        lfPitchAndFamily: FONT_PITCH_AND_FAMILY(log_font.pitch_and_family),
        lfFaceName: log_font.face_name,
    }
}

fn from_native_logfont(native: &LOGFONTW) -> LogFont {
    LogFont {
        height: native.lfHeight,
        width: native.lfWidth,
        escapement: native.lfEscapement,
        orientation: native.lfOrientation,
        weight: native.lfWeight,
        italic: native.lfItalic,
        underline: native.lfUnderline,
        strike_out: native.lfStrikeOut,
        charset: native.lfCharSet.0,
        out_precision: native.lfOutPrecision.0,
        clip_precision: native.lfClipPrecision.0,
        quality: native.lfQuality.0,
        pitch_and_family: native.lfPitchAndFamily.0,
        face_name: native.lfFaceName,
    }
}
