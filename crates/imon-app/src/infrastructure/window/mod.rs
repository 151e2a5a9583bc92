//! Window shells: the native Win32 surface and the headless scripted feed.

pub mod headless;

#[cfg(target_os = "windows")]
pub mod win32;
