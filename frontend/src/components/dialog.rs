//! Blocking browser dialogs.
//!
//! CRUD outcomes and destructive confirmations go through the native
//! dialogs, matching the console's established interaction pattern.

/// Blocking notification.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Blocking yes/no confirmation; `false` when the dialog cannot be shown.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}
