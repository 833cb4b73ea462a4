//! Platform-specific key bindings

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Platform-appropriate extra modifier for shortcuts
/// - macOS: SUPER (Cmd key, only reported by terminals that forward it)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const PLATFORM_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const PLATFORM_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for form help text
/// Ctrl+S works on all platforms
pub const SAVE_SHORTCUT: &str = "Ctrl+S";

/// Whether `key` is the form submit shortcut
pub fn is_save_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('s') | KeyCode::Char('S'))
        && (key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(PLATFORM_MODIFIER))
}
