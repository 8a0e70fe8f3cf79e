//! Keyboard input for select-style widgets.

use serde::{Deserialize, Serialize};

/// Keyboard key identifiers.
///
/// Only the keys a list or combo box reacts to are named; everything else
/// arrives as [`Key::Other`] carrying the raw key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Enter/Return key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Space bar
    Space,
    /// Up arrow
    ArrowUp,
    /// Down arrow
    ArrowDown,
    /// Left arrow
    ArrowLeft,
    /// Right arrow
    ArrowRight,
    /// Home key
    Home,
    /// End key
    End,
    /// Page Up key
    PageUp,
    /// Page Down key
    PageDown,
    /// Any other key, by key code
    Other(u32),
}

impl Key {
    /// Legacy DOM key code for this key.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Backspace => 8,
            Self::Tab => 9,
            Self::Enter => 13,
            Self::Escape => 27,
            Self::Space => 32,
            Self::PageUp => 33,
            Self::PageDown => 34,
            Self::End => 35,
            Self::Home => 36,
            Self::ArrowLeft => 37,
            Self::ArrowUp => 38,
            Self::ArrowRight => 39,
            Self::ArrowDown => 40,
            Self::Delete => 46,
            Self::Other(code) => code,
        }
    }

    /// Map a legacy DOM key code back to a key.
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        match code {
            8 => Self::Backspace,
            9 => Self::Tab,
            13 => Self::Enter,
            27 => Self::Escape,
            32 => Self::Space,
            33 => Self::PageUp,
            34 => Self::PageDown,
            35 => Self::End,
            36 => Self::Home,
            37 => Self::ArrowLeft,
            38 => Self::ArrowUp,
            39 => Self::ArrowRight,
            40 => Self::ArrowDown,
            46 => Self::Delete,
            other => Self::Other(other),
        }
    }

    /// Whether this key moves a cursor through a list.
    #[must_use]
    pub const fn is_navigation(self) -> bool {
        matches!(
            self,
            Self::ArrowUp
                | Self::ArrowDown
                | Self::ArrowLeft
                | Self::ArrowRight
                | Self::Home
                | Self::End
                | Self::PageUp
                | Self::PageDown
        )
    }
}
