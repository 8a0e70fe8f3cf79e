//! One-shot keyboard signal for the option list.
//!
//! A key press is raised as a signal tagged with a fresh generation. The
//! signal clears itself through a delayed message carrying that generation,
//! so a clear scheduled for an older press never wipes a newer one. A
//! consumer can also acknowledge the signal to clear it right away.

use picklist_core::Key;

/// How long a raised key stays visible, in milliseconds.
pub const KEY_SIGNAL_TTL_MS: u32 = 10;

/// Last significant key pressed while the popover is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeySignal {
    key: Option<Key>,
    generation: u64,
}

impl KeySignal {
    /// Keys the option list reacts to.
    #[must_use]
    pub const fn is_signal_key(key: Key) -> bool {
        matches!(key, Key::ArrowUp | Key::ArrowDown | Key::Enter | Key::Delete)
    }

    /// Raise `key`, returning the generation its clear must carry.
    pub fn raise(&mut self, key: Key) -> u64 {
        self.generation += 1;
        self.key = Some(key);
        self.generation
    }

    /// Clear the signal if `generation` is still current.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation == self.generation && self.key.is_some() {
            self.key = None;
            true
        } else {
            false
        }
    }

    /// Clear the signal now, returning the key that was pending.
    pub fn acknowledge(&mut self) -> Option<Key> {
        self.key.take()
    }

    /// The pending key, if any.
    #[must_use]
    pub const fn key(&self) -> Option<Key> {
        self.key
    }

    /// Generation of the most recent raise.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Check if no key is pending.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.key.is_none()
    }
}
