/// Keyboard key identifier.
///
/// Only the keys the demos react to get their own variant. Everything else
/// is `Unknown` carrying the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Q,
    Unknown(u32),
}

impl Key {
    /// Escape and Q both ask the window to close.
    #[inline]
    pub fn requests_close(self) -> bool {
        matches!(self, Key::Escape | Key::Q)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Text committed by the platform (typed characters after layout mapping).
#[derive(Debug, Clone, PartialEq)]
pub struct TextEvent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        repeat: bool,
    },
    Text(TextEvent),
}

impl InputEvent {
    /// True for a fresh (non-repeat) press of a close key.
    pub fn is_close_request(&self) -> bool {
        matches!(
            self,
            InputEvent::Key { key, state: KeyState::Pressed, repeat: false } if key.requests_close()
        )
    }
}
