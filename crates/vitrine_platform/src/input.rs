//! Input event types for keyboard and element interaction

/// Input events
///
/// Element-level events carry the string id of their target. Keyboard
/// events are untargeted: the page delivers them to whichever element
/// currently holds focus.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Keyboard event (delivered to the focused element)
    Keyboard(KeyboardEvent),
    /// Pointer activation of an element (mouse click or tap)
    Click {
        /// Id of the clicked element
        target: String,
    },
    /// An element received input focus (e.g. via Tab)
    Focus {
        /// Id of the focused element
        target: String,
    },
    /// The value of a text field changed
    Text {
        /// Id of the edited field
        target: String,
        /// Full new value of the field
        value: String,
    },
    /// A form was submitted
    Submit {
        /// Id of the submitted form
        target: String,
    },
}

// ============================================================================
// Keyboard Events
// ============================================================================

/// Keyboard event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The key that was pressed or released
    pub key: Key,
    /// Whether the key was pressed or released
    pub state: KeyState,
    /// Modifier keys held during this event
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    /// A key press with no modifiers held
    pub fn pressed(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
        }
    }

    /// A key release with no modifiers held
    pub fn released(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Released,
            modifiers: Modifiers::default(),
        }
    }
}

/// Key press/release state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// Key was pressed
    Pressed,
    /// Key was released
    Released,
}

/// Modifier key state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift key is held
    pub shift: bool,
    /// Control key is held
    pub ctrl: bool,
    /// Alt key is held (Option on macOS)
    pub alt: bool,
    /// Meta key is held (Command on macOS, Windows key on Windows)
    pub meta: bool,
}

impl Modifiers {
    /// Check if no modifiers are held
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }
}

/// Key codes
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    // Special keys
    Space,
    Enter,
    Escape,
    Backspace,
    Tab,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    // Arrow keys
    Left,
    Right,
    Up,
    Down,

    // Modifier keys (for tracking state)
    Shift,
    Ctrl,
    Alt,
    Meta,

    // Character input (for text input)
    Char(char),

    // Unknown key
    Unknown,
}

impl Key {
    /// Resolve a key from its DOM-style name
    ///
    /// Accepts both `ArrowLeft` and the short `Left` spelling. Any other
    /// single character maps to [`Key::Char`]; everything else is
    /// [`Key::Unknown`].
    pub fn from_name(name: &str) -> Key {
        match name {
            " " | "Space" => Key::Space,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "Backspace" => Key::Backspace,
            "Tab" => Key::Tab,
            "Delete" => Key::Delete,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            "ArrowLeft" | "Left" => Key::Left,
            "ArrowRight" | "Right" => Key::Right,
            "ArrowUp" | "Up" => Key::Up,
            "ArrowDown" | "Down" => Key::Down,
            "Shift" => Key::Shift,
            "Control" | "Ctrl" => Key::Ctrl,
            "Alt" => Key::Alt,
            "Meta" => Key::Meta,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Unknown,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_dom_names() {
        assert_eq!(Key::from_name("ArrowLeft"), Key::Left);
        assert_eq!(Key::from_name("Right"), Key::Right);
        assert_eq!(Key::from_name("Home"), Key::Home);
        assert_eq!(Key::from_name("End"), Key::End);
        assert_eq!(Key::from_name("a"), Key::Char('a'));
        assert_eq!(Key::from_name("F13"), Key::Unknown);
    }

    #[test]
    fn test_pressed_has_no_modifiers() {
        let event = KeyboardEvent::pressed(Key::Left);
        assert_eq!(event.state, KeyState::Pressed);
        assert!(event.modifiers.is_empty());
    }
}
