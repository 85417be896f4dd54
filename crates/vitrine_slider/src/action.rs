//! Navigation intents and the keyboard table

use vitrine_platform::{Key, KeyState, KeyboardEvent};

/// Step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous,
    Next,
}

/// Strip edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Start,
    End,
}

/// A navigation intent, whatever produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderAction {
    /// Move one card in a direction
    Navigate(Direction),
    /// Jump to the first or last position
    NavigateToEdge(Edge),
}

/// Keys the slider claims while it (or a card inside it) has focus
///
/// A matched key always suppresses the host's own key scrolling, even when
/// the resulting scroll is a no-op at an edge.
pub const KEY_BINDINGS: &[(KeyState, Key, SliderAction)] = &[
    (
        KeyState::Pressed,
        Key::Left,
        SliderAction::Navigate(Direction::Previous),
    ),
    (
        KeyState::Pressed,
        Key::Right,
        SliderAction::Navigate(Direction::Next),
    ),
    (
        KeyState::Pressed,
        Key::Home,
        SliderAction::NavigateToEdge(Edge::Start),
    ),
    (
        KeyState::Pressed,
        Key::End,
        SliderAction::NavigateToEdge(Edge::End),
    ),
];

/// Look up the action bound to a keyboard event
pub fn action_for_key(event: &KeyboardEvent) -> Option<SliderAction> {
    KEY_BINDINGS
        .iter()
        .find(|(state, key, _)| *state == event.state && *key == event.key)
        .map(|(_, _, action)| *action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_keys() {
        let cases = [
            (Key::Left, SliderAction::Navigate(Direction::Previous)),
            (Key::Right, SliderAction::Navigate(Direction::Next)),
            (Key::Home, SliderAction::NavigateToEdge(Edge::Start)),
            (Key::End, SliderAction::NavigateToEdge(Edge::End)),
        ];
        for (key, action) in cases {
            assert_eq!(action_for_key(&KeyboardEvent::pressed(key)), Some(action));
        }
    }

    #[test]
    fn test_releases_and_other_keys_unbound() {
        assert_eq!(action_for_key(&KeyboardEvent::released(Key::Left)), None);
        assert_eq!(action_for_key(&KeyboardEvent::pressed(Key::Up)), None);
        assert_eq!(action_for_key(&KeyboardEvent::pressed(Key::Char('l'))), None);
    }
}
