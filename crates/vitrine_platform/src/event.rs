//! Page events and handler outcomes

use crate::input::InputEvent;

/// What a handler did with an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventOutcome {
    /// No enhancement reacted
    #[default]
    Ignored,
    /// An enhancement reacted; the host's default action still applies
    Handled,
    /// An enhancement reacted and took over the host's default action
    DefaultPrevented,
}

impl EventOutcome {
    /// Whether the host must skip its default action
    pub fn is_default_prevented(&self) -> bool {
        matches!(self, EventOutcome::DefaultPrevented)
    }

    /// Combine outcomes from several handlers, keeping the strongest
    pub fn merge(self, other: EventOutcome) -> EventOutcome {
        use EventOutcome::*;
        match (self, other) {
            (DefaultPrevented, _) | (_, DefaultPrevented) => DefaultPrevented,
            (Handled, _) | (_, Handled) => Handled,
            _ => Ignored,
        }
    }
}

/// Host events
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Window-related event
    Window(WindowEvent),
    /// Input event (keyboard, click, focus, text, submit)
    Input(InputEvent),
    /// Frame tick
    ///
    /// Sent once per display frame. Smooth scroll animations advance and
    /// pending timers fire on frame ticks, so a host that stops sending
    /// frames freezes both.
    Frame,
}

/// Window events
#[derive(Clone, Debug, PartialEq)]
pub enum WindowEvent {
    /// Window was resized
    Resized {
        /// New width in logical pixels
        width: f32,
    },
    /// The user's reduced-motion preference changed
    MotionPreferenceChanged {
        /// Whether reduced motion is now preferred
        reduced: bool,
    },
}
