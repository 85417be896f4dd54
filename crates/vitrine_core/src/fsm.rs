//! State machines for interactive affordances
//!
//! Each affordance (a prev/next button, for instance) is a two-state
//! machine driven by edge events. The enabled/disabled flag on the element
//! is the only place the state lives; callers rebuild the machine from the
//! flag, feed it an event and write the result back.

use std::hash::Hash;

/// Event identifiers understood by the built-in state types
pub mod event_types {
    /// The scroll position reached the edge this affordance guards
    pub const EDGE_REACHED: u32 = 100;
    /// The scroll position moved away from the guarded edge
    pub const EDGE_LEFT: u32 = 101;

    /// Event for an edge predicate: reached when `at_edge`, left otherwise
    pub fn for_edge(at_edge: bool) -> u32 {
        if at_edge {
            EDGE_REACHED
        } else {
            EDGE_LEFT
        }
    }
}

/// Trait for state types that map events to transitions
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;
}

/// Enabled/disabled state of a navigation affordance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AffordanceState {
    #[default]
    Enabled,
    Disabled,
}

impl AffordanceState {
    /// State matching an element's disabled flag
    pub fn from_disabled(disabled: bool) -> Self {
        if disabled {
            AffordanceState::Disabled
        } else {
            AffordanceState::Enabled
        }
    }

    /// Whether the element should carry the disabled flag
    pub fn is_disabled(&self) -> bool {
        matches!(self, AffordanceState::Disabled)
    }
}

impl StateTransitions for AffordanceState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use event_types::*;
        match (self, event) {
            (AffordanceState::Enabled, EDGE_REACHED) => Some(AffordanceState::Disabled),
            (AffordanceState::Disabled, EDGE_LEFT) => Some(AffordanceState::Enabled),
            _ => None,
        }
    }
}
