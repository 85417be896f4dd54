//! Vitrine Slider
//!
//! Navigation for a horizontally scrolling strip of cards with a previous
//! and a next button.
//!
//! - [`SliderController`] - Step/edge navigation, button state, focus-follow
//! - [`ScrollSurface`] - The seam the controller reads layout from and sends
//!   scroll requests to; implemented for [`vitrine_core::Document`]
//! - [`SliderAction`] - Navigation intents shared by clicks and keys
//! - [`KEY_BINDINGS`] - Keyboard table used while the slider holds focus
//!
//! The controller stores element handles only. Every operation re-reads
//! live metrics from the surface, and every operation silently does nothing
//! when an element it needs has gone missing.
//!
//! # Example
//!
//! ```rust
//! use vitrine_core::{Button, Card, Document, ElementBox, NodeKind, ScrollStrip};
//! use vitrine_slider::{Direction, SliderController, SliderSelectors};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! let strip = doc
//!     .insert_with_id(root, "slider", NodeKind::ScrollStrip(ScrollStrip::new(300.0)))
//!     .unwrap();
//! for _ in 0..5 {
//!     let bounds = ElementBox::new(100.0).with_margins(0.0, 20.0);
//!     doc.insert(strip, NodeKind::Card(Card::new(bounds))).unwrap();
//! }
//! doc.insert_with_id(root, "prevBtn", NodeKind::Button(Button::new("Previous"))).unwrap();
//! doc.insert_with_id(root, "nextBtn", NodeKind::Button(Button::new("Next"))).unwrap();
//!
//! let slider = SliderController::attach(&doc, &SliderSelectors::default()).unwrap();
//! slider.refresh_button_state(&mut doc);
//! assert_eq!(slider.compute_step_distance(&doc), Some(120.0));
//!
//! slider.navigate(&mut doc, Direction::Next);
//! assert_eq!(doc.strip(strip).unwrap().target(), Some(120.0));
//! ```

mod action;
mod controller;
mod surface;

pub use action::{action_for_key, Direction, Edge, SliderAction, KEY_BINDINGS};
pub use controller::{NavigationState, SliderController, SliderSelectors};
pub use surface::ScrollSurface;
