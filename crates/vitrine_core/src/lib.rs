//! Vitrine Core
//!
//! This crate provides the foundational primitives the page enhancements
//! are built on:
//!
//! - **Document**: In-memory element tree with string-id lookup and focus tracking
//! - **Scroll strips**: Horizontal scroll containers with native clamping and
//!   smooth-scroll animation settled over frame ticks
//! - **Metrics**: Element boxes and derived scroll edge predicates
//! - **State Machines**: Enabled/disabled affordances driven by edge events
//! - **Rate Limiters**: Throttle and debounce value types fed with explicit time
//!
//! # Example
//!
//! ```rust
//! use vitrine_core::{Card, Document, ElementBox, NodeKind, ScrollStrip};
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
//!
//! let metrics = doc.scroll_metrics(strip).unwrap();
//! assert_eq!(metrics.content_width, 600.0);
//! assert_eq!(metrics.max_offset(), 300.0);
//! assert!(metrics.at_start());
//! ```

pub mod document;
pub mod error;
pub mod fsm;
pub mod metrics;
pub mod rate_limit;
pub mod scroll;

pub use document::{Button, Card, Document, NodeId, NodeKind, Status, TextField, Video};
pub use error::{DocumentError, Result};
pub use fsm::{event_types, AffordanceState, StateTransitions};
pub use metrics::{ElementBox, ScrollMetrics, EDGE_EPSILON};
pub use rate_limit::{Debounce, Throttle};
pub use scroll::{
    ScrollBehavior, ScrollInline, ScrollOptions, ScrollStrip, ScrollTick, DEFAULT_SMOOTH_SPEED,
};
