//! Vitrine Host Abstraction Layer
//!
//! This crate provides the host-facing types every enhancement consumes:
//! input events targeted at page elements, window events, and the [`Host`]
//! trait for the clock, the reduced-motion preference and the local year.
//!
//! # Architecture
//!
//! - [`Host`] - Time and user preferences, queried on demand
//! - [`Event`] - Everything the page reacts to, delivered one at a time
//!
//! # Host Implementations
//!
//! - [`SystemHost`] - Wall clock and local calendar
//! - [`ManualHost`] - Deterministic clock for tests and headless replay
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use vitrine_platform::{Host, ManualHost};
//!
//! let host = ManualHost::new();
//! let start = host.now();
//! host.advance(Duration::from_millis(16));
//! assert_eq!(host.now() - start, Duration::from_millis(16));
//! ```

mod event;
mod host;
mod input;

// Re-export all public types
pub use event::{Event, EventOutcome, WindowEvent};
pub use host::{Host, ManualHost, SystemHost};
pub use input::{InputEvent, Key, KeyState, KeyboardEvent, Modifiers};
