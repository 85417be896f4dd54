//! Vitrine Page
//!
//! Progressive enhancements for a product landing page:
//!
//! - [`PageEnhancer`] - Routes events to every enhancement that attached
//! - [`NewsletterForm`] - Client-side validated subscription form
//! - [`stamp_year`] - Footer copyright year
//! - [`apply_motion_preference`] - Pauses autoplaying video under reduced motion
//! - [`Page`] - A document, host and enhancer driven like a browser would
//!
//! Every enhancement is optional: an element that is missing from the page
//! leaves the matching feature unattached and the rest working.
//!
//! # Example
//!
//! ```rust
//! use vitrine_core::{Document, NodeKind};
//! use vitrine_page::{Page, PageConfig};
//! use vitrine_platform::ManualHost;
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! doc.insert_with_id(root, "year", NodeKind::Text(String::new())).unwrap();
//!
//! let host = ManualHost::new();
//! host.set_year(2026);
//! let page = Page::new(doc, host, PageConfig::default(), 1280.0);
//! assert_eq!(page.snapshot().year.as_deref(), Some("2026"));
//! ```

pub mod config;
pub mod enhancer;
pub mod footer;
pub mod motion;
pub mod newsletter;
pub mod page;

pub use config::{FooterSelectors, NewsletterSelectors, PageConfig, TimingConfig};
pub use enhancer::{Features, PageEnhancer};
pub use footer::stamp_year;
pub use motion::apply_motion_preference;
pub use newsletter::{
    is_valid_email, MockBackend, NewsletterForm, StatusKind, SubmitResult, SubscribeError,
    SubscriptionBackend,
};
pub use page::{
    FeatureFlags, NewsletterSnapshot, Page, PageSnapshot, SliderSnapshot, ARROW_SCROLL_STEP,
};
