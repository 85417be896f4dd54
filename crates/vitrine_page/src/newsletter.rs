//! Newsletter subscription form
//!
//! Submission is intercepted, the address is checked locally, and a valid
//! address is handed to a [`SubscriptionBackend`] once the configured delay
//! has elapsed. [`MockBackend`] accepts everything; a real endpoint plugs in
//! behind the same trait.

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;
use thiserror::Error;
use tracing::{debug, info, warn};
use vitrine_core::{Document, NodeId, NodeKind};
use vitrine_platform::EventOutcome;

use crate::config::NewsletterSelectors;

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const PENDING_MESSAGE: &str = "Subscribing…";
pub const SUCCESS_MESSAGE: &str = "Thanks! You are subscribed.";
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Client-side address check: something@something.something, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && EMAIL_PATTERN.is_match(email)
}

/// Presentation of the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Pending,
    Success,
    Error,
}

impl StatusKind {
    /// Class attribute for the status element
    pub fn class(&self) -> &'static str {
        match self {
            StatusKind::Pending => "newsletter-status pending",
            StatusKind::Success => "newsletter-status success",
            StatusKind::Error => "newsletter-status error",
        }
    }
}

/// Failures reported by a subscription backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubscribeError {
    /// The request never completed
    #[error("Subscription transport failed: {0}")]
    Transport(String),
}

/// Destination for accepted addresses
pub trait SubscriptionBackend {
    fn subscribe(&mut self, email: &str) -> Result<(), SubscribeError>;
}

/// Backend that accepts every address and remembers it
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    accepted: Vec<String>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Addresses accepted so far, oldest first
    pub fn accepted(&self) -> &[String] {
        &self.accepted
    }
}

impl SubscriptionBackend for MockBackend {
    fn subscribe(&mut self, email: &str) -> Result<(), SubscribeError> {
        self.accepted.push(email.to_string());
        Ok(())
    }
}

/// How a submission ended
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResult {
    /// Backend accepted the address
    Subscribed(String),
    /// Backend reported an error
    Failed(SubscribeError),
}

#[derive(Debug, Clone)]
struct PendingSubmission {
    email: String,
    due: Instant,
}

/// The newsletter form's behavior
#[derive(Debug, Clone)]
pub struct NewsletterForm {
    form: NodeId,
    input: NodeId,
    status: NodeId,
    delay: Duration,
    pending: Option<PendingSubmission>,
}

impl NewsletterForm {
    /// Resolve the form, field and status line by id
    ///
    /// Returns `None` when any of them is missing or is the wrong kind.
    pub fn attach(doc: &Document, selectors: &NewsletterSelectors, delay: Duration) -> Option<Self> {
        let (Some(form), Some(input), Some(status)) = (
            doc.get_by_id(&selectors.form),
            doc.get_by_id(&selectors.email),
            doc.get_by_id(&selectors.status),
        ) else {
            debug!("newsletter elements not found, form left to the host");
            return None;
        };

        let kinds_match = matches!(doc.kind(form), Some(NodeKind::Form))
            && doc.value(input).is_some()
            && doc.status(status).is_some();
        if !kinds_match {
            debug!("newsletter elements have unexpected kinds, form left to the host");
            return None;
        }

        Some(Self {
            form,
            input,
            status,
            delay,
            pending: None,
        })
    }

    pub fn form(&self) -> NodeId {
        self.form
    }

    /// Whether a submission is waiting on the backend
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle a submit of the form at `now`
    ///
    /// Always takes over the host's default submission. Any submission
    /// still waiting is dropped, whether or not the new address is valid.
    pub fn handle_submit(&mut self, doc: &mut Document, now: Instant) -> EventOutcome {
        if self.pending.take().is_some() {
            debug!("newsletter submission superseded");
        }
        doc.clear_status_text(self.status);
        let email = doc.value(self.input).unwrap_or_default().trim().to_string();

        if !is_valid_email(&email) {
            doc.set_status(self.status, INVALID_EMAIL_MESSAGE, StatusKind::Error.class());
            doc.focus(self.input);
            return EventOutcome::DefaultPrevented;
        }

        doc.set_status(self.status, PENDING_MESSAGE, StatusKind::Pending.class());
        self.pending = Some(PendingSubmission {
            email,
            due: now + self.delay,
        });
        EventOutcome::DefaultPrevented
    }

    /// Complete a submission whose delay has elapsed
    pub fn poll<B: SubscriptionBackend + ?Sized>(
        &mut self,
        doc: &mut Document,
        now: Instant,
        backend: &mut B,
    ) -> Option<SubmitResult> {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.due);
        if !due {
            return None;
        }
        let submission = self.pending.take()?;

        match backend.subscribe(&submission.email) {
            Ok(()) => {
                info!("newsletter subscription accepted");
                doc.set_status(self.status, SUCCESS_MESSAGE, StatusKind::Success.class());
                doc.reset_form(self.form);
                Some(SubmitResult::Subscribed(submission.email))
            }
            Err(err) => {
                warn!("newsletter subscription failed: {}", err);
                doc.set_status(self.status, FAILURE_MESSAGE, StatusKind::Error.class());
                Some(SubmitResult::Failed(err))
            }
        }
    }
}
