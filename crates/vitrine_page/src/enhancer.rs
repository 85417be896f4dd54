//! Wiring every enhancement to the event stream
//!
//! # Architecture
//!
//! ```text
//! Event::Input(Click/Keyboard/Focus) ──► SliderController ──► scroll request
//! Event::Input(Submit) ────────────────► NewsletterForm
//! Event::Window(Resized) ──────────────► Debounce ─┐
//! Event::Frame ─► tick strip ─► Moved ─► Throttle ─┼─► refresh_button_state
//!                            └► Settled ───────────┘
//!             └─► Debounce::poll, NewsletterForm::poll
//! ```
//!
//! Features whose elements are missing are simply absent; the enhancer
//! ignores events they would have handled.

use tracing::{debug, info};
use vitrine_core::{Debounce, Document, ScrollTick, Throttle};
use vitrine_platform::{Event, EventOutcome, Host, InputEvent, WindowEvent};
use vitrine_slider::{NavigationState, SliderController};

use crate::config::PageConfig;
use crate::footer::stamp_year;
use crate::motion::apply_motion_preference;
use crate::newsletter::{MockBackend, NewsletterForm, SubmitResult, SubscriptionBackend};

/// Which enhancements attached at setup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    pub slider: bool,
    pub newsletter: bool,
    pub year: bool,
}

/// Progressive enhancement for one page
#[derive(Debug)]
pub struct PageEnhancer<B: SubscriptionBackend = MockBackend> {
    slider: Option<SliderController>,
    newsletter: Option<NewsletterForm>,
    backend: B,
    scroll_throttle: Throttle,
    resize_debounce: Debounce,
    features: Features,
    last_result: Option<SubmitResult>,
}

impl PageEnhancer<MockBackend> {
    /// Attach every enhancement with the mock subscription backend
    pub fn setup<H: Host + ?Sized>(doc: &mut Document, host: &H, config: &PageConfig) -> Self {
        Self::with_backend(doc, host, config, MockBackend::new())
    }
}

impl<B: SubscriptionBackend> PageEnhancer<B> {
    /// Attach every enhancement whose elements are present
    pub fn with_backend<H: Host + ?Sized>(
        doc: &mut Document,
        host: &H,
        config: &PageConfig,
        backend: B,
    ) -> Self {
        let year = stamp_year(doc, host, &config.footer.year);
        apply_motion_preference(doc, host.prefers_reduced_motion());

        let slider = SliderController::attach(doc, &config.slider);
        if let Some(slider) = &slider {
            slider.refresh_button_state(doc);
        }
        let newsletter =
            NewsletterForm::attach(doc, &config.newsletter, config.timing.subscribe_delay());

        let features = Features {
            slider: slider.is_some(),
            newsletter: newsletter.is_some(),
            year,
        };
        info!(
            "page enhanced on {} host: slider={} newsletter={} year={}",
            host.name(),
            features.slider,
            features.newsletter,
            features.year
        );

        Self {
            slider,
            newsletter,
            backend,
            scroll_throttle: Throttle::new(config.timing.scroll_throttle()),
            resize_debounce: Debounce::new(config.timing.resize_debounce()),
            features,
            last_result: None,
        }
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub fn slider(&self) -> Option<&SliderController> {
        self.slider.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Outcome of the most recently completed newsletter submission
    pub fn last_submission(&self) -> Option<&SubmitResult> {
        self.last_result.as_ref()
    }

    /// Whether a newsletter submission is waiting on the backend
    pub fn submission_pending(&self) -> bool {
        self.newsletter.as_ref().is_some_and(NewsletterForm::is_pending)
    }

    /// Whether a resize refresh is still waiting for input to settle
    pub fn resize_pending(&self) -> bool {
        self.resize_debounce.is_pending()
    }

    /// Recompute the slider buttons now
    pub fn refresh_slider(&self, doc: &mut Document) -> Option<NavigationState> {
        self.slider.as_ref()?.refresh_button_state(doc)
    }

    /// React to one event
    ///
    /// The host applies the event's own effect (focus moves, field values,
    /// relayout) before calling this; the returned outcome tells it whether
    /// to skip its default action afterwards.
    pub fn handle_event<H: Host + ?Sized>(
        &mut self,
        doc: &mut Document,
        host: &H,
        event: &Event,
    ) -> EventOutcome {
        match event {
            Event::Frame => {
                self.on_frame(doc, host);
                EventOutcome::Ignored
            }
            Event::Window(WindowEvent::Resized { .. }) => {
                if self.slider.is_none() {
                    return EventOutcome::Ignored;
                }
                self.resize_debounce.schedule(host.now());
                EventOutcome::Handled
            }
            Event::Window(WindowEvent::MotionPreferenceChanged { reduced }) => {
                if apply_motion_preference(doc, *reduced) > 0 {
                    EventOutcome::Handled
                } else {
                    EventOutcome::Ignored
                }
            }
            Event::Input(input) => self.on_input(doc, host, input),
        }
    }

    fn on_input<H: Host + ?Sized>(
        &mut self,
        doc: &mut Document,
        host: &H,
        input: &InputEvent,
    ) -> EventOutcome {
        match input {
            InputEvent::Keyboard(key) => {
                let Some(slider) = &self.slider else {
                    return EventOutcome::Ignored;
                };
                let in_slider = doc
                    .focused()
                    .is_some_and(|focused| doc.is_within(focused, slider.strip()));
                if !in_slider {
                    return EventOutcome::Ignored;
                }
                slider.handle_key(doc, key)
            }
            InputEvent::Click { target } => {
                let (Some(slider), Some(node)) = (&self.slider, doc.get_by_id(target)) else {
                    return EventOutcome::Ignored;
                };
                slider.handle_click(doc, node)
            }
            InputEvent::Focus { target } => {
                let (Some(slider), Some(node)) = (&self.slider, doc.get_by_id(target)) else {
                    return EventOutcome::Ignored;
                };
                if slider.on_item_focused(doc, node) {
                    EventOutcome::Handled
                } else {
                    EventOutcome::Ignored
                }
            }
            InputEvent::Submit { target } => {
                let Some(newsletter) = &mut self.newsletter else {
                    return EventOutcome::Ignored;
                };
                if doc.get_by_id(target) != Some(newsletter.form()) {
                    return EventOutcome::Ignored;
                }
                newsletter.handle_submit(doc, host.now())
            }
            InputEvent::Text { .. } => EventOutcome::Ignored,
        }
    }

    fn on_frame<H: Host + ?Sized>(&mut self, doc: &mut Document, host: &H) {
        let now = host.now();

        if let Some(slider) = &self.slider {
            let refresh = match doc.tick_strip(slider.strip()) {
                ScrollTick::Idle => false,
                ScrollTick::Moved => self.scroll_throttle.try_fire(now),
                ScrollTick::Settled => true,
            };
            let resized = self.resize_debounce.poll(now);
            if refresh || resized {
                if let Some(state) = slider.refresh_button_state(doc) {
                    debug!(
                        "slider buttons: prev_disabled={} next_disabled={}",
                        state.prev_disabled, state.next_disabled
                    );
                }
            }
        }

        if let Some(newsletter) = &mut self.newsletter {
            if let Some(result) = newsletter.poll(doc, now, &mut self.backend) {
                self.last_result = Some(result);
            }
        }
    }
}
