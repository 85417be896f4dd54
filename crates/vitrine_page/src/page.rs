//! A page bound to a host
//!
//! [`Page`] plays the browser's part around a [`PageEnhancer`]: it applies
//! the direct effect of each input (focus moves, typed values, relayout)
//! before the enhancer sees it, and performs the host's default action
//! afterwards unless the enhancer prevented it.

use std::time::Instant;

use serde::Serialize;
use tracing::{trace, warn};
use vitrine_core::{Document, NodeId, NodeKind, ScrollBehavior};
use vitrine_platform::{
    Event, EventOutcome, Host, InputEvent, Key, KeyState, KeyboardEvent, WindowEvent,
};

use crate::config::PageConfig;
use crate::enhancer::{Features, PageEnhancer};
use crate::newsletter::{MockBackend, SubscriptionBackend};

/// Distance an unhandled arrow key scrolls a focused strip
pub const ARROW_SCROLL_STEP: f32 = 40.0;

/// Observable state of a page at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub elapsed_ms: u64,
    pub features: FeatureFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slider: Option<SliderSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focused: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newsletter: Option<NewsletterSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    pub videos_playing: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureFlags {
    pub slider: bool,
    pub newsletter: bool,
    pub year: bool,
}

impl From<Features> for FeatureFlags {
    fn from(f: Features) -> Self {
        Self {
            slider: f.slider,
            newsletter: f.newsletter,
            year: f.year,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderSnapshot {
    pub offset: f32,
    pub viewport_width: f32,
    pub content_width: f32,
    pub animating: bool,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsletterSnapshot {
    pub email: String,
    pub status: String,
    pub status_class: String,
    pub pending: bool,
}

/// Document, host and enhancer driven together
#[derive(Debug)]
pub struct Page<H: Host, B: SubscriptionBackend = MockBackend> {
    doc: Document,
    host: H,
    config: PageConfig,
    enhancer: PageEnhancer<B>,
    /// Window width not taken up by the slider strip
    strip_gutter: Option<f32>,
    started: Instant,
}

impl<H: Host> Page<H, MockBackend> {
    /// Enhance `doc` laid out in a window `window_width` wide
    pub fn new(doc: Document, host: H, config: PageConfig, window_width: f32) -> Self {
        Self::with_backend(doc, host, config, window_width, MockBackend::new())
    }
}

impl<H: Host, B: SubscriptionBackend> Page<H, B> {
    pub fn with_backend(
        mut doc: Document,
        host: H,
        config: PageConfig,
        window_width: f32,
        backend: B,
    ) -> Self {
        let started = host.now();
        let enhancer = PageEnhancer::with_backend(&mut doc, &host, &config, backend);
        let strip_gutter = enhancer
            .slider()
            .and_then(|s| doc.strip(s.strip()))
            .map(|strip| (window_width - strip.viewport_width()).max(0.0));
        Self {
            doc,
            host,
            config,
            enhancer,
            strip_gutter,
            started,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn enhancer(&self) -> &PageEnhancer<B> {
        &self.enhancer
    }

    /// Deliver one event the way a browser would
    ///
    /// A focus event on an element that cannot take focus is dropped
    /// before any enhancement sees it.
    pub fn dispatch(&mut self, event: Event) -> EventOutcome {
        if !self.apply_direct_effect(&event) {
            trace!("dropped {:?}", event);
            return EventOutcome::Ignored;
        }
        let outcome = self.enhancer.handle_event(&mut self.doc, &self.host, &event);
        if !outcome.is_default_prevented() {
            self.apply_default_action(&event);
        }
        trace!("dispatched {:?}: {:?}", event, outcome);
        outcome
    }

    /// Move focus to the element with `id`, firing the focus event
    pub fn focus(&mut self, id: &str) -> EventOutcome {
        self.dispatch(Event::Input(InputEvent::Focus { target: id.into() }))
    }

    pub fn click(&mut self, id: &str) -> EventOutcome {
        self.dispatch(Event::Input(InputEvent::Click { target: id.into() }))
    }

    /// Press and release `key` on the focused element
    pub fn press(&mut self, key: Key) -> EventOutcome {
        let pressed = self.dispatch(Event::Input(InputEvent::Keyboard(KeyboardEvent::pressed(
            key.clone(),
        ))));
        let released =
            self.dispatch(Event::Input(InputEvent::Keyboard(KeyboardEvent::released(key))));
        pressed.merge(released)
    }

    /// Replace the value of a text field
    pub fn type_text(&mut self, id: &str, value: &str) -> EventOutcome {
        self.dispatch(Event::Input(InputEvent::Text {
            target: id.into(),
            value: value.into(),
        }))
    }

    pub fn submit(&mut self, id: &str) -> EventOutcome {
        self.dispatch(Event::Input(InputEvent::Submit { target: id.into() }))
    }

    /// Resize the window to `width` logical pixels
    pub fn resize(&mut self, width: f32) -> EventOutcome {
        self.dispatch(Event::Window(WindowEvent::Resized { width }))
    }

    /// Render one animation frame
    pub fn frame(&mut self) {
        self.dispatch(Event::Frame);
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let slider = self.enhancer.slider().and_then(|s| {
            let metrics = self.doc.scroll_metrics(s.strip())?;
            Some(SliderSnapshot {
                offset: metrics.offset,
                viewport_width: metrics.viewport_width,
                content_width: metrics.content_width,
                animating: self.doc.strip(s.strip())?.is_animating(),
                prev_disabled: self.doc.is_disabled(s.prev())?,
                next_disabled: self.doc.is_disabled(s.next())?,
            })
        });

        let ids = &self.config.newsletter;
        let newsletter = match (
            self.doc.get_by_id(&ids.email).and_then(|n| self.doc.value(n)),
            self.doc.get_by_id(&ids.status).and_then(|n| self.doc.status(n)),
        ) {
            (Some(email), Some(status)) => Some(NewsletterSnapshot {
                email: email.to_string(),
                status: status.text.clone(),
                status_class: status.class.clone(),
                pending: self.enhancer.submission_pending(),
            }),
            _ => None,
        };

        let videos_playing = self
            .doc
            .videos()
            .into_iter()
            .filter(|&v| self.doc.video(v).is_some_and(|v| v.playing))
            .count();

        PageSnapshot {
            elapsed_ms: self.host.now().saturating_duration_since(self.started).as_millis() as u64,
            features: self.enhancer.features().into(),
            slider,
            focused: self
                .doc
                .focused()
                .and_then(|n| self.doc.element_id(n))
                .map(str::to_string),
            newsletter,
            year: self
                .doc
                .get_by_id(&self.config.footer.year)
                .and_then(|n| self.doc.text(n))
                .map(str::to_string),
            videos_playing,
        }
    }

    /// Returns `false` when the event never happened from the page's view
    fn apply_direct_effect(&mut self, event: &Event) -> bool {
        match event {
            Event::Input(InputEvent::Focus { target }) => {
                return self
                    .doc
                    .get_by_id(target)
                    .is_some_and(|node| self.doc.focus(node));
            }
            Event::Input(InputEvent::Text { target, value }) => {
                if let Some(node) = self.doc.get_by_id(target) {
                    self.doc.set_value(node, value.clone());
                }
            }
            Event::Window(WindowEvent::Resized { width, .. }) => {
                let (Some(gutter), Some(slider)) = (self.strip_gutter, self.enhancer.slider())
                else {
                    return true;
                };
                let strip = slider.strip();
                if let Err(err) = self.doc.resize_strip(strip, (width - gutter).max(0.0)) {
                    warn!("relayout of slider strip failed: {}", err);
                }
            }
            _ => {}
        }
        true
    }

    fn apply_default_action(&mut self, event: &Event) {
        let Event::Input(InputEvent::Keyboard(key)) = event else {
            return;
        };
        if key.state != KeyState::Pressed {
            return;
        }
        let Some(strip) = self.doc.focused().and_then(|n| self.enclosing_strip(n)) else {
            return;
        };

        let scrolled = match key.key {
            Key::Left => self.doc.scroll_by(strip, -ARROW_SCROLL_STEP, ScrollBehavior::Auto),
            Key::Right => self.doc.scroll_by(strip, ARROW_SCROLL_STEP, ScrollBehavior::Auto),
            Key::Home => self.doc.scroll_to(strip, 0.0, ScrollBehavior::Auto),
            Key::End => self.doc.scroll_to(strip, f32::MAX, ScrollBehavior::Auto),
            _ => false,
        };
        if scrolled {
            self.enhancer.refresh_slider(&mut self.doc);
        }
    }

    fn enclosing_strip(&self, node: NodeId) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(n) = current {
            if matches!(self.doc.kind(n), Some(NodeKind::ScrollStrip(_))) {
                return Some(n);
            }
            current = self.doc.parent(n);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use vitrine_core::{Button, Card, ElementBox, ScrollStrip, Status, TextField};
    use vitrine_platform::ManualHost;

    fn build(with_buttons: bool) -> Page<ManualHost> {
        let mut doc = Document::new();
        let root = doc.root();
        let strip = doc
            .insert_with_id(root, "slider", NodeKind::ScrollStrip(ScrollStrip::new(300.0)))
            .unwrap();
        for i in 0..5 {
            let bounds = ElementBox::new(100.0).with_margins(0.0, 20.0);
            doc.insert_with_id(strip, format!("card-{i}"), NodeKind::Card(Card::new(bounds)))
                .unwrap();
        }
        if with_buttons {
            doc.insert_with_id(root, "prevBtn", NodeKind::Button(Button::new("Previous")))
                .unwrap();
            doc.insert_with_id(root, "nextBtn", NodeKind::Button(Button::new("Next")))
                .unwrap();
        }
        let form = doc.insert_with_id(root, "newsletter", NodeKind::Form).unwrap();
        doc.insert_with_id(form, "email", NodeKind::TextField(TextField::default()))
            .unwrap();
        doc.insert_with_id(form, "newsletter-status", NodeKind::Status(Status::default()))
            .unwrap();

        Page::new(doc, ManualHost::new(), PageConfig::default(), 340.0)
    }

    fn run_frames(page: &mut Page<ManualHost>, n: usize) {
        for _ in 0..n {
            page.host().advance(Duration::from_millis(16));
            page.frame();
        }
    }

    fn offset(page: &Page<ManualHost>) -> f32 {
        let strip = page.document().get_by_id("slider").unwrap();
        page.document().scroll_metrics(strip).unwrap().offset
    }

    #[test]
    fn test_bound_key_prevents_native_scroll() {
        let mut page = build(true);
        page.focus("card-0");
        assert_eq!(page.press(Key::Right), EventOutcome::DefaultPrevented);
        // Only the smooth request is in flight
        assert_eq!(offset(&page), 0.0);
        run_frames(&mut page, 60);
        assert_eq!(offset(&page), 120.0);
    }

    #[test]
    fn test_unenhanced_strip_scrolls_natively() {
        let mut page = build(false);
        assert!(page.enhancer().slider().is_none());
        page.focus("card-0");
        assert_eq!(page.press(Key::Right), EventOutcome::Ignored);
        assert_eq!(offset(&page), ARROW_SCROLL_STEP);
        page.press(Key::End);
        assert_eq!(offset(&page), 300.0);
        page.press(Key::Home);
        assert_eq!(offset(&page), 0.0);
    }

    #[test]
    fn test_unfocusable_card_is_not_centered() {
        let mut page = build(true);
        let card = page.document().get_by_id("card-3").unwrap();
        if let Some(NodeKind::Card(c)) = page.document_mut().kind_mut(card) {
            c.focusable = false;
        }

        assert_eq!(page.focus("card-3"), EventOutcome::Ignored);
        assert_eq!(page.document().focused(), None);
        let strip = page.document().get_by_id("slider").unwrap();
        assert!(!page.document().strip(strip).unwrap().is_animating());

        assert_eq!(page.focus("card-2"), EventOutcome::Handled);
        assert!(page.document().strip(strip).unwrap().is_animating());
    }

    #[test]
    fn test_window_resize_relayouts_strip() {
        let mut page = build(true);
        page.resize(640.0);
        let snapshot = page.snapshot();
        let slider = snapshot.slider.unwrap();
        assert_eq!(slider.viewport_width, 600.0);
        assert!(!slider.next_disabled);

        run_frames(&mut page, 13);
        let slider = page.snapshot().slider.unwrap();
        assert!(slider.prev_disabled);
        assert!(slider.next_disabled);
    }

    #[test]
    fn test_snapshot_tracks_newsletter() {
        let mut page = build(true);
        page.focus("email");
        page.type_text("email", "reader@example.com");
        assert!(page.submit("newsletter").is_default_prevented());

        let snapshot = page.snapshot();
        assert_eq!(snapshot.focused.as_deref(), Some("email"));
        let newsletter = snapshot.newsletter.unwrap();
        assert_eq!(newsletter.status, crate::newsletter::PENDING_MESSAGE);
        assert!(newsletter.pending);

        run_frames(&mut page, 44);
        let snapshot = page.snapshot();
        assert_eq!(snapshot.elapsed_ms, 704);
        let newsletter = snapshot.newsletter.unwrap();
        assert_eq!(newsletter.status, crate::newsletter::SUCCESS_MESSAGE);
        assert_eq!(newsletter.email, "");
        assert!(!newsletter.pending);
    }
}
