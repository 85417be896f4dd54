//! Slider controller
//!
//! Turns navigation intents into scroll requests on a strip and keeps the
//! previous/next buttons in step with the scroll position:
//!
//! ```text
//! click prevBtn ─┐
//! key Left ──────┼─► SliderAction ─► dispatch ─► ScrollSurface::scroll_by / scroll_to
//! key Home/End ──┘
//!
//! scroll settle / resize ─► refresh_button_state ─► AffordanceState ─► disabled flags
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use vitrine_core::{
    event_types, AffordanceState, Document, NodeId, NodeKind, ScrollBehavior, ScrollInline,
    ScrollOptions, StateTransitions,
};
use vitrine_platform::{EventOutcome, KeyboardEvent};

use crate::action::{action_for_key, Direction, Edge, SliderAction};
use crate::surface::ScrollSurface;

/// Element ids the slider attaches to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SliderSelectors {
    /// Scroll container holding the cards
    #[serde(default = "default_container")]
    pub container: String,
    /// "Previous" button
    #[serde(default = "default_prev")]
    pub prev: String,
    /// "Next" button
    #[serde(default = "default_next")]
    pub next: String,
}

fn default_container() -> String {
    "slider".to_string()
}

fn default_prev() -> String {
    "prevBtn".to_string()
}

fn default_next() -> String {
    "nextBtn".to_string()
}

impl Default for SliderSelectors {
    fn default() -> Self {
        Self {
            container: default_container(),
            prev: default_prev(),
            next: default_next(),
        }
    }
}

/// Disabled flags of both buttons after a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

/// Navigation controller for one slider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderController {
    strip: NodeId,
    prev: NodeId,
    next: NodeId,
}

impl SliderController {
    /// Bind to known nodes without checking them
    pub fn new(strip: NodeId, prev: NodeId, next: NodeId) -> Self {
        Self { strip, prev, next }
    }

    /// Resolve the slider's elements by id
    ///
    /// Returns `None` (and the feature stays off) when the container or
    /// either button is missing or is the wrong kind of element.
    pub fn attach(doc: &Document, selectors: &SliderSelectors) -> Option<Self> {
        let lookup = |id: &str| {
            let node = doc.get_by_id(id);
            if node.is_none() {
                debug!("slider element #{} not found, slider disabled", id);
            }
            node
        };
        let strip = lookup(&selectors.container)?;
        let prev = lookup(&selectors.prev)?;
        let next = lookup(&selectors.next)?;

        if !matches!(doc.kind(strip), Some(NodeKind::ScrollStrip(_))) {
            debug!("#{} is not a scroll container, slider disabled", selectors.container);
            return None;
        }
        if doc.button(prev).is_none() || doc.button(next).is_none() {
            debug!("slider controls are not buttons, slider disabled");
            return None;
        }
        Some(Self::new(strip, prev, next))
    }

    pub fn strip(&self) -> NodeId {
        self.strip
    }

    pub fn prev(&self) -> NodeId {
        self.prev
    }

    pub fn next(&self) -> NodeId {
        self.next
    }

    /// Width of the first card plus both of its margins, in whole pixels
    ///
    /// Read fresh on every call so a re-laid-out strip steps by its new
    /// card size. `None` when the strip has no card (or a card with no
    /// extent), which makes stepping a no-op.
    pub fn compute_step_distance<S: ScrollSurface + ?Sized>(&self, surface: &S) -> Option<f32> {
        let bounds = surface.first_item_box(self.strip)?;
        let step = bounds.outer_width().round();
        (step > 0.0).then_some(step)
    }

    /// Request one smooth step in `direction`
    ///
    /// Returns `true` if a scroll request was issued.
    pub fn navigate<S: ScrollSurface + ?Sized>(&self, surface: &mut S, direction: Direction) -> bool {
        let Some(step) = self.compute_step_distance(surface) else {
            debug!("slider has no cards, {:?} ignored", direction);
            return false;
        };
        let dx = match direction {
            Direction::Previous => -step,
            Direction::Next => step,
        };
        trace!("slider step {:?} by {}", direction, dx);
        surface.scroll_by(self.strip, dx, ScrollBehavior::Smooth);
        true
    }

    /// Request a smooth scroll to the start or end of the strip
    ///
    /// Returns `true` if a scroll request was issued.
    pub fn navigate_to_edge<S: ScrollSurface + ?Sized>(&self, surface: &mut S, edge: Edge) -> bool {
        let Some(metrics) = surface.scroll_metrics(self.strip) else {
            return false;
        };
        let x = match edge {
            Edge::Start => 0.0,
            Edge::End => metrics.max_offset(),
        };
        trace!("slider jump to {:?} ({})", edge, x);
        surface.scroll_to(self.strip, x, ScrollBehavior::Smooth);
        true
    }

    /// Perform a navigation intent
    pub fn dispatch<S: ScrollSurface + ?Sized>(&self, surface: &mut S, action: SliderAction) -> bool {
        match action {
            SliderAction::Navigate(direction) => self.navigate(surface, direction),
            SliderAction::NavigateToEdge(edge) => self.navigate_to_edge(surface, edge),
        }
    }

    /// Action a click on `control` stands for, if it is one of ours
    pub fn action_for_control(&self, control: NodeId) -> Option<SliderAction> {
        if control == self.prev {
            Some(SliderAction::Navigate(Direction::Previous))
        } else if control == self.next {
            Some(SliderAction::Navigate(Direction::Next))
        } else {
            None
        }
    }

    /// Handle a click on the previous/next button
    ///
    /// Disabled buttons do not activate.
    pub fn handle_click<S: ScrollSurface + ?Sized>(&self, surface: &mut S, target: NodeId) -> EventOutcome {
        let Some(action) = self.action_for_control(target) else {
            return EventOutcome::Ignored;
        };
        if surface.is_disabled(target) != Some(false) {
            return EventOutcome::Ignored;
        }
        self.dispatch(surface, action);
        EventOutcome::Handled
    }

    /// Handle a key press while the slider region has focus
    ///
    /// Bound keys take over the host's default scrolling.
    pub fn handle_key<S: ScrollSurface + ?Sized>(&self, surface: &mut S, event: &KeyboardEvent) -> EventOutcome {
        let Some(action) = action_for_key(event) else {
            return EventOutcome::Ignored;
        };
        self.dispatch(surface, action);
        EventOutcome::DefaultPrevented
    }

    /// Center a card that just received focus
    ///
    /// Only scrolls; focus is left where it is.
    pub fn on_item_focused<S: ScrollSurface + ?Sized>(&self, surface: &mut S, item: NodeId) -> bool {
        if !surface.contains_item(self.strip, item) {
            return false;
        }
        let options = ScrollOptions {
            behavior: ScrollBehavior::Smooth,
            inline: ScrollInline::Center,
        };
        surface.scroll_into_view(self.strip, item, options);
        true
    }

    /// Recompute both buttons' disabled flags from the live scroll position
    ///
    /// Idempotent. Returns the resulting flags, or `None` if the strip is gone.
    pub fn refresh_button_state<S: ScrollSurface + ?Sized>(&self, surface: &mut S) -> Option<NavigationState> {
        let metrics = surface.scroll_metrics(self.strip)?;
        let prev_disabled = Self::apply_edge(surface, self.prev, metrics.at_start());
        let next_disabled = Self::apply_edge(surface, self.next, metrics.at_end());
        Some(NavigationState {
            prev_disabled: prev_disabled?,
            next_disabled: next_disabled?,
        })
    }

    fn apply_edge<S: ScrollSurface + ?Sized>(surface: &mut S, control: NodeId, at_edge: bool) -> Option<bool> {
        let current = AffordanceState::from_disabled(surface.is_disabled(control)?);
        match current.on_event(event_types::for_edge(at_edge)) {
            Some(state) => {
                trace!("slider control {:?}: {:?} -> {:?}", control, current, state);
                surface.set_disabled(control, state.is_disabled());
                Some(state.is_disabled())
            }
            None => Some(current.is_disabled()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::{
        Button, Card, ElementBox, ScrollMetrics, ScrollStrip, ScrollTick,
    };
    use vitrine_platform::Key;

    struct Page {
        doc: Document,
        slider: SliderController,
        cards: Vec<NodeId>,
    }

    impl Page {
        /// Viewport 300, `n` cards 100 wide with a 20px right margin
        fn new(n: usize) -> Self {
            Self::with_card(n, ElementBox::new(100.0).with_margins(0.0, 20.0))
        }

        fn with_card(n: usize, bounds: ElementBox) -> Self {
            let mut doc = Document::new();
            let root = doc.root();
            let strip = doc
                .insert_with_id(root, "slider", NodeKind::ScrollStrip(ScrollStrip::new(300.0)))
                .unwrap();
            let cards = (0..n)
                .map(|_| doc.insert(strip, NodeKind::Card(Card::new(bounds))).unwrap())
                .collect();
            doc.insert_with_id(root, "prevBtn", NodeKind::Button(Button::new("Previous")))
                .unwrap();
            doc.insert_with_id(root, "nextBtn", NodeKind::Button(Button::new("Next")))
                .unwrap();
            let slider = SliderController::attach(&doc, &SliderSelectors::default()).unwrap();
            slider.refresh_button_state(&mut doc);
            Self { doc, slider, cards }
        }

        fn settle(&mut self) {
            let strip = self.slider.strip();
            for _ in 0..1000 {
                if self.doc.tick_strip(strip) != ScrollTick::Moved {
                    break;
                }
            }
            self.slider.refresh_button_state(&mut self.doc);
        }

        fn offset(&self) -> f32 {
            self.metrics().offset
        }

        fn metrics(&self) -> ScrollMetrics {
            self.doc.scroll_metrics(self.slider.strip()).unwrap()
        }

        fn buttons(&self) -> (bool, bool) {
            (
                self.doc.is_disabled(self.slider.prev()).unwrap(),
                self.doc.is_disabled(self.slider.next()).unwrap(),
            )
        }

        fn jump(&mut self, x: f32) {
            self.doc
                .scroll_to(self.slider.strip(), x, ScrollBehavior::Auto);
            self.slider.refresh_button_state(&mut self.doc);
        }
    }

    /// Records requests instead of scrolling
    #[derive(Default)]
    struct RecordingSurface {
        requests: Vec<String>,
        first_item: Option<ElementBox>,
    }

    impl ScrollSurface for RecordingSurface {
        fn scroll_metrics(&self, _strip: NodeId) -> Option<ScrollMetrics> {
            Some(ScrollMetrics {
                offset: 0.0,
                viewport_width: 300.0,
                content_width: 600.0,
            })
        }

        fn first_item_box(&self, _strip: NodeId) -> Option<ElementBox> {
            self.first_item
        }

        fn contains_item(&self, _strip: NodeId, _item: NodeId) -> bool {
            true
        }

        fn scroll_by(&mut self, _strip: NodeId, dx: f32, behavior: ScrollBehavior) {
            self.requests.push(format!("by {dx} {behavior:?}"));
        }

        fn scroll_to(&mut self, _strip: NodeId, x: f32, behavior: ScrollBehavior) {
            self.requests.push(format!("to {x} {behavior:?}"));
        }

        fn scroll_into_view(&mut self, _strip: NodeId, _item: NodeId, options: ScrollOptions) {
            self.requests.push(format!("into view {:?}", options.inline));
        }

        fn is_disabled(&self, _control: NodeId) -> Option<bool> {
            Some(false)
        }

        fn set_disabled(&mut self, _control: NodeId, _disabled: bool) {}
    }

    #[test]
    fn test_initial_state() {
        let page = Page::new(5);
        assert_eq!(page.slider.compute_step_distance(&page.doc), Some(120.0));
        assert_eq!(page.buttons(), (true, false));
    }

    #[test]
    fn test_next_steps_one_card() {
        let mut page = Page::new(5);
        assert!(page.slider.navigate(&mut page.doc, Direction::Next));
        page.settle();
        assert_eq!(page.offset(), 120.0);
        assert_eq!(page.buttons(), (false, false));
    }

    #[test]
    fn test_next_disabled_at_end() {
        let mut page = Page::new(5);
        for _ in 0..4 {
            page.slider.navigate(&mut page.doc, Direction::Next);
            page.settle();
        }
        assert_eq!(page.offset(), 300.0);
        assert_eq!(page.buttons(), (false, true));
    }

    #[test]
    fn test_step_clamps_at_both_edges() {
        let mut page = Page::new(5);
        let max = page.metrics().max_offset();
        for start in [0.0, 50.0, 120.0, 200.0, 260.0, 299.0] {
            page.jump(start);
            page.slider.navigate(&mut page.doc, Direction::Next);
            page.settle();
            assert_eq!(page.offset(), f32::min(start + 120.0, max), "next from {start}");

            page.jump(start);
            page.slider.navigate(&mut page.doc, Direction::Previous);
            page.settle();
            assert_eq!(page.offset(), f32::max(start - 120.0, 0.0), "prev from {start}");
        }
    }

    #[test]
    fn test_button_flags_follow_edges() {
        let mut page = Page::new(5);
        for x in [0.0, 0.5, 120.0, 298.0, 299.0, 300.0] {
            page.jump(x);
            let m = page.metrics();
            let (prev, next) = page.buttons();
            assert_eq!(prev, m.offset == 0.0, "prev at {x}");
            assert_eq!(next, m.offset + m.viewport_width >= m.content_width - 1.0, "next at {x}");
        }
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut page = Page::new(5);
        page.jump(120.0);
        let first = page.slider.refresh_button_state(&mut page.doc);
        let second = page.slider.refresh_button_state(&mut page.doc);
        assert_eq!(first, second);
        assert_eq!(
            first,
            Some(NavigationState {
                prev_disabled: false,
                next_disabled: false
            })
        );
    }

    #[test]
    fn test_keyboard_matches_clicks() {
        for (key, button) in [(Key::Right, "nextBtn"), (Key::Left, "prevBtn")] {
            let mut by_key = Page::new(5);
            let mut by_click = Page::new(5);
            by_key.jump(120.0);
            by_click.jump(120.0);

            let outcome = by_key
                .slider
                .handle_key(&mut by_key.doc, &KeyboardEvent::pressed(key));
            assert_eq!(outcome, EventOutcome::DefaultPrevented);

            let target = by_click.doc.get_by_id(button).unwrap();
            let outcome = by_click.slider.handle_click(&mut by_click.doc, target);
            assert_eq!(outcome, EventOutcome::Handled);

            by_key.settle();
            by_click.settle();
            assert_eq!(by_key.offset(), by_click.offset());
            assert_eq!(by_key.buttons(), by_click.buttons());
        }
    }

    #[test]
    fn test_home_and_end() {
        let mut page = Page::new(5);
        page.jump(120.0);
        page.slider
            .handle_key(&mut page.doc, &KeyboardEvent::pressed(Key::End));
        page.settle();
        assert_eq!(page.offset(), page.metrics().max_offset());
        assert_eq!(page.buttons(), (false, true));

        page.slider
            .handle_key(&mut page.doc, &KeyboardEvent::pressed(Key::Home));
        page.settle();
        assert_eq!(page.offset(), 0.0);
        assert_eq!(page.buttons(), (true, false));
    }

    #[test]
    fn test_unbound_key_passes_through() {
        let mut page = Page::new(5);
        let outcome = page
            .slider
            .handle_key(&mut page.doc, &KeyboardEvent::pressed(Key::Up));
        assert_eq!(outcome, EventOutcome::Ignored);
        assert!(!page.doc.strip(page.slider.strip()).unwrap().is_animating());
    }

    #[test]
    fn test_disabled_button_click_ignored() {
        let mut page = Page::new(5);
        let prev = page.slider.prev();
        assert_eq!(page.slider.handle_click(&mut page.doc, prev), EventOutcome::Ignored);
        let root = page.doc.root();
        assert_eq!(page.slider.handle_click(&mut page.doc, root), EventOutcome::Ignored);
    }

    #[test]
    fn test_empty_slider_is_noop() {
        let mut page = Page::new(0);
        assert_eq!(page.slider.compute_step_distance(&page.doc), None);
        assert!(!page.slider.navigate(&mut page.doc, Direction::Next));
        assert!(!page.slider.navigate(&mut page.doc, Direction::Previous));
        page.settle();
        assert_eq!(page.offset(), 0.0);
        // Nothing to scroll: both buttons off
        assert_eq!(page.buttons(), (true, true));
    }

    #[test]
    fn test_content_that_fits_disables_both() {
        let page = Page::new(2);
        assert_eq!(page.metrics().max_offset(), 0.0);
        assert_eq!(page.buttons(), (true, true));
    }

    #[test]
    fn test_step_reads_both_margins_and_rounds() {
        let page = Page::with_card(3, ElementBox::new(100.4).with_margins(8.0, 12.0));
        assert_eq!(page.slider.compute_step_distance(&page.doc), Some(120.0));
    }

    #[test]
    fn test_step_follows_relayout() {
        let mut page = Page::new(5);
        let first = page.cards[0];
        page.doc
            .set_card_box(first, ElementBox::new(200.0).with_margins(10.0, 10.0))
            .unwrap();
        assert_eq!(page.slider.compute_step_distance(&page.doc), Some(220.0));
    }

    #[test]
    fn test_one_request_per_navigation() {
        let slider = SliderController::new(NodeId::default(), NodeId::default(), NodeId::default());
        let mut surface = RecordingSurface {
            first_item: Some(ElementBox::new(100.0).with_margins(0.0, 20.0)),
            ..Default::default()
        };

        slider.navigate(&mut surface, Direction::Next);
        slider.navigate(&mut surface, Direction::Previous);
        slider.navigate_to_edge(&mut surface, Edge::End);
        slider.navigate_to_edge(&mut surface, Edge::Start);
        assert_eq!(
            surface.requests,
            vec![
                "by 120 Smooth",
                "by -120 Smooth",
                "to 300 Smooth",
                "to 0 Smooth",
            ]
        );
    }

    #[test]
    fn test_navigation_without_items_issues_nothing() {
        let slider = SliderController::new(NodeId::default(), NodeId::default(), NodeId::default());
        let mut surface = RecordingSurface::default();
        assert!(!slider.navigate(&mut surface, Direction::Next));
        assert!(surface.requests.is_empty());
    }

    #[test]
    fn test_focus_follow_centers_without_moving_focus() {
        let mut page = Page::new(5);
        let card = page.cards[3];
        assert!(page.doc.focus(card));
        let changes = page.doc.focus_changes();

        assert!(page.slider.on_item_focused(&mut page.doc, card));
        page.settle();
        assert_eq!(page.offset(), 260.0);
        assert_eq!(page.doc.focused(), Some(card));
        assert_eq!(page.doc.focus_changes(), changes);

        let root = page.doc.root();
        assert!(!page.slider.on_item_focused(&mut page.doc, root));
    }

    #[test]
    fn test_attach_requires_all_elements() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.insert_with_id(root, "slider", NodeKind::ScrollStrip(ScrollStrip::new(300.0)))
            .unwrap();
        doc.insert_with_id(root, "prevBtn", NodeKind::Button(Button::new("Previous")))
            .unwrap();
        assert!(SliderController::attach(&doc, &SliderSelectors::default()).is_none());

        // Wrong kind for the next control
        doc.insert_with_id(root, "nextBtn", NodeKind::Text("next".into()))
            .unwrap();
        assert!(SliderController::attach(&doc, &SliderSelectors::default()).is_none());
    }

    #[test]
    fn test_operations_on_removed_strip_do_nothing() {
        let mut doc = Document::new();
        let slider = SliderController::new(NodeId::default(), NodeId::default(), NodeId::default());
        assert!(!slider.navigate(&mut doc, Direction::Next));
        assert!(!slider.navigate_to_edge(&mut doc, Edge::End));
        assert_eq!(slider.refresh_button_state(&mut doc), None);
    }
}
