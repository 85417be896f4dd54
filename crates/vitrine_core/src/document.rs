//! In-memory page element tree
//!
//! A [`Document`] holds every element of the page in a slotmap, an id
//! registry for O(1) lookup by string id, and the currently focused node.
//! Layout is deliberately simple: only scroll strips and their cards carry
//! geometry, and a strip's content width is the sum of its cards' outer
//! widths (never less than its viewport).

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::error::{DocumentError, Result};
use crate::metrics::{ElementBox, ScrollMetrics};
use crate::scroll::{ScrollBehavior, ScrollInline, ScrollOptions, ScrollStrip, ScrollTick};

new_key_type! {
    pub struct NodeId;
}

/// A card inside a scroll strip
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Rendered horizontal box
    pub bounds: ElementBox,
    /// Whether sequential keyboard navigation can focus the card
    pub focusable: bool,
}

impl Card {
    pub fn new(bounds: ElementBox) -> Self {
        Self {
            bounds,
            focusable: true,
        }
    }
}

/// A push button
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Button {
    pub label: String,
    pub disabled: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
        }
    }
}

/// A single-line text field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextField {
    pub value: String,
}

/// A live status line with a presentation class
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Status {
    pub text: String,
    pub class: String,
}

/// An embedded video
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Video {
    pub autoplay: bool,
    pub playing: bool,
}

impl Video {
    /// A video that starts playing on load
    pub fn autoplaying() -> Self {
        Self {
            autoplay: true,
            playing: true,
        }
    }
}

/// Element kinds
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Generic grouping element
    Container,
    /// Horizontally scrollable strip of cards
    ScrollStrip(ScrollStrip),
    /// Card inside a strip
    Card(Card),
    /// Push button
    Button(Button),
    /// Plain text
    Text(String),
    /// Form grouping fields
    Form,
    /// Text input
    TextField(TextField),
    /// Status line
    Status(Status),
    /// Video
    Video(Video),
}

impl NodeKind {
    fn is_focusable(&self) -> bool {
        match self {
            NodeKind::Card(card) => card.focusable,
            NodeKind::Button(button) => !button.disabled,
            NodeKind::ScrollStrip(_) | NodeKind::TextField(_) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    element_id: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The page element tree
#[derive(Debug)]
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    ids: FxHashMap<String, NodeId>,
    root: NodeId,
    focused: Option<NodeId>,
    focus_changes: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only a root container
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node {
            kind: NodeKind::Container,
            element_id: None,
            parent: None,
            children: Vec::new(),
        });
        Self {
            nodes,
            ids: FxHashMap::default(),
            root,
            focused: None,
            focus_changes: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    // =========================================================================
    // Tree construction
    // =========================================================================

    /// Append an anonymous element under `parent`
    pub fn insert(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId> {
        Self::validate(&kind)?;
        if !self.nodes.contains_key(parent) {
            return Err(DocumentError::UnknownNode);
        }

        let node = self.nodes.insert(Node {
            kind,
            element_id: None,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(node);
        }
        Ok(node)
    }

    /// Append an element under `parent` and register it under `id`
    pub fn insert_with_id(
        &mut self,
        parent: NodeId,
        id: impl Into<String>,
        kind: NodeKind,
    ) -> Result<NodeId> {
        let id = id.into();
        if self.ids.contains_key(&id) {
            return Err(DocumentError::DuplicateId(id));
        }
        let node = self.insert(parent, kind)?;
        if let Some(n) = self.nodes.get_mut(node) {
            n.element_id = Some(id.clone());
        }
        self.ids.insert(id, node);
        Ok(node)
    }

    fn validate(kind: &NodeKind) -> Result<()> {
        match kind {
            NodeKind::Card(card) if !card.bounds.is_valid() => Err(DocumentError::InvalidBox {
                width: card.bounds.width,
                margin_left: card.bounds.margin_left,
                margin_right: card.bounds.margin_right,
            }),
            NodeKind::ScrollStrip(strip) if !strip.viewport_width().is_finite() => Err(
                DocumentError::InvalidViewport(strip.viewport_width()),
            ),
            _ => Ok(()),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Look up a node by its string id
    pub fn get_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    /// String id of a node, if it has one
    pub fn element_id(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node)?.element_id.as_deref()
    }

    /// Whether the node belongs to this document
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.nodes.get(node).map(|n| &n.kind)
    }

    pub fn kind_mut(&mut self, node: NodeId) -> Option<&mut NodeKind> {
        self.nodes.get_mut(node).map(|n| &mut n.kind)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Whether `node` is `ancestor` or lies beneath it
    pub fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Every video element in the document
    pub fn videos(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, n)| matches!(n.kind, NodeKind::Video(_)))
            .map(|(id, _)| id)
            .collect()
    }

    // =========================================================================
    // Scroll strips
    // =========================================================================

    pub fn strip(&self, node: NodeId) -> Option<&ScrollStrip> {
        match self.kind(node)? {
            NodeKind::ScrollStrip(strip) => Some(strip),
            _ => None,
        }
    }

    fn strip_mut(&mut self, node: NodeId) -> Option<&mut ScrollStrip> {
        match self.kind_mut(node)? {
            NodeKind::ScrollStrip(strip) => Some(strip),
            _ => None,
        }
    }

    /// Cards directly under a strip, in document order
    pub fn cards(&self, strip: NodeId) -> impl Iterator<Item = (NodeId, &Card)> + '_ {
        self.children(strip).iter().filter_map(move |&child| {
            match self.nodes.get(child).map(|n| &n.kind) {
                Some(NodeKind::Card(card)) => Some((child, card)),
                _ => None,
            }
        })
    }

    /// Current box of the first card under a strip
    pub fn first_card_box(&self, strip: NodeId) -> Option<ElementBox> {
        self.cards(strip).next().map(|(_, card)| card.bounds)
    }

    /// Replace a card's box (the host re-laid it out)
    pub fn set_card_box(&mut self, card: NodeId, bounds: ElementBox) -> Result<()> {
        if !bounds.is_valid() {
            return Err(DocumentError::InvalidBox {
                width: bounds.width,
                margin_left: bounds.margin_left,
                margin_right: bounds.margin_right,
            });
        }
        match self.kind_mut(card) {
            Some(NodeKind::Card(c)) => {
                c.bounds = bounds;
                Ok(())
            }
            _ => Err(DocumentError::UnknownNode),
        }
    }

    fn content_width(&self, strip: NodeId) -> f32 {
        self.cards(strip).map(|(_, c)| c.bounds.outer_width()).sum()
    }

    /// Live scroll metrics of a strip
    pub fn scroll_metrics(&self, strip: NodeId) -> Option<ScrollMetrics> {
        let s = self.strip(strip)?;
        let viewport_width = s.viewport_width();
        Some(ScrollMetrics {
            offset: s.offset(),
            viewport_width,
            content_width: self.content_width(strip).max(viewport_width),
        })
    }

    fn max_offset(&self, strip: NodeId) -> Option<f32> {
        self.scroll_metrics(strip).map(|m| m.max_offset())
    }

    /// Scroll a strip to an absolute offset; returns `true` if it moved immediately
    pub fn scroll_to(&mut self, strip: NodeId, x: f32, behavior: ScrollBehavior) -> bool {
        let Some(max) = self.max_offset(strip) else {
            return false;
        };
        self.strip_mut(strip)
            .is_some_and(|s| s.scroll_to(x, behavior, max))
    }

    /// Scroll a strip by a relative amount; returns `true` if it moved immediately
    pub fn scroll_by(&mut self, strip: NodeId, dx: f32, behavior: ScrollBehavior) -> bool {
        let Some(max) = self.max_offset(strip) else {
            return false;
        };
        self.strip_mut(strip)
            .is_some_and(|s| s.scroll_by(dx, behavior, max))
    }

    /// Scroll a strip so that `item` is aligned per `options`
    ///
    /// Returns `true` if the strip moved immediately.
    pub fn scroll_into_view(&mut self, strip: NodeId, item: NodeId, options: ScrollOptions) -> bool {
        let Some(metrics) = self.scroll_metrics(strip) else {
            return false;
        };

        let mut start = 0.0;
        let mut found = None;
        for (id, card) in self.cards(strip) {
            if id == item {
                found = Some((start + card.bounds.margin_left, card.bounds.width));
                break;
            }
            start += card.bounds.outer_width();
        }
        let Some((item_start, item_width)) = found else {
            return false;
        };
        let item_end = item_start + item_width;
        let viewport = metrics.viewport_width;

        let desired = match options.inline {
            ScrollInline::Start => item_start,
            ScrollInline::Center => item_start + item_width / 2.0 - viewport / 2.0,
            ScrollInline::End => item_end - viewport,
            ScrollInline::Nearest => {
                if item_start < metrics.offset {
                    item_start
                } else if item_end > metrics.offset + viewport {
                    item_end - viewport
                } else {
                    return false;
                }
            }
        };
        self.scroll_to(strip, desired, options.behavior)
    }

    /// Change a strip's viewport width; returns `true` if its offset moved
    pub fn resize_strip(&mut self, strip: NodeId, viewport_width: f32) -> Result<bool> {
        if !viewport_width.is_finite() || viewport_width < 0.0 {
            return Err(DocumentError::InvalidViewport(viewport_width));
        }
        let content = self.content_width(strip);
        self.strip_mut(strip)
            .map(|s| s.resize(viewport_width, content))
            .ok_or(DocumentError::UnknownNode)
    }

    /// Advance a strip's smooth scroll by one frame
    pub fn tick_strip(&mut self, strip: NodeId) -> ScrollTick {
        self.strip_mut(strip)
            .map(ScrollStrip::tick)
            .unwrap_or(ScrollTick::Idle)
    }

    // =========================================================================
    // Element state
    // =========================================================================

    pub fn button(&self, node: NodeId) -> Option<&Button> {
        match self.kind(node)? {
            NodeKind::Button(b) => Some(b),
            _ => None,
        }
    }

    /// Disabled flag of a button (`None` if the node is not a button)
    pub fn is_disabled(&self, node: NodeId) -> Option<bool> {
        self.button(node).map(|b| b.disabled)
    }

    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if let Some(NodeKind::Button(b)) = self.kind_mut(node) {
            b.disabled = disabled;
        }
        if disabled && self.focused == Some(node) {
            self.focused = None;
        }
    }

    /// Text of a text node
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match self.kind(node)? {
            NodeKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        if let Some(NodeKind::Text(t)) = self.kind_mut(node) {
            *t = text.into();
        }
    }

    /// Current value of a text field
    pub fn value(&self, node: NodeId) -> Option<&str> {
        match self.kind(node)? {
            NodeKind::TextField(f) => Some(&f.value),
            _ => None,
        }
    }

    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) {
        if let Some(NodeKind::TextField(f)) = self.kind_mut(node) {
            f.value = value.into();
        }
    }

    /// Clear every text field beneath a form
    pub fn reset_form(&mut self, form: NodeId) {
        let mut stack = vec![form];
        while let Some(node) = stack.pop() {
            stack.extend_from_slice(self.children(node));
            if let Some(NodeKind::TextField(f)) = self.kind_mut(node) {
                f.value.clear();
            }
        }
    }

    pub fn status(&self, node: NodeId) -> Option<&Status> {
        match self.kind(node)? {
            NodeKind::Status(s) => Some(s),
            _ => None,
        }
    }

    pub fn set_status(&mut self, node: NodeId, text: impl Into<String>, class: impl Into<String>) {
        if let Some(NodeKind::Status(s)) = self.kind_mut(node) {
            s.text = text.into();
            s.class = class.into();
        }
    }

    /// Empty a status line's text, keeping its class
    pub fn clear_status_text(&mut self, node: NodeId) {
        if let Some(NodeKind::Status(s)) = self.kind_mut(node) {
            s.text.clear();
        }
    }

    pub fn video(&self, node: NodeId) -> Option<&Video> {
        match self.kind(node)? {
            NodeKind::Video(v) => Some(v),
            _ => None,
        }
    }

    pub fn set_playing(&mut self, node: NodeId, playing: bool) {
        if let Some(NodeKind::Video(v)) = self.kind_mut(node) {
            v.playing = playing;
        }
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Move focus to `node`; returns `false` if it cannot take focus
    ///
    /// Focusing the already-focused node is not a change.
    pub fn focus(&mut self, node: NodeId) -> bool {
        let focusable = self.kind(node).is_some_and(NodeKind::is_focusable);
        if !focusable {
            return false;
        }
        if self.focused != Some(node) {
            self.focused = Some(node);
            self.focus_changes += 1;
        }
        true
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Number of times focus moved to a different node
    pub fn focus_changes(&self) -> u64 {
        self.focus_changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider_doc(cards: usize) -> (Document, NodeId, Vec<NodeId>) {
        let mut doc = Document::new();
        let root = doc.root();
        let strip = doc
            .insert_with_id(root, "slider", NodeKind::ScrollStrip(ScrollStrip::new(300.0)))
            .unwrap();
        let cards = (0..cards)
            .map(|_| {
                let bounds = ElementBox::new(100.0).with_margins(0.0, 20.0);
                doc.insert(strip, NodeKind::Card(Card::new(bounds))).unwrap()
            })
            .collect();
        (doc, strip, cards)
    }

    #[test]
    fn test_id_registry() {
        let (mut doc, strip, _) = slider_doc(0);
        assert_eq!(doc.get_by_id("slider"), Some(strip));
        assert_eq!(doc.element_id(strip), Some("slider"));
        assert_eq!(doc.get_by_id("missing"), None);

        let root = doc.root();
        let err = doc
            .insert_with_id(root, "slider", NodeKind::Container)
            .unwrap_err();
        assert_eq!(err, DocumentError::DuplicateId("slider".into()));
    }

    #[test]
    fn test_invalid_card_box_rejected() {
        let (mut doc, strip, _) = slider_doc(0);
        let err = doc
            .insert(strip, NodeKind::Card(Card::new(ElementBox::new(-5.0))))
            .unwrap_err();
        assert!(matches!(err, DocumentError::InvalidBox { .. }));
    }

    #[test]
    fn test_scroll_metrics_from_cards() {
        let (doc, strip, _) = slider_doc(5);
        let m = doc.scroll_metrics(strip).unwrap();
        assert_eq!(m.viewport_width, 300.0);
        assert_eq!(m.content_width, 600.0);
        assert_eq!(m.max_offset(), 300.0);
        assert_eq!(
            doc.first_card_box(strip),
            Some(ElementBox::new(100.0).with_margins(0.0, 20.0))
        );
    }

    #[test]
    fn test_empty_strip_content_fills_viewport() {
        let (doc, strip, _) = slider_doc(0);
        let m = doc.scroll_metrics(strip).unwrap();
        assert_eq!(m.content_width, 300.0);
        assert_eq!(doc.first_card_box(strip), None);
    }

    #[test]
    fn test_scroll_into_view_center() {
        let (mut doc, strip, cards) = slider_doc(5);
        // Card 3 starts at 360, is 100 wide: center at 410, viewport half 150
        let options = ScrollOptions {
            behavior: ScrollBehavior::Auto,
            inline: ScrollInline::Center,
        };
        assert!(doc.scroll_into_view(strip, cards[3], options));
        assert_eq!(doc.scroll_metrics(strip).unwrap().offset, 260.0);

        // Last card center would need 530, clamps to max
        doc.scroll_into_view(strip, cards[4], options);
        assert_eq!(doc.scroll_metrics(strip).unwrap().offset, 300.0);
    }

    #[test]
    fn test_scroll_into_view_nearest_skips_visible() {
        let (mut doc, strip, cards) = slider_doc(5);
        let options = ScrollOptions::default();
        assert!(!doc.scroll_into_view(strip, cards[1], options));
        assert!(doc.scroll_into_view(strip, cards[3], options));
        // Card 3 ends at 460; aligned to the right edge
        assert_eq!(doc.scroll_metrics(strip).unwrap().offset, 160.0);
    }

    #[test]
    fn test_focus_tracking() {
        let (mut doc, strip, cards) = slider_doc(2);
        assert!(doc.focus(cards[0]));
        assert!(doc.focus(cards[0]));
        assert_eq!(doc.focus_changes(), 1);
        assert!(doc.focus(strip));
        assert_eq!(doc.focused(), Some(strip));
        assert_eq!(doc.focus_changes(), 2);

        let root = doc.root();
        assert!(!doc.focus(root));
        assert!(doc.is_within(cards[1], strip));
        assert!(!doc.is_within(strip, cards[1]));
    }

    #[test]
    fn test_reset_form_clears_nested_fields() {
        let mut doc = Document::new();
        let root = doc.root();
        let form = doc.insert_with_id(root, "newsletter", NodeKind::Form).unwrap();
        let group = doc.insert(form, NodeKind::Container).unwrap();
        let field = doc
            .insert_with_id(group, "email", NodeKind::TextField(TextField::default()))
            .unwrap();
        doc.set_value(field, "a@b.co");
        doc.reset_form(form);
        assert_eq!(doc.value(field), Some(""));
    }

    #[test]
    fn test_clear_status_text_keeps_class() {
        let mut doc = Document::new();
        let root = doc.root();
        let status = doc.insert(root, NodeKind::Status(Status::default())).unwrap();
        doc.set_status(status, "Thanks!", "newsletter-status success");

        doc.clear_status_text(status);
        let line = doc.status(status).unwrap();
        assert_eq!(line.text, "");
        assert_eq!(line.class, "newsletter-status success");
    }

    #[test]
    fn test_resize_strip() {
        let (mut doc, strip, _) = slider_doc(5);
        doc.scroll_to(strip, 300.0, ScrollBehavior::Auto);
        assert_eq!(doc.resize_strip(strip, 550.0), Ok(true));
        assert_eq!(doc.scroll_metrics(strip).unwrap().offset, 50.0);
        assert!(doc.resize_strip(strip, f32::NAN).is_err());
    }
}
