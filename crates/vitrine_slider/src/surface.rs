//! The layout/scroll seam the controller talks to

use vitrine_core::{
    Document, ElementBox, NodeId, NodeKind, ScrollBehavior, ScrollMetrics, ScrollOptions,
};

/// Layout reads and scroll requests for a slider
///
/// Reads return `None` when the node is missing or is not the expected
/// kind; writes to missing nodes are ignored. Scroll requests are clamped
/// by the surface, not by the caller.
pub trait ScrollSurface {
    /// Live metrics of a scroll container
    fn scroll_metrics(&self, strip: NodeId) -> Option<ScrollMetrics>;

    /// Current rendered box of the first item in a container
    fn first_item_box(&self, strip: NodeId) -> Option<ElementBox>;

    /// Whether `item` is one of the container's items
    fn contains_item(&self, strip: NodeId, item: NodeId) -> bool;

    /// Request a scroll by a relative amount
    fn scroll_by(&mut self, strip: NodeId, dx: f32, behavior: ScrollBehavior);

    /// Request a scroll to an absolute offset
    fn scroll_to(&mut self, strip: NodeId, x: f32, behavior: ScrollBehavior);

    /// Request a scroll that brings `item` into view
    fn scroll_into_view(&mut self, strip: NodeId, item: NodeId, options: ScrollOptions);

    /// Disabled flag of a control
    fn is_disabled(&self, control: NodeId) -> Option<bool>;

    /// Set the disabled flag of a control
    fn set_disabled(&mut self, control: NodeId, disabled: bool);
}

impl ScrollSurface for Document {
    fn scroll_metrics(&self, strip: NodeId) -> Option<ScrollMetrics> {
        Document::scroll_metrics(self, strip)
    }

    fn first_item_box(&self, strip: NodeId) -> Option<ElementBox> {
        self.first_card_box(strip)
    }

    fn contains_item(&self, strip: NodeId, item: NodeId) -> bool {
        self.parent(item) == Some(strip) && matches!(self.kind(item), Some(NodeKind::Card(_)))
    }

    fn scroll_by(&mut self, strip: NodeId, dx: f32, behavior: ScrollBehavior) {
        Document::scroll_by(self, strip, dx, behavior);
    }

    fn scroll_to(&mut self, strip: NodeId, x: f32, behavior: ScrollBehavior) {
        Document::scroll_to(self, strip, x, behavior);
    }

    fn scroll_into_view(&mut self, strip: NodeId, item: NodeId, options: ScrollOptions) {
        Document::scroll_into_view(self, strip, item, options);
    }

    fn is_disabled(&self, control: NodeId) -> Option<bool> {
        Document::is_disabled(self, control)
    }

    fn set_disabled(&mut self, control: NodeId, disabled: bool) {
        Document::set_disabled(self, control, disabled);
    }
}
