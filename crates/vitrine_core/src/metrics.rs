//! Element boxes and scroll metrics

/// Tolerance for fractional rounding when testing the end edge
pub const EDGE_EPSILON: f32 = 1.0;

/// Rendered horizontal box of an element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementBox {
    /// Border-box width
    pub width: f32,
    /// Left margin
    pub margin_left: f32,
    /// Right margin
    pub margin_right: f32,
}

impl ElementBox {
    /// A box with no margins
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Set both horizontal margins
    pub fn with_margins(mut self, left: f32, right: f32) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self
    }

    /// Width plus both margins
    pub fn outer_width(&self) -> f32 {
        self.margin_left + self.width + self.margin_right
    }

    /// All dimensions finite and non-negative
    pub fn is_valid(&self) -> bool {
        [self.width, self.margin_left, self.margin_right]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Snapshot of a horizontal scroll container
///
/// Always read fresh from the document; holding on to one across events
/// goes stale as soon as the user scrolls or the viewport resizes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Current scroll offset from the start edge
    pub offset: f32,
    /// Visible width of the container
    pub viewport_width: f32,
    /// Total width of the scrollable content
    pub content_width: f32,
}

impl ScrollMetrics {
    /// Largest reachable offset
    pub fn max_offset(&self) -> f32 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Scrolled all the way to the start
    pub fn at_start(&self) -> bool {
        self.offset <= 0.0
    }

    /// Scrolled to within [`EDGE_EPSILON`] of the end
    pub fn at_end(&self) -> bool {
        self.offset + self.viewport_width >= self.content_width - EDGE_EPSILON
    }
}
