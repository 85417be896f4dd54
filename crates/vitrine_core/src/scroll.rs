//! Horizontal scroll strip with native clamping and smooth scrolling
//!
//! A strip owns its scroll offset and viewport width; content width is
//! derived from the cards the [`Document`](crate::Document) holds under it.
//! Every scroll request is clamped to `[0, max]` here, so callers can ask
//! for any offset and the strip stops at its edges the way a native
//! scroll container does.
//!
//! Smooth scrolls settle over frame ticks with exponential ease-out: each
//! tick closes a fixed fraction of the remaining distance, and the offset
//! snaps to the target once it is within half a pixel.

/// Default fraction of the remaining distance covered per frame
pub const DEFAULT_SMOOTH_SPEED: f32 = 0.35;

/// Remaining distance below which a smooth scroll snaps to its target
const SNAP_DISTANCE: f32 = 0.5;

/// Scroll animation behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Instant scroll (no animation)
    #[default]
    Auto,
    /// Smooth animated scroll
    Smooth,
}

/// Horizontal scroll alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollInline {
    /// Align to left of viewport
    Start,
    /// Align to center of viewport
    Center,
    /// Align to right of viewport
    End,
    /// Scroll minimum distance to make visible
    #[default]
    Nearest,
}

/// Options for scroll-into-view behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOptions {
    /// How to animate the scroll
    pub behavior: ScrollBehavior,
    /// Horizontal alignment within the viewport
    pub inline: ScrollInline,
}

/// What a frame tick did to a strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTick {
    /// No animation in flight
    Idle,
    /// Offset moved, animation still running
    Moved,
    /// Offset reached its target this tick
    Settled,
}

/// Scroll state of a horizontal strip
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollStrip {
    offset: f32,
    viewport_width: f32,
    target: Option<f32>,
    speed: f32,
}

impl ScrollStrip {
    /// Create a strip scrolled to the start
    pub fn new(viewport_width: f32) -> Self {
        Self {
            offset: 0.0,
            viewport_width: viewport_width.max(0.0),
            target: None,
            speed: DEFAULT_SMOOTH_SPEED,
        }
    }

    /// Set the per-frame smooth scroll speed (clamped to 0.05..=1.0)
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed.clamp(0.05, 1.0);
        self
    }

    /// Current scroll offset
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Visible width
    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Target of the smooth scroll in flight, if any
    pub fn target(&self) -> Option<f32> {
        self.target
    }

    /// Whether a smooth scroll is still settling
    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Scroll to an absolute offset
    ///
    /// Returns `true` when the offset changed immediately (instant scroll).
    pub fn scroll_to(&mut self, x: f32, behavior: ScrollBehavior, max_offset: f32) -> bool {
        let clamped = x.clamp(0.0, max_offset.max(0.0));
        match behavior {
            ScrollBehavior::Auto => {
                self.target = None;
                let moved = clamped != self.offset;
                self.offset = clamped;
                moved
            }
            ScrollBehavior::Smooth => {
                self.target = (clamped != self.offset).then_some(clamped);
                false
            }
        }
    }

    /// Scroll by a relative amount from the current offset
    pub fn scroll_by(&mut self, dx: f32, behavior: ScrollBehavior, max_offset: f32) -> bool {
        self.scroll_to(self.offset + dx, behavior, max_offset)
    }

    /// Change the viewport width, re-clamping the offset
    ///
    /// Returns `true` when the offset had to move.
    pub fn resize(&mut self, viewport_width: f32, content_width: f32) -> bool {
        self.viewport_width = viewport_width.max(0.0);
        let max = (content_width - self.viewport_width).max(0.0);
        if let Some(target) = self.target {
            self.target = Some(target.min(max));
        }
        let moved = self.offset > max;
        if moved {
            self.offset = max;
        }
        if self.target == Some(self.offset) {
            self.target = None;
        }
        moved
    }

    /// Advance the smooth scroll animation by one frame
    pub fn tick(&mut self) -> ScrollTick {
        let Some(target) = self.target else {
            return ScrollTick::Idle;
        };

        self.offset += (target - self.offset) * self.speed;
        if (target - self.offset).abs() < SNAP_DISTANCE {
            self.offset = target;
            self.target = None;
            ScrollTick::Settled
        } else {
            ScrollTick::Moved
        }
    }
}
