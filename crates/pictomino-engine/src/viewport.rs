//! Viewport and coordinate transformation for the puzzle world.
//!
//! Handles conversion between screen coordinates and world coordinates and
//! manages zoom and pan. Both spaces are y-down, so the transform pair is
//! `screen = world * zoom + pan` and its inverse with no axis flip.

use std::fmt;
use std::time::{Duration, Instant};

use pictomino_core::geometry::{screen_to_world, world_to_screen, Point, Rect, Vec2};
use tracing::debug;

/// Manual zoom range (wheel and pinch).
pub const MIN_ZOOM: f64 = 0.2;
pub const MAX_ZOOM: f64 = 3.0;

/// Auto-fit zooms are capped lower so a fit never lands closer than 2x.
pub const FIT_MAX_ZOOM: f64 = 2.0;

/// Padding added on every side of the content when fitting, world pixels.
pub const FIT_PADDING: f64 = 100.0;

/// Wheel zoom step factors.
pub const WHEEL_ZOOM_IN: f64 = 1.1;
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// How long the viewport reports itself animating after a fit.
const FIT_ANIMATION: Duration = Duration::from_millis(600);

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    view_width: f64,
    view_height: f64,
    animating_until: Option<Instant>,
}

impl Viewport {
    /// Creates a new viewport with initial dimensions at identity
    /// transform (zoom 1.0, no pan).
    pub fn new(view_width: f64, view_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            view_width,
            view_height,
            animating_until: None,
        }
    }

    /// Gets the viewport width in screen pixels.
    pub fn view_width(&self) -> f64 {
        self.view_width
    }

    /// Gets the viewport height in screen pixels.
    pub fn view_height(&self) -> f64 {
        self.view_height
    }

    /// Sets the viewport dimensions (typically called when the host window
    /// resizes).
    pub fn set_view_size(&mut self, width: f64, height: f64) {
        self.view_width = width;
        self.view_height = height;
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to the manual range [0.2, 3.0].
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Gets the pan offset in screen pixels.
    pub fn pan(&self) -> Vec2 {
        Vec2::new(self.pan_x, self.pan_y)
    }

    /// Sets the pan offset.
    pub fn set_pan(&mut self, pan: Vec2) {
        self.pan_x = pan.x;
        self.pan_y = pan.y;
    }

    /// Pans by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan_x += delta.x;
        self.pan_y += delta.y;
    }

    /// Converts screen coordinates to world coordinates:
    /// `world = (screen - pan) / zoom`.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        screen_to_world(screen, self.pan(), self.zoom)
    }

    /// Converts world coordinates to screen coordinates:
    /// `screen = world * zoom + pan`.
    pub fn world_to_screen(&self, world: Point) -> Point {
        world_to_screen(world, self.pan(), self.zoom)
    }

    /// Fits the given world bounds into the viewport.
    ///
    /// Pads the content by [`FIT_PADDING`] on every side, picks
    /// `zoom = min(view_w / padded_w, view_h / padded_h)` clamped to the
    /// auto-fit range, and pans so the content is centered. Marks the
    /// viewport animating so the host can ease toward the new transform.
    ///
    /// Degenerate bounds or a zero-sized viewport are a no-op.
    pub fn fit_to_bounds(&mut self, bounds: Rect, now: Instant) {
        if self.view_width <= 0.0 || self.view_height <= 0.0 {
            return;
        }
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return;
        }

        let padded_w = bounds.width + 2.0 * FIT_PADDING;
        let padded_h = bounds.height + 2.0 * FIT_PADDING;

        let zoom_x = self.view_width / padded_w;
        let zoom_y = self.view_height / padded_h;
        let new_zoom = zoom_x.min(zoom_y).clamp(MIN_ZOOM, FIT_MAX_ZOOM);

        // Center the content: pan = screen_center - world_center * zoom
        let center = bounds.center();
        self.zoom = new_zoom;
        self.pan_x = self.view_width / 2.0 - center.x * new_zoom;
        self.pan_y = self.view_height / 2.0 - center.y * new_zoom;
        self.animating_until = Some(now + FIT_ANIMATION);

        debug!(zoom = new_zoom, "viewport fitted to bounds");
    }

    /// Zooms to `new_zoom` while keeping the world point currently under
    /// `anchor` fixed at that screen position.
    ///
    /// `pan' = anchor - world_under_anchor * zoom'`
    pub fn zoom_at_point(&mut self, anchor: Point, new_zoom: f64) {
        if !new_zoom.is_finite() {
            return;
        }
        let clamped = new_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let world = self.screen_to_world(anchor);

        self.zoom = clamped;
        self.pan_x = anchor.x - world.x * clamped;
        self.pan_y = anchor.y - world.y * clamped;
    }

    /// Applies wheel zoom steps at `anchor`: each positive step multiplies
    /// zoom by 1.1, each negative step by 0.9.
    pub fn wheel_zoom(&mut self, anchor: Point, steps: i32) {
        if steps == 0 {
            return;
        }
        let factor = if steps > 0 {
            WHEEL_ZOOM_IN.powi(steps)
        } else {
            WHEEL_ZOOM_OUT.powi(-steps)
        };
        self.zoom_at_point(anchor, self.zoom * factor);
    }

    /// Whether a fit transition is still in flight at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.animating_until.is_some_and(|until| now < until)
    }

    /// Resets the viewport to the identity transform.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
        self.animating_until = None;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}
