//! Viewport scaling and screen/canvas coordinate conversions.
//!
//! Canvas space is the document's own pixel grid (top-left origin, y down).
//! Screen space is the host container's CSS pixel grid. The page is drawn
//! centred in the container at a fit-to-container scale, optionally
//! multiplied by a user zoom and shifted by a pan offset.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::config::EditorConfig;

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Host capability exposing the current size of the container the canvas is
/// drawn into.
pub trait Viewport {
    /// Current container size in CSS pixels.
    fn container_size(&self) -> Size;
}

/// A viewport with a fixed size, for headless hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedViewport(pub Size);

impl Viewport for FixedViewport {
    fn container_size(&self) -> Size {
        self.0
    }
}

/// Fit-to-container scale: `min(vw / pw, vh / ph, max_zoom)`, floored at
/// `min_scale`.
///
/// Degenerate page dimensions fall back to `min_scale`.
#[must_use]
pub fn fit_scale(viewport: Size, page: Size, max_zoom: f64, min_scale: f64) -> f64 {
    if page.width <= 0.0 || page.height <= 0.0 {
        return min_scale;
    }
    let fit = (viewport.width / page.width)
        .min(viewport.height / page.height)
        .min(max_zoom);
    if fit.is_finite() { fit.max(min_scale) } else { min_scale }
}

/// Mapping between screen and canvas coordinates for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    /// Screen pixels per canvas pixel.
    pub scale: f64,
    /// Screen x of the page's top-left corner.
    pub offset_x: f64,
    /// Screen y of the page's top-left corner.
    pub offset_y: f64,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self { scale: 1.0, offset_x: 0.0, offset_y: 0.0 }
    }
}

impl CanvasTransform {
    /// Build the transform that centres `page` in `viewport` at the fit scale
    /// times `user_zoom`, shifted by `pan` screen pixels.
    #[must_use]
    pub fn fit(viewport: Size, page: Size, user_zoom: f64, pan: Point, config: &EditorConfig) -> Self {
        let scale = (fit_scale(viewport, page, config.max_zoom, config.min_scale) * user_zoom).max(config.min_scale);
        Self {
            scale,
            offset_x: (viewport.width - page.width * scale) * 0.5 + pan.x,
            offset_y: (viewport.height - page.height * scale) * 0.5 + pan.y,
        }
    }

    /// Convert a screen-space point to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset_x) / self.scale,
            y: (screen.y - self.offset_y) / self.scale,
        }
    }

    /// Convert a canvas-space point to screen coordinates.
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.scale + self.offset_x,
            y: canvas.y * self.scale + self.offset_y,
        }
    }

    /// Screen rectangle covered by a canvas-space box.
    #[must_use]
    pub fn canvas_rect_to_screen(&self, x: f64, y: f64, width: f64, height: f64) -> Rect {
        let origin = self.canvas_to_screen(Point::new(x, y));
        Rect::new(origin.x, origin.y, width * self.scale, height * self.scale)
    }

    /// Convert a screen-space distance to a canvas-space distance.
    #[must_use]
    pub fn screen_dist_to_canvas(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }
}
