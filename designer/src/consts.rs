//! Shared numeric constants for the designer crate.

// ── Geometry ────────────────────────────────────────────────────

/// Smallest width or height an element may be resized to, in canvas pixels.
pub const MIN_ELEMENT_SIZE: f64 = 20.0;

/// Page width used when a document omits one, and the reference width for
/// proportional relayout when no previous width is known.
pub const REFERENCE_PAGE_WIDTH: f64 = 800.0;

/// Page height counterpart of [`REFERENCE_PAGE_WIDTH`].
pub const REFERENCE_PAGE_HEIGHT: f64 = 600.0;

/// Default page margin on every side.
pub const DEFAULT_MARGIN: f64 = 20.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize and rotate handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Distance from the top edge to the rotate handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 24.0;

// ── Relayout ────────────────────────────────────────────────────

/// Position change (x or y) a relayout must exceed to be applied.
pub const RELAYOUT_POSITION_DEADZONE: f64 = 5.0;

/// Width change a relayout must exceed to be applied.
pub const RELAYOUT_WIDTH_DEADZONE: f64 = 10.0;

/// Height change a relayout must exceed to be applied.
pub const RELAYOUT_HEIGHT_DEADZONE: f64 = 5.0;

/// Width floor for proportionally scaled (non-role) elements.
pub const RELAYOUT_MIN_WIDTH: f64 = 50.0;

/// Height floor for proportionally scaled (non-role) elements.
pub const RELAYOUT_MIN_HEIGHT: f64 = 25.0;

/// Font size floor applied when relayout scales text.
pub const RELAYOUT_MIN_FONT_SIZE: f64 = 12.0;

// ── Style defaults ──────────────────────────────────────────────

/// Font size used when a text element has none.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Font family used when a text element has none.
pub const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";

/// Text color used when an element has none.
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

/// Page background color used when a document has none.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
