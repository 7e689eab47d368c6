//! Pure geometry for pointer and keyboard gestures.
//!
//! Every function takes canvas-space inputs and returns the new geometry;
//! screen deltas must already be divided by the current scale. Results are
//! kept inside the page by clamping, never by refusing the gesture.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::camera::{Point, Size};
use crate::consts::MIN_ELEMENT_SIZE;
use crate::doc::{Position, clamp_axis};
use crate::hit::Corner;

/// New origin for an element being dragged: `pointer - offset`, with each
/// axis clamped to `[0, page - size]`.
#[must_use]
pub fn drag_position(pointer: Point, offset: Point, orig: &Position, page: Size) -> Position {
    Position {
        x: clamp_axis(pointer.x - offset.x, orig.width, page.width),
        y: clamp_axis(pointer.y - offset.y, orig.height, page.height),
        ..*orig
    }
}

/// Resize `orig` by dragging `corner` through `delta`.
///
/// The diagonally opposite corner stays fixed. Dragged edges stop at the page
/// boundary and never come closer than [`MIN_ELEMENT_SIZE`] to the fixed edge.
#[must_use]
pub fn resize(orig: &Position, corner: Corner, delta: Point, page: Size) -> Position {
    let right0 = orig.x + orig.width;
    let bottom0 = orig.y + orig.height;

    let (left, right) = if corner.moves_left() {
        ((orig.x + delta.x).min(right0 - MIN_ELEMENT_SIZE).max(0.0), right0)
    } else {
        (orig.x, (right0 + delta.x).max(orig.x + MIN_ELEMENT_SIZE).min(page.width))
    };
    let (top, bottom) = if corner.moves_top() {
        ((orig.y + delta.y).min(bottom0 - MIN_ELEMENT_SIZE).max(0.0), bottom0)
    } else {
        (orig.y, (bottom0 + delta.y).max(orig.y + MIN_ELEMENT_SIZE).min(page.height))
    };

    enforce_min_size(Position::new(left, top, right - left, bottom - top), page)
}

/// Apply a manual size/position request: minimum size first, then keep it on
/// the page.
#[must_use]
pub fn enforce_min_size(position: Position, page: Size) -> Position {
    Position {
        width: position.width.max(MIN_ELEMENT_SIZE),
        height: position.height.max(MIN_ELEMENT_SIZE),
        ..position
    }
    .clamp_to_page(page)
}

/// Shift an element by `(dx, dy)` canvas pixels, clamped to the page.
#[must_use]
pub fn nudge(orig: &Position, dx: f64, dy: f64, page: Size) -> Position {
    Position {
        x: clamp_axis(orig.x + dx, orig.width, page.width),
        y: clamp_axis(orig.y + dy, orig.height, page.height),
        ..*orig
    }
}

/// Angle of `pt` about `center` in degrees, 0 pointing up, clockwise positive.
#[must_use]
pub fn pointer_angle_deg(center: Point, pt: Point) -> f64 {
    normalize_degrees((pt.y - center.y).atan2(pt.x - center.x).to_degrees() + 90.0)
}

/// Rotation after dragging the rotate handle from `start_angle` to
/// `current_angle`, optionally snapped to multiples of `snap_deg`.
#[must_use]
pub fn rotation(orig_rotation: f64, start_angle: f64, current_angle: f64, snap_deg: Option<f64>) -> f64 {
    let raw = normalize_degrees(orig_rotation + current_angle - start_angle);
    match snap_deg {
        Some(step) if step > 0.0 => normalize_degrees((raw / step).round() * step),
        _ => raw,
    }
}

/// Wrap an angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
