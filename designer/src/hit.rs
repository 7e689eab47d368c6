#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::consts::{HANDLE_RADIUS_PX, ROTATE_HANDLE_OFFSET_PX};
use crate::doc::{Element, ElementId, Position, TemplateDocument};

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(Corner),
    RotateHandle,
}

/// Corner resize handle. The diagonally opposite corner stays fixed while
/// one of these is dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    Nw,
    Ne,
    Se,
    Sw,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Se, Corner::Sw];

    /// Whether dragging this corner moves the left edge.
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::Nw | Self::Sw)
    }

    /// Whether dragging this corner moves the top edge.
    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::Nw | Self::Ne)
    }

    /// CSS cursor shown while hovering this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Test which element (if any) is under `canvas_pt`.
///
/// Handles of the selected element win over any body. Bodies are tested from
/// the top of the paint order down. `scale` converts the screen-space handle
/// slop into canvas units.
#[must_use]
pub fn hit_test(canvas_pt: Point, doc: &TemplateDocument, scale: f64, selected_id: Option<&str>) -> Option<Hit> {
    let slop = HANDLE_RADIUS_PX / scale;

    if let Some(selected) = selected_id.and_then(|id| doc.element(id)) {
        if let Some(part) = hit_handles(canvas_pt, selected, scale, slop) {
            return Some(Hit { element_id: selected.id.clone(), part });
        }
    }

    doc.paint_order()
        .into_iter()
        .rev()
        .find(|el| contains(el, canvas_pt))
        .map(|el| Hit { element_id: el.id.clone(), part: HitPart::Body })
}

/// Whether `canvas_pt` lies inside the element's (rotated) bounding box.
#[must_use]
pub fn contains(element: &Element, canvas_pt: Point) -> bool {
    let local = to_local(canvas_pt, &element.position, element.style.rotation());
    let hw = element.position.width * 0.5;
    let hh = element.position.height * 0.5;
    local.x.abs() <= hw && local.y.abs() <= hh
}

/// Canvas-space points of the four corner handles, following rotation.
#[must_use]
pub fn corner_handles(position: &Position, rotation_deg: f64) -> [(Corner, Point); 4] {
    let hw = position.width * 0.5;
    let hh = position.height * 0.5;
    Corner::ALL.map(|corner| {
        let local = match corner {
            Corner::Nw => Point::new(-hw, -hh),
            Corner::Ne => Point::new(hw, -hh),
            Corner::Se => Point::new(hw, hh),
            Corner::Sw => Point::new(-hw, hh),
        };
        (corner, to_canvas(local, position, rotation_deg))
    })
}

/// Canvas-space point of the rotate handle, a fixed screen distance above
/// the top edge.
#[must_use]
pub fn rotate_handle(position: &Position, rotation_deg: f64, scale: f64) -> Point {
    let local = Point::new(0.0, -position.height * 0.5 - ROTATE_HANDLE_OFFSET_PX / scale);
    to_canvas(local, position, rotation_deg)
}

fn hit_handles(canvas_pt: Point, element: &Element, scale: f64, slop: f64) -> Option<HitPart> {
    let rotation = element.style.rotation();
    for (corner, pt) in corner_handles(&element.position, rotation) {
        if distance(canvas_pt, pt) <= slop {
            return Some(HitPart::ResizeHandle(corner));
        }
    }
    if distance(canvas_pt, rotate_handle(&element.position, rotation, scale)) <= slop {
        return Some(HitPart::RotateHandle);
    }
    None
}

/// Map a canvas point into the element's unrotated frame centred on its box.
fn to_local(canvas_pt: Point, position: &Position, rotation_deg: f64) -> Point {
    let c = position.center();
    let (sin, cos) = (-rotation_deg.to_radians()).sin_cos();
    let dx = canvas_pt.x - c.x;
    let dy = canvas_pt.y - c.y;
    Point::new(dx * cos - dy * sin, dx * sin + dy * cos)
}

fn to_canvas(local: Point, position: &Position, rotation_deg: f64) -> Point {
    let c = position.center();
    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    Point::new(c.x + local.x * cos - local.y * sin, c.y + local.x * sin + local.y * cos)
}

fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
