//! Scene description: what the host draws for the current editor state.
//!
//! This module never draws pixels. It turns a document, the UI state and the
//! canvas transform into screen-space rectangles plus CSS-equivalent
//! transforms, in paint order, so any host (DOM, canvas, export pipeline)
//! can draw the same picture. It does not mutate any state.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::borrow::Cow;

use crate::camera::{CanvasTransform, Point, Rect};
use crate::doc::{Background, Element, ElementId, ElementKind, Style, TemplateDocument};
use crate::hit::{self, Corner};
use crate::input::UiState;
use crate::placeholder::{self, PlaceholderValues, SubstitutionContext};

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// The page in screen space.
    pub page: Rect,
    pub background: Background,
    /// One item per element, bottom first.
    pub items: Vec<DrawItem>,
    /// Handles of the selected element, in screen space.
    pub handles: Option<Handles>,
}

/// One element as the host should draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Content to display (placeholder-substituted in preview).
    pub content: String,
    /// Unrotated box in screen space; the transform applies about its centre.
    pub rect: Rect,
    /// CSS transform, e.g. `rotate(30deg) scaleX(-1)`, or `none`.
    pub transform: String,
    /// Font size in screen pixels.
    pub font_size: f64,
    pub style: Style,
    pub selected: bool,
    pub editing: bool,
}

/// Resize and rotate handle positions for the selected element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handles {
    pub corners: [(Corner, Point); 4],
    pub rotate: Point,
}

/// Build the scene for `doc` as seen through `transform`.
#[must_use]
pub fn scene(
    doc: &TemplateDocument,
    ui: &UiState,
    transform: &CanvasTransform,
    values: &PlaceholderValues,
    ctx: &SubstitutionContext,
) -> Scene {
    let page = doc.page_size();
    let shown: Cow<'_, TemplateDocument> =
        if ui.is_preview() { Cow::Owned(placeholder::substitute(doc, values, ctx)) } else { Cow::Borrowed(doc) };

    let selected = ui.selected_id.as_deref();
    let items = shown
        .paint_order()
        .into_iter()
        .map(|el| draw_item(el, transform, selected, ui.editing_id.as_deref()))
        .collect();

    let handles = if ui.is_preview() {
        None
    } else {
        selected.and_then(|id| doc.element(id)).map(|el| selection_handles(el, transform))
    };

    Scene {
        page: transform.canvas_rect_to_screen(0.0, 0.0, page.width, page.height),
        background: doc.page_settings.background.clone(),
        items,
        handles,
    }
}

/// CSS transform for an element's style: rotation first, then flips.
#[must_use]
pub fn css_transform(style: &Style) -> String {
    let mut parts = Vec::new();
    let rotation = style.rotation();
    if rotation.abs() > f64::EPSILON {
        parts.push(format!("rotate({rotation}deg)"));
    }
    if style.flip_horizontal() {
        parts.push("scaleX(-1)".to_owned());
    }
    if style.flip_vertical() {
        parts.push("scaleY(-1)".to_owned());
    }
    if parts.is_empty() { "none".to_owned() } else { parts.join(" ") }
}

fn draw_item(el: &Element, transform: &CanvasTransform, selected: Option<&str>, editing: Option<&str>) -> DrawItem {
    let p = &el.position;
    DrawItem {
        id: el.id.clone(),
        kind: el.kind,
        content: el.content.clone(),
        rect: transform.canvas_rect_to_screen(p.x, p.y, p.width, p.height),
        transform: css_transform(&el.style),
        font_size: el.style.font_size() * transform.scale,
        style: el.style.clone(),
        selected: selected == Some(el.id.as_str()),
        editing: editing == Some(el.id.as_str()),
    }
}

fn selection_handles(el: &Element, transform: &CanvasTransform) -> Handles {
    let rotation = el.style.rotation();
    Handles {
        corners: hit::corner_handles(&el.position, rotation).map(|(c, pt)| (c, transform.canvas_to_screen(pt))),
        rotate: transform.canvas_to_screen(hit::rotate_handle(&el.position, rotation, transform.scale)),
    }
}
