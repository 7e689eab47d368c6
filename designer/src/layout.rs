//! Relayout engine: recompute element geometry after a page-size change.
//!
//! Elements whose id names a semantic role (title, recipient, ...) are placed
//! by a fixed proportional rule of the new page size. Every other element is
//! scaled from the geometry it was designed with: on the previous page size
//! (the 800×600 reference page for a default document), or on the page
//! recorded in its layout basis by an earlier relayout. A computed box only
//! replaces the current one when it moves beyond the dead-zone, so re-running
//! with an unchanged page size leaves the document alone.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::camera::Size;
use crate::consts::{
    REFERENCE_PAGE_HEIGHT, REFERENCE_PAGE_WIDTH, RELAYOUT_HEIGHT_DEADZONE, RELAYOUT_MIN_FONT_SIZE,
    RELAYOUT_MIN_HEIGHT, RELAYOUT_MIN_WIDTH, RELAYOUT_POSITION_DEADZONE, RELAYOUT_WIDTH_DEADZONE,
};
use crate::doc::{Element, ElementKind, LayoutBasis, Position, TemplateDocument};

/// Semantic role of a well-known certificate element, keyed by element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Title,
    Subtitle,
    Recipient,
    Achievement,
    Course,
    Date,
    Signature,
}

/// Proportional placement rule: fractions of the page plus a height floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleRule {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub min_height: f64,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Title,
        Role::Subtitle,
        Role::Recipient,
        Role::Achievement,
        Role::Course,
        Role::Date,
        Role::Signature,
    ];

    /// Role for an element id, if the id is one of the role names.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "title" => Some(Self::Title),
            "subtitle" => Some(Self::Subtitle),
            "recipient" => Some(Self::Recipient),
            "achievement" | "description" => Some(Self::Achievement),
            "course" => Some(Self::Course),
            "date" => Some(Self::Date),
            "signature" => Some(Self::Signature),
            _ => None,
        }
    }

    /// Canonical element id used for this role in starter templates.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Subtitle => "subtitle",
            Self::Recipient => "recipient",
            Self::Achievement => "description",
            Self::Course => "course",
            Self::Date => "date",
            Self::Signature => "signature",
        }
    }

    #[must_use]
    pub fn rule(self) -> RoleRule {
        let r = |x, y, width, height, min_height| RoleRule { x, y, width, height, min_height };
        match self {
            Self::Title => r(0.25, 0.15, 0.50, 0.08, 40.0),
            Self::Subtitle => r(0.25, 0.25, 0.50, 0.05, 30.0),
            Self::Recipient => r(0.25, 0.38, 0.50, 0.08, 45.0),
            Self::Achievement => r(0.15, 0.50, 0.70, 0.10, 50.0),
            Self::Course => r(0.20, 0.63, 0.60, 0.06, 35.0),
            Self::Date => r(0.10, 0.80, 0.25, 0.05, 30.0),
            Self::Signature => r(0.65, 0.80, 0.25, 0.05, 30.0),
        }
    }

    /// Box for this role on a page of the given size, in whole pixels.
    #[must_use]
    pub fn position(self, page: Size) -> Position {
        let rule = self.rule();
        Position {
            x: (rule.x * page.width).round(),
            y: (rule.y * page.height).round(),
            width: (rule.width * page.width).round(),
            height: (rule.height * page.height).max(rule.min_height).round(),
        }
        .clamp_to_page(page)
    }
}

/// Recompute geometry for a document whose page size changed from
/// `previous` to its current `page_settings`.
///
/// Returns the document unchanged (same value) when the page size did not
/// change. Each element is scaled from its [`LayoutBasis`] while that still
/// holds, otherwise from its current geometry on `previous`.
#[must_use]
pub fn relayout(doc: &TemplateDocument, previous: Size) -> TemplateDocument {
    let next = doc.page_size();
    if previous == next {
        return doc.clone();
    }
    let previous = reference_or(previous);

    let mut changed = 0usize;
    let elements = doc
        .elements
        .iter()
        .map(|el| {
            let basis = basis_for(el, previous);
            let candidate = relayout_element(&designed(el, &basis), basis.page(), next);
            let kept = if exceeds_deadzone(&el.position, &candidate.position) {
                changed += 1;
                candidate
            } else {
                el.clone()
            };
            Element { layout_basis: Some(basis.applied_to(&kept)), ..kept }
        })
        .collect();

    tracing::debug!(
        from_w = previous.width,
        from_h = previous.height,
        to_w = next.width,
        to_h = next.height,
        changed,
        "relayout"
    );

    TemplateDocument { page_settings: doc.page_settings.clone(), elements }
}

/// The element's recorded basis while it still holds, otherwise a fresh one
/// placing its current geometry on `previous`.
#[must_use]
pub fn basis_for(el: &Element, previous: Size) -> LayoutBasis {
    match el.layout_basis {
        Some(basis) if basis.matches(el) && basis.page_width > 0.0 && basis.page_height > 0.0 => basis,
        _ => LayoutBasis::of(el, reference_or(previous)),
    }
}

/// `el` with the geometry recorded in `basis`.
fn designed(el: &Element, basis: &LayoutBasis) -> Element {
    let mut out = el.clone();
    out.position = basis.position;
    out.style.font_size = basis.font_size;
    out
}

/// Compute the relaid-out copy of one element without applying the dead-zone.
#[must_use]
pub fn relayout_element(el: &Element, previous: Size, next: Size) -> Element {
    let previous = reference_or(previous);
    let sx = next.width / previous.width;
    let sy = next.height / previous.height;

    let position = match Role::from_id(&el.id) {
        Some(role) => role.position(next),
        None => Position {
            x: (el.position.x * sx).round(),
            y: (el.position.y * sy).round(),
            width: (el.position.width * sx).max(RELAYOUT_MIN_WIDTH).round(),
            height: (el.position.height * sy).max(RELAYOUT_MIN_HEIGHT).round(),
        }
        .clamp_to_page(next),
    };

    let mut style = el.style.clone();
    if el.kind == ElementKind::Text {
        let font = (el.style.font_size() * sx.min(sy)).max(RELAYOUT_MIN_FONT_SIZE).round();
        style.font_size = Some(font);
    }

    Element { position, style, ..el.clone() }
}

/// Whether `next` differs from `current` by more than the relayout dead-zone.
#[must_use]
pub fn exceeds_deadzone(current: &Position, next: &Position) -> bool {
    (next.x - current.x).abs() > RELAYOUT_POSITION_DEADZONE
        || (next.y - current.y).abs() > RELAYOUT_POSITION_DEADZONE
        || (next.width - current.width).abs() > RELAYOUT_WIDTH_DEADZONE
        || (next.height - current.height).abs() > RELAYOUT_HEIGHT_DEADZONE
}

fn reference_or(size: Size) -> Size {
    if size.width > 0.0 && size.height > 0.0 {
        size
    } else {
        Size::new(REFERENCE_PAGE_WIDTH, REFERENCE_PAGE_HEIGHT)
    }
}
