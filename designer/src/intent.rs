//! Document intents and the reducer that applies them.
//!
//! [`reduce`] maps `(document, intent)` to a new document. It never edits its
//! input and never fails: unknown element ids leave the document as it was,
//! and out-of-range geometry is clamped. Whether the result becomes a
//! history entry is decided by the session.

#[cfg(test)]
#[path = "intent_test.rs"]
mod intent_test;

use uuid::Uuid;

use crate::camera::Size;
use crate::consts::MIN_ELEMENT_SIZE;
use crate::doc::{Background, Element, ElementId, ElementKind, Margin, Position, Style, TemplateDocument, clamp_axis};
use crate::gesture;
use crate::layout;
use crate::preset::{self, Preset};

/// Offset applied to a duplicated element, in canvas pixels.
const DUPLICATE_OFFSET: f64 = 20.0;

/// Stacking change for [`Intent::Reorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZMove {
    Front,
    Back,
    Forward,
    Backward,
}

/// One discrete change to a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Move an element's origin; clamped to the page.
    Move { id: ElementId, x: f64, y: f64 },
    /// Replace an element's box; minimum size enforced, then clamped.
    Resize { id: ElementId, position: Position },
    /// Merge a style patch into an element's style.
    SetStyle { id: ElementId, patch: Style },
    /// Replace an element's content.
    SetContent { id: ElementId, content: String },
    /// Create an element from the factory and append it.
    AddElement { kind: ElementKind, preset: Option<Preset> },
    /// Append a caller-built element (re-keyed if its id is taken).
    InsertElement(Element),
    DeleteElement { id: ElementId },
    /// Copy an element, offset slightly, directly above the original.
    DuplicateElement { id: ElementId },
    Reorder { id: ElementId, to: ZMove },
    /// Change page dimensions, relaying out elements when enabled.
    SetPageSize { width: f64, height: f64 },
    SetMargin(Margin),
    SetBackground(Background),
}

/// Result of applying an intent.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduced {
    pub document: TemplateDocument,
    /// Element the session should select afterwards (new or duplicated element).
    pub select: Option<ElementId>,
}

impl Reduced {
    fn keep(document: TemplateDocument) -> Self {
        Self { document, select: None }
    }
}

/// Apply `intent` to `doc`. `relayout` enables the relayout engine for page
/// size changes.
#[must_use]
pub fn reduce(doc: &TemplateDocument, intent: &Intent, relayout: bool) -> Reduced {
    let page = doc.page_size();
    match intent {
        Intent::Move { id, x, y } => Reduced::keep(map_element(doc, id, |el| Element {
            position: Position {
                x: clamp_axis(*x, el.position.width, page.width),
                y: clamp_axis(*y, el.position.height, page.height),
                ..el.position
            },
            ..el.clone()
        })),
        Intent::Resize { id, position } => Reduced::keep(map_element(doc, id, |el| Element {
            position: gesture::enforce_min_size(*position, page),
            ..el.clone()
        })),
        Intent::SetStyle { id, patch } => {
            Reduced::keep(map_element(doc, id, |el| Element { style: el.style.merge(patch), ..el.clone() }))
        }
        Intent::SetContent { id, content } => {
            Reduced::keep(map_element(doc, id, |el| Element { content: content.clone(), ..el.clone() }))
        }
        Intent::AddElement { kind, preset } => append(doc, preset::create_element(*kind, *preset, page)),
        Intent::InsertElement(element) => {
            let mut element = element.clone();
            if element.id.is_empty() || doc.element(&element.id).is_some() {
                element.id = Uuid::new_v4().to_string();
            }
            element.position = element.position.clamp_to_page(page);
            append(doc, element)
        }
        Intent::DeleteElement { id } => {
            let mut next = doc.clone();
            next.elements.retain(|e| &e.id != id);
            Reduced::keep(next)
        }
        Intent::DuplicateElement { id } => duplicate(doc, id),
        Intent::Reorder { id, to } => Reduced::keep(reorder(doc, id, *to)),
        Intent::SetPageSize { width, height } => Reduced::keep(set_page_size(doc, *width, *height, relayout)),
        Intent::SetMargin(margin) => {
            let mut next = doc.clone();
            next.page_settings.margin = *margin;
            Reduced::keep(next)
        }
        Intent::SetBackground(background) => {
            let mut next = doc.clone();
            next.page_settings.background = background.clone();
            Reduced::keep(next)
        }
    }
}

fn map_element(doc: &TemplateDocument, id: &str, f: impl FnOnce(&Element) -> Element) -> TemplateDocument {
    let mut next = doc.clone();
    if let Some(slot) = next.elements.iter_mut().find(|e| e.id == id) {
        *slot = f(slot);
    }
    next
}

fn append(doc: &TemplateDocument, element: Element) -> Reduced {
    let mut next = doc.clone();
    let select = Some(element.id.clone());
    next.elements.push(element);
    Reduced { document: next, select }
}

fn duplicate(doc: &TemplateDocument, id: &str) -> Reduced {
    let Some(index) = doc.index_of(id) else {
        return Reduced::keep(doc.clone());
    };
    let page = doc.page_size();
    let mut copy = doc.elements[index].clone();
    copy.id = Uuid::new_v4().to_string();
    copy.position = Position {
        x: copy.position.x + DUPLICATE_OFFSET,
        y: copy.position.y + DUPLICATE_OFFSET,
        ..copy.position
    }
    .clamp_to_page(page);
    let select = Some(copy.id.clone());
    let mut next = doc.clone();
    next.elements.insert(index + 1, copy);
    Reduced { document: next, select }
}

fn reorder(doc: &TemplateDocument, id: &str, to: ZMove) -> TemplateDocument {
    let Some(index) = doc.index_of(id) else {
        return doc.clone();
    };
    let mut next = doc.clone();
    let last = next.elements.len() - 1;
    match to {
        ZMove::Front => {
            let mut el = next.elements.remove(index);
            if uses_z_index(&el, &next.elements) {
                let top = next.elements.iter().map(|e| e.style.z_index()).max().unwrap_or(0);
                el.style.z_index = Some(top.max(el.style.z_index()) + 1);
            }
            next.elements.push(el);
        }
        ZMove::Back => {
            let mut el = next.elements.remove(index);
            if uses_z_index(&el, &next.elements) {
                let bottom = next.elements.iter().map(|e| e.style.z_index()).min().unwrap_or(0);
                el.style.z_index = Some(bottom.min(el.style.z_index()) - 1);
            }
            next.elements.insert(0, el);
        }
        ZMove::Forward if index < last => next.elements.swap(index, index + 1),
        ZMove::Backward if index > 0 => next.elements.swap(index, index - 1),
        ZMove::Forward | ZMove::Backward => {}
    }
    next
}

/// List position alone decides paint order only while nobody has a z-index.
fn uses_z_index(el: &Element, others: &[Element]) -> bool {
    el.style.z_index.is_some() || others.iter().any(|e| e.style.z_index.is_some())
}

fn set_page_size(doc: &TemplateDocument, width: f64, height: f64, relayout: bool) -> TemplateDocument {
    let previous = doc.page_size();
    let size = Size::new(width.max(MIN_ELEMENT_SIZE), height.max(MIN_ELEMENT_SIZE));
    let mut next = doc.clone();
    next.page_settings.width = size.width;
    next.page_settings.height = size.height;
    if relayout {
        next = layout::relayout(&next, previous);
    }
    for el in &mut next.elements {
        let clamped = el.position.clamp_to_page(size);
        if clamped != el.position {
            el.position = clamped;
            el.layout_basis = None;
        }
    }
    next
}
