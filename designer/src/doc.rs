//! Document model: page settings, elements, styles and the JSON contract.
//!
//! A [`TemplateDocument`] is an immutable value as far as the editor is
//! concerned: every committed change builds a new document and the history
//! keeps the old one. Field names serialize in `camelCase` because the
//! document itself is the contract other subsystems (storage, export) read.
//!
//! Missing fields deserialize to documented defaults instead of failing, and
//! the typed accessors on [`Style`] resolve absent style values the same way.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::{Point, Size};
use crate::consts::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_MARGIN, DEFAULT_TEXT_COLOR,
    REFERENCE_PAGE_HEIGHT, REFERENCE_PAGE_WIDTH,
};

/// Unique identifier of an element within a document.
pub type ElementId = String;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("invalid template document: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocumentError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Json(_) => "E_INVALID_DOCUMENT",
        }
    }
}

/// The kind of a template element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A run of styled text; may contain `{{token}}` placeholders.
    #[default]
    Text,
    /// An image referenced by URL or path.
    Image,
    /// A filled/bordered rectangle (borders, separators, backgrounds).
    Shape,
    /// A QR code encoding the element content.
    Qr,
    /// Decorative vector markup.
    Decoration,
}

impl ElementKind {
    /// Wire name of the kind, as used in the `type` field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Shape => "shape",
            Self::Qr => "qr",
            Self::Decoration => "decoration",
        }
    }

    /// Parse a wire name. Returns `None` for anything unrecognised.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "text" => Some(Self::Text),
            "image" => Some(Self::Image),
            "shape" => Some(Self::Shape),
            "qr" => Some(Self::Qr),
            "decoration" => Some(Self::Decoration),
            _ => None,
        }
    }

    /// Whether element content is user-visible text subject to placeholders.
    #[must_use]
    pub fn carries_tokens(self) -> bool {
        matches!(self, Self::Text | Self::Qr)
    }
}

/// Bounding box of an element in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Position {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, width: 100.0, height: 50.0 }
    }
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Centre of the box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Keep the box inside `page`: size is capped to the page, then each axis
    /// is shifted into `[0, page - size]`.
    #[must_use]
    pub fn clamp_to_page(self, page: Size) -> Self {
        let width = self.width.min(page.width).max(0.0);
        let height = self.height.min(page.height).max(0.0);
        Self {
            x: clamp_axis(self.x, width, page.width),
            y: clamp_axis(self.y, height, page.height),
            width,
            height,
        }
    }
}

/// Clamp one coordinate so that `[pos, pos + size]` stays inside `[0, extent]`.
#[must_use]
pub fn clamp_axis(pos: f64, size: f64, extent: f64) -> f64 {
    pos.min((extent - size).max(0.0)).max(0.0)
}

/// Per-element visual properties. Every field is optional; use the accessor
/// methods to read with defaults applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    /// Clockwise rotation in degrees around the box centre.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip_horizontal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip_vertical: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Explicit stacking order; overrides list order when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    /// Keys this model does not know about, preserved verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Style {
    #[must_use]
    pub fn font_size(&self) -> f64 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    #[must_use]
    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }

    #[must_use]
    pub fn font_weight(&self) -> &str {
        self.font_weight.as_deref().unwrap_or("normal")
    }

    #[must_use]
    pub fn font_style(&self) -> &str {
        self.font_style.as_deref().unwrap_or("normal")
    }

    #[must_use]
    pub fn color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR)
    }

    #[must_use]
    pub fn text_align(&self) -> &str {
        self.text_align.as_deref().unwrap_or("left")
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation.unwrap_or(0.0)
    }

    #[must_use]
    pub fn flip_horizontal(&self) -> bool {
        self.flip_horizontal.unwrap_or(false)
    }

    #[must_use]
    pub fn flip_vertical(&self) -> bool {
        self.flip_vertical.unwrap_or(false)
    }

    #[must_use]
    pub fn border_radius(&self) -> f64 {
        self.border_radius.unwrap_or(0.0)
    }

    #[must_use]
    pub fn background_color(&self) -> &str {
        self.background_color.as_deref().unwrap_or("transparent")
    }

    #[must_use]
    pub fn border_color(&self) -> &str {
        self.border_color.as_deref().unwrap_or("transparent")
    }

    #[must_use]
    pub fn border_width(&self) -> f64 {
        self.border_width.unwrap_or(0.0)
    }

    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity.unwrap_or(1.0)
    }

    #[must_use]
    pub fn z_index(&self) -> i64 {
        self.z_index.unwrap_or(0)
    }

    /// Merge `patch` over this style. Fields present in the patch win;
    /// extra keys set to `null` in the patch are removed.
    #[must_use]
    pub fn merge(&self, patch: &Style) -> Style {
        let mut extra = self.extra.clone();
        for (k, v) in &patch.extra {
            if v.is_null() {
                extra.remove(k);
            } else {
                extra.insert(k.clone(), v.clone());
            }
        }
        Style {
            font_size: patch.font_size.or(self.font_size),
            font_family: patch.font_family.clone().or_else(|| self.font_family.clone()),
            font_weight: patch.font_weight.clone().or_else(|| self.font_weight.clone()),
            font_style: patch.font_style.clone().or_else(|| self.font_style.clone()),
            color: patch.color.clone().or_else(|| self.color.clone()),
            text_align: patch.text_align.clone().or_else(|| self.text_align.clone()),
            rotation: patch.rotation.or(self.rotation),
            flip_horizontal: patch.flip_horizontal.or(self.flip_horizontal),
            flip_vertical: patch.flip_vertical.or(self.flip_vertical),
            border_radius: patch.border_radius.or(self.border_radius),
            background_color: patch.background_color.clone().or_else(|| self.background_color.clone()),
            border_color: patch.border_color.clone().or_else(|| self.border_color.clone()),
            border_width: patch.border_width.or(self.border_width),
            opacity: patch.opacity.or(self.opacity),
            z_index: patch.z_index.or(self.z_index),
            extra,
        }
    }
}

/// One positioned visual unit of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(rename = "type", default)]
    pub kind: ElementKind,
    /// Text payload, image reference, QR payload or decoration markup.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub style: Style,
    /// Where relayout derives this element's geometry from. Written by
    /// relayout; dropped once the element is edited by other means.
    #[serde(rename = "layoutBasis", default, skip_serializing_if = "Option::is_none")]
    pub layout_basis: Option<LayoutBasis>,
}

/// The geometry an element had on the page it was designed for, plus the
/// geometry relayout last left it with.
///
/// Page changes always scale from `position` on the basis page, so a run of
/// small changes lands where one change of the same total would. The basis
/// only holds while the element still has the `applied` geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBasis {
    pub page_width: f64,
    pub page_height: f64,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    pub applied: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_font_size: Option<f64>,
}

impl LayoutBasis {
    /// Basis for `el` as it currently stands on a page of size `page`.
    #[must_use]
    pub fn of(el: &Element, page: Size) -> Self {
        Self {
            page_width: page.width,
            page_height: page.height,
            position: el.position,
            font_size: el.style.font_size,
            applied: el.position,
            applied_font_size: el.style.font_size,
        }
    }

    #[must_use]
    pub fn page(&self) -> Size {
        Size::new(self.page_width, self.page_height)
    }

    /// The same basis, recording `el` as the geometry relayout left behind.
    #[must_use]
    pub fn applied_to(self, el: &Element) -> Self {
        Self { applied: el.position, applied_font_size: el.style.font_size, ..self }
    }

    /// Whether `el` still has the geometry relayout left it with.
    #[must_use]
    pub fn matches(&self, el: &Element) -> bool {
        self.applied == el.position && self.applied_font_size == el.style.font_size
    }
}

/// Page margins in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self { top: DEFAULT_MARGIN, right: DEFAULT_MARGIN, bottom: DEFAULT_MARGIN, left: DEFAULT_MARGIN }
    }
}

/// Page background fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Default for Background {
    fn default() -> Self {
        Self { color: DEFAULT_BACKGROUND_COLOR.to_owned(), image: None }
    }
}

/// Canonical page dimensions and decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub background: Background,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            width: REFERENCE_PAGE_WIDTH,
            height: REFERENCE_PAGE_HEIGHT,
            margin: Margin::default(),
            background: Background::default(),
        }
    }
}

/// Page settings plus the ordered element list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateDocument {
    pub page_settings: PageSettings,
    pub elements: Vec<Element>,
}

impl TemplateDocument {
    /// An empty document on the default page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty document with the given page size.
    #[must_use]
    pub fn with_page_size(width: f64, height: f64) -> Self {
        Self {
            page_settings: PageSettings { width, height, ..PageSettings::default() },
            elements: Vec::new(),
        }
    }

    /// Decode a document from JSON, filling defaults for missing fields and
    /// re-keying any element whose id repeats an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Json`] when the input is not a JSON document
    /// of the expected shape.
    pub fn from_json(raw: &str) -> Result<Self, DocumentError> {
        let doc: Self = serde_json::from_str(raw)?;
        Ok(doc.with_unique_ids())
    }

    /// Decode a document from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Json`] when the value has the wrong shape.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DocumentError> {
        let doc: Self = serde_json::from_value(value)?;
        Ok(doc.with_unique_ids())
    }

    /// Encode the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Json`] if serialization fails (extra style
    /// keys holding non-string map keys, for example).
    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Page dimensions as a [`Size`].
    #[must_use]
    pub fn page_size(&self) -> Size {
        Size::new(self.page_settings.width, self.page_settings.height)
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Index of an element in list order.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Elements in paint order: stable by `zIndex`, ties keep list order.
    #[must_use]
    pub fn paint_order(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.style.z_index());
        ordered
    }

    fn with_unique_ids(mut self) -> Self {
        let mut seen = HashSet::new();
        for element in &mut self.elements {
            if !seen.insert(element.id.clone()) {
                let fresh = Uuid::new_v4().to_string();
                tracing::debug!(duplicate = %element.id, %fresh, "re-keyed duplicate element id");
                element.id.clone_from(&fresh);
                seen.insert(fresh);
            }
        }
        self
    }
}
