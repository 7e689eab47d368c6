//! Properties editor: typed read/write of an element's position, style and
//! content.
//!
//! Writes produce an [`Intent`] rather than a new element, so manual numeric
//! entry goes through the same clamping and history path as pointer edits.

#[cfg(test)]
#[path = "properties_test.rs"]
mod properties_test;

use crate::doc::{Element, ElementKind, Position, Style};
use crate::gesture::normalize_degrees;
use crate::intent::Intent;

/// An editable field of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    X,
    Y,
    Width,
    Height,
    Rotation,
    FlipHorizontal,
    FlipVertical,
    Opacity,
    Content,
    FontSize,
    FontFamily,
    FontWeight,
    FontStyle,
    Color,
    TextAlign,
    BorderRadius,
    BackgroundColor,
    BorderColor,
    BorderWidth,
}

impl Property {
    pub const ALL: [Property; 19] = [
        Property::X,
        Property::Y,
        Property::Width,
        Property::Height,
        Property::Rotation,
        Property::FlipHorizontal,
        Property::FlipVertical,
        Property::Opacity,
        Property::Content,
        Property::FontSize,
        Property::FontFamily,
        Property::FontWeight,
        Property::FontStyle,
        Property::Color,
        Property::TextAlign,
        Property::BorderRadius,
        Property::BackgroundColor,
        Property::BorderColor,
        Property::BorderWidth,
    ];

    /// Name as it appears in the document JSON (`x`, `fontSize`, ...).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Width => "width",
            Self::Height => "height",
            Self::Rotation => "rotation",
            Self::FlipHorizontal => "flipHorizontal",
            Self::FlipVertical => "flipVertical",
            Self::Opacity => "opacity",
            Self::Content => "content",
            Self::FontSize => "fontSize",
            Self::FontFamily => "fontFamily",
            Self::FontWeight => "fontWeight",
            Self::FontStyle => "fontStyle",
            Self::Color => "color",
            Self::TextAlign => "textAlign",
            Self::BorderRadius => "borderRadius",
            Self::BackgroundColor => "backgroundColor",
            Self::BorderColor => "borderColor",
            Self::BorderWidth => "borderWidth",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Parse a raw string into the value type this property takes.
    #[must_use]
    pub fn parse_value(self, raw: &str) -> Option<PropertyValue> {
        match self {
            Self::FlipHorizontal | Self::FlipVertical => match raw.trim().parse::<bool>() {
                Ok(flag) => Some(PropertyValue::Flag(flag)),
                Err(_) => None,
            },
            Self::X
            | Self::Y
            | Self::Width
            | Self::Height
            | Self::Rotation
            | Self::Opacity
            | Self::FontSize
            | Self::BorderRadius
            | Self::BorderWidth => match raw.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Some(PropertyValue::Number(n)),
                _ => None,
            },
            Self::Content
            | Self::FontFamily
            | Self::FontWeight
            | Self::FontStyle
            | Self::Color
            | Self::TextAlign
            | Self::BackgroundColor
            | Self::BorderColor => Some(PropertyValue::Text(raw.to_owned())),
        }
    }
}

/// A property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl PropertyValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

const COMMON: [Property; 8] = [
    Property::X,
    Property::Y,
    Property::Width,
    Property::Height,
    Property::Rotation,
    Property::FlipHorizontal,
    Property::FlipVertical,
    Property::Opacity,
];

const TEXT: [Property; 7] = [
    Property::Content,
    Property::FontSize,
    Property::FontFamily,
    Property::FontWeight,
    Property::FontStyle,
    Property::Color,
    Property::TextAlign,
];

const BOX: [Property; 4] = [
    Property::BackgroundColor,
    Property::BorderColor,
    Property::BorderWidth,
    Property::BorderRadius,
];

/// Properties shown in the editor for an element kind, in display order.
#[must_use]
pub fn properties_for(kind: ElementKind) -> Vec<Property> {
    let mut out = COMMON.to_vec();
    match kind {
        ElementKind::Text => out.extend(TEXT),
        ElementKind::Image => {
            out.push(Property::Content);
            out.push(Property::BorderRadius);
        }
        ElementKind::Shape => out.extend(BOX),
        ElementKind::Qr => {
            out.push(Property::Content);
            out.push(Property::Color);
            out.push(Property::BackgroundColor);
        }
        ElementKind::Decoration => {
            out.push(Property::Content);
            out.push(Property::Color);
        }
    }
    out
}

/// Current value of `property`, with style defaults applied.
#[must_use]
pub fn read(element: &Element, property: Property) -> PropertyValue {
    use PropertyValue::{Flag, Number, Text};
    let p = &element.position;
    let s = &element.style;
    match property {
        Property::X => Number(p.x),
        Property::Y => Number(p.y),
        Property::Width => Number(p.width),
        Property::Height => Number(p.height),
        Property::Rotation => Number(s.rotation()),
        Property::FlipHorizontal => Flag(s.flip_horizontal()),
        Property::FlipVertical => Flag(s.flip_vertical()),
        Property::Opacity => Number(s.opacity()),
        Property::Content => Text(element.content.clone()),
        Property::FontSize => Number(s.font_size()),
        Property::FontFamily => Text(s.font_family().to_owned()),
        Property::FontWeight => Text(s.font_weight().to_owned()),
        Property::FontStyle => Text(s.font_style().to_owned()),
        Property::Color => Text(s.color().to_owned()),
        Property::TextAlign => Text(s.text_align().to_owned()),
        Property::BorderRadius => Number(s.border_radius()),
        Property::BackgroundColor => Text(s.background_color().to_owned()),
        Property::BorderColor => Text(s.border_color().to_owned()),
        Property::BorderWidth => Number(s.border_width()),
    }
}

/// Intent that sets `property` to `value` on `element`.
///
/// Returns `None` when the value has the wrong type for the property or a
/// number is not finite.
#[must_use]
pub fn write(element: &Element, property: Property, value: &PropertyValue) -> Option<Intent> {
    let id = element.id.clone();
    let p = element.position;
    let number = || value.as_number().filter(|n| n.is_finite());
    let text = || value.as_text().map(str::to_owned);
    let style = |patch: Style| Some(Intent::SetStyle { id: id.clone(), patch });

    match property {
        Property::X => number().map(|x| Intent::Move { id: id.clone(), x, y: p.y }),
        Property::Y => number().map(|y| Intent::Move { id: id.clone(), x: p.x, y }),
        Property::Width => number().map(|width| Intent::Resize { id: id.clone(), position: Position { width, ..p } }),
        Property::Height => {
            number().map(|height| Intent::Resize { id: id.clone(), position: Position { height, ..p } })
        }
        Property::Content => text().map(|content| Intent::SetContent { id: id.clone(), content }),
        Property::Rotation => style(Style { rotation: Some(normalize_degrees(number()?)), ..Style::default() }),
        Property::FlipHorizontal => style(Style { flip_horizontal: Some(value.as_flag()?), ..Style::default() }),
        Property::FlipVertical => style(Style { flip_vertical: Some(value.as_flag()?), ..Style::default() }),
        Property::Opacity => style(Style { opacity: Some(number()?.clamp(0.0, 1.0)), ..Style::default() }),
        Property::FontSize => style(Style { font_size: Some(number()?.max(1.0)), ..Style::default() }),
        Property::FontFamily => style(Style { font_family: Some(text()?), ..Style::default() }),
        Property::FontWeight => style(Style { font_weight: Some(text()?), ..Style::default() }),
        Property::FontStyle => style(Style { font_style: Some(text()?), ..Style::default() }),
        Property::Color => style(Style { color: Some(text()?), ..Style::default() }),
        Property::TextAlign => style(Style { text_align: Some(text()?), ..Style::default() }),
        Property::BorderRadius => style(Style { border_radius: Some(number()?.max(0.0)), ..Style::default() }),
        Property::BackgroundColor => style(Style { background_color: Some(text()?), ..Style::default() }),
        Property::BorderColor => style(Style { border_color: Some(text()?), ..Style::default() }),
        Property::BorderWidth => style(Style { border_width: Some(number()?.max(0.0)), ..Style::default() }),
    }
}
