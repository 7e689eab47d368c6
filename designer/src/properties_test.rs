#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::TemplateDocument;
use crate::intent::reduce;

fn text_element() -> Element {
    Element {
        id: "t".into(),
        kind: ElementKind::Text,
        content: "Hello".into(),
        position: Position::new(100.0, 100.0, 200.0, 40.0),
        style: Style { font_size: Some(18.0), ..Style::default() },
        layout_basis: None,
    }
}

fn apply(element: &Element, property: Property, value: PropertyValue) -> Element {
    let doc = TemplateDocument { elements: vec![element.clone()], ..TemplateDocument::default() };
    let intent = write(element, property, &value).unwrap();
    reduce(&doc, &intent, false).document.elements[0].clone()
}

// =============================================================
// properties_for
// =============================================================

#[test]
fn every_kind_exposes_geometry() {
    for kind in [
        ElementKind::Text,
        ElementKind::Image,
        ElementKind::Shape,
        ElementKind::Qr,
        ElementKind::Decoration,
    ] {
        let props = properties_for(kind);
        for p in [Property::X, Property::Y, Property::Width, Property::Height, Property::Rotation] {
            assert!(props.contains(&p), "{kind:?} missing {p:?}");
        }
    }
}

#[test]
fn only_text_exposes_typography() {
    assert!(properties_for(ElementKind::Text).contains(&Property::FontSize));
    assert!(!properties_for(ElementKind::Shape).contains(&Property::FontSize));
    assert!(properties_for(ElementKind::Shape).contains(&Property::BorderWidth));
}

// =============================================================
// read
// =============================================================

#[test]
fn read_returns_values_and_defaults() {
    let el = text_element();
    assert_eq!(read(&el, Property::X), PropertyValue::Number(100.0));
    assert_eq!(read(&el, Property::FontSize), PropertyValue::Number(18.0));
    assert_eq!(read(&el, Property::Color), PropertyValue::Text("#000000".into()));
    assert_eq!(read(&el, Property::FlipVertical), PropertyValue::Flag(false));
    assert_eq!(read(&el, Property::Content), PropertyValue::Text("Hello".into()));
}

// =============================================================
// write
// =============================================================

#[test]
fn write_x_moves_and_clamps() {
    let out = apply(&text_element(), Property::X, PropertyValue::Number(5000.0));
    assert_eq!(out.position.x, 600.0);
    assert_eq!(out.position.y, 100.0);
}

#[test]
fn write_width_enforces_minimum() {
    let out = apply(&text_element(), Property::Width, PropertyValue::Number(3.0));
    assert_eq!(out.position.width, 20.0);
}

#[test]
fn write_rotation_normalizes() {
    let out = apply(&text_element(), Property::Rotation, PropertyValue::Number(-90.0));
    assert_eq!(out.style.rotation, Some(270.0));
}

#[test]
fn write_flip_sets_flag() {
    let out = apply(&text_element(), Property::FlipHorizontal, PropertyValue::Flag(true));
    assert_eq!(out.style.flip_horizontal, Some(true));
}

#[test]
fn write_opacity_clamps() {
    let out = apply(&text_element(), Property::Opacity, PropertyValue::Number(3.0));
    assert_eq!(out.style.opacity, Some(1.0));
}

#[test]
fn write_content_replaces_text() {
    let out = apply(&text_element(), Property::Content, PropertyValue::Text("Bye".into()));
    assert_eq!(out.content, "Bye");
}

#[test]
fn write_rejects_type_mismatch() {
    let el = text_element();
    assert!(write(&el, Property::X, &PropertyValue::Text("left".into())).is_none());
    assert!(write(&el, Property::Color, &PropertyValue::Number(1.0)).is_none());
    assert!(write(&el, Property::FlipVertical, &PropertyValue::Number(1.0)).is_none());
}

#[test]
fn write_rejects_non_finite_numbers() {
    let el = text_element();
    assert!(write(&el, Property::Y, &PropertyValue::Number(f64::NAN)).is_none());
    assert!(write(&el, Property::FontSize, &PropertyValue::Number(f64::INFINITY)).is_none());
}

#[test]
fn read_after_write_round_trips() {
    let el = text_element();
    let out = apply(&el, Property::TextAlign, PropertyValue::Text("right".into()));
    assert_eq!(read(&out, Property::TextAlign), PropertyValue::Text("right".into()));
}

// =============================================================
// Names and raw values
// =============================================================

#[test]
fn names_round_trip() {
    for p in Property::ALL {
        assert_eq!(Property::from_name(p.name()), Some(p));
    }
    assert_eq!(Property::from_name("fontSize"), Some(Property::FontSize));
    assert_eq!(Property::from_name("font-size"), None);
}

#[test]
fn parse_value_follows_property_type() {
    assert_eq!(Property::X.parse_value(" 12.5 "), Some(PropertyValue::Number(12.5)));
    assert_eq!(Property::X.parse_value("left"), None);
    assert_eq!(Property::Opacity.parse_value("NaN"), None);
    assert_eq!(Property::FlipVertical.parse_value("true"), Some(PropertyValue::Flag(true)));
    assert_eq!(Property::FlipVertical.parse_value("yes"), None);
    assert_eq!(Property::Color.parse_value("#ff0000"), Some(PropertyValue::Text("#ff0000".into())));
}
