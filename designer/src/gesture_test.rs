#![allow(clippy::float_cmp)]

use super::*;

fn page() -> Size {
    Size::new(800.0, 600.0)
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// drag_position
// =============================================================

#[test]
fn drag_follows_pointer_minus_offset() {
    let orig = Position::new(100.0, 100.0, 50.0, 50.0);
    let p = drag_position(Point::new(320.0, 240.0), Point::new(20.0, 10.0), &orig, page());
    assert_eq!(p, Position::new(300.0, 230.0, 50.0, 50.0));
}

#[test]
fn drag_toward_negative_clamps_to_origin() {
    let orig = Position::new(100.0, 100.0, 50.0, 50.0);
    let p = drag_position(Point::new(-50.0, -50.0), Point::new(0.0, 0.0), &orig, page());
    assert_eq!(p, Position::new(0.0, 0.0, 50.0, 50.0));
}

#[test]
fn drag_past_far_edge_clamps_each_axis() {
    let orig = Position::new(100.0, 100.0, 50.0, 50.0);
    let p = drag_position(Point::new(2000.0, 300.0), Point::new(0.0, 0.0), &orig, page());
    assert_eq!(p, Position::new(750.0, 300.0, 50.0, 50.0));
}

#[test]
fn drag_never_changes_size() {
    let orig = Position::new(10.0, 10.0, 120.0, 30.0);
    let p = drag_position(Point::new(999.0, -999.0), Point::new(5.0, 5.0), &orig, page());
    assert_eq!((p.width, p.height), (120.0, 30.0));
}

// =============================================================
// resize
// =============================================================

#[test]
fn resize_se_grows_right_and_down() {
    let orig = Position::new(100.0, 100.0, 100.0, 50.0);
    let p = resize(&orig, Corner::Se, Point::new(30.0, 20.0), page());
    assert_eq!(p, Position::new(100.0, 100.0, 130.0, 70.0));
}

#[test]
fn resize_nw_keeps_se_corner_fixed() {
    let orig = Position::new(100.0, 100.0, 100.0, 50.0);
    let p = resize(&orig, Corner::Nw, Point::new(-30.0, -20.0), page());
    assert_eq!(p, Position::new(70.0, 80.0, 130.0, 70.0));
    assert_eq!(p.x + p.width, 200.0);
    assert_eq!(p.y + p.height, 150.0);
}

#[test]
fn resize_ne_keeps_sw_corner_fixed() {
    let orig = Position::new(100.0, 100.0, 100.0, 50.0);
    let p = resize(&orig, Corner::Ne, Point::new(10.0, 10.0), page());
    assert_eq!(p, Position::new(100.0, 110.0, 110.0, 40.0));
}

#[test]
fn resize_sw_keeps_ne_corner_fixed() {
    let orig = Position::new(100.0, 100.0, 100.0, 50.0);
    let p = resize(&orig, Corner::Sw, Point::new(10.0, 10.0), page());
    assert_eq!(p, Position::new(110.0, 100.0, 90.0, 60.0));
}

#[test]
fn resize_enforces_minimum_size() {
    let orig = Position::new(100.0, 100.0, 100.0, 50.0);
    for corner in Corner::ALL {
        let p = resize(&orig, corner, Point::new(-500.0, -500.0), page());
        assert!(p.width >= 20.0 && p.height >= 20.0, "{corner:?} -> {p:?}");
        let p = resize(&orig, corner, Point::new(500.0, 500.0), page());
        assert!(p.width >= 20.0 && p.height >= 20.0, "{corner:?} -> {p:?}");
    }
}

#[test]
fn resize_collapse_pins_fixed_edge() {
    let orig = Position::new(100.0, 100.0, 100.0, 50.0);
    let p = resize(&orig, Corner::Nw, Point::new(500.0, 500.0), page());
    assert_eq!(p, Position::new(180.0, 130.0, 20.0, 20.0));
}

#[test]
fn resize_stops_at_page_edges() {
    let orig = Position::new(700.0, 500.0, 50.0, 50.0);
    let p = resize(&orig, Corner::Se, Point::new(500.0, 500.0), page());
    assert_eq!(p, Position::new(700.0, 500.0, 100.0, 100.0));
    let orig = Position::new(10.0, 10.0, 50.0, 50.0);
    let p = resize(&orig, Corner::Nw, Point::new(-500.0, -500.0), page());
    assert_eq!(p, Position::new(0.0, 0.0, 60.0, 60.0));
}

#[test]
fn resize_near_far_edge_keeps_minimum_inside_page() {
    let orig = Position::new(790.0, 590.0, 10.0, 10.0);
    let p = resize(&orig, Corner::Se, Point::new(0.0, 0.0), page());
    assert_eq!(p, Position::new(780.0, 580.0, 20.0, 20.0));
}

#[test]
fn enforce_min_size_then_clamps() {
    let p = enforce_min_size(Position::new(795.0, 10.0, 5.0, 900.0), page());
    assert_eq!(p, Position::new(780.0, 0.0, 20.0, 600.0));
}

// =============================================================
// nudge
// =============================================================

#[test]
fn nudge_moves_and_clamps() {
    let orig = Position::new(0.0, 10.0, 50.0, 50.0);
    assert_eq!(nudge(&orig, 1.0, 0.0, page()), Position::new(1.0, 10.0, 50.0, 50.0));
    assert_eq!(nudge(&orig, -10.0, -10.0, page()), Position::new(0.0, 0.0, 50.0, 50.0));
}

// =============================================================
// rotation
// =============================================================

#[test]
fn pointer_angle_zero_is_up() {
    let c = Point::new(100.0, 100.0);
    assert!(approx_eq(pointer_angle_deg(c, Point::new(100.0, 50.0)), 0.0));
    assert!(approx_eq(pointer_angle_deg(c, Point::new(150.0, 100.0)), 90.0));
    assert!(approx_eq(pointer_angle_deg(c, Point::new(100.0, 150.0)), 180.0));
    assert!(approx_eq(pointer_angle_deg(c, Point::new(50.0, 100.0)), 270.0));
}

#[test]
fn rotation_adds_pointer_sweep() {
    assert!(approx_eq(rotation(10.0, 0.0, 45.0, None), 55.0));
    assert!(approx_eq(rotation(350.0, 0.0, 20.0, None), 10.0));
}

#[test]
fn rotation_snaps_when_requested() {
    assert!(approx_eq(rotation(0.0, 0.0, 37.0, Some(15.0)), 30.0));
    assert!(approx_eq(rotation(0.0, 0.0, 359.0, Some(15.0)), 0.0));
}

#[test]
fn normalize_wraps_negative() {
    assert!(approx_eq(normalize_degrees(-90.0), 270.0));
    assert!(approx_eq(normalize_degrees(720.0), 0.0));
}
