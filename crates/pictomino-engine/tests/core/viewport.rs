use std::time::{Duration, Instant};

use pictomino_core::geometry::{Point, Rect, Vec2};
use pictomino_engine::viewport::{Viewport, FIT_MAX_ZOOM, MAX_ZOOM, MIN_ZOOM};

#[test]
fn test_viewport_creation() {
    let vp = Viewport::new(1200.0, 800.0);
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan().x, 0.0);
    assert_eq!(vp.pan().y, 0.0);
    assert_eq!(vp.view_width(), 1200.0);
    assert_eq!(vp.view_height(), 800.0);
}

#[test]
fn test_world_to_screen_applies_zoom_then_pan() {
    let mut vp = Viewport::new(1200.0, 800.0);
    vp.set_zoom(2.0);
    vp.set_pan(Vec2::new(10.0, 20.0));

    // screen = world * zoom + pan
    let screen = vp.world_to_screen(Point::new(100.0, 50.0));
    assert!((screen.x - 210.0).abs() < 0.01);
    assert!((screen.y - 120.0).abs() < 0.01);
}

#[test]
fn test_screen_to_world_inverts_transform() {
    let mut vp = Viewport::new(1200.0, 800.0);
    vp.set_zoom(2.5);
    vp.set_pan(Vec2::new(75.0, 125.0));

    let original = Point::new(123.45, 456.78);
    let roundtrip = vp.screen_to_world(vp.world_to_screen(original));
    assert!((roundtrip.x - original.x).abs() < 0.01);
    assert!((roundtrip.y - original.y).abs() < 0.01);
}

#[test]
fn test_no_axis_flip() {
    let vp = Viewport::new(1200.0, 800.0);
    // Both spaces are y-down: larger world y means larger screen y.
    let low = vp.world_to_screen(Point::new(0.0, 0.0));
    let high = vp.world_to_screen(Point::new(0.0, 100.0));
    assert!(high.y > low.y);
}

#[test]
fn test_zoom_clamped_to_manual_range() {
    let mut vp = Viewport::new(1200.0, 800.0);
    vp.set_zoom(0.05);
    assert_eq!(vp.zoom(), MIN_ZOOM);

    vp.set_zoom(10.0);
    assert_eq!(vp.zoom(), MAX_ZOOM);

    vp.set_zoom(f64::NAN);
    assert_eq!(vp.zoom(), MAX_ZOOM, "non-finite zoom must be ignored");
}

#[test]
fn test_wheel_zoom_step_factors() {
    let mut vp = Viewport::new(1200.0, 800.0);
    let anchor = Point::new(600.0, 400.0);

    vp.wheel_zoom(anchor, 1);
    assert!((vp.zoom() - 1.1).abs() < 1e-9);

    vp.wheel_zoom(anchor, -1);
    assert!((vp.zoom() - 1.1 * 0.9).abs() < 1e-9);
}

#[test]
fn test_wheel_zoom_preserves_anchor_world_point() {
    let mut vp = Viewport::new(1200.0, 800.0);
    vp.set_pan(Vec2::new(40.0, -30.0));
    let anchor = Point::new(300.0, 200.0);

    let before = vp.screen_to_world(anchor);
    vp.wheel_zoom(anchor, 3);
    let after = vp.screen_to_world(anchor);

    assert!((before.x - after.x).abs() < 1e-6);
    assert!((before.y - after.y).abs() < 1e-6);
}

#[test]
fn test_zoom_at_point_keeps_anchor_fixed() {
    let mut vp = Viewport::new(1200.0, 800.0);
    vp.set_zoom(1.5);
    vp.set_pan(Vec2::new(50.0, -20.0));
    let anchor = Point::new(400.0, 300.0);

    let before = vp.screen_to_world(anchor);
    vp.zoom_at_point(anchor, 2.5);
    let after = vp.screen_to_world(anchor);

    assert!((vp.zoom() - 2.5).abs() < 1e-9);
    assert!((before.x - after.x).abs() < 1e-6);
    assert!((before.y - after.y).abs() < 1e-6);
}

#[test]
fn test_fit_to_bounds_caps_zoom_for_small_content() {
    let mut vp = Viewport::new(1000.0, 800.0);
    // Padded content is 300x300; the raw fit zoom of 800/300 exceeds the
    // auto-fit cap.
    vp.fit_to_bounds(Rect::new(0.0, 0.0, 100.0, 100.0), Instant::now());
    assert!((vp.zoom() - FIT_MAX_ZOOM).abs() < 1e-9);

    // Content center must land on the viewport center.
    let center = vp.world_to_screen(Point::new(50.0, 50.0));
    assert!((center.x - 500.0).abs() < 0.01, "center x {}", center.x);
    assert!((center.y - 400.0).abs() < 0.01, "center y {}", center.y);
}

#[test]
fn test_fit_to_bounds_includes_padding() {
    let mut vp = Viewport::new(500.0, 400.0);
    // Content 1000x800, padded to 1200x1000:
    // zoom = min(500/1200, 400/1000) = 0.4
    vp.fit_to_bounds(Rect::new(0.0, 0.0, 1000.0, 800.0), Instant::now());
    assert!((vp.zoom() - 0.4).abs() < 1e-9, "zoom {}", vp.zoom());

    let center = vp.world_to_screen(Point::new(500.0, 400.0));
    assert!((center.x - 250.0).abs() < 0.01);
    assert!((center.y - 200.0).abs() < 0.01);
}

#[test]
fn test_fit_to_bounds_degenerate_is_noop() {
    let mut vp = Viewport::new(1200.0, 800.0);
    vp.fit_to_bounds(Rect::new(10.0, 10.0, 0.0, 50.0), Instant::now());
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan().x, 0.0);

    let mut zero_view = Viewport::new(0.0, 0.0);
    zero_view.fit_to_bounds(Rect::new(0.0, 0.0, 100.0, 100.0), Instant::now());
    assert_eq!(zero_view.zoom(), 1.0);
}

#[test]
fn test_fit_marks_animating_window() {
    let mut vp = Viewport::new(1200.0, 800.0);
    let now = Instant::now();
    assert!(!vp.is_animating(now));

    vp.fit_to_bounds(Rect::new(0.0, 0.0, 400.0, 400.0), now);
    assert!(vp.is_animating(now));
    assert!(vp.is_animating(now + Duration::from_millis(599)));
    assert!(!vp.is_animating(now + Duration::from_millis(600)));
}

#[test]
fn test_pan_by_accumulates() {
    let mut vp = Viewport::new(1200.0, 800.0);
    vp.pan_by(Vec2::new(10.0, 5.0));
    vp.pan_by(Vec2::new(-3.0, 2.0));
    assert!((vp.pan().x - 7.0).abs() < 0.01);
    assert!((vp.pan().y - 7.0).abs() < 0.01);
}

#[test]
fn test_reset() {
    let mut vp = Viewport::new(1200.0, 800.0);
    vp.set_zoom(2.5);
    vp.set_pan(Vec2::new(100.0, 200.0));
    vp.reset();

    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan().x, 0.0);
    assert_eq!(vp.pan().y, 0.0);
}
