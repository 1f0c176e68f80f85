use std::time::{Duration, Instant};

use circular_progress::{
    Bitmap, CircularProgressPanel, Color, PanelCommand, PanelConfig, Point, TextPen, Widget,
};

const EPS: f64 = 1e-9;

#[test]
fn stock_200_panel_layout() {
    let panel = CircularProgressPanel::new(200, 200);
    let g = panel.geometry();
    assert_eq!(g.max_radius, 100.0);
    assert_eq!(g.outer_radius, 80.0);
    assert_eq!(g.inner_radius, 60.0);
    assert_eq!(g.center, Point::new(100.0, 100.0));
    assert_eq!(panel.marker_angle(), 60);
    assert_eq!(panel.text(), "0.31mg/l");
    assert_eq!(panel.text_font().map(|f| f.size()), Some(16.0));
}

#[test]
fn default_label_lands_inside_the_inner_disc() {
    let panel = CircularProgressPanel::new(200, 200);
    let mut frame = Bitmap::new(200, 200);
    panel.render(&mut frame.canvas());

    // The stock pen is black; the disc behind the label is bright blue.
    let inner = panel.geometry().inner_rect;
    let dark = (0..200)
        .flat_map(|y| (0..200).map(move |x| (x, y)))
        .filter(|&(x, y)| {
            let c = frame.pixel(x, y).unwrap();
            c.a == 255 && c.r < 40 && c.g < 40 && c.b < 40
        })
        .collect::<Vec<_>>();
    assert!(!dark.is_empty());
    for (x, y) in dark {
        assert!(inner.x <= x as f64 && (x as f64) < inner.x + inner.width);
        assert!(inner.y <= y as f64 && (y as f64) < inner.y + inner.height);
    }
}

#[test]
fn radii_scale_linearly_with_ratios() {
    let mut panel = CircularProgressPanel::new(320, 180);
    for (outer, inner) in [(0.0, 0.0), (0.25, 0.1), (0.5, 0.5), (1.0, 0.75), (1.5, 2.0)] {
        panel.set_circle_ratio(outer, inner);
        let g = panel.geometry();
        assert_eq!(g.max_radius, 90.0);
        assert!((g.outer_radius - 90.0 * outer).abs() < EPS);
        assert!((g.inner_radius - 90.0 * inner).abs() < EPS);
        assert_eq!(g.center, Point::new(160.0, 90.0));
    }
}

#[test]
fn full_outer_and_empty_inner_is_fine() {
    let mut panel = CircularProgressPanel::new(200, 200);
    panel.set_circle_ratio(1.0, 0.0);
    panel.set_text("");
    assert_eq!(panel.geometry().inner_radius, 0.0);
    assert_eq!(panel.geometry().outer_radius, 100.0);

    let mut frame = Bitmap::new(200, 200);
    panel.render(&mut frame.canvas());
    // no disc: the center stays untouched
    assert_eq!(frame.pixel(100, 100).map(|c| c.a), Some(0));
}

#[test]
fn marker_stays_on_outer_ring() {
    let mut panel = CircularProgressPanel::new(240, 160);
    panel.set_circle_ratio(0.9, 0.5);
    let radius = panel.geometry().outer_radius;
    let center = panel.geometry().center;
    for angle in (-720..=720).step_by(7) {
        panel.set_marker_angle(angle);
        let distance = center.distance(panel.marker_center());
        assert!((distance - radius).abs() < 1e-9, "angle {angle}");
    }
}

#[test]
fn ticks_walk_clockwise_and_wrap_at_zero() {
    let mut panel = CircularProgressPanel::new(200, 200);
    let mut seen = vec![panel.marker_angle()];
    for _ in 0..13 {
        panel.advance_marker();
        seen.push(panel.marker_angle());
    }
    assert_eq!(
        seen,
        vec![60, 54, 48, 42, 36, 30, 24, 18, 12, 6, 0, 354, 348, 342]
    );
}

#[test]
fn stop_with_reset_is_idempotent() {
    let mut panel = CircularProgressPanel::new(200, 200);
    panel.start_animation(10);
    for _ in 0..17 {
        panel.advance_marker();
    }
    assert_ne!(panel.marker_angle(), 60);
    for _ in 0..3 {
        panel.stop_animation(true);
        assert_eq!(panel.marker_angle(), 60);
        assert!(!panel.is_animating());
    }
}

#[test]
fn stop_without_reset_keeps_angle() {
    let mut panel = CircularProgressPanel::new(200, 200);
    panel.start_animation(10);
    panel.advance_marker();
    panel.stop_animation(false);
    assert_eq!(panel.marker_angle(), 54);
}

#[test]
fn ratio_change_resets_marker() {
    let mut panel = CircularProgressPanel::new(200, 200);
    panel.set_marker_angle(200);
    panel.set_circle_ratio(0.7, 0.4);
    assert_eq!(panel.marker_angle(), 60);
    let expected = panel.geometry().center.on_circle(70.0, 60.0);
    assert!(panel.marker_center().distance(expected) < EPS);
}

#[test]
fn timer_drives_marker_through_widget_polling() {
    let mut panel = CircularProgressPanel::new(200, 200);
    panel.take_redraw_request();

    assert!(!panel.poll_timers(Instant::now() + Duration::from_secs(10)));
    assert_eq!(panel.next_deadline(), None);

    panel.start_animation(20);
    assert_eq!(panel.animation_interval(), Some(Duration::from_millis(20)));
    let deadline = panel.next_deadline().expect("timer running");
    assert!(!panel.poll_timers(deadline - Duration::from_millis(1)));
    assert!(panel.poll_timers(deadline));
    assert_eq!(panel.marker_angle(), 54);
    assert!(panel.take_redraw_request());

    panel.stop_animation(false);
    assert!(!panel.poll_timers(deadline + Duration::from_secs(1)));
    assert_eq!(panel.marker_angle(), 54);
}

#[test]
fn commands_map_onto_operations() {
    let mut panel = CircularProgressPanel::new(200, 200);
    panel.apply(PanelCommand::SetText("0.99mg/l".into()));
    assert_eq!(panel.text(), "0.99mg/l");

    panel.apply(PanelCommand::SetCircleRatio(0.5, 0.25));
    assert_eq!(panel.geometry().outer_radius, 50.0);

    let pen = TextPen::new(Color::from_rgb(0xff8800), 3.0);
    panel.apply(PanelCommand::SetTextProperty(pen, None));
    assert_eq!(panel.text_pen(), &pen);
    assert!(panel.text_font().is_none());

    panel.apply(PanelCommand::StartAnimation(100));
    assert!(panel.is_animating());
    panel.advance_marker();
    panel.apply(PanelCommand::StopAnimation(true));
    assert!(!panel.is_animating());
    assert_eq!(panel.marker_angle(), 60);
}

#[test]
fn zero_sized_panel_degrades_quietly() {
    let mut panel = CircularProgressPanel::new(0, 0);
    assert_eq!(panel.geometry().outer_radius, 0.0);
    panel.advance_marker();
    assert_eq!(panel.marker_center(), Point::new(0.0, 0.0));

    assert_eq!(panel.background().as_bytes().len(), 0);

    let mut frame = Bitmap::new(0, 0);
    panel.render(&mut frame.canvas());
    assert!(frame.as_bytes().is_empty());
}

#[test]
fn custom_config_flows_into_cache() {
    let ring = Color::from_rgb(0x22aa44);
    let config = PanelConfig::builder()
        .ring_color(ring)
        .ring_width(10.0)
        .initial_angle(90)
        .angle_increment(15)
        .build();
    let mut panel = CircularProgressPanel::with_config(100, 100, config);
    assert_eq!(panel.background().pixel(90, 50), Some(ring));
    assert_eq!(panel.marker_angle(), 90);
    panel.advance_marker();
    assert_eq!(panel.marker_angle(), 75);
}
