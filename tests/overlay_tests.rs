use chrono::NaiveDate;
use planning_board::layout::{
    AnchorRect, ColorAssignment, Granularity, RowColor, TooltipGeometry, TooltipPlacement,
    ViewWindow, position_tooltip, today_marker,
};
use planning_board::{Resource, RowKey};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn today_marker_in_month_window_centers_on_day() {
    let window = ViewWindow::resolve(d(2024, 4, 1), Granularity::Month).unwrap();
    let position = today_marker(&window, d(2024, 4, 1)).unwrap();
    assert!(approx(position, 0.5 / 30.0 * 100.0));
    let last = today_marker(&window, d(2024, 4, 30)).unwrap();
    assert!(approx(last, 29.5 / 30.0 * 100.0));
}

#[test]
fn today_marker_in_year_window_uses_month_fraction() {
    let window = ViewWindow::resolve(d(2024, 1, 1), Granularity::Year).unwrap();
    let position = today_marker(&window, d(2024, 7, 16)).unwrap();
    assert!(approx(position, (6.0 + 16.0 / 31.0) / 12.0 * 100.0));
    let end = today_marker(&window, d(2024, 12, 31)).unwrap();
    assert!(approx(end, 100.0));
}

#[test]
fn today_marker_absent_outside_window_and_for_empty_columns() {
    let window = ViewWindow::resolve(d(2024, 3, 4), Granularity::Week).unwrap();
    assert!(today_marker(&window, d(2024, 7, 1)).is_none());
    assert!(today_marker(&window, d(2024, 3, 3)).is_none());

    let mut hollow = window.clone();
    hollow.columns.clear();
    assert!(today_marker(&hollow, d(2024, 3, 5)).is_none());
}

#[test]
fn colors_cycle_through_palette_by_position() {
    let resources: Vec<Resource> = (0..5)
        .map(|i| Resource::new(format!("t{i}"), format!("Trainer {i}")))
        .collect();
    let colors = ColorAssignment::new(&resources, 3);
    assert_eq!(colors.index_of("t0"), Some(0));
    assert_eq!(colors.index_of("t2"), Some(2));
    assert_eq!(colors.index_of("t3"), Some(0));
    assert_eq!(colors.index_of("t4"), Some(1));
    assert_eq!(colors.index_of("nobody"), None);
    assert_eq!(colors.color_for(&RowKey::Unassigned), RowColor::Unassigned);
    assert_eq!(
        colors.color_for(&RowKey::Resource("nobody".into())),
        RowColor::Unassigned
    );
}

#[test]
fn zero_palette_size_does_not_panic() {
    let resources = vec![Resource::new("a", "A"), Resource::new("b", "B")];
    let colors = ColorAssignment::new(&resources, 0);
    assert_eq!(colors.palette_size(), 1);
    assert_eq!(colors.index_of("b"), Some(0));
}

fn geometry() -> TooltipGeometry {
    TooltipGeometry {
        width: 200.0,
        height: 100.0,
        min_margin: 10.0,
        gap: 6.0,
    }
}

#[test]
fn tooltip_centers_above_anchor() {
    let anchor = AnchorRect {
        x: 300.0,
        y: 250.0,
        width: 100.0,
        height: 24.0,
    };
    let position = position_tooltip(anchor, 1000.0, geometry());
    assert!(approx(position.x, 250.0));
    assert!(approx(position.y, 144.0));
    assert_eq!(position.placement, TooltipPlacement::Above);
}

#[test]
fn tooltip_is_clamped_to_container_edges() {
    let left = AnchorRect {
        x: 0.0,
        y: 200.0,
        width: 20.0,
        height: 20.0,
    };
    assert!(approx(position_tooltip(left, 800.0, geometry()).x, 10.0));

    let right = AnchorRect {
        x: 780.0,
        y: 200.0,
        width: 20.0,
        height: 20.0,
    };
    assert!(approx(position_tooltip(right, 800.0, geometry()).x, 590.0));
}

#[test]
fn narrow_container_pins_tooltip_to_margin() {
    let anchor = AnchorRect {
        x: 50.0,
        y: 200.0,
        width: 20.0,
        height: 20.0,
    };
    let position = position_tooltip(anchor, 150.0, geometry());
    assert!(approx(position.x, 10.0));
}

#[test]
fn tooltip_flips_below_when_no_room_above() {
    let anchor = AnchorRect {
        x: 100.0,
        y: 40.0,
        width: 50.0,
        height: 20.0,
    };
    let position = position_tooltip(anchor, 800.0, geometry());
    assert_eq!(position.placement, TooltipPlacement::Below);
    assert!(approx(position.y, 66.0));
}
