use chrono::NaiveDate;
use planning_board::layout::{Granularity, IntervalProjector, ViewWindow, group_by_row};
use planning_board::{Booking, BookingStatus, Resource, RowKey, StatusFilter};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn trainers() -> Vec<Resource> {
    vec![Resource::new("t1", "Alice"), Resource::new("t2", "Bruno")]
}

fn planned(id: &str, start: NaiveDate, end: NaiveDate) -> Booking {
    Booking::new(id, start, end, BookingStatus::Planned).with_resource("t1")
}

#[test]
fn single_day_booking_in_week_window() {
    let window = ViewWindow::resolve(d(2024, 3, 4), Granularity::Week).unwrap();
    let statuses = StatusFilter::all();
    let resources = trainers();
    let projector = IntervalProjector::new(&window, &statuses, &resources);

    let projected = projector
        .project_one(&planned("A", d(2024, 3, 5), d(2024, 3, 5)))
        .unwrap();
    assert_eq!(projected.column_start, 1);
    assert_eq!(projected.span, 1);
    assert_eq!(projected.row, RowKey::Resource("t1".into()));
    assert!(!projected.clipped_start);
    assert!(!projected.clipped_end);
}

#[test]
fn month_window_clips_booking_started_in_previous_month() {
    let window = ViewWindow::resolve(d(2024, 3, 1), Granularity::Month).unwrap();
    let statuses = StatusFilter::all();
    let resources = trainers();
    let projector = IntervalProjector::new(&window, &statuses, &resources);

    let projected = projector
        .project_one(&planned("X", d(2024, 2, 28), d(2024, 3, 2)))
        .unwrap();
    assert_eq!(projected.column_start, 0);
    assert_eq!(projected.span, 2);
    assert!(projected.clipped_start);
    assert!(!projected.clipped_end);
}

#[test]
fn year_window_uses_month_columns() {
    let window = ViewWindow::resolve(d(2024, 1, 1), Granularity::Year).unwrap();
    let statuses = StatusFilter::all();
    let resources = trainers();
    let projector = IntervalProjector::new(&window, &statuses, &resources);

    let projected = projector
        .project_one(&planned("Y", d(2024, 6, 15), d(2024, 8, 10)))
        .unwrap();
    assert_eq!(projected.column_start, 5);
    assert_eq!(projected.span, 3);
}

#[test]
fn year_window_clips_multi_year_booking() {
    let window = ViewWindow::resolve(d(2024, 1, 1), Granularity::Year).unwrap();
    let statuses = StatusFilter::all();
    let resources = trainers();
    let projector = IntervalProjector::new(&window, &statuses, &resources);

    let projected = projector
        .project_one(&planned("L", d(2023, 11, 1), d(2025, 2, 1)))
        .unwrap();
    assert_eq!(projected.column_start, 0);
    assert_eq!(projected.span, 12);
    assert!(projected.clipped_start && projected.clipped_end);
}

#[test]
fn inverted_range_becomes_single_column_at_start() {
    let window = ViewWindow::resolve(d(2024, 3, 4), Granularity::Week).unwrap();
    let statuses = StatusFilter::all();
    let resources = trainers();
    let projector = IntervalProjector::new(&window, &statuses, &resources);

    let projected = projector
        .project_one(&planned("E", d(2024, 3, 8), d(2024, 3, 5)))
        .unwrap();
    assert_eq!(projected.column_start, 4);
    assert_eq!(projected.span, 1);
}

#[test]
fn bookings_outside_window_or_filtered_are_rejected() {
    let window = ViewWindow::resolve(d(2024, 3, 4), Granularity::Week).unwrap();
    let statuses: StatusFilter = [BookingStatus::Planned].into_iter().collect();
    let resources = trainers();
    let projector = IntervalProjector::new(&window, &statuses, &resources);

    assert!(projector
        .project_one(&planned("before", d(2024, 2, 1), d(2024, 3, 3)))
        .is_none());
    assert!(projector
        .project_one(&planned("after", d(2024, 3, 11), d(2024, 3, 12)))
        .is_none());

    let cancelled = Booking::new("c", d(2024, 3, 5), d(2024, 3, 5), BookingStatus::Cancelled);
    assert!(projector.project_one(&cancelled).is_none());

    let mut undated = planned("u", d(2024, 3, 5), d(2024, 3, 5));
    undated.start_date = None;
    undated.end_date = None;
    assert!(projector.project_one(&undated).is_none());
}

#[test]
fn booking_with_only_one_date_is_a_single_day() {
    let window = ViewWindow::resolve(d(2024, 3, 4), Granularity::Week).unwrap();
    let statuses = StatusFilter::all();
    let resources = trainers();
    let projector = IntervalProjector::new(&window, &statuses, &resources);

    let mut start_only = planned("s", d(2024, 3, 6), d(2024, 3, 6));
    start_only.end_date = None;
    let projected = projector.project_one(&start_only).unwrap();
    assert_eq!((projected.column_start, projected.span), (2, 1));

    let mut end_only = planned("e", d(2024, 3, 9), d(2024, 3, 9));
    end_only.start_date = None;
    let projected = projector.project_one(&end_only).unwrap();
    assert_eq!((projected.column_start, projected.span), (5, 1));
}

#[test]
fn unknown_and_missing_resources_go_to_unassigned_row() {
    let window = ViewWindow::resolve(d(2024, 3, 4), Granularity::Week).unwrap();
    let statuses = StatusFilter::all();
    let resources = trainers();
    let projector = IntervalProjector::new(&window, &statuses, &resources);

    let bookings = vec![
        planned("a", d(2024, 3, 4), d(2024, 3, 4)),
        Booking::new("b", d(2024, 3, 5), d(2024, 3, 5), BookingStatus::Draft),
        Booking::new("c", d(2024, 3, 6), d(2024, 3, 6), BookingStatus::Draft).with_resource("ghost"),
    ];
    let rows = group_by_row(projector.project(&bookings), &resources);

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].key, RowKey::Resource("t1".into()));
    assert_eq!(rows[0].bookings.len(), 1);
    assert_eq!(rows[1].key, RowKey::Resource("t2".into()));
    assert!(rows[1].bookings.is_empty());
    assert_eq!(rows[2].key, RowKey::Unassigned);
    let unassigned: Vec<&str> = rows[2].bookings.iter().map(|b| b.booking_id.as_str()).collect();
    assert_eq!(unassigned, vec!["b", "c"]);
}

#[test]
fn unassigned_row_is_omitted_when_empty() {
    let window = ViewWindow::resolve(d(2024, 3, 4), Granularity::Week).unwrap();
    let statuses = StatusFilter::all();
    let resources = trainers();
    let projector = IntervalProjector::new(&window, &statuses, &resources);

    let rows = group_by_row(
        projector.project(&[planned("a", d(2024, 3, 4), d(2024, 3, 4))]),
        &resources,
    );
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.key != RowKey::Unassigned));
}
