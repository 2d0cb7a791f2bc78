use chrono::{NaiveDate, NaiveTime};
use planning_board::{
    BoardConfig, BoardDataset, BoardQuery, Booking, BookingStatus, ConfigError, CsvDataset,
    DatasetSource, Granularity, JsonDataset, PersistenceError, Resource, RowColor, StatusFilter,
    compute_layout, load_bookings_from_csv, load_dataset_from_json, load_resources_from_csv,
    save_dataset_to_json, save_layout_to_json,
};
use std::fs;
use tempfile::tempdir;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_dataset() -> BoardDataset {
    BoardDataset::new(
        vec![Resource::new("t1", "Alice"), Resource::new("t2", "Bruno")],
        vec![
            Booking::new("s1", d(2024, 3, 4), d(2024, 3, 6), BookingStatus::Planned)
                .with_resource("t1")
                .with_title("First aid")
                .with_times(
                    NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
                ),
            Booking::new("s2", d(2024, 3, 5), d(2024, 3, 5), BookingStatus::Draft),
        ],
    )
}

#[test]
fn json_dataset_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("board.json");
    let dataset = sample_dataset();

    save_dataset_to_json(&dataset, &path).unwrap();
    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"start_time\": \"09:00\""));
    assert!(raw.contains("\"status\": \"planned\""));

    let loaded = load_dataset_from_json(&path).unwrap();
    assert_eq!(loaded, dataset);

    let via_source = JsonDataset { path: path.clone() }.load_dataset().unwrap();
    assert_eq!(via_source, dataset);
}

#[test]
fn json_dataset_rejects_duplicate_booking_ids() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dupes.json");
    fs::write(
        &path,
        r#"{
            "resources": [{"id": "t1", "display_name": "Alice"}],
            "bookings": [
                {"id": "s1", "start_date": "2024-03-04", "end_date": "2024-03-04", "status": "planned"},
                {"id": "s1", "start_date": "2024-03-05", "end_date": "2024-03-05", "status": "planned"}
            ]
        }"#,
    )
    .unwrap();

    match load_dataset_from_json(&path) {
        Err(PersistenceError::Validation(err)) => {
            assert!(err.to_string().contains("duplicate booking id s1"))
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn json_booking_accepts_missing_optional_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sparse.json");
    fs::write(
        &path,
        r#"{"bookings": [{"id": "s1", "status": "in_progress", "start_time": ""}]}"#,
    )
    .unwrap();

    let loaded = load_dataset_from_json(&path).unwrap();
    let booking = &loaded.bookings[0];
    assert_eq!(booking.status, BookingStatus::InProgress);
    assert!(booking.start_date.is_none());
    assert!(booking.start_time.is_none());
    assert!(loaded.resources.is_empty());
}

#[test]
fn csv_files_load_into_dataset() {
    let dir = tempdir().unwrap();
    let bookings_path = dir.path().join("sessions.csv");
    let resources_path = dir.path().join("trainers.csv");
    fs::write(
        &bookings_path,
        "id,resource_id,title,start_date,end_date,start_time,end_time,status\n\
         s1,t2,Welding,2024-03-04,2024-03-06,08:30,16:00,planned\n\
         s2,,Safety,2024-03-05,,,,Draft\n",
    )
    .unwrap();
    fs::write(
        &resources_path,
        "id,display_name,sort_key\nt1,Zoe,\nt2,Adam,\nt3,Marc,0-first\n",
    )
    .unwrap();

    let bookings = load_bookings_from_csv(&bookings_path).unwrap();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0].start_time, NaiveTime::from_hms_opt(8, 30, 0));
    assert_eq!(bookings[1].resource_id, None);
    assert_eq!(bookings[1].end_date, None);
    assert_eq!(bookings[1].status, BookingStatus::Draft);

    let resources = load_resources_from_csv(&resources_path).unwrap();
    assert_eq!(resources[0].sort_key, "zoe");

    let dataset = CsvDataset {
        bookings: bookings_path,
        resources: resources_path,
    }
    .load_dataset()
    .unwrap();
    let order: Vec<&str> = dataset.resources.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(order, vec!["t3", "t2", "t1"]);
}

#[test]
fn csv_rejects_bad_status_and_time() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(
        &path,
        "id,resource_id,title,start_date,end_date,start_time,end_time,status\n\
         s1,t1,,2024-03-04,2024-03-04,,,archived\n",
    )
    .unwrap();
    let err = load_bookings_from_csv(&path).unwrap_err();
    assert!(err.to_string().contains("unknown status 'archived'"));

    fs::write(
        &path,
        "id,resource_id,title,start_date,end_date,start_time,end_time,status\n\
         s1,t1,,2024-03-04,2024-03-04,9h,,planned\n",
    )
    .unwrap();
    let err = load_bookings_from_csv(&path).unwrap_err();
    assert!(err.to_string().contains("invalid time '9h'"));
}

#[test]
fn layout_export_contains_renderer_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("layout.json");
    let dataset = sample_dataset();
    let query = BoardQuery::new(d(2024, 3, 4), Granularity::Week, d(2024, 3, 4))
        .with_statuses(StatusFilter::all());
    let layout = compute_layout(
        &dataset.bookings,
        &dataset.resources,
        &query,
        &BoardConfig::default(),
    )
    .unwrap();

    save_layout_to_json(&layout, &path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["window"]["granularity"], "week");
    assert_eq!(value["window"]["columns"].as_array().unwrap().len(), 7);
    let first = &value["rows"][0]["lanes"][0][0];
    assert_eq!(first["booking_id"], "s1");
    assert_eq!(first["column_start"], 0);
    assert_eq!(first["span"], 3);
    assert_eq!(first["lane"], 0);
    assert_eq!(first["color_hex"], BoardConfig::default().palette[0]);
    assert_eq!(value["rows"][2]["key"]["kind"], "unassigned");
    assert!(value["today_marker"].is_number());
}

#[test]
fn config_defaults_and_validation() {
    let config = BoardConfig::default();
    assert!(config.validate().is_ok());
    assert!(!config.status_filter().allows(BookingStatus::Cancelled));
    assert_eq!(config.color_hex(RowColor::Palette(8)), config.palette[0]);

    let partial = BoardConfig::from_json_str(r##"{"palette": ["#111111", "#222222"]}"##).unwrap();
    assert_eq!(partial.palette_size(), 2);
    assert_eq!(partial.unassigned_label, "Unassigned");

    let empty = BoardConfig::from_json_str(r#"{"palette": []}"#);
    assert!(matches!(empty, Err(ConfigError::Invalid(_))));

    let clash = BoardConfig::from_json_str(
        r##"{"palette": ["#9ca3af"], "unassigned_color": "#9ca3af"}"##,
    );
    assert!(matches!(clash, Err(ConfigError::Invalid(_))));

    let negative = BoardConfig::from_json_str(
        r#"{"tooltip": {"width": -1.0, "height": 10.0, "min_margin": 0.0, "gap": 0.0}}"#,
    );
    assert!(matches!(negative, Err(ConfigError::Invalid(_))));
}

#[test]
fn config_file_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("board.json");
    fs::write(&path, r#"{"default_statuses": ["planned", "cancelled"]}"#).unwrap();
    let config = BoardConfig::load(&path).unwrap();
    let filter = config.status_filter();
    assert!(filter.allows(BookingStatus::Cancelled));
    assert!(!filter.allows(BookingStatus::Draft));
}
