use chrono::{Local, NaiveDate};
use planning_board::{
    AnchorRect, BoardConfig, BoardDataset, BoardLayout, BoardView, BookingStatus, CsvDataset,
    DatasetSource, Granularity, JsonDataset, LayoutCache, LayoutError, ViewWindow, position_tooltip,
    save_layout_to_json,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

const CELL_MIN_WIDTH: usize = 3;

/// `PLANNING_BOARD_TODAY` pins "today" for reproducible sessions.
fn current_date() -> NaiveDate {
    std::env::var("PLANNING_BOARD_TODAY")
        .ok()
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
        .unwrap_or_else(|| Local::now().date_naive())
}

fn window_title(window: &ViewWindow) -> String {
    format!(
        "{} view: {} .. {}",
        window.granularity, window.start, window.end
    )
}

fn render_layout_as_text(layout: &BoardLayout) -> String {
    let labels: Vec<String> = layout.window.columns.iter().map(|c| c.label()).collect();
    let row_width = layout
        .rows
        .iter()
        .map(|row| row.label.len())
        .max()
        .unwrap_or(0)
        .max("Row".len());
    let cell_widths: Vec<usize> = labels
        .iter()
        .map(|label| label.len().max(CELL_MIN_WIDTH))
        .collect();

    let mut sep = String::new();
    sep.push('+');
    sep.push_str(&"-".repeat(row_width + 2));
    sep.push('+');
    sep.push_str(&"-".repeat(6));
    sep.push('+');
    for w in &cell_widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&window_title(&layout.window));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    out.push_str(&format!("| {:<row_width$} | Lane |", "Row"));
    for (label, w) in labels.iter().zip(cell_widths.iter().copied()) {
        out.push_str(&format!(" {label:<w$} |"));
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    for row in &layout.rows {
        if row.lanes.is_empty() {
            out.push_str(&format!("| {:<row_width$} | {:>4} |", row.label, "-"));
            for &w in &cell_widths {
                out.push_str(&format!(" {:<w$} |", ""));
            }
            out.push('\n');
            continue;
        }
        for (lane_idx, lane) in row.lanes.iter().enumerate() {
            let label = if lane_idx == 0 { row.label.as_str() } else { "" };
            out.push_str(&format!("| {label:<row_width$} | {lane_idx:>4} |"));
            for (col, &w) in cell_widths.iter().enumerate() {
                let cell = lane
                    .iter()
                    .find(|placed| {
                        placed.projection.column_start <= col && col < placed.projection.column_end()
                    })
                    .map(|placed| {
                        if placed.projection.column_start == col {
                            placed.projection.booking_id.chars().take(w).collect::<String>()
                        } else {
                            "=".repeat(w)
                        }
                    })
                    .unwrap_or_default();
                out.push_str(&format!(" {cell:<w$} |"));
            }
            out.push('\n');
        }
    }
    out.push_str(&sep);
    out.push('\n');

    for row in &layout.rows {
        for placed in row.bookings() {
            let p = &placed.projection;
            out.push_str(&format!(
                "  {} [{}] row={} col={} span={} lane={} status={}\n",
                p.booking_id,
                p.title.as_deref().unwrap_or(""),
                row.key,
                p.column_start,
                p.span,
                p.lane,
                p.status
            ));
        }
    }
    match layout.today_marker {
        Some(position) => out.push_str(&format!("today marker: {position:.1}%\n")),
        None => out.push_str("today marker: none\n"),
    }
    out
}

/// A failed move leaves the view where it was.
fn print_window(result: Result<ViewWindow, LayoutError>) {
    match result {
        Ok(window) => println!("{}", window_title(&window)),
        Err(e) => println!("{e}"),
    }
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Render the board for the current view\n  load json <path>                   Load resources and bookings from a JSON dataset\n  load csv <bookings> <resources>    Load bookings and resources from CSV files\n  view <week|month|year>             Change granularity (keeps the reference date)\n  goto <YYYY-MM-DD>                  Move the reference date\n  next | prev                        Shift by one week/month/year\n  today                              Jump back to today\n  status <name> <on|off>             Show or hide a booking status\n  status show                        List enabled statuses\n  colors                             List resource colors\n  tooltip <x> <y> <w> <h> <width>    Position a tooltip for an anchor rect\n  export <path>                      Write the current layout as JSON\n  quit|exit                          Exit"
    );
}

fn print_colors(dataset: &BoardDataset, config: &BoardConfig) {
    let colors = planning_board::ColorAssignment::new(&dataset.resources, config.palette_size());
    for resource in &dataset.resources {
        let color = colors
            .index_of(&resource.id)
            .map(planning_board::RowColor::Palette)
            .unwrap_or(planning_board::RowColor::Unassigned);
        println!(
            "  {:<24} {}",
            resource.display_name,
            config.color_hex(color)
        );
    }
    println!(
        "  {:<24} {}",
        config.unassigned_label,
        config.color_hex(planning_board::RowColor::Unassigned)
    );
}

fn load_config() -> BoardConfig {
    match std::env::var("PLANNING_BOARD_CONFIG") {
        Ok(path) => match BoardConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring config {path}: {e}");
                BoardConfig::default()
            }
        },
        Err(_) => BoardConfig::default(),
    }
}

fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let config = load_config();
    let mut dataset = BoardDataset::default();
    let mut view = BoardView::new(current_date(), Granularity::Week).with_statuses(config.status_filter());
    let mut cache = LayoutCache::new();

    println!("Planning Board (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => match cache.get_or_compute(
                &dataset.bookings,
                &dataset.resources,
                &view.query(current_date()),
                &config,
            ) {
                Ok(layout) => println!("{}", render_layout_as_text(&layout)),
                Err(e) => println!("{e}"),
            },
            "load" => {
                let source: Option<Box<dyn DatasetSource>> = match (parts.next(), parts.next(), parts.next()) {
                    (Some("json"), Some(path), None) => Some(Box::new(JsonDataset {
                        path: PathBuf::from(path),
                    })),
                    (Some("csv"), Some(bookings), Some(resources)) => Some(Box::new(CsvDataset {
                        bookings: PathBuf::from(bookings),
                        resources: PathBuf::from(resources),
                    })),
                    _ => None,
                };
                match source {
                    Some(source) => match source.load_dataset() {
                        Ok(loaded) => {
                            println!(
                                "Loaded {} resources and {} bookings.",
                                loaded.resources.len(),
                                loaded.bookings.len()
                            );
                            dataset = loaded;
                        }
                        Err(e) => println!("Error loading dataset: {e}"),
                    },
                    None => println!("Usage: load json <path> | load csv <bookings> <resources>"),
                }
            }
            "view" => match parts.next().map(Granularity::from_str) {
                Some(Ok(granularity)) => print_window(view.set_granularity(granularity)),
                Some(Err(e)) => println!("{e}"),
                None => println!("Usage: view <week|month|year>"),
            },
            "goto" => match parts.next() {
                Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                    Ok(date) => print_window(view.goto(date)),
                    Err(_) => println!("Invalid date (expected YYYY-MM-DD)"),
                },
                None => println!("Usage: goto <YYYY-MM-DD>"),
            },
            "next" => print_window(view.next()),
            "prev" => print_window(view.prev()),
            "today" => print_window(view.today(current_date())),
            "status" => match (parts.next(), parts.next()) {
                (Some("show"), None) => {
                    let enabled = view
                        .statuses
                        .iter()
                        .map(|s| s.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    println!("Enabled statuses: {enabled}");
                }
                (Some(name), Some(flag @ ("on" | "off"))) => match BookingStatus::from_str(name) {
                    Ok(status) => {
                        view.set_status(status, flag == "on");
                        println!("Status {status} {flag}.");
                    }
                    Err(e) => println!("{e}"),
                },
                _ => println!("Usage: status <name> <on|off> | status show"),
            },
            "colors" => print_colors(&dataset, &config),
            "tooltip" => {
                let values: Vec<f64> = parts.filter_map(|p| p.parse::<f64>().ok()).collect();
                if let [x, y, width, height, container_width] = values.as_slice() {
                    let anchor = AnchorRect {
                        x: *x,
                        y: *y,
                        width: *width,
                        height: *height,
                    };
                    let position = position_tooltip(anchor, *container_width, config.tooltip);
                    println!(
                        "Tooltip at x={:.1} y={:.1} ({:?})",
                        position.x, position.y, position.placement
                    );
                } else {
                    println!("Usage: tooltip <x> <y> <w> <h> <container_width>");
                }
            }
            "export" => match parts.next() {
                Some(path) => match cache.get_or_compute(
                    &dataset.bookings,
                    &dataset.resources,
                    &view.query(current_date()),
                    &config,
                ) {
                    Ok(layout) => match save_layout_to_json(&layout, path) {
                        Ok(()) => println!("Layout written to {path}"),
                        Err(e) => println!("Error writing layout: {e}"),
                    },
                    Err(e) => println!("{e}"),
                },
                None => println!("Usage: export <path>"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
