use chrono::{NaiveDate, NaiveDateTime};
use eventcal_core::calendar::{days_in_month, EVENT_MARKER};
use eventcal_core::db::open_db_in_memory;
use eventcal_core::{month_layout, render, MonthCalendar, MonthContext, SqliteEventRepository};
use std::collections::BTreeSet;

const GRID_WIDTH: usize = 36;
const HEADER_LINES: usize = 5;

fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Week rows of a rendered grid, without header and bottom border.
fn week_rows(grid: &str) -> Vec<&str> {
    let lines: Vec<&str> = grid.lines().collect();
    lines[HEADER_LINES..lines.len() - 1].to_vec()
}

fn cells(row: &str) -> Vec<&str> {
    row.trim_end_matches('|').split('|').skip(1).collect()
}

/// Returns the cell text of `day`, e.g. ` 5*` or `29 `.
fn day_cell(grid: &str, day: u32) -> String {
    let wanted = format!("{day:>2}");
    week_rows(grid)
        .into_iter()
        .flat_map(cells)
        .map(|cell| cell[1..].to_string())
        .find(|cell| cell[..2] == wanted)
        .unwrap()
}

#[test]
fn every_month_renders_full_weeks_with_each_day_once() {
    for year in [1900, 2000, 2023, 2024, 2025, 2100] {
        for month in 1..=12 {
            let context = MonthContext::new(year, month).unwrap();
            let grid = render(context, &BTreeSet::new(), 0);

            assert!(grid.lines().all(|line| line.chars().count() == GRID_WIDTH));

            let rows = week_rows(&grid);
            assert_eq!(rows.len() as u32, month_layout(context).rows());

            let mut numbered = 0;
            for row in rows {
                let row_cells = cells(row);
                assert_eq!(row_cells.len(), 7, "{year}-{month}: {row}");
                numbered += row_cells
                    .iter()
                    .filter(|cell| !cell.trim().is_empty())
                    .count() as u32;
            }
            assert_eq!(numbered, days_in_month(year, month), "{year}-{month}");
        }
    }
}

#[test]
fn february_2024_has_five_rows_ending_with_day_29() {
    let context = MonthContext::new(2024, 2).unwrap();
    let layout = month_layout(context);
    assert_eq!(layout.first_weekday, 4);
    assert_eq!(layout.days_in_month, 29);

    let grid = render(context, &BTreeSet::new(), 0);
    let rows = week_rows(&grid);
    assert_eq!(rows.len(), 5);
    assert!(rows[4].contains(" 29 "));
    assert_eq!(rows[0], "|    |    |    |    |  1 |  2 |  3 |");
    assert!(rows[4].ends_with("|    |    |"));
}

#[test]
fn single_digit_days_are_space_padded() {
    let context = MonthContext::new(2024, 2).unwrap();
    let grid = render(context, &BTreeSet::new(), 0);
    assert!(grid.contains("|  4 |"));
    assert!(!grid.contains("04"));
}

#[test]
fn empty_month_reports_no_events_and_no_markers() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::new(&conn);
    let calendar = MonthCalendar::open(&repo, 2024, 6).unwrap();

    let grid = calendar.render_calendar();
    assert!(grid.lines().nth(1).unwrap().contains("June 2024 (no events)"));
    assert!(!grid.contains(EVENT_MARKER));
}

#[test]
fn standup_is_marked_until_deleted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::new(&conn);
    let mut calendar = MonthCalendar::open(&repo, 2024, 2).unwrap();

    let standup = calendar
        .add_event("Standup", Some(""), at(2024, 2, 5, 9))
        .unwrap();
    assert_eq!(calendar.events()[&5].len(), 1);

    let grid = calendar.render_calendar();
    assert!(grid.contains("February 2024 (1 event)"));
    assert_eq!(day_cell(&grid, 5), " 5*");
    assert_eq!(grid.matches(EVENT_MARKER).count(), 1);

    calendar.delete_event(&standup).unwrap();
    assert!(!calendar.events().contains_key(&5));

    let grid = calendar.render_calendar();
    assert!(grid.contains("February 2024 (no events)"));
    assert_eq!(day_cell(&grid, 5), " 5 ");
}

#[test]
fn several_events_on_one_day_share_one_marker() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::new(&conn);
    let mut calendar = MonthCalendar::open(&repo, 2024, 2).unwrap();

    calendar.add_event("a", None, at(2024, 2, 29, 8)).unwrap();
    calendar.add_event("b", None, at(2024, 2, 29, 9)).unwrap();

    let grid = calendar.render_calendar();
    assert!(grid.contains("(2 events)"));
    assert_eq!(day_cell(&grid, 29), "29*");
    assert_eq!(grid.matches(EVENT_MARKER).count(), 1);
}
