use super::layout::month_layout;
use crate::model::month::MonthContext;
use std::collections::BTreeSet;

/// Suffix drawn after a day number that has at least one event.
pub const EVENT_MARKER: char = '*';

const TOP_BORDER: &str = "+----------------------------------+";
const ROW_BORDER: &str = "+----+----+----+----+----+----+----+";
const WEEKDAY_HEADER: &str = "| Su | Mo | Tu | We | Th | Fr | Sa |";
const HEADER_WIDTH: usize = 32;

/// `no events`, `1 event` or `N events`.
pub fn format_event_count(count: usize) -> String {
    match count {
        0 => "no events".to_string(),
        1 => "1 event".to_string(),
        n => format!("{n} events"),
    }
}

/// Renders the month grid. Days listed in `days_with_events` carry
/// [`EVENT_MARKER`]; `event_count` only feeds the header.
///
/// Every line, including the last border, ends with `\n`.
pub fn render(
    context: MonthContext,
    days_with_events: &BTreeSet<u32>,
    event_count: usize,
) -> String {
    let layout = month_layout(context);
    let days_in_month = i64::from(layout.days_in_month);
    let mut out = String::new();

    let title = format!("{} ({})", context.label(), format_event_count(event_count));
    push_line(&mut out, TOP_BORDER);
    push_line(&mut out, &format!("| {title:<HEADER_WIDTH$} |"));
    push_line(&mut out, ROW_BORDER);
    push_line(&mut out, WEEKDAY_HEADER);
    push_line(&mut out, ROW_BORDER);

    let first = 1 - i64::from(layout.first_weekday);
    let last = days_in_month + i64::from(layout.trailing_blanks);
    let mut position_in_week = 0;
    for counter in first..=last {
        out.push_str("| ");
        if (1..=days_in_month).contains(&counter) {
            out.push_str(&format!("{counter:>2}"));
            let marked = u32::try_from(counter).is_ok_and(|day| days_with_events.contains(&day));
            out.push(if marked { EVENT_MARKER } else { ' ' });
        } else {
            out.push_str("   ");
        }

        position_in_week += 1;
        if position_in_week == 7 {
            out.push_str("|\n");
            position_in_week = 0;
        }
    }

    push_line(&mut out, ROW_BORDER);
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
