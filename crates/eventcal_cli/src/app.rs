//! Interactive menu loop over a [`MonthCalendar`].
//!
//! # Responsibility
//! - Translate menu choices into month-calendar calls.
//! - Report per-action store failures and keep the session alive.
//!
//! # Invariants
//! - Only I/O errors end the loop early; calendar errors are shown and the
//!   menu is redrawn.

use crate::prompt::Prompter;
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use eventcal_core::calendar::days_in_month;
use eventcal_core::{CalendarError, Event, EventRepository, MonthCalendar, SUPPORTED_YEARS};
use log::info;
use std::io::{BufRead, Write};

const CLEAR_SCREEN_LINES: usize = 50;
const MENU: &str = "\
OPTIONS:
  1) View an event
  2) Add an event
  3) Delete an event
  4) Change the month
  5) Quit
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    View,
    Add,
    Delete,
    ChangeMonth,
    Quit,
}

impl MenuChoice {
    fn from_option(option: i64) -> Option<Self> {
        match option {
            1 => Some(Self::View),
            2 => Some(Self::Add),
            3 => Some(Self::Delete),
            4 => Some(Self::ChangeMonth),
            5 => Some(Self::Quit),
            _ => None,
        }
    }
}

pub struct App<Repo: EventRepository, In, Out> {
    calendar: MonthCalendar<Repo>,
    prompter: Prompter<In, Out>,
}

/// Asks for the initial month and year, then loads that month.
///
/// Keeps asking while the store rejects the load.
pub fn start<Repo, In, Out>(
    repo: Repo,
    mut prompter: Prompter<In, Out>,
) -> Result<App<Repo, In, Out>>
where
    Repo: EventRepository + Copy,
    In: BufRead,
    Out: Write,
{
    loop {
        let (year, month) = ask_month_and_year(&mut prompter)?;
        match MonthCalendar::open(repo, year, month) {
            Ok(calendar) => return Ok(App { calendar, prompter }),
            Err(err) => report(&mut prompter, &err)?,
        }
    }
}

impl<Repo: EventRepository, In: BufRead, Out: Write> App<Repo, In, Out> {
    pub fn calendar(&self) -> &MonthCalendar<Repo> {
        &self.calendar
    }

    /// Runs the menu until the user quits.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let out = self.prompter.output();
            for _ in 0..CLEAR_SCREEN_LINES {
                writeln!(out)?;
            }
            write!(out, "{}", self.calendar.render_calendar())?;
            writeln!(out)?;
            writeln!(out, "{MENU}")?;

            let option = self.prompter.int_in(">> ", 1..=5)?;
            writeln!(self.prompter.output())?;

            match MenuChoice::from_option(option) {
                Some(MenuChoice::View) => self.view_event()?,
                Some(MenuChoice::Add) => self.add_event()?,
                Some(MenuChoice::Delete) => self.delete_event()?,
                Some(MenuChoice::ChangeMonth) => self.change_month()?,
                Some(MenuChoice::Quit) | None => {
                    info!("event=app_quit module=cli status=ok");
                    return Ok(());
                }
            }
            self.prompter.pause()?;
        }
    }

    fn view_event(&mut self) -> Result<()> {
        match self.pick_event()? {
            Some(event) => {
                let out = self.prompter.output();
                writeln!(out, "\n-----\n")?;
                write!(out, "{}", event.details())?;
            }
            None => writeln!(self.prompter.output(), " - No events found for this month.")?,
        }
        Ok(())
    }

    fn add_event(&mut self) -> Result<()> {
        let name = self.prompter.read_line("Name of event >> ")?;
        let note = self.prompter.read_line("Set a note (optional) >> ")?;

        let (year, month) = (self.calendar.year(), self.calendar.month());
        let last_day = days_in_month(year, month);
        let day = self.prompter.int_in(
            &format!("Enter the day of month (1-{last_day}) >> "),
            1..=i64::from(last_day),
        )?;
        let hour = self
            .prompter
            .int_in("Enter the hour of day (0-23) >> ", 0..=23)?;

        let time = NaiveDate::from_ymd_opt(year, month, day as u32)
            .and_then(|date| date.and_hms_opt(hour as u32, 0, 0))
            .ok_or_else(|| anyhow!("{year}-{month}-{day} {hour}:00 is not a valid time"))?;

        match self.calendar.add_event(&name, Some(&note), time) {
            Ok(_) => writeln!(self.prompter.output(), "\n - Added event to calendar.")?,
            Err(err) => report(&mut self.prompter, &err)?,
        }
        Ok(())
    }

    fn delete_event(&mut self) -> Result<()> {
        let Some(target) = self.pick_event()? else {
            writeln!(self.prompter.output(), " - No events found for this month.")?;
            return Ok(());
        };

        let confirmed = self.prompter.yes_no(&format!(
            "Confirm deletion of event \"{}\" (y/n) >> ",
            target.name()
        ))?;
        if !confirmed {
            writeln!(self.prompter.output(), "\n - Event was not deleted.")?;
            return Ok(());
        }

        match self.calendar.delete_event(&target) {
            Ok(()) => writeln!(self.prompter.output(), "\n - Event deleted from calendar.")?,
            Err(err) => report(&mut self.prompter, &err)?,
        }
        Ok(())
    }

    fn change_month(&mut self) -> Result<()> {
        let (year, month) = ask_month_and_year(&mut self.prompter)?;
        if let Err(err) = self.calendar.change_month(year, month) {
            report(&mut self.prompter, &err)?;
        }
        Ok(())
    }

    /// Lists the month's events and returns the chosen one, or `None` when
    /// the month is empty.
    fn pick_event(&mut self) -> Result<Option<Event>> {
        let events: Vec<Event> = self.calendar.all_events().into_iter().cloned().collect();
        if events.is_empty() {
            return Ok(None);
        }

        let out = self.prompter.output();
        writeln!(out, "Events in {}: ", self.calendar.month_and_year_name())?;
        for (index, event) in events.iter().enumerate() {
            writeln!(out, "  {}) {} ({})", index + 1, event.name(), event.date_and_time())?;
        }

        let choice = self
            .prompter
            .int_in("\nPick which event >> ", 1..=events.len() as i64)?;
        Ok(events.into_iter().nth(choice as usize - 1))
    }
}

fn ask_month_and_year<In: BufRead, Out: Write>(
    prompter: &mut Prompter<In, Out>,
) -> Result<(i32, u32)> {
    let month = prompter.month("Enter a month >> ")?;
    let years = i64::from(*SUPPORTED_YEARS.start())..=i64::from(*SUPPORTED_YEARS.end());
    let year = prompter.int_in("Enter a year >> ", years)?;
    Ok((year as i32, month))
}

fn report<In: BufRead, Out: Write>(
    prompter: &mut Prompter<In, Out>,
    err: &CalendarError,
) -> Result<()> {
    writeln!(prompter.output(), "\n - Error: {err}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::start;
    use crate::prompt::Prompter;
    use eventcal_core::db::open_db_in_memory;
    use eventcal_core::SqliteEventRepository;
    use std::io::{Cursor, ErrorKind};

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output_of(prompter: &mut Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.output().clone()).unwrap()
    }

    #[test]
    fn add_then_delete_through_the_menu() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteEventRepository::new(&conn);
        let script = "february\n2024\n\
                      2\nStandup\n\n5\n0\n\n\
                      3\n1\ny\n\n\
                      5\n";

        let mut app = start(&repo, prompter(script)).unwrap();
        app.run().unwrap();

        assert!(app.calendar().events().is_empty());
        let output = output_of(&mut app.prompter);
        assert!(output.contains(" - Added event to calendar."));
        assert!(output.contains("|  5*|"));
        assert!(output.contains("  1) Standup (February 05 at 12:00 AM)"));
        assert!(output.contains(" - Event deleted from calendar."));
    }

    #[test]
    fn day_outside_selected_month_is_asked_again() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteEventRepository::new(&conn);
        let script = "February\n2023\n2\nReview\nroom 4\n29\n28\n14\n\n5\n";

        let mut app = start(&repo, prompter(script)).unwrap();
        app.run().unwrap();

        let events = app.calendar().events();
        assert_eq!(events.keys().copied().collect::<Vec<_>>(), vec![28]);
        assert_eq!(events[&28][0].note(), Some("room 4"));
    }

    #[test]
    fn view_and_delete_report_empty_month() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteEventRepository::new(&conn);
        let script = "june\n2024\n1\n\n3\n\n5\n";

        let mut app = start(&repo, prompter(script)).unwrap();
        app.run().unwrap();

        let output = output_of(&mut app.prompter);
        assert_eq!(output.matches(" - No events found for this month.").count(), 2);
        assert!(output.contains("June 2024 (no events)"));
    }

    #[test]
    fn year_outside_supported_range_is_asked_again() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteEventRepository::new(&conn);

        let app = start(&repo, prompter("march\n10000\n-1\n9999\n")).unwrap();

        assert_eq!(app.calendar().month_and_year_name(), "March 9999");
    }

    #[test]
    fn change_month_reloads_calendar() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteEventRepository::new(&conn);
        let script = "march\n2024\n4\nmay\n2025\n\n5\n";

        let mut app = start(&repo, prompter(script)).unwrap();
        app.run().unwrap();

        assert_eq!(app.calendar().month_and_year_name(), "May 2025");
    }

    #[test]
    fn closed_input_stops_the_loop() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteEventRepository::new(&conn);

        let mut app = start(&repo, prompter("july\n2024\n")).unwrap();
        let err = app.run().unwrap_err();
        let io_err = err.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io_err.kind(), ErrorKind::UnexpectedEof);
    }
}
