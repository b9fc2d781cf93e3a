//! `eventcal` binary: interactive month calendar over a SQLite event store.

mod app;
mod config;
mod prompt;

use config::Config;
use eventcal_core::db::open_db;
use eventcal_core::{init_logging, SqliteEventRepository};
use log::{error, info};
use prompt::Prompter;
use std::io::{self, ErrorKind};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.log_level, &config.log_dir.to_string_lossy()) {
        eprintln!("warning: logging disabled: {err}");
    }

    info!(
        "event=cli_start module=cli status=ok core_version={}",
        eventcal_core::core_version()
    );

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            println!("Error: could not connect to the database.");
            println!(
                "Check that `{}` is a writable location and that the configuration details are correct ({err})",
                config.db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };

    let repo = SqliteEventRepository::new(&conn);
    let prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
    let result = app::start(&repo, prompter).and_then(|mut app| {
        app.run()?;
        Ok(app.calendar().event_count())
    });

    match result {
        Ok(events_in_view) => {
            info!("event=app_exit module=cli status=ok events_in_view={events_in_view}");
            ExitCode::SUCCESS
        }
        Err(err) if is_closed_input(&err) => {
            info!("event=app_exit module=cli status=ok reason=input_closed");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn is_closed_input(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|io_err| io_err.kind() == ErrorKind::UnexpectedEof)
}
