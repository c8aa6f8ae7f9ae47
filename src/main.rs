mod app;
mod calendar;
mod dates;
mod goto;
mod help;
mod month;
mod selection;
mod theme;
use crate::app::App;
use crate::calendar::PickerState;
use crate::dates::parse_date;
use crate::selection::RangeReport;
use anyhow::Context;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use time::{Date, OffsetDateTime};
use tracing_appender::{non_blocking::WorkerGuard, rolling::RollingFileAppender, rolling::Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter directives
const LOG_FILTER_VAR: &str = "WEEKDAY_PICKER_LOG";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        show_presets: bool,
        exit_on_select: bool,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut show_presets = true;
        let mut exit_on_select = false;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("no-presets") => show_presets = false,
                Arg::Short('1') | Arg::Long("exit-on-select") => exit_on_select = true,
                Arg::Long("log") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match parse_date(&value) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            date,
            show_presets,
            exit_on_select,
            log_file,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                show_presets,
                exit_on_select,
                log_file,
            } => {
                // Must be called before any other threads are started
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let _guard = log_file.as_deref().map(init_logging).transpose()?;
                tracing::info!(%today, show_presets, exit_on_select, "Starting weekday-picker");
                let mut picker = PickerState::new(today, show_presets);
                if let Some(date) = date {
                    picker = picker.start_date(date);
                }
                let reports = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(picker, exit_on_select)
                        .run(&mut terminal)
                        .context("failed to run calendar")
                })?;
                print_reports(&reports);
                Ok(())
            }
            Command::Help => {
                println!("Usage: weekday-picker [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Pick a range of weekdays on a terminal calendar and list the weekends");
                println!("inside it.  Each completed range is printed on exit.");
                println!();
                println!("Options:");
                println!("      --no-presets      Hide the \"last N days\" quick ranges");
                println!("  -1, --exit-on-select  Exit as soon as a range is picked");
                println!("      --log <FILE>      Write logs to FILE (filter with ${LOG_FILTER_VAR})");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = crossterm::execute!(std::io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    // Restore the terminal even if disabling mouse capture fails
    let disabled = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    let r = r?;
    disabled.context("failed to disable mouse capture")?;
    Ok(r)
}

fn init_logging(path: &Path) -> anyhow::Result<WorkerGuard> {
    let file_name = path
        .file_name()
        .and_then(OsStr::to_str)
        .with_context(|| format!("invalid log file name: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();
    Ok(guard)
}

fn print_reports(reports: &[RangeReport]) {
    for report in reports {
        println!("{report}");
    }
}
