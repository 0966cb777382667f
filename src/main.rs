mod app;
mod domain;
mod input;
mod notifications;
mod persistence;
mod report;
mod ticker;
mod ui;

use app::AppState;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{log_rows, system_clock, Clock, Workday};
use persistence::{
    discard_workday, ensure_data_dir, init_local_data_dir, list_archived_workdays,
    load_archived_workday, load_settings, load_workday, log_file, parse_archive_key,
    restore_workday, settings_file,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "teamlead")]
#[command(version, about = "Track how a workday is spent across tasks, one context switch at a time", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .teamlead directory in the current directory
    Init,
    /// Print the summary of the current or an archived workday
    Summary {
        /// Archived workday as YYYY-MM-DD (latest of that day) or YYYY-MM-DD-N. Defaults to the current workday.
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Print the task log of the current or an archived workday, newest first
    Log {
        /// Archived workday as YYYY-MM-DD (latest of that day) or YYYY-MM-DD-N. Defaults to the current workday.
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Write a markdown report for the current or an archived workday
    Report {
        /// Archived workday as YYYY-MM-DD (latest of that day) or YYYY-MM-DD-N. Defaults to the current workday.
        #[arg(short, long)]
        date: Option<String>,
        /// Output file path. Defaults to report-YYYY-MM-DD[-N].md in the data directory
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List archived workdays
    History,
    /// Discard the current workday without archiving it
    Reset,
}

/// Load the workday a command refers to: an archive when a date is given, else the preserved one
fn load_requested_workday(dir: &Path, date: Option<String>, clock: Arc<dyn Clock>) -> Result<Workday> {
    match date {
        Some(key) => {
            let (date, sequence) = parse_archive_key(&key)
                .with_context(|| format!("Invalid date '{}'. Use YYYY-MM-DD or YYYY-MM-DD-N", key))?;
            load_archived_workday(dir, date, sequence, clock)?
                .with_context(|| format!("No archived workday for {}", key))
        }
        None => load_workday(dir, clock)?.context("No workday in progress"),
    }
}

/// Send log output to teamlead.log so it never draws over the terminal UI
fn init_logging(dir: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file(dir))
        .with_context(|| format!("Failed to open log file in {}", dir.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = init_local_data_dir()?;
            println!("Initialized teamlead directory: {}", data_dir.display());
            println!();
            println!("Teamlead will now use this local directory for workdays and reports.");
            println!("Run 'teamlead' to start tracking.");
            Ok(())
        }
        Some(Commands::Summary { date }) => {
            let dir = ensure_data_dir()?;
            let workday = load_requested_workday(&dir, date, system_clock())?;
            let summary = report::WorkdaySummary::from_workday(&workday);
            print!("{}", report::render_report(&summary, workday.started_at().date_naive()));
            Ok(())
        }
        Some(Commands::Log { date }) => {
            let dir = ensure_data_dir()?;
            let workday = load_requested_workday(&dir, date, system_clock())?;
            let rows = log_rows(&workday);
            if rows.is_empty() {
                println!("No concluded iterations.");
            }
            for row in rows {
                println!("[{:02}] {}  {:<8}  {}", row.sequence, row.started, row.task_name, row.duration);
            }
            Ok(())
        }
        Some(Commands::Report { date, output }) => {
            let dir = ensure_data_dir()?;
            let workday = load_requested_workday(&dir, date, system_clock())?;
            let output_path = output.map(std::path::PathBuf::from);
            let report_path = report::generate_report(&workday, output_path)?;
            println!("Report generated: {}", report_path.display());
            Ok(())
        }
        Some(Commands::History) => {
            let dir = ensure_data_dir()?;
            let archives = list_archived_workdays(&dir)?;
            if archives.is_empty() {
                println!("No archived workdays in {}", dir.display());
            }
            for path in archives {
                println!("{}", path.display());
            }
            Ok(())
        }
        Some(Commands::Reset) => {
            let dir = ensure_data_dir()?;
            if discard_workday(&dir)? {
                println!("Current workday discarded.");
            } else {
                println!("No workday in progress.");
            }
            Ok(())
        }
        None => run_tui(),
    }
}

fn run_tui() -> Result<()> {
    let data_dir = ensure_data_dir()?;
    init_logging(&data_dir)?;
    log::info!("Using data directory {}", data_dir.display());

    let settings = load_settings(settings_file(&data_dir)).unwrap_or_else(|e| {
        log::warn!("Using default settings: {:#}", e);
        Default::default()
    });

    // A corrupt preserved workday is an error rather than silently replaced
    let workday = restore_workday(&data_dir, system_clock())?;

    let mut app = AppState::new(workday, settings, Some(data_dir));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Save on exit; a running iteration is preserved and resumes next start
    if let Err(e) = app.save() {
        log::warn!("Failed to save workday: {:#}", e);
        eprintln!("Error saving workday: {}", e);
    }

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    terminal.draw(|f| ui::render(f, app))?;

    loop {
        let mut redraw = false;

        if event::poll(ticker::poll_duration(app.settings.refresh_rate))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    if input::handle_key(app, key)? {
                        return Ok(());
                    }
                    redraw = true;
                }
            }
        }

        if app.tick() {
            app.check_limits();
            redraw = true;
        }

        // Autosave after any change
        if app.needs_save {
            if let Err(e) = app.save() {
                log::warn!("Autosave failed: {:#}", e);
                // Retried on the next change
                app.needs_save = false;
            }
        }

        if redraw {
            terminal.draw(|f| ui::render(f, app))?;
        }
    }
}
