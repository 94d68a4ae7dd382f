//! netspeed: a terminal network speed meter with persistent usage totals.
//!
//! Features:
//!   - Live download/upload rate in KB/s, MB/s or Mbps
//!   - 60-second live graph
//!   - Day/week/month/year usage totals that survive restarts
//!   - Compact one-line mode and two themes
//!   - Headless `watch` output for status bars and scripts
//!
//! Keybindings: Press F1 or '?' for help.

mod app;
mod autostart;
mod color_scheme;
mod config;
mod history;
mod input;
mod logging;
mod system;
mod ticker;
mod ui;
mod units;
mod usage;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use color_scheme::ThemeId;
use config::NetspeedConfig;
use system::collector::Collector;
use system::sampler::SysinfoCounters;
use ticker::{StopHandle, Ticker, TICK_RATE_MS};
use units::{format_megabytes, SpeedUnit};
use usage::storage::{default_state_path, load_or_default};
use usage::{Direction, FileStore, MemoryStore, Period, UsageStore};

/// Longest wait for input before re-checking the tick schedule
const INPUT_POLL_MS: u64 = 50;

#[derive(Parser, Debug)]
#[command(name = "netspeed", version)]
#[command(about = "Network speed meter with day/week/month/year usage totals", long_about = None)]
struct Args {
    /// Usage state file (default: <data dir>/netspeed/usage_totals.bin)
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,

    /// Settings file (default: <config dir>/netspeed/netspeedrc)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Speed unit for this session: KB/s, MB/s or Mbps
    #[arg(long, global = true)]
    unit: Option<SpeedUnit>,

    /// Theme for this session: green or dark
    #[arg(long, global = true, value_parser = parse_theme)]
    theme: Option<ThemeId>,

    /// Keep usage totals in memory only
    #[arg(long, global = true)]
    no_persist: bool,

    /// Write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive meter (default)
    Run,
    /// Print one rate line per second
    Watch {
        /// Stop after this many ticks
        #[arg(short = 'n', long)]
        count: Option<u64>,
    },
    /// Print saved usage totals and exit
    Stats,
    /// Start netspeed when you log in
    Autostart {
        #[command(subcommand)]
        action: AutostartAction,
    },
}

#[derive(Subcommand, Debug)]
enum AutostartAction {
    /// Register the current executable
    Install,
    /// Remove the login entry
    Remove,
}

fn parse_theme(s: &str) -> Result<ThemeId, String> {
    ThemeId::from_key(s).ok_or_else(|| format!("unknown theme '{}' (expected green or dark)", s))
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn main() -> Result<()> {
    let mut args = Args::parse();

    if let Some(log_file) = &args.log_file {
        logging::init_logger(logging::level_from_verbosity(args.verbose), log_file)
            .context("Unable to open the log file.")?;
    }

    let config_path = args.config.clone().or_else(config::default_config_path);
    let mut cfg = config_path
        .as_deref()
        .map(NetspeedConfig::load)
        .unwrap_or_default();
    if let Some(unit) = args.unit {
        cfg.unit = unit;
    }
    if let Some(theme) = args.theme {
        cfg.theme = theme;
    }

    match args.command.take().unwrap_or(Command::Run) {
        Command::Run => run_tui(cfg, config_path, open_store(&args)?),
        Command::Watch { count } => run_watch(cfg, open_store(&args)?, count),
        Command::Stats => print_stats(open_store(&args)?.as_ref()),
        Command::Autostart { action } => manage_autostart(action),
    }
}

fn open_store(args: &Args) -> Result<Box<dyn UsageStore>> {
    if args.no_persist {
        return Ok(Box::new(MemoryStore::new()));
    }
    let path = args
        .state_file
        .clone()
        .or_else(default_state_path)
        .context("Unable to determine where to keep usage totals; pass --state-file.")?;
    let store = FileStore::new(path);
    info!("usage state file: {}", store.path().display());
    Ok(Box::new(store))
}

// ── Interactive meter ───────────────────────────────────────────────────

fn run_tui(cfg: NetspeedConfig, config_path: Option<PathBuf>, store: Box<dyn UsageStore>) -> Result<()> {
    let mut collector = Collector::new(Box::new(SysinfoCounters::new()), store, now());
    let mut app = App::new(&cfg, collector.usage().clone());
    app.config_path = config_path;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, &mut app, &mut collector);

    // Restore terminal
    close_session(&mut collector, || {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    })?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Flush usage totals, then run the fallible terminal `restore`.
///
/// The flush comes first so a failed teardown cannot lose the last tick.
fn close_session(collector: &mut Collector, restore: impl FnOnce() -> Result<()>) -> Result<()> {
    if let Err(e) = collector.shutdown(now()) {
        warn!("final usage flush failed: {}", e);
    }
    restore()
}

/// Main application loop
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    collector: &mut Collector,
) -> Result<()> {
    let mut ticker = Ticker::new(Duration::from_millis(TICK_RATE_MS));

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        let timeout = ticker
            .remaining(std::time::Instant::now())
            .min(Duration::from_millis(INPUT_POLL_MS));

        if event::poll(timeout)? {
            // Resize needs no handling: the next draw picks up the new size
            if let Event::Key(key) = event::read()? {
                // On Windows, crossterm fires Press and Release; only handle Press
                if key.kind == KeyEventKind::Press {
                    input::handle_input(app, key);
                    if app.should_quit {
                        return Ok(());
                    }
                }
            }
        }

        if ticker.is_due(std::time::Instant::now()) {
            collector.tick(app, now());
        }
    }
}

// ── Headless output ─────────────────────────────────────────────────────

fn run_watch(cfg: NetspeedConfig, store: Box<dyn UsageStore>, count: Option<u64>) -> Result<()> {
    let stop = StopHandle::new();
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || handler_stop.stop())
        .context("Unable to install the Ctrl-C handler.")?;

    let mut collector = Collector::new(Box::new(SysinfoCounters::new()), store, now());
    let mut app = App::new(&cfg, collector.usage().clone());
    let mut ticker = Ticker::new(Duration::from_millis(TICK_RATE_MS));

    let result = (|| -> Result<()> {
        let mut stdout = io::stdout().lock();
        let mut ticks = 0u64;
        while ticker.wait(&stop) {
            collector.tick(&mut app, now());
            writeln!(stdout, "{}  {}", app.down_label, app.up_label)?;
            stdout.flush()?;

            ticks += 1;
            if count.is_some_and(|n| ticks >= n) {
                break;
            }
        }
        Ok(())
    })();

    if let Err(e) = collector.shutdown(now()) {
        warn!("final usage flush failed: {}", e);
    }
    result
}

// ── One-shot commands ───────────────────────────────────────────────────

fn print_stats(store: &dyn UsageStore) -> Result<()> {
    let saved = load_or_default(store, now());
    let usage = saved.as_of(now());
    let mut stdout = io::stdout().lock();

    for direction in Direction::ALL {
        for period in Period::ALL {
            writeln!(
                stdout,
                "{} {}: {}",
                direction.label(),
                period.label(),
                format_megabytes(usage.bucket(direction, period))
            )?;
        }
    }
    writeln!(stdout, "Last update: {}", saved.last_reset.format("%Y-%m-%d %H:%M:%S"))?;
    Ok(())
}

fn manage_autostart(action: AutostartAction) -> Result<()> {
    match action {
        AutostartAction::Install => {
            let exe = std::env::current_exe().context("Unable to locate the netspeed executable.")?;
            let location = autostart::install(&exe).context("Unable to register autostart entry.")?;
            println!("Autostart entry written: {}", location);
        }
        AutostartAction::Remove => {
            if autostart::remove().context("Unable to remove autostart entry.")? {
                println!("Autostart entry removed.");
            } else {
                println!("No autostart entry was registered.");
            }
        }
    }
    Ok(())
}
