mod animation;
mod app;
mod chain;
mod config;
mod controller;
mod error;
mod event;
mod ui;

use std::io;
use std::path::Path;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use crate::app::App;
use crate::config::CliArgs;
use crate::error::{AppError, AppResult};
use crate::event::EventHandler;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CliArgs::parse();

    if cli.print_default_config {
        print!("{}", config::default_config_toml());
        return Ok(());
    }

    // Initialize color-eyre with custom panic hook that restores terminal
    install_panic_hook();

    // Config errors are reported before the terminal is touched
    let config = config::load(&cli).map_err(AppError::from)?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(config.log_file.as_deref(), &config.general.log_level)?;

    match config.source {
        Some(ref path) => info!("Loaded config from {}", path.display()),
        None => info!("No config file, using built-in defaults"),
    }
    info!(
        nodes = config.chain_len(),
        tick_ms = config.animation.tick_ms,
        gap = config.animation.gap,
        "square-bi-end starting"
    );

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| AppError::Terminal(format!("Failed to enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.mouse_support {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut event_handler = EventHandler::new();
    let mut app = App::new(config, event_handler.sender());

    // ── Main event loop ───────────────────────────────────────────────
    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::draw(f, &app))?;
            app.needs_redraw = false;
        }

        match event_handler.next().await {
            Some(event) => app.handle_event(event),
            None => break,
        }

        if app.should_quit {
            break;
        }
    }

    event_handler.stop();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("square-bi-end exiting");
    Ok(())
}

/// Install color-eyre, then wrap its panic hook so the terminal is restored first
fn install_panic_hook() {
    install_panic_hook_with(restore_terminal);
}

fn install_panic_hook_with(restore: impl Fn() + Send + Sync + 'static) {
    // color-eyre sets its own panic hook, so it has to go in before ours
    color_eyre::install().ok();
    let eyre_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore();
        eyre_hook(panic_info);
    }));
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Initialize tracing to a log file, or switch it off entirely
fn init_logging(log_path: Option<&Path>, level: &str) -> AppResult<Option<WorkerGuard>> {
    use tracing_subscriber::EnvFilter;

    let Some(path) = log_path else {
        // No logging if no log path specified (can't log to stdout in a TUI)
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("off"))
            .with_writer(io::sink)
            .init();
        return Ok(None);
    };

    let file = std::fs::File::create(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}
