mod app;
mod config;
mod error;
mod headless;
mod payload;
mod queue;
mod stripper;
#[cfg(test)]
mod test_support;
mod ui;
mod utils;

use anyhow::Context;
use app::App;
use clap::{Parser, Subcommand};
use config::AppConfig;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use headless::HeadlessOptions;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

/// Upper bound on how long the loop waits for input before redrawing
const MAX_EVENT_WAIT: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "pngslim", version, about = "Strip non-essential metadata from PNG files")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Strip files without opening the drop window
    Strip {
        /// Print one JSON object per result
        #[arg(long)]
        json: bool,

        /// Expand directories into the PNG files they contain
        #[arg(short, long)]
        recursive: bool,

        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Strip {
            json,
            recursive,
            paths,
        }) => {
            utils::init_stderr_logging();
            let config = load_config(cli.config)?;
            let failures = headless::run(
                &config,
                HeadlessOptions {
                    paths,
                    json,
                    recursive,
                },
            )?;
            Ok(if failures > 0 {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        None => {
            let _guard = utils::init_logging();
            let config = load_config(cli.config)?;
            run_tui(&config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let config = AppConfig::load(path.as_deref());
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn run_tui(config: &AppConfig) -> anyhow::Result<()> {
    let mut app = App::new(config).context("Failed to start the worker")?;

    // Panic output would land on the alternate screen
    utils::log_panics();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Stop the worker before the terminal goes away
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    let _ = std::panic::take_hook();

    res.context("Terminal error")
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        // Drain finished jobs when the poll timer fires
        app.tick(Instant::now());

        terminal.draw(|f| {
            ui::render_home(f, app);
            // Overlays
            if app.confirm_exit {
                ui::render_confirm_dialog(f, app);
            } else {
                ui::render_notification(f, app);
            }
        })?;

        let wait = app
            .coordinator
            .until_next_poll(Instant::now())
            .min(MAX_EVENT_WAIT);
        if event::poll(wait)? {
            match event::read()? {
                Event::Paste(payload) => app.handle_drop(&payload),
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.confirm_exit {
        handle_confirm_key(app, key.code);
        return;
    }

    if !app.notifications().is_empty() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_notification();
        }
        return;
    }

    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
        app.request_quit();
    }
}

fn handle_confirm_key(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.answer_exit(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.answer_exit(false),
        KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
            app.confirm_selection = !app.confirm_selection;
        }
        KeyCode::Enter => app.answer_exit(app.confirm_selection),
        _ => {}
    }
}
