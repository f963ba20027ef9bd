mod app;
mod components;

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tuido_service::BlockingHttpService;

use app::App;

const DEFAULT_URL: &str = "http://127.0.0.1:8080";

fn main() -> Result<()> {
    // Opt-in logging to stderr; stdout belongs to the terminal UI
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
    }

    let args: Vec<String> = std::env::args().collect();

    // Parse CLI: tuido [--server URL]
    // Falls back to the TUIDO_SERVER env var, then the default.
    let server_url = if let Some(pos) = args.iter().position(|a| a == "--server") {
        args.get(pos + 1)
            .context("--server requires a URL argument")?
            .clone()
    } else {
        std::env::var("TUIDO_SERVER")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_URL.to_string())
    };

    let service = BlockingHttpService::new(&server_url);

    run_tui(service, &server_url)
}

fn run_tui(service: BlockingHttpService, server_url: &str) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, service, server_url);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e}");
    }

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    service: BlockingHttpService,
    server_url: &str,
) -> Result<()> {
    let mut app = App::new(service, server_url);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if let Event::Key(key) = event::read()? {
            // Ctrl+C always quits
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }
            // q quits unless we're in an input mode
            if key.code == KeyCode::Char('q') && !app.is_input_mode() {
                break;
            }
            app.handle_key(key);
        }
    }

    Ok(())
}
