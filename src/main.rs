//! pay265 - Terminal Marketplace
//!
//! A terminal storefront client for a small Malawian marketplace demo.
//! Prices are in Malawian Kwacha; persistence and authentication are
//! delegated to a backend selected from the environment.

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;

mod application;
mod domain;
mod infrastructure;
mod presentation;

use application::{App, AppMode};
use domain::DomainClient;
use infrastructure::BackendConfig;
use presentation::{InputHandler, render_ui};

/// Entry point for the pay265 terminal storefront.
///
/// Resolves the backend from the environment (a missing configuration is
/// fatal before any terminal setup), restores a previous session, performs
/// the single mount-time product fetch, and runs the event loop until the
/// user quits.
///
/// # Errors
///
/// Returns an error if terminal setup fails or if there are issues with
/// the terminal interface during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match BackendConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("pay265: {}", error);
            std::process::exit(1);
        }
    };
    let mut client = match config.build() {
        Ok(client) => client,
        Err(error) => {
            eprintln!("pay265: {}", error);
            std::process::exit(1);
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::default();
    app.init(client.as_mut());
    let res = run_app(&mut terminal, &mut app, client.as_mut());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Renders the visible screen and feeds key presses to the input handler.
/// Continues until the user presses 'q' in browse mode with no notice up.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &mut dyn DomainClient,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if app.mode == AppMode::Browse && app.notice.is_none() => {
                        return Ok(());
                    }
                    _ => InputHandler::handle_key_event(app, client, key.code, key.modifiers),
                }
            }
        }
    }
}
