use std::env;
use std::io::Stdout;
use std::sync::mpsc;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::Cli;
use crate::app::App;
use crate::audio::RodioSession;
use crate::player::Player;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run(cli: Cli) -> Result<()> {
    let (mut settings, fallback) = settings::load_settings();
    startup::apply_cli_overrides(&mut settings, &cli);

    if cli.print_config {
        let rendered = toml::to_string_pretty(&settings).context("render settings as TOML")?;
        print!("{rendered}");
        return Ok(());
    }

    let _log_guard = logging::init(&settings.logging)?;
    if let Some(reason) = fallback {
        warn!("{reason}");
    }

    let dir = match cli.dir {
        Some(dir) => dir,
        None => env::current_dir().context("determine current directory")?,
    };
    info!(folder = %dir.display(), "starting");

    let session =
        RodioSession::open_default(settings.audio.volume).context("open audio output")?;
    let (event_tx, event_rx) = mpsc::channel();
    let mut player = Player::new(session, &settings, event_tx);
    let mut app = App::new();
    app.set_current_dir(dir.clone());

    // An empty or unreadable folder is shown in the status line; `r` retries.
    let _ = player.load_folder(&dir);

    let mut terminal = init_terminal()?;
    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut player, &event_rx);
    let restore_result = restore_terminal(&mut terminal);

    restore_result?;
    run_result
}

fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("create terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}
