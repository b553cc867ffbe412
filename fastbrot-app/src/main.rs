mod app_dir;
mod input;
mod preferences;
mod session;
mod terminal;

use std::io::{self, Read};
use std::process::ExitCode;

use tracing::{error, info};

use fastbrot_render::Engine;

use preferences::HostPreferences;
use session::Session;
use terminal::TerminalSurface;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting FastBrot");

    let prefs = HostPreferences::load();

    // Commands come from the arguments, or from stdin when there are none.
    let args: Vec<String> = std::env::args().skip(1).collect();
    let script = if args.is_empty() {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            error!("Failed to read commands from stdin: {e}");
            return ExitCode::FAILURE;
        }
        buf
    } else {
        args.join(" ")
    };

    let commands = match input::parse_script(&script) {
        Ok(commands) => commands,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(2);
        }
    };

    let engine = match Engine::new(prefs.engine, prefs.grid_width, prefs.grid_height) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Invalid engine configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    let surface = TerminalSurface::new(io::stdout().lock(), prefs.preview_columns, prefs.show_preview);
    let mut session = match Session::start(engine, surface) {
        Ok(session) => session,
        Err(e) => {
            error!("Initial render failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let failed = session.run_all(&commands);
    info!(
        commands = commands.len(),
        failed,
        frames = session.surface().frames(),
        status = %session.engine().status_text(),
        "Session finished"
    );
    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
