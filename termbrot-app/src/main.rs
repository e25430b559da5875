mod command;
mod config;
mod frame;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{debug, info};

use termbrot_core::Command;
use termbrot_render::Session;

use crate::command::{DriverCommand, HELP};
use crate::config::AppConfig;
use crate::frame::{render_frame, status_line, GlyphRamp};

const USAGE: &str = "usage: termbrot [--config <path>]";

fn parse_args() -> Result<Option<PathBuf>, String> {
    let mut args = std::env::args().skip(1);
    let mut config = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => match args.next() {
                Some(path) => config = Some(PathBuf::from(path)),
                None => return Err("--config needs a path".to_string()),
            },
            "--help" | "-h" => return Err(String::new()),
            other => return Err(format!("unexpected argument `{other}`")),
        }
    }
    Ok(config)
}

fn print_frame(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let grid = session.recompute();
    let ramp = GlyphRamp::for_scheme(session.color_scheme());
    write!(out, "{}", render_frame(&grid, &ramp))?;
    writeln!(out, "{}", status_line(session.state()))?;
    out.flush()
}

/// Handle one input line. Returns `false` when the session should end.
fn handle_line(line: &str, session: &mut Session, out: &mut impl Write) -> io::Result<bool> {
    let command = match line.parse::<DriverCommand>() {
        Ok(c) => c,
        Err(command::CommandParseError::Empty) => return Ok(true),
        Err(e) => {
            writeln!(out, "error: {e}")?;
            return Ok(true);
        }
    };
    debug!(?command, "Driver command");

    let applied = match command {
        DriverCommand::Quit => return Ok(false),
        DriverCommand::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(true);
        }
        DriverCommand::Presets => {
            for (i, p) in session.interesting_points().iter().enumerate() {
                writeln!(out, "{i:>2}  {:<18} {}  zoom {}", p.name, p.center, p.zoom)?;
            }
            return Ok(true);
        }
        DriverCommand::Show => Ok(()),
        DriverCommand::Reset(dims) => {
            let vp = session.state().viewport();
            let (rows, cols) = dims.unwrap_or((vp.rows(), vp.cols()));
            session.apply(Command::Reset { rows, cols })
        }
        DriverCommand::Apply(Command::NextPreset) => session.next_preset().map(|p| {
            if p.is_none() {
                info!("No presets configured");
            }
        }),
        DriverCommand::Apply(c) => session.apply(c),
    };

    match applied {
        Ok(()) => print_frame(out, session)?,
        Err(e) => writeln!(out, "error: {e}")?,
    }
    Ok(true)
}

fn run(config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load(config_path.as_deref())?;
    let mut session = Session::new(config.view_state()?, config.catalog());
    info!(
        rows = config.rows,
        cols = config.cols,
        presets = session.interesting_points().len(),
        "Session ready"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_frame(&mut out, &session)?;

    for line in io::stdin().lock().lines() {
        if !handle_line(&line?, &mut session, &mut out)? {
            break;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config_path = match parse_args() {
        Ok(path) => path,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("error: {msg}");
            }
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    info!("Starting termbrot");
    match run(config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
