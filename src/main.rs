//! `metaedit` entrypoint.
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use metaedit::config::Settings;
use metaedit::terminal::{self, TerminalDisplay, TerminalInput};
use metaedit::{Engine, RecordStore, formats, session};

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "metaedit", version, about = "Inspect and edit file metadata in the terminal")]
struct Args {
    /// File whose metadata to edit (.pdf, .png or .json).
    path: Option<PathBuf>,
    /// Settings file (JSON).
    #[arg(long = "config")]
    config: Option<PathBuf>,
    /// Log file, overriding the settings file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
    /// Start with Backspace/Delete restricted to the current line.
    #[arg(long = "delete-mode", default_value_t = false)]
    delete_mode: bool,
}

fn configure_logging(settings: &Settings) -> Result<WorkerGuard> {
    let path = settings.log_path();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log file {} has no file name", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {e}"))?;
    Ok(guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = terminal::restore();
            error!(target: "runtime.panic", %info, "panic");
            default_panic(info);
        }));
    });
}

fn run(args: Args) -> Result<ExitCode> {
    let Some(path) = args.path else {
        eprintln!("{}", Args::command().render_usage());
        return Ok(ExitCode::FAILURE);
    };

    let mut settings = Settings::load_or_default(args.config.as_deref())?;
    if args.log_file.is_some() {
        settings.log_file = args.log_file;
    }
    if args.delete_mode {
        settings.start_in_delete_mode = true;
    }
    let _log_guard = configure_logging(&settings)?;
    install_panic_hook();
    info!(target: "runtime", path = %path.display(), "startup");

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        return Ok(ExitCode::FAILURE);
    }

    let format = formats::for_path(&path)?;
    let store = RecordStore::load(format.as_ref(), &path)?;
    let mut engine = Engine::builder()
        .delete_mode(settings.start_in_delete_mode)
        .show_key_hints(settings.show_key_hints)
        .build(store);

    let outcome = {
        let mut display = TerminalDisplay::enter().context("failed to set up the terminal")?;
        let mut input = TerminalInput;
        session::run(&mut engine, &mut display, &mut input)?
    };

    if let Err(err) = session::conclude(outcome, engine.store(), format.as_ref(), &path) {
        error!(target: "runtime", error = %err, "save failed");
        eprintln!("error: {:#}", anyhow::Error::new(err));
        return Ok(ExitCode::FAILURE);
    }
    info!(target: "runtime", ?outcome, "shutdown");
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
