use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use scicalc::calculator::{
    CalculatorEngine, DisplaySnapshot, EngineEvent, evaluate_expression, format_number,
};
use scicalc::config::Config;
use scicalc::input::Action;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Scientific calculator driven by keys and button names.
#[derive(Parser, Debug)]
#[command(name = "scicalc", version, about)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/scicalc/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log engine transitions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the display as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate an expression once
    Eval {
        /// Expression, e.g. "2 × (3 + 4)"
        expression: String,
    },
    /// Feed keyboard keys to a fresh calculator
    Keys {
        /// Key names such as 7, +, enter, backspace, s
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Interactive session reading keys and :button names from stdin
    Repl,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Command::Eval { expression } => {
            let value = evaluate_expression(&expression)
                .with_context(|| format!("Cannot evaluate '{}'", expression))?;
            println!("{}", format_number(value));
        }
        Command::Keys { keys } => {
            let mut engine = CalculatorEngine::new();
            for key in &keys {
                let Some(action) = Action::from_key(key) else {
                    bail!("Unknown key '{}'", key);
                };
                // Faults already show as "Error" on the display.
                let _ = engine.dispatch(action);
            }
            print_display(&engine.snapshot(), &config, cli.json, "")?;
        }
        Command::Repl => run_repl(&config, cli.json)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Split one input line into actions: `:name` is a button, anything else
/// is read as a run of single-character keys.
fn parse_line(line: &str) -> Result<Vec<Action>> {
    let line = line.trim();
    if let Some(button) = line.strip_prefix(':') {
        return match Action::from_button(button.trim()) {
            Some(action) => Ok(vec![action]),
            None => bail!("Unknown button '{}'", button),
        };
    }
    if line.is_empty() {
        return Ok(vec![Action::Evaluate]);
    }

    line.chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| {
            Action::from_key(ch.encode_utf8(&mut [0; 4]))
                .with_context(|| format!("Unknown key '{}'", ch))
        })
        .collect()
}

/// Most recent transient decoration: when it started and whether it was an error.
type Flash = Arc<Mutex<Option<(Instant, bool)>>>;

fn run_repl(config: &Config, json: bool) -> Result<()> {
    let flash: Flash = Arc::new(Mutex::new(None));
    let mut engine = CalculatorEngine::new();
    {
        let flash = Arc::clone(&flash);
        engine.set_listener(move |event| {
            let is_error = match event {
                EngineEvent::Error { .. } => true,
                EngineEvent::Success { .. } => false,
                EngineEvent::MemoryChanged { .. } => return,
            };
            if let Ok(mut flash) = flash.lock() {
                *flash = Some((Instant::now(), is_error));
            }
        });
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        match parse_line(&line) {
            Ok(actions) => {
                for action in actions {
                    // Faults already show as "Error" on the display.
                    let _ = engine.dispatch(action);
                }
            }
            Err(e) => {
                eprintln!("{:#}", e);
                continue;
            }
        }

        let marker = flash
            .lock()
            .ok()
            .and_then(|flash| *flash)
            .and_then(|(since, is_error)| {
                let elapsed = since.elapsed();
                if is_error && elapsed < config.error_flash() {
                    Some(" !")
                } else if !is_error && elapsed < config.success_flash() {
                    Some(" ok")
                } else {
                    None
                }
            })
            .unwrap_or("");
        print_display(&engine.snapshot(), config, json, marker)?;
    }

    Ok(())
}

fn print_display(
    snapshot: &DisplaySnapshot,
    config: &Config,
    json: bool,
    marker: &str,
) -> Result<()> {
    let mut out = io::stdout().lock();
    if json {
        let text = serde_json::to_string(snapshot).context("Failed to serialize display")?;
        writeln!(out, "{}", text)?;
    } else {
        writeln!(
            out,
            "{}{}",
            snapshot.render(config.show_memory_indicator),
            marker
        )?;
    }
    Ok(())
}
