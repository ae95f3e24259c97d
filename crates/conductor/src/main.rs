//! Conductor CLI
//!
//! Play against the tiered random engine from the terminal and hear (or, with
//! the log backend, read) every move.

use std::env;
use std::process::ExitCode;

use conductor::command::{parse_command, Command, CommandError, HELP};
use conductor::orchestrator::Message;
use conductor::{AudioEngine, Conductor, ConductorConfig, ConfigError, LogBackend, Session, Side, TurnError};
use tiered_engine::TieredEngine;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn print_usage() {
    println!("Chess Conductor");
    println!();
    println!("Usage:");
    println!("  conductor [--config FILE] [--black] [--seed N] [--mute]");
    println!();
    println!("Options:");
    println!("  --config FILE  read settings from a TOML file");
    println!("  --black        play the black pieces");
    println!("  --seed N       make the computer's choices reproducible");
    println!("  --mute         start with sound off");
    println!();
    println!("Set RUST_LOG=debug to see every audio event.");
}

/// Build the config from an optional file plus command-line overrides.
/// Flags win over the file regardless of order.
fn load_config(args: &[String]) -> Result<Option<ConductorConfig>, ConfigError> {
    let mut config = match args.iter().position(|a| a == "--config" || a == "-c") {
        Some(i) => {
            let path = args
                .get(i + 1)
                .ok_or_else(|| ConfigError::Invalid("--config needs a file".into()))?;
            ConductorConfig::load(path)?
        }
        None => ConductorConfig::default(),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => i += 1,
            "--black" | "-b" => config.human_color = Side::Black,
            "--mute" | "-m" => config.muted = true,
            "--seed" | "-s" => {
                let seed = args
                    .get(i + 1)
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| ConfigError::Invalid("--seed needs a number".into()))?;
                config.seed = Some(seed);
                i += 1;
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(ConfigError::Invalid(format!("unknown argument {other}"))),
        }
        i += 1;
    }
    config.validate()?;
    Ok(Some(config))
}

fn report(result: Result<(), TurnError>) {
    if let Err(err) = result {
        println!("{err}");
    }
}

enum Input {
    Line(std::io::Result<Option<String>>),
    Posted(Message),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = match load_config(&args) {
        Ok(Some(config)) => config,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("Error: {err}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let engine = match config.seed {
        Some(seed) => TieredEngine::seeded(seed),
        None => TieredEngine::new(),
    }
    .with_capture_chance(config.capture_chance);

    let (conductor, effects) = Conductor::new(&config, Box::new(engine));
    let audio = AudioEngine::new(LogBackend::new(config.tempo_bpm));
    let mut session: Session = Session::new(conductor, effects, audio);

    println!("{}", session.conductor().view());
    println!("type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let input = tokio::select! {
            line = lines.next_line() => Input::Line(line),
            Some(message) = session.recv() => Input::Posted(message),
        };

        match input {
            Input::Line(Ok(Some(line))) => match parse_command(&line) {
                Ok(Command::Send(message)) => {
                    report(session.handle(message));
                    println!("{}", session.conductor().view());
                }
                Ok(Command::Board) => println!("{}", session.conductor().view()),
                Ok(Command::History) => println!("{}", session.conductor().view().history_line()),
                Ok(Command::Help) => println!("{HELP}"),
                Ok(Command::Quit) => break,
                Err(CommandError::Empty) => {}
                Err(err) => println!("{err}"),
            },
            Input::Line(Ok(None)) => break,
            Input::Line(Err(err)) => {
                tracing::error!(error = %err, "failed to read stdin");
                break;
            }
            Input::Posted(message) => {
                let computer_move = matches!(message, Message::ComputerMoveReady(_));
                report(session.handle(message));
                if computer_move {
                    println!("{}", session.conductor().view());
                }
            }
        }
    }

    session.shutdown();
    ExitCode::SUCCESS
}
