//! Strictly Tic-Tac-Toe - terminal front end
//!
//! Reads commands from stdin, prints game events to stdout.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, parse_command};
use std::time::Duration;
use strictly_tictactoe::{
    Command, DriverHandle, GameConfig, GameDriver, GameEvent, Mode, Outcome, TurnController,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // stdout carries the game; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = load_config(&cli)?;
    let json = cli.json;
    run(config, json).await
}

/// Loads the config file and applies command-line overrides.
#[instrument(skip_all, fields(config_path = %cli.config.display()))]
fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    if let Some(size) = cli.size {
        config = config.with_board_size(size);
    }
    if let Some(mode) = cli.mode {
        config = config.with_mode(mode);
    }
    if let Some(side) = cli.symbol {
        config = config.with_human_side(side);
    }
    if let Some(seconds) = cli.turn_seconds {
        config = config.with_turn_seconds(seconds);
    }

    config.validate().context("Invalid settings")?;
    debug!(?config, "Settings resolved");
    Ok(config)
}

/// Starts the driver and pumps stdin into it until quit or EOF.
async fn run(config: GameConfig, json: bool) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let delay = Duration::from_millis(*config.opponent_delay_ms());
    let (mode, size, side) = (*config.mode(), *config.board_size(), *config.human_side());

    let mut controller = TurnController::new(config)
        .context("Failed to create game")?
        .with_events(event_tx);
    controller
        .start_game(mode, size, side)
        .context("Failed to start game")?;

    let (driver, handle) = GameDriver::new(controller, delay);
    let mut driver_task = tokio::spawn(driver.run());
    tokio::spawn(read_commands(handle));

    print_help(mode);
    let controller = loop {
        tokio::select! {
            biased;
            Some(event) = event_rx.recv() => print_event(&event, json)?,
            finished = &mut driver_task => break finished.context("Driver task failed")?,
        }
    };
    while let Ok(event) = event_rx.try_recv() {
        print_event(&event, json)?;
    }

    let ledger = controller.ledger();
    info!(
        human_wins = ledger.human_wins(),
        opponent_wins = ledger.opponent_wins(),
        draws = ledger.draws(),
        "Session over"
    );
    Ok(())
}

/// Forwards stdin lines to the driver; EOF or `quit` shuts it down.
async fn read_commands(handle: DriverHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let command = match lines.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => continue,
            Ok(Some(line)) => match parse_command(&line) {
                Some(command) => command,
                None => {
                    warn!(line = %line, "Unrecognized command");
                    continue;
                }
            },
            Ok(None) => Command::Shutdown,
            Err(e) => {
                warn!(error = %e, "Failed to read stdin");
                Command::Shutdown
            }
        };

        let shutdown = command == Command::Shutdown;
        if handle.send(command).is_err() || shutdown {
            break;
        }
    }
}

fn print_help(mode: Mode) {
    eprintln!(
        "Playing {mode}. Enter a cell index to move, or: start, reset, \
         mode <vs_computer|vs_human>, symbol <X|O>, size <n>, quit"
    );
}

fn print_event(event: &GameEvent, json: bool) -> Result<()> {
    if json {
        let line = serde_json::to_string(event).context("Failed to serialize event")?;
        println!("{line}");
        return Ok(());
    }

    match event {
        GameEvent::StateChanged(snapshot) => {
            println!("\n{}", snapshot.board);
            match snapshot.active_side {
                Some(side) if snapshot.timer.running => {
                    println!("{side} to move ({}s)", snapshot.timer.remaining_seconds)
                }
                Some(side) => println!("{side} to move, clock stopped (type start)"),
                None => {}
            }
        }
        GameEvent::ScoreChanged(ledger) => println!(
            "Score: {} - {} ({} drawn)",
            ledger.human_wins(),
            ledger.opponent_wins(),
            ledger.draws()
        ),
        GameEvent::TimerTick { remaining } => {
            if *remaining <= 3 {
                println!("{remaining}s left");
            }
        }
        GameEvent::GameEnded { outcome, winner } => match (outcome, winner) {
            (Outcome::Win { line, .. }, Some(name)) => println!("{name} wins with {line:?}"),
            _ => println!("Draw"),
        },
    }
    Ok(())
}
