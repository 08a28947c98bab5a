//! Command-line interface for strictly_tictactoe.

use clap::Parser;
use strictly_tictactoe::{Command, Mode, Side};

/// Strictly Tic-Tac-Toe - N×N tic-tac-toe with a turn clock
#[derive(Parser, Debug)]
#[command(name = "strictly_tictactoe")]
#[command(about = "Play N×N tic-tac-toe against the computer or a friend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file (defaults are used if absent)
    #[arg(short, long, default_value = "strictly_tictactoe.toml")]
    pub config: std::path::PathBuf,

    /// Board edge length (overrides the config file)
    #[arg(short, long)]
    pub size: Option<usize>,

    /// vs_computer or vs_human (overrides the config file)
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// Side the human plays, X or O (overrides the config file)
    #[arg(long)]
    pub symbol: Option<Side>,

    /// Seconds per turn (overrides the config file)
    #[arg(long)]
    pub turn_seconds: Option<u32>,

    /// Print events as JSON lines instead of text
    #[arg(long)]
    pub json: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log: String,
}

/// Parses one stdin line into a driver command.
///
/// Accepts a cell index, `start`, `reset`, `mode <m>`, `symbol <s>`,
/// `size <n>` and `quit`. Anything else yields `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let head = words.next()?;
    let arg = words.next();
    if words.next().is_some() {
        return None;
    }

    match (head.to_ascii_lowercase().as_str(), arg) {
        ("start", None) => Some(Command::StartTimer),
        ("reset", None) => Some(Command::Reset),
        ("quit" | "exit", None) => Some(Command::Shutdown),
        ("mode", Some(mode)) => mode.parse().ok().map(Command::ChangeMode),
        ("symbol", Some(side)) => side.parse().ok().map(Command::ChangeSymbol),
        ("size", Some(size)) => size.parse().ok().map(Command::ChangeBoardSize),
        (index, None) => index.parse().ok().map(Command::Move),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index_and_keywords() {
        assert_eq!(parse_command("4"), Some(Command::Move(4)));
        assert_eq!(parse_command("  start "), Some(Command::StartTimer));
        assert_eq!(parse_command("RESET"), Some(Command::Reset));
        assert_eq!(parse_command("quit"), Some(Command::Shutdown));
    }

    #[test]
    fn test_parse_settings() {
        assert_eq!(parse_command("mode vs_human"), Some(Command::ChangeMode(Mode::VsHuman)));
        assert_eq!(parse_command("symbol o"), Some(Command::ChangeSymbol(Side::O)));
        assert_eq!(parse_command("size 5"), Some(Command::ChangeBoardSize(5)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("-1"), None);
        assert_eq!(parse_command("mode chess"), None);
        assert_eq!(parse_command("size"), None);
        assert_eq!(parse_command("4 5"), None);
    }

    #[test]
    fn test_cli_overrides_parse() {
        let cli = Cli::parse_from([
            "strictly_tictactoe",
            "--size",
            "4",
            "--mode",
            "vs_human",
            "--symbol",
            "O",
            "--json",
        ]);
        assert_eq!(cli.size, Some(4));
        assert_eq!(cli.mode, Some(Mode::VsHuman));
        assert_eq!(cli.symbol, Some(Side::O));
        assert!(cli.json);
        assert_eq!(cli.log, "info");
    }
}
