//! Headless Tetris simulation runner (default binary).
//!
//! Usage: `tetris-sim [CONFIG_JSON] [GAMES] [MAX_TICKS]`
//!
//! Plays `GAMES` games (default 1) with a random-placement bot, each capped at
//! `MAX_TICKS` ticks (default 100000), and prints a JSON report to stdout.
//! Pass `-` as the config path to use the defaults. Set `TETRIS_LOG` to
//! change the log level.

use anyhow::Result;
use clap::{value_parser, Arg, ArgMatches, Command};

use blocky_tetris::core::GameConfig;
use blocky_tetris::logging::{init_logging, level_from_env};
use blocky_tetris::sim::run_batch;

fn cli() -> Command {
    Command::new("tetris-sim")
        .about("Plays seeded Tetris games with a random bot and prints a JSON report")
        .arg(
            Arg::new("config")
                .value_name("CONFIG_JSON")
                .help("Game config file, or - for the defaults")
                .default_value("-"),
        )
        .arg(
            Arg::new("games")
                .value_name("GAMES")
                .help("Number of games to play")
                .value_parser(value_parser!(u32))
                .default_value("1"),
        )
        .arg(
            Arg::new("max_ticks")
                .value_name("MAX_TICKS")
                .help("Tick cap per game")
                .value_parser(value_parser!(u32))
                .default_value("100000"),
        )
}

fn load_config(matches: &ArgMatches) -> Result<GameConfig> {
    match matches.get_one::<String>("config").map(String::as_str) {
        None | Some("-") => Ok(GameConfig::default()),
        Some(path) => Ok(GameConfig::load(path)?),
    }
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(level_from_env())?;

    let config = load_config(&matches)?;
    let games = matches.get_one::<u32>("games").copied().unwrap_or(1);
    let max_ticks = matches.get_one::<u32>("max_ticks").copied().unwrap_or(100_000);

    log::info!(
        "running {} game(s) on {}x{} from seed {}",
        games,
        config.board_width,
        config.board_height,
        config.seed
    );

    let report = run_batch(&config, games, max_ticks)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
