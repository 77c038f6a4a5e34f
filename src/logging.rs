//! Process-wide logging for the simulation runner, via log4rs.
//!
//! The core crates only talk to the `log` facade; binaries decide where the
//! records go. Logs go to stderr so stdout stays free for JSON output.

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

/// Environment variable holding the log level (`error`..`trace`, or `off`)
pub const LOG_ENV: &str = "TETRIS_LOG";

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {h({l:<5})} {t} {m}{n}";

/// Parse a level name; unknown names fall back to `info`
pub fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Level requested through [`LOG_ENV`]
pub fn level_from_env() -> LevelFilter {
    parse_level(std::env::var(LOG_ENV).ok().as_deref())
}

/// Install a stderr console logger at `level`
///
/// Fails if a logger is already installed.
pub fn init_logging(level: LevelFilter) -> Result<()> {
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("console", Box::new(console)),
        )
        .build(Root::builder().appender("console").build(level))
        .context("building log4rs config")?;

    log4rs::init_config(config).context("installing logger")?;
    Ok(())
}
