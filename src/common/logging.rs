use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use super::GeneralError;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";

/// Routes the `log` facade to stderr.
///
/// sqlx statement logging is capped at `warn` so slow-query notices still
/// surface without echoing every statement.
pub fn init_logging(level: LevelFilter) -> Result<(), GeneralError> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .logger(Logger::builder().build("sqlx", LevelFilter::Warn))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|e| GeneralError::Logging(e.to_string()))?;

    log4rs::init_config(config)
        .map_err(|e| GeneralError::Logging(e.to_string()))?;

    Ok(())
}
