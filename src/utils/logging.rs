// Tue Jan 13 2026 - Alex

use colored::*;
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

pub struct LoggingUtils;

impl LoggingUtils {
    /// Installs the process-wide logger. A second call is a no-op.
    pub fn init_logger(level: LevelFilter, use_color: bool) {
        Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .format(move |buf, record| {
                writeln!(
                    buf,
                    "{} [{}] {}",
                    Self::format_level(record.level(), use_color),
                    record.target(),
                    record.args()
                )
            })
            .try_init()
            .ok();
    }

    pub fn level_from_str(s: &str) -> LevelFilter {
        match s.to_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" | "warning" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Warn,
        }
    }

    pub fn format_level(level: Level, use_color: bool) -> String {
        if !use_color {
            return format!("{:5}", level);
        }
        match level {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".green().bold(),
            Level::Debug => "DEBUG".blue().bold(),
            Level::Trace => "TRACE".magenta().bold(),
        }
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(LoggingUtils::level_from_str("DEBUG"), LevelFilter::Debug);
        assert_eq!(LoggingUtils::level_from_str("warning"), LevelFilter::Warn);
        assert_eq!(LoggingUtils::level_from_str("off"), LevelFilter::Off);
        assert_eq!(LoggingUtils::level_from_str("loud"), LevelFilter::Warn);
    }

    #[test]
    fn test_plain_level_tags_are_padded() {
        assert_eq!(LoggingUtils::format_level(Level::Info, false), "INFO ");
        assert_eq!(LoggingUtils::format_level(Level::Error, false), "ERROR");
    }
}
