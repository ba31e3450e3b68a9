use std::{fmt, str::FromStr};

use nu_ansi_term::Color;
use serde::{Deserialize, Serialize};
use tracing::Metadata;

use crate::logger::error::LoggerError;

const RESET: &str = "\x1b[0m";

/// Targets used by [`LoggerHandle`](crate::LoggerHandle) so the exact severity
/// survives the trip through `tracing`, which only knows five levels.
pub(crate) mod target {
    pub const DEBUG: &str = "tno_logger::debug";
    pub const INFO: &str = "tno_logger::info";
    pub const WARN: &str = "tno_logger::warn";
    pub const ERROR: &str = "tno_logger::error";
    pub const DPANIC: &str = "tno_logger::dpanic";
    pub const PANIC: &str = "tno_logger::panic";
    pub const FATAL: &str = "tno_logger::fatal";
    pub const INVALID: &str = "tno_logger::invalid";
}

/// Severity of a log record.
///
/// Variants are ordered from least to most severe; a sink emits a record only
/// when the record's level is greater than or equal to the sink's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
#[repr(i8)]
pub enum Level {
    Debug = -1,
    #[default]
    Info = 0,
    Warn = 1,
    Error = 2,
    DPanic = 3,
    Panic = 4,
    Fatal = 5,
    /// Sentinel one past [`Level::Fatal`].
    Invalid = 6,
}

impl Level {
    pub const ALL: [Level; 7] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::DPanic,
        Level::Panic,
        Level::Fatal,
    ];

    /// Maps a numeric code onto a level; anything outside `-1..=5` is `Invalid`.
    pub fn from_code(code: i8) -> Self {
        match code {
            -1 => Level::Debug,
            0 => Level::Info,
            1 => Level::Warn,
            2 => Level::Error,
            3 => Level::DPanic,
            4 => Level::Panic,
            5 => Level::Fatal,
            _ => Level::Invalid,
        }
    }

    #[inline]
    pub fn code(self) -> i8 {
        self as i8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::DPanic => "dpanic",
            Level::Panic => "panic",
            Level::Fatal => "fatal",
            Level::Invalid => "invalid",
        }
    }

    pub fn as_capital_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::DPanic => "DPANIC",
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
            Level::Invalid => "INVALID",
        }
    }

    /// Foreground color of this level; `None` renders with the default look.
    pub fn color(self) -> Option<Color> {
        match self {
            Level::Debug => Some(Color::Cyan),
            Level::Info => Some(Color::Green),
            Level::Warn => Some(Color::Yellow),
            Level::Error => Some(Color::Red),
            Level::DPanic | Level::Panic | Level::Fatal => Some(Color::Magenta),
            Level::Invalid => None,
        }
    }

    /// Capital level name wrapped in its color and a trailing reset.
    pub fn colorize(self) -> String {
        match self.color() {
            Some(color) => color.paint(self.as_capital_str()).to_string(),
            None => format!("{RESET}{}{RESET}", self.as_capital_str()),
        }
    }

    #[inline]
    pub fn enabled(self, threshold: Level) -> bool {
        self >= threshold
    }

    pub(crate) fn from_target(target: &str) -> Option<Self> {
        match target {
            target::DEBUG => Some(Level::Debug),
            target::INFO => Some(Level::Info),
            target::WARN => Some(Level::Warn),
            target::ERROR => Some(Level::Error),
            target::DPANIC => Some(Level::DPanic),
            target::PANIC => Some(Level::Panic),
            target::FATAL => Some(Level::Fatal),
            target::INVALID => Some(Level::Invalid),
            _ => None,
        }
    }

    /// Severity of a `tracing` callsite. `TRACE` has no counterpart and is
    /// never emitted.
    pub(crate) fn of(meta: &Metadata<'_>) -> Option<Self> {
        if let Some(level) = Self::from_target(meta.target()) {
            return Some(level);
        }
        match *meta.level() {
            tracing::Level::TRACE => None,
            tracing::Level::DEBUG => Some(Level::Debug),
            tracing::Level::INFO => Some(Level::Info),
            tracing::Level::WARN => Some(Level::Warn),
            tracing::Level::ERROR => Some(Level::Error),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "dpanic" => Ok(Level::DPanic),
            "panic" => Ok(Level::Panic),
            "fatal" => Ok(Level::Fatal),
            _ => Err(LoggerError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for Level {
    type Error = LoggerError;

    fn try_from(value: String) -> Result<Self, LoggerError> {
        value.parse()
    }
}

impl From<Level> for &'static str {
    fn from(level: Level) -> Self {
        level.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_severity() {
        for pair in Level::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} < {}", pair[0], pair[1]);
        }
        assert!(Level::Fatal < Level::Invalid);
    }

    #[test]
    fn threshold_is_inclusive() {
        for threshold in Level::ALL {
            for level in Level::ALL {
                assert_eq!(level.enabled(threshold), level.code() >= threshold.code());
            }
        }
    }

    #[test]
    fn out_of_range_codes_are_invalid() {
        for level in Level::ALL {
            assert_eq!(Level::from_code(level.code()), level);
        }
        assert_eq!(Level::from_code(6), Level::Invalid);
        assert_eq!(Level::from_code(-2), Level::Invalid);
        assert_eq!(Level::from_code(i8::MAX), Level::Invalid);
    }

    #[test]
    fn color_mapping() {
        assert_eq!(Level::Debug.color(), Some(Color::Cyan));
        assert_eq!(Level::Info.color(), Some(Color::Green));
        assert_eq!(Level::Warn.color(), Some(Color::Yellow));
        assert_eq!(Level::Error.color(), Some(Color::Red));
        assert_eq!(Level::DPanic.color(), Some(Color::Magenta));
        assert_eq!(Level::Panic.color(), Some(Color::Magenta));
        assert_eq!(Level::Fatal.color(), Some(Color::Magenta));
        assert_eq!(Level::Invalid.color(), None);
        assert_eq!(Level::from_code(42).color(), None);
    }

    #[test]
    fn colorize_wraps_capital_name() {
        assert_eq!(Level::Debug.colorize(), "\x1b[36mDEBUG\x1b[0m");
        assert_eq!(Level::Info.colorize(), "\x1b[32mINFO\x1b[0m");
        assert_eq!(Level::Warn.colorize(), "\x1b[33mWARN\x1b[0m");
        assert_eq!(Level::Error.colorize(), "\x1b[31mERROR\x1b[0m");
        assert_eq!(Level::DPanic.colorize(), "\x1b[35mDPANIC\x1b[0m");
        assert_eq!(Level::Invalid.colorize(), "\x1b[0mINVALID\x1b[0m");
        assert_eq!(Level::Warn.colorize(), Level::Warn.colorize());
    }

    #[test]
    fn parse_is_lenient_about_case_and_spacing() {
        assert_eq!(" WARNING ".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("DPanic".parse::<Level>().unwrap(), Level::DPanic);
        assert!(matches!(
            "verbose".parse::<Level>(),
            Err(LoggerError::InvalidLogLevel(s)) if s == "verbose"
        ));
        assert!("invalid".parse::<Level>().is_err());
    }

    #[test]
    fn targets_identify_levels() {
        let pairs = [
            (target::DEBUG, Level::Debug),
            (target::INFO, Level::Info),
            (target::WARN, Level::Warn),
            (target::ERROR, Level::Error),
            (target::DPANIC, Level::DPanic),
            (target::PANIC, Level::Panic),
            (target::FATAL, Level::Fatal),
            (target::INVALID, Level::Invalid),
        ];
        for (name, level) in pairs {
            assert_eq!(Level::from_target(name), Some(level));
        }
        assert_eq!(Level::from_target("my_app::db"), None);
    }

    #[test]
    fn try_from_string_parses_names() {
        assert_eq!(Level::try_from("Fatal".to_string()).unwrap(), Level::Fatal);
        assert!(matches!(
            Level::try_from(String::from("loud")),
            Err(LoggerError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Level::DPanic).unwrap();
        assert_eq!(json, r#""dpanic""#);

        let back: Level = serde_json::from_str(r#""ERROR""#).unwrap();
        assert_eq!(back, Level::Error);

        assert!(serde_json::from_str::<Level>(r#""loud""#).is_err());
    }
}
