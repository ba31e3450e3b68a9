use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::logger::level::Level;

/// Which metadata a sink renders in front of the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    pub time: bool,
    pub level: bool,
    pub caller: bool,
}

impl EncodeConfig {
    /// Message and fields only.
    pub fn none() -> Self {
        Self {
            time: false,
            level: false,
            caller: false,
        }
    }
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            time: true,
            level: true,
            caller: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub file_path: PathBuf,
    pub file_name: String,
    #[serde(alias = "log_level")]
    pub level: Level,
    /// Overrides `level` for the console sink.
    pub console_level: Option<Level>,
    /// Overrides `level` for the file sink.
    pub file_level: Option<Level>,
    pub log_to_file: bool,
    #[serde(alias = "show_console")]
    pub log_to_console: bool,
    pub console_encoder: EncodeConfig,
    pub file_encoder: EncodeConfig,
}

impl LoggerConfig {
    pub fn console_threshold(&self) -> Level {
        self.console_level.unwrap_or(self.level)
    }

    pub fn file_threshold(&self) -> Level {
        self.file_level.unwrap_or(self.level)
    }

    /// `file_path/file_name`.
    pub fn file_location(&self) -> PathBuf {
        self.file_path.join(&self.file_name)
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from("./logs/"),
            file_name: "app.log".to_string(),
            level: Level::Info,
            console_level: None,
            file_level: None,
            log_to_file: false,
            log_to_console: true,
            console_encoder: EncodeConfig::default(),
            file_encoder: EncodeConfig::default(),
        }
    }
}
