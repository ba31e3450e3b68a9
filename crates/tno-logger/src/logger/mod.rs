#[cfg(test)]
mod capture;
mod config;
mod error;
mod field;
mod format;
mod handle;
mod level;
mod log;

pub use config::{EncodeConfig, LoggerConfig};
pub use error::LoggerError;
pub use field::{Field, error_field};
pub use handle::LoggerHandle;
pub use level::Level;
pub use log::Logger;

pub fn logger_init(cfg: &LoggerConfig) -> Result<LoggerHandle, LoggerError> {
    Logger::new(cfg)
}
