use std::{
    fs::{DirBuilder, File, OpenOptions},
    io,
    path::Path,
    sync::Arc,
};

use time::UtcOffset;
use tracing::{Dispatch, Metadata};
use tracing_subscriber::{
    Layer, Registry,
    filter::{FilterFn, filter_fn},
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
};

use crate::logger::{
    config::{EncodeConfig, LoggerConfig},
    error::LoggerError,
    format::LineFormat,
    handle::LoggerHandle,
    level::Level,
};

pub struct Logger;

impl Logger {
    /// Builds a handle writing to the sinks enabled in `cfg`.
    ///
    /// The log directory is created and the file opened before returning; a
    /// failure on either aborts the whole build.
    pub fn new(cfg: &LoggerConfig) -> Result<LoggerHandle, LoggerError> {
        Self::build(cfg, io::stdout)
    }

    /// Like [`Logger::new`], but panics on failure.
    pub fn must(cfg: &LoggerConfig) -> LoggerHandle {
        match Self::new(cfg) {
            Ok(handle) => handle,
            Err(e) => panic!("{e}"),
        }
    }

    pub(crate) fn build<W>(cfg: &LoggerConfig, console: W) -> Result<LoggerHandle, LoggerError>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let offset = mk_offset();

        let mut cores: Vec<Core> = Vec::with_capacity(2);

        if cfg.log_to_console {
            cores.push(mk_core(&cfg.console_encoder, offset, console, cfg.console_threshold()));
        }
        if cfg.log_to_file {
            let file = open_sink(&cfg.file_path, &cfg.file_name)?;
            cores.push(mk_core(
                &cfg.file_encoder,
                offset,
                Arc::new(file),
                cfg.file_threshold(),
            ));
        }

        let subscriber = tracing_subscriber::registry().with(cores);

        let location = cfg.file_location();
        tracing::debug!(
            console = cfg.log_to_console,
            console_level = %cfg.console_threshold(),
            file = cfg.log_to_file,
            file_level = %cfg.file_threshold(),
            path = %location.display(),
            "logger built"
        );
        Ok(LoggerHandle::new(Dispatch::new(subscriber)))
    }
}

/// One sink: line encoder, writer and its own minimum level.
type Core = Box<dyn Layer<Registry> + Send + Sync>;

fn mk_core<W>(enc: &EncodeConfig, offset: UtcOffset, writer: W, min: Level) -> Core
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .event_format(LineFormat::new(enc, offset))
        .with_writer(writer)
        .with_filter(mk_filter(min))
        .boxed()
}

fn mk_filter(min: Level) -> FilterFn<impl Fn(&Metadata<'_>) -> bool + Send + Sync + 'static> {
    filter_fn(move |meta| Level::of(meta).is_some_and(|level| level.enabled(min)))
}

fn mk_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

fn open_sink(dir: &Path, name: &str) -> Result<File, LoggerError> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder
        .create(dir)
        .map_err(|source| LoggerError::DirectoryCreationFailed {
            path: dir.to_path_buf(),
            source,
        })?;

    let path = dir.join(name);
    let mut options = OpenOptions::new();
    options.append(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options
        .open(&path)
        .map_err(|source| LoggerError::FileOpenFailed { path, source })
}
