use std::panic::Location;

use tracing::{Dispatch, dispatcher};

use crate::logger::{
    field::{self, Field},
    level::{Level, target},
};

macro_rules! emit {
    ($target:expr, $lvl:expr, $caller:expr, $fields:expr, $msg:expr) => {
        tracing::event!(
            target: $target,
            $lvl,
            caller = $caller,
            fields = $fields,
            "{}",
            $msg
        )
    };
}

/// Logger built by [`Logger::new`](crate::Logger::new).
///
/// Cheap to clone; every clone writes to the same sinks. Nothing is installed
/// globally, records only reach this handle's sinks through its own methods,
/// [`in_scope`](Self::in_scope) or [`set_default`](Self::set_default).
///
/// The caller field is the source path as `rustc` records it (usually
/// relative to the workspace root), followed by `:line`. It is not
/// abbreviated and not made absolute.
#[derive(Debug, Clone)]
pub struct LoggerHandle {
    dispatch: Dispatch,
}

impl LoggerHandle {
    pub(crate) fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    /// Underlying `tracing` dispatcher.
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Runs `f` with this logger as the thread's default, so plain `tracing`
    /// macros inside it are written to this handle's sinks.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }

    /// Makes this logger the thread's default until the guard is dropped.
    #[must_use = "the logger stops being the default when the guard is dropped"]
    pub fn set_default(&self) -> dispatcher::DefaultGuard {
        dispatcher::set_default(&self.dispatch)
    }

    #[track_caller]
    pub fn log(&self, level: Level, msg: &str, fields: &[Field]) {
        let loc = Location::caller();
        let caller = format!("{}:{}", loc.file(), loc.line());
        let fields = field::render(fields);
        let (caller, fields) = (caller.as_str(), fields.as_str());

        dispatcher::with_default(&self.dispatch, || match level {
            Level::Debug => emit!(target::DEBUG, tracing::Level::DEBUG, caller, fields, msg),
            Level::Info => emit!(target::INFO, tracing::Level::INFO, caller, fields, msg),
            Level::Warn => emit!(target::WARN, tracing::Level::WARN, caller, fields, msg),
            Level::Error => emit!(target::ERROR, tracing::Level::ERROR, caller, fields, msg),
            Level::DPanic => emit!(target::DPANIC, tracing::Level::ERROR, caller, fields, msg),
            Level::Panic => emit!(target::PANIC, tracing::Level::ERROR, caller, fields, msg),
            Level::Fatal => emit!(target::FATAL, tracing::Level::ERROR, caller, fields, msg),
            Level::Invalid => emit!(target::INVALID, tracing::Level::ERROR, caller, fields, msg),
        });
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Debug, msg, fields);
    }

    #[track_caller]
    pub fn info(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Info, msg, fields);
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Warn, msg, fields);
    }

    #[track_caller]
    pub fn error(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Error, msg, fields);
    }

    /// Logs at [`Level::DPanic`]. Never panics.
    #[track_caller]
    pub fn dpanic(&self, msg: &str, fields: &[Field]) {
        self.log(Level::DPanic, msg, fields);
    }

    /// Logs at [`Level::Panic`], then panics with `msg`.
    #[track_caller]
    pub fn panic(&self, msg: &str, fields: &[Field]) -> ! {
        self.log(Level::Panic, msg, fields);
        panic!("{msg}");
    }

    /// Logs at [`Level::Fatal`], then exits the process with status 1.
    #[track_caller]
    pub fn fatal(&self, msg: &str, fields: &[Field]) -> ! {
        self.log(Level::Fatal, msg, fields);
        std::process::exit(1);
    }
}
