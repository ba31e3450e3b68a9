use std::{error::Error, fmt};

use serde_json::{Map, Value};
use time::{UtcOffset, format_description::BorrowedFormatItem, macros::format_description};
use tracing::{Event, Subscriber, field};
use tracing_subscriber::{
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
        time::{FormatTime, OffsetTime},
    },
    registry::LookupSpan,
};

use crate::logger::{config::EncodeConfig, level::Level};

type Timer = OffsetTime<&'static [BorrowedFormatItem<'static>]>;

const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]/[month]/[day] [hour]:[minute]:[second]");

/// Tab separated text line: `time  LEVEL  file:line  message  {fields}`.
///
/// The level token is always colored, whatever the writer.
pub(crate) struct LineFormat {
    timer: Option<Timer>,
    level: bool,
    caller: bool,
}

impl LineFormat {
    pub(crate) fn new(enc: &EncodeConfig, offset: UtcOffset) -> Self {
        Self {
            timer: enc.time.then(|| OffsetTime::new(offset, TIME_FORMAT)),
            level: enc.level,
            caller: enc.caller,
        }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let mut line = LineVisitor::new(Level::from_target(meta.target()).is_some());
        event.record(&mut line);

        if let Some(timer) = &self.timer {
            timer.format_time(&mut writer)?;
            writer.write_char('\t')?;
        }
        if self.level {
            let level = Level::of(meta).unwrap_or(Level::Invalid);
            write!(writer, "{}\t", level.colorize())?;
        }
        if self.caller {
            match (line.caller.take(), meta.file(), meta.line()) {
                (Some(caller), _, _) => write!(writer, "{caller}\t")?,
                (None, Some(file), Some(ln)) => write!(writer, "{file}:{ln}\t")?,
                (None, Some(file), None) => write!(writer, "{file}\t")?,
                (None, None, _) => {}
            }
        }
        writer.write_str(&line.message)?;
        if let Some(fields) = line.fields() {
            write!(writer, "\t{fields}")?;
        }
        writeln!(writer)
    }
}

/// Collects the message and fields of one event.
///
/// Events emitted by the handle carry a preformatted `caller` and `fields`;
/// any other event has its fields gathered into a JSON object.
struct LineVisitor {
    from_handle: bool,
    message: String,
    caller: Option<String>,
    rendered: Option<String>,
    fields: Map<String, Value>,
}

impl LineVisitor {
    fn new(from_handle: bool) -> Self {
        Self {
            from_handle,
            message: String::new(),
            caller: None,
            rendered: None,
            fields: Map::new(),
        }
    }

    fn fields(&self) -> Option<String> {
        match &self.rendered {
            Some(rendered) if !rendered.is_empty() => Some(rendered.clone()),
            _ if !self.fields.is_empty() => Some(Value::Object(self.fields.clone()).to_string()),
            _ => None,
        }
    }

    fn insert(&mut self, field: &field::Field, value: Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl field::Visit for LineVisitor {
    fn record_str(&mut self, field: &field::Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "caller" if self.from_handle => self.caller = Some(value.to_string()),
            "fields" if self.from_handle => self.rendered = Some(value.to_string()),
            _ => self.insert(field, Value::from(value)),
        }
    }

    fn record_i64(&mut self, field: &field::Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &field::Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &field::Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &field::Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_error(&mut self, field: &field::Field, value: &(dyn Error + 'static)) {
        self.insert(field, Value::from(value.to_string()));
    }

    fn record_debug(&mut self, field: &field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.insert(field, Value::from(format!("{value:?}")));
        }
    }
}
