//! Credential redaction for formatted log output
//!
//! Two adapters apply a [`LogFilter`] before anything reaches the sink:
//!
//! - [`RedactingFields`] wraps a field formatter, so text output redacts each
//!   field value (the event message included) before it is written.
//! - [`RedactingMakeWriter`] wraps the sink itself. JSON lines are parsed and
//!   every string value is redacted in place, so the line stays valid JSON;
//!   any other line is filtered as a whole.

use std::borrow::Cow;
use std::fmt;
use std::io;
use std::sync::Arc;

use serde_json::Value;
use tracing::field::{Field, Visit};
use tracing_subscriber::field::{MakeVisitor, VisitFmt, VisitOutput};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::MakeWriter;

use crate::log_filter::LogFilter;

/// Field formatter adapter that redacts sensitive field values
///
/// Works with any formatter built on a visitor, such as
/// `tracing_subscriber::fmt::format::DefaultFields`.
#[derive(Debug, Clone)]
pub struct RedactingFields<F> {
    inner: F,
    filter: Arc<LogFilter>,
}

impl<F> RedactingFields<F> {
    pub fn new(inner: F, filter: LogFilter) -> Self {
        Self::with_shared(inner, Arc::new(filter))
    }

    pub fn with_shared(inner: F, filter: Arc<LogFilter>) -> Self {
        Self { inner, filter }
    }
}

impl<'a, F> MakeVisitor<Writer<'a>> for RedactingFields<F>
where
    F: MakeVisitor<Writer<'a>>,
{
    type Visitor = RedactingVisitor<F::Visitor>;

    fn make_visitor(&self, target: Writer<'a>) -> Self::Visitor {
        RedactingVisitor {
            inner: self.inner.make_visitor(target),
            filter: Arc::clone(&self.filter),
        }
    }
}

/// Visitor produced by [`RedactingFields`]
#[derive(Debug)]
pub struct RedactingVisitor<V> {
    inner: V,
    filter: Arc<LogFilter>,
}

impl<V: Visit> Visit for RedactingVisitor<V> {
    fn record_str(&mut self, field: &Field, value: &str) {
        match self.filter.redact(value) {
            Cow::Owned(redacted) => self.inner.record_str(field, &redacted),
            Cow::Borrowed(value) => self.inner.record_str(field, value),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let text = format!("{:?}", value);
        match self.filter.redact(&text) {
            Cow::Owned(redacted) => self.inner.record_debug(field, &format_args!("{}", redacted)),
            Cow::Borrowed(_) => self.inner.record_debug(field, value),
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.inner.record_i64(field, value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.inner.record_u64(field, value);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.inner.record_f64(field, value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.inner.record_bool(field, value);
    }
}

impl<V: VisitOutput<fmt::Result>> VisitOutput<fmt::Result> for RedactingVisitor<V> {
    fn finish(self) -> fmt::Result {
        self.inner.finish()
    }
}

impl<V: VisitFmt> VisitFmt for RedactingVisitor<V> {
    fn writer(&mut self) -> &mut dyn fmt::Write {
        self.inner.writer()
    }
}

/// `MakeWriter` adapter applying a [`LogFilter`] to each written line
#[derive(Debug, Clone)]
pub struct RedactingMakeWriter<M> {
    inner: M,
    filter: Arc<LogFilter>,
}

impl<M> RedactingMakeWriter<M> {
    pub fn new(inner: M, filter: LogFilter) -> Self {
        Self::with_shared(inner, Arc::new(filter))
    }

    pub fn with_shared(inner: M, filter: Arc<LogFilter>) -> Self {
        Self { inner, filter }
    }
}

impl<'a, M> MakeWriter<'a> for RedactingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = RedactingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter::new(self.inner.make_writer(), self.filter.clone())
    }
}

/// Writer produced by [`RedactingMakeWriter`]
///
/// The formatter hands over one complete event per `write` call; each line in
/// the buffer is filtered on its own.
#[derive(Debug)]
pub struct RedactingWriter<W> {
    inner: W,
    filter: Arc<LogFilter>,
}

impl<W> RedactingWriter<W> {
    pub fn new(inner: W, filter: Arc<LogFilter>) -> Self {
        Self { inner, filter }
    }

    /// Consume the writer and return the wrapped sink
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn filter_line<'l>(&self, line: &'l str) -> Cow<'l, str> {
        let body = line.trim_end_matches(['\r', '\n']);
        if body.trim_start().starts_with('{') {
            if let Ok(mut value) = serde_json::from_str::<Value>(body) {
                if !redact_strings(&self.filter, &mut value) {
                    return Cow::Borrowed(line);
                }
                if let Ok(json) = serde_json::to_string(&value) {
                    return Cow::Owned(format!("{}{}", json, &line[body.len()..]));
                }
            }
        }
        self.filter.redact(line)
    }
}

/// Redact every string inside `value`; true when anything changed
fn redact_strings(filter: &LogFilter, value: &mut Value) -> bool {
    match value {
        Value::String(text) => {
            let redacted = match filter.redact(text) {
                Cow::Owned(redacted) => redacted,
                Cow::Borrowed(_) => return false,
            };
            *text = redacted;
            true
        }
        Value::Array(items) => items
            .iter_mut()
            .fold(false, |changed, item| redact_strings(filter, item) || changed),
        Value::Object(map) => map
            .values_mut()
            .fold(false, |changed, item| redact_strings(filter, item) || changed),
        _ => false,
    }
}

impl<W: io::Write> io::Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let mut filtered = String::with_capacity(text.len());
        for line in text.split_inclusive('\n') {
            filtered.push_str(&self.filter_line(line));
        }
        self.inner.write_all(filtered.as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
