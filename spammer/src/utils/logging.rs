use std::collections::HashMap;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{
    field::{Field, Visit},
    Event, Level, Subscriber,
};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::{format::Writer, FormatEvent, FormatFields};
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Span fields shown in their own columns by the pretty formatter.
const COLUMN_FIELDS: &[&str] = &["worker", "account"];

const DEFAULT_DIRECTIVES: &str = "blob_spammer=info,blob_spammer_codec=info";

/// Fields recorded on a span, kept in its extensions for the formatters.
#[derive(Debug, Clone, Default)]
pub struct SpanFields {
    pub raw_fields: HashMap<String, String>,
}

impl SpanFields {
    fn add_field(&mut self, name: &str, value: String) {
        self.raw_fields.insert(name.to_string(), value);
    }
}

#[derive(Default)]
struct SpanFieldCollector {
    fields: SpanFields,
}

impl Visit for SpanFieldCollector {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let formatted_value = format!("{:?}", value).trim_matches('"').to_string();
        self.fields.add_field(field.name(), formatted_value);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.add_field(field.name(), value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.add_field(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.add_field(field.name(), value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.add_field(field.name(), value.to_string());
    }
}

pub struct FieldCollectorLayer;

impl<S> Layer<S> for FieldCollectorLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &tracing::span::Attributes<'_>, id: &tracing::span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };

        let mut collector = SpanFieldCollector::default();
        attrs.record(&mut collector);
        span.extensions_mut().insert(collector.fields);
    }

    fn on_record(&self, id: &tracing::span::Id, values: &tracing::span::Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };

        let mut extensions = span.extensions_mut();
        let mut collector = SpanFieldCollector { fields: extensions.remove::<SpanFields>().unwrap_or_default() };
        values.record(&mut collector);
        extensions.insert(collector.fields);
    }
}

/// Span fields of the innermost span carrying them, if any.
fn current_span_fields<S, N>(ctx: &FmtContext<'_, S, N>) -> Option<SpanFields>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    let scope = ctx.event_scope()?;
    for span in scope {
        if let Some(fields) = span.extensions().get::<SpanFields>() {
            if !fields.raw_fields.is_empty() {
                return Some(fields.clone());
            }
        }
    }
    None
}

// Pretty formatter is formatted for console readability
pub struct PrettyFormatter;

impl<S, N> FormatEvent<S, N> for PrettyFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let meta = event.metadata();
        let now = Utc::now().format("%y-%m-%d %H:%M:%S").to_string();

        let ts_color = "\x1b[96m";
        let level_color = match *meta.level() {
            Level::TRACE => "\x1b[90m",
            Level::DEBUG => "\x1b[34m",
            Level::INFO => "\x1b[32m",
            Level::WARN => "\x1b[33m",
            Level::ERROR => "\x1b[31m",
        };
        let msg_color = "\x1b[97m";
        let column_color = "\x1b[92m";
        let reset = "\x1b[0m";
        let dim_color = "\x1b[90m";

        let span_fields = current_span_fields(ctx).unwrap_or_default();
        let worker = span_fields.raw_fields.get("worker").map(String::as_str).unwrap_or("-");
        let account = span_fields.raw_fields.get("account").map(|a| short_account(a)).unwrap_or_else(|| "-".into());

        let mut visitor = FieldExtractor::default();
        event.record(&mut visitor);

        // Timestamp | Level (5) | Worker (6) | Account (13) | Service (8) | Message and fields
        write!(writer, "{}{}{} ", ts_color, now, reset)?;
        write!(writer, "{}|{} ", dim_color, reset)?;
        write!(writer, "{}{:<5}{} ", level_color, *meta.level(), reset)?;
        write!(writer, "{}|{} ", dim_color, reset)?;
        write!(writer, "{}{:<6}{} ", column_color, worker, reset)?;
        write!(writer, "{}|{} ", dim_color, reset)?;
        write!(writer, "{}{:<13}{} ", column_color, account, reset)?;
        write!(writer, "{}|{} ", dim_color, reset)?;
        write!(writer, "{}{:<8}{} ", column_color, extract_service_name(meta.target()), reset)?;
        write!(writer, "{}|{} ", dim_color, reset)?;

        write!(writer, "{}{}{}", msg_color, visitor.message, reset)?;
        if !visitor.fields.is_empty() {
            write!(writer, " ({}{}{})", msg_color, visitor.fields, reset)?;
        }

        writeln!(writer)
    }
}

/// `0x1234abcd...` shortened to `0x1234…abcd`.
fn short_account(account: &str) -> String {
    if account.len() <= 13 || !account.is_char_boundary(6) || !account.is_char_boundary(account.len() - 4) {
        return account.to_string();
    }
    format!("{}…{}", &account[..6], &account[account.len() - 4..])
}

#[derive(Default)]
struct FieldExtractor {
    message: String,
    fields: String,
}

impl Visit for FieldExtractor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let fixed_field_color = "\x1b[90m";
        let reset = "\x1b[0m";

        if field.name() == "message" {
            self.message = format!("{:?}", value).trim_matches('"').to_string();
        } else if !COLUMN_FIELDS.contains(&field.name()) {
            let formatted_value = format!("{:?}", value).trim_matches('"').to_string();
            if !self.fields.is_empty() {
                self.fields.push_str(", ");
            }
            self.fields.push_str(&format!("{}{}={}{}", fixed_field_color, field.name(), formatted_value, reset));
        }
    }
}

/// One JSON object per line
pub struct JsonEventFormatter;

#[derive(Default)]
struct JsonFieldVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl Visit for JsonFieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let v = format!("{:?}", value).trim_matches('"').to_string();
        if field.name() == "message" {
            self.message = Some(v);
        } else {
            self.fields.insert(field.name().to_string(), Value::String(v));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.insert(field.name().to_string(), Value::String(value.to_string()));
        }
    }
}

impl<S, N> FormatEvent<S, N> for JsonEventFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let meta = event.metadata();
        let ts = Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut visitor = JsonFieldVisitor::default();
        event.record(&mut visitor);

        let mut root = Map::new();
        root.insert("timestamp".to_string(), Value::String(ts));
        root.insert("level".to_string(), Value::String(meta.level().to_string()));
        root.insert("target".to_string(), Value::String(meta.target().to_string()));
        root.insert("service".to_string(), Value::String(extract_service_name(meta.target()).to_string()));
        if let Some(file) = meta.file() {
            root.insert("filename".to_string(), Value::String(file.to_string()));
        }
        if let Some(line) = meta.line() {
            root.insert("line_number".to_string(), Value::from(line));
        }
        if let Some(message) = visitor.message.take() {
            root.insert("message".to_string(), Value::String(message));
        }

        let mut all_fields = visitor.fields;
        if let Some(span) = ctx.lookup_current() {
            all_fields.insert("span_name".to_string(), Value::String(span.metadata().name().to_string()));
        }
        if let Some(span_fields) = current_span_fields(ctx) {
            for (key, value) in span_fields.raw_fields {
                all_fields.entry(key).or_insert(Value::String(value));
            }
        }
        if !all_fields.is_empty() {
            root.insert("fields".to_string(), Value::Object(all_fields));
        }

        let line = serde_json::to_string(&Value::Object(root)).map_err(|_| std::fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

/// Initialize the tracing subscriber with
/// - PrettyFormatter for console readability (when LOG_FORMAT != "json")
/// - JsonEventFormatter for json logging (when LOG_FORMAT = "json")
///
/// This will also install color_eyre to handle panics.
pub fn init_logging() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::builder().with_default_directive(Level::INFO.into()).parse(DEFAULT_DIRECTIVES)?,
    };

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let base = Registry::default().with(env_filter).with(FieldCollectorLayer);

    if log_format == "json" {
        let fmt_layer = fmt::layer().with_file(true).with_line_number(true).event_format(JsonEventFormatter);
        tracing::subscriber::set_global_default(base.with(fmt_layer).with(ErrorLayer::default()))?;
    } else {
        let fmt_layer = fmt::layer().with_file(true).with_line_number(true).event_format(PrettyFormatter);
        tracing::subscriber::set_global_default(base.with(fmt_layer).with(ErrorLayer::default()))?;
    }
    Ok(())
}

/// Maps crate names to short display names for the service column
fn extract_service_name(target: &str) -> &'static str {
    if target.starts_with("blob_spammer_codec") {
        "CODEC"
    } else if target.starts_with("blob_spammer") {
        "-"
    } else {
        "EXTERNAL"
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("blob_spammer_codec::sidecar", "CODEC")]
    #[case("blob_spammer::worker::dispatch", "-")]
    #[case("alloy_transport_http", "EXTERNAL")]
    fn service_column(#[case] target: &str, #[case] expected: &str) {
        assert_eq!(extract_service_name(target), expected);
    }

    #[rstest]
    #[case("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266", "0xf39F…2266")]
    #[case("0xabc", "0xabc")]
    fn account_column(#[case] account: &str, #[case] expected: &str) {
        assert_eq!(short_account(account), expected);
    }
}
