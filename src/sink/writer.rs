//! Row writers

use super::types::{FieldValue, Row};
use crate::error::{Error, Result};
use std::io::Write;
use tracing::warn;

/// Destination for rows
pub trait Sink {
    fn write(&mut self, rows: &[Row]) -> Result<()>;
}

/// One JSON object per line
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for JsonLinesSink<W> {
    fn write(&mut self, rows: &[Row]) -> Result<()> {
        for row in rows {
            serde_json::to_writer(&mut self.writer, row)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// InfluxDB line protocol with nanosecond timestamps
#[derive(Debug)]
pub struct LineProtocolSink<W: Write> {
    writer: W,
}

impl<W: Write> LineProtocolSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for LineProtocolSink<W> {
    fn write(&mut self, rows: &[Row]) -> Result<()> {
        for row in rows {
            match to_line(row)? {
                Some(line) => writeln!(self.writer, "{line}")?,
                None => warn!(measurement = %row.measurement, "Skipping row without fields"),
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Render one row; `None` when it has no fields
pub fn to_line(row: &Row) -> Result<Option<String>> {
    if row.fields.is_empty() {
        return Ok(None);
    }

    let mut line = escape(&row.measurement, &[',', ' ']);
    for (key, value) in &row.tags {
        line.push(',');
        line.push_str(&escape(key, &[',', '=', ' ']));
        line.push('=');
        line.push_str(&escape(value, &[',', '=', ' ']));
    }

    let fields: Vec<String> = row
        .fields
        .iter()
        .map(|(key, value)| format!("{}={}", escape(key, &[',', '=', ' ']), field_literal(value)))
        .collect();
    line.push(' ');
    line.push_str(&fields.join(","));

    let nanos = row
        .time
        .and_utc()
        .timestamp_nanos_opt()
        .ok_or_else(|| Error::Other(format!("Timestamp out of range: {}", row.time)))?;
    line.push(' ');
    line.push_str(&nanos.to_string());
    Ok(Some(line))
}

fn field_literal(value: &FieldValue) -> String {
    match value {
        FieldValue::Float(v) => v.to_string(),
        FieldValue::Integer(v) => format!("{v}i"),
        FieldValue::Text(v) => format!("\"{}\"", escape(v, &['"', '\\'])),
        FieldValue::Bool(v) => v.to_string(),
    }
}

fn escape(text: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if special.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
