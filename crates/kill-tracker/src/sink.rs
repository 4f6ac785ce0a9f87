//! Outbound sinks for rendered reports.

use serde_json::json;
use std::io::Write;

use crate::report::{format_report, Report};

/// Receives the text the tracker wants shown to the player.
pub trait ReportSink {
    /// Delivers one plain message.
    fn deliver(&mut self, message: &str);

    /// Delivers a kill report. Renders it as a chat line by default.
    fn deliver_report(&mut self, report: &Report) {
        self.deliver(&format_report(report));
    }
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn deliver(&mut self, message: &str) {
        (**self).deliver(message);
    }

    fn deliver_report(&mut self, report: &Report) {
        (**self).deliver_report(report);
    }
}

/// In-memory chat buffer.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    lines: Vec<String>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl ReportSink for ChatLog {
    fn deliver(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }
}

/// How a [`WriterSink`] renders its lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Chat text, one message per line
    #[default]
    Text,
    /// One JSON object per line
    JsonLines,
}

/// Writes each message as a line to any writer.
///
/// Write failures are logged and counted; they never reach the caller.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
    format: OutputFormat,
    failed_writes: u64,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            failed_writes: 0,
        }
    }

    /// Number of lines that could not be written.
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.writer, "{}", line) {
            self.failed_writes += 1;
            tracing::warn!("Failed to write report line: {}", e);
        }
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn deliver(&mut self, message: &str) {
        match self.format {
            OutputFormat::Text => self.write_line(message),
            OutputFormat::JsonLines => {
                let line = json!({ "message": message }).to_string();
                self.write_line(&line);
            }
        }
    }

    fn deliver_report(&mut self, report: &Report) {
        match self.format {
            OutputFormat::Text => self.write_line(&format_report(report)),
            OutputFormat::JsonLines => match serde_json::to_string(report) {
                Ok(line) => self.write_line(&line),
                Err(e) => {
                    self.failed_writes += 1;
                    tracing::warn!("Failed to serialize report: {}", e);
                }
            },
        }
    }
}
