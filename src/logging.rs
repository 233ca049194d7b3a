//! Rendering of triggered errors.
//!
//! # Properties
//!
//! - `TriggerLog` borrows from the error and the handler's style, with an
//!   explicit lifetime; it exists only for the duration of one report
//! - Rendering writes straight into a `fmt::Write` without intermediate
//!   buffers
//! - Every field is truncated to `MAX_FIELD_OUTPUT_LEN` so a runaway message
//!   or trace cannot flood the console
//!
//! Critical errors go to the error channel, warnings to the warning channel.
//! Where those channels lead is decided by the [`ReportSink`] in use.

use crate::{ErrorCode, ErrorInstance};
use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};

/// Maximum length for any individual field in formatted output
pub const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Truncation indicator appended to truncated strings
pub const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Separator between trace points.
pub const TRACE_SEPARATOR: &str = " > ";

const ANSI_BOLD_RED: &str = "\x1b[1;31m";
const ANSI_BOLD_YELLOW: &str = "\x1b[1;33m";
const ANSI_RESET: &str = "\x1b[0m";

/// Presentation settings captured at handler initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputStyle {
    /// Printed before critical messages.
    pub critical_prefix: Cow<'static, str>,
    /// Printed before non-critical messages.
    pub warning_prefix: Cow<'static, str>,
    /// Printed after every message.
    pub message_suffix: Cow<'static, str>,
    /// Colour the prefix with ANSI escape sequences.
    pub colors: bool,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            critical_prefix: Cow::Borrowed("Error:"),
            warning_prefix: Cow::Borrowed("Warning:"),
            message_suffix: Cow::Borrowed(""),
            colors: true,
        }
    }
}

/// Borrowed view of one error being reported.
#[derive(Debug, Clone, Copy)]
pub struct TriggerLog<'a> {
    code: ErrorCode,
    message: &'a str,
    critical: bool,
    trace: &'a [Cow<'static, str>],
    style: &'a OutputStyle,
}

impl<'a> TriggerLog<'a> {
    /// Build a view of `error` rendered with `style`.
    #[inline]
    pub fn new(error: &'a ErrorInstance, style: &'a OutputStyle) -> Self {
        Self {
            code: error.code(),
            message: error.message(),
            critical: error.is_critical(),
            trace: error.trace(),
            style,
        }
    }

    /// Write the report without allocating.
    ///
    /// Layout: `{prefix} {message}{suffix}`, followed by an indented
    /// `Trace:` line when trace points are present.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        let prefix = truncate_with_indicator(self.prefix(), MAX_FIELD_OUTPUT_LEN);
        if !prefix.is_empty() {
            if self.style.colors {
                let color = if self.critical { ANSI_BOLD_RED } else { ANSI_BOLD_YELLOW };
                write!(f, "{color}{prefix}{ANSI_RESET} ")?;
            } else {
                write!(f, "{prefix} ")?;
            }
        }

        write!(
            f,
            "{}{}",
            truncate_with_indicator(self.message, MAX_FIELD_OUTPUT_LEN),
            truncate_with_indicator(&self.style.message_suffix, MAX_FIELD_OUTPUT_LEN)
        )?;

        if !self.trace.is_empty() {
            f.write_str("\n    Trace: ")?;
            for (i, point) in self.trace.iter().enumerate() {
                if i > 0 {
                    f.write_str(TRACE_SEPARATOR)?;
                }
                write!(f, "{}", truncate_with_indicator(point, MAX_FIELD_OUTPUT_LEN))?;
            }
        }

        Ok(())
    }

    /// Render into a fresh `String`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out);
        out
    }

    /// Code of the reported error.
    #[inline]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Message as stored in the error.
    #[inline]
    pub const fn message(&self) -> &str {
        self.message
    }

    /// Whether the report is critical.
    #[inline]
    pub const fn is_critical(&self) -> bool {
        self.critical
    }

    /// Trace points, oldest first.
    #[inline]
    pub const fn trace(&self) -> &[Cow<'static, str>] {
        self.trace
    }

    fn prefix(&self) -> &str {
        if self.critical {
            &self.style.critical_prefix
        } else {
            &self.style.warning_prefix
        }
    }
}

/// Destination for triggered reports.
pub trait ReportSink {
    /// Receive one report. Called once per non-sentinel error processed.
    fn report(&mut self, log: &TriggerLog<'_>);
}

/// Writes critical reports to stderr and warnings to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn report(&mut self, log: &TriggerLog<'_>) {
        let line = log.render();
        // A closed console leaves nothing to report to.
        if log.is_critical() {
            let _ = writeln!(io::stderr().lock(), "{line}");
        } else {
            let _ = writeln!(io::stdout().lock(), "{line}");
        }
    }
}

/// Appends each rendered report as one line.
impl ReportSink for String {
    fn report(&mut self, log: &TriggerLog<'_>) {
        let _ = log.write_to(self);
        self.push('\n');
    }
}

/// Truncate a string for display to at most `max` bytes.
///
/// If the string exceeds `max`, it's truncated at a UTF-8 boundary with
/// an indicator to make the truncation visible to operators. A `max`
/// shorter than the indicator keeps only the indicator's first `max` bytes.
///
/// Returns a Cow<str> to avoid allocation when no truncation is needed.
pub(crate) fn truncate_with_indicator(s: &str, max: usize) -> Cow<'_, str> {
    if s.len() <= max {
        return Cow::Borrowed(s);
    }

    if max < TRUNCATION_INDICATOR.len() {
        return Cow::Borrowed(&TRUNCATION_INDICATOR[..max]);
    }
    let max_content_len = max - TRUNCATION_INDICATOR.len();

    let mut idx = max_content_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(&s[..idx]);
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}
