//! A single error occurrence.
//!
//! `ErrorInstance` is a plain value: code, message, criticality and an
//! append-only trace of caller-supplied call-site annotations. Registry
//! lookups hand out fresh copies, so appending to one instance never
//! touches the catalogue or any other copy.
//!
//! # Memory
//!
//! Messages composed at runtime embed the values that failed a check.
//! Owned message and trace text is zeroized on drop; borrowed `'static`
//! text points at program memory and is left alone.

use crate::definitions::{NO_ERROR, NO_ERROR_MESSAGE};
use crate::logging::{TRACE_SEPARATOR, truncate_with_indicator};
use crate::ErrorCode;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;
use zeroize::Zeroize;

/// Maximum stored message length in bytes.
pub const MAX_MESSAGE_LEN: usize = 1024;

/// Inline capacity of the trace before it spills to the heap.
const INLINE_TRACE_POINTS: usize = 4;

type Trace = SmallVec<[Cow<'static, str>; INLINE_TRACE_POINTS]>;

/// One error occurrence.
///
/// # Example
///
/// ```rust
/// use error_criteria::{ErrorCode, ErrorInstance};
///
/// let mut err = ErrorInstance::new(ErrorCode::const_new(200), "Input file is missing.");
/// err.add_point_to_trace("read_input");
/// err.add_point_to_trace("main");
///
/// assert!(err.is_critical());
/// assert_eq!(err.trace(), ["read_input", "main"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "errors should be inspected or triggered"]
pub struct ErrorInstance {
    code: ErrorCode,
    message: Cow<'static, str>,
    critical: bool,
    trace: Trace,
}

impl ErrorInstance {
    /// Create a critical error.
    #[inline]
    pub fn new(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_criticality(code, message, true)
    }

    /// Create a non-critical error (a warning when triggered).
    #[inline]
    pub fn warning(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_criticality(code, message, false)
    }

    /// Create an error with explicit criticality.
    pub fn with_criticality(
        code: ErrorCode,
        message: impl Into<Cow<'static, str>>,
        critical: bool,
    ) -> Self {
        Self {
            code,
            message: bounded(message.into()),
            critical,
            trace: SmallVec::new(),
        }
    }

    /// Create an error with a code only: empty message, critical.
    #[inline]
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, "")
    }

    /// The "no error" sentinel.
    #[inline]
    pub fn no_error() -> Self {
        Self::warning(NO_ERROR, NO_ERROR_MESSAGE)
    }

    /// Replace the trace with the given points.
    pub fn with_trace<I, P>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Cow<'static, str>>,
    {
        self.clear_trace();
        self.trace.extend(points.into_iter().map(Into::into));
        self
    }

    /// Append one point to the trace.
    #[inline]
    pub fn add_point_to_trace(&mut self, point: impl Into<Cow<'static, str>>) {
        self.trace.push(point.into());
    }

    /// Return a copy of this error with `point` appended to its trace.
    ///
    /// `self` is left untouched.
    pub fn with_point(&self, point: impl Into<Cow<'static, str>>) -> Self {
        let mut copy = self.clone();
        copy.add_point_to_trace(point);
        copy
    }

    /// Get the error code.
    #[inline]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Whether triggering this error halts the process.
    #[inline]
    pub const fn is_critical(&self) -> bool {
        self.critical
    }

    /// Trace points in the order they were added.
    #[inline]
    pub fn trace(&self) -> &[Cow<'static, str>] {
        &self.trace
    }

    /// Whether this is the "no error" sentinel.
    #[inline]
    pub fn is_no_error(&self) -> bool {
        self.code == NO_ERROR
    }

    pub(crate) fn set_message(&mut self, message: impl Into<Cow<'static, str>>) {
        let mut previous = std::mem::replace(&mut self.message, bounded(message.into()));
        if let Cow::Owned(ref mut s) = previous {
            s.zeroize();
        }
    }

    fn clear_trace(&mut self) {
        for point in self.trace.iter_mut() {
            if let Cow::Owned(s) = point {
                s.zeroize();
            }
        }
        self.trace.clear();
    }
}

impl Default for ErrorInstance {
    fn default() -> Self {
        Self::no_error()
    }
}

impl Zeroize for ErrorInstance {
    fn zeroize(&mut self) {
        if let Cow::Owned(ref mut s) = self.message {
            s.zeroize();
        }
        self.clear_trace();
    }
}

impl Drop for ErrorInstance {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Display for ErrorInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())?;
        if !self.trace.is_empty() {
            f.write_str(" (trace: ")?;
            for (i, point) in self.trace.iter().enumerate() {
                if i > 0 {
                    f.write_str(TRACE_SEPARATOR)?;
                }
                f.write_str(point)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

fn bounded(message: Cow<'static, str>) -> Cow<'static, str> {
    if message.len() <= MAX_MESSAGE_LEN {
        return message;
    }
    let truncated = truncate_with_indicator(&message, MAX_MESSAGE_LEN).into_owned();
    if let Cow::Owned(mut original) = message {
        original.zeroize();
    }
    Cow::Owned(truncated)
}
