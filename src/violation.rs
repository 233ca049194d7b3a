//! Contract violations.
//!
//! These describe bugs in the calling code (duplicate registrations,
//! removing protected codes, inverted bounds, unknown criteria), as opposed
//! to data-validation failures, which are ordinary `ErrorInstance` values.
//!
//! Every fallible registry operation exists twice: a `checked_*` form that
//! returns `Result<_, RegistryViolation>`, and a fail-loud form that panics
//! with the violation's message.

use crate::codes::InvalidCode;
use crate::ErrorCode;
use std::fmt;

/// A misuse of the registry or criteria API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryViolation {
    /// Code is already registered.
    DuplicateCode {
        /// The code being added.
        code: ErrorCode,
    },
    /// Code is not registered.
    UnknownCode {
        /// The code being removed or remapped.
        code: ErrorCode,
    },
    /// Code 0 or 1, which the registry owns.
    ReservedCode {
        /// The reserved code.
        code: ErrorCode,
    },
    /// Code currently belongs to a criterion and may only move via remap.
    ProtectedCriterionCode {
        /// The protected code.
        code: ErrorCode,
        /// Name of the criterion owning it.
        criterion: &'static str,
    },
    /// Criterion index outside 1..=9.
    UnknownCriterionIndex {
        /// The rejected index.
        index: usize,
    },
    /// Criterion name not among the nine known names.
    UnknownCriterionName {
        /// The rejected name.
        name: String,
    },
    /// `limit` called with a lower bound above its upper bound.
    InvertedBounds {
        /// Lower bound, formatted.
        lbound: String,
        /// Upper bound, formatted.
        ubound: String,
    },
    /// Parallel input slices of different lengths.
    MismatchedLengths {
        /// Number of codes supplied.
        codes: usize,
        /// Number of messages supplied.
        messages: usize,
        /// Number of criticality flags supplied.
        critical: usize,
    },
    /// Raw value does not form a valid code.
    InvalidCode(InvalidCode),
}

impl fmt::Display for RegistryViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCode { code } => {
                write!(f, "Error code {} is already registered", code)
            }
            Self::UnknownCode { code } => {
                write!(f, "Error code {} is not registered", code)
            }
            Self::ReservedCode { code } => {
                write!(f, "Error code {} is reserved by the registry", code)
            }
            Self::ProtectedCriterionCode { code, criterion } => {
                write!(
                    f,
                    "Error code {} belongs to criterion '{}' and cannot be removed; \
                     use modify_error_criterion_code_by_name to change it",
                    code, criterion
                )
            }
            Self::UnknownCriterionIndex { index } => {
                write!(f, "Criterion index {} is out of range (must be 1-9)", index)
            }
            Self::UnknownCriterionName { name } => {
                write!(f, "Criterion '{}' does not exist", name)
            }
            Self::InvertedBounds { lbound, ubound } => {
                write!(
                    f,
                    "Lower bound {} is greater than upper bound {}",
                    lbound, ubound
                )
            }
            Self::MismatchedLengths {
                codes,
                messages,
                critical,
            } => {
                write!(
                    f,
                    "Input lengths differ: {} codes, {} messages, {} criticality flags",
                    codes, messages, critical
                )
            }
            Self::InvalidCode(inner) => fmt::Display::fmt(inner, f),
        }
    }
}

impl std::error::Error for RegistryViolation {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidCode(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<InvalidCode> for RegistryViolation {
    fn from(inner: InvalidCode) -> Self {
        Self::InvalidCode(inner)
    }
}

/// Halt on a contract violation.
///
/// Panicking on the main thread ends the process; the message names the
/// violation so the offending call site can be fixed.
#[cold]
#[track_caller]
pub(crate) fn fail_fast(violation: RegistryViolation) -> ! {
    panic!("{}", violation)
}

/// Unwrap a checked result or halt with its violation.
#[inline]
#[track_caller]
pub(crate) fn or_fail<T>(result: Result<T, RegistryViolation>) -> T {
    match result {
        Ok(value) => value,
        Err(violation) => fail_fast(violation),
    }
}
