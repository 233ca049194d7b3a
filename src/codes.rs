//! Error code identity.
//!
//! Every registered error is identified by a numeric code. The code doubles
//! as the process exit status when a critical error is triggered, so it is
//! bounded below [`ErrorCode::MAX`] to stay meaningful on every platform the
//! registry runs on.
//!
//! # Construction APIs
//!
//! - `const_new`: for const statics (panics = compile error)
//! - `checked_new`: for runtime construction (returns `Result`, never panics)
//!
//! # Example
//!
//! ```rust
//! use error_criteria::{ErrorCode, define_error_codes};
//!
//! define_error_codes! {
//!     INPUT_FILE_MISSING = 200,
//!     INPUT_FILE_EMPTY = 201,
//! }
//!
//! assert_eq!(INPUT_FILE_MISSING.value(), 200);
//! assert!(ErrorCode::checked_new(100_000).is_err());
//! ```

use std::fmt;

/// A registry error code, guaranteed to be below [`ErrorCode::MAX`].
///
/// # Copy Semantics
///
/// Codes are small numeric values used as catalogue keys and exit
/// statuses; they are passed by value everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ErrorCode(u32);

impl ErrorCode {
    /// Exclusive upper bound for any code.
    pub const MAX: u32 = 99_999;

    /// Create a code with compile-time validation.
    ///
    /// # Panics
    ///
    /// Panics at compile time (in const contexts) or at runtime if
    /// `code >= ErrorCode::MAX`.
    #[inline]
    pub const fn const_new(code: u32) -> Self {
        assert!(code < Self::MAX, "Error code must be below 99999");
        Self(code)
    }

    /// Create a code with runtime validation.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCode`] if `code >= ErrorCode::MAX`.
    #[inline]
    pub const fn checked_new(code: u32) -> Result<Self, InvalidCode> {
        if code >= Self::MAX {
            Err(InvalidCode::OutOfRange { value: code })
        } else {
            Ok(Self(code))
        }
    }

    /// Get the raw numeric value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Exit status used when this code halts the process.
    #[inline]
    pub const fn exit_status(self) -> i32 {
        // MAX keeps every code inside i32.
        self.0 as i32
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for ErrorCode {
    type Error = InvalidCode;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::checked_new(value)
    }
}

impl From<ErrorCode> for u32 {
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}

/// Error type for code validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidCode {
    /// Code is not below `ErrorCode::MAX`.
    OutOfRange {
        /// The rejected value.
        value: u32,
    },
}

impl fmt::Display for InvalidCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { value } => {
                write!(f, "Error code {} is out of range (must be below {})", value, ErrorCode::MAX)
            }
        }
    }
}

impl std::error::Error for InvalidCode {}

/// Define a single error code as a const.
///
/// Leading attributes, doc comments included, are applied to the const.
///
/// ```rust
/// # use error_criteria::define_error_code;
/// define_error_code!(SOLVER_DIVERGED, 300);
/// define_error_code!(
///     /// The mesh has fewer than three cells.
///     MESH_TOO_SMALL,
///     301
/// );
/// assert_eq!(SOLVER_DIVERGED.value(), 300);
/// assert_eq!(MESH_TOO_SMALL.value(), 301);
/// ```
#[macro_export]
macro_rules! define_error_code {
    ($(#[$meta:meta])* $name:ident, $code:expr) => {
        $(#[$meta])*
        pub const $name: $crate::ErrorCode = $crate::ErrorCode::const_new($code);
    };
}

/// Define several error codes at once.
///
/// ```rust
/// # use error_criteria::define_error_codes;
/// define_error_codes! {
///     GRID_TOO_SMALL = 310,
///     GRID_TOO_LARGE = 311,
/// }
/// assert!(GRID_TOO_SMALL < GRID_TOO_LARGE);
/// ```
#[macro_export]
macro_rules! define_error_codes {
    ($( $(#[$meta:meta])* $name:ident = $code:expr ),+ $(,)?) => {
        $(
            $crate::define_error_code!($(#[$meta])* $name, $code);
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn const_construction() {
        const CODE: ErrorCode = ErrorCode::const_new(105);
        assert_eq!(CODE.value(), 105);
        assert_eq!(CODE.to_string(), "105");
        assert_eq!(CODE.exit_status(), 105);
    }

    #[test]
    fn checked_new_rejects_max_and_above() {
        assert_eq!(
            ErrorCode::checked_new(ErrorCode::MAX),
            Err(InvalidCode::OutOfRange { value: 99_999 })
        );
        assert!(ErrorCode::checked_new(u32::MAX).is_err());
        assert!(ErrorCode::checked_new(99_998).is_ok());
        assert!(ErrorCode::checked_new(0).is_ok());
    }

    #[test]
    #[should_panic(expected = "below 99999")]
    fn const_new_panics_at_runtime() {
        let raw = std::hint::black_box(120_000);
        let _ = ErrorCode::const_new(raw);
    }

    #[test]
    fn try_from_round_trips_through_u32() {
        let code = ErrorCode::try_from(42).unwrap();
        assert_eq!(u32::from(code), 42);
    }

    #[test]
    fn violation_message_names_value() {
        let err = ErrorCode::checked_new(100_000).unwrap_err();
        assert!(err.to_string().contains("100000"));
    }

    #[test]
    fn macro_batch_definition() {
        define_error_codes! {
            READ_FAILED = 700,
            WRITE_FAILED = 701,
        }

        assert_eq!(READ_FAILED.value(), 700);
        assert_eq!(WRITE_FAILED.value(), 701);
    }

    #[test]
    fn macros_forward_attributes() {
        define_error_code!(
            /// Cache entry went stale.
            #[allow(dead_code)]
            CACHE_STALE,
            710
        );
        define_error_codes! {
            /// Cache could not be opened.
            CACHE_OPEN_FAILED = 711,
            #[allow(dead_code)]
            /// Cache is full.
            CACHE_FULL = 712,
        }

        assert_eq!(CACHE_STALE.value(), 710);
        assert_eq!(CACHE_OPEN_FAILED.value(), 711);
        assert_eq!(CACHE_FULL.value(), 712);
    }
}
