//! # Error Criteria
//!
//! A registry of numbered errors plus nine numeric validation criteria that
//! produce them.
//!
//! ## Design Philosophy
//!
//! 1. **Errors are values**: a check returns an [`ErrorInstance`], either the
//!    "no error" sentinel (code 0) or a failure carrying a code, a message
//!    and an ordered trace of call-site annotations
//! 2. **Codes are the contract**: a triggered critical error ends the process
//!    with its code as exit status
//! 3. **Validation is pure**: checks never mutate the registry; only
//!    [`ErrorHandler::trigger`] acts on criticality
//! 4. **Misuse is loud**: duplicate codes, protected removals and inverted
//!    bounds are bugs, reported as [`RegistryViolation`] by the `checked_*`
//!    forms and as panics by the plain forms
//!
//! ## Lifecycle
//!
//! 1. Build a handler with [`HandlerBuilder`] (or [`ErrorCriteria::init`]).
//!    There is no uninitialized state to guard against.
//! 2. Register application codes and optionally remap criterion codes.
//! 3. Run checks, collect the returned instances and pass them to
//!    `trigger`.
//!
//! ## Quick Start
//!
//! ```rust
//! use error_criteria::{CheckOptions, ErrorCode, ErrorCriteria, HandlerBuilder};
//!
//! const DENSITY_INVALID: ErrorCode = ErrorCode::const_new(300);
//!
//! let criteria = ErrorCriteria::from_builder(
//!     HandlerBuilder::new()
//!         .error(DENSITY_INVALID, "Density table is malformed.", true)
//!         .colors(false),
//! );
//!
//! let cells = 12;
//! let errors = [
//!     criteria.limit(cells, Some(0), Some(10)),
//!     criteria.not_equal_with(cells, 5, &CheckOptions::new().trace("mesh::refine")),
//! ];
//!
//! assert_eq!(errors[0].message(), "Value must be between 0 and 10. Given value: 12.");
//! assert!(errors[1].is_no_error());
//!
//! // `criteria.trigger(&errors)` would print the first error and exit with
//! // status 105. `dispatch` does the same reporting without exiting.
//! let mut out = String::new();
//! assert_eq!(criteria.dispatch(&errors, &mut out).map(|c| c.value()), Some(105));
//! ```
//!
//! ## Remapping Criterion Codes
//!
//! ```rust
//! use error_criteria::{ErrorCode, ErrorCriteria};
//!
//! let mut criteria = ErrorCriteria::init();
//! criteria.modify_error_criterion_code_by_index(5, ErrorCode::const_new(500));
//!
//! assert_eq!(criteria.limit(-1, Some(0), None).code().value(), 500);
//! assert!(criteria.checked_remove(ErrorCode::const_new(500)).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod checks;
pub mod codes;
pub mod criteria;
pub mod definitions;
pub mod handler;
pub mod instance;
pub mod logging;
pub mod numeric;
pub mod ring_buffer;
pub mod violation;

pub use checks::CheckOptions;
pub use codes::*;
pub use criteria::{Criterion, CriterionEntry, ErrorCriteria};
pub use definitions::*;
pub use handler::{ErrorDefinition, ErrorHandler, HandlerBuilder};
pub use instance::{ErrorInstance, MAX_MESSAGE_LEN};
pub use logging::{ConsoleSink, OutputStyle, ReportSink, TriggerLog};
pub use numeric::CriterionValue;
pub use ring_buffer::{ReportBuffer, ReportEntry};
pub use violation::RegistryViolation;

/// Type alias for results of registry operations.
pub type Result<T> = std::result::Result<T, RegistryViolation>;
