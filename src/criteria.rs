//! The nine numeric criteria and the registry that owns their codes.
//!
//! [`ErrorCriteria`] wraps an [`ErrorHandler`] and keeps a table from each
//! [`Criterion`] to its current code. The table's codes are always present
//! in the wrapped catalogue, which is why removing one of them through the
//! generic `remove` path is refused: only the `modify_*` operations may
//! move a criterion to another code.
//!
//! # Fixed Order
//!
//! Criteria carry a public 1-based index. The order is part of the
//! contract since codes can be remapped by index:
//!
//! | Index | Name          | Default code |
//! |-------|---------------|--------------|
//! | 1     | `nonZero`     | 101          |
//! | 2     | `zero`        | 102          |
//! | 3     | `lessThan`    | 103          |
//! | 4     | `greaterThan` | 104          |
//! | 5     | `limit`       | 105          |
//! | 6     | `notEqual`    | 106          |
//! | 7     | `equal`       | 107          |
//! | 8     | `positive`    | 108          |
//! | 9     | `negative`    | 109          |
//!
//! # Example
//!
//! ```rust
//! use error_criteria::{Criterion, ErrorCode, ErrorCriteria};
//!
//! let mut criteria = ErrorCriteria::init();
//! criteria.modify_error_criterion_code_by_name("limit", ErrorCode::const_new(500));
//!
//! assert_eq!(criteria.get_code_from_criterion_name("limit").value(), 500);
//! assert_eq!(criteria.code_of(Criterion::Limit).value(), 500);
//! assert!(!criteria.contains(ErrorCode::const_new(105)));
//! ```

use crate::definitions::{
    DEFAULT_EPSILON, EQUAL_FAILED, GREATER_THAN_FAILED, LESS_THAN_FAILED, LIMIT_FAILED,
    NEGATIVE_FAILED, NON_ZERO_FAILED, NOT_EQUAL_FAILED, NO_ERROR, POSITIVE_FAILED, ZERO_FAILED,
};
use crate::handler::{ErrorDefinition, ErrorHandler, HandlerBuilder};
use crate::violation::or_fail;
use crate::{ErrorCode, ErrorInstance, RegistryViolation, Result};
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

// ============================================================================
// Criterion Identity
// ============================================================================

/// One of the nine numeric validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Criterion {
    /// Value differs from zero.
    NonZero,
    /// Value is zero.
    Zero,
    /// Value does not exceed an upper bound.
    LessThan,
    /// Value is not below a lower bound.
    GreaterThan,
    /// Value lies within optional bounds.
    Limit,
    /// Value differs from a criterion.
    NotEqual,
    /// Value matches a criterion.
    Equal,
    /// Value is strictly positive.
    Positive,
    /// Value is strictly negative.
    Negative,
}

impl Criterion {
    /// Number of criteria.
    pub const COUNT: usize = 9;

    /// All criteria in index order.
    pub const ALL: [Criterion; Self::COUNT] = [
        Self::NonZero,
        Self::Zero,
        Self::LessThan,
        Self::GreaterThan,
        Self::Limit,
        Self::NotEqual,
        Self::Equal,
        Self::Positive,
        Self::Negative,
    ];

    /// Public 1-based index.
    #[inline]
    pub const fn index(self) -> usize {
        self.slot() + 1
    }

    /// Criterion for a 1-based index.
    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= 1 && index <= Self::COUNT {
            Some(Self::ALL[index - 1])
        } else {
            None
        }
    }

    /// Canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NonZero => "nonZero",
            Self::Zero => "zero",
            Self::LessThan => "lessThan",
            Self::GreaterThan => "greaterThan",
            Self::Limit => "limit",
            Self::NotEqual => "notEqual",
            Self::Equal => "equal",
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }

    /// Criterion with the given canonical name (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Code assigned at initialization.
    pub const fn default_code(self) -> ErrorCode {
        match self {
            Self::NonZero => NON_ZERO_FAILED,
            Self::Zero => ZERO_FAILED,
            Self::LessThan => LESS_THAN_FAILED,
            Self::GreaterThan => GREATER_THAN_FAILED,
            Self::Limit => LIMIT_FAILED,
            Self::NotEqual => NOT_EQUAL_FAILED,
            Self::Equal => EQUAL_FAILED,
            Self::Positive => POSITIVE_FAILED,
            Self::Negative => NEGATIVE_FAILED,
        }
    }

    /// Catalogue message registered at initialization.
    ///
    /// Failed checks normally replace it with a composed message that
    /// includes the offending value.
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::NonZero => "Value must be non-zero.",
            Self::Zero => "Value must be zero.",
            Self::LessThan => "Value is greater than the upper bound.",
            Self::GreaterThan => "Value is less than the lower bound.",
            Self::Limit => "Value is outside the allowed limits.",
            Self::NotEqual => "Value must not be equal to the criterion.",
            Self::Equal => "Value must be equal to the criterion.",
            Self::Positive => "Value must be positive.",
            Self::Negative => "Value must be negative.",
        }
    }

    #[inline]
    const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Criterion {
    type Err = RegistryViolation;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| RegistryViolation::UnknownCriterionName {
            name: s.to_owned(),
        })
    }
}

/// Read-only view of one criterion's current registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriterionEntry<'a> {
    /// Which criterion.
    pub criterion: Criterion,
    /// Current code.
    pub code: ErrorCode,
    /// Catalogue message for the current code.
    pub message: &'a str,
    /// Catalogue criticality for the current code.
    pub critical: bool,
}

// ============================================================================
// Extended Registry
// ============================================================================

/// An [`ErrorHandler`] extended with the criterion table and a default
/// tolerance for real comparisons.
///
/// Dereferences to the wrapped handler for read access (`contains`,
/// `get_error_from_code`, `dispatch`, `trigger*`, ...). Mutations go through
/// the methods below so criterion codes stay protected.
#[derive(Debug, Clone)]
pub struct ErrorCriteria {
    handler: ErrorHandler,
    codes: [ErrorCode; Criterion::COUNT],
    epsilon: f64,
}

impl ErrorCriteria {
    /// Default handler plus the nine criteria on codes 101..=109.
    pub fn init() -> Self {
        Self::from_builder(HandlerBuilder::new())
    }

    /// Build the handler from `builder`, then register the criteria.
    #[track_caller]
    pub fn from_builder(builder: HandlerBuilder) -> Self {
        or_fail(Self::checked_from_builder(builder))
    }

    /// Fallible form of [`from_builder`](Self::from_builder).
    ///
    /// # Errors
    ///
    /// [`RegistryViolation::DuplicateCode`] if a builder definition uses
    /// one of the default criterion codes.
    pub fn checked_from_builder(builder: HandlerBuilder) -> Result<Self> {
        Self::checked_from_handler(builder.checked_build()?)
    }

    /// Register the criteria into an existing handler.
    pub fn checked_from_handler(mut handler: ErrorHandler) -> Result<Self> {
        Self::seed(&mut handler)?;
        Ok(Self {
            handler,
            codes: Criterion::ALL.map(Criterion::default_code),
            epsilon: DEFAULT_EPSILON,
        })
    }

    fn seed(handler: &mut ErrorHandler) -> Result<()> {
        let defaults =
            Criterion::ALL.map(|c| ErrorDefinition::new(c.default_code(), c.default_message()));
        handler.checked_add_many(&defaults)
    }

    /// Full reset: catalogue, criterion codes and epsilon return to their
    /// defaults, then `definitions` are added. The output style is kept.
    ///
    /// On error nothing changes.
    pub fn checked_reinit(
        &mut self,
        definitions: impl IntoIterator<Item = ErrorDefinition>,
    ) -> Result<()> {
        let mut handler = self.handler.clone();
        handler.checked_reinit(std::iter::empty())?;
        Self::seed(&mut handler)?;
        let definitions: Vec<ErrorDefinition> = definitions.into_iter().collect();
        handler.checked_add_many(&definitions)?;

        self.handler = handler;
        self.codes = Criterion::ALL.map(Criterion::default_code);
        self.epsilon = DEFAULT_EPSILON;
        Ok(())
    }

    /// Full reset, halting on a duplicate definition.
    #[track_caller]
    pub fn reinit(&mut self, definitions: impl IntoIterator<Item = ErrorDefinition>) {
        or_fail(self.checked_reinit(definitions))
    }

    /// The wrapped handler.
    #[inline]
    pub fn handler(&self) -> &ErrorHandler {
        &self.handler
    }

    /// Unwrap into the plain handler. Criterion codes stay registered.
    pub fn into_handler(self) -> ErrorHandler {
        self.handler
    }

    // ------------------------------------------------------------------------
    // Tolerance
    // ------------------------------------------------------------------------

    /// Default tolerance for real comparisons.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Set the default tolerance for real comparisons.
    #[inline]
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    // ------------------------------------------------------------------------
    // Table views
    // ------------------------------------------------------------------------

    /// Current code of `criterion`.
    #[inline]
    pub fn code_of(&self, criterion: Criterion) -> ErrorCode {
        self.codes[criterion.slot()]
    }

    /// Current registration of `criterion`.
    pub fn entry(&self, criterion: Criterion) -> CriterionEntry<'_> {
        let code = self.code_of(criterion);
        CriterionEntry {
            criterion,
            code,
            message: self.handler.message(code).unwrap_or(criterion.default_message()),
            critical: self.handler.is_critical(code).unwrap_or(true),
        }
    }

    /// All registrations in index order.
    pub fn criteria(&self) -> impl Iterator<Item = CriterionEntry<'_>> + '_ {
        Criterion::ALL.into_iter().map(move |c| self.entry(c))
    }

    /// Current code for `name`, or code 0 when the name is unknown.
    pub fn get_code_from_criterion_name(&self, name: &str) -> ErrorCode {
        Criterion::from_name(name).map_or(NO_ERROR, |c| self.code_of(c))
    }

    /// 1-based index for `name`, or 0 when the name is unknown.
    pub fn get_index_from_criterion_name(&self, name: &str) -> usize {
        Criterion::from_name(name).map_or(0, Criterion::index)
    }

    /// Criterion currently using `code`, if any.
    pub fn criterion_for_code(&self, code: ErrorCode) -> Option<Criterion> {
        Criterion::ALL.into_iter().find(|&c| self.code_of(c) == code)
    }

    // ------------------------------------------------------------------------
    // Remapping
    // ------------------------------------------------------------------------

    /// Move criteria to new codes in one step.
    ///
    /// Each old catalogue entry is detached and re-added under its new code
    /// with the same message and criticality. Either every change applies
    /// or none does.
    fn checked_remap(&mut self, changes: &[(Criterion, ErrorCode)]) -> Result<()> {
        let mut handler = self.handler.clone();
        let mut detached = Vec::with_capacity(changes.len());
        for &(criterion, new_code) in changes {
            let old_code = self.code_of(criterion);
            if old_code == new_code {
                continue;
            }
            let (message, critical) = handler.checked_take(old_code)?;
            detached.push((criterion, new_code, message, critical));
        }
        for (_, new_code, message, critical) in &detached {
            handler.checked_add(*new_code, message.clone(), *critical)?;
        }

        self.handler = handler;
        for (criterion, new_code, _, _) in detached {
            self.codes[criterion.slot()] = new_code;
        }
        Ok(())
    }

    /// Assign new codes to all nine criteria, in index order.
    ///
    /// # Errors
    ///
    /// [`RegistryViolation::DuplicateCode`] if a new code is already used by
    /// a non-criterion entry or repeated within `codes`.
    pub fn checked_modify_error_criteria_codes(
        &mut self,
        codes: [ErrorCode; Criterion::COUNT],
    ) -> Result<()> {
        let changes: Vec<(Criterion, ErrorCode)> = Criterion::ALL.into_iter().zip(codes).collect();
        self.checked_remap(&changes)
    }

    /// Assign new codes to all nine criteria, halting on a violation.
    #[track_caller]
    pub fn modify_error_criteria_codes(&mut self, codes: [ErrorCode; Criterion::COUNT]) {
        or_fail(self.checked_modify_error_criteria_codes(codes))
    }

    /// Assign a new code to the criterion at 1-based `index`.
    ///
    /// # Errors
    ///
    /// [`RegistryViolation::UnknownCriterionIndex`] if `index` is not 1..=9,
    /// otherwise as
    /// [`checked_modify_error_criteria_codes`](Self::checked_modify_error_criteria_codes).
    pub fn checked_modify_error_criterion_code_by_index(
        &mut self,
        index: usize,
        code: ErrorCode,
    ) -> Result<()> {
        let criterion =
            Criterion::from_index(index).ok_or(RegistryViolation::UnknownCriterionIndex { index })?;
        self.checked_remap(&[(criterion, code)])
    }

    /// Assign a new code by index, halting on a violation.
    #[track_caller]
    pub fn modify_error_criterion_code_by_index(&mut self, index: usize, code: ErrorCode) {
        or_fail(self.checked_modify_error_criterion_code_by_index(index, code))
    }

    /// Assign a new code to the criterion called `name`.
    pub fn checked_modify_error_criterion_code_by_name(
        &mut self,
        name: &str,
        code: ErrorCode,
    ) -> Result<()> {
        let criterion: Criterion = name.parse()?;
        self.checked_remap(&[(criterion, code)])
    }

    /// Assign a new code by name, halting on a violation.
    #[track_caller]
    pub fn modify_error_criterion_code_by_name(&mut self, name: &str, code: ErrorCode) {
        or_fail(self.checked_modify_error_criterion_code_by_name(name, code))
    }

    // ------------------------------------------------------------------------
    // Catalogue maintenance
    // ------------------------------------------------------------------------

    /// Register one code. See [`ErrorHandler::checked_add`].
    pub fn checked_add(
        &mut self,
        code: ErrorCode,
        message: impl Into<Cow<'static, str>>,
        critical: bool,
    ) -> Result<()> {
        self.handler.checked_add(code, message, critical)
    }

    /// Register one code, halting if it already exists.
    #[track_caller]
    pub fn add(&mut self, code: ErrorCode, message: impl Into<Cow<'static, str>>, critical: bool) {
        or_fail(self.checked_add(code, message, critical))
    }

    /// Register several definitions atomically.
    pub fn checked_add_many(&mut self, definitions: &[ErrorDefinition]) -> Result<()> {
        self.handler.checked_add_many(definitions)
    }

    /// Register several definitions, halting on any duplicate.
    #[track_caller]
    pub fn add_many(&mut self, definitions: &[ErrorDefinition]) {
        or_fail(self.checked_add_many(definitions))
    }

    fn ensure_unprotected(&self, code: ErrorCode) -> Result<()> {
        match self.criterion_for_code(code) {
            Some(criterion) => Err(RegistryViolation::ProtectedCriterionCode {
                code,
                criterion: criterion.name(),
            }),
            None => Ok(()),
        }
    }

    /// Remove one code.
    ///
    /// # Errors
    ///
    /// [`RegistryViolation::ProtectedCriterionCode`] if `code` currently
    /// belongs to a criterion, otherwise as [`ErrorHandler::checked_remove`].
    pub fn checked_remove(&mut self, code: ErrorCode) -> Result<()> {
        self.ensure_unprotected(code)?;
        self.handler.checked_remove(code)
    }

    /// Remove one code, halting if it is protected, reserved or unknown.
    #[track_caller]
    pub fn remove(&mut self, code: ErrorCode) {
        or_fail(self.checked_remove(code))
    }

    /// Remove several codes atomically.
    pub fn checked_remove_many(&mut self, codes: &[ErrorCode]) -> Result<()> {
        for &code in codes {
            self.ensure_unprotected(code)?;
        }
        self.handler.checked_remove_many(codes)
    }

    /// Remove several codes, halting on any violation.
    #[track_caller]
    pub fn remove_many(&mut self, codes: &[ErrorCode]) {
        or_fail(self.checked_remove_many(codes))
    }

    // ------------------------------------------------------------------------
    // Failure construction
    // ------------------------------------------------------------------------

    /// Fresh catalogue instance for `criterion`'s current code.
    pub(crate) fn template(&self, criterion: Criterion) -> ErrorInstance {
        self.handler.get_error_from_code(self.code_of(criterion))
    }
}

impl Deref for ErrorCriteria {
    type Target = ErrorHandler;

    fn deref(&self) -> &Self::Target {
        &self.handler
    }
}

impl From<ErrorCriteria> for ErrorHandler {
    fn from(criteria: ErrorCriteria) -> Self {
        criteria.into_handler()
    }
}
