//! The criteria checks.
//!
//! Every check has the same shape:
//!
//! 1. Evaluate a pure predicate on the value.
//! 2. On pass, return the "no error" sentinel.
//! 3. On failure, copy the catalogue template for the criterion's current
//!    code, set either the caller's message or a composed one embedding the
//!    value, and append the caller's trace point if one was given.
//!
//! Checks take `&self` and never modify the registry, so a registry that
//! is no longer being mutated can be shared across threads and checked
//! concurrently.
//!
//! # Inclusive Bounds
//!
//! `less_than` and `greater_than` accept a value equal to the bound, the
//! same as the one-sided forms of `limit`.
//!
//! # Example
//!
//! ```rust
//! use error_criteria::{CheckOptions, ErrorCriteria};
//!
//! let criteria = ErrorCriteria::init();
//!
//! let err = criteria.limit(12, Some(0), Some(10));
//! assert_eq!(err.code().value(), 105);
//! assert_eq!(err.message(), "Value must be between 0 and 10. Given value: 12.");
//!
//! let err = criteria.positive_with(-2.5, &CheckOptions::new().trace("read_density"));
//! assert_eq!(err.message(), "Value must be positive. Given value: -2.5.");
//! assert_eq!(err.trace(), ["read_density"]);
//!
//! assert!(criteria.not_equal(1, 5).is_no_error());
//! ```

use crate::criteria::{Criterion, ErrorCriteria};
use crate::numeric::CriterionValue;
use crate::violation::or_fail;
use crate::{ErrorInstance, RegistryViolation, Result};
use std::borrow::Cow;

/// Per-call overrides for a check.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use = "options do nothing until passed to a check"]
pub struct CheckOptions {
    message: Option<Cow<'static, str>>,
    trace: Option<Cow<'static, str>>,
    epsilon: Option<f64>,
}

impl CheckOptions {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `message` verbatim instead of the composed message.
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Append `point` to the trace of a failure.
    pub fn trace(mut self, point: impl Into<Cow<'static, str>>) -> Self {
        self.trace = Some(point.into());
        self
    }

    /// Tolerance for real comparisons in this call only.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }
}

impl ErrorCriteria {
    fn effective_epsilon(&self, options: &CheckOptions) -> f64 {
        options.epsilon.unwrap_or_else(|| self.epsilon())
    }

    fn outcome(
        &self,
        criterion: Criterion,
        passed: bool,
        options: &CheckOptions,
        compose: impl FnOnce() -> String,
    ) -> ErrorInstance {
        if passed {
            return self.get_no_error();
        }
        let mut error = self.template(criterion);
        match &options.message {
            Some(message) => error.set_message(message.clone()),
            None => error.set_message(compose()),
        }
        if let Some(point) = &options.trace {
            error.add_point_to_trace(point.clone());
        }
        error
    }

    // ------------------------------------------------------------------------
    // limit
    // ------------------------------------------------------------------------

    /// Check that `value` lies within the given bounds.
    ///
    /// - both bounds: `lbound <= value <= ubound`
    /// - only `lbound`: `value >= lbound`
    /// - only `ubound`: `value <= ubound`
    /// - neither: always passes
    ///
    /// # Errors
    ///
    /// [`RegistryViolation::InvertedBounds`] if both bounds are given and
    /// `lbound > ubound`. This is a bug in the caller, not a failed check.
    pub fn checked_limit_with<T: CriterionValue>(
        &self,
        value: T,
        lbound: Option<T>,
        ubound: Option<T>,
        options: &CheckOptions,
    ) -> Result<ErrorInstance> {
        let error = match (lbound, ubound) {
            (Some(l), Some(u)) => {
                if l > u {
                    return Err(RegistryViolation::InvertedBounds {
                        lbound: l.to_string(),
                        ubound: u.to_string(),
                    });
                }
                self.outcome(Criterion::Limit, l <= value && value <= u, options, || {
                    format!("Value must be between {l} and {u}. Given value: {value}.")
                })
            }
            (Some(l), None) => self.outcome(Criterion::Limit, value >= l, options, || {
                format!("Value must be greater than {l}. Given value: {value}.")
            }),
            (None, Some(u)) => self.outcome(Criterion::Limit, value <= u, options, || {
                format!("Value must be less than {u}. Given value: {value}.")
            }),
            (None, None) => self.get_no_error(),
        };
        Ok(error)
    }

    /// [`checked_limit_with`](Self::checked_limit_with), halting on
    /// inverted bounds.
    #[track_caller]
    pub fn limit_with<T: CriterionValue>(
        &self,
        value: T,
        lbound: Option<T>,
        ubound: Option<T>,
        options: &CheckOptions,
    ) -> ErrorInstance {
        or_fail(self.checked_limit_with(value, lbound, ubound, options))
    }

    /// Bounds check with default options.
    #[track_caller]
    pub fn limit<T: CriterionValue>(
        &self,
        value: T,
        lbound: Option<T>,
        ubound: Option<T>,
    ) -> ErrorInstance {
        self.limit_with(value, lbound, ubound, &CheckOptions::default())
    }

    // ------------------------------------------------------------------------
    // nonZero / zero
    // ------------------------------------------------------------------------

    /// Check that `value` is non-zero: `|value| > epsilon` for reals,
    /// `value != 0` for integers.
    pub fn non_zero_with<T: CriterionValue>(
        &self,
        value: T,
        options: &CheckOptions,
    ) -> ErrorInstance {
        let epsilon = self.effective_epsilon(options);
        self.outcome(Criterion::NonZero, value.is_non_zero(epsilon), options, || {
            format!("Value must be non-zero. Given value: {value}.")
        })
    }

    /// Non-zero check with default options.
    pub fn non_zero<T: CriterionValue>(&self, value: T) -> ErrorInstance {
        self.non_zero_with(value, &CheckOptions::default())
    }

    /// Check that `value` is zero: `|value| < epsilon` for reals,
    /// `value == 0` for integers.
    pub fn zero_with<T: CriterionValue>(&self, value: T, options: &CheckOptions) -> ErrorInstance {
        let epsilon = self.effective_epsilon(options);
        self.outcome(Criterion::Zero, value.is_zero(epsilon), options, || {
            format!("Value must be zero. Given value: {value}.")
        })
    }

    /// Zero check with default options.
    pub fn zero<T: CriterionValue>(&self, value: T) -> ErrorInstance {
        self.zero_with(value, &CheckOptions::default())
    }

    // ------------------------------------------------------------------------
    // lessThan / greaterThan
    // ------------------------------------------------------------------------

    /// Check that `value <= ubound`.
    pub fn less_than_with<T: CriterionValue>(
        &self,
        value: T,
        ubound: T,
        options: &CheckOptions,
    ) -> ErrorInstance {
        self.outcome(Criterion::LessThan, value <= ubound, options, || {
            format!("Value must be less than {ubound}. Given value: {value}.")
        })
    }

    /// Upper bound check with default options.
    pub fn less_than<T: CriterionValue>(&self, value: T, ubound: T) -> ErrorInstance {
        self.less_than_with(value, ubound, &CheckOptions::default())
    }

    /// Check that `value >= lbound`.
    pub fn greater_than_with<T: CriterionValue>(
        &self,
        value: T,
        lbound: T,
        options: &CheckOptions,
    ) -> ErrorInstance {
        self.outcome(Criterion::GreaterThan, value >= lbound, options, || {
            format!("Value must be greater than {lbound}. Given value: {value}.")
        })
    }

    /// Lower bound check with default options.
    pub fn greater_than<T: CriterionValue>(&self, value: T, lbound: T) -> ErrorInstance {
        self.greater_than_with(value, lbound, &CheckOptions::default())
    }

    // ------------------------------------------------------------------------
    // notEqual / equal
    // ------------------------------------------------------------------------

    /// Check that `value` lies outside `[criterion - epsilon, criterion + epsilon]`
    /// for reals, or differs from `criterion` for integers.
    pub fn not_equal_with<T: CriterionValue>(
        &self,
        value: T,
        criterion: T,
        options: &CheckOptions,
    ) -> ErrorInstance {
        let epsilon = self.effective_epsilon(options);
        self.outcome(Criterion::NotEqual, !value.approx_eq(criterion, epsilon), options, || {
            format!("Value must not be equal to {criterion}. Given value: {value}.")
        })
    }

    /// Inequality check with default options.
    pub fn not_equal<T: CriterionValue>(&self, value: T, criterion: T) -> ErrorInstance {
        self.not_equal_with(value, criterion, &CheckOptions::default())
    }

    /// Check that `value` lies inside `[criterion - epsilon, criterion + epsilon]`
    /// for reals, or equals `criterion` for integers.
    pub fn equal_with<T: CriterionValue>(
        &self,
        value: T,
        criterion: T,
        options: &CheckOptions,
    ) -> ErrorInstance {
        let epsilon = self.effective_epsilon(options);
        self.outcome(Criterion::Equal, value.approx_eq(criterion, epsilon), options, || {
            format!("Value must be equal to {criterion}. Given value: {value}.")
        })
    }

    /// Equality check with default options.
    pub fn equal<T: CriterionValue>(&self, value: T, criterion: T) -> ErrorInstance {
        self.equal_with(value, criterion, &CheckOptions::default())
    }

    // ------------------------------------------------------------------------
    // positive / negative
    // ------------------------------------------------------------------------

    /// Check that `value > 0`.
    pub fn positive_with<T: CriterionValue>(
        &self,
        value: T,
        options: &CheckOptions,
    ) -> ErrorInstance {
        self.outcome(Criterion::Positive, value > T::ZERO, options, || {
            format!("Value must be positive. Given value: {value}.")
        })
    }

    /// Positivity check with default options.
    pub fn positive<T: CriterionValue>(&self, value: T) -> ErrorInstance {
        self.positive_with(value, &CheckOptions::default())
    }

    /// Check that `value < 0`.
    pub fn negative_with<T: CriterionValue>(
        &self,
        value: T,
        options: &CheckOptions,
    ) -> ErrorInstance {
        self.outcome(Criterion::Negative, value < T::ZERO, options, || {
            format!("Value must be negative. Given value: {value}.")
        })
    }

    /// Negativity check with default options.
    pub fn negative<T: CriterionValue>(&self, value: T) -> ErrorInstance {
        self.negative_with(value, &CheckOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::ReportSink;
    use crate::{ErrorCode, HandlerBuilder, TriggerLog};

    fn criteria() -> ErrorCriteria {
        ErrorCriteria::from_builder(HandlerBuilder::new().colors(false))
    }

    fn code(raw: u32) -> ErrorCode {
        ErrorCode::const_new(raw)
    }

    #[test]
    fn limit_scenario_out_of_range() {
        let err = criteria().limit(12, Some(0), Some(10));
        assert_eq!(err.code(), code(105));
        assert_eq!(err.message(), "Value must be between 0 and 10. Given value: 12.");
        assert!(err.is_critical());
        assert!(err.trace().is_empty());
    }

    #[test]
    fn limit_one_sided_forms() {
        let c = criteria();
        assert!(c.limit(5, Some(5), None).is_no_error());
        assert_eq!(
            c.limit(4, Some(5), None).message(),
            "Value must be greater than 5. Given value: 4."
        );
        assert!(c.limit(5, None, Some(5)).is_no_error());
        assert_eq!(
            c.limit(6, None, Some(5)).message(),
            "Value must be less than 5. Given value: 6."
        );
        assert!(c.limit(1_000_000, None, None).is_no_error());
    }

    #[test]
    fn limit_bounds_are_inclusive() {
        let c = criteria();
        assert!(c.limit(0, Some(0), Some(10)).is_no_error());
        assert!(c.limit(10, Some(0), Some(10)).is_no_error());
        assert!(c.limit(0.5, Some(0.5), Some(0.5)).is_no_error());
    }

    #[test]
    fn limit_rejects_inverted_bounds() {
        let c = criteria();
        assert_eq!(
            c.checked_limit_with(5, Some(10), Some(0), &CheckOptions::new()),
            Err(RegistryViolation::InvertedBounds {
                lbound: String::from("10"),
                ubound: String::from("0"),
            })
        );
    }

    #[test]
    #[should_panic(expected = "greater than upper bound")]
    fn limit_with_inverted_bounds_fails_loud() {
        let _ = criteria().limit(5.0, Some(1.0), Some(-1.0));
    }

    #[test]
    fn not_equal_scenario() {
        let c = criteria();
        assert!(c.limit(5, Some(0), Some(10)).is_no_error());
        let err = c.not_equal(5, 5);
        assert_eq!(err.code(), code(106));
        assert_eq!(err.message(), "Value must not be equal to 5. Given value: 5.");
    }

    #[test]
    fn passing_pair_triggers_nothing() {
        let c = criteria();
        let errors = [c.limit(1, Some(0), Some(10)), c.not_equal(1, 5)];
        assert!(errors.iter().all(ErrorInstance::is_no_error));

        let mut sink = String::new();
        assert_eq!(c.dispatch(&errors, &mut sink), None);
        assert!(sink.is_empty());
    }

    #[test]
    fn less_than_is_inclusive() {
        let c = criteria();
        assert!(c.less_than(5, 5).is_no_error());
        let err = c.less_than(6, 5);
        assert_eq!(err.code(), code(103));
        assert_eq!(err.message(), "Value must be less than 5. Given value: 6.");
    }

    #[test]
    fn greater_than_is_inclusive() {
        let c = criteria();
        assert!(c.greater_than(5, 5).is_no_error());
        let err = c.greater_than(4.5, 5.0);
        assert_eq!(err.code(), code(104));
        assert_eq!(err.message(), "Value must be greater than 5. Given value: 4.5.");
    }

    #[test]
    fn non_zero_integer_and_real() {
        let c = criteria();
        assert!(c.non_zero(1_i8).is_no_error());
        let err = c.non_zero(0_i64);
        assert_eq!(err.code(), code(101));
        assert_eq!(err.message(), "Value must be non-zero. Given value: 0.");

        assert!(c.non_zero(1.0e-3).is_no_error());
        assert!(!c.non_zero(1.0e-6).is_no_error());
        assert!(!c.non_zero_with(0.25, &CheckOptions::new().epsilon(0.5)).is_no_error());
    }

    #[test]
    fn zero_integer_and_real() {
        let c = criteria();
        assert!(c.zero(0_u32).is_no_error());
        assert!(c.zero(1.0e-6_f32).is_no_error());
        let err = c.zero(0.5);
        assert_eq!(err.code(), code(102));
        assert_eq!(err.message(), "Value must be zero. Given value: 0.5.");
        assert!(c.zero_with(0.25, &CheckOptions::new().epsilon(0.5)).is_no_error());
        assert!(!c.zero(3_i16).is_no_error());
    }

    #[test]
    fn zero_band_edge_fails_both_ways() {
        let c = criteria();
        let options = CheckOptions::new().epsilon(0.5);
        assert!(!c.zero_with(0.5, &options).is_no_error());
        assert!(!c.non_zero_with(-0.5, &options).is_no_error());
    }

    #[test]
    fn equal_epsilon_edges() {
        let c = criteria();
        let options = CheckOptions::new().epsilon(0.5);
        assert!(c.equal_with(1.25, 1.0, &options).is_no_error());
        assert!(c.equal_with(1.5, 1.0, &options).is_no_error());
        assert!(c.equal_with(0.5, 1.0, &options).is_no_error());

        let err = c.equal_with(1.75, 1.0, &options);
        assert_eq!(err.code(), code(107));
        assert_eq!(err.message(), "Value must be equal to 1. Given value: 1.75.");
    }

    #[test]
    fn not_equal_epsilon_edges() {
        let c = criteria();
        let options = CheckOptions::new().epsilon(0.5);
        assert!(!c.not_equal_with(1.5, 1.0, &options).is_no_error());
        assert!(c.not_equal_with(1.75, 1.0, &options).is_no_error());
        assert!(c.not_equal(5, 6).is_no_error());
    }

    #[test]
    fn integer_equality_ignores_epsilon() {
        let c = criteria();
        let options = CheckOptions::new().epsilon(100.0);
        assert!(!c.equal_with(5, 6, &options).is_no_error());
        assert!(c.not_equal_with(5, 6, &options).is_no_error());
    }

    #[test]
    fn default_epsilon_is_configurable() {
        let mut c = criteria();
        assert!(!c.equal(1.1, 1.0).is_no_error());
        c.set_epsilon(0.25);
        assert!(c.equal(1.1, 1.0).is_no_error());
        assert!(!c.equal_with(1.1, 1.0, &CheckOptions::new().epsilon(0.01)).is_no_error());
    }

    #[test]
    fn positive_and_negative_are_strict() {
        let c = criteria();
        assert!(c.positive(1).is_no_error());
        assert!(!c.positive(0).is_no_error());
        assert!(c.negative(-1.0e-9).is_no_error());
        let err = c.negative(0.0);
        assert_eq!(err.code(), code(109));
        assert_eq!(err.message(), "Value must be negative. Given value: 0.");
        assert_eq!(c.positive(0_u8).code(), code(108));
        assert!(!c.negative(7_usize).is_no_error());
    }

    #[test]
    fn custom_message_is_used_verbatim() {
        let c = criteria();
        let err = c.positive_with(-3, &CheckOptions::new().message("Density must be positive."));
        assert_eq!(err.message(), "Density must be positive.");
        assert_eq!(err.code(), code(108));
    }

    #[test]
    fn trace_point_only_on_failure() {
        let c = criteria();
        let options = CheckOptions::new().trace("solver::step");
        assert!(c.positive_with(3, &options).trace().is_empty());
        assert_eq!(c.positive_with(-3, &options).trace(), ["solver::step"]);
    }

    #[test]
    fn remapped_code_is_used_by_checks() {
        let mut c = criteria();
        c.modify_error_criterion_code_by_name("positive", code(4000));
        assert_eq!(c.positive(-1).code(), code(4000));
    }

    #[test]
    fn failure_carries_catalogue_criticality() {
        let c = criteria();
        assert_eq!(c.is_critical(c.code_of(Criterion::Zero)), Some(true));
        assert!(c.zero(1).is_critical());
        assert!(c.zero(0).trace().is_empty());
    }

    #[test]
    fn failures_render_through_the_handler_style() {
        let c = criteria();
        let err = c.less_than_with(11, 10, &CheckOptions::new().trace("main"));
        struct Capture(String);
        impl ReportSink for Capture {
            fn report(&mut self, log: &TriggerLog<'_>) {
                self.0 = log.render();
            }
        }
        let mut sink = Capture(String::new());
        assert_eq!(c.dispatch([&err], &mut sink), Some(code(103)));
        assert_eq!(
            sink.0,
            "Error: Value must be less than 10. Given value: 11.\n    Trace: main"
        );
    }

    #[test]
    fn checks_run_concurrently_on_a_shared_registry() {
        let c = criteria();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let c = &c;
                    scope.spawn(move || c.limit(i * 10, Some(0), Some(15)).code().value())
                })
                .collect();
            let codes: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert_eq!(codes, [0, 0, 105, 105]);
        });
    }
}
