//! Numeric types accepted by the criteria.
//!
//! Integers compare exactly and ignore any tolerance. Reals compare
//! against a tolerance `epsilon`, converted to the value's own precision
//! before use.
//!
//! | Comparison    | Integer     | Real                               |
//! |---------------|-------------|------------------------------------|
//! | `is_zero`     | `v == 0`    | `|v| < eps`                        |
//! | `is_non_zero` | `v != 0`    | `|v| > eps`                        |
//! | `approx_eq`   | `v == c`    | `c - eps <= v && v <= c + eps`     |
//!
//! A real whose magnitude equals `eps` is therefore neither zero nor
//! non-zero. NaN fails every check except `notEqual`.

use std::fmt;

mod sealed {
    pub trait Sealed {}
}

/// A value the criteria can check.
///
/// Sealed: implemented for the built-in integer and floating point types.
pub trait CriterionValue: Copy + PartialOrd + fmt::Display + sealed::Sealed {
    /// The additive identity.
    const ZERO: Self;

    /// Whether comparisons use a tolerance.
    const TOLERANT: bool;

    /// Zero test.
    fn is_zero(self, epsilon: f64) -> bool;

    /// Non-zero test.
    fn is_non_zero(self, epsilon: f64) -> bool;

    /// Equality test against `criterion`.
    fn approx_eq(self, criterion: Self, epsilon: f64) -> bool;
}

macro_rules! impl_exact {
    ($($t:ty),+ $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl CriterionValue for $t {
                const ZERO: Self = 0;
                const TOLERANT: bool = false;

                #[inline]
                fn is_zero(self, _epsilon: f64) -> bool {
                    self == 0
                }

                #[inline]
                fn is_non_zero(self, _epsilon: f64) -> bool {
                    self != 0
                }

                #[inline]
                fn approx_eq(self, criterion: Self, _epsilon: f64) -> bool {
                    self == criterion
                }
            }
        )+
    };
}

macro_rules! impl_tolerant {
    ($($t:ty),+ $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl CriterionValue for $t {
                const ZERO: Self = 0.0;
                const TOLERANT: bool = true;

                #[inline]
                fn is_zero(self, epsilon: f64) -> bool {
                    self.abs() < epsilon as $t
                }

                #[inline]
                fn is_non_zero(self, epsilon: f64) -> bool {
                    self.abs() > epsilon as $t
                }

                #[inline]
                fn approx_eq(self, criterion: Self, epsilon: f64) -> bool {
                    let epsilon = epsilon as $t;
                    criterion - epsilon <= self && self <= criterion + epsilon
                }
            }
        )+
    };
}

impl_exact!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_tolerant!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_ignore_epsilon() {
        assert!(0_i32.is_zero(10.0));
        assert!(!1_i32.is_zero(10.0));
        assert!(1_i64.is_non_zero(10.0));
        assert!(!5_u8.approx_eq(6, 10.0));
        assert!(!i32::TOLERANT);
    }

    #[test]
    fn reals_use_strict_zero_bands() {
        assert!(0.25_f64.is_zero(0.5));
        assert!(!0.5_f64.is_zero(0.5));
        assert!(!0.5_f64.is_non_zero(0.5));
        assert!((-0.75_f64).is_non_zero(0.5));
        assert!(f64::TOLERANT);
    }

    #[test]
    fn reals_equal_within_closed_band() {
        assert!(1.5_f64.approx_eq(1.0, 0.5));
        assert!(0.5_f64.approx_eq(1.0, 0.5));
        assert!(!1.75_f64.approx_eq(1.0, 0.5));
        assert!(1.25_f32.approx_eq(1.0, 0.25));
    }

    #[test]
    fn nan_is_never_zero_or_equal() {
        assert!(!f64::NAN.is_zero(1.0));
        assert!(!f64::NAN.is_non_zero(1.0));
        assert!(!f64::NAN.approx_eq(0.0, 1.0));
    }
}
