//! Error types produced while fitting material data or evaluating drawing passes.

use serde::Serialize;
use thiserror::Error;

use crate::numeric::Token;

/// Reason a regression or material fit has no defined result.
///
/// A fit never panics on bad data. Callers check for this value before using the
/// fitted constants downstream.
#[derive(Clone, Copy, Debug, Error, PartialEq, Serialize)]
pub enum FitError {
    /// Returned when the two input columns differ in length.
    #[error("sample columns differ in length ({xs} x values, {ys} y values)")]
    LengthMismatch {
        /// Number of entries in the x column.
        xs: usize,
        /// Number of entries in the y column.
        ys: usize,
    },
    /// Returned when no pair in the input parses as two finite numbers.
    #[error("no valid samples to fit")]
    NoValidSamples,
    /// Returned when the slope is not finite, e.g. every x value is identical.
    #[error("regression slope is undefined (denominator is zero)")]
    DegenerateSlope,
    /// Returned when the back-transformed constants are not finite.
    #[error("fitted constants are not finite (K = {k}, N = {n})")]
    NonFiniteConstants {
        /// Strength coefficient after back-transformation.
        k: f64,
        /// Strain-hardening exponent.
        n: f64,
    },
}

/// Error returned when a drawing pass cannot be evaluated.
///
/// The arithmetic is never attempted for these inputs.
///
/// # Examples
///
/// ```
/// use drawx::{evaluate_pass, GeometryError};
///
/// let error = evaluate_pass(10.0, 20.0, 0.0, 0.1, 500.0, 0.2)
///     .expect_err("zero semi-angle rejected");
/// assert_eq!(error, GeometryError::ZeroSemiAngle);
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq, Serialize)]
pub enum GeometryError {
    /// Returned when a scalar argument is NaN or infinite.
    #[error("invalid input: {parameter} must be finite (received {value})")]
    NonFinite {
        /// Name of the offending argument.
        parameter: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when the die semi-angle is zero.
    #[error("invalid input: die semi-angle must not be zero")]
    ZeroSemiAngle,
    /// Returned when the rod diameter before the pass is zero or negative.
    #[error("invalid input: diameter must be positive (received {0})")]
    NonPositiveDiameter(f64),
    /// Returned when the area reduction lies outside `[0, 100)` percent.
    #[error("invalid input: reduction must lie in [0, 100) percent (received {0})")]
    ReductionOutOfRange(f64),
    /// Returned when the friction coefficient is negative.
    #[error("invalid input: friction coefficient must not be negative (received {0})")]
    NegativeFriction(f64),
}

/// Non-fatal record emitted while reading sample columns.
///
/// Diagnostics never change a numeric result beyond excluding the offending pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Diagnostic {
    /// A pair was skipped because one of its tokens is not a finite number.
    RejectedSample {
        /// Position of the pair in the input columns.
        index: usize,
        /// Raw x token.
        x: Token,
        /// Raw y token.
        y: Token,
    },
    /// The x and y columns differ in length.
    LengthMismatch {
        /// Number of entries in the x column.
        xs: usize,
        /// Number of entries in the y column.
        ys: usize,
    },
}
