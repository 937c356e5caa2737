//! Ordinary least-squares line fitting over raw token columns.

use serde::Serialize;

use crate::errors::{Diagnostic, FitError};
use crate::numeric::Token;

/// Slope and intercept of a fitted straight line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Line {
    /// Change in y per unit x.
    pub slope: f64,
    /// Value of y at x = 0.
    pub intercept: f64,
    /// Number of sample pairs that contributed to the fit.
    pub samples: usize,
}

impl Line {
    /// Evaluate the line at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Outcome of [`fit`]: the line (or the reason it is undefined) and the diagnostics
/// raised while reading the samples.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Regression {
    /// The fitted line, or why none exists.
    pub line: Result<Line, FitError>,
    /// Non-fatal records about skipped input.
    pub diagnostics: Vec<Diagnostic>,
}

/// Running sums for the closed-form least-squares solution.
#[derive(Default)]
struct Sums {
    /// Number of accepted pairs.
    count: usize,
    /// Σx
    x: f64,
    /// Σy
    y: f64,
    /// Σxy
    xy: f64,
    /// Σx²
    xx: f64,
}

impl Sums {
    /// Accumulate one accepted pair.
    fn push(&mut self, x: f64, y: f64) {
        self.count += 1;
        self.x += x;
        self.y += y;
        self.xy += x * y;
        self.xx += x * x;
    }

    /// Solve for the line through the accumulated pairs.
    fn solve(&self) -> Result<Line, FitError> {
        if self.count == 0 {
            return Err(FitError::NoValidSamples);
        }
        let m = self.count as f64;
        let slope = (m * self.xy - self.x * self.y) / (m * self.xx - self.x * self.x);
        if !slope.is_finite() {
            return Err(FitError::DegenerateSlope);
        }
        let intercept = self.y / m - slope * (self.x / m);
        Ok(Line {
            slope,
            intercept,
            samples: self.count,
        })
    }
}

/// Fit `y = slope·x + intercept` by ordinary least squares.
///
/// Pairs are matched by position. A pair where either token is not a finite number
/// is skipped and reported as [`Diagnostic::RejectedSample`]; the remaining pairs are
/// still fitted. Columns of different length are a shape error and leave the line
/// undefined.
///
/// # Examples
/// ```
/// use drawx::{regression, Token};
///
/// let xs: Vec<Token> = vec![0.0.into(), 1.0.into(), "oops".into(), 2.0.into()];
/// let ys: Vec<Token> = vec![1.0.into(), 3.0.into(), 9.0.into(), "5".into()];
/// let fit = regression::fit(&xs, &ys);
///
/// let line = fit.line.expect("three valid pairs");
/// assert!((line.slope - 2.0).abs() < 1e-12);
/// assert!((line.intercept - 1.0).abs() < 1e-12);
/// assert_eq!(fit.diagnostics.len(), 1);
/// ```
#[must_use]
pub fn fit(xs: &[Token], ys: &[Token]) -> Regression {
    let mut diagnostics = Vec::new();
    if xs.len() != ys.len() {
        tracing::warn!(
            xs = xs.len(),
            ys = ys.len(),
            "sample columns differ in length"
        );
        diagnostics.push(Diagnostic::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
        return Regression {
            line: Err(FitError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            }),
            diagnostics,
        };
    }

    let mut sums = Sums::default();
    for (index, (x, y)) in xs.iter().zip(ys).enumerate() {
        match (x.value(), y.value()) {
            (Some(x), Some(y)) => sums.push(x, y),
            _ => {
                tracing::warn!(index, x = %x, y = %y, "rejected sample");
                diagnostics.push(Diagnostic::RejectedSample {
                    index,
                    x: x.clone(),
                    y: y.clone(),
                });
            }
        }
    }

    let line = sums.solve();
    match &line {
        Ok(line) => tracing::debug!(
            slope = line.slope,
            intercept = line.intercept,
            samples = line.samples,
            "fitted line"
        ),
        Err(error) => tracing::debug!(%error, "regression undefined"),
    }
    Regression { line, diagnostics }
}
