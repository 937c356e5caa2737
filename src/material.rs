//! Hollomon power-law fit (σ = K·εᴺ) from log-transformed test data.
//!
//! Both columns are expected in base-10 logarithms already: the label column holds
//! log10 of the strain-like quantity and the value column the matching log stress.
//! The fit is a straight line through those columns, so N is the slope and
//! K = 10^intercept. See <https://en.wikipedia.org/wiki/Work_hardening>.

use serde::Serialize;

use crate::errors::{Diagnostic, FitError};
use crate::numeric::Token;
use crate::regression;

/// Literal shown in place of an undefined constant.
pub const UNDEFINED: &str = "NaN";

/// Fitted power-law constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MaterialConstants {
    /// Strength coefficient K, always finite and positive.
    pub k: f64,
    /// Strain-hardening exponent N, always finite.
    pub n: f64,
}

impl MaterialConstants {
    /// Build constants, rejecting values that are not finite or a non-positive K.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::NonFiniteConstants`] when either value is unusable.
    pub fn new(k: f64, n: f64) -> Result<Self, FitError> {
        if k.is_finite() && k > 0.0 && n.is_finite() {
            Ok(Self { k, n })
        } else {
            Err(FitError::NonFiniteConstants { k, n })
        }
    }

    /// Flow stress K·εᴺ at true strain `strain`.
    #[must_use]
    pub fn flow_stress(&self, strain: f64) -> f64 {
        self.k * strain.powf(self.n)
    }
}

/// Constants rendered for display: K with 7 and N with 8 fractional digits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormattedConstants {
    /// Rendered strength coefficient or [`UNDEFINED`].
    pub k: String,
    /// Rendered strain-hardening exponent or [`UNDEFINED`].
    pub n: String,
}

/// Result of [`fit_material`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MaterialFit {
    /// The constants, or why they are undefined.
    pub constants: Result<MaterialConstants, FitError>,
    /// Non-fatal records about skipped input.
    pub diagnostics: Vec<Diagnostic>,
}

impl MaterialFit {
    /// Render the constants for display.
    ///
    /// Undefined constants render as `"NaN"` for both K and N.
    #[must_use]
    pub fn formatted(&self) -> FormattedConstants {
        match &self.constants {
            Ok(constants) => FormattedConstants {
                k: format!("{:.7}", constants.k),
                n: format!("{:.8}", constants.n),
            },
            Err(_) => FormattedConstants {
                k: UNDEFINED.to_owned(),
                n: UNDEFINED.to_owned(),
            },
        }
    }
}

/// Point ready for plotting, with the x axis back on a linear scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DataPoint {
    /// 10^label.
    pub x: f64,
    /// The value as supplied.
    pub y: f64,
}

/// Fit K and N to pre-logged label/value columns.
///
/// # Examples
/// ```
/// use drawx::{fit_material, Token};
///
/// // log10 of strain against log10 of stress for K = 500, N = 0.2.
/// let labels: Vec<Token> = [-1.0, -0.5, 0.0].iter().copied().map(Token::from).collect();
/// let values: Vec<Token> = [-1.0_f64, -0.5, 0.0]
///     .iter()
///     .map(|x| Token::from(500.0_f64.log10() + 0.2 * x))
///     .collect();
///
/// let fit = fit_material(&labels, &values);
/// let constants = fit.constants.expect("well-formed data");
/// assert!((constants.k - 500.0).abs() < 1e-9);
/// assert!((constants.n - 0.2).abs() < 1e-12);
/// ```
#[must_use]
pub fn fit_material(labels: &[Token], values: &[Token]) -> MaterialFit {
    let regression = regression::fit(labels, values);
    let constants = regression
        .line
        .and_then(|line| MaterialConstants::new(10f64.powf(line.intercept), line.slope));
    if let Ok(constants) = &constants {
        tracing::debug!(k = constants.k, n = constants.n, "fitted material constants");
    }
    MaterialFit {
        constants,
        diagnostics: regression.diagnostics,
    }
}

/// Project the pre-logged columns back to plottable points.
///
/// Each surviving point has `x = 10^label`. Pairs where either token is invalid are
/// dropped and the rest keep their input order. Columns of different length yield
/// no points.
///
/// # Examples
/// ```
/// use drawx::{to_data_points, DataPoint, Token};
///
/// let labels: Vec<Token> = vec!["0".into(), "bad".into(), "1".into()];
/// let values: Vec<Token> = vec!["5".into(), "6".into(), "7".into()];
/// assert_eq!(
///     to_data_points(&labels, &values),
///     vec![DataPoint { x: 1.0, y: 5.0 }, DataPoint { x: 10.0, y: 7.0 }]
/// );
/// ```
#[must_use]
pub fn to_data_points(labels: &[Token], values: &[Token]) -> Vec<DataPoint> {
    if labels.len() != values.len() {
        tracing::warn!(
            labels = labels.len(),
            values = values.len(),
            "sample columns differ in length"
        );
        return Vec::new();
    }
    labels
        .iter()
        .zip(values)
        .filter_map(|(label, value)| {
            Some(DataPoint {
                x: 10f64.powf(label.value()?),
                y: value.value()?,
            })
        })
        .collect()
}

/// Sum of the K and N readouts with 8 fractional digits.
///
/// The readouts are usually the strings produced by [`MaterialFit::formatted`], so
/// an undefined constant gives [`UNDEFINED`].
#[must_use]
pub fn constants_sum(k: &Token, n: &Token) -> String {
    match (k.value(), n.value()) {
        (Some(k), Some(n)) => format!("{:.8}", k + n),
        _ => UNDEFINED.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Log-log samples lying exactly on σ = 500·ε^0.2.
    fn hollomon_columns() -> (Vec<f64>, Vec<f64>) {
        let labels: Vec<f64> = [0.02_f64, 0.05, 0.1, 0.2, 0.3]
            .iter()
            .map(|strain| strain.log10())
            .collect();
        let values = labels
            .iter()
            .map(|label| 500.0_f64.log10() + 0.2 * label)
            .collect();
        (labels, values)
    }

    #[test]
    fn recovers_power_law_constants() {
        let (labels, values) = hollomon_columns();
        let labels: Vec<Token> = labels.into_iter().map(Token::from).collect();
        let values: Vec<Token> = values.into_iter().map(Token::from).collect();
        let constants = fit_material(&labels, &values)
            .constants
            .expect("constants defined");
        assert_relative_eq!(constants.k, 500.0, epsilon = 1.0e-9);
        assert_relative_eq!(constants.n, 0.2, epsilon = 1.0e-12);
        assert_relative_eq!(constants.flow_stress(1.0), 500.0, epsilon = 1.0e-9);
    }

    #[test]
    fn numeric_text_and_numbers_give_identical_constants() {
        let (labels, values) = hollomon_columns();
        let as_numbers = fit_material(
            &labels.iter().copied().map(Token::from).collect::<Vec<_>>(),
            &values.iter().copied().map(Token::from).collect::<Vec<_>>(),
        );
        let as_text = fit_material(
            &labels.iter().map(|v| Token::from(v.to_string())).collect::<Vec<_>>(),
            &values.iter().map(|v| Token::from(v.to_string())).collect::<Vec<_>>(),
        );
        assert_eq!(as_numbers.constants, as_text.constants);
        assert_eq!(as_numbers.formatted(), as_text.formatted());
    }

    #[test]
    fn formats_with_fixed_precision() {
        let fit = MaterialFit {
            constants: MaterialConstants::new(512.25, 0.1875),
            diagnostics: Vec::new(),
        };
        assert_eq!(
            fit.formatted(),
            FormattedConstants {
                k: "512.2500000".to_owned(),
                n: "0.18750000".to_owned(),
            }
        );
    }

    #[test]
    fn undefined_fit_formats_as_nan_marker() {
        let fit = fit_material(&[], &[]);
        assert_eq!(fit.constants, Err(FitError::NoValidSamples));
        let formatted = fit.formatted();
        assert_eq!(formatted.k, UNDEFINED);
        assert_eq!(formatted.n, UNDEFINED);
    }

    #[test]
    fn mismatched_columns_give_nan_marker() {
        let fit = fit_material(&[Token::from(1.0)], &[]);
        assert!(fit.constants.is_err());
        assert_eq!(fit.formatted().k, UNDEFINED);
    }

    #[test]
    fn overflowing_intercept_is_not_finite() {
        let labels = vec![Token::from(0.0), Token::from(1.0)];
        let values = vec![Token::from(400.0), Token::from(401.0)];
        let fit = fit_material(&labels, &values);
        assert!(matches!(
            fit.constants,
            Err(FitError::NonFiniteConstants { .. })
        ));
    }

    #[test]
    fn data_points_drop_invalid_pairs_and_keep_order() {
        let labels = vec![Token::from("0"), Token::from("bad"), Token::from("1")];
        let values = vec![Token::from("5"), Token::from("6"), Token::from("7")];
        let points = to_data_points(&labels, &values);
        assert_eq!(points.len(), 2);
        assert_relative_eq!(points[0].x, 1.0);
        assert_relative_eq!(points[0].y, 5.0);
        assert_relative_eq!(points[1].x, 10.0);
        assert_relative_eq!(points[1].y, 7.0);
    }

    #[test]
    fn data_points_require_equal_lengths() {
        assert!(to_data_points(&[Token::from(1.0)], &[]).is_empty());
    }

    #[test]
    fn sums_readouts() {
        assert_eq!(
            constants_sum(&Token::from("512.2500000"), &Token::from("0.18750000")),
            "512.43750000"
        );
        assert_eq!(
            constants_sum(&Token::from(UNDEFINED), &Token::from(0.2)),
            UNDEFINED
        );
    }
}
