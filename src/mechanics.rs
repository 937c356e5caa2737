//! Slab analysis of axisymmetric drawing through a conical die.
//!
//! The model follows Siebel's treatment of wire drawing: the mean flow stress of the
//! Hollomon curve over the pass strain is reduced by a friction and die-geometry
//! coupling term to give the forming limit `km`, and the drawing stress `a` sums the
//! ideal deformation, friction and redundant shear work per unit exit area. A pass
//! is feasible while `a < km`; past that the drawn rod necks or breaks.
//! See <https://en.wikipedia.org/wiki/Wire_drawing>.

use serde::Serialize;
use std::f64::consts::PI;
use std::fmt;

use crate::errors::GeometryError;
use crate::material::MaterialConstants;

/// Empirical coefficient of the redundant shear work term.
pub const SHEAR_WORK_COEFFICIENT: f64 = 0.77;

/// Parameters describing one drawing pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PassGeometry {
    /// Rod diameter entering the die.
    pub before_diameter: f64,
    /// Reduction in cross-sectional area, in percent.
    pub reduction_percent: f64,
    /// Die semi-angle in degrees.
    pub semi_angle_deg: f64,
    /// Coulomb friction coefficient between rod and die.
    pub friction: f64,
}

impl PassGeometry {
    /// Rod diameter leaving the die.
    ///
    /// # Examples
    /// ```
    /// use drawx::PassGeometry;
    ///
    /// let pass = PassGeometry {
    ///     before_diameter: 10.0,
    ///     reduction_percent: 36.0,
    ///     semi_angle_deg: 8.0,
    ///     friction: 0.05,
    /// };
    /// assert!((pass.after_diameter() - 8.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn after_diameter(&self) -> f64 {
        self.before_diameter * (1.0 - self.reduction_percent / 100.0).sqrt()
    }

    /// Evaluate the pass for a material.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] when the pass parameters are not usable.
    pub fn evaluate(&self, material: &MaterialConstants) -> Result<MechanicsResult, GeometryError> {
        evaluate_pass(
            self.before_diameter,
            self.reduction_percent,
            self.semi_angle_deg,
            self.friction,
            material.k,
            material.n,
        )
    }
}

/// Whether a pass can be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Feasibility {
    /// Drawing stress stays below the forming limit.
    Usable,
    /// Drawing stress reaches or exceeds the forming limit.
    Unusable,
}

impl fmt::Display for Feasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Feasibility::Usable => "usable",
            Feasibility::Unusable => "unusable",
        })
    }
}

/// Stresses computed for one pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MechanicsResult {
    /// Forming flow-stress limit.
    pub km: f64,
    /// Drawing stress `a`.
    pub draw_stress: f64,
    /// Rod diameter leaving the die.
    pub after_diameter: f64,
}

impl MechanicsResult {
    /// Usable iff the drawing stress is strictly below the forming limit.
    #[must_use]
    pub fn feasibility(&self) -> Feasibility {
        if self.draw_stress < self.km {
            Feasibility::Usable
        } else {
            Feasibility::Unusable
        }
    }

    /// Pass/fail summary with 4 fractional digits.
    #[must_use]
    pub fn verdict(&self) -> PassVerdict {
        PassVerdict(Ok(*self))
    }
}

/// Displayable outcome of a single pass evaluation, including invalid input.
///
/// # Examples
/// ```
/// use drawx::{evaluate_pass, PassVerdict};
///
/// let verdict = PassVerdict::from(evaluate_pass(10.0, 20.0, 0.0, 0.1, 500.0, 0.2));
/// assert_eq!(verdict.to_string(), "invalid input: die semi-angle must not be zero");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassVerdict(pub Result<MechanicsResult, GeometryError>);

impl From<Result<MechanicsResult, GeometryError>> for PassVerdict {
    fn from(value: Result<MechanicsResult, GeometryError>) -> Self {
        Self(value)
    }
}

impl fmt::Display for PassVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Ok(result) => write!(
                f,
                "Evaluation: {}\na: {:.4}\nkm: {:.4}",
                result.feasibility(),
                result.draw_stress,
                result.km
            ),
            Err(error) => write!(f, "{error}"),
        }
    }
}

/// Evaluate a drawing pass given the area reduction in percent.
///
/// # Errors
///
/// Returns [`GeometryError`] without attempting the arithmetic when any argument is
/// not finite, the semi-angle is zero, the diameter is not positive, the reduction
/// lies outside `[0, 100)` or the friction coefficient is negative.
///
/// # Examples
/// ```
/// use drawx::{evaluate_pass, Feasibility};
///
/// let result = evaluate_pass(10.0, 20.0, 10.0, 0.1, 500.0, 0.2).expect("valid pass");
/// assert!((result.km - 257.8796).abs() < 1e-4);
/// assert!((result.draw_stress - 143.0800).abs() < 1e-4);
/// assert_eq!(result.feasibility(), Feasibility::Usable);
/// ```
pub fn evaluate_pass(
    before_diameter: f64,
    reduction_percent: f64,
    semi_angle_deg: f64,
    friction: f64,
    k: f64,
    n: f64,
) -> Result<MechanicsResult, GeometryError> {
    check_finite(&[
        ("before diameter", before_diameter),
        ("reduction", reduction_percent),
        ("semi-angle", semi_angle_deg),
        ("friction coefficient", friction),
        ("K", k),
        ("N", n),
    ])?;
    if !(0.0..100.0).contains(&reduction_percent) {
        return Err(GeometryError::ReductionOutOfRange(reduction_percent));
    }
    let after_diameter = before_diameter * (1.0 - reduction_percent / 100.0).sqrt();
    check_pass(before_diameter, semi_angle_deg, friction)?;
    Ok(draw(before_diameter, after_diameter, semi_angle_deg, friction, k, n))
}

/// Evaluate a drawing pass given both rod diameters.
///
/// # Errors
///
/// Returns [`GeometryError`] for the same inputs as [`evaluate_pass`]; an exit
/// diameter that is not positive, or larger than the entry diameter, is reported as
/// [`GeometryError::ReductionOutOfRange`] with the implied reduction.
pub fn evaluate_diameters(
    before_diameter: f64,
    after_diameter: f64,
    semi_angle_deg: f64,
    friction: f64,
    material: &MaterialConstants,
) -> Result<MechanicsResult, GeometryError> {
    check_finite(&[
        ("before diameter", before_diameter),
        ("after diameter", after_diameter),
        ("semi-angle", semi_angle_deg),
        ("friction coefficient", friction),
    ])?;
    check_pass(before_diameter, semi_angle_deg, friction)?;
    if after_diameter <= 0.0 || after_diameter > before_diameter {
        let reduction = 100.0 * (1.0 - (after_diameter / before_diameter).powi(2));
        return Err(GeometryError::ReductionOutOfRange(reduction));
    }
    Ok(draw(
        before_diameter,
        after_diameter,
        semi_angle_deg,
        friction,
        material.k,
        material.n,
    ))
}

/// Reject the first argument that is NaN or infinite.
fn check_finite(arguments: &[(&'static str, f64)]) -> Result<(), GeometryError> {
    match arguments.iter().find(|(_, value)| !value.is_finite()) {
        Some(&(parameter, value)) => Err(GeometryError::NonFinite { parameter, value }),
        None => Ok(()),
    }
}

/// Range checks shared by both entry points.
fn check_pass(before_diameter: f64, semi_angle_deg: f64, friction: f64) -> Result<(), GeometryError> {
    if semi_angle_deg == 0.0 {
        return Err(GeometryError::ZeroSemiAngle);
    }
    if before_diameter <= 0.0 {
        return Err(GeometryError::NonPositiveDiameter(before_diameter));
    }
    if friction < 0.0 {
        return Err(GeometryError::NegativeFriction(friction));
    }
    Ok(())
}

/// Cross-sectional area of a round rod.
fn area(diameter: f64) -> f64 {
    PI / 4.0 * diameter.powi(2)
}

/// Closed-form stresses for validated inputs.
fn draw(
    before_diameter: f64,
    after_diameter: f64,
    semi_angle_deg: f64,
    friction: f64,
    k: f64,
    n: f64,
) -> MechanicsResult {
    let f1 = area(before_diameter);
    let f2 = area(after_diameter);
    let reduced_area = f1 - f2;
    let strain = (f1 / f2).ln();

    // Mean of K·εᴺ over 0..strain.
    let mean_flow_stress = k * strain.powf(n) / (1.0 + n);

    let semi_angle = semi_angle_deg.to_radians();
    let die_contact = PI * (before_diameter.powi(2) - after_diameter.powi(2))
        / (4.0 * semi_angle.sin());

    let km = mean_flow_stress / (1.0 + (reduced_area + die_contact * friction) / (2.0 * f2));

    let deformation_work = km * reduced_area;
    let friction_work = die_contact * friction * km;
    let shear_work = SHEAR_WORK_COEFFICIENT * f2 * mean_flow_stress * semi_angle;
    let draw_stress = (deformation_work + friction_work + shear_work) / f2;

    tracing::trace!(km, draw_stress, after_diameter, semi_angle_deg, "evaluated pass");
    MechanicsResult {
        km,
        draw_stress,
        after_diameter,
    }
}
