use crate::conditions::DrawingConditions;
use drawx::{
    build_sweep_table, fit_material, to_data_points, DataPoint, FitError, FormattedConstants,
    GeometryError, MaterialFit, MechanicsResult, PassGeometry, SweepTable,
};
use serde::Serialize;
use thiserror::Error;

/// Reason a pass check or sweep was not computed.
#[derive(Clone, Copy, Debug, Error, PartialEq, Serialize)]
pub enum SkipReason {
    /// The material fit is undefined, so there are no constants to evaluate with.
    #[error("material constants are undefined: {0}")]
    Material(FitError),
    /// The pass parameters were rejected.
    #[error("{0}")]
    Geometry(GeometryError),
}

/// Everything produced by one run, ready for rendering or export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    /// Fitted constants and the diagnostics raised while reading samples.
    pub fit: MaterialFit,
    /// Constants rendered for display.
    pub constants: FormattedConstants,
    /// Samples projected back to a linear x axis for plotting.
    pub data_points: Vec<DataPoint>,
    /// Pass that was checked.
    pub pass: PassGeometry,
    /// Stresses for the checked pass.
    pub pass_result: Result<MechanicsResult, SkipReason>,
    /// Sweep over the configured reductions.
    pub sweep: Result<SweepTable, SkipReason>,
}

/// Fit the material, check the configured pass and build the sweep table.
///
/// Nothing here is fatal: an undefined fit or rejected geometry is recorded in the
/// summary so the report can say why a section is empty.
pub fn run_analysis(conditions: &DrawingConditions) -> AnalysisSummary {
    let samples = &conditions.samples;
    let fit = fit_material(&samples.labels, &samples.values);
    let constants = fit.formatted();
    let data_points = to_data_points(&samples.labels, &samples.values);
    let pass = PassGeometry::from(conditions.pass);

    let material = fit.constants.map_err(SkipReason::Material);
    let pass_result = material.and_then(|material| {
        pass.evaluate(&material).map_err(SkipReason::Geometry)
    });
    let sweep = material.and_then(|material| {
        build_sweep_table(
            pass.before_diameter,
            &conditions.reductions,
            pass.friction,
            material.k,
            material.n,
        )
        .map_err(SkipReason::Geometry)
    });

    if let Err(reason) = &pass_result {
        tracing::warn!(%reason, "pass not evaluated");
    }
    AnalysisSummary {
        fit,
        constants,
        data_points,
        pass,
        pass_result,
        sweep,
    }
}
