//! Feasibility sweep over area reductions and die semi-angles.

use ndarray::{Array1, Array2, ArrayView1};
use serde::Serialize;

use crate::errors::GeometryError;
use crate::mechanics::evaluate_pass;

/// Die semi-angles covered by every sweep, in degrees.
pub const SEMI_ANGLES: [f64; 10] = [2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0];

/// Cells whose drawing stress and forming limit differ by less than this are ties.
pub const BOUNDARY_TOLERANCE: f64 = 1.0e-4;

/// Presentation class of a sweep cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellClass {
    /// Drawing stress below the forming limit.
    Usable,
    /// Drawing stress at or above the forming limit.
    Unusable,
    /// At the feasibility transition.
    Boundary,
}

impl CellClass {
    /// Classify a cell from its stresses alone.
    #[must_use]
    pub fn of(draw_stress: f64, km: f64) -> Self {
        if (draw_stress - km).abs() < BOUNDARY_TOLERANCE {
            CellClass::Boundary
        } else if draw_stress < km {
            CellClass::Usable
        } else {
            CellClass::Unusable
        }
    }

    /// Tag used by table renderers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CellClass::Usable => "usable",
            CellClass::Unusable => "unusable",
            CellClass::Boundary => "boundary",
        }
    }
}

/// One (semi-angle, reduction) position of the sweep.
///
/// The km and drawing-stress entries of a position are rendered as a pair and share
/// `class`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SweepCell {
    /// Area reduction in percent.
    pub reduction_percent: f64,
    /// Die semi-angle in degrees.
    pub semi_angle_deg: f64,
    /// Forming flow-stress limit.
    pub km: f64,
    /// Drawing stress.
    pub draw_stress: f64,
    /// Classification after row-adjacency correction.
    pub class: CellClass,
}

/// Dense grid of sweep cells, one row per entry of [`SEMI_ANGLES`] and one column per
/// requested reduction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SweepTable {
    /// Requested reductions, in column order.
    pub reductions: Array1<f64>,
    /// Exit diameter for each reduction.
    pub after_diameters: Array1<f64>,
    /// Cells indexed by `[angle, reduction]`.
    pub cells: Array2<SweepCell>,
}

impl SweepTable {
    /// Cells drawn with `semi_angle_deg`, if that angle is part of the sweep.
    #[must_use]
    pub fn row(&self, semi_angle_deg: f64) -> Option<ArrayView1<'_, SweepCell>> {
        SEMI_ANGLES
            .iter()
            .position(|angle| *angle == semi_angle_deg)
            .map(|index| self.cells.row(index))
    }

    /// Cell at `semi_angle_deg` and column `reduction_index`.
    #[must_use]
    pub fn cell(&self, semi_angle_deg: f64, reduction_index: usize) -> Option<&SweepCell> {
        let angle_index = SEMI_ANGLES.iter().position(|angle| *angle == semi_angle_deg)?;
        self.cells.get((angle_index, reduction_index))
    }
}

/// Evaluate every combination of [`SEMI_ANGLES`] and `reductions`.
///
/// Cells are classified with [`CellClass::of`] and then corrected per row with
/// [`promote_transitions`]. The table is a pure function of the arguments.
///
/// # Errors
///
/// Returns the first [`GeometryError`] raised by a cell, for instance when a
/// reduction lies outside `[0, 100)`.
///
/// # Examples
/// ```
/// use drawx::{build_sweep_table, CellClass};
///
/// let table = build_sweep_table(10.0, &[5.0, 10.0, 15.0, 20.0], 0.1, 500.0, 0.2)
///     .expect("valid sweep");
/// assert_eq!(table.cells.dim(), (10, 4));
///
/// let two_degrees = table.row(2.0).expect("angle in sweep");
/// assert_eq!(two_degrees[2].class, CellClass::Boundary);
/// assert_eq!(two_degrees[3].class, CellClass::Unusable);
/// ```
pub fn build_sweep_table(
    before_diameter: f64,
    reductions: &[f64],
    friction: f64,
    k: f64,
    n: f64,
) -> Result<SweepTable, GeometryError> {
    let mut cells = Vec::with_capacity(SEMI_ANGLES.len() * reductions.len());
    for &semi_angle_deg in &SEMI_ANGLES {
        for &reduction_percent in reductions {
            let result = evaluate_pass(
                before_diameter,
                reduction_percent,
                semi_angle_deg,
                friction,
                k,
                n,
            )?;
            cells.push(SweepCell {
                reduction_percent,
                semi_angle_deg,
                km: result.km,
                draw_stress: result.draw_stress,
                class: CellClass::of(result.draw_stress, result.km),
            });
        }
    }

    let mut cells = Array2::from_shape_vec((SEMI_ANGLES.len(), reductions.len()), cells)
        .expect("one cell per angle and reduction");
    for mut row in cells.rows_mut() {
        let mut classes: Vec<CellClass> = row.iter().map(|cell| cell.class).collect();
        promote_transitions(&mut classes);
        for (cell, class) in row.iter_mut().zip(classes) {
            cell.class = class;
        }
    }

    let after_diameters = reductions
        .iter()
        .map(|reduction| before_diameter * (1.0 - reduction / 100.0).sqrt())
        .collect();
    tracing::debug!(
        angles = SEMI_ANGLES.len(),
        reductions = reductions.len(),
        "built sweep table"
    );
    Ok(SweepTable {
        reductions: Array1::from(reductions.to_vec()),
        after_diameters,
        cells,
    })
}

/// Mark usable cells next to an unusable one as boundary cells.
///
/// Neighbours are the immediate left and right entries of `row`. Unusable cells are
/// never changed, so the result does not depend on scan order.
///
/// # Examples
/// ```
/// use drawx::{promote_transitions, CellClass::*};
///
/// let mut row = [Usable, Usable, Unusable, Usable];
/// promote_transitions(&mut row);
/// assert_eq!(row, [Usable, Boundary, Unusable, Boundary]);
/// ```
pub fn promote_transitions(row: &mut [CellClass]) {
    let unusable: Vec<bool> = row
        .iter()
        .map(|class| *class == CellClass::Unusable)
        .collect();
    for (index, class) in row.iter_mut().enumerate() {
        let left = index > 0 && unusable[index - 1];
        let right = unusable.get(index + 1).copied().unwrap_or(false);
        if *class == CellClass::Usable && (left || right) {
            *class = CellClass::Boundary;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REDUCTIONS: [f64; 8] = [5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0];

    #[test]
    fn grid_is_dense() {
        let table = build_sweep_table(10.0, &REDUCTIONS, 0.1, 500.0, 0.2).expect("valid sweep");
        assert_eq!(table.cells.dim(), (SEMI_ANGLES.len(), REDUCTIONS.len()));
        for ((angle_index, reduction_index), cell) in table.cells.indexed_iter() {
            assert_eq!(cell.semi_angle_deg, SEMI_ANGLES[angle_index]);
            assert_eq!(cell.reduction_percent, REDUCTIONS[reduction_index]);
        }
    }

    #[test]
    fn classes_follow_stress_comparison() {
        assert_eq!(CellClass::of(1.0, 2.0), CellClass::Usable);
        assert_eq!(CellClass::of(2.0, 1.0), CellClass::Unusable);
        assert_eq!(CellClass::of(1.0, 1.0 + 5.0e-5), CellClass::Boundary);
        assert_eq!(CellClass::of(1.0 + 5.0e-5, 1.0), CellClass::Boundary);
    }

    #[test]
    fn usable_cell_beside_unusable_becomes_boundary() {
        // Columns: Δ = 5 unusable, Δ = 10 otherwise usable.
        let mut row = [CellClass::Unusable, CellClass::Usable, CellClass::Usable];
        promote_transitions(&mut row);
        assert_eq!(
            row,
            [CellClass::Unusable, CellClass::Boundary, CellClass::Usable]
        );
    }

    #[test]
    fn unusable_and_boundary_cells_are_never_promoted() {
        let mut row = [
            CellClass::Unusable,
            CellClass::Unusable,
            CellClass::Boundary,
            CellClass::Unusable,
        ];
        let before = row;
        promote_transitions(&mut row);
        assert_eq!(row, before);
    }

    #[test]
    fn transition_in_computed_row_is_promoted() {
        let table = build_sweep_table(10.0, &REDUCTIONS, 0.1, 500.0, 0.2).expect("valid sweep");
        let row = table.row(2.0).expect("angle in sweep");
        let classes: Vec<CellClass> = row.iter().map(|cell| cell.class).collect();
        assert_eq!(
            classes,
            vec![
                CellClass::Usable,
                CellClass::Usable,
                CellClass::Boundary,
                CellClass::Unusable,
                CellClass::Unusable,
                CellClass::Unusable,
                CellClass::Unusable,
                CellClass::Unusable,
            ]
        );
        // The raw comparison still says usable; only adjacency moved it.
        assert!(row[2].draw_stress < row[2].km);
    }

    #[test]
    fn sweeping_twice_gives_equal_tables() {
        let first = build_sweep_table(10.0, &REDUCTIONS, 0.1, 500.0, 0.2).expect("valid sweep");
        let second = build_sweep_table(10.0, &REDUCTIONS, 0.1, 500.0, 0.2).expect("valid sweep");
        assert_eq!(first, second);
    }

    #[test]
    fn empty_reduction_list_keeps_every_angle_row() {
        let table = build_sweep_table(10.0, &[], 0.1, 500.0, 0.2).expect("valid sweep");
        assert_eq!(table.cells.dim(), (SEMI_ANGLES.len(), 0));
    }

    #[test]
    fn invalid_reduction_fails_the_sweep() {
        let error = build_sweep_table(10.0, &[10.0, 120.0], 0.1, 500.0, 0.2)
            .expect_err("reduction rejected");
        assert_eq!(error, GeometryError::ReductionOutOfRange(120.0));
    }

    #[test]
    fn cell_lookup_by_angle() {
        let table = build_sweep_table(10.0, &REDUCTIONS, 0.1, 500.0, 0.2).expect("valid sweep");
        let cell = table.cell(10.0, 3).expect("cell present");
        assert_eq!(cell.reduction_percent, 20.0);
        assert!(table.cell(3.0, 0).is_none());
        assert!(table.cell(10.0, 99).is_none());
    }
}
