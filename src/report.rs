use crate::analysis::AnalysisSummary;
use drawx::{CellClass, SweepTable};
use std::fmt::Write;

/// Width of a value column in the sweep table.
const COLUMN: usize = 11;

/// Short tag printed after each sweep value.
fn tag(class: CellClass) -> char {
    match class {
        CellClass::Usable => ' ',
        CellClass::Boundary => '~',
        CellClass::Unusable => 'x',
    }
}

/// Render a textual summary of the fit, the pass check and the sweep.
///
/// Constants keep the fixed 7/8 digit readout, the pass check prints 4 decimals and
/// the sweep 2, matching what is usually copied into drawing schedules.
#[must_use]
pub fn render_summary(summary: &AnalysisSummary) -> String {
    let mut output = String::new();

    writeln!(&mut output, "Material fit (sigma = K * eps^N)")
        .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "K = {}\nN = {}",
        summary.constants.k, summary.constants.n
    )
    .expect("writing to string cannot fail");
    if summary.fit.constants.is_ok() {
        writeln!(
            &mut output,
            "fitted from {} samples",
            summary.data_points.len()
        )
        .expect("writing to string cannot fail");
    }
    if !summary.fit.diagnostics.is_empty() {
        writeln!(
            &mut output,
            "{} sample(s) skipped",
            summary.fit.diagnostics.len()
        )
        .expect("writing to string cannot fail");
    }

    writeln!(
        &mut output,
        "\nPass check (d0 = {:.2}, reduction = {:.1} %, semi-angle = {:.1} deg, mu = {:.3})",
        summary.pass.before_diameter,
        summary.pass.reduction_percent,
        summary.pass.semi_angle_deg,
        summary.pass.friction
    )
    .expect("writing to string cannot fail");
    let verdict = match &summary.pass_result {
        Ok(result) => result.verdict().to_string(),
        Err(reason) => reason.to_string(),
    };
    writeln!(&mut output, "{verdict}").expect("writing to string cannot fail");

    output.push('\n');
    match &summary.sweep {
        Ok(table) => output.push_str(&render_sweep(table)),
        Err(reason) => {
            writeln!(&mut output, "Sweep not available: {reason}")
                .expect("writing to string cannot fail");
        }
    }
    output
}

/// Render the sweep as a fixed-width table.
///
/// Each semi-angle gets a `km` row and a drawing-stress row. Values are suffixed
/// with `~` at the feasibility boundary and `x` where the pass is unusable.
#[must_use]
pub fn render_sweep(table: &SweepTable) -> String {
    let mut output = String::new();
    output.push_str("Semi-angle  row   ");
    for reduction in &table.reductions {
        write!(&mut output, "{:>width$}", format!("{reduction}%"), width = COLUMN)
            .expect("writing to string cannot fail");
    }
    output.push_str("\n            d     ");
    for diameter in &table.after_diameters {
        write!(&mut output, "{diameter:>width$.2}", width = COLUMN)
            .expect("writing to string cannot fail");
    }
    output.push('\n');

    for row in table.cells.rows() {
        let Some(first) = row.get(0) else {
            continue;
        };
        write!(&mut output, "{:>10}  km    ", first.semi_angle_deg)
            .expect("writing to string cannot fail");
        for cell in row {
            write!(
                &mut output,
                "{:>width$.2}{}",
                cell.km,
                tag(cell.class),
                width = COLUMN - 1
            )
            .expect("writing to string cannot fail");
        }
        output.push_str("\n            a     ");
        for cell in row {
            write!(
                &mut output,
                "{:>width$.2}{}",
                cell.draw_stress,
                tag(cell.class),
                width = COLUMN - 1
            )
            .expect("writing to string cannot fail");
        }
        output.push('\n');
    }
    writeln!(
        &mut output,
        "~ {}, x {}",
        CellClass::Boundary.as_str(),
        CellClass::Unusable.as_str()
    )
    .expect("writing to string cannot fail");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_analysis;
    use crate::conditions::DrawingConditions;
    use drawx::build_sweep_table;

    #[test]
    fn formats_human_readable_report() {
        let summary = run_analysis(&DrawingConditions::default());
        let report = render_summary(&summary);
        assert!(report.contains("Material fit"));
        assert!(report.contains("K = 502.47"));
        assert!(report.contains("Evaluation: usable"));
        assert!(report.contains("km: 258.7161"));
        assert!(report.contains("1 sample(s) skipped"));
    }

    #[test]
    fn boundary_cells_are_tagged_in_both_rows() {
        let table = build_sweep_table(10.0, &[15.0, 20.0], 0.1, 500.0, 0.2).expect("valid sweep");
        let rendered = render_sweep(&table);
        let lines: Vec<&str> = rendered.lines().collect();
        // Header, diameter row, then km and a rows for 2 degrees.
        assert!(lines[2].contains("216.03~"));
        assert!(lines[2].contains("208.12x"));
        assert!(lines[3].contains("155.15~"));
        assert!(lines[3].contains("209.41x"));
    }

    #[test]
    fn undefined_fit_is_explained() {
        let mut conditions = DrawingConditions::default();
        conditions.samples.labels.clear();
        conditions.samples.values.clear();
        let report = render_summary(&run_analysis(&conditions));
        assert!(report.contains("K = NaN"));
        assert!(report.contains("material constants are undefined"));
        assert!(report.contains("Sweep not available"));
    }
}
