#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod errors;
pub mod logging;
pub mod material;
pub mod mechanics;
pub mod numeric;
pub mod regression;
pub mod sweep;

pub use errors::{Diagnostic, FitError, GeometryError};
pub use material::{
    constants_sum, fit_material, to_data_points, DataPoint, FormattedConstants, MaterialConstants,
    MaterialFit,
};
pub use mechanics::{
    evaluate_diameters, evaluate_pass, Feasibility, MechanicsResult, PassGeometry, PassVerdict,
};
pub use numeric::{is_valid_number, parse_leading_float, Token};
pub use regression::{Line, Regression};
pub use sweep::{
    build_sweep_table, promote_transitions, CellClass, SweepCell, SweepTable, SEMI_ANGLES,
};
