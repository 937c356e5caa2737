use drawx::{PassGeometry, Token};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error returned when the conditions file cannot be used.
#[derive(Debug, Error)]
pub enum ConditionsError {
    /// Returned when the file cannot be read.
    #[error("cannot read conditions file {path}: {source}")]
    Read {
        /// Location of the file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the file is not valid JSON for [`DrawingConditions`].
    #[error("cannot parse conditions file {path}: {source}")]
    Parse {
        /// Location of the file.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Raw test data as exported from the spreadsheet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SampleColumns {
    /// log10 of the strain-like quantity.
    pub labels: Vec<Token>,
    /// log10 of the measured stress.
    pub values: Vec<Token>,
}

impl Default for SampleColumns {
    fn default() -> Self {
        // A mild steel tension test, already in log10 form. One reading was
        // recorded as text with its unit and one cell was left blank.
        let labels = [-1.699, -1.523, -1.398, -1.301, -1.222, -1.155, -1.097, -1.046];
        let values = [2.3594, 2.3962, 2.4206, 2.4401, 2.4559, 2.4691, 2.4807, 2.4909];
        let mut labels: Vec<Token> = labels.iter().copied().map(Token::from).collect();
        let mut values: Vec<Token> = values.iter().copied().map(Token::from).collect();
        labels[3] = Token::from("-1.301 (log strain)");
        values[6] = Token::Missing;
        Self { labels, values }
    }
}

/// Pass parameters supplied next to the test data.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PassSettings {
    /// Rod diameter before the pass in millimetres.
    pub before_diameter: f64,
    /// Area reduction of the single-pass check in percent.
    pub reduction_percent: f64,
    /// Die semi-angle in degrees.
    pub semi_angle_deg: f64,
    /// Friction coefficient between rod and die.
    pub friction: f64,
}

impl Default for PassSettings {
    fn default() -> Self {
        Self {
            before_diameter: 10.0,
            reduction_percent: 20.0,
            semi_angle_deg: 10.0,
            friction: 0.1,
        }
    }
}

impl From<PassSettings> for PassGeometry {
    fn from(settings: PassSettings) -> Self {
        PassGeometry {
            before_diameter: settings.before_diameter,
            reduction_percent: settings.reduction_percent,
            semi_angle_deg: settings.semi_angle_deg,
            friction: settings.friction,
        }
    }
}

/// Everything needed for one run of the tool.
///
/// Missing sections of a conditions file fall back to the defaults below, so an
/// empty JSON object reproduces the built-in demonstration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DrawingConditions {
    /// Test data for the material fit.
    pub samples: SampleColumns,
    /// Single pass to check.
    pub pass: PassSettings,
    /// Area reductions for the sweep table, in percent.
    pub reductions: Vec<f64>,
}

impl Default for DrawingConditions {
    fn default() -> Self {
        Self {
            samples: SampleColumns::default(),
            pass: PassSettings::default(),
            reductions: vec![5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0],
        }
    }
}

/// Read conditions from a JSON file.
pub fn load_conditions(path: &Path) -> Result<DrawingConditions, ConditionsError> {
    let text = fs::read_to_string(path).map_err(|source| ConditionsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let conditions = serde_json::from_str(&text).map_err(|source| ConditionsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "loaded drawing conditions");
    Ok(conditions)
}
