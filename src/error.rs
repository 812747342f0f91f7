use thiserror::Error;

/// Every failure of the solver is fatal for the run that produced it.
#[derive(Error, Debug)]
pub enum HydroError {
    #[error("Unknown {component}, {name}.")]
    UnknownScheme {
        component: &'static str,
        name: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Zero or negative density {value:e} found in cell ({i}, {j}). Aborting.")]
    NonPositiveDensity { i: usize, j: usize, value: f64 },

    #[error("Zero or negative pressure {value:e} found in cell ({i}, {j}). Aborting.")]
    NonPositivePressure { i: usize, j: usize, value: f64 },

    #[error(
        "Could not compute sound speed in cell ({i}, {j}) \
         (density {density:e}, pressure {pressure:e}). Aborting."
    )]
    NonFiniteSoundSpeed {
        i: usize,
        j: usize,
        density: f64,
        pressure: f64,
    },

    #[error("Could not compute fastest speed in domain (got {0}). Aborting.")]
    NonFiniteMaxSpeed(f64),

    #[error("{0} must be set before the solver can be used")]
    NotInitialized(&'static str),

    #[error("Shape mismatch: expected {expected:?}, got {found:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error(
        "Cannot load simulation from file {file} because version {found} is too old \
         (allowed {oldest})."
    )]
    IncompatibleVersion {
        file: String,
        found: String,
        oldest: String,
    },

    #[error("Malformed file version {0}")]
    MalformedVersion(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl HydroError {
    pub fn unknown(component: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownScheme {
            component,
            name: name.into(),
        }
    }
}
