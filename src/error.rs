use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid {name}: {value} ({reason})")]
    InvalidInput {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("Unknown bird '{0}'. Expected one of: blues, stella, red.")]
    UnknownBird(String),
    #[error("Unknown attack method '{0}'. Expected one of: standard, explosive, boosted.")]
    UnknownAttackMethod(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to encode/decode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to draw plot: {0}")]
    Plot(String),
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Rejects non-finite values and values that are not strictly positive.
pub fn require_positive(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(SimError::InvalidInput {
            name,
            value,
            reason: "must be a finite number",
        });
    }
    if value <= 0.0 {
        return Err(SimError::InvalidInput {
            name,
            value,
            reason: "must be greater than zero",
        });
    }
    Ok(value)
}
