//! Error kinds raised while turning a configuration into a scenario.

use thiserror::Error;

/// Result type for scenario generation
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Fatal errors that abort a generation pass.
///
/// No variant is recovered from mid-pipeline: a pass either yields a complete
/// scenario or nothing at all.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// A required field is missing, a value is out of range, or a `kind`
    /// selector names an unregistered strategy
    #[error("configuration error: {0}")]
    Config(String),

    /// A draw or derived quantity cannot be sampled from
    #[error("sampling precondition violated: {0}")]
    SamplingPrecondition(String),
}

impl From<serde_json::Error> for GenerateError {
    fn from(err: serde_json::Error) -> Self {
        GenerateError::Config(err.to_string())
    }
}
