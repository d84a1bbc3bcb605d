/// Everything that can go wrong while configuring or hosting the starfield.
#[derive(Debug, thiserror::Error)]
pub enum StarfieldError {
    /// A sampled range has `min > max` or a non-finite bound.
    #[error("invalid range `{name}`: [{min}, {max}]")]
    InvalidRange { name: String, min: f64, max: f64 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("configuration JSON error: {0}")]
    Config(#[from] serde_json::Error),
    /// The surface exists but refused to hand out a 2D drawing context.
    #[error("2D drawing context unavailable: {0}")]
    ContextUnavailable(String),
    #[error("host error: {0}")]
    Host(String),
}

pub type StarfieldResult<T> = Result<T, StarfieldError>;
