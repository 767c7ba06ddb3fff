use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything the engine can reject. Off-grid lookups are not errors; they
/// come back as `None`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("grid dimensions must be positive and at most {max}, got {width}x{height}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("land fraction must be finite and below 1, got {0}")]
    InvalidLandFraction(f64),

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("malformed grid: {0}")]
    Malformed(String),

    #[error("unrecognized wrap tag {0:?}")]
    UnknownWrap(String),

    #[error("grid declares {width}x{height} = {expected} tiles but carries {actual}")]
    TileCount {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("intern reference {reference:?} does not resolve against a table of {len} strings")]
    InternIndex { reference: String, len: usize },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("generation stalled at {land} land tiles with {target} required")]
    Stalled { land: usize, target: usize },
}

impl Error {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Error::Malformed(msg.into())
    }
}
