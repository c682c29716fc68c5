use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("invalid latitude {value}° (must be between -90° and +90°)")]
    InvalidLatitude { value: f64 },

    #[error("invalid longitude {value}° (must be between -180° and +180°)")]
    InvalidLongitude { value: f64 },
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("no cache record")]
    Missing,

    #[error("cache record could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("cache record could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("cache version {found} does not match expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("cache record is {age_ms} ms old")]
    Expired { age_ms: i64 },
}
