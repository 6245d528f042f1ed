use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("invalid coordinates ({lat}, {lon}): both components must be finite numbers")]
    NotFinite { lat: f64, lon: f64 },
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("failed to build geocoder url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("geocoder request failed: {0}")]
    Transport(String),
    #[error("failed to parse geocoder response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("failed to build router url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("route request failed: {0}")]
    Transport(String),
    #[error("router error ({code}): {message}")]
    Api { code: String, message: String },
    #[error("router returned no route")]
    NoRoute,
    #[error("failed to parse route response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please select both origin and destination")]
    MissingEndpoints,
}
