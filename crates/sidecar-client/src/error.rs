use sidecar_types::SszError;

/// Status reported alongside errors that occur before any response exists.
pub const SYNTHETIC_TRANSPORT_STATUS: u16 = 500;

/// Status reported alongside errors on a body the server marked as OK.
pub const OK_STATUS: u16 = 200;

/// Failures of a single sidecar fetch.
///
/// A non-200 response is never one of these; it is reported as a status.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to fetch sidecars: {0}")]
    Transport(reqwest::Error),

    #[error("failed to read response: {0}")]
    Body(reqwest::Error),

    #[error("failed to decode json response: {0}")]
    Json(serde_json::Error),

    #[error("failed to decode ssz response: {0}")]
    Ssz(SszError),
}

impl FetchError {
    /// The status code this error is reported with.
    pub fn status(&self) -> u16 {
        match self {
            Self::Transport(_) => SYNTHETIC_TRANSPORT_STATUS,
            Self::Body(_) | Self::Json(_) | Self::Ssz(_) => OK_STATUS,
        }
    }

    /// True when the server answered 200 but the payload was unusable.
    pub fn is_decode(&self) -> bool {
        !matches!(self, Self::Transport(_))
    }
}
