use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sidecar_types::{BlobSidecarList, BlobSidecars};

use crate::error::FetchError;

/// Response encoding requested from the beacon API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Ssz,
}

impl Format {
    /// Value sent in the `Accept` header.
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Ssz => "application/octet-stream",
        }
    }

    /// Decode a complete response body in this format.
    pub fn decode(self, body: &[u8]) -> Result<BlobSidecars, FetchError> {
        match self {
            Self::Json => serde_json::from_slice(body).map_err(FetchError::Json),
            Self::Ssz => BlobSidecarList::decode_ssz(body)
                .map(BlobSidecars::from)
                .map_err(FetchError::Ssz),
        }
    }

    /// Whether a response `Content-Type` agrees with this format.
    ///
    /// A missing header counts as agreement. Parameters such as
    /// `; charset=utf-8` are ignored.
    pub fn accepts_content_type(self, content_type: Option<&str>) -> bool {
        let Some(content_type) = content_type else {
            return true;
        };
        let essence = content_type.split(';').next().unwrap_or_default().trim();
        essence.eq_ignore_ascii_case(self.media_type())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Ssz => write!(f, "ssz"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format `{0}`, expected `json` or `ssz`")]
pub struct UnknownFormat(String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "ssz" => Ok(Self::Ssz),
            other => Err(UnknownFormat(other.to_owned())),
        }
    }
}
