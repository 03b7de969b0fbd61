use ssz::{Decode, Encode};
use ssz_derive::{Decode, Encode};

use crate::primitives::MAX_BLOB_SIDECARS;
use crate::sidecar::{BlobSidecar, BlobSidecars};

/// Errors decoding an SSZ sidecar list.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SszError {
    #[error("invalid ssz encoding: {0:?}")]
    Decode(ssz::DecodeError),

    #[error("sidecar list holds {count} entries, limit is {MAX_BLOB_SIDECARS}")]
    TooManySidecars { count: usize },
}

/// SSZ container returned by `blob_sidecars` when `application/octet-stream`
/// is requested: a single offset followed by fixed-size sidecars.
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode)]
pub struct BlobSidecarList {
    pub sidecars: Vec<BlobSidecar>,
}

impl BlobSidecarList {
    /// Decode raw SSZ bytes, enforcing the list bound.
    pub fn decode_ssz(bytes: &[u8]) -> Result<Self, SszError> {
        let list = Self::from_ssz_bytes(bytes).map_err(SszError::Decode)?;
        check_list_len(list.sidecars.len())?;
        Ok(list)
    }

    pub fn encode_ssz(&self) -> Vec<u8> {
        self.as_ssz_bytes()
    }
}

fn check_list_len(count: usize) -> Result<(), SszError> {
    if count > MAX_BLOB_SIDECARS {
        return Err(SszError::TooManySidecars { count });
    }
    Ok(())
}

impl From<BlobSidecarList> for BlobSidecars {
    fn from(list: BlobSidecarList) -> Self {
        BlobSidecars::new(list.sidecars)
    }
}

impl From<BlobSidecars> for BlobSidecarList {
    fn from(sidecars: BlobSidecars) -> Self {
        Self {
            sidecars: sidecars.data,
        }
    }
}
