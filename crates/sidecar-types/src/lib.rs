pub mod primitives;
pub mod serde_utils;
pub mod sidecar;
pub mod ssz_list;

pub use primitives::{
    B256, BYTES_PER_BLOB, Blob, BlsSignature, InclusionProof, KzgCommitment, KzgProof,
    LengthError, MAX_BLOB_SIDECARS,
};
pub use sidecar::{BeaconBlockHeader, BlobSidecar, BlobSidecars, SignedBeaconBlockHeader};
pub use ssz_list::{BlobSidecarList, SszError};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
