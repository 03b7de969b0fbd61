use std::fmt;

use alloy_primitives::{Bytes, FixedBytes};
use serde::{Deserialize, Deserializer, Serialize};
use ssz::{Decode, DecodeError, Encode};

pub use alloy_primitives::B256;

/// Number of bytes in a single blob (4096 field elements of 32 bytes).
pub const BYTES_PER_BLOB: usize = 131_072;

/// Size of a compressed BLS12-381 G1 point (KZG commitments and proofs).
pub const BYTES_PER_COMMITMENT: usize = 48;

/// Size of a compressed BLS12-381 G2 point (block header signatures).
pub const BYTES_PER_SIGNATURE: usize = 96;

/// Depth of the Merkle branch proving a commitment is in the block body.
pub const KZG_COMMITMENT_INCLUSION_PROOF_DEPTH: usize = 17;

/// Upper bound on the SSZ sidecar list, `MAX_BLOB_COMMITMENTS_PER_BLOCK`.
pub const MAX_BLOB_SIDECARS: usize = 4096;

pub type KzgCommitment = FixedBytes<BYTES_PER_COMMITMENT>;
pub type KzgProof = FixedBytes<BYTES_PER_COMMITMENT>;
pub type BlsSignature = FixedBytes<BYTES_PER_SIGNATURE>;

/// A byte vector had the wrong length for its fixed-size type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} length: expected {expected} bytes, got {actual}")]
pub struct LengthError {
    pub kind: &'static str,
    pub expected: usize,
    pub actual: usize,
}

/// Raw blob data. Always exactly [`BYTES_PER_BLOB`] bytes.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Blob(Bytes);

impl Blob {
    pub fn new(data: impl Into<Bytes>) -> Result<Self, LengthError> {
        let data = data.into();
        if data.len() != BYTES_PER_BLOB {
            return Err(LengthError {
                kind: "blob",
                expected: BYTES_PER_BLOB,
                actual: data.len(),
            });
        }
        Ok(Self(data))
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 128 KiB of hex is useless in assertion output.
        let head = alloy_primitives::hex::encode(&self.0[..8]);
        write!(f, "Blob(0x{head}..; {} bytes)", self.0.len())
    }
}

impl<'de> Deserialize<'de> for Blob {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = Bytes::deserialize(deserializer)?;
        Blob::new(data).map_err(serde::de::Error::custom)
    }
}

impl Encode for Blob {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        BYTES_PER_BLOB
    }

    fn ssz_bytes_len(&self) -> usize {
        BYTES_PER_BLOB
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.0);
    }
}

impl Decode for Blob {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        BYTES_PER_BLOB
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != BYTES_PER_BLOB {
            return Err(DecodeError::InvalidByteLength {
                len: bytes.len(),
                expected: BYTES_PER_BLOB,
            });
        }
        Ok(Self(Bytes::copy_from_slice(bytes)))
    }
}

/// Merkle branch from a KZG commitment up to the block body root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InclusionProof(pub [B256; KZG_COMMITMENT_INCLUSION_PROOF_DEPTH]);

impl Encode for InclusionProof {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        KZG_COMMITMENT_INCLUSION_PROOF_DEPTH * 32
    }

    fn ssz_bytes_len(&self) -> usize {
        <Self as Encode>::ssz_fixed_len()
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        for branch in &self.0 {
            buf.extend_from_slice(branch.as_slice());
        }
    }
}

impl Decode for InclusionProof {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        KZG_COMMITMENT_INCLUSION_PROOF_DEPTH * 32
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let expected = <Self as Decode>::ssz_fixed_len();
        if bytes.len() != expected {
            return Err(DecodeError::InvalidByteLength {
                len: bytes.len(),
                expected,
            });
        }

        let mut branches = [B256::ZERO; KZG_COMMITMENT_INCLUSION_PROOF_DEPTH];
        for (branch, chunk) in branches.iter_mut().zip(bytes.chunks_exact(32)) {
            *branch = B256::from_slice(chunk);
        }
        Ok(Self(branches))
    }
}
