use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};

use crate::primitives::{B256, Blob, BlsSignature, InclusionProof, KzgCommitment, KzgProof};
use crate::serde_utils::quoted_u64;

/// Beacon block header, as committed to by a sidecar's signed header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct BeaconBlockHeader {
    #[serde(with = "quoted_u64")]
    pub slot: u64,
    #[serde(with = "quoted_u64")]
    pub proposer_index: u64,
    pub parent_root: B256,
    pub state_root: B256,
    pub body_root: B256,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct SignedBeaconBlockHeader {
    pub message: BeaconBlockHeader,
    pub signature: BlsSignature,
}

/// A single blob together with the commitment, proof and header that tie it
/// to a beacon block.
///
/// Field order matters: it is the SSZ container layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct BlobSidecar {
    #[serde(with = "quoted_u64")]
    pub index: u64,
    pub blob: Blob,
    pub kzg_commitment: KzgCommitment,
    pub kzg_proof: KzgProof,
    pub signed_block_header: SignedBeaconBlockHeader,
    pub kzg_commitment_inclusion_proof: InclusionProof,
}

impl BlobSidecar {
    pub fn slot(&self) -> u64 {
        self.signed_block_header.message.slot
    }
}

/// The collection handed to storage: `{"data": [...]}` in JSON.
///
/// The default value is the empty collection every non-success fetch yields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobSidecars {
    pub data: Vec<BlobSidecar>,
}

impl BlobSidecars {
    pub fn new(data: Vec<BlobSidecar>) -> Self {
        Self { data }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}
