use crate::primitives::{
    B256, BYTES_PER_BLOB, Blob, BlsSignature, InclusionProof, KZG_COMMITMENT_INCLUSION_PROOF_DEPTH,
    KzgCommitment, KzgProof,
};
use crate::sidecar::{BeaconBlockHeader, BlobSidecar, BlobSidecars, SignedBeaconBlockHeader};

/// Deterministic sidecar whose bytes are derived from `index` and `slot`,
/// so two calls with the same arguments compare equal.
pub fn sample_sidecar(index: u64, slot: u64) -> BlobSidecar {
    let seed = (index as u8).wrapping_mul(31).wrapping_add(slot as u8);

    let blob_bytes: Vec<u8> = (0..BYTES_PER_BLOB)
        .map(|i| seed.wrapping_add(i as u8))
        .collect();

    let mut branches = [B256::ZERO; KZG_COMMITMENT_INCLUSION_PROOF_DEPTH];
    for (depth, branch) in branches.iter_mut().enumerate() {
        *branch = B256::repeat_byte(seed ^ depth as u8);
    }

    BlobSidecar {
        index,
        blob: Blob::new(blob_bytes).expect("blob fixture has the right length"),
        kzg_commitment: KzgCommitment::repeat_byte(seed.wrapping_add(1)),
        kzg_proof: KzgProof::repeat_byte(seed.wrapping_add(2)),
        signed_block_header: SignedBeaconBlockHeader {
            message: BeaconBlockHeader {
                slot,
                proposer_index: slot % 64,
                parent_root: B256::repeat_byte(0x11),
                state_root: B256::repeat_byte(0x22),
                body_root: B256::repeat_byte(0x33),
            },
            signature: BlsSignature::repeat_byte(0x44),
        },
        kzg_commitment_inclusion_proof: InclusionProof(branches),
    }
}

/// `count` sidecars for one slot, indexed from zero.
pub fn sample_sidecars(slot: u64, count: u64) -> BlobSidecars {
    BlobSidecars::new((0..count).map(|i| sample_sidecar(i, slot)).collect())
}
