use crate::blockchain::class_group_element::ClassgroupElement;
use crate::blockchain::sized_bytes::Bytes32;
use crate::blockchain::vdf_info::VdfInfo;
use crate::blockchain::vdf_proof::VdfProof;
use crate::consensus::constants::ConsensusConstants;

/// Plot format specific proof decoding.
///
/// Implementations must be pure: the same inputs always produce the same quality
/// string, and they are shared across threads by the verifier.
pub trait ProofOfSpaceEngine: Send + Sync {
    /// Returns the quality string when `proof` is a valid proof of size `k` for
    /// `plot_id` at `challenge`, `None` otherwise.
    fn validate_proof(
        &self,
        plot_id: &Bytes32,
        k: u8,
        challenge: &Bytes32,
        proof: &[u8],
    ) -> Option<Bytes32>;
}

/// Wesolowski proof checking for class group VDFs.
pub trait VdfVerifier: Send + Sync {
    fn verify(
        &self,
        constants: &ConsensusConstants,
        input_el: &ClassgroupElement,
        info: &VdfInfo,
        proof: &VdfProof,
    ) -> bool;
}
