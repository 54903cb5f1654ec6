use crate::blockchain::proof_of_space::ProofOfSpace;
use crate::blockchain::sized_bytes::{Bytes32, Bytes96};
use crate::blockchain::vdf_info::VdfInfo;
use crate::consensus::constants::ConsensusConstants;
use crate::errors::ConsensusError;
use crate::traits::engines::ProofOfSpaceEngine;
use dg_pot_macros::Streamable;
use dg_pot_serialize::Streamable;
use serde::{Deserialize, Serialize};

#[derive(Streamable, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct RewardChainBlock {
    pub weight: u128,
    pub height: u32,
    pub total_iters: u128,
    pub signage_point_index: u8,
    pub pos_ss_cc_challenge_hash: Bytes32,
    pub proof_of_space: ProofOfSpace,
    pub challenge_chain_sp_vdf: Option<VdfInfo>, //Not present for first sp in slot
    pub challenge_chain_sp_signature: Bytes96,
    pub challenge_chain_ip_vdf: VdfInfo,
    pub reward_chain_sp_vdf: Option<VdfInfo>, //Not present for first sp in slot
    pub reward_chain_sp_signature: Bytes96,
    pub reward_chain_ip_vdf: VdfInfo,
    pub infused_challenge_chain_ip_vdf: Option<VdfInfo>, //Iff deficit < 16
    pub is_transaction_block: bool,
}

impl RewardChainBlock {
    /// The challenge chain signage point output hash, or the sub-slot challenge
    /// itself when the block uses the first signage point of the slot.
    #[must_use]
    pub fn cc_sp_hash(&self) -> Bytes32 {
        match &self.challenge_chain_sp_vdf {
            Some(vdf) => vdf.output.get_hash().into(),
            None => self.pos_ss_cc_challenge_hash,
        }
    }

    /// Verifies the block's proof of space at its own height.
    pub fn verify_and_get_quality_string<E: ProofOfSpaceEngine + ?Sized>(
        &self,
        constants: &ConsensusConstants,
        engine: &E,
    ) -> Result<Bytes32, ConsensusError> {
        self.proof_of_space.verify_and_get_quality_string_at_height(
            constants,
            engine,
            &self.pos_ss_cc_challenge_hash,
            &self.cc_sp_hash(),
            self.height,
        )
    }
}
