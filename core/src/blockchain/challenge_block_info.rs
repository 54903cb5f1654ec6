use crate::blockchain::proof_of_space::ProofOfSpace;
use crate::blockchain::reward_chain_block::RewardChainBlock;
use crate::blockchain::sized_bytes::Bytes96;
use crate::blockchain::vdf_info::VdfInfo;
use dg_pot_macros::Streamable;
use serde::{Deserialize, Serialize};

/// The challenge chain's view of a block. Its hash is what later blocks commit to.
#[derive(Streamable, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct ChallengeBlockInfo {
    pub proof_of_space: ProofOfSpace,
    pub challenge_chain_sp_vdf: Option<VdfInfo>, //Only present if not the first sp
    pub challenge_chain_sp_signature: Bytes96,
    pub challenge_chain_ip_vdf: VdfInfo,
}

impl From<&RewardChainBlock> for ChallengeBlockInfo {
    fn from(rcb: &RewardChainBlock) -> Self {
        Self {
            proof_of_space: rcb.proof_of_space.clone(),
            challenge_chain_sp_vdf: rcb.challenge_chain_sp_vdf.clone(),
            challenge_chain_sp_signature: rcb.challenge_chain_sp_signature,
            challenge_chain_ip_vdf: rcb.challenge_chain_ip_vdf.clone(),
        }
    }
}
