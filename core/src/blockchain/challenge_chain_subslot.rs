use crate::blockchain::sized_bytes::Bytes32;
use crate::blockchain::vdf_info::VdfInfo;
use dg_pot_macros::Streamable;
use serde::{Deserialize, Serialize};

#[derive(Streamable, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct ChallengeChainSubSlot {
    pub challenge_chain_end_of_slot_vdf: VdfInfo,
    pub infused_challenge_chain_sub_slot_hash: Option<Bytes32>, //Only at the end of a slot
    pub subepoch_summary_hash: Option<Bytes32>, //Only once per sub-epoch, and one sub-epoch delayed
    pub new_sub_slot_iters: Option<u64>, //Only at the end of epoch, sub-epoch, and slot
    pub new_difficulty: Option<u64>,     //Only at the end of epoch, sub-epoch, and slot
}
