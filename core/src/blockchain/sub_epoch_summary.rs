use crate::blockchain::sized_bytes::Bytes32;
use crate::errors::ConsensusError;
use dg_pot_macros::Streamable;
use serde::{Deserialize, Serialize};

#[derive(Streamable, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct SubEpochSummary {
    pub prev_subepoch_summary_hash: Bytes32,
    pub reward_chain_hash: Bytes32, //hash of reward chain at end of last segment
    pub num_blocks_overflow: u8,    //How many more blocks than 384*(N-1)
    pub new_difficulty: Option<u64>, //Only once per epoch (diff adjustment)
    pub new_sub_slot_iters: Option<u64>, //Only once per epoch (diff adjustment)
}

impl SubEpochSummary {
    /// True when this summary also closes an epoch and carries new difficulty parameters.
    #[must_use]
    pub fn is_epoch_boundary(&self) -> bool {
        self.new_difficulty.is_some()
    }

    pub fn validate(&self) -> Result<(), ConsensusError> {
        if self.new_difficulty.is_some() != self.new_sub_slot_iters.is_some() {
            Err(ConsensusError::Validation(format!(
                "sub epoch summary must carry both or neither of new difficulty ({:?}) and new sub slot iters ({:?})",
                self.new_difficulty, self.new_sub_slot_iters
            )))
        } else {
            Ok(())
        }
    }
}
