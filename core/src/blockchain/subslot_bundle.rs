use crate::blockchain::challenge_chain_subslot::ChallengeChainSubSlot;
use crate::blockchain::infused_challenge_chain_subslot::InfusedChallengeChainSubSlot;
use crate::blockchain::reward_chain_subslot::RewardChainSubSlot;
use crate::blockchain::sized_bytes::Bytes32;
use crate::blockchain::subslot_proofs::SubSlotProofs;
use crate::consensus::constants::ConsensusConstants;
use crate::errors::ConsensusError;
use dg_pot_macros::Streamable;
use dg_pot_serialize::Streamable;
use serde::{Deserialize, Serialize};

#[derive(Streamable, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct EndOfSubSlotBundle {
    pub challenge_chain: ChallengeChainSubSlot,
    pub infused_challenge_chain: Option<InfusedChallengeChainSubSlot>,
    pub reward_chain: RewardChainSubSlot,
    pub proofs: SubSlotProofs,
}

impl EndOfSubSlotBundle {
    #[must_use]
    pub fn challenge_chain_hash(&self) -> Bytes32 {
        self.challenge_chain.get_hash().into()
    }

    #[must_use]
    pub fn infused_challenge_chain_hash(&self) -> Option<Bytes32> {
        self.infused_challenge_chain
            .as_ref()
            .map(|icc| icc.get_hash().into())
    }

    #[must_use]
    pub fn reward_chain_hash(&self) -> Bytes32 {
        self.reward_chain.get_hash().into()
    }

    /// Structural checks that need no VDF work: the infused challenge chain sub-slot,
    /// its proof and the reward chain's hash of it travel together, every chain commits
    /// to the right sub-slot hashes, and the deficit and difficulty fields are in range.
    ///
    /// The challenge chain only carries the infused challenge chain hash when the
    /// sub-slot closes with the deficit reset to `min_blocks_per_challenge_block`.
    pub fn validate(&self, constants: &ConsensusConstants) -> Result<(), ConsensusError> {
        let icc_hash = self.infused_challenge_chain_hash();
        let parts = [
            icc_hash.is_some(),
            self.proofs.infused_challenge_chain_slot_proof.is_some(),
            self.reward_chain
                .infused_challenge_chain_sub_slot_hash
                .is_some(),
        ];
        if parts.iter().any(|p| *p != parts[0]) {
            return Err(ConsensusError::Validation(format!(
                "infused challenge chain sub slot, proof and reward chain hash must be all present or all absent, found {parts:?}"
            )));
        }
        if self.reward_chain.infused_challenge_chain_sub_slot_hash != icc_hash {
            return Err(ConsensusError::Validation(format!(
                "reward chain infused challenge chain hash mismatch, expected {icc_hash:?}"
            )));
        }
        let expected_cc_icc_hash = if self.reward_chain.deficit
            == constants.min_blocks_per_challenge_block
        {
            icc_hash
        } else {
            None
        };
        if self.challenge_chain.infused_challenge_chain_sub_slot_hash != expected_cc_icc_hash {
            return Err(ConsensusError::Validation(format!(
                "challenge chain infused challenge chain hash is {:?} at deficit {}, expected {expected_cc_icc_hash:?}",
                self.challenge_chain.infused_challenge_chain_sub_slot_hash,
                self.reward_chain.deficit
            )));
        }
        let cc_hash = self.challenge_chain_hash();
        if self.reward_chain.challenge_chain_sub_slot_hash != cc_hash {
            return Err(ConsensusError::Validation(format!(
                "reward chain commits to challenge chain sub slot {}, expected {cc_hash}",
                self.reward_chain.challenge_chain_sub_slot_hash
            )));
        }
        if self.reward_chain.deficit > constants.min_blocks_per_challenge_block {
            return Err(ConsensusError::range(
                "sub slot deficit",
                self.reward_chain.deficit,
                0u8,
                constants.min_blocks_per_challenge_block,
            ));
        }
        if self.challenge_chain.new_difficulty.is_some()
            != self.challenge_chain.new_sub_slot_iters.is_some()
        {
            return Err(ConsensusError::Validation(format!(
                "new difficulty ({:?}) and new sub slot iters ({:?}) must change together",
                self.challenge_chain.new_difficulty, self.challenge_chain.new_sub_slot_iters
            )));
        }
        Ok(())
    }

    /// True when every end of slot proof that is carried is in compact form.
    #[must_use]
    pub fn is_compactified(&self) -> bool {
        self.proofs.challenge_chain_slot_proof.is_compact()
            && self
                .proofs
                .infused_challenge_chain_slot_proof
                .as_ref()
                .map_or(true, |p| p.is_compact())
    }
}
