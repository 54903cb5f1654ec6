use crate::blockchain::coin::Coin;
use crate::blockchain::foliage::Foliage;
use crate::blockchain::foliage_transaction_block::FoliageTransactionBlock;
use crate::blockchain::reward_chain_block::RewardChainBlock;
use crate::blockchain::sized_bytes::Bytes32;
use crate::blockchain::subslot_bundle::EndOfSubSlotBundle;
use crate::blockchain::transactions_info::TransactionsInfo;
use crate::blockchain::vdf_proof::VdfProof;
use serde::{Deserialize, Serialize};

/// Header level view of a block: everything consensus timing needs, without the
/// transactions generator.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct FullBlock {
    pub finished_sub_slots: Vec<EndOfSubSlotBundle>,
    pub reward_chain_block: RewardChainBlock,
    pub challenge_chain_sp_proof: Option<VdfProof>, //If not first sp in sub-slot
    pub challenge_chain_ip_proof: VdfProof,
    pub reward_chain_sp_proof: Option<VdfProof>, //If not first sp in sub-slot
    pub reward_chain_ip_proof: VdfProof,
    pub infused_challenge_chain_ip_proof: Option<VdfProof>, //Iff deficit < 4
    pub foliage: Foliage,
    pub foliage_transaction_block: Option<FoliageTransactionBlock>,
    pub transactions_info: Option<TransactionsInfo>,
}

impl FullBlock {
    #[must_use]
    pub fn header_hash(&self) -> Bytes32 {
        self.foliage.header_hash()
    }

    #[must_use]
    pub fn prev_header_hash(&self) -> Bytes32 {
        self.foliage.prev_block_hash
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.reward_chain_block.height
    }

    #[must_use]
    pub fn weight(&self) -> u128 {
        self.reward_chain_block.weight
    }

    #[must_use]
    pub fn total_iters(&self) -> u128 {
        self.reward_chain_block.total_iters
    }

    #[must_use]
    pub fn is_transaction_block(&self) -> bool {
        self.foliage.foliage_transaction_block_hash.is_some()
    }

    #[must_use]
    pub fn get_included_reward_coins(&self) -> Vec<Coin> {
        match &self.transactions_info {
            Some(info) if self.is_transaction_block() => {
                info.reward_claims_incorporated.clone()
            }
            _ => vec![],
        }
    }

    /// True when every VDF proof that bears on the challenge chain is compact.
    /// Reward chain proofs are never compactified and are ignored.
    #[must_use]
    pub fn is_fully_compactified(&self) -> bool {
        self.finished_sub_slots
            .iter()
            .all(EndOfSubSlotBundle::is_compactified)
            && self
                .challenge_chain_sp_proof
                .as_ref()
                .map_or(true, VdfProof::is_compact)
            && self.challenge_chain_ip_proof.is_compact()
    }
}
