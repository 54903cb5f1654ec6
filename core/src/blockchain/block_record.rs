use crate::blockchain::challenge_block_info::ChallengeBlockInfo;
use crate::blockchain::class_group_element::ClassgroupElement;
use crate::blockchain::coin::Coin;
use crate::blockchain::full_block::FullBlock;
use crate::blockchain::sized_bytes::Bytes32;
use crate::blockchain::sub_epoch_summary::SubEpochSummary;
use crate::consensus::constants::ConsensusConstants;
use crate::consensus::pot_iterations::{calculate_ip_iters, calculate_sp_iters, is_overflow_block};
use crate::constants::MAX_DEFICIT_WITH_ICC_OUTPUT;
use crate::errors::ConsensusError;
use dg_pot_serialize::Streamable;
use serde::{Deserialize, Serialize};

/// Present iff the block is a transaction block.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct TransactionBlockInfo {
    pub timestamp: u64,
    pub prev_transaction_block_hash: Bytes32, //Header hash of the previous transaction block
    pub fees: u64,
    pub cost: u64,
    pub reward_claims_incorporated: Vec<Coin>,
}

/// Present iff the block is the first one in its sub-slot.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct FinishedSlotHashes {
    pub challenge: Vec<Bytes32>,
    pub infused_challenge: Option<Vec<Bytes32>>,
    pub reward: Vec<Bytes32>,
}

/// In memory summary of an accepted block.
///
/// Not part of the hashed chain data. It keeps enough of the block around to
/// validate future blocks and run difficulty adjustment without the full body.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct BlockRecord {
    pub header_hash: Bytes32,
    pub prev_hash: Bytes32,
    pub height: u32,
    pub weight: u128,      //Total cumulative difficulty of all ancestor blocks since genesis
    pub total_iters: u128, //Total number of VDF iterations since genesis, including this block
    pub signage_point_index: u8,
    pub challenge_vdf_output: ClassgroupElement, //Intermediary output at ip_iters in the challenge chain
    pub infused_challenge_vdf_output: Option<ClassgroupElement>, //Iff deficit <= 3
    pub reward_infusion_new_challenge: Bytes32, //The reward chain infusion output, input to next VDF
    pub challenge_block_info_hash: Bytes32,
    pub sub_slot_iters: u64,
    pub difficulty: u64,
    pub pool_puzzle_hash: Bytes32,
    pub farmer_puzzle_hash: Bytes32,
    pub required_iters: u64,
    pub deficit: u8, //16 is an overflow block after an infusion, 15 is a challenge block
    pub overflow: bool,
    pub prev_transaction_block_height: u32,
    pub transaction_block: Option<TransactionBlockInfo>,
    pub finished_slot_hashes: Option<FinishedSlotHashes>,
    pub sub_epoch_summary_included: Option<SubEpochSummary>,
}

impl BlockRecord {
    #[must_use]
    pub fn is_transaction_block(&self) -> bool {
        self.transaction_block.is_some()
    }

    #[must_use]
    pub fn first_in_sub_slot(&self) -> bool {
        self.finished_slot_hashes.is_some()
    }

    #[must_use]
    pub fn is_challenge_block(&self, constants: &ConsensusConstants) -> bool {
        Some(self.deficit) == constants.min_blocks_per_challenge_block.checked_sub(1)
    }

    pub fn sp_iters(&self, constants: &ConsensusConstants) -> Result<u64, ConsensusError> {
        calculate_sp_iters(constants, self.sub_slot_iters, self.signage_point_index)
    }

    pub fn ip_iters(&self, constants: &ConsensusConstants) -> Result<u64, ConsensusError> {
        calculate_ip_iters(
            constants,
            self.sub_slot_iters,
            self.signage_point_index,
            self.required_iters,
        )
    }

    /// Total iterations at the start of the sub-slot this block is infused in.
    pub fn ip_sub_slot_total_iters(
        &self,
        constants: &ConsensusConstants,
    ) -> Result<u128, ConsensusError> {
        let ip_iters = self.ip_iters(constants)?;
        self.total_iters
            .checked_sub(u128::from(ip_iters))
            .ok_or_else(|| {
                ConsensusError::Validation(format!(
                    "total iters {} is below ip iters {ip_iters} for block {}",
                    self.total_iters, self.header_hash
                ))
            })
    }

    /// Total iterations at the start of the sub-slot holding this block's signage
    /// point. For overflow blocks that is the sub-slot before the infusion.
    pub fn sp_sub_slot_total_iters(
        &self,
        constants: &ConsensusConstants,
    ) -> Result<u128, ConsensusError> {
        let ip_sub_slot_total_iters = self.ip_sub_slot_total_iters(constants)?;
        if self.overflow {
            ip_sub_slot_total_iters
                .checked_sub(u128::from(self.sub_slot_iters))
                .ok_or_else(|| {
                    ConsensusError::Validation(format!(
                        "overflow block {} starts its sub slot at {ip_sub_slot_total_iters}, below sub slot iters {}",
                        self.header_hash, self.sub_slot_iters
                    ))
                })
        } else {
            Ok(ip_sub_slot_total_iters)
        }
    }

    pub fn sp_total_iters(&self, constants: &ConsensusConstants) -> Result<u128, ConsensusError> {
        let sp_sub_slot_total_iters = self.sp_sub_slot_total_iters(constants)?;
        sp_sub_slot_total_iters
            .checked_add(u128::from(self.sp_iters(constants)?))
            .ok_or_else(|| {
                ConsensusError::Validation(format!(
                    "sp total iters overflow for block {}",
                    self.header_hash
                ))
            })
    }
}

/// Builds the record for an accepted block. Either every derived field is computed
/// or an error is returned; no partial record is produced.
#[allow(clippy::too_many_arguments)]
pub fn block_to_block_record(
    constants: &ConsensusConstants,
    block: &FullBlock,
    required_iters: u64,
    sub_slot_iters: u64,
    difficulty: u64,
    deficit: u8,
    prev_transaction_block_height: u32,
    sub_epoch_summary_included: Option<SubEpochSummary>,
) -> Result<BlockRecord, ConsensusError> {
    let rcb = &block.reward_chain_block;
    if deficit > constants.min_blocks_per_challenge_block {
        return Err(ConsensusError::range(
            "deficit",
            deficit,
            0u8,
            constants.min_blocks_per_challenge_block,
        ));
    }
    let overflow = is_overflow_block(constants, rcb.signage_point_index)?;
    // Every iteration query on the record must succeed.
    calculate_ip_iters(
        constants,
        sub_slot_iters,
        rcb.signage_point_index,
        required_iters,
    )?;
    let infused_challenge_vdf_output = if deficit <= MAX_DEFICIT_WITH_ICC_OUTPUT {
        match &rcb.infused_challenge_chain_ip_vdf {
            Some(vdf) => Some(vdf.output),
            None => {
                return Err(ConsensusError::Validation(format!(
                    "block {} has deficit {deficit} but no infused challenge chain ip vdf",
                    block.header_hash()
                )))
            }
        }
    } else {
        None
    };
    if let Some(ses) = &sub_epoch_summary_included {
        ses.validate()?;
    }
    for sub_slot in &block.finished_sub_slots {
        sub_slot.validate(constants)?;
    }
    let transaction_block = if block.is_transaction_block() {
        match (&block.foliage_transaction_block, &block.transactions_info) {
            (Some(ftb), Some(info)) => Some(TransactionBlockInfo {
                timestamp: ftb.timestamp,
                prev_transaction_block_hash: ftb.prev_transaction_block_hash,
                fees: info.fees,
                cost: info.cost,
                reward_claims_incorporated: info.reward_claims_incorporated.clone(),
            }),
            _ => {
                return Err(ConsensusError::Validation(format!(
                    "transaction block {} is missing its foliage transaction block or transactions info",
                    block.header_hash()
                )))
            }
        }
    } else {
        None
    };
    let finished_slot_hashes = if block.finished_sub_slots.is_empty() {
        None
    } else {
        let infused_challenge: Vec<Bytes32> = block
            .finished_sub_slots
            .iter()
            .filter_map(|sub_slot| sub_slot.infused_challenge_chain_hash())
            .collect();
        Some(FinishedSlotHashes {
            challenge: block
                .finished_sub_slots
                .iter()
                .map(|sub_slot| sub_slot.challenge_chain_hash())
                .collect(),
            infused_challenge: if infused_challenge.is_empty() {
                None
            } else {
                Some(infused_challenge)
            },
            reward: block
                .finished_sub_slots
                .iter()
                .map(|sub_slot| sub_slot.reward_chain_hash())
                .collect(),
        })
    };
    Ok(BlockRecord {
        header_hash: block.header_hash(),
        prev_hash: block.prev_header_hash(),
        height: rcb.height,
        weight: rcb.weight,
        total_iters: rcb.total_iters,
        signage_point_index: rcb.signage_point_index,
        challenge_vdf_output: rcb.challenge_chain_ip_vdf.output,
        infused_challenge_vdf_output,
        reward_infusion_new_challenge: rcb.get_hash().into(),
        challenge_block_info_hash: ChallengeBlockInfo::from(rcb).get_hash().into(),
        sub_slot_iters,
        difficulty,
        pool_puzzle_hash: block.foliage.foliage_block_data.pool_target.puzzle_hash,
        farmer_puzzle_hash: block.foliage.foliage_block_data.farmer_reward_puzzle_hash,
        required_iters,
        deficit,
        overflow,
        prev_transaction_block_height,
        transaction_block,
        finished_slot_hashes,
        sub_epoch_summary_included,
    })
}
