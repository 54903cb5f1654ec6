use crate::blockchain::sized_bytes::Bytes32;
use crate::errors::ConsensusError;
use hex_literal::hex;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MAINNET_GENESIS_CHALLENGE: Bytes32 =
    Bytes32::from_sized_bytes(hex!("ccd5bb71183532bff220ba46c268991a3ff07eb358e8255a65c30a2dce0e5fbb"));
pub const GENESIS_PRE_FARM_POOL_PUZZLE_HASH: Bytes32 =
    Bytes32::from_sized_bytes(hex!("d23da14695a188ae5708dd152263c4db883eb27edeb936178d4d988b8f3ce5fc"));
pub const GENESIS_PRE_FARM_FARMER_PUZZLE_HASH: Bytes32 =
    Bytes32::from_sized_bytes(hex!("3d8765d3a597ec1d99663f6c9816d915b9f68613ac94009884c4addaefcce6af"));
pub const TESTNET_10_GENESIS_CHALLENGE: Bytes32 =
    Bytes32::from_sized_bytes(hex!("ae83525ba8d1dd3f09b277de18ca3e43fc0af20d20c4b3e92ef2a48bd291ccb2"));
pub const TESTNET_11_GENESIS_CHALLENGE: Bytes32 =
    Bytes32::from_sized_bytes(hex!("37a90eb5185a9c4439a91ddc98bbadce7b4feba060d50116a067de66bf236615"));

/// Network-wide consensus parameters. Loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusConstants {
    pub slot_blocks_target: u32, //How many blocks to target per sub-slot
    pub min_blocks_per_challenge_block: u8, //How many blocks must be created per slot (to make challenge sb)
    //Max number of blocks that can be infused into a sub-slot.
    //Note: this must be less than sub_epoch_blocks/2, and > slot_blocks_target
    pub max_sub_slot_blocks: u32,
    pub num_sps_sub_slot: u32, //The number of signage points per sub-slot (including the 0th sp at the sub-slot start)

    pub sub_slot_iters_starting: u64, //The sub_slot_iters for the first epoch
    pub difficulty_constant_factor: u128, //Multiplied by the difficulty to get iterations
    pub difficulty_starting: u64,     //The difficulty for the first epoch
    //The maximum factor by which difficulty and sub_slot_iters can change per epoch
    pub difficulty_change_max_factor: u32,
    pub sub_epoch_blocks: u32, //The number of blocks per sub-epoch
    pub epoch_blocks: u32, //The number of blocks per epoch, must be a multiple of sub_epoch_blocks

    pub significant_bits: u8, //The number of bits to look at in difficulty and min iters. The rest are zeroed
    pub discriminant_size_bits: u16, //Max is 1024 (based on ClassGroupElement int size)
    pub number_zero_bits_plot_filter: u8, //H(plot id + challenge hash + signage point) must start with these many zeroes
    pub min_plot_size: u8,
    pub max_plot_size: u8,
    pub sub_slot_time_target: u32, //The target number of seconds per sub-slot
    pub num_sp_intervals_extra: u64, //The difference between signage point and infusion point (plus required_iters)
    pub max_future_time: u32, //The next block can have a timestamp of at most these many seconds more
    pub number_of_timestamps: u8, //Than the average of the last number_of_timestamps blocks
    //Used as the initial cc rc challenges, as well as first block back pointers, and first SES back pointer
    pub genesis_challenge: Bytes32,
    //Forks should change this value to provide replay attack protection
    pub agg_sig_me_additional_data: Bytes32,
    pub genesis_pre_farm_pool_puzzle_hash: Bytes32, //The block at height must pay out to this pool puzzle hash
    pub genesis_pre_farm_farmer_puzzle_hash: Bytes32, //The block at height must pay out to this farmer puzzle hash
    pub max_vdf_witness_size: u8, //The maximum number of class group elements within an n-wesolowski proof
    pub max_coin_amount: u64,
    pub max_block_cost_clvm: u64, //Max block cost in clvm cost units
    pub cost_per_byte: u64,       //Cost per byte of generator program
    pub pool_sub_slot_iters: u64,

    //Heights at which the plot filter is relaxed
    pub hard_fork_height: u32,
    pub plot_filter_128_height: u32,
    pub plot_filter_64_height: u32,
    pub plot_filter_32_height: u32,
}

impl Default for ConsensusConstants {
    fn default() -> Self {
        MAINNET.clone()
    }
}

impl ConsensusConstants {
    /// Checks the arithmetic preconditions every consumer of these constants relies on.
    pub fn validate(&self) -> Result<(), ConsensusError> {
        if self.num_sps_sub_slot == 0 || self.num_sps_sub_slot > u32::from(u8::MAX) + 1 {
            return Err(ConsensusError::Config(format!(
                "num_sps_sub_slot must be in [1, 256], got {}",
                self.num_sps_sub_slot
            )));
        }
        if self.num_sp_intervals_extra >= u64::from(self.num_sps_sub_slot) {
            return Err(ConsensusError::Config(format!(
                "num_sp_intervals_extra {} must be below num_sps_sub_slot {}",
                self.num_sp_intervals_extra, self.num_sps_sub_slot
            )));
        }
        if self.sub_slot_iters_starting % u64::from(self.num_sps_sub_slot) != 0 {
            return Err(ConsensusError::Config(format!(
                "sub_slot_iters_starting {} is not divisible by num_sps_sub_slot {}",
                self.sub_slot_iters_starting, self.num_sps_sub_slot
            )));
        }
        if self.min_plot_size == 0 || self.min_plot_size > self.max_plot_size {
            return Err(ConsensusError::Config(format!(
                "invalid plot size bounds [{}, {}]",
                self.min_plot_size, self.max_plot_size
            )));
        }
        if self.sub_epoch_blocks == 0 || self.epoch_blocks % self.sub_epoch_blocks != 0 {
            return Err(ConsensusError::Config(format!(
                "epoch_blocks {} must be a multiple of sub_epoch_blocks {}",
                self.epoch_blocks, self.sub_epoch_blocks
            )));
        }
        if self.min_blocks_per_challenge_block == 0 {
            return Err(ConsensusError::Config(
                "min_blocks_per_challenge_block must be at least 1".to_string(),
            ));
        }
        if self.difficulty_starting == 0 || self.difficulty_constant_factor == 0 {
            return Err(ConsensusError::Config(
                "difficulty_starting and difficulty_constant_factor must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

lazy_static! {
    pub static ref MAINNET: ConsensusConstants = ConsensusConstants {
        slot_blocks_target: 32,
        min_blocks_per_challenge_block: 16,
        max_sub_slot_blocks: 128,
        num_sps_sub_slot: 64,
        sub_slot_iters_starting: 2u64.pow(27),
        difficulty_constant_factor: 2u128.pow(67),
        difficulty_starting: 7,
        difficulty_change_max_factor: 3,
        sub_epoch_blocks: 384,
        epoch_blocks: 4608,
        significant_bits: 8,
        discriminant_size_bits: 1024,
        number_zero_bits_plot_filter: 9,
        min_plot_size: 32,
        max_plot_size: 50,
        sub_slot_time_target: 600,
        num_sp_intervals_extra: 3,
        max_future_time: 5 * 60,
        number_of_timestamps: 11,
        genesis_challenge: MAINNET_GENESIS_CHALLENGE,
        agg_sig_me_additional_data: MAINNET_GENESIS_CHALLENGE,
        genesis_pre_farm_pool_puzzle_hash: GENESIS_PRE_FARM_POOL_PUZZLE_HASH,
        genesis_pre_farm_farmer_puzzle_hash: GENESIS_PRE_FARM_FARMER_PUZZLE_HASH,
        max_vdf_witness_size: 64,
        max_coin_amount: u64::MAX,
        max_block_cost_clvm: 11_000_000_000,
        cost_per_byte: 12_000,
        pool_sub_slot_iters: 37_600_000_000,
        hard_fork_height: 5_496_000,
        plot_filter_128_height: 10_542_000,
        plot_filter_64_height: 15_592_000,
        plot_filter_32_height: 20_643_000,
    };
    pub static ref TESTNET_10: ConsensusConstants = ConsensusConstants {
        agg_sig_me_additional_data: TESTNET_10_GENESIS_CHALLENGE,
        genesis_challenge: TESTNET_10_GENESIS_CHALLENGE,
        difficulty_constant_factor: 10_052_721_566_054,
        difficulty_starting: 30,
        epoch_blocks: 768,
        min_plot_size: 18,
        hard_fork_height: 2_997_292,
        plot_filter_128_height: 3_061_804,
        plot_filter_64_height: 8_010_796,
        plot_filter_32_height: 13_056_556,
        ..MAINNET.clone()
    };
    pub static ref TESTNET_11: ConsensusConstants = ConsensusConstants {
        agg_sig_me_additional_data: TESTNET_11_GENESIS_CHALLENGE,
        genesis_challenge: TESTNET_11_GENESIS_CHALLENGE,
        difficulty_constant_factor: 10_052_721_566_054,
        difficulty_starting: 30,
        epoch_blocks: 768,
        min_plot_size: 18,
        hard_fork_height: 0,
        plot_filter_128_height: 6_029_568,
        plot_filter_64_height: 11_075_328,
        plot_filter_32_height: 16_121_088,
        ..MAINNET.clone()
    };
    pub static ref CONSENSUS_CONSTANTS_MAP: HashMap<String, ConsensusConstants> = HashMap::from([
        ("mainnet".to_string(), MAINNET.clone()),
        ("testnet10".to_string(), TESTNET_10.clone()),
        ("testnet11".to_string(), TESTNET_11.clone()),
    ]);
}
