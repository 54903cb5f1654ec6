use crate::blockchain::sized_bytes::Bytes32;
use crate::consensus::constants::{ConsensusConstants, CONSENSUS_CONSTANTS_MAP};
use crate::errors::ConsensusError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

/// Partial set of [`ConsensusConstants`], typically read from a YAML file and layered
/// over one of the named network presets.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusOverrides {
    pub slot_blocks_target: Option<u32>,
    pub min_blocks_per_challenge_block: Option<u8>,
    pub max_sub_slot_blocks: Option<u32>,
    pub num_sps_sub_slot: Option<u32>,
    pub sub_slot_iters_starting: Option<u64>,
    pub difficulty_constant_factor: Option<u128>,
    pub difficulty_starting: Option<u64>,
    pub difficulty_change_max_factor: Option<u32>,
    pub sub_epoch_blocks: Option<u32>,
    pub epoch_blocks: Option<u32>,
    pub significant_bits: Option<u8>,
    pub discriminant_size_bits: Option<u16>,
    pub number_zero_bits_plot_filter: Option<u8>,
    pub min_plot_size: Option<u8>,
    pub max_plot_size: Option<u8>,
    pub sub_slot_time_target: Option<u32>,
    pub num_sp_intervals_extra: Option<u64>,
    pub max_future_time: Option<u32>,
    pub number_of_timestamps: Option<u8>,
    pub genesis_challenge: Option<Bytes32>,
    pub agg_sig_me_additional_data: Option<Bytes32>,
    pub genesis_pre_farm_pool_puzzle_hash: Option<Bytes32>,
    pub genesis_pre_farm_farmer_puzzle_hash: Option<Bytes32>,
    pub max_vdf_witness_size: Option<u8>,
    pub max_coin_amount: Option<u64>,
    pub max_block_cost_clvm: Option<u64>,
    pub cost_per_byte: Option<u64>,
    pub pool_sub_slot_iters: Option<u64>,
    pub hard_fork_height: Option<u32>,
    pub plot_filter_128_height: Option<u32>,
    pub plot_filter_64_height: Option<u32>,
    pub plot_filter_32_height: Option<u32>,
}

macro_rules! apply_overrides {
    ($overrides:expr, $base:expr; $($field:ident),* $(,)?) => {
        ConsensusConstants {
            $(
                $field: $overrides.$field.clone().unwrap_or_else(|| $base.$field.clone()),
            )*
        }
    };
}

impl ConsensusOverrides {
    /// Layers these overrides over `base`. The result is not validated.
    #[must_use]
    pub fn apply(&self, base: &ConsensusConstants) -> ConsensusConstants {
        apply_overrides!(self, base;
            slot_blocks_target,
            min_blocks_per_challenge_block,
            max_sub_slot_blocks,
            num_sps_sub_slot,
            sub_slot_iters_starting,
            difficulty_constant_factor,
            difficulty_starting,
            difficulty_change_max_factor,
            sub_epoch_blocks,
            epoch_blocks,
            significant_bits,
            discriminant_size_bits,
            number_zero_bits_plot_filter,
            min_plot_size,
            max_plot_size,
            sub_slot_time_target,
            num_sp_intervals_extra,
            max_future_time,
            number_of_timestamps,
            genesis_challenge,
            agg_sig_me_additional_data,
            genesis_pre_farm_pool_puzzle_hash,
            genesis_pre_farm_farmer_puzzle_hash,
            max_vdf_witness_size,
            max_coin_amount,
            max_block_cost_clvm,
            cost_per_byte,
            pool_sub_slot_iters,
            hard_fork_height,
            plot_filter_128_height,
            plot_filter_64_height,
            plot_filter_32_height,
        )
    }

    pub fn save_as_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        fs::write(
            path.as_ref(),
            serde_yaml::to_string(&self).map_err(|e| Error::new(ErrorKind::Other, format!("{e:?}")))?,
        )
    }
}

impl TryFrom<&Path> for ConsensusOverrides {
    type Error = Error;
    fn try_from(value: &Path) -> Result<Self, Self::Error> {
        serde_yaml::from_str::<ConsensusOverrides>(&fs::read_to_string(value)?)
            .map_err(|e| Error::new(ErrorKind::InvalidData, format!("{e:?}")))
    }
}
impl TryFrom<&PathBuf> for ConsensusOverrides {
    type Error = Error;
    fn try_from(value: &PathBuf) -> Result<Self, Self::Error> {
        Self::try_from(value.as_path())
    }
}

/// Resolves a named network preset, applies optional overrides and validates the result.
pub fn load_network_constants(
    network: &str,
    overrides: Option<&ConsensusOverrides>,
) -> Result<ConsensusConstants, ConsensusError> {
    let base = CONSENSUS_CONSTANTS_MAP
        .get(network)
        .ok_or_else(|| ConsensusError::Config(format!("unknown network: {network}")))?;
    let constants = match overrides {
        Some(overrides) => overrides.apply(base),
        None => base.clone(),
    };
    constants.validate()?;
    Ok(constants)
}
