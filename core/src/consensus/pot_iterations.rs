use crate::blockchain::sized_bytes::Bytes32;
use crate::consensus::constants::ConsensusConstants;
use crate::constants::TWO_POW_256;
use crate::errors::ConsensusError;
use dg_pot_serialize::hash_256;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use std::cmp::max;

fn check_signage_point_index(
    constants: &ConsensusConstants,
    signage_point_index: u8,
) -> Result<(), ConsensusError> {
    if u32::from(signage_point_index) >= constants.num_sps_sub_slot {
        Err(ConsensusError::range(
            "signage point index",
            signage_point_index,
            0u8,
            constants.num_sps_sub_slot.saturating_sub(1),
        ))
    } else {
        Ok(())
    }
}

/// Overflow blocks have their signage point in the tail of one sub-slot and are
/// infused in the next one.
pub fn is_overflow_block(
    constants: &ConsensusConstants,
    signage_point_index: u8,
) -> Result<bool, ConsensusError> {
    check_signage_point_index(constants, signage_point_index)?;
    let threshold = u64::from(constants.num_sps_sub_slot)
        .checked_sub(constants.num_sp_intervals_extra)
        .ok_or_else(|| {
            ConsensusError::Config(format!(
                "num_sp_intervals_extra {} exceeds num_sps_sub_slot {}",
                constants.num_sp_intervals_extra, constants.num_sps_sub_slot
            ))
        })?;
    Ok(u64::from(signage_point_index) >= threshold)
}

pub fn calculate_sp_interval_iters(
    constants: &ConsensusConstants,
    sub_slot_iters: u64,
) -> Result<u64, ConsensusError> {
    let num_sps = u64::from(constants.num_sps_sub_slot);
    if num_sps == 0 || sub_slot_iters % num_sps != 0 {
        Err(ConsensusError::Config(format!(
            "Invalid SubSlot Iterations: {sub_slot_iters} is not divisible by {num_sps} signage points"
        )))
    } else {
        Ok(sub_slot_iters / num_sps)
    }
}

pub fn calculate_sp_iters(
    constants: &ConsensusConstants,
    sub_slot_iters: u64,
    signage_point_index: u8,
) -> Result<u64, ConsensusError> {
    check_signage_point_index(constants, signage_point_index)?;
    Ok(calculate_sp_interval_iters(constants, sub_slot_iters)? * u64::from(signage_point_index))
}

/// Iterations from the start of the sub-slot to the infusion point.
///
/// The result is reduced modulo `sub_slot_iters`; when the signage point sits close
/// to the end of the sub-slot the infusion point wraps into the next one and the
/// returned value is smaller than the signage point iterations.
pub fn calculate_ip_iters(
    constants: &ConsensusConstants,
    sub_slot_iters: u64,
    signage_point_index: u8,
    required_iters: u64,
) -> Result<u64, ConsensusError> {
    let sp_iters = calculate_sp_iters(constants, sub_slot_iters, signage_point_index)?;
    let sp_interval_iters = calculate_sp_interval_iters(constants, sub_slot_iters)?;
    if sp_interval_iters == 0 || sp_iters % sp_interval_iters != 0 || sp_iters >= sub_slot_iters {
        Err(ConsensusError::Validation(format!(
            "Invalid sp iters {sp_iters} for this ssi {sub_slot_iters}"
        )))
    } else if required_iters >= sp_interval_iters || required_iters == 0 {
        Err(ConsensusError::Validation(format!(
            "Required iters {required_iters} is not below the sp interval iters {sp_interval_iters} ({sub_slot_iters}) or not > 0"
        )))
    } else {
        // Widened so the un-reduced sum cannot overflow for any u64 sub_slot_iters.
        let unreduced = u128::from(sp_iters)
            + u128::from(constants.num_sp_intervals_extra) * u128::from(sp_interval_iters)
            + u128::from(required_iters);
        let ip_iters = unreduced % u128::from(sub_slot_iters);
        ip_iters.to_u64().ok_or_else(|| {
            ConsensusError::Validation(format!("ip iters {ip_iters} does not fit in 64 bits"))
        })
    }
}

/// Given the plot size parameter k, computes the expected size of the plot in bytes
/// (times a constant factor), `(2k + 1) * 2^(k - 1)`. The result is scale agnostic so
/// larger plots don't get more rewards per byte. `k == 0` yields zero.
#[must_use]
pub fn expected_plot_size(k: u8) -> BigUint {
    if k == 0 {
        return BigUint::from(0u8);
    }
    (BigUint::from(2u32 * u32::from(k) + 1)) << (usize::from(k) - 1)
}

/// Maps a proof of space quality to the number of VDF iterations required before the
/// block can be infused: `difficulty * difficulty_constant_factor * H(quality || sp) * expected_plot_size(k) / 2^256`,
/// never less than one and saturated at `u64::MAX`.
pub fn calculate_iterations_quality(
    difficulty_constant_factor: u128,
    quality_string: &Bytes32,
    size: u8,
    difficulty: u64,
    cc_sp_output_hash: &Bytes32,
) -> Result<u64, ConsensusError> {
    if size == 0 {
        return Err(ConsensusError::range("plot size", size, 1u8, u8::MAX));
    }
    let mut to_hash: Vec<u8> = Vec::with_capacity(64);
    to_hash.extend_from_slice(quality_string.as_ref());
    to_hash.extend_from_slice(cc_sp_output_hash.as_ref());
    let sp_quality_string = hash_256(to_hash);
    let quality_int = BigUint::from_bytes_be(&sp_quality_string);
    let top: BigUint = BigUint::from(difficulty)
        * BigUint::from(difficulty_constant_factor)
        * quality_int
        * expected_plot_size(size);
    let iters: BigUint = top / &*TWO_POW_256;
    Ok(max(1, iters.to_u64().unwrap_or(u64::MAX)))
}
