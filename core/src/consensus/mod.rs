pub mod constants;
pub mod overrides;
pub mod pot_iterations;

use crate::consensus::constants::ConsensusConstants;
use crate::errors::ConsensusError;
use log::info;
use once_cell::sync::OnceCell;

static CONSENSUS_CONSTANTS: OnceCell<ConsensusConstants> = OnceCell::new();

/// Validates and installs the process-wide constants. Succeeds at most once.
pub fn init_consensus_constants(
    constants: ConsensusConstants,
) -> Result<&'static ConsensusConstants, ConsensusError> {
    constants.validate()?;
    let mut installed = false;
    let active = CONSENSUS_CONSTANTS.get_or_init(|| {
        installed = true;
        constants
    });
    if installed {
        info!(
            "Installed consensus constants for genesis challenge {}",
            active.genesis_challenge
        );
        Ok(active)
    } else {
        Err(ConsensusError::Config(
            "consensus constants are already initialized".to_string(),
        ))
    }
}

pub fn consensus_constants() -> Result<&'static ConsensusConstants, ConsensusError> {
    CONSENSUS_CONSTANTS
        .get()
        .ok_or_else(|| ConsensusError::Config("consensus constants are not initialized".to_string()))
}
