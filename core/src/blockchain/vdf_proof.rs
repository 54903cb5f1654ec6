use crate::blockchain::class_group_element::ClassgroupElement;
use crate::blockchain::vdf_info::VdfInfo;
use crate::consensus::constants::ConsensusConstants;
use crate::errors::ConsensusError;
use crate::traits::engines::VdfVerifier;
use dg_pot_macros::Streamable;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Streamable, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct VdfProof {
    pub witness_type: u8,
    pub witness: Vec<u8>,
    pub normalized_to_identity: bool,
}

impl VdfProof {
    /// A compact proof is a plain Wesolowski proof computed from the identity element.
    #[must_use]
    pub fn is_compact(&self) -> bool {
        self.witness_type == 0 && self.normalized_to_identity
    }

    /// Bounds the witness size and hands the proof to the VDF engine.
    pub fn validate<V: VdfVerifier + ?Sized>(
        &self,
        constants: &ConsensusConstants,
        verifier: &V,
        input_el: &ClassgroupElement,
        info: &VdfInfo,
    ) -> Result<(), ConsensusError> {
        if self.witness_type >= constants.max_vdf_witness_size {
            return Err(ConsensusError::Validation(format!(
                "VDF witness type {} exceeds max witness size {}",
                self.witness_type, constants.max_vdf_witness_size
            )));
        }
        if verifier.verify(constants, input_el, info, self) {
            Ok(())
        } else {
            debug!(
                "VDF proof rejected for challenge {} at {} iterations",
                info.challenge, info.number_of_iterations
            );
            Err(ConsensusError::Validation(format!(
                "invalid VDF proof for challenge {}",
                info.challenge
            )))
        }
    }
}
