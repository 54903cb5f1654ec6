use crate::blockchain::foliage_block_data::FoliageBlockData;
use crate::blockchain::sized_bytes::{Bytes32, Bytes96};
use dg_pot_macros::Streamable;
use dg_pot_serialize::Streamable;
use serde::{Deserialize, Serialize};

/// The unsigned-by-consensus part of a block. Its hash is the block's header hash.
#[derive(Streamable, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Foliage {
    pub prev_block_hash: Bytes32,
    pub reward_block_hash: Bytes32,
    pub foliage_block_data: FoliageBlockData,
    pub foliage_block_data_signature: Bytes96,
    pub foliage_transaction_block_hash: Option<Bytes32>,
    pub foliage_transaction_block_signature: Option<Bytes96>,
}

impl Foliage {
    #[must_use]
    pub fn header_hash(&self) -> Bytes32 {
        self.get_hash().into()
    }
}
