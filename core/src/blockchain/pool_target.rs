use crate::blockchain::sized_bytes::Bytes32;
use dg_pot_macros::Streamable;
use serde::{Deserialize, Serialize};

#[derive(Streamable, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct PoolTarget {
    pub puzzle_hash: Bytes32,
    pub max_height: u32, //A max height of 0 means it is valid forever
}
