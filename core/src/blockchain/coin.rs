use crate::blockchain::sized_bytes::Bytes32;
use dg_pot_macros::Streamable;
use serde::{Deserialize, Serialize};
use sha2::Digest;
use sha2::Sha256;
use std::hash::{Hash, Hasher};

#[derive(Streamable, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Coin {
    pub parent_coin_info: Bytes32,
    pub puzzle_hash: Bytes32,
    pub amount: u64,
}
impl Coin {
    #[must_use]
    pub fn name(&self) -> Bytes32 {
        self.coin_id()
    }

    /// `sha256(parent || puzzle_hash || amount)` where the amount is the shortest
    /// big-endian encoding that still reads as a non-negative signed integer.
    #[must_use]
    pub fn coin_id(&self) -> Bytes32 {
        let mut hasher = Sha256::new();
        hasher.update(self.parent_coin_info);
        hasher.update(self.puzzle_hash);
        hasher.update(encode_amount(self.amount));
        let mut buf = [0u8; 32];
        hasher.finalize_into((&mut buf).into());
        buf.into()
    }
}
impl Hash for Coin {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(self.name().as_ref());
    }
}

fn encode_amount(amount: u64) -> Vec<u8> {
    let amount_bytes = amount.to_be_bytes();
    if amount >= 0x8000_0000_0000_0000_u64 {
        let mut encoded = Vec::with_capacity(9);
        encoded.push(0u8);
        encoded.extend_from_slice(&amount_bytes);
        encoded
    } else {
        let start = if amount == 0 {
            8
        } else {
            amount.leading_zeros().div_ceil(8).saturating_sub(1) as usize
        };
        amount_bytes[start..].to_vec()
    }
}
