use num_bigint::BigUint;
use once_cell::sync::Lazy;

pub static TWO_POW_256: Lazy<BigUint> = Lazy::new(|| BigUint::from(1u8) << 256usize);

/// The infused challenge chain output is only kept for blocks at or below this deficit.
pub const MAX_DEFICIT_WITH_ICC_OUTPUT: u8 = 3;
