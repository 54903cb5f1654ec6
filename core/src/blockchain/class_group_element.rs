use crate::blockchain::sized_bytes::Bytes100;
use dg_pot_macros::Streamable;
use serde::{Deserialize, Serialize};

/// Opaque VDF state. Only byte equality and copying are exposed at this layer.
#[derive(Streamable, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug, Default)]
pub struct ClassgroupElement {
    pub data: Bytes100,
}

impl ClassgroupElement {
    /// The generator every VDF chain starts from: `0x08` followed by zero bytes.
    #[must_use]
    pub fn get_default_element() -> Self {
        let mut data = [0u8; 100];
        data[0] = 0x08;
        Self { data: data.into() }
    }
}
