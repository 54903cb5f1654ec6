use crate::traits::SizedBytes;
use bytes::Buf;
use dg_pot_serialize::Streamable;
use hex::{decode, encode, FromHexError};
use log::warn;
use serde::de::Visitor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::io::{Cursor, Error, ErrorKind, Read};
use std::str::FromStr;

pub fn prep_hex_str(to_fix: &str) -> String {
    let lc = to_fix.to_lowercase();
    if let Some(s) = lc.strip_prefix("0x") {
        s.to_string()
    } else {
        lc
    }
}

pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, FromHexError> {
    decode(prep_hex_str(hex))
}

macro_rules! impl_sized_bytes {
    ($($name: ident, $size:expr, $visitor:ident);*) => {
        $(
            #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $name {
                bytes: [u8; $size],
            }

            impl<'a> SizedBytes<'a, $size> for $name {
                fn new(bytes: [u8; $size]) -> Self {
                    Self { bytes }
                }

                fn parse(bytes: &[u8]) -> Result<Self, Error> {
                    if bytes.len() != $size {
                        if bytes.len() > $size {
                            warn!(
                                "Too Many Bytes Sent to {}, expected {} got {}",
                                stringify!($name),
                                $size,
                                bytes.len()
                            );
                        }
                        Err(Error::new(
                            ErrorKind::InvalidInput,
                            format!(
                                "Invalid length for {}, expected {} got {}",
                                stringify!($name),
                                $size,
                                bytes.len()
                            ),
                        ))
                    } else {
                        let mut buf = [0u8; $size];
                        buf.copy_from_slice(bytes);
                        Ok(Self { bytes: buf })
                    }
                }

                fn bytes(&self) -> [u8; $size] {
                    self.bytes
                }
            }

            impl $name {
                pub const fn from_sized_bytes(bytes: [u8; $size]) -> Self {
                    Self { bytes }
                }
                pub fn to_sized_bytes(&self) -> &[u8; $size] {
                    &self.bytes
                }
            }

            impl AsRef<[u8]> for $name {
                fn as_ref(&self) -> &[u8] {
                    &self.bytes
                }
            }

            impl From<[u8; $size]> for $name {
                fn from(bytes: [u8; $size]) -> Self {
                    $name::from_sized_bytes(bytes)
                }
            }

            impl From<&[u8; $size]> for $name {
                fn from(bytes: &[u8; $size]) -> Self {
                    $name::from_sized_bytes(*bytes)
                }
            }

            impl From<$name> for [u8; $size] {
                fn from(value: $name) -> Self {
                    value.bytes
                }
            }

            impl FromStr for $name {
                type Err = Error;

                fn from_str(hex: &str) -> Result<Self, Self::Err> {
                    let bytes = hex_to_bytes(hex)
                        .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;
                    <$name as SizedBytes<'_, $size>>::parse(&bytes)
                }
            }

            impl Streamable for $name {
                fn to_bytes(&self) -> Vec<u8> {
                    self.bytes.to_vec()
                }
                fn from_bytes<T: AsRef<[u8]>>(bytes: &mut Cursor<T>) -> Result<Self, Error> {
                    if bytes.remaining() < $size {
                        Err(Error::new(
                            ErrorKind::InvalidData,
                            format!(
                                "Failed to Parse {}, expected length {}, found {}",
                                stringify!($name),
                                $size,
                                bytes.remaining()
                            ),
                        ))
                    } else {
                        let mut buf = [0u8; $size];
                        bytes.read_exact(&mut buf)?;
                        Ok(buf.into())
                    }
                }
            }

            impl Serialize for $name {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: Serializer,
                {
                    serializer.serialize_str(&self.to_string())
                }
            }

            struct $visitor;

            impl<'de> Visitor<'de> for $visitor {
                type Value = $name;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    write!(formatter, "a hex string of {} bytes", $size)
                }

                fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
                where
                    E: serde::de::Error,
                {
                    $name::from_str(value).map_err(|e| E::custom(e.to_string()))
                }
            }

            impl<'a> Deserialize<'a> for $name {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: Deserializer<'a>,
                {
                    deserializer.deserialize_str($visitor)
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", encode(self.bytes))
                }
            }

            impl fmt::Debug for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", encode(self.bytes))
                }
            }

            impl Default for $name {
                fn default() -> $name {
                    $name::from_sized_bytes([0u8; $size])
                }
            }
        )*
    };
    ()=>{};
}

impl_sized_bytes!(
    Bytes32, 32, Bytes32Visitor;
    Bytes48, 48, Bytes48Visitor;
    Bytes96, 96, Bytes96Visitor;
    Bytes100, 100, Bytes100Visitor
);
