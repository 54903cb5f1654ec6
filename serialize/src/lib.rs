use bytes::Buf;
use log::warn;
use sha2::{Digest, Sha256};
use std::io::{Cursor, Error, ErrorKind, Read};

const LARGE_VEC_WARNING: u32 = 2048;

pub fn hash_256(input: impl AsRef<[u8]>) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hasher.finalize().into()
}

/// Deterministic, byte-exact encoding shared by every implementation of the protocol.
///
/// Integers are big-endian and fixed width, `bool` is a single `0`/`1` byte,
/// `Option` is a presence byte followed by the value, and sequences are a `u32`
/// length prefix followed by their items.
pub trait Streamable {
    fn to_bytes(&self) -> Vec<u8>
    where
        Self: Sized;
    fn from_bytes<T: AsRef<[u8]>>(bytes: &mut Cursor<T>) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parses a complete value, rejecting trailing bytes.
    fn parse(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let mut cursor = Cursor::new(bytes);
        let value = Self::from_bytes(&mut cursor)?;
        if cursor.has_remaining() {
            Err(Error::new(
                ErrorKind::InvalidData,
                format!(
                    "Found {} trailing bytes after parsing value",
                    cursor.remaining()
                ),
            ))
        } else {
            Ok(value)
        }
    }

    /// SHA-256 of the streamable encoding.
    fn get_hash(&self) -> [u8; 32]
    where
        Self: Sized,
    {
        hash_256(self.to_bytes())
    }
}

impl Streamable for bool {
    fn to_bytes(&self) -> Vec<u8> {
        vec![u8::from(*self)]
    }
    fn from_bytes<T: AsRef<[u8]>>(bytes: &mut Cursor<T>) -> Result<Self, Error> {
        let mut bool_buf: [u8; 1] = [0; 1];
        bytes.read_exact(&mut bool_buf)?;
        match bool_buf[0] {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::new(
                ErrorKind::InvalidData,
                format!("Failed to parse bool, invalid value: {:?}", bool_buf[0]),
            )),
        }
    }
}

impl<T> Streamable for Option<T>
where
    T: Streamable,
{
    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::new();
        match &self {
            Some(t) => {
                bytes.push(1u8);
                bytes.extend(t.to_bytes());
            }
            None => {
                bytes.push(0u8);
            }
        }
        bytes
    }
    fn from_bytes<B: AsRef<[u8]>>(bytes: &mut Cursor<B>) -> Result<Self, Error> {
        let mut flag_buf: [u8; 1] = [0; 1];
        bytes.read_exact(&mut flag_buf)?;
        match flag_buf[0] {
            0 => Ok(None),
            1 => Ok(Some(T::from_bytes(bytes)?)),
            other => Err(Error::new(
                ErrorKind::InvalidData,
                format!("Failed to parse Option, invalid presence flag: {other}"),
            )),
        }
    }
}

impl<T> Streamable for Vec<T>
where
    T: Streamable,
{
    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::new();
        bytes.extend((self.len() as u32).to_be_bytes());
        for e in self {
            bytes.extend(e.to_bytes());
        }
        bytes
    }
    fn from_bytes<B: AsRef<[u8]>>(bytes: &mut Cursor<B>) -> Result<Self, Error> {
        let mut u32_buf: [u8; 4] = [0; 4];
        bytes.read_exact(&mut u32_buf)?;
        let vec_len = u32::from_be_bytes(u32_buf);
        if vec_len > LARGE_VEC_WARNING {
            warn!("Parsing Large Vec: {vec_len}")
        }
        (0..vec_len).try_fold(Vec::new(), |mut vec, _| {
            vec.push(T::from_bytes(bytes)?);
            Ok(vec)
        })
    }
}

macro_rules! impl_primitives {
    ($($name: ident, $size:expr);*) => {
        $(
            impl Streamable for $name {
                fn to_bytes(&self) -> Vec<u8> {
                    self.to_be_bytes().to_vec()
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
                        let mut buffer: [u8; $size] = [0; $size];
                        bytes.read_exact(&mut buffer)?;
                        Ok($name::from_be_bytes(buffer))
                    }
                }
            }
        )*
    };
    ()=>{};
}
impl_primitives!(
    u8, 1;
    u16, 2;
    u32, 4;
    u64, 8;
    u128, 16
);
