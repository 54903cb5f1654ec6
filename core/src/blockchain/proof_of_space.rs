use crate::blockchain::sized_bytes::{prep_hex_str, Bytes32, Bytes48};
use crate::consensus::constants::ConsensusConstants;
use crate::errors::ConsensusError;
use crate::traits::engines::ProofOfSpaceEngine;
use crate::traits::SizedBytes;
use dg_pot_serialize::Streamable;
use hex::{decode, encode};
use log::debug;
use serde::de::Visitor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::io::{Cursor, Error, ErrorKind};

#[derive(Clone, PartialEq, Eq, Default)]
pub struct ProofBytes(Vec<u8>);

impl ProofBytes {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl Display for ProofBytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(&self.0))
    }
}
impl Debug for ProofBytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(&self.0))
    }
}

impl Streamable for ProofBytes {
    fn to_bytes(&self) -> Vec<u8> {
        Streamable::to_bytes(&self.0)
    }

    fn from_bytes<T: AsRef<[u8]>>(bytes: &mut Cursor<T>) -> Result<Self, Error> {
        Ok(Self(Streamable::from_bytes(bytes)?))
    }
}

impl Serialize for ProofBytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&encode(&self.0))
    }
}

struct ProofBytesVisitor;

impl<'de> Visitor<'de> for ProofBytesVisitor {
    type Value = ProofBytes;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("Expecting a hex String")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(ProofBytes(
            decode(prep_hex_str(value)).map_err(|e| serde::de::Error::custom(e.to_string()))?,
        ))
    }
}

impl<'a> Deserialize<'a> for ProofBytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'a>,
    {
        deserializer.deserialize_str(ProofBytesVisitor)
    }
}

impl AsRef<[u8]> for ProofBytes {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl From<Vec<u8>> for ProofBytes {
    fn from(bytes: Vec<u8>) -> ProofBytes {
        ProofBytes(bytes)
    }
}

/// Who the farming rewards of a plot are bound to. Exactly one is committed in the plot id.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub enum PoolIdentity {
    PublicKey(Bytes48),
    ContractPuzzleHash(Bytes32),
}

impl PoolIdentity {
    /// Builds the identity from the two optional wire fields.
    ///
    /// An all-zero contract puzzle hash is treated as absent.
    pub fn from_parts(
        pool_public_key: Option<Bytes48>,
        pool_contract_puzzle_hash: Option<Bytes32>,
    ) -> Result<Self, ConsensusError> {
        let pool_contract_puzzle_hash = pool_contract_puzzle_hash.filter(|ph| !ph.is_null());
        match (pool_public_key, pool_contract_puzzle_hash) {
            (Some(pk), None) => Ok(PoolIdentity::PublicKey(pk)),
            (None, Some(ph)) => Ok(PoolIdentity::ContractPuzzleHash(ph)),
            (Some(_), Some(_)) => Err(ConsensusError::MalformedProof(
                "both pool public key and pool contract puzzle hash are set".to_string(),
            )),
            (None, None) => Err(ConsensusError::MalformedProof(
                "neither pool public key nor pool contract puzzle hash is set".to_string(),
            )),
        }
    }

    #[must_use]
    pub fn pool_public_key(&self) -> Option<&Bytes48> {
        match self {
            PoolIdentity::PublicKey(pk) => Some(pk),
            PoolIdentity::ContractPuzzleHash(_) => None,
        }
    }

    #[must_use]
    pub fn pool_contract_puzzle_hash(&self) -> Option<&Bytes32> {
        match self {
            PoolIdentity::PublicKey(_) => None,
            PoolIdentity::ContractPuzzleHash(ph) => Some(ph),
        }
    }

    #[must_use]
    pub fn plot_id(&self, plot_public_key: &Bytes48) -> Bytes32 {
        match self {
            PoolIdentity::PublicKey(pk) => calculate_plot_id_public_key(pk, plot_public_key),
            PoolIdentity::ContractPuzzleHash(ph) => {
                calculate_plot_id_puzzle_hash(ph, plot_public_key)
            }
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct ProofOfSpace {
    pub challenge: Bytes32,
    pub pool: PoolIdentity,
    pub plot_public_key: Bytes48,
    pub size: u8,
    pub proof: ProofBytes,
}

impl ProofOfSpace {
    pub fn from_parts(
        challenge: Bytes32,
        pool_public_key: Option<Bytes48>,
        pool_contract_puzzle_hash: Option<Bytes32>,
        plot_public_key: Bytes48,
        size: u8,
        proof: ProofBytes,
    ) -> Result<Self, ConsensusError> {
        Ok(Self {
            challenge,
            pool: PoolIdentity::from_parts(pool_public_key, pool_contract_puzzle_hash)?,
            plot_public_key,
            size,
            proof,
        })
    }

    #[must_use]
    pub fn get_plot_id(&self) -> Bytes32 {
        self.pool.plot_id(&self.plot_public_key)
    }

    /// Checks the proof against the original challenge and signage point using the
    /// base plot filter and returns the quality string on success.
    pub fn verify_and_get_quality_string<E: ProofOfSpaceEngine + ?Sized>(
        &self,
        constants: &ConsensusConstants,
        engine: &E,
        original_challenge_hash: &Bytes32,
        signage_point: &Bytes32,
    ) -> Result<Bytes32, ConsensusError> {
        self.verify_with_prefix_bits(
            constants,
            engine,
            original_challenge_hash,
            signage_point,
            constants.number_zero_bits_plot_filter,
        )
    }

    /// Same as [`ProofOfSpace::verify_and_get_quality_string`] with the plot filter
    /// reduced according to the fork schedule at `height`.
    pub fn verify_and_get_quality_string_at_height<E: ProofOfSpaceEngine + ?Sized>(
        &self,
        constants: &ConsensusConstants,
        engine: &E,
        original_challenge_hash: &Bytes32,
        signage_point: &Bytes32,
        height: u32,
    ) -> Result<Bytes32, ConsensusError> {
        self.verify_with_prefix_bits(
            constants,
            engine,
            original_challenge_hash,
            signage_point,
            calculate_prefix_bits(constants, height),
        )
    }

    fn verify_with_prefix_bits<E: ProofOfSpaceEngine + ?Sized>(
        &self,
        constants: &ConsensusConstants,
        engine: &E,
        original_challenge_hash: &Bytes32,
        signage_point: &Bytes32,
        prefix_bits: u8,
    ) -> Result<Bytes32, ConsensusError> {
        if self.size < constants.min_plot_size || self.size > constants.max_plot_size {
            debug!("Rejected proof of space with plot size {}", self.size);
            return Err(ConsensusError::range(
                "plot size",
                self.size,
                constants.min_plot_size,
                constants.max_plot_size,
            ));
        }
        let plot_id = self.get_plot_id();
        let expected = calculate_pos_challenge(&plot_id, original_challenge_hash, signage_point);
        if expected != self.challenge {
            debug!(
                "Rejected proof of space for plot {plot_id}: expected challenge {expected}, found {}",
                self.challenge
            );
            return Err(ConsensusError::ChallengeMismatch {
                expected,
                found: self.challenge,
            });
        }
        let filter_input =
            calculate_plot_filter_input(&plot_id, original_challenge_hash, signage_point);
        if !passes_plot_filter(prefix_bits, &filter_input) {
            debug!("Plot {plot_id} did not pass the {prefix_bits} bit plot filter");
            return Err(ConsensusError::PlotFilterRejected {
                filter_input,
                prefix_bits,
            });
        }
        if self.proof.is_empty() {
            debug!("Rejected empty proof of space for plot {plot_id}");
            return Err(ConsensusError::MalformedProof(format!(
                "empty proof for plot {plot_id}"
            )));
        }
        engine
            .validate_proof(&plot_id, self.size, &self.challenge, self.proof.as_ref())
            .ok_or_else(|| {
                debug!(
                    "Proof of space engine rejected {} byte proof for plot {plot_id}",
                    self.proof.len()
                );
                ConsensusError::MalformedProof(format!(
                    "proof does not decode to a quality string for plot {plot_id}"
                ))
            })
    }
}

impl Streamable for ProofOfSpace {
    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![];
        bytes.extend(self.challenge.to_bytes());
        bytes.extend(self.pool.pool_public_key().copied().to_bytes());
        bytes.extend(self.pool.pool_contract_puzzle_hash().copied().to_bytes());
        bytes.extend(self.plot_public_key.to_bytes());
        bytes.extend(self.size.to_bytes());
        bytes.extend(self.proof.to_bytes());
        bytes
    }

    fn from_bytes<T: AsRef<[u8]>>(bytes: &mut Cursor<T>) -> Result<Self, Error> {
        let challenge = Bytes32::from_bytes(bytes)?;
        let pool_public_key = Option::<Bytes48>::from_bytes(bytes)?;
        let pool_contract_puzzle_hash = Option::<Bytes32>::from_bytes(bytes)?;
        let plot_public_key = Bytes48::from_bytes(bytes)?;
        let size = u8::from_bytes(bytes)?;
        let proof = ProofBytes::from_bytes(bytes)?;
        Self::from_parts(
            challenge,
            pool_public_key,
            pool_contract_puzzle_hash,
            plot_public_key,
            size,
            proof,
        )
        .map_err(|e| Error::new(ErrorKind::InvalidData, e))
    }
}

#[must_use]
pub fn calculate_plot_id_public_key(
    pool_public_key: &Bytes48,
    plot_public_key: &Bytes48,
) -> Bytes32 {
    let mut hasher: Sha256 = Sha256::new();
    hasher.update(pool_public_key);
    hasher.update(plot_public_key);
    Bytes32::new(hasher.finalize().into())
}

#[must_use]
pub fn calculate_plot_id_puzzle_hash(
    pool_contract_puzzle_hash: &Bytes32,
    plot_public_key: &Bytes48,
) -> Bytes32 {
    let mut hasher: Sha256 = Sha256::new();
    hasher.update(pool_contract_puzzle_hash);
    hasher.update(plot_public_key);
    Bytes32::new(hasher.finalize().into())
}

/// Plot filter strength at `height`. Each scheduled reduction halves the number of
/// plots that must be checked per signage point.
#[must_use]
pub fn calculate_prefix_bits(constants: &ConsensusConstants, height: u32) -> u8 {
    let prefix_bits = constants.number_zero_bits_plot_filter;
    if height >= constants.plot_filter_32_height {
        prefix_bits.saturating_sub(4)
    } else if height >= constants.plot_filter_64_height {
        prefix_bits.saturating_sub(3)
    } else if height >= constants.plot_filter_128_height {
        prefix_bits.saturating_sub(2)
    } else if height >= constants.hard_fork_height {
        prefix_bits.saturating_sub(1)
    } else {
        prefix_bits
    }
}

/// True when the first `prefix_bits` bits of `filter_input` are zero.
#[must_use]
pub fn passes_plot_filter(prefix_bits: u8, filter_input: &Bytes32) -> bool {
    let mut remaining = usize::from(prefix_bits);
    for b in filter_input.as_ref() {
        if remaining == 0 {
            return true;
        }
        if remaining >= 8 {
            if *b != 0 {
                return false;
            }
            remaining -= 8;
        } else {
            return b >> (8 - remaining) == 0;
        }
    }
    remaining == 0
}

#[must_use]
pub fn calculate_plot_filter_input(
    plot_id: &Bytes32,
    challenge_hash: &Bytes32,
    signage_point: &Bytes32,
) -> Bytes32 {
    let mut hasher: Sha256 = Sha256::new();
    hasher.update(plot_id);
    hasher.update(challenge_hash);
    hasher.update(signage_point);
    Bytes32::new(hasher.finalize().into())
}

#[must_use]
pub fn calculate_pos_challenge(
    plot_id: &Bytes32,
    challenge_hash: &Bytes32,
    signage_point: &Bytes32,
) -> Bytes32 {
    let mut hasher: Sha256 = Sha256::new();
    hasher.update(calculate_plot_filter_input(
        plot_id,
        challenge_hash,
        signage_point,
    ));
    Bytes32::new(hasher.finalize().into())
}
