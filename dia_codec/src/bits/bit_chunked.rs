use crate::{io_utils, DiaError};
use anyhow::{anyhow, Result};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};
use std::io::{Read, Write};

const CONTINUATION: u8 = 0x80;
const GROUP_MASK: u8 = 0x7F;
const GROUP_BITS: u64 = 7;

/// An unsigned integer of any magnitude, held in its encoded form.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct BitChunkedInt {
    encoded: Vec<u8>,
}

impl Default for BitChunkedInt {
    /// Zero.
    fn default() -> Self {
        Self::encode(&BigUint::zero())
    }
}

/* Trusted construction. */
impl BitChunkedInt {
    /// Splits `val` into 7-bit groups, least significant first.
    ///
    /// When the magnitude's bit-length is a multiple of 7 (zero included),
    /// the last group also carries the continuation bit and a zero byte closes the encoding.
    pub fn encode(val: &BigUint) -> Self {
        let bits = val.bits();
        let mut encoded = if val.is_zero() {
            vec![]
        } else {
            val.to_radix_le(1 << GROUP_BITS)
        };

        let last_i = encoded.len().saturating_sub(1);
        for (i, group) in encoded.iter_mut().enumerate() {
            if i < last_i {
                *group |= CONTINUATION;
            }
        }
        if bits % GROUP_BITS == 0 {
            if let Some(last) = encoded.last_mut() {
                *last |= CONTINUATION;
            }
            encoded.push(0);
        }

        Self { encoded }
    }

    pub fn from_u64(val: u64) -> Self {
        Self::encode(&BigUint::from(val))
    }

    pub fn from_usize(val: usize) -> Self {
        Self::encode(&BigUint::from(val))
    }

    /// Encodes the unsigned little-endian magnitude `data`.
    pub fn from_bytes_le(data: &[u8]) -> Self {
        Self::encode(&BigUint::from_bytes_le(data))
    }
}

/* Validating construction. */
impl TryFrom<Vec<u8>> for BitChunkedInt {
    type Error = anyhow::Error;

    /// Accepts an already-encoded array iff every byte but the last has the continuation bit,
    /// and the last does not.
    fn try_from(encoded: Vec<u8>) -> Result<Self> {
        let (last, init) = match encoded.split_last() {
            None => {
                return Err(anyhow!(DiaError::MalformedLength(String::from(
                    "empty bit-chunked integer"
                ))))
            }
            Some(split) => split,
        };
        if last & CONTINUATION != 0 {
            return Err(anyhow!(DiaError::MalformedLength(format!(
                "last byte {last:#04x} has the continuation bit"
            ))));
        }
        if let Some(i) = init.iter().position(|b| b & CONTINUATION == 0) {
            return Err(anyhow!(DiaError::MalformedLength(format!(
                "byte {i} of {} lacks the continuation bit",
                encoded.len()
            ))));
        }
        Ok(Self { encoded })
    }
}

/* Decoding. */
impl BitChunkedInt {
    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    pub fn to_biguint(&self) -> BigUint {
        let groups = self
            .encoded
            .iter()
            .map(|b| b & GROUP_MASK)
            .collect::<Vec<_>>();
        // Every group is < 128, hence a valid digit.
        BigUint::from_radix_le(&groups, 1 << GROUP_BITS).unwrap_or_default()
    }

    /// The magnitude, given a sign chosen by the caller.
    pub fn to_bigint(&self, sign: Sign) -> BigInt {
        let mag = self.to_biguint();
        if mag.is_zero() {
            BigInt::zero()
        } else {
            BigInt::from_biguint(sign, mag)
        }
    }

    /// The decoded magnitude as minimal little-endian bytes.
    pub fn to_bytes_le(&self) -> Vec<u8> {
        self.to_biguint().to_bytes_le()
    }

    pub fn to_u64(&self) -> Result<u64> {
        self.to_biguint().to_u64().ok_or(anyhow!(DiaError::MalformedLength(
            String::from("bit-chunked integer exceeds 64 bits")
        )))
    }

    pub fn to_usize(&self) -> Result<usize> {
        self.to_biguint().to_usize().ok_or(anyhow!(DiaError::MalformedLength(
            String::from("bit-chunked integer exceeds the addressable range")
        )))
    }
}

/* Stream I/O. */
impl BitChunkedInt {
    /// Reads up to and including the first byte without the continuation bit.
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let mut encoded = vec![];
        loop {
            let b = io_utils::read_byte(r, "a bit-chunked integer")?;
            encoded.push(b);
            if b & CONTINUATION == 0 {
                return Ok(Self { encoded });
            }
        }
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<usize> {
        w.write_all(&self.encoded)?;
        Ok(self.encoded.len())
    }
}
