//! The header in front of every value.
//!
//! ```text
//! byte 0:
//!     bits 0..=3  type tag (DiaType)
//!     bit  4      Annotated   an attribute-set follows the header
//!     bit  5      Null        the value is its kind's null; no payload follows
//!     bit  6      Custom      kind-specific; clear on a non-null value means
//!                             "canonical default, no payload"
//!     bit  7      Overflow    a CustomMetadata byte follows
//! byte 1..:  CustomMetadata
//!     bits 0..=6  kind-specific payload
//!     bit  7      Overflow    another CustomMetadata byte follows
//! ```

use crate::{io_utils, DiaError};
use anyhow::{anyhow, Result};
use dia_types::DiaType;
use num_traits::{FromPrimitive, ToPrimitive};
use std::io::{Read, Write};

const TYPE_MASK: u8 = 0x0F;
const ANNOTATED_FLAG: u8 = 0x10;
const NULL_FLAG: u8 = 0x20;
const CUSTOM_FLAG: u8 = 0x40;
const OVERFLOW_FLAG: u8 = 0x80;
const CUSTOM_PAYLOAD_MASK: u8 = 0x7F;

fn parse_type_tag(byte0: u8) -> Result<DiaType> {
    let tag = byte0 & TYPE_MASK;
    DiaType::from_u8(tag).ok_or(anyhow!(DiaError::UnknownTypeTag(tag)))
}

/// One chained header byte's worth of kind-specific bits.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct CustomMetadata(u8);

impl CustomMetadata {
    pub fn new(payload: u8) -> Result<Self> {
        if payload & !CUSTOM_PAYLOAD_MASK != 0 {
            return Err(anyhow!(DiaError::MalformedHeader(format!(
                "custom metadata payload {payload:#04x} exceeds 7 bits"
            ))));
        }
        Ok(Self(payload))
    }

    /// `i` must be within `0..7`.
    pub fn with_bit(self, i: u8, set: bool) -> Self {
        let mask = (1 << i) & CUSTOM_PAYLOAD_MASK;
        if set {
            Self(self.0 | mask)
        } else {
            Self(self.0 & !mask)
        }
    }

    pub fn is_bit_set(self, i: u8) -> bool {
        self.0 & (1 << i) & CUSTOM_PAYLOAD_MASK != 0
    }

    pub fn payload(self) -> u8 {
        self.0
    }
}

/// A validated, immutable header.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct TypeMetadata {
    dia_type: DiaType,
    bytes: Vec<u8>,
}

pub struct TypeMetadataBuilder {
    dia_type: DiaType,
    flags: u8,
    custom_metadata: Vec<CustomMetadata>,
}

impl TypeMetadataBuilder {
    fn flag(mut self, flag: u8, set: bool) -> Self {
        if set {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
        self
    }

    pub fn annotated(self, set: bool) -> Self {
        self.flag(ANNOTATED_FLAG, set)
    }
    pub fn null(self, set: bool) -> Self {
        self.flag(NULL_FLAG, set)
    }
    pub fn custom(self, set: bool) -> Self {
        self.flag(CUSTOM_FLAG, set)
    }
    pub fn custom_metadata(mut self, custom_metadata: Vec<CustomMetadata>) -> Self {
        self.custom_metadata = custom_metadata;
        self
    }

    pub fn build(self) -> TypeMetadata {
        // The enum is repr(u8) with discriminants below 16.
        let tag = self.dia_type.to_u8().unwrap_or_default() & TYPE_MASK;
        let mut byte0 = tag | self.flags;
        if !self.custom_metadata.is_empty() {
            byte0 |= OVERFLOW_FLAG;
        }

        let mut bytes = Vec::with_capacity(1 + self.custom_metadata.len());
        bytes.push(byte0);
        let last_i = self.custom_metadata.len().saturating_sub(1);
        for (i, cm) in self.custom_metadata.iter().enumerate() {
            let overflow = if i < last_i { OVERFLOW_FLAG } else { 0 };
            bytes.push(cm.0 | overflow);
        }

        TypeMetadata {
            dia_type: self.dia_type,
            bytes,
        }
    }
}

/* Construction. */
impl TypeMetadata {
    pub fn builder(dia_type: DiaType) -> TypeMetadataBuilder {
        TypeMetadataBuilder {
            dia_type,
            flags: 0,
            custom_metadata: vec![],
        }
    }
}

impl TryFrom<Vec<u8>> for TypeMetadata {
    type Error = anyhow::Error;

    /// Accepts bytes iff the tag is known and the overflow bits chain exactly
    /// through the last byte.
    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        let byte0 = match bytes.first() {
            None => {
                return Err(anyhow!(DiaError::MalformedHeader(String::from(
                    "empty type metadata"
                ))))
            }
            Some(b) => *b,
        };
        let dia_type = parse_type_tag(byte0)?;

        let last_i = bytes.len() - 1;
        for (i, b) in bytes.iter().enumerate() {
            let has_overflow = b & OVERFLOW_FLAG != 0;
            if has_overflow != (i < last_i) {
                return Err(anyhow!(DiaError::MalformedHeader(format!(
                    "overflow bit of byte {i} disagrees with length {}",
                    bytes.len()
                ))));
            }
        }

        Ok(Self { dia_type, bytes })
    }
}

/* Queries. */
impl TypeMetadata {
    pub fn dia_type(&self) -> DiaType {
        self.dia_type
    }

    fn byte0(&self) -> u8 {
        self.bytes[0]
    }
    pub fn is_annotated(&self) -> bool {
        self.byte0() & ANNOTATED_FLAG != 0
    }
    pub fn is_null(&self) -> bool {
        self.byte0() & NULL_FLAG != 0
    }
    pub fn is_custom_flag_set(&self) -> bool {
        self.byte0() & CUSTOM_FLAG != 0
    }
    pub fn is_overflow_flag_set(&self) -> bool {
        self.byte0() & OVERFLOW_FLAG != 0
    }

    pub fn custom_metadata(&self) -> Vec<CustomMetadata> {
        self.bytes[1..]
            .iter()
            .map(|b| CustomMetadata(b & CUSTOM_PAYLOAD_MASK))
            .collect()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/* Stream I/O. */
impl TypeMetadata {
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let byte0 = io_utils::read_byte(r, "type metadata")?;
        Self::read_rest(r, byte0)
    }

    /// `None` iff the stream was exhausted before the first header byte.
    pub fn read_opt<R: Read>(r: &mut R) -> Result<Option<Self>> {
        match io_utils::read_byte_opt(r)? {
            None => Ok(None),
            Some(byte0) => Self::read_rest(r, byte0).map(Some),
        }
    }

    fn read_rest<R: Read>(r: &mut R, byte0: u8) -> Result<Self> {
        let dia_type = parse_type_tag(byte0)?;
        let mut bytes = vec![byte0];
        let mut overflow = byte0 & OVERFLOW_FLAG != 0;
        while overflow {
            let b = io_utils::read_byte(r, "custom metadata")?;
            bytes.push(b);
            overflow = b & OVERFLOW_FLAG != 0;
        }
        Ok(Self { dia_type, bytes })
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<usize> {
        w.write_all(&self.bytes)?;
        Ok(self.bytes.len())
    }
}
