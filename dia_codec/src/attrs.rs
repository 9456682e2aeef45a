//! The attribute-set that follows a header whose Annotated flag is set.
//!
//! ```text
//! attribute_set {
//!     count:      BitChunkedInt,
//!     attributes: [attribute; count],
//! }
//! attribute {
//!     metadata:   TypeMetadata(Attribute),      // Custom flag iff a value follows
//!     key:        chunk sequence, UTF-16LE,
//!     value:      chunk sequence, UTF-16LE,     // only if Custom
//! }
//! ```

use crate::bits::BitChunkedInt;
use crate::metadata::TypeMetadata;
use crate::{text, DiaError};
use anyhow::{anyhow, Result};
use dia_types::{Attribute, DiaType};
use std::io::{Read, Write};

pub fn write_attribute<W: Write>(w: &mut W, attr: &Attribute, chunk_len: usize) -> Result<usize> {
    let mut w_len = 0;
    w_len += TypeMetadata::builder(DiaType::Attribute)
        .custom(attr.value.is_some())
        .build()
        .write_to(w)?;
    w_len += text::write_utf16(w, &attr.key, chunk_len)?;
    if let Some(value) = &attr.value {
        w_len += text::write_utf16(w, value, chunk_len)?;
    }
    Ok(w_len)
}

pub fn write_attribute_set<W: Write>(
    w: &mut W,
    attrs: &[Attribute],
    chunk_len: usize,
) -> Result<usize> {
    let mut w_len = BitChunkedInt::from_usize(attrs.len()).write_to(w)?;
    for attr in attrs {
        w_len += write_attribute(w, attr, chunk_len)?;
    }
    Ok(w_len)
}

pub fn read_attribute<R: Read>(r: &mut R) -> Result<Attribute> {
    let meta = TypeMetadata::read_from(r)?;
    if meta.dia_type() != DiaType::Attribute {
        return Err(anyhow!(DiaError::UnexpectedType {
            expected: "an Attribute",
            found: meta.dia_type(),
        }));
    }
    if meta.is_annotated() || meta.is_null() {
        return Err(anyhow!(DiaError::MalformedHeader(String::from(
            "an Attribute cannot be annotated or null"
        ))));
    }

    let key = text::read_utf16(r, DiaType::Attribute)?;
    let value = if meta.is_custom_flag_set() {
        Some(text::read_utf16(r, DiaType::Attribute)?)
    } else {
        None
    };
    Ok(Attribute { key, value })
}

pub fn read_attribute_set<R: Read>(r: &mut R) -> Result<Vec<Attribute>> {
    let count = BitChunkedInt::read_from(r)?.to_usize()?;
    let mut attrs = vec![];
    for _ in 0..count {
        attrs.push(read_attribute(r)?);
    }
    Ok(attrs)
}
