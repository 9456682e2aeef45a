//! A self-describing binary encoding of [`DiaValue`]s.
//!
//! ```text
//! value {
//!     metadata:       TypeMetadata,         // tag, flags, optional CustomMetadata chain
//!     attribute_set:  attribute_set,        // only if Annotated
//!     payload:        kind-specific,        // only if non-null and Custom
//! }
//! ```
//!
//! Records and Sequences carry a BitChunkedInt member count followed by their members;
//! each Record member is a Symbol name and then a value. A container or text met again
//! within one call is written as a Reference to the address of its first occurrence,
//! so shared and cyclic graphs survive a round trip.
//!
//! All lengths and counts are [`bits::BitChunkedInt`]s; variable-length payloads are
//! [chunk sequences](bits::write_chunked).

mod attrs;
pub mod bits;
mod config;
mod error;
mod io_utils;
pub mod metadata;
mod payload;
mod session;
mod text;
mod tracker;

pub use config::*;
pub use error::*;
pub use session::{DiaReader, DiaWriter, ReadResult, WriteLen};
pub use tracker::Address;

use anyhow::{anyhow, Result};
use dia_types::store::ValueStore;
use dia_types::DiaValue;

pub fn serialize_value(store: &ValueStore, val: &DiaValue) -> Result<Vec<u8>> {
    serialize_values_with(store, std::slice::from_ref(val), CodecConfig::default())
}

/// Values written together share one address space, so they may share containers and texts.
pub fn serialize_values(store: &ValueStore, vals: &[DiaValue]) -> Result<Vec<u8>> {
    serialize_values_with(store, vals, CodecConfig::default())
}

pub fn serialize_values_with(
    store: &ValueStore,
    vals: &[DiaValue],
    config: CodecConfig,
) -> Result<Vec<u8>> {
    let _span = tracing::debug_span!("serialize", values = vals.len()).entered();

    let mut w = DiaWriter::with_config(vec![], store, config)?;
    for val in vals {
        w.ser_value(val)?;
    }
    let buf = w.into_inner();

    tracing::debug!(bytes = buf.len(), "serialized");
    Ok(buf)
}

/// Everything decoded from one buffer. `values` may hold handles into `store` only.
#[derive(Debug)]
pub struct Packet {
    pub store: ValueStore,
    pub values: Vec<DiaValue>,
}

/// Decodes exactly one value, which must span the whole buffer.
pub fn deserialize_value(buf: &[u8]) -> Result<(ValueStore, DiaValue)> {
    let _span = tracing::debug_span!("deserialize", bytes = buf.len()).entered();

    let mut r = DiaReader::new(buf);
    let val = match r.deser_value()? {
        ReadResult::EOF => return Err(anyhow!(DiaError::Truncated("a value header"))),
        ReadResult::Some(r_len, val) => {
            if r_len < buf.len() {
                return Err(anyhow!(DiaError::TrailingBytes(buf.len() - r_len)));
            }
            val
        }
    };
    Ok((r.into_store(), val))
}

pub fn deserialize_values(buf: &[u8]) -> Result<Packet> {
    deserialize_values_with(buf, CodecConfig::default())
}

pub fn deserialize_values_with(buf: &[u8], config: CodecConfig) -> Result<Packet> {
    let _span = tracing::debug_span!("deserialize", bytes = buf.len()).entered();

    let mut r = DiaReader::with_config(buf, config)?;
    let mut values = vec![];
    while let ReadResult::Some(_, val) = r.deser_value()? {
        values.push(val);
    }

    tracing::debug!(values = values.len(), "deserialized");
    Ok(Packet {
        store: r.into_store(),
        values,
    })
}
