use crate::bits::{self, BitChunkedInt};
use crate::config::CodecConfig;
use crate::io_utils::CountingReader;
use crate::metadata::TypeMetadata;
use crate::payload::{PayloadState, ScalarPayload};
use crate::session::CodecTable;
use crate::tracker::ReadTracker;
use crate::{attrs, DiaError};
use anyhow::{anyhow, Result};
use dia_types::store::ValueStore;
use dia_types::{Annotated, Attribute, DiaType, DiaValue, Property, Record, Sequence, Text};
use num_bigint::BigUint;
use shorthand::ShortHand;
use std::io::Read;

#[derive(PartialEq, Eq, Debug)]
pub enum ReadResult<T> {
    EOF,
    Some(usize, T),
}

/// Reads values, one after another, that share one address space.
///
/// Decoded containers are allocated in the reader's own [`ValueStore`].
/// A container is registered under its address as an empty shell before its
/// members are read, so members may refer back to it.
#[derive(ShortHand)]
#[shorthand(disable(get))]
pub struct DiaReader<R> {
    r: CountingReader<R>,
    #[shorthand(enable(get))]
    store: ValueStore,
    tracker: ReadTracker,
    codecs: CodecTable<R>,
    config: CodecConfig,
    depth: usize,
}

impl<R: Read> DiaReader<R> {
    pub fn new(r: R) -> Self {
        Self {
            r: CountingReader::new(r),
            store: ValueStore::new(),
            tracker: ReadTracker::default(),
            codecs: CodecTable::new(),
            config: CodecConfig::default(),
            depth: 0,
        }
    }

    pub fn with_config(r: R, config: CodecConfig) -> Result<Self> {
        config.validate()?;
        let mut reader = Self::new(r);
        reader.config = config;
        Ok(reader)
    }

    /// Reads the next top-level value. A stream that ends cleanly before a header yields `EOF`.
    pub fn deser_value(&mut self) -> Result<ReadResult<DiaValue>> {
        let r_len_before = self.r.r_len();
        let meta = match TypeMetadata::read_opt(&mut self.r)? {
            None => return Ok(ReadResult::EOF),
            Some(meta) => meta,
        };
        let val = self.dispatch(&meta)?;
        Ok(ReadResult::Some(self.r.r_len() - r_len_before, val))
    }

    pub fn deser_attribute_set(&mut self) -> Result<Vec<Attribute>> {
        attrs::read_attribute_set(&mut self.r)
    }

    /// Bytes consumed so far.
    pub fn r_len(&self) -> usize {
        self.r.r_len()
    }

    pub fn into_store(self) -> ValueStore {
        self.store
    }

    fn dispatch(&mut self, meta: &TypeMetadata) -> Result<DiaValue> {
        let read_fn = self.codecs.get(meta.dia_type())?;
        read_fn(self, meta)
    }

    /// A value inside a container. The stream must not end here.
    fn read_nested_value(&mut self) -> Result<DiaValue> {
        let meta = TypeMetadata::read_from(&mut self.r)?;
        self.dispatch(&meta)
    }

    fn read_attributes_of(&mut self, meta: &TypeMetadata) -> Result<Vec<Attribute>> {
        if meta.is_annotated() {
            self.deser_attribute_set()
        } else {
            Ok(vec![])
        }
    }

    pub(crate) fn read_scalar<T: ScalarPayload>(
        &mut self,
        meta: &TypeMetadata,
    ) -> Result<Annotated<T>> {
        let attributes = self.read_attributes_of(meta)?;
        let payload = match PayloadState::from(meta) {
            PayloadState::Null => None,
            PayloadState::Default => Some(T::default_payload()),
            PayloadState::Present => Some(T::read_payload(&mut self.r, meta)?),
        };
        Ok(Annotated::from_parts(attributes, payload))
    }

    pub(crate) fn read_text(&mut self, meta: &TypeMetadata) -> Result<DiaValue> {
        let addr = self.tracker.next_address();
        let text: Text = self.read_scalar(meta)?;
        let val = match meta.dia_type() {
            DiaType::Symbol => DiaValue::Symbol(text),
            _ => DiaValue::String(text),
        };
        self.tracker.register(addr, val.clone())?;
        Ok(val)
    }

    pub(crate) fn read_reference(&mut self, meta: &TypeMetadata) -> Result<DiaValue> {
        if meta.is_annotated() || meta.is_null() {
            return Err(anyhow!(DiaError::MalformedHeader(String::from(
                "a Reference cannot be annotated or null"
            ))));
        }
        let addr = match PayloadState::from(meta) {
            PayloadState::Present => BigUint::from_bytes_le(&bits::read_chunked(&mut self.r)?),
            _ => BigUint::default(),
        };
        self.tracker.resolve(&addr)
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(anyhow!(DiaError::DepthExceeded(self.config.max_depth)));
        }
        Ok(())
    }
    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Reads the preamble of a container, and the member count if members follow.
    fn read_container_header(
        &mut self,
        meta: &TypeMetadata,
    ) -> Result<(Vec<Attribute>, PayloadState, usize)> {
        let attributes = self.read_attributes_of(meta)?;
        let state = PayloadState::from(meta);
        let count = match state {
            PayloadState::Present => BitChunkedInt::read_from(&mut self.r)?.to_usize()?,
            _ => 0,
        };
        Ok((attributes, state, count))
    }

    pub(crate) fn read_record(&mut self, meta: &TypeMetadata) -> Result<DiaValue> {
        let addr = self.tracker.next_address();
        let (attributes, state, count) = self.read_container_header(meta)?;

        let payload = (state != PayloadState::Null).then(Vec::new);
        let store = &mut self.store;
        let val = self.tracker.try_add(addr, || {
            DiaValue::Record(store.new_record(Record::from_parts(attributes, payload)))
        });
        let id = match val {
            DiaValue::Record(id) => id,
            _ => return Err(anyhow!(DiaError::AddressAlreadyTracked(addr.as_u64()))),
        };

        if count != 0 {
            self.enter()?;
            for _ in 0..count {
                let name = self.read_property_name()?;
                let value = self.read_nested_value()?;
                self.store.append_property(id, Property { name, value })?;
            }
            self.leave();
        }
        Ok(DiaValue::Record(id))
    }

    fn read_property_name(&mut self) -> Result<Text> {
        match self.read_nested_value()? {
            DiaValue::Symbol(name) | DiaValue::String(name) if !name.is_null() => Ok(name),
            other => Err(anyhow!(DiaError::UnexpectedType {
                expected: "a non-null Symbol as property name",
                found: other.dia_type(),
            })),
        }
    }

    pub(crate) fn read_sequence(&mut self, meta: &TypeMetadata) -> Result<DiaValue> {
        let addr = self.tracker.next_address();
        let (attributes, state, count) = self.read_container_header(meta)?;

        let payload = (state != PayloadState::Null).then(Vec::new);
        let store = &mut self.store;
        let val = self.tracker.try_add(addr, || {
            DiaValue::Sequence(store.new_sequence(Sequence::from_parts(attributes, payload)))
        });
        let id = match val {
            DiaValue::Sequence(id) => id,
            _ => return Err(anyhow!(DiaError::AddressAlreadyTracked(addr.as_u64()))),
        };

        if count != 0 {
            self.enter()?;
            for _ in 0..count {
                let item = self.read_nested_value()?;
                self.store.append_item(id, item)?;
            }
            self.leave();
        }
        Ok(DiaValue::Sequence(id))
    }
}

