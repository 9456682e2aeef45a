use crate::bits::{self, BitChunkedInt};
use crate::config::CodecConfig;
use crate::io_utils::CountingWriter;
use crate::metadata::TypeMetadata;
use crate::payload::ScalarPayload;
use crate::tracker::{Address, Identity, WriteTracker};
use crate::DiaError;
use anyhow::{anyhow, Result};
use derive_more::Deref;
use dia_types::store::{RecordId, SequenceId, ValueStore};
use dia_types::{Annotated, Attribute, DiaType, DiaValue, Text};
use num_traits::Zero;
use std::io::Write;

#[derive(Deref, PartialEq, Eq, Debug)]
pub struct WriteLen(usize);

/// Writes values, one after another, that share one address space.
///
/// A container or text met a second time is written as a Reference to its first occurrence.
pub struct DiaWriter<'s, W: Write> {
    w: CountingWriter<W>,
    store: &'s ValueStore,
    tracker: WriteTracker,
    config: CodecConfig,
    depth: usize,
}

impl<'s, W: Write> DiaWriter<'s, W> {
    /// `store` owns every container reachable from the values to be written.
    pub fn new(w: W, store: &'s ValueStore) -> Self {
        Self {
            w: CountingWriter::new(w),
            store,
            tracker: WriteTracker::default(),
            config: CodecConfig::default(),
            depth: 0,
        }
    }

    pub fn with_config(w: W, store: &'s ValueStore, config: CodecConfig) -> Result<Self> {
        config.validate()?;
        let mut writer = Self::new(w, store);
        writer.config = config;
        Ok(writer)
    }

    pub fn ser_value(&mut self, val: &DiaValue) -> Result<WriteLen> {
        let w_len_before = self.w.w_len();
        self.write_value(val)?;
        Ok(WriteLen(self.w.w_len() - w_len_before))
    }

    pub fn into_inner(self) -> W {
        self.w.into_inner()
    }

    fn write_value(&mut self, val: &DiaValue) -> Result<()> {
        match val {
            DiaValue::Blob(v) => self.write_scalar(DiaType::Blob, v),
            DiaValue::Bool(v) => self.write_scalar(DiaType::Bool, v),
            DiaValue::Decimal(v) => self.write_scalar(DiaType::Decimal, v),
            DiaValue::Duration(v) => self.write_scalar(DiaType::Duration, v),
            DiaValue::Int(v) => self.write_scalar(DiaType::Int, v),
            DiaValue::Timestamp(v) => self.write_scalar(DiaType::Timestamp, v),
            DiaValue::String(v) => self.write_text(DiaType::String, v),
            DiaValue::Symbol(v) => self.write_text(DiaType::Symbol, v),
            DiaValue::Record(id) => self.write_record(*id),
            DiaValue::Sequence(id) => self.write_sequence(*id),
        }
    }

    fn write_scalar<T: ScalarPayload>(
        &mut self,
        dia_type: DiaType,
        val: &Annotated<T>,
    ) -> Result<()> {
        let present = val.payload().filter(|p| !p.is_default());

        /* header */
        TypeMetadata::builder(dia_type)
            .annotated(val.is_annotated())
            .null(val.is_null())
            .custom(present.is_some())
            .custom_metadata(
                present
                    .map(|p| p.custom_metadata())
                    .unwrap_or_default(),
            )
            .build()
            .write_to(&mut self.w)?;

        /* attributes */
        self.write_attributes(val.attributes())?;

        /* payload */
        if let Some(p) = present {
            p.write_payload(&mut self.w, dia_type, &self.config)?;
        }
        Ok(())
    }

    fn write_attributes(&mut self, attrs: &[Attribute]) -> Result<()> {
        if !attrs.is_empty() {
            crate::attrs::write_attribute_set(&mut self.w, attrs, self.config.chunk_len)?;
        }
        Ok(())
    }

    fn write_text(&mut self, dia_type: DiaType, val: &Text) -> Result<()> {
        if self.config.dedup_text {
            let identity = Identity::Text(dia_type, val.clone());
            if let Some(addr) = self.tracker.lookup(&identity) {
                return self.write_reference(addr);
            }
            self.tracker.assign(identity);
        } else {
            self.tracker.skip();
        }
        self.write_scalar(dia_type, val)
    }

    /// Address 0 is the default Reference and carries no payload.
    fn write_reference(&mut self, addr: Address) -> Result<()> {
        let addr = addr.to_biguint();
        TypeMetadata::builder(DiaType::Reference)
            .custom(!addr.is_zero())
            .build()
            .write_to(&mut self.w)?;
        if !addr.is_zero() {
            bits::write_chunked(&mut self.w, &addr.to_bytes_le(), self.config.chunk_len)?;
        }
        Ok(())
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

    fn write_container_header(
        &mut self,
        dia_type: DiaType,
        attrs: &[Attribute],
        null: bool,
        count: usize,
    ) -> Result<()> {
        TypeMetadata::builder(dia_type)
            .annotated(!attrs.is_empty())
            .null(null)
            .custom(count != 0)
            .build()
            .write_to(&mut self.w)?;
        self.write_attributes(attrs)?;
        if count != 0 {
            BitChunkedInt::from_usize(count).write_to(&mut self.w)?;
        }
        Ok(())
    }

    fn write_record(&mut self, id: RecordId) -> Result<()> {
        let identity = Identity::Record(id);
        if let Some(addr) = self.tracker.lookup(&identity) {
            return self.write_reference(addr);
        }
        self.tracker.assign(identity);

        let store = self.store;
        let rec = store.record(id)?;
        let props = rec.payload().map(Vec::as_slice).unwrap_or_default();
        if let Some(i) = props.iter().position(|prop| prop.name.is_null()) {
            return Err(anyhow!(DiaError::Unencodable(
                DiaType::Record,
                format!("property {i} has a null name")
            )));
        }
        self.write_container_header(
            DiaType::Record,
            rec.attributes(),
            rec.is_null(),
            props.len(),
        )?;

        if !props.is_empty() {
            self.enter()?;
            for prop in props {
                self.write_text(DiaType::Symbol, &prop.name)?;
                self.write_value(&prop.value)?;
            }
            self.leave();
        }
        Ok(())
    }

    fn write_sequence(&mut self, id: SequenceId) -> Result<()> {
        let identity = Identity::Sequence(id);
        if let Some(addr) = self.tracker.lookup(&identity) {
            return self.write_reference(addr);
        }
        self.tracker.assign(identity);

        let store = self.store;
        let seq = store.sequence(id)?;
        let items = seq.payload().map(Vec::as_slice).unwrap_or_default();
        self.write_container_header(
            DiaType::Sequence,
            seq.attributes(),
            seq.is_null(),
            items.len(),
        )?;

        if !items.is_empty() {
            self.enter()?;
            for item in items {
                self.write_value(item)?;
            }
            self.leave();
        }
        Ok(())
    }
}
