use crate::metadata::TypeMetadata;
use crate::session::DiaReader;
use crate::DiaError;
use anyhow::{anyhow, Result};
use dia_types::{DiaType, DiaValue};
use std::io::Read;

pub type ReadFn<R> = fn(&mut DiaReader<R>, &TypeMetadata) -> Result<DiaValue>;

const TAG_COUNT: usize = 16;

/// Reader functions indexed by type tag. Built once per reader.
pub struct CodecTable<R> {
    entries: [Option<ReadFn<R>>; TAG_COUNT],
}

impl<R: Read> CodecTable<R> {
    pub fn new() -> Self {
        let mut entries: [Option<ReadFn<R>>; TAG_COUNT] = [None; TAG_COUNT];
        let mut put = |dia_type: DiaType, f: ReadFn<R>| {
            entries[dia_type as usize] = Some(f);
        };

        put(DiaType::Blob, |rd, meta| {
            Ok(DiaValue::Blob(rd.read_scalar(meta)?))
        });
        put(DiaType::Bool, |rd, meta| {
            Ok(DiaValue::Bool(rd.read_scalar(meta)?))
        });
        put(DiaType::Decimal, |rd, meta| {
            Ok(DiaValue::Decimal(rd.read_scalar(meta)?))
        });
        put(DiaType::Duration, |rd, meta| {
            Ok(DiaValue::Duration(rd.read_scalar(meta)?))
        });
        put(DiaType::Int, |rd, meta| {
            Ok(DiaValue::Int(rd.read_scalar(meta)?))
        });
        put(DiaType::Timestamp, |rd, meta| {
            Ok(DiaValue::Timestamp(rd.read_scalar(meta)?))
        });
        put(DiaType::String, |rd, meta| rd.read_text(meta));
        put(DiaType::Symbol, |rd, meta| rd.read_text(meta));
        put(DiaType::Record, |rd, meta| rd.read_record(meta));
        put(DiaType::Sequence, |rd, meta| rd.read_sequence(meta));
        put(DiaType::Reference, |rd, meta| rd.read_reference(meta));

        Self { entries }
    }

    /// Unknown and Attribute have no entry; they never stand where a value is expected.
    pub fn get(&self, dia_type: DiaType) -> Result<ReadFn<R>> {
        match self.entries[dia_type as usize] {
            Some(read_fn) if dia_type.is_value() => Ok(read_fn),
            _ => Err(anyhow!(DiaError::InvalidTopLevelType(dia_type))),
        }
    }
}
