//! Arena storage for container values.
//!
//! Records and Sequences may form cycles and may be shared by several parents.
//! Rather than linking them directly, every container lives in a [`ValueStore`]
//! and is referred to by a copyable handle. A handle may be handed out while its
//! container is still an empty shell, and the container populated afterwards.

mod graph_eq;

use crate::{DiaType, DiaValue, Property, Record, Sequence};
use anyhow::Result;
use derive_more::Display;

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct RecordId(usize);
impl RecordId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct SequenceId(usize);
impl SequenceId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Display)]
pub enum StoreError {
    #[display(fmt = "{:?} #{} is a null shell and cannot be populated.", kind, index)]
    NullShell { kind: DiaType, index: usize },
    #[display(fmt = "{:?} #{} was not issued by this store.", kind, index)]
    UnknownHandle { kind: DiaType, index: usize },
}
impl std::error::Error for StoreError {}

#[derive(Default, Debug)]
pub struct ValueStore {
    records: Vec<Record>,
    sequences: Vec<Sequence>,
}

/* Allocation. */
impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_record(&mut self, rec: Record) -> RecordId {
        self.records.push(rec);
        RecordId(self.records.len() - 1)
    }
    pub fn new_sequence(&mut self, seq: Sequence) -> SequenceId {
        self.sequences.push(seq);
        SequenceId(self.sequences.len() - 1)
    }

    /// Shorthand for allocating a non-null Record and wrapping its handle.
    pub fn record_of<I: IntoIterator<Item = Property>>(&mut self, props: I) -> DiaValue {
        let id = self.new_record(Record::of(props.into_iter().collect()));
        DiaValue::Record(id)
    }
    /// Shorthand for allocating a non-null Sequence and wrapping its handle.
    pub fn sequence_of<I: IntoIterator<Item = DiaValue>>(&mut self, items: I) -> DiaValue {
        let id = self.new_sequence(Sequence::of(items.into_iter().collect()));
        DiaValue::Sequence(id)
    }

    pub fn records_len(&self) -> usize {
        self.records.len()
    }
    pub fn sequences_len(&self) -> usize {
        self.sequences.len()
    }
}

/* Access. */
impl ValueStore {
    pub fn record(&self, id: RecordId) -> Result<&Record> {
        let rec = self.records.get(id.0).ok_or(StoreError::UnknownHandle {
            kind: DiaType::Record,
            index: id.0,
        })?;
        Ok(rec)
    }
    pub fn record_mut(&mut self, id: RecordId) -> Result<&mut Record> {
        let rec = self.records.get_mut(id.0).ok_or(StoreError::UnknownHandle {
            kind: DiaType::Record,
            index: id.0,
        })?;
        Ok(rec)
    }

    pub fn sequence(&self, id: SequenceId) -> Result<&Sequence> {
        let seq = self.sequences.get(id.0).ok_or(StoreError::UnknownHandle {
            kind: DiaType::Sequence,
            index: id.0,
        })?;
        Ok(seq)
    }
    pub fn sequence_mut(&mut self, id: SequenceId) -> Result<&mut Sequence> {
        let seq = self.sequences.get_mut(id.0).ok_or(StoreError::UnknownHandle {
            kind: DiaType::Sequence,
            index: id.0,
        })?;
        Ok(seq)
    }
}

/* Population. A null shell rejects members. */
impl ValueStore {
    pub fn append_property(&mut self, id: RecordId, prop: Property) -> Result<()> {
        self.add_properties(id, [prop])
    }
    pub fn add_properties<I: IntoIterator<Item = Property>>(
        &mut self,
        id: RecordId,
        props: I,
    ) -> Result<()> {
        let rec = self.record_mut(id)?;
        match rec.payload_mut() {
            None => Err(StoreError::NullShell {
                kind: DiaType::Record,
                index: id.0,
            })?,
            Some(members) => members.extend(props),
        }
        Ok(())
    }

    pub fn append_item(&mut self, id: SequenceId, item: DiaValue) -> Result<()> {
        self.add_items(id, [item])
    }
    pub fn add_items<I: IntoIterator<Item = DiaValue>>(
        &mut self,
        id: SequenceId,
        items: I,
    ) -> Result<()> {
        let seq = self.sequence_mut(id)?;
        match seq.payload_mut() {
            None => Err(StoreError::NullShell {
                kind: DiaType::Sequence,
                index: id.0,
            })?,
            Some(members) => members.extend(items),
        }
        Ok(())
    }
}
