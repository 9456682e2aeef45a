//! Address bookkeeping for one serialize or deserialize call.
//!
//! Every referenceable value (Record, Sequence, String, Symbol) takes the next address
//! when it is first materialized, before any of its children. Writer and reader walk
//! the stream in the same pre-order, so they agree on addresses without writing them.

use crate::DiaError;
use anyhow::{anyhow, Result};
use derive_more::Display;
use dia_types::store::{RecordId, SequenceId};
use dia_types::{DiaType, DiaValue, Text};
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use std::collections::HashMap;

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Display, Debug)]
pub struct Address(u64);

impl Address {
    pub fn as_u64(self) -> u64 {
        self.0
    }
    pub fn to_biguint(self) -> BigUint {
        BigUint::from(self.0)
    }
}

/// What makes two occurrences "the same value" on the write side.
#[derive(PartialEq, Eq, Hash)]
pub enum Identity {
    Record(RecordId),
    Sequence(SequenceId),
    /// Texts are identified by content, attributes included.
    Text(DiaType, Text),
}

#[derive(Default)]
pub struct WriteTracker {
    addrs: HashMap<Identity, Address>,
    next: u64,
}

impl WriteTracker {
    pub fn lookup(&self, identity: &Identity) -> Option<Address> {
        self.addrs.get(identity).copied()
    }

    /// Takes the next address and remembers it for `identity`.
    pub fn assign(&mut self, identity: Identity) -> Address {
        let addr = self.skip();
        self.addrs.insert(identity, addr);
        addr
    }

    /// Takes the next address without remembering it.
    pub fn skip(&mut self) -> Address {
        let addr = Address(self.next);
        self.next += 1;
        tracing::trace!(%addr, "address assigned");
        addr
    }
}

#[derive(Default)]
pub struct ReadTracker {
    cache: HashMap<Address, DiaValue>,
    next: u64,
}

impl ReadTracker {
    pub fn next_address(&mut self) -> Address {
        let addr = Address(self.next);
        self.next += 1;
        addr
    }

    /// Returns the value cached under `addr`,
    /// or else caches and returns the value made by `ctor`, which is invoked at most once.
    pub fn try_add<F>(&mut self, addr: Address, ctor: F) -> DiaValue
    where
        F: FnOnce() -> DiaValue,
    {
        self.cache.entry(addr).or_insert_with(ctor).clone()
    }

    /// Like [`ReadTracker::try_add`], but fails if `addr` was already tracked.
    pub fn register(&mut self, addr: Address, val: DiaValue) -> Result<()> {
        if !val.dia_type().is_referenceable() {
            return Err(anyhow!(DiaError::UnexpectedType {
                expected: "a referenceable value",
                found: val.dia_type(),
            }));
        }
        if self.cache.contains_key(&addr) {
            return Err(anyhow!(DiaError::AddressAlreadyTracked(addr.0)));
        }
        self.cache.insert(addr, val);
        Ok(())
    }

    /// The value materialized at `addr`. It may be a container that is still being populated.
    pub fn resolve(&self, addr: &BigUint) -> Result<DiaValue> {
        let val = addr
            .to_u64()
            .and_then(|a| self.cache.get(&Address(a)))
            .ok_or_else(|| anyhow!(DiaError::UnknownAddress(addr.clone())))?;
        tracing::trace!(%addr, "reference resolved");
        Ok(val.clone())
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }
}
