use crate::DiaValue;
use num_derive::{FromPrimitive, ToPrimitive};

/// The 4-bit type tag carried in the low nibble of every value header.
///
/// Discriminants are mapped manually so that they stay stable on the wire,
/// independent of declaration order.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, FromPrimitive, ToPrimitive, Debug)]
pub enum DiaType {
    Unknown = 0,
    Attribute = 1,
    Blob = 2,
    Bool = 3,
    Decimal = 4,
    Duration = 5,
    Int = 6,
    Record = 7,
    Reference = 8,
    Sequence = 9,
    String = 10,
    Symbol = 11,
    Timestamp = 12,
}

impl DiaType {
    /// Kinds that receive an address when materialized, and may thus be
    /// stood in for by a Reference later in the same stream.
    pub fn is_referenceable(self) -> bool {
        matches!(
            self,
            DiaType::Record | DiaType::Sequence | DiaType::String | DiaType::Symbol
        )
    }

    /// Kinds that may appear wherever a value is expected.
    /// Attribute only appears inside an attribute-set, and Unknown never appears.
    pub fn is_value(self) -> bool {
        !matches!(self, DiaType::Attribute | DiaType::Unknown)
    }
}

impl From<&DiaValue> for DiaType {
    fn from(val: &DiaValue) -> Self {
        match val {
            DiaValue::Blob(_) => DiaType::Blob,
            DiaValue::Bool(_) => DiaType::Bool,
            DiaValue::Decimal(_) => DiaType::Decimal,
            DiaValue::Duration(_) => DiaType::Duration,
            DiaValue::Int(_) => DiaType::Int,
            DiaValue::Record(_) => DiaType::Record,
            DiaValue::Sequence(_) => DiaType::Sequence,
            DiaValue::String(_) => DiaType::String,
            DiaValue::Symbol(_) => DiaType::Symbol,
            DiaValue::Timestamp(_) => DiaType::Timestamp,
        }
    }
}
