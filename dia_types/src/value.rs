use crate::store::{RecordId, SequenceId};
use crate::{Annotated, Attribute, DiaType};
use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, TimeDelta};
use num_bigint::BigInt;

pub type Blob = Annotated<Vec<u8>>;
pub type Bool = Annotated<bool>;
pub type Decimal = Annotated<BigDecimal>;
/// Signed, nanosecond precision.
pub type Duration = Annotated<TimeDelta>;
pub type Int = Annotated<BigInt>;
/// The payload shape of both String and Symbol values.
pub type Text = Annotated<String>;
pub type Timestamp = Annotated<DateTime<FixedOffset>>;

/// A named member of a Record. The name is an annotatable Symbol.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct Property {
    pub name: Text,
    pub value: DiaValue,
}

impl Property {
    pub fn new<N: Into<String>>(name: N, value: DiaValue) -> Self {
        Self {
            name: Text::of(name.into()),
            value,
        }
    }
}

pub type Record = Annotated<Vec<Property>>;
pub type Sequence = Annotated<Vec<DiaValue>>;

/// The closed set of materializable values.
///
/// Scalars are held inline. Containers are handles into a [`crate::store::ValueStore`],
/// so that two handles comparing equal denote the very same container instance.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub enum DiaValue {
    Blob(Blob),
    Bool(Bool),
    Decimal(Decimal),
    Duration(Duration),
    Int(Int),
    Record(RecordId),
    Sequence(SequenceId),
    String(Text),
    Symbol(Text),
    Timestamp(Timestamp),
}

impl DiaValue {
    pub fn dia_type(&self) -> DiaType {
        DiaType::from(self)
    }

    pub fn blob<B: Into<Vec<u8>>>(b: B) -> Self {
        Self::Blob(Blob::of(b.into()))
    }
    pub fn bool(b: bool) -> Self {
        Self::Bool(Bool::of(b))
    }
    pub fn decimal(d: BigDecimal) -> Self {
        Self::Decimal(Decimal::of(d))
    }
    pub fn duration(d: TimeDelta) -> Self {
        Self::Duration(Duration::of(d))
    }
    pub fn int<I: Into<BigInt>>(i: I) -> Self {
        Self::Int(Int::of(i.into()))
    }
    pub fn string<S: Into<String>>(s: S) -> Self {
        Self::String(Text::of(s.into()))
    }
    pub fn symbol<S: Into<String>>(s: S) -> Self {
        Self::Symbol(Text::of(s.into()))
    }
    pub fn timestamp(t: DateTime<FixedOffset>) -> Self {
        Self::Timestamp(Timestamp::of(t))
    }

    /// Attributes of an inline scalar. Containers keep theirs in the store.
    pub fn scalar_attributes(&self) -> Option<&[Attribute]> {
        match self {
            DiaValue::Blob(v) => Some(v.attributes()),
            DiaValue::Bool(v) => Some(v.attributes()),
            DiaValue::Decimal(v) => Some(v.attributes()),
            DiaValue::Duration(v) => Some(v.attributes()),
            DiaValue::Int(v) => Some(v.attributes()),
            DiaValue::String(v) | DiaValue::Symbol(v) => Some(v.attributes()),
            DiaValue::Timestamp(v) => Some(v.attributes()),
            DiaValue::Record(_) | DiaValue::Sequence(_) => None,
        }
    }
}
