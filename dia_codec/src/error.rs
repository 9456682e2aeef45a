use dia_types::DiaType;
use derive_more::Display;
use num_bigint::BigUint;

/// Every way a value can fail to encode or decode.
///
/// Failures are raised at the point of detection and propagate unchanged;
/// callers recover the kind with `anyhow::Error::downcast_ref::<DiaError>()`.
#[derive(Debug, Display)]
pub enum DiaError {
    #[display(fmt = "Unknown type tag {}.", _0)]
    UnknownTypeTag(u8),
    #[display(fmt = "{:?} cannot appear where a value is expected.", _0)]
    InvalidTopLevelType(DiaType),
    #[display(fmt = "Expected {} but found {:?}.", expected, found)]
    UnexpectedType {
        expected: &'static str,
        found: DiaType,
    },
    #[display(fmt = "Malformed header: {}", _0)]
    MalformedHeader(String),
    #[display(fmt = "Malformed length: {}", _0)]
    MalformedLength(String),
    #[display(fmt = "Malformed {:?} payload: {}", _0, _1)]
    MalformedPayload(DiaType, String),
    #[display(fmt = "Stream ended while reading {}.", _0)]
    Truncated(&'static str),
    #[display(fmt = "Address {} is already tracked.", _0)]
    AddressAlreadyTracked(u64),
    #[display(fmt = "Reference to address {} which has not been materialized.", _0)]
    UnknownAddress(BigUint),
    #[display(fmt = "{:?} value cannot be encoded: {}", _0, _1)]
    Unencodable(DiaType, String),
    #[display(fmt = "Nesting deeper than {} levels.", _0)]
    DepthExceeded(usize),
    #[display(fmt = "{} bytes remain after the value.", _0)]
    TrailingBytes(usize),
    #[display(fmt = "Invalid codec config: {}", _0)]
    InvalidConfig(&'static str),
}
impl std::error::Error for DiaError {}
