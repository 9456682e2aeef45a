use super::helpers::expect_dia_error;
use dia_codec::{CodecConfig, DiaError};
use dia_types::DiaType;
use num_bigint::BigUint;

#[test]
fn truncated_streams() {
    let cases: [&[u8]; 5] = [
        // Int with a chunk missing its terminator.
        &[0x46, 0x02, 0x39, 0x30],
        // Int with a short chunk.
        &[0x46, 0x02, 0x39],
        // Header promising CustomMetadata.
        &[0x84],
        // Sequence promising two items, holding one.
        &[0x49, 0x02, 0x03],
        // Timestamp with fewer than 9 packed bytes.
        &[0x4C, 0x00, 0x00],
    ];
    for buf in cases {
        expect_dia_error(dia_codec::deserialize_value(buf), |e| {
            matches!(e, DiaError::Truncated(_))
        });
    }
}

#[test]
fn non_value_tags_at_top_level() {
    expect_dia_error(dia_codec::deserialize_value(&[0x01]), |e| {
        matches!(e, DiaError::InvalidTopLevelType(DiaType::Attribute))
    });
    expect_dia_error(dia_codec::deserialize_value(&[0x00]), |e| {
        matches!(e, DiaError::InvalidTopLevelType(DiaType::Unknown))
    });
}

#[test]
fn non_value_tag_nested_in_sequence() {
    expect_dia_error(dia_codec::deserialize_value(&[0x49, 0x01, 0x01]), |e| {
        matches!(e, DiaError::InvalidTopLevelType(DiaType::Attribute))
    });
}

#[test]
fn unknown_type_tags() {
    for tag in 13u8..=15 {
        expect_dia_error(dia_codec::deserialize_value(&[tag]), |e| {
            matches!(e, DiaError::UnknownTypeTag(t) if *t == tag)
        });
    }
}

#[test]
fn forward_reference() {
    // Sequence at address 0 holding a Reference to address 5.
    expect_dia_error(
        dia_codec::deserialize_value(&[0x49, 0x01, 0x48, 0x01, 0x05, 0x00]),
        |e| matches!(e, DiaError::UnknownAddress(addr) if *addr == BigUint::from(5u8)),
    );
    // A top-level Reference before anything was materialized.
    expect_dia_error(dia_codec::deserialize_value(&[0x08]), |e| {
        matches!(e, DiaError::UnknownAddress(_))
    });
}

#[test]
fn trailing_bytes() {
    expect_dia_error(dia_codec::deserialize_value(&[0x06, 0x06]), |e| {
        matches!(e, DiaError::TrailingBytes(1))
    });
}

#[test]
fn empty_buffer_is_not_a_value() {
    expect_dia_error(dia_codec::deserialize_value(&[]), |e| {
        matches!(e, DiaError::Truncated(_))
    });
}

#[test]
fn deep_nesting_is_rejected() {
    // 20 nested single-item sequences.
    let mut buf = vec![];
    for _ in 0..20 {
        buf.extend([0x49, 0x01]);
    }
    buf.push(0x06);
    let config = CodecConfig {
        max_depth: 16,
        ..CodecConfig::default()
    };
    expect_dia_error(dia_codec::deserialize_values_with(&buf, config), |e| {
        matches!(e, DiaError::DepthExceeded(16))
    });
    assert!(dia_codec::deserialize_value(&buf).is_ok());
}

#[test]
fn malformed_payloads() {
    // Duration whose chunk holds 3 bytes.
    expect_dia_error(
        dia_codec::deserialize_value(&[0x45, 0x03, 0x01, 0x02, 0x03, 0x00]),
        |e| matches!(e, DiaError::MalformedPayload(DiaType::Duration, _)),
    );
    // String whose chunk holds an odd number of bytes.
    expect_dia_error(dia_codec::deserialize_value(&[0x4A, 0x01, 0x61, 0x00]), |e| {
        matches!(e, DiaError::MalformedPayload(DiaType::String, _))
    });
}
