use super::helpers::single;
use anyhow::Result;
use dia_codec::{CodecConfig, ReadResult};
use dia_types::store::ValueStore;
use dia_types::{Blob, DiaValue, Int, Property, Text};

#[test]
fn int_12345() -> Result<()> {
    let store = ValueStore::new();
    let buf = dia_codec::serialize_value(&store, &DiaValue::int(12345))?;
    assert_eq!(vec![0x46, 0x02, 0x39, 0x30, 0x00], buf);

    let (_, val) = dia_codec::deserialize_value(&buf)?;
    assert_eq!(DiaValue::int(12345), val);
    Ok(())
}

#[test]
fn defaults_are_a_bare_header() -> Result<()> {
    let store = ValueStore::new();
    let buf = dia_codec::serialize_value(&store, &DiaValue::int(0))?;
    assert_eq!(vec![0x06], buf);
    assert_eq!(DiaValue::Int(Int::default()), dia_codec::deserialize_value(&buf)?.1);

    let buf = dia_codec::serialize_value(&store, &DiaValue::bool(false))?;
    assert_eq!(vec![0x03], buf);
    Ok(())
}

#[test]
fn empty_blob_differs_from_null_blob() -> Result<()> {
    let store = ValueStore::new();
    let empty = DiaValue::blob(vec![]);
    let null = DiaValue::Blob(Blob::null());

    let empty_buf = dia_codec::serialize_value(&store, &empty)?;
    let null_buf = dia_codec::serialize_value(&store, &null)?;
    assert_eq!(vec![0x02], empty_buf);
    assert_eq!(vec![0x22], null_buf);

    assert_eq!(empty, dia_codec::deserialize_value(&empty_buf)?.1);
    assert_eq!(null, dia_codec::deserialize_value(&null_buf)?.1);
    Ok(())
}

#[test]
fn key_only_attribute_on_a_string() -> Result<()> {
    let store = ValueStore::new();
    let val = DiaValue::String(Text::null().with_attributes([dia_types::Attribute::new("k")]));
    let buf = dia_codec::serialize_value(&store, &val)?;
    // Annotated|Null String, 1 attribute, Attribute header, "k".
    assert_eq!(
        vec![0x3A, 0x01, 0x01, 0x02, 0x6B, 0x00, 0x00],
        buf
    );
    assert_eq!(val, dia_codec::deserialize_value(&buf)?.1);
    Ok(())
}

#[test]
fn small_chunks_change_bytes_not_values() -> Result<()> {
    let mut store = ValueStore::new();
    let long = "x".repeat(100);
    let rec = store.record_of([Property::new("text", DiaValue::string(long.clone()))]);

    let tiny = CodecConfig {
        chunk_len: 3,
        ..CodecConfig::default()
    };
    let tiny_buf = dia_codec::serialize_values_with(&store, &[rec.clone()], tiny)?;
    let default_buf = dia_codec::serialize_value(&store, &rec)?;
    assert!(tiny_buf.len() > default_buf.len());

    let packet = dia_codec::deserialize_values(&tiny_buf)?;
    let val = single(packet.values)?;
    let id = match val {
        DiaValue::Record(id) => id,
        other => panic!("Expected a record, got {:?}", other),
    };
    let props = packet.store.record(id)?.payload().cloned().unwrap_or_default();
    assert_eq!(vec![Property::new("text", DiaValue::string(long))], props);
    Ok(())
}

#[test]
fn reader_streams_values_one_at_a_time() -> Result<()> {
    let store = ValueStore::new();
    let vals = [DiaValue::symbol("a"), DiaValue::int(-7), DiaValue::symbol("a")];
    let buf = dia_codec::serialize_values(&store, &vals)?;

    let mut r = dia_codec::DiaReader::new(&buf[..]);
    let mut read = vec![];
    let mut r_len = 0;
    while let ReadResult::Some(delta_r_len, val) = r.deser_value()? {
        r_len += delta_r_len;
        read.push(val);
    }
    assert_eq!(buf.len(), r_len);
    assert_eq!(vals.to_vec(), read);
    Ok(())
}

#[test]
fn empty_buffer_deserializes_to_no_values() -> Result<()> {
    let packet = dia_codec::deserialize_values(&[])?;
    assert!(packet.values.is_empty());
    Ok(())
}
