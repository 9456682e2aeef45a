use super::helpers::{single, verify};
use anyhow::Result;
use dia_types::store::ValueStore;
use dia_types::{DiaValue, Property, Sequence};

#[test]
fn self_referencing_sequence() -> Result<()> {
    let mut store = ValueStore::new();
    let id = store.new_sequence(Sequence::of(vec![]));
    store.append_item(id, DiaValue::int(1))?;
    store.append_item(id, DiaValue::Sequence(id))?;

    let buf = dia_codec::serialize_value(&store, &DiaValue::Sequence(id))?;
    // Sequence(custom), count 2, Int 1, default Reference to address 0.
    assert_eq!(vec![0x49, 0x02, 0x46, 0x01, 0x01, 0x00, 0x08], buf);

    let (read_store, val) = dia_codec::deserialize_value(&buf)?;
    let read_id = match val {
        DiaValue::Sequence(id) => id,
        other => panic!("Expected a sequence, got {:?}", other),
    };
    let items = read_store.sequence(read_id)?.payload().cloned().unwrap_or_default();
    assert_eq!(vec![DiaValue::int(1), DiaValue::Sequence(read_id)], items);
    Ok(())
}

#[test]
fn shared_subgraph_is_written_once() -> Result<()> {
    let mut store = ValueStore::new();
    let shared = store.sequence_of([DiaValue::string("payload")]);
    let rec = store.record_of([
        Property::new("a", shared.clone()),
        Property::new("b", shared.clone()),
    ]);

    let packet = verify(&store, &[rec])?;
    let DiaValue::Record(id) = single(packet.values)? else {
        panic!("Expected a record");
    };
    let props = packet.store.record(id)?.payload().cloned().unwrap_or_default();
    assert_eq!(2, props.len());
    assert_eq!(props[0].value, props[1].value);
    assert_eq!(1, packet.store.sequences_len());
    Ok(())
}

#[test]
fn mutual_cycle_between_records() -> Result<()> {
    let mut store = ValueStore::new();
    let a = store.new_record(dia_types::Record::of(vec![]));
    let b = store.new_record(dia_types::Record::of(vec![]));
    store.append_property(a, Property::new("next", DiaValue::Record(b)))?;
    store.append_property(b, Property::new("next", DiaValue::Record(a)))?;

    let packet = verify(&store, &[DiaValue::Record(a), DiaValue::Record(b)])?;
    assert_eq!(2, packet.store.records_len());

    let ids = packet
        .values
        .iter()
        .map(|val| match val {
            DiaValue::Record(id) => *id,
            other => panic!("Expected a record, got {:?}", other),
        })
        .collect::<Vec<_>>();
    let next_of = |i: usize| -> Result<DiaValue> {
        let rec = packet.store.record(ids[i])?;
        Ok(rec.payload().map(|props| props[0].value.clone()).unwrap_or(DiaValue::bool(false)))
    };
    assert_eq!(DiaValue::Record(ids[1]), next_of(0)?);
    assert_eq!(DiaValue::Record(ids[0]), next_of(1)?);
    Ok(())
}

#[test]
fn shared_across_top_level_values() -> Result<()> {
    let mut store = ValueStore::new();
    let shared = store.sequence_of([DiaValue::int(9)]);
    let outer = store.sequence_of([shared.clone()]);

    let packet = verify(&store, &[outer, shared])?;
    let (outer, shared) = (&packet.values[0], &packet.values[1]);
    let DiaValue::Sequence(outer_id) = outer else {
        panic!("Expected a sequence");
    };
    let items = packet.store.sequence(*outer_id)?.payload().cloned().unwrap_or_default();
    assert_eq!(vec![shared.clone()], items);
    Ok(())
}
