use super::helpers::verify;
use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::{FixedOffset, TimeDelta, TimeZone};
use dia_types::store::ValueStore;
use dia_types::{
    Attribute, Blob, Bool, Decimal, DiaValue, Duration, Int, Property, Record, Sequence, Text,
    Timestamp,
};
use itertools::Itertools;
use num_bigint::BigInt;
use rand::seq::SliceRandom;
use std::str::FromStr;

type GenFn = fn(&mut ValueStore) -> DiaValue;

fn attrs() -> Vec<Attribute> {
    vec![Attribute::new("flag"), Attribute::with_value("unit", "ms")]
}

fn gen_nulls(store: &mut ValueStore) -> DiaValue {
    let rec = store.new_record(Record::null());
    let seq = store.new_sequence(Sequence::null());
    store.sequence_of([
        DiaValue::Blob(Blob::null()),
        DiaValue::Bool(Bool::null()),
        DiaValue::Decimal(Decimal::null()),
        DiaValue::Duration(Duration::null()),
        DiaValue::Int(Int::null()),
        DiaValue::String(Text::null()),
        DiaValue::Symbol(Text::null()),
        DiaValue::Timestamp(Timestamp::null()),
        DiaValue::Record(rec),
        DiaValue::Sequence(seq),
    ])
}

fn gen_defaults(store: &mut ValueStore) -> DiaValue {
    let rec = store.record_of(Vec::<Property>::new());
    let seq = store.sequence_of(Vec::<DiaValue>::new());
    store.sequence_of([
        DiaValue::Blob(Blob::default()),
        DiaValue::Bool(Bool::default()),
        DiaValue::Decimal(Decimal::default()),
        DiaValue::Duration(Duration::default()),
        DiaValue::Int(Int::default()),
        DiaValue::String(Text::default()),
        DiaValue::Symbol(Text::default()),
        DiaValue::Timestamp(Timestamp::of(Default::default())),
        rec,
        seq,
    ])
}

fn gen_numbers(store: &mut ValueStore) -> DiaValue {
    let big = BigInt::from_str("-123456789012345678901234567890").unwrap();
    store.sequence_of([
        DiaValue::int(12345),
        DiaValue::int(-1),
        DiaValue::int(big),
        DiaValue::decimal(BigDecimal::from_str("-1.50").unwrap()),
        DiaValue::decimal(BigDecimal::new(BigInt::from(5), -3)),
        DiaValue::bool(true),
    ])
}

fn gen_temporals(store: &mut ValueStore) -> DiaValue {
    let offset = FixedOffset::east_opt(-5 * 3600).unwrap();
    let ts = offset.with_ymd_and_hms(2021, 7, 4, 9, 30, 15).unwrap();
    store.sequence_of([
        DiaValue::timestamp(ts),
        DiaValue::duration(TimeDelta::milliseconds(-1500)),
        DiaValue::duration(TimeDelta::nanoseconds(1)),
    ])
}

fn gen_blob(_: &mut ValueStore) -> DiaValue {
    DiaValue::blob(vec![0u8, 1, 2, 255])
}

fn gen_string(_: &mut ValueStore) -> DiaValue {
    DiaValue::string("héllo, wörld 😀")
}

fn gen_annotated(store: &mut ValueStore) -> DiaValue {
    let int = DiaValue::Int(Int::of(BigInt::from(7)).with_attributes(attrs()));
    let null_sym = DiaValue::Symbol(Text::null().with_attributes(attrs()));
    let rec = store.new_record(Record::of(vec![Property::new("x", int)]).with_attributes(attrs()));
    store.sequence_of([DiaValue::Record(rec), null_sym])
}

fn gen_record_depth3(store: &mut ValueStore) -> DiaValue {
    let inner = store.record_of([Property::new("leaf", DiaValue::symbol("asdf"))]);
    let mid = store.sequence_of([inner, DiaValue::int(456)]);
    store.record_of([
        Property::new("name", DiaValue::string("asdf")),
        Property::new("mid", mid),
        Property::new("n", DiaValue::int(123)),
    ])
}

#[test]
fn ser_then_deser() -> Result<()> {
    let mut rand_rng = rand::thread_rng();

    let gen_fns: [GenFn; 8] = [
        gen_nulls,
        gen_defaults,
        gen_numbers,
        gen_temporals,
        gen_blob,
        gen_string,
        gen_annotated,
        gen_record_depth3,
    ];

    for mut gen_fns in gen_fns.iter().powerset() {
        let mut store = ValueStore::new();
        let vals = gen_fns.iter().map(|gen| gen(&mut store)).collect::<Vec<_>>();
        verify(&store, &vals)?;

        gen_fns.shuffle(&mut rand_rng);
        let mut store = ValueStore::new();
        let vals = gen_fns.iter().map(|gen| gen(&mut store)).collect::<Vec<_>>();
        verify(&store, &vals)?;
    }

    Ok(())
}

#[test]
fn attributes_survive_on_every_kind() -> Result<()> {
    let mut store = ValueStore::new();
    let vals = vec![
        DiaValue::Blob(Blob::of(vec![1]).with_attributes(attrs())),
        DiaValue::Bool(Bool::default().with_attributes(attrs())),
        DiaValue::Decimal(Decimal::null().with_attributes(attrs())),
        DiaValue::Duration(Duration::of(TimeDelta::seconds(3)).with_attributes(attrs())),
        DiaValue::String(Text::of(String::from("s")).with_attributes(attrs())),
        DiaValue::Timestamp(Timestamp::null().with_attributes(attrs())),
    ];
    let seq = store.new_sequence(Sequence::null().with_attributes(attrs()));

    let mut all = vals.clone();
    all.push(DiaValue::Sequence(seq));
    let packet = verify(&store, &all)?;

    for (pre, post) in vals.iter().zip(packet.values.iter()) {
        assert_eq!(pre.scalar_attributes(), post.scalar_attributes());
    }
    match packet.values.last() {
        Some(DiaValue::Sequence(id)) => {
            let seq = packet.store.sequence(*id)?;
            assert!(seq.is_null());
            assert_eq!(attrs(), seq.attributes());
        }
        other => panic!("Expected a sequence, got {:?}", other),
    }
    Ok(())
}
