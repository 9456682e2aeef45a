use anyhow::Result;
use dia_codec::{DiaError, Packet};
use dia_types::store::ValueStore;
use dia_types::DiaValue;

/// Writes `vals` as one stream, reads it back, and checks each value's structure.
pub fn verify(store: &ValueStore, vals: &[DiaValue]) -> Result<Packet> {
    let buf = dia_codec::serialize_values(store, vals)?;
    let packet = dia_codec::deserialize_values(&buf)?;

    assert_eq!(vals.len(), packet.values.len(), "\n{:?}\n{:?}\n", vals, buf);
    for (pre, post) in vals.iter().zip(packet.values.iter()) {
        assert!(
            store.graph_eq(pre, &packet.store, post),
            "\n{:?}\n{:?}\n{:?}\n",
            pre,
            post,
            buf
        );
    }
    Ok(packet)
}

pub fn single(vals: Vec<DiaValue>) -> Result<DiaValue> {
    let mut vals = vals.into_iter();
    match (vals.next(), vals.next()) {
        (Some(val), None) => Ok(val),
        _ => Err(anyhow::anyhow!("Expected exactly one value.")),
    }
}

pub fn expect_dia_error(res: Result<impl std::fmt::Debug>, pred: impl Fn(&DiaError) -> bool) {
    match res {
        Ok(val) => panic!("Expected an error, got {:?}", val),
        Err(e) => match e.downcast_ref::<DiaError>() {
            Some(dia_err) => assert!(pred(dia_err), "Unexpected error {:?}", dia_err),
            None => panic!("Not a DiaError: {:?}", e),
        },
    }
}
