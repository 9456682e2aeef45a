use crate::store::ValueStore;
use crate::{Annotated, DiaValue};
use std::collections::HashSet;

#[derive(PartialEq, Eq, Hash)]
enum Pair {
    Records(usize, usize),
    Sequences(usize, usize),
}

impl ValueStore {
    /// Structural equality of `a` (held in `self`) against `b` (held in `other`).
    ///
    /// Containers are compared member by member, including attributes and nullness.
    /// A pair of containers already under comparison is assumed equal, so cyclic
    /// graphs terminate. Sharing is not compared: two equal copies match one shared instance.
    pub fn graph_eq(&self, a: &DiaValue, other: &ValueStore, b: &DiaValue) -> bool {
        let mut assumed = HashSet::new();
        self.graph_eq_(a, other, b, &mut assumed)
    }

    fn graph_eq_(
        &self,
        a: &DiaValue,
        other: &ValueStore,
        b: &DiaValue,
        assumed: &mut HashSet<Pair>,
    ) -> bool {
        match (a, b) {
            (DiaValue::Record(x), DiaValue::Record(y)) => {
                if !assumed.insert(Pair::Records(x.index(), y.index())) {
                    return true;
                }
                let (l, r) = match (self.record(*x), other.record(*y)) {
                    (Ok(l), Ok(r)) => (l, r),
                    _ => return false,
                };
                Self::shell_eq(l, r)
                    && match (l.payload(), r.payload()) {
                        (Some(lprops), Some(rprops)) => {
                            lprops.len() == rprops.len()
                                && lprops.iter().zip(rprops.iter()).all(|(lp, rp)| {
                                    lp.name == rp.name
                                        && self.graph_eq_(&lp.value, other, &rp.value, assumed)
                                })
                        }
                        _ => true,
                    }
            }
            (DiaValue::Sequence(x), DiaValue::Sequence(y)) => {
                if !assumed.insert(Pair::Sequences(x.index(), y.index())) {
                    return true;
                }
                let (l, r) = match (self.sequence(*x), other.sequence(*y)) {
                    (Ok(l), Ok(r)) => (l, r),
                    _ => return false,
                };
                Self::shell_eq(l, r)
                    && match (l.payload(), r.payload()) {
                        (Some(litems), Some(ritems)) => {
                            litems.len() == ritems.len()
                                && litems
                                    .iter()
                                    .zip(ritems.iter())
                                    .all(|(li, ri)| self.graph_eq_(li, other, ri, assumed))
                        }
                        _ => true,
                    }
            }
            (DiaValue::Record(_), _)
            | (DiaValue::Sequence(_), _)
            | (_, DiaValue::Record(_))
            | (_, DiaValue::Sequence(_)) => false,
            (a, b) => a == b,
        }
    }

    /// Same attributes, same nullness.
    fn shell_eq<T>(l: &Annotated<T>, r: &Annotated<T>) -> bool {
        l.attributes() == r.attributes() && l.is_null() == r.is_null()
    }
}
