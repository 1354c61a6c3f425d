//! Fact key layout lock: golden values for the packed `(a, rel, b, truth)`
//! key, plus injectivity and decode properties.

use proptest::prelude::*;
use relplan_kernel::carrier::fact::Fact;
use relplan_kernel::carrier::ident::Ident;

fn id(raw: u32) -> Ident {
    Ident::new(raw).unwrap()
}

#[test]
fn golden_keys() {
    assert_eq!(Fact::new(id(1), id(2), id(3)).key(), 8_796_101_410_823);
    assert_eq!(Fact::negated(id(1), id(2), id(3)).key(), 8_796_101_410_822);
    assert_eq!(Fact::new(id(Ident::MAX), id(Ident::MAX), id(Ident::MAX)).key(), u64::MAX);
}

#[test]
fn truth_bit_is_part_of_identity() {
    let yes = Fact::new(id(4), id(5), id(6));
    let no = Fact::negated(id(4), id(5), id(6));
    assert_ne!(yes, no);
    assert_ne!(yes.key(), no.key());
    assert!(yes.same_proposition(&no));
    assert_eq!(no.proposition(), yes);
}

#[test]
fn identifier_range_enforced() {
    assert!(Ident::new(0).is_err());
    assert!(Ident::new(Ident::MAX + 1).is_err());
    assert!(Ident::new(Ident::MAX).is_ok());
}

fn ident() -> impl Strategy<Value = u32> {
    1..=Ident::MAX
}

fn fact() -> impl Strategy<Value = Fact> {
    (ident(), ident(), ident(), any::<bool>()).prop_map(|(a, r, b, t)| Fact {
        a: id(a),
        rel: id(r),
        b: id(b),
        truth: t,
    })
}

proptest! {
    #[test]
    fn key_decodes_to_same_fact(f in fact()) {
        prop_assert_eq!(Fact::from_key(f.key()), f);
    }

    #[test]
    fn key_is_injective(x in fact(), y in fact()) {
        prop_assert_eq!(x.key() == y.key(), x == y);
    }

    #[test]
    fn key_order_matches_fact_order(x in fact(), y in fact()) {
        prop_assert_eq!(x.key().cmp(&y.key()), x.cmp(&y));
    }
}
