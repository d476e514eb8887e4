/*
    Composition laws
*/

use std::f64::consts::E;

use proptest::prelude::*;
use unit_calc::{converter::*, *};

fn q(num: i64, den: i64) -> RationalNumber {
    RationalNumber::new(num, den).unwrap()
}

fn add(x: f64) -> UnitConverter {
    UnitConverter::add(x)
}

fn mul(x: f64) -> UnitConverter {
    UnitConverter::multiply(x)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn identity_is_absorbed() {
    let a = add(3.0);
    assert_eq!(UnitConverter::identity().compose(&a), a);
    assert_eq!(a.compose(&UnitConverter::pi_power(0)), a);
}

#[test]
fn same_family_fuses() {
    assert_eq!(add(3.0).compose(&add(4.0)), add(7.0));
    assert_eq!(mul(2.0).compose(&mul(3.0)), mul(6.0));

    let r = UnitConverter::multiply_exact(q(1, 2)).compose(&UnitConverter::multiply_exact(q(2, 3)));
    assert_eq!(r, UnitConverter::multiply_exact(q(1, 3)));

    // mixing floating point and exact factors gives a floating-point factor
    let r = mul(0.5).compose(&UnitConverter::multiply_exact(q(1, 4)));
    assert_eq!(r, mul(0.125));

    let r = UnitConverter::power_of_ten(3).compose(&UnitConverter::power_of_ten(-1));
    assert_eq!(r, UnitConverter::power_of_ten(2));

    let r = UnitConverter::pi_power(2).compose(&UnitConverter::pi_power(-2));
    assert!(r.is_identity(), "π² ∘ π⁻² should be an identity: {}", r);
    assert_eq!(r, UnitConverter::identity());

    assert!(UnitConverter::exp(2.0).compose(&UnitConverter::log(2.0)).is_identity());
    assert!(UnitConverter::log(10.0).compose(&UnitConverter::exp(10.0)).is_identity());
}

#[test]
fn different_families_chain() {
    let c = add(3.0).compose(&mul(2.0));
    match &c {
        UnitConverter::Chain(chain) => assert_eq!(chain.steps(), &[add(3.0), mul(2.0)]),
        other => panic!("expected a chain: {}", other),
    }
    assert!(!c.is_linear());
    assert!(!c.is_identity());
    assert_eq!(c.convert(5.0), 16.0);

    // different bases do not fuse
    let c = UnitConverter::power_of_int(2, 10).compose(&UnitConverter::power_of_ten(3));
    assert_eq!(c.steps().len(), 2);
    assert!(c.is_linear());
    assert_eq!(c.convert(1.0), 1024000.0);

    let c = UnitConverter::exp(2.0).compose(&UnitConverter::exp(2.0));
    assert_eq!(c.steps().len(), 2);
    assert_eq!(c.convert(2.0), 16.0);
}

#[test]
fn chains_are_flattened() {
    let left = add(3.0).compose(&mul(2.0));
    let right = add(1.0).compose(&mul(3.0));
    let c = left.compose(&right);
    assert_eq!(c.steps(), &[add(3.0), mul(2.0), add(1.0), mul(3.0)]);
    assert!(c.steps().iter().all(|s| !matches!(s, UnitConverter::Chain(_))));
    assert_eq!(c.convert(1.0), 27.0);
}

#[test]
fn adjacent_steps_fuse_after_cancellation() {
    let left = mul(2.0).compose(&add(3.0));
    let right = add(-3.0).compose(&mul(3.0));
    assert_eq!(left.compose(&right), mul(6.0));
}

#[test]
fn chain_inverse() {
    let c = add(3.0).compose(&mul(2.0));
    let inv = c.inverse();
    assert_eq!(inv.steps(), &[mul(0.5), add(-3.0)]);
    assert_eq!(inv.convert(16.0), 5.0);
    assert!(c.compose(&inv).is_identity());
    assert!(inv.compose(&c).is_identity());
}

#[test]
fn linear_converters_commute_structurally() {
    let a = mul(2.0);
    let b = UnitConverter::pi_power(1);
    assert_eq!(a.compose(&b), b.compose(&a));

    let a = UnitConverter::multiply_exact(q(3, 7)).compose(&UnitConverter::pi_power(2));
    let b = UnitConverter::power_of_ten(2).compose(&UnitConverter::multiply_exact(q(7, 3)));
    assert_eq!(a.compose(&b), b.compose(&a));
    assert_eq!(a.compose(&b), UnitConverter::pi_power(2).compose(&UnitConverter::power_of_ten(2)));
}

#[test]
fn affine_converters_do_not_commute() {
    let a = add(3.0);
    let b = mul(2.0);
    assert_ne!(a.compose(&b), b.compose(&a));
    assert_ne!(a.compose(&b).convert(1.0), b.compose(&a).convert(1.0));
}

// (a ∘ b) ∘ (b⁻¹ ∘ a) === a ∘ a
#[test]
fn equivalence_happy_case() {
    let a = add(3.0);
    let b = mul(2.0);

    let ab = a.compose(&b);
    let ba = b.inverse().compose(&a);
    assert_eq!(ab.compose(&ba), a.compose(&a));
}

// Add(3) ∘ Mul(2) ∘ Add(-7) evaluates like Mul(2) ∘ Add(-1),
// but the two are not reduced to the same chain
#[test]
fn equivalent_chains_are_not_normalized() {
    let left = add(3.0).compose(&mul(2.0)).compose(&add(-7.0));
    let right = mul(2.0).compose(&add(-1.0));

    assert_eq!(left.convert(5.0), 9.0);
    assert_eq!(right.convert(5.0), 9.0);
    assert_ne!(left, right);
}

#[test]
fn exact_chain_evaluation() {
    // °F -> K: (x + 459.67) * 5/9
    let f_to_k = UnitConverter::add_exact(q(45967, 100))
        .compose(&UnitConverter::multiply_exact(q(5, 9)));
    let ctx = MathContext::new();

    let r = f_to_k.convert_number(&Number::from(32), &ctx).unwrap();
    assert_eq!(r, Number::from(q(27315, 100)));

    let back = f_to_k.inverse().convert_number(&r, &ctx).unwrap();
    assert_eq!(back, Number::from(32));
}

// Floating-point factors are powers of two so that `m * (1 / m)` is exactly one.
// Mixing them with exact factors gives arbitrary floating-point factors, so a
// strategy either uses one kind or the other.
fn scaling(exact: bool) -> BoxedStrategy<UnitConverter> {
    let factor = if exact {
        (1i64..50, 1i64..50, any::<bool>())
            .prop_map(|(n, d, neg)| UnitConverter::multiply_exact(q(if neg { -n } else { n }, d)))
            .boxed()
    } else {
        (-20i32..20).prop_map(|k| mul(2f64.powi(k))).boxed()
    };
    prop_oneof![
        factor,
        (2u32..17, -6i32..7).prop_map(|(b, e)| UnitConverter::power_of_int(b, e)),
        (-4i32..5).prop_map(UnitConverter::pi_power),
    ]
    .boxed()
}

fn linear() -> impl Strategy<Value = UnitConverter> {
    prop_oneof![scaling(false), scaling(true)]
}

fn converter(exact: bool) -> impl Strategy<Value = UnitConverter> {
    prop_oneof![
        4 => scaling(exact),
        2 => (-100.0f64..100.0).prop_map(add),
        1 => (-50i64..50, 1i64..20).prop_map(|(n, d)| UnitConverter::add_exact(q(n, d))),
        1 => prop_oneof![Just(2.0), Just(10.0), Just(E)].prop_map(UnitConverter::exp),
        1 => prop_oneof![Just(2.0), Just(10.0), Just(E)].prop_map(UnitConverter::log),
    ]
}

fn composed(step: impl Strategy<Value = UnitConverter>) -> impl Strategy<Value = UnitConverter> {
    prop::collection::vec(step, 1..5)
        .prop_map(|cs| cs.iter().fold(UnitConverter::identity(), |acc, c| acc.compose(c)))
}

fn invertible() -> impl Strategy<Value = UnitConverter> {
    any::<bool>().prop_flat_map(|exact| composed(converter(exact)))
}

proptest! {
    /// Property: any converter composed with its inverse is an identity
    /// that commutes with itself and maps every value to itself.
    #[test]
    fn identity_by_composition(c in invertible(), x in -1e6f64..1e6) {
        let id = c.compose(&c.inverse());
        prop_assert!(id.is_identity(), "{} ∘ {} = {}", c, c.inverse(), id);
        prop_assert!(id.is_linear());
        prop_assert!(id.compose(&id).is_identity());
        prop_assert_eq!(id.convert(x), x);

        prop_assert_eq!(c.compose(&c), c.compose(&c));
        prop_assert_eq!(c.compose(&id), c.clone());
        prop_assert_eq!(id.compose(&c), c.clone());
    }

    /// Property: linear converters commute, both structurally and numerically.
    #[test]
    fn linear_converters_commute(
        a in composed(linear()),
        b in composed(linear()),
        x in -1e3f64..1e3,
    ) {
        let ab = a.compose(&b);
        let ba = b.compose(&a);
        prop_assert!(ab.is_linear());
        prop_assert!(close(ab.convert(x), ba.convert(x)), "{} vs {} at {}", ab, ba, x);
        prop_assert_eq!(ab, ba);
    }

    /// Property: composition is associative with respect to evaluation.
    #[test]
    fn composition_is_associative(a in composed(linear()), x in -1e3f64..1e3) {
        let inv = a.inverse();
        let left = a.compose(&inv).compose(&a);
        let right = a.compose(&inv.compose(&a));
        prop_assert!(close(left.convert(x), right.convert(x)));
        prop_assert!(close(left.convert(x), a.convert(x)));
    }

    /// Property: converting there and back restores the value.
    #[test]
    fn inverse_restores_value(a in composed(linear()), x in -1e3f64..1e3) {
        let y = a.convert(x);
        prop_assert!(close(a.inverse().convert(y), x), "{} at {}", a, x);
    }

    /// Property: exact and machine floating-point evaluation agree.
    #[test]
    fn evaluation_modes_agree(a in composed(linear()), n in -1000i64..1000) {
        let exact = a.convert_number(&Number::from(n), &MathContext::decimal128()).unwrap();
        prop_assert!(close(exact.to_f64(), a.convert(n as f64)), "{} at {}", a, n);
    }
}
