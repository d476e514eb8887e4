use std::collections::HashSet;

use num_bigint::BigInt;
use unit_calc::*;

fn q(num: i64, den: i64) -> RationalNumber {
    RationalNumber::new(num, den).unwrap()
}

#[test]
fn canonical_form() {
    let r = q(2, 4);
    assert_eq!(r.numerator(), &BigInt::from(1), "not reduced: {}", r);
    assert_eq!(r.denominator(), &BigInt::from(2), "not reduced: {}", r);

    let r = q(3, -6);
    assert_eq!(r.numerator(), &BigInt::from(-1), "sign not moved to numerator: {}", r);
    assert_eq!(r.denominator(), &BigInt::from(2), "denominator not positive: {}", r);

    let r = q(0, -7);
    assert!(r.is_zero());
    assert_eq!(r, RationalNumber::zero());
    assert_eq!(r.denominator(), &BigInt::from(1));

    assert_eq!(q(-4, -2), RationalNumber::from(2));
    assert!(q(-4, -2).is_integer());
}

#[test]
fn zero_denominator() {
    assert_eq!(RationalNumber::new(1, 0), Err(Error::DivideByZero));
}

#[test]
fn exact_arithmetic() {
    assert_eq!(q(1, 3).add(&q(1, 6)), q(1, 2));
    assert_eq!(q(1, 2).subtract(&q(1, 3)), q(1, 6));
    assert_eq!(q(2, 3).multiply(&q(3, 4)), q(1, 2));
    assert_eq!(q(1, 2).divide(&q(1, 4)).unwrap(), RationalNumber::from(2));
    assert_eq!(q(2, 3).reciprocal().unwrap(), q(3, 2));
    assert_eq!(q(-2, 3).reciprocal().unwrap(), q(-3, 2));
    assert_eq!(q(2, 3).negate(), q(-2, 3));
    assert_eq!(q(-2, 3).abs(), q(2, 3));

    // no drift over many steps
    let sum = (0..30).fold(RationalNumber::zero(), |acc, _| acc.add(&q(1, 10)));
    assert_eq!(sum, RationalNumber::from(3));
}

#[test]
fn arithmetic_leaves_operands_unmodified() {
    let a = q(1, 3);
    let b = q(1, 6);
    let _ = a.add(&b);
    let _ = a.divide(&b);
    assert_eq!(a, q(1, 3));
    assert_eq!(b, q(1, 6));
}

#[test]
fn division_by_zero() {
    assert_eq!(q(1, 2).divide(&RationalNumber::zero()), Err(Error::DivideByZero));
    assert_eq!(RationalNumber::zero().reciprocal(), Err(Error::DivideByZero));
    assert_eq!(RationalNumber::zero().pow(-1), Err(Error::DivideByZero));
}

#[test]
fn powers() {
    assert_eq!(q(2, 3).pow(2).unwrap(), q(4, 9));
    assert_eq!(q(2, 3).pow(-2).unwrap(), q(9, 4));
    assert_eq!(q(2, 3).pow(0).unwrap(), RationalNumber::one());
    assert_eq!(RationalNumber::from(10).pow(-3).unwrap(), q(1, 1000));
}

#[test]
fn ordering_and_hashing() {
    assert!(q(-1, 2) < q(1, 3));
    assert!(q(1, 3) < q(1, 2));
    assert!(q(2, 4) <= q(1, 2) && q(2, 4) >= q(1, 2));

    let set: HashSet<_> = [q(1, 2), q(2, 4), q(-3, -6), q(1, 3)].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn from_mpfr() {
    let r = rug::Rational::from((6, -4));
    assert_eq!(RationalNumber::from(&r), q(-3, 2));
    assert_eq!(RationalNumber::from(&r).to_rug(), r);
    assert_eq!(Number::from(rug::Integer::from(-12)), Number::from(-12));
}

#[test]
fn display() {
    assert_eq!(q(1, 2).to_string(), "1/2");
    assert_eq!(q(-6, 2).to_string(), "-3");
}

#[test]
fn to_machine_float() {
    assert_eq!(q(1, 3).to_f64(), 1.0 / 3.0);
    assert_eq!(q(-3, 8).to_f64(), -0.375);
}

#[test]
fn to_decimal() {
    let ctx = MathContext::decimal128();
    let third = q(1, 3).to_decimal(&ctx).unwrap();
    assert!(third.prec() >= 113, "unexpected precision: {}", third.prec());
    assert_eq!(third.to_f64(), 1.0 / 3.0);

    // unlimited precision is exact for terminating expansions
    let exact = q(3, 8).to_decimal(&MathContext::new()).unwrap();
    assert_eq!(exact.to_f64(), 0.375);
    let exact = q(-5, 1).to_decimal(&MathContext::new()).unwrap();
    assert_eq!(exact.to_f64(), -5.0);

    assert!(matches!(
        q(1, 3).to_decimal(&MathContext::new()),
        Err(Error::NonTerminatingExpansion(_))
    ));
}
