/*
    Conversions between integer representations
*/

use num_bigint::{BigInt, Sign};
use rug::integer::Order;
use rug::Integer;

// Converts a `BigInt` to an MPFR-compatible `Integer`
pub(crate) fn bigint_to_integer(i: &BigInt) -> Integer {
    let (sign, digits) = i.to_u32_digits();
    let magnitude = Integer::from_digits(&digits, Order::Lsf);
    match sign {
        Sign::Minus => -magnitude,
        _ => magnitude,
    }
}

// Converts an `Integer` to a `BigInt`
pub(crate) fn integer_to_bigint(i: &Integer) -> BigInt {
    let digits = i.to_digits::<u32>(Order::Lsf);
    let sign = match i.cmp0() {
        std::cmp::Ordering::Less => Sign::Minus,
        std::cmp::Ordering::Equal => Sign::NoSign,
        std::cmp::Ordering::Greater => Sign::Plus,
    };
    BigInt::from_slice(sign, &digits)
}
