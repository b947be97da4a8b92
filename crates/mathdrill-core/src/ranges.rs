//! Per-operator operand ranges.
//!
//! Each function derives its range from its arguments alone, so the rules
//! for one operator can never leak into another.

use std::ops::RangeInclusive;

use crate::model::Operator;

/// Operand range for `+`, both sides.
pub const ADDEND: RangeInclusive<i64> = 0..=19;
/// Operand range for `*`, both sides.
pub const FACTOR: RangeInclusive<i64> = 0..=9;
/// Smallest unpinned minuend for `-`.
pub const MINUEND_MIN: i64 = 4;
/// Largest unpinned minuend for `-`.
pub const MINUEND_MAX: i64 = 19;
/// Divisors for `/`. Zero is never generated.
pub const DIVISOR: RangeInclusive<i64> = 1..=9;
/// Quotients for `/`; the dividend is always `divisor * quotient`.
pub const QUOTIENT: RangeInclusive<i64> = 0..=9;

/// Range of the first operand when nothing else is pinned.
///
/// For `/` this is the span of reachable dividends; only multiples of the
/// divisor are ever produced.
pub fn first_range(op: Operator) -> RangeInclusive<i64> {
    match op {
        Operator::Add => ADDEND,
        Operator::Subtract => MINUEND_MIN..=MINUEND_MAX,
        Operator::Multiply => FACTOR,
        Operator::Divide => 0..=(DIVISOR.end() * QUOTIENT.end()),
    }
}

/// Range of the second operand once the first is known.
pub fn second_range(op: Operator, first: i64) -> RangeInclusive<i64> {
    match op {
        Operator::Add => ADDEND,
        Operator::Subtract => 0..=first.max(0),
        Operator::Multiply => FACTOR,
        Operator::Divide => DIVISOR,
    }
}

/// Minuends that keep `minuend - second` non-negative for a pinned `second`.
pub fn minuends_for(second: i64) -> RangeInclusive<i64> {
    MINUEND_MIN.max(second)..=MINUEND_MAX.max(second)
}

/// Divisors in [`DIVISOR`] that divide `dividend` evenly. Never empty.
pub fn divisors_of(dividend: i64) -> Vec<i64> {
    DIVISOR.filter(|d| dividend % d == 0).collect()
}
