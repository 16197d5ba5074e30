//! Rounding policies.
//!
//! Two call sites round values, with different conventions:
//!
//! - [`round_float`] rounds a float at a decimal precision. `Up` and `Down`
//!   follow the number line (ceil / floor); `HalfUp` breaks ties away from
//!   zero.
//! - [`round_quotient`] rounds an integer division (duration / unit). It is
//!   magnitude based: `Up` moves away from zero, `Down` truncates toward
//!   zero, `HalfUp` breaks ties away from zero.
//!
//! Both use banker's rounding for `HalfEven`.

use std::fmt;

/// Absolute tolerance used to absorb binary floating point noise.
pub const TOLERANCE: f64 = 1e-9;

/// Rounding convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rounding {
    /// No rounding; inexact values are rejected where an integer is required.
    #[default]
    None,
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest, ties away from zero.
    HalfUp,
    /// Round to nearest, ties to even (banker's rounding).
    HalfEven,
}

impl Rounding {
    /// Get a descriptive name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Up => "Up",
            Self::Down => "Down",
            Self::HalfUp => "HalfUp",
            Self::HalfEven => "HalfEven",
        }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rounds `value` to `precision` decimal places.
///
/// The value is scaled by `10^precision`, snapped to a whole or half unit when
/// within [`TOLERANCE`] of one, rounded, then scaled back. Non-finite values
/// and [`Rounding::None`] pass through unchanged.
///
/// ```rust
/// use rulechain::rounding::{Rounding, round_float};
///
/// assert_eq!(round_float(124.125, 2, Rounding::HalfEven), 124.12);
/// assert_eq!(round_float(-124.5, 0, Rounding::HalfUp), -125.0);
/// assert_eq!(round_float(1.231, 2, Rounding::Up), 1.24);
/// ```
pub fn round_float(value: f64, precision: i32, rounding: Rounding) -> f64 {
    if rounding == Rounding::None || !value.is_finite() {
        return value;
    }
    let mult = 10_f64.powi(precision);
    let scaled = value * mult;
    if !scaled.is_finite() {
        return value;
    }
    round_scaled(scaled, rounding) / mult
}

/// Rounds an already scaled value to a whole number.
pub(crate) fn round_scaled(scaled: f64, rounding: Rounding) -> f64 {
    let nearest = scaled.round();
    let scaled = if (scaled - nearest).abs() < TOLERANCE {
        nearest
    } else {
        scaled
    };

    let floor = scaled.floor();
    let tie = ((scaled - floor) - 0.5).abs() < TOLERANCE;

    match rounding {
        Rounding::None => scaled,
        Rounding::Up => scaled.ceil(),
        Rounding::Down => floor,
        Rounding::HalfUp if tie => {
            if scaled >= 0.0 {
                floor + 1.0
            } else {
                floor
            }
        }
        Rounding::HalfEven if tie => {
            if floor.rem_euclid(2.0) == 0.0 {
                floor
            } else {
                floor + 1.0
            }
        }
        Rounding::HalfUp | Rounding::HalfEven => scaled.round(),
    }
}

/// Divides `dividend` by a positive `divisor`, rounding the remainder away.
///
/// Returns `None` when the division is inexact and `rounding` is
/// [`Rounding::None`]. An exact division never consults the policy.
///
/// ```rust
/// use rulechain::rounding::{Rounding, round_quotient};
///
/// assert_eq!(round_quotient(55, 10, Rounding::HalfEven), Some(6));
/// assert_eq!(round_quotient(65, 10, Rounding::HalfEven), Some(6));
/// assert_eq!(round_quotient(-1245, 10, Rounding::HalfUp), Some(-125));
/// assert_eq!(round_quotient(55, 10, Rounding::None), None);
/// assert_eq!(round_quotient(60, 10, Rounding::None), Some(6));
/// ```
pub fn round_quotient(dividend: i128, divisor: i128, rounding: Rounding) -> Option<i128> {
    debug_assert!(divisor > 0, "divisor must be positive");

    let quotient = dividend / divisor;
    let remainder = dividend % divisor;
    if remainder == 0 {
        return Some(quotient);
    }

    let away = if dividend < 0 {
        quotient - 1
    } else {
        quotient + 1
    };
    let twice = remainder.abs() * 2;

    match rounding {
        Rounding::None => None,
        Rounding::Up => Some(away),
        Rounding::Down => Some(quotient),
        Rounding::HalfUp => Some(if twice >= divisor { away } else { quotient }),
        Rounding::HalfEven => Some(match twice.cmp(&divisor) {
            std::cmp::Ordering::Greater => away,
            std::cmp::Ordering::Less => quotient,
            std::cmp::Ordering::Equal if quotient % 2 == 0 => quotient,
            std::cmp::Ordering::Equal => away,
        }),
    }
}
