//! Integer families
//!
//! Coercion into a fixed-width integer accepts:
//!
//! - any other integer width, if the value survives the round trip;
//! - floats, rounded with the configured policy (without one, only values
//!   within `1e-9` of an integer);
//! - strings, parsed in the configured base.
//!
//! ```rust
//! use rulechain::prelude::*;
//!
//! let ctx = ValidationContext::new();
//! let mut out = 0_i64;
//! int().base(16).apply(&ctx, &Value::from("BeEf"), Sink::Exact(&mut out)).unwrap();
//! assert_eq!(out, 0xBEEF);
//!
//! let errors = int8().validate(&ctx, &Value::from(1024_i64)).unwrap_err();
//! assert_eq!(errors.errors()[0].param("target"), Some("int8"));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::num::{IntErrorKind, ParseIntError};

use rulechain_value::{Value, ValueKind};

use crate::chain::{Coerced, Family, RuleSet, Tag};
use crate::foundation::{Render, ValidationError};
use crate::macros::impl_integer;
use crate::output::{NumericSlot, unsupported_sink};
use crate::rounding::{Rounding, TOLERANCE, round_scaled};

mod sealed {
    pub trait Sealed {}
}

/// Fixed-width integer types a rule set can target.
///
/// This trait is sealed and cannot be implemented outside this crate.
pub trait Integer:
    sealed::Sealed
    + Copy
    + PartialOrd
    + Render
    + fmt::Display
    + Into<i128>
    + TryFrom<i128>
    + Send
    + Sync
    + 'static
{
    /// Type name used in messages and labels.
    const NAME: &'static str;
    /// The matching dynamic kind.
    const KIND: ValueKind;

    /// Extracts the value from its own variant.
    fn from_native(value: &Value) -> Option<Self>;
    /// Wraps the value in its own variant.
    fn into_native(self) -> Value;
    /// `from_str_radix` for this width.
    fn parse_radix(src: &str, radix: u32) -> Result<Self, ParseIntError>;
    /// Borrows a slot of exactly this width.
    fn take_slot<'a>(slot: NumericSlot<'a>) -> Option<&'a mut Self>;
}

impl_integer! {
    i8 => I8, Int8, "int8";
    i16 => I16, Int16, "int16";
    i32 => I32, Int32, "int32";
    i64 => I64, Int64, "int64";
    u8 => U8, Uint8, "uint8";
    u16 => U16, Uint16, "uint16";
    u32 => U32, Uint32, "uint32";
    u64 => U64, Uint64, "uint64";
}

// ============================================================================
// FAMILY
// ============================================================================

/// Settings of an integer rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntSettings {
    /// Radix for string input.
    pub base: u32,
    /// Policy for float input.
    pub rounding: Rounding,
}

impl Default for IntSettings {
    fn default() -> Self {
        Self {
            base: 10,
            rounding: Rounding::None,
        }
    }
}

/// The integer family targeting `T`.
#[derive(Debug)]
pub struct IntFamily<T>(PhantomData<fn() -> T>);

/// Rule set producing a `T` integer.
pub type IntRuleSet<T> = RuleSet<IntFamily<T>>;

fn parse_integer<T: Integer>(src: &str, base: u32) -> Result<T, ValidationError> {
    T::parse_radix(src, base).map_err(|error| match error.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ValidationError::out_of_range(T::NAME, src)
        }
        _ => ValidationError::unparsable(T::NAME, src),
    })
}

fn integer_from_float<T: Integer>(
    value: f64,
    rounding: Rounding,
    source: ValueKind,
) -> Result<T, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::type_mismatch(T::NAME, source));
    }
    let rounded = match rounding {
        Rounding::None => {
            let nearest = value.round();
            if (nearest - value).abs() > TOLERANCE {
                return Err(ValidationError::type_mismatch(T::NAME, source));
            }
            nearest
        }
        policy => round_scaled(value, policy),
    };
    // `as` saturates, and every target is far narrower than i128.
    T::try_from(rounded as i128).map_err(|_| ValidationError::out_of_range(T::NAME, value))
}

impl<T: Integer> Family for IntFamily<T> {
    type Value = T;
    type Settings = IntSettings;
    type Origin = ();

    const KIND: ValueKind = T::KIND;
    const NAME: &'static str = T::NAME;

    fn label() -> Cow<'static, str> {
        Cow::Owned(format!("IntRuleSet[{}]", T::NAME))
    }

    fn coerce(
        settings: &IntSettings,
        strict: bool,
        input: &Value,
    ) -> Result<Coerced<T>, ValidationError> {
        if let Some(value) = T::from_native(input) {
            return Ok(Coerced::new(value));
        }
        if strict {
            return Err(ValidationError::type_mismatch(T::NAME, input.kind()));
        }

        let value = match input {
            Value::String(src) => parse_integer(src, settings.base)?,
            Value::F32(v) => integer_from_float(f64::from(*v), settings.rounding, input.kind())?,
            Value::F64(v) => integer_from_float(*v, settings.rounding, input.kind())?,
            other => {
                let Some(wide) = other.as_i128() else {
                    return Err(ValidationError::type_mismatch(T::NAME, other.kind()));
                };
                T::try_from(wide).map_err(|_| ValidationError::out_of_range(T::NAME, wide))?
            }
        };
        Ok(Coerced::new(value))
    }

    fn native(value: T) -> Value {
        value.into_native()
    }

    fn bind_numeric(
        _settings: &IntSettings,
        value: &T,
        slot: NumericSlot<'_>,
    ) -> Result<(), ValidationError> {
        let kind = slot.kind();
        match T::take_slot(slot) {
            Some(target) => {
                *target = *value;
                Ok(())
            }
            None => Err(unsupported_sink(T::NAME, kind)),
        }
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

impl<T: Integer> RuleSet<IntFamily<T>> {
    /// Radix used to parse string input.
    ///
    /// # Panics
    ///
    /// Panics if `base` is outside `2..=36`.
    pub fn base(&self, base: u32) -> Self {
        assert!(
            (2..=36).contains(&base),
            "base must be within 2..=36, got {base}"
        );
        self.with_modifier(Tag::Base, format!("WithBase({base})"), move |_, settings| {
            settings.base = base;
        })
    }

    /// Policy applied to float input.
    pub fn rounding(&self, rounding: Rounding) -> Self {
        self.with_modifier(
            Tag::Rounding,
            format!("WithRounding({rounding})"),
            move |_, settings| settings.rounding = rounding,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{ErrorKind, codes};
    use rstest::rstest;

    fn coerce<T: Integer>(settings: IntSettings, input: Value) -> Result<T, ValidationError> {
        IntFamily::<T>::coerce(&settings, false, &input).map(|c| c.value)
    }

    #[rstest]
    #[case(Value::from(7_u8), Ok(7))]
    #[case(Value::from(-128_i64), Ok(-128))]
    #[case(Value::from(128_i64), Err(ErrorKind::Range))]
    #[case(Value::from(1024_u16), Err(ErrorKind::Range))]
    #[case(Value::from(u64::MAX), Err(ErrorKind::Range))]
    #[case(Value::from(3.0_f64), Ok(3))]
    #[case(Value::from(3.0000000001_f64), Ok(3))]
    #[case(Value::from(3.5_f64), Err(ErrorKind::Type))]
    #[case(Value::from(f64::NAN), Err(ErrorKind::Type))]
    #[case(Value::from(1e10_f64), Err(ErrorKind::Range))]
    #[case(Value::from("-12"), Ok(-12))]
    #[case(Value::from("999"), Err(ErrorKind::Range))]
    #[case(Value::from("12a"), Err(ErrorKind::Type))]
    #[case(Value::from(true), Err(ErrorKind::Type))]
    fn int8_coercion_table(#[case] input: Value, #[case] expected: Result<i8, ErrorKind>) {
        let actual = coerce::<i8>(IntSettings::default(), input).map_err(|e| e.kind);
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case(-124.5, Rounding::HalfUp, -125)]
    #[case(124.5, Rounding::HalfUp, 125)]
    #[case(124.5, Rounding::HalfEven, 124)]
    #[case(125.5, Rounding::HalfEven, 126)]
    #[case(124.1, Rounding::Up, 125)]
    #[case(-124.1, Rounding::Up, -124)]
    #[case(124.9, Rounding::Down, 124)]
    #[case(-124.1, Rounding::Down, -125)]
    fn float_input_rounding(#[case] input: f64, #[case] rounding: Rounding, #[case] expected: i64) {
        let settings = IntSettings {
            rounding,
            ..IntSettings::default()
        };
        assert_eq!(coerce::<i64>(settings, Value::from(input)), Ok(expected));
    }

    #[test]
    fn unsigned_rejects_negative_widths() {
        let error = coerce::<u32>(IntSettings::default(), Value::from(-1_i8)).unwrap_err();
        assert_eq!(error.kind, ErrorKind::Range);
        assert_eq!(error.param("target"), Some("uint32"));
    }

    #[test]
    fn base_parsing() {
        let settings = IntSettings {
            base: 2,
            ..IntSettings::default()
        };
        assert_eq!(coerce::<u8>(settings, Value::from("1010")), Ok(10));

        let error = coerce::<u8>(settings, Value::from("12")).unwrap_err();
        assert_eq!(error.code, codes::TYPE);
        assert!(error.message.contains("string to uint8"));
    }

    #[test]
    fn strict_accepts_only_the_native_width() {
        let settings = IntSettings::default();
        assert!(IntFamily::<i16>::coerce(&settings, true, &Value::from(5_i16)).is_ok());
        let error = IntFamily::<i16>::coerce(&settings, true, &Value::from(5_i32)).unwrap_err();
        assert_eq!(error.kind, ErrorKind::Type);
    }

    #[test]
    #[should_panic(expected = "base must be within 2..=36")]
    fn base_out_of_range_panics() {
        let _ = RuleSet::<IntFamily<i64>>::new().base(37);
    }

    #[test]
    fn labels() {
        assert_eq!(IntFamily::<i8>::label(), "IntRuleSet[int8]");
        assert_eq!(IntFamily::<u64>::label(), "IntRuleSet[uint64]");
    }
}
