//! Float families
//!
//! Every conversion is checked by converting back: a float64 that does not
//! survive narrowing to float32, or an integer with no exact float
//! representation, is out of range. The rounding policy applies to the
//! coerced value regardless of its source.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use rulechain_value::{Value, ValueKind};

use crate::chain::{Coerced, Family, RuleSet, Tag};
use crate::foundation::{Render, ValidationError};
use crate::macros::impl_float;
use crate::output::{NumericSlot, unsupported_sink};
use crate::rounding::{Rounding, round_float};

mod sealed {
    pub trait Sealed {}
}

/// Floating point types a rule set can target.
///
/// This trait is sealed and cannot be implemented outside this crate.
pub trait Float:
    sealed::Sealed + Copy + PartialOrd + Render + fmt::Display + FromStr + Send + Sync + 'static
{
    /// Type name used in messages and labels.
    const NAME: &'static str;
    /// The matching dynamic kind.
    const KIND: ValueKind;

    /// Extracts the value from its own variant.
    fn from_native(value: &Value) -> Option<Self>;
    /// Wraps the value in its own variant.
    fn into_native(self) -> Value;
    /// Narrows from `f64`, rounding to the nearest representable value.
    fn from_f64(value: f64) -> Self;
    /// Widens to `f64` without loss.
    fn to_f64(self) -> f64;
    /// Converts an integer to the nearest representable value.
    fn from_i128(value: i128) -> Self;
    /// Saturating conversion back to the integer domain.
    fn to_i128(self) -> i128;
    /// Borrows a slot of exactly this type.
    fn take_slot<'a>(slot: NumericSlot<'a>) -> Option<&'a mut Self>;
}

impl_float! {
    f32 => F32, Float32, "float32";
    f64 => F64, Float64, "float64";
}

// ============================================================================
// FAMILY
// ============================================================================

/// Settings of a float rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatSettings {
    pub rounding: Rounding,
    /// Decimal places kept by `rounding`.
    pub precision: i32,
}

/// The float family targeting `T`.
#[derive(Debug)]
pub struct FloatFamily<T>(PhantomData<fn() -> T>);

/// Rule set producing a `T` float.
pub type FloatRuleSet<T> = RuleSet<FloatFamily<T>>;

fn narrow<T: Float>(value: f64) -> Result<T, ValidationError> {
    let narrowed = T::from_f64(value);
    if value.is_nan() || narrowed.to_f64() == value {
        Ok(narrowed)
    } else {
        Err(ValidationError::out_of_range(T::NAME, value))
    }
}

fn parse_float<T: Float>(src: &str) -> Result<T, ValidationError> {
    let parsed: T = src
        .parse()
        .map_err(|_| ValidationError::unparsable(T::NAME, src))?;
    let literal_infinity = src
        .trim_start_matches(['+', '-'])
        .get(..3)
        .is_some_and(|head| head.eq_ignore_ascii_case("inf"));
    if parsed.to_f64().is_infinite() && !literal_infinity {
        return Err(ValidationError::out_of_range(T::NAME, src));
    }
    Ok(parsed)
}

impl<T: Float> Family for FloatFamily<T> {
    type Value = T;
    type Settings = FloatSettings;
    type Origin = ();

    const KIND: ValueKind = T::KIND;
    const NAME: &'static str = T::NAME;

    fn label() -> Cow<'static, str> {
        Cow::Owned(format!("FloatRuleSet[{}]", T::NAME))
    }

    fn coerce(
        settings: &FloatSettings,
        strict: bool,
        input: &Value,
    ) -> Result<Coerced<T>, ValidationError> {
        let value = match T::from_native(input) {
            Some(value) => value,
            None if strict => return Err(ValidationError::type_mismatch(T::NAME, input.kind())),
            None => match input {
                Value::F32(v) => narrow(f64::from(*v))?,
                Value::F64(v) => narrow(*v)?,
                Value::String(src) => parse_float(src)?,
                other => {
                    let Some(wide) = other.as_i128() else {
                        return Err(ValidationError::type_mismatch(T::NAME, other.kind()));
                    };
                    let converted = T::from_i128(wide);
                    if converted.to_i128() != wide {
                        return Err(ValidationError::out_of_range(T::NAME, wide));
                    }
                    converted
                }
            },
        };

        let value = match settings.rounding {
            Rounding::None => value,
            policy => T::from_f64(round_float(value.to_f64(), settings.precision, policy)),
        };
        Ok(Coerced::new(value))
    }

    fn native(value: T) -> Value {
        value.into_native()
    }

    fn bind_numeric(
        _settings: &FloatSettings,
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

impl<T: Float> RuleSet<FloatFamily<T>> {
    /// Rounds every coerced value to `precision` decimal places.
    pub fn rounding(&self, rounding: Rounding, precision: i32) -> Self {
        self.with_modifier(
            Tag::Rounding,
            format!("WithRounding({rounding}, {precision})"),
            move |_, settings| {
                settings.rounding = rounding;
                settings.precision = precision;
            },
        )
    }
}
