//! Duration family
//!
//! Integers are scaled by the configured unit (default one nanosecond);
//! strings use the compact syntax of [`parse_duration`].
//!
//! Writing a duration into a numeric output divides it by the unit. The
//! remainder is resolved with the rounding policy by magnitude (`Up` away
//! from zero, `Down` toward zero); without a policy an inexact quotient is
//! out of range.
//!
//! ```rust
//! use chrono::TimeDelta;
//! use rulechain::prelude::*;
//!
//! let ctx = ValidationContext::new();
//! let rules = duration().unit(TimeDelta::seconds(1));
//!
//! let mut seconds = 0_i64;
//! assert!(rules.apply(&ctx, &Value::from("5.5s"), Sink::Numeric((&mut seconds).into())).is_err());
//!
//! let mut exact = TimeDelta::zero();
//! rules.apply(&ctx, &Value::from("5.5s"), Sink::Exact(&mut exact)).unwrap();
//! assert_eq!(exact, TimeDelta::milliseconds(5_500));
//! ```

use std::borrow::Cow;

use chrono::TimeDelta;
use rulechain_value::{Value, ValueKind};

use crate::chain::{Coerced, Family, RuleSet, Tag};
use crate::foundation::{ErrorKind, ValidationError, codes};
use crate::output::NumericSlot;
use crate::rounding::{Rounding, round_quotient};
use crate::temporal::{DurationSyntaxError, format_duration, from_nanos, parse_duration, total_nanos};

/// Settings of a duration rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationSettings {
    /// Scale of integer input and numeric output.
    pub unit: TimeDelta,
    /// Remainder policy for numeric output.
    pub rounding: Rounding,
}

impl Default for DurationSettings {
    fn default() -> Self {
        Self {
            unit: TimeDelta::nanoseconds(1),
            rounding: Rounding::None,
        }
    }
}

/// The duration family.
#[derive(Debug)]
pub struct DurationFamily;

/// Rule set producing a [`TimeDelta`].
pub type DurationRuleSet = RuleSet<DurationFamily>;

impl Family for DurationFamily {
    type Value = TimeDelta;
    type Settings = DurationSettings;
    type Origin = ();

    const KIND: ValueKind = ValueKind::Duration;
    const NAME: &'static str = "duration";

    fn label() -> Cow<'static, str> {
        Cow::Borrowed("DurationRuleSet")
    }

    fn coerce(
        settings: &DurationSettings,
        strict: bool,
        input: &Value,
    ) -> Result<Coerced<TimeDelta>, ValidationError> {
        if let Value::Duration(d) = input {
            return Ok(Coerced::new(*d));
        }
        if strict {
            return Err(ValidationError::type_mismatch(Self::NAME, input.kind()));
        }

        let value = match input {
            Value::String(src) => parse_duration(src).map_err(|error| match error {
                DurationSyntaxError::Malformed => ValidationError::pattern(Self::NAME, src),
                DurationSyntaxError::Overflow => ValidationError::out_of_range(Self::NAME, src),
            })?,
            other => {
                let Some(count) = other.as_i128() else {
                    return Err(ValidationError::type_mismatch(Self::NAME, other.kind()));
                };
                count
                    .checked_mul(total_nanos(settings.unit))
                    .and_then(from_nanos)
                    .ok_or_else(|| ValidationError::out_of_range(Self::NAME, count))?
            }
        };
        Ok(Coerced::new(value))
    }

    fn native(value: TimeDelta) -> Value {
        Value::Duration(value)
    }

    fn bind_numeric(
        settings: &DurationSettings,
        value: &TimeDelta,
        slot: NumericSlot<'_>,
    ) -> Result<(), ValidationError> {
        let nanos = total_nanos(*value);
        let unit = total_nanos(settings.unit);
        let quotient = round_quotient(nanos, unit, settings.rounding).ok_or_else(|| {
            ValidationError::new(
                ErrorKind::Range,
                codes::RANGE,
                format!(
                    "{} is not a whole number of {}",
                    format_duration(*value),
                    format_duration(settings.unit)
                ),
            )
            .with_param("unit", format_duration(settings.unit))
            .with_param("actual", format_duration(*value))
        })?;
        slot.store_integer(quotient)
    }

    fn bind_text(
        _settings: &DurationSettings,
        value: &TimeDelta,
        _origin: &(),
        out: &mut String,
    ) -> Result<(), ValidationError> {
        *out = format_duration(*value);
        Ok(())
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

impl RuleSet<DurationFamily> {
    /// Scale of integer input and numeric output.
    ///
    /// # Panics
    ///
    /// Panics if `unit` is not positive.
    pub fn unit(&self, unit: TimeDelta) -> Self {
        assert!(
            unit > TimeDelta::zero(),
            "unit must be positive, got {}",
            format_duration(unit)
        );
        self.with_modifier(
            Tag::Unit,
            format!("WithUnit({})", format_duration(unit)),
            move |_, settings| settings.unit = unit,
        )
    }

    /// Remainder policy when writing into a numeric output.
    pub fn rounding(&self, rounding: Rounding) -> Self {
        self.with_modifier(
            Tag::Rounding,
            format!("WithRounding({rounding})"),
            move |_, settings| settings.rounding = rounding,
        )
    }
}
