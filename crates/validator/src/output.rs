//! Output binding
//!
//! A [`Sink`] names where a rule set writes the coerced value. The set of
//! supported sink shapes is closed: the exact target type, an optional target,
//! a dynamic [`Value`] container, a fixed-width numeric slot, or a string.
//!
//! ```rust
//! use rulechain::prelude::*;
//!
//! let ctx = ValidationContext::new();
//! let rules = int32().min(0);
//!
//! let mut exact = 0_i32;
//! rules.apply(&ctx, &Value::from("42"), Sink::Exact(&mut exact)).unwrap();
//! assert_eq!(exact, 42);
//!
//! let mut dynamic = Value::Null;
//! rules.apply(&ctx, &Value::from(7_u8), Sink::Dynamic(&mut dynamic)).unwrap();
//! assert_eq!(dynamic, Value::I32(7));
//! ```

use std::fmt;

use rulechain_value::{Value, ValueKind};

use crate::chain::Family;
use crate::foundation::ValidationError;

// ============================================================================
// SINK
// ============================================================================

/// Destination of a successfully coerced value.
pub enum Sink<'a, V> {
    /// Slot of the family's own value type.
    Exact(&'a mut V),
    /// Optional slot; a nilable null input stores `None`.
    Nullable(&'a mut Option<V>),
    /// Dynamic container. Holding `Null` or the family's native kind, it
    /// receives the native value; holding another concrete kind, the value is
    /// converted to that kind and written back in place.
    Dynamic(&'a mut Value),
    /// Fixed-width numeric slot of a different type than the family's.
    Numeric(NumericSlot<'a>),
    /// Text slot.
    Text(&'a mut String),
    /// Drop the value; only the validation outcome matters.
    Discard,
}

impl<V> Sink<'_, V> {
    /// Applies the null outcome of a nilable rule set.
    pub(crate) fn clear(self) {
        match self {
            Self::Nullable(slot) => *slot = None,
            Self::Dynamic(slot) => *slot = Value::Null,
            Self::Exact(_) | Self::Numeric(_) | Self::Text(_) | Self::Discard => {}
        }
    }
}

impl<V> fmt::Debug for Sink<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(_) => f.write_str("Sink::Exact"),
            Self::Nullable(_) => f.write_str("Sink::Nullable"),
            Self::Dynamic(v) => write!(f, "Sink::Dynamic({})", v.kind()),
            Self::Numeric(slot) => write!(f, "Sink::Numeric({})", slot.kind()),
            Self::Text(_) => f.write_str("Sink::Text"),
            Self::Discard => f.write_str("Sink::Discard"),
        }
    }
}

impl<'a, V> From<NumericSlot<'a>> for Sink<'a, V> {
    fn from(slot: NumericSlot<'a>) -> Self {
        Self::Numeric(slot)
    }
}

// ============================================================================
// NUMERIC SLOT
// ============================================================================

/// A mutable reference to a primitive numeric slot.
#[derive(Debug)]
pub enum NumericSlot<'a> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    F32(&'a mut f32),
    F64(&'a mut f64),
}

macro_rules! impl_slot_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl<'a> From<&'a mut $ty> for NumericSlot<'a> {
                #[inline]
                fn from(slot: &'a mut $ty) -> Self {
                    Self::$variant(slot)
                }
            }
        )+
    };
}

impl_slot_from! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

impl<'a> NumericSlot<'a> {
    /// Borrows the numeric payload of a dynamic value as a slot.
    ///
    /// Returns `None` for non-numeric variants.
    pub fn from_value(value: &'a mut Value) -> Option<Self> {
        Some(match value {
            Value::I8(v) => Self::I8(v),
            Value::I16(v) => Self::I16(v),
            Value::I32(v) => Self::I32(v),
            Value::I64(v) => Self::I64(v),
            Value::U8(v) => Self::U8(v),
            Value::U16(v) => Self::U16(v),
            Value::U32(v) => Self::U32(v),
            Value::U64(v) => Self::U64(v),
            Value::F32(v) => Self::F32(v),
            Value::F64(v) => Self::F64(v),
            _ => return None,
        })
    }

    /// The kind of value the slot holds.
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::I8(_) => ValueKind::Int8,
            Self::I16(_) => ValueKind::Int16,
            Self::I32(_) => ValueKind::Int32,
            Self::I64(_) => ValueKind::Int64,
            Self::U8(_) => ValueKind::Uint8,
            Self::U16(_) => ValueKind::Uint16,
            Self::U32(_) => ValueKind::Uint32,
            Self::U64(_) => ValueKind::Uint64,
            Self::F32(_) => ValueKind::Float32,
            Self::F64(_) => ValueKind::Float64,
        }
    }

    /// Stores an integer, narrowing with a round-trip check.
    ///
    /// Float slots receive the nearest representable value.
    pub fn store_integer(self, value: i128) -> Result<(), ValidationError> {
        let kind = self.kind();
        let overflow = || ValidationError::out_of_range(kind.name(), value);
        match self {
            Self::I8(slot) => *slot = i8::try_from(value).map_err(|_| overflow())?,
            Self::I16(slot) => *slot = i16::try_from(value).map_err(|_| overflow())?,
            Self::I32(slot) => *slot = i32::try_from(value).map_err(|_| overflow())?,
            Self::I64(slot) => *slot = i64::try_from(value).map_err(|_| overflow())?,
            Self::U8(slot) => *slot = u8::try_from(value).map_err(|_| overflow())?,
            Self::U16(slot) => *slot = u16::try_from(value).map_err(|_| overflow())?,
            Self::U32(slot) => *slot = u32::try_from(value).map_err(|_| overflow())?,
            Self::U64(slot) => *slot = u64::try_from(value).map_err(|_| overflow())?,
            Self::F32(slot) => *slot = value as f32,
            Self::F64(slot) => *slot = value as f64,
        }
        Ok(())
    }
}

// ============================================================================
// BINDING
// ============================================================================

/// The error for a sink shape a family cannot write.
pub(crate) fn unsupported_sink(family: &str, sink: ValueKind) -> ValidationError {
    ValidationError::internal(format!("cannot bind {family} into a {sink} output"))
        .with_param("family", family.to_owned())
        .with_param("sink", sink.name())
}

/// Writes a coerced, evaluated value into `sink`.
pub(crate) fn bind<F: Family>(
    settings: &F::Settings,
    value: F::Value,
    origin: &F::Origin,
    sink: Sink<'_, F::Value>,
) -> Result<(), ValidationError> {
    match sink {
        Sink::Exact(slot) => {
            *slot = value;
            Ok(())
        }
        Sink::Nullable(slot) => {
            *slot = Some(value);
            Ok(())
        }
        Sink::Discard => Ok(()),
        Sink::Numeric(slot) => F::bind_numeric(settings, &value, slot),
        Sink::Text(out) => F::bind_text(settings, &value, origin, out),
        Sink::Dynamic(slot) => bind_dynamic::<F>(settings, value, origin, slot),
    }
}

fn bind_dynamic<F: Family>(
    settings: &F::Settings,
    value: F::Value,
    origin: &F::Origin,
    slot: &mut Value,
) -> Result<(), ValidationError> {
    let held = slot.kind();
    if held == ValueKind::Null || held == F::KIND {
        *slot = F::native(value);
        return Ok(());
    }
    if let Value::String(out) = slot {
        return F::bind_text(settings, &value, origin, out);
    }
    match NumericSlot::from_value(slot) {
        Some(numeric) => F::bind_numeric(settings, &value, numeric),
        None => Err(unsupported_sink(F::NAME, held)),
    }
}
