//! The dynamic `Value` enum.
//!
//! Every input handed to a rule set is first lifted into a `Value`. The enum is
//! closed on purpose: coercion code matches on it exhaustively instead of
//! inspecting types at runtime.

use indexmap::IndexMap;

#[cfg(feature = "temporal")]
use chrono::{DateTime, FixedOffset, TimeDelta};

use crate::ValueKind;
use crate::error::{ValueError, ValueResult};

/// Ordered map used by [`Value::Object`].
pub type Map = IndexMap<String, Value>;

/// Dynamically-typed input value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null/None value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),

    F32(f32),
    F64(f64),

    /// UTF-8 text
    String(String),

    /// Signed time span with nanosecond precision
    #[cfg(feature = "temporal")]
    Duration(TimeDelta),

    /// Instant with a fixed UTC offset
    #[cfg(feature = "temporal")]
    Time(DateTime<FixedOffset>),

    /// A reference that may be nil.
    ///
    /// `Pointer(None)` is distinct from [`Value::Null`]: a nil pointer is a
    /// typed-but-absent value and is never treated as an acceptable null.
    Pointer(Option<Box<Value>>),

    /// Array of values
    Array(Vec<Value>),

    /// Object (key-value map)
    Object(Map),
}

impl Value {
    // ==================== Constructors ====================

    /// Create a null value
    pub const fn null() -> Self {
        Self::Null
    }

    /// Create a text value from String or &str
    pub fn text(v: impl Into<String>) -> Self {
        Self::String(v.into())
    }

    /// Create a pointer value; `None` produces a nil pointer
    pub fn pointer<T: Into<Value>>(target: Option<T>) -> Self {
        Self::Pointer(target.map(|v| Box::new(v.into())))
    }

    /// Create a nil pointer
    pub const fn nil_pointer() -> Self {
        Self::Pointer(None)
    }

    // ==================== Type queries ====================

    /// Get the kind of this value
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
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
            Self::String(_) => ValueKind::String,
            #[cfg(feature = "temporal")]
            Self::Duration(_) => ValueKind::Duration,
            #[cfg(feature = "temporal")]
            Self::Time(_) => ValueKind::Time,
            Self::Pointer(_) => ValueKind::Pointer,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
        }
    }

    /// Check if this is null
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this is a nil pointer
    #[inline]
    #[must_use]
    pub fn is_nil_pointer(&self) -> bool {
        matches!(self, Self::Pointer(None))
    }

    /// Returns the pointee of a non-nil pointer, or `self` otherwise.
    #[must_use]
    pub fn deref_pointer(&self) -> &Value {
        match self {
            Self::Pointer(Some(inner)) => inner.deref_pointer(),
            other => other,
        }
    }

    /// Widens any fixed-width integer variant to `i128`.
    ///
    /// Every `i8..=i64` and `u8..=u64` value fits, so this never loses data.
    #[must_use]
    pub fn as_i128(&self) -> Option<i128> {
        match *self {
            Self::I8(v) => Some(i128::from(v)),
            Self::I16(v) => Some(i128::from(v)),
            Self::I32(v) => Some(i128::from(v)),
            Self::I64(v) => Some(i128::from(v)),
            Self::U8(v) => Some(i128::from(v)),
            Self::U16(v) => Some(i128::from(v)),
            Self::U32(v) => Some(i128::from(v)),
            Self::U64(v) => Some(i128::from(v)),
            _ => None,
        }
    }

    /// Returns the string slice of a `String` value
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean of a `Bool` value
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the duration of a `Duration` value
    #[cfg(feature = "temporal")]
    #[must_use]
    pub fn as_duration(&self) -> Option<TimeDelta> {
        match self {
            Self::Duration(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the instant of a `Time` value
    #[cfg(feature = "temporal")]
    #[must_use]
    pub fn as_time(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Time(t) => Some(*t),
            _ => None,
        }
    }

    /// Extracts a string, failing with [`ValueError::TypeMismatch`].
    pub fn try_as_str(&self) -> ValueResult<&str> {
        self.as_str()
            .ok_or_else(|| ValueError::type_mismatch("string", self.kind()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_of_each_integer_width() {
        assert_eq!(Value::I8(1).kind(), ValueKind::Int8);
        assert_eq!(Value::U32(1).kind(), ValueKind::Uint32);
        assert_eq!(Value::F32(1.0).kind(), ValueKind::Float32);
        assert_eq!(Value::text("x").kind(), ValueKind::String);
    }

    #[test]
    fn integer_widening_is_lossless() {
        assert_eq!(Value::U64(u64::MAX).as_i128(), Some(i128::from(u64::MAX)));
        assert_eq!(Value::I8(-128).as_i128(), Some(-128));
        assert_eq!(Value::F64(1.0).as_i128(), None);
    }

    #[test]
    fn pointers_deref_to_target() {
        let p = Value::pointer(Some(42_i64));
        assert_eq!(p.kind(), ValueKind::Pointer);
        assert_eq!(p.deref_pointer(), &Value::I64(42));

        let nil = Value::pointer::<i64>(None);
        assert!(nil.is_nil_pointer());
        assert!(!nil.is_null());
        assert_eq!(nil.deref_pointer(), &Value::Pointer(None));
    }

    #[test]
    fn try_as_str_reports_actual_kind() {
        let err = Value::Bool(true).try_as_str().unwrap_err();
        assert_eq!(err, ValueError::type_mismatch("string", ValueKind::Bool));
    }
}
