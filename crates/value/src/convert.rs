//! Conversions into [`Value`].
//!
//! Native Rust scalars map one-to-one onto their variant. With the `serde`
//! feature, `serde_json::Value` converts too: JSON integers become `I64`
//! (or `U64` above `i64::MAX`), other numbers become `F64`.

use crate::value::{Map, Value};

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )+
    };
}

impl_from_scalar! {
    bool => Bool,
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
    String => String,
}

#[cfg(feature = "temporal")]
impl_from_scalar! {
    chrono::TimeDelta => Duration,
    chrono::DateTime<chrono::FixedOffset> => Time,
}

impl From<&str> for Value {
    #[inline]
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

#[cfg(feature = "temporal")]
impl From<chrono::DateTime<chrono::Utc>> for Value {
    #[inline]
    fn from(v: chrono::DateTime<chrono::Utc>) -> Self {
        Self::Time(v.fixed_offset())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Self::Object(map)
    }
}

// ============================================================================
// SERDE JSON VALUE CONVERSIONS
// ============================================================================

#[cfg(feature = "serde")]
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => number_to_value(&n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Self::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(feature = "serde")]
impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        Self::from(json.clone())
    }
}

#[cfg(feature = "serde")]
fn number_to_value(n: &serde_json::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::I64(i)
    } else if let Some(u) = n.as_u64() {
        Value::U64(u)
    } else {
        // serde_json without arbitrary_precision always has an f64 form
        Value::F64(n.as_f64().unwrap_or(f64::NAN))
    }
}
