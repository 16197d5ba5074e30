//! Value kinds.
//!
//! `ValueKind` is a lightweight classification of [`Value`](crate::Value)
//! used by coercion tables and error messages.
//!
//! ```rust
//! use rulechain_value::{Value, ValueKind};
//!
//! let v = Value::from(3.5_f64);
//! assert_eq!(v.kind(), ValueKind::Float64);
//! assert!(ValueKind::Float64.is_float());
//! assert_eq!(ValueKind::Uint8.name(), "uint8");
//! ```

use core::fmt::{Display, Formatter};

/// Represents the kind/type of a [`Value`](crate::Value).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueKind {
    Null,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
    Duration,
    Time,
    Pointer,
    Array,
    Object,
}

impl ValueKind {
    /// Check if this kind is a fixed-width integer
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Uint8
                | Self::Uint16
                | Self::Uint32
                | Self::Uint64
        )
    }

    /// Check if this kind is a floating point number
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Check if this kind is numeric (integer or float)
    pub const fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Check if this kind is temporal
    pub const fn is_temporal(&self) -> bool {
        matches!(self, Self::Duration | Self::Time)
    }

    /// Check if this kind is a collection
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }

    /// Get a descriptive name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::Duration => "duration",
            Self::Time => "time",
            Self::Pointer => "pointer",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_classification() {
        assert!(ValueKind::Int8.is_integer());
        assert!(ValueKind::Uint64.is_numeric());
        assert!(!ValueKind::Float32.is_integer());
        assert!(ValueKind::Float32.is_numeric());
        assert!(!ValueKind::String.is_numeric());
    }

    #[test]
    fn temporal_and_collections() {
        assert!(ValueKind::Duration.is_temporal());
        assert!(ValueKind::Time.is_temporal());
        assert!(ValueKind::Object.is_collection());
        assert!(!ValueKind::Pointer.is_collection());
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(ValueKind::Uint16.to_string(), "uint16");
        assert_eq!(ValueKind::Null.to_string(), "null");
    }
}
