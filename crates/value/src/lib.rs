#![cfg_attr(docsrs, feature(doc_cfg))]
//! # rulechain-value
//!
//! The dynamic input model consumed by `rulechain` rule sets.
//!
//! A [`Value`] is produced once at the boundary (from native Rust values or
//! from `serde_json::Value`) and then dispatched on exhaustively by the
//! coercion engine.
//!
//! ```rust
//! use rulechain_value::{Value, ValueKind};
//!
//! let v = Value::from(42_u8);
//! assert_eq!(v.kind(), ValueKind::Uint8);
//! assert_eq!(v.as_i128(), Some(42));
//! ```

mod convert;
pub mod error;
pub mod kind;
pub mod value;

pub use error::{ValueError, ValueResult};
pub use kind::ValueKind;
pub use value::{Map, Value};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{Map, Value, ValueError, ValueKind, ValueResult};
}
