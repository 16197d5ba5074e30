//! Prelude module for convenient imports.
//!
//! ```rust
//! use rulechain::prelude::*;
//!
//! let ctx = ValidationContext::new();
//! let retries = int8().range(0, 10).nilable();
//!
//! let mut out: Option<i8> = Some(3);
//! retries.apply(&ctx, &Value::Null, Sink::Nullable(&mut out)).unwrap();
//! assert_eq!(out, None);
//! ```

// ============================================================================
// FOUNDATION: Rules, errors, context
// ============================================================================

pub use crate::foundation::{
    ErrorKind, Render, Rule, ValidationContext, ValidationError, ValidationErrors,
    ValidationResult, ValidationResultMulti, codes,
};

pub use rulechain_value::{Map, Value, ValueKind};

// ============================================================================
// CHAIN & OUTPUT
// ============================================================================

pub use crate::any::{DynRuleSet, WrapAny};
pub use crate::chain::{Coerced, Family, Flags, RuleSet};
pub use crate::output::{NumericSlot, Sink};
pub use crate::rounding::Rounding;

// ============================================================================
// FAMILIES: Constructors and aliases
// ============================================================================

pub use crate::families::{
    FloatRuleSet, IntRuleSet, StringRuleSet, float32, float64, int, int8, int16, int32, int64,
    string, uint, uint8, uint16, uint32, uint64,
};

// ============================================================================
// TEMPORAL-GATED: Duration and time
// ============================================================================

#[cfg(feature = "temporal")]
pub use crate::families::{DurationRuleSet, TimeRuleSet, duration, time};
#[cfg(feature = "temporal")]
pub use crate::temporal::Layout;
