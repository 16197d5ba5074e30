#![cfg_attr(docsrs, feature(doc_cfg))]
//! # rulechain
//!
//! Immutable rule-set chains for typed value coercion and validation.
//!
//! A rule set targets one value family (fixed-width integers, floats,
//! strings, durations, times). It coerces a dynamic [`Value`] into that
//! family, runs every rule in its chain, and binds the result into a caller
//! supplied [`Sink`](output::Sink).
//!
//! ## Quick Start
//!
//! ```rust
//! use rulechain::prelude::*;
//!
//! let ctx = ValidationContext::new();
//! let port = uint16().min(1024).rejected_values([8080]);
//!
//! let mut out = 0_u16;
//! port.apply(&ctx, &Value::from("9000"), Sink::Exact(&mut out)).unwrap();
//! assert_eq!(out, 9000);
//!
//! let errors = port.validate(&ctx, &Value::from(80_i64)).unwrap_err();
//! assert_eq!(errors.codes(), vec!["min"]);
//! ```
//!
//! ## Chains
//!
//! Builder methods never mutate. Each returns a new handle that shares every
//! surviving ancestor with the one it was built from, so rule sets are cheap
//! to clone and safe to share across threads. See [`chain`].
//!
//! ## Built-in Rules
//!
//! - **Bounds**: `min`, `max`, `min_exclusive`, `max_exclusive`, `range`
//! - **Value sets**: `allowed_values`, `rejected_values`
//! - **Strings**: `min_len`, `max_len`, `pattern`
//! - **Relative time**: `min_diff`, `max_diff`
//! - **Closures**: `rule_fn`, or any [`Rule`](foundation::Rule) via `custom_rule`

// ValidationError carries params and a field path; boxing it would add an
// allocation to every failed rule.
#![allow(clippy::result_large_err)]

pub mod any;
pub mod chain;
pub mod families;
pub mod foundation;
mod macros;
pub mod output;
pub mod prelude;
pub mod rounding;
pub mod rules;
#[cfg(feature = "temporal")]
pub mod temporal;

pub use rulechain_value::{Map, Value, ValueKind};
