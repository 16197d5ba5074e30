//! Built-in rules
//!
//! - **Bounds**: [`Min`], [`Max`], [`MinExclusive`], [`MaxExclusive`]
//! - **Value sets**: [`AllowedValues`], [`RejectedValues`] (cumulative)
//! - **Strings**: [`MinLen`], [`MaxLen`], [`Pattern`]
//! - **Relative time**: [`MinDiff`], [`MaxDiff`]
//! - **Closures**: [`RuleFn`]

mod custom;
mod range;
#[cfg(feature = "temporal")]
mod relative;
mod string;
mod values;

pub use custom::RuleFn;
pub use range::{Max, MaxExclusive, Min, MinExclusive};
#[cfg(feature = "temporal")]
pub use relative::{MaxDiff, MinDiff};
pub use string::{MaxLen, MinLen, Pattern};
pub use values::{AllowedValues, RejectedValues};
