//! Foundation types shared by every value family
//!
//! - **Traits**: [`Rule`], [`Render`]
//! - **Errors**: [`ValidationError`], [`ValidationErrors`], [`ErrorKind`]
//! - **Context**: [`ValidationContext`]
//!
//! Rules are small immutable values. A rule set owns them behind `Arc`s and
//! evaluates them in sequence, collecting every error instead of stopping at
//! the first one:
//!
//! ```rust
//! use rulechain::prelude::*;
//!
//! let rules = int().min(10).rejected_values([5]);
//! let errors = rules.validate(&ValidationContext::new(), &Value::from(5_i64)).unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

pub mod context;
pub mod error;
pub mod traits;

pub use context::ValidationContext;
pub use error::{ErrorKind, ValidationError, ValidationErrors, codes};
pub use traits::{RENDER_LIST_LIMIT, Render, Rule, render_list};

/// A validation result using the standard `ValidationError`.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A validation result that can contain multiple errors.
pub type ValidationResultMulti<T> = Result<T, ValidationErrors>;
