//! Validation context
//!
//! The context travels alongside every evaluation. It carries the field path
//! used to locate violations, a small typed key-value store for custom rules,
//! and the clock relative-time rules compare against.
//!
//! # Examples
//!
//! ```rust
//! use rulechain::foundation::ValidationContext;
//!
//! let mut ctx = ValidationContext::new();
//! ctx.push_field("user");
//! ctx.push_field("age");
//! ctx.insert("max_age", 120_i64);
//!
//! assert_eq!(ctx.field_path(), "user.age");
//! assert_eq!(ctx.get::<i64>("max_age"), Some(&120));
//! ```

use std::any::Any;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

#[cfg(feature = "temporal")]
use chrono::{DateTime, FixedOffset, Utc};

/// Context for validation operations.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    /// Named values accessible during validation.
    data: HashMap<String, Arc<dyn Any + Send + Sync>>,

    /// Current field path for nested validation.
    path: Vec<Cow<'static, str>>,

    /// Pinned wall-clock reading; `None` means "read the system clock".
    #[cfg(feature = "temporal")]
    now: Option<DateTime<FixedOffset>>,
}

impl ValidationContext {
    /// Creates a new empty validation context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value to the context.
    pub fn insert<T: Send + Sync + 'static>(&mut self, key: impl Into<String>, value: T) {
        self.data.insert(key.into(), Arc::new(value));
    }

    /// Gets a value from the context.
    #[must_use]
    pub fn get<T: 'static>(&self, key: &str) -> Option<&T> {
        self.data.get(key).and_then(|v| v.downcast_ref::<T>())
    }

    /// Checks if a key exists in the context.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Pushes a field name onto the path.
    pub fn push_field(&mut self, field: impl Into<Cow<'static, str>>) {
        self.path.push(field.into());
    }

    /// Pops a field from the path.
    pub fn pop_field(&mut self) -> Option<Cow<'static, str>> {
        self.path.pop()
    }

    /// Returns a copy of this context descended into `field`.
    #[must_use]
    pub fn with_field(&self, field: impl Into<Cow<'static, str>>) -> Self {
        let mut child = self.clone();
        child.push_field(field);
        child
    }

    /// Gets the current field path as a dot-separated string.
    #[must_use]
    pub fn field_path(&self) -> String {
        self.path.join(".")
    }

    /// Pins the clock used by relative-time rules.
    #[cfg(feature = "temporal")]
    #[must_use]
    pub fn with_now(mut self, now: DateTime<FixedOffset>) -> Self {
        self.now = Some(now);
        self
    }

    /// The instant relative-time rules compare against.
    #[cfg(feature = "temporal")]
    #[must_use]
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.now.unwrap_or_else(|| Utc::now().fixed_offset())
    }

    /// Freezes the clock for the duration of one evaluation.
    ///
    /// Every rule evaluated within a single call must observe the same "now";
    /// separate calls read the clock again.
    #[cfg(feature = "temporal")]
    #[must_use]
    pub fn snapshot(&self) -> Cow<'_, Self> {
        match self.now {
            Some(_) => Cow::Borrowed(self),
            None => Cow::Owned(self.clone().with_now(self.now())),
        }
    }

    /// Freezes the clock for the duration of one evaluation.
    #[cfg(not(feature = "temporal"))]
    #[must_use]
    pub fn snapshot(&self) -> Cow<'_, Self> {
        Cow::Borrowed(self)
    }
}
