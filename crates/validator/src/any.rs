//! Type-erased rule sets
//!
//! [`DynRuleSet`] is the object-safe face of every [`RuleSet`]: it reads and
//! writes [`Value`]s only. [`WrapAny`] is a cheap handle around one, useful
//! where rule sets of different families live side by side (struct fields,
//! maps of named rules).
//!
//! ```rust
//! use rulechain::prelude::*;
//!
//! let fields: Vec<(&str, WrapAny)> = vec![
//!     ("port", uint16().min(1).wrap_any()),
//!     ("name", string().min_len(1).wrap_any().required()),
//! ];
//!
//! let ctx = ValidationContext::new();
//! let mut port = Value::Null;
//! fields[0].1.apply(&ctx, &Value::from("8080"), &mut port).unwrap();
//! assert_eq!(port, Value::U16(8080));
//! assert!(fields[1].1.is_required());
//! ```

use std::fmt;
use std::sync::Arc;

use rulechain_value::Value;

use crate::chain::{Family, RuleSet};
use crate::foundation::{ValidationContext, ValidationErrors};
use crate::output::Sink;

/// Object-safe view of a rule set.
pub trait DynRuleSet: Send + Sync {
    /// Applies the rule set, binding into a dynamic container.
    fn apply_value(
        &self,
        ctx: &ValidationContext,
        input: &Value,
        out: &mut Value,
    ) -> Result<(), ValidationErrors>;

    /// Whether the enclosing structure must supply the value.
    fn is_required(&self) -> bool;

    /// The debug string of the underlying chain.
    fn describe(&self) -> String;

    /// The same rule set with the required flag appended.
    fn with_required(&self) -> Arc<dyn DynRuleSet>;
}

impl<F: Family> DynRuleSet for RuleSet<F> {
    fn apply_value(
        &self,
        ctx: &ValidationContext,
        input: &Value,
        out: &mut Value,
    ) -> Result<(), ValidationErrors> {
        self.apply(ctx, input, Sink::Dynamic(out))
    }

    fn is_required(&self) -> bool {
        RuleSet::is_required(self)
    }

    fn describe(&self) -> String {
        RuleSet::describe(self)
    }

    fn with_required(&self) -> Arc<dyn DynRuleSet> {
        Arc::new(self.required())
    }
}

impl<F: Family> RuleSet<F> {
    /// Erases the family, keeping only the dynamic interface.
    pub fn wrap_any(&self) -> WrapAny {
        WrapAny::new(Arc::new(self.clone()))
    }
}

/// A shareable handle to any rule set.
#[derive(Clone)]
pub struct WrapAny {
    inner: Arc<dyn DynRuleSet>,
}

impl WrapAny {
    /// Wraps an erased rule set.
    pub fn new(inner: Arc<dyn DynRuleSet>) -> Self {
        Self { inner }
    }

    /// Applies the wrapped rule set, binding into `out`.
    pub fn apply(
        &self,
        ctx: &ValidationContext,
        input: &Value,
        out: &mut Value,
    ) -> Result<(), ValidationErrors> {
        self.inner.apply_value(ctx, input, out)
    }

    /// Applies the wrapped rule set and drops the value.
    pub fn validate(&self, ctx: &ValidationContext, input: &Value) -> Result<(), ValidationErrors> {
        let mut scratch = Value::Null;
        self.inner.apply_value(ctx, input, &mut scratch)
    }

    pub fn is_required(&self) -> bool {
        self.inner.is_required()
    }

    pub fn describe(&self) -> String {
        self.inner.describe()
    }

    /// A new handle whose rule set carries the required flag.
    pub fn required(&self) -> Self {
        Self::new(self.inner.with_required())
    }
}

impl DynRuleSet for WrapAny {
    fn apply_value(
        &self,
        ctx: &ValidationContext,
        input: &Value,
        out: &mut Value,
    ) -> Result<(), ValidationErrors> {
        self.inner.apply_value(ctx, input, out)
    }

    fn is_required(&self) -> bool {
        self.inner.is_required()
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }

    fn with_required(&self) -> Arc<dyn DynRuleSet> {
        self.inner.with_required()
    }
}

impl fmt::Display for WrapAny {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.describe())
    }
}

impl fmt::Debug for WrapAny {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WrapAny").field(&self.inner.describe()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::{int, string};
    use crate::foundation::ErrorKind;

    #[test]
    fn forwards_describe_and_required() {
        let rules = int().min(3).required();
        let wrapped = rules.wrap_any();
        assert_eq!(wrapped.describe(), rules.describe());
        assert_eq!(wrapped.to_string(), "IntRuleSet[int64].WithMin(3).WithRequired()");
        assert!(wrapped.is_required());
    }

    #[test]
    fn required_appends_to_the_wrapped_chain() {
        let wrapped = string().wrap_any();
        assert!(!wrapped.is_required());

        let required = wrapped.required();
        assert!(required.is_required());
        assert_eq!(required.describe(), "StringRuleSet.WithRequired()");
        assert!(!wrapped.is_required());
    }

    #[test]
    fn apply_writes_the_native_value() {
        let ctx = ValidationContext::new();
        let wrapped = int().wrap_any();
        let mut out = Value::Null;
        wrapped.apply(&ctx, &Value::from("12"), &mut out).unwrap();
        assert_eq!(out, Value::I64(12));
    }

    #[test]
    fn validate_reports_rule_errors() {
        let ctx = ValidationContext::new();
        let wrapped = int().max(5).wrap_any();
        let errors = wrapped.validate(&ctx, &Value::from(9_i64)).unwrap_err();
        assert_eq!(errors.errors()[0].kind, ErrorKind::Range);
    }

    #[test]
    fn wrappers_nest() {
        let inner = int().min(1).wrap_any();
        let outer = WrapAny::new(Arc::new(inner.clone()));
        assert_eq!(outer.describe(), inner.describe());
    }
}
