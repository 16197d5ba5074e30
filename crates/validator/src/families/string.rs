//! String family
//!
//! Outside strict mode, booleans and numbers are accepted and formatted with
//! their `Display` representation.

use std::borrow::Cow;
use std::sync::Arc;

use rulechain_value::{Value, ValueKind};

use crate::chain::{Coerced, Family, RuleSet};
use crate::foundation::ValidationError;
use crate::rules::{MaxLen, MinLen, Pattern};

/// The string family.
#[derive(Debug)]
pub struct StringFamily;

/// Rule set producing a [`String`].
pub type StringRuleSet = RuleSet<StringFamily>;

impl Family for StringFamily {
    type Value = String;
    type Settings = ();
    type Origin = ();

    const KIND: ValueKind = ValueKind::String;
    const NAME: &'static str = "string";

    fn label() -> Cow<'static, str> {
        Cow::Borrowed("StringRuleSet")
    }

    fn coerce(_settings: &(), strict: bool, input: &Value) -> Result<Coerced<String>, ValidationError> {
        let text = match input {
            Value::String(s) => s.clone(),
            other if strict => return Err(ValidationError::type_mismatch(Self::NAME, other.kind())),
            Value::Bool(b) => b.to_string(),
            Value::F32(v) => v.to_string(),
            Value::F64(v) => v.to_string(),
            other => match other.as_i128() {
                Some(n) => n.to_string(),
                None => return Err(ValidationError::type_mismatch(Self::NAME, other.kind())),
            },
        };
        Ok(Coerced::new(text))
    }

    fn native(value: String) -> Value {
        Value::String(value)
    }

    fn bind_text(
        _settings: &(),
        value: &String,
        _origin: &(),
        out: &mut String,
    ) -> Result<(), ValidationError> {
        out.clone_from(value);
        Ok(())
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

impl RuleSet<StringFamily> {
    /// At least `min` characters.
    pub fn min_len(&self, min: usize) -> Self {
        self.with_rule(Arc::new(MinLen::new(min)))
    }

    /// At most `max` characters.
    pub fn max_len(&self, max: usize) -> Self {
        self.with_rule(Arc::new(MaxLen::new(max)))
    }

    /// Must match `pattern`.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regular expression. Use
    /// [`try_pattern`](Self::try_pattern) for patterns built at runtime.
    pub fn pattern(&self, pattern: &str) -> Self {
        match self.try_pattern(pattern) {
            Ok(rules) => rules,
            Err(error) => panic!("invalid pattern {pattern:?}: {error}"),
        }
    }

    /// Fallible form of [`pattern`](Self::pattern).
    pub fn try_pattern(&self, pattern: &str) -> Result<Self, regex::Error> {
        Ok(self.with_rule(Arc::new(Pattern::new(pattern)?)))
    }
}
