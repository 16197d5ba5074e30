//! String rules
//!
//! Length is measured in Unicode scalar values (chars), not bytes.

use std::any::Any;

use regex::Regex;

use crate::foundation::{
    ErrorKind, Rule, ValidationContext, ValidationError, ValidationErrors, codes,
};

// ============================================================================
// LENGTH
// ============================================================================

/// String must have at least `min` chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinLen {
    min: usize,
}

impl MinLen {
    /// Creates the rule.
    pub const fn new(min: usize) -> Self {
        Self { min }
    }
}

impl Rule<String> for MinLen {
    fn evaluate(&self, _ctx: &ValidationContext, value: String) -> Result<String, ValidationErrors> {
        let len = value.chars().count();
        if len >= self.min {
            return Ok(value);
        }
        Err(ValidationError::new(
            ErrorKind::Rule,
            codes::MIN_LEN,
            format!("length must be at least {}", self.min),
        )
        .with_param("min", self.min.to_string())
        .with_param("actual", len.to_string())
        .into())
    }

    fn replaces(&self, other: &dyn Rule<String>) -> bool {
        other.as_any().is::<Self>()
    }

    fn describe(&self) -> Option<String> {
        Some(format!("WithMinLen({})", self.min))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// String must have at most `max` chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaxLen {
    max: usize,
}

impl MaxLen {
    /// Creates the rule.
    pub const fn new(max: usize) -> Self {
        Self { max }
    }
}

impl Rule<String> for MaxLen {
    fn evaluate(&self, _ctx: &ValidationContext, value: String) -> Result<String, ValidationErrors> {
        let len = value.chars().count();
        if len <= self.max {
            return Ok(value);
        }
        Err(ValidationError::new(
            ErrorKind::Rule,
            codes::MAX_LEN,
            format!("length must be at most {}", self.max),
        )
        .with_param("max", self.max.to_string())
        .with_param("actual", len.to_string())
        .into())
    }

    fn replaces(&self, other: &dyn Rule<String>) -> bool {
        other.as_any().is::<Self>()
    }

    fn describe(&self) -> Option<String> {
        Some(format!("WithMaxLen({})", self.max))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// PATTERN
// ============================================================================

/// String must match a regular expression. Patterns accumulate.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compiles the rule.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Wraps an already compiled expression.
    pub const fn from_regex(regex: Regex) -> Self {
        Self { regex }
    }

    /// The source expression.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Rule<String> for Pattern {
    fn evaluate(&self, _ctx: &ValidationContext, value: String) -> Result<String, ValidationErrors> {
        if self.regex.is_match(&value) {
            return Ok(value);
        }
        Err(ValidationError::new(
            ErrorKind::Pattern,
            codes::PATTERN,
            format!("value must match {}", self.regex.as_str()),
        )
        .with_param("pattern", self.regex.as_str().to_owned())
        .into())
    }

    fn describe(&self) -> Option<String> {
        Some(format!("WithPattern({:?})", self.regex.as_str()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_counts_chars() {
        let ctx = ValidationContext::new();
        assert!(MinLen::new(3).evaluate(&ctx, "héé".into()).is_ok());
        assert!(MaxLen::new(3).evaluate(&ctx, "héé".into()).is_ok());
        assert!(MaxLen::new(2).evaluate(&ctx, "héé".into()).is_err());

        let errors = MinLen::new(4).evaluate(&ctx, "abc".into()).unwrap_err();
        assert_eq!(errors.errors()[0].param("actual"), Some("3"));
    }

    #[test]
    fn test_length_rules_replace_same_kind_only() {
        assert!(MinLen::new(1).replaces(&MinLen::new(2)));
        assert!(!MinLen::new(1).replaces(&MaxLen::new(2)));
    }

    #[test]
    fn test_pattern() {
        let ctx = ValidationContext::new();
        let rule = Pattern::new(r"^[a-z]+$").unwrap();

        assert!(rule.evaluate(&ctx, "abc".into()).is_ok());
        let errors = rule.evaluate(&ctx, "ABC".into()).unwrap_err();
        assert_eq!(errors.errors()[0].kind, ErrorKind::Pattern);
        assert_eq!(rule.describe().as_deref(), Some(r#"WithPattern("^[a-z]+$")"#));
        assert!(!rule.replaces(&Pattern::new("x").unwrap()));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        assert!(Pattern::new("(").is_err());
    }
}
