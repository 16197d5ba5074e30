//! Error types for validation failures
//!
//! This module provides a structured error type with a coarse [`ErrorKind`],
//! a stable string code, a field path and ordered parameters.
//!
//! All string fields use `Cow<'static, str>` for zero-allocation in the
//! common case of static error codes and messages.

use std::borrow::Cow;
use std::fmt;

use rulechain_value::ValueKind;

// ============================================================================
// ERROR KIND & CODES
// ============================================================================

/// Coarse classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ErrorKind {
    /// The input's type cannot be coerced, or strict mode rejected it.
    Type,
    /// The input (or a bound check on it) falls outside the allowed range.
    Range,
    /// A string is syntactically malformed for the expected grammar.
    Pattern,
    /// A rule in the chain rejected the coerced value.
    Rule,
    /// The caller asked for something the library cannot do (e.g. an
    /// unsupported output sink). Indicates a defect, not bad input.
    Internal,
}

impl ErrorKind {
    /// Get a descriptive name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Range => "range",
            Self::Pattern => "pattern",
            Self::Rule => "rule",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stable error codes for programmatic handling and i18n.
pub mod codes {
    pub const TYPE: &str = "type";
    pub const RANGE: &str = "range";
    pub const PATTERN: &str = "pattern";
    pub const NULL: &str = "null";
    pub const MIN: &str = "min";
    pub const MAX: &str = "max";
    pub const MIN_EXCLUSIVE: &str = "min_exclusive";
    pub const MAX_EXCLUSIVE: &str = "max_exclusive";
    pub const NOT_ALLOWED: &str = "not_allowed";
    pub const FORBIDDEN: &str = "forbidden";
    pub const MIN_LEN: &str = "min_len";
    pub const MAX_LEN: &str = "max_len";
    pub const MIN_DIFF: &str = "min_diff";
    pub const MAX_DIFF: &str = "max_diff";
    pub const CUSTOM: &str = "custom";
    pub const INTERNAL: &str = "internal";
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single reason a value failed validation.
///
/// # Examples
///
/// ```rust
/// use rulechain::foundation::{ErrorKind, ValidationError, codes};
///
/// let error = ValidationError::new(ErrorKind::Range, codes::MIN, "value must be at least 3")
///     .with_field("age")
///     .with_param("min", "3")
///     .with_param("actual", "2");
///
/// assert_eq!(error.param("min"), Some("3"));
/// assert_eq!(error.to_string(), "[age] min: value must be at least 3 (params: [min=3, actual=2])");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Coarse classification.
    pub kind: ErrorKind,

    /// Error code, see [`codes`].
    pub code: Cow<'static, str>,

    /// Human-readable error message in English.
    pub message: Cow<'static, str>,

    /// Optional field path for nested validation.
    ///
    /// Examples: "user.email", "items[0].price"
    pub field: Option<Cow<'static, str>>,

    /// Parameters for the error message template.
    ///
    /// Stored as ordered key-value pairs (typically 0-3 params).
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,

    /// Nested validation errors, used when collapsing a collection into one error.
    pub nested: Vec<ValidationError>,
}

impl ValidationError {
    /// Creates a new validation error with a kind, code and message.
    pub fn new(
        kind: ErrorKind,
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            field: None,
            params: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Sets the field path for this error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Adds nested validation errors.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested(mut self, errors: Vec<ValidationError>) -> Self {
        self.nested = errors;
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Returns true when the error carries the given code.
    #[must_use]
    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    /// Converts the error to a JSON structure.
    #[cfg(feature = "serde")]
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::json;

        let params: serde_json::Map<String, serde_json::Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();

        json!({
            "kind": self.kind.name(),
            "code": self.code,
            "message": self.message,
            "field": self.field,
            "params": params,
            "nested": self.nested.iter().map(ValidationError::to_json_value).collect::<Vec<_>>(),
        })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.code, self.message)?;
        } else {
            write!(f, "{}: {}", self.code, self.message)?;
        }

        if !self.params.is_empty() {
            write!(f, " (params: [")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, "])")?;
        }

        if !self.nested.is_empty() {
            write!(f, "\n  Nested errors:")?;
            for (i, error) in self.nested.iter().enumerate() {
                write!(f, "\n    {}. {}", i + 1, error)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// The input's kind cannot be coerced into `target`.
    pub fn type_mismatch(target: &'static str, actual: ValueKind) -> Self {
        Self::new(
            ErrorKind::Type,
            codes::TYPE,
            format!("cannot coerce {actual} to {target}"),
        )
        .with_param("expected", target)
        .with_param("actual", actual.name())
    }

    /// A string could not be parsed as `target`.
    pub fn unparsable(target: &'static str, input: &str) -> Self {
        Self::new(
            ErrorKind::Type,
            codes::TYPE,
            format!("cannot convert string to {target}"),
        )
        .with_param("expected", target)
        .with_param("input", input.to_owned())
    }

    /// The value does not fit into `target` without loss.
    pub fn out_of_range(target: &'static str, value: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::Range,
            codes::RANGE,
            format!("{value} is out of range for {target}"),
        )
        .with_param("target", target)
        .with_param("actual", value.to_string())
    }

    /// A string is malformed for the grammar named by `expected`.
    pub fn pattern(expected: &'static str, input: &str) -> Self {
        Self::new(
            ErrorKind::Pattern,
            codes::PATTERN,
            format!("malformed {expected}: {input:?}"),
        )
        .with_param("expected", expected)
        .with_param("input", input.to_owned())
    }

    /// A null input reached a rule set that is not nilable.
    pub fn null() -> Self {
        Self::new(ErrorKind::Type, codes::NULL, "value cannot be null")
    }

    /// A defect in how the library was called.
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Internal, codes::INTERNAL, message)
    }

    /// A custom rule failure.
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Rule, codes::CUSTOM, message)
    }
}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// An ordered, duplicate-permitting collection of validation errors.
///
/// This is what a rule set returns when a value fails: every independent
/// violation found in a single pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates a new empty error collection.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds an error to the collection.
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Appends every error of `other`, preserving order.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all errors.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Iterates over the errors in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Returns the codes of all errors, in order.
    #[must_use]
    pub fn codes(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.code.as_ref()).collect()
    }

    /// Sets the field path on every error that has none.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: &str) -> Self {
        if field.is_empty() {
            return self;
        }
        for error in &mut self.errors {
            if error.field.is_none() {
                error.field = Some(Cow::Owned(field.to_owned()));
            }
        }
        self
    }

    /// Converts to a single error with nested errors.
    pub fn into_single_error(self, message: impl Into<Cow<'static, str>>) -> ValidationError {
        let kind = self
            .errors
            .first()
            .map_or(ErrorKind::Rule, |first| first.kind);
        ValidationError::new(kind, "validation_errors", message).with_nested(self.errors)
    }

    /// Converts to a Result.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_error() {
        let error = ValidationError::new(ErrorKind::Rule, "test", "Test error");
        assert_eq!(error.code, "test");
        assert_eq!(error.message, "Test error");
        assert_eq!(error.kind, ErrorKind::Rule);
    }

    #[test]
    fn test_type_mismatch_names_both_sides() {
        let error = ValidationError::type_mismatch("int8", ValueKind::Bool);
        assert_eq!(error.kind, ErrorKind::Type);
        assert_eq!(error.param("expected"), Some("int8"));
        assert_eq!(error.param("actual"), Some("bool"));
    }

    #[test]
    fn test_unparsable_mentions_conversion() {
        let error = ValidationError::unparsable("uint16", "abc");
        assert!(error.message.contains("string to uint16"));
    }

    #[test]
    fn test_out_of_range_names_target() {
        let error = ValidationError::out_of_range("int8", 1024);
        assert_eq!(error.kind, ErrorKind::Range);
        assert_eq!(error.param("target"), Some("int8"));
        assert!(error.message.contains("int8"));
    }

    #[test]
    fn test_error_collection_preserves_order() {
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::new(ErrorKind::Range, codes::MIN, "first"));
        errors.add(ValidationError::new(ErrorKind::Rule, codes::FORBIDDEN, "second"));
        errors.add(ValidationError::new(ErrorKind::Rule, codes::FORBIDDEN, "second"));

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.codes(), ["min", "forbidden", "forbidden"]);
    }

    #[test]
    fn test_with_field_keeps_existing_paths() {
        let errors: ValidationErrors = [
            ValidationError::custom("a"),
            ValidationError::custom("b").with_field("inner"),
        ]
        .into_iter()
        .collect();

        let errors = errors.with_field("outer");
        assert_eq!(errors.errors()[0].field.as_deref(), Some("outer"));
        assert_eq!(errors.errors()[1].field.as_deref(), Some("inner"));
    }

    #[test]
    fn test_into_single_error() {
        let errors: ValidationErrors = [ValidationError::null(), ValidationError::custom("x")]
            .into_iter()
            .collect();
        let single = errors.into_single_error("bad input");
        assert_eq!(single.kind, ErrorKind::Type);
        assert_eq!(single.nested.len(), 2);
    }

    #[test]
    fn test_zero_alloc_static_strings() {
        let error = ValidationError::null();
        assert!(matches!(error.code, Cow::Borrowed(_)));
        assert!(matches!(error.message, Cow::Borrowed(_)));
    }
}
