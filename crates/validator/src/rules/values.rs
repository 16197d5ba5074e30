//! Value-set rules
//!
//! Allowed and rejected value lists are cumulative: appending a second list
//! absorbs the first one, so the chain keeps a single node holding the union
//! (earlier values first).

use std::any::Any;
use std::sync::Arc;

use crate::foundation::{
    ErrorKind, Render, Rule, ValidationContext, ValidationError, ValidationErrors, codes,
    render_list,
};

/// Appends every value of `extra` not already present in `base`.
fn union<T: PartialEq + Clone>(base: &[T], extra: &[T]) -> Vec<T> {
    let mut merged = Vec::with_capacity(base.len() + extra.len());
    for value in base.iter().chain(extra) {
        if !merged.contains(value) {
            merged.push(value.clone());
        }
    }
    merged
}

/// Value must equal one of the listed values.
#[derive(Debug, Clone, PartialEq)]
pub struct AllowedValues<T> {
    values: Vec<T>,
}

impl<T> AllowedValues<T> {
    /// Creates the rule.
    pub fn new(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// The accepted values, in insertion order.
    pub fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T> Rule<T> for AllowedValues<T>
where
    T: PartialEq + Clone + Render + Send + Sync + 'static,
{
    fn evaluate(&self, _ctx: &ValidationContext, value: T) -> Result<T, ValidationErrors> {
        if self.values.contains(&value) {
            return Ok(value);
        }
        Err(ValidationError::new(
            ErrorKind::Rule,
            codes::NOT_ALLOWED,
            format!("value must be one of: {}", render_list(&self.values)),
        )
        .with_param("actual", value.render())
        .into())
    }

    fn replaces(&self, other: &dyn Rule<T>) -> bool {
        other.as_any().is::<Self>()
    }

    fn absorb(&self, superseded: &dyn Rule<T>) -> Option<Arc<dyn Rule<T>>> {
        let earlier = superseded.as_any().downcast_ref::<Self>()?;
        Some(Arc::new(Self {
            values: union(&earlier.values, &self.values),
        }))
    }

    fn describe(&self) -> Option<String> {
        Some(format!("WithAllowedValues({})", render_list(&self.values)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Value must not equal any of the listed values.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedValues<T> {
    values: Vec<T>,
}

impl<T> RejectedValues<T> {
    /// Creates the rule.
    pub fn new(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// The forbidden values, in insertion order.
    pub fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T> Rule<T> for RejectedValues<T>
where
    T: PartialEq + Clone + Render + Send + Sync + 'static,
{
    fn evaluate(&self, _ctx: &ValidationContext, value: T) -> Result<T, ValidationErrors> {
        if !self.values.contains(&value) {
            return Ok(value);
        }
        let rendered = value.render();
        Err(ValidationError::new(
            ErrorKind::Rule,
            codes::FORBIDDEN,
            format!("value {rendered} is forbidden"),
        )
        .with_param("actual", rendered)
        .into())
    }

    fn replaces(&self, other: &dyn Rule<T>) -> bool {
        other.as_any().is::<Self>()
    }

    fn absorb(&self, superseded: &dyn Rule<T>) -> Option<Arc<dyn Rule<T>>> {
        let earlier = superseded.as_any().downcast_ref::<Self>()?;
        Some(Arc::new(Self {
            values: union(&earlier.values, &self.values),
        }))
    }

    fn describe(&self) -> Option<String> {
        Some(format!("WithRejectedValues({})", render_list(&self.values)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_allowed_values() {
        let rule = AllowedValues::new([1_i64, 2, 3]);
        let ctx = ValidationContext::new();

        assert!(rule.evaluate(&ctx, 2).is_ok());
        let errors = rule.evaluate(&ctx, 4).unwrap_err();
        assert_eq!(errors.codes(), [codes::NOT_ALLOWED]);
        assert_eq!(errors.errors()[0].kind, ErrorKind::Rule);
    }

    #[test]
    fn test_rejected_values() {
        let rule = RejectedValues::new(["root".to_string()]);
        let ctx = ValidationContext::new();

        assert!(rule.evaluate(&ctx, "alice".to_string()).is_ok());
        let errors = rule.evaluate(&ctx, "root".to_string()).unwrap_err();
        assert_eq!(errors.codes(), [codes::FORBIDDEN]);
    }

    #[test]
    fn test_absorb_unions_earlier_values_first() {
        let earlier = AllowedValues::new([1_i64, 2]);
        let later = AllowedValues::new([2_i64, 5]);

        assert!(later.replaces(&earlier));
        let merged = later.absorb(&earlier).unwrap();
        assert_eq!(merged.describe().as_deref(), Some("WithAllowedValues(1, 2, 5)"));
    }

    #[test]
    fn test_allowed_and_rejected_do_not_mix() {
        let allowed = AllowedValues::new([1_i64]);
        let rejected = RejectedValues::new([1_i64]);

        assert!(!allowed.replaces(&rejected));
        assert!(!rejected.replaces(&allowed));
        assert!(rejected.absorb(&allowed).is_none());
    }

    #[test]
    fn test_describe_abbreviates_long_lists() {
        let rule = RejectedValues::new(1_i64..=5);
        assert_eq!(
            rule.describe().as_deref(),
            Some("WithRejectedValues(1, 2, 3 ... and 2 more)")
        );
    }
}
