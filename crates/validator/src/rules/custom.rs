//! Closure rules.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use crate::foundation::{Rule, ValidationContext, ValidationError, ValidationErrors};

/// A rule backed by a closure, described as `WithRuleFunc(label)`.
///
/// Closure rules never replace one another.
pub struct RuleFn<T, C> {
    label: Cow<'static, str>,
    check: C,
    _marker: PhantomData<fn(&T)>,
}

impl<T, C> RuleFn<T, C>
where
    C: Fn(&ValidationContext, &T) -> Result<(), ValidationError>,
{
    /// Creates the rule.
    pub fn new(label: impl Into<Cow<'static, str>>, check: C) -> Self {
        Self {
            label: label.into(),
            check,
            _marker: PhantomData,
        }
    }

    /// The label shown in descriptions.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<T, C> fmt::Debug for RuleFn<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleFn")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<T, C> Rule<T> for RuleFn<T, C>
where
    T: 'static,
    C: Fn(&ValidationContext, &T) -> Result<(), ValidationError> + Send + Sync + 'static,
{
    fn evaluate(&self, ctx: &ValidationContext, value: T) -> Result<T, ValidationErrors> {
        match (self.check)(ctx, &value) {
            Ok(()) => Ok(value),
            Err(error) => Err(error.into()),
        }
    }

    fn describe(&self) -> Option<String> {
        Some(format!("WithRuleFunc({})", self.label))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
