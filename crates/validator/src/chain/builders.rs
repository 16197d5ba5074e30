//! Builder methods shared by every family whose value type supports them.

use std::borrow::Cow;
use std::sync::Arc;

use crate::chain::{Family, RuleSet};
use crate::foundation::{Render, ValidationContext, ValidationError};
use crate::rules::{
    AllowedValues, Max, MaxExclusive, Min, MinExclusive, RejectedValues, RuleFn,
};

impl<F: Family> RuleSet<F>
where
    F::Value: PartialOrd + Render,
{
    /// Value must be at least `bound`. Replaces any earlier lower bound.
    pub fn min(&self, bound: F::Value) -> Self {
        self.with_rule(Arc::new(Min::new(bound)))
    }

    /// Value must be at most `bound`. Replaces any earlier upper bound.
    pub fn max(&self, bound: F::Value) -> Self {
        self.with_rule(Arc::new(Max::new(bound)))
    }

    /// Value must be strictly greater than `bound`.
    pub fn min_exclusive(&self, bound: F::Value) -> Self {
        self.with_rule(Arc::new(MinExclusive::new(bound)))
    }

    /// Value must be strictly less than `bound`.
    pub fn max_exclusive(&self, bound: F::Value) -> Self {
        self.with_rule(Arc::new(MaxExclusive::new(bound)))
    }

    /// Shorthand for `.min(min).max(max)`.
    ///
    /// # Panics
    ///
    /// Panics if `min` is not strictly less than `max`.
    pub fn range(&self, min: F::Value, max: F::Value) -> Self {
        assert!(
            min < max,
            "range: min ({}) must be less than max ({})",
            min.render(),
            max.render()
        );
        self.min(min).max(max)
    }
}

impl<F: Family> RuleSet<F>
where
    F::Value: PartialEq + Render,
{
    /// Value must be one of `values`. Repeated calls extend the list.
    pub fn allowed_values(&self, values: impl IntoIterator<Item = F::Value>) -> Self {
        self.with_rule(Arc::new(AllowedValues::new(values)))
    }

    /// Value must not be one of `values`. Repeated calls extend the list.
    pub fn rejected_values(&self, values: impl IntoIterator<Item = F::Value>) -> Self {
        self.with_rule(Arc::new(RejectedValues::new(values)))
    }
}

impl<F: Family> RuleSet<F> {
    /// Appends a closure rule described as `WithRuleFunc(label)`.
    pub fn rule_fn<C>(&self, label: impl Into<Cow<'static, str>>, check: C) -> Self
    where
        C: Fn(&ValidationContext, &F::Value) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.with_rule(Arc::new(RuleFn::<F::Value, C>::new(label, check)))
    }
}
