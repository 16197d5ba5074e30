//! Relative-time rules
//!
//! Both compare `value - now` against a signed offset, where "now" is the
//! instant pinned by the evaluation's context snapshot.

use std::any::Any;

use chrono::{DateTime, FixedOffset, TimeDelta};

use crate::foundation::{
    ErrorKind, Render, Rule, ValidationContext, ValidationError, ValidationErrors, codes,
};

type Instant = DateTime<FixedOffset>;

/// Time must be at least `diff` after now (before now, if negative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinDiff {
    diff: TimeDelta,
}

impl MinDiff {
    /// Creates the rule.
    pub const fn new(diff: TimeDelta) -> Self {
        Self { diff }
    }
}

impl Rule<Instant> for MinDiff {
    fn evaluate(&self, ctx: &ValidationContext, value: Instant) -> Result<Instant, ValidationErrors> {
        let now = ctx.now();
        if value.signed_duration_since(now) >= self.diff {
            return Ok(value);
        }
        Err(ValidationError::new(
            ErrorKind::Range,
            codes::MIN_DIFF,
            format!("time must be at least {} from now", self.diff.render()),
        )
        .with_param("min_diff", self.diff.render())
        .with_param("now", now.render())
        .with_param("actual", value.render())
        .into())
    }

    fn replaces(&self, other: &dyn Rule<Instant>) -> bool {
        other.as_any().is::<Self>()
    }

    fn describe(&self) -> Option<String> {
        Some(format!("WithMinDiff({})", self.diff.render()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Time must be at most `diff` after now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaxDiff {
    diff: TimeDelta,
}

impl MaxDiff {
    /// Creates the rule.
    pub const fn new(diff: TimeDelta) -> Self {
        Self { diff }
    }
}

impl Rule<Instant> for MaxDiff {
    fn evaluate(&self, ctx: &ValidationContext, value: Instant) -> Result<Instant, ValidationErrors> {
        let now = ctx.now();
        if value.signed_duration_since(now) <= self.diff {
            return Ok(value);
        }
        Err(ValidationError::new(
            ErrorKind::Range,
            codes::MAX_DIFF,
            format!("time must be at most {} from now", self.diff.render()),
        )
        .with_param("max_diff", self.diff.render())
        .with_param("now", now.render())
        .with_param("actual", value.render())
        .into())
    }

    fn replaces(&self, other: &dyn Rule<Instant>) -> bool {
        other.as_any().is::<Self>()
    }

    fn describe(&self) -> Option<String> {
        Some(format!("WithMaxDiff({})", self.diff.render()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
