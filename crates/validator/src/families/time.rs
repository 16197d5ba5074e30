//! Time family
//!
//! String input is parsed by trying each configured layout in order
//! (default: RFC 3339). Text output uses the explicit output layout, else the
//! layout that parsed the input, else RFC 3339.
//!
//! ```rust
//! use rulechain::prelude::*;
//!
//! let ctx = ValidationContext::new();
//! let rules = time().layouts([Layout::format("%Y-%m-%d")]);
//!
//! let mut out = String::new();
//! rules.apply(&ctx, &Value::from("2024-03-01"), Sink::Text(&mut out)).unwrap();
//! assert_eq!(out, "2024-03-01");
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeDelta};
use rulechain_value::{Value, ValueKind};

use crate::chain::{Coerced, Family, RuleSet, Tag};
use crate::foundation::{ValidationError, render_list};
use crate::rules::{MaxDiff, MinDiff};
use crate::temporal::Layout;

static DEFAULT_LAYOUT: [Layout; 1] = [Layout::Rfc3339];

/// Settings of a time rule set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeSettings {
    /// Parse layouts in order; empty means RFC 3339 only.
    pub layouts: Vec<Layout>,
    /// Layout for text output.
    pub output_layout: Option<Layout>,
}

impl TimeSettings {
    /// Layouts tried when parsing strings.
    pub fn effective_layouts(&self) -> &[Layout] {
        if self.layouts.is_empty() {
            &DEFAULT_LAYOUT
        } else {
            &self.layouts
        }
    }
}

/// The time family.
#[derive(Debug)]
pub struct TimeFamily;

/// Rule set producing a [`DateTime<FixedOffset>`].
pub type TimeRuleSet = RuleSet<TimeFamily>;

impl Family for TimeFamily {
    type Value = DateTime<FixedOffset>;
    type Settings = TimeSettings;
    /// The layout that parsed a string input.
    type Origin = Option<Layout>;

    const KIND: ValueKind = ValueKind::Time;
    const NAME: &'static str = "time";

    fn label() -> Cow<'static, str> {
        Cow::Borrowed("TimeRuleSet")
    }

    fn coerce(
        settings: &TimeSettings,
        strict: bool,
        input: &Value,
    ) -> Result<Coerced<Self::Value, Option<Layout>>, ValidationError> {
        match input {
            Value::Time(t) => Ok(Coerced::new(*t)),
            Value::String(src) if !strict => settings
                .effective_layouts()
                .iter()
                .find_map(|layout| {
                    layout.parse(src).map(|value| Coerced {
                        value,
                        origin: Some(layout.clone()),
                    })
                })
                .ok_or_else(|| ValidationError::unparsable(Self::NAME, src)),
            other => Err(ValidationError::type_mismatch(Self::NAME, other.kind())),
        }
    }

    fn native(value: Self::Value) -> Value {
        Value::Time(value)
    }

    fn bind_text(
        settings: &TimeSettings,
        value: &Self::Value,
        origin: &Option<Layout>,
        out: &mut String,
    ) -> Result<(), ValidationError> {
        let layout = settings
            .output_layout
            .as_ref()
            .or(origin.as_ref())
            .unwrap_or(&DEFAULT_LAYOUT[0]);

        let mut text = String::new();
        layout.write(value, &mut text).map_err(|_| {
            ValidationError::internal(format!("cannot format time with layout {layout}"))
        })?;
        *out = text;
        Ok(())
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

impl RuleSet<TimeFamily> {
    /// Adds parse layouts after the ones already configured.
    pub fn layouts(&self, layouts: impl IntoIterator<Item = Layout>) -> Self {
        let mut merged = self.settings().layouts.clone();
        for layout in layouts {
            if !merged.contains(&layout) {
                merged.push(layout);
            }
        }
        let label = format!("WithLayouts({})", render_list(&merged));
        self.with_modifier(Tag::Layouts, label, move |_, settings| {
            settings.layouts = merged;
        })
    }

    /// Layout for text output. Setting the current layout again is a no-op
    /// that returns the same chain.
    pub fn output_layout(&self, layout: Layout) -> Self {
        let tail = self.tail();
        if tail.tag == Tag::OutputLayout && tail.settings.output_layout.as_ref() == Some(&layout) {
            return self.clone();
        }
        let label = format!("WithOutputLayout({layout})");
        self.with_modifier(Tag::OutputLayout, label, move |_, settings| {
            settings.output_layout = Some(layout);
        })
    }

    /// Time must be at least `diff` after now.
    pub fn min_diff(&self, diff: TimeDelta) -> Self {
        self.with_rule(Arc::new(MinDiff::new(diff)))
    }

    /// Time must be at most `diff` after now.
    pub fn max_diff(&self, diff: TimeDelta) -> Self {
        self.with_rule(Arc::new(MaxDiff::new(diff)))
    }
}
