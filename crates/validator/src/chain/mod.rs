//! Immutable rule-set chains
//!
//! A [`RuleSet`] is a handle to the tail of a parent-linked chain of nodes.
//! Builder methods never mutate: each returns a new tail, reusing every
//! ancestor that the appended modifier does not conflict with.
//!
//! - **Conflict resolution**: appending a modifier drops older nodes it
//!   supersedes (same tag, or a rule that [`replaces`](crate::foundation::Rule::replaces)
//!   them). Untouched nodes keep their positions.
//! - **Evaluation** walks tail to root, so the most recently appended rule runs
//!   first. Every rule runs; errors accumulate.
//! - **Description** renders root to tail.
//!
//! ```rust
//! use rulechain::prelude::*;
//!
//! let base = int().min(3).max(10);
//! let moved = base.min(5);
//!
//! assert_eq!(base.to_string(), "IntRuleSet[int64].WithMin(3).WithMax(10)");
//! assert_eq!(moved.to_string(), "IntRuleSet[int64].WithMax(10).WithMin(5)");
//! ```

mod builders;
mod family;
mod node;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use rulechain_value::Value;

use crate::foundation::{Rule, ValidationContext, ValidationError, ValidationErrors};
use crate::output::{self, Sink};

pub use family::{Coerced, Family};
pub use node::{Flags, Tag};

pub(crate) use node::{Incoming, Node, resolve_conflicts};

/// An immutable, shareable chain of modifiers for one value family.
pub struct RuleSet<F: Family> {
    tail: Arc<Node<F>>,
}

impl<F: Family> Clone for RuleSet<F> {
    fn clone(&self) -> Self {
        Self {
            tail: Arc::clone(&self.tail),
        }
    }
}

impl<F: Family> Default for RuleSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Family> RuleSet<F> {
    /// Creates an empty rule set with family defaults.
    pub fn new() -> Self {
        Self {
            tail: Arc::new(Node::root()),
        }
    }

    // ========================================================================
    // APPENDING
    // ========================================================================

    /// Appends a rule.
    ///
    /// Every existing rule the new one replaces is first absorbed into it
    /// (oldest first), then dropped from the chain.
    pub fn with_rule(&self, rule: Arc<dyn Rule<F::Value>>) -> Self {
        let mut incoming = rule;
        let mut lineage: Vec<&Arc<Node<F>>> = self.tail.ancestry().collect();
        lineage.reverse();
        for node in lineage {
            let Some(existing) = node.rule.as_deref() else {
                continue;
            };
            if incoming.replaces(existing) {
                if let Some(merged) = incoming.absorb(existing) {
                    incoming = merged;
                }
            }
        }
        self.append(Some(incoming), Tag::None, None, |_, _| {})
    }

    /// Appends a user-supplied rule.
    pub fn custom_rule(&self, rule: Arc<dyn Rule<F::Value>>) -> Self {
        self.with_rule(rule)
    }

    /// Appends a flag or settings node.
    pub(crate) fn with_modifier(
        &self,
        tag: Tag,
        label: impl Into<Cow<'static, str>>,
        update: impl FnOnce(&mut Flags, &mut F::Settings),
    ) -> Self {
        self.append(None, tag, Some(label.into()), update)
    }

    fn append(
        &self,
        rule: Option<Arc<dyn Rule<F::Value>>>,
        tag: Tag,
        label: Option<Cow<'static, str>>,
        update: impl FnOnce(&mut Flags, &mut F::Settings),
    ) -> Self {
        let incoming = Incoming {
            rule: rule.as_deref(),
            tag,
        };
        let parent = resolve_conflicts(Some(&self.tail), &incoming);

        let mut flags = self.tail.flags;
        let mut settings = self.tail.settings.clone();
        update(&mut flags, &mut settings);

        Self {
            tail: Arc::new(Node {
                rule,
                tag,
                label,
                flags,
                settings,
                parent,
            }),
        }
    }

    /// Marks the value as required by the enclosing structure.
    pub fn required(&self) -> Self {
        self.with_modifier(Tag::Required, "WithRequired()", |flags, _| {
            flags.required = true;
        })
    }

    /// Accepts a null input, leaving the output empty.
    pub fn nilable(&self) -> Self {
        self.with_modifier(Tag::Nilable, "WithNil()", |flags, _| flags.nilable = true)
    }

    /// Disables every cross-type coercion.
    pub fn strict(&self) -> Self {
        self.with_modifier(Tag::Strict, "WithStrict()", |flags, _| flags.strict = true)
    }

    // ========================================================================
    // INSPECTION
    // ========================================================================

    /// Whether the enclosing structure must supply this value.
    pub fn is_required(&self) -> bool {
        self.tail.flags.required
    }

    /// Current flags of the tail node.
    pub fn flags(&self) -> Flags {
        self.tail.flags
    }

    /// Current family settings of the tail node.
    pub fn settings(&self) -> &F::Settings {
        &self.tail.settings
    }

    /// The chain without its tail node, if any.
    pub fn parent(&self) -> Option<Self> {
        self.tail.parent.as_ref().map(|tail| Self {
            tail: Arc::clone(tail),
        })
    }

    /// Whether both handles point at the same tail node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tail, &other.tail)
    }

    /// Number of nodes in the chain, root included.
    pub fn len(&self) -> usize {
        self.tail.ancestry().count()
    }

    /// A chain always holds at least its root node.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Renders the chain root to tail, e.g. `IntRuleSet[int64].WithMin(3)`.
    pub fn describe(&self) -> String {
        let mut tokens: Vec<Cow<'_, str>> =
            self.tail.ancestry().filter_map(|node| node.token()).collect();
        tokens.reverse();
        tokens.join(".")
    }

    pub(crate) fn tail(&self) -> &Arc<Node<F>> {
        &self.tail
    }

    // ========================================================================
    // EXECUTION
    // ========================================================================

    /// Runs every rule against an already typed value.
    pub fn evaluate(
        &self,
        ctx: &ValidationContext,
        value: F::Value,
    ) -> Result<F::Value, ValidationErrors> {
        let ctx = ctx.snapshot();
        let (value, errors) = self.run(&ctx, value);
        errors.with_field(&ctx.field_path()).into_result(value)
    }

    /// Coerces `input`, evaluates every rule, and binds the value into `sink`.
    ///
    /// A coercion failure is terminal: exactly one error, sink untouched.
    /// Rule failures accumulate and do not prevent binding.
    pub fn apply(
        &self,
        ctx: &ValidationContext,
        input: &Value,
        sink: Sink<'_, F::Value>,
    ) -> Result<(), ValidationErrors> {
        let flags = self.tail.flags;
        let path = ctx.field_path();

        if input.is_null() {
            if flags.nilable {
                sink.clear();
                return Ok(());
            }
            return Err(ValidationErrors::from(ValidationError::null()).with_field(&path));
        }

        let coerced = deref_input::<F>(input, flags.strict)
            .and_then(|input| F::coerce(&self.tail.settings, flags.strict, input))
            .map_err(|error| {
                tracing::debug!(
                    rule_set = %F::label(),
                    input = %input.kind(),
                    code = %error.code,
                    "coercion failed"
                );
                ValidationErrors::from(error).with_field(&path)
            })?;

        let ctx = ctx.snapshot();
        let (value, mut errors) = self.run(&ctx, coerced.value);

        if let Err(error) = output::bind::<F>(&self.tail.settings, value, &coerced.origin, sink) {
            tracing::debug!(rule_set = %F::label(), error = %error, "binding failed");
            errors.add(error);
        }

        errors.with_field(&path).into_result(())
    }

    /// Applies into [`Sink::Discard`].
    pub fn validate(&self, ctx: &ValidationContext, input: &Value) -> Result<(), ValidationErrors> {
        self.apply(ctx, input, Sink::Discard)
    }

    fn run(&self, ctx: &ValidationContext, mut value: F::Value) -> (F::Value, ValidationErrors) {
        let mut errors = ValidationErrors::new();
        for node in self.tail.ancestry() {
            let Some(rule) = &node.rule else { continue };
            match rule.evaluate(ctx, value.clone()) {
                Ok(next) => {
                    tracing::trace!(rule = ?rule, "rule passed");
                    value = next;
                }
                Err(failed) => {
                    tracing::trace!(rule = ?rule, errors = failed.len(), "rule failed");
                    errors.merge(failed);
                }
            }
        }
        (value, errors)
    }
}

/// Follows pointers down to their final target.
///
/// A nil pointer at any depth is a type error, as is a strict-mode target
/// that is not the family's native kind.
fn deref_input<F: Family>(input: &Value, strict: bool) -> Result<&Value, ValidationError> {
    if !matches!(input, Value::Pointer(_)) {
        return Ok(input);
    }
    let target = input.deref_pointer();
    if target.is_nil_pointer() || (strict && target.kind() != F::KIND) {
        return Err(ValidationError::type_mismatch(F::NAME, input.kind()));
    }
    Ok(target)
}

impl<F: Family> fmt::Display for RuleSet<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl<F: Family> fmt::Debug for RuleSet<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RuleSet").field(&self.describe()).finish()
    }
}
