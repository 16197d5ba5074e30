//! The per-type half of a rule set.

use std::borrow::Cow;

use rulechain_value::{Value, ValueKind};

use crate::foundation::ValidationError;
use crate::output::{NumericSlot, unsupported_sink};

/// A coerced value plus whatever the coercion learned about its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Coerced<V, O = ()> {
    /// The value in the family's type.
    pub value: V,
    /// Family-specific provenance, e.g. the time layout that parsed a string.
    pub origin: O,
}

impl<V, O: Default> Coerced<V, O> {
    /// Wraps a value with default provenance.
    pub fn new(value: V) -> Self {
        Self {
            value,
            origin: O::default(),
        }
    }
}

/// A value family: the target type of a rule set and how to reach it.
///
/// The chain, conflict resolution, evaluation walk and binder are shared by
/// every family. A family only supplies data: its value type, its settings
/// (base, unit, layouts, ...), coercion from [`Value`], and how to write its
/// value into sinks of another shape.
pub trait Family: Sized + Send + Sync + 'static {
    /// The target type.
    type Value: Clone + Send + Sync + 'static;

    /// Family settings carried by the tail node.
    type Settings: Clone + Default + Send + Sync + 'static;

    /// Provenance recorded by coercion and consumed when binding.
    type Origin: Default;

    /// The dynamic kind of [`Family::Value`].
    const KIND: ValueKind;

    /// Target name used in error messages, e.g. `int8`.
    const NAME: &'static str;

    /// Label of the root node, e.g. `IntRuleSet[int8]`.
    fn label() -> Cow<'static, str>;

    /// Converts a non-null, non-pointer input into the target type.
    ///
    /// In strict mode only the native kind is accepted.
    fn coerce(
        settings: &Self::Settings,
        strict: bool,
        input: &Value,
    ) -> Result<Coerced<Self::Value, Self::Origin>, ValidationError>;

    /// Lifts a value back into a [`Value`].
    fn native(value: Self::Value) -> Value;

    /// Writes into a numeric slot. Unsupported unless overridden.
    fn bind_numeric(
        settings: &Self::Settings,
        value: &Self::Value,
        slot: NumericSlot<'_>,
    ) -> Result<(), ValidationError> {
        let _ = (settings, value);
        Err(unsupported_sink(Self::NAME, slot.kind()))
    }

    /// Writes into a text slot. Unsupported unless overridden.
    fn bind_text(
        settings: &Self::Settings,
        value: &Self::Value,
        origin: &Self::Origin,
        out: &mut String,
    ) -> Result<(), ValidationError> {
        let _ = (settings, value, origin, out);
        Err(unsupported_sink(Self::NAME, ValueKind::String))
    }
}
