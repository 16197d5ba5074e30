//! Core traits for the rule system
//!
//! [`Rule`] is the atomic unit of validation logic. A rule set is nothing more
//! than an immutable chain of rules (plus flags); everything that varies per
//! value family lives outside this trait.

use std::any::Any;
use std::sync::Arc;

use crate::foundation::{ValidationContext, ValidationErrors};

// ============================================================================
// RULE TRAIT
// ============================================================================

/// A single validation rule over values of type `T`.
///
/// # Examples
///
/// ```rust
/// use std::any::Any;
/// use rulechain::foundation::{Rule, ValidationContext, ValidationError, ValidationErrors};
///
/// struct Even;
///
/// impl Rule<i64> for Even {
///     fn evaluate(&self, _ctx: &ValidationContext, value: i64) -> Result<i64, ValidationErrors> {
///         if value % 2 == 0 {
///             Ok(value)
///         } else {
///             Err(ValidationError::custom("value must be even").into())
///         }
///     }
///
///     fn describe(&self) -> Option<String> {
///         Some("Even()".into())
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// let ctx = ValidationContext::new();
/// assert_eq!(Even.evaluate(&ctx, 4).ok(), Some(4));
/// assert!(Even.evaluate(&ctx, 3).is_err());
/// ```
pub trait Rule<T>: Send + Sync + 'static {
    /// Evaluates the rule.
    ///
    /// Returns the (possibly canonicalized) value on success; the returned value
    /// is what the next rule in the chain sees. Must not have side effects.
    fn evaluate(&self, ctx: &ValidationContext, value: T) -> Result<T, ValidationErrors>;

    /// Whether appending this rule drops `other` from the chain.
    ///
    /// The relation is asymmetric. The default never replaces anything.
    fn replaces(&self, other: &dyn Rule<T>) -> bool {
        let _ = other;
        false
    }

    /// Folds the payload of a rule this one [`replaces`](Rule::replaces) into
    /// a new rule.
    ///
    /// Called before the new chain node is built, once per superseded
    /// predecessor, oldest first. `None` keeps `self` unchanged.
    fn absorb(&self, superseded: &dyn Rule<T>) -> Option<Arc<dyn Rule<T>>> {
        let _ = superseded;
        None
    }

    /// Debug token used by the rule-set description, e.g. `WithMin(3)`.
    fn describe(&self) -> Option<String> {
        None
    }

    /// Upcast used for rule-kind identity in [`replaces`](Rule::replaces).
    fn as_any(&self) -> &dyn Any;
}

impl<T: 'static> std::fmt::Debug for dyn Rule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.describe() {
            Some(token) => f.write_str(&token),
            None => f.write_str("Rule"),
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Renders a value the way rule descriptions and error messages show it.
pub trait Render {
    /// Returns the display token for this value.
    fn render(&self) -> String;
}

macro_rules! impl_render_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Render for $ty {
                #[inline]
                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )+
    };
}

impl_render_display!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, bool);

impl Render for String {
    fn render(&self) -> String {
        format!("{self:?}")
    }
}

/// Maximum number of list elements shown before abbreviating.
pub const RENDER_LIST_LIMIT: usize = 3;

/// Renders a list, abbreviating after [`RENDER_LIST_LIMIT`] items.
///
/// ```rust
/// use rulechain::foundation::render_list;
///
/// assert_eq!(render_list(&[1, 2]), "1, 2");
/// assert_eq!(render_list(&[1, 2, 3, 4, 5]), "1, 2, 3 ... and 2 more");
/// ```
pub fn render_list<T: Render>(items: &[T]) -> String {
    let shown: Vec<String> = items
        .iter()
        .take(RENDER_LIST_LIMIT)
        .map(Render::render)
        .collect();
    let mut out = shown.join(", ");
    if items.len() > RENDER_LIST_LIMIT {
        out.push_str(&format!(" ... and {} more", items.len() - RENDER_LIST_LIMIT));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ValidationError;

    struct AlwaysFails;

    impl Rule<i32> for AlwaysFails {
        fn evaluate(&self, _ctx: &ValidationContext, _value: i32) -> Result<i32, ValidationErrors> {
            Err(ValidationError::custom("always fails").into())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_default_rule_capabilities() {
        let rule: Arc<dyn Rule<i32>> = Arc::new(AlwaysFails);
        assert!(!rule.replaces(&AlwaysFails));
        assert!(rule.absorb(&AlwaysFails).is_none());
        assert_eq!(rule.describe(), None);
        assert_eq!(format!("{rule:?}"), "Rule");
    }

    #[test]
    fn test_render_strings_are_quoted() {
        assert_eq!("a\"b".to_string().render(), r#""a\"b""#);
        assert_eq!(1.5_f64.render(), "1.5");
    }

    #[test]
    fn test_render_list_exact_limit_is_not_abbreviated() {
        assert_eq!(render_list(&[1, 2, 3]), "1, 2, 3");
        assert_eq!(render_list::<i32>(&[]), "");
    }
}
