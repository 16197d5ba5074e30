//! Bound rules
//!
//! A lower bound (`Min` or `MinExclusive`) replaces any earlier lower bound,
//! and likewise for upper bounds. Violations are reported with
//! [`ErrorKind::Range`](crate::foundation::ErrorKind::Range).

use crate::foundation::{ErrorKind, Render, ValidationError, codes};
use crate::macros::compare_rule;

fn bound_error(code: &'static str, relation: &str, bound: &impl Render, actual: &impl Render) -> ValidationError {
    let bound = bound.render();
    ValidationError::new(
        ErrorKind::Range,
        code,
        format!("value must be {relation} {bound}"),
    )
    .with_param(code, bound)
    .with_param("actual", actual.render())
}

compare_rule! {
    /// Value must be greater than or equal to the bound.
    pub Min { bound } replaces [Min, MinExclusive];
    check(value, bound) { value >= bound }
    error(value, bound) { bound_error(codes::MIN, "at least", bound, value) }
    token "WithMin";
}

compare_rule! {
    /// Value must be less than or equal to the bound.
    pub Max { bound } replaces [Max, MaxExclusive];
    check(value, bound) { value <= bound }
    error(value, bound) { bound_error(codes::MAX, "at most", bound, value) }
    token "WithMax";
}

compare_rule! {
    /// Value must be strictly greater than the bound.
    pub MinExclusive { bound } replaces [Min, MinExclusive];
    check(value, bound) { value > bound }
    error(value, bound) { bound_error(codes::MIN_EXCLUSIVE, "greater than", bound, value) }
    token "WithMinExclusive";
}

compare_rule! {
    /// Value must be strictly less than the bound.
    pub MaxExclusive { bound } replaces [Max, MaxExclusive];
    check(value, bound) { value < bound }
    error(value, bound) { bound_error(codes::MAX_EXCLUSIVE, "less than", bound, value) }
    token "WithMaxExclusive";
}

// ============================================================================
// TESTS
// ============================================================================
