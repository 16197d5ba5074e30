//! Macros for defining rules with minimal boilerplate.
//!
//! # Available Macros
//!
//! - `compare_rule!`: a single-bound comparison rule (struct + `Rule` impl + accessors)
//! - `impl_integer!` / `impl_float!`: numeric family glue for each primitive width
//!
//! # Examples
//!
//! ```rust,ignore
//! compare_rule! {
//!     /// Value must be at least `bound`.
//!     pub Min { bound } replaces [Min, MinExclusive];
//!     check(value, bound) { value >= bound }
//!     error(value, bound) {
//!         ValidationError::new(ErrorKind::Range, codes::MIN, format!("must be at least {}", bound.render()))
//!     }
//!     token "WithMin";
//! }
//! ```

// ============================================================================
// COMPARE RULE MACRO
// ============================================================================

/// Creates a comparison rule generic over the compared value type.
///
/// `#[derive(Debug, Clone, PartialEq)]` is always applied. The generated rule
/// replaces every rule whose concrete type is listed in `replaces [...]`
/// (instantiated at the same `T`), and describes itself as `token(bound)`.
macro_rules! compare_rule {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $field:ident } replaces [$($peer:ident),+ $(,)?];
        check($value:ident, $bound:ident) $check:block
        error($evalue:ident, $ebound:ident) $err:block
        token $token:literal;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name<T> {
            $field: T,
        }

        impl<T> $name<T> {
            /// Creates the rule.
            #[must_use]
            pub const fn new($field: T) -> Self {
                Self { $field }
            }

            /// Returns the configured bound.
            pub const fn $field(&self) -> &T {
                &self.$field
            }
        }

        impl<T> $crate::foundation::Rule<T> for $name<T>
        where
            T: PartialOrd + $crate::foundation::Render + Send + Sync + 'static,
        {
            fn evaluate(
                &self,
                _ctx: &$crate::foundation::ValidationContext,
                value: T,
            ) -> Result<T, $crate::foundation::ValidationErrors> {
                let passed = {
                    let $value = &value;
                    let $bound = &self.$field;
                    $check
                };
                if passed {
                    Ok(value)
                } else {
                    let $evalue = &value;
                    let $ebound = &self.$field;
                    Err($err.into())
                }
            }

            fn replaces(&self, other: &dyn $crate::foundation::Rule<T>) -> bool {
                let other = other.as_any();
                $(other.is::<$peer<T>>())||+
            }

            fn describe(&self) -> Option<String> {
                Some(format!(
                    concat!($token, "({})"),
                    $crate::foundation::Render::render(&self.$field)
                ))
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    };
}

pub(crate) use compare_rule;

// ============================================================================
// NUMERIC FAMILY MACROS
// ============================================================================

/// Implements [`Integer`](crate::families::Integer) for primitive widths.
macro_rules! impl_integer {
    ($($ty:ty => $variant:ident, $kind:ident, $name:literal);+ $(;)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Integer for $ty {
                const NAME: &'static str = $name;
                const KIND: ValueKind = ValueKind::$kind;

                #[inline]
                fn from_native(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(*v),
                        _ => None,
                    }
                }

                #[inline]
                fn into_native(self) -> Value {
                    Value::$variant(self)
                }

                #[inline]
                fn parse_radix(src: &str, radix: u32) -> Result<Self, std::num::ParseIntError> {
                    <$ty>::from_str_radix(src, radix)
                }

                #[inline]
                fn take_slot(slot: NumericSlot<'_>) -> Option<&mut Self> {
                    match slot {
                        NumericSlot::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )+
    };
}

pub(crate) use impl_integer;

/// Implements [`Float`](crate::families::Float) for `f32` and `f64`.
macro_rules! impl_float {
    ($($ty:ty => $variant:ident, $kind:ident, $name:literal);+ $(;)?) => {
        $(
            impl sealed::Sealed for $ty {}

            #[allow(trivial_numeric_casts)]
            impl Float for $ty {
                const NAME: &'static str = $name;
                const KIND: ValueKind = ValueKind::$kind;

                #[inline]
                fn from_native(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(*v),
                        _ => None,
                    }
                }

                #[inline]
                fn into_native(self) -> Value {
                    Value::$variant(self)
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as Self
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_i128(value: i128) -> Self {
                    value as Self
                }

                #[inline]
                fn to_i128(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn take_slot(slot: NumericSlot<'_>) -> Option<&mut Self> {
                    match slot {
                        NumericSlot::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )+
    };
}

pub(crate) use impl_float;
