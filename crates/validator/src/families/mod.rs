//! Value families and their constructors
//!
//! Each constructor returns an empty rule set for one target type:
//!
//! | Constructor | Target |
//! |---|---|
//! | [`int8`] .. [`int64`], [`int`] | `i8` .. `i64` (`int` = `int64`) |
//! | [`uint8`] .. [`uint64`], [`uint`] | `u8` .. `u64` (`uint` = `uint64`) |
//! | [`float32`], [`float64`] | `f32`, `f64` |
//! | [`string`] | `String` |
//! | [`duration`] | `chrono::TimeDelta` |
//! | [`time`] | `chrono::DateTime<FixedOffset>` |

#[cfg(feature = "temporal")]
mod duration;
mod float;
mod int;
mod string;
#[cfg(feature = "temporal")]
mod time;

#[cfg(feature = "temporal")]
pub use duration::{DurationFamily, DurationRuleSet, DurationSettings};
pub use float::{Float, FloatFamily, FloatRuleSet, FloatSettings};
pub use int::{IntFamily, IntRuleSet, IntSettings, Integer};
pub use string::{StringFamily, StringRuleSet};
#[cfg(feature = "temporal")]
pub use time::{TimeFamily, TimeRuleSet, TimeSettings};

macro_rules! constructors {
    ($($name:ident => $alias:ident<$ty:ty>),+ $(,)?) => {
        $(
            #[doc = concat!("An empty rule set targeting `", stringify!($ty), "`.")]
            pub fn $name() -> $alias<$ty> {
                <$alias<$ty>>::new()
            }
        )+
    };
}

constructors! {
    int8 => IntRuleSet<i8>,
    int16 => IntRuleSet<i16>,
    int32 => IntRuleSet<i32>,
    int64 => IntRuleSet<i64>,
    int => IntRuleSet<i64>,
    uint8 => IntRuleSet<u8>,
    uint16 => IntRuleSet<u16>,
    uint32 => IntRuleSet<u32>,
    uint64 => IntRuleSet<u64>,
    uint => IntRuleSet<u64>,
    float32 => FloatRuleSet<f32>,
    float64 => FloatRuleSet<f64>,
}

/// An empty rule set targeting `String`.
pub fn string() -> StringRuleSet {
    StringRuleSet::new()
}

/// An empty rule set targeting `chrono::TimeDelta`.
#[cfg(feature = "temporal")]
pub fn duration() -> DurationRuleSet {
    DurationRuleSet::new()
}

/// An empty rule set targeting `chrono::DateTime<FixedOffset>`.
#[cfg(feature = "temporal")]
pub fn time() -> TimeRuleSet {
    TimeRuleSet::new()
}
