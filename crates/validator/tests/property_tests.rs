//! Property-based tests for rulechain.

use proptest::prelude::*;
use rulechain::families::{IntRuleSet, Integer};
use rulechain::prelude::*;

/// Coerces `input` into `T`, returning the value or the error kind.
fn coerce<T: Integer + Default>(input: &Value) -> Result<T, ErrorKind> {
    let mut out = T::default();
    IntRuleSet::<T>::new()
        .apply(&ValidationContext::new(), input, Sink::Exact(&mut out))
        .map(|()| out)
        .map_err(|errors| errors.errors()[0].kind)
}

/// Narrowing either round-trips exactly or fails with `Range`.
fn assert_round_trip<Src, Dst>(v: Src) -> Result<(), TestCaseError>
where
    Src: Integer + Default + PartialEq + std::fmt::Debug + Into<Value>,
    Dst: Integer + Default + Into<Value>,
{
    match coerce::<Dst>(&v.into()) {
        Ok(narrowed) => prop_assert_eq!(coerce::<Src>(&narrowed.into()), Ok(v)),
        Err(kind) => prop_assert_eq!(kind, ErrorKind::Range),
    }
    Ok(())
}

// ============================================================================
// ROUND-TRIP SOUNDNESS
// ============================================================================

proptest! {
    #[test]
    fn i64_round_trips(v in any::<i64>()) {
        assert_round_trip::<i64, i8>(v)?;
        assert_round_trip::<i64, i16>(v)?;
        assert_round_trip::<i64, i32>(v)?;
        assert_round_trip::<i64, u8>(v)?;
        assert_round_trip::<i64, u32>(v)?;
        assert_round_trip::<i64, u64>(v)?;
    }

    #[test]
    fn u64_round_trips(v in any::<u64>()) {
        assert_round_trip::<u64, i8>(v)?;
        assert_round_trip::<u64, i64>(v)?;
        assert_round_trip::<u64, u16>(v)?;
    }

    #[test]
    fn i16_round_trips(v in any::<i16>()) {
        assert_round_trip::<i16, u8>(v)?;
        assert_round_trip::<i16, u16>(v)?;
        assert_round_trip::<i16, i8>(v)?;
        assert_round_trip::<i16, i64>(v)?;
    }

    #[test]
    fn decimal_strings_round_trip(v in any::<i32>()) {
        prop_assert_eq!(coerce::<i32>(&Value::from(v.to_string())), Ok(v));
    }

    #[test]
    fn apply_is_deterministic(v in any::<i64>(), lo in -100_i64..0, hi in 0_i64..100) {
        let rules = int().range(lo, hi).rejected_values([0]);
        let ctx = ValidationContext::new();
        let first = rules.validate(&ctx, &Value::from(v)).map_err(|e| e.codes().join(","));
        let second = rules.validate(&ctx, &Value::from(v)).map_err(|e| e.codes().join(","));
        prop_assert_eq!(first, second);
    }
}
