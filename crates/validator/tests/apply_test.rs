//! End-to-end tests: coercion, rule evaluation and binding through `apply`.

use pretty_assertions::assert_eq;
use rulechain::prelude::*;
use rstest::rstest;

fn ctx() -> ValidationContext {
    ValidationContext::new()
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn bounds_report_one_violation() {
    let rules = int().min(3).max(10);

    let errors = rules.validate(&ctx(), &Value::from(2_i64)).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].kind, ErrorKind::Range);
    assert_eq!(errors.errors()[0].code, codes::MIN);

    let mut out = 0_i64;
    rules.apply(&ctx(), &Value::from(3_i64), Sink::Exact(&mut out)).unwrap();
    assert_eq!(out, 3);
}

#[test]
fn hexadecimal_strings() {
    let mut out = 0_i64;
    int().base(16).apply(&ctx(), &Value::from("BeEf"), Sink::Exact(&mut out)).unwrap();
    assert_eq!(out, 48_879);
}

#[rstest]
#[case(124.125, 124.12)]
#[case(124.115, 124.12)]
#[case(124.135, 124.14)]
fn float_half_even_rounding(#[case] input: f64, #[case] expected: f64) {
    let mut out = 0.0_f64;
    float64()
        .rounding(Rounding::HalfEven, 2)
        .apply(&ctx(), &Value::from(input), Sink::Exact(&mut out))
        .unwrap();
    assert_eq!(out, expected);
}

#[rstest]
#[case(Value::from(1024_i16))]
#[case(Value::from(1024_i32))]
#[case(Value::from(1024_i64))]
#[case(Value::from(1024_u16))]
#[case(Value::from(1024_u32))]
#[case(Value::from(1024_u64))]
#[case(Value::from(1024.0_f64))]
#[case(Value::from("1024"))]
fn int8_overflow_names_the_target(#[case] input: Value) {
    let mut out = 7_i8;
    let errors = int8().apply(&ctx(), &input, Sink::Exact(&mut out)).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].kind, ErrorKind::Range);
    assert_eq!(errors.errors()[0].param("target"), Some("int8"));
    assert_eq!(out, 7);
}

#[test]
fn violations_are_batched() {
    let rules = int().min(10).rejected_values([5]);
    let errors = rules.validate(&ctx(), &Value::from(5_i64)).unwrap_err();

    let found: Vec<_> = errors.iter().map(|e| (e.kind, e.code.as_ref())).collect();
    assert_eq!(
        found,
        vec![(ErrorKind::Rule, codes::FORBIDDEN), (ErrorKind::Range, codes::MIN)]
    );
}

#[test]
fn rule_failures_still_bind() {
    let mut out = 0_u8;
    let errors = uint8()
        .max(5)
        .apply(&ctx(), &Value::from("9"), Sink::Exact(&mut out))
        .unwrap_err();
    assert_eq!(errors.codes(), vec![codes::MAX]);
    assert_eq!(out, 9);
}

#[test]
fn evaluate_runs_rules_on_typed_values() {
    let rules = int32().min_exclusive(0);
    assert_eq!(rules.evaluate(&ctx(), 4).unwrap(), 4);
    let errors = rules.evaluate(&ctx(), 0).unwrap_err();
    assert_eq!(errors.codes(), vec![codes::MIN_EXCLUSIVE]);
}

#[test]
fn closure_rules_see_the_coerced_value() {
    let even = int16().rule_fn("even", |_, v: &i16| {
        if v % 2 == 0 {
            Ok(())
        } else {
            Err(ValidationError::custom("must be even"))
        }
    });
    assert!(even.validate(&ctx(), &Value::from("12")).is_ok());
    let errors = even.validate(&ctx(), &Value::from("13")).unwrap_err();
    assert_eq!(errors.errors()[0].kind, ErrorKind::Rule);
}

// ============================================================================
// NULLS, POINTERS, STRICT MODE
// ============================================================================

#[test]
fn nilable_null_clears_optional_sinks() {
    let rules = int().nilable().min(100);

    let mut optional = Some(4_i64);
    rules.apply(&ctx(), &Value::Null, Sink::Nullable(&mut optional)).unwrap();
    assert_eq!(optional, None);

    let mut dynamic = Value::I64(4);
    rules.apply(&ctx(), &Value::Null, Sink::Dynamic(&mut dynamic)).unwrap();
    assert_eq!(dynamic, Value::Null);

    let mut exact = 4_i64;
    rules.apply(&ctx(), &Value::Null, Sink::Exact(&mut exact)).unwrap();
    assert_eq!(exact, 4);
}

#[test]
fn null_without_nilable_is_a_type_error() {
    let errors = string().validate(&ctx(), &Value::Null).unwrap_err();
    assert_eq!(errors.errors()[0].kind, ErrorKind::Type);
    assert_eq!(errors.errors()[0].code, codes::NULL);
}

#[test]
fn pointers_are_followed() {
    let mut out = 0_i64;
    int().apply(&ctx(), &Value::pointer(Some(5_i32)), Sink::Exact(&mut out)).unwrap();
    assert_eq!(out, 5);

    let errors = int().nilable().validate(&ctx(), &Value::nil_pointer()).unwrap_err();
    assert_eq!(errors.errors()[0].kind, ErrorKind::Type);
}

#[test]
fn nested_pointers_reach_the_final_target() {
    let nested = Value::pointer(Some(Value::pointer(Some(5_i32))));
    let mut out = 0_i64;
    int().apply(&ctx(), &nested, Sink::Exact(&mut out)).unwrap();
    assert_eq!(out, 5);

    let strict = int().strict();
    assert!(strict.validate(&ctx(), &Value::pointer(Some(Value::pointer(Some(5_i64))))).is_ok());
    assert!(strict.validate(&ctx(), &nested).is_err());

    let dangling = Value::pointer(Some(Value::nil_pointer()));
    let errors = int().validate(&ctx(), &dangling).unwrap_err();
    assert_eq!(errors.errors()[0].kind, ErrorKind::Type);
}

#[test]
fn strict_mode_accepts_only_native_values() {
    let rules = int().strict();
    assert!(rules.validate(&ctx(), &Value::from(5_i64)).is_ok());
    assert!(rules.validate(&ctx(), &Value::pointer(Some(5_i64))).is_ok());

    for input in [Value::from("5"), Value::from(5_i32), Value::pointer(Some(5_i32))] {
        let errors = rules.validate(&ctx(), &input).unwrap_err();
        assert_eq!(errors.errors()[0].kind, ErrorKind::Type);
    }
}

#[test]
fn errors_carry_the_field_path() {
    let ctx = ctx().with_field("server").with_field("port");
    let errors = uint16().min(1).validate(&ctx, &Value::from(0_i64)).unwrap_err();
    assert_eq!(errors.errors()[0].field.as_deref(), Some("server.port"));
}

// ============================================================================
// SINK SHAPES
// ============================================================================

#[test]
fn dynamic_sink_keeps_its_numeric_width() {
    let mut slot = Value::I64(0);
    int().apply(&ctx(), &Value::from("-3"), Sink::Dynamic(&mut slot)).unwrap();
    assert_eq!(slot, Value::I64(-3));

    let mut narrower = Value::U8(0);
    let errors = int()
        .apply(&ctx(), &Value::from(3_i64), Sink::Dynamic(&mut narrower))
        .unwrap_err();
    assert_eq!(errors.errors()[0].kind, ErrorKind::Internal);
}

#[test]
fn string_family_writes_text() {
    let mut out = String::new();
    string()
        .apply(&ctx(), &Value::from(42_u32), Sink::Text(&mut out))
        .unwrap();
    assert_eq!(out, "42");
}

#[test]
fn unsupported_sinks_are_internal_errors() {
    let mut text = String::new();
    let errors = int().apply(&ctx(), &Value::from(1_i64), Sink::Text(&mut text)).unwrap_err();
    assert_eq!(errors.errors()[0].kind, ErrorKind::Internal);
    assert_eq!(errors.errors()[0].param("sink"), Some("string"));
}

// ============================================================================
// TEMPORAL
// ============================================================================

#[cfg(feature = "temporal")]
mod temporal {
    use super::*;
    use chrono::{DateTime, TimeDelta};
    use pretty_assertions::assert_eq;

    fn seconds() -> DurationRuleSet {
        duration().unit(TimeDelta::seconds(1))
    }

    #[test]
    fn inexact_duration_needs_a_rounding_policy() {
        let rules = seconds().rounding(Rounding::None);

        let mut numeric = 0_i64;
        let errors = rules
            .apply(&ctx(), &Value::from("5.5s"), Sink::Numeric((&mut numeric).into()))
            .unwrap_err();
        assert_eq!(errors.errors()[0].kind, ErrorKind::Range);

        let mut exact = TimeDelta::zero();
        rules.apply(&ctx(), &Value::from("5.5s"), Sink::Exact(&mut exact)).unwrap();
        assert_eq!(exact, TimeDelta::milliseconds(5_500));
    }

    #[test]
    fn float_sinks_share_the_rounding_policy() {
        let mut out = 0.0_f64;
        let errors = seconds()
            .apply(&ctx(), &Value::from("5.5s"), Sink::Numeric((&mut out).into()))
            .unwrap_err();
        assert_eq!(errors.errors()[0].kind, ErrorKind::Range);

        seconds()
            .rounding(Rounding::HalfEven)
            .apply(&ctx(), &Value::from("6.5s"), Sink::Numeric((&mut out).into()))
            .unwrap();
        assert_eq!(out, 6.0);
    }

    #[rstest]
    #[case("5.5s", Rounding::HalfEven, 6)]
    #[case("6.5s", Rounding::HalfEven, 6)]
    #[case("5.5s", Rounding::HalfUp, 6)]
    #[case("-124.5s", Rounding::HalfUp, -125)]
    fn duration_quotient_rounding(#[case] input: &str, #[case] rounding: Rounding, #[case] expected: i32) {
        let mut out = 0_i32;
        seconds()
            .rounding(rounding)
            .apply(&ctx(), &Value::from(input), Sink::Numeric((&mut out).into()))
            .unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn duration_dynamic_sinks() {
        let rules = seconds();

        let mut number = Value::U32(0);
        rules.apply(&ctx(), &Value::from("1h30m"), Sink::Dynamic(&mut number)).unwrap();
        assert_eq!(number, Value::U32(5_400));

        let mut text = Value::from("");
        rules.apply(&ctx(), &Value::from(90_i64), Sink::Dynamic(&mut text)).unwrap();
        assert_eq!(text, Value::from("1m30s"));

        let mut native = Value::Null;
        rules.apply(&ctx(), &Value::from(2_i64), Sink::Dynamic(&mut native)).unwrap();
        assert_eq!(native, Value::Duration(TimeDelta::seconds(2)));
    }

    #[test]
    fn duration_bounds() {
        let rules = duration().max(TimeDelta::minutes(1));
        let errors = rules.validate(&ctx(), &Value::from("2m")).unwrap_err();
        assert_eq!(errors.codes(), vec![codes::MAX]);
        assert_eq!(errors.errors()[0].param("max"), Some("1m0s"));
    }

    #[test]
    fn time_echoes_the_parsing_layout() {
        let rules = time().layouts([Layout::format("%d/%m/%Y"), Layout::Rfc3339]);

        let mut out = String::new();
        rules.apply(&ctx(), &Value::from("01/03/2024"), Sink::Text(&mut out)).unwrap();
        assert_eq!(out, "01/03/2024");

        rules
            .apply(&ctx(), &Value::from("2024-03-01T10:00:00+02:00"), Sink::Text(&mut out))
            .unwrap();
        assert_eq!(out, "2024-03-01T10:00:00+02:00");

        let pinned = rules.output_layout(Layout::format("%Y"));
        pinned.apply(&ctx(), &Value::from("01/03/2024"), Sink::Text(&mut out)).unwrap();
        assert_eq!(out, "2024");
    }

    #[test]
    fn rfc2822_output_out_of_range_year_is_an_error() {
        let far = DateTime::parse_from_rfc3339("2024-03-01T00:00:00Z").unwrap() + TimeDelta::days(9_000 * 365);
        let rules = time().output_layout(Layout::Rfc2822);

        let mut out = String::new();
        let errors = rules.apply(&ctx(), &Value::Time(far), Sink::Text(&mut out)).unwrap_err();
        assert_eq!(errors.errors()[0].kind, ErrorKind::Internal);

        let mut dynamic = Value::from("");
        assert!(rules.apply(&ctx(), &Value::Time(far), Sink::Dynamic(&mut dynamic)).is_err());
    }

    #[test]
    fn time_into_numeric_sink_is_internal() {
        let mut out = 0_i64;
        let errors = time()
            .apply(&ctx(), &Value::from("2024-03-01T00:00:00Z"), Sink::Numeric((&mut out).into()))
            .unwrap_err();
        assert_eq!(errors.errors()[0].kind, ErrorKind::Internal);
    }

    #[test]
    fn relative_rules_use_the_pinned_clock() {
        let now = DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z").unwrap();
        let ctx = ctx().with_now(now);
        let rules = time().min_diff(TimeDelta::hours(1)).max_diff(TimeDelta::days(1));

        assert!(rules.validate(&ctx, &Value::from("2024-03-01T18:00:00Z")).is_ok());

        let errors = rules.validate(&ctx, &Value::from("2024-03-01T12:30:00Z")).unwrap_err();
        assert_eq!(errors.codes(), vec![codes::MIN_DIFF]);
        assert_eq!(errors.errors()[0].kind, ErrorKind::Range);

        let errors = rules.validate(&ctx, &Value::from("2024-03-03T12:00:00Z")).unwrap_err();
        assert_eq!(errors.codes(), vec![codes::MAX_DIFF]);
    }
}
