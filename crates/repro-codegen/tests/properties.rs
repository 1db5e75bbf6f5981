//! Property tests: ordering, import, scope gating and literal invariants
//! of generated reproducibility scripts.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use repro_codegen::*;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
}

/// Generate `(start, end)` date pairs with `start <= end`.
fn arb_intervals(min: usize, max: usize) -> impl Strategy<Value = Vec<(NaiveDate, NaiveDate)>> {
    prop::collection::vec((0i64..10_000, 0i64..3_000), min..max).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(offset, length)| {
                let start = base_date() + Duration::days(offset);
                (start, start + Duration::days(length))
            })
            .collect()
    })
}

/// One parameter per interval, inserted in the given order.
fn reform_from(intervals: &[(NaiveDate, NaiveDate)]) -> Reform {
    intervals
        .iter()
        .enumerate()
        .fold(Reform::default(), |reform, (i, (start, end))| {
            reform.with_update(format!("gov.p{}", i), format!("{}.{}", start, end), true)
        })
}

/// Region names outside the US set.
fn arb_non_us_region() -> impl Strategy<Value = String> {
    "[a-z_]{2,10}".prop_filter("non-US region", |r| r != "us" && r != "enhanced_us")
}

fn arb_key() -> impl Strategy<Value = String> {
    "[a-z_]{1,8}".prop_filter("keyword-free key", |k| {
        !["true", "false", "null"].iter().any(|w| k.contains(w))
    })
}

/// Nested JSON made of objects, arrays, booleans, nulls and integers.
fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (0i64..1_000_000).prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn generate(request: &ReproRequest) -> Vec<String> {
    ReproEngine::default().generate(request).unwrap().into_lines()
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// The date range is the calendar min/max whatever the insertion order.
    #[test]
    fn date_range_is_calendar_extent(
        intervals in arb_intervals(1, 12).prop_shuffle(),
    ) {
        let policy = Policy::new(reform_from(&intervals));
        let range = start_end_dates(&policy).unwrap().unwrap();

        let earliest = intervals.iter().map(|(s, _)| *s).min().unwrap();
        let latest = intervals.iter().map(|(_, e)| *e).max().unwrap();
        prop_assert_eq!(range.earliest_start, earliest.to_string());
        prop_assert_eq!(range.latest_end, latest.to_string());
    }

    /// Reform imports appear exactly when the reform is non-empty.
    #[test]
    fn header_imports_track_reform(intervals in arb_intervals(0, 5)) {
        let request = ReproRequest::policy(Metadata::new("policyengine_uk"), "uk")
            .with_reform(reform_from(&intervals));
        let ctx_config = CodegenConfig::default();
        let lines = header::emit(&EmitContext::new(&request, &ctx_config));
        let expected = if intervals.is_empty() { 1 } else { 3 };
        prop_assert_eq!(lines.len(), expected);
    }

    /// Population stages are silent for households, and vice versa.
    #[test]
    fn scope_gates_emitters(
        intervals in arb_intervals(1, 4),
        us in any::<bool>(),
    ) {
        let config = CodegenConfig::default();
        let region = if us { "us" } else { "uk" };

        let mut household = ReproRequest::household(
            Metadata::new("policyengine_us"),
            json!({ "people": { "you": {} } }),
        )
        .with_reform(reform_from(&intervals));
        household.region = region.to_string();
        let ctx = EmitContext::new(&household, &config);
        prop_assert!(baseline::emit(&ctx).unwrap().is_empty());
        prop_assert!(implementation::emit(&ctx).is_empty());

        let mut population = ReproRequest::policy(Metadata::new("policyengine_us"), region)
            .with_reform(reform_from(&intervals));
        population.household_input = Some(json!({ "people": { "you": {} } }));
        let ctx = EmitContext::new(&population, &config);
        prop_assert!(situation::emit(&ctx, &PassthroughNormaliser).unwrap().is_empty());
    }

    /// No baseline reform outside the US regions.
    #[test]
    fn baseline_only_for_us(
        intervals in arb_intervals(1, 6),
        region in arb_non_us_region(),
    ) {
        let request = ReproRequest::policy(Metadata::new("policyengine_us"), region)
            .with_reform(reform_from(&intervals));
        let lines = generate(&request);
        prop_assert!(!lines.iter().any(|l| l.contains("modify_baseline")));
        prop_assert!(!lines.iter().any(|l| l.contains("reported_state_income_tax")));
        prop_assert_eq!(lines.last().map(String::as_str), Some("difference_person = reformed_person - baseline_person"));
    }

    /// Each parameter interval yields one three-line update, in order.
    #[test]
    fn reform_updates_in_insertion_order(intervals in arb_intervals(1, 8)) {
        let request = ReproRequest::policy(Metadata::new("policyengine_uk"), "uk")
            .with_reform(reform_from(&intervals));
        let lines = generate(&request);
        let updates: Vec<&String> = lines
            .iter()
            .filter(|l| l.starts_with("    parameters.gov.p"))
            .collect();
        prop_assert_eq!(updates.len(), intervals.len());
        for (i, line) in updates.iter().enumerate() {
            let expected = format!("    parameters.gov.p{}.update(", i);
            prop_assert_eq!(line.as_str(), expected.as_str());
        }
    }

    /// Keyword substitution leaves only Python keywords and nothing else changed.
    #[test]
    fn literal_round_trips_keywords(value in arb_value()) {
        let literal = python_literal(&value).unwrap();
        prop_assert!(!literal.contains("true"));
        prop_assert!(!literal.contains("false"));
        prop_assert!(!literal.contains("null"));

        let restored = literal
            .replace("True", "true")
            .replace("False", "false")
            .replace("None", "null");
        let parsed: Value = serde_json::from_str(&restored).unwrap();
        prop_assert_eq!(parsed, value);
    }
}
