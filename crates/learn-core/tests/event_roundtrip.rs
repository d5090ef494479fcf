//! Serde roundtrip and JsonSchema validation tests for progress events.

use chrono::Utc;
use learn_core::events::{ProgressEvent, ProgressEventKind};
use learn_core::progression::LessonPhase;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    lesson_started_roundtrip,
    ProgressEvent,
    ProgressEvent {
        at: Utc::now(),
        kind: ProgressEventKind::LessonStarted { lesson_id: 1 },
    }
);

roundtrip_and_validate!(
    query_executed_roundtrip,
    ProgressEvent,
    ProgressEvent {
        at: Utc::now(),
        kind: ProgressEventKind::QueryExecuted {
            lesson_id: 2,
            success: false,
        },
    }
);

roundtrip_and_validate!(
    lesson_completed_roundtrip,
    ProgressEvent,
    ProgressEvent {
        at: Utc::now(),
        kind: ProgressEventKind::LessonCompleted {
            lesson_id: 5,
            attempts: 3,
        },
    }
);

roundtrip_and_validate!(
    hint_shown_roundtrip,
    ProgressEvent,
    ProgressEvent {
        at: Utc::now(),
        kind: ProgressEventKind::HintShown {
            lesson_id: 4,
            hint_number: 2,
        },
    }
);

roundtrip_and_validate!(
    navigated_roundtrip,
    ProgressEvent,
    ProgressEvent {
        at: Utc::now(),
        kind: ProgressEventKind::Navigated { from: 7, to: 8 },
    }
);

roundtrip_and_validate!(phase_roundtrip, LessonPhase, LessonPhase::SqlPassed);

#[test]
fn event_schema_rejects_unknown_tag() {
    let schema = serde_json::to_value(schema_for!(ProgressEvent)).unwrap();
    let bogus = serde_json::json!({
        "at": Utc::now().to_rfc3339(),
        "event": "lesson_abandoned",
        "lesson_id": 1
    });
    assert!(!validate_against_schema(&schema, &bogus).is_empty());
}
