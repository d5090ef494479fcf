//! Query results and verdicts as the learner sees them.

use std::fmt::Write as _;

use learn_core::QueryResult;
use learn_core::rule::ValidationOutcome;
use learn_lessons::Submission;
use serde::Serialize;

use super::table::{TableOptions, render_entity_table};

/// Render at most `max_rows` rows, keeping engine column and row order.
#[must_use]
pub fn render_result(result: &QueryResult, max_rows: usize, options: TableOptions) -> String {
    if result.columns.is_empty() {
        return String::from("(statement executed, no result set)");
    }

    let headers: Vec<&str> = result.columns.iter().map(String::as_str).collect();
    let rows: Vec<Vec<String>> = result
        .iter()
        .take(max_rows)
        .map(|row| {
            headers
                .iter()
                .map(|column| row.get(column).map(ToString::to_string).unwrap_or_default())
                .collect()
        })
        .collect();

    let mut out = render_entity_table(&headers, &rows, options);
    let total = result.len();
    if total == 0 {
        out.push_str("\n(0 rows)");
    } else if total > max_rows {
        let _ = write!(out, "\n(showing {max_rows} of {total} rows)");
    } else {
        let _ = write!(out, "\n({total} row{})", if total == 1 { "" } else { "s" });
    }
    out
}

/// Learner-facing lines for a judged submission.
#[must_use]
pub fn render_verdict(outcome: &ValidationOutcome) -> String {
    if outcome.passed {
        return String::from("✓ Correct!");
    }
    let mut out = String::from("✗ Not quite:");
    for failure in &outcome.failures {
        let _ = write!(out, "\n  - {failure}");
    }
    out
}

/// Full text for one submission: rows (or error) followed by the verdict.
#[must_use]
pub fn render_submission(submission: &Submission, max_rows: usize, options: TableOptions) -> String {
    match &submission.result {
        Err(error) => format!("Error: {error}"),
        Ok(result) => {
            let mut out = render_result(result, max_rows, options);
            if let Some(outcome) = &submission.outcome {
                out.push_str("\n\n");
                out.push_str(&render_verdict(outcome));
            }
            if submission.completed {
                out.push_str("\nLesson complete. The companion task is now unlocked.");
            }
            out
        }
    }
}

/// Machine-readable form of a submission for `--format json|raw`.
#[derive(Debug, Serialize)]
pub struct SubmissionReport<'a> {
    pub lesson_id: u32,
    pub passed: bool,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'a QueryResult>,
    pub failures: Vec<String>,
}

impl<'a> From<&'a Submission> for SubmissionReport<'a> {
    fn from(submission: &'a Submission) -> Self {
        Self {
            lesson_id: submission.lesson_id,
            passed: submission.passed,
            completed: submission.completed,
            error: submission.result.as_ref().err().map(|e| e.message.as_str()),
            result: submission.result.as_ref().ok(),
            failures: submission
                .outcome
                .iter()
                .flat_map(|outcome| outcome.failures.iter().map(ToString::to_string))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use learn_core::rule::{RowCount, RuleFailure};
    use learn_core::{QueryError, Row, ScalarValue};
    use pretty_assertions::assert_eq;

    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    fn numbers(n: i64) -> QueryResult {
        QueryResult::new(
            vec!["n".to_string(), "label".to_string()],
            (1..=n)
                .map(|i| {
                    Row::from_iter([
                        ("n", ScalarValue::Integer(i)),
                        ("label", ScalarValue::Null),
                    ])
                })
                .collect(),
        )
    }

    #[test]
    fn truncates_to_max_rows_and_says_so() {
        let out = render_result(&numbers(14), 10, PLAIN);
        assert_eq!(out.lines().count(), 2 + 10 + 1);
        assert!(out.ends_with("(showing 10 of 14 rows)"));
    }

    #[test]
    fn keeps_engine_column_order() {
        let out = render_result(&numbers(1), 10, PLAIN);
        let header = out.lines().next().unwrap();
        assert!(header.find('n') < header.find("label"));
        assert!(out.contains("NULL"));
        assert!(out.ends_with("(1 row)"));
    }

    #[test]
    fn empty_result_still_shows_headers() {
        let result = QueryResult::new(vec!["title".to_string()], vec![]);
        let out = render_result(&result, 10, PLAIN);
        assert!(out.starts_with("title"));
        assert!(out.ends_with("(0 rows)"));
    }

    #[test]
    fn verdict_lists_every_failure() {
        let outcome = ValidationOutcome::from_failures(vec![
            RuleFailure::MissingKeyword {
                keyword: ";".into(),
            },
            RuleFailure::RowCount {
                expected: RowCount::Exactly(3),
                actual: 14,
            },
        ]);
        let out = render_verdict(&outcome);
        assert_eq!(out.lines().count(), 3);
        assert!(out.starts_with("✗"));
    }

    #[test]
    fn report_carries_error_message() {
        let submission = Submission {
            lesson_id: 2,
            result: Err(QueryError::new("no such column: titel")),
            outcome: None,
            passed: false,
            completed: false,
        };
        let json = serde_json::to_value(SubmissionReport::from(&submission)).unwrap();
        assert_eq!(json["error"], "no such column: titel");
        assert!(json.get("result").is_none());
        assert_eq!(render_submission(&submission, 10, PLAIN), "Error: no such column: titel");
    }
}
