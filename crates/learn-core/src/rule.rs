//! Declarative validation rules and their interpreter.
//!
//! A lesson's rule is plain data. [`ValidationRule::evaluate`] is a pure
//! function of the submitted query text and the returned result; it never
//! touches the engine. Every check is conjunctive and every failed check is
//! reported, so feedback can say exactly what is missing.
//!
//! Two families of checks are combined on purpose:
//!
//! ```text
//! lexical      keywords, literals            (right technique)
//! result-shape columns, rows, values, order  (right answer)
//! ```

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::result::QueryResult;
use crate::value::ScalarValue;

// ---------------------------------------------------------------------------
// Rule descriptor
// ---------------------------------------------------------------------------

/// Everything a submission must satisfy to pass a lesson's SQL step.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationRule {
    /// Keywords, identifiers, and punctuation required in the query text.
    pub keywords: Vec<String>,
    /// Literal values required in the query text.
    pub literals: Vec<String>,
    pub columns: ColumnRule,
    pub rows: RowCount,
    /// Assertions applied to every returned row.
    pub values: Vec<ValueCheck>,
    pub ordering: Option<OrderingCheck>,
}

/// Expected result columns. Comparison ignores order and ASCII case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "columns", rename_all = "snake_case")]
pub enum ColumnRule {
    #[default]
    Any,
    /// Exactly this column set, and exactly this many columns.
    Exactly(Vec<String>),
    /// At least these columns.
    Includes(Vec<String>),
}

/// Expected number of result rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum RowCount {
    #[default]
    Any,
    NonEmpty,
    Exactly(usize),
    AtLeast(usize),
    AtMost(usize),
}

impl RowCount {
    #[must_use]
    pub const fn matches(self, actual: usize) -> bool {
        match self {
            Self::Any => true,
            Self::NonEmpty => actual > 0,
            Self::Exactly(n) => actual == n,
            Self::AtLeast(n) => actual >= n,
            Self::AtMost(n) => actual <= n,
        }
    }
}

impl fmt::Display for RowCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any number of rows"),
            Self::NonEmpty => f.write_str("at least one row"),
            Self::Exactly(n) => write!(f, "exactly {n} row(s)"),
            Self::AtLeast(n) => write!(f, "at least {n} row(s)"),
            Self::AtMost(n) => write!(f, "at most {n} row(s)"),
        }
    }
}

/// Comparison operator for per-row value assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Comparison {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
        }
    }

    #[must_use]
    pub const fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering.is_eq(),
            Self::Ne => ordering.is_ne(),
            Self::Gt => ordering.is_gt(),
            Self::Ge => ordering.is_ge(),
            Self::Lt => ordering.is_lt(),
            Self::Le => ordering.is_le(),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `column <op> value` must hold for every row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCheck {
    pub column: String,
    pub op: Comparison,
    pub value: ScalarValue,
}

impl ValueCheck {
    /// `NULL`, a missing column, or an incomparable kind never satisfies a check.
    #[must_use]
    pub fn holds_for(&self, actual: Option<&ScalarValue>) -> bool {
        actual
            .and_then(|actual| actual.compare(&self.value))
            .is_some_and(|ordering| self.op.holds(ordering))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }

    /// Whether `previous` may precede `next` in this direction (ties allowed).
    #[must_use]
    pub const fn allows(self, previous_vs_next: Ordering) -> bool {
        match self {
            Self::Ascending => previous_vs_next.is_le(),
            Self::Descending => previous_vs_next.is_ge(),
        }
    }
}

/// Consecutive rows must be ordered by `column` in `direction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderingCheck {
    pub column: String,
    pub direction: SortDirection,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// One failed check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleFailure {
    MissingKeyword {
        keyword: String,
    },
    MissingLiteral {
        literal: String,
    },
    Columns {
        expected: ColumnRule,
        actual: Vec<String>,
    },
    RowCount {
        expected: RowCount,
        actual: usize,
    },
    Value {
        row: usize,
        check: ValueCheck,
        actual: Option<ScalarValue>,
    },
    Ordering {
        row: usize,
        check: OrderingCheck,
    },
}

impl fmt::Display for RuleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKeyword { keyword } => {
                write!(f, "your query should use `{}`", keyword.to_uppercase())
            }
            Self::MissingLiteral { literal } => {
                write!(f, "your query should mention the value `{literal}`")
            }
            Self::Columns { expected, actual } => {
                let actual = actual.join(", ");
                match expected {
                    ColumnRule::Any => write!(f, "unexpected columns: {actual}"),
                    ColumnRule::Exactly(cols) => write!(
                        f,
                        "expected exactly the columns [{}], got [{actual}]",
                        cols.join(", ")
                    ),
                    ColumnRule::Includes(cols) => write!(
                        f,
                        "expected the columns [{}] in the result, got [{actual}]",
                        cols.join(", ")
                    ),
                }
            }
            Self::RowCount { expected, actual } => {
                write!(f, "expected {expected}, got {actual}")
            }
            Self::Value { row, check, actual } => match actual {
                Some(actual) => write!(
                    f,
                    "row {}: expected {} {} {}, found {actual}",
                    row + 1,
                    check.column,
                    check.op,
                    check.value
                ),
                None => write!(f, "row {}: column `{}` is missing", row + 1, check.column),
            },
            Self::Ordering { row, check } => write!(
                f,
                "rows {} and {} are not in {} order of {}",
                row,
                row + 1,
                check.direction.as_str(),
                check.column
            ),
        }
    }
}

/// Result of evaluating a rule. `passed` iff `failures` is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationOutcome {
    pub passed: bool,
    pub failures: Vec<RuleFailure>,
}

impl ValidationOutcome {
    #[must_use]
    pub fn from_failures(failures: Vec<RuleFailure>) -> Self {
        Self {
            passed: failures.is_empty(),
            failures,
        }
    }
}

// ---------------------------------------------------------------------------
// Builder + interpreter
// ---------------------------------------------------------------------------

impl ValidationRule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn literals<I, S>(mut self, literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.literals.extend(literals.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn columns(mut self, columns: ColumnRule) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub const fn rows(mut self, rows: RowCount) -> Self {
        self.rows = rows;
        self
    }

    #[must_use]
    pub fn value(
        mut self,
        column: impl Into<String>,
        op: Comparison,
        value: impl Into<ScalarValue>,
    ) -> Self {
        self.values.push(ValueCheck {
            column: column.into(),
            op,
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn ordered(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.ordering = Some(OrderingCheck {
            column: column.into(),
            direction,
        });
        self
    }

    /// Evaluate every check against a submission and its result.
    #[must_use]
    pub fn evaluate(&self, query: &str, result: &QueryResult) -> ValidationOutcome {
        let normalized = normalize_query(query);
        let mut failures = Vec::new();

        for keyword in &self.keywords {
            if !contains_token(&normalized, &normalize_query(keyword)) {
                failures.push(RuleFailure::MissingKeyword {
                    keyword: keyword.clone(),
                });
            }
        }
        for literal in &self.literals {
            if !contains_token(&normalized, &normalize_query(literal)) {
                failures.push(RuleFailure::MissingLiteral {
                    literal: literal.clone(),
                });
            }
        }

        if !columns_match(&self.columns, &result.columns) {
            failures.push(RuleFailure::Columns {
                expected: self.columns.clone(),
                actual: result.columns.clone(),
            });
        }

        if !self.rows.matches(result.len()) {
            failures.push(RuleFailure::RowCount {
                expected: self.rows,
                actual: result.len(),
            });
        }

        for check in &self.values {
            let offending = result
                .iter()
                .enumerate()
                .find(|(_, row)| !check.holds_for(row.get_ignore_case(&check.column)));
            if let Some((index, row)) = offending {
                failures.push(RuleFailure::Value {
                    row: index,
                    check: check.clone(),
                    actual: row.get_ignore_case(&check.column).cloned(),
                });
            }
        }

        if let Some(check) = &self.ordering
            && let Some(row) = first_out_of_order(check, result)
        {
            failures.push(RuleFailure::Ordering {
                row,
                check: check.clone(),
            });
        }

        ValidationOutcome::from_failures(failures)
    }

    /// Shorthand for `evaluate(..).passed`.
    #[must_use]
    pub fn accepts(&self, query: &str, result: &QueryResult) -> bool {
        self.evaluate(query, result).passed
    }
}

/// Lexical-only rule for the companion step. Informational, never gating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompanionRule {
    pub tokens: Vec<String>,
}

impl CompanionRule {
    #[must_use]
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn evaluate(&self, answer: &str) -> ValidationOutcome {
        let normalized = normalize_query(answer);
        let failures = self
            .tokens
            .iter()
            .filter(|token| !contains_token(&normalized, &normalize_query(token)))
            .map(|token| RuleFailure::MissingKeyword {
                keyword: token.clone(),
            })
            .collect();
        ValidationOutcome::from_failures(failures)
    }
}

/// Lowercase and collapse whitespace runs to a single space.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

const fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whether `token` occurs in `haystack`.
///
/// Where the token starts or ends with an identifier character, the match must
/// sit on an identifier boundary there (`desc` does not match `description`).
/// Punctuation edges (`*`, `;`, quotes) match anywhere.
fn contains_token(haystack: &str, token: &str) -> bool {
    if token.is_empty() {
        return true;
    }
    let guard_start = token.chars().next().is_some_and(is_ident_char);
    let guard_end = token.chars().next_back().is_some_and(is_ident_char);

    haystack.match_indices(token).any(|(start, _)| {
        let end = start + token.len();
        let before_ok = !guard_start
            || haystack[..start]
                .chars()
                .next_back()
                .is_none_or(|c| !is_ident_char(c));
        let after_ok = !guard_end || haystack[end..].chars().next().is_none_or(|c| !is_ident_char(c));
        before_ok && after_ok
    })
}

fn columns_match(rule: &ColumnRule, actual: &[String]) -> bool {
    let has = |wanted: &String| actual.iter().any(|col| col.eq_ignore_ascii_case(wanted));
    match rule {
        ColumnRule::Any => true,
        ColumnRule::Exactly(expected) => {
            actual.len() == expected.len()
                && expected.iter().all(has)
                && actual
                    .iter()
                    .all(|col| expected.iter().any(|e| e.eq_ignore_ascii_case(col)))
        }
        ColumnRule::Includes(expected) => expected.iter().all(has),
    }
}

/// Zero-based index of the first row that is out of place, if any.
///
/// A missing or incomparable value breaks the ordering.
fn first_out_of_order(check: &OrderingCheck, result: &QueryResult) -> Option<usize> {
    result.rows.windows(2).enumerate().find_map(|(index, pair)| {
        let previous = pair[0].get_ignore_case(&check.column);
        let next = pair[1].get_ignore_case(&check.column);
        let in_order = match (previous, next) {
            (Some(previous), Some(next)) => previous
                .compare(next)
                .is_some_and(|ordering| check.direction.allows(ordering)),
            _ => false,
        };
        (!in_order).then_some(index + 1)
    })
}
