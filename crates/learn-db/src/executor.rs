//! Learner query execution against the live database.

use std::fmt::Write as _;
use std::time::Instant;

use learn_core::{QueryError, QueryExecutor, QueryResult, Row, ScalarValue};

use crate::TutorDb;

/// Map an engine value onto the four scalar kinds.
///
/// Blobs have no lesson use; they are shown as SQL hex literals (`X'CAFE'`).
pub(crate) fn scalar_from(value: libsql::Value) -> ScalarValue {
    match value {
        libsql::Value::Null => ScalarValue::Null,
        libsql::Value::Integer(i) => ScalarValue::Integer(i),
        libsql::Value::Real(r) => ScalarValue::Real(r),
        libsql::Value::Text(t) => ScalarValue::Text(t),
        libsql::Value::Blob(bytes) => {
            let mut hex = String::with_capacity(bytes.len() * 2 + 3);
            hex.push_str("X'");
            for byte in &bytes {
                let _ = write!(hex, "{byte:02X}");
            }
            hex.push('\'');
            ScalarValue::Text(hex)
        }
    }
}

/// Run `query` and drain its first result set.
///
/// The cursor lives only inside this function, so it is released on every
/// return path.
pub(crate) async fn collect(
    conn: &libsql::Connection,
    query: &str,
) -> Result<QueryResult, libsql::Error> {
    let mut rows = conn.query(query, ()).await?;

    let names: Vec<String> = (0..rows.column_count())
        .map(|i| rows.column_name(i).unwrap_or_default().to_string())
        .collect();
    let mut columns: Vec<String> = Vec::with_capacity(names.len());
    for name in &names {
        if !columns.contains(name) {
            columns.push(name.clone());
        }
    }

    let mut out = Vec::new();
    while let Some(row) = rows.next().await? {
        let mut record = Row::new();
        for (idx, name) in (0_i32..).zip(&names) {
            record.insert(name.as_str(), scalar_from(row.get_value(idx)?));
        }
        out.push(record);
    }
    Ok(QueryResult::new(columns, out))
}

impl QueryExecutor for TutorDb {
    async fn execute(&self, query: &str) -> Result<QueryResult, QueryError> {
        if query.trim().is_empty() {
            return Err(QueryError::blank());
        }
        let handle = self.handle().ok_or_else(QueryError::not_initialized)?;
        if !has_statement(query) {
            return Ok(QueryResult::default());
        }

        let started = Instant::now();
        match collect(handle.conn(), query).await {
            Ok(result) => {
                tracing::debug!(
                    rows = result.len(),
                    elapsed_ms = started.elapsed().as_millis(),
                    "query executed"
                );
                Ok(result)
            }
            Err(e) => {
                tracing::debug!(
                    elapsed_ms = started.elapsed().as_millis(),
                    error = %e,
                    "query failed"
                );
                Err(QueryError::new(engine_message(&e)))
            }
        }
    }
}

/// Whether `query` holds anything besides comments, `;` and whitespace.
///
/// The engine prepares nothing for such input; it is an empty result.
fn has_statement(query: &str) -> bool {
    let mut rest = query;
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ';');
        if let Some(line) = rest.strip_prefix("--") {
            rest = line.split_once('\n').map_or("", |(_, tail)| tail);
        } else if let Some(block) = rest.strip_prefix("/*") {
            rest = block.split_once("*/").map_or("", |(_, tail)| tail);
        } else {
            return !rest.is_empty();
        }
    }
}

/// The engine's own wording, without libSQL's wrapper prefix.
fn engine_message(err: &libsql::Error) -> String {
    match err {
        libsql::Error::SqliteFailure(_, msg) => msg.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blobs_render_as_hex_literals() {
        let value = scalar_from(libsql::Value::Blob(vec![0xCA, 0xFE, 0x01]));
        assert_eq!(value, ScalarValue::Text("X'CAFE01'".to_string()));
    }

    #[test]
    fn comments_and_separators_are_not_statements() {
        for query in [";", " ;; ", "-- just a comment", "/* c */", "/* a */ -- b\n;", "/* open"] {
            assert!(!has_statement(query), "{query:?}");
        }
        for query in ["SELECT 1", "-- note\nSELECT 1", "/* c */ SELECT 1;", "; SELECT 1"] {
            assert!(has_statement(query), "{query:?}");
        }
    }

    #[test]
    fn scalars_map_one_to_one() {
        assert_eq!(scalar_from(libsql::Value::Null), ScalarValue::Null);
        assert_eq!(scalar_from(libsql::Value::Integer(7)), ScalarValue::Integer(7));
        assert_eq!(scalar_from(libsql::Value::Real(1.5)), ScalarValue::Real(1.5));
        assert_eq!(
            scalar_from(libsql::Value::Text("x".into())),
            ScalarValue::Text("x".into())
        );
    }
}
