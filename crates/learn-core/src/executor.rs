//! The seam between lesson logic and the SQL engine.

use crate::errors::QueryError;
use crate::result::QueryResult;

/// Runs one learner query and returns its rows.
///
/// Implementations surface only the first statement's result set, preserve
/// engine column and row order, and release any cursor before returning on
/// both the success and the error path. Not safe for concurrent use on one
/// handle; callers issue at most one `execute` at a time.
#[allow(async_fn_in_trait)]
pub trait QueryExecutor {
    async fn execute(&self, query: &str) -> Result<QueryResult, QueryError>;
}
