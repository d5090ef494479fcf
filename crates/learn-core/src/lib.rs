//! # learn-core
//!
//! Core types, validation rules, and progression state for sqlearn.
//!
//! This crate provides the foundational types shared across all sqlearn crates:
//! - Scalar values, rows, and query results as returned by the engine
//! - Lesson records with their SQL and companion tasks
//! - Declarative validation rules and the pure interpreter that evaluates them
//! - Per-lesson progression state with its phase state machine
//! - Progress events emitted outward by the progression controller
//! - The `QueryExecutor` seam between lesson logic and the SQL engine
//! - Cross-cutting error types
//!
//! Nothing here touches the engine; everything is testable on plain data.

pub mod errors;
pub mod events;
pub mod executor;
pub mod lesson;
pub mod progression;
pub mod result;
pub mod rule;
pub mod value;

pub use errors::{CoreError, QueryError};
pub use executor::QueryExecutor;
pub use result::{QueryResult, Row};
pub use value::ScalarValue;
