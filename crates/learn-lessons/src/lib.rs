//! # learn-lessons
//!
//! The sqlearn curriculum and the controller that walks a learner through it.
//!
//! [`Catalog`] holds the ordered, immutable lesson records.
//! [`ProgressionController`] owns the progression state for one session:
//! it runs submissions through a [`learn_core::QueryExecutor`], judges them
//! with the active lesson's rule, and emits [`learn_core::events::ProgressEvent`]s.

pub mod catalog;
pub mod controller;
mod curriculum;

pub use catalog::Catalog;
pub use controller::{Direction, ProgressionController, Submission};
