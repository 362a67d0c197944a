//! askquery – answer natural-language questions about a tabular dataset.
//!
//! The pipeline: a raw query is classified into an action (via an externally
//! trained intent model), fuzzy-matched to a table column, and scanned for
//! filter predicates; the resulting [`query::ResolvedIntent`] is executed
//! against the table. Single-threaded and synchronous: one query is fully
//! resolved and executed before the next, with the table and classifier
//! loaded once at startup and read-only thereafter.

pub mod config;
pub mod data;
pub mod error;
pub mod intent;
pub mod query;

pub use config::QueryConfig;
pub use error::QueryError;
pub use query::{execute, resolve};
