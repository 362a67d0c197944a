//! Query understanding and execution.
//!
//! `resolver` turns a raw question into a [`ResolvedIntent`] by combining
//! the intent classifier, the fuzzy column `matcher`, and the `filters`
//! extractor; `executor` applies the resolved action to the table.

pub mod executor;
pub mod filters;
pub mod matcher;
pub mod resolver;

pub use executor::{execute, ActionOutput};
pub use matcher::{match_columns, ColumnMatch};
pub use resolver::{resolve, ResolvedIntent};
