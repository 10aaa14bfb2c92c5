//! Structured query compiler for Elasticsearch Query DSL.
//!
//! This crate turns backend-agnostic query models (field/operator/value
//! conditions, boolean groups, sort keys, paging and projection) into
//! Elasticsearch search request bodies. It does not talk to a cluster: the
//! output is JSON text for whatever client sends the request.
//!
//! # Pipeline
//!
//! - [`translate`] - one condition to one clause (`eq`, `between`, `gt`, ...)
//! - [`group`] - condition groups to nested `bool` clauses
//! - [`document`] - paging, `_source`, `sort` and top-level query selection
//! - [`render`] - deterministic JSON rendering
//! - [`compiler`] - the [`QueryCompiler`] façade over all of the above
//!
//! # Example
//!
//! ```
//! use esquery::model::{Condition, ConditionGroup, SimpleQuery};
//! use esquery::QueryCompiler;
//! use serde_json::json;
//!
//! let query = SimpleQuery::new()
//!     .with_size(10)
//!     .with_conditions(
//!         ConditionGroup::and()
//!             .with_condition(Condition::eq("status", "active"))
//!             .with_group(
//!                 ConditionGroup::or()
//!                     .with_condition(Condition::between("age", "18", "30"))
//!                     .with_condition(Condition::new("score", "gte", ["90"])),
//!             ),
//!     );
//!
//! let doc = QueryCompiler::default().compile(&query)?;
//! assert_eq!(
//!     esquery::render::document_value(&doc),
//!     json!({
//!         "size": 10,
//!         "query": { "bool": { "must": [
//!             { "match": { "status": "active" } },
//!             { "bool": {
//!                 "should": [
//!                     { "range": { "age": { "gte": "18", "lte": "30" } } },
//!                     { "range": { "score": { "gte": "90" } } }
//!                 ],
//!                 "minimum_should_match": 1
//!             } }
//!         ] } }
//!     })
//! );
//! # Ok::<(), esquery::CompileError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod clause;
pub mod compiler;
pub mod config;
pub mod document;
pub mod error;
pub mod group;
pub mod mapping;
pub mod model;
pub mod render;
pub mod translate;

pub use clause::{BooleanClause, ConditionCollector, QueryClause};
pub use compiler::QueryCompiler;
pub use config::{CompileOptions, UnsupportedPolicy};
pub use document::{DocumentBuilder, Projection, QueryDocument};
pub use error::{CompileError, CompileResult};
pub use model::{Condition, ConditionGroup, GroupOperator, SimpleQuery, SortDirection, SortSpec};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
