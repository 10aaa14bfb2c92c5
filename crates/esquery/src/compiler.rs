//! Structured query to Query DSL compiler.
//!
//! Drives condition translation, group compilation, document assembly and
//! rendering for a [`SimpleQuery`], and provides the canned queries used by
//! document stores (load by ID, existence check, full dump).

use crate::clause::ConditionCollector;
use crate::config::CompileOptions;
use crate::document::{DocumentBuilder, QueryDocument};
use crate::error::CompileResult;
use crate::group::GroupBuilder;
use crate::model::SimpleQuery;
use crate::render;

/// Page size used by [`QueryCompiler::ids_query`].
pub const ID_QUERY_SIZE: i64 = 1000;

/// Compiles [`SimpleQuery`] values into Query DSL documents.
///
/// Holds only immutable options; one compiler can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct QueryCompiler {
    options: CompileOptions,
}

impl QueryCompiler {
    /// Creates a compiler with the given options.
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// The compiler's options.
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compiles a structured query into a document.
    pub fn compile(&self, query: &SimpleQuery) -> CompileResult<QueryDocument> {
        let mut builder = DocumentBuilder::new()
            .with_source(query.columns.iter().cloned())
            .with_size(if query.size > 0 { query.size } else { -1 })
            .with_from(query.offset)
            .with_sorts(&query.sort_by);

        if let Some(group) = &query.conditions {
            let compiled = GroupBuilder::new(&self.options).compile(group)?;
            builder = builder.with_bool(compiled);
        }

        let doc = builder.build();
        tracing::debug!(
            conditions = query.conditions.as_ref().map_or(0, |g| g.condition_count()),
            sort_keys = doc.sort.len(),
            query_kind = doc.query.kind(),
            "Compiled query document"
        );
        Ok(doc)
    }

    /// Compiles a structured query straight to indented Query DSL text.
    pub fn compile_to_string(&self, query: &SimpleQuery) -> CompileResult<String> {
        self.compile(query).map(|doc| render::render(&doc))
    }

    /// Existence check for a set of document IDs.
    ///
    /// Returns no source, up to [`ID_QUERY_SIZE`] hits, and a single
    /// `terms` clause on `_id`.
    pub fn ids_query<I, S>(ids: I) -> QueryDocument
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut terms = ConditionCollector::new();
        terms.terms("_id", ids);
        DocumentBuilder::new()
            .with_size(ID_QUERY_SIZE)
            .with_no_source(true)
            .with_bool(terms.into_boolean())
            .build()
    }

    /// Loads a single document by ID with a `match` on `_id`.
    pub fn by_id_query(id: &str) -> QueryDocument {
        let mut builder = DocumentBuilder::new();
        builder.match_field("_id", id);
        builder.build()
    }

    /// Unrestricted scan returning up to `size` hits.
    pub fn all_query(size: i64) -> QueryDocument {
        DocumentBuilder::new().with_size(size).build()
    }
}
