//! Assembly of the full query document.
//!
//! [`DocumentBuilder`] collects paging, projection, sort order and up to
//! three query sources, then picks the top-level query by precedence:
//!
//! 1. a non-empty boolean clause,
//! 2. a non-empty flat condition collector (as a conjunction),
//! 3. a single direct match,
//! 4. `match_all`.

use crate::clause::{BooleanClause, ConditionCollector, MatchClause, QueryClause};
use crate::model::{SortDirection, SortSpec};

/// Which parts of `_source` to return.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
    /// Whole source document (`_source` omitted).
    #[default]
    All,
    /// Only the listed fields.
    Fields(Vec<String>),
    /// No source at all (`"_source": false`), for ID-only lookups.
    NoSource,
}

/// A compiled search request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDocument {
    /// Page size. `None` leaves the engine default.
    pub size: Option<u64>,
    /// Hits to skip. `None` starts at the first hit.
    pub from: Option<u64>,
    /// Source projection.
    pub projection: Projection,
    /// Sort keys in input order. Empty leaves the engine default ordering.
    pub sort: Vec<SortSpec>,
    /// The top-level query.
    pub query: QueryClause,
}

impl Default for QueryDocument {
    fn default() -> Self {
        Self {
            size: None,
            from: None,
            projection: Projection::All,
            sort: Vec::new(),
            query: QueryClause::MatchAll,
        }
    }
}

/// Builds a [`QueryDocument`].
///
/// A builder is meant for a single compile; create a new one per request.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    size: i64,
    from: i64,
    source: Vec<String>,
    no_source: bool,
    sort: Vec<SortSpec>,
    bool_clause: BooleanClause,
    collector: ConditionCollector,
    match_condition: Option<MatchClause>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self {
            size: -1,
            from: 0,
            source: Vec::new(),
            no_source: false,
            sort: Vec::new(),
            bool_clause: BooleanClause::new(),
            collector: ConditionCollector::new(),
            match_condition: None,
        }
    }
}

impl DocumentBuilder {
    /// Creates a builder with every setting unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size. Any negative value means unset.
    pub fn with_size(mut self, size: i64) -> Self {
        self.size = size;
        self
    }

    /// Sets the offset. Zero or negative is omitted.
    pub fn with_from(mut self, from: i64) -> Self {
        self.from = from;
        self
    }

    /// Restricts the returned source to the given fields.
    ///
    /// Takes precedence over [`with_no_source`](Self::with_no_source).
    pub fn with_source<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Excludes the source document from hits.
    pub fn with_no_source(mut self, no_source: bool) -> Self {
        self.no_source = no_source;
        self
    }

    /// Appends a sort key.
    pub fn add_sort(&mut self, field: impl Into<String>, direction: SortDirection) {
        self.sort.push(SortSpec::new(field, direction));
    }

    /// Replaces every sort key with a single one.
    pub fn set_sort(&mut self, field: impl Into<String>, direction: SortDirection) {
        self.sort = vec![SortSpec::new(field, direction)];
    }

    /// Appends sort keys in order.
    pub fn with_sorts<'s>(mut self, sorts: impl IntoIterator<Item = &'s SortSpec>) -> Self {
        self.sort.extend(sorts.into_iter().cloned());
        self
    }

    /// Sets the boolean query source.
    pub fn with_bool(mut self, clause: BooleanClause) -> Self {
        self.bool_clause = clause;
        self
    }

    /// Mutable access to the boolean query source.
    pub fn bool_mut(&mut self) -> &mut BooleanClause {
        &mut self.bool_clause
    }

    /// Mutable access to the flat condition collector.
    pub fn collector_mut(&mut self) -> &mut ConditionCollector {
        &mut self.collector
    }

    /// Sets the direct single-match query source.
    pub fn match_field(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.match_condition = Some(MatchClause::new(field, value));
    }

    /// Assembles the document.
    pub fn build(self) -> QueryDocument {
        let size = u64::try_from(self.size).ok();
        let from = u64::try_from(self.from).ok().filter(|from| *from > 0);

        let projection = if !self.source.is_empty() {
            Projection::Fields(self.source)
        } else if self.no_source {
            Projection::NoSource
        } else {
            Projection::All
        };

        let query = if !self.bool_clause.is_empty() {
            QueryClause::Boolean(self.bool_clause)
        } else if !self.collector.is_empty() {
            QueryClause::Boolean(self.collector.into_boolean())
        } else if let Some(matched) = self.match_condition {
            QueryClause::Match(matched)
        } else {
            QueryClause::MatchAll
        };

        QueryDocument {
            size,
            from,
            projection,
            sort: self.sort,
            query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder() {
        let doc = DocumentBuilder::new().build();
        assert_eq!(doc, QueryDocument::default());
    }

    #[test]
    fn test_size_sentinel() {
        assert_eq!(DocumentBuilder::new().with_size(-1).build().size, None);
        assert_eq!(DocumentBuilder::new().with_size(0).build().size, Some(0));
        assert_eq!(
            DocumentBuilder::new().with_size(10000).build().size,
            Some(10000)
        );
    }

    #[test]
    fn test_from_omitted_when_not_positive() {
        assert_eq!(DocumentBuilder::new().with_from(0).build().from, None);
        assert_eq!(DocumentBuilder::new().with_from(-3).build().from, None);
        assert_eq!(DocumentBuilder::new().with_from(20).build().from, Some(20));
    }

    #[test]
    fn test_projection_list_wins_over_no_source() {
        let doc = DocumentBuilder::new()
            .with_source(["name"])
            .with_no_source(true)
            .build();
        assert_eq!(doc.projection, Projection::Fields(vec!["name".to_string()]));

        let doc = DocumentBuilder::new().with_no_source(true).build();
        assert_eq!(doc.projection, Projection::NoSource);
    }

    #[test]
    fn test_sort_helpers() {
        let mut builder = DocumentBuilder::new();
        builder.add_sort("a", SortDirection::Ascending);
        builder.add_sort("b", SortDirection::Descending);
        assert_eq!(builder.clone().build().sort.len(), 2);

        builder.set_sort("c", SortDirection::Descending);
        let doc = builder.build();
        assert_eq!(doc.sort, vec![SortSpec::new("c", SortDirection::Descending)]);
    }

    #[test]
    fn test_query_precedence() {
        let mut builder = DocumentBuilder::new();
        builder.match_field("_id", "42");
        assert_eq!(
            builder.clone().build().query,
            QueryClause::Match(MatchClause::new("_id", "42"))
        );

        builder.collector_mut().match_field("name", "bob");
        let QueryClause::Boolean(from_collector) = builder.clone().build().query else {
            panic!("expected bool from collector");
        };
        assert_eq!(
            from_collector.must,
            vec![QueryClause::Match(MatchClause::new("name", "bob"))]
        );

        builder.bool_mut().push_should(QueryClause::MatchAll);
        let QueryClause::Boolean(from_bool) = builder.build().query else {
            panic!("expected bool");
        };
        assert_eq!(from_bool.should, vec![QueryClause::MatchAll]);
        assert!(from_bool.must.is_empty());
    }

    #[test]
    fn test_empty_bool_falls_through() {
        let doc = DocumentBuilder::new().with_bool(BooleanClause::new()).build();
        assert_eq!(doc.query, QueryClause::MatchAll);
    }
}
