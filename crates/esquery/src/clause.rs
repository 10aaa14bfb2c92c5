//! Compiled query clauses.
//!
//! [`QueryClause`] is a closed set: every variant has exactly one rendering
//! in [`render`](crate::render), checked by an exhaustive match.

/// A compiled query node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryClause {
    /// Matches every document.
    MatchAll,
    /// Analyzed match on one field.
    Match(MatchClause),
    /// Bounded range on one field.
    Range(RangeClause),
    /// Exact match against any of several terms.
    Terms(TermsClause),
    /// Analyzed match across several fields.
    MultiMatch(MultiMatchClause),
    /// Field presence.
    Exists(ExistsClause),
    /// Boolean combination of other clauses.
    Boolean(BooleanClause),
}

impl QueryClause {
    /// The Query DSL keyword for this clause.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryClause::MatchAll => "match_all",
            QueryClause::Match(_) => "match",
            QueryClause::Range(_) => "range",
            QueryClause::Terms(_) => "terms",
            QueryClause::MultiMatch(_) => "multi_match",
            QueryClause::Exists(_) => "exists",
            QueryClause::Boolean(_) => "bool",
        }
    }
}

/// `{"match": {field: value}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchClause {
    /// Field name.
    pub field: String,
    /// Value to match.
    pub value: String,
}

impl MatchClause {
    /// Creates a match clause.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// `{"range": {field: {gte, lte, gt, lt}}}` with absent bounds omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeClause {
    /// Field name.
    pub field: String,
    /// Inclusive lower bound.
    pub gte: Option<String>,
    /// Inclusive upper bound.
    pub lte: Option<String>,
    /// Exclusive lower bound.
    pub gt: Option<String>,
    /// Exclusive upper bound.
    pub lt: Option<String>,
}

impl RangeClause {
    /// Creates an unbounded range on `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }

    /// Sets the inclusive lower bound.
    pub fn gte(mut self, value: impl Into<String>) -> Self {
        self.gte = Some(value.into());
        self
    }

    /// Sets the inclusive upper bound.
    pub fn lte(mut self, value: impl Into<String>) -> Self {
        self.lte = Some(value.into());
        self
    }

    /// Sets the exclusive lower bound.
    pub fn gt(mut self, value: impl Into<String>) -> Self {
        self.gt = Some(value.into());
        self
    }

    /// Sets the exclusive upper bound.
    pub fn lt(mut self, value: impl Into<String>) -> Self {
        self.lt = Some(value.into());
        self
    }
}

/// `{"terms": {field: [values]}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermsClause {
    /// Field name.
    pub field: String,
    /// Accepted terms, in input order.
    pub values: Vec<String>,
}

/// `{"multi_match": {"query", "fields", "fuzziness"}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiMatchClause {
    /// Query text.
    pub query: String,
    /// Fields to search.
    pub fields: Vec<String>,
    /// Fuzziness setting such as `"AUTO"`. Omitted when `None`.
    pub fuzziness: Option<String>,
}

/// `{"exists": {"field": name}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistsClause {
    /// Field name.
    pub field: String,
}

/// The must/should/must-not/filter bucket structure of a `bool` query.
///
/// `minimum_should_match` is only set once something lands in `should`, so a
/// pure conjunction never carries the key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BooleanClause {
    /// Clauses that must match.
    pub must: Vec<QueryClause>,
    /// Clauses of which at least `minimum_should_match` must match.
    pub should: Vec<QueryClause>,
    /// Clauses that must not match.
    pub must_not: Vec<QueryClause>,
    /// Non-scoring clauses that must match.
    pub filter: Vec<QueryClause>,
    /// Number of `should` clauses required to match.
    pub minimum_should_match: Option<u32>,
}

impl BooleanClause {
    /// Creates an empty boolean clause.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.must.is_empty()
            && self.should.is_empty()
            && self.must_not.is_empty()
            && self.filter.is_empty()
    }

    /// Appends to `must`.
    pub fn push_must(&mut self, clause: QueryClause) {
        self.must.push(clause);
    }

    /// Appends to `should`, requiring at least one match if no minimum was set.
    pub fn push_should(&mut self, clause: QueryClause) {
        self.should.push(clause);
        self.minimum_should_match.get_or_insert(1);
    }

    /// Appends to `must_not`.
    pub fn push_must_not(&mut self, clause: QueryClause) {
        self.must_not.push(clause);
    }

    /// Appends to `filter`.
    pub fn push_filter(&mut self, clause: QueryClause) {
        self.filter.push(clause);
    }
}

/// A flat, ordered list of clauses.
///
/// Used as a top-level query source on its own (rendered as a conjunction)
/// and by the canned queries in [`compiler`](crate::compiler).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionCollector {
    clauses: Vec<QueryClause>,
}

impl ConditionCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an already-built clause.
    pub fn add(&mut self, clause: QueryClause) {
        self.clauses.push(clause);
    }

    /// Appends a match clause.
    pub fn match_field(&mut self, field: &str, value: &str) {
        self.add(QueryClause::Match(MatchClause::new(field, value)));
    }

    /// Appends an exists clause.
    pub fn exists(&mut self, field: &str) {
        self.add(QueryClause::Exists(ExistsClause {
            field: field.to_string(),
        }));
    }

    /// Appends an inclusive range clause.
    pub fn range(&mut self, field: &str, gte: Option<&str>, lte: Option<&str>) {
        self.range_ext(field, gte, lte, None, None);
    }

    /// Appends a range clause with any combination of bounds.
    pub fn range_ext(
        &mut self,
        field: &str,
        gte: Option<&str>,
        lte: Option<&str>,
        gt: Option<&str>,
        lt: Option<&str>,
    ) {
        self.add(QueryClause::Range(RangeClause {
            field: field.to_string(),
            gte: gte.map(str::to_string),
            lte: lte.map(str::to_string),
            gt: gt.map(str::to_string),
            lt: lt.map(str::to_string),
        }));
    }

    /// Appends a terms clause.
    pub fn terms<I, S>(&mut self, field: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add(QueryClause::Terms(TermsClause {
            field: field.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        }));
    }

    /// Appends a multi-match clause.
    pub fn multi_match(&mut self, fields: &[&str], query: &str, fuzziness: Option<&str>) {
        self.add(QueryClause::MultiMatch(MultiMatchClause {
            query: query.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            fuzziness: fuzziness.map(str::to_string),
        }));
    }

    /// Returns true if nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Number of collected clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// The collected clauses, in insertion order.
    pub fn clauses(&self) -> &[QueryClause] {
        &self.clauses
    }

    /// Consumes the collector as a conjunction.
    pub fn into_boolean(self) -> BooleanClause {
        BooleanClause {
            must: self.clauses,
            ..Default::default()
        }
    }
}
