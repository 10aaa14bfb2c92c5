//! Query DSL rendering.
//!
//! Converts a [`QueryDocument`] into Elasticsearch Query DSL JSON. Keys are
//! inserted in a fixed order per node (serde_json `preserve_order`), so the
//! same document always renders to the same bytes.

use serde_json::{Map, Value, json};

use crate::clause::{BooleanClause, QueryClause, RangeClause};
use crate::document::{Projection, QueryDocument};
use crate::model::SortSpec;

/// Renders the document as indented JSON text.
pub fn render(doc: &QueryDocument) -> String {
    format!("{:#}", document_value(doc))
}

/// Renders the document as single-line JSON text.
pub fn render_compact(doc: &QueryDocument) -> String {
    document_value(doc).to_string()
}

/// Builds the JSON request body.
///
/// Key order: `size`, `from`, `_source`, `sort`, `query`.
pub fn document_value(doc: &QueryDocument) -> Value {
    let mut body = Map::new();

    if let Some(size) = doc.size {
        body.insert("size".to_string(), json!(size));
    }
    if let Some(from) = doc.from {
        body.insert("from".to_string(), json!(from));
    }

    match &doc.projection {
        Projection::All => {}
        Projection::Fields(fields) => {
            body.insert("_source".to_string(), json!(fields));
        }
        Projection::NoSource => {
            body.insert("_source".to_string(), json!(false));
        }
    }

    if !doc.sort.is_empty() {
        let sort: Vec<Value> = doc.sort.iter().map(sort_value).collect();
        body.insert("sort".to_string(), Value::Array(sort));
    }

    body.insert("query".to_string(), clause_value(&doc.query));

    Value::Object(body)
}

fn sort_value(spec: &SortSpec) -> Value {
    let mut entry = Map::new();
    entry.insert(
        spec.field.clone(),
        json!({ "order": spec.direction.as_str() }),
    );
    Value::Object(entry)
}

/// Builds the JSON for a single clause.
pub fn clause_value(clause: &QueryClause) -> Value {
    match clause {
        QueryClause::MatchAll => json!({ "match_all": {} }),
        QueryClause::Match(m) => {
            let mut inner = Map::new();
            inner.insert(m.field.clone(), json!(m.value));
            json!({ "match": inner })
        }
        QueryClause::Range(r) => {
            let mut inner = Map::new();
            inner.insert(r.field.clone(), range_bounds(r));
            json!({ "range": inner })
        }
        QueryClause::Terms(t) => {
            let mut inner = Map::new();
            inner.insert(t.field.clone(), json!(t.values));
            json!({ "terms": inner })
        }
        QueryClause::MultiMatch(mm) => {
            let mut inner = Map::new();
            inner.insert("query".to_string(), json!(mm.query));
            inner.insert("fields".to_string(), json!(mm.fields));
            if let Some(fuzziness) = mm.fuzziness.as_deref().filter(|f| !f.is_empty()) {
                inner.insert("fuzziness".to_string(), json!(fuzziness));
            }
            json!({ "multi_match": inner })
        }
        QueryClause::Exists(e) => json!({ "exists": { "field": e.field } }),
        QueryClause::Boolean(b) => json!({ "bool": bool_body(b) }),
    }
}

/// Range bounds in `gte`, `lte`, `gt`, `lt` order, absent ones omitted.
fn range_bounds(r: &RangeClause) -> Value {
    let mut bounds = Map::new();
    let ordered = [
        ("gte", &r.gte),
        ("lte", &r.lte),
        ("gt", &r.gt),
        ("lt", &r.lt),
    ];
    for (key, bound) in ordered {
        if let Some(value) = bound {
            bounds.insert(key.to_string(), json!(value));
        }
    }
    Value::Object(bounds)
}

fn bool_body(b: &BooleanClause) -> Value {
    let mut body = Map::new();

    if !b.must.is_empty() {
        body.insert("must".to_string(), clause_array(&b.must));
    }
    if !b.should.is_empty() {
        body.insert("should".to_string(), clause_array(&b.should));
        if let Some(minimum) = b.minimum_should_match {
            body.insert("minimum_should_match".to_string(), json!(minimum));
        }
    }
    if !b.must_not.is_empty() {
        body.insert("must_not".to_string(), clause_array(&b.must_not));
    }
    if !b.filter.is_empty() {
        body.insert("filter".to_string(), clause_array(&b.filter));
    }

    Value::Object(body)
}

fn clause_array(clauses: &[QueryClause]) -> Value {
    Value::Array(clauses.iter().map(clause_value).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::{ExistsClause, MatchClause, MultiMatchClause, TermsClause};
    use crate::model::SortDirection;

    #[test]
    fn test_match_all_document() {
        let doc = QueryDocument::default();
        assert_eq!(render_compact(&doc), r#"{"query":{"match_all":{}}}"#);
    }

    #[test]
    fn test_document_key_order() {
        let doc = QueryDocument {
            size: Some(10),
            from: Some(5),
            projection: Projection::Fields(vec!["a".to_string(), "b".to_string()]),
            sort: vec![
                SortSpec::new("a", SortDirection::Ascending),
                SortSpec::new("b", SortDirection::Descending),
            ],
            query: QueryClause::MatchAll,
        };
        assert_eq!(
            render_compact(&doc),
            r#"{"size":10,"from":5,"_source":["a","b"],"sort":[{"a":{"order":"asc"}},{"b":{"order":"desc"}}],"query":{"match_all":{}}}"#
        );
    }

    #[test]
    fn test_no_source() {
        let doc = QueryDocument {
            projection: Projection::NoSource,
            ..Default::default()
        };
        assert_eq!(document_value(&doc)["_source"], json!(false));
    }

    #[test]
    fn test_range_bound_order() {
        let clause = QueryClause::Range(RangeClause::new("n").lt("9").gte("1"));
        assert_eq!(
            clause_value(&clause).to_string(),
            r#"{"range":{"n":{"gte":"1","lt":"9"}}}"#
        );
    }

    #[test]
    fn test_leaf_clauses() {
        assert_eq!(
            clause_value(&QueryClause::Match(MatchClause::new("name", "bob"))),
            json!({ "match": { "name": "bob" } })
        );
        assert_eq!(
            clause_value(&QueryClause::Terms(TermsClause {
                field: "_id".to_string(),
                values: vec!["1".to_string(), "2".to_string()],
            })),
            json!({ "terms": { "_id": ["1", "2"] } })
        );
        assert_eq!(
            clause_value(&QueryClause::Exists(ExistsClause {
                field: "email".to_string(),
            })),
            json!({ "exists": { "field": "email" } })
        );
    }

    #[test]
    fn test_multi_match_fuzziness() {
        let mut clause = MultiMatchClause {
            query: "rust".to_string(),
            fields: vec!["title".to_string()],
            fuzziness: Some("AUTO".to_string()),
        };
        assert_eq!(
            clause_value(&QueryClause::MultiMatch(clause.clone())).to_string(),
            r#"{"multi_match":{"query":"rust","fields":["title"],"fuzziness":"AUTO"}}"#
        );

        clause.fuzziness = None;
        let value = clause_value(&QueryClause::MultiMatch(clause));
        assert!(value["multi_match"].get("fuzziness").is_none());
    }

    #[test]
    fn test_bool_omits_empty_buckets() {
        let mut b = BooleanClause::new();
        b.push_must(QueryClause::MatchAll);
        b.minimum_should_match = Some(1);
        let value = clause_value(&QueryClause::Boolean(b.clone()));
        assert_eq!(value, json!({ "bool": { "must": [{ "match_all": {} }] } }));

        b.push_must_not(QueryClause::MatchAll);
        b.push_filter(QueryClause::MatchAll);
        b.push_should(QueryClause::MatchAll);
        assert_eq!(
            clause_value(&QueryClause::Boolean(b)).to_string(),
            r#"{"bool":{"must":[{"match_all":{}}],"should":[{"match_all":{}}],"minimum_should_match":1,"must_not":[{"match_all":{}}],"filter":[{"match_all":{}}]}}"#
        );
    }

    #[test]
    fn test_pretty_render_is_indented() {
        let text = render(&QueryDocument::default());
        assert_eq!(text, "{\n  \"query\": {\n    \"match_all\": {}\n  }\n}");
    }
}
