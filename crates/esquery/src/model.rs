//! The backend-agnostic query model.
//!
//! These types are what callers hand to the compiler: flat conditions,
//! boolean groups of conditions, sort specs, and the paging/projection
//! settings of a [`SimpleQuery`]. They carry no Elasticsearch concepts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One atomic field/operator/value predicate.
///
/// The operator is kept as the raw tag supplied by the caller (`"eq"`,
/// `"between"`, ...) so that unknown tags survive until translation, where
/// they are reported as [`CompileError::UnsupportedOperator`](crate::CompileError).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// The document field the predicate applies to.
    pub field: String,
    /// The operator tag.
    #[serde(rename = "type", alias = "operator")]
    pub operator: String,
    /// The operand values, in operator order.
    #[serde(default)]
    pub operands: Vec<String>,
}

impl Condition {
    /// Creates a condition from its parts.
    pub fn new<I, S>(field: impl Into<String>, operator: impl Into<String>, operands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.into(),
            operator: operator.into(),
            operands: operands.into_iter().map(Into::into).collect(),
        }
    }

    /// Shorthand for an `eq` condition.
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        let value: String = value.into();
        Self::new(field, "eq", [value])
    }

    /// Shorthand for a `between` condition (inclusive on both ends).
    pub fn between(
        field: impl Into<String>,
        low: impl Into<String>,
        high: impl Into<String>,
    ) -> Self {
        let bounds: [String; 2] = [low.into(), high.into()];
        Self::new(field, "between", bounds)
    }
}

/// Boolean operator joining the direct conditions of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupOperator {
    /// Every condition must match.
    #[default]
    #[serde(alias = "AND")]
    And,
    /// At least one condition must match.
    #[serde(alias = "OR")]
    Or,
}

impl fmt::Display for GroupOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupOperator::And => write!(f, "and"),
            GroupOperator::Or => write!(f, "or"),
        }
    }
}

impl FromStr for GroupOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "and" => Ok(GroupOperator::And),
            "or" => Ok(GroupOperator::Or),
            _ => Err(format!("unknown group operator: {}", s)),
        }
    }
}

/// A set of conditions and nested groups joined by one operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionGroup {
    /// Operator applied to the direct conditions.
    #[serde(default)]
    pub operator: GroupOperator,
    /// Direct conditions, in input order.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Nested groups, in input order.
    #[serde(default)]
    pub groups: Vec<ConditionGroup>,
}

impl ConditionGroup {
    /// Creates an empty group with the given operator.
    pub fn new(operator: GroupOperator) -> Self {
        Self {
            operator,
            ..Default::default()
        }
    }

    /// Creates an empty AND group.
    pub fn and() -> Self {
        Self::new(GroupOperator::And)
    }

    /// Creates an empty OR group.
    pub fn or() -> Self {
        Self::new(GroupOperator::Or)
    }

    /// Adds a direct condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Adds a nested group.
    pub fn with_group(mut self, group: ConditionGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Returns true if the group has neither conditions nor nested groups.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.groups.is_empty()
    }

    /// Total number of conditions in this group and every nested group.
    pub fn condition_count(&self) -> usize {
        self.conditions.len()
            + self
                .groups
                .iter()
                .map(ConditionGroup::condition_count)
                .sum::<usize>()
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    #[serde(rename = "asc", alias = "ASC", alias = "ascending")]
    Ascending,
    /// Descending order.
    #[serde(rename = "desc", alias = "DESC", alias = "descending")]
    Descending,
}

impl SortDirection {
    /// The order keyword used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    /// Creates a sort spec.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Parses a sort value where a leading `-` means descending (e.g. `"-created"`).
    pub fn parse(s: &str) -> Self {
        if let Some(stripped) = s.strip_prefix('-') {
            Self::new(stripped, SortDirection::Descending)
        } else {
            Self::new(s, SortDirection::Ascending)
        }
    }
}

fn default_size() -> i64 {
    -1
}

/// A complete structured query from the generic query model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleQuery {
    /// Fields to return. Empty means the whole source document.
    #[serde(default)]
    pub columns: Vec<String>,

    /// Page size. Zero or negative means unset.
    #[serde(default = "default_size")]
    pub size: i64,

    /// Number of hits to skip. Zero or negative means unset.
    #[serde(default)]
    pub offset: i64,

    /// Sort keys, most significant first.
    #[serde(default)]
    pub sort_by: Vec<SortSpec>,

    /// The condition tree, if any.
    #[serde(default)]
    pub conditions: Option<ConditionGroup>,
}

impl Default for SimpleQuery {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            size: default_size(),
            offset: 0,
            sort_by: Vec::new(),
            conditions: None,
        }
    }
}

impl SimpleQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the projected columns.
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the page size.
    pub fn with_size(mut self, size: i64) -> Self {
        self.size = size;
        self
    }

    /// Sets the offset.
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    /// Adds a sort key.
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort_by.push(sort);
        self
    }

    /// Sets the condition tree.
    pub fn with_conditions(mut self, group: ConditionGroup) -> Self {
        self.conditions = Some(group);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_operator_parse() {
        assert_eq!("and".parse::<GroupOperator>().unwrap(), GroupOperator::And);
        assert_eq!(" OR ".parse::<GroupOperator>().unwrap(), GroupOperator::Or);
        assert!("xor".parse::<GroupOperator>().is_err());
        assert_eq!(GroupOperator::Or.to_string(), "or");
    }

    #[test]
    fn test_group_operator_deserialize_uppercase() {
        let group: ConditionGroup = serde_json::from_str(r#"{"operator": "OR"}"#).unwrap();
        assert_eq!(group.operator, GroupOperator::Or);
        let group: ConditionGroup = serde_json::from_str(r#"{"operator": "AND"}"#).unwrap();
        assert_eq!(group.operator, GroupOperator::And);
        assert!(serde_json::from_str::<ConditionGroup>(r#"{"operator": "xor"}"#).is_err());
    }

    #[test]
    fn test_sort_spec_parse() {
        let asc = SortSpec::parse("name");
        assert_eq!(asc.field, "name");
        assert_eq!(asc.direction, SortDirection::Ascending);

        let desc = SortSpec::parse("-created");
        assert_eq!(desc.field, "created");
        assert_eq!(desc.direction, SortDirection::Descending);
    }

    #[test]
    fn test_condition_count() {
        let group = ConditionGroup::and()
            .with_condition(Condition::eq("a", "1"))
            .with_group(
                ConditionGroup::or()
                    .with_condition(Condition::eq("b", "2"))
                    .with_condition(Condition::eq("c", "3")),
            );
        assert_eq!(group.condition_count(), 3);
        assert!(!group.is_empty());
        assert!(ConditionGroup::or().is_empty());
    }

    #[test]
    fn test_simple_query_deserialize_defaults() {
        let query: SimpleQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.size, -1);
        assert_eq!(query.offset, 0);
        assert!(query.conditions.is_none());
        assert_eq!(query, SimpleQuery::new());
    }

    #[test]
    fn test_simple_query_deserialize_full() {
        let query: SimpleQuery = serde_json::from_str(
            r#"{
                "columns": ["name"],
                "size": 25,
                "offset": 50,
                "sort_by": [{"field": "age", "direction": "DESC"}],
                "conditions": {
                    "operator": "or",
                    "conditions": [{"field": "name", "type": "eq", "operands": ["bob"]}]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(query.columns, vec!["name".to_string()]);
        assert_eq!(query.size, 25);
        assert_eq!(query.sort_by[0].direction, SortDirection::Descending);
        let group = query.conditions.unwrap();
        assert_eq!(group.operator, GroupOperator::Or);
        assert_eq!(group.conditions[0], Condition::eq("name", "bob"));
    }
}
