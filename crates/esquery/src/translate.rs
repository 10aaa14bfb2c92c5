//! Condition translation.
//!
//! Maps one field/operator/operands condition to a single [`QueryClause`].

use std::fmt;

use crate::clause::{MatchClause, QueryClause, RangeClause};
use crate::error::{CompileError, CompileResult};
use crate::model::Condition;

/// Operator tags understood by the query model.
///
/// `Neq` and `HasKey` are recognised tags with no clause mapping yet; they
/// translate to [`CompileError::UnsupportedOperator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equality (`eq`).
    Eq,
    /// Inequality (`neq`).
    Neq,
    /// Substring match (`contains`), left to the engine's analyzer.
    Contains,
    /// Inclusive range (`between`).
    Between,
    /// Less than (`lt`).
    Lt,
    /// Less than or equal (`lte`).
    Lte,
    /// Greater than (`gt`).
    Gt,
    /// Greater than or equal (`gte`).
    Gte,
    /// Key-exists test (`?`).
    HasKey,
}

impl Operator {
    /// Parses an operator tag, returning None for unknown tags.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "eq" => Some(Operator::Eq),
            "neq" => Some(Operator::Neq),
            "contains" => Some(Operator::Contains),
            "between" => Some(Operator::Between),
            "lt" => Some(Operator::Lt),
            "lte" => Some(Operator::Lte),
            "gt" => Some(Operator::Gt),
            "gte" => Some(Operator::Gte),
            "?" => Some(Operator::HasKey),
            _ => None,
        }
    }

    /// Number of operands the operator takes.
    pub fn arity(&self) -> usize {
        match self {
            Operator::Between => 2,
            _ => 1,
        }
    }

    /// Returns true if the operator has a clause mapping.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Operator::Neq | Operator::HasKey)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Contains => "contains",
            Operator::Between => "between",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::HasKey => "?",
        };
        f.write_str(tag)
    }
}

/// Translates a condition into a query clause.
pub fn translate_condition(condition: &Condition) -> CompileResult<QueryClause> {
    translate(&condition.field, &condition.operator, condition.operands.as_slice())
}

/// Translates one field/operator/operands triple into a query clause.
///
/// Unknown and unmapped operators fail with
/// [`CompileError::UnsupportedOperator`]; a wrong operand count fails with
/// [`CompileError::InvalidOperand`].
pub fn translate<S: AsRef<str>>(
    field: &str,
    operator: &str,
    operands: &[S],
) -> CompileResult<QueryClause> {
    let unsupported = || CompileError::UnsupportedOperator {
        field: field.to_string(),
        operator: operator.to_string(),
    };

    let op = Operator::parse(operator).ok_or_else(unsupported)?;
    if !op.is_supported() {
        return Err(unsupported());
    }

    if operands.len() != op.arity() {
        return Err(CompileError::InvalidOperand {
            field: field.to_string(),
            operator: op.to_string(),
            expected: op.arity(),
            found: operands.len(),
        });
    }

    let first = operands[0].as_ref();
    let range = || RangeClause::new(field);
    let clause = match op {
        Operator::Eq | Operator::Contains => QueryClause::Match(MatchClause::new(field, first)),
        Operator::Between => QueryClause::Range(RangeClause {
            gte: bound(first),
            lte: bound(operands[1].as_ref()),
            ..range()
        }),
        Operator::Lt => QueryClause::Range(RangeClause { lt: bound(first), ..range() }),
        Operator::Lte => QueryClause::Range(RangeClause { lte: bound(first), ..range() }),
        Operator::Gt => QueryClause::Range(RangeClause { gt: bound(first), ..range() }),
        Operator::Gte => QueryClause::Range(RangeClause { gte: bound(first), ..range() }),
        Operator::Neq | Operator::HasKey => return Err(unsupported()),
    };

    Ok(clause)
}

// An empty range operand leaves that end of the range open.
fn bound(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
