//! Error types for query compilation.
//!
//! Only translation and group recursion can fail. Rendering a
//! [`QueryDocument`](crate::document::QueryDocument) is infallible.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// Errors raised while compiling a structured query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The operator has no clause mapping (`neq`, `?`, or an unknown token).
    #[error("unsupported operator '{operator}' on field '{field}'")]
    UnsupportedOperator { field: String, operator: String },

    /// The condition carries the wrong number of operands for its operator.
    #[error("operator '{operator}' on field '{field}' expects {expected} operand(s), found {found}")]
    InvalidOperand {
        field: String,
        operator: String,
        expected: usize,
        found: usize,
    },

    /// Condition groups are nested deeper than the configured limit.
    #[error("condition groups nested deeper than {max_depth} levels")]
    NestingTooDeep { max_depth: usize },
}

impl CompileError {
    /// Returns true if this error comes from an operator without a mapping.
    pub fn is_unsupported_operator(&self) -> bool {
        matches!(self, CompileError::UnsupportedOperator { .. })
    }
}

/// Result type for compile operations.
pub type CompileResult<T> = Result<T, CompileError>;
