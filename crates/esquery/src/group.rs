//! Recursive compilation of condition groups into boolean clause trees.
//!
//! Direct conditions of a group land in `must` (AND) or `should` (OR).
//! Nested groups are always appended to the parent's `must` bucket, whatever
//! either group's operator is: siblings combine conjunctively, and only the
//! flat conditions inside one group can be disjunctive.

use crate::clause::{BooleanClause, QueryClause};
use crate::config::{CompileOptions, UnsupportedPolicy};
use crate::error::{CompileError, CompileResult};
use crate::model::{ConditionGroup, GroupOperator};
use crate::translate::translate_condition;

/// Compiles [`ConditionGroup`] trees.
///
/// Holds no state between calls; each [`compile`](GroupBuilder::compile)
/// builds fresh clause values.
#[derive(Debug, Clone, Copy)]
pub struct GroupBuilder<'a> {
    options: &'a CompileOptions,
}

impl<'a> GroupBuilder<'a> {
    /// Creates a builder using the given options.
    pub fn new(options: &'a CompileOptions) -> Self {
        Self { options }
    }

    /// Compiles a group into a boolean clause.
    ///
    /// An empty group yields an empty clause, not an error.
    pub fn compile(&self, group: &ConditionGroup) -> CompileResult<BooleanClause> {
        self.compile_at(group, 1)
    }

    fn compile_at(&self, group: &ConditionGroup, depth: usize) -> CompileResult<BooleanClause> {
        if depth > self.options.max_depth {
            return Err(CompileError::NestingTooDeep {
                max_depth: self.options.max_depth,
            });
        }

        let mut clause = BooleanClause::new();

        for condition in &group.conditions {
            let translated = match translate_condition(condition) {
                Ok(translated) => translated,
                Err(e)
                    if e.is_unsupported_operator()
                        && self.options.on_unsupported == UnsupportedPolicy::Skip =>
                {
                    tracing::warn!(
                        field = %condition.field,
                        operator = %condition.operator,
                        "Skipping condition with unsupported operator"
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };

            match group.operator {
                GroupOperator::And => clause.push_must(translated),
                GroupOperator::Or => clause.push_should(translated),
            }
        }

        for nested in &group.groups {
            tracing::trace!(depth = depth + 1, operator = %nested.operator, "Compiling nested group");
            let compiled = self.compile_at(nested, depth + 1)?;
            clause.push_must(QueryClause::Boolean(compiled));
        }

        Ok(clause)
    }
}

/// Compiles a group with default options.
pub fn compile_group(group: &ConditionGroup) -> CompileResult<BooleanClause> {
    let options = CompileOptions::default();
    GroupBuilder::new(&options).compile(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::{MatchClause, RangeClause};
    use crate::model::Condition;

    fn m(field: &str, value: &str) -> QueryClause {
        QueryClause::Match(MatchClause::new(field, value))
    }

    #[test]
    fn test_empty_group() {
        let clause = compile_group(&ConditionGroup::or()).unwrap();
        assert!(clause.is_empty());
        assert_eq!(clause.minimum_should_match, None);
    }

    #[test]
    fn test_and_group() {
        let group = ConditionGroup::and()
            .with_condition(Condition::eq("a", "1"))
            .with_condition(Condition::eq("b", "2"));
        let clause = compile_group(&group).unwrap();

        assert_eq!(clause.must, vec![m("a", "1"), m("b", "2")]);
        assert!(clause.should.is_empty());
        assert_eq!(clause.minimum_should_match, None);
    }

    #[test]
    fn test_or_group() {
        let group = ConditionGroup::or()
            .with_condition(Condition::eq("a", "1"))
            .with_condition(Condition::between("b", "1", "10"));
        let clause = compile_group(&group).unwrap();

        assert!(clause.must.is_empty());
        assert_eq!(
            clause.should,
            vec![
                m("a", "1"),
                QueryClause::Range(RangeClause::new("b").gte("1").lte("10"))
            ]
        );
        assert_eq!(clause.minimum_should_match, Some(1));
    }

    #[test]
    fn test_nested_groups_always_go_to_must() {
        let group = ConditionGroup::or()
            .with_condition(Condition::eq("a", "1"))
            .with_group(ConditionGroup::or().with_condition(Condition::eq("b", "2")))
            .with_group(ConditionGroup::and().with_condition(Condition::eq("c", "3")));
        let clause = compile_group(&group).unwrap();

        assert_eq!(clause.should, vec![m("a", "1")]);
        assert_eq!(clause.must.len(), 2);

        let QueryClause::Boolean(first) = &clause.must[0] else {
            panic!("expected nested bool");
        };
        assert_eq!(first.should, vec![m("b", "2")]);
        assert_eq!(first.minimum_should_match, Some(1));

        let QueryClause::Boolean(second) = &clause.must[1] else {
            panic!("expected nested bool");
        };
        assert_eq!(second.must, vec![m("c", "3")]);
    }

    #[test]
    fn test_empty_nested_group_is_kept() {
        let group = ConditionGroup::and().with_group(ConditionGroup::or());
        let clause = compile_group(&group).unwrap();
        assert_eq!(clause.must, vec![QueryClause::Boolean(BooleanClause::new())]);
    }

    #[test]
    fn test_unsupported_fails_by_default() {
        let group = ConditionGroup::and()
            .with_condition(Condition::eq("a", "1"))
            .with_condition(Condition::new("b", "neq", ["2"]));
        let err = compile_group(&group).unwrap_err();
        assert!(err.is_unsupported_operator());
    }

    #[test]
    fn test_unsupported_skip_policy() {
        let options = CompileOptions::default().with_unsupported_policy(UnsupportedPolicy::Skip);
        let group = ConditionGroup::and()
            .with_condition(Condition::new("b", "neq", ["2"]))
            .with_condition(Condition::eq("a", "1"));
        let clause = GroupBuilder::new(&options).compile(&group).unwrap();
        assert_eq!(clause.must, vec![m("a", "1")]);
    }

    #[test]
    fn test_skip_policy_still_rejects_bad_operands() {
        let options = CompileOptions::default().with_unsupported_policy(UnsupportedPolicy::Skip);
        let group = ConditionGroup::and().with_condition(Condition::new("age", "between", ["1"]));
        let err = GroupBuilder::new(&options).compile(&group).unwrap_err();
        assert!(matches!(err, CompileError::InvalidOperand { .. }));
    }

    #[test]
    fn test_depth_limit() {
        let options = CompileOptions::default().with_max_depth(2);
        let builder = GroupBuilder::new(&options);

        let two_levels = ConditionGroup::and().with_group(ConditionGroup::and());
        assert!(builder.compile(&two_levels).is_ok());

        let three_levels =
            ConditionGroup::and().with_group(ConditionGroup::and().with_group(ConditionGroup::or()));
        assert_eq!(
            builder.compile(&three_levels).unwrap_err(),
            CompileError::NestingTooDeep { max_depth: 2 }
        );
    }
}
