use crate::ast::condition::Condition;
use model::core::value::Value;

/// Fold over a condition tree.
///
/// `visit` dispatches on the variant and threads an explicit state through
/// the hooks. Leaf hooks default to passing the state through. Combinator
/// hooks default to visiting the children in order, handing each child the
/// state the previous one produced; whether that reads as conjunction,
/// disjunction or plain traversal depends on the state transitions a backend
/// defines.
pub trait ConditionVisitor {
    type State;
    type Error;

    fn visit(&self, state: Self::State, condition: &Condition) -> Result<Self::State, Self::Error> {
        match condition {
            Condition::OfType { type_name } => self.of_type(state, type_name),
            Condition::MatchProperty { property, value } => {
                self.match_property(state, property, value)
            }
            Condition::MatchAll { filters } => self.match_all(state, filters),
            Condition::MatchAny { filters } => self.match_any(state, filters),
        }
    }

    fn of_type(&self, state: Self::State, _type_name: &str) -> Result<Self::State, Self::Error> {
        Ok(state)
    }

    fn match_property(
        &self,
        state: Self::State,
        _property: &str,
        _value: &Value,
    ) -> Result<Self::State, Self::Error> {
        Ok(state)
    }

    fn match_all(
        &self,
        state: Self::State,
        filters: &[Condition],
    ) -> Result<Self::State, Self::Error> {
        self.visit_in_sequence(state, filters)
    }

    fn match_any(
        &self,
        state: Self::State,
        filters: &[Condition],
    ) -> Result<Self::State, Self::Error> {
        self.visit_in_sequence(state, filters)
    }

    fn visit_in_sequence(
        &self,
        state: Self::State,
        filters: &[Condition],
    ) -> Result<Self::State, Self::Error> {
        filters
            .iter()
            .try_fold(state, |state, filter| self.visit(state, filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    /// Records the rules it sees, in visiting order.
    struct RuleTrace;

    impl ConditionVisitor for RuleTrace {
        type State = Vec<String>;
        type Error = Infallible;

        fn of_type(
            &self,
            mut state: Vec<String>,
            type_name: &str,
        ) -> Result<Vec<String>, Infallible> {
            state.push(format!("of-type:{type_name}"));
            Ok(state)
        }

        fn match_property(
            &self,
            mut state: Vec<String>,
            property: &str,
            _value: &Value,
        ) -> Result<Vec<String>, Infallible> {
            state.push(format!("match-property:{property}"));
            Ok(state)
        }
    }

    #[test]
    fn test_default_combinators_visit_children_in_order() {
        let condition = Condition::all([
            Condition::of_type("A"),
            Condition::any([
                Condition::match_property("x", 1),
                Condition::of_type("B"),
            ]),
            Condition::all([]),
        ]);

        let Ok(trace) = RuleTrace.visit(Vec::new(), &condition);
        assert_eq!(trace, vec!["of-type:A", "match-property:x", "of-type:B"]);
    }

    #[test]
    fn test_default_leaves_pass_state_through() {
        struct Noop;
        impl ConditionVisitor for Noop {
            type State = u32;
            type Error = Infallible;
        }

        let Ok(state) = Noop.visit(7, &Condition::any([Condition::of_type("A")]));
        assert_eq!(state, 7);
    }
}
