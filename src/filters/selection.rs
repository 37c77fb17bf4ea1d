use std::fmt;

use super::query::FilterExpr;
use super::term::FilterTerm;

/// Label of the all-participants selection
pub const OVERALL: &str = "Overall";

/// Which participant an analysis is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Overall,
    User(String),
}

impl Selection {
    /// `"Overall"` (any case) selects everyone, anything else one sender
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case(OVERALL) {
            Selection::Overall
        } else {
            Selection::User(name.to_string())
        }
    }

    fn term(&self) -> Option<FilterTerm> {
        match self {
            Selection::Overall => None,
            Selection::User(name) => Some(FilterTerm::User(name.clone())),
        }
    }

    /// Require the selected sender on top of `expr`
    pub fn narrow(&self, expr: FilterExpr) -> FilterExpr {
        match self.term() {
            Some(term) => expr.and(term),
            None => expr,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Overall => f.write_str(OVERALL),
            Selection::User(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::parse_filter;

    #[test]
    fn test_from_name() {
        assert_eq!(Selection::from_name("Overall"), Selection::Overall);
        assert_eq!(Selection::from_name("overall"), Selection::Overall);
        assert_eq!(Selection::from_name("Alice"), Selection::User("Alice".to_string()));
    }

    #[test]
    fn test_overall_leaves_expression_alone() {
        let expr = parse_filter("kind:message").unwrap();
        assert_eq!(Selection::Overall.narrow(expr.clone()), expr);
        assert!(Selection::Overall.narrow(FilterExpr::new()).is_empty());
    }

    #[test]
    fn test_user_is_required_not_an_alternative() {
        let expr = Selection::User("Bob".to_string()).narrow(parse_filter("user:alice").unwrap());
        assert_eq!(
            expr.groups(),
            &[vec![FilterTerm::User("alice".into())], vec![FilterTerm::User("Bob".into())]]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Selection::Overall.to_string(), "Overall");
        assert_eq!(Selection::User("Bob".into()).to_string(), "Bob");
    }
}
