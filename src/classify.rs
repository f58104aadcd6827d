use crate::parser::{BinaryOperator, Expression};
use std::fmt;

/// The outermost connective of a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MainOperator {
    And,
    Or,
    Not,
    Implies,
    Equivalent,
    /// The formula is a bare variable or constant.
    None,
}

impl MainOperator {
    pub const fn name(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Implies => "IMPLIES",
            Self::Equivalent => "EQUIVALENT",
            Self::None => "None",
        }
    }

    pub const fn glyph(self) -> Option<&'static str> {
        match self {
            Self::And => Some("∧"),
            Self::Or => Some("∨"),
            Self::Not => Some("¬"),
            Self::Implies => Some("→"),
            Self::Equivalent => Some("↔"),
            Self::None => None,
        }
    }
}

/// Renders as `AND (∧)`, or `None` for formulas without a connective.
impl fmt::Display for MainOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.glyph() {
            Some(glyph) => write!(f, "{} ({glyph})", self.name()),
            None => f.write_str(self.name()),
        }
    }
}

/// Reports the connective at the root of `expr`. Subformulas are not inspected.
pub const fn classify(expr: &Expression) -> MainOperator {
    match expr {
        Expression::Const(_) | Expression::Var(_) => MainOperator::None,
        Expression::Not(_) => MainOperator::Not,
        Expression::BinaryOp(BinaryOperator::And, _, _) => MainOperator::And,
        Expression::BinaryOp(BinaryOperator::Or, _, _) => MainOperator::Or,
        Expression::BinaryOp(BinaryOperator::Implies, _, _) => MainOperator::Implies,
        Expression::BinaryOp(BinaryOperator::Equivalent, _, _) => MainOperator::Equivalent,
    }
}
