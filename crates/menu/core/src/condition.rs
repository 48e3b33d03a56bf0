//! Conditions gating menu and item visibility.
//!
//! A [`Condition`] is a pure boolean rule decoded from a requirement
//! document. Evaluation is side-effect-free and delegates every external
//! concern (permissions, placeholders, expressions) to the [`MenuContext`].

use crate::context::MenuContext;

/// Comparison operators accepted by numeric/string comparisons.
///
/// The spellings below are the exact `type` tokens used in requirement
/// documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompareOp {
    #[strum(serialize = ">")]
    Greater,
    #[strum(serialize = ">=")]
    GreaterOrEqual,
    #[strum(serialize = "<")]
    Less,
    #[strum(serialize = "<=")]
    LessOrEqual,
    #[strum(serialize = "==")]
    Equal,
    #[strum(serialize = "!=")]
    NotEqual,
}

impl CompareOp {
    /// True for the equality-class operators (`==`, `!=`), which keep a
    /// string-comparison fallback when an operand is not numeric.
    pub const fn is_equality(&self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual)
    }
}

/// A boolean rule gating whether a menu may open or an item is visible.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    /// Unconditionally true; the absence of any requirement.
    Always,

    /// Viewer holds the named permission node.
    Permission(String),

    /// Viewer does not hold the named permission node.
    NegatedPermission(String),

    /// Externally-evaluated boolean expression.
    Expression(String),

    /// Placeholder-expanded operands compare equal as strings.
    StringEquals { left: String, right: String },

    /// Placeholder-expanded left operand contains the right as a substring.
    StringContains { left: String, right: String },

    /// Numeric comparison of placeholder-expanded operands.
    ///
    /// If either side fails to parse as a number, equality-class operators
    /// fall back to string comparison and ordering operators evaluate false.
    Comparison {
        left: String,
        op: CompareOp,
        right: String,
    },

    /// All sub-conditions must hold; short-circuits left to right.
    And(Vec<Condition>),
}

impl Condition {
    /// Combines decoded sub-conditions the way requirement blocks do:
    /// zero → [`Condition::Always`], one → that condition unwrapped,
    /// two or more → [`Condition::And`].
    pub fn all(mut conditions: Vec<Condition>) -> Condition {
        match conditions.len() {
            0 => Condition::Always,
            1 => conditions.remove(0),
            _ => Condition::And(conditions),
        }
    }

    /// Evaluates this condition for the acting viewer.
    pub fn evaluate(&self, ctx: &dyn MenuContext) -> bool {
        match self {
            Condition::Always => true,
            Condition::Permission(node) => ctx.has_permission(node),
            Condition::NegatedPermission(node) => !ctx.has_permission(node),
            Condition::Expression(expr) => ctx.evaluate_expression(expr),
            Condition::StringEquals { left, right } => ctx.expand(left) == ctx.expand(right),
            Condition::StringContains { left, right } => {
                ctx.expand(left).contains(&ctx.expand(right))
            }
            Condition::Comparison { left, op, right } => {
                compare(&ctx.expand(left), *op, &ctx.expand(right))
            }
            Condition::And(conditions) => conditions.iter().all(|c| c.evaluate(ctx)),
        }
    }
}

/// Compares two expanded operands, numerically when both parse.
fn compare(left: &str, op: CompareOp, right: &str) -> bool {
    match (left.trim().parse::<f64>(), right.trim().parse::<f64>()) {
        (Ok(l), Ok(r)) => match op {
            CompareOp::Greater => l > r,
            CompareOp::GreaterOrEqual => l >= r,
            CompareOp::Less => l < r,
            CompareOp::LessOrEqual => l <= r,
            CompareOp::Equal => l == r,
            CompareOp::NotEqual => l != r,
        },
        // Non-numeric operands: equality degrades to string comparison,
        // ordering operators are false.
        _ => match op {
            CompareOp::Equal => left == right,
            CompareOp::NotEqual => left != right,
            _ => false,
        },
    }
}
