use std::fmt;

use serde::{Deserialize, Serialize};

use credo_core::Claims;

// ---------------------------------------------------------------------------
// Operator
// ---------------------------------------------------------------------------

/// Comparison operator carried by an atomic policy constraint.
///
/// The region constraint decides `Eq` and `Neq`; the remaining operators
/// exist for rule interchange and evaluate fail-closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Geq,
    Lt,
    Leq,
    In,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Eq => "EQ",
            Operator::Neq => "NEQ",
            Operator::Gt => "GT",
            Operator::Geq => "GEQ",
            Operator::Lt => "LT",
            Operator::Leq => "LEQ",
            Operator::In => "IN",
        };
        write!(f, "{}", name)
    }
}

// ---------------------------------------------------------------------------
// Permission
// ---------------------------------------------------------------------------

/// The rule a constraint function is asked to decide. Passed through as a
/// typed marker; the region constraint inspects none of its content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Permission;

// ---------------------------------------------------------------------------
// PolicyContext
// ---------------------------------------------------------------------------

/// Evaluation context exposing the claims of the participant an engine is
/// checking a rule against.
pub trait PolicyContext: Send + Sync {
    fn claims(&self) -> &Claims;
}

/// Participant agent the authentication step attaches resolved claims to.
#[derive(Debug, Clone, Default)]
pub struct ParticipantAgent {
    claims: Claims,
}

impl ParticipantAgent {
    pub fn new(claims: Claims) -> Self {
        Self { claims }
    }
}

impl PolicyContext for ParticipantAgent {
    fn claims(&self) -> &Claims {
        &self.claims
    }
}

// ---------------------------------------------------------------------------
// ConstraintFunction
// ---------------------------------------------------------------------------

/// An atomic constraint function bound to a rule type.
///
/// A policy engine registers one of these per constraint key and invokes it
/// once for every rule carrying that constraint. Implementations must be
/// re-entrant and must always return a verdict: evaluation failures are
/// absorbed into `false`, never propagated.
pub trait ConstraintFunction<R>: Send + Sync {
    fn evaluate(
        &self,
        operator: Operator,
        right_value: &str,
        rule: &R,
        context: &dyn PolicyContext,
    ) -> bool;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
