//! Credo Policy Constraints
//!
//! Constraint functions that decide atomic policy rules against the claims
//! a participant agent carries. The region constraint grants or denies a
//! rule by testing the `region` attribute of the agent's verifiable
//! credentials against the rule's right-hand value.
//!
//! Key features:
//! - **Fail-closed evaluation**: anything the constraint cannot positively
//!   grant evaluates to `false`, including unsupported operators
//! - **Total functions**: malformed claims entries are skipped with a
//!   warning instead of aborting the evaluation
//! - **Stateless constraints**: one constraint instance serves any number
//!   of concurrent rule evaluations

pub mod region;
pub mod types;

// Re-export primary types for convenience
pub use region::{collect_regions, RegionConstraint, REGION_KEY};
pub use types::{ConstraintFunction, Operator, ParticipantAgent, Permission, PolicyContext};
