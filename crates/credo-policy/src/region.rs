use std::collections::BTreeSet;

use credo_core::{Claims, TraceSink};

use crate::types::{ConstraintFunction, Operator, Permission, PolicyContext};

// ---------------------------------------------------------------------------
// Region collection
// ---------------------------------------------------------------------------

/// Credential subject attribute the region constraint tests against.
pub const REGION_KEY: &str = "region";

/// Collect every region the given claims grant.
///
/// Entries that are not credential-shaped, and credentials whose subject
/// lacks a string `region` attribute, are skipped with a warning on the
/// sink. Set semantics suffice because only membership is ever tested.
pub fn collect_regions(trace: &dyn TraceSink, claims: &Claims) -> BTreeSet<String> {
    let mut regions = BTreeSet::new();
    for entry in claims.values() {
        let credential = match entry.verifiable_credential() {
            Ok(credential) => credential,
            Err(err) => {
                trace.warning(
                    "failed to extract verifiable credential from claims entry",
                    &err.to_string(),
                );
                continue;
            }
        };
        match credential.subject_str(REGION_KEY) {
            Ok(region) => {
                regions.insert(region.to_string());
            }
            Err(err) => {
                trace.warning(
                    "failed to read region from credential subject",
                    &err.to_string(),
                );
            }
        }
    }
    regions
}

// ---------------------------------------------------------------------------
// Region constraint
// ---------------------------------------------------------------------------

/// Constraint function deciding region rules against participant claims.
///
/// Holds no mutable state, so a single instance may serve any number of
/// concurrent evaluations. Never panics: every input resolves to a verdict.
pub struct RegionConstraint<'a> {
    trace: &'a dyn TraceSink,
}

impl<'a> RegionConstraint<'a> {
    pub fn new(trace: &'a dyn TraceSink) -> Self {
        Self { trace }
    }
}

impl ConstraintFunction<Permission> for RegionConstraint<'_> {
    /// Decide whether the region rule holds for the evaluating participant.
    ///
    /// `Eq` grants when `right_value` is among the regions the claims carry
    /// and `Neq` grants when it is not. Every other operator is unsupported
    /// and resolves to `false`.
    fn evaluate(
        &self,
        operator: Operator,
        right_value: &str,
        _rule: &Permission,
        context: &dyn PolicyContext,
    ) -> bool {
        let regions = collect_regions(self.trace, context.claims());
        match operator {
            Operator::Eq => regions.contains(right_value),
            Operator::Neq => !regions.contains(right_value),
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParticipantAgent;
    use credo_core::{
        AttributeMap, AttributeValue, ClaimEntry, CredentialEnvelope, CredentialId,
        InMemoryTraceSink, IssuerId, VerifiableCredential,
    };
    use serde_json::json;

    fn make_region_entry(region: &str) -> ClaimEntry {
        let mut subject = AttributeMap::new();
        subject.insert(REGION_KEY.into(), AttributeValue::Str(region.into()));
        ClaimEntry::from(CredentialEnvelope::new(
            VerifiableCredential::new(subject),
            IssuerId::did_web("test-issuer"),
        ))
    }

    fn make_claims(regions: &[&str]) -> Claims {
        let mut claims = Claims::new();
        for (i, region) in regions.iter().enumerate() {
            claims.insert(
                CredentialId::new(format!("cred-{}", i)),
                make_region_entry(region),
            );
        }
        claims
    }

    fn _assert_constraint_object_safe(_: &dyn ConstraintFunction<Permission>) {}

    #[test]
    fn test_eq_grants_member_region() {
        let sink = InMemoryTraceSink::new();
        let constraint = RegionConstraint::new(&sink);
        let agent = ParticipantAgent::new(make_claims(&["us", "eu"]));

        assert!(constraint.evaluate(Operator::Eq, "us", &Permission, &agent));
        assert!(constraint.evaluate(Operator::Eq, "eu", &Permission, &agent));
        assert!(!constraint.evaluate(Operator::Eq, "apac", &Permission, &agent));
    }

    #[test]
    fn test_neq_complements_eq() {
        let sink = InMemoryTraceSink::new();
        let constraint = RegionConstraint::new(&sink);
        let agent = ParticipantAgent::new(make_claims(&["us"]));

        for value in ["us", "eu", "apac", ""] {
            let granted = constraint.evaluate(Operator::Eq, value, &Permission, &agent);
            let denied = constraint.evaluate(Operator::Neq, value, &Permission, &agent);
            assert_eq!(granted, !denied, "EQ and NEQ must disagree for {:?}", value);
        }
    }

    #[test]
    fn test_unsupported_operators_fail_closed() {
        let sink = InMemoryTraceSink::new();
        let constraint = RegionConstraint::new(&sink);
        let agent = ParticipantAgent::new(make_claims(&["us"]));

        // The region is a member, yet anything but EQ/NEQ must deny.
        for op in [
            Operator::Gt,
            Operator::Geq,
            Operator::Lt,
            Operator::Leq,
            Operator::In,
        ] {
            assert!(!constraint.evaluate(op, "us", &Permission, &agent));
        }
    }

    #[test]
    fn test_empty_claims_grant_nothing_but_absence() {
        let sink = InMemoryTraceSink::new();
        let constraint = RegionConstraint::new(&sink);
        let agent = ParticipantAgent::default();

        assert!(!constraint.evaluate(Operator::Eq, "us", &Permission, &agent));
        assert!(constraint.evaluate(Operator::Neq, "us", &Permission, &agent));
        assert!(sink.warnings().is_empty());
    }

    #[test]
    fn test_collect_regions_deduplicates() {
        let sink = InMemoryTraceSink::new();
        let claims = make_claims(&["us", "us", "eu"]);

        let regions = collect_regions(&sink, &claims);

        let expected: BTreeSet<String> = ["us", "eu"].iter().map(|r| r.to_string()).collect();
        assert_eq!(regions, expected);
    }

    #[test]
    fn test_entry_without_credential_is_dropped_with_warning() {
        let mut claims = make_claims(&["us"]);
        claims.insert(
            CredentialId::new("stray"),
            ClaimEntry::Foreign(json!({"credentialSubject": {"region": "eu"}})),
        );

        let sink = InMemoryTraceSink::new();
        let regions = collect_regions(&sink, &claims);

        let expected: BTreeSet<String> = ["us".to_string()].into_iter().collect();
        assert_eq!(regions, expected);
        let warnings = sink.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("failed to extract verifiable credential"));
    }

    #[test]
    fn test_dropped_entry_does_not_poison_the_verdict() {
        let mut claims = make_claims(&["us"]);
        claims.insert(CredentialId::new("stray"), ClaimEntry::Foreign(json!("opaque")));

        let sink = InMemoryTraceSink::new();
        let constraint = RegionConstraint::new(&sink);
        let agent = ParticipantAgent::new(claims);

        assert!(constraint.evaluate(Operator::Eq, "us", &Permission, &agent));
        assert_eq!(sink.warnings().len(), 1);

        sink.clear();
        assert!(!constraint.evaluate(Operator::Eq, "eu", &Permission, &agent));
        assert_eq!(sink.warnings().len(), 1);
    }

    #[test]
    fn test_credential_of_wrong_shape_is_dropped_with_warning() {
        let mut claims = Claims::new();
        claims.insert(
            CredentialId::new("cred-1"),
            ClaimEntry::Foreign(json!({"vc": "not an object"})),
        );

        let sink = InMemoryTraceSink::new();
        let regions = collect_regions(&sink, &claims);

        assert!(regions.is_empty());
        let warnings = sink.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].cause.as_deref().unwrap_or("").contains("malformed"));
    }

    #[test]
    fn test_missing_region_attribute_warns_and_skips() {
        let mut subject = AttributeMap::new();
        subject.insert("tier".into(), AttributeValue::Str("GOLD".into()));
        let entry = ClaimEntry::from(CredentialEnvelope::new(
            VerifiableCredential::new(subject),
            IssuerId::did_web("test-issuer"),
        ));
        let mut claims = Claims::new();
        claims.insert(CredentialId::new("cred-1"), entry);

        let sink = InMemoryTraceSink::new();
        let regions = collect_regions(&sink, &claims);

        assert!(regions.is_empty());
        let warnings = sink.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("failed to read region"));
        assert!(warnings[0].cause.as_deref().unwrap_or("").contains("no `region` attribute"));
    }

    #[test]
    fn test_mistyped_region_attribute_warns_and_skips() {
        let mut subject = AttributeMap::new();
        subject.insert(REGION_KEY.into(), AttributeValue::Int(7));
        let entry = ClaimEntry::from(CredentialEnvelope::new(
            VerifiableCredential::new(subject),
            IssuerId::did_web("test-issuer"),
        ));
        let mut claims = Claims::new();
        claims.insert(CredentialId::new("cred-1"), entry);

        let sink = InMemoryTraceSink::new();
        let regions = collect_regions(&sink, &claims);

        assert!(regions.is_empty());
        let warnings = sink.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].cause.as_deref().unwrap_or("").contains("not a string"));
    }

    #[test]
    fn test_mistyped_issuer_does_not_block_the_region() {
        // The issuer field is irrelevant to region extraction, so an entry
        // whose `iss` is the wrong type still contributes.
        let entry: ClaimEntry =
            serde_json::from_value(json!({"vc": {"credentialSubject": {"region": "us"}}, "iss": 42}))
                .unwrap();
        assert!(matches!(entry, ClaimEntry::Foreign(_)));

        let mut claims = Claims::new();
        claims.insert(CredentialId::new("cred-1"), entry);

        let sink = InMemoryTraceSink::new();
        let regions = collect_regions(&sink, &claims);

        let expected: BTreeSet<String> = ["us".to_string()].into_iter().collect();
        assert_eq!(regions, expected);
        assert!(sink.warnings().is_empty());
    }

    #[test]
    fn test_arbitrary_entries_never_panic() {
        let claims: Claims = serde_json::from_value(json!({
            "a": null,
            "b": [1, 2, 3],
            "c": {"vc": null},
            "d": {"vc": {"credentialSubject": {"region": ["us"]}}},
            "e": {"vc": {"credentialSubject": {}}},
            "f": "plain string",
            "g": {"vc": {"credentialSubject": {"region": "eu"}}},
        }))
        .unwrap();

        let sink = InMemoryTraceSink::new();
        let constraint = RegionConstraint::new(&sink);
        let agent = ParticipantAgent::new(claims);

        assert!(constraint.evaluate(Operator::Eq, "eu", &Permission, &agent));
        assert!(!constraint.evaluate(Operator::Eq, "us", &Permission, &agent));
        assert!(constraint.evaluate(Operator::Neq, "us", &Permission, &agent));
        assert!(!constraint.evaluate(Operator::Gt, "eu", &Permission, &agent));
    }
}
