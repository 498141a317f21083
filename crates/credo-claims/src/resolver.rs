use crate::error::{DescriptorError, DescriptorResult};
use credo_core::{
    AttributeMap, AttributeValue, ClaimEntry, Claims, CredentialEnvelope, CredentialId,
    IdentifierSource, IssuerId, TraceSink, VerifiableCredential,
};
use url::Url;

// ---------------------------------------------------------------------------
// ClaimsResolver
// ---------------------------------------------------------------------------

/// Resolves the claims "issued" to a participant from an endpoint
/// descriptor.
///
/// Everything the produced credential asserts is read from the descriptor's
/// query component; authority and path are ignored and no network access
/// happens. Stateless: one resolver may serve concurrent resolutions.
pub struct ClaimsResolver<'a> {
    trace: &'a dyn TraceSink,
    identifiers: &'a dyn IdentifierSource,
}

impl<'a> ClaimsResolver<'a> {
    pub fn new(trace: &'a dyn TraceSink, identifiers: &'a dyn IdentifierSource) -> Self {
        Self { trace, identifiers }
    }

    /// Resolve claims for the participant described by `descriptor`.
    ///
    /// The query component is split on `&`, each segment on its first `=`
    /// (a segment with no `=` yields an empty value), and both sides are
    /// percent-decoded as UTF-8 with `+` becoming a space. When a key
    /// repeats, the last occurrence wins.
    ///
    /// Success yields exactly one claims entry: a fresh credential
    /// identifier mapped to an envelope whose subject holds the decoded
    /// pairs and whose issuer is a fresh synthetic `did:web` identifier.
    /// Fails with [`DescriptorError::Malformed`] when the descriptor does
    /// not parse as a URI or has no query component.
    pub fn resolve(&self, descriptor: &str) -> DescriptorResult<Claims> {
        self.trace.debug(&format!(
            "starting claims resolution for endpoint descriptor {}",
            descriptor
        ));

        let url =
            Url::parse(descriptor).map_err(|e| DescriptorError::Malformed(e.to_string()))?;
        if url.query().is_none() {
            return Err(DescriptorError::Malformed(
                "descriptor has no query component".to_string(),
            ));
        }

        let mut subject = AttributeMap::new();
        for (key, value) in url.query_pairs() {
            subject.insert(key.into_owned(), AttributeValue::Str(value.into_owned()));
        }

        self.trace.debug(&format!(
            "completed claims resolution, credential subject: {:?}",
            subject
        ));

        let credential_id = CredentialId::new(self.identifiers.fresh_id());
        let issuer = IssuerId::did_web(&self.identifiers.fresh_id());
        let envelope = CredentialEnvelope::new(VerifiableCredential::new(subject), issuer);

        let mut claims = Claims::new();
        claims.insert(credential_id, ClaimEntry::from(envelope));
        Ok(claims)
    }
}
