use crate::error::{ShapeError, ShapeResult};
use crate::types::{AttributeMap, CredentialId, IssuerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Wire field names — fixed for interoperability with downstream consumers
// ---------------------------------------------------------------------------

pub const VERIFIABLE_CREDENTIAL_KEY: &str = "vc";
pub const CREDENTIAL_SUBJECT_KEY: &str = "credentialSubject";
pub const ISSUER_KEY: &str = "iss";

// ---------------------------------------------------------------------------
// VerifiableCredential
// ---------------------------------------------------------------------------

/// The credential payload: a subject attribute map. No cryptographic
/// material is carried or verified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiableCredential {
    #[serde(rename = "credentialSubject")]
    pub credential_subject: AttributeMap,
}

impl VerifiableCredential {
    pub fn new(credential_subject: AttributeMap) -> Self {
        Self { credential_subject }
    }

    /// Read a subject attribute, requiring it to be a string.
    pub fn subject_str(&self, name: &str) -> ShapeResult<&str> {
        match self.credential_subject.get(name) {
            None => Err(ShapeError::MissingAttribute(name.to_string())),
            Some(value) => value
                .as_str()
                .ok_or_else(|| ShapeError::MistypedAttribute(name.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// CredentialEnvelope
// ---------------------------------------------------------------------------

/// One claims-map value as produced by resolution: the credential payload
/// under `"vc"`, the issuer under `"iss"`.
///
/// `issuer` may be absent in claims that originate outside this workspace;
/// policy evaluation never reads it. Resolution always fills it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialEnvelope {
    #[serde(rename = "vc")]
    pub verifiable_credential: VerifiableCredential,
    #[serde(rename = "iss", default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<IssuerId>,
}

impl CredentialEnvelope {
    pub fn new(verifiable_credential: VerifiableCredential, issuer: IssuerId) -> Self {
        Self {
            verifiable_credential,
            issuer: Some(issuer),
        }
    }
}

// ---------------------------------------------------------------------------
// ClaimEntry — well-formed envelope or opaque foreign value
// ---------------------------------------------------------------------------

/// A single claims-map entry.
///
/// Deserialization is total: anything that does not match the envelope
/// shape lands in `Foreign` and is carried opaquely instead of failing the
/// whole claims map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimEntry {
    Envelope(CredentialEnvelope),
    Foreign(serde_json::Value),
}

impl ClaimEntry {
    /// Extract the verifiable credential from this entry.
    ///
    /// Total: never panics. The `Foreign` arm retries structural conversion
    /// of the value under `"vc"` alone, so an entry rejected as an envelope
    /// for reasons outside the credential payload (a mistyped `"iss"`, say)
    /// still yields its credential.
    pub fn verifiable_credential(&self) -> ShapeResult<VerifiableCredential> {
        match self {
            ClaimEntry::Envelope(envelope) => Ok(envelope.verifiable_credential.clone()),
            ClaimEntry::Foreign(value) => {
                let vc = value
                    .as_object()
                    .and_then(|entry| entry.get(VERIFIABLE_CREDENTIAL_KEY))
                    .ok_or(ShapeError::MissingCredential)?;
                serde_json::from_value(vc.clone())
                    .map_err(|e| ShapeError::MalformedCredential(e.to_string()))
            }
        }
    }
}

impl From<CredentialEnvelope> for ClaimEntry {
    fn from(envelope: CredentialEnvelope) -> Self {
        ClaimEntry::Envelope(envelope)
    }
}

/// The full set of credential envelopes attributed to a participant, keyed
/// by credential identifier. Produced fresh per resolution, never merged
/// across calls.
pub type Claims = BTreeMap<CredentialId, ClaimEntry>;
