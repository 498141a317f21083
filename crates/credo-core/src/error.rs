use thiserror::Error;

// ---------------------------------------------------------------------------
// ShapeError — a claims entry does not match the expected envelope shape
// ---------------------------------------------------------------------------

/// Failure modes of claims-shape extraction.
///
/// These never escape policy evaluation. The evaluator absorbs them per
/// entry, records a warning with the error as cause, and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The entry is not an object carrying a `vc` key.
    #[error("claims entry has no `vc` object")]
    MissingCredential,
    /// The value under `vc` did not convert into a verifiable credential.
    #[error("claims entry has a malformed `vc` object: {0}")]
    MalformedCredential(String),
    /// The credential subject lacks the requested attribute.
    #[error("credential subject has no `{0}` attribute")]
    MissingAttribute(String),
    /// The requested attribute is present but not a string.
    #[error("credential subject attribute `{0}` is not a string")]
    MistypedAttribute(String),
}

pub type ShapeResult<T> = Result<T, ShapeError>;
