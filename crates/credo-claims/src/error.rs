use thiserror::Error;

// ---------------------------------------------------------------------------
// DescriptorError — endpoint descriptor rejected
// ---------------------------------------------------------------------------

/// Failure to derive claims from an endpoint descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The descriptor is not a well-formed URI with a query component.
    /// Pure parsing failure, not transient: callers must not retry.
    #[error("malformed endpoint descriptor: {0}")]
    Malformed(String),
}

pub type DescriptorResult<T> = Result<T, DescriptorError>;
