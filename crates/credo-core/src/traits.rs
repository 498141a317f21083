// ---------------------------------------------------------------------------
// IdentifierSource trait — fresh unique identifier capability
// ---------------------------------------------------------------------------

/// Source of fresh globally-unique identifiers.
///
/// Injected wherever identifiers are minted so tests can substitute a
/// deterministic source. Each call must yield a value not derived from any
/// input and not reproducible from prior calls.
pub trait IdentifierSource: Send + Sync {
    fn fresh_id(&self) -> String;
}

/// Production source: random version-4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdentifierSource;

impl IdentifierSource for RandomIdentifierSource {
    fn fresh_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
