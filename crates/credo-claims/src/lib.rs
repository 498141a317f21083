//! Credo Claims Resolution
//!
//! Derives a verifiable-credential-shaped claims set from an identity
//! endpoint descriptor. The descriptor's query component is the sole source
//! of subject attributes; the URL is never dereferenced. This stands in for
//! a real credential verification protocol while producing the exact claims
//! shape downstream policy evaluation consumes.
//!
//! Key features:
//! - Query parsing with UTF-8 percent-decoding (`+` decodes to a space)
//! - Last-occurrence-wins handling of duplicate query keys
//! - Fresh credential identifier and synthetic `did:web` issuer per call,
//!   minted through an injected identifier source
//! - Typed failure (`DescriptorError::Malformed`) instead of exceptions
//! - Two debug trace events per resolution, before parsing and on completion

pub mod error;
pub mod resolver;

// Re-export primary types for convenience
pub use error::{DescriptorError, DescriptorResult};
pub use resolver::ClaimsResolver;
