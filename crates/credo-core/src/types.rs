use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Typed identifiers — prevent stringly-typed confusion
// ---------------------------------------------------------------------------

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

define_id!(CredentialId, "Unique identifier for a credential.");
define_id!(IssuerId, "Identifier for a credential issuer.");

/// Scheme prefix for synthetic issuer identifiers. The result mirrors a
/// decentralized-identifier string but is not a real one.
pub const DID_WEB_PREFIX: &str = "did:web:";

impl IssuerId {
    /// Build a synthetic issuer from the fixed scheme prefix and a fresh
    /// unique suffix.
    pub fn did_web(suffix: &str) -> Self {
        Self(format!("{}{}", DID_WEB_PREFIX, suffix))
    }
}

// ---------------------------------------------------------------------------
// AttributeValue — scalar credential-subject value
// ---------------------------------------------------------------------------

/// A single credential-subject attribute value.
///
/// Subjects produced by this workspace hold only `Str` values. Subjects
/// originating elsewhere may carry other scalars or arbitrary JSON, which
/// land in the remaining variants instead of failing the whole credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Str(String),
    Int(i64),
    Bool(bool),
    /// Fallback for non-scalar or exotic values. Must stay the last
    /// variant: untagged deserialization tries variants in order.
    Other(serde_json::Value),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Str(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Str(s)
    }
}

/// Attribute name to value mapping describing a credential subject.
pub type AttributeMap = BTreeMap<String, AttributeValue>;
