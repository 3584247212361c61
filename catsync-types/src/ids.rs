//! Identifier types used throughout the engine.
//!
//! Target ids are the host catalog's positive integer keys. Scope ids and
//! tenant keys are opaque strings owned by the host platform.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

/// Identifier of a synchronizable catalog entity. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct TargetId(NonZeroU64);

impl TargetId {
    /// Creates a target id, rejecting zero and negative values.
    pub fn new(id: i64) -> crate::Result<Self> {
        u64::try_from(id)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or(Error::InvalidTargetId(id))
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<i64> for TargetId {
    type Error = Error;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<TargetId> for u64 {
    fn from(id: TargetId) -> Self {
        id.get()
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TargetId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s
            .trim()
            .parse()
            .map_err(|_| Error::UnparsableTargetId(s.to_string()))?;
        Self::new(raw)
    }
}

macro_rules! opaque_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates the key, rejecting empty or whitespace-only input.
            pub fn new(key: impl Into<String>) -> crate::Result<Self> {
                let key = key.into();
                if key.trim().is_empty() {
                    return Err(Error::EmptyIdentifier);
                }
                Ok(Self(key))
            }

            /// Returns the key as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_key!(
    /// A store/view context under a tenant.
    ScopeId
);

opaque_key!(
    /// The account/installation boundary that owns a set of scopes.
    TenantKey
);
