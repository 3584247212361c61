//! Aspects: coarse categories of catalog change.
//!
//! An aspect is stored and shipped as its integer code. The codes are part
//! of the ledger format and must never be renumbered.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A category of change used to size a re-sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Aspect {
    /// No relevant change.
    None = 0,
    /// Superset sentinel: perform a full re-evaluation.
    All = 1,
    Attributes = 2,
    Relations = 3,
    Price = 4,
    Stock = 5,
    Visibility = 6,
}

impl Aspect {
    /// Every aspect, in code order.
    pub const ALL_VARIANTS: [Aspect; 7] = [
        Aspect::None,
        Aspect::All,
        Aspect::Attributes,
        Aspect::Relations,
        Aspect::Price,
        Aspect::Stock,
        Aspect::Visibility,
    ];

    /// Returns the stable integer code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Aspect::None => "none",
            Aspect::All => "all",
            Aspect::Attributes => "attributes",
            Aspect::Relations => "relations",
            Aspect::Price => "price",
            Aspect::Stock => "stock",
            Aspect::Visibility => "visibility",
        }
    }
}

impl TryFrom<u8> for Aspect {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Aspect::ALL_VARIANTS
            .into_iter()
            .find(|a| a.code() == code)
            .ok_or(Error::UnknownAspectCode(code))
    }
}

impl From<Aspect> for u8 {
    fn from(aspect: Aspect) -> Self {
        aspect.code()
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Aspect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Aspect::ALL_VARIANTS
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownAspectName(s.to_string()))
    }
}

/// A de-duplicated set of aspects.
///
/// Two rules hold for every value of this type:
/// - `None` is never a member (it contributes nothing).
/// - If `All` is a member it is the only member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Aspect>", into = "Vec<Aspect>")]
pub struct AspectSet(BTreeSet<Aspect>);

impl AspectSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the full-resync set `{All}`.
    #[must_use]
    pub fn full() -> Self {
        Self(BTreeSet::from([Aspect::All]))
    }

    /// Adds an aspect, keeping the set's rules.
    pub fn insert(&mut self, aspect: Aspect) {
        match aspect {
            Aspect::None => {}
            Aspect::All => *self = Self::full(),
            other if !self.is_full() => {
                self.0.insert(other);
            }
            _ => {}
        }
    }

    /// Returns true when the set is exactly `{All}`.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.0.contains(&Aspect::All)
    }

    /// Returns true if the aspect is a member.
    #[must_use]
    pub fn contains(&self, aspect: Aspect) -> bool {
        self.0.contains(&aspect)
    }

    /// Returns true when no relevant change was recognized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates members in code order.
    pub fn iter(&self) -> impl Iterator<Item = Aspect> + '_ {
        self.0.iter().copied()
    }

    /// Returns the integer codes of the members, in code order.
    #[must_use]
    pub fn codes(&self) -> Vec<u8> {
        self.iter().map(Aspect::code).collect()
    }
}

impl FromIterator<Aspect> for AspectSet {
    fn from_iter<I: IntoIterator<Item = Aspect>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<Aspect> for AspectSet {
    fn extend<I: IntoIterator<Item = Aspect>>(&mut self, iter: I) {
        for aspect in iter {
            self.insert(aspect);
        }
    }
}

impl From<Vec<Aspect>> for AspectSet {
    fn from(aspects: Vec<Aspect>) -> Self {
        aspects.into_iter().collect()
    }
}

impl From<AspectSet> for Vec<Aspect> {
    fn from(set: AspectSet) -> Self {
        set.0.into_iter().collect()
    }
}
