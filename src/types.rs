// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a single participant.
///
/// The value `0` is reserved for "unresolved" participants coming from the data layer and is
/// never a valid member of any group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize), serde(transparent))]
pub struct ParticipantId(u64);

impl ParticipantId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns `false` for the reserved zero id.
    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

impl Display for ParticipantId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ParticipantId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Identifier of a group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize), serde(transparent))]
pub struct GroupId(u64);

impl GroupId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns `false` for the reserved zero id.
    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

impl Display for GroupId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for GroupId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Whether a relation adds to or removes from the members of a group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(rename_all = "lowercase")
)]
pub enum RelationType {
    Include,
    Exclude,
}

impl RelationType {
    pub fn is_include(&self) -> bool {
        matches!(self, RelationType::Include)
    }

    pub fn is_exclude(&self) -> bool {
        matches!(self, RelationType::Exclude)
    }
}

impl Display for RelationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RelationType::Include => "include",
            RelationType::Exclude => "exclude",
        };

        write!(f, "{}", s)
    }
}
