// SPDX-License-Identifier: MIT OR Apache-2.0

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for forward resolution.
///
/// A group without any inclusive relations (neither to participants nor to other groups) can be
/// read in two ways: "no restriction was specified, so everyone of the roster is a member" or
/// "nothing was included yet, so nobody is a member". Which one applies depends on the feature
/// asking. There is no `Default` implementation, every caller has to pick one.
///
/// The policy applies to every group visited during resolution, including nested ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ResolvePolicy {
    /// When `true`, a group without inclusive relations resolves to the full roster before
    /// exclusions are applied. When `false` it resolves to the empty set.
    pub empty_inclusion_means_all: bool,
}

impl ResolvePolicy {
    pub fn new(empty_inclusion_means_all: bool) -> Self {
        Self {
            empty_inclusion_means_all,
        }
    }

    /// Groups without inclusive relations contain the whole roster.
    pub fn everyone_when_unrestricted() -> Self {
        Self::new(true)
    }

    /// Groups without inclusive relations contain nobody.
    pub fn nobody_when_unrestricted() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::ResolvePolicy;

    #[test]
    fn named_constructors() {
        assert!(ResolvePolicy::everyone_when_unrestricted().empty_inclusion_means_all);
        assert!(!ResolvePolicy::nobody_when_unrestricted().empty_inclusion_means_all);
        assert_eq!(
            ResolvePolicy::new(true),
            ResolvePolicy::everyone_when_unrestricted()
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn load_from_json() {
        let policy: ResolvePolicy =
            serde_json::from_str(r#"{ "empty_inclusion_means_all": false }"#).unwrap();
        assert_eq!(policy, ResolvePolicy::nobody_when_unrestricted());

        // The switch is required, a missing value is rejected.
        assert!(serde_json::from_str::<ResolvePolicy>("{}").is_err());
    }
}
