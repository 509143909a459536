// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reverse resolution of a participant into the groups containing them.
use std::collections::HashSet;

use tracing::trace;

use crate::index::GraphIndex;
use crate::types::{GroupId, ParticipantId};

/// Collect all non-virtual groups which contain the given participant.
///
/// A group contains a participant if it directly includes them, or if it includes another
/// non-virtual group which contains them. Only inclusive relations are followed, exclusions are
/// not taken into account here. This answers "where is this participant listed" for display
/// purposes and can therefore differ from forward resolution, which treats exclusions as
/// authoritative.
///
/// Virtual groups are never returned and never used as an intermediate hop.
pub(crate) fn containing_groups(
    index: &GraphIndex,
    participant_id: ParticipantId,
) -> HashSet<GroupId> {
    // Groups which directly include the participant.
    let mut visiting: HashSet<GroupId> = index
        .groups()
        .filter(|group| !group.is_virtual() && group.directly_includes(participant_id))
        .map(|group| group.id())
        .collect();

    // Walk up the inclusion graph. Every group is expanded at most once, which also guards
    // against cycles.
    let mut stack: Vec<GroupId> = visiting.iter().copied().collect();
    while let Some(group_id) = stack.pop() {
        for parent_id in index.included_by(group_id) {
            let Some(parent) = index.get(&parent_id) else {
                continue;
            };

            if parent.is_virtual() {
                continue;
            }

            if visiting.insert(parent_id) {
                stack.push(parent_id);
            } else {
                trace!(%group_id, %parent_id, "group already visited");
            }
        }
    }

    visiting
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::group::Group;
    use crate::index::GraphIndex;
    use crate::test_utils::{G1, G2, G3, G4, P1, P2};

    use super::containing_groups;

    #[test]
    fn direct_and_transitive() {
        let index = GraphIndex::new([
            Group::new(G1).include_group(G2),
            Group::new(G2).include_group(G3),
            Group::new(G3).include_participant(P1),
            Group::new(G4).include_participant(P2),
        ]);

        assert_eq!(containing_groups(&index, P1), HashSet::from([G1, G2, G3]));
        assert_eq!(containing_groups(&index, P2), HashSet::from([G4]));
    }

    #[test]
    fn virtual_groups_are_not_intermediate_hops() {
        let index = GraphIndex::new([
            Group::new(G1).include_group(G2),
            Group::new_virtual(G2).include_group(G3),
            Group::new(G3).include_participant(P1),
        ]);

        assert_eq!(containing_groups(&index, P1), HashSet::from([G3]));
    }

    #[test]
    fn exclusions_are_ignored() {
        let index = GraphIndex::new([
            Group::new(G1).include_group(G2).exclude_participant(P1),
            Group::new(G2).include_participant(P1),
            Group::new(G3).include_participant(P1).exclude_group(G2),
        ]);

        assert_eq!(containing_groups(&index, P1), HashSet::from([G1, G2, G3]));
    }

    #[test]
    fn cycles_terminate() {
        let index = GraphIndex::new([
            Group::new(G1).include_group(G2),
            Group::new(G2).include_group(G1).include_participant(P1),
            Group::new(G3).include_group(G3),
        ]);

        assert_eq!(containing_groups(&index, P1), HashSet::from([G1, G2]));
        assert!(containing_groups(&index, P2).is_empty());
    }

    #[test]
    fn exclusive_group_relation_does_not_propagate() {
        let index = GraphIndex::new([
            Group::new(G1).exclude_group(G2),
            Group::new(G2).include_participant(P1),
        ]);

        assert_eq!(containing_groups(&index, P1), HashSet::from([G2]));
    }
}
