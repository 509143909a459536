// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graphmap::DiGraphMap;
use tracing::warn;

use crate::group::Group;
use crate::types::GroupId;

/// Read-only lookup structure over all groups of a snapshot.
///
/// Besides resolving group ids the index keeps a directed graph of all _inclusive_ group
/// relations (`source -> target`). Walking it against the edge direction answers "which groups
/// include this group", which is what reverse resolution needs.
#[derive(Clone, Debug, Default)]
pub struct GraphIndex {
    groups: HashMap<GroupId, Group>,
    inclusions: DiGraphMap<GroupId, ()>,
}

impl GraphIndex {
    /// Build the index in a single pass over the given groups.
    ///
    /// If the same id shows up more than once the last group wins.
    pub fn new(groups: impl IntoIterator<Item = Group>) -> Self {
        let mut by_id = HashMap::new();
        for group in groups {
            let id = group.id();
            if by_id.insert(id, group).is_some() {
                warn!(group_id = %id, "duplicate group in index, replacing previous definition");
            }
        }

        let mut inclusions = DiGraphMap::new();
        for (id, group) in &by_id {
            inclusions.add_node(*id);
            for target in group.included_groups() {
                inclusions.add_edge(*id, target, ());
            }
        }

        Self {
            groups: by_id,
            inclusions,
        }
    }

    /// Look up a group by id.
    pub fn get(&self, id: &GroupId) -> Option<&Group> {
        self.groups.get(id)
    }

    pub fn contains(&self, id: &GroupId) -> bool {
        self.groups.contains_key(id)
    }

    /// All indexed groups in arbitrary order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Ids of all groups which have an inclusive relation to the given target group.
    ///
    /// Unknown targets have no including groups.
    pub fn included_by(&self, target: GroupId) -> impl Iterator<Item = GroupId> + '_ {
        self.inclusions.neighbors_directed(target, Direction::Incoming)
    }
}
