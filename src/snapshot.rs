// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::group::Group;
use crate::index::GraphIndex;
use crate::policy::ResolvePolicy;
use crate::record::GroupRecord;
use crate::types::{GroupId, ParticipantId};
use crate::{forward, reverse};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("group record without a valid id")]
    InvalidGroupId,

    #[error("group {0} is defined more than once")]
    DuplicateGroup(GroupId),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("group {0} is not part of the snapshot")]
    UnknownGroup(GroupId),
}

/// Immutable view on all groups and the participant roster of one scope.
///
/// All queries are pure functions over the snapshot. Results are computed fresh on every call,
/// callers who want to cache them can key the cache by [`Snapshot::generation`].
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    index: GraphIndex,
    roster: HashSet<ParticipantId>,
    generation: Option<u64>,
}

impl Snapshot {
    /// Create a snapshot from groups and the roster of the current scope.
    ///
    /// Invalid participant ids are removed from the roster.
    pub fn new(
        groups: impl IntoIterator<Item = Group>,
        roster: impl IntoIterator<Item = impl Into<ParticipantId>>,
    ) -> Self {
        let roster = roster
            .into_iter()
            .map(Into::<ParticipantId>::into)
            .filter(|participant_id| {
                let valid = participant_id.is_valid();
                if !valid {
                    debug!("drop invalid participant id from roster");
                }
                valid
            })
            .collect();

        Self {
            index: GraphIndex::new(groups),
            roster,
            generation: None,
        }
    }

    /// Create a snapshot from records of the data layer.
    ///
    /// Fails if a record has no valid id or if the same group id is used by more than one
    /// record.
    pub fn from_records(
        records: impl IntoIterator<Item = GroupRecord>,
        roster: impl IntoIterator<Item = u64>,
    ) -> Result<Self, SnapshotError> {
        let mut seen = HashSet::new();
        let mut groups = Vec::new();
        for record in records {
            let id = GroupId::new(record.id);
            if !id.is_valid() {
                return Err(SnapshotError::InvalidGroupId);
            }

            if !seen.insert(id) {
                return Err(SnapshotError::DuplicateGroup(id));
            }

            groups.push(Group::from(record));
        }

        Ok(Self::new(groups, roster.into_iter().map(ParticipantId::new)))
    }

    /// Attach a caller-defined version to this snapshot.
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = Some(generation);
        self
    }

    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    pub fn index(&self) -> &GraphIndex {
        &self.index
    }

    pub fn roster(&self) -> &HashSet<ParticipantId> {
        &self.roster
    }

    pub fn group(&self, group_id: &GroupId) -> Option<&Group> {
        self.index.get(group_id)
    }

    /// Resolve all participants which are members of the given group.
    ///
    /// Inclusions of participants and other groups are unioned, then everything excluded directly
    /// or through an excluded group is removed. Cycles and references to unknown groups
    /// contribute no members. An unknown `group_id` resolves to the empty set, use
    /// [`Snapshot::try_members`] to tell both cases apart.
    pub fn members(&self, group_id: GroupId, policy: ResolvePolicy) -> HashSet<ParticipantId> {
        forward::members(&self.index, &self.roster, group_id, policy)
    }

    /// Same as [`Snapshot::members`] but fails for groups which are not part of this snapshot.
    pub fn try_members(
        &self,
        group_id: GroupId,
        policy: ResolvePolicy,
    ) -> Result<HashSet<ParticipantId>, ResolveError> {
        if !self.index.contains(&group_id) {
            return Err(ResolveError::UnknownGroup(group_id));
        }

        Ok(self.members(group_id, policy))
    }

    /// Return `true` if the participant is a resolved member of the group.
    pub fn is_member(
        &self,
        group_id: GroupId,
        participant_id: ParticipantId,
        policy: ResolvePolicy,
    ) -> bool {
        self.members(group_id, policy).contains(&participant_id)
    }

    /// Return all non-virtual groups which contain the participant, directly or through
    /// inclusive group relations.
    ///
    /// Exclusions are not taken into account: a participant excluded from a group is still
    /// listed here when one of the inclusive relations of that group reaches them.
    pub fn containing_groups(&self, participant_id: ParticipantId) -> HashSet<GroupId> {
        reverse::containing_groups(&self.index, participant_id)
    }
}
