// SPDX-License-Identifier: MIT OR Apache-2.0

use tracing::debug;

use crate::types::{GroupId, ParticipantId, RelationType};

/// A single participant of the current scope.
///
/// Participants are owned by the roster of a scope, groups only refer to them by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Participant {
    pub id: ParticipantId,
}

impl Participant {
    pub fn new(id: ParticipantId) -> Self {
        Self { id }
    }
}

impl From<Participant> for ParticipantId {
    fn from(participant: Participant) -> Self {
        participant.id
    }
}

/// Relation of a group to a single participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParticipantRelation {
    pub relation_type: RelationType,
    pub participant_id: ParticipantId,
}

/// Relation of a group to another group, identified by `target_group_id`.
///
/// The target does not need to exist, dangling relations contribute no members.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupRelation {
    pub relation_type: RelationType,
    pub target_group_id: GroupId,
}

/// A group and the relations which define its members.
///
/// Virtual groups are derived automatically by other features (for example the audience of a
/// single event). They resolve like any other group but are hidden from
/// [`Snapshot::containing_groups`](crate::Snapshot::containing_groups).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    id: GroupId,
    is_virtual: bool,
    participant_relations: Vec<ParticipantRelation>,
    group_relations: Vec<GroupRelation>,
}

impl Group {
    /// Create a group without any relations.
    pub fn new(id: GroupId) -> Self {
        Self {
            id,
            is_virtual: false,
            participant_relations: Vec::new(),
            group_relations: Vec::new(),
        }
    }

    /// Create a virtual group without any relations.
    pub fn new_virtual(id: GroupId) -> Self {
        Self {
            is_virtual: true,
            ..Self::new(id)
        }
    }

    /// Create a group from already collected relations.
    ///
    /// Participant relations pointing at an invalid participant id are dropped.
    pub fn from_relations(
        id: GroupId,
        is_virtual: bool,
        participant_relations: impl IntoIterator<Item = ParticipantRelation>,
        group_relations: impl IntoIterator<Item = GroupRelation>,
    ) -> Self {
        let mut group = Self {
            id,
            is_virtual,
            participant_relations: Vec::new(),
            group_relations: group_relations.into_iter().collect(),
        };

        for relation in participant_relations {
            group = group.with_participant_relation(relation);
        }

        group
    }

    pub fn include_participant(self, participant_id: ParticipantId) -> Self {
        self.with_participant_relation(ParticipantRelation {
            relation_type: RelationType::Include,
            participant_id,
        })
    }

    pub fn exclude_participant(self, participant_id: ParticipantId) -> Self {
        self.with_participant_relation(ParticipantRelation {
            relation_type: RelationType::Exclude,
            participant_id,
        })
    }

    pub fn include_group(self, target_group_id: GroupId) -> Self {
        self.with_group_relation(GroupRelation {
            relation_type: RelationType::Include,
            target_group_id,
        })
    }

    pub fn exclude_group(self, target_group_id: GroupId) -> Self {
        self.with_group_relation(GroupRelation {
            relation_type: RelationType::Exclude,
            target_group_id,
        })
    }

    fn with_participant_relation(mut self, relation: ParticipantRelation) -> Self {
        if !relation.participant_id.is_valid() {
            debug!(
                group_id = %self.id,
                relation_type = %relation.relation_type,
                "drop participant relation without a valid participant id"
            );
            return self;
        }

        self.participant_relations.push(relation);
        self
    }

    fn with_group_relation(mut self, relation: GroupRelation) -> Self {
        self.group_relations.push(relation);
        self
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn is_virtual(&self) -> bool {
        self.is_virtual
    }

    pub fn participant_relations(&self) -> &[ParticipantRelation] {
        &self.participant_relations
    }

    pub fn group_relations(&self) -> &[GroupRelation] {
        &self.group_relations
    }

    /// Participants this group directly includes.
    pub fn included_participants(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.participants_of(RelationType::Include)
    }

    /// Participants this group directly excludes.
    pub fn excluded_participants(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.participants_of(RelationType::Exclude)
    }

    /// Groups whose members this group includes.
    pub fn included_groups(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.groups_of(RelationType::Include)
    }

    /// Groups whose members this group excludes.
    pub fn excluded_groups(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.groups_of(RelationType::Exclude)
    }

    /// Return `true` if this group has at least one inclusive relation, either to a participant or
    /// to another group.
    pub fn has_inclusions(&self) -> bool {
        self.included_participants().next().is_some() || self.included_groups().next().is_some()
    }

    /// Return `true` if this group directly includes the given participant.
    pub fn directly_includes(&self, participant_id: ParticipantId) -> bool {
        self.included_participants().any(|id| id == participant_id)
    }

    fn participants_of(
        &self,
        relation_type: RelationType,
    ) -> impl Iterator<Item = ParticipantId> + '_ {
        self.participant_relations
            .iter()
            .filter(move |relation| relation.relation_type == relation_type)
            .map(|relation| relation.participant_id)
    }

    fn groups_of(&self, relation_type: RelationType) -> impl Iterator<Item = GroupId> + '_ {
        self.group_relations
            .iter()
            .filter(move |relation| relation.relation_type == relation_type)
            .map(|relation| relation.target_group_id)
    }
}
