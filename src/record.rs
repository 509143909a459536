// SPDX-License-Identifier: MIT OR Apache-2.0

//! Group records as delivered by the data layer.
//!
//! Records are a loose representation of groups: participant ids might be missing or zero, and
//! relations can carry embedded copies of the objects they point at. Converting a record into a
//! [`Group`] drops invalid relations and ignores all embedded objects, only ids are used for
//! resolution.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::group::{Group, GroupRelation, ParticipantRelation};
use crate::types::{GroupId, ParticipantId, RelationType};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct GroupRecord {
    pub id: u64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub is_virtual: bool,

    #[cfg_attr(feature = "serde", serde(default))]
    pub participant_relations: Vec<ParticipantRelationRecord>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub group_relations: Vec<GroupRelationRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ParticipantRelationRecord {
    pub relation_type: RelationType,

    /// Id of the related participant, `None` or `0` if it could not be resolved.
    #[cfg_attr(feature = "serde", serde(default))]
    pub participant_id: Option<u64>,

    /// Embedded copy of the participant, for display only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub participant: Option<EmbeddedParticipant>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct GroupRelationRecord {
    pub relation_type: RelationType,

    pub target_group_id: u64,

    /// Embedded copy of the target group, for display only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_group: Option<EmbeddedGroup>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct EmbeddedParticipant {
    pub id: u64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct EmbeddedGroup {
    pub id: u64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
}

impl ParticipantRelationRecord {
    /// The participant relation this record describes, `None` when the participant id is
    /// missing or zero.
    pub fn to_relation(&self) -> Option<ParticipantRelation> {
        let participant_id = ParticipantId::new(self.participant_id?);
        if !participant_id.is_valid() {
            return None;
        }

        Some(ParticipantRelation {
            relation_type: self.relation_type,
            participant_id,
        })
    }
}

impl GroupRelationRecord {
    pub fn to_relation(&self) -> GroupRelation {
        GroupRelation {
            relation_type: self.relation_type,
            target_group_id: GroupId::new(self.target_group_id),
        }
    }
}

impl From<GroupRecord> for Group {
    fn from(record: GroupRecord) -> Self {
        let id = GroupId::new(record.id);
        let participant_relations = record.participant_relations.iter().filter_map(|relation| {
            let converted = relation.to_relation();
            if converted.is_none() {
                debug!(
                    group_id = %id,
                    relation_type = %relation.relation_type,
                    "drop participant relation without a valid participant id"
                );
            }
            converted
        });

        Group::from_relations(
            id,
            record.is_virtual,
            participant_relations,
            record.group_relations.iter().map(GroupRelationRecord::to_relation),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::group::Group;
    use crate::test_utils::{G1, G2, P1};
    use crate::types::RelationType;

    use super::{
        EmbeddedGroup, EmbeddedParticipant, GroupRecord, GroupRelationRecord,
        ParticipantRelationRecord,
    };

    fn participant_relation(participant_id: Option<u64>) -> ParticipantRelationRecord {
        ParticipantRelationRecord {
            relation_type: RelationType::Include,
            participant_id,
            participant: None,
        }
    }

    #[test]
    fn drop_unresolved_participants() {
        let record = GroupRecord {
            id: 1,
            is_virtual: false,
            participant_relations: vec![
                participant_relation(None),
                participant_relation(Some(0)),
                participant_relation(Some(1)),
            ],
            group_relations: vec![],
        };

        let group = Group::from(record);
        assert_eq!(group.id(), G1);
        assert_eq!(group.included_participants().collect::<Vec<_>>(), vec![P1]);
    }

    #[test]
    fn embedded_objects_are_not_authoritative() {
        let record = GroupRecord {
            id: 1,
            is_virtual: true,
            participant_relations: vec![ParticipantRelationRecord {
                relation_type: RelationType::Exclude,
                participant_id: Some(1),
                // Stale copy pointing at another participant.
                participant: Some(EmbeddedParticipant {
                    id: 9,
                    name: Some("Someone else".into()),
                }),
            }],
            group_relations: vec![GroupRelationRecord {
                relation_type: RelationType::Include,
                target_group_id: 2,
                target_group: Some(EmbeddedGroup { id: 7, name: None }),
            }],
        };

        let group = Group::from(record);
        assert!(group.is_virtual());
        assert_eq!(group.excluded_participants().collect::<Vec<_>>(), vec![P1]);
        assert_eq!(group.included_groups().collect::<Vec<_>>(), vec![G2]);
    }

    #[test]
    fn missing_participant_relation_with_embedded_object_is_dropped() {
        let record = ParticipantRelationRecord {
            relation_type: RelationType::Include,
            participant_id: None,
            participant: Some(EmbeddedParticipant { id: 5, name: None }),
        };

        assert!(record.to_relation().is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_from_json() {
        let json = r#"{
            "id": 3,
            "participant_relations": [
                { "relation_type": "include", "participant_id": 1 },
                { "relation_type": "exclude", "participant_id": null }
            ],
            "group_relations": [
                { "relation_type": "exclude", "target_group_id": 2,
                  "target_group": { "id": 2, "name": "Leads" } }
            ]
        }"#;

        let record: GroupRecord = serde_json::from_str(json).unwrap();
        assert!(!record.is_virtual);
        assert_eq!(record.participant_relations.len(), 2);

        let group = Group::from(record);
        assert_eq!(group.participant_relations().len(), 1);
        assert_eq!(group.excluded_groups().collect::<Vec<_>>(), vec![G2]);
    }
}
