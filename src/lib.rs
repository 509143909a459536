// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolve participant group membership from a graph of nested include and exclude relations.
//!
//! Groups don't store their members directly. Instead every group holds a list of relations: it
//! can include or exclude single participants, and it can include or exclude _other groups_
//! whose members are resolved recursively. Relations are authored by users, which means the
//! resulting graph can contain dangling references and cycles. Resolution is total: both
//! degrade to "contributes nothing" instead of failing.
//!
//! All queries run against an immutable [`Snapshot`] of groups and the participant roster of the
//! current scope:
//!
//! - [`Snapshot::members`] resolves a group into the set of participants it contains.
//!   Exclusions always win over inclusions.
//! - [`Snapshot::containing_groups`] answers the reverse question: which non-virtual groups
//!   contain a participant, directly or through chains of inclusive group relations.
//!
//! What a group without any inclusive relations means is not decided by this crate. Every
//! forward query takes a [`ResolvePolicy`] which states it explicitly.
//!
//! ```
//! use p2panda_roster::{Group, GroupId, ParticipantId, ResolvePolicy, Snapshot};
//!
//! let leads = Group::new(GroupId::new(1))
//!     .include_participant(ParticipantId::new(1))
//!     .include_participant(ParticipantId::new(2));
//! let organizers = Group::new(GroupId::new(2))
//!     .include_group(GroupId::new(1))
//!     .exclude_participant(ParticipantId::new(2));
//!
//! let roster = [1, 2, 3].map(ParticipantId::new);
//! let snapshot = Snapshot::new([leads, organizers], roster);
//!
//! let members = snapshot.members(GroupId::new(2), ResolvePolicy::nobody_when_unrestricted());
//! assert_eq!(members.len(), 1);
//! assert!(members.contains(&ParticipantId::new(1)));
//! ```
pub mod diagnostics;
mod forward;
mod group;
mod index;
mod policy;
pub mod record;
mod reverse;
mod snapshot;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
mod types;

pub use diagnostics::Diagnostics;
pub use group::{Group, GroupRelation, Participant, ParticipantRelation};
pub use index::GraphIndex;
pub use policy::ResolvePolicy;
pub use snapshot::{ResolveError, Snapshot, SnapshotError};
pub use types::{GroupId, ParticipantId, RelationType};
