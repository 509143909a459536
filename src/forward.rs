// SPDX-License-Identifier: MIT OR Apache-2.0

//! Forward resolution of a group into its members.
use std::collections::HashSet;

use tracing::{debug, trace};

use crate::index::GraphIndex;
use crate::policy::ResolvePolicy;
use crate::types::{GroupId, ParticipantId};

/// Resolve all participants which are members of the given group.
///
/// Every top-level call gets its own `visiting` set, nothing is shared between calls.
pub(crate) fn members(
    index: &GraphIndex,
    roster: &HashSet<ParticipantId>,
    group_id: GroupId,
    policy: ResolvePolicy,
) -> HashSet<ParticipantId> {
    let resolver = ForwardResolver {
        index,
        roster,
        policy,
    };
    resolver.resolve(group_id)
}

/// Which set of the parent group a resolved sub-group is merged into.
#[derive(Clone, Copy, Debug)]
enum Side {
    Included,
    Excluded,
}

/// A group which is currently being resolved.
struct Frame {
    group_id: GroupId,
    side: Side,
    base: HashSet<ParticipantId>,
    excluded: HashSet<ParticipantId>,
    pending: Vec<(Side, GroupId)>,
}

impl Frame {
    fn add(&mut self, side: Side, members: HashSet<ParticipantId>) {
        match side {
            Side::Included => self.base.extend(members),
            Side::Excluded => self.excluded.extend(members),
        }
    }

    fn finish(self) -> HashSet<ParticipantId> {
        let Frame {
            mut base,
            excluded,
            ..
        } = self;

        // Exclusions always win.
        base.retain(|participant_id| !excluded.contains(participant_id));
        base
    }
}

enum Step {
    Resolved(HashSet<ParticipantId>),
    Descend(Frame),
}

struct ForwardResolver<'a> {
    index: &'a GraphIndex,
    roster: &'a HashSet<ParticipantId>,
    policy: ResolvePolicy,
}

impl ForwardResolver<'_> {
    /// Depth-first resolution of a single group.
    ///
    /// Nested groups are resolved with an explicit stack of frames, so the depth of the group
    /// graph is not limited by the call stack. `visiting` holds the ids of all groups on the
    /// current path from the root. An id is inserted when a frame is pushed and removed again
    /// when it is popped, so that a sub-group reached through two sibling relations is resolved
    /// twice instead of being mistaken for a cycle.
    fn resolve(&self, group_id: GroupId) -> HashSet<ParticipantId> {
        let mut visiting = HashSet::new();
        let mut stack = match self.enter(group_id, Side::Included, &mut visiting) {
            Step::Resolved(members) => return members,
            Step::Descend(frame) => vec![frame],
        };

        let mut resolved = HashSet::new();
        while let Some(mut frame) = stack.pop() {
            match frame.pending.pop() {
                Some((side, target)) => match self.enter(target, side, &mut visiting) {
                    Step::Resolved(members) => {
                        frame.add(side, members);
                        stack.push(frame);
                    }
                    Step::Descend(child) => {
                        stack.push(frame);
                        stack.push(child);
                    }
                },
                None => {
                    visiting.remove(&frame.group_id);
                    let side = frame.side;
                    let members = frame.finish();
                    match stack.last_mut() {
                        Some(parent) => parent.add(side, members),
                        None => resolved = members,
                    }
                }
            }
        }

        resolved
    }

    /// Start resolving a group, or return its members right away when there is nothing to
    /// descend into.
    fn enter(&self, group_id: GroupId, side: Side, visiting: &mut HashSet<GroupId>) -> Step {
        let Some(group) = self.index.get(&group_id) else {
            debug!(%group_id, "reference to unknown group contributes no members");
            return Step::Resolved(HashSet::new());
        };

        if !visiting.insert(group_id) {
            trace!(%group_id, "cycle detected, back-edge contributes no members");
            return Step::Resolved(HashSet::new());
        }

        let mut pending = Vec::new();
        let base = if !group.has_inclusions() && self.policy.empty_inclusion_means_all {
            self.roster.clone()
        } else {
            pending.extend(group.included_groups().map(|target| (Side::Included, target)));
            group.included_participants().collect()
        };
        pending.extend(group.excluded_groups().map(|target| (Side::Excluded, target)));

        // Relations are popped from the back, keep them in definition order.
        pending.reverse();

        Step::Descend(Frame {
            group_id,
            side,
            base,
            excluded: group.excluded_participants().collect(),
            pending,
        })
    }
}
