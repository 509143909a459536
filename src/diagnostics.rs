// SPDX-License-Identifier: MIT OR Apache-2.0

//! Linting of group definitions.
//!
//! Resolution silently tolerates dangling group references and cycles. This module finds them so
//! they can be shown to whoever edits the groups. Running it is optional and has no influence on
//! resolution results.
use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};
use tracing::warn;

use crate::group::Group;
use crate::index::GraphIndex;
use crate::snapshot::Snapshot;
use crate::types::{GroupId, RelationType};

/// A group relation pointing at a group which is not part of the snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DanglingReference {
    pub source: GroupId,
    pub target: GroupId,
    pub relation_type: RelationType,
}

/// Findings of inspecting all group relations of a snapshot.
///
/// All lists are sorted by group id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Relations to unknown groups.
    pub dangling: Vec<DanglingReference>,

    /// Groups which have a relation to themselves.
    pub self_loops: Vec<GroupId>,

    /// Sets of two or more groups which reference each other in a loop, following both
    /// inclusive and exclusive relations.
    pub cycles: Vec<Vec<GroupId>>,
}

impl Diagnostics {
    pub fn inspect(snapshot: &Snapshot) -> Self {
        let index = snapshot.index();

        let mut dangling = Vec::new();
        let mut self_loops = Vec::new();
        for group in sorted_groups(index) {
            let mut references_itself = false;
            for relation in group.group_relations() {
                if !index.contains(&relation.target_group_id) {
                    dangling.push(DanglingReference {
                        source: group.id(),
                        target: relation.target_group_id,
                        relation_type: relation.relation_type,
                    });
                }

                references_itself |= relation.target_group_id == group.id();
            }

            if references_itself {
                self_loops.push(group.id());
            }
        }

        let graph = relation_graph(index);
        let mut cycles: Vec<Vec<GroupId>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|component| {
                let mut ids: Vec<GroupId> = component.into_iter().map(|idx| graph[idx]).collect();
                ids.sort();
                ids
            })
            .collect();
        cycles.sort();

        Self {
            dangling,
            self_loops,
            cycles,
        }
    }

    /// Return `true` if no problems were found.
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty() && self.self_loops.is_empty() && self.cycles.is_empty()
    }

    /// Emit a warning for every finding.
    pub fn log(&self) {
        for reference in &self.dangling {
            warn!(
                source = %reference.source,
                target = %reference.target,
                relation_type = %reference.relation_type,
                "group relation points at unknown group"
            );
        }

        for group_id in &self.self_loops {
            warn!(%group_id, "group references itself");
        }

        for cycle in &self.cycles {
            warn!(groups = ?cycle, "groups reference each other in a cycle");
        }
    }
}

/// Render all group relations of the snapshot in Graphviz DOT format.
///
/// Exclusive relations are drawn dashed, virtual groups dotted. Dangling relations are left out.
pub fn to_dot(snapshot: &Snapshot) -> String {
    let index = snapshot.index();
    let graph = relation_graph(index);

    let edge_attrs = |_, edge: EdgeReference<'_, RelationType>| {
        let style = match edge.weight() {
            RelationType::Include => "solid",
            RelationType::Exclude => "dashed",
        };
        format!("label = \"{}\" style = {}", edge.weight(), style)
    };
    let node_attrs = |_, (_, group_id): (NodeIndex, &GroupId)| {
        let is_virtual = index.get(group_id).is_some_and(Group::is_virtual);
        if is_virtual {
            format!("label = \"{}\" style = dotted", group_id)
        } else {
            format!("label = \"{}\"", group_id)
        }
    };

    let dot = Dot::with_attr_getters(
        &graph,
        &[Config::NodeNoLabel, Config::EdgeNoLabel],
        &edge_attrs,
        &node_attrs,
    );

    format!("{:?}", dot)
}

fn sorted_groups(index: &GraphIndex) -> Vec<&Group> {
    let mut groups: Vec<&Group> = index.groups().collect();
    groups.sort_by_key(|group| group.id());
    groups
}

/// Graph of all relations between known groups, nodes are added in id order.
fn relation_graph(index: &GraphIndex) -> DiGraph<GroupId, RelationType> {
    let mut graph = DiGraph::new();
    let mut nodes: HashMap<GroupId, NodeIndex> = HashMap::new();

    let groups = sorted_groups(index);
    for group in &groups {
        nodes.insert(group.id(), graph.add_node(group.id()));
    }

    for group in &groups {
        let source = nodes[&group.id()];
        for relation in group.group_relations() {
            if let Some(target) = nodes.get(&relation.target_group_id) {
                graph.add_edge(source, *target, relation.relation_type);
            }
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use crate::group::Group;
    use crate::snapshot::Snapshot;
    use crate::test_utils::{G1, G2, G3, G4, G5, P1, setup_logging};
    use crate::types::{GroupId, RelationType};

    use super::{DanglingReference, Diagnostics, to_dot};

    #[test]
    fn clean_snapshot() {
        let snapshot = Snapshot::new(
            [
                Group::new(G1).include_group(G2).exclude_group(G3),
                Group::new(G2).include_participant(P1),
                Group::new(G3),
            ],
            [P1],
        );

        let diagnostics = Diagnostics::inspect(&snapshot);
        assert!(diagnostics.is_clean());
        assert_eq!(diagnostics, Diagnostics::default());
    }

    #[test]
    fn find_problems() {
        setup_logging();

        let unknown = GroupId::new(99);
        let snapshot = Snapshot::new(
            [
                Group::new(G1).include_group(G2),
                Group::new(G2).include_group(G3),
                Group::new(G3).exclude_group(G1).include_group(unknown),
                Group::new(G4).include_group(G4),
                Group::new(G5).exclude_group(G5).include_group(G5),
            ],
            [P1],
        );

        let diagnostics = Diagnostics::inspect(&snapshot);
        diagnostics.log();

        assert!(!diagnostics.is_clean());
        assert_eq!(
            diagnostics.dangling,
            vec![DanglingReference {
                source: G3,
                target: unknown,
                relation_type: RelationType::Include,
            }]
        );
        assert_eq!(diagnostics.self_loops, vec![G4, G5]);
        assert_eq!(diagnostics.cycles, vec![vec![G1, G2, G3]]);
    }

    #[test]
    fn render_dot() {
        let snapshot = Snapshot::new(
            [
                Group::new(G1).include_group(G2).exclude_group(G3),
                Group::new(G2),
                Group::new_virtual(G3),
            ],
            [P1],
        );

        let dot = to_dot(&snapshot);
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("label = \"include\" style = solid"));
        assert!(dot.contains("label = \"exclude\" style = dashed"));
        assert!(dot.contains("label = \"3\" style = dotted"));
    }
}
