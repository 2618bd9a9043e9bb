//! Structural queries over the graph.

use std::collections::VecDeque;

use indexmap::IndexSet;

use super::{ClaimId, Element, Graph, Relation, RelationId, RelationKind};

/// A relation filter; every field that is set must match.
///
/// # Examples
///
/// ```
/// # use argmap_core::graph::{ClaimAttrs, Criteria, Graph, RelationAttrs, RelationKind};
/// let mut graph = Graph::new();
/// let a = graph.add_claim("a", ClaimAttrs::new());
/// let b = graph.add_claim("b", ClaimAttrs::new());
/// let c = graph.add_claim("c", ClaimAttrs::new());
/// let ab = graph.add_relation([a], b, RelationKind::Support, RelationAttrs::new()).unwrap();
/// let bc = graph.add_relation([b], c, RelationKind::Attack, RelationAttrs::new()).unwrap();
///
/// // Relations touching `b`, from either end
/// let touching = graph.find_relations(&[Criteria::new().claim(b), Criteria::new().target(b)]);
/// assert_eq!(touching, vec![ab, bc]);
///
/// let attacks = graph.find_relations(&[Criteria::new().kind(RelationKind::Attack)]);
/// assert_eq!(attacks, vec![bc]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Criteria {
    claim: Option<ClaimId>,
    target: Option<Element>,
    kind: Option<RelationKind>,
}

impl Criteria {
    /// A filter matching every relation
    pub fn new() -> Self {
        Self::default()
    }

    /// Require this source claim
    pub fn claim(mut self, claim: ClaimId) -> Self {
        self.claim = Some(claim);
        self
    }

    /// Require this target
    pub fn target(mut self, target: impl Into<Element>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Require this kind
    pub fn kind(mut self, kind: RelationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn matches(&self, relation: &Relation) -> bool {
        self.claim.is_none_or(|claim| relation.source() == claim)
            && self.target.is_none_or(|target| relation.target() == target)
            && self.kind.is_none_or(|kind| relation.kind() == kind)
    }
}

impl Graph {
    /// Claims without outgoing relations.
    ///
    /// When every claim has an outgoing relation (the graph is one big
    /// cycle) the first inserted claim stands in as the only root. An empty
    /// graph has no roots.
    pub fn find_root_claims(&self) -> Vec<ClaimId> {
        let roots: Vec<ClaimId> = self
            .claims
            .keys()
            .copied()
            .filter(|id| !self.outgoing.contains_key(id))
            .collect();

        if roots.is_empty() {
            return self.claims.keys().copied().take(1).collect();
        }
        roots
    }

    /// Relations matching any of `criteria`, in insertion order.
    ///
    /// An empty slice matches nothing; use [`Criteria::new`] to match all.
    pub fn find_relations(&self, criteria: &[Criteria]) -> Vec<RelationId> {
        self.relations
            .iter()
            .filter(|(_, relation)| criteria.iter().any(|c| c.matches(relation)))
            .map(|(id, _)| *id)
            .collect()
    }

    /// The context of a claim: the claim itself plus every claim reachable
    /// backwards through condition and exception relations.
    ///
    /// Contextual relations may target other contextual relations, so the
    /// walk continues through relations as well, but only claims are
    /// returned. The starting claim always comes first.
    pub fn find_context(&self, claim: ClaimId) -> Vec<ClaimId> {
        let mut context: IndexSet<Element> = IndexSet::from([Element::Claim(claim)]);
        let mut frontier = VecDeque::from([Element::Claim(claim)]);

        while let Some(element) = frontier.pop_front() {
            for id in self.incoming(element) {
                let relation = &self.relations[&id];
                if !relation.kind().is_contextual() {
                    continue;
                }

                for reached in [Element::Relation(id), Element::Claim(relation.source())] {
                    if context.insert(reached) {
                        frontier.push_back(reached);
                    }
                }
            }
        }

        context
            .into_iter()
            .filter_map(Element::as_claim)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ClaimAttrs, RelationAttrs};

    fn graph_with(n: usize) -> (Graph, Vec<ClaimId>) {
        let mut graph = Graph::new();
        let ids = (0..n)
            .map(|i| graph.add_claim(format!("claim {i}"), ClaimAttrs::new()))
            .collect();
        (graph, ids)
    }

    fn relate(graph: &mut Graph, source: ClaimId, target: impl Into<Element>, kind: RelationKind) -> RelationId {
        graph
            .add_relation([source], target, kind, RelationAttrs::new())
            .unwrap()
    }

    #[test]
    fn test_roots_of_unconnected_claims() {
        let (graph, ids) = graph_with(3);
        assert_eq!(graph.find_root_claims(), ids);
    }

    #[test]
    fn test_roots_of_empty_graph() {
        assert!(Graph::new().find_root_claims().is_empty());
    }

    #[test]
    fn test_roots_fall_back_to_first_claim_in_cycle() {
        let (mut graph, ids) = graph_with(3);
        relate(&mut graph, ids[0], ids[1], RelationKind::Support);
        relate(&mut graph, ids[1], ids[2], RelationKind::Support);
        relate(&mut graph, ids[2], ids[0], RelationKind::Attack);

        assert_eq!(graph.find_root_claims(), vec![ids[0]]);
    }

    #[test]
    fn test_roots_with_merged_sources() {
        let (mut graph, ids) = graph_with(3);
        graph
            .add_relation([ids[0], ids[1]], ids[2], RelationKind::Support, RelationAttrs::new())
            .unwrap();

        assert_eq!(graph.find_root_claims(), vec![ids[2]]);
    }

    #[test]
    fn test_find_relations_union_without_duplicates() {
        let (mut graph, ids) = graph_with(3);
        let x = ids[1];
        let into_x = relate(&mut graph, ids[0], x, RelationKind::Support);
        let from_x = relate(&mut graph, x, ids[2], RelationKind::Attack);
        let self_loop = relate(&mut graph, x, x, RelationKind::Support);
        relate(&mut graph, ids[0], ids[2], RelationKind::Support);

        let found = graph.find_relations(&[Criteria::new().claim(x), Criteria::new().target(x)]);
        assert_eq!(found, vec![into_x, from_x, self_loop]);

        let both = graph.find_relations(&[Criteria::new().claim(x).target(x)]);
        assert_eq!(both, vec![self_loop]);
    }

    #[test]
    fn test_find_relations_filters_by_kind() {
        let (mut graph, ids) = graph_with(3);
        relate(&mut graph, ids[0], ids[2], RelationKind::Support);
        let attack = relate(&mut graph, ids[1], ids[2], RelationKind::Attack);

        let found = graph.find_relations(&[Criteria::new().target(ids[2]).kind(RelationKind::Attack)]);
        assert_eq!(found, vec![attack]);

        let none = graph.find_relations(&[Criteria::new().kind(RelationKind::Condition)]);
        assert!(none.is_empty());
    }

    #[test]
    fn test_find_relations_empty_criteria_matches_nothing() {
        let (mut graph, ids) = graph_with(2);
        relate(&mut graph, ids[0], ids[1], RelationKind::Support);

        assert!(graph.find_relations(&[]).is_empty());
        assert_eq!(graph.find_relations(&[Criteria::new()]).len(), 1);
    }

    #[test]
    fn test_find_context_follows_conditions_and_exceptions() {
        let (mut graph, ids) = graph_with(5);
        let [claim, warrant, undercut, supporter, nested] = ids[..] else {
            unreachable!()
        };
        let w = relate(&mut graph, warrant, claim, RelationKind::Condition);
        relate(&mut graph, undercut, w, RelationKind::Exception);
        relate(&mut graph, supporter, claim, RelationKind::Support);
        relate(&mut graph, nested, warrant, RelationKind::Condition);

        assert_eq!(
            graph.find_context(claim),
            vec![claim, warrant, undercut, nested]
        );
    }

    #[test]
    fn test_find_context_of_isolated_claim() {
        let (graph, ids) = graph_with(1);
        assert_eq!(graph.find_context(ids[0]), ids);
    }

    #[test]
    fn test_find_context_terminates_on_cycles() {
        let (mut graph, ids) = graph_with(2);
        relate(&mut graph, ids[0], ids[1], RelationKind::Condition);
        relate(&mut graph, ids[1], ids[0], RelationKind::Condition);

        assert_eq!(graph.find_context(ids[0]), vec![ids[0], ids[1]]);
    }
}
