//! The argument graph: claims connected by typed relations.
//!
//! # Architecture
//!
//! - [`Graph`] owns insertion-ordered arenas of [`Claim`]s and [`Relation`]s
//!   addressed by [`ClaimId`] and [`RelationId`] handles
//! - A relation's target is an [`Element`], so relations can target other
//!   relations (an exception attacking a support, say)
//! - Incoming and outgoing relations are indexed per element, which keeps
//!   cascading deletes proportional to the number of removed edges
//! - Every mutation schedules a redraw in the graph's [`RedrawScheduler`]
//!
//! Claims and relations are created only through [`Graph::add_claim`] and
//! [`Graph::add_relation`] and destroyed only through [`Graph::delete_claim`]
//! and [`Graph::delete_relation`], so every relation endpoint always refers
//! to a live element.
//!
//! # Examples
//!
//! ```
//! # use argmap_core::graph::{ClaimAttrs, Graph, RelationAttrs, RelationKind};
//! let mut graph = Graph::new();
//! let rain = graph.add_claim("rain", ClaimAttrs::new());
//! let wet = graph.add_claim("wet ground", ClaimAttrs::new());
//! let support = graph
//!     .add_relation([rain], wet, RelationKind::Support, RelationAttrs::new())
//!     .unwrap();
//!
//! assert_eq!(graph.find_root_claims(), vec![wet]);
//!
//! graph.delete_claim(rain);
//! assert!(graph.relation(support).is_none());
//! ```

mod claim;
mod query;
mod redraw;
mod relation;
mod selection;
mod spatial;

use std::collections::{HashMap, VecDeque};

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};

pub use claim::{Claim, ClaimAttrs, ClaimId};
pub use query::Criteria;
pub use redraw::{RedrawCause, RedrawRequest, RedrawScheduler};
pub use relation::{Glyph, Relation, RelationAttrs, RelationId, RelationKind};
pub use spatial::RelationSegment;

use crate::{
    error::GraphError,
    geometry::Point,
    measure::{self, TextMeasure, TextMetrics},
    style::StyleConfig,
};

// =============================================================================
// Elements
// =============================================================================

/// Anything a relation can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Claim(ClaimId),
    Relation(RelationId),
}

impl From<ClaimId> for Element {
    fn from(id: ClaimId) -> Self {
        Element::Claim(id)
    }
}

impl From<RelationId> for Element {
    fn from(id: RelationId) -> Self {
        Element::Relation(id)
    }
}

impl Element {
    pub fn as_claim(self) -> Option<ClaimId> {
        match self {
            Element::Claim(id) => Some(id),
            Element::Relation(_) => None,
        }
    }

    pub fn as_relation(self) -> Option<RelationId> {
        match self {
            Element::Relation(id) => Some(id),
            Element::Claim(_) => None,
        }
    }
}

/// Everything removed by one delete call, including cascaded relations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Removed {
    pub claims: Vec<ClaimId>,
    pub relations: Vec<RelationId>,
}

impl Removed {
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty() && self.relations.is_empty()
    }

    fn extend(&mut self, other: Removed) {
        self.claims.extend(other.claims);
        self.relations.extend(other.relations);
    }
}

// =============================================================================
// Graph
// =============================================================================

/// An argument graph.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    claims: IndexMap<ClaimId, Claim>,
    relations: IndexMap<RelationId, Relation>,
    /// Relations targeting each element, in insertion order
    incoming: HashMap<Element, IndexSet<RelationId>>,
    /// Relations leaving each claim, in insertion order
    outgoing: HashMap<ClaimId, IndexSet<RelationId>>,
    selected_claims: IndexSet<ClaimId>,
    selected_relations: IndexSet<RelationId>,
    next_claim: usize,
    next_relation: usize,
    redraw: RedrawScheduler,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&self, id: ClaimId) -> Option<&Claim> {
        self.claims.get(&id)
    }

    pub fn relation(&self, id: RelationId) -> Option<&Relation> {
        self.relations.get(&id)
    }

    /// Claims in insertion order
    pub fn claims(&self) -> impl Iterator<Item = (ClaimId, &Claim)> {
        self.claims.iter().map(|(id, claim)| (*id, claim))
    }

    /// Relations in insertion order
    pub fn relations(&self) -> impl Iterator<Item = (RelationId, &Relation)> {
        self.relations.iter().map(|(id, relation)| (*id, relation))
    }

    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn contains(&self, element: Element) -> bool {
        match element {
            Element::Claim(id) => self.claims.contains_key(&id),
            Element::Relation(id) => self.relations.contains_key(&id),
        }
    }

    /// Drains the pending redraw request.
    pub fn take_redraw(&mut self) -> Option<RedrawRequest> {
        self.redraw.take()
    }

    pub fn redraw_scheduler(&mut self) -> &mut RedrawScheduler {
        &mut self.redraw
    }

    /// Appends a claim and returns its handle.
    pub fn add_claim(&mut self, text: impl Into<String>, attrs: ClaimAttrs) -> ClaimId {
        let id = ClaimId(self.next_claim);
        self.next_claim += 1;

        self.claims.insert(id, Claim::new(text.into(), attrs));
        trace!(claim:% = id; "Claim added");
        self.redraw.schedule(RedrawCause::ClaimAdded);

        id
    }

    /// Adds a relation from `sources` to `target`.
    ///
    /// With a single source this adds one relation. With several sources a
    /// compound claim (text `"&"`) is synthesized, every source gets a
    /// relation of the same kind and attributes into it, and the returned
    /// relation runs from the compound claim to `target` with `merged` set.
    ///
    /// All arguments are checked before anything is added, so a failed
    /// call leaves the graph unchanged.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NoSources`] if `sources` is empty
    /// - [`GraphError::TypeMismatch`] if a source is not a live claim or
    ///   the target is neither a live claim nor a live relation
    pub fn add_relation<S>(
        &mut self,
        sources: S,
        target: impl Into<Element>,
        kind: RelationKind,
        attrs: RelationAttrs,
    ) -> Result<RelationId, GraphError>
    where
        S: IntoIterator,
        S::Item: Into<Element>,
    {
        let target = target.into();
        let sources = sources
            .into_iter()
            .map(|source| match source.into() {
                Element::Claim(id) if self.claims.contains_key(&id) => Ok(id),
                other => Err(GraphError::bad_source(self.category(other))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if sources.is_empty() {
            return Err(GraphError::NoSources);
        }
        if !self.contains(target) {
            return Err(GraphError::bad_target(self.category(target)));
        }

        match sources.as_slice() {
            [source] => Ok(self.insert_relation(*source, target, kind, attrs)),
            _ => {
                // Several sources, merged through a synthetic claim
                let compound = self.add_claim("&", ClaimAttrs::compound());
                for source in &sources {
                    self.insert_relation(*source, compound.into(), kind, attrs.clone());
                }
                debug!(
                    sources = sources.len(),
                    compound:% = compound;
                    "Merged sources into compound claim"
                );

                let merged = RelationAttrs {
                    merged: true,
                    ..attrs
                };
                Ok(self.insert_relation(compound, target, kind, merged))
            }
        }
    }

    fn insert_relation(
        &mut self,
        source: ClaimId,
        target: Element,
        kind: RelationKind,
        attrs: RelationAttrs,
    ) -> RelationId {
        let id = RelationId(self.next_relation);
        self.next_relation += 1;

        self.relations
            .insert(id, Relation::new(source, target, kind, attrs));
        self.outgoing.entry(source).or_default().insert(id);
        self.incoming.entry(target).or_default().insert(id);
        trace!(relation:% = id, kind:% = kind; "Relation added");
        self.redraw.schedule(RedrawCause::RelationAdded);

        id
    }

    /// Category name of an element, used in type mismatch errors.
    fn category(&self, element: Element) -> &'static str {
        match element {
            Element::Claim(_) if self.contains(element) => "claim",
            Element::Claim(_) => "deleted claim",
            Element::Relation(_) if self.contains(element) => "relation",
            Element::Relation(_) => "deleted relation",
        }
    }

    /// Deletes a claim and, transitively, every relation attached to it.
    ///
    /// Returns what was removed; deleting an absent claim removes nothing.
    pub fn delete_claim(&mut self, id: ClaimId) -> Removed {
        let mut removed = Removed::default();

        if self.claims.shift_remove(&id).is_none() {
            return removed;
        }
        self.selected_claims.shift_remove(&id);
        removed.claims.push(id);

        let mut attached: VecDeque<RelationId> = VecDeque::new();
        attached.extend(self.outgoing.remove(&id).into_iter().flatten());
        attached.extend(
            self.incoming
                .remove(&Element::Claim(id))
                .into_iter()
                .flatten(),
        );
        self.remove_relations(attached, &mut removed);

        debug!(
            claim:% = id,
            cascaded = removed.relations.len();
            "Claim deleted"
        );
        self.redraw.schedule(RedrawCause::ClaimDeleted);

        removed
    }

    /// Deletes a relation and, transitively, every relation targeting it.
    pub fn delete_relation(&mut self, id: RelationId) -> Removed {
        let mut removed = Removed::default();

        if !self.relations.contains_key(&id) {
            return removed;
        }
        self.remove_relations(VecDeque::from([id]), &mut removed);

        debug!(
            relation:% = id,
            cascaded = removed.relations.len() - 1;
            "Relation deleted"
        );
        self.redraw.schedule(RedrawCause::RelationDeleted);

        removed
    }

    /// Removes the queued relations and everything that targets them.
    fn remove_relations(&mut self, mut queue: VecDeque<RelationId>, removed: &mut Removed) {
        while let Some(id) = queue.pop_front() {
            let Some(relation) = self.relations.shift_remove(&id) else {
                continue;
            };
            self.selected_relations.shift_remove(&id);
            self.unlink(id, &relation);

            if let Some(dependents) = self.incoming.remove(&Element::Relation(id)) {
                queue.extend(dependents);
            }
            removed.relations.push(id);
        }
    }

    fn unlink(&mut self, id: RelationId, relation: &Relation) {
        if let Some(set) = self.outgoing.get_mut(&relation.source()) {
            set.shift_remove(&id);
            if set.is_empty() {
                self.outgoing.remove(&relation.source());
            }
        }
        if let Some(set) = self.incoming.get_mut(&relation.target()) {
            set.shift_remove(&id);
            if set.is_empty() {
                self.incoming.remove(&relation.target());
            }
        }
    }

    /// Deletes either kind of element.
    pub fn delete(&mut self, element: Element) -> Removed {
        match element {
            Element::Claim(id) => self.delete_claim(id),
            Element::Relation(id) => self.delete_relation(id),
        }
    }

    /// Replaces the text of a claim and marks it for re-measuring.
    ///
    /// Returns `false` if the claim does not exist.
    pub fn set_claim_text(&mut self, id: ClaimId, text: impl Into<String>) -> bool {
        self.update_claim(id, |claim| claim.set_text(text.into()))
    }

    pub fn set_claim_attrs(&mut self, id: ClaimId, attrs: ClaimAttrs) -> bool {
        self.update_claim(id, |claim| claim.set_attrs(attrs))
    }

    /// Moves the anchor (committed top-left corner) of a claim.
    pub fn set_claim_position(&mut self, id: ClaimId, position: Point) -> bool {
        self.update_claim(id, |claim| claim.set_anchor(position))
    }

    fn update_claim(&mut self, id: ClaimId, update: impl FnOnce(&mut Claim)) -> bool {
        let Some(claim) = self.claims.get_mut(&id) else {
            return false;
        };
        update(claim);
        self.redraw.schedule(RedrawCause::ClaimChanged);
        true
    }

    /// Recomputes text metrics of every claim whose metrics are stale.
    ///
    /// Compound claims get empty, zero-sized metrics. Returns the number of
    /// claims measured.
    pub fn measure_claims(&mut self, measure: &impl TextMeasure, style: &StyleConfig) -> usize {
        let mut measured = 0;

        for claim in self.claims.values_mut().filter(|claim| claim.needs_measure()) {
            let metrics = if claim.is_compound() {
                TextMetrics::empty()
            } else {
                measure::measure_text(measure, claim.text(), style)
            };
            claim.set_metrics(metrics);
            measured += 1;
        }

        if measured > 0 {
            debug!(claims = measured; "Claims measured");
        }
        measured
    }

    /// Relations targeting `element`, in insertion order.
    pub fn incoming(&self, element: impl Into<Element>) -> impl Iterator<Item = RelationId> + '_ {
        self.incoming
            .get(&element.into())
            .into_iter()
            .flatten()
            .copied()
    }

    /// Relations leaving `claim`, in insertion order.
    pub fn outgoing(&self, claim: ClaimId) -> impl Iterator<Item = RelationId> + '_ {
        self.outgoing.get(&claim).into_iter().flatten().copied()
    }
}
