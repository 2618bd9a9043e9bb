//! Selection state and direct manipulation of selected claims.
//!
//! Selection lives in the model because deleting an element must also
//! drop it from the selection.

use super::{ClaimId, Graph, RedrawCause, RelationId, Removed};
use crate::geometry::Point;

impl Graph {
    /// Selected claims in selection order
    pub fn selected_claims(&self) -> impl Iterator<Item = ClaimId> + '_ {
        self.selected_claims.iter().copied()
    }

    /// Selected relations in selection order
    pub fn selected_relations(&self) -> impl Iterator<Item = RelationId> + '_ {
        self.selected_relations.iter().copied()
    }

    pub fn is_claim_selected(&self, id: ClaimId) -> bool {
        self.selected_claims.contains(&id)
    }

    pub fn is_relation_selected(&self, id: RelationId) -> bool {
        self.selected_relations.contains(&id)
    }

    /// Selects a claim.
    ///
    /// With `extend` the claim is added to the selection. Without it the
    /// claim replaces the whole selection, unless it is already selected,
    /// in which case the selection is kept so it can be dragged as a group.
    pub fn select_claim(&mut self, id: ClaimId, extend: bool) -> bool {
        if !self.claims.contains_key(&id) || self.selected_claims.contains(&id) {
            return false;
        }
        if !extend {
            self.selected_claims.clear();
            self.selected_relations.clear();
        }
        self.selected_claims.insert(id);
        self.redraw.schedule(RedrawCause::SelectionChanged);
        true
    }

    /// Selects a relation; see [`Graph::select_claim`].
    pub fn select_relation(&mut self, id: RelationId, extend: bool) -> bool {
        if !self.relations.contains_key(&id) || self.selected_relations.contains(&id) {
            return false;
        }
        if !extend {
            self.selected_claims.clear();
            self.selected_relations.clear();
        }
        self.selected_relations.insert(id);
        self.redraw.schedule(RedrawCause::SelectionChanged);
        true
    }

    pub fn clear_selection(&mut self) {
        if self.selected_claims.is_empty() && self.selected_relations.is_empty() {
            return;
        }
        self.selected_claims.clear();
        self.selected_relations.clear();
        self.redraw.schedule(RedrawCause::SelectionChanged);
    }

    /// Moves the claim selection to the next or previous claim.
    ///
    /// Starting without a selection picks the first claim going forward and
    /// the last going backward. Stepping past either end clears the claim
    /// selection. Returns the newly selected claim.
    pub fn cycle_selection(&mut self, forward: bool) -> Option<ClaimId> {
        if self.claims.is_empty() {
            return None;
        }

        let current = self
            .selected_claims
            .first()
            .and_then(|id| self.claims.get_index_of(id));
        let last = self.claims.len() - 1;

        let next = match (current, forward) {
            (None, true) => Some(0),
            (None, false) => Some(last),
            (Some(index), true) if index < last => Some(index + 1),
            (Some(index), false) if index > 0 => Some(index - 1),
            _ => None,
        };
        let next = next.and_then(|index| self.claims.get_index(index)).map(|(id, _)| *id);

        self.selected_claims.clear();
        self.selected_claims.extend(next);
        self.redraw.schedule(RedrawCause::SelectionChanged);
        next
    }

    /// Sets the drag offset of every selected claim.
    ///
    /// `delta` is the total movement since the drag started; anchors are
    /// left alone until [`Graph::drop_selection`].
    pub fn drag_selection(&mut self, delta: Point) {
        for id in &self.selected_claims {
            if let Some(claim) = self.claims.get_mut(id) {
                claim.set_offset(delta);
            }
        }
        self.redraw.schedule(RedrawCause::ClaimChanged);
    }

    /// Commits the drag offsets of the selected claims into their anchors.
    pub fn drop_selection(&mut self) {
        for id in &self.selected_claims {
            if let Some(claim) = self.claims.get_mut(id) {
                claim.commit_offset();
            }
        }
        self.redraw.schedule(RedrawCause::ClaimChanged);
    }

    /// Moves the anchors of the selected claims by `delta`.
    pub fn nudge_selection(&mut self, delta: Point) {
        for id in &self.selected_claims {
            if let Some(claim) = self.claims.get_mut(id) {
                claim.set_anchor(claim.anchor().add_point(delta));
            }
        }
        self.redraw.schedule(RedrawCause::ClaimChanged);
    }

    /// Deletes every selected claim and relation, with cascades.
    pub fn delete_selection(&mut self) -> Removed {
        let mut removed = Removed::default();

        let claims: Vec<ClaimId> = self.selected_claims.iter().copied().collect();
        for id in claims {
            removed.extend(self.delete_claim(id));
        }

        // Cascades may already have removed some of these
        let relations: Vec<RelationId> = self.selected_relations.iter().copied().collect();
        for id in relations {
            removed.extend(self.delete_relation(id));
        }

        removed
    }
}
