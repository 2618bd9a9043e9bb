//! Geometry of graph elements: boxes, edge endpoints and hit testing.

use log::debug;

use super::{ClaimId, Element, Glyph, Graph, RelationId, RelationKind};
use crate::geometry::{self, Bounds, Point, Size};

/// Padding around a grouped context box
const CONTEXT_PADDING: f32 = 5.0;

/// The line a renderer draws for one relation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelationSegment {
    /// Where the line leaves the source box
    pub start: Point,
    /// Where the line meets the target box or joint
    pub end: Point,
    /// Marker drawn at `end`
    pub glyph: Glyph,
    pub dashed: bool,
}

impl Graph {
    /// Box of an element.
    ///
    /// Claims use their effective position and measured size. A relation is
    /// a 1×1 box centered between its endpoints.
    pub fn element_bounds(&self, element: Element) -> Option<Bounds> {
        match element {
            Element::Claim(id) => self.claim(id).map(|claim| claim.bounds()),
            Element::Relation(_) => {
                let center = self.element_center(element)?;
                Some(Bounds::new_from_center(center, Size::new(1.0, 1.0)))
            }
        }
    }

    /// Center of an element; a relation's center is the midpoint of its
    /// source and target centers.
    pub fn element_center(&self, element: Element) -> Option<Point> {
        match element {
            Element::Claim(id) => self.claim(id).map(|claim| claim.bounds().center()),
            Element::Relation(id) => {
                let relation = self.relation(id)?;
                let source = self.element_center(relation.source().into())?;
                let target = self.element_center(relation.target())?;
                Some(source.midpoint(target))
            }
        }
    }

    /// Point where the `index`-th of `count` edges into a relation attaches.
    ///
    /// Joints are spread evenly between the relation's source and target
    /// centers, at `(index + 1) / (count + 1)` of the way.
    pub fn relation_joint(&self, id: RelationId, index: usize, count: usize) -> Option<Point> {
        let relation = self.relation(id)?;
        let source = self.element_center(relation.source().into())?;
        let target = self.element_center(relation.target())?;
        Some(source.lerp(target, (index + 1) as f32 / (count + 1) as f32))
    }

    /// Box enclosing a claim together with its context.
    ///
    /// Claims whose context is just themselves, compound claims and
    /// relations keep their own bounds.
    pub fn context_box(&self, element: Element) -> Option<Bounds> {
        let Element::Claim(id) = element else {
            return self.element_bounds(element);
        };
        let claim = self.claim(id)?;

        if claim.is_compound() {
            return Some(claim.bounds());
        }

        let context = self.find_context(id);
        if context.len() == 1 {
            return Some(claim.bounds());
        }

        let grouped = context
            .iter()
            .filter_map(|member| self.claim(*member))
            .fold(Bounds::empty(), |bounds, member| bounds.including(member.bounds()));
        Some(grouped.pad(CONTEXT_PADDING, CONTEXT_PADDING))
    }

    /// Boxes a relation is drawn between.
    ///
    /// Supports and attacks connect whole contexts.
    fn relation_endpoints(&self, id: RelationId) -> Option<(Bounds, Bounds)> {
        let relation = self.relation(id)?;
        let source = Element::Claim(relation.source());
        let target = relation.target();

        match relation.kind() {
            RelationKind::Support | RelationKind::Attack => {
                Some((self.context_box(source)?, self.context_box(target)?))
            }
            RelationKind::Condition | RelationKind::Exception => {
                Some((self.element_bounds(source)?, self.element_bounds(target)?))
            }
        }
    }

    /// First claim, in insertion order, whose box strictly contains `point`.
    pub fn find_claim_at_position(&self, point: Point) -> Option<ClaimId> {
        self.claims()
            .find(|(_, claim)| claim.bounds().contains_strict(point))
            .map(|(id, _)| id)
    }

    /// First relation, in insertion order, passing within `tolerance` of
    /// `point`.
    ///
    /// Distance is measured to the segment between the centers of the
    /// relation's endpoint boxes.
    pub fn find_relation_at_position(&self, point: Point, tolerance: f32) -> Option<RelationId> {
        self.relations().map(|(id, _)| id).find(|id| {
            self.relation_endpoints(*id).is_some_and(|(source, target)| {
                geometry::distance_to_segment(point, source.center(), target.center())
                    <= tolerance
            })
        })
    }

    /// The clipped line a renderer draws for a relation.
    ///
    /// Both ends stop at the box borders. A relation that targets another
    /// relation ends at one of that relation's joints: its index among the
    /// target's incoming relations counted from the most recent one.
    pub fn relation_segment(&self, id: RelationId) -> Option<RelationSegment> {
        let relation = self.relation(id)?;
        let (source, mut target) = self.relation_endpoints(id)?;

        if let Element::Relation(target_id) = relation.target() {
            let incoming: Vec<RelationId> = self.incoming(target_id).collect();
            let index = incoming.iter().rev().position(|other| *other == id)?;
            let joint = self.relation_joint(target_id, index, incoming.len())?;
            target = Bounds::new_from_center(joint, Size::default());
        }

        let into_compound = relation
            .target()
            .as_claim()
            .and_then(|claim| self.claim(claim))
            .is_some_and(|claim| claim.is_compound());

        Some(RelationSegment {
            start: geometry::offset_position(target, source),
            end: geometry::offset_position(source, target),
            glyph: if into_compound {
                Glyph::Line
            } else {
                relation.kind().glyph()
            },
            dashed: relation.kind().is_dashed(),
        })
    }

    /// Bounds covering every drawn claim; empty if there is none.
    ///
    /// Compound claims are never drawn and do not count.
    pub fn extent(&self) -> Bounds {
        self.claims()
            .filter(|(_, claim)| !claim.is_compound())
            .fold(Bounds::empty(), |bounds, (_, claim)| {
                bounds.including(claim.bounds())
            })
    }

    /// Moves every claim so that the drawn diagram starts at the origin.
    pub fn fit(&mut self) {
        let extent = self.extent();
        if extent.is_empty() {
            return;
        }
        self.translate_anchors(extent.min_point().scale(-1.0));
    }

    /// Moves every claim vertically so the topmost drawn claim sits at `margin`.
    pub fn fit_vertically(&mut self, margin: f32) {
        let extent = self.extent();
        if extent.is_empty() {
            return;
        }
        self.translate_anchors(Point::new(0.0, margin - extent.min_y()));
    }

    fn translate_anchors(&mut self, delta: Point) {
        if delta.is_zero() {
            return;
        }
        for claim in self.claims.values_mut() {
            claim.set_anchor(claim.anchor().add_point(delta));
        }
        debug!(dx = delta.x(), dy = delta.y(); "Claims translated");
        self.redraw.schedule(super::RedrawCause::ClaimChanged);
    }
}
