//! Construction of a box layout from an argument graph.
//!
//! Every root claim becomes a column: the claim box on top and, below it,
//! a row with one sub-layout per incoming relation. A relation sub-layout
//! holds the relations attacking or supporting that relation (pushed to
//! one side by a spacer) followed by the column of its source claim.
//!
//! Each claim is laid out at most once per pass; later relations from an
//! already placed claim only contribute their relation branches.

use indexmap::IndexSet;
use log::{debug, trace};

use argmap_core::{
    geometry::Size,
    graph::{ClaimId, Graph, RelationId},
};

use super::{Alignment, ClaimBox, Direction, Layout, Spacer, Spacing};
use crate::error::ArgmapError;

/// Builder for laying out a graph.
///
/// # Example
///
/// ```
/// # use argmap::layout::EngineBuilder;
/// # use argmap_core::{graph::{ClaimAttrs, Graph}, measure::EstimatedMeasure, style::StyleConfig};
/// let mut graph = Graph::new();
/// graph.add_claim("rain", ClaimAttrs::new());
/// graph.measure_claims(&EstimatedMeasure::default(), &StyleConfig::default());
///
/// let layout = EngineBuilder::new().with_margin(10.0).build(&graph).unwrap();
/// assert_eq!(layout.claim_positions().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    spacing: Spacing,
    margin: f32,
    branch_gap: f32,
    branch_height: f32,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            spacing: Spacing::default(),
            margin: 20.0,
            branch_gap: 40.0,
            branch_height: 20.0,
        }
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_horizontal_spacing(mut self, spacing: f32) -> Self {
        self.spacing = Spacing::new(spacing, self.spacing.vertical());
        self
    }

    pub fn with_vertical_spacing(mut self, spacing: f32) -> Self {
        self.spacing = Spacing::new(self.spacing.horizontal(), spacing);
        self
    }

    /// Distance of the whole layout from the origin.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Extra width beside the relations that target a relation.
    pub fn with_branch_gap(mut self, gap: f32) -> Self {
        self.branch_gap = gap;
        self
    }

    /// Lays out `graph` and positions the result at the margin.
    ///
    /// # Errors
    ///
    /// Returns [`ArgmapError::Layout`] when a claim has not been measured.
    pub fn build(self, graph: &Graph) -> Result<Layout, ArgmapError> {
        let mut engine = Engine {
            graph,
            config: &self,
            visited: IndexSet::new(),
        };

        let roots = graph.find_root_claims();
        engine.visited.extend(roots.iter().copied());

        let mut layout = engine.layout(Direction::Horizontal);
        for root in &roots {
            layout.push(engine.layout_claim(*root)?);
        }
        layout.apply(self.margin);

        debug!(
            roots = roots.len(),
            claims = engine.visited.len(),
            width = layout.width(),
            height = layout.height();
            "Graph laid out"
        );

        Ok(layout)
    }
}

struct Engine<'a> {
    graph: &'a Graph,
    config: &'a EngineBuilder,
    visited: IndexSet<ClaimId>,
}

impl Engine<'_> {
    fn layout(&self, direction: Direction) -> Layout {
        Layout::new(direction).with_spacing(self.config.spacing)
    }

    fn claim_size(&self, id: ClaimId) -> Result<Size, ArgmapError> {
        let claim = self
            .graph
            .claim(id)
            .ok_or_else(|| ArgmapError::Layout(format!("{id} is not in the graph")))?;
        claim
            .size()
            .ok_or_else(|| ArgmapError::Layout(format!("{id} has not been measured")))
    }

    fn layout_claim(&mut self, id: ClaimId) -> Result<Layout, ArgmapError> {
        let mut column = self.layout(Direction::Vertical);
        column.push(ClaimBox::new(id, self.claim_size(id)?));

        let incoming: Vec<RelationId> = self.graph.incoming(id).collect();
        if !incoming.is_empty() {
            let mut row = self.layout(Direction::Horizontal);
            for (index, relation) in incoming.iter().enumerate() {
                row.push(self.layout_relation(*relation, index, incoming.len())?);
            }
            column.push(row);
        }

        trace!(claim:% = id, relations = incoming.len(); "Claim laid out");
        Ok(column)
    }

    /// Lays out the `index`th of `siblings` relations sharing one target.
    fn layout_relation(
        &mut self,
        id: RelationId,
        index: usize,
        siblings: usize,
    ) -> Result<Layout, ArgmapError> {
        let mut layout = self.layout(Direction::Vertical);

        let incoming: Vec<RelationId> = self.graph.incoming(id).collect();
        if !incoming.is_empty() {
            let mut stack = self.layout(Direction::Vertical).with_alignment(Alignment::Start);
            for (index, relation) in incoming.iter().enumerate() {
                stack.push(self.layout_relation(*relation, index, incoming.len())?);
            }

            let spacer = Spacer::new(Size::new(
                stack.width() + self.config.branch_gap,
                self.config.branch_height,
            ));

            let mut branch = self.layout(Direction::Horizontal);
            if siblings > 1 && index % 2 == 0 {
                branch.push(stack);
                branch.push(spacer);
            } else {
                branch.push(spacer);
                branch.push(stack);
            }
            layout.push(branch);
        }

        let source = self
            .graph
            .relation(id)
            .ok_or_else(|| ArgmapError::Layout(format!("{id} is not in the graph")))?
            .source();
        if self.visited.insert(source) {
            layout.push(self.layout_claim(source)?);
        }

        Ok(layout)
    }
}
