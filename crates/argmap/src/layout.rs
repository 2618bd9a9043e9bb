//! Box-model layout of argument maps.
//!
//! A layout is a tree of boxes. Leaves are claim boxes and fixed-size
//! spacers; inner nodes are [`Layout`] containers that stack their items
//! along one axis and align them on the other.
//!
//! Sizes are computed bottom-up when read. Positions are assigned top-down
//! by [`Layout::set_position`], which places the container and then walks
//! its items along the main axis.
//!
//! # Example
//!
//! ```
//! # use argmap::layout::{Direction, Layout, Spacer};
//! # use argmap_core::geometry::{Point, Size};
//! let mut layout = Layout::new(Direction::Horizontal);
//! layout.push(Spacer::new(Size::new(10.0, 5.0)));
//! layout.push(Spacer::new(Size::new(20.0, 8.0)));
//!
//! assert_eq!(layout.size(), Size::new(50.0, 8.0));
//!
//! layout.set_position(Point::new(0.0, 0.0));
//! assert_eq!(layout.items()[0].position(), Some(Point::new(0.0, 1.5)));
//! assert_eq!(layout.items()[1].position(), Some(Point::new(30.0, 0.0)));
//! ```

mod engine;

pub use engine::EngineBuilder;

use std::fmt;

use argmap_core::{
    geometry::{Bounds, Point, Size},
    graph::ClaimId,
};

/// Main axis of a [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// Placement of items on the cross axis of a [`Layout`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Flush with the top or left edge.
    Start,
    #[default]
    Center,
    /// Flush with the bottom or right edge.
    End,
}

/// Gaps inserted between neighbouring items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    horizontal: f32,
    vertical: f32,
}

impl Spacing {
    pub fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.horizontal
    }

    pub fn vertical(&self) -> f32 {
        self.vertical
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::new(20.0, 40.0)
    }
}

/// An empty box that only reserves space.
#[derive(Debug, Clone, PartialEq)]
pub struct Spacer {
    size: Size,
    position: Option<Point>,
}

impl Spacer {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            position: None,
        }
    }
}

/// The box of one claim.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimBox {
    claim: ClaimId,
    size: Size,
    position: Option<Point>,
}

impl ClaimBox {
    pub fn new(claim: ClaimId, size: Size) -> Self {
        Self {
            claim,
            size,
            position: None,
        }
    }

    pub fn claim(&self) -> ClaimId {
        self.claim
    }
}

/// An item of a [`Layout`].
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutItem {
    Claim(ClaimBox),
    Spacer(Spacer),
    Layout(Layout),
}

impl LayoutItem {
    pub fn size(&self) -> Size {
        match self {
            LayoutItem::Claim(claim) => claim.size,
            LayoutItem::Spacer(spacer) => spacer.size,
            LayoutItem::Layout(layout) => layout.size(),
        }
    }

    /// Top-left corner, once positioned.
    pub fn position(&self) -> Option<Point> {
        match self {
            LayoutItem::Claim(claim) => claim.position,
            LayoutItem::Spacer(spacer) => spacer.position,
            LayoutItem::Layout(layout) => layout.position,
        }
    }

    pub fn set_position(&mut self, position: Point) {
        match self {
            LayoutItem::Claim(claim) => claim.position = Some(position),
            LayoutItem::Spacer(spacer) => spacer.position = Some(position),
            LayoutItem::Layout(layout) => layout.set_position(position),
        }
    }
}

impl From<ClaimBox> for LayoutItem {
    fn from(claim: ClaimBox) -> Self {
        LayoutItem::Claim(claim)
    }
}

impl From<Spacer> for LayoutItem {
    fn from(spacer: Spacer) -> Self {
        LayoutItem::Spacer(spacer)
    }
}

impl From<Layout> for LayoutItem {
    fn from(layout: Layout) -> Self {
        LayoutItem::Layout(layout)
    }
}

/// A container stacking its items along one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    direction: Direction,
    alignment: Alignment,
    spacing: Spacing,
    items: Vec<LayoutItem>,
    position: Option<Point>,
}

impl Layout {
    /// Creates an empty, centered layout with default spacing.
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            alignment: Alignment::default(),
            spacing: Spacing::default(),
            items: Vec::new(),
            position: None,
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn push(&mut self, item: impl Into<LayoutItem>) {
        self.items.push(item.into());
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn items(&self) -> &[LayoutItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Top-left corner, once positioned.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Main-axis extents summed with spacing in between, cross-axis
    /// extents maxed. An empty layout is `0×0`.
    pub fn size(&self) -> Size {
        let sizes = self.items.iter().map(LayoutItem::size);
        let gaps = self.items.len().saturating_sub(1) as f32;

        match self.direction {
            Direction::Horizontal => {
                let (width, height) = sizes.fold((0.0f32, 0.0f32), |(width, height), size| {
                    (width + size.width(), height.max(size.height()))
                });
                Size::new(width + gaps * self.spacing.horizontal, height)
            }
            Direction::Vertical => {
                let (width, height) = sizes.fold((0.0f32, 0.0f32), |(width, height), size| {
                    (width.max(size.width()), height + size.height())
                });
                Size::new(width, height + gaps * self.spacing.vertical)
            }
        }
    }

    pub fn width(&self) -> f32 {
        self.size().width()
    }

    pub fn height(&self) -> f32 {
        self.size().height()
    }

    /// Bounds of the positioned layout.
    pub fn bounds(&self) -> Option<Bounds> {
        self.position
            .map(|position| Bounds::new_from_top_left(position, self.size()))
    }

    /// Places the layout with its top-left corner at `position`, then places
    /// every item.
    pub fn set_position(&mut self, position: Point) {
        self.position = Some(position);

        let size = self.size();
        let mut offset = 0.0;

        for item in &mut self.items {
            let item_size = item.size();
            match self.direction {
                Direction::Horizontal => {
                    let dy = cross_offset(self.alignment, size.height() - item_size.height());
                    item.set_position(Point::new(position.x() + offset, position.y() + dy));
                    offset += item_size.width() + self.spacing.horizontal;
                }
                Direction::Vertical => {
                    let dx = cross_offset(self.alignment, size.width() - item_size.width());
                    item.set_position(Point::new(position.x() + dx, position.y() + offset));
                    offset += item_size.height() + self.spacing.vertical;
                }
            }
        }
    }

    /// Places the layout at `(margin, margin)`.
    pub fn apply(&mut self, margin: f32) {
        self.set_position(Point::new(margin, margin));
    }

    /// Top-left corners of every positioned claim box, depth first.
    pub fn claim_positions(&self) -> Vec<(ClaimId, Point)> {
        let mut positions = Vec::new();
        self.collect_claim_positions(&mut positions);
        positions
    }

    fn collect_claim_positions(&self, positions: &mut Vec<(ClaimId, Point)>) {
        for item in &self.items {
            match item {
                LayoutItem::Claim(claim) => {
                    if let Some(position) = claim.position {
                        positions.push((claim.claim, position));
                    }
                }
                LayoutItem::Spacer(_) => {}
                LayoutItem::Layout(layout) => layout.collect_claim_positions(positions),
            }
        }
    }

    fn fmt_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let direction = match self.direction {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
        };
        let alignment = match self.alignment {
            Alignment::Start => "start",
            Alignment::Center => "center",
            Alignment::End => "end",
        };
        write_box(f, depth, &format!("{direction} {alignment}"), self.size(), self.position)?;

        for item in &self.items {
            match item {
                LayoutItem::Claim(claim) => {
                    write_box(f, depth + 1, &claim.claim.to_string(), claim.size, claim.position)?
                }
                LayoutItem::Spacer(spacer) => {
                    write_box(f, depth + 1, "spacer", spacer.size, spacer.position)?
                }
                LayoutItem::Layout(layout) => layout.fmt_outline(f, depth + 1)?,
            }
        }
        Ok(())
    }
}

/// Outline of the box tree, one box per line, indented by depth.
impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_outline(f, 0)
    }
}

fn cross_offset(alignment: Alignment, slack: f32) -> f32 {
    match alignment {
        Alignment::Start => 0.0,
        Alignment::Center => slack / 2.0,
        Alignment::End => slack,
    }
}

fn write_box(
    f: &mut fmt::Formatter<'_>,
    depth: usize,
    label: &str,
    size: Size,
    position: Option<Point>,
) -> fmt::Result {
    write!(
        f,
        "{:indent$}{label} {}x{}",
        "",
        size.width(),
        size.height(),
        indent = depth * 2
    )?;
    if let Some(position) = position {
        write!(f, " at ({}, {})", position.x(), position.y())?;
    }
    writeln!(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn spacer(width: f32, height: f32) -> Spacer {
        Spacer::new(Size::new(width, height))
    }

    fn check_position(item: &LayoutItem, x: f32, y: f32) {
        let position = item.position().expect("item should be positioned");
        assert!(approx_eq!(f32, position.x(), x), "x: {} != {x}", position.x());
        assert!(approx_eq!(f32, position.y(), y), "y: {} != {y}", position.y());
    }

    #[test]
    fn test_horizontal_size_and_center_alignment() {
        let mut layout = Layout::new(Direction::Horizontal);
        layout.push(spacer(10.0, 5.0));
        layout.push(spacer(20.0, 8.0));

        assert_eq!(layout.width(), 50.0);
        assert_eq!(layout.height(), 8.0);

        layout.set_position(Point::new(0.0, 0.0));
        check_position(&layout.items()[0], 0.0, 1.5);
        check_position(&layout.items()[1], 30.0, 0.0);
    }

    #[test]
    fn test_vertical_size_and_alignments() {
        for (alignment, expected_x) in [
            (Alignment::Start, 0.0),
            (Alignment::Center, 5.0),
            (Alignment::End, 10.0),
        ] {
            let mut layout = Layout::new(Direction::Vertical).with_alignment(alignment);
            layout.push(spacer(30.0, 10.0));
            layout.push(spacer(20.0, 10.0));

            assert_eq!(layout.size(), Size::new(30.0, 60.0));

            layout.set_position(Point::new(0.0, 0.0));
            check_position(&layout.items()[0], 0.0, 0.0);
            check_position(&layout.items()[1], expected_x, 50.0);
        }
    }

    #[test]
    fn test_custom_spacing() {
        let mut layout = Layout::new(Direction::Horizontal).with_spacing(Spacing::new(5.0, 7.0));
        layout.push(spacer(10.0, 10.0));
        layout.push(spacer(10.0, 10.0));
        layout.push(spacer(10.0, 10.0));

        assert_eq!(layout.width(), 40.0);
    }

    #[test]
    fn test_empty_layout() {
        let layout = Layout::new(Direction::Vertical);

        assert!(layout.is_empty());
        assert_eq!(layout.size(), Size::new(0.0, 0.0));
        assert!(layout.bounds().is_none());
    }

    #[test]
    fn test_nested_positions_and_apply() {
        let mut graph = argmap_core::graph::Graph::new();
        let claim = graph.add_claim("rain", Default::default());

        let mut inner = Layout::new(Direction::Vertical);
        inner.push(ClaimBox::new(claim, Size::new(40.0, 20.0)));
        inner.push(spacer(10.0, 10.0));

        let mut outer = Layout::new(Direction::Horizontal).with_alignment(Alignment::Start);
        outer.push(spacer(10.0, 100.0));
        outer.push(inner);
        outer.apply(20.0);

        assert_eq!(outer.position(), Some(Point::new(20.0, 20.0)));
        check_position(&outer.items()[1], 50.0, 20.0);

        let positions = outer.claim_positions();
        assert_eq!(positions, [(claim, Point::new(50.0, 20.0))]);
    }

    #[test]
    fn test_outline_display() {
        let mut layout = Layout::new(Direction::Horizontal);
        layout.push(spacer(10.0, 5.0));
        layout.apply(0.0);

        assert_eq!(
            layout.to_string(),
            "horizontal center 10x5 at (0, 0)\n  spacer 10x5 at (0, 0)\n"
        );
    }
}
