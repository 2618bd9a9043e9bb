//! Argmap - argument maps written as line-oriented scripts.
//!
//! Parsing, automatic layout and serialization of argument maps: claims
//! connected by support, attack, condition and exception relations, where
//! relations may themselves be the target of other relations.

pub mod config;
pub mod layout;

mod error;

pub use argmap_core::{geometry, graph, measure, style};
pub use argmap_parser::{Diagnostic, ParseError};

pub use error::ArgmapError;

use std::{fs, path::Path};

use log::{debug, info, trace};

use argmap_core::{
    graph::Graph,
    measure::{EstimatedMeasure, TextMeasure},
    style::StyleConfig,
};

use config::AppConfig;
use layout::{EngineBuilder, Layout};

/// A parsed argument map: the graph plus the style its script produced.
#[derive(Debug, Clone)]
pub struct ArgumentMap {
    graph: Graph,
    style: StyleConfig,
    warnings: Vec<Diagnostic>,
}

impl ArgumentMap {
    pub fn new(graph: Graph, style: StyleConfig) -> Self {
        Self {
            graph,
            style,
            warnings: Vec::new(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// The configured style with the script's `style` lines applied.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Warnings raised while parsing the script.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

/// Builder for parsing, laying out and writing argument maps.
///
/// # Examples
///
/// ```rust
/// use argmap::{MapBuilder, config::AppConfig};
///
/// let builder = MapBuilder::new(AppConfig::default());
///
/// let mut map = builder
///     .parse("a: it rained\nb: the ground is wet\nc: a supports b")
///     .expect("Failed to parse");
///
/// builder.layout(&mut map).expect("Failed to lay out");
///
/// let script = builder.serialize(&map);
/// assert!(script.contains("c: a supports b"));
/// ```
#[derive(Debug, Default)]
pub struct MapBuilder {
    config: AppConfig,
}

impl MapBuilder {
    /// Create a new map builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a script into an argument map.
    ///
    /// The configured style is the starting point for the script's `style`
    /// lines. Warnings are kept on the map; the first error aborts parsing.
    ///
    /// # Errors
    ///
    /// Returns [`ArgmapError::Parse`] carrying the script, so that the
    /// diagnostics can be rendered against it.
    pub fn parse(&self, source: &str) -> Result<ArgumentMap, ArgmapError> {
        info!("Parsing argument map");

        let mut graph = Graph::new();
        let mut style = self.config.style().clone();
        let warnings = argmap_parser::parse_into(source, &mut graph, &mut style)
            .map_err(|err| ArgmapError::new_parse_error(err, source))?;

        debug!(
            claims = graph.claim_count(),
            relations = graph.relation_count(),
            warnings = warnings.len();
            "Argument map parsed successfully"
        );
        trace!(graph:?; "Parsed graph");

        Ok(ArgumentMap {
            graph,
            style,
            warnings,
        })
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    ///
    /// Returns [`ArgmapError::Io`] if the file cannot be read, otherwise as
    /// [`MapBuilder::parse`].
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ArgumentMap, ArgmapError> {
        let source = fs::read_to_string(path.as_ref())?;
        self.parse(&source)
    }

    /// Lay out the map with the estimated text measure.
    ///
    /// See [`MapBuilder::layout_with`].
    pub fn layout(&self, map: &mut ArgumentMap) -> Result<Layout, ArgmapError> {
        self.layout_with(map, &EstimatedMeasure::default())
    }

    /// Measure every claim, lay out the graph and move each claim to its
    /// place in the layout.
    ///
    /// Returns the positioned box tree.
    ///
    /// # Errors
    ///
    /// Returns [`ArgmapError::Layout`] if a claim cannot be placed.
    pub fn layout_with(
        &self,
        map: &mut ArgumentMap,
        measure: &impl TextMeasure,
    ) -> Result<Layout, ArgmapError> {
        let layout_config = self.config.layout();

        let measured = map.graph.measure_claims(measure, &map.style);
        debug!(measured; "Claims measured");

        let layout = EngineBuilder::new()
            .with_horizontal_spacing(layout_config.horizontal_spacing())
            .with_vertical_spacing(layout_config.vertical_spacing())
            .with_margin(layout_config.margin())
            .with_branch_gap(layout_config.branch_gap())
            .build(&map.graph)?;

        let positions = layout.claim_positions();
        for (claim, position) in &positions {
            map.graph.set_claim_position(*claim, *position);
        }

        if let Some(margin) = layout_config.fit_vertically() {
            map.graph.fit_vertically(margin);
        }

        info!(claims = positions.len(); "Layout applied");
        Ok(layout)
    }

    /// Write the map back as a script.
    pub fn serialize(&self, map: &ArgumentMap) -> String {
        argmap_parser::serialize(&map.graph)
    }
}
