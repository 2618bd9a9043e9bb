//! Configuration types for laying out argument maps.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field is optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Spacing and margins of the box layout.
//! - [`StyleConfig`] - The numeric style tree, also settable from `style` lines.
//!
//! # Example
//!
//! ```
//! # use argmap::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().horizontal_spacing(), 20.0);
//! assert_eq!(config.style().claim().max_width(), 300.0);
//! ```

use serde::Deserialize;

pub use argmap_core::style::StyleConfig;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section, the starting point for `style` lines.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Spacing and margins of the box layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap between boxes placed side by side.
    horizontal_spacing: f32,

    /// Gap between boxes stacked on top of each other.
    vertical_spacing: f32,

    /// Distance of the layout's top-left corner from the origin.
    margin: f32,

    /// Extra width reserved beside a branch of relations on a relation.
    branch_gap: f32,

    /// When set, the laid out map is shifted so that its topmost claim sits
    /// this far below the origin.
    fit_vertically: Option<f32>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 20.0,
            vertical_spacing: 40.0,
            margin: 20.0,
            branch_gap: 40.0,
            fit_vertically: None,
        }
    }
}

impl LayoutConfig {
    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn branch_gap(&self) -> f32 {
        self.branch_gap
    }

    pub fn fit_vertically(&self) -> Option<f32> {
        self.fit_vertically
    }

    /// Sets the vertical fit margin.
    pub fn with_fit_vertically(mut self, margin: Option<f32>) -> Self {
        self.fit_vertically = margin;
        self
    }
}
