//! The numeric style tree shared by text measuring, layout and rendering.
//!
//! Every leaf is addressable by a dotted path (`claim.padding.left`,
//! `relation.size`, ...) which is what `style` lines in a script use. The
//! same tree deserializes from the `[style]` table of a TOML config file.

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::Insets;

/// Errors raised while assigning style values by path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error("no numeric style property at `{0}`")]
    UnknownPath(String),

    /// The value would break text measuring, e.g. a zero scale.
    #[error("`{path}` must be a positive number, got {value}")]
    InvalidValue { path: String, value: f32 },
}

/// Sizing of claim boxes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClaimStyle {
    padding: Insets,
    font_size: f32,
    line_height: f32,
    max_width: f32,
}

impl Default for ClaimStyle {
    fn default() -> Self {
        Self {
            padding: Insets::new(3.0, 10.0, 10.0, 10.0),
            font_size: 13.0,
            line_height: 16.0,
            max_width: 300.0,
        }
    }
}

impl ClaimStyle {
    /// Space between the box border and the wrapped text
    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Vertical advance per wrapped line
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Width at which claim text wraps, in scaled units
    pub fn max_width(&self) -> f32 {
        self.max_width
    }
}

/// Sizing of relation glyphs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RelationStyle {
    size: f32,
}

impl Default for RelationStyle {
    fn default() -> Self {
        Self { size: 5.0 }
    }
}

impl RelationStyle {
    /// Radius of arrowheads and crosses
    pub fn size(&self) -> f32 {
        self.size
    }
}

/// Root of the style tree.
///
/// # Examples
///
/// ```
/// # use argmap_core::style::StyleConfig;
/// let mut style = StyleConfig::default();
/// style.set("claim.padding.left", 4.0).unwrap();
/// style.set("scale", 2.0).unwrap();
///
/// assert_eq!(style.claim().padding().left(), 4.0);
/// assert_eq!(style.scale(), 2.0);
/// assert!(style.set("claim.background", 1.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    scale: f32,
    padding: Insets,
    claim: ClaimStyle,
    relation: RelationStyle,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            padding: Insets::uniform(20.0),
            claim: ClaimStyle::default(),
            relation: RelationStyle::default(),
        }
    }
}

impl StyleConfig {
    /// Device pixel ratio applied when drawing
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Canvas padding around the whole diagram
    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn claim(&self) -> &ClaimStyle {
        &self.claim
    }

    pub fn relation(&self) -> &RelationStyle {
        &self.relation
    }

    /// Assigns `value` to the numeric leaf at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownPath`] when `path` does not name a
    /// numeric leaf, and [`StyleError::InvalidValue`] when `value` is not
    /// finite or when `scale` or `claim.fontSize` would not be positive.
    /// In both cases the tree is left unchanged.
    pub fn set(&mut self, path: &str, value: f32) -> Result<(), StyleError> {
        let steps: Vec<&str> = path.split('.').collect();
        let divisor = matches!(steps.as_slice(), ["scale"] | ["claim", "fontSize"]);

        let slot = match steps.as_slice() {
            ["scale"] => Some(&mut self.scale),
            ["padding", side] => self.padding.side_mut(side),
            ["claim", "padding", side] => self.claim.padding.side_mut(side),
            ["claim", "fontSize"] => Some(&mut self.claim.font_size),
            ["claim", "lineHeight"] => Some(&mut self.claim.line_height),
            ["claim", "maxWidth"] => Some(&mut self.claim.max_width),
            ["relation", "size"] => Some(&mut self.relation.size),
            _ => None,
        };

        let slot = slot.ok_or_else(|| StyleError::UnknownPath(path.to_string()))?;
        if !value.is_finite() || (divisor && value <= 0.0) {
            return Err(StyleError::InvalidValue {
                path: path.to_string(),
                value,
            });
        }
        *slot = value;
        Ok(())
    }
}
