//! Argmap Core Types and Definitions
//!
//! This crate provides the foundational types for argmap argument diagrams.
//! It includes:
//!
//! - **Geometry**: Points, sizes, bounds and the line/box helpers used for
//!   hit testing and edge clipping ([`geometry`] module)
//! - **Graph**: The claim/relation model with cascade deletion, structural
//!   queries and spatial queries ([`graph`] module)
//! - **Style**: The nested numeric style tree shared by the DSL and the
//!   configuration file ([`style`] module)
//! - **Measure**: The text measuring seam used to size claim boxes
//!   ([`measure`] module)

pub mod geometry;
pub mod graph;
pub mod measure;
pub mod style;

mod error;

pub use error::GraphError;
