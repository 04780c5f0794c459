//! Partseg Training Crate
//!
//! Training-side data pipeline for part-segmentation point clouds. It turns a
//! directory of raw per-shape point files into fixed-size, labeled examples
//! ready for a downstream learner.
//!
//! ## Modules
//!
//! - [`dataset`]: dataset indexing, split handling, caching, and sampling

pub mod dataset;

pub use dataset::{
    CategoryTable, Dataset, DatasetError, Example, ShapeCache, ShapeNetPartConfig,
    ShapeNetPartDataset, Split,
};
