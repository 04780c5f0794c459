//! Dataset indexing and sampling
//!
//! Provides the pieces that turn a ShapeNet-style directory of part-annotated
//! point files into fixed-size training examples:
//! - category metadata ([`categories`])
//! - split manifests ([`splits`])
//! - the external shape cache seam ([`cache`])
//! - the dataset index and sampler itself ([`shapenet`])

pub mod cache;
pub mod categories;
pub mod shapenet;
pub mod splits;

pub use cache::ShapeCache;
pub use categories::{CategoryTable, segment_classes};
pub use shapenet::{Example, ShapeNetPartConfig, ShapeNetPartDataset};
pub use splits::{Split, SplitSets};

use partseg_data::{PointsError, TransformError};

/// Errors from dataset construction and retrieval.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed category metadata at line {line}")]
    MalformedCategory { line: usize },
    #[error("split manifest is not a JSON string array: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("manifest entry {entry:?} has no shape-id segment")]
    MalformedManifestEntry { entry: String },
    #[error("unknown split {0:?}, expected train, val, test, or trainval")]
    UnknownSplit(String),
    #[error("index {index} out of bounds for dataset of length {len}")]
    OutOfBounds { index: usize, len: usize },
    #[error("shape {key} has no points")]
    EmptyShape { key: String },
    #[error("point file error: {0}")]
    Points(#[from] PointsError),
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),
}

/// An indexed collection of training examples.
///
/// The index set is fixed for the lifetime of a dataset: `len()` never
/// changes after construction.
pub trait Dataset {
    /// The example type produced by [`Dataset::get`].
    type Item;

    /// Total number of examples.
    fn len(&self) -> usize;

    /// Whether the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieve the example at `index`.
    fn get(&self, index: usize) -> Result<Self::Item, DatasetError>;
}
