//! Partseg Data Crate
//!
//! Data loading and processing utilities for part-annotated point clouds.
//! This crate is learning-framework agnostic and focuses on parsing shape
//! files and on the geometric operations applied to the resulting clouds.

pub mod points;
pub mod transform;
pub mod types;

pub use points::{PointsError, load_point_file, read_points};
pub use transform::{
    JITTER_CLIP, JITTER_SIGMA, TransformError, jitter, normalize_unit_sphere,
    sample_with_replacement,
};
pub use types::{PointCloud, RAW_COLUMNS, RawPointRow};
