//! Shape point-file loading and parsing

mod loader;

pub use loader::{PointsError, load_point_file, read_points};
