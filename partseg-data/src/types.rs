//! Core data types for part-annotated point clouds.
//!
//! These are the CPU-side representations shared by the file loader, the
//! external shape cache, and the dataset pipeline in partseg-train.

use glam::Vec3;

/// Number of columns in a raw shape record: x, y, z, nx, ny, nz, label.
pub const RAW_COLUMNS: usize = 7;

/// One raw row of a shape record, as stored in the external cache and in the
/// on-disk point files.
pub type RawPointRow = [f32; RAW_COLUMNS];

/// A part-annotated point cloud.
///
/// Positions, normals, and segmentation labels are parallel columns: entry
/// `i` of each column refers to the same point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    /// Point coordinates in object space.
    pub positions: Vec<Vec3>,
    /// Per-point surface normals.
    pub normals: Vec<Vec3>,
    /// Per-point segmentation part labels.
    pub labels: Vec<i32>,
}

impl PointCloud {
    /// Split raw `[N, 7]` rows into the position, normal, and label columns.
    ///
    /// Columns 0..3 are the position, 3..6 the normal, and the last column the
    /// segmentation label (truncated to an integer).
    pub fn from_rows(rows: &[RawPointRow]) -> Self {
        let mut positions = Vec::with_capacity(rows.len());
        let mut normals = Vec::with_capacity(rows.len());
        let mut labels = Vec::with_capacity(rows.len());

        for row in rows {
            positions.push(Vec3::new(row[0], row[1], row[2]));
            normals.push(Vec3::new(row[3], row[4], row[5]));
            labels.push(row[6] as i32);
        }

        Self {
            positions,
            normals,
            labels,
        }
    }

    /// Number of points in the cloud.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the cloud has no points.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Gather the rows at `indices` into a new cloud.
    ///
    /// The same index sequence is applied to positions, normals, and labels,
    /// so the point/normal/label correspondence is preserved. Indices may
    /// repeat; every index must be below `len()`.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            positions: indices.iter().map(|&i| self.positions[i]).collect(),
            normals: indices.iter().map(|&i| self.normals[i]).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}
