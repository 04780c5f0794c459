//! The ShapeNet-style part-segmentation dataset: index construction and
//! example sampling.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use rand::Rng;
use rand::thread_rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use partseg_data::{
    JITTER_CLIP, JITTER_SIGMA, PointCloud, RawPointRow, jitter, load_point_file,
    normalize_unit_sphere, sample_with_replacement,
};

use super::cache::ShapeCache;
use super::categories::CategoryTable;
use super::splits::{Split, SplitSets};
use super::{Dataset, DatasetError};

/// Configuration for [`ShapeNetPartDataset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeNetPartConfig {
    /// Number of points every example is resampled to.
    pub npoints: usize,
    /// Which split to index.
    pub split: Split,
    /// Center and rescale every cloud to the unit sphere before sampling.
    pub normalize: bool,
    /// Apply clipped Gaussian jitter to the point coordinates.
    pub jitter: bool,
}

impl Default for ShapeNetPartConfig {
    fn default() -> Self {
        Self {
            npoints: 2500,
            split: Split::Train,
            normalize: true,
            jitter: false,
        }
    }
}

impl ShapeNetPartConfig {
    pub fn npoints(mut self, n: usize) -> Self {
        self.npoints = n;
        self
    }

    pub fn split(mut self, s: Split) -> Self {
        self.split = s;
        self
    }

    pub fn normalize(mut self, yes: bool) -> Self {
        self.normalize = yes;
        self
    }

    pub fn jitter(mut self, yes: bool) -> Self {
        self.jitter = yes;
        self
    }
}

/// A fixed-size training example.
///
/// The three per-point columns are parallel: row `i` of `points`, `labels`,
/// and `normals` describes the same sampled point.
#[derive(Debug, Clone)]
pub struct Example {
    /// Sampled point coordinates, `npoints` rows.
    pub points: Vec<Vec3>,
    /// Class index of the shape's category.
    pub class_id: i32,
    /// Per-point segmentation labels, `npoints` rows.
    pub labels: Vec<i32>,
    /// Per-point normals, `npoints` rows.
    pub normals: Vec<Vec3>,
}

/// One indexed shape.
#[derive(Debug)]
struct IndexEntry {
    path: PathBuf,
    /// Cache key, `"{synset}_{shape_id}"`.
    key: String,
    class_id: i32,
}

/// Index and sampler over a ShapeNet-style part-annotation directory.
///
/// Construction walks the category directories once and freezes the example
/// index; retrieval resamples one shape to a fixed point count, consulting
/// the caller-owned cache before falling back to the raw point file.
pub struct ShapeNetPartDataset<'a> {
    root: PathBuf,
    cache: &'a dyn ShapeCache,
    config: ShapeNetPartConfig,
    categories: CategoryTable,
    entries: Vec<IndexEntry>,
}

impl std::fmt::Debug for ShapeNetPartDataset<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeNetPartDataset")
            .field("root", &self.root)
            .field("cache", &"<dyn ShapeCache>")
            .field("config", &self.config)
            .field("categories", &self.categories)
            .field("entries", &self.entries)
            .finish()
    }
}

impl<'a> ShapeNetPartDataset<'a> {
    /// Build the dataset index for `config.split` under `root`.
    ///
    /// Reads `synsetoffset2category.txt` and the three split manifests, then
    /// lists every category directory in metadata order, keeping the
    /// lexicographically sorted files whose stem belongs to the split.
    pub fn new<P: AsRef<Path>>(
        root: P,
        cache: &'a dyn ShapeCache,
        config: ShapeNetPartConfig,
    ) -> Result<Self, DatasetError> {
        let root = root.as_ref().to_path_buf();
        let categories = CategoryTable::load(root.join("synsetoffset2category.txt"))?;
        let splits = SplitSets::load(root.join("train_test_split"))?;

        let mut entries = Vec::new();
        for (class, (name, synset)) in categories.iter().enumerate() {
            let dir = root.join(synset);

            let mut file_names = Vec::new();
            for entry in fs::read_dir(&dir)? {
                if let Some(file_name) = entry?.file_name().to_str() {
                    file_names.push(file_name.to_string());
                }
            }
            file_names.sort();

            let before = entries.len();
            for file_name in file_names {
                let Some(stem) = Path::new(&file_name).file_stem().and_then(|s| s.to_str())
                else {
                    continue;
                };
                if splits.contains(config.split, stem) {
                    entries.push(IndexEntry {
                        path: dir.join(&file_name),
                        key: format!("{synset}_{stem}"),
                        class_id: class as i32,
                    });
                }
            }
            debug!(
                "category {}: {} shapes in {} split",
                name,
                entries.len() - before,
                config.split
            );
        }

        info!(
            "indexed {} shapes across {} categories ({} split)",
            entries.len(),
            categories.len(),
            config.split
        );

        Ok(Self {
            root,
            cache,
            config,
            categories,
            entries,
        })
    }

    /// Total number of indexed shapes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The dataset root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The active configuration.
    pub fn config(&self) -> &ShapeNetPartConfig {
        &self.config
    }

    /// The category table backing class indices.
    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    /// The point-file path of the shape at `index`.
    pub fn path_of(&self, index: usize) -> Option<&Path> {
        self.entries.get(index).map(|e| e.path.as_path())
    }

    /// Retrieve example `index` using thread-local randomness.
    pub fn get(&self, index: usize) -> Result<Example, DatasetError> {
        self.get_with_rng(index, &mut thread_rng())
    }

    /// Retrieve example `index`, drawing resample (and jitter) randomness
    /// from `rng`.
    pub fn get_with_rng<R: Rng + ?Sized>(
        &self,
        index: usize,
        rng: &mut R,
    ) -> Result<Example, DatasetError> {
        let entry = self.entries.get(index).ok_or(DatasetError::OutOfBounds {
            index,
            len: self.entries.len(),
        })?;

        // Cache first; a miss degrades to re-reading the raw point file.
        let fallback;
        let rows: &[RawPointRow] = match self.cache.get(&entry.key) {
            Some(rows) => rows,
            None => {
                warn!(
                    "cache miss for shape {}, reading {}",
                    entry.key,
                    entry.path.display()
                );
                fallback = load_point_file(&entry.path)?;
                &fallback
            }
        };

        let mut cloud = PointCloud::from_rows(rows);
        if cloud.is_empty() {
            return Err(DatasetError::EmptyShape {
                key: entry.key.clone(),
            });
        }

        if self.config.normalize {
            cloud.positions = normalize_unit_sphere(&cloud.positions)?;
        }
        if self.config.jitter {
            cloud.positions = jitter(&cloud.positions, JITTER_SIGMA, JITTER_CLIP, rng)?;
        }

        let choice = sample_with_replacement(cloud.len(), self.config.npoints, rng);
        let sampled = cloud.select(&choice);

        Ok(Example {
            points: sampled.positions,
            class_id: entry.class_id,
            labels: sampled.labels,
            normals: sampled.normals,
        })
    }
}

impl Dataset for ShapeNetPartDataset<'_> {
    type Item = Example;

    fn len(&self) -> usize {
        ShapeNetPartDataset::len(self)
    }

    fn get(&self, index: usize) -> Result<Example, DatasetError> {
        ShapeNetPartDataset::get(self, index)
    }
}
