//! Dataset split handling: the split selector and the shuffled manifests.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::DatasetError;

/// Which portion of the dataset to index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    #[default]
    Train,
    Val,
    Test,
    /// Union of [`Split::Train`] and [`Split::Val`].
    TrainVal,
}

impl Split {
    /// The manifest-facing name of the split.
    pub fn as_str(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
            Split::TrainVal => "trainval",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Split {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Split::Train),
            "val" => Ok(Split::Val),
            "test" => Ok(Split::Test),
            "trainval" => Ok(Split::TrainVal),
            other => Err(DatasetError::UnknownSplit(other.to_string())),
        }
    }
}

/// Shape-id membership sets parsed from the three shuffled manifests.
#[derive(Debug, Clone, Default)]
pub struct SplitSets {
    train: HashSet<String>,
    val: HashSet<String>,
    test: HashSet<String>,
}

impl SplitSets {
    /// Load `shuffled_{train,val,test}_file_list.json` from the manifest
    /// directory. Each manifest is a JSON array of `a/b/<shape_id>` strings;
    /// the third path segment is the shape id.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, DatasetError> {
        let dir = dir.as_ref();
        Ok(Self {
            train: load_manifest(&dir.join("shuffled_train_file_list.json"))?,
            val: load_manifest(&dir.join("shuffled_val_file_list.json"))?,
            test: load_manifest(&dir.join("shuffled_test_file_list.json"))?,
        })
    }

    /// Whether `shape_id` belongs to `split`.
    pub fn contains(&self, split: Split, shape_id: &str) -> bool {
        match split {
            Split::Train => self.train.contains(shape_id),
            Split::Val => self.val.contains(shape_id),
            Split::Test => self.test.contains(shape_id),
            Split::TrainVal => self.train.contains(shape_id) || self.val.contains(shape_id),
        }
    }
}

fn load_manifest(path: &Path) -> Result<HashSet<String>, DatasetError> {
    let file = File::open(path)?;
    let entries: Vec<String> = serde_json::from_reader(BufReader::new(file))?;

    let mut ids = HashSet::with_capacity(entries.len());
    for entry in entries {
        let id = entry
            .split('/')
            .nth(2)
            .ok_or_else(|| DatasetError::MalformedManifestEntry {
                entry: entry.clone(),
            })?;
        ids.insert(id.to_string());
    }

    debug!("manifest {}: {} shape ids", path.display(), ids.len());
    Ok(ids)
}
