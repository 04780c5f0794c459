//! Category metadata for part-annotated shape collections.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use super::DatasetError;

/// Bidirectional mapping between human-readable category names and the synset
/// identifiers naming their directories, in metadata-file line order.
///
/// Line order matters: the position of a category in the file defines the
/// class index assigned to its shapes.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    /// (category name, synset id) pairs in file order.
    entries: Vec<(String, String)>,
    by_name: HashMap<String, usize>,
    by_synset: HashMap<String, usize>,
}

impl CategoryTable {
    /// Parse a `synsetoffset2category.txt` metadata file: one
    /// `<category> <synset>` pair per line, whitespace separated.
    ///
    /// A missing file, a line with fewer than two fields, or a duplicated
    /// category or synset is a fatal configuration error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let mut table = Self::default();
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let mut fields = trimmed.split_whitespace();
            let (Some(name), Some(synset)) = (fields.next(), fields.next()) else {
                return Err(DatasetError::MalformedCategory { line: i + 1 });
            };
            table.insert(name, synset).map_err(|_| DatasetError::MalformedCategory { line: i + 1 })?;
        }

        debug!("loaded {} categories from {}", table.len(), path.display());
        Ok(table)
    }

    fn insert(&mut self, name: &str, synset: &str) -> Result<(), ()> {
        if self.by_name.contains_key(name) || self.by_synset.contains_key(synset) {
            return Err(());
        }
        let idx = self.entries.len();
        self.by_name.insert(name.to_string(), idx);
        self.by_synset.insert(synset.to_string(), idx);
        self.entries.push((name.to_string(), synset.to_string()));
        Ok(())
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no categories.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(category name, synset id)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s.as_str()))
    }

    /// The synset id of a category name.
    pub fn synset_of(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(|&i| self.entries[i].1.as_str())
    }

    /// The category name owning a synset id.
    pub fn category_of(&self, synset: &str) -> Option<&str> {
        self.by_synset.get(synset).map(|&i| self.entries[i].0.as_str())
    }

    /// The class index of a category name (its position in file order).
    pub fn class_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// The class index of the category owning a synset id.
    pub fn class_of_synset(&self, synset: &str) -> Option<usize> {
        self.by_synset.get(synset).copied()
    }
}

/// Segmentation label ids valid for a category.
///
/// Reference metadata for consumers that need the global part-label layout;
/// retrieval does not enforce it.
pub fn segment_classes(category: &str) -> Option<&'static [i32]> {
    Some(match category {
        "Airplane" => &[0, 1, 2, 3],
        "Bag" => &[4, 5],
        "Cap" => &[6, 7],
        "Car" => &[8, 9, 10, 11],
        "Chair" => &[12, 13, 14, 15],
        "Earphone" => &[16, 17, 18],
        "Guitar" => &[19, 20, 21],
        "Knife" => &[22, 23],
        "Lamp" => &[24, 25, 26, 27],
        "Laptop" => &[28, 29],
        "Motorbike" => &[30, 31, 32, 33, 34, 35],
        "Mug" => &[36, 37],
        "Pistol" => &[38, 39, 40],
        "Rocket" => &[41, 42, 43],
        "Skateboard" => &[44, 45, 46],
        "Table" => &[47, 48, 49],
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_table(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synsetoffset2category.txt");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_preserves_file_order() {
        let (_dir, path) = write_table("Airplane 02691156\nBag 02773838\nCap 02954340\n");
        let table = CategoryTable::load(&path).unwrap();

        assert_eq!(table.len(), 3);
        let names: Vec<&str> = table.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Airplane", "Bag", "Cap"]);

        assert_eq!(table.class_index("Airplane"), Some(0));
        assert_eq!(table.class_index("Cap"), Some(2));
        assert_eq!(table.class_of_synset("02773838"), Some(1));
    }

    #[test]
    fn test_bidirectional_lookup() {
        let (_dir, path) = write_table("Chair 03001627\n");
        let table = CategoryTable::load(&path).unwrap();

        assert_eq!(table.synset_of("Chair"), Some("03001627"));
        assert_eq!(table.category_of("03001627"), Some("Chair"));
        assert_eq!(table.synset_of("Sofa"), None);
        assert_eq!(table.category_of("00000000"), None);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = CategoryTable::load(dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }

    #[test]
    fn test_short_line_is_fatal() {
        let (_dir, path) = write_table("Airplane 02691156\nBag\n");
        let err = CategoryTable::load(&path).unwrap_err();
        assert!(matches!(err, DatasetError::MalformedCategory { line: 2 }));
    }

    #[test]
    fn test_duplicate_category_is_fatal() {
        let (_dir, path) = write_table("Airplane 02691156\nAirplane 02773838\n");
        let err = CategoryTable::load(&path).unwrap_err();
        assert!(matches!(err, DatasetError::MalformedCategory { line: 2 }));
    }

    #[test]
    fn test_segment_classes_table() {
        assert_eq!(segment_classes("Airplane"), Some(&[0, 1, 2, 3][..]));
        assert_eq!(segment_classes("Table"), Some(&[47, 48, 49][..]));
        assert_eq!(segment_classes("Spaceship"), None);
    }
}
