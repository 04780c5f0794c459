//! The external shape-cache seam.
//!
//! Retrieval first consults a caller-owned store mapping shape keys
//! (`"{synset}_{shape_id}"`) to raw `[N, 7]` point records. The dataset only
//! ever reads from it; ownership and population stay with the caller.

use std::collections::HashMap;

use partseg_data::RawPointRow;

/// Read-only view of an externally owned shape store.
pub trait ShapeCache {
    /// Look up the raw rows for `key`, if present.
    fn get(&self, key: &str) -> Option<&[RawPointRow]>;

    /// Membership check without retrieving the rows.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl ShapeCache for HashMap<String, Vec<RawPointRow>> {
    fn get(&self, key: &str) -> Option<&[RawPointRow]> {
        HashMap::get(self, key).map(Vec::as_slice)
    }
}
