use serde::{Deserialize, Serialize};

/// For every filament index, the other indices sharing its location.
///
/// Each entry is sorted ascending and never contains its own index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapMap {
    entries: Vec<Vec<usize>>,
}

impl OverlapMap {
    /// Builds a map from per-point index lists. Entries are sorted and
    /// deduplicated; a point listing itself is dropped.
    pub fn from_entries(mut entries: Vec<Vec<usize>>) -> Self {
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.retain(|&j| j != i);
            entry.sort_unstable();
            entry.dedup();
        }
        OverlapMap { entries }
    }

    /// An overlap map for `len` points where nothing coincides.
    pub fn empty(len: usize) -> Self {
        OverlapMap { entries: vec![Vec::new(); len] }
    }

    /// Number of filament points covered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indices overlapping point `index`; empty for out-of-range indices.
    pub fn get(&self, index: usize) -> &[usize] {
        self.entries.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.entries.iter().map(Vec::as_slice)
    }

    pub fn has_overlap(&self, index: usize) -> bool {
        !self.get(index).is_empty()
    }

    /// Number of points with at least one overlap.
    pub fn overlapping_points(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_empty()).count()
    }

    /// Number of unordered overlapping index pairs.
    pub fn pair_count(&self) -> usize {
        self.entries.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// `j` in `overlap[i]` exactly when `i` in `overlap[j]`, and no point lists itself.
    pub fn is_symmetric(&self) -> bool {
        self.entries.iter().enumerate().all(|(i, entry)| {
            entry
                .iter()
                .all(|&j| j != i && self.get(j).binary_search(&i).is_ok())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_entries_normalizes() {
        let map = OverlapMap::from_entries(vec![vec![4, 0, 4], vec![], vec![], vec![], vec![0]]);
        assert_eq!(map.get(0), &[4]);
        assert_eq!(map.get(4), &[0]);
        assert!(map.is_symmetric());
        assert_eq!(map.overlapping_points(), 2);
        assert_eq!(map.pair_count(), 1);
    }

    #[test]
    fn asymmetric_map_is_detected() {
        let map = OverlapMap::from_entries(vec![vec![1], vec![]]);
        assert!(!map.is_symmetric());
    }

    #[test]
    fn empty_map_has_no_overlaps() {
        let map = OverlapMap::empty(3);
        assert_eq!(map.len(), 3);
        assert!(!map.has_overlap(1));
        assert_eq!(map.get(99), &[] as &[usize]);
        assert_eq!(map.pair_count(), 0);
        assert!(map.is_symmetric());
    }
}
