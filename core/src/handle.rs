use parking_lot::RwLock;
use std::sync::Arc;

use crate::index::InvertedIndex;

/// Swap-on-completion publication point for a built index.
///
/// Builds happen off to the side into a fresh [`InvertedIndex`]; `swap`
/// publishes the finished structure under a brief write lock, so readers
/// either see the old index or the new one, never a partial build.
/// `load` hands out a cheap `Arc` clone that stays valid across swaps.
#[derive(Clone, Default)]
pub struct IndexHandle {
    current: Arc<RwLock<Arc<InvertedIndex>>>,
}

impl IndexHandle {
    pub fn new(index: InvertedIndex) -> Self {
        Self { current: Arc::new(RwLock::new(Arc::new(index))) }
    }

    /// Snapshot of the currently published index.
    pub fn load(&self) -> Arc<InvertedIndex> {
        self.current.read().clone()
    }

    /// Publish a freshly built index, returning the one it replaced.
    pub fn swap(&self, index: InvertedIndex) -> Arc<InvertedIndex> {
        let mut guard = self.current.write();
        std::mem::replace(&mut *guard, Arc::new(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{StemTable, StopWordSet};
    use crate::builder::build;
    use crate::index::Document;

    #[test]
    fn readers_keep_their_snapshot_across_a_swap() {
        let sw = StopWordSet::default();
        let st = StemTable::default();
        let first = build([Document { id: 1, text: "alpha".into() }], &sw, &st).unwrap();
        let handle = IndexHandle::new(first);

        let snapshot = handle.load();
        let second = build([Document { id: 2, text: "beta".into() }], &sw, &st).unwrap();
        handle.swap(second);

        assert!(snapshot.contains_doc(1));
        assert!(!snapshot.contains_doc(2));
        let fresh = handle.load();
        assert!(fresh.contains_doc(2));
        assert!(!fresh.contains_doc(1));
    }
}
