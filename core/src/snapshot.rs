//! Shared snapshot cell — lock-free reads of an immutable snapshot.
//!
//! Rebuilding after new draws are ingested is the only mutation point:
//! the writer constructs a complete new AnalysisSnapshot and swaps the
//! Arc. Readers clone the Arc and can never observe a partially built
//! snapshot.

use crate::frequency::AnalysisSnapshot;
use std::sync::{Arc, RwLock};

pub struct SnapshotCell {
    inner: RwLock<Arc<AnalysisSnapshot>>,
}

impl SnapshotCell {
    pub fn new(snapshot: AnalysisSnapshot) -> Self {
        Self {
            inner: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Current snapshot. The returned Arc stays valid across later
    /// swaps, so long-running readers keep a consistent view.
    pub fn load(&self) -> Arc<AnalysisSnapshot> {
        // Snapshots are immutable, so a poisoned lock still guards
        // consistent data; recover rather than propagate.
        match self.inner.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Single-writer swap of a fully built snapshot.
    pub fn store(&self, snapshot: AnalysisSnapshot) {
        let next = Arc::new(snapshot);
        match self.inner.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawSet;
    use crate::frequency::analyze;
    use crate::profile::POWERBALL;
    use crate::test_support::{draw, profile_5_10_10};

    #[test]
    fn load_returns_swapped_snapshot() {
        let cell = SnapshotCell::new(analyze(&DrawSet::new(POWERBALL)));
        assert_eq!(cell.load().total_draws, 0);

        let profile = profile_5_10_10();
        let mut set = DrawSet::new(profile);
        set.push(draw(&profile, "2024-01-02", &[1, 2, 3, 4, 5], 7)).unwrap();
        cell.store(analyze(&set));
        assert_eq!(cell.load().total_draws, 1);
    }

    #[test]
    fn old_readers_keep_their_view_across_a_swap() {
        let cell = SnapshotCell::new(analyze(&DrawSet::new(POWERBALL)));
        let before = cell.load();

        let profile = profile_5_10_10();
        let mut set = DrawSet::new(profile);
        set.push(draw(&profile, "2024-01-02", &[1, 2, 3, 4, 5], 7)).unwrap();
        cell.store(analyze(&set));

        assert_eq!(before.total_draws, 0);
        assert_eq!(cell.load().total_draws, 1);
    }
}
