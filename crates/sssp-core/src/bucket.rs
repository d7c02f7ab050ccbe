//! Two-dimensional bucket array `B[b][t]` used by the parallel delta-stepping
//! solver.
//!
//! Owned solely by the coordinator thread: workers never see a
//! `BucketGrid` directly, they only see the per-bucket batch the coordinator
//! hands them before each phase barrier (see [`crate::worker`]). This keeps
//! bucket membership single-writer without needing cross-thread column
//! ownership under the borrow checker.

use sssp_graph::vertex::VertexId;

/// `B[b][t]`: `nb` buckets, each split into a cell per worker. Each cell
/// preserves insertion order and holds no duplicates; a vertex's current
/// `(bucket, worker)` location is tracked so a later `insert` can relocate
/// it without leaving a stale copy behind.
pub struct BucketGrid {
    nb: usize,
    cells: Vec<Vec<Vec<VertexId>>>,
    location: Vec<Option<(usize, usize)>>,
}

impl BucketGrid {
    #[must_use]
    pub fn new(nb: usize, workers: usize, node_count: usize) -> Self {
        Self {
            nb,
            cells: vec![vec![Vec::new(); workers]; nb],
            location: vec![None; node_count],
        }
    }

    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.nb
    }

    /// Inserts `v` into `B[b][t]`, first removing it from wherever it
    /// currently sits.
    pub fn insert(&mut self, v: VertexId, b: usize, t: usize) {
        if let Some((old_b, old_t)) = self.location[v.index()] {
            if (old_b, old_t) == (b, t) {
                return;
            }
            self.remove(v, old_b, old_t);
        }
        self.cells[b][t].push(v);
        self.location[v.index()] = Some((b, t));
    }

    pub fn remove(&mut self, v: VertexId, b: usize, t: usize) {
        self.cells[b][t].retain(|&id| id != v);
        if self.location[v.index()] == Some((b, t)) {
            self.location[v.index()] = None;
        }
    }

    #[must_use]
    pub fn cell(&self, b: usize, t: usize) -> &[VertexId] {
        &self.cells[b][t]
    }

    /// Empties `B[b][t]` and returns its former contents in insertion order,
    /// clearing each returned vertex's tracked location.
    pub fn take_cell(&mut self, b: usize, t: usize) -> Vec<VertexId> {
        let taken = std::mem::take(&mut self.cells[b][t]);
        for &v in &taken {
            self.location[v.index()] = None;
        }
        taken
    }

    #[must_use]
    pub fn is_bucket_empty(&self, b: usize) -> bool {
        self.cells[b].iter().all(Vec::is_empty)
    }

    /// Smallest bucket index `b >= from` (wrapping modulo `nb`) holding any
    /// vertex, or `None` if every cell is empty.
    #[must_use]
    pub fn next_nonempty_from(&self, from: usize) -> Option<usize> {
        (0..self.nb)
            .map(|offset| (from + offset) % self.nb)
            .find(|&b| !self.is_bucket_empty(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_take_cell_round_trips_in_order() {
        let mut grid = BucketGrid::new(4, 2, 5);
        grid.insert(VertexId::new(0), 1, 0);
        grid.insert(VertexId::new(2), 1, 0);
        assert_eq!(grid.cell(1, 0), &[VertexId::new(0), VertexId::new(2)]);
        let taken = grid.take_cell(1, 0);
        assert_eq!(taken, vec![VertexId::new(0), VertexId::new(2)]);
        assert!(grid.cell(1, 0).is_empty());
    }

    #[test]
    fn reinsert_relocates_without_leaving_a_stale_copy() {
        let mut grid = BucketGrid::new(4, 2, 5);
        grid.insert(VertexId::new(3), 0, 1);
        grid.insert(VertexId::new(3), 2, 1);
        assert!(grid.cell(0, 1).is_empty());
        assert_eq!(grid.cell(2, 1), &[VertexId::new(3)]);
    }

    #[test]
    fn next_nonempty_from_wraps_modulo_nb() {
        let mut grid = BucketGrid::new(3, 1, 2);
        grid.insert(VertexId::new(0), 1, 0);
        assert_eq!(grid.next_nonempty_from(2), Some(1));
    }

    #[test]
    fn next_nonempty_from_is_none_when_all_empty() {
        let grid = BucketGrid::new(3, 1, 2);
        assert_eq!(grid.next_nonempty_from(0), None);
    }
}
