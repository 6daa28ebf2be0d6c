//! Sparse 3D node index and the directional sweep schedule.
//!
//! Nodes are addressed by integer coordinates `(i, j, k)`. The index is
//! ragged: every row may have its own length and any slot may be empty, so a
//! mesh can be filled incrementally in any order.
//!
//! Force propagation depends on the order nodes are visited, so a single
//! traversal direction biases the material. [`SWEEP_SCHEDULE`] lists the eight
//! ascending/descending combinations of the three axes, visited once each per
//! tick.

use crate::error::PhysicsError;
use crate::node::NodeId;

/// Direction of travel along one axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    /// Slot visited at step `n` of a row with `len` slots.
    fn nth(self, len: usize, n: usize) -> usize {
        match self {
            Order::Ascending => n,
            Order::Descending => len - 1 - n,
        }
    }
}

/// Traversal order of the three axes. `i` is the outer loop, `k` the inner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SweepDirection {
    pub i: Order,
    pub j: Order,
    pub k: Order,
}

impl SweepDirection {
    pub const fn new(i: Order, j: Order, k: Order) -> Self {
        SweepDirection { i, j, k }
    }
}

const fn dir(i: Order, j: Order, k: Order) -> SweepDirection {
    SweepDirection::new(i, j, k)
}

use Order::{Ascending as Asc, Descending as Desc};

/// Plain `(i, j, k)` ascending order, used for gravity and collisions.
pub const ASCENDING: SweepDirection = dir(Asc, Asc, Asc);

/// The eight relaxation passes of one tick, in execution order.
pub const SWEEP_SCHEDULE: [SweepDirection; 8] = [
    dir(Asc, Asc, Asc),
    dir(Desc, Asc, Asc),
    dir(Asc, Desc, Asc),
    dir(Desc, Desc, Asc),
    dir(Asc, Asc, Desc),
    dir(Desc, Asc, Desc),
    dir(Asc, Desc, Desc),
    dir(Desc, Desc, Desc),
];

/// Ragged `(i, j, k) -> NodeId` index.
#[derive(Clone, Debug, Default)]
pub struct SparseGrid {
    cells: Vec<Vec<Vec<Option<NodeId>>>>,
}

impl SparseGrid {
    pub fn new() -> Self {
        SparseGrid { cells: Vec::new() }
    }

    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<NodeId> {
        self.cells.get(i)?.get(j)?.get(k).copied().flatten()
    }

    /// Register `id` at `(i, j, k)`, growing rows as needed.
    pub fn insert(&mut self, i: usize, j: usize, k: usize, id: NodeId) -> Result<(), PhysicsError> {
        if self.cells.len() <= i {
            self.cells.resize_with(i + 1, Vec::new);
        }
        let plane = &mut self.cells[i];
        if plane.len() <= j {
            plane.resize_with(j + 1, Vec::new);
        }
        let row = &mut plane[j];
        if row.len() <= k {
            row.resize(k + 1, None);
        }
        match row[k] {
            Some(_) => Err(PhysicsError::OccupiedSlot { i, j, k }),
            None => {
                row[k] = Some(id);
                Ok(())
            }
        }
    }

    /// Visit every present node in `direction` order.
    pub fn for_each<F: FnMut(NodeId)>(&self, direction: SweepDirection, mut f: F) {
        let ni = self.cells.len();
        for a in 0..ni {
            let plane = &self.cells[direction.i.nth(ni, a)];
            let nj = plane.len();
            for b in 0..nj {
                let row = &plane[direction.j.nth(nj, b)];
                let nk = row.len();
                for c in 0..nk {
                    if let Some(id) = row[direction.k.nth(nk, c)] {
                        f(id);
                    }
                }
            }
        }
    }

    /// Node ids in `direction` order.
    pub fn ids(&self, direction: SweepDirection) -> Vec<NodeId> {
        let mut ids = Vec::new();
        self.for_each(direction, |id| ids.push(id));
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(ni: usize, nj: usize, nk: usize) -> SparseGrid {
        let mut grid = SparseGrid::new();
        let mut next = 0;
        for i in 0..ni {
            for j in 0..nj {
                for k in 0..nk {
                    grid.insert(i, j, k, NodeId(next)).unwrap();
                    next += 1;
                }
            }
        }
        grid
    }

    #[test]
    fn schedule_covers_every_sign_combination_once() {
        for (n, d) in SWEEP_SCHEDULE.iter().enumerate() {
            let bit = |o: Order| usize::from(o == Desc);
            assert_eq!(bit(d.i) | bit(d.j) << 1 | bit(d.k) << 2, n);
        }
    }

    #[test]
    fn descending_i_flips_outer_loop_only() {
        let grid = filled(2, 2, 2);
        let ids: Vec<usize> = grid.ids(SWEEP_SCHEDULE[1]).into_iter().map(NodeId::index).collect();
        assert_eq!(ids, vec![4, 5, 6, 7, 0, 1, 2, 3]);
    }

    #[test]
    fn fully_descending_is_reverse() {
        let grid = filled(2, 3, 2);
        let mut forward = grid.ids(ASCENDING);
        forward.reverse();
        assert_eq!(grid.ids(SWEEP_SCHEDULE[7]), forward);
    }

    #[test]
    fn occupied_slot_is_rejected() {
        let mut grid = SparseGrid::new();
        grid.insert(0, 1, 2, NodeId(0)).unwrap();
        assert_eq!(
            grid.insert(0, 1, 2, NodeId(1)).unwrap_err(),
            PhysicsError::OccupiedSlot { i: 0, j: 1, k: 2 },
        );
    }

    #[test]
    fn ragged_grid_skips_holes() {
        let mut grid = SparseGrid::new();
        grid.insert(2, 0, 3, NodeId(0)).unwrap();
        grid.insert(0, 1, 0, NodeId(1)).unwrap();
        assert_eq!(grid.get(1, 0, 0), None);
        assert_eq!(grid.get(2, 0, 3), Some(NodeId(0)));
        for direction in SWEEP_SCHEDULE {
            assert_eq!(grid.ids(direction).len(), 2);
        }
        assert_eq!(grid.ids(ASCENDING), vec![NodeId(1), NodeId(0)]);
    }
}
