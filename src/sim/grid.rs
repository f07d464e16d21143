//! Uniform spatial grid for neighbor queries
//!
//! Rebuilt from scratch every substep. Buckets hold indices into the
//! particle slice the grid was built from, never the particles themselves.

use std::collections::BTreeMap;

use glam::DVec2;

use super::particle::Particle;

/// Integer cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    pub x: i32,
    pub y: i32,
}

impl CellKey {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell containing `pos` (floor division per axis)
    #[inline]
    pub fn containing(pos: DVec2, cell_size: f64) -> Self {
        Self {
            x: (pos.x / cell_size).floor() as i32,
            y: (pos.y / cell_size).floor() as i32,
        }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// This cell followed by its 8 neighbors
    pub fn neighborhood(self) -> [CellKey; 9] {
        [
            self,
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
            self.offset(1, 1),
            self.offset(-1, -1),
            self.offset(1, -1),
            self.offset(-1, 1),
        ]
    }
}

/// Mapping from occupied cell to particle indices.
///
/// Cells are kept ordered so every pass over the grid visits them in the same
/// sequence, which keeps runs reproducible for a given seed.
#[derive(Debug, Clone, Default)]
pub struct SpatialGrid {
    cell_size: f64,
    cells: BTreeMap<CellKey, Vec<usize>>,
    /// Bounding box of occupied cells (min, max), None when empty
    bounds: Option<(CellKey, CellKey)>,
}

impl SpatialGrid {
    /// File every particle under the cell containing its center.
    ///
    /// `cell_size` must be > 0. Bucket order follows particle order.
    pub fn build(particles: &[Particle], cell_size: f64) -> Self {
        let mut cells: BTreeMap<CellKey, Vec<usize>> = BTreeMap::new();
        let mut bounds: Option<(CellKey, CellKey)> = None;
        for (idx, p) in particles.iter().enumerate() {
            let key = CellKey::containing(p.pos, cell_size);
            bounds = Some(match bounds {
                Some((lo, hi)) => (
                    CellKey::new(lo.x.min(key.x), lo.y.min(key.y)),
                    CellKey::new(hi.x.max(key.x), hi.y.max(key.y)),
                ),
                None => (key, key),
            });
            cells.entry(key).or_default().push(idx);
        }
        Self {
            cell_size,
            cells,
            bounds,
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn cell_of(&self, pos: DVec2) -> CellKey {
        CellKey::containing(pos, self.cell_size)
    }

    /// Indices filed under `key` (empty if unoccupied)
    pub fn bucket(&self, key: CellKey) -> &[usize] {
        self.cells.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Occupied cells with their buckets, in key order
    pub fn cells(&self) -> impl Iterator<Item = (CellKey, &[usize])> {
        self.cells.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Occupied cell bounding box as (min, max), None when empty
    pub fn bounds(&self) -> Option<(CellKey, CellKey)> {
        self.bounds
    }

    /// Indices in every cell of the square of `reach` cells around `center`
    /// (inclusive, so `reach == 1` covers the 3x3 block).
    ///
    /// The square is clipped to the occupied bounding box, so a reach far
    /// larger than the plane costs no more than scanning every occupied row.
    pub fn indices_within(&self, center: CellKey, reach: i32) -> impl Iterator<Item = usize> + '_ {
        let (lo, hi) = self
            .bounds
            .unwrap_or((CellKey::new(0, 0), CellKey::new(-1, -1)));
        let x0 = center.x.saturating_sub(reach).max(lo.x);
        let x1 = center.x.saturating_add(reach).min(hi.x);
        let y0 = center.y.saturating_sub(reach).max(lo.y);
        let y1 = center.y.saturating_add(reach).min(hi.y);

        (x0..=x1).flat_map(move |x| {
            (y0..=y1).flat_map(move |y| self.bucket(CellKey::new(x, y)).iter().copied())
        })
    }
}
