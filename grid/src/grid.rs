//! Fixed uniform grid with 3×3 neighbourhood search.

use crate::cell::{Cell, CellId};
use crate::config::GridConfig;
use aoi_common::{Aoi, AoiError, AoiResult, Bounds, Entity, EntityKey, ObjectPool};
use smallvec::SmallVec;

/// The eight unit offsets around a cell; the cell itself is added separately.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A square region split into `partitions × partitions` equal cells.
///
/// The cell layout never changes after construction, so no operation needs
/// more synchronisation than each cell's entity map provides.
#[derive(Debug)]
pub struct UniformGrid {
    bounds: Bounds,
    partitions: usize,
    cell_width: f64,
    cells: Box<[Cell]>,
    result_pool: ObjectPool<Vec<EntityKey>>,
}

impl UniformGrid {
    pub fn new(bounds: Bounds, partitions: usize) -> AoiResult<Self> {
        Self::new_with_config(GridConfig {
            bounds,
            partitions,
            ..GridConfig::default()
        })
    }

    pub fn new_with_config(config: GridConfig) -> AoiResult<Self> {
        let GridConfig {
            bounds,
            partitions,
            pool_size,
        } = config;
        bounds.validate()?;
        if partitions == 0 {
            return Err(AoiError::InvalidPartitionCount { partitions });
        }

        let cell_count = partitions
            .checked_mul(partitions)
            .ok_or(AoiError::InvalidPartitionCount { partitions })?;

        let cell_width = bounds.width / partitions as f64;
        let mut cells = Vec::with_capacity(cell_count);
        for gy in 0..partitions {
            for gx in 0..partitions {
                let cell_bounds = Bounds {
                    x: edge(bounds.x, cell_width, gx),
                    y: edge(bounds.y, cell_width, gy),
                    width: cell_width,
                };
                cells.push(Cell::new(CellId(gy * partitions + gx), cell_bounds));
            }
        }

        tracing::debug!(
            x = bounds.x,
            y = bounds.y,
            width = bounds.width,
            partitions,
            cell_width,
            "created uniform grid"
        );
        Ok(Self {
            bounds,
            partitions,
            cell_width,
            cells: cells.into_boxed_slice(),
            result_pool: ObjectPool::new(pool_size),
        })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Cells per axis.
    pub fn partitions(&self) -> usize {
        self.partitions
    }

    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    /// Cell owning `(x, y)`. A point on a cell's lower edge belongs to that
    /// cell, using the same edges published in [`Cell::bounds`].
    pub fn cell_at(&self, x: f64, y: f64) -> AoiResult<CellId> {
        self.bounds.ensure_contains(x, y)?;
        let gx = self.axis_index(self.bounds.x, x);
        let gy = self.axis_index(self.bounds.y, y);
        Ok(CellId(gy * self.partitions + gx))
    }

    fn axis_index(&self, origin: f64, value: f64) -> usize {
        let last = self.partitions - 1;
        let index = (((value - origin) / self.cell_width).floor() as usize).min(last);
        // The division and the edge products round independently, so the
        // estimate can land one cell off near an edge.
        if index > 0 && value < edge(origin, self.cell_width, index) {
            index - 1
        } else if index < last && value >= edge(origin, self.cell_width, index + 1) {
            index + 1
        } else {
            index
        }
    }

    /// The cell itself followed by its in-range neighbours. Empty for an id
    /// outside the grid.
    pub fn surrounding_cells(&self, id: CellId) -> SmallVec<[CellId; 9]> {
        let mut surrounding = SmallVec::new();
        if id.0 >= self.cells.len() {
            return surrounding;
        }
        surrounding.push(id);

        let n = self.partitions as isize;
        let gx = (id.0 % self.partitions) as isize;
        let gy = (id.0 / self.partitions) as isize;
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let (nx, ny) = (gx + dx, gy + dy);
            if nx >= 0 && nx < n && ny >= 0 && ny < n {
                surrounding.push(CellId((ny * n + nx) as usize));
            }
        }
        surrounding
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.0)
    }

    pub fn cell_bounds(&self, id: CellId) -> Option<Bounds> {
        self.cell(id).map(|cell| cell.bounds)
    }

    pub fn cell_len(&self, id: CellId) -> Option<usize> {
        self.cell(id).map(Cell::len)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.iter().map(Cell::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }
}

/// Lower edge of cell `index` along one axis.
#[inline]
fn edge(origin: f64, cell_width: f64, index: usize) -> f64 {
    origin + index as f64 * cell_width
}

impl Aoi for UniformGrid {
    fn insert(&self, x: f64, y: f64, key: EntityKey) -> AoiResult<()> {
        let id = self.cell_at(x, y)?;
        self.cells[id.0].entities.store(Entity::new(x, y, key));
        Ok(())
    }

    fn remove(&self, x: f64, y: f64, key: &str) -> AoiResult<()> {
        let id = self.cell_at(x, y)?;
        self.cells[id.0].entities.remove(key);
        Ok(())
    }

    fn search_into(&self, x: f64, y: f64, out: &mut Vec<EntityKey>) -> AoiResult<()> {
        let id = self.cell_at(x, y)?;
        for neighbor in self.surrounding_cells(id) {
            self.cells[neighbor.0].entities.collect_keys(out);
        }
        Ok(())
    }

    fn result_pool(&self) -> &ObjectPool<Vec<EntityKey>> {
        &self.result_pool
    }
}
