//! Grid cells.

use aoi_common::{Bounds, EntityStore};

/// Row-major cell index, `gy * partitions + gx`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(pub usize);

/// A cell and the entities resident in it.
#[derive(Debug)]
pub struct Cell {
    pub id: CellId,
    pub bounds: Bounds,
    pub(crate) entities: EntityStore,
}

impl Cell {
    #[must_use]
    pub fn new(id: CellId, bounds: Bounds) -> Self {
        Self {
            id,
            bounds,
            entities: EntityStore::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
