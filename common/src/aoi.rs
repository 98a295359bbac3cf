use crate::entity::EntityKey;
use crate::error::AoiResult;
use crate::pool::{ObjectPool, Pooled};

/// Area-of-interest index: "which entities are near (x, y)?".
///
/// Implementations answer with an axis-aligned approximation of nearness
/// (grid neighbourhood or quadtree leaves overlapping a square window), never
/// an exact circular range. Callers needing Euclidean distance must filter the
/// result themselves.
///
/// All methods take `&self` and may be called from many threads at once.
pub trait Aoi: Send + Sync {
    /// Stores `key` at `(x, y)`, overwriting any entry with the same key in
    /// the same partition.
    ///
    /// Re-inserting a key at a different position without first removing it
    /// at the old one leaves an orphaned copy behind.
    fn insert(&self, x: f64, y: f64, key: EntityKey) -> AoiResult<()>;

    /// Removes `key` from the partition owning `(x, y)`. Removing an absent
    /// key succeeds.
    fn remove(&self, x: f64, y: f64, key: &str) -> AoiResult<()>;

    /// Appends the keys near `(x, y)` to `out`, in no particular order.
    fn search_into(&self, x: f64, y: f64, out: &mut Vec<EntityKey>) -> AoiResult<()>;

    fn search(&self, x: f64, y: f64) -> AoiResult<Vec<EntityKey>> {
        let mut out = Vec::new();
        self.search_into(x, y, &mut out)?;
        Ok(out)
    }

    /// Buffers backing [`search_pooled`](Self::search_pooled).
    fn result_pool(&self) -> &ObjectPool<Vec<EntityKey>>;

    /// Search into a recycled buffer that goes back to the index on drop.
    fn search_pooled(&self, x: f64, y: f64) -> AoiResult<Pooled<'_, Vec<EntityKey>>> {
        let mut out = self.result_pool().take();
        self.search_into(x, y, &mut out)?;
        Ok(out)
    }
}
