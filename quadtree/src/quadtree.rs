mod config;
mod node;
mod types;

pub use config::{Config, SplitEligibility};
pub use types::{QuadTreeStats, Quadrant};

use aoi_common::{Aoi, AoiResult, Bounds, EntityKey, EntityStore, ObjectPool, Window};
use node::Node;

/// Adaptive quadtree AOI index.
///
/// Starts as a single leaf covering `bounds`. A leaf that would exceed
/// `max_capacity` splits into four quadrants, down to `max_depth`. Nodes never
/// merge back. A search returns every key of every leaf overlapping the square
/// window `[x - radius, x + radius]²`, so precision is bounded by leaf size.
#[derive(Debug)]
pub struct QuadTree {
    root: Node,
    config: Config,
    store_pool: ObjectPool<EntityStore>,
    result_pool: ObjectPool<Vec<EntityKey>>,
}

impl QuadTree {
    pub fn new(bounds: Bounds) -> AoiResult<Self> {
        Self::new_with_config(bounds, Config::default())
    }

    pub fn new_with_config(bounds: Bounds, config: Config) -> AoiResult<Self> {
        bounds.validate()?;
        config.validate()?;
        tracing::debug!(
            x = bounds.x,
            y = bounds.y,
            width = bounds.width,
            max_capacity = config.max_capacity,
            max_depth = config.max_depth,
            radius = config.radius,
            "created quadtree"
        );
        Ok(Self {
            root: Node::new_leaf(bounds, 1, EntityStore::new()),
            store_pool: ObjectPool::new(config.pool_size),
            result_pool: ObjectPool::new(config.pool_size),
            config,
        })
    }

    pub fn bounds(&self) -> Bounds {
        self.root.bounds
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Snapshot of the tree shape. Under concurrent writes the counts are
    /// best effort.
    pub fn stats(&self) -> QuadTreeStats {
        let mut stats = QuadTreeStats::default();
        self.root.accumulate_stats(&mut stats);
        stats
    }

    /// Bounds of every node, pre-order from the root.
    pub fn node_bounds(&self, bounds: &mut Vec<Bounds>) {
        self.root.all_bounds(bounds);
    }

    pub fn len(&self) -> usize {
        self.stats().entities
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Aoi for QuadTree {
    fn insert(&self, x: f64, y: f64, key: EntityKey) -> AoiResult<()> {
        self.root.bounds.ensure_contains(x, y)?;
        self.root.insert(x, y, key, &self.config, &self.store_pool);
        Ok(())
    }

    fn remove(&self, x: f64, y: f64, key: &str) -> AoiResult<()> {
        self.root.bounds.ensure_contains(x, y)?;
        self.root.remove(x, y, key);
        Ok(())
    }

    fn search_into(&self, x: f64, y: f64, out: &mut Vec<EntityKey>) -> AoiResult<()> {
        self.root.bounds.ensure_contains(x, y)?;
        let window = Window::around(x, y, self.config.radius);
        self.root.collect_keys(&window, out);
        Ok(())
    }

    fn result_pool(&self) -> &ObjectPool<Vec<EntityKey>> {
        &self.result_pool
    }
}
