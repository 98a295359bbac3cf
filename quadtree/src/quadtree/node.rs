use super::config::Config;
use super::types::{QuadTreeStats, Quadrant};
use aoi_common::{Bounds, Entity, EntityKey, EntityStore, ObjectPool, Window};
use parking_lot::RwLock;
use std::sync::OnceLock;

#[derive(Debug)]
pub(crate) enum NodeState {
    Leaf(EntityStore),
    Branch,
}

/// One square of the tree.
///
/// `state` flips from `Leaf` to `Branch` exactly once, under its write lock,
/// and only after `children` has been populated and published. Per-key work
/// on a leaf holds the read lock, so it either finishes before a split starts
/// (and its entity is moved along) or observes `Branch` and re-routes.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) bounds: Bounds,
    pub(crate) depth: u32,
    pub(crate) state: RwLock<NodeState>,
    pub(crate) children: OnceLock<Box<[Node; 4]>>,
}

impl Node {
    pub(crate) fn new_leaf(bounds: Bounds, depth: u32, store: EntityStore) -> Self {
        Self {
            bounds,
            depth,
            state: RwLock::new(NodeState::Leaf(store)),
            children: OnceLock::new(),
        }
    }

    #[inline(always)]
    pub(crate) fn child(&self, x: f64, y: f64) -> Option<&Node> {
        self.children
            .get()
            .map(|children| &children[Quadrant::of(&self.bounds, x, y).index()])
    }

    /// Capacity, depth and eligibility check. Racy by nature: another thread
    /// may store into the leaf right after this returns.
    pub(crate) fn needs_split(&self, config: &Config) -> bool {
        if self.depth + 1 > config.max_depth || !config.split_eligibility.allows(&self.bounds) {
            return false;
        }
        match &*self.state.read() {
            NodeState::Leaf(store) => store.len() + 1 > config.max_capacity,
            NodeState::Branch => false,
        }
    }

    /// Turns this leaf into a branch with four fresh leaves and moves every
    /// resident entity into the one that contains it. Returns `false` if some
    /// other thread got there first.
    pub(crate) fn split(&self, pool: &ObjectPool<EntityStore>) -> bool {
        let mut state = self.state.write();
        let store = match std::mem::replace(&mut *state, NodeState::Branch) {
            NodeState::Leaf(store) => store,
            NodeState::Branch => return false,
        };

        let stores: [EntityStore; 4] = std::array::from_fn(|_| pool.get());
        let mut moved = 0usize;
        store.for_each(|entity| {
            stores[Quadrant::of(&self.bounds, entity.x, entity.y).index()].store(entity.clone());
            moved += 1;
        });

        let depth = self.depth + 1;
        let [nw, ne, sw, se] = self.bounds.quadrants();
        let [nw_store, ne_store, sw_store, se_store] = stores;
        let children = Box::new([
            Node::new_leaf(nw, depth, nw_store),
            Node::new_leaf(ne, depth, ne_store),
            Node::new_leaf(sw, depth, sw_store),
            Node::new_leaf(se, depth, se_store),
        ]);
        // The state was Leaf until a moment ago, so children cannot be set yet.
        let published = self.children.set(children).is_ok();
        debug_assert!(published, "leaf node already had children");
        if !published {
            tracing::error!(
                depth = self.depth,
                x = self.bounds.x,
                y = self.bounds.y,
                width = self.bounds.width,
                moved,
                "leaf node already had children, redistributed entities dropped"
            );
        }
        pool.return_object(store);

        tracing::debug!(
            depth = self.depth,
            x = self.bounds.x,
            y = self.bounds.y,
            width = self.bounds.width,
            moved,
            "split quadtree node"
        );
        true
    }

    pub(crate) fn insert(
        &self,
        x: f64,
        y: f64,
        key: EntityKey,
        config: &Config,
        pool: &ObjectPool<EntityStore>,
    ) {
        let mut node = self;
        loop {
            if let Some(child) = node.child(x, y) {
                node = child;
                continue;
            }
            if node.needs_split(config) {
                node.split(pool);
                continue;
            }
            if let NodeState::Leaf(store) = &*node.state.read() {
                store.store(Entity::new(x, y, key));
                return;
            }
            // Split landed between the check and the lock; children are set now.
        }
    }

    pub(crate) fn remove(&self, x: f64, y: f64, key: &str) {
        let mut node = self;
        loop {
            if let Some(child) = node.child(x, y) {
                node = child;
                continue;
            }
            if let NodeState::Leaf(store) = &*node.state.read() {
                store.remove(key);
                return;
            }
        }
    }

    /// Appends every key of every leaf overlapping `window`. Leaves are not
    /// clipped against the window.
    pub(crate) fn collect_keys(&self, window: &Window, out: &mut Vec<EntityKey>) {
        loop {
            if let Some(children) = self.children.get() {
                for child in children.iter().filter(|child| child.bounds.overlaps(window)) {
                    child.collect_keys(window, out);
                }
                return;
            }
            if let NodeState::Leaf(store) = &*self.state.read() {
                store.collect_keys(out);
                return;
            }
        }
    }

    pub(crate) fn accumulate_stats(&self, stats: &mut QuadTreeStats) {
        stats.max_depth = stats.max_depth.max(self.depth);
        if let Some(children) = self.children.get() {
            stats.branch_nodes += 1;
            for child in children.iter() {
                child.accumulate_stats(stats);
            }
            return;
        }
        stats.leaf_nodes += 1;
        if let NodeState::Leaf(store) = &*self.state.read() {
            stats.entities += store.len();
        }
    }

    pub(crate) fn all_bounds(&self, bounds: &mut Vec<Bounds>) {
        bounds.push(self.bounds);
        if let Some(children) = self.children.get() {
            for child in children.iter() {
                child.all_bounds(bounds);
            }
        }
    }
}
