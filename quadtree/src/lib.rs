pub mod quadtree;

pub use aoi_common::{Aoi, AoiError, AoiResult, Bounds, EntityKey};
pub use quadtree::{Config, QuadTree, QuadTreeStats, Quadrant, SplitEligibility};
