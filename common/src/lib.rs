pub mod aoi;
pub mod bounds;
pub mod entity;
pub mod error;
pub mod pool;

pub use aoi::Aoi;
pub use bounds::{Bounds, Window};
pub use entity::{Entity, EntityKey, EntityStore};
pub use error::{AoiError, AoiResult};
pub use pool::{ObjectPool, Pooled, Resettable};
