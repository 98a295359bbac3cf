use aoi_common::Bounds;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GridConfig {
    pub bounds: Bounds,
    /// Cells per axis.
    pub partitions: usize,
    /// Idle search buffers kept for reuse.
    pub pool_size: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            bounds: Bounds::default(),
            partitions: 16,
            pool_size: 64,
        }
    }
}
