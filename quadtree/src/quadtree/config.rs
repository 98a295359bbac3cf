use aoi_common::{AoiError, AoiResult, Bounds};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Config {
    /// Entities a leaf holds before a split is considered.
    pub max_capacity: usize,
    /// Depth of the deepest node allowed; the root is depth 1.
    pub max_depth: u32,
    /// Half-width of the square search window.
    pub radius: f64,
    pub split_eligibility: SplitEligibility,
    /// Idle entity stores and result buffers kept for reuse.
    pub pool_size: usize,
}

impl Config {
    pub fn validate(&self) -> AoiResult<()> {
        if self.max_capacity == 0 {
            return Err(AoiError::InvalidCapacity {
                capacity: self.max_capacity,
            });
        }
        if self.max_depth == 0 {
            return Err(AoiError::InvalidDepth {
                depth: self.max_depth,
            });
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(AoiError::InvalidRadius {
                radius: self.radius,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_capacity: 500,
            max_depth: 4,
            radius: 16.0,
            split_eligibility: SplitEligibility::default(),
            pool_size: 64,
        }
    }
}

/// Which leaves may split once they are over capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SplitEligibility {
    /// Only leaves whose centre has strictly positive x and y. Regions centred
    /// at or below the origin never split and so get no capacity protection.
    #[default]
    PositiveCenter,
    /// Any leaf.
    Anywhere,
}

impl SplitEligibility {
    pub fn allows(self, bounds: &Bounds) -> bool {
        match self {
            SplitEligibility::PositiveCenter => {
                let (center_x, center_y) = bounds.center();
                center_x > 0.0 && center_y > 0.0
            }
            SplitEligibility::Anywhere => true,
        }
    }
}
