use crate::error::{AoiError, AoiResult};
use rand::Rng;

/// A square region of the plane, anchored at its minimum corner.
///
/// Containment is half-open on both axes, `[x, x + width) × [y, y + width)`,
/// so a point on an edge shared by two regions belongs to exactly one of them.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64) -> AoiResult<Self> {
        let bounds = Self { x, y, width };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> AoiResult<()> {
        let finite = self.x.is_finite() && self.y.is_finite() && self.width.is_finite();
        // Extent must survive addition to the origin, or no point is contained.
        if !finite || self.width <= 0.0 || self.max_x() <= self.x || self.max_y() <= self.y {
            return Err(AoiError::InvalidBounds {
                x: self.x,
                y: self.y,
                width: self.width,
            });
        }
        Ok(())
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.width
    }

    pub fn center(&self) -> (f64, f64) {
        let half = self.width / 2.0;
        (self.x + half, self.y + half)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.max_x() && y >= self.y && y < self.max_y()
    }

    /// Like [`contains`](Self::contains) but reports the failure as an error.
    pub fn ensure_contains(&self, x: f64, y: f64) -> AoiResult<()> {
        if self.contains(x, y) {
            return Ok(());
        }
        tracing::trace!(x, y, bounds = ?self, "coordinate outside region");
        Err(AoiError::OutOfBounds {
            x,
            y,
            min_x: self.x,
            min_y: self.y,
            max_x: self.max_x(),
            max_y: self.max_y(),
        })
    }

    /// Closed window against half-open bounds.
    pub fn overlaps(&self, window: &Window) -> bool {
        window.min_x < self.max_x()
            && window.max_x >= self.x
            && window.min_y < self.max_y()
            && window.max_y >= self.y
    }

    /// The four equal child squares in NW, NE, SW, SE order. North is the
    /// lower-y half.
    pub fn quadrants(&self) -> [Bounds; 4] {
        let half = self.width / 2.0;
        let (mid_x, mid_y) = self.center();
        [
            Bounds { x: self.x, y: self.y, width: half },
            Bounds { x: mid_x, y: self.y, width: half },
            Bounds { x: self.x, y: mid_y, width: half },
            Bounds { x: mid_x, y: mid_y, width: half },
        ]
    }

    pub fn random_point<R: Rng>(&self, rng: &mut R) -> (f64, f64) {
        (
            rng.gen_range(self.x..self.max_x()),
            rng.gen_range(self.y..self.max_y()),
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 256.0,
        }
    }
}

/// Axis-aligned query window, closed on every side.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Window {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Window {
    pub fn around(x: f64, y: f64, radius: f64) -> Self {
        Self {
            min_x: x - radius,
            min_y: y - radius,
            max_x: x + radius,
            max_y: y + radius,
        }
    }
}
