use aoi_common::Bounds;

/// Child slot of a branch node. North is the lower-y half, y grows southward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Quadrant {
    NorthWest = 0,
    NorthEast = 1,
    SouthWest = 2,
    SouthEast = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    /// Picks the child of `bounds` owning `(x, y)` by comparing against the
    /// centre lines. Points on a centre line go east/south.
    #[inline(always)]
    pub fn of(bounds: &Bounds, x: f64, y: f64) -> Self {
        let (mid_x, mid_y) = bounds.center();
        match (x >= mid_x, y >= mid_y) {
            (false, false) => Quadrant::NorthWest,
            (true, false) => Quadrant::NorthEast,
            (false, true) => Quadrant::SouthWest,
            (true, true) => Quadrant::SouthEast,
        }
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadTreeStats {
    pub entities: usize,
    pub leaf_nodes: usize,
    pub branch_nodes: usize,
    pub max_depth: u32,
}
