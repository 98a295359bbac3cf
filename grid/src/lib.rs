//! Uniform grid AOI index.
//!
//! Splits a square region into a fixed `N×N` array of cells. A search scans
//! the query cell and its up to eight neighbours, a fixed cost independent of
//! how many entities are resident.

pub mod cell;
pub mod config;
pub mod grid;

pub use aoi_common::{Aoi, AoiError, AoiResult, Bounds, EntityKey};
pub use cell::{Cell, CellId};
pub use config::GridConfig;
pub use grid::UniformGrid;
