use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AoiError {
    #[error(
        "coordinate must lie within the indexed region (x: {x}, y: {y}, min_x: {min_x}, min_y: {min_y}, max_x: {max_x}, max_y: {max_y})"
    )]
    OutOfBounds {
        x: f64,
        y: f64,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },
    #[error("region origin must be finite and width positive (x: {x}, y: {y}, width: {width})")]
    InvalidBounds { x: f64, y: f64, width: f64 },
    #[error("grid must have at least one partition per axis (partitions: {partitions})")]
    InvalidPartitionCount { partitions: usize },
    #[error("node capacity must be at least 1 (capacity: {capacity})")]
    InvalidCapacity { capacity: usize },
    #[error("max depth must be at least 1 (depth: {depth})")]
    InvalidDepth { depth: u32 },
    #[error("query radius must be finite and non-negative (radius: {radius})")]
    InvalidRadius { radius: f64 },
}

pub type AoiResult<T> = Result<T, AoiError>;
