// src/error.rs

use thiserror::Error;

/// 网格/画布配置错误
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("grid of {rows}x{cols} cells exceeds the limit of {max} cells")]
    TooManyCells { rows: usize, cols: usize, max: usize },
    #[error("cell width must be a positive finite number (got {0})")]
    InvalidCellWidth(f64),
    #[error("gap must be a non-negative finite number (got {0})")]
    InvalidGap(f64),
    #[error("surface must be at least 1x1 pixels (got {width}x{height})")]
    EmptySurface { width: usize, height: usize },
}
