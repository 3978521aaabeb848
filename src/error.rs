//! Error type shared by generation, layout and settings loading

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MazeError {
    #[error("Maze needs at least one row and one column, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("Cell size must be positive, got {unit_width}x{unit_height}")]
    InvalidCellSize { unit_width: f32, unit_height: f32 },

    #[error("Setting `{name}` is out of range: {value}")]
    InvalidSetting { name: &'static str, value: f32 },

    #[error("Start cell ({row}, {column}) lies outside a {rows}x{columns} grid")]
    StartOutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    /// The carving pass left cells behind. This is a generator defect, never
    /// a user error.
    #[error("Maze generation left {unvisited} cell(s) unvisited")]
    IncompleteGeneration { unvisited: usize },

    #[error("Settings file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MazeError>;
