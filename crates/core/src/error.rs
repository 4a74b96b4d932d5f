use thiserror::Error;

/// Problems found while building a [`crate::TileGrid`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {cols}x{rows}")]
    Dimensions { cols: i32, rows: i32 },

    #[error("tile size must be positive and finite, got {0}")]
    TileSize(f32),

    #[error("expected {expected} cells, got {actual}")]
    CellCount { expected: usize, actual: usize },

    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unknown tile glyph {glyph:?} at row {row}, column {col}")]
    Glyph { glyph: char, row: usize, col: usize },

    #[error("collision layers contain no solid or one-way tiles")]
    NoCollisionTiles,
}

/// Invalid motion parameters or actor setup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parameter `{name}` must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("jump_vel points upward and must be <= 0, got {0}")]
    JumpVel(f32),

    #[error("jump_cut_factor must be within [0, 1], got {0}")]
    JumpCut(f32),

    #[error("actor half extents must be positive, got {half_w}x{half_h}")]
    HalfExtents { half_w: f32, half_h: f32 },

    #[error("actor position must be finite, got ({x}, {y})")]
    Position { x: f32, y: f32 },

    #[error("invalid params json: {0}")]
    Json(#[from] serde_json::Error),
}
