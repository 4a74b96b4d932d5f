//! Collision classification of the level's tile layer.
//!
//! The grid is row-major, addressed by integer tile coordinates, and never
//! changes while the simulation runs. Level loads and hot reloads build a
//! fresh grid and swap it in wholesale.

use crate::error::GridError;

/// Tiled gid flip flags. Masked off before a gid is inspected.
pub const GID_FLIP_H: u32 = 0x8000_0000;
pub const GID_FLIP_V: u32 = 0x4000_0000;
pub const GID_FLIP_D: u32 = 0x2000_0000;
pub const GID_MASK: u32 = !(GID_FLIP_H | GID_FLIP_V | GID_FLIP_D);

#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TileKind {
    #[default]
    Empty = 0,
    /// Blocks from every direction.
    Solid = 1,
    /// Blocks only a body that lands on it from above.
    OneWay = 2,
}

impl TileKind {
    /// Legacy integer codes: negative is empty, `1` is one-way, `0` and
    /// anything `>= 2` is solid.
    pub fn from_code(code: i32) -> Self {
        match code {
            c if c < 0 => TileKind::Empty,
            1 => TileKind::OneWay,
            _ => TileKind::Solid,
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' | ' ' => Some(TileKind::Empty),
            '#' => Some(TileKind::Solid),
            '=' | '-' => Some(TileKind::OneWay),
            _ => None,
        }
    }
}

/// One tile layer of raw gids feeding [`TileGrid::from_layers`].
#[derive(Copy, Clone, Debug)]
pub struct CollisionLayer<'a> {
    pub kind: TileKind,
    pub gids: &'a [u32],
}

#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    cols: i32,
    rows: i32,
    tile_size: f32,
    cells: Vec<TileKind>,
}

impl TileGrid {
    pub fn new(cols: i32, rows: i32, tile_size: f32, cells: Vec<TileKind>) -> Result<Self, GridError> {
        if cols <= 0 || rows <= 0 {
            return Err(GridError::Dimensions { cols, rows });
        }
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(GridError::TileSize(tile_size));
        }
        let expected = cols as usize * rows as usize;
        if cells.len() != expected {
            return Err(GridError::CellCount {
                expected,
                actual: cells.len(),
            });
        }

        let grid = Self {
            cols,
            rows,
            tile_size,
            cells,
        };
        let (solids, oneways) = grid.counts();
        log::debug!(
            "collision grid built: {}x{} tiles @ {}px, solids={}, oneways={}",
            cols,
            rows,
            tile_size,
            solids,
            oneways
        );
        Ok(grid)
    }

    /// An all-empty grid, mostly useful as a starting point for [`TileGrid::set`].
    pub fn empty(cols: i32, rows: i32, tile_size: f32) -> Result<Self, GridError> {
        let count = cols.max(0) as usize * rows.max(0) as usize;
        Self::new(cols, rows, tile_size, vec![TileKind::Empty; count])
    }

    pub fn from_codes(cols: i32, rows: i32, tile_size: f32, codes: &[i32]) -> Result<Self, GridError> {
        let cells = codes.iter().copied().map(TileKind::from_code).collect();
        Self::new(cols, rows, tile_size, cells)
    }

    /// Text layout, one string per row: `.` empty, `#` solid, `=` one-way.
    pub fn from_ascii<S: AsRef<str>>(tile_size: f32, rows: &[S]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        let mut cells = Vec::with_capacity(width * rows.len());

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let actual = line.chars().count();
            if actual != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let kind = TileKind::from_glyph(glyph).ok_or(GridError::Glyph { glyph, row, col })?;
                cells.push(kind);
            }
        }

        Self::new(width as i32, rows.len() as i32, tile_size, cells)
    }

    /// Comma-separated legacy codes, one line per row. Blank lines are
    /// skipped; empty or unparsable cells count as empty.
    pub fn from_csv(tile_size: f32, text: &str) -> Result<Self, GridError> {
        let mut cols = 0usize;
        let mut rows = 0usize;
        let mut cells = Vec::new();

        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let before = cells.len();
            cells.extend(
                line.split(',')
                    .map(|cell| cell.trim().parse::<i32>().map_or(TileKind::Empty, TileKind::from_code)),
            );
            let actual = cells.len() - before;
            if rows == 0 {
                cols = actual;
            } else if actual != cols {
                return Err(GridError::RaggedRow {
                    row: rows,
                    expected: cols,
                    actual,
                });
            }
            rows += 1;
        }

        Self::new(cols as i32, rows as i32, tile_size, cells)
    }

    /// Builds the collision grid from tile layers of raw gids. Layers are
    /// applied in order, so a later layer overrides an earlier one.
    pub fn from_layers(
        cols: i32,
        rows: i32,
        tile_size: f32,
        layers: &[CollisionLayer<'_>],
    ) -> Result<Self, GridError> {
        let mut grid = Self::empty(cols, rows, tile_size)?;
        for layer in layers {
            for (cell, gid) in grid.cells.iter_mut().zip(layer.gids) {
                if gid & GID_MASK != 0 {
                    *cell = layer.kind;
                }
            }
        }

        let (solids, oneways) = grid.counts();
        log::debug!("collision layers applied: solids={}, oneways={}", solids, oneways);
        if solids == 0 && oneways == 0 {
            return Err(GridError::NoCollisionTiles);
        }
        Ok(grid)
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    #[inline]
    fn index(&self, tx: i32, ty: i32) -> Option<usize> {
        if tx < 0 || ty < 0 || tx >= self.cols || ty >= self.rows {
            return None;
        }
        Some(ty as usize * self.cols as usize + tx as usize)
    }

    /// Out-of-range coordinates are always empty so nothing is trapped at
    /// the world edge.
    #[inline]
    pub fn classify(&self, tx: i32, ty: i32) -> TileKind {
        self.index(tx, ty).map_or(TileKind::Empty, |i| self.cells[i])
    }

    #[inline]
    pub fn solid_at(&self, tx: i32, ty: i32) -> bool {
        self.classify(tx, ty) == TileKind::Solid
    }

    #[inline]
    pub fn oneway_at(&self, tx: i32, ty: i32) -> bool {
        self.classify(tx, ty) == TileKind::OneWay
    }

    /// Tile coordinate containing world coordinate `v`.
    #[inline]
    pub fn tile_floor(&self, v: f32) -> i32 {
        (v / self.tile_size).floor() as i32
    }

    /// Returns false when the coordinate is outside the grid.
    pub fn set(&mut self, tx: i32, ty: i32, kind: TileKind) -> bool {
        match self.index(tx, ty) {
            Some(i) => {
                self.cells[i] = kind;
                true
            }
            None => false,
        }
    }

    /// `(solid, one_way)` cell counts.
    pub fn counts(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(s, o), kind| match kind {
            TileKind::Solid => (s + 1, o),
            TileKind::OneWay => (s, o + 1),
            TileKind::Empty => (s, o),
        })
    }
}
