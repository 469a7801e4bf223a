//! Piece model: polyomino definitions over the picture grid.
//!
//! A definition describes one fragment's static shape; where the fragment
//! currently sits in the world is runtime state owned by the engine crate.
//! Definitions come from the tiling generator and together cover the
//! picture grid exactly once.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{Result, SessionError, TilingError};
use crate::geometry::{Point, Rect, Vec2};

/// Identifier of a piece, unique within a definition set.
pub type PieceId = u32;

/// Identifier of a group of merged pieces. Initially every piece is its own
/// group with `group id == piece id`; merging rewrites the id on every
/// member of the absorbed group.
pub type GroupId = u32;

/// A cell address in the picture grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    /// Column, increasing rightwards.
    pub col: i32,
    /// Row, increasing downwards.
    pub row: i32,
}

impl GridCell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// Static shape of one polyomino fragment.
///
/// `cells` are offsets from `origin`, the top-left corner of the coverage's
/// bounding extent in the picture grid. Width and height are the tight
/// extent of the coverage in cells and are derived at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceDef {
    id: PieceId,
    origin: GridCell,
    cells: SmallVec<[GridCell; 4]>,
    width_cells: u32,
    height_cells: u32,
}

impl PieceDef {
    /// Build a definition from the absolute grid cells the piece covers.
    ///
    /// The origin becomes the top-left corner of the coverage's bounding
    /// extent and `cells` are stored relative to it.
    pub fn from_cells(id: PieceId, covered: &[GridCell]) -> Self {
        debug_assert!(!covered.is_empty(), "piece {id} must cover at least one cell");

        let min_col = covered.iter().map(|c| c.col).min().unwrap_or(0);
        let min_row = covered.iter().map(|c| c.row).min().unwrap_or(0);
        let max_col = covered.iter().map(|c| c.col).max().unwrap_or(0);
        let max_row = covered.iter().map(|c| c.row).max().unwrap_or(0);

        let cells = covered
            .iter()
            .map(|c| GridCell::new(c.col - min_col, c.row - min_row))
            .collect();

        Self {
            id,
            origin: GridCell::new(min_col, min_row),
            cells,
            width_cells: (max_col - min_col + 1) as u32,
            height_cells: (max_row - min_row + 1) as u32,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Top-left corner of the coverage extent in picture-grid coordinates.
    pub fn origin(&self) -> GridCell {
        self.origin
    }

    /// Covered cells as offsets from the extent origin.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn width_cells(&self) -> u32 {
        self.width_cells
    }

    pub fn height_cells(&self) -> u32 {
        self.height_cells
    }

    /// Covered cells in absolute picture-grid coordinates.
    pub fn absolute_cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.cells
            .iter()
            .map(|c| GridCell::new(self.origin.col + c.col, self.origin.row + c.row))
    }

    /// World-space bounding rectangle of the piece placed at `position`.
    pub fn bounds_at(&self, position: Point, block_w: f64, block_h: f64) -> Rect {
        Rect::new(
            position.x,
            position.y,
            self.width_cells as f64 * block_w,
            self.height_cells as f64 * block_h,
        )
    }

    /// Cell-precise containment test for a world point against the piece
    /// placed at `position`. Unlike the bounding box this respects holes in
    /// L- and T-shaped coverage.
    pub fn covers_world(&self, position: Point, world: Point, block_w: f64, block_h: f64) -> bool {
        let col = ((world.x - position.x) / block_w).floor() as i64;
        let row = ((world.y - position.y) / block_h).floor() as i64;
        self.cells
            .iter()
            .any(|c| i64::from(c.col) == col && i64::from(c.row) == row)
    }
}

/// World-space offset piece `b`'s origin should have from piece `a`'s
/// origin when both sit correctly in the assembled picture.
pub fn expected_offset(a: &PieceDef, b: &PieceDef, block_w: f64, block_h: f64) -> Vec2 {
    Vec2::new(
        (b.origin.col - a.origin.col) as f64 * block_w,
        (b.origin.row - a.origin.row) as f64 * block_h,
    )
}

/// Neighbor test: true when the actual relative offset between two placed
/// pieces is within `snap_threshold` of the expected one.
///
/// This is a global tolerance test over the whole picture, not restricted
/// to grid-adjacent pieces: two fragments from opposite corners match as
/// soon as their relative placement is correct within the threshold.
pub fn are_neighbors(
    a: &PieceDef,
    pos_a: Point,
    b: &PieceDef,
    pos_b: Point,
    block_w: f64,
    block_h: f64,
    snap_threshold: f64,
) -> bool {
    snap_distance(a, pos_a, b, pos_b, block_w, block_h) < snap_threshold
}

/// Distance between the actual and the expected relative offset of two
/// placed pieces. Zero means perfect alignment.
pub fn snap_distance(
    a: &PieceDef,
    pos_a: Point,
    b: &PieceDef,
    pos_b: Point,
    block_w: f64,
    block_h: f64,
) -> f64 {
    let actual = pos_a.vector_to(&pos_b);
    let expected = expected_offset(a, b, block_w, block_h);
    actual.minus(expected).length()
}

/// A complete definition set for one picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceSet {
    cols: u32,
    rows: u32,
    defs: Vec<PieceDef>,
    image_ref: String,
}

impl PieceSet {
    pub fn new(cols: u32, rows: u32, defs: Vec<PieceDef>, image_ref: String) -> Self {
        Self {
            cols,
            rows,
            defs,
            image_ref,
        }
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn defs(&self) -> &[PieceDef] {
        &self.defs
    }

    pub fn def(&self, id: PieceId) -> Option<&PieceDef> {
        self.defs.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Opaque reference to the target picture, passed through untouched on
    /// completion.
    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    /// Check the tiling invariant: ids unique, every grid cell covered by
    /// exactly one piece, nothing outside the grid.
    pub fn validate(&self) -> Result<()> {
        if self.defs.is_empty() {
            return Err(SessionError::EmptyPieceSet.into());
        }

        let mut coverage: HashMap<GridCell, PieceId> = HashMap::new();
        let mut ids: HashMap<PieceId, ()> = HashMap::new();

        for def in &self.defs {
            if ids.insert(def.id, ()).is_some() {
                return Err(SessionError::DuplicatePieceId { id: def.id }.into());
            }
            for cell in def.absolute_cells() {
                if cell.col < 0
                    || cell.row < 0
                    || cell.col >= self.cols as i32
                    || cell.row >= self.rows as i32
                {
                    return Err(TilingError::CoverageOutOfGrid {
                        id: def.id,
                        col: cell.col,
                        row: cell.row,
                        cols: self.cols,
                        rows: self.rows,
                    }
                    .into());
                }
                if let Some(first) = coverage.insert(cell, def.id) {
                    return Err(TilingError::OverlappingCoverage {
                        col: cell.col,
                        row: cell.row,
                        first,
                        second: def.id,
                    }
                    .into());
                }
            }
        }

        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                if !coverage.contains_key(&GridCell::new(col, row)) {
                    return Err(TilingError::UncoveredCell { col, row }.into());
                }
            }
        }

        Ok(())
    }
}
