//! Tiling generator
//!
//! Decomposes the picture grid into polyomino pieces by seeded region
//! growth. The same parameters always produce the same tiling, so a puzzle
//! can be reproduced from its seed alone.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TilingError};
use crate::piece::{GridCell, PieceDef, PieceId, PieceSet};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TilingParams {
    /// Picture grid width in cells.
    pub cols: u32,
    /// Picture grid height in cells.
    pub rows: u32,
    /// RNG seed; equal seeds give equal tilings.
    pub seed: u32,
    /// Upper bound on cells per piece, 1..=8.
    pub max_piece_cells: u32,
}

impl Default for TilingParams {
    fn default() -> Self {
        Self {
            cols: 6,
            rows: 4,
            seed: 42,
            max_piece_cells: 4,
        }
    }
}

pub struct TilingGenerator {
    params: TilingParams,
    rng_state: u32,
}

impl TilingGenerator {
    pub fn new(params: TilingParams) -> Result<Self> {
        Self::validate_params(&params)?;
        Ok(Self {
            params,
            rng_state: params.seed,
        })
    }

    fn validate_params(params: &TilingParams) -> Result<()> {
        if params.cols < 2 || params.rows < 2 {
            return Err(TilingError::GridTooSmall {
                cols: params.cols,
                rows: params.rows,
            }
            .into());
        }
        if params.max_piece_cells < 1 || params.max_piece_cells > 8 {
            return Err(TilingError::PieceSizeOutOfRange {
                max_piece_cells: params.max_piece_cells,
            }
            .into());
        }
        Ok(())
    }

    // splitmix-style integer hash; the stream must be identical across
    // platforms for seeds to be shareable.
    fn random_u32(&mut self) -> u32 {
        self.rng_state = self.rng_state.wrapping_add(0x9E37_79B9);
        let mut z = self.rng_state;
        z = (z ^ (z >> 16)).wrapping_mul(0x21F0_AAAD);
        z = (z ^ (z >> 15)).wrapping_mul(0x735A_2D97);
        z ^ (z >> 15)
    }

    fn rand_range(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.random_u32() % n
    }

    /// Grow polyomino pieces over the grid and package them as a
    /// [`PieceSet`] carrying `image_ref` for completion passthrough.
    pub fn generate(&mut self, image_ref: impl Into<String>) -> PieceSet {
        let cols = self.params.cols as i32;
        let rows = self.params.rows as i32;
        let mut claimed: Vec<Option<PieceId>> = vec![None; (cols * rows) as usize];
        let mut defs: Vec<PieceDef> = Vec::new();

        let slot = |col: i32, row: i32| (row * cols + col) as usize;

        for row in 0..rows {
            for col in 0..cols {
                if claimed[slot(col, row)].is_some() {
                    continue;
                }

                let id = defs.len() as PieceId;
                let target = self.target_size();
                let mut cells = vec![GridCell::new(col, row)];
                claimed[slot(col, row)] = Some(id);

                while (cells.len() as u32) < target {
                    let frontier = self.unclaimed_neighbors(&cells, &claimed, cols, rows);
                    if frontier.is_empty() {
                        break;
                    }
                    let pick = frontier[self.rand_range(frontier.len() as u32) as usize];
                    claimed[slot(pick.col, pick.row)] = Some(id);
                    cells.push(pick);
                }

                defs.push(PieceDef::from_cells(id, &cells));
            }
        }

        debug!(
            cols = self.params.cols,
            rows = self.params.rows,
            seed = self.params.seed,
            pieces = defs.len(),
            "generated tiling"
        );

        PieceSet::new(self.params.cols, self.params.rows, defs, image_ref.into())
    }

    /// Piece sizes of 1 cell only appear when growth is boxed in, so the
    /// drawn target is at least 2 when the limit allows it.
    fn target_size(&mut self) -> u32 {
        let max = self.params.max_piece_cells;
        if max <= 1 {
            1
        } else {
            2 + self.rand_range(max - 1)
        }
    }

    fn unclaimed_neighbors(
        &self,
        cells: &[GridCell],
        claimed: &[Option<PieceId>],
        cols: i32,
        rows: i32,
    ) -> Vec<GridCell> {
        let mut out: Vec<GridCell> = Vec::new();
        for cell in cells {
            for (dc, dr) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let col = cell.col + dc;
                let row = cell.row + dr;
                if col < 0 || row < 0 || col >= cols || row >= rows {
                    continue;
                }
                if claimed[(row * cols + col) as usize].is_some() {
                    continue;
                }
                if !out.contains(&GridCell::new(col, row)) {
                    out.push(GridCell::new(col, row));
                }
            }
        }
        out
    }
}
