//! Error handling for Pictomino
//!
//! Provides error types for the boundaries that can actually fail:
//! - Tiling errors (generator parameters, coverage violations)
//! - Session errors (definition sets and board parameters rejected at
//!   construction)
//!
//! Normal interactive operation never returns an error; degenerate inputs
//! are handled as early-return no-ops. All error types use `thiserror`.

use thiserror::Error;

/// Tiling error type
///
/// Represents errors from the polyomino tiling generator: rejected
/// parameters and definition sets that fail the coverage invariant.
#[derive(Error, Debug, Clone)]
pub enum TilingError {
    /// Grid too small to tile
    #[error("Grid {cols}x{rows} is too small; need at least 2x2")]
    GridTooSmall {
        /// Requested column count.
        cols: u32,
        /// Requested row count.
        rows: u32,
    },

    /// Piece size limit out of range
    #[error("Max piece cells {max_piece_cells} out of range 1..=8")]
    PieceSizeOutOfRange {
        /// Requested per-piece cell limit.
        max_piece_cells: u32,
    },

    /// A grid cell is covered by more than one piece
    #[error("Cell ({col}, {row}) covered by pieces {first} and {second}")]
    OverlappingCoverage {
        /// Column of the doubly covered cell.
        col: i32,
        /// Row of the doubly covered cell.
        row: i32,
        /// Id of the first covering piece.
        first: u32,
        /// Id of the second covering piece.
        second: u32,
    },

    /// A grid cell is covered by no piece
    #[error("Cell ({col}, {row}) is not covered by any piece")]
    UncoveredCell {
        /// Column of the uncovered cell.
        col: i32,
        /// Row of the uncovered cell.
        row: i32,
    },

    /// A piece's coverage falls outside the grid
    #[error("Piece {id} covers ({col}, {row}), outside the {cols}x{rows} grid")]
    CoverageOutOfGrid {
        /// Id of the offending piece.
        id: u32,
        /// Column of the out-of-grid cell.
        col: i32,
        /// Row of the out-of-grid cell.
        row: i32,
        /// Grid column count.
        cols: u32,
        /// Grid row count.
        rows: u32,
    },
}

/// Session error type
///
/// Represents errors raised when a puzzle session is constructed from a
/// definition set, board parameters, and tuning.
#[derive(Error, Debug, Clone)]
pub enum SessionError {
    /// Definition set has no pieces
    #[error("Definition set is empty")]
    EmptyPieceSet,

    /// Duplicate piece id in the definition set
    #[error("Duplicate piece id {id} in definition set")]
    DuplicatePieceId {
        /// The duplicated id.
        id: u32,
    },

    /// Board cell size must be positive
    #[error("Block size {block_w}x{block_h} must be positive")]
    InvalidBlockSize {
        /// Configured cell width in world pixels.
        block_w: f64,
        /// Configured cell height in world pixels.
        block_h: f64,
    },

    /// Snap threshold must be positive
    #[error("Snap threshold {threshold} must be positive")]
    InvalidSnapThreshold {
        /// Configured snap threshold in world pixels.
        threshold: f64,
    },

    /// Tuning rejected
    #[error("Invalid tuning: {reason}")]
    InvalidTuning {
        /// The reason the tuning was rejected.
        reason: String,
    },
}

/// Main error type for Pictomino
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Tiling error
    #[error(transparent)]
    Tiling(#[from] TilingError),

    /// Session error
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a tiling error
    pub fn is_tiling_error(&self) -> bool {
        matches!(self, Error::Tiling(_))
    }

    /// Check if this is a session error
    pub fn is_session_error(&self) -> bool {
        matches!(self, Error::Session(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
