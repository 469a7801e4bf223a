//! # Pictomino
//!
//! Piece-grouping and spatial-interaction engine for picture-reconstruction
//! polyomino puzzles. Players drag polyomino-shaped picture fragments around
//! an unbounded 2D world; fragments placed next to their correct neighbors
//! within a snap tolerance merge into rigid groups, until a single group
//! holds every piece and the picture is complete.
//!
//! ## Architecture
//!
//! Pictomino is organized as a workspace with multiple crates:
//!
//! 1. **pictomino-core** - Geometry primitives, piece model, tiling
//!    generator, error types, event bus
//! 2. **pictomino-engine** - Piece store, spawn placement, grouping and
//!    snap engine, batch progress tracking, viewport, session facade
//! 3. **pictomino** - Root crate that integrates the workspace and ships a
//!    headless demo binary
//!
//! ## Features
//!
//! - **Rigid grouping**: merged pieces move as one, with exact snap
//!   alignment on merge
//! - **Staged spawning**: pieces arrive in batches of five, the next batch
//!   gated on assembling the previous ones
//! - **Host-driven**: no internal threads; the host feeds pointer input and
//!   clock ticks, and renders from the engine's state
//! - **Deterministic tiling**: seeded polyomino decomposition of the
//!   picture grid

pub use pictomino_core as core;
pub use pictomino_engine as engine;

pub use pictomino_core::{
    are_neighbors, expected_offset, Error, EventBus, EventBusConfig, EventCategory, EventFilter,
    GridCell, InteractionEvent, PieceDef, PieceId, PieceSet, Point, ProgressEvent, PuzzleEvent,
    Rect, Result, SessionEvent, SubscriptionId, TilingGenerator, TilingParams, Vec2,
};

pub use pictomino_engine::{
    BoardParams, MismatchHint, PieceState, PieceStore, ProgressReport, PuzzleSession,
    SessionTuning, Viewport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
