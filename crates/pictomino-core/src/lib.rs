//! # Pictomino Core
//!
//! Core types and utilities for the Pictomino puzzle engine.
//! Provides the geometry primitives, the polyomino piece model, the seeded
//! tiling generator, error types, and the event bus.

pub mod error;
pub mod event_bus;
pub mod geometry;
pub mod piece;
pub mod tiling;

pub use error::{Error, Result, SessionError, TilingError};

pub use geometry::{screen_to_world, union_bounds, world_to_screen, Point, Rect, Vec2};

pub use piece::{
    are_neighbors, expected_offset, snap_distance, GridCell, GroupId, PieceDef, PieceId, PieceSet,
};

pub use tiling::{TilingGenerator, TilingParams};

// Re-export event bus for convenience
pub use event_bus::{
    EventBus, EventBusConfig, EventCategory, EventFilter, InteractionEvent, ProgressEvent,
    PuzzleEvent, SessionEvent, SubscriptionId,
};
