//! Event type definitions for the event bus.
//!
//! This module defines all engine events organized by category.
//! Events are designed to be cloneable and serializable for logging/replay.

use serde::{Deserialize, Serialize};

use crate::piece::{GroupId, PieceId};

/// Root event enum for all engine events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PuzzleEvent {
    /// Session lifecycle events
    Session(SessionEvent),
    /// Assembly progress events
    Progress(ProgressEvent),
    /// Pointer interaction events
    Interaction(InteractionEvent),
}

impl PuzzleEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            PuzzleEvent::Session(_) => EventCategory::Session,
            PuzzleEvent::Progress(_) => EventCategory::Progress,
            PuzzleEvent::Interaction(_) => EventCategory::Interaction,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            PuzzleEvent::Session(e) => e.description(),
            PuzzleEvent::Progress(e) => e.description(),
            PuzzleEvent::Interaction(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Session lifecycle events.
    Session,
    /// Assembly progress events.
    Progress,
    /// Pointer interaction events.
    Interaction,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Session => write!(f, "Session"),
            EventCategory::Progress => write!(f, "Progress"),
            EventCategory::Interaction => write!(f, "Interaction"),
        }
    }
}

/// Session lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A session was constructed and its first batch spawned.
    Started {
        /// Total number of pieces in the definition set.
        pieces: usize,
        /// Picture grid width in cells.
        cols: u32,
        /// Picture grid height in cells.
        rows: u32,
    },
    /// The host cancelled interaction (focus or visibility loss); any
    /// active drag was finalized as a normal drop.
    InteractionCancelled,
}

impl SessionEvent {
    fn description(&self) -> String {
        match self {
            SessionEvent::Started { pieces, cols, rows } => {
                format!("Session started: {} pieces over {}x{}", pieces, cols, rows)
            }
            SessionEvent::InteractionCancelled => "Interaction cancelled by host".to_string(),
        }
    }
}

/// Assembly progress events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProgressEvent {
    /// A batch of pieces was spawned into the world.
    BatchSpawned {
        /// Zero-based batch index.
        batch: usize,
        /// Number of pieces in this batch.
        count: usize,
        /// Total pieces spawned so far.
        spawned: usize,
    },
    /// A dropped group merged into another.
    GroupsMerged {
        /// Group id that was absorbed.
        source: GroupId,
        /// Group id that absorbed it.
        target: GroupId,
        /// Member count of the combined group.
        group_size: usize,
    },
    /// All spawned pieces form a single group and more batches remain;
    /// the next batch spawns after the advance debounce.
    BatchAssembled {
        /// Zero-based index of the assembled batch.
        batch: usize,
    },
    /// Every piece is spawned and merged into one group.
    PictureCompleted {
        /// Target-image reference, passed through untouched.
        image_ref: String,
    },
}

impl ProgressEvent {
    fn description(&self) -> String {
        match self {
            ProgressEvent::BatchSpawned {
                batch,
                count,
                spawned,
            } => format!("Batch {} spawned ({} pieces, {} total)", batch, count, spawned),
            ProgressEvent::GroupsMerged {
                source,
                target,
                group_size,
            } => format!(
                "Group {} merged into {} ({} pieces)",
                source, target, group_size
            ),
            ProgressEvent::BatchAssembled { batch } => format!("Batch {} assembled", batch),
            ProgressEvent::PictureCompleted { image_ref } => {
                format!("Picture completed: {}", image_ref)
            }
        }
    }
}

/// Pointer interaction events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InteractionEvent {
    /// A piece (and its group) was grabbed.
    DragStarted {
        /// Piece under the pointer.
        piece: PieceId,
        /// Member count of the grabbed group.
        group_size: usize,
    },
    /// A drag ended.
    DragEnded {
        /// Piece that was being dragged.
        piece: PieceId,
        /// Whether the release produced a merge.
        merged: bool,
    },
    /// The dragged piece is near a piece that is not its neighbor.
    MismatchHinted {
        /// Piece being dragged.
        dragged: PieceId,
        /// Nearby piece failing the neighbor test.
        near: PieceId,
    },
    /// The viewport was fitted to the current pieces.
    ViewFitted {
        /// Zoom chosen by the fit.
        zoom: f64,
    },
}

impl InteractionEvent {
    fn description(&self) -> String {
        match self {
            InteractionEvent::DragStarted { piece, group_size } => {
                format!("Drag started on piece {} (group of {})", piece, group_size)
            }
            InteractionEvent::DragEnded { piece, merged } => {
                format!("Drag ended on piece {} (merged: {})", piece, merged)
            }
            InteractionEvent::MismatchHinted { dragged, near } => {
                format!("Piece {} near mismatched piece {}", dragged, near)
            }
            InteractionEvent::ViewFitted { zoom } => format!("View fitted at zoom {:.2}", zoom),
        }
    }
}
