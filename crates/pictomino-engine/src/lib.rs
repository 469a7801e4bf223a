//! # Pictomino Engine
//!
//! This crate provides the interactive board for assembling a polyomino
//! picture puzzle. It combines piece state, drag grouping, staged
//! spawning, and camera control into a single host-driven session.
//!
//! ## Core Components
//!
//! ### Board State
//! - **Store**: Spawned pieces with position, group, z-order, and lock
//! - **Settings**: Board geometry and behavioural tuning knobs
//! - **Progress**: Batch scheduling and the completion latch
//!
//! ### Interaction
//! - **Grouping**: Rigid drags, drop merges, and mismatch hints
//! - **Spawn**: Overlap-free radial placement for new batches
//! - **Viewport**: Pan, zoom, and fit-to-content framing
//!
//! ## Architecture
//!
//! The session routes all input and owns every component:
//!
//! ```text
//! PuzzleSession (host-facing facade)
//!   ├── PieceStore (positions, groups, z-order)
//!   ├── Viewport (camera)
//!   ├── ProgressTracker (batches, debounced completion)
//!   └── EventBus (session / progress / interaction events)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pictomino_engine::{BoardParams, PuzzleSession, SessionTuning};
//!
//! let mut session = PuzzleSession::new(set, BoardParams::default(), SessionTuning::default())?;
//!
//! // Host forwards input and pumps deferred work every frame.
//! session.pointer_down(cursor, now);
//! session.pointer_move(cursor, now);
//! session.pointer_up(now);
//! session.tick(now);
//! ```

pub mod grouping;
pub mod progress;
pub mod session;
pub mod settings;
pub mod spawn;
pub mod store;
pub mod viewport;

pub use grouping::{try_merge, DragState, MergeOutcome, MismatchHint};
pub use progress::{ProgressReport, ProgressTracker, TrackerAction};
pub use session::{PuzzleSession, SessionId};
pub use settings::{BoardParams, SessionTuning};
pub use spawn::find_spawn_position;
pub use store::{PieceState, PieceStore};
pub use viewport::Viewport;
