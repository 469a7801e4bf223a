//! Puzzle session facade.
//!
//! Owns every engine component for one puzzle and exposes the host-facing
//! surface: pointer/wheel/pinch input, the tick pump for deferred work,
//! and the read surface the renderer draws from. All methods run on the
//! host's update thread; the session never spawns threads of its own.

use std::time::Instant;

use pictomino_core::event_bus::{EventBus, InteractionEvent, ProgressEvent, PuzzleEvent, SessionEvent};
use pictomino_core::geometry::{union_bounds, Point};
use pictomino_core::piece::{PieceId, PieceSet};
use pictomino_core::Result;
use tracing::{debug, info};
use uuid::Uuid;

use crate::grouping::{self, DragState, MismatchHint};
use crate::progress::{ProgressReport, ProgressTracker, TrackerAction};
use crate::settings::{BoardParams, SessionTuning};
use crate::spawn;
use crate::store::{PieceStore, PieceState};
use crate::viewport::Viewport;

/// Identifier of one puzzle session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Session({})", &self.0.to_string()[..8])
    }
}

/// What the pointer is currently doing.
#[derive(Debug)]
enum Interaction {
    Idle,
    Dragging(DragState),
    Panning { last_screen: Point },
    Pinching { last_mid: Point, last_dist: f64 },
}

/// One running puzzle.
pub struct PuzzleSession {
    id: SessionId,
    set: PieceSet,
    board: BoardParams,
    tuning: SessionTuning,
    store: PieceStore,
    viewport: Viewport,
    tracker: ProgressTracker,
    events: EventBus,
    interaction: Interaction,
    mismatch: Option<MismatchHint>,
}

impl PuzzleSession {
    /// Build a session and spawn its first batch.
    ///
    /// Validates the board, the tuning, and the definition set's tiling
    /// invariant before anything spawns.
    pub fn new(set: PieceSet, board: BoardParams, tuning: SessionTuning) -> Result<Self> {
        board.validate()?;
        tuning.validate()?;
        set.validate()?;

        let tracker = ProgressTracker::new(set.len(), tuning.batch_size);
        let mut session = Self {
            id: SessionId::new(),
            set,
            board,
            tuning,
            store: PieceStore::new(),
            viewport: Viewport::default(),
            tracker,
            events: EventBus::new(),
            interaction: Interaction::Idle,
            mismatch: None,
        };

        info!(
            session = %session.id,
            pieces = session.set.len(),
            cols = session.set.cols(),
            rows = session.set.rows(),
            "session started"
        );
        session
            .events
            .publish(PuzzleEvent::Session(SessionEvent::Started {
                pieces: session.set.len(),
                cols: session.set.cols(),
                rows: session.set.rows(),
            }))
            .ok();

        session.spawn_batch(Instant::now());
        Ok(session)
    }

    // ---- input routing ----

    /// Pointer pressed at a screen position: grab the topmost piece under
    /// it, or start panning on empty space. Locked pieces cannot be
    /// grabbed.
    pub fn pointer_down(&mut self, screen: Point, _now: Instant) {
        let world = self.viewport.screen_to_world(screen);

        if let Some(id) = grouping::topmost_piece_at(&self.store, &self.set, &self.board, world) {
            let locked = self.store.get(id).is_some_and(|p| p.locked);
            if !locked {
                if let Some(drag) = DragState::begin(&self.store, id, world) {
                    self.store.raise_group(drag.group());
                    self.events
                        .publish(PuzzleEvent::Interaction(InteractionEvent::DragStarted {
                            piece: id,
                            group_size: drag.member_count(),
                        }))
                        .ok();
                    debug!(piece = id, group = drag.group(), "drag started");
                    self.interaction = Interaction::Dragging(drag);
                    return;
                }
            }
        }

        self.interaction = Interaction::Panning {
            last_screen: screen,
        };
    }

    /// Pointer moved: advance the drag rigidly, or pan the viewport.
    pub fn pointer_move(&mut self, screen: Point, _now: Instant) {
        match &mut self.interaction {
            Interaction::Dragging(drag) => {
                let world = self.viewport.screen_to_world(screen);
                drag.update(&mut self.store, world);

                let hint =
                    grouping::find_mismatch(&self.store, &self.set, &self.board, &self.tuning, drag);
                if hint != self.mismatch {
                    if let Some(h) = hint {
                        self.events
                            .publish(PuzzleEvent::Interaction(InteractionEvent::MismatchHinted {
                                dragged: h.dragged,
                                near: h.near,
                            }))
                            .ok();
                    }
                }
                self.mismatch = hint;
            }
            Interaction::Panning { last_screen } => {
                let delta = last_screen.vector_to(&screen);
                *last_screen = screen;
                self.viewport.pan_by(delta);
            }
            Interaction::Pinching { .. } | Interaction::Idle => {}
        }
    }

    /// Pointer released: finish the pan, or drop the dragged group and
    /// scan for a merge.
    pub fn pointer_up(&mut self, now: Instant) {
        let interaction = std::mem::replace(&mut self.interaction, Interaction::Idle);
        if let Interaction::Dragging(drag) = interaction {
            self.finish_drag(drag, now);
        }
    }

    /// Host-side cancel (window blur, visibility loss, pointer capture
    /// lost). An active drag is finalized exactly like a release, so the
    /// board can never be left with a half-dragged group or a stale hint.
    pub fn interaction_cancelled(&mut self, now: Instant) {
        let interaction = std::mem::replace(&mut self.interaction, Interaction::Idle);
        let was_active = !matches!(interaction, Interaction::Idle);
        if let Interaction::Dragging(drag) = interaction {
            self.finish_drag(drag, now);
        }
        if was_active {
            self.events
                .publish(PuzzleEvent::Session(SessionEvent::InteractionCancelled))
                .ok();
        }
    }

    /// Two-pointer pinch: zoom by the ratio of successive pointer
    /// distances about the midpoint, and pan by the midpoint's motion.
    /// Entering a pinch finalizes any active drag first.
    pub fn pinch_update(&mut self, p0: Point, p1: Point, now: Instant) {
        let mid = Point::new((p0.x + p1.x) / 2.0, (p0.y + p1.y) / 2.0);
        let dist = p0.distance_to(&p1);

        if !matches!(self.interaction, Interaction::Pinching { .. }) {
            let previous = std::mem::replace(
                &mut self.interaction,
                Interaction::Pinching {
                    last_mid: mid,
                    last_dist: dist,
                },
            );
            if let Interaction::Dragging(drag) = previous {
                self.finish_drag(drag, now);
            }
            return;
        }

        if let Interaction::Pinching {
            last_mid,
            last_dist,
        } = &mut self.interaction
        {
            let prev_mid = *last_mid;
            let prev_dist = *last_dist;
            *last_mid = mid;
            *last_dist = dist;

            if prev_dist > 0.0 && dist > 0.0 {
                let factor = dist / prev_dist;
                let new_zoom = self.viewport.zoom() * factor;
                self.viewport.zoom_at_point(mid, new_zoom);
            }
            self.viewport.pan_by(prev_mid.vector_to(&mid));
        }
    }

    /// End of a pinch gesture.
    pub fn pinch_end(&mut self) {
        if matches!(self.interaction, Interaction::Pinching { .. }) {
            self.interaction = Interaction::Idle;
        }
    }

    /// Wheel zoom at a screen anchor: ×1.1 per positive step, ×0.9 per
    /// negative step.
    pub fn wheel_zoom(&mut self, anchor: Point, steps: i32) {
        self.viewport.wheel_zoom(anchor, steps);
    }

    /// Frame the current pieces with padding. No-op while nothing is
    /// spawned.
    pub fn fit_to_view(&mut self, now: Instant) {
        let rects = spawn::occupied_rects(&self.store, &self.set, &self.board);
        let Some(bounds) = union_bounds(rects) else {
            return;
        };
        self.viewport.fit_to_bounds(bounds, now);
        self.events
            .publish(PuzzleEvent::Interaction(InteractionEvent::ViewFitted {
                zoom: self.viewport.zoom(),
            }))
            .ok();
    }

    /// Advance deferred work: batch spawns and the completion signal.
    pub fn tick(&mut self, now: Instant) {
        match self.tracker.tick(now) {
            Some(TrackerAction::AdvanceBatch) => self.spawn_batch(now),
            Some(TrackerAction::SignalCompletion) => {
                // Covers sets small enough to complete without a merge.
                if let Some(group) = self.store.pieces().first().map(|p| p.group) {
                    self.store.lock_group(group);
                }
                let image_ref = self.set.image_ref().to_string();
                info!(session = %self.id, image = %image_ref, "picture completed");
                self.events
                    .publish(PuzzleEvent::Progress(ProgressEvent::PictureCompleted {
                        image_ref,
                    }))
                    .ok();
            }
            None => {}
        }
    }

    // ---- internals ----

    /// Drop finalize shared by release, cancel, and pinch entry: merge
    /// scan, lock detection, tracker re-evaluation, z settle, hint clear.
    fn finish_drag(&mut self, drag: DragState, now: Instant) {
        let outcome = grouping::try_merge(&mut self.store, &self.set, &self.board, drag.group());

        let settled_group = self
            .store
            .get(drag.grabbed())
            .map(|p| p.group)
            .unwrap_or(drag.group());
        self.store.settle_group(settled_group);
        self.mismatch = None;

        if let Some(outcome) = outcome {
            if outcome.group_size == self.set.len() {
                self.store.lock_group(outcome.target_group);
            }
            self.events
                .publish(PuzzleEvent::Progress(ProgressEvent::GroupsMerged {
                    source: outcome.source_group,
                    target: outcome.target_group,
                    group_size: outcome.group_size,
                }))
                .ok();

            self.tracker.reevaluate(
                self.store.distinct_group_count(),
                self.store.len(),
                &self.tuning,
                now,
            );
            if self.tracker.advance_armed() {
                self.events
                    .publish(PuzzleEvent::Progress(ProgressEvent::BatchAssembled {
                        batch: self.tracker.current_batch(),
                    }))
                    .ok();
            }
        }

        self.events
            .publish(PuzzleEvent::Interaction(InteractionEvent::DragEnded {
                piece: drag.grabbed(),
                merged: outcome.is_some(),
            }))
            .ok();
    }

    /// Spawn the next pending batch, feeding each placed rect back into
    /// the occupied set so pieces of one batch never overlap each other.
    fn spawn_batch(&mut self, now: Instant) {
        let Some(range) = self.tracker.next_batch_range() else {
            return;
        };

        let mut occupied = spawn::occupied_rects(&self.store, &self.set, &self.board);
        let center = spawn::cluster_center(&occupied);

        let count = range.len();
        for (slot, idx) in range.enumerate() {
            let def = &self.set.defs()[idx];
            let width = def.width_cells() as f64 * self.board.block_w;
            let height = def.height_cells() as f64 * self.board.block_h;
            let position =
                spawn::find_spawn_position(&self.tuning, width, height, center, &occupied, slot);
            occupied.push(def.bounds_at(position, self.board.block_w, self.board.block_h));
            self.store.spawn(def.id(), position);
        }

        self.tracker.mark_batch_spawned();
        debug!(
            batch = self.tracker.current_batch(),
            count,
            spawned = self.store.len(),
            "batch spawned"
        );
        self.events
            .publish(PuzzleEvent::Progress(ProgressEvent::BatchSpawned {
                batch: self.tracker.current_batch(),
                count,
                spawned: self.store.len(),
            }))
            .ok();

        // Matters only for single-piece sets, where no merge will ever
        // run the completion check.
        self.tracker.reevaluate(
            self.store.distinct_group_count(),
            self.store.len(),
            &self.tuning,
            now,
        );
    }

    // ---- read surface ----

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn set(&self) -> &PieceSet {
        &self.set
    }

    pub fn board(&self) -> &BoardParams {
        &self.board
    }

    pub fn tuning(&self) -> &SessionTuning {
        &self.tuning
    }

    /// Spawned pieces in spawn order.
    pub fn pieces(&self) -> &[PieceState] {
        self.store.pieces()
    }

    /// Spawned pieces sorted back to front for rendering.
    pub fn render_order(&self) -> Vec<&PieceState> {
        self.store.render_order()
    }

    pub fn piece(&self, id: PieceId) -> Option<&PieceState> {
        self.store.get(id)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Current mismatch hint, if the dragged piece sits near a wrong
    /// piece.
    pub fn mismatch(&self) -> Option<MismatchHint> {
        self.mismatch
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.interaction, Interaction::Dragging(_))
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.interaction, Interaction::Panning { .. })
    }

    /// Whether the completion signal has fired.
    pub fn is_completed(&self) -> bool {
        self.tracker.is_completed()
    }

    /// Progress snapshot: batch position, spawn counts, and the share of
    /// pieces assembled into the largest group.
    pub fn progress(&self) -> ProgressReport {
        let total = self.set.len();
        let percent = if total == 0 {
            0.0
        } else {
            100.0 * self.store.largest_group_size() as f64 / total as f64
        };
        ProgressReport {
            batch: self.tracker.current_batch(),
            total_batches: self.tracker.total_batches(),
            spawned: self.store.len(),
            total,
            percent,
        }
    }
}

impl std::fmt::Debug for PuzzleSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PuzzleSession")
            .field("id", &self.id)
            .field("pieces", &self.store.len())
            .field("total", &self.set.len())
            .field("completed", &self.is_completed())
            .finish()
    }
}
