//! Batch and completion tracking.
//!
//! Pieces spawn in batches; the next batch is gated on the previous pieces
//! all merging into a single group. Both the batch advance and the final
//! completion signal are debounced: the tracker arms a deadline and the
//! session's `tick` fires it. Deadlines re-arm rather than stack, and the
//! completion signal is latched so it can never fire twice.

use std::ops::Range;
use std::time::Instant;

use tracing::debug;

use crate::settings::SessionTuning;

/// What a fired deadline asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerAction {
    /// Spawn the next batch of pieces.
    AdvanceBatch,
    /// Fire the completion signal.
    SignalCompletion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingKind {
    Advance,
    Complete,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    kind: PendingKind,
    due: Instant,
}

/// Progress snapshot for the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressReport {
    /// Zero-based index of the most recently spawned batch.
    pub batch: usize,
    /// Total number of batches in the session.
    pub total_batches: usize,
    /// Pieces spawned so far.
    pub spawned: usize,
    /// Total pieces in the definition set.
    pub total: usize,
    /// Share of pieces assembled into the largest group, 0..=100.
    pub percent: f64,
}

/// Batch spawn gating and completion detection.
#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    batch_size: usize,
    /// Index of the next batch to spawn.
    next_batch: usize,
    pending: Option<Pending>,
    completed: bool,
}

impl ProgressTracker {
    pub fn new(total: usize, batch_size: usize) -> Self {
        debug_assert!(batch_size > 0, "batch_size must be positive");
        Self {
            total,
            batch_size,
            next_batch: 0,
            pending: None,
            completed: false,
        }
    }

    pub fn total_batches(&self) -> usize {
        self.total.div_ceil(self.batch_size)
    }

    /// Zero-based index of the most recently spawned batch.
    pub fn current_batch(&self) -> usize {
        self.next_batch.saturating_sub(1)
    }

    /// Pieces that should be on the board once `next_batch` batches have
    /// spawned.
    pub fn spawned_target(&self) -> usize {
        (self.next_batch * self.batch_size).min(self.total)
    }

    /// Definition-index range of the next batch to spawn, or `None` when
    /// everything is already out.
    pub fn next_batch_range(&self) -> Option<Range<usize>> {
        let start = self.next_batch * self.batch_size;
        if start >= self.total {
            return None;
        }
        Some(start..(start + self.batch_size).min(self.total))
    }

    /// Record that the batch from [`next_batch_range`] was spawned.
    pub fn mark_batch_spawned(&mut self) {
        self.next_batch += 1;
        // A fresh batch means multiple groups again; any armed advance
        // deadline is stale.
        self.pending = None;
    }

    /// Whether the completion signal has fired.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Re-inspect the board state after a merge (or a spawn).
    ///
    /// With all spawned pieces in one group, arms the batch-advance
    /// deadline when batches remain, or the completion deadline when the
    /// set is fully spawned. Re-arming replaces any earlier deadline; once
    /// completed the tracker never arms again.
    pub fn reevaluate(
        &mut self,
        distinct_groups: usize,
        spawned: usize,
        tuning: &SessionTuning,
        now: Instant,
    ) {
        if self.completed {
            return;
        }
        if distinct_groups != 1 || spawned == 0 {
            self.pending = None;
            return;
        }

        if spawned < self.total {
            self.pending = Some(Pending {
                kind: PendingKind::Advance,
                due: now + tuning.batch_advance_debounce(),
            });
            debug!(batch = self.current_batch(), "batch assembled, advance armed");
        } else {
            self.pending = Some(Pending {
                kind: PendingKind::Complete,
                due: now + tuning.completion_debounce(),
            });
            debug!("all pieces assembled, completion armed");
        }
    }

    /// True when a batch-assembled condition is armed and waiting.
    pub fn advance_armed(&self) -> bool {
        self.pending
            .is_some_and(|p| p.kind == PendingKind::Advance)
    }

    /// Fire a due deadline, if any.
    pub fn tick(&mut self, now: Instant) -> Option<TrackerAction> {
        let pending = self.pending?;
        if now < pending.due {
            return None;
        }
        self.pending = None;
        match pending.kind {
            PendingKind::Advance => Some(TrackerAction::AdvanceBatch),
            PendingKind::Complete => {
                // Latch: the completion signal fires exactly once.
                self.completed = true;
                Some(TrackerAction::SignalCompletion)
            }
        }
    }
}
