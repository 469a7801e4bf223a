//! Arena storage for piece runtime state.
//!
//! Pieces live in a flat vector with an id-to-slot index beside it, so the
//! hot paths (drag updates, merge scans) iterate contiguous memory and the
//! occasional id lookup stays O(1).

use std::collections::{HashMap, HashSet};

use pictomino_core::geometry::Point;
use pictomino_core::piece::{GroupId, PieceId};

/// Z values at or above this are the elevated band used while a group is
/// being dragged. Settled pieces always stay below it.
pub const Z_DRAG_BAND: u32 = 1_000_000;

/// Runtime state of one spawned piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceState {
    /// Matches the definition id.
    pub id: PieceId,
    /// World position of the piece origin (top-left of its bounds).
    pub position: Point,
    /// Group membership; starts equal to `id`.
    pub group: GroupId,
    /// Render ordering, ascending back to front.
    pub z_order: u32,
    /// True once the piece belongs to the full-picture group.
    pub locked: bool,
}

impl PieceState {
    /// Fresh state for a newly spawned piece: its own group, unlocked.
    pub fn spawned(id: PieceId, position: Point, z_order: u32) -> Self {
        Self {
            id,
            position,
            group: id,
            z_order,
            locked: false,
        }
    }
}

/// Arena of spawned pieces.
#[derive(Debug, Default)]
pub struct PieceStore {
    pieces: Vec<PieceState>,
    by_id: HashMap<PieceId, usize>,
    // Top of the settled z band; monotonically increasing.
    z_settled: u32,
}

impl PieceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a newly spawned piece at the top of the settled band.
    pub fn spawn(&mut self, id: PieceId, position: Point) {
        debug_assert!(
            !self.by_id.contains_key(&id),
            "piece {id} spawned twice"
        );
        self.z_settled += 1;
        let state = PieceState::spawned(id, position, self.z_settled);
        self.by_id.insert(id, self.pieces.len());
        self.pieces.push(state);
    }

    pub fn get(&self, id: PieceId) -> Option<&PieceState> {
        self.by_id.get(&id).map(|&slot| &self.pieces[slot])
    }

    pub fn get_mut(&mut self, id: PieceId) -> Option<&mut PieceState> {
        let slot = *self.by_id.get(&id)?;
        Some(&mut self.pieces[slot])
    }

    /// All spawned pieces in spawn order.
    pub fn pieces(&self) -> &[PieceState] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Pieces sorted back to front for rendering.
    pub fn render_order(&self) -> Vec<&PieceState> {
        let mut out: Vec<&PieceState> = self.pieces.iter().collect();
        out.sort_by_key(|p| p.z_order);
        out
    }

    /// Ids of every member of `group`, in spawn order.
    pub fn group_members(&self, group: GroupId) -> Vec<PieceId> {
        self.pieces
            .iter()
            .filter(|p| p.group == group)
            .map(|p| p.id)
            .collect()
    }

    pub fn group_size(&self, group: GroupId) -> usize {
        self.pieces.iter().filter(|p| p.group == group).count()
    }

    /// Number of distinct groups among spawned pieces.
    pub fn distinct_group_count(&self) -> usize {
        let mut seen: HashSet<GroupId> = HashSet::new();
        for p in &self.pieces {
            seen.insert(p.group);
        }
        seen.len()
    }

    /// Member count of the largest group, or 0 when nothing is spawned.
    pub fn largest_group_size(&self) -> usize {
        let mut counts: HashMap<GroupId, usize> = HashMap::new();
        for p in &self.pieces {
            *counts.entry(p.group).or_insert(0) += 1;
        }
        counts.values().copied().max().unwrap_or(0)
    }

    /// Rewrite every member of `from` to carry `to`. Returns the member
    /// count of the combined group.
    pub fn reassign_group(&mut self, from: GroupId, to: GroupId) -> usize {
        if from == to {
            return self.group_size(to);
        }
        for p in &mut self.pieces {
            if p.group == from {
                p.group = to;
            }
        }
        self.group_size(to)
    }

    /// Raise every member of `group` into the elevated drag band, keeping
    /// their relative stacking.
    pub fn raise_group(&mut self, group: GroupId) {
        let mut members: Vec<usize> = (0..self.pieces.len())
            .filter(|&i| self.pieces[i].group == group)
            .collect();
        members.sort_by_key(|&i| self.pieces[i].z_order);
        for (offset, slot) in members.into_iter().enumerate() {
            self.pieces[slot].z_order = Z_DRAG_BAND + offset as u32;
        }
    }

    /// Drop every member of `group` out of the elevated band onto the top
    /// of the settled band.
    pub fn settle_group(&mut self, group: GroupId) {
        let mut members: Vec<usize> = (0..self.pieces.len())
            .filter(|&i| self.pieces[i].group == group)
            .collect();
        members.sort_by_key(|&i| self.pieces[i].z_order);
        for slot in members {
            self.z_settled += 1;
            self.pieces[slot].z_order = self.z_settled;
        }
    }

    /// Mark every member of `group` as locked.
    pub fn lock_group(&mut self, group: GroupId) {
        for p in &mut self.pieces {
            if p.group == group {
                p.locked = true;
            }
        }
    }
}
