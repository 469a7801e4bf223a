//! Grouping and snap engine.
//!
//! Dragging moves a whole group rigidly; releasing scans the dragged
//! group's members against everything else for a pair whose relative
//! placement is within the snap threshold. A match snaps the dragged group
//! into exact alignment and merges it into the target group by rewriting
//! group ids. At most one merge happens per release; further correct
//! adjacencies are picked up on later drops.

use pictomino_core::geometry::{Point, Vec2};
use pictomino_core::piece::{
    are_neighbors, expected_offset, snap_distance, GroupId, PieceId, PieceSet,
};
use smallvec::SmallVec;
use tracing::debug;

use crate::settings::{BoardParams, SessionTuning};
use crate::store::PieceStore;

/// A near-but-wrong pair reported while dragging: the dragged piece's
/// center is close to `near`, but the two are not neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MismatchHint {
    /// Piece being dragged.
    pub dragged: PieceId,
    /// Nearby piece failing the neighbor test.
    pub near: PieceId,
}

/// One in-flight drag of a group.
///
/// Member offsets from the grabbed piece are recorded once at grab time
/// and reapplied as absolute positions on every update, so a group can
/// never shear or drift no matter how many move events arrive.
#[derive(Debug, Clone)]
pub struct DragState {
    grabbed: PieceId,
    group: GroupId,
    /// Grabbed piece origin relative to the pointer, world pixels.
    pointer_offset: Vec2,
    /// Every group member with its fixed offset from the grabbed piece.
    members: SmallVec<[(PieceId, Vec2); 8]>,
}

impl DragState {
    /// Start dragging the group of `grabbed` with the pointer at
    /// `pointer_world`. Returns `None` for an unknown piece id.
    pub fn begin(store: &PieceStore, grabbed: PieceId, pointer_world: Point) -> Option<DragState> {
        let state = store.get(grabbed)?;
        let group = state.group;
        let base = state.position;

        let members = store
            .pieces()
            .iter()
            .filter(|p| p.group == group)
            .map(|p| (p.id, base.vector_to(&p.position)))
            .collect();

        Some(DragState {
            grabbed,
            group,
            pointer_offset: pointer_world.vector_to(&base),
            members,
        })
    }

    /// Piece under the pointer.
    pub fn grabbed(&self) -> PieceId {
        self.grabbed
    }

    /// Group being dragged.
    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Move the whole group rigidly so the grabbed piece follows the
    /// pointer.
    pub fn update(&self, store: &mut PieceStore, pointer_world: Point) {
        let base = pointer_world.translated(self.pointer_offset);
        for (id, offset) in &self.members {
            if let Some(piece) = store.get_mut(*id) {
                piece.position = base.translated(*offset);
            }
        }
    }
}

/// Scan for a mismatch hint around the actively dragged piece.
///
/// Only the grabbed piece is considered, and only pieces outside its
/// group: the first one whose bounding-box center lies within
/// `tuning.mismatch_radius` of the dragged piece's center but which fails
/// the neighbor test is reported. At most one hint per update.
pub fn find_mismatch(
    store: &PieceStore,
    set: &PieceSet,
    board: &BoardParams,
    tuning: &SessionTuning,
    drag: &DragState,
) -> Option<MismatchHint> {
    let dragged = store.get(drag.grabbed)?;
    let dragged_def = set.def(dragged.id)?;
    let dragged_center = dragged_def
        .bounds_at(dragged.position, board.block_w, board.block_h)
        .center();

    for other in store.pieces() {
        if other.group == drag.group {
            continue;
        }
        let Some(other_def) = set.def(other.id) else {
            continue;
        };
        let other_center = other_def
            .bounds_at(other.position, board.block_w, board.block_h)
            .center();
        if dragged_center.distance_to(&other_center) >= tuning.mismatch_radius {
            continue;
        }
        if are_neighbors(
            dragged_def,
            dragged.position,
            other_def,
            other.position,
            board.block_w,
            board.block_h,
            board.snap_threshold,
        ) {
            continue;
        }
        return Some(MismatchHint {
            dragged: dragged.id,
            near: other.id,
        });
    }
    None
}

/// Result of a successful drop merge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeOutcome {
    /// Group that was absorbed (the dragged one).
    pub source_group: GroupId,
    /// Group that absorbed it.
    pub target_group: GroupId,
    /// Source-side piece of the matched pair.
    pub source_piece: PieceId,
    /// Target-side piece of the matched pair.
    pub target_piece: PieceId,
    /// Member count of the combined group.
    pub group_size: usize,
}

/// Attempt a merge for a released group.
///
/// Every member of the released group is tested against every piece
/// outside it; among all pairs within the snap threshold the one with the
/// smallest snap distance wins, which keeps the outcome deterministic when
/// several pairs are in tolerance at once. The released group is rigidly
/// translated into exact alignment with the matched target, then its
/// members take the target's group id.
///
/// Returns `None` when nothing is in tolerance; positions stay exactly
/// where the pieces were dropped.
pub fn try_merge(
    store: &mut PieceStore,
    set: &PieceSet,
    board: &BoardParams,
    group: GroupId,
) -> Option<MergeOutcome> {
    let mut best: Option<(f64, PieceId, PieceId)> = None;

    for source in store.pieces() {
        if source.group != group {
            continue;
        }
        let Some(source_def) = set.def(source.id) else {
            continue;
        };
        for target in store.pieces() {
            if target.group == group {
                continue;
            }
            let Some(target_def) = set.def(target.id) else {
                continue;
            };
            let dist = snap_distance(
                source_def,
                source.position,
                target_def,
                target.position,
                board.block_w,
                board.block_h,
            );
            if dist >= board.snap_threshold {
                continue;
            }
            if best.is_none_or(|(d, _, _)| dist < d) {
                best = Some((dist, source.id, target.id));
            }
        }
    }

    let (dist, source_id, target_id) = best?;

    let source_def = set.def(source_id)?;
    let target_def = set.def(target_id)?;
    let source_pos = store.get(source_id)?.position;
    let target_pos = store.get(target_id)?.position;
    let target_group = store.get(target_id)?.group;

    // Exact alignment: the matched source piece lands at precisely the
    // expected offset from the target, and the whole group shifts with it.
    let expected = expected_offset(target_def, source_def, board.block_w, board.block_h);
    let desired = target_pos.translated(expected);
    let shift = source_pos.vector_to(&desired);

    let members = store.group_members(group);
    for id in &members {
        if let Some(piece) = store.get_mut(*id) {
            piece.position = piece.position.translated(shift);
        }
    }

    let group_size = store.reassign_group(group, target_group);

    debug!(
        source = source_id,
        target = target_id,
        dist,
        group_size,
        "groups merged"
    );

    Some(MergeOutcome {
        source_group: group,
        target_group,
        source_piece: source_id,
        target_piece: target_id,
        group_size,
    })
}

/// Topmost piece whose cell coverage contains the world point, or `None`.
///
/// Pieces are tested front to back so a piece rendered on top wins, and
/// the test is cell-precise: clicking through the hole of an L-shaped
/// piece hits whatever sits underneath.
pub fn topmost_piece_at(
    store: &PieceStore,
    set: &PieceSet,
    board: &BoardParams,
    world: Point,
) -> Option<PieceId> {
    let mut order = store.render_order();
    order.reverse();
    for piece in order {
        let Some(def) = set.def(piece.id) else {
            continue;
        };
        let bounds = def.bounds_at(piece.position, board.block_w, board.block_h);
        if !bounds.contains(world) {
            continue;
        }
        if def.covers_world(piece.position, world, board.block_w, board.block_h) {
            return Some(piece.id);
        }
    }
    None
}
