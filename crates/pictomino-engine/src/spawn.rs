//! Spawn placement.
//!
//! New pieces probe outward from the cluster of already-placed pieces on a
//! widening spiral until they find a clear spot. Placement is fully
//! deterministic: the probe angle is seeded by the piece's slot in its
//! batch, and a piece that never finds a clear spot lands on a fallback
//! rail east of the cluster.

use pictomino_core::geometry::{union_bounds, Point, Rect};
use pictomino_core::piece::PieceSet;
use tracing::{debug, warn};

use crate::settings::{BoardParams, SessionTuning};
use crate::store::PieceStore;

/// Find a non-overlapping spawn position for a piece of the given world
/// size.
///
/// Probes up to `tuning.spawn_attempts` positions on a spiral around
/// `center`, starting at a radius that grows with the occupied count. A
/// candidate is accepted when its rect, padded by `tuning.spawn_padding`
/// on every side, overlaps no occupied rect. When every attempt collides,
/// the piece is placed on the fallback rail east of the cluster, spaced by
/// its `slot`.
pub fn find_spawn_position(
    tuning: &SessionTuning,
    piece_w: f64,
    piece_h: f64,
    center: Point,
    occupied: &[Rect],
    slot: usize,
) -> Point {
    let start_radius = if occupied.is_empty() {
        tuning.first_batch_radius
    } else {
        tuning
            .spawn_min_radius
            .max(occupied.len() as f64 * tuning.spawn_radius_per_piece)
    };

    let mut angle = slot as f64 * 0.7;
    for attempt in 0..tuning.spawn_attempts {
        let radius = start_radius + attempt as f64 * tuning.spawn_radius_step;
        let candidate = Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        );

        let rect = Rect::new(candidate.x, candidate.y, piece_w, piece_h)
            .inflated(tuning.spawn_padding);
        if !occupied.iter().any(|r| rect.intersects(r)) {
            debug!(slot, attempt, x = candidate.x, y = candidate.y, "spawn placed");
            return candidate;
        }

        angle += tuning.spawn_angle_step;
    }

    let fallback = Point::new(center.x + 1000.0 + slot as f64 * 200.0, center.y);
    warn!(slot, x = fallback.x, y = fallback.y, "spawn probing exhausted, using fallback");
    fallback
}

/// World bounds of every spawned piece.
pub fn occupied_rects(store: &PieceStore, set: &PieceSet, board: &BoardParams) -> Vec<Rect> {
    store
        .pieces()
        .iter()
        .filter_map(|p| {
            set.def(p.id)
                .map(|def| def.bounds_at(p.position, board.block_w, board.block_h))
        })
        .collect()
}

/// Center of the union bounding box of the occupied rects, or the world
/// origin when nothing is placed yet.
pub fn cluster_center(rects: &[Rect]) -> Point {
    union_bounds(rects.iter().copied())
        .map(|b| b.center())
        .unwrap_or_default()
}
