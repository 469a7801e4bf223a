use pictomino_core::geometry::Point;
use pictomino_core::piece::{GridCell, PieceDef, PieceSet};
use pictomino_engine::grouping::{find_mismatch, topmost_piece_at, try_merge, DragState};
use pictomino_engine::settings::{BoardParams, SessionTuning};
use pictomino_engine::store::PieceStore;

/// Two single-cell pieces side by side: A at grid (0,0), B at grid (1,0).
fn domino_set() -> PieceSet {
    let defs = vec![
        PieceDef::from_cells(0, &[GridCell::new(0, 0)]),
        PieceDef::from_cells(1, &[GridCell::new(1, 0)]),
    ];
    PieceSet::new(2, 1, defs, "domino".to_string())
}

#[test]
fn test_topmost_piece_wins_hit() {
    let defs = vec![
        PieceDef::from_cells(0, &[GridCell::new(0, 0)]),
        PieceDef::from_cells(1, &[GridCell::new(1, 0)]),
    ];
    let set = PieceSet::new(2, 1, defs, "overlap".to_string());
    let board = BoardParams::default();

    let mut store = PieceStore::new();
    store.spawn(0, Point::new(0.0, 0.0));
    store.spawn(1, Point::new(50.0, 50.0));

    // Both cover (60, 60); piece 1 spawned later and sits on top.
    assert_eq!(
        topmost_piece_at(&store, &set, &board, Point::new(60.0, 60.0)),
        Some(1)
    );

    store.raise_group(0);
    assert_eq!(
        topmost_piece_at(&store, &set, &board, Point::new(60.0, 60.0)),
        Some(0)
    );
}

#[test]
fn test_hit_falls_through_coverage_hole() {
    // An L piece covering (0,0), (0,1), (1,1) leaves its (1,0) corner
    // uncovered; a click there must hit the piece underneath.
    let defs = vec![
        PieceDef::from_cells(
            0,
            &[GridCell::new(0, 0), GridCell::new(0, 1), GridCell::new(1, 1)],
        ),
        PieceDef::from_cells(1, &[GridCell::new(1, 0)]),
    ];
    let set = PieceSet::new(2, 2, defs, "ell".to_string());
    let board = BoardParams::default();

    let mut store = PieceStore::new();
    store.spawn(1, Point::new(100.0, 0.0));
    store.spawn(0, Point::new(0.0, 0.0));

    // (150, 50) lies inside the L's bounding box but in its hole.
    assert_eq!(
        topmost_piece_at(&store, &set, &board, Point::new(150.0, 50.0)),
        Some(1)
    );
    // (50, 50) is a covered cell of the L.
    assert_eq!(
        topmost_piece_at(&store, &set, &board, Point::new(50.0, 50.0)),
        Some(0)
    );
    // Empty space.
    assert_eq!(
        topmost_piece_at(&store, &set, &board, Point::new(1000.0, 1000.0)),
        None
    );
}

#[test]
fn test_drag_begin_records_pointer_offset() {
    let mut store = PieceStore::new();
    store.spawn(0, Point::new(0.0, 0.0));
    store.spawn(1, Point::new(100.0, 0.0));
    store.reassign_group(1, 0);

    let drag = DragState::begin(&store, 0, Point::new(10.0, 10.0)).unwrap();
    assert_eq!(drag.grabbed(), 0);
    assert_eq!(drag.group(), 0);
    assert_eq!(drag.member_count(), 2);

    assert!(DragState::begin(&store, 99, Point::new(0.0, 0.0)).is_none());
}

#[test]
fn test_drag_update_is_rigid() {
    let mut store = PieceStore::new();
    store.spawn(0, Point::new(0.0, 0.0));
    store.spawn(1, Point::new(100.0, 0.0));
    store.reassign_group(1, 0);

    let drag = DragState::begin(&store, 0, Point::new(10.0, 10.0)).unwrap();

    drag.update(&mut store, Point::new(210.0, 110.0));
    let a = store.get(0).unwrap().position;
    let b = store.get(1).unwrap().position;
    assert!((a.x - 200.0).abs() < 1e-9);
    assert!((a.y - 100.0).abs() < 1e-9);
    assert!((b.x - a.x - 100.0).abs() < 1e-9, "group sheared");
    assert!((b.y - a.y).abs() < 1e-9);

    // Many updates never accumulate drift.
    for i in 0..100 {
        drag.update(&mut store, Point::new(10.0 + i as f64, 10.0 - i as f64));
    }
    let a = store.get(0).unwrap().position;
    let b = store.get(1).unwrap().position;
    assert!((b.x - a.x - 100.0).abs() < 1e-9);
    assert!((b.y - a.y).abs() < 1e-9);
    assert!((a.x - 99.0).abs() < 1e-9);
    assert!((a.y - (-99.0)).abs() < 1e-9);
}

#[test]
fn test_mismatch_hint_near_wrong_piece() {
    let set = domino_set();
    let board = BoardParams::default();
    let tuning = SessionTuning::default();

    let mut store = PieceStore::new();
    store.spawn(0, Point::new(0.0, 0.0));
    // Close in space (centers 120 apart) but nowhere near the expected
    // side-by-side offset.
    store.spawn(1, Point::new(0.0, 120.0));

    let drag = DragState::begin(&store, 1, Point::new(50.0, 170.0)).unwrap();
    let hint = find_mismatch(&store, &set, &board, &tuning, &drag).unwrap();
    assert_eq!(hint.dragged, 1);
    assert_eq!(hint.near, 0);
}

#[test]
fn test_no_mismatch_when_offset_matches() {
    let set = domino_set();
    let board = BoardParams::default();
    let tuning = SessionTuning::default();

    let mut store = PieceStore::new();
    store.spawn(0, Point::new(0.0, 0.0));
    // 5px from the ideal (100, 0): a correct near-neighbor, not a mismatch.
    store.spawn(1, Point::new(100.0, 5.0));

    let drag = DragState::begin(&store, 1, Point::new(150.0, 55.0)).unwrap();
    assert!(find_mismatch(&store, &set, &board, &tuning, &drag).is_none());
}

#[test]
fn test_no_mismatch_beyond_radius() {
    let set = domino_set();
    let board = BoardParams::default();
    let tuning = SessionTuning::default();

    let mut store = PieceStore::new();
    store.spawn(0, Point::new(0.0, 0.0));
    store.spawn(1, Point::new(400.0, 0.0));

    let drag = DragState::begin(&store, 1, Point::new(450.0, 50.0)).unwrap();
    assert!(find_mismatch(&store, &set, &board, &tuning, &drag).is_none());
}

#[test]
fn test_merge_snaps_to_exact_offset() {
    let set = domino_set();
    let board = BoardParams::default();

    let mut store = PieceStore::new();
    store.spawn(0, Point::new(200.0, 200.0));
    // 7.07px from the ideal (300, 200), well inside the 50px threshold.
    store.spawn(1, Point::new(295.0, 205.0));

    let outcome = try_merge(&mut store, &set, &board, 1).unwrap();
    assert_eq!(outcome.source_group, 1);
    assert_eq!(outcome.target_group, 0);
    assert_eq!(outcome.group_size, 2);

    let b = store.get(1).unwrap();
    assert_eq!(b.group, 0);
    assert!((b.position.x - 300.0).abs() < 1e-9, "x {}", b.position.x);
    assert!((b.position.y - 200.0).abs() < 1e-9, "y {}", b.position.y);
    // The anchor never moves.
    let a = store.get(0).unwrap();
    assert!((a.position.x - 200.0).abs() < 1e-9);
}

#[test]
fn test_merge_rejected_outside_threshold() {
    let set = domino_set();
    let board = BoardParams::default();

    let mut store = PieceStore::new();
    store.spawn(0, Point::new(200.0, 200.0));
    // 100px from the ideal (300, 200).
    store.spawn(1, Point::new(400.0, 200.0));

    assert!(try_merge(&mut store, &set, &board, 1).is_none());

    let b = store.get(1).unwrap();
    assert_eq!(b.group, 1, "groups must stay distinct");
    assert!((b.position.x - 400.0).abs() < 1e-9, "piece must stay where dropped");
}

#[test]
fn test_merge_picks_closest_candidate() {
    let defs = vec![
        PieceDef::from_cells(0, &[GridCell::new(0, 0)]),
        PieceDef::from_cells(1, &[GridCell::new(1, 0)]),
        PieceDef::from_cells(2, &[GridCell::new(2, 0)]),
    ];
    let set = PieceSet::new(3, 1, defs, "row".to_string());
    let board = BoardParams::default();

    let mut store = PieceStore::new();
    // Piece 2 spawns first so a naive first-match scan would pick it.
    store.spawn(2, Point::new(210.0, 0.0));
    store.spawn(0, Point::new(0.0, 0.0));
    store.spawn(1, Point::new(95.0, 0.0));

    // Piece 1 is 5px off from piece 0's ideal and 15px off from piece 2's.
    let outcome = try_merge(&mut store, &set, &board, 1).unwrap();
    assert_eq!(outcome.target_piece, 0);

    let b = store.get(1).unwrap();
    assert_eq!(b.group, 0);
    assert!((b.position.x - 100.0).abs() < 1e-9);
}

#[test]
fn test_no_self_merge() {
    let set = domino_set();
    let board = BoardParams::default();

    let mut store = PieceStore::new();
    store.spawn(0, Point::new(0.0, 0.0));
    store.spawn(1, Point::new(100.0, 0.0));
    store.reassign_group(1, 0);

    // Perfectly aligned members of one group must never match each other.
    assert!(try_merge(&mut store, &set, &board, 0).is_none());
    assert!((store.get(0).unwrap().position.x).abs() < 1e-9);
    assert!((store.get(1).unwrap().position.x - 100.0).abs() < 1e-9);
}

#[test]
fn test_merge_shifts_whole_source_group() {
    let defs = vec![
        PieceDef::from_cells(0, &[GridCell::new(0, 0)]),
        PieceDef::from_cells(1, &[GridCell::new(1, 0)]),
        PieceDef::from_cells(2, &[GridCell::new(2, 0)]),
    ];
    let set = PieceSet::new(3, 1, defs, "row".to_string());
    let board = BoardParams::default();

    let mut store = PieceStore::new();
    store.spawn(0, Point::new(0.0, 0.0));
    store.spawn(1, Point::new(103.0, 2.0));
    store.spawn(2, Point::new(203.0, 2.0));
    store.reassign_group(2, 1);

    let outcome = try_merge(&mut store, &set, &board, 1).unwrap();
    assert_eq!(outcome.group_size, 3);

    let b = store.get(1).unwrap().position;
    let c = store.get(2).unwrap().position;
    assert!((b.x - 100.0).abs() < 1e-9);
    assert!((b.y).abs() < 1e-9);
    assert!((c.x - 200.0).abs() < 1e-9);
    assert!((c.y).abs() < 1e-9);
    assert_eq!(store.distinct_group_count(), 1);
}
