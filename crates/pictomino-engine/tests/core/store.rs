use pictomino_core::geometry::Point;
use pictomino_engine::store::PieceStore;

#[test]
fn test_render_order_back_to_front() {
    let mut store = PieceStore::new();
    for id in 0..3 {
        store.spawn(id, Point::new(0.0, 0.0));
    }
    let order: Vec<u32> = store.render_order().iter().map(|p| p.id).collect();
    assert_eq!(order, vec![0, 1, 2]);

    store.raise_group(1);
    let order: Vec<u32> = store.render_order().iter().map(|p| p.id).collect();
    assert_eq!(order, vec![0, 2, 1]);
}

#[test]
fn test_largest_group_size() {
    let mut store = PieceStore::new();
    assert_eq!(store.largest_group_size(), 0);

    for id in 0..4 {
        store.spawn(id, Point::new(0.0, 0.0));
    }
    assert_eq!(store.largest_group_size(), 1);

    store.reassign_group(1, 0);
    store.reassign_group(2, 0);
    assert_eq!(store.largest_group_size(), 3);
    assert_eq!(store.group_size(0), 3);
    assert_eq!(store.group_size(3), 1);
}

#[test]
fn test_lock_group_marks_every_member() {
    let mut store = PieceStore::new();
    for id in 0..3 {
        store.spawn(id, Point::new(0.0, 0.0));
    }
    store.reassign_group(1, 0);
    store.lock_group(0);

    assert!(store.get(0).unwrap().locked);
    assert!(store.get(1).unwrap().locked);
    assert!(!store.get(2).unwrap().locked);
}

#[test]
fn test_group_members_in_spawn_order() {
    let mut store = PieceStore::new();
    for id in [5, 2, 9] {
        store.spawn(id, Point::new(0.0, 0.0));
    }
    store.reassign_group(9, 5);
    store.reassign_group(2, 5);

    assert_eq!(store.group_members(5), vec![5, 2, 9]);
    assert_eq!(store.distinct_group_count(), 1);
}
