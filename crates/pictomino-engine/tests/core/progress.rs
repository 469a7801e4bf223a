use std::time::{Duration, Instant};

use pictomino_engine::progress::{ProgressTracker, TrackerAction};
use pictomino_engine::settings::SessionTuning;

#[test]
fn test_total_batches_rounds_up() {
    assert_eq!(ProgressTracker::new(16, 5).total_batches(), 4);
    assert_eq!(ProgressTracker::new(15, 5).total_batches(), 3);
    assert_eq!(ProgressTracker::new(5, 5).total_batches(), 1);
    assert_eq!(ProgressTracker::new(1, 5).total_batches(), 1);
}

#[test]
fn test_batch_ranges_walk_definition_set() {
    let mut tracker = ProgressTracker::new(16, 5);

    assert_eq!(tracker.next_batch_range(), Some(0..5));
    tracker.mark_batch_spawned();
    assert_eq!(tracker.current_batch(), 0);
    assert_eq!(tracker.spawned_target(), 5);

    assert_eq!(tracker.next_batch_range(), Some(5..10));
    tracker.mark_batch_spawned();
    assert_eq!(tracker.next_batch_range(), Some(10..15));
    tracker.mark_batch_spawned();

    // Final short batch.
    assert_eq!(tracker.next_batch_range(), Some(15..16));
    tracker.mark_batch_spawned();
    assert_eq!(tracker.spawned_target(), 16);
    assert_eq!(tracker.next_batch_range(), None);
}

#[test]
fn test_mark_batch_clears_armed_deadline() {
    let tuning = SessionTuning::default();
    let now = Instant::now();
    let mut tracker = ProgressTracker::new(10, 5);
    tracker.mark_batch_spawned();

    tracker.reevaluate(1, 5, &tuning, now);
    assert!(tracker.advance_armed());

    tracker.mark_batch_spawned();
    assert!(!tracker.advance_armed());
    assert_eq!(tracker.tick(now + Duration::from_secs(10)), None);
}

#[test]
fn test_completion_requires_full_spawn() {
    let tuning = SessionTuning::default();
    let now = Instant::now();
    let mut tracker = ProgressTracker::new(10, 5);
    tracker.mark_batch_spawned();

    // One group but half the set spawned: that arms a batch advance, not
    // completion.
    tracker.reevaluate(1, 5, &tuning, now);
    assert_eq!(
        tracker.tick(now + Duration::from_millis(500)),
        Some(TrackerAction::AdvanceBatch)
    );
    assert!(!tracker.is_completed());

    tracker.mark_batch_spawned();
    tracker.reevaluate(1, 10, &tuning, now);
    assert_eq!(tracker.tick(now + Duration::from_millis(999)), None);
    assert_eq!(
        tracker.tick(now + Duration::from_millis(1000)),
        Some(TrackerAction::SignalCompletion)
    );
    assert!(tracker.is_completed());
}
