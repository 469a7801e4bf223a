use std::time::{Duration, Instant};

use pictomino::core::{PieceId, PuzzleEvent, TilingGenerator, TilingParams};
use pictomino::engine::{BoardParams, PuzzleSession, SessionTuning};
use pictomino::init_logging;

/// Headless demo: generates a small puzzle, then solves it through the
/// public pointer interface, printing progress events along the way.
fn main() -> anyhow::Result<()> {
    init_logging()?;

    tracing::info!(
        version = pictomino::VERSION,
        built = pictomino::BUILD_DATE,
        "pictomino demo"
    );

    let params = TilingParams {
        cols: 6,
        rows: 4,
        seed: 0xC0FFEE,
        max_piece_cells: 4,
    };
    let set = TilingGenerator::new(params)?.generate("demo-picture".to_string());
    tracing::info!(pieces = set.defs().len(), "generated tiling");

    let board = BoardParams::default();
    let tuning = SessionTuning::default();
    let mut session = PuzzleSession::new(set, board, tuning)?;

    let mut events = session.events().receiver();

    // Synthetic clock so the demo does not sleep through the debounces.
    let mut clock = Instant::now();

    let anchor: PieceId = session
        .pieces()
        .first()
        .map(|p| p.id)
        .expect("session spawns at least one piece");

    while !session.is_completed() {
        let Some(next) = next_unassembled(&session, anchor) else {
            // Everything spawned so far is assembled; let the tracker run.
            clock += Duration::from_millis(1100);
            session.tick(clock);
            continue;
        };

        drag_into_place(&mut session, anchor, next, clock);
        clock += Duration::from_millis(1100);
        session.tick(clock);

        while let Ok(event) = events.try_recv() {
            if matches!(event, PuzzleEvent::Progress(_)) {
                tracing::info!("{}", event.description());
            }
        }
    }

    let progress = session.progress();
    tracing::info!(
        spawned = progress.spawned,
        total = progress.total,
        percent = progress.percent,
        "puzzle solved"
    );

    Ok(())
}

/// First spawned piece not yet in the anchor's group.
fn next_unassembled(session: &PuzzleSession, anchor: PieceId) -> Option<PieceId> {
    let group = session.piece(anchor)?.group;
    session
        .pieces()
        .iter()
        .find(|p| p.group != group)
        .map(|p| p.id)
}

/// Grab `piece` by its first covered cell and drop it at its correct offset
/// from `anchor`, which merges it into the anchor's group.
fn drag_into_place(session: &mut PuzzleSession, anchor: PieceId, piece: PieceId, now: Instant) {
    let board = *session.board();
    let (def_anchor, def_piece) = (
        session.set().def(anchor).expect("anchor def"),
        session.set().def(piece).expect("piece def"),
    );
    let offset = pictomino::expected_offset(def_anchor, def_piece, board.block_w, board.block_h);

    let anchor_pos = session.piece(anchor).expect("anchor state").position;
    let current = session.piece(piece).expect("piece state").position;

    let cell = def_piece.cells()[0];
    let grab_world = pictomino::Point::new(
        current.x + (cell.col as f64 + 0.5) * board.block_w,
        current.y + (cell.row as f64 + 0.5) * board.block_h,
    );
    let target_world = pictomino::Point::new(
        grab_world.x + (anchor_pos.x + offset.x - current.x),
        grab_world.y + (anchor_pos.y + offset.y - current.y),
    );

    let viewport = session.viewport();
    let grab_screen = viewport.world_to_screen(grab_world);
    let drop_screen = viewport.world_to_screen(target_world);

    session.pointer_down(grab_screen, now);
    session.pointer_move(drop_screen, now);
    session.pointer_up(now);
}
