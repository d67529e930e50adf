#![no_main]

//! Move sequence fuzzer.
//!
//! Replays arbitrary moves, golden moves and golden-move queries on a small board and
//! checks after every step that:
//! 1. Recorded area counts match a full recount
//! 2. No player exceeds the area limit
//! 3. Rejected operations leave the board untouched

use arbitrary::Arbitrary;
use gamma::Board;
use gamma::game::check_invariants;
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated operation.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzOp {
    Move { player: u8, x: u8, y: u8 },
    Golden { player: u8, x: u8, y: u8 },
    Query { player: u8 },
}

/// Structured input for move fuzzing.
#[derive(Arbitrary, Debug)]
struct MovesInput {
    width: u8,
    height: u8,
    players: u8,
    areas: u8,
    ops: Vec<FuzzOp>,
}

fuzz_target!(|input: MovesInput| {
    // Cap values to avoid excessive runtime
    let width = u32::from(input.width % 12) + 1;
    let height = u32::from(input.height % 12) + 1;
    let players = u32::from(input.players % 6) + 1;
    let areas = u32::from(input.areas % 5) + 1;

    let Ok(mut board) = Board::with_params(width, height, players, areas) else {
        return;
    };

    for op in input.ops.into_iter().take(200) {
        let before = board.clone();
        let changed = match op {
            FuzzOp::Move { player, x, y } => {
                board.try_move(player.into(), x.into(), y.into())
            }
            FuzzOp::Golden { player, x, y } => {
                board.try_golden_move(player.into(), x.into(), y.into())
            }
            FuzzOp::Query { player } => board.golden_possible(player.into()).map(|_| false),
        };
        let Ok(changed) = changed else {
            return;
        };

        if !changed {
            assert_eq!(board.grid(), before.grid(), "rejected {op:?} changed cells");
            for p in 1..=players {
                assert_eq!(board.player(p), before.player(p), "rejected {op:?} changed counters");
            }
        }

        let violations = check_invariants(&board);
        assert!(violations.is_empty(), "after {op:?}: {violations:?}");
    }
});
