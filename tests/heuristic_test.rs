//! Tests for the computer's move-selection cascade.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use tictactoe_engine::{
    Board, GameConfig, GameEngine, Mark, Position, Square, best_choice, choose_move,
};

const TOP_ROW: [Position; 3] = [Position::LeftTop, Position::CenterTop, Position::RightTop];

fn board_with(marks: &[(Position, Mark)]) -> Board {
    let mut board = Board::new();
    for (pos, mark) in marks {
        board.set(*pos, Square::Occupied(*mark));
    }
    board
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(99)
}

/// Runs a randomized choice across many seeds and collects every
/// distinct outcome, to pin down the exact candidate set.
fn outcomes(board: &Board, f: impl Fn(&Board, &mut StdRng) -> Option<Position>) -> HashSet<Position> {
    let mut seen = HashSet::new();
    for seed in 0..128 {
        let mut rng = StdRng::seed_from_u64(seed);
        if let Some(pos) = f(board, &mut rng) {
            seen.insert(pos);
        }
    }
    seen
}

// ── best_choice exhaustive table ─────────────────────────────────

#[test]
fn best_choice_completes_a_two_marked_triple() {
    use Position::*;
    let cases = [
        (vec![CenterTop, RightTop], LeftTop),
        (vec![LeftTop, RightTop], CenterTop),
        (vec![LeftTop, CenterTop], RightTop),
    ];
    for (marked, expected) in cases {
        let pairs: Vec<(Position, Mark)> = marked.iter().map(|p| (*p, Mark::X)).collect();
        let board = board_with(&pairs);
        assert_eq!(
            best_choice(&board, &TOP_ROW, Mark::X, &mut rng()),
            Some(expected)
        );
    }
}

#[test]
fn best_choice_single_mark_yields_exactly_the_two_neighbors() {
    use Position::*;
    let cases = [
        (LeftTop, [CenterTop, RightTop]),
        (CenterTop, [LeftTop, RightTop]),
        (RightTop, [LeftTop, CenterTop]),
    ];
    for (marked, expected) in cases {
        let board = board_with(&[(marked, Mark::X)]);
        let seen = outcomes(&board, |b, r| best_choice(b, &TOP_ROW, Mark::X, r));
        assert_eq!(seen, HashSet::from(expected), "marked {marked}");
    }
}

#[test]
fn best_choice_rejects_empty_and_contaminated_triples() {
    use Position::*;
    // Fully empty triple.
    assert_eq!(best_choice(&Board::new(), &TOP_ROW, Mark::X, &mut rng()), None);

    // Opponent mark breaks the pattern.
    let board = board_with(&[(LeftTop, Mark::X), (CenterTop, Mark::O)]);
    assert_eq!(best_choice(&board, &TOP_ROW, Mark::X, &mut rng()), None);

    // Only opponent marks present.
    let board = board_with(&[(LeftTop, Mark::O), (RightTop, Mark::O)]);
    assert_eq!(best_choice(&board, &TOP_ROW, Mark::X, &mut rng()), None);

    // Full triple has nothing to offer.
    let board = board_with(&[
        (LeftTop, Mark::X),
        (CenterTop, Mark::X),
        (RightTop, Mark::X),
    ]);
    assert_eq!(best_choice(&board, &TOP_ROW, Mark::X, &mut rng()), None);
}

// ── Cascade priorities ───────────────────────────────────────────

#[test]
fn rule_one_takes_the_open_center() {
    let board = Board::new();
    assert_eq!(
        choose_move(&board, Mark::X, &mut rng()),
        Some(Position::CenterMiddle)
    );
}

#[test]
fn rule_two_wins_before_rule_three_blocks() {
    use Position::*;
    let board = board_with(&[
        (LeftTop, Mark::X),
        (CenterTop, Mark::X),
        (LeftMiddle, Mark::O),
        (CenterMiddle, Mark::O),
    ]);
    assert_eq!(choose_move(&board, Mark::O, &mut rng()), Some(RightMiddle));
}

#[test]
fn rule_three_blocks_the_opponent() {
    use Position::*;
    let board = board_with(&[
        (CenterMiddle, Mark::O),
        (LeftBottom, Mark::X),
        (CenterBottom, Mark::X),
    ]);
    assert_eq!(choose_move(&board, Mark::O, &mut rng()), Some(RightBottom));
}

#[test]
fn rule_six_candidates_are_exactly_the_open_corners() {
    use Position::*;
    // Computer holds the center; the opponent's two edge marks give
    // rules 2-5 nothing, so the cascade falls through to the corners.
    let board = board_with(&[
        (CenterTop, Mark::X),
        (CenterMiddle, Mark::O),
        (CenterBottom, Mark::X),
    ]);
    let seen = outcomes(&board, |b, r| choose_move(b, Mark::O, r));
    assert_eq!(
        seen,
        HashSet::from([LeftTop, RightTop, LeftBottom, RightBottom])
    );
}

// ── Fork defense through the engine ──────────────────────────────

#[test]
fn diagonal_corner_pair_is_answered_with_a_counter_threat() {
    // X left-top, O center, X right-bottom: the double-corner fork is
    // met by taking the top edge, which threatens the center column.
    let mut engine = GameEngine::with_seed(GameConfig::default(), 21);
    engine.play(Position::LeftTop);
    assert_eq!(
        engine.square(Position::CenterMiddle),
        Square::Occupied(Mark::O)
    );

    engine.play(Position::RightBottom);
    assert_eq!(
        engine.square(Position::CenterTop),
        Square::Occupied(Mark::O)
    );
}

#[test]
fn l_shaped_corner_threat_is_taken_preemptively() {
    use Position::*;
    // X feeds the left-top corner via center-top and left-middle.
    let board = board_with(&[
        (CenterTop, Mark::X),
        (LeftMiddle, Mark::X),
        (CenterMiddle, Mark::O),
    ]);
    assert_eq!(choose_move(&board, Mark::O, &mut rng()), Some(LeftTop));
}
