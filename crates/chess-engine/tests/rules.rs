//! Integration tests for chess-engine: whole-game rule scenarios and
//! randomized playouts through the public API.

use chess_core::{Color, Move, MoveKind, PieceKind, Square};
use chess_engine::{
    all_legal_moves, is_in_check, GameResult, GameState, Position, SearchConfig, TerminalScoring,
};
use proptest::prelude::*;

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).expect("valid square")
}

fn play(game: &mut GameState, moves: &[&str]) {
    for text in moves {
        game.apply_coordinates(text)
            .unwrap_or_else(|e| panic!("{} should be legal: {}", text, e));
    }
}

#[test]
fn test_opening_move_count() {
    let game = GameState::new();
    assert_eq!(game.all_legal_moves().len(), 20);
    assert_eq!(game.side_to_move(), Color::White);
}

#[test]
fn test_black_has_twenty_replies_to_every_opening_move() {
    let start = GameState::new();
    let openings = start.all_legal_moves();
    assert_eq!(openings.len(), 20);

    for mv in openings {
        let mut game = start.clone();
        game.apply_move(mv).expect("opening move is legal");
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.all_legal_moves().len(), 20, "after {}", mv);
    }
}

#[test]
fn test_en_passant_capture_in_game() {
    let mut game = GameState::new();
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);

    let from_e5 = game.legal_moves(sq("e5"));
    let ep = from_e5
        .iter()
        .find(|m| m.to == sq("d6"))
        .copied()
        .expect("en passant onto d6");
    assert_eq!(ep.kind, MoveKind::EnPassant);

    let outcome = game.apply_move(ep).expect("en passant is legal");
    let captured = outcome.captured.expect("pawn captured");
    assert_eq!(captured.kind, PieceKind::Pawn);
    assert_eq!(captured.color, Color::Black);
    assert!(game.board().get(sq("d5")).is_none(), "d5 pawn removed");
    assert!(game.board().get(sq("e5")).is_none());
    assert_eq!(
        game.board().get(sq("d6")).map(|p| (p.kind, p.color)),
        Some((PieceKind::Pawn, Color::White))
    );
}

#[test]
fn test_en_passant_expires_after_one_move() {
    let mut game = GameState::new();
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5", "b1c3", "a6a5"]);
    assert!(
        !game.legal_moves(sq("e5")).iter().any(|m| m.to == sq("d6")),
        "en passant is only available immediately"
    );
}

#[test]
fn test_castling_after_clearing_the_back_rank() {
    let mut game = GameState::new();
    play(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"]);

    let outcome = game.apply_squares(sq("e1"), sq("g1")).expect("castle");
    assert_eq!(outcome.mv.kind, MoveKind::CastleKingside);
    assert_eq!(
        game.board().get(sq("f1")).map(|p| p.kind),
        Some(PieceKind::Rook)
    );
    assert!(game.board().get(sq("h1")).is_none());
}

#[test]
fn test_castling_revoked_by_rook_round_trip() {
    let mut game = GameState::new();
    play(
        &mut game,
        &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "h1g1", "a7a6", "g1h1", "a6a5"],
    );
    assert!(
        !game
            .legal_moves(sq("e1"))
            .iter()
            .any(|m| m.kind == MoveKind::CastleKingside),
        "rook moved away and back"
    );
}

#[test]
fn test_castling_revoked_by_king_round_trip() {
    let mut game = GameState::new();
    play(
        &mut game,
        &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1e2", "a7a6", "e2e1", "a6a5"],
    );
    assert!(!game
        .legal_moves(sq("e1"))
        .iter()
        .any(|m| m.kind.is_castling()));
}

#[test]
fn test_fools_mate() {
    let mut game = GameState::new();
    play(&mut game, &["f2f3", "e7e5", "g2g4"]);
    let outcome = game.apply_coordinates("d8h4").expect("mate");

    assert!(outcome.is_check);
    assert!(outcome.is_checkmate);
    assert!(!outcome.is_stalemate);
    assert_eq!(game.result(), Some(GameResult::BlackWins));
    assert!(game.all_legal_moves().is_empty());
}

#[test]
fn test_promotion_in_game() {
    let mut game = GameState::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").expect("valid FEN");
    let outcome = game.apply_coordinates("a7a8").expect("promotion");
    assert_eq!(outcome.mv.kind, MoveKind::Promotion);
    assert_eq!(
        game.board().get(sq("a8")).map(|p| p.kind),
        Some(PieceKind::Queen)
    );
}

#[test]
fn test_undo_restores_everything() {
    let mut game = GameState::new();
    play(&mut game, &["e2e4", "d7d5"]);
    let before = game.clone();

    play(&mut game, &["e4d5"]);
    assert_eq!(game.undo(), Some(Move::normal(sq("e4"), sq("d5"))));
    assert_eq!(game, before);
}

#[test]
fn test_illegal_moves_rejected() {
    let mut game = GameState::new();
    assert!(game.apply_coordinates("e2e5").is_err());
    assert!(game.apply_coordinates("e7e5").is_err(), "not Black's turn");
    assert!(game.apply_coordinates("zz").is_err());
    assert_eq!(game.ply_count(), 0);
}

#[test]
fn test_search_is_deterministic_from_a_game() {
    let mut game = GameState::new();
    play(&mut game, &["e2e4", "e7e5", "g1f3"]);
    let config = SearchConfig::with_depth(3);
    let first = game.search(&config);
    let second = game.search(&config);
    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.score, second.score);
    assert_eq!(first.nodes, second.nodes);
}

#[test]
fn test_search_finds_mate_in_one() {
    let mut game = GameState::new();
    play(&mut game, &["f2f3", "e7e5", "g2g4"]);
    let best = game.choose_best_move(2).expect("black has moves");
    assert_eq!(best, Move::normal(sq("d8"), sq("h4")));
}

#[test]
fn test_material_terminal_scoring_does_not_see_mate() {
    let mut game = GameState::new();
    play(&mut game, &["f2f3", "e7e5", "g2g4"]);
    let config = SearchConfig {
        depth: 2,
        terminal: TerminalScoring::Material,
    };
    let result = game.search(&config);
    assert!(result.best_move.is_some());
    assert!(result.score.abs() < 1000, "score {}", result.score);
}

#[test]
fn test_ai_vs_ai_short_game() {
    let mut game = GameState::new();
    for _ in 0..8 {
        let Some(mv) = game.choose_best_move(2) else {
            break;
        };
        let outcome = game.apply_move(mv).expect("search returns legal moves");
        if outcome.is_checkmate || outcome.is_stalemate {
            break;
        }
    }
    assert!(game.ply_count() > 0);
}

fn random_playout(seed: Vec<usize>) -> Vec<Position> {
    let mut positions = vec![Position::startpos()];
    let mut current = Position::startpos();
    for choice in seed {
        let moves = all_legal_moves(&current, current.side_to_move);
        if moves.is_empty() {
            break;
        }
        let (next, _) = current.make_move(moves[choice % moves.len()]);
        positions.push(next.clone());
        current = next;
    }
    positions
}

proptest! {
    #[test]
    fn legal_moves_never_leave_own_king_attacked(
        seed in prop::collection::vec(any::<usize>(), 0..40)
    ) {
        for pos in random_playout(seed) {
            let mover = pos.side_to_move;
            for m in all_legal_moves(&pos, mover) {
                let (next, _) = pos.make_move(m);
                prop_assert!(!is_in_check(&next.board, mover), "{} leaves king attacked", m);
                prop_assert_eq!(next.side_to_move, mover.opposite());
            }
        }
    }

    #[test]
    fn make_move_leaves_the_source_untouched(
        seed in prop::collection::vec(any::<usize>(), 0..30)
    ) {
        for pos in random_playout(seed) {
            let snapshot = pos.clone();
            for m in all_legal_moves(&pos, pos.side_to_move) {
                let from_original = pos.make_move(m);
                let from_clone = snapshot.clone().make_move(m);
                prop_assert_eq!(&from_original.0.board, &from_clone.0.board);
                prop_assert_eq!(from_original, from_clone);
            }
            prop_assert_eq!(&pos, &snapshot);
        }
    }

    #[test]
    fn both_kings_survive_random_play(
        seed in prop::collection::vec(any::<usize>(), 0..60)
    ) {
        for pos in random_playout(seed) {
            prop_assert!(pos.board.king_square(Color::White).is_some());
            prop_assert!(pos.board.king_square(Color::Black).is_some());
        }
    }
}
