use quiggle::games::Chess;
use quiggle::{ChessRules, ChessState, GameState, GameVariant, MoveOutcome, Side, StateError, Winner};
use rand::rngs::SmallRng;
use rand::SeedableRng;

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn load(board: &str) -> Chess {
    Chess::deserialize(GameState::Chess(ChessState {
        players: [10, 20],
        guild_id: None,
        board: board.to_string(),
        pending: None,
    }))
    .unwrap()
}

fn play(game: &mut Chess, uci: &str) -> MoveOutcome {
    let seat = game.turn();
    assert_eq!(game.apply_move(seat, &uci[..2]), MoveOutcome::Updated, "{uci}");
    game.apply_move(seat, uci)
}

#[test]
fn test_new_game_assigns_both_players() {
    for seed in 0..8 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let game = Chess::new([1, 2], None, &mut rng);
        let mut players = *game.players();
        players.sort();
        assert_eq!(players, [1, 2]);
        assert_eq!(game.turn(), 0);
        assert_eq!(game.rules().side_to_move(), Side::White);
    }
}

#[test]
fn test_opening_offers_sources_only() {
    let game = load(START);
    let moves = game.legal_moves();
    assert_eq!(moves.len(), 10);
    assert!(moves.iter().all(|m| m.len() == 2));
    assert!(moves.contains(&"g1".to_string()));
}

#[test]
fn test_two_step_move() {
    let mut game = load(START);
    assert_eq!(game.apply_move(0, "e2"), MoveOutcome::Updated);
    assert_eq!(game.pending(), Some("e2"));
    let moves = game.legal_moves();
    assert!(moves.contains(&"e2e3".to_string()));
    assert!(moves.contains(&"e2e4".to_string()));
    assert!(!moves.contains(&"d2d4".to_string()));

    // Picking another source replaces the pending one.
    assert_eq!(game.apply_move(0, "d2"), MoveOutcome::Updated);
    assert_eq!(game.apply_move(0, "e2e4"), MoveOutcome::Rejected);
    assert_eq!(game.apply_move(0, "d2d4"), MoveOutcome::TurnPassed);
    assert_eq!(game.pending(), None);
    assert_eq!(game.turn(), 1);
    assert_eq!(game.winner(), None);
}

#[test]
fn test_rejects_unknown_tokens() {
    let mut game = load(START);
    let before = game.serialize();
    for token in ["e4", "e2e5", "z9", "", "e2e4q"] {
        assert_eq!(game.apply_move(0, token), MoveOutcome::Rejected, "{token}");
    }
    assert_eq!(game.serialize(), before);
}

#[test]
fn test_fools_mate_goes_to_the_mating_side() {
    let mut game = load(START);
    assert_eq!(play(&mut game, "f2f3"), MoveOutcome::TurnPassed);
    assert_eq!(play(&mut game, "e7e5"), MoveOutcome::TurnPassed);
    assert_eq!(play(&mut game, "g2g4"), MoveOutcome::TurnPassed);
    assert_eq!(play(&mut game, "d8h4"), MoveOutcome::Updated);
    assert!(game.rules().is_checkmate());
    assert_eq!(game.winner(), Some(Winner::Seat(1)));
    assert!(game.legal_moves().is_empty());

    let render = game.render();
    assert!(render.embeds[0].title.contains("Black is the WINNER!"));
    assert_eq!(render.body, "<@20>");
    assert!(render.rows.is_empty());

    // The outcome is derived again from the stored position.
    let reloaded = Chess::deserialize(game.serialize()).unwrap();
    assert_eq!(reloaded.winner(), Some(Winner::Seat(1)));
}

#[test]
fn test_stalemate_is_a_tie() {
    let game = load("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert_eq!(game.winner(), Some(Winner::Tie));
    assert!(game.legal_moves().is_empty());
    assert!(game.render().embeds[0].title.contains("Stalemate"));
}

#[test]
fn test_check_is_shown() {
    let mut game = load("4k3/8/8/8/8/8/4q3/4K3 w - - 0 1");
    assert!(game.rules().is_check());
    assert!(game.render().embeds[0].title.contains("Check!"));
    assert_eq!(play(&mut game, "e1e2"), MoveOutcome::TurnPassed);
}

#[test]
fn test_promotion_destinations() {
    let mut game = load("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
    assert_eq!(game.apply_move(0, "e7"), MoveOutcome::Updated);
    let moves = game.legal_moves();
    for uci in ["e7e8q", "e7e8r", "e7e8b", "e7e8n"] {
        assert!(moves.contains(&uci.to_string()), "{uci}");
    }
    assert_eq!(game.apply_move(0, "e7e8q"), MoveOutcome::TurnPassed);
}

#[test]
fn test_destination_menus_are_chunked() {
    let mut game = load("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1");
    game.apply_move(0, "d4");
    let render = game.render();
    // The queen on d4 has 27 moves, so two destination menus follow the source menu.
    assert_eq!(render.rows.len(), 3);
    assert_eq!(render.rows[1][0].id(), Some("select|-1"));
    assert_eq!(render.rows[2][0].id(), Some("select|20"));
}

#[test]
fn test_rejects_bad_position_text() {
    let err = Chess::deserialize(GameState::Chess(ChessState {
        players: [1, 2],
        guild_id: None,
        board: "not a position".to_string(),
        pending: None,
    }));
    assert!(matches!(err, Err(StateError::Position(_))));
}

#[test]
fn test_rejects_positions_without_one_king_per_side() {
    for board in [
        "8/8/8/8/8/8/8/8 w - - 0 1",
        "4k3/8/8/8/8/8/8/8 w - - 0 1",
        "4k3/8/8/8/8/8/8/3KK3 w - - 0 1",
    ] {
        let err = Chess::deserialize(GameState::Chess(ChessState {
            players: [1, 2],
            guild_id: None,
            board: board.to_string(),
            pending: None,
        }));
        assert!(matches!(err, Err(StateError::Position(_))), "{board}");
    }
}
