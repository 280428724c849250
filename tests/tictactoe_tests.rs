use quiggle::games::TicTacToe;
use quiggle::{GameState, GameVariant, Grid3, MoveOutcome, StateError, TicTacToeState, Winner};

fn fresh(turn: usize) -> TicTacToe {
    TicTacToe::deserialize(GameState::TicTacToe(TicTacToeState {
        players: [10, 20],
        guild_id: Some(99),
        turn,
        board: Grid3::default(),
        winner: None,
    }))
    .unwrap()
}

#[test]
fn test_diagonal_win_on_fifth_ply() {
    let mut game = fresh(0);
    let plies = [(0, "0|0"), (1, "1|0"), (0, "1|1"), (1, "0|2")];
    for (seat, token) in plies {
        assert_eq!(game.turn(), seat);
        assert_eq!(game.apply_move(seat, token), MoveOutcome::TurnPassed);
    }
    assert_eq!(game.apply_move(0, "2|2"), MoveOutcome::Updated);
    assert_eq!(game.winner(), Some(Winner::Seat(0)));
    assert_eq!(game.turn(), 0);
    assert!(game.legal_moves().is_empty());
    assert!(game.render().body.contains("<@10> is the WINNER!"));
}

#[test]
fn test_tokens_address_column_then_row() {
    let mut game = fresh(1);
    game.apply_move(1, "2|0");
    assert_eq!(game.board()[0][2], Some(1));
    assert_eq!(game.board()[2][0], None);
}

#[test]
fn test_full_board_without_line_is_tie() {
    let mut game = fresh(0);
    let tokens = ["0|0", "1|0", "2|0", "1|1", "0|1", "0|2", "1|2", "2|1", "2|2"];
    for token in &tokens[..8] {
        let seat = game.turn();
        assert_eq!(game.apply_move(seat, token), MoveOutcome::TurnPassed);
    }
    assert_eq!(game.apply_move(0, tokens[8]), MoveOutcome::Updated);
    assert_eq!(game.winner(), Some(Winner::Tie));
    assert!(game.render().body.contains("TIE!"));
}

#[test]
fn test_illegal_tokens_change_nothing() {
    let mut game = fresh(0);
    game.apply_move(0, "1|1");
    let before = game.serialize();
    for token in ["1|1", "3|0", "0|3", "", "garbage", "1|", "-1|0"] {
        assert_eq!(game.apply_move(1, token), MoveOutcome::Rejected, "{token}");
    }
    assert_eq!(game.serialize(), before);
    assert_eq!(game.turn(), 1);
}

#[test]
fn test_render_disables_taken_cells() {
    let mut game = fresh(0);
    game.apply_move(0, "0|0");
    let render = game.render();
    assert_eq!(render.rows.len(), 3);
    assert!(render.rows[0][0].is_disabled());
    assert!(!render.rows[1][1].is_disabled());
    assert!(render.body.contains("<@20>'s turn!"));
}

#[test]
fn test_rejects_out_of_range_seats() {
    let mut board = Grid3::default();
    board[1][1] = Some(2);
    let err = TicTacToe::deserialize(GameState::TicTacToe(TicTacToeState {
        players: [1, 2],
        guild_id: None,
        turn: 0,
        board,
        winner: None,
    }));
    assert_eq!(err, Err(StateError::SeatOutOfRange(2)));

    let bad_turn = TicTacToeState {
        players: [1, 2],
        guild_id: None,
        turn: 5,
        board: Grid3::default(),
        winner: None,
    };
    assert!(TicTacToe::deserialize(GameState::TicTacToe(bad_turn)).is_err());
}
