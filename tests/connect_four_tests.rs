use quiggle::games::ConnectFour;
use quiggle::{ConnectFourState, GameState, GameVariant, MoveOutcome, Winner, C4_COLUMNS, C4_ROWS};

fn blank(turn: usize) -> ConnectFourState {
    ConnectFourState {
        players: [10, 20],
        guild_id: None,
        turn,
        board: [[None; C4_ROWS]; C4_COLUMNS],
        winner: None,
        winning_line: [[false; C4_ROWS]; C4_COLUMNS],
    }
}

fn load(state: ConnectFourState) -> ConnectFour {
    ConnectFour::deserialize(GameState::ConnectFour(state)).unwrap()
}

#[test]
fn test_vertical_win_marks_the_line() {
    let mut game = load(blank(1));
    for token in ["3", "0", "3", "0", "3", "0"] {
        let seat = game.turn();
        assert_eq!(game.apply_move(seat, token), MoveOutcome::TurnPassed);
    }
    assert_eq!(game.apply_move(1, "3"), MoveOutcome::Updated);
    assert_eq!(game.winner(), Some(Winner::Seat(1)));
    for row in 0..C4_ROWS {
        assert_eq!(game.is_winning(3, row), row < 4, "row {row}");
        assert!(!game.is_winning(0, row));
    }
    let render = game.render();
    assert!(render.body.contains("<@20> is the WINNER!"));
    assert!(render.rows.is_empty());
}

#[test]
fn test_diagonal_win() {
    let mut state = blank(0);
    state.board[0][0] = Some(0);
    state.board[1] = [Some(1), Some(0), None, None, None, None];
    state.board[2] = [Some(1), Some(1), Some(0), None, None, None];
    state.board[3] = [Some(1), Some(1), Some(0), None, None, None];
    let mut game = load(state);

    assert_eq!(game.apply_move(0, "3"), MoveOutcome::Updated);
    assert_eq!(game.disc(3, 3), Some(0));
    assert_eq!(game.winner(), Some(Winner::Seat(0)));
    for i in 0..4 {
        assert!(game.is_winning(i, i));
    }
}

#[test]
fn test_discs_fall_to_the_lowest_open_row() {
    let mut game = load(blank(0));
    game.apply_move(0, "5");
    game.apply_move(1, "5");
    assert_eq!(game.disc(5, 0), Some(0));
    assert_eq!(game.disc(5, 1), Some(1));
    assert_eq!(game.disc(5, 2), None);
}

#[test]
fn test_full_column_is_closed() {
    let mut game = load(blank(0));
    for _ in 0..C4_ROWS {
        let seat = game.turn();
        assert_eq!(game.apply_move(seat, "0"), MoveOutcome::TurnPassed);
    }
    assert!(!game.legal_moves().contains(&"0".to_string()));
    assert_eq!(game.legal_moves().len(), C4_COLUMNS - 1);
    let before = game.serialize();
    assert_eq!(game.apply_move(game.turn(), "0"), MoveOutcome::Rejected);
    assert_eq!(game.apply_move(game.turn(), "7"), MoveOutcome::Rejected);
    assert_eq!(game.serialize(), before);
    assert!(game.render().rows[0][0].is_disabled());
}

#[test]
fn test_full_board_without_run_is_tie() {
    let mut state = blank(0);
    // Columns alternate in pairs of rows so no run of four appears anywhere.
    for col in 0..C4_COLUMNS {
        for row in 0..C4_ROWS {
            let seat = ((row / 2) + col) % 2;
            state.board[col][row] = Some(seat);
        }
    }
    state.board[6][5] = None;
    let mut game = load(state);
    let seat = game.turn();
    assert_eq!(game.legal_moves(), vec!["6".to_string()]);
    game.apply_move(seat, "6");
    assert_eq!(game.winner(), Some(Winner::Tie));
}
