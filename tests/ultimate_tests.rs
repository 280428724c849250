use quiggle::games::UltimateTicTacToe;
use quiggle::{GameState, GameVariant, Grid3, MoveOutcome, StateError, UltimateState, Winner};

fn blank(turn: usize) -> UltimateState {
    UltimateState {
        players: [10, 20],
        guild_id: None,
        turn,
        boards: Default::default(),
        board_winners: Default::default(),
        current_board: None,
        winner: None,
    }
}

fn load(state: UltimateState) -> UltimateTicTacToe {
    UltimateTicTacToe::deserialize(GameState::UltimateTicTacToe(state)).unwrap()
}

#[test]
fn test_picking_a_board_keeps_the_turn() {
    let mut game = load(blank(0));
    assert_eq!(game.legal_moves().len(), 9);
    assert_eq!(game.apply_move(0, "1|1"), MoveOutcome::Updated);
    assert_eq!(game.turn(), 0);
    assert_eq!(game.current_board(), Some((1, 1)));
    assert!(!game.render().body.contains("pick a board"));
}

#[test]
fn test_cell_sends_opponent_to_matching_board() {
    let mut game = load(blank(0));
    game.apply_move(0, "1|1");
    assert_eq!(game.apply_move(0, "2|0"), MoveOutcome::TurnPassed);
    assert_eq!(game.sub_board(1, 1)[0][2], Some(0));
    assert_eq!(game.turn(), 1);
    assert_eq!(game.current_board(), Some((0, 2)));
    assert_eq!(game.legal_moves().len(), 9);
}

#[test]
fn test_sent_to_resolved_board_frees_the_choice() {
    let mut state = blank(1);
    state.board_winners[0][0] = Some(Winner::Tie);
    state.current_board = Some((1, 1));
    let mut game = load(state);

    assert_eq!(game.apply_move(1, "0|0"), MoveOutcome::TurnPassed);
    assert_eq!(game.current_board(), None);
    let moves = game.legal_moves();
    assert_eq!(moves.len(), 8);
    assert!(!moves.contains(&"0|0".to_string()));
    assert!(game.render().body.contains("pick a board!"));
}

#[test]
fn test_winning_top_row_of_boards_ends_the_game() {
    let mut state = blank(0);
    state.board_winners[0][0] = Some(Winner::Seat(0));
    state.board_winners[0][1] = Some(Winner::Seat(0));
    state.boards[0][2][0][0] = Some(0);
    state.boards[0][2][0][1] = Some(0);
    state.boards[0][2][1][1] = Some(1);
    state.boards[0][2][2][2] = Some(1);
    state.current_board = Some((0, 2));
    let mut game = load(state);

    assert_eq!(game.apply_move(0, "2|0"), MoveOutcome::Updated);
    assert_eq!(game.board_winners()[0][2], Some(Winner::Seat(0)));
    assert_eq!(game.winner(), Some(Winner::Seat(0)));
    assert_eq!(game.current_board(), None);
    assert!(game.legal_moves().is_empty());
    assert_eq!(game.apply_move(1, "0|0"), MoveOutcome::Rejected);
}

#[test]
fn test_full_sub_board_resolves_as_tie() {
    let mut state = blank(0);
    // x o x / x o o / o x _
    let grid: Grid3 = [
        [Some(0), Some(1), Some(0)],
        [Some(0), Some(1), Some(1)],
        [Some(1), Some(0), None],
    ];
    state.boards[2][2] = grid;
    state.current_board = Some((2, 2));
    let mut game = load(state);

    assert_eq!(game.apply_move(0, "2|2"), MoveOutcome::TurnPassed);
    assert_eq!(game.board_winners()[2][2], Some(Winner::Tie));
    assert_eq!(game.winner(), None);
    // (2, 2) is now resolved, so the next player picks freely.
    assert_eq!(game.current_board(), None);
}

#[test]
fn test_rejects_cells_outside_current_board() {
    let mut state = blank(0);
    state.boards[1][1][0][0] = Some(1);
    state.current_board = Some((1, 1));
    let mut game = load(state);
    let before = game.serialize();
    assert_eq!(game.apply_move(0, "0|0"), MoveOutcome::Rejected);
    assert_eq!(game.apply_move(0, "3|1"), MoveOutcome::Rejected);
    assert_eq!(game.serialize(), before);
}

#[test]
fn test_rejects_current_board_out_of_range() {
    let mut state = blank(0);
    state.current_board = Some((3, 0));
    assert_eq!(
        UltimateTicTacToe::deserialize(GameState::UltimateTicTacToe(state)),
        Err(StateError::OutOfRange(3, 0))
    );
}

#[test]
fn test_render_links_rules_and_draws_all_cells() {
    let game = load(blank(0));
    let render = game.render();
    assert_eq!(render.rows.len(), 4);
    assert!(render.rows[3][0].id().is_none());
    assert_eq!(render.header.matches('_').count(), 81);
}
