use quiggle::games::Battleship;
use quiggle::{GameVariant, MoveOutcome, Notice, Shot, Winner, FLEET, NUM_SHIPS, TOTAL_SHIP_CELLS};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn new_game(seed: u64) -> Battleship {
    let mut rng = SmallRng::seed_from_u64(seed);
    Battleship::new([10, 20], Some(1), &mut rng)
}

/// Ship `i` goes along row `i`, starting in the first column.
fn deploy(game: &mut Battleship, seat: usize) -> Vec<MoveOutcome> {
    let mut outcomes = Vec::new();
    for row in 0..NUM_SHIPS {
        assert_eq!(game.apply_move(seat, &format!("x|{}", row)), MoveOutcome::Updated);
        assert_eq!(game.apply_move(seat, "y|0"), MoveOutcome::Updated);
        outcomes.push(game.apply_move(seat, "d|3"));
    }
    outcomes
}

fn ready(seed: u64) -> Battleship {
    let mut game = new_game(seed);
    deploy(&mut game, 0);
    deploy(&mut game, 1);
    game
}

fn fire(game: &mut Battleship, seat: usize, row: usize, col: usize) -> MoveOutcome {
    let first = game.apply_move(seat, &format!("x|{}", row));
    if first != MoveOutcome::Updated {
        return first;
    }
    game.apply_move(seat, &format!("y|{}", col))
}

#[test]
fn test_setup_ends_when_both_fleets_are_placed() {
    let mut game = new_game(3);
    assert!(game.in_setup());
    assert_eq!(game.awaiting(), None);

    let first = deploy(&mut game, 1);
    assert!(first.iter().all(|o| *o == MoveOutcome::Updated));
    assert!(game.fleet(1).is_deployed());
    assert!(game.in_setup());

    let second = deploy(&mut game, 0);
    assert_eq!(second[NUM_SHIPS - 1], MoveOutcome::TurnPassed);
    assert!(!game.in_setup());
    assert_eq!(game.awaiting(), Some(game.turn()));
    assert!(game.render().body.contains("'s turn!"));
}

#[test]
fn test_setup_advisories() {
    let mut game = new_game(4);

    match game.apply_move(0, "d|1") {
        MoveOutcome::Private(Notice::PickDirectionLast(map)) => assert!(map.contains("Carrier")),
        other => panic!("unexpected {:?}", other),
    }

    game.apply_move(0, "x|0");
    game.apply_move(0, "y|8");
    assert_eq!(
        game.apply_move(0, "d|3"),
        MoveOutcome::Private(Notice::InvalidPlacement)
    );
    // The selection survives a refused placement.
    assert_eq!(game.selection(0).cell(), Some((0, 8)));
    assert_eq!(game.apply_move(0, "d|2"), MoveOutcome::Updated);

    game.apply_move(0, "x|0");
    game.apply_move(0, "y|7");
    assert_eq!(
        game.apply_move(0, "d|1"),
        MoveOutcome::Private(Notice::InvalidPlacement)
    );

    let mut done = new_game(4);
    deploy(&mut done, 0);
    assert_eq!(
        done.apply_move(0, "x|9"),
        MoveOutcome::Private(Notice::NoShipsLeft)
    );
    match done.apply_move(0, "MAP") {
        MoveOutcome::Private(Notice::Map(map)) => assert!(map.contains("waiting on other player")),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_off_turn_player_only_sees_map() {
    let mut game = ready(5);
    let idle = 1 - game.turn();
    assert_eq!(
        game.apply_move(idle, "x|3"),
        MoveOutcome::Private(Notice::MapOnlyOffTurn)
    );
    assert!(matches!(
        game.apply_move(idle, "MAP"),
        MoveOutcome::Private(Notice::Map(_))
    ));
    assert_eq!(game.apply_move(game.turn(), "d|0"), MoveOutcome::Rejected);
}

#[test]
fn test_already_targeted_cell() {
    let mut game = ready(6);
    let shooter = game.turn();
    assert_eq!(fire(&mut game, shooter, 9, 9), MoveOutcome::TurnPassed);
    assert_eq!(game.shots(shooter)[9][9], Shot::Miss);
    assert!(game.render().body.contains("MISS!"));

    let other = game.turn();
    assert_eq!(fire(&mut game, other, 0, 0), MoveOutcome::TurnPassed);
    assert!(game.render().body.contains("HIT!"));

    assert_eq!(
        fire(&mut game, shooter, 9, 9),
        MoveOutcome::Private(Notice::AlreadyTargeted)
    );
    assert_eq!(game.turn(), shooter);
}

#[test]
fn test_sinking_every_ship_wins() {
    let mut game = ready(7);
    let shooter = game.turn();
    let idle = 1 - shooter;
    let targets: Vec<(usize, usize)> = FLEET
        .iter()
        .enumerate()
        .flat_map(|(row, ship)| (0..ship.length()).map(move |col| (row, col)))
        .collect();
    assert_eq!(targets.len(), TOTAL_SHIP_CELLS);
    let mut misses = (8..10).flat_map(|row| (0..10).map(move |col| (row, col)));

    for (i, (row, col)) in targets.iter().enumerate() {
        let outcome = fire(&mut game, shooter, *row, *col);
        if i + 1 < targets.len() {
            assert_eq!(outcome, MoveOutcome::TurnPassed);
            assert_eq!(game.winner(), None);
            let (r, c) = misses.next().unwrap();
            assert_eq!(fire(&mut game, idle, r, c), MoveOutcome::TurnPassed);
            assert_eq!(game.winner(), None);
        } else {
            assert_eq!(outcome, MoveOutcome::Updated);
        }
    }
    assert_eq!(game.hits(shooter), TOTAL_SHIP_CELLS);
    assert_eq!(game.hits(idle), 0);
    assert_eq!(game.winner(), Some(Winner::Seat(shooter)));
    assert!(game.legal_moves().is_empty());
    assert_eq!(game.awaiting(), None);

    let render = game.render();
    assert!(render.body.contains("is the WINNER!"));
    assert_eq!(render.embeds.len(), 2);
    assert!(render.rows.is_empty());
}

#[test]
fn test_round_trip_drops_shot_feedback() {
    let mut game = ready(8);
    let shooter = game.turn();
    fire(&mut game, shooter, 0, 0);
    let reloaded = Battleship::deserialize(game.serialize()).unwrap();
    assert_eq!(reloaded.shots(shooter)[0][0], Shot::Hit);
    assert!(!reloaded.render().body.contains("HIT!"));
}
