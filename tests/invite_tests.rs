use quiggle::invite::{ACCEPT, DECLINE};
use quiggle::{decode_message, GameKind, GameState, Invite, InviteOutcome, Notice, StateError};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_only_invitee_answers() {
    let mut rng = SmallRng::seed_from_u64(1);
    let invite = Invite::new(10, 20, GameKind::TicTacToe, Some(3));
    for token in [ACCEPT, DECLINE] {
        assert!(matches!(
            invite.respond(10, token, &mut rng),
            InviteOutcome::Private(Notice::InviterCannotRespond)
        ));
    }
    assert!(matches!(
        invite.respond(20, DECLINE, &mut rng),
        InviteOutcome::Declined
    ));
    assert!(matches!(
        invite.respond(20, "maybe", &mut rng),
        InviteOutcome::Ignored
    ));
}

#[test]
fn test_accept_starts_the_chosen_game() {
    let mut rng = SmallRng::seed_from_u64(2);
    for kind in GameKind::ALL {
        let invite = Invite::new(10, 20, kind, Some(3));
        let InviteOutcome::Accepted(game) = invite.respond(20, ACCEPT, &mut rng) else {
            panic!("{kind} was not accepted");
        };
        assert_eq!(game.kind(), kind);
        assert_eq!(game.guild_id(), Some(3));
        assert_eq!(game.winner(), None);
        let mut players = *game.players();
        players.sort();
        assert_eq!(players, [10, 20]);
    }
}

#[test]
fn test_self_challenge_can_be_answered() {
    let mut rng = SmallRng::seed_from_u64(3);
    let invite = Invite::new(7, 7, GameKind::ConnectFour, None);
    assert!(matches!(
        invite.respond(7, ACCEPT, &mut rng),
        InviteOutcome::Accepted(_)
    ));
}

#[test]
fn test_invite_message() {
    let invite = Invite::new(10, 20, GameKind::Battleship, None);
    let view = invite
        .render()
        .into_view(&invite.serialize(), invite.game().title())
        .unwrap();
    assert!(view
        .content
        .starts_with("<@20> you have been challenged to a game of\n```"));
    assert!(view.content.contains("[Battleship]"));
    assert!(view.content.ends_with("by <@10>, do you accept?"));
    assert_eq!(view.enabled_ids(), vec![ACCEPT, DECLINE]);

    let state = decode_message(&view.content).unwrap();
    assert_eq!(Invite::deserialize(state).unwrap(), invite);
}

#[test]
fn test_deserialize_wrong_variant() {
    let mut rng = SmallRng::seed_from_u64(4);
    let game = quiggle::Game::new(GameKind::TicTacToe, [1, 2], None, &mut rng);
    let state: GameState = game.serialize();
    assert_eq!(Invite::deserialize(state), Err(StateError::WrongVariant));
}
