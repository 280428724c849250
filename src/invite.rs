//! Pending challenge. Only the invitee can answer; `yes` builds the game.

use rand::Rng;

use crate::common::{GuildId, Seat, StateError, UserId};
use crate::domain::{GameKind, GameState, InviteState, Players};
use crate::games::{mention, Game, Notice};
use crate::render::{ButtonStyle, Component, Render};

pub const ACCEPT: &str = "yes";
pub const DECLINE: &str = "no";

/// Seat of the player who may answer.
const INVITEE: Seat = 1;

#[derive(Debug)]
pub enum InviteOutcome {
    Accepted(Game),
    /// The invite message should be removed.
    Declined,
    Private(Notice),
    /// Unknown token; nothing happens.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invite {
    players: Players,
    game: GameKind,
    guild_id: Option<GuildId>,
}

impl Invite {
    /// `challenger` invites `invitee` to a game of `game`.
    pub fn new(challenger: UserId, invitee: UserId, game: GameKind, guild_id: Option<GuildId>) -> Self {
        Invite {
            players: [challenger, invitee],
            game,
            guild_id,
        }
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn game(&self) -> GameKind {
        self.game
    }

    /// Answer on behalf of `user`.
    pub fn respond<R: Rng>(&self, user: UserId, token: &str, rng: &mut R) -> InviteOutcome {
        if user != self.players[INVITEE] {
            return InviteOutcome::Private(Notice::InviterCannotRespond);
        }
        match token {
            ACCEPT => {
                log::info!("invite accepted: {} between {:?}", self.game, self.players);
                InviteOutcome::Accepted(Game::new(self.game, self.players, self.guild_id, rng))
            }
            DECLINE => InviteOutcome::Declined,
            _ => InviteOutcome::Ignored,
        }
    }

    pub fn render(&self) -> Render {
        Render {
            lead: format!(
                "{} you have been challenged to a game of\n",
                mention(self.players[INVITEE])
            ),
            body: format!("by {}, do you accept?", mention(self.players[0])),
            rows: vec![vec![
                Component::button(ACCEPT, "Yes", ButtonStyle::Success),
                Component::button(DECLINE, "No", ButtonStyle::Danger),
            ]],
            ..Render::default()
        }
    }

    pub fn serialize(&self) -> GameState {
        GameState::Invite(InviteState {
            players: self.players,
            game: self.game,
            guild_id: self.guild_id,
        })
    }

    pub fn deserialize(state: GameState) -> Result<Self, StateError> {
        match state {
            GameState::Invite(s) => Ok(Invite {
                players: s.players,
                game: s.game,
                guild_id: s.guild_id,
            }),
            _ => Err(StateError::WrongVariant),
        }
    }
}
