//! One request/response cycle: decode the token carried by the message,
//! rebuild the game, authorize the actor, apply the move, re-render.
//!
//! Nothing survives between cycles except what is re-encoded into the reply.

use rand::rngs::SmallRng;
use tokio::sync::Mutex;

use crate::codec::decode_message;
use crate::common::{Seat, UserId};
use crate::domain::GameState;
use crate::games::{Game, MoveOutcome, Notice};
use crate::invite::{Invite, InviteOutcome};
use crate::notify::turn_notice;
use crate::protocol::{Challenge, Direct, Interaction, Reply, SettingUpdate};
use crate::render::View;
use crate::settings::SettingsStore;

/// Runtime switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Let a user challenge themself.
    pub allow_self_play: bool,
}

/// Everything produced for one interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handled {
    pub reply: Reply,
    /// Turn notification to deliver after the reply.
    pub direct: Option<Direct>,
}

impl Handled {
    fn reply(reply: Reply) -> Self {
        Handled { reply, direct: None }
    }

    fn notice(notice: Notice) -> Self {
        Self::reply(Reply::Private(notice.to_string()))
    }
}

pub struct Dispatcher<S: SettingsStore> {
    settings: S,
    config: DispatchConfig,
    rng: Mutex<SmallRng>,
}

/// Public view of a running game.
pub fn game_view(game: &Game) -> anyhow::Result<View> {
    Ok(game.render().into_view(&game.serialize(), game.kind().title())?)
}

fn invite_view(invite: &Invite) -> anyhow::Result<View> {
    Ok(invite
        .render()
        .into_view(&invite.serialize(), invite.game().title())?)
}

/// Seat `user` acts from. A user holding both seats acts from the one
/// whose turn it is, or during battleship setup from the first fleet still
/// being placed.
fn seat_of(game: &Game, user: UserId) -> Option<Seat> {
    if let Game::Battleship(b) = game {
        if b.in_setup() && game.players().iter().all(|p| *p == user) {
            return Some((0..2).find(|s| !b.fleet(*s).is_deployed()).unwrap_or(0));
        }
    }
    let turn = game.turn();
    if game.players()[turn] == user {
        return Some(turn);
    }
    game.players().iter().position(|p| *p == user)
}

impl<S: SettingsStore> Dispatcher<S> {
    pub fn new(settings: S, config: DispatchConfig, rng: SmallRng) -> Self {
        Dispatcher {
            settings,
            config,
            rng: Mutex::new(rng),
        }
    }

    /// Handle a button press or menu pick on a game message.
    pub async fn handle(&self, event: &Interaction) -> anyhow::Result<Handled> {
        let state = match decode_message(&event.content) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("interaction {}: {}", event.id, e);
                return Ok(Handled::notice(Notice::DecodeFailed));
            }
        };
        if !state.players().contains(&event.user) {
            return Ok(Handled::notice(Notice::NotInGame));
        }
        let token = if event.custom_id.starts_with("select") {
            event.values.first().cloned().unwrap_or_default()
        } else {
            event.custom_id.clone()
        };

        if let GameState::Invite(_) = state {
            let invite = Invite::deserialize(state)?;
            return self.answer_invite(&invite, event, &token).await;
        }

        let mut game = match Game::from_state(state) {
            Ok(game) => game,
            Err(e) => {
                log::warn!("interaction {}: {}", event.id, e);
                return Ok(Handled::notice(Notice::DecodeFailed));
            }
        };
        let Some(seat) = seat_of(&game, event.user) else {
            return Ok(Handled::notice(Notice::NotInGame));
        };
        if !game.acts_off_turn() && seat != game.turn() {
            return Ok(Handled::notice(Notice::NotYourTurn));
        }

        let outcome = game.apply_move(seat, &token);
        log::debug!("interaction {}: {} by seat {} -> {:?}", event.id, token, seat, outcome);
        let reply = match &outcome {
            MoveOutcome::Private(notice) => return Ok(Handled::notice(notice.clone())),
            MoveOutcome::Rejected | MoveOutcome::Updated | MoveOutcome::TurnPassed => {
                Reply::Update(game_view(&game)?)
            }
        };
        if outcome.changed() {
            if let Some(winner) = game.winner() {
                log::info!("{} finished: {:?} ({:?})", game.kind(), winner, game.players());
            }
        }
        let direct = if outcome.applied() {
            turn_notice(&self.settings, &game, event.link.as_deref()).await
        } else {
            None
        };
        Ok(Handled { reply, direct })
    }

    async fn answer_invite(
        &self,
        invite: &Invite,
        event: &Interaction,
        token: &str,
    ) -> anyhow::Result<Handled> {
        let outcome = {
            let mut rng = self.rng.lock().await;
            invite.respond(event.user, token, &mut *rng)
        };
        match outcome {
            InviteOutcome::Accepted(game) => {
                log::info!("{} started: {:?}", game.kind(), game.players());
                let view = game_view(&game)?;
                let direct = turn_notice(&self.settings, &game, event.link.as_deref()).await;
                Ok(Handled {
                    reply: Reply::Update(view),
                    direct,
                })
            }
            InviteOutcome::Declined => Ok(Handled::reply(Reply::Delete)),
            InviteOutcome::Private(notice) => Ok(Handled::notice(notice)),
            InviteOutcome::Ignored => Ok(Handled::reply(Reply::Update(invite_view(invite)?))),
        }
    }

    /// Validate a challenge and post the invite.
    pub fn challenge(&self, request: &Challenge) -> anyhow::Result<Reply> {
        if request.author_is_bot {
            return Ok(Reply::Private("Sorry, you're a bot".to_string()));
        }
        if request.invitee_is_bot {
            return Ok(Reply::Private("You can't play against a bot".to_string()));
        }
        if request.author == request.invitee && !self.config.allow_self_play {
            return Ok(Reply::Private("You can't play against yourself".to_string()));
        }
        let invite = Invite::new(request.author, request.invitee, request.game, request.guild_id);
        log::info!(
            "{} challenged {} to {}",
            request.author,
            request.invitee,
            request.game
        );
        Ok(Reply::Create(invite_view(&invite)?))
    }

    /// Store a preference and confirm it privately.
    pub async fn update_setting(&self, request: &SettingUpdate) -> anyhow::Result<Reply> {
        self.settings
            .set(request.user, request.setting, request.value)
            .await?;
        Ok(Reply::Private(format!(
            "Setting updated!\n`{}: {}`",
            request.setting, request.value
        )))
    }

    /// Decode a bare token or a whole message and draw it again.
    pub fn inspect(&self, text: &str) -> anyhow::Result<View> {
        match decode_message(text.trim())? {
            state @ GameState::Invite(_) => invite_view(&Invite::deserialize(state)?),
            state => game_view(&Game::from_state(state)?),
        }
    }
}
