//! Direct message to the player who has to act next.

use crate::games::Game;
use crate::protocol::Direct;
use crate::render::{Component, View};
use crate::settings::{Setting, SettingsStore};

/// Build the turn notification for `game`, if someone is waiting on a
/// single player and that player wants these messages. `link` points back
/// to the game message.
pub async fn turn_notice<S>(settings: &S, game: &Game, link: Option<&str>) -> Option<Direct>
where
    S: SettingsStore + ?Sized,
{
    let seat = game.awaiting()?;
    let user = game.players()[seat];
    match settings.get(user, Setting::DmNotifications).await {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("could not read {} for {}: {}", Setting::DmNotifications, user, e);
            return None;
        }
    }
    let text = format!(
        "It's your turn in a game of {}!\n`psst, don't like the DMs? turn them off with /boolsettings {} false`",
        game.kind().title(),
        Setting::DmNotifications
    );
    let rows = link
        .map(|url| vec![vec![Component::link("Jump to game!", url)]])
        .unwrap_or_default();
    Some(Direct {
        user,
        view: View::text(text).with_rows(rows),
    })
}
