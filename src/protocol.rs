use crate::common::{GuildId, UserId};
use crate::domain::GameKind;
use crate::render::View;
use crate::settings::Setting;

/// A user pressed a button or picked a menu option on a game message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    /// Correlates the [`Message::Reply`].
    pub id: u64,
    pub user: UserId,
    pub custom_id: String,
    /// Picked values when the component is a select menu.
    pub values: Vec<String>,
    /// Full text of the message the component belongs to.
    pub content: String,
    /// Link to that message, used by turn notifications.
    pub link: Option<String>,
}

/// A user asked to challenge another user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub id: u64,
    pub author: UserId,
    pub author_is_bot: bool,
    pub invitee: UserId,
    pub invitee_is_bot: bool,
    pub game: GameKind,
    pub guild_id: Option<GuildId>,
}

/// A user changed one of their preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingUpdate {
    pub id: u64,
    pub user: UserId,
    pub setting: Setting,
    pub value: bool,
}

/// How to answer an inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Post a new public message.
    Create(View),
    /// Replace the message the interaction came from.
    Update(View),
    /// Answer only the actor; nothing is stored.
    Private(String),
    /// Remove the message the interaction came from.
    Delete,
}

/// An out-of-band message to a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Direct {
    pub user: UserId,
    pub view: View,
}

/// Messages exchanged between the chat platform and the game service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Interaction(Interaction),
    Challenge(Challenge),
    SettingUpdate(SettingUpdate),
    /// Response to the inbound event with id `to`.
    Reply { to: u64, reply: Reply },
    Direct(Direct),
}
