mod bitboard;
pub mod codec;
mod common;
mod config;
pub mod dispatch;
pub mod domain;
pub mod fleet;
pub mod games;
pub mod invite;
mod logging;
pub mod notify;
pub mod protocol;
pub mod relay;
pub mod render;
pub mod rules;
pub mod settings;
mod ship;
pub mod transport;

pub use bitboard::{BitBoard, BitBoardError};
pub use codec::{decode, decode_message, encode, extract_token, CodecError};
pub use common::*;
pub use config::*;
pub use dispatch::{game_view, DispatchConfig, Dispatcher, Handled};
pub use domain::*;
pub use games::{Game, GameVariant, MoveOutcome, Notice};
pub use invite::{Invite, InviteOutcome};
pub use logging::init_logging;
pub use protocol::*;
pub use relay::Relay;
pub use render::{ActionRow, ButtonStyle, Component, Embed, Render, SelectOption, View};
pub use rules::{ChessRules, LegalMove, PieceKind, RulesError, Side, StandardRules};
pub use settings::{InMemorySettings, Setting, SettingsStore};
pub use ship::*;
