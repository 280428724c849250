//! Per-user boolean preferences, kept apart from game state.

use core::fmt;
use core::str::FromStr;
use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::anyhow;

use crate::common::UserId;
use crate::config::DM_NOTIFICATIONS_DEFAULT;

/// Known preference keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    DmNotifications,
}

impl Setting {
    pub const ALL: [Setting; 1] = [Setting::DmNotifications];

    pub fn key(self) -> &'static str {
        match self {
            Setting::DmNotifications => "dm_notifications",
        }
    }

    /// Value reported for users who never changed it.
    pub fn default_value(self) -> bool {
        match self {
            Setting::DmNotifications => DM_NOTIFICATIONS_DEFAULT,
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Setting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Setting::ALL
            .iter()
            .copied()
            .find(|setting| setting.key() == s.trim())
            .ok_or_else(|| format!("unknown setting: {}", s))
    }
}

/// Key-value store for user preferences.
#[async_trait::async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, user: UserId, setting: Setting) -> anyhow::Result<bool>;
    async fn set(&self, user: UserId, setting: Setting, value: bool) -> anyhow::Result<()>;
}

/// Process-local store; values are lost on exit.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    values: Mutex<HashMap<(UserId, Setting), bool>>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SettingsStore for InMemorySettings {
    async fn get(&self, user: UserId, setting: Setting) -> anyhow::Result<bool> {
        let values = self
            .values
            .lock()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        Ok(values
            .get(&(user, setting))
            .copied()
            .unwrap_or_else(|| setting.default_value()))
    }

    async fn set(&self, user: UserId, setting: Setting, value: bool) -> anyhow::Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        values.insert((user, setting), value);
        Ok(())
    }
}
