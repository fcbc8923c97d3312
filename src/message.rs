use anyhow::Result;
use core_mechanics::action::Action;
use core_mechanics::events::GameEvent;
use core_mechanics::player::PlayerId;
use serde::{Deserialize, Serialize};

/// One line of the table protocol, in either direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    JoinTable { from: PlayerId },
    StartGame { from: PlayerId },
    Action { from: PlayerId, action: Action },
    Announcement { message: String },
    Events { events: Vec<GameEvent> },
}

impl Message {
    pub fn from_line(line: &str) -> Result<Self> {
        serde_json::from_str(line.trim()).map_err(Into::into)
    }

    pub fn to_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Into::into)
    }

    pub fn announcement(message: impl Into<String>) -> Self {
        Message::Announcement {
            message: message.into(),
        }
    }
}
