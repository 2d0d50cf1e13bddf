//! Renderer wire vocabulary.
//!
//! Clients send one JSON object per action, tagged by `"action"`:
//! `{"action":"hold","die_index":2}`, `{"action":"score","category":"Full House"}`.
//! Category names are the canonical wire names. A message that does not parse, names an
//! unknown action, or names an unknown category is ignored by the coordinator.

use serde::{Deserialize, Serialize};
use yh_core::Category;

fn default_direction() -> i32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientAction {
    Roll,
    Hold {
        die_index: usize,
    },
    Score {
        category: String,
    },
    ConfirmZeroYes,
    ConfirmZeroNo,
    NavigateCategory {
        #[serde(default = "default_direction")]
        direction: i32,
    },
    Undo,
    Reset,
    SpeedUp,
    SpeedDown,
}

impl ClientAction {
    pub fn parse(msg: &str) -> Result<ClientAction, serde_json::Error> {
        serde_json::from_str(msg)
    }

    pub fn score(category: Category) -> ClientAction {
        ClientAction::Score {
            category: category.name().to_string(),
        }
    }
}
