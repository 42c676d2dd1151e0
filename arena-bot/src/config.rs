// Copyright (C) 2026 StarHuntingGames
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::path::PathBuf;

use arena_protocol::DEFAULT_GAME_VERSION;
use uuid::Uuid;

pub const DEFAULT_SERVER_URL: &str = "ws://localhost:8889";
pub const DEFAULT_BOT: &str = "wanderer";

/// Runtime configuration for one bot session, read from the environment.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub server_url: String,
    pub player_id: String,
    pub bot_name: String,
    /// Seed for bots that make random choices. Set it when recording a
    /// session that should replay cleanly.
    pub bot_seed: Option<u64>,
    pub game_version: String,
    /// Replay this message log instead of connecting to a server.
    pub replay_log: Option<PathBuf>,
    /// Wait for a line on stdin at every `[break]` of a replayed log.
    pub replay_pause: bool,
    pub message_log_dir: PathBuf,
}

impl BotConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| normalize_optional_string(lookup(name));
        Self {
            server_url: var("ARENA_SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            player_id: var("ARENA_PLAYER_ID")
                .unwrap_or_else(|| format!("bot-{}", Uuid::new_v4().simple())),
            bot_name: var("ARENA_BOT").unwrap_or_else(|| DEFAULT_BOT.to_string()),
            bot_seed: var("ARENA_BOT_SEED").and_then(|value| value.parse::<u64>().ok()),
            game_version: var("ARENA_GAME_VERSION")
                .unwrap_or_else(|| DEFAULT_GAME_VERSION.to_string()),
            replay_log: var("ARENA_REPLAY_LOG").map(PathBuf::from),
            replay_pause: var("ARENA_REPLAY_PAUSE")
                .map(|value| parse_bool(&value, false))
                .unwrap_or(false),
            message_log_dir: var("ARENA_MESSAGE_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    pub fn message_log_path(&self) -> PathBuf {
        self.message_log_dir
            .join(format!("{}-messages.log", self.player_id))
    }
}

fn normalize_optional_string(value: Option<String>) -> Option<String> {
    value
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
}

fn parse_bool(value: &str, default: bool) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> BotConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        BotConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]);

        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.bot_name, DEFAULT_BOT);
        assert_eq!(config.game_version, DEFAULT_GAME_VERSION);
        assert!(config.player_id.starts_with("bot-"));
        assert!(config.replay_log.is_none());
        assert!(config.bot_seed.is_none());
        assert!(!config.replay_pause);
        assert_eq!(config.message_log_dir, PathBuf::from("."));
    }

    #[test]
    fn generated_player_ids_are_unique() {
        assert_ne!(config_from(&[]).player_id, config_from(&[]).player_id);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = config_from(&[
            ("ARENA_SERVER_URL", "ws://arena:9000"),
            ("ARENA_PLAYER_ID", " rusty "),
            ("ARENA_BOT", "sprayer"),
            ("ARENA_BOT_SEED", "1234"),
            ("ARENA_REPLAY_LOG", "/tmp/rusty-messages.log"),
            ("ARENA_REPLAY_PAUSE", "TRUE"),
            ("ARENA_MESSAGE_LOG_DIR", "/var/log/arena"),
        ]);

        assert_eq!(config.server_url, "ws://arena:9000");
        assert_eq!(config.player_id, "rusty");
        assert_eq!(config.bot_name, "sprayer");
        assert_eq!(config.bot_seed, Some(1234));
        assert_eq!(
            config.replay_log,
            Some(PathBuf::from("/tmp/rusty-messages.log"))
        );
        assert!(config.replay_pause);
        assert_eq!(
            config.message_log_path(),
            PathBuf::from("/var/log/arena/rusty-messages.log")
        );
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[
            ("ARENA_BOT", "   "),
            ("ARENA_REPLAY_LOG", ""),
            ("ARENA_BOT_SEED", "soon"),
        ]);
        assert_eq!(config.bot_name, DEFAULT_BOT);
        assert!(config.bot_seed.is_none());
        assert!(config.replay_log.is_none());
    }

    #[test]
    fn unparseable_bools_fall_back_to_default() {
        assert!(parse_bool("yes", false));
        assert!(!parse_bool("off", true));
        assert!(parse_bool("maybe", true));
    }
}
