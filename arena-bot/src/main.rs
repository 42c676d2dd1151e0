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

mod bots;
mod channel;
mod config;
mod message_log;
mod replay;
mod session;

use anyhow::{Context, bail};
use arena_protocol::{BotHandlers, RequestMessage};
use tracing::{info, warn};

use crate::bots::{BOT_NAMES, sprayer, wanderer};
use crate::channel::{Channel, WebSocketChannel};
use crate::config::BotConfig;
use crate::message_log::MessageLog;
use crate::replay::ReplayChannel;
use crate::session::run_session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "arena_bot=debug,arena_protocol=info".to_string()),
        )
        .init();

    let config = BotConfig::from_env();
    info!(
        player_id = %config.player_id,
        bot = %config.bot_name,
        server_url = %config.server_url,
        replay = config.replay_log.is_some(),
        "arena-bot starting"
    );

    match config.bot_name.as_str() {
        wanderer::NAME => {
            let initial = config
                .bot_seed
                .map(wanderer::Wanderer::with_seed)
                .unwrap_or_default();
            let state = drive(&config, &wanderer::handlers(), initial).await?;
            info!(position = ?state.position, "wanderer finished");
        }
        sprayer::NAME => {
            let state = drive(&config, &sprayer::handlers(), sprayer::Sprayer::default()).await?;
            info!(
                shots_fired = state.shots_fired,
                damage_taken = state.damage_taken,
                "sprayer finished"
            );
        }
        other => bail!(
            "unknown bot {other:?}; expected one of {}",
            BOT_NAMES.join(", ")
        ),
    }
    Ok(())
}

/// Open the configured channel and run one session on it, stopping early on
/// ctrl-c.
async fn drive<S>(config: &BotConfig, bot: &BotHandlers<S>, state: S) -> anyhow::Result<S> {
    let registration =
        RequestMessage::register_player(config.player_id.clone(), config.game_version.clone());

    let (mut channel, log): (Box<dyn Channel>, Option<MessageLog>) = match &config.replay_log {
        Some(path) => {
            let channel = ReplayChannel::open(path, config.replay_pause).await?;
            // replays read the log a live session would overwrite
            (Box::new(channel), None)
        }
        None => {
            let channel = WebSocketChannel::connect(&config.server_url).await?;
            let log = MessageLog::create(config.message_log_path()).await?;
            info!(path = %log.path().display(), "recording messages");
            (Box::new(channel), Some(log))
        }
    };

    tokio::select! {
        result = run_session(channel.as_mut(), bot, state, registration, log) => return result,
        signal = tokio::signal::ctrl_c() => signal.context("failed to listen for ctrl-c")?,
    }

    warn!("interrupted; closing connection");
    channel.close().await?;
    bail!("session interrupted")
}
