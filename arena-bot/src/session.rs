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

use anyhow::Context;
use arena_protocol::{BotHandlers, Dispatch, DispatcherContext, RequestMessage, dispatch};
use tracing::{debug, info, warn};

use crate::channel::{Channel, ChannelEvent};
use crate::message_log::MessageLog;

/// Drive one connection: register the player, then feed every inbound
/// message through the dispatcher and send what it returns.
///
/// Messages are dispatched strictly one at a time in arrival order. A
/// dispatch error closes the channel and ends the session. Returns the final
/// bot state once the channel closes.
pub async fn run_session<S, C>(
    channel: &mut C,
    bot: &BotHandlers<S>,
    initial_state: S,
    registration: RequestMessage,
    mut log: Option<MessageLog>,
) -> anyhow::Result<S>
where
    C: Channel + ?Sized,
{
    send_request(channel, log.as_mut(), &registration).await?;
    let mut context = DispatcherContext::new(initial_state).with_request_in_flight(registration);
    let mut received: u64 = 0;

    loop {
        let text = match channel.recv().await? {
            ChannelEvent::Message(text) => text,
            ChannelEvent::Closed => {
                info!(received, "connection closed");
                break;
            }
        };
        received += 1;
        if let Some(log) = log.as_mut() {
            log.record_recv(&text).await?;
        }

        let Dispatch {
            context: next,
            outgoing,
        } = match dispatch(&text, bot, context) {
            Ok(result) => result,
            Err(error) => {
                warn!(error = %error, message = %text, "protocol fault; terminating session");
                if let Err(close_error) = channel.close().await {
                    warn!(error = %close_error, "failed to close channel after protocol fault");
                }
                return Err(error).context("dispatch failed");
            }
        };
        context = next;

        for request in &outgoing {
            send_request(channel, log.as_mut(), request).await?;
        }
    }

    Ok(context.bot_state)
}

async fn send_request<C>(
    channel: &mut C,
    log: Option<&mut MessageLog>,
    request: &RequestMessage,
) -> anyhow::Result<()>
where
    C: Channel + ?Sized,
{
    let payload = serde_json::to_string(request).context("failed to encode request")?;
    debug!(request = %request.id(), "sending request");
    if let Some(log) = log {
        log.record_send(&payload).await?;
    }
    channel.send(&payload).await
}
