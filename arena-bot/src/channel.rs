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

//! Transport seam between the session driver and the arena server.

use anyhow::Context;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message as WsMessage,
};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    Message(String),
    Closed,
}

/// A connection that carries serialized protocol messages. The channel is
/// open once constructed.
#[async_trait]
pub trait Channel: Send {
    async fn send(&mut self, payload: &str) -> anyhow::Result<()>;

    /// Wait for the next inbound message, or `Closed` once the peer is gone.
    async fn recv(&mut self) -> anyhow::Result<ChannelEvent>;

    async fn close(&mut self) -> anyhow::Result<()>;
}

pub struct WebSocketChannel {
    url: String,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketChannel {
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let (stream, _) = connect_async(url)
            .await
            .with_context(|| format!("failed to connect to arena server at {url}"))?;
        info!(url, "connected to arena server");
        Ok(Self {
            url: url.to_string(),
            stream,
        })
    }
}

#[async_trait]
impl Channel for WebSocketChannel {
    async fn send(&mut self, payload: &str) -> anyhow::Result<()> {
        self.stream
            .send(WsMessage::Text(payload.to_string()))
            .await
            .context("failed to send websocket frame")
    }

    async fn recv(&mut self) -> anyhow::Result<ChannelEvent> {
        loop {
            match self.stream.next().await {
                Some(Ok(WsMessage::Text(text))) => return Ok(ChannelEvent::Message(text)),
                Some(Ok(WsMessage::Binary(bytes))) => {
                    let text = String::from_utf8(bytes.to_vec())
                        .context("arena server sent a non-UTF-8 binary frame")?;
                    return Ok(ChannelEvent::Message(text));
                }
                Some(Ok(WsMessage::Close(frame))) => {
                    info!(url = %self.url, ?frame, "arena server closed the connection");
                    return Ok(ChannelEvent::Closed);
                }
                Some(Ok(other)) => {
                    debug!(url = %self.url, frame = ?other, "skipping control frame");
                }
                Some(Err(error)) => {
                    return Err(error).context("websocket receive failed");
                }
                None => return Ok(ChannelEvent::Closed),
            }
        }
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        self.stream
            .close(None)
            .await
            .context("failed to close websocket")
    }
}
