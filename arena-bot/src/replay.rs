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

//! Deterministic replay of a recorded session.
//!
//! A message log holds one entry per line: `[recv]<json>` for messages the
//! server sent, `[send]<json>` for messages the client sent and `[break]` for
//! a breakpoint. Other lines are ignored. Replaying feeds the recorded inbound
//! messages back in order and checks that every send matches the recording.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;
use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::channel::{Channel, ChannelEvent};

static LOG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(recv|send|break)\](.*)$").expect("log line pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    Recv(String),
    Send(String),
    Break,
}

/// Parse one line of a message log. `None` for lines that are not entries.
pub fn parse_log_line(line: &str) -> Option<LogLine> {
    let captures = LOG_LINE.captures(line.trim_end_matches('\r'))?;
    let data = captures.get(2).map(|data| data.as_str()).unwrap_or("");
    match &captures[1] {
        "recv" if !data.is_empty() => Some(LogLine::Recv(data.to_string())),
        "send" if !data.is_empty() => Some(LogLine::Send(data.to_string())),
        "break" => Some(LogLine::Break),
        _ => None,
    }
}

pub struct ReplayChannel {
    entries: Vec<LogLine>,
    index: usize,
    pause_at_breakpoints: bool,
}

impl ReplayChannel {
    pub fn new(entries: Vec<LogLine>, pause_at_breakpoints: bool) -> Self {
        Self {
            entries,
            index: 0,
            pause_at_breakpoints,
        }
    }

    pub fn from_log(contents: &str, pause_at_breakpoints: bool) -> Self {
        Self::new(
            contents.lines().filter_map(parse_log_line).collect(),
            pause_at_breakpoints,
        )
    }

    pub async fn open(path: &Path, pause_at_breakpoints: bool) -> anyhow::Result<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read replay log {}", path.display()))?;
        let channel = Self::from_log(&contents, pause_at_breakpoints);
        info!(
            path = %path.display(),
            entries = channel.entries.len(),
            "replay log loaded"
        );
        Ok(channel)
    }

    /// Consume breakpoints at the cursor, pausing at each when enabled.
    async fn pass_breakpoints(&mut self) -> anyhow::Result<()> {
        while let Some(LogLine::Break) = self.entries.get(self.index) {
            self.index += 1;
            info!(entry = self.index, "replay reached a breakpoint");
            if self.pause_at_breakpoints {
                info!("press enter to continue the replay");
                let mut stdin = BufReader::new(tokio::io::stdin()).lines();
                stdin
                    .next_line()
                    .await
                    .context("failed to read stdin at replay breakpoint")?;
            }
        }
        Ok(())
    }
}

/// Recorded and replayed payloads are compared as JSON so key order and
/// whitespace do not matter.
fn same_message(recorded: &str, sent: &str) -> bool {
    match (
        serde_json::from_str::<Value>(recorded),
        serde_json::from_str::<Value>(sent),
    ) {
        (Ok(recorded), Ok(sent)) => recorded == sent,
        _ => recorded == sent,
    }
}

#[async_trait]
impl Channel for ReplayChannel {
    async fn send(&mut self, payload: &str) -> anyhow::Result<()> {
        self.pass_breakpoints().await?;
        match self.entries.get(self.index) {
            Some(LogLine::Send(recorded)) => {
                if !same_message(recorded, payload) {
                    anyhow::bail!(
                        "unexpected data at replay entry {}: recorded {recorded}, sent {payload}",
                        self.index + 1
                    );
                }
                self.index += 1;
                Ok(())
            }
            _ => anyhow::bail!(
                "unexpected send at replay entry {}: {payload}",
                self.index + 1
            ),
        }
    }

    async fn recv(&mut self) -> anyhow::Result<ChannelEvent> {
        self.pass_breakpoints().await?;
        match self.entries.get(self.index) {
            Some(LogLine::Recv(message)) => {
                let message = message.clone();
                self.index += 1;
                Ok(ChannelEvent::Message(message))
            }
            Some(LogLine::Send(recorded)) => anyhow::bail!(
                "replay diverged at entry {}: the recording sends {recorded} before the next message",
                self.index + 1
            ),
            Some(LogLine::Break) | None => Ok(ChannelEvent::Closed),
        }
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        let remaining = self.entries.len().saturating_sub(self.index);
        if remaining > 0 {
            warn!(remaining, "replay closed before the end of the log");
        }
        self.index = self.entries.len();
        Ok(())
    }
}
