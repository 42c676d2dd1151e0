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

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::Value;
use tokio::{fs::File, io::AsyncWriteExt};

/// Append-only record of a session in the format [`crate::replay`] reads.
pub struct MessageLog {
    path: PathBuf,
    file: File,
}

impl MessageLog {
    /// Create the log, truncating whatever a previous session left behind.
    pub async fn create(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let file = File::create(&path)
            .await
            .with_context(|| format!("failed to create message log {}", path.display()))?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn record_send(&mut self, payload: &str) -> anyhow::Result<()> {
        self.append("send", payload).await
    }

    pub async fn record_recv(&mut self, payload: &str) -> anyhow::Result<()> {
        self.append("recv", payload).await
    }

    async fn append(&mut self, direction: &str, payload: &str) -> anyhow::Result<()> {
        let line = format!("[{direction}]{}\n", single_line(payload));
        self.file
            .write_all(line.as_bytes())
            .await
            .with_context(|| format!("failed to append to {}", self.path.display()))?;
        self.file
            .flush()
            .await
            .with_context(|| format!("failed to flush {}", self.path.display()))
    }
}

/// Entries must fit on one line; multi-line JSON is compacted.
fn single_line(payload: &str) -> Cow<'_, str> {
    if !payload.contains(['\n', '\r']) {
        return Cow::Borrowed(payload);
    }
    match serde_json::from_str::<Value>(payload) {
        Ok(value) => Cow::Owned(value.to_string()),
        Err(_) => Cow::Owned(payload.replace(['\n', '\r'], " ")),
    }
}
