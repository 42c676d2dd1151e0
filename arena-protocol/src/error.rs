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

use std::fmt;

use thiserror::Error;

use crate::messages::{MessageIdentity, RequestId};

/// Fatal dispatch conditions. Anything not listed here degrades to a no-op.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A response arrived for a request other than the one in flight. Either
    /// the dispatcher lost track of a request or the transport reordered
    /// messages; the protocol state can no longer be trusted.
    #[error("unexpected {received} response while awaiting {expected}")]
    UnexpectedResponse {
        expected: RequestId,
        received: RequestId,
    },
    #[error("invalid {message} payload: {reason}")]
    MalformedPayload {
        message: MessageIdentity,
        reason: String,
    },
}

impl DispatchError {
    pub(crate) fn malformed(message: MessageIdentity, reason: impl fmt::Display) -> Self {
        Self::MalformedPayload {
            message,
            reason: reason.to_string(),
        }
    }
}
