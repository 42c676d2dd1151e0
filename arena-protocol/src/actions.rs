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

use serde::{Deserialize, Serialize};

use crate::messages::{MovementDirection, RequestId, RequestMessage, Rotation};

/// A bot's decision, independent of the wire format.
///
/// Serializes as `{"type": "Move", "data": {"direction": "forward", "withTurbo": false}}`;
/// `withTurbo` defaults to `false` when omitted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum Action {
    Move {
        direction: MovementDirection,
        #[serde(default, rename = "withTurbo")]
        with_turbo: bool,
    },
    Rotate {
        rotation: Rotation,
    },
    Shoot,
    DeployMine,
}

impl Action {
    pub fn forward(with_turbo: bool) -> Self {
        Self::Move {
            direction: MovementDirection::Forward,
            with_turbo,
        }
    }

    pub fn backward(with_turbo: bool) -> Self {
        Self::Move {
            direction: MovementDirection::Backward,
            with_turbo,
        }
    }

    /// Turn to an absolute heading in degrees. The heading must be finite;
    /// the dispatcher drops rotations it cannot put on the wire.
    pub fn rotate(rotation: Rotation) -> Self {
        Self::Rotate { rotation }
    }

    /// False for actions whose wire form would not survive JSON encoding.
    pub fn is_sendable(&self) -> bool {
        match self {
            Self::Rotate { rotation } => rotation.is_finite(),
            Self::Move { .. } | Self::Shoot | Self::DeployMine => true,
        }
    }

    pub fn request_id(&self) -> RequestId {
        match self {
            Self::Move { .. } => RequestId::MovePlayer,
            Self::Rotate { .. } => RequestId::RotatePlayer,
            Self::Shoot => RequestId::Shoot,
            Self::DeployMine => RequestId::DeployMine,
        }
    }
}

pub fn action_to_request(action: &Action) -> RequestMessage {
    match *action {
        Action::Move {
            direction,
            with_turbo,
        } => RequestMessage::MovePlayer {
            direction,
            with_turbo,
        },
        Action::Rotate { rotation } => RequestMessage::RotatePlayer { rotation },
        Action::Shoot => RequestMessage::Shoot,
        Action::DeployMine => RequestMessage::DeployMine,
    }
}

impl From<&Action> for RequestMessage {
    fn from(action: &Action) -> Self {
        action_to_request(action)
    }
}
