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

//! Client-side protocol engine for the arena game server.
//!
//! Inbound server messages are classified against a closed taxonomy
//! ([`messages`]), routed to a bot's callbacks ([`bot`]) by the
//! [`dispatcher`], and the bot's [`actions`] are translated back into wire
//! requests.

pub mod actions;
pub mod bot;
pub mod dispatcher;
pub mod error;
pub mod geometry;
pub mod messages;

pub use actions::{Action, action_to_request};
pub use bot::{BotHandlers, Decision};
pub use dispatcher::{Dispatch, DispatcherContext, dispatch, dispatch_value};
pub use error::DispatchError;
pub use messages::{
    DeployMineSuccess, GameSettings, Hit, InboundMessage, JoinGame, MessageIdentity, MessageKind,
    MovePlayerSuccess, MovementDirection, NotificationId, Position, RadarScan,
    RegisterPlayerSuccess, RequestCost, RequestId, RequestMessage, ResponseOutcome,
    RotatePlayerSuccess, Rotation, ScannedObject, ScannedPlayer, ScannedShot, ShootSuccess,
    classify,
};

/// Game version announced when registering, unless configured otherwise.
pub const DEFAULT_GAME_VERSION: &str = "1.0.0";
