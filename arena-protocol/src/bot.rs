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

//! The contract between the dispatcher and a bot.
//!
//! A bot is a table of optional callbacks, one per inbound message identity.
//! Callbacks are plain function pointers: they receive the narrowed payload
//! and the bot state by value and hand back the next state plus at most one
//! action. A bot fills in only the callbacks it cares about; messages without
//! a callback are ignored.

use crate::actions::Action;
use crate::messages::{
    DeployMineSuccess, Hit, JoinGame, MovePlayerSuccess, RadarScan, RegisterPlayerSuccess,
    ResponseOutcome, RotatePlayerSuccess, ShootSuccess,
};

/// What a callback returns: the next bot state and an optional action.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision<S> {
    pub state: S,
    pub action: Option<Action>,
}

impl<S> Decision<S> {
    pub fn idle(state: S) -> Self {
        Self {
            state,
            action: None,
        }
    }

    pub fn act(state: S, action: Action) -> Self {
        Self {
            state,
            action: Some(action),
        }
    }
}

pub type ResponseHandler<T, S> = fn(ResponseOutcome<T>, S) -> Decision<S>;
pub type NotificationHandler<T, S> = fn(T, S) -> Decision<S>;

/// Receives the action still awaiting a response, if any. Advisory only.
///
/// Requests the driver sends itself, such as player registration, have no
/// action and show up here as `None`; use [`DispatcherContext::awaiting`] on
/// the driver side, or wait for the registration response in bot state.
///
/// [`DispatcherContext::awaiting`]: crate::dispatcher::DispatcherContext::awaiting
pub type TickHandler<S> = fn(S, Option<&Action>) -> Decision<S>;

pub struct BotHandlers<S> {
    pub register_player_response: Option<ResponseHandler<RegisterPlayerSuccess, S>>,
    pub move_player_response: Option<ResponseHandler<MovePlayerSuccess, S>>,
    pub rotate_player_response: Option<ResponseHandler<RotatePlayerSuccess, S>>,
    pub shoot_response: Option<ResponseHandler<ShootSuccess, S>>,
    pub deploy_mine_response: Option<ResponseHandler<DeployMineSuccess, S>>,
    pub radar_scan_notification: Option<NotificationHandler<RadarScan, S>>,
    pub start_game_notification: Option<fn(S) -> Decision<S>>,
    pub join_game_notification: Option<NotificationHandler<JoinGame, S>>,
    pub hit_notification: Option<NotificationHandler<Hit, S>>,
    pub tick_notification: Option<TickHandler<S>>,
}

impl<S> Default for BotHandlers<S> {
    fn default() -> Self {
        Self {
            register_player_response: None,
            move_player_response: None,
            rotate_player_response: None,
            shoot_response: None,
            deploy_mine_response: None,
            radar_scan_notification: None,
            start_game_notification: None,
            join_game_notification: None,
            hit_notification: None,
            tick_notification: None,
        }
    }
}
