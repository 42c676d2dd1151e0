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

//! Routes inbound messages to bot callbacks and tracks the request in flight.
//!
//! The server answers requests one at a time, so at most one request is ever
//! awaiting a response. [`dispatch`] checks every response against that
//! request, narrows the payload, calls the bot and turns its action into the
//! next wire request. It performs no I/O; the caller must feed messages one at
//! a time, in the order the transport delivered them.

use serde_json::Value;
use tracing::{debug, warn};

use crate::actions::{Action, action_to_request};
use crate::bot::{BotHandlers, Decision};
use crate::error::DispatchError;
use crate::messages::{InboundMessage, MessageIdentity, RequestId, RequestMessage, classify};

/// Protocol state threaded through every [`dispatch`] call for the lifetime
/// of a connection.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatcherContext<S> {
    pub bot_state: S,
    /// The bot action awaiting a response.
    pub in_flight_request: Option<Action>,
    /// Wire form of the request awaiting a response. Also set for requests
    /// the driver issues itself, such as player registration.
    pub in_flight_message: Option<RequestMessage>,
}

impl<S> DispatcherContext<S> {
    pub fn new(bot_state: S) -> Self {
        Self {
            bot_state,
            in_flight_request: None,
            in_flight_message: None,
        }
    }

    /// Record a request sent outside of [`dispatch`] so its response is
    /// correlated like any other.
    pub fn with_request_in_flight(mut self, message: RequestMessage) -> Self {
        self.in_flight_message = Some(message);
        self
    }

    pub fn awaiting(&self) -> Option<RequestId> {
        self.in_flight_message.as_ref().map(RequestMessage::id)
    }

    fn settle(&mut self, received: RequestId) -> Result<(), DispatchError> {
        let Some(expected) = self.awaiting() else {
            debug!(response = %received, "response arrived with no request in flight");
            return Ok(());
        };
        if expected != received {
            return Err(DispatchError::UnexpectedResponse { expected, received });
        }

        self.in_flight_request = None;
        self.in_flight_message = None;
        Ok(())
    }
}

/// Result of one dispatch: the next context and the requests to send.
#[derive(Debug)]
pub struct Dispatch<S> {
    pub context: DispatcherContext<S>,
    pub outgoing: Vec<RequestMessage>,
}

impl<S> Dispatch<S> {
    fn quiet(context: DispatcherContext<S>) -> Self {
        Self {
            context,
            outgoing: Vec::new(),
        }
    }
}

/// Dispatch one raw inbound message. Text that is not JSON is ignored like
/// any other unrecognized message.
pub fn dispatch<S>(
    raw: &str,
    bot: &BotHandlers<S>,
    context: DispatcherContext<S>,
) -> Result<Dispatch<S>, DispatchError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(message) => dispatch_value(&message, bot, context),
        Err(error) => {
            warn!(error = %error, raw, "ignoring inbound text that is not JSON");
            Ok(Dispatch::quiet(context))
        }
    }
}

/// Dispatch one decoded inbound message.
///
/// Fails only when a response does not answer the request in flight or when
/// a payload that must be present is missing or malformed. Unknown messages
/// and messages the bot has no callback for leave the context as it was.
pub fn dispatch_value<S>(
    message: &Value,
    bot: &BotHandlers<S>,
    mut context: DispatcherContext<S>,
) -> Result<Dispatch<S>, DispatchError> {
    let Some(identity) = classify(message) else {
        warn!(message = %message, "unexpected message");
        return Ok(Dispatch::quiet(context));
    };

    if let MessageIdentity::Response(received) = identity {
        context.settle(received)?;
    }

    let inbound = InboundMessage::parse(identity, message)?;
    let DispatcherContext {
        bot_state,
        mut in_flight_request,
        mut in_flight_message,
    } = context;

    let decision = match invoke(bot, inbound, bot_state, in_flight_request.as_ref()) {
        Ok(decision) => decision,
        Err(bot_state) => {
            debug!(message = %identity, "bot has no handler; ignoring");
            return Ok(Dispatch::quiet(DispatcherContext {
                bot_state,
                in_flight_request,
                in_flight_message,
            }));
        }
    };

    let mut outgoing = Vec::new();
    if let Some(action) = decision.action.filter(|action| {
        let sendable = action.is_sendable();
        if !sendable {
            warn!(action = ?action, "dropping action that cannot be encoded");
        }
        sendable
    }) {
        if let Some(pending) = in_flight_message.as_ref() {
            warn!(
                pending = %pending.id(),
                next = %action.request_id(),
                "bot issued a request while another is awaiting its response"
            );
        }
        let request = action_to_request(&action);
        debug!(message = %identity, request = %request.id(), "bot decided on an action");
        in_flight_message = Some(request.clone());
        in_flight_request = Some(action);
        outgoing.push(request);
    }

    Ok(Dispatch {
        context: DispatcherContext {
            bot_state: decision.state,
            in_flight_request,
            in_flight_message,
        },
        outgoing,
    })
}

/// Call the bot's callback for `inbound`. Hands the state back untouched when
/// the bot has no callback for it.
fn invoke<S>(
    bot: &BotHandlers<S>,
    inbound: InboundMessage,
    state: S,
    in_flight: Option<&Action>,
) -> Result<Decision<S>, S> {
    match inbound {
        InboundMessage::RegisterPlayerResponse(outcome) => match bot.register_player_response {
            Some(handler) => Ok(handler(outcome, state)),
            None => Err(state),
        },
        InboundMessage::MovePlayerResponse(outcome) => match bot.move_player_response {
            Some(handler) => Ok(handler(outcome, state)),
            None => Err(state),
        },
        InboundMessage::RotatePlayerResponse(outcome) => match bot.rotate_player_response {
            Some(handler) => Ok(handler(outcome, state)),
            None => Err(state),
        },
        InboundMessage::ShootResponse(outcome) => match bot.shoot_response {
            Some(handler) => Ok(handler(outcome, state)),
            None => Err(state),
        },
        InboundMessage::DeployMineResponse(outcome) => match bot.deploy_mine_response {
            Some(handler) => Ok(handler(outcome, state)),
            None => Err(state),
        },
        InboundMessage::RadarScan(scan) => match bot.radar_scan_notification {
            Some(handler) => Ok(handler(scan, state)),
            None => Err(state),
        },
        InboundMessage::StartGame => match bot.start_game_notification {
            Some(handler) => Ok(handler(state)),
            None => Err(state),
        },
        InboundMessage::JoinGame(join) => match bot.join_game_notification {
            Some(handler) => Ok(handler(join, state)),
            None => Err(state),
        },
        InboundMessage::Hit(hit) => match bot.hit_notification {
            Some(handler) => Ok(handler(hit, state)),
            None => Err(state),
        },
        InboundMessage::Tick => match bot.tick_notification {
            Some(handler) => Ok(handler(state, in_flight)),
            None => Err(state),
        },
    }
}
