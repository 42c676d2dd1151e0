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

//! Wire message taxonomy for the arena protocol.
//!
//! Every message carries a top-level `type` (`Request`, `Response` or
//! `Notification`) and an `id` drawn from a closed set per kind. Inbound
//! messages are classified with [`classify`] and then narrowed into an
//! [`InboundMessage`]; outbound requests are built as [`RequestMessage`].

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Value, json};

use crate::error::DispatchError;

/// Degrees. Producers are not required to normalize into `[0, 360)`.
pub type Rotation = f64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MessageKind {
    Request,
    Response,
    Notification,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Request => "Request",
            Self::Response => "Response",
            Self::Notification => "Notification",
        }
    }
}

/// Requests the client can issue. Responses reuse the id of the request
/// that produced them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RequestId {
    RegisterPlayer,
    MovePlayer,
    RotatePlayer,
    Shoot,
    DeployMine,
}

impl RequestId {
    pub const ALL: [RequestId; 5] = [
        RequestId::RegisterPlayer,
        RequestId::MovePlayer,
        RequestId::RotatePlayer,
        RequestId::Shoot,
        RequestId::DeployMine,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::RegisterPlayer => "RegisterPlayer",
            Self::MovePlayer => "MovePlayer",
            Self::RotatePlayer => "RotatePlayer",
            Self::Shoot => "Shoot",
            Self::DeployMine => "DeployMine",
        }
    }

    /// Reason handed to the bot when a failed response carries no `details.msg`.
    fn default_failure_reason(self) -> &'static str {
        match self {
            Self::RegisterPlayer => "Failed player register",
            Self::MovePlayer => "Failed to move player",
            Self::RotatePlayer => "Failed to rotate player",
            Self::Shoot => "Failed to shoot",
            Self::DeployMine => "Failed to deploy mine",
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NotificationId {
    RadarScan,
    StartGame,
    JoinGame,
    Hit,
    Tick,
}

impl NotificationId {
    pub const ALL: [NotificationId; 5] = [
        NotificationId::RadarScan,
        NotificationId::StartGame,
        NotificationId::JoinGame,
        NotificationId::Hit,
        NotificationId::Tick,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::RadarScan => "RadarScan",
            Self::StartGame => "StartGame",
            Self::JoinGame => "JoinGame",
            Self::Hit => "Hit",
            Self::Tick => "Tick",
        }
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the ten message identities the client accepts from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageIdentity {
    Response(RequestId),
    Notification(NotificationId),
}

impl MessageIdentity {
    pub const ALL: [MessageIdentity; 10] = [
        MessageIdentity::Response(RequestId::RegisterPlayer),
        MessageIdentity::Response(RequestId::MovePlayer),
        MessageIdentity::Response(RequestId::RotatePlayer),
        MessageIdentity::Response(RequestId::Shoot),
        MessageIdentity::Response(RequestId::DeployMine),
        MessageIdentity::Notification(NotificationId::RadarScan),
        MessageIdentity::Notification(NotificationId::StartGame),
        MessageIdentity::Notification(NotificationId::JoinGame),
        MessageIdentity::Notification(NotificationId::Hit),
        MessageIdentity::Notification(NotificationId::Tick),
    ];

    pub fn kind(self) -> MessageKind {
        match self {
            Self::Response(_) => MessageKind::Response,
            Self::Notification(_) => MessageKind::Notification,
        }
    }

    pub fn id_str(self) -> &'static str {
        match self {
            Self::Response(id) => id.as_str(),
            Self::Notification(id) => id.as_str(),
        }
    }

    /// True iff `value` is a message of exactly this identity: both `type`
    /// and `id` match. Payload shape, including a response's `success` flag,
    /// is checked later by [`InboundMessage::parse`]. Never panics on
    /// arbitrary input.
    pub fn matches(self, value: &Value) -> bool {
        let Some(object) = value.as_object() else {
            return false;
        };
        object.get("type").and_then(Value::as_str) == Some(self.kind().as_str())
            && object.get("id").and_then(Value::as_str) == Some(self.id_str())
    }
}

impl fmt::Display for MessageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Response(id) => write!(f, "{id} response"),
            Self::Notification(id) => write!(f, "{id} notification"),
        }
    }
}

/// Classify a decoded message. `None` means the message is not part of the
/// known protocol and should be ignored.
pub fn classify(value: &Value) -> Option<MessageIdentity> {
    MessageIdentity::ALL
        .into_iter()
        .find(|identity| identity.matches(value))
}

/// Outcome of a response as seen by a bot.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome<T> {
    Success(T),
    Failure(String),
}

impl<T> ResponseOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// What a request cost, echoed back by the server with every action response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestCost {
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_turbo: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterPlayerSuccess {
    pub id: String,
    pub position: Position,
    pub rotation: Rotation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovePlayerSuccess {
    pub position: Position,
    pub tokens: f64,
    pub request: RequestCost,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RotatePlayerSuccess {
    pub rotation: Rotation,
    pub tokens: f64,
    pub request: RequestCost,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShootSuccess {
    pub tokens: f64,
    pub request: RequestCost,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeployMineSuccess {
    pub tokens: f64,
    pub request: RequestCost,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScannedPlayer {
    #[serde(default)]
    pub id: Option<String>,
    pub position: Position,
    #[serde(default)]
    pub rotation: Option<Rotation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScannedShot {
    pub position: Position,
    #[serde(default)]
    pub rotation: Option<Rotation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScannedObject {
    pub position: Position,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RadarScan {
    pub players: Vec<ScannedPlayer>,
    pub shots: Vec<ScannedShot>,
    /// Older servers do not report mines.
    #[serde(default)]
    pub mines: Vec<ScannedObject>,
    pub unknown: Vec<ScannedObject>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Hit {
    pub damage: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    pub player_radius: f64,
    pub arena_width: f64,
    pub arena_height: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JoinGame {
    pub settings: Option<GameSettings>,
}

#[derive(Debug, Deserialize)]
struct ComponentEnvelope<D> {
    component: ComponentDetails<D>,
    request: RequestCost,
}

#[derive(Debug, Deserialize)]
struct ComponentDetails<D> {
    details: D,
}

#[derive(Debug, Deserialize)]
struct PositionDetails {
    position: Position,
    tokens: f64,
}

#[derive(Debug, Deserialize)]
struct RotationDetails {
    rotation: Rotation,
    tokens: f64,
}

#[derive(Debug, Deserialize)]
struct TokenDetails {
    tokens: f64,
}

#[derive(Debug, Deserialize)]
struct JoinGameData {
    game: JoinedGame,
}

#[derive(Debug, Deserialize)]
struct JoinedGame {
    settings: GameSettings,
}

/// An inbound message narrowed to its typed payload.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    RegisterPlayerResponse(ResponseOutcome<RegisterPlayerSuccess>),
    MovePlayerResponse(ResponseOutcome<MovePlayerSuccess>),
    RotatePlayerResponse(ResponseOutcome<RotatePlayerSuccess>),
    ShootResponse(ResponseOutcome<ShootSuccess>),
    DeployMineResponse(ResponseOutcome<DeployMineSuccess>),
    RadarScan(RadarScan),
    StartGame,
    JoinGame(JoinGame),
    Hit(Hit),
    Tick,
}

impl InboundMessage {
    /// Destructure `value`, already classified as `identity`, into its payload.
    ///
    /// Failed responses are valid data. A successful response, or a
    /// notification that requires a payload, fails with
    /// [`DispatchError::MalformedPayload`] when the payload is missing or does
    /// not have the expected shape.
    pub fn parse(identity: MessageIdentity, value: &Value) -> Result<Self, DispatchError> {
        let message = match identity {
            MessageIdentity::Response(RequestId::RegisterPlayer) => {
                Self::RegisterPlayerResponse(response_outcome(identity, value, |data| {
                    RegisterPlayerSuccess::deserialize(data)
                })?)
            }
            MessageIdentity::Response(RequestId::MovePlayer) => {
                Self::MovePlayerResponse(response_outcome(identity, value, |data| {
                    let envelope = ComponentEnvelope::<PositionDetails>::deserialize(data)?;
                    let details = envelope.component.details;
                    Ok(MovePlayerSuccess {
                        position: details.position,
                        tokens: details.tokens,
                        request: envelope.request,
                    })
                })?)
            }
            MessageIdentity::Response(RequestId::RotatePlayer) => {
                Self::RotatePlayerResponse(response_outcome(identity, value, |data| {
                    let envelope = ComponentEnvelope::<RotationDetails>::deserialize(data)?;
                    let details = envelope.component.details;
                    Ok(RotatePlayerSuccess {
                        rotation: details.rotation,
                        tokens: details.tokens,
                        request: envelope.request,
                    })
                })?)
            }
            MessageIdentity::Response(RequestId::Shoot) => {
                Self::ShootResponse(response_outcome(identity, value, |data| {
                    let envelope = ComponentEnvelope::<TokenDetails>::deserialize(data)?;
                    Ok(ShootSuccess {
                        tokens: envelope.component.details.tokens,
                        request: envelope.request,
                    })
                })?)
            }
            MessageIdentity::Response(RequestId::DeployMine) => {
                Self::DeployMineResponse(response_outcome(identity, value, |data| {
                    let envelope = ComponentEnvelope::<TokenDetails>::deserialize(data)?;
                    Ok(DeployMineSuccess {
                        tokens: envelope.component.details.tokens,
                        request: envelope.request,
                    })
                })?)
            }
            MessageIdentity::Notification(NotificationId::RadarScan) => {
                let data = required_data(identity, value)?;
                Self::RadarScan(
                    RadarScan::deserialize(data)
                        .map_err(|error| DispatchError::malformed(identity, error))?,
                )
            }
            MessageIdentity::Notification(NotificationId::Hit) => {
                let data = required_data(identity, value)?;
                Self::Hit(
                    Hit::deserialize(data)
                        .map_err(|error| DispatchError::malformed(identity, error))?,
                )
            }
            MessageIdentity::Notification(NotificationId::JoinGame) => {
                let settings = match value.get("data") {
                    None | Some(Value::Null) => None,
                    Some(data) => Some(
                        JoinGameData::deserialize(data)
                            .map_err(|error| DispatchError::malformed(identity, error))?
                            .game
                            .settings,
                    ),
                };
                Self::JoinGame(JoinGame { settings })
            }
            MessageIdentity::Notification(NotificationId::StartGame) => Self::StartGame,
            MessageIdentity::Notification(NotificationId::Tick) => Self::Tick,
        };

        Ok(message)
    }

    pub fn identity(&self) -> MessageIdentity {
        match self {
            Self::RegisterPlayerResponse(_) => MessageIdentity::Response(RequestId::RegisterPlayer),
            Self::MovePlayerResponse(_) => MessageIdentity::Response(RequestId::MovePlayer),
            Self::RotatePlayerResponse(_) => MessageIdentity::Response(RequestId::RotatePlayer),
            Self::ShootResponse(_) => MessageIdentity::Response(RequestId::Shoot),
            Self::DeployMineResponse(_) => MessageIdentity::Response(RequestId::DeployMine),
            Self::RadarScan(_) => MessageIdentity::Notification(NotificationId::RadarScan),
            Self::StartGame => MessageIdentity::Notification(NotificationId::StartGame),
            Self::JoinGame(_) => MessageIdentity::Notification(NotificationId::JoinGame),
            Self::Hit(_) => MessageIdentity::Notification(NotificationId::Hit),
            Self::Tick => MessageIdentity::Notification(NotificationId::Tick),
        }
    }
}

fn required_data(identity: MessageIdentity, value: &Value) -> Result<&Value, DispatchError> {
    match value.get("data") {
        Some(data) if data.is_object() => Ok(data),
        Some(_) => Err(DispatchError::malformed(identity, "`data` is not an object")),
        None => Err(DispatchError::malformed(identity, "missing `data`")),
    }
}

fn response_outcome<T, F>(
    identity: MessageIdentity,
    value: &Value,
    parse_success: F,
) -> Result<ResponseOutcome<T>, DispatchError>
where
    F: FnOnce(&Value) -> Result<T, serde_json::Error>,
{
    let succeeded = value
        .get("success")
        .and_then(Value::as_bool)
        .ok_or_else(|| DispatchError::malformed(identity, "missing boolean `success`"))?;
    if !succeeded {
        let reason = value
            .pointer("/details/msg")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|reason| !reason.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| match identity {
                MessageIdentity::Response(id) => id.default_failure_reason().to_string(),
                MessageIdentity::Notification(_) => "request failed".to_string(),
            });
        return Ok(ResponseOutcome::Failure(reason));
    }

    let data = required_data(identity, value)?;
    parse_success(data)
        .map(ResponseOutcome::Success)
        .map_err(|error| DispatchError::malformed(identity, error))
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MovementDirection {
    Forward,
    Backward,
}

impl MovementDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

/// A request in the exact form it travels on the wire.
///
/// Serializes as `{"type": "Request", "id": ..., "data": ...}`; `Shoot` and
/// `DeployMine` carry no `data`.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestMessage {
    RegisterPlayer {
        player_id: String,
        game_version: String,
    },
    MovePlayer {
        direction: MovementDirection,
        with_turbo: bool,
    },
    RotatePlayer {
        rotation: Rotation,
    },
    Shoot,
    DeployMine,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireRequest {
    #[serde(rename = "type")]
    kind: MessageKind,
    id: RequestId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RegisterData {
    id: String,
    game: GameVersion,
}

#[derive(Debug, Deserialize)]
struct GameVersion {
    version: String,
}

#[derive(Debug, Deserialize)]
struct MovementData {
    movement: Movement,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Movement {
    direction: MovementDirection,
    #[serde(default)]
    with_turbo: bool,
}

#[derive(Debug, Deserialize)]
struct RotationData {
    rotation: Rotation,
}

impl RequestMessage {
    pub fn register_player(player_id: impl Into<String>, game_version: impl Into<String>) -> Self {
        Self::RegisterPlayer {
            player_id: player_id.into(),
            game_version: game_version.into(),
        }
    }

    pub fn id(&self) -> RequestId {
        match self {
            Self::RegisterPlayer { .. } => RequestId::RegisterPlayer,
            Self::MovePlayer { .. } => RequestId::MovePlayer,
            Self::RotatePlayer { .. } => RequestId::RotatePlayer,
            Self::Shoot => RequestId::Shoot,
            Self::DeployMine => RequestId::DeployMine,
        }
    }

    fn data(&self) -> Option<Value> {
        match self {
            Self::RegisterPlayer {
                player_id,
                game_version,
            } => Some(json!({ "id": player_id, "game": { "version": game_version } })),
            Self::MovePlayer {
                direction,
                with_turbo,
            } => Some(json!({
                "movement": { "direction": direction.as_str(), "withTurbo": with_turbo }
            })),
            Self::RotatePlayer { rotation } => Some(json!({ "rotation": rotation })),
            Self::Shoot | Self::DeployMine => None,
        }
    }

    fn to_wire(&self) -> WireRequest {
        WireRequest {
            kind: MessageKind::Request,
            id: self.id(),
            data: self.data(),
        }
    }

    pub fn to_value(&self) -> Value {
        let wire = self.to_wire();
        let mut value = json!({ "type": wire.kind.as_str(), "id": wire.id.as_str() });
        if let (Some(data), Some(object)) = (wire.data, value.as_object_mut()) {
            object.insert("data".to_string(), data);
        }
        value
    }

    /// Structural check for outbound traffic: recognize one of the five wire
    /// requests and validate its payload. Anything else yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let wire = WireRequest::deserialize(value).ok()?;
        if wire.kind != MessageKind::Request {
            return None;
        }

        let request = match wire.id {
            RequestId::RegisterPlayer => {
                let data = RegisterData::deserialize(wire.data.as_ref()?).ok()?;
                Self::RegisterPlayer {
                    player_id: data.id,
                    game_version: data.game.version,
                }
            }
            RequestId::MovePlayer => {
                let data = MovementData::deserialize(wire.data.as_ref()?).ok()?;
                Self::MovePlayer {
                    direction: data.movement.direction,
                    with_turbo: data.movement.with_turbo,
                }
            }
            RequestId::RotatePlayer => {
                let data = RotationData::deserialize(wire.data.as_ref()?).ok()?;
                Self::RotatePlayer {
                    rotation: data.rotation,
                }
            }
            RequestId::Shoot => Self::Shoot,
            RequestId::DeployMine => Self::DeployMine,
        };

        Some(request)
    }
}

impl Serialize for RequestMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn examples() -> Vec<(MessageIdentity, Value)> {
        vec![
            (
                MessageIdentity::Response(RequestId::RegisterPlayer),
                json!({
                    "type": "Response",
                    "id": "RegisterPlayer",
                    "success": true,
                    "data": { "id": "player-1", "position": { "x": 100, "y": 200 }, "rotation": 359 }
                }),
            ),
            (
                MessageIdentity::Response(RequestId::MovePlayer),
                json!({
                    "type": "Response",
                    "id": "MovePlayer",
                    "success": true,
                    "data": {
                        "component": { "details": { "position": { "x": 10, "y": 20 }, "tokens": 5 } },
                        "request": { "cost": 1, "withTurbo": false }
                    }
                }),
            ),
            (
                MessageIdentity::Response(RequestId::RotatePlayer),
                json!({
                    "type": "Response",
                    "id": "RotatePlayer",
                    "success": false,
                    "details": { "msg": "not enough tokens" }
                }),
            ),
            (
                MessageIdentity::Response(RequestId::Shoot),
                json!({
                    "type": "Response",
                    "id": "Shoot",
                    "success": true,
                    "data": { "component": { "details": { "tokens": 3 } }, "request": { "cost": 2 } }
                }),
            ),
            (
                MessageIdentity::Response(RequestId::DeployMine),
                json!({ "type": "Response", "id": "DeployMine", "success": false }),
            ),
            (
                MessageIdentity::Notification(NotificationId::RadarScan),
                json!({
                    "type": "Notification",
                    "id": "RadarScan",
                    "data": { "players": [], "shots": [], "mines": [], "unknown": [] }
                }),
            ),
            (
                MessageIdentity::Notification(NotificationId::StartGame),
                json!({ "type": "Notification", "id": "StartGame" }),
            ),
            (
                MessageIdentity::Notification(NotificationId::JoinGame),
                json!({ "type": "Notification", "id": "JoinGame" }),
            ),
            (
                MessageIdentity::Notification(NotificationId::Hit),
                json!({ "type": "Notification", "id": "Hit", "data": { "damage": 1 } }),
            ),
            (
                MessageIdentity::Notification(NotificationId::Tick),
                json!({ "type": "Notification", "id": "Tick" }),
            ),
        ]
    }

    #[test]
    fn every_example_matches_exactly_its_own_identity() {
        for (expected, message) in examples() {
            let matching: Vec<MessageIdentity> = MessageIdentity::ALL
                .into_iter()
                .filter(|identity| identity.matches(&message))
                .collect();
            assert_eq!(matching, vec![expected], "message {message}");
            assert_eq!(classify(&message), Some(expected));
        }
    }

    #[test]
    fn classification_fails_closed_on_unknown_shapes() {
        let rejected = [
            json!(null),
            json!("Tick"),
            json!([{ "type": "Notification", "id": "Tick" }]),
            json!({ "type": "Notification", "id": "Explosion" }),
            json!({ "type": "Notification" }),
            json!({ "kind": "Notification", "id": "Tick" }),
            json!({ "type": "Response", "id": "ComponentUpdate", "success": true }),
            json!({ "type": "Request", "id": "MovePlayer", "success": true }),
            json!({ "type": "Notification", "id": "MovePlayer" }),
        ];
        for message in rejected {
            assert_eq!(classify(&message), None, "message {message}");
        }
    }

    #[test]
    fn identities_cover_every_response_and_notification_once() {
        let expected: Vec<MessageIdentity> = RequestId::ALL
            .into_iter()
            .map(MessageIdentity::Response)
            .chain(NotificationId::ALL.into_iter().map(MessageIdentity::Notification))
            .collect();
        assert_eq!(MessageIdentity::ALL.to_vec(), expected);

        for id in NotificationId::ALL {
            let bare = json!({ "type": "Notification", "id": id.as_str() });
            assert_eq!(classify(&bare), Some(MessageIdentity::Notification(id)));
        }
    }

    #[test]
    fn responses_classify_without_success_but_fail_to_parse() {
        let identity = MessageIdentity::Response(RequestId::MovePlayer);
        let rejected = [
            json!({ "type": "Response", "id": "MovePlayer" }),
            json!({ "type": "Response", "id": "MovePlayer", "success": "yes", "data": {} }),
        ];

        for message in rejected {
            assert_eq!(classify(&message), Some(identity), "message {message}");
            match InboundMessage::parse(identity, &message) {
                Err(DispatchError::MalformedPayload { message: failed, reason }) => {
                    assert_eq!(failed, identity);
                    assert!(reason.contains("success"), "reason {reason}");
                }
                other => panic!("expected malformed payload, got {other:?}"),
            }
        }
    }

    #[test]
    fn move_player_success_is_flattened_out_of_the_component_envelope() {
        let (identity, message) = examples().swap_remove(1);
        let parsed = InboundMessage::parse(identity, &message).unwrap();

        assert_eq!(
            parsed,
            InboundMessage::MovePlayerResponse(ResponseOutcome::Success(MovePlayerSuccess {
                position: Position::new(10.0, 20.0),
                tokens: 5.0,
                request: RequestCost {
                    cost: 1.0,
                    with_turbo: Some(false),
                },
            }))
        );
        assert_eq!(parsed.identity(), identity);
    }

    #[test]
    fn failed_response_carries_server_reason_or_default() {
        let (identity, message) = examples().swap_remove(2);
        assert_eq!(
            InboundMessage::parse(identity, &message).unwrap(),
            InboundMessage::RotatePlayerResponse(ResponseOutcome::Failure(
                "not enough tokens".to_string()
            ))
        );

        let (identity, message) = examples().swap_remove(4);
        assert_eq!(
            InboundMessage::parse(identity, &message).unwrap(),
            InboundMessage::DeployMineResponse(ResponseOutcome::Failure(
                "Failed to deploy mine".to_string()
            ))
        );
    }

    #[test]
    fn success_without_payload_is_malformed() {
        let identity = MessageIdentity::Response(RequestId::MovePlayer);
        let missing = json!({ "type": "Response", "id": "MovePlayer", "success": true });
        let flat = json!({
            "type": "Response",
            "id": "MovePlayer",
            "success": true,
            "data": { "position": { "x": 1, "y": 2 } }
        });

        for message in [missing, flat] {
            match InboundMessage::parse(identity, &message) {
                Err(DispatchError::MalformedPayload { message: failed, .. }) => {
                    assert_eq!(failed, identity)
                }
                other => panic!("expected malformed payload, got {other:?}"),
            }
        }
    }

    #[test]
    fn radar_scan_requires_data_but_tolerates_missing_mines() {
        let identity = MessageIdentity::Notification(NotificationId::RadarScan);
        let without_data = json!({ "type": "Notification", "id": "RadarScan" });
        assert!(InboundMessage::parse(identity, &without_data).is_err());

        let without_mines = json!({
            "type": "Notification",
            "id": "RadarScan",
            "data": {
                "players": [{ "id": "p2", "position": { "x": 1, "y": 2 }, "rotation": 90 }],
                "shots": [{ "position": { "x": 3, "y": 4 } }],
                "unknown": [{ "position": { "x": 5, "y": 6 } }]
            }
        });
        let InboundMessage::RadarScan(scan) = InboundMessage::parse(identity, &without_mines).unwrap()
        else {
            panic!("expected radar scan");
        };
        assert_eq!(scan.players[0].id.as_deref(), Some("p2"));
        assert_eq!(scan.players[0].rotation, Some(90.0));
        assert_eq!(scan.shots[0].rotation, None);
        assert!(scan.mines.is_empty());
        assert_eq!(scan.unknown[0].position, Position::new(5.0, 6.0));
    }

    #[test]
    fn join_game_settings_are_optional() {
        let identity = MessageIdentity::Notification(NotificationId::JoinGame);
        let with_settings = json!({
            "type": "Notification",
            "id": "JoinGame",
            "data": { "game": { "settings": { "playerRadius": 25, "arenaWidth": 500, "arenaHeight": 400 } } }
        });

        assert_eq!(
            InboundMessage::parse(identity, &with_settings).unwrap(),
            InboundMessage::JoinGame(JoinGame {
                settings: Some(GameSettings {
                    player_radius: 25.0,
                    arena_width: 500.0,
                    arena_height: 400.0,
                }),
            })
        );
        assert_eq!(
            InboundMessage::parse(identity, &json!({ "type": "Notification", "id": "JoinGame" }))
                .unwrap(),
            InboundMessage::JoinGame(JoinGame::default())
        );
    }

    #[test]
    fn shoot_request_serializes_without_data() {
        let text = serde_json::to_string(&RequestMessage::Shoot).unwrap();
        assert_eq!(text, r#"{"type":"Request","id":"Shoot"}"#);
    }

    #[test]
    fn register_request_round_trips_through_the_structural_check() {
        let request = RequestMessage::register_player("player-1", "1.0.0");
        let value = request.to_value();

        assert_eq!(
            value,
            json!({
                "type": "Request",
                "id": "RegisterPlayer",
                "data": { "id": "player-1", "game": { "version": "1.0.0" } }
            })
        );
        assert_eq!(RequestMessage::from_value(&value), Some(request));
    }

    #[test]
    fn request_check_rejects_responses_and_missing_payloads() {
        assert_eq!(
            RequestMessage::from_value(&json!({ "type": "Response", "id": "Shoot" })),
            None
        );
        assert_eq!(
            RequestMessage::from_value(&json!({ "type": "Request", "id": "RotatePlayer" })),
            None
        );
        assert_eq!(
            RequestMessage::from_value(&json!({
                "type": "Request",
                "id": "MovePlayer",
                "data": { "movement": { "direction": "sideways" } }
            })),
            None
        );
    }
}
