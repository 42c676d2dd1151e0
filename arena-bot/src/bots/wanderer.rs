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

//! Walks to random points inside the arena, one leg at a time.

use arena_protocol::geometry::{distance, rotation_between, rotations_equal};
use arena_protocol::{
    Action, BotHandlers, Decision, GameSettings, JoinGame, MovePlayerSuccess, Position,
    RegisterPlayerSuccess, ResponseOutcome, RotatePlayerSuccess, Rotation,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

pub const NAME: &str = "wanderer";

/// Distance at which a destination counts as reached.
const ARRIVAL_RADIUS: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct Wanderer {
    rng: StdRng,
    pub position: Option<Position>,
    pub rotation: Rotation,
    pub destination: Option<Position>,
    pub settings: Option<GameSettings>,
}

impl Wanderer {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            position: None,
            rotation: 0.0,
            destination: None,
            settings: None,
        }
    }

    fn pick_destination(&mut self, settings: GameSettings) -> Position {
        let margin = settings.player_radius;
        let x = random_within(&mut self.rng, margin, settings.arena_width - margin);
        let y = random_within(&mut self.rng, margin, settings.arena_height - margin);
        Position::new(x, y)
    }

    /// Next action for the current leg, choosing a fresh destination when the
    /// last one was reached.
    fn next_action(&mut self, position: Position, settings: GameSettings) -> Action {
        let destination = match self.destination {
            Some(destination) if distance(position, destination) > ARRIVAL_RADIUS => destination,
            _ => {
                let destination = self.pick_destination(settings);
                debug!(x = destination.x, y = destination.y, "new destination");
                self.destination = Some(destination);
                destination
            }
        };

        let heading = rotation_between(position, destination);
        if rotations_equal(self.rotation, heading) {
            Action::forward(false)
        } else {
            Action::rotate(heading)
        }
    }
}

impl Default for Wanderer {
    fn default() -> Self {
        Self::new()
    }
}

fn random_within(rng: &mut StdRng, low: f64, high: f64) -> f64 {
    if high <= low {
        // arena narrower than a player; stay on the centre line
        return (low + high) / 2.0;
    }
    rng.random_range(low..=high)
}

pub fn handlers() -> BotHandlers<Wanderer> {
    BotHandlers {
        register_player_response: Some(on_registered),
        move_player_response: Some(on_moved),
        rotate_player_response: Some(on_rotated),
        join_game_notification: Some(on_join_game),
        tick_notification: Some(on_tick),
        ..BotHandlers::default()
    }
}

fn on_registered(
    outcome: ResponseOutcome<RegisterPlayerSuccess>,
    mut state: Wanderer,
) -> Decision<Wanderer> {
    match outcome {
        ResponseOutcome::Success(player) => {
            debug!(player_id = %player.id, "registered");
            state.position = Some(player.position);
            state.rotation = player.rotation;
        }
        ResponseOutcome::Failure(reason) => warn!(%reason, "registration failed"),
    }
    Decision::idle(state)
}

fn on_join_game(join: JoinGame, mut state: Wanderer) -> Decision<Wanderer> {
    if join.settings.is_some() {
        state.settings = join.settings;
        state.destination = None;
    }
    Decision::idle(state)
}

fn on_moved(outcome: ResponseOutcome<MovePlayerSuccess>, mut state: Wanderer) -> Decision<Wanderer> {
    match outcome {
        ResponseOutcome::Success(moved) => state.position = Some(moved.position),
        ResponseOutcome::Failure(reason) => {
            // blocked or out of tokens; try somewhere else next tick
            warn!(%reason, "move failed");
            state.destination = None;
        }
    }
    Decision::idle(state)
}

fn on_rotated(
    outcome: ResponseOutcome<RotatePlayerSuccess>,
    mut state: Wanderer,
) -> Decision<Wanderer> {
    match outcome {
        ResponseOutcome::Success(rotated) => state.rotation = rotated.rotation,
        ResponseOutcome::Failure(reason) => warn!(%reason, "rotate failed"),
    }
    Decision::idle(state)
}

fn on_tick(mut state: Wanderer, in_flight: Option<&Action>) -> Decision<Wanderer> {
    if in_flight.is_some() {
        return Decision::idle(state);
    }
    let (Some(position), Some(settings)) = (state.position, state.settings) else {
        return Decision::idle(state);
    };

    let action = state.next_action(position, settings);
    Decision::act(state, action)
}
