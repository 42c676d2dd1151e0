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

//! Stands still after the game starts, shooting in a slowly turning circle.

use arena_protocol::geometry::normalize_rotation;
use arena_protocol::{
    Action, BotHandlers, Decision, Hit, RegisterPlayerSuccess, ResponseOutcome,
    RotatePlayerSuccess, Rotation, ShootSuccess,
};
use tracing::{info, warn};

pub const NAME: &str = "sprayer";

const SHOTS_PER_HEADING: u32 = 3;
const ROTATION_STEP: Rotation = 5.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sprayer {
    pub registered: bool,
    pub started: bool,
    pub rotation: Rotation,
    pub shots_at_heading: u32,
    pub shots_fired: u32,
    pub damage_taken: f64,
}

pub fn handlers() -> BotHandlers<Sprayer> {
    BotHandlers {
        register_player_response: Some(on_registered),
        rotate_player_response: Some(on_rotated),
        shoot_response: Some(on_shot),
        start_game_notification: Some(on_start_game),
        hit_notification: Some(on_hit),
        tick_notification: Some(on_tick),
        ..BotHandlers::default()
    }
}

fn on_registered(
    outcome: ResponseOutcome<RegisterPlayerSuccess>,
    mut state: Sprayer,
) -> Decision<Sprayer> {
    match outcome {
        ResponseOutcome::Success(player) => {
            state.registered = true;
            state.rotation = player.rotation;
        }
        ResponseOutcome::Failure(reason) => warn!(%reason, "registration failed"),
    }
    Decision::idle(state)
}

fn on_start_game(mut state: Sprayer) -> Decision<Sprayer> {
    state.started = true;
    Decision::idle(state)
}

fn on_shot(outcome: ResponseOutcome<ShootSuccess>, mut state: Sprayer) -> Decision<Sprayer> {
    match outcome {
        ResponseOutcome::Success(_) => state.shots_fired += 1,
        ResponseOutcome::Failure(reason) => warn!(%reason, "shot failed"),
    }
    Decision::idle(state)
}

fn on_rotated(
    outcome: ResponseOutcome<RotatePlayerSuccess>,
    mut state: Sprayer,
) -> Decision<Sprayer> {
    match outcome {
        ResponseOutcome::Success(rotated) => state.rotation = rotated.rotation,
        ResponseOutcome::Failure(reason) => warn!(%reason, "rotate failed"),
    }
    Decision::idle(state)
}

fn on_hit(hit: Hit, mut state: Sprayer) -> Decision<Sprayer> {
    state.damage_taken += hit.damage;
    info!(damage = hit.damage, total = state.damage_taken, "hit");
    Decision::idle(state)
}

fn on_tick(mut state: Sprayer, in_flight: Option<&Action>) -> Decision<Sprayer> {
    // registration is in flight without an action until its response lands
    if !state.registered || !state.started || in_flight.is_some() {
        return Decision::idle(state);
    }

    if state.shots_at_heading < SHOTS_PER_HEADING {
        state.shots_at_heading += 1;
        return Decision::act(state, Action::Shoot);
    }

    state.shots_at_heading = 0;
    let next = normalize_rotation(state.rotation + ROTATION_STEP);
    Decision::act(state, Action::rotate(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_protocol::RequestCost;

    fn started() -> Sprayer {
        let registered = Sprayer {
            registered: true,
            ..Sprayer::default()
        };
        on_start_game(registered).state
    }

    #[test]
    fn idle_until_the_game_starts() {
        let decision = on_tick(Sprayer::default(), None);
        assert_eq!(decision.action, None);
        assert_eq!(decision.state, Sprayer::default());
    }

    #[test]
    fn idle_until_registration_is_answered() {
        let state = on_start_game(Sprayer::default()).state;
        assert_eq!(on_tick(state.clone(), None).action, None);

        let registered = on_registered(
            ResponseOutcome::Success(RegisterPlayerSuccess {
                id: "p1".into(),
                position: arena_protocol::Position::new(0.0, 0.0),
                rotation: 30.0,
            }),
            state,
        )
        .state;
        assert!(registered.registered);
        assert_eq!(registered.rotation, 30.0);
        assert_eq!(on_tick(registered, None).action, Some(Action::Shoot));
    }

    #[test]
    fn shoots_three_times_then_turns() {
        let mut state = started();
        let mut actions = Vec::new();
        for _ in 0..5 {
            let decision = on_tick(state, None);
            state = decision.state;
            actions.extend(decision.action);
        }

        assert_eq!(
            actions,
            vec![
                Action::Shoot,
                Action::Shoot,
                Action::Shoot,
                Action::rotate(5.0),
                Action::Shoot,
            ]
        );
    }

    #[test]
    fn waits_while_a_request_is_outstanding() {
        let pending = Action::Shoot;
        let decision = on_tick(started(), Some(&pending));
        assert_eq!(decision.action, None);
        assert_eq!(decision.state.shots_at_heading, 0);
    }

    #[test]
    fn turning_wraps_past_a_full_circle() {
        let state = Sprayer {
            registered: true,
            started: true,
            rotation: 357.0,
            shots_at_heading: SHOTS_PER_HEADING,
            ..Sprayer::default()
        };
        assert_eq!(on_tick(state, None).action, Some(Action::rotate(2.0)));
    }

    #[test]
    fn responses_and_hits_are_tallied() {
        let shot = ResponseOutcome::Success(ShootSuccess {
            tokens: 3.0,
            request: RequestCost {
                cost: 1.0,
                with_turbo: None,
            },
        });
        let state = on_shot(shot, started()).state;
        let state = on_shot(ResponseOutcome::Failure("no tokens".into()), state).state;
        let state = on_hit(Hit { damage: 12.5 }, state).state;

        assert_eq!(state.shots_fired, 1);
        assert_eq!(state.damage_taken, 12.5);
    }
}
