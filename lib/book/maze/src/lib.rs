/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

#![warn(missing_docs)]

//! Maze grid-world environment.
//!
//! A deterministic N×N maze split by a partial internal wall, with the goal
//! in the far corner. This is a library for the environment's transition
//! model; it is intended to be driven by a learning or search algorithm that
//! supplies actions and receives observations.

use rand::Rng;

pub mod maze_world;

pub use maze_world::{Action, Maze, MazeError, Position, Step, StepInfo};

/// An Agent chooses the next action from the current observation.
///
/// Notice that the Agent is not aware of the [`Maze`]; its only interface is
/// the observed position coming in and the action going out. A learning
/// agent can keep whatever state it needs across calls.
pub trait Agent {
    /// Choose the next action.
    fn act(&mut self, observation: Position) -> Action;
}

/// An agent that picks one of the four actions uniformly at random,
/// ignoring the observation. Useful as a baseline and for exercising the
/// environment.
pub struct RandomWalkAgent<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomWalkAgent<R> {
    /// Create a random-walk agent with its own random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Agent for RandomWalkAgent<R> {
    fn act(&mut self, _observation: Position) -> Action {
        Action::ALL[self.rng.gen_range(0..Action::ALL.len())]
    }
}

/// The result of running one episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeOutcome {
    /// Where the agent ended up.
    pub final_position: Position,

    /// Sum of per-step rewards over the episode.
    pub total_reward: i64,

    /// Number of steps taken.
    pub steps: usize,

    /// True when the episode terminated on the goal rather than running
    /// into the step limit.
    pub reached_goal: bool,
}

/// A Simulation runs a single Agent in the maze for one episode at a time.
///
/// The environment has no time limit of its own, so the simulation imposes a
/// step limit to bound episodes under policies that may never reach the
/// goal. The Simulation is aware of both the maze and the agent; the agent
/// still does not need to know the maze exists.
pub struct Simulation<A: Agent> {
    maze: Maze,
    agent: A,
    step_limit: usize,
}

impl<A: Agent> Simulation<A> {
    /// Create a simulation with a step limit per episode.
    pub fn new(maze: Maze, agent: A, step_limit: usize) -> Self {
        Self {
            maze,
            agent,
            step_limit,
        }
    }

    /// The maze being simulated.
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Run one episode from a fresh reset and return its outcome.
    ///
    /// With `initial_position` the episode starts there (taken verbatim, as
    /// with [`Maze::reset`]); otherwise the start is drawn from the maze's
    /// random source.
    pub fn run(&mut self, initial_position: Option<Position>) -> EpisodeOutcome {
        let mut observation = self.maze.reset(initial_position);
        let mut total_reward: i64 = 0;
        let mut steps = 0;

        while steps < self.step_limit {
            let action = self.agent.act(observation);
            let step = self.maze.step(action);
            observation = step.observation;
            total_reward += i64::from(step.reward);
            steps += 1;
            if step.terminated {
                break;
            }
        }

        EpisodeOutcome {
            final_position: observation,
            total_reward,
            steps,
            reached_goal: self.maze.is_over(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;

    /// Replays a fixed list of actions, then keeps repeating the last one.
    struct ScriptedAgent {
        script: Vec<Action>,
        next: usize,
    }

    impl ScriptedAgent {
        fn new(script: Vec<Action>) -> Self {
            Self { script, next: 0 }
        }
    }

    impl Agent for ScriptedAgent {
        fn act(&mut self, _observation: Position) -> Action {
            let action = self.script[self.next.min(self.script.len() - 1)];
            self.next += 1;
            action
        }
    }

    fn goal_script() -> Vec<Action> {
        // (0, 0) -> (1, 0), forward along row 1 through the wall gap, then
        // down the last column to (7, 7).
        let mut script = vec![Action::Right];
        script.extend([Action::Forward; 7]);
        script.extend([Action::Right; 6]);
        script
    }

    #[test]
    fn test_scripted_episode_reaches_goal() {
        let maze = Maze::new(8, 3, Some(1)).expect("construction failed");
        let agent = ScriptedAgent::new(goal_script());
        let mut simulation = Simulation::new(maze, agent, 1000);

        let outcome = simulation.run(Some(Position { x: 0, y: 0 }));
        assert!(outcome.reached_goal);
        assert_eq!(outcome.final_position, Position { x: 7, y: 7 });
        assert_eq!(outcome.steps, 14);
        // 13 ordinary steps at -1, then 0 for the goal step.
        assert_eq!(outcome.total_reward, -13);
    }

    #[test]
    fn test_step_limit_bounds_the_episode() {
        let maze = Maze::new(8, 3, Some(1)).expect("construction failed");
        // walks into the bottom wall forever.
        let agent = ScriptedAgent::new(vec![Action::Backward]);
        let mut simulation = Simulation::new(maze, agent, 25);

        let outcome = simulation.run(Some(Position { x: 0, y: 0 }));
        assert!(!outcome.reached_goal);
        assert_eq!(outcome.steps, 25);
        assert_eq!(outcome.total_reward, -25);
        assert_eq!(outcome.final_position, Position { x: 0, y: 0 });
    }

    #[test]
    fn test_random_walk_agent_is_reproducible() {
        let mut a = RandomWalkAgent::new(Pcg64::seed_from_u64(9));
        let mut b = RandomWalkAgent::new(Pcg64::seed_from_u64(9));
        let observation = Position { x: 0, y: 0 };
        for _ in 0..100 {
            assert_eq!(a.act(observation), b.act(observation));
        }
    }

    #[test]
    fn test_random_walk_episode_is_reproducible() {
        let run = || {
            let maze = Maze::new(8, 3, Some(3)).expect("construction failed");
            let agent = RandomWalkAgent::new(Pcg64::seed_from_u64(4));
            Simulation::new(maze, agent, 10_000).run(None)
        };
        assert_eq!(run(), run());
    }
}
