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

//! An N×N grid maze split by a partial wall column, with the goal in the far
//! corner. The agent moves one cell at a time; moves into a wall or off the
//! grid are discarded and the position stays where it was.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

/// Maze error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    /// Maze side length is too small to hold an agent and a goal.
    #[error("maze size must be greater than 1, got {0}")]
    TooSmall(i32),

    /// The wall would split the maze into two disconnected regions.
    #[error("wall length {wall_length} disconnects the two halves of a maze of size {n}")]
    WallTooLong {
        /// Maze side length.
        n: i32,
        /// Requested wall half-length.
        wall_length: i32,
    },

    /// Action index outside {0, 1, 2, 3}.
    #[error("invalid action index: {0}")]
    InvalidAction(usize),
}

/// A cell location in the maze. Both coordinates are in `[0, N - 1]` for a
/// valid position; candidates produced during a step may be out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row coordinate.
    pub x: i32,

    /// Column coordinate.
    pub y: i32,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four moves the agent can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move forward: `(0, +1)`.
    Forward,

    /// Move backward: `(0, -1)`.
    Backward,

    /// Move right: `(+1, 0)`.
    Right,

    /// Move left: `(-1, 0)`.
    Left,
}

impl Action {
    /// All actions, indexed by their wire value 0..=3.
    pub const ALL: [Action; 4] = [
        Action::Forward,
        Action::Backward,
        Action::Right,
        Action::Left,
    ];

    /// Convert a wire index in {0, 1, 2, 3} into an action. Anything else is
    /// rejected rather than treated as a silent no-op, so a buggy caller
    /// finds out immediately.
    pub fn from_index(index: usize) -> Result<Action, MazeError> {
        match index {
            0 => Ok(Action::Forward),
            1 => Ok(Action::Backward),
            2 => Ok(Action::Right),
            3 => Ok(Action::Left),
            _ => Err(MazeError::InvalidAction(index)),
        }
    }

    /// The wire index of this action.
    pub fn index(self) -> usize {
        match self {
            Action::Forward => 0,
            Action::Backward => 1,
            Action::Right => 2,
            Action::Left => 3,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Action::Forward => (0, 1),
            Action::Backward => (0, -1),
            Action::Right => (1, 0),
            Action::Left => (-1, 0),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Forward => write!(f, "Forward"),
            Action::Backward => write!(f, "Backward"),
            Action::Right => write!(f, "Right"),
            Action::Left => write!(f, "Left"),
        }
    }
}

/// Extra per-step diagnostics. Always empty; kept so the step contract has
/// the usual five fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {}

/// The result of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// The agent's position after the transition. Unchanged if the move was
    /// discarded.
    pub observation: Position,

    /// -1 for every step, including discarded moves; 0 on reaching the goal.
    pub reward: i32,

    /// True when the step landed exactly on the goal.
    pub terminated: bool,

    /// Always false; there is no time-limit truncation in the environment.
    pub truncated: bool,

    /// Always empty.
    pub info: StepInfo,
}

/// The maze environment. Owns the agent's position, the maze geometry, and a
/// private seeded random source used only for random resets.
#[derive(Debug, Clone)]
pub struct Maze {
    n: i32,
    wall_length: i32,
    goal: Position,
    state: Position,
    episode_over: bool,
    rng: Pcg64,
}

impl Maze {
    /// Default maze side length.
    pub const DEFAULT_N: i32 = 8;

    /// Default wall half-length.
    pub const DEFAULT_WALL_LENGTH: i32 = 3;

    /// Create a new maze of size `n` with a dividing wall of half-length
    /// `wall_length`, then perform an initial random reset.
    ///
    /// Requires `n > 1` and `2 * wall_length < n`; the second bound keeps the
    /// two halves of the maze connected through the gap in the wall. With a
    /// seed the environment is fully reproducible; without one the random
    /// source is initialised from entropy.
    pub fn new(n: i32, wall_length: i32, seed: Option<u64>) -> Result<Self, MazeError> {
        if n <= 1 {
            return Err(MazeError::TooSmall(n));
        }
        if 2 * wall_length >= n {
            return Err(MazeError::WallTooLong { n, wall_length });
        }

        let rng = match seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_entropy(),
        };

        let mut maze = Self {
            n,
            wall_length,
            goal: Position { x: n - 1, y: n - 1 },
            state: Position { x: 0, y: 0 },
            episode_over: false,
            rng,
        };
        maze.reset(None);
        Ok(maze)
    }

    /// Maze side length.
    pub fn size(&self) -> i32 {
        self.n
    }

    /// Wall half-length.
    pub fn wall_length(&self) -> i32 {
        self.wall_length
    }

    /// The goal corner, always `(N - 1, N - 1)`.
    pub fn goal(&self) -> Position {
        self.goal
    }

    /// The agent's current position.
    pub fn position(&self) -> Position {
        self.state
    }

    /// True once a step has landed on the goal, until the next reset.
    pub fn is_over(&self) -> bool {
        self.episode_over
    }

    /// Check whether a candidate position is a cell the agent may occupy.
    ///
    /// A position is rejected when either coordinate is outside `[0, N - 1]`,
    /// or when it falls on the blocked part of the wall column `y == N / 2`:
    /// rows with `x < wall_length - 2` or `N - x <= wall_length + 2`. The
    /// remaining rows of that column form the gap the agent passes through.
    pub fn is_allowed(&self, position: Position) -> bool {
        let Position { x: i, y: j } = position;

        if i < 0 || i >= self.n || j < 0 || j >= self.n {
            return false;
        }

        if j == self.n / 2 && (i < self.wall_length - 2 || self.n - i <= self.wall_length + 2) {
            return false;
        }

        true
    }

    /// Start a new episode and return the starting position.
    ///
    /// An explicit `initial_position` is taken verbatim, with no validity
    /// check; the caller is responsible for it. Otherwise candidate
    /// coordinates are drawn uniformly from `[0, N - 2]` until a cell passes
    /// [`Maze::is_allowed`]. The upper bound excludes `N - 1`, so the last
    /// row and column are never chosen as a random start.
    pub fn reset(&mut self, initial_position: Option<Position>) -> Position {
        self.episode_over = false;

        self.state = match initial_position {
            Some(position) => position,
            None => loop {
                let candidate = Position {
                    x: self.rng.gen_range(0..self.n - 1),
                    y: self.rng.gen_range(0..self.n - 1),
                };
                if self.is_allowed(candidate) {
                    break candidate;
                }
            },
        };

        self.state
    }

    /// Take one step in the maze.
    ///
    /// The action's delta is applied to the current position to form a
    /// candidate. A disallowed candidate is discarded, not clipped: the
    /// position stays put and the reward is -1, the same as an ordinary step
    /// (there is no harsher wall-hit penalty). Landing exactly on the goal
    /// gives reward 0 and terminates the episode.
    pub fn step(&mut self, action: Action) -> Step {
        let (dx, dy) = action.delta();
        let candidate = Position {
            x: self.state.x + dx,
            y: self.state.y + dy,
        };

        let (reward, terminated) = if !self.is_allowed(candidate) {
            (-1, false)
        } else if candidate == self.goal {
            self.state = candidate;
            (0, true)
        } else {
            self.state = candidate;
            (-1, false)
        };

        if terminated {
            self.episode_over = true;
        }

        Step {
            observation: self.state,
            reward,
            terminated,
            truncated: false,
            info: StepInfo::default(),
        }
    }
}

// print out cells, and row and column numbers which start at 0. 'A' is the
// agent, 'G' the goal, '#' the wall band.
impl std::fmt::Display for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.n as usize;
        let mut s = String::with_capacity((n * 2 + 3) * (n + 1));

        // print column numbers. recall there will be row numbers on the left.
        for col in 0..n {
            if col == 0 {
                s.push_str("  ");
            }

            s.push_str(&format!("{}", col % 10));
            if col == n - 1 {
                s.push('\n');
            } else {
                s.push(' ');
            }
        }

        for row in 0..n {
            s.push_str(&format!("{} ", row % 10));

            for col in 0..n {
                let position = Position {
                    x: row as i32,
                    y: col as i32,
                };
                let c = if position == self.state {
                    'A'
                } else if position == self.goal {
                    'G'
                } else if !self.is_allowed(position) {
                    '#'
                } else {
                    '.'
                };
                s.push(c);
                if col < n - 1 {
                    s.push(' ');
                }
            }
            if row < n - 1 {
                s.push('\n');
            }
        }
        write!(f, "{}", s)
    }
}
