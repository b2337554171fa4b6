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

//! Run a random-walk agent through the maze once and print the outcome.

use maze::{Maze, RandomWalkAgent, Simulation};
use rand::SeedableRng;

fn main() {
    let maze = match Maze::new(Maze::DEFAULT_N, Maze::DEFAULT_WALL_LENGTH, Some(42)) {
        Ok(maze) => maze,
        Err(e) => {
            eprintln!("failed to build maze: {}", e);
            std::process::exit(1);
        }
    };

    let agent = RandomWalkAgent::new(rand_pcg::Pcg64::seed_from_u64(7));

    let step_limit = 10_000;
    let mut simulation = Simulation::new(maze, agent, step_limit);
    let outcome = simulation.run(None);

    println!("{}", simulation.maze());
    println!();
    if outcome.reached_goal {
        println!(
            "reached the goal at {} after {} steps (total reward {})",
            outcome.final_position, outcome.steps, outcome.total_reward
        );
    } else {
        println!(
            "gave up at {} after {} steps (total reward {})",
            outcome.final_position, outcome.steps, outcome.total_reward
        );
    }
}
