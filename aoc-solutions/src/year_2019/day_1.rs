//! The Tyranny of the Rocket Equation: fuel needed to launch each module.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::Context;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 1, tags = ["2019", "arithmetic"])]
pub struct Solver;

/// Fuel for `mass` alone: `mass / 3 - 2`, never negative
pub fn fuel(mass: u64) -> u64 {
    (mass / 3).saturating_sub(2)
}

/// Fuel for `mass` plus the fuel needed to carry that fuel, and so on
pub fn total_fuel(mass: u64) -> u64 {
    std::iter::successors(Some(fuel(mass)), |&f| Some(fuel(f)))
        .take_while(|&f| f > 0)
        .sum()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                line.trim().parse::<u64>().with_context(|| {
                    format!("(line {}) expected a module mass, got {:?}", line_idx + 1, line)
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|&mass| fuel(mass)).sum::<u64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .map(|&mass| total_fuel(mass))
            .sum::<u64>()
            .to_string())
    }
}
