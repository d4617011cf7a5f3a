//! Chronal Calibration: resulting frequency and the first frequency reached twice.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::Context;
use itertools::Itertools;
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 1, tags = ["2018", "search"])]
pub struct Solver;

/// Frequency after applying every change once, starting from 0
pub fn resulting_frequency(changes: &[i64]) -> Option<i64> {
    changes.iter().try_fold(0i64, |freq, &change| freq.checked_add(change))
}

/// First frequency reached twice while the change list repeats forever.
///
/// Each pass shifts every frequency by the total drift, so two frequencies
/// can only meet while the later pass is within the spread of one pass. That
/// bounds the number of passes to simulate.
pub fn first_repeat(changes: &[i64]) -> Option<i64> {
    let mut prefix = Vec::with_capacity(changes.len());
    let mut freq = 0i64;
    for &change in changes {
        freq = freq.checked_add(change)?;
        prefix.push(freq);
    }
    let drift = *prefix.last()?;
    let (&low, &high) = prefix.iter().chain(std::iter::once(&0)).minmax().into_option()?;
    let spread = high.checked_sub(low)?;
    let passes = match drift.checked_abs()? {
        0 => 2,
        drift => spread / drift + 2,
    };

    let mut seen = HashSet::from([0i64]);
    let mut freq = 0i64;
    for _ in 0..passes {
        for &change in changes {
            freq = freq.checked_add(change)?;
            if !seen.insert(freq) {
                return Some(freq);
            }
        }
    }
    None
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let changes = input
            .lines()
            .enumerate()
            .flat_map(|(line_idx, line)| line.split(',').map(move |item| (line_idx, item.trim())))
            .filter(|(_, item)| !item.is_empty())
            .map(|(line_idx, item)| {
                item.parse::<i64>().with_context(|| {
                    format!("(line {}) expected a signed change, got {:?}", line_idx + 1, item)
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))?;
        if changes.is_empty() {
            return Err(ParseError::MissingData("empty input".to_string()));
        }
        Ok(changes)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        resulting_frequency(shared)
            .map(|freq| freq.to_string())
            .ok_or_else(|| SolveError::NoSolution("frequency does not fit in 64 bits".to_string()))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        first_repeat(shared)
            .map(|freq| freq.to_string())
            .ok_or_else(|| SolveError::NoSolution("no frequency is ever reached twice".to_string()))
    }
}
