//! Alchemical Reduction: collapse reacting unit pairs in a polymer.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 5, tags = ["2018", "strings"])]
pub struct Solver;

/// Same type, opposite polarity
fn reacts(a: u8, b: u8) -> bool {
    a != b && a.eq_ignore_ascii_case(&b)
}

/// The polymer left once no adjacent pair can react
pub fn reduce(units: impl IntoIterator<Item = u8>) -> Vec<u8> {
    let mut stack: Vec<u8> = Vec::new();
    for unit in units {
        match stack.last() {
            Some(&top) if reacts(top, unit) => {
                stack.pop();
            }
            _ => stack.push(unit),
        }
    }
    stack
}

pub fn reduced_len(units: impl IntoIterator<Item = u8>) -> usize {
    reduce(units).len()
}

/// Shortest reduction after removing every unit of a single type
pub fn shortest_without_one_type(polymer: &[u8]) -> usize {
    // removing a type never undoes a reaction, so start from the reduced polymer
    let reduced = reduce(polymer.iter().copied());
    (b'a'..=b'z')
        .map(|kind| {
            reduced_len(
                reduced
                    .iter()
                    .copied()
                    .filter(|unit| unit.to_ascii_lowercase() != kind),
            )
        })
        .min()
        .unwrap_or(0)
}

impl AocParser for Solver {
    type SharedData<'a> = &'a [u8];

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let polymer = input.trim();
        if let Some((idx, c)) = polymer.char_indices().find(|(_, c)| !c.is_ascii_alphabetic()) {
            return Err(ParseError::InvalidFormat(format!(
                "(unit {}) expected a letter, got {:?}",
                idx + 1,
                c
            )));
        }
        Ok(polymer.as_bytes())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(reduced_len(shared.iter().copied()).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shortest_without_one_type(shared).to_string())
    }
}
