//! Inventory Management System: box ID checksum and the two prototype boxes.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 2, tags = ["2018", "strings"])]
pub struct Solver;

/// Whether some letter appears exactly twice, and whether some appears exactly three times
fn repeats(id: &str) -> (bool, bool) {
    let counts = id.chars().counts();
    (
        counts.values().any(|&n| n == 2),
        counts.values().any(|&n| n == 3),
    )
}

/// IDs with a doubled letter times IDs with a tripled letter
pub fn checksum(ids: &[&str]) -> usize {
    let (twos, threes) = ids.iter().fold((0, 0), |(twos, threes), id| {
        let (two, three) = repeats(id);
        (twos + usize::from(two), threes + usize::from(three))
    });
    twos * threes
}

/// Letters shared by the first two IDs that differ in exactly one position
pub fn common_letters(ids: &[&str]) -> Option<String> {
    ids.iter().tuple_combinations().find_map(|(a, b)| {
        if a.chars().count() != b.chars().count() {
            return None;
        }
        let differing = a.chars().zip(b.chars()).filter(|(x, y)| x != y).count();
        (differing == 1).then(|| {
            a.chars()
                .zip(b.chars())
                .filter_map(|(x, y)| (x == y).then_some(x))
                .collect()
        })
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let ids: Vec<&str> = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if ids.is_empty() {
            return Err(ParseError::MissingData("empty input".to_string()));
        }
        Ok(ids)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(checksum(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        common_letters(shared).ok_or_else(|| {
            SolveError::NoSolution("no two IDs differ by exactly one letter".to_string())
        })
    }
}
