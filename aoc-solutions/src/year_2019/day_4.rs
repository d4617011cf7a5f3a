//! Secure Container: count six-digit passwords in a range that satisfy the digit rules.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use std::ops::RangeInclusive;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 4, tags = ["2019", "digits"])]
pub struct Solver;

/// Decimal digits of a six-digit number, most significant first
fn digits(n: u32) -> Option<[u8; 6]> {
    if !(100_000..=999_999).contains(&n) {
        return None;
    }
    let mut digits = [0; 6];
    let mut rest = n;
    for digit in digits.iter_mut().rev() {
        *digit = (rest % 10) as u8;
        rest /= 10;
    }
    Some(digits)
}

/// Lengths of the runs of equal adjacent digits, or `None` if a digit decreases
fn runs(n: u32) -> Option<Vec<usize>> {
    let digits = digits(n)?;
    if digits.windows(2).any(|w| w[0] > w[1]) {
        return None;
    }
    Some(
        digits
            .iter()
            .chunk_by(|&&d| d)
            .into_iter()
            .map(|(_, run)| run.count())
            .collect(),
    )
}

/// Never decreasing, with at least two equal adjacent digits
pub fn is_candidate(n: u32) -> bool {
    runs(n).is_some_and(|runs| runs.iter().any(|&len| len >= 2))
}

/// Never decreasing, with a run of exactly two equal digits
pub fn is_strict_candidate(n: u32) -> bool {
    runs(n).is_some_and(|runs| runs.contains(&2))
}

impl AocParser for Solver {
    type SharedData<'a> = RangeInclusive<u32>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let input = input.trim();
        let (low, high) = input.split_once('-').ok_or_else(|| {
            ParseError::InvalidFormat(format!("expected `LOW-HIGH`, got {:?}", input))
        })?;
        let bound = |s: &str| {
            s.parse::<u32>()
                .map_err(|_| ParseError::InvalidFormat(format!("invalid bound {:?}", s)))
        };
        let (low, high) = (bound(low)?, bound(high)?);
        if low > high {
            return Err(ParseError::InvalidFormat(format!(
                "range {}-{} is empty",
                low, high
            )));
        }
        Ok(low..=high)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.clone().filter(|&n| is_candidate(n)).count().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .clone()
            .filter(|&n| is_strict_candidate(n))
            .count()
            .to_string())
    }
}
