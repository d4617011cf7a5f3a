//! Report Repair: find the expenses that sum to 2020.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::Context;
use itertools::Itertools;
use thiserror::Error;

const TARGET: i64 = 2020;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 1, tags = ["2020", "search"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseError {
    #[error("product of {0:?} does not fit in 64 bits")]
    ProductOverflow(Vec<i64>),
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                line.trim()
                    .parse::<i64>()
                    .with_context(|| {
                        format!("(line {}) expected an integer, got {:?}", line_idx + 1, line)
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        find_pair_product(shared, TARGET)
            .ok_or_else(|| SolveError::NoSolution(format!("no two entries sum to {}", TARGET)))?
            .map(|product| product.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        find_triple_product(shared, TARGET)
            .ok_or_else(|| SolveError::NoSolution(format!("no three entries sum to {}", TARGET)))?
            .map(|product| product.to_string())
            .map_err(SolveError::failed)
    }
}

/// Product of the first pair of distinct entries (by position) summing to `target`.
///
/// Pairs whose sum overflows cannot reach `target` and are skipped.
pub fn find_pair_product(entries: &[i64], target: i64) -> Option<Result<i64, ExpenseError>> {
    entries
        .iter()
        .copied()
        .tuple_combinations::<(i64, i64)>()
        .find(|&(a, b)| a.checked_add(b) == Some(target))
        .map(|(a, b)| a.checked_mul(b).ok_or(ExpenseError::ProductOverflow(vec![a, b])))
}

/// Product of the first triple of distinct entries (by position) summing to `target`
pub fn find_triple_product(entries: &[i64], target: i64) -> Option<Result<i64, ExpenseError>> {
    entries
        .iter()
        .copied()
        .tuple_combinations::<(i64, i64, i64)>()
        .find(|&(a, b, c)| a.checked_add(b).and_then(|ab| ab.checked_add(c)) == Some(target))
        .map(|(a, b, c)| {
            a.checked_mul(b)
                .and_then(|ab| ab.checked_mul(c))
                .ok_or(ExpenseError::ProductOverflow(vec![a, b, c]))
        })
}
