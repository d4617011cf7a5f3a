//! Crossed Wires: where two wire paths on a grid intersect.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{Context, bail};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 3, tags = ["2019", "geometry"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// One segment of a wire path, e.g. `R75`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub direction: Direction,
    pub length: u32,
}

impl Move {
    fn parse(s: &str) -> anyhow::Result<Self> {
        let mut chars = s.chars();
        let direction = match chars.next() {
            Some('U') => Direction::Up,
            Some('D') => Direction::Down,
            Some('L') => Direction::Left,
            Some('R') => Direction::Right,
            _ => bail!("expected a move like `R8`, got {:?}", s),
        };
        let length = chars
            .as_str()
            .parse()
            .with_context(|| format!("invalid move length in {:?}", s))?;
        Ok(Move { direction, length })
    }
}

/// Grid points a wire visits, in order, each with the step count at which
/// it first gets there. The origin is not included.
fn first_visits(path: &[Move]) -> HashMap<(i64, i64), u64> {
    let mut visits = HashMap::new();
    let (mut x, mut y) = (0, 0);
    let mut steps = 0;
    for m in path {
        let (dx, dy) = m.direction.delta();
        for _ in 0..m.length {
            x += dx;
            y += dy;
            steps += 1;
            visits.entry((x, y)).or_insert(steps);
        }
    }
    visits
}

/// Every crossing of the two wires with the combined steps to reach it
pub fn crossings(first: &[Move], second: &[Move]) -> Vec<((i64, i64), u64)> {
    let first = first_visits(first);
    let second = first_visits(second);
    first
        .iter()
        .filter_map(|(point, steps)| second.get(point).map(|other| (*point, steps + other)))
        .collect()
}

impl AocParser for Solver {
    type SharedData<'a> = [Vec<Move>; 2];

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let wires = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                line.trim()
                    .split(',')
                    .map(Move::parse)
                    .collect::<anyhow::Result<Vec<_>>>()
                    .with_context(|| format!("(line {})", line_idx + 1))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))?;

        <[Vec<Move>; 2]>::try_from(wires).map_err(|wires| {
            ParseError::InvalidFormat(format!("expected 2 wires, got {}", wires.len()))
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        crossings(&shared[0], &shared[1])
            .into_iter()
            .map(|((x, y), _)| x.abs() + y.abs())
            .min()
            .map(|distance| distance.to_string())
            .ok_or_else(|| SolveError::NoSolution("the wires never cross".to_string()))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        crossings(&shared[0], &shared[1])
            .into_iter()
            .map(|(_, steps)| steps)
            .min()
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::NoSolution("the wires never cross".to_string()))
    }
}
