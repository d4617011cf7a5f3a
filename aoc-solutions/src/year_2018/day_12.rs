//! Subterranean Sustainability: a one-dimensional plant automaton.
//!
//! Pots are kept as the sorted set of indices holding a plant. Long runs use
//! the fact that these automata settle into a fixed pattern that slides by a
//! constant number of pots each generation; once that happens the remaining
//! generations are extrapolated instead of simulated.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

const SHORT_RUN: u64 = 20;
const LONG_RUN: u64 = 50_000_000_000;
const SETTLE_LIMIT: u64 = 10_000;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 12, tags = ["2018", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlantError {
    #[error("no steady pattern within {0} generations")]
    Unsettled(u64),
    #[error("pot number sum does not fit in 64 bits")]
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tunnel {
    plants: BTreeSet<i64>,
    /// Five-pot neighbourhoods, as bit masks, that leave a plant in the middle
    growing: HashSet<u8>,
}

impl Tunnel {
    fn neighbourhood(plants: &BTreeSet<i64>, pot: i64) -> u8 {
        (-2..=2).fold(0, |mask, offset| (mask << 1) | u8::from(plants.contains(&(pot + offset))))
    }

    /// The next generation of pots
    pub fn step(&self, plants: &BTreeSet<i64>) -> BTreeSet<i64> {
        let (Some(&first), Some(&last)) = (plants.first(), plants.last()) else {
            return BTreeSet::new();
        };
        (first - 2..=last + 2)
            .filter(|&pot| self.growing.contains(&Self::neighbourhood(plants, pot)))
            .collect()
    }

    /// Sum of the pot numbers holding plants after `generations`
    pub fn pot_sum_after(&self, generations: u64) -> Result<i64, PlantError> {
        let mut plants = self.plants.clone();
        for generation in 0..generations {
            if generation >= SETTLE_LIMIT {
                return Err(PlantError::Unsettled(SETTLE_LIMIT));
            }
            let next = self.step(&plants);
            if let Some(shift) = slide(&plants, &next) {
                let remaining = generations - generation - 1;
                log::debug!(
                    "pattern slides by {} pots from generation {}",
                    shift,
                    generation + 1
                );
                return extrapolate(&next, shift, remaining);
            }
            plants = next;
        }
        pot_sum(&plants)
    }
}

fn pot_sum(plants: &BTreeSet<i64>) -> Result<i64, PlantError> {
    plants
        .iter()
        .try_fold(0i64, |sum, &pot| sum.checked_add(pot))
        .ok_or(PlantError::Overflow)
}

/// Offset between two generations with the same pattern, if they have one
fn slide(before: &BTreeSet<i64>, after: &BTreeSet<i64>) -> Option<i64> {
    if before.len() != after.len() {
        return None;
    }
    let (Some(first_before), Some(first_after)) = (before.first(), after.first()) else {
        // an empty tunnel stays empty
        return Some(0);
    };
    let shift = first_after - first_before;
    before
        .iter()
        .zip(after)
        .all(|(&a, &b)| b - a == shift)
        .then_some(shift)
}

/// Pot sum once a pattern sliding by `shift` moves `remaining` more times
fn extrapolate(plants: &BTreeSet<i64>, shift: i64, remaining: u64) -> Result<i64, PlantError> {
    let count = i64::try_from(plants.len()).map_err(|_| PlantError::Overflow)?;
    let remaining = i64::try_from(remaining).map_err(|_| PlantError::Overflow)?;
    shift
        .checked_mul(count)
        .and_then(|per_step| per_step.checked_mul(remaining))
        .and_then(|moved| pot_sum(plants).ok()?.checked_add(moved))
        .ok_or(PlantError::Overflow)
}

fn pots(s: &str) -> Option<Vec<bool>> {
    s.chars()
        .map(|c| match c {
            '#' => Some(true),
            '.' => Some(false),
            _ => None,
        })
        .collect()
}

impl AocParser for Solver {
    type SharedData<'a> = Tunnel;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = input
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty());
        let (_, header) = lines.next().ok_or_else(|| ParseError::MissingData("empty input".to_string()))?;
        let plants = header
            .strip_prefix("initial state:")
            .and_then(|state| pots(state.trim()))
            .ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "(line 1) expected `initial state: #..#`, got {:?}",
                    header
                ))
            })?
            .into_iter()
            .zip(0i64..)
            .filter_map(|(plant, pot)| plant.then_some(pot))
            .collect();

        let mut growing = HashSet::new();
        for (line_idx, line) in lines {
            let invalid = |what: &str| {
                ParseError::InvalidFormat(format!("(line {}) {}, got {:?}", line_idx + 1, what, line))
            };
            let (pattern, result) = line
                .split_once("=>")
                .ok_or_else(|| invalid("expected `LLCRR => N`"))?;
            let pattern = pots(pattern.trim())
                .filter(|p| p.len() == 5)
                .ok_or_else(|| invalid("expected five pots"))?;
            let grows = match result.trim() {
                "#" => true,
                "." => false,
                _ => return Err(invalid("expected `#` or `.`")),
            };
            let mask = pattern.iter().fold(0u8, |mask, &p| (mask << 1) | u8::from(p));
            if grows {
                if mask == 0 {
                    return Err(invalid("plants cannot grow from empty pots"));
                }
                growing.insert(mask);
            }
        }
        Ok(Tunnel { plants, growing })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .pot_sum_after(SHORT_RUN)
            .map(|sum| sum.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .pot_sum_after(LONG_RUN)
            .map(|sum| sum.to_string())
            .map_err(SolveError::failed)
    }
}
