//! The Sum of Its Parts: step order under prerequisites, alone and with a crew.
//!
//! Steps are single capital letters. Whenever several steps are ready the
//! alphabetically first one goes next, both for the solo order and when idle
//! workers pick up work. Step `X` takes `base + (X - 'A' + 1)` seconds.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;
use thiserror::Error;

static EDGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Step ([A-Z]) must be finished before step ([A-Z]) can begin\.$").unwrap()
});

const WORKERS: usize = 5;
const BASE_DURATION: u32 = 60;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 7, tags = ["2018", "graph", "scheduling"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("steps {0:?} wait on each other")]
    Cycle(String),
    #[error("no workers to do the steps")]
    NoWorkers,
}

/// Every step mapped to the steps that must finish before it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instructions {
    prerequisites: BTreeMap<char, BTreeSet<char>>,
}

impl Instructions {
    pub fn add(&mut self, before: char, after: char) {
        self.prerequisites.entry(before).or_default();
        self.prerequisites.entry(after).or_default().insert(before);
    }

    fn ready(&self, done: &BTreeSet<char>, started: &BTreeSet<char>) -> Vec<char> {
        self.prerequisites
            .iter()
            .filter(|&(step, needs)| !started.contains(step) && needs.is_subset(done))
            .map(|(&step, _)| step)
            .collect()
    }

    fn blocked(&self, done: &BTreeSet<char>) -> ScheduleError {
        ScheduleError::Cycle(
            self.prerequisites
                .keys()
                .filter(|&step| !done.contains(step))
                .collect(),
        )
    }

    /// Order a single worker completes the steps in
    pub fn order(&self) -> Result<String, ScheduleError> {
        let mut done = BTreeSet::new();
        let mut order = String::with_capacity(self.prerequisites.len());
        while done.len() < self.prerequisites.len() {
            let next = *self
                .ready(&done, &done)
                .first()
                .ok_or_else(|| self.blocked(&done))?;
            done.insert(next);
            order.push(next);
        }
        Ok(order)
    }

    /// Seconds for `workers` to finish every step
    pub fn assembly_time(&self, workers: usize, base: u32) -> Result<u32, ScheduleError> {
        if workers == 0 && !self.prerequisites.is_empty() {
            return Err(ScheduleError::NoWorkers);
        }
        let duration = |step: char| base + (step as u32 - 'A' as u32 + 1);

        let mut now = 0;
        let mut done = BTreeSet::new();
        let mut started = BTreeSet::new();
        // (finish time, step) for steps in progress
        let mut in_progress: BTreeSet<(u32, char)> = BTreeSet::new();
        while done.len() < self.prerequisites.len() {
            for step in self.ready(&done, &started) {
                if in_progress.len() == workers {
                    break;
                }
                started.insert(step);
                in_progress.insert((now + duration(step), step));
            }
            let &(finish, _) = in_progress.first().ok_or_else(|| self.blocked(&done))?;
            now = finish;
            while let Some(&(time, step)) = in_progress.first() {
                if time != now {
                    break;
                }
                in_progress.pop_first();
                done.insert(step);
            }
        }
        Ok(now)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Instructions;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut instructions = Instructions::default();
        for (line_idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let caps = EDGE.captures(line).ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "(line {}) expected `Step X must be finished before step Y can begin.`, got {:?}",
                    line_idx + 1,
                    line
                ))
            })?;
            let step = |idx: usize| caps[idx].chars().next().unwrap_or('A');
            instructions.add(step(1), step(2));
        }
        if instructions.prerequisites.is_empty() {
            return Err(ParseError::MissingData("empty input".to_string()));
        }
        Ok(instructions)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.order().map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .assembly_time(WORKERS, BASE_DURATION)
            .map(|seconds| seconds.to_string())
            .map_err(SolveError::failed)
    }
}
