//! Sequential executor for running solvers

use crate::config::Config;
use crate::error::CliError;
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    /// Errors shared between the parts of one day are reference counted
    pub answer: Result<String, Arc<CliError>>,
    /// Set on the first part of a day only, since a day is parsed once
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Runs every selected solver one after the other in (year, day, part) order
pub struct Executor {
    registry: SolverRegistry,
    inputs: InputStore,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Self {
        let mut inputs = InputStore::new(config.input_dir.clone());
        if let (Some(path), Some(year), Some(day)) =
            (&config.input_file, config.year_filter, config.day_filter)
        {
            inputs = inputs.with_file(year, day, path.clone());
        }

        Self {
            registry,
            inputs,
            year_filter: config.year_filter,
            day_filter: config.day_filter,
            part_filter: config.part_filter,
        }
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        self.registry
            .storage()
            .iter_info()
            .filter(|info| self.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| self.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Work items whose input file is absent
    pub fn missing_inputs(&self, work_items: &[WorkItem]) -> Vec<(u16, u8)> {
        work_items
            .iter()
            .filter(|w| !self.inputs.contains(w.year, w.day))
            .map(|w| (w.year, w.day))
            .collect()
    }

    /// Filter parts based on the part filter and solver's max parts
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0,
            None => 1..=max_parts,
        }
    }

    /// Execute all work items, handing each result to `on_result` as soon as it is ready
    pub fn execute<F>(&self, mut on_result: F)
    where
        F: FnMut(SolverResult),
    {
        for work in self.collect_work_items() {
            self.run_work_item(&work, &mut on_result);
        }
    }

    fn run_work_item<F>(&self, work: &WorkItem, on_result: &mut F)
    where
        F: FnMut(SolverResult),
    {
        let (year, day) = (work.year, work.day);

        let input = match self.inputs.get(year, day) {
            Ok(input) => input,
            Err(e) => {
                log::warn!("skipping {}/{:02}: {}", year, day, e);
                report_failure(work, CliError::from(e), on_result);
                return;
            }
        };

        let mut solver = match self.registry.create_solver(year, day, &input) {
            Ok(solver) => solver,
            Err(e) => {
                report_failure(work, CliError::from(e), on_result);
                return;
            }
        };

        let mut parse_duration = Some(solver.parse_duration());
        for part in work.parts.clone() {
            let mut result = solve_part(year, day, part, &mut *solver);
            result.parse_duration = parse_duration.take();
            on_result(result);
        }
    }
}

/// Report the same failure for every requested part of a work item
fn report_failure<F>(work: &WorkItem, error: CliError, on_result: &mut F)
where
    F: FnMut(SolverResult),
{
    let error = Arc::new(error);
    for part in work.parts.clone() {
        on_result(SolverResult {
            year: work.year,
            day: work.day,
            part,
            answer: Err(Arc::clone(&error)),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        });
    }
}

fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    match solver.solve(part) {
        Ok(solved) => SolverResult {
            year,
            day,
            part,
            solve_duration: solved.duration(),
            answer: Ok(solved.answer),
            parse_duration: None,
        },
        Err(e) => SolverResult {
            year,
            day,
            part,
            answer: Err(Arc::new(CliError::Solver(e.into()))),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        },
    }
}
