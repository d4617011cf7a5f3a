//! Tests for registry construction and lookup

use aoc_solver::{
    AocParser, ParseError, RegistrationError, SolveError, Solver, SolverError,
    SolverRegistryBuilder, register_solver,
};
use proptest::prelude::*;

struct LineCount;

impl AocParser for LineCount {
    type SharedData<'a> = usize;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.lines().count())
    }
}

impl Solver for LineCount {
    const PARTS: u8 = 1;

    fn solve_part(shared: &mut Self::SharedData<'_>, _part: u8) -> Result<String, SolveError> {
        Ok(shared.to_string())
    }
}

fn register(
    builder: SolverRegistryBuilder,
    year: u16,
    day: u8,
) -> Result<SolverRegistryBuilder, RegistrationError> {
    builder.register_factory(year, day, 1, |input: &str| {
        let instance = aoc_solver::SolverInstance::<LineCount>::new(2020, 1, input)?;
        Ok(Box::new(instance) as Box<dyn aoc_solver::DynSolver + '_>)
    })
}

#[test]
fn test_duplicate_registration_rejected() {
    let builder = register(SolverRegistryBuilder::new(), 2020, 1).unwrap();
    assert!(matches!(
        register(builder, 2020, 1),
        Err(RegistrationError::DuplicateSolver(2020, 1))
    ));
}

#[test]
fn test_out_of_range_registration_rejected() {
    assert!(matches!(
        register(SolverRegistryBuilder::new(), 2014, 1),
        Err(RegistrationError::InvalidYearDay(2014, 1))
    ));
    assert!(matches!(
        register(SolverRegistryBuilder::new(), 2020, 26),
        Err(RegistrationError::InvalidYearDay(2020, 26))
    ));
}

#[test]
fn test_lookup_errors() {
    let registry = register(SolverRegistryBuilder::new(), 2020, 1)
        .unwrap()
        .build();

    assert!(matches!(
        registry.create_solver(2020, 2, ""),
        Err(SolverError::NotFound(2020, 2))
    ));
    assert!(matches!(
        registry.create_solver(2020, 0, ""),
        Err(SolverError::InvalidYearDay(2020, 0))
    ));
}

#[test]
fn test_register_solver_macro() {
    let mut builder = SolverRegistryBuilder::new();
    register_solver!(builder, LineCount, 2020, 6);
    let registry = builder.build();

    let mut solver = registry.create_solver(2020, 6, "a\nb\nc").unwrap();
    assert_eq!(solver.year(), 2020);
    assert_eq!(solver.day(), 6);
    assert_eq!(solver.parts(), 1);
    assert_eq!(solver.solve(1).unwrap().answer, "3");
    assert!(solver.parse_duration() >= chrono::TimeDelta::zero());
    assert!(matches!(
        solver.solve(2),
        Err(SolveError::PartOutOfRange(2))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// iter_info lists every registered day exactly once, in (year, day) order
    #[test]
    fn iter_info_is_sorted(days in prop::collection::btree_set((2015u16..=2034, 1u8..=25), 0..20)) {
        let mut builder = SolverRegistryBuilder::new();
        // register in reverse to show storage order does not depend on insertion order
        for &(year, day) in days.iter().rev() {
            builder = register(builder, year, day).unwrap();
        }
        let registry = builder.build();

        let listed: Vec<(u16, u8)> = registry
            .storage()
            .iter_info()
            .map(|info| (info.year, info.day))
            .collect();
        let expected: Vec<(u16, u8)> = days.into_iter().collect();

        prop_assert_eq!(registry.storage().len(), expected.len());
        prop_assert_eq!(listed, expected);
    }
}
