//! Advent of Code Solver Library
//!
//! A small, type-safe framework for puzzle solvers. Each puzzle is a
//! self-contained pipeline: the raw input is parsed once into shared data,
//! then each part computes a single answer from it.
//!
//! # Overview
//!
//! This library provides:
//! - [`AocParser`] / [`PartSolver`] / [`Solver`] traits for defining solvers
//! - [`SolverInstance`] which parses once and records parse/solve timing
//! - A registry with plugin-based self-registration via `inventory`
//! - Typed errors separating malformed input from "no solution" outcomes
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! pub struct Totals;
//!
//! impl AocParser for Totals {
//!     type SharedData<'a> = Vec<i64>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|line| line.parse().map_err(|_| ParseError::InvalidFormat(line.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Totals {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i64>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Totals {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().product::<i64>().to_string())
//!     }
//! }
//!
//! let mut builder = SolverRegistryBuilder::new();
//! aoc_solver::register_solver!(builder, Totals, 2020, 1);
//! let registry = builder.build();
//!
//! let mut solver = registry.create_solver(2020, 1, "2\n3\n4").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "9");
//! assert_eq!(solver.solve(2).unwrap().answer, "24");
//! ```
//!
//! # Plugin System
//!
//! Use `#[derive(AutoRegisterSolver)]` to register a solver at link time:
//! ```ignore
//! #[derive(AocSolver, AutoRegisterSolver)]
//! #[aoc_solver(max_parts = 2)]
//! #[aoc(year = 2020, day = 1, tags = ["2020", "search"])]
//! pub struct Solver;
//! ```
//! and collect every plugin with [`SolverRegistryBuilder::register_all_plugins`].

mod error;
mod instance;
mod registry;
mod solver;

// Re-export public API
pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    BASE_YEAR, CAPACITY, DAYS_PER_YEAR, FactoryInfo, MAX_YEARS, RegisterableSolver,
    SolverFactory, SolverFactoryStorage, SolverPlugin, SolverRegistry, SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-export inventory for use by the derive macro
pub use inventory;

// Re-export the derive macros
pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
