//! Advent of Code puzzle solutions with automatic registration
//!
//! Solutions are organized by year, each behind a `year-YYYY` feature. Each
//! day is an independent module whose solver registers itself through the
//! `AutoRegisterSolver` derive macro, so linking this crate is enough to make
//! every day available to a `SolverRegistryBuilder::register_all_plugins` call.

#[cfg(feature = "year-2018")]
pub mod year_2018;
#[cfg(feature = "year-2019")]
pub mod year_2019;
#[cfg(feature = "year-2020")]
pub mod year_2020;
