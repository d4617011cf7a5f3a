//! Advent of Code 2019, days 1 through 16.
//!
//! Day 18 is not part of the collection. Days 2, 5, 7 and 9 share the
//! Intcode machine in [`intcode`].

pub mod day_1;
pub mod day_10;
pub mod day_12;
pub mod day_14;
pub mod day_16;
pub mod day_2;
pub mod day_3;
pub mod day_4;
pub mod day_5;
pub mod day_6;
pub mod day_7;
pub mod day_8;
pub mod day_9;
pub mod intcode;
