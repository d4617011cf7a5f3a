//! The Stars Align: moving points that briefly spell a message.
//!
//! The message appears when the points are packed closest together, so the
//! sky is advanced while its bounding box keeps shrinking.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static STAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^position=<\s*(-?\d+),\s*(-?\d+)>\s*velocity=<\s*(-?\d+),\s*(-?\d+)>$").unwrap()
});

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 10, tags = ["2018", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Star {
    pub position: (i64, i64),
    pub velocity: (i64, i64),
}

impl Star {
    fn at(&self, time: i64) -> (i64, i64) {
        (
            self.position.0 + self.velocity.0 * time,
            self.position.1 + self.velocity.1 * time,
        )
    }
}

/// Width plus height of the box around every star at `time`
fn spread(stars: &[Star], time: i64) -> i64 {
    let (min_x, max_x) = stars.iter().map(|s| s.at(time).0).minmax().into_option().unwrap_or((0, 0));
    let (min_y, max_y) = stars.iter().map(|s| s.at(time).1).minmax().into_option().unwrap_or((0, 0));
    (max_x - min_x) + (max_y - min_y)
}

/// Seconds until the stars are packed closest together
pub fn alignment_time(stars: &[Star]) -> i64 {
    let mut time = 0;
    let mut current = spread(stars, time);
    loop {
        let next = spread(stars, time + 1);
        if next >= current {
            return time;
        }
        current = next;
        time += 1;
    }
}

/// The sky at `time`, `#` for a star and `.` for empty space
pub fn render(stars: &[Star], time: i64) -> String {
    let lit: HashSet<(i64, i64)> = stars.iter().map(|s| s.at(time)).collect();
    let Some((min_x, max_x)) = lit.iter().map(|p| p.0).minmax().into_option() else {
        return String::new();
    };
    let Some((min_y, max_y)) = lit.iter().map(|p| p.1).minmax().into_option() else {
        return String::new();
    };
    (min_y..=max_y)
        .map(|y| {
            (min_x..=max_x)
                .map(|x| if lit.contains(&(x, y)) { '#' } else { '.' })
                .collect::<String>()
        })
        .join("\n")
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Star>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut stars = Vec::new();
        for (line_idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let invalid = || {
                ParseError::InvalidFormat(format!(
                    "(line {}) expected `position=<X, Y> velocity=<DX, DY>`, got {:?}",
                    line_idx + 1,
                    line
                ))
            };
            let caps = STAR.captures(line).ok_or_else(invalid)?;
            let mut values = [0i64; 4];
            for (idx, value) in values.iter_mut().enumerate() {
                *value = caps[idx + 1].parse().map_err(|_| invalid())?;
            }
            stars.push(Star {
                position: (values[0], values[1]),
                velocity: (values[2], values[3]),
            });
        }
        if stars.is_empty() {
            return Err(ParseError::MissingData("empty input".to_string()));
        }
        Ok(stars)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let time = alignment_time(shared);
        log::debug!("stars align after {} seconds", time);
        Ok(render(shared, time))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(alignment_time(shared).to_string())
    }
}
