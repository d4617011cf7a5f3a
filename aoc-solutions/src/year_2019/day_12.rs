//! The N-Body Problem: moons pulling on each other along three independent axes.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use std::sync::LazyLock;

static MOON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<x=(-?\d+), y=(-?\d+), z=(-?\d+)>$").unwrap()
});

const STEPS: usize = 1000;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 12, tags = ["2019", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moon {
    pub position: [i64; 3],
    pub velocity: [i64; 3],
}

impl Moon {
    fn energy(&self) -> i64 {
        let potential: i64 = self.position.iter().map(|p| p.abs()).sum();
        let kinetic: i64 = self.velocity.iter().map(|v| v.abs()).sum();
        potential * kinetic
    }
}

/// Apply gravity between every pair, then move every moon by its velocity
pub fn step(moons: &mut [Moon]) {
    for axis in 0..3 {
        let positions: Vec<i64> = moons.iter().map(|moon| moon.position[axis]).collect();
        for moon in moons.iter_mut() {
            let own = moon.position[axis];
            moon.velocity[axis] += positions.iter().map(|&other| (other - own).signum()).sum::<i64>();
        }
    }
    for moon in moons.iter_mut() {
        for axis in 0..3 {
            moon.position[axis] += moon.velocity[axis];
        }
    }
}

/// Total energy of the system after `steps` steps
pub fn energy_after(moons: &[Moon], steps: usize) -> i64 {
    let mut moons = moons.to_vec();
    for _ in 0..steps {
        step(&mut moons);
    }
    moons.iter().map(Moon::energy).sum()
}

/// Steps until a single axis first returns to its starting state. The motion
/// is reversible, so the first repeated state is always the initial one.
fn axis_period(moons: &[Moon], axis: usize) -> u64 {
    let start: Vec<(i64, i64)> = moons
        .iter()
        .map(|moon| (moon.position[axis], moon.velocity[axis]))
        .collect();
    let mut state = start.clone();
    let mut steps = 0;
    loop {
        let positions: Vec<i64> = state.iter().map(|&(p, _)| p).collect();
        for (position, velocity) in &mut state {
            *velocity += positions.iter().map(|&other| (other - *position).signum()).sum::<i64>();
        }
        for (position, velocity) in &mut state {
            *position += *velocity;
        }
        steps += 1;
        if state == start {
            return steps;
        }
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Steps until the whole system first repeats, `None` if the count overflows
pub fn period(moons: &[Moon]) -> Option<u64> {
    (0..3)
        .map(|axis| axis_period(moons, axis))
        .try_fold(1u64, |acc, p| (acc / gcd(acc, p)).checked_mul(p))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Moon>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let moons = input
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(idx, line)| {
                let caps = MOON.captures(line).ok_or_else(|| {
                    ParseError::InvalidFormat(format!(
                        "(line {}) expected `<x=X, y=Y, z=Z>`, got {:?}",
                        idx + 1,
                        line
                    ))
                })?;
                let mut position = [0; 3];
                for (axis, slot) in position.iter_mut().enumerate() {
                    *slot = caps[axis + 1].parse().map_err(|e| {
                        ParseError::InvalidFormat(format!("(line {}) {}", idx + 1, e))
                    })?;
                }
                Ok(Moon {
                    position,
                    velocity: [0; 3],
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;
        if moons.is_empty() {
            return Err(ParseError::MissingData("empty input".to_string()));
        }
        Ok(moons)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(energy_after(shared, STEPS).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        period(shared)
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::NoSolution("repeat period does not fit in 64 bits".to_string()))
    }
}
