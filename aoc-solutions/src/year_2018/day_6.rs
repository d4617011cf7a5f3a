//! Chronal Coordinates: Manhattan-distance regions around a set of points.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{Context, anyhow};
use itertools::Itertools;
use std::collections::HashSet;

const SAFE_DISTANCE: i64 = 10_000;

pub type Point = (i64, i64);

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 6, tags = ["2018", "grid"])]
pub struct Solver;

fn distance(a: Point, b: Point) -> i64 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

/// Smallest box holding every point, as `(min, max)` corners
fn bounds(points: &[Point]) -> Option<(Point, Point)> {
    let (min_x, max_x) = points.iter().map(|p| p.0).minmax().into_option()?;
    let (min_y, max_y) = points.iter().map(|p| p.1).minmax().into_option()?;
    Some(((min_x, min_y), (max_x, max_y)))
}

/// Index of the single point closest to `cell`, `None` on a tie
fn closest(points: &[Point], cell: Point) -> Option<usize> {
    let mut best = None;
    let mut best_distance = i64::MAX;
    let mut tied = false;
    for (idx, &point) in points.iter().enumerate() {
        let d = distance(point, cell);
        if d < best_distance {
            best = Some(idx);
            best_distance = d;
            tied = false;
        } else if d == best_distance {
            tied = true;
        }
    }
    if tied { None } else { best }
}

/// Size of the largest area closest to one point that does not reach the
/// edge of the bounding box. Areas touching the edge grow without limit.
pub fn largest_finite_area(points: &[Point]) -> Option<usize> {
    let ((min_x, min_y), (max_x, max_y)) = bounds(points)?;
    let mut areas = vec![0usize; points.len()];
    let mut infinite = HashSet::new();
    for x in min_x..=max_x {
        for y in min_y..=max_y {
            if let Some(owner) = closest(points, (x, y)) {
                areas[owner] += 1;
                if x == min_x || x == max_x || y == min_y || y == max_y {
                    infinite.insert(owner);
                }
            }
        }
    }
    areas
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| !infinite.contains(idx))
        .map(|(_, area)| area)
        .max()
}

/// Cells whose total distance to every point is below `threshold`. The region
/// can spill past the bounding box by at most `threshold / points` cells.
pub fn safe_region(points: &[Point], threshold: i64) -> usize {
    let Some(((min_x, min_y), (max_x, max_y))) = bounds(points) else {
        return 0;
    };
    let margin = threshold / points.len() as i64 + 1;
    (min_x - margin..=max_x + margin)
        .cartesian_product(min_y - margin..=max_y + margin)
        .filter(|&cell| points.iter().map(|&p| distance(p, cell)).sum::<i64>() < threshold)
        .count()
}

fn point(line: &str) -> anyhow::Result<Point> {
    let (x, y) = line
        .split_once(',')
        .ok_or_else(|| anyhow!("expected `X, Y`, got {:?}", line.trim()))?;
    let x = x.trim().parse::<i64>().context("x")?;
    let y = y.trim().parse::<i64>().context("y")?;
    Ok((x, y))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Point>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let points = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                point(line).with_context(|| format!("(line {})", line_idx + 1))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))?;
        if points.is_empty() {
            return Err(ParseError::MissingData("empty input".to_string()));
        }
        Ok(points)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        largest_finite_area(shared)
            .map(|area| area.to_string())
            .ok_or_else(|| SolveError::NoSolution("every area is infinite".to_string()))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(safe_region(shared, SAFE_DISTANCE).to_string())
    }
}
