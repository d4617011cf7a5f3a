//! Monitoring Station: the asteroid that sees the most others, and the order
//! a rotating laser on it vaporizes the rest.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::cmp::{Ordering, Reverse};
use std::collections::{HashMap, HashSet};

const BET_INDEX: usize = 200;

/// `(x, y)` with y growing downwards
pub type Point = (i64, i64);

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 10, tags = ["2019", "geometry"])]
pub struct Solver;

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Offset from `from` to `to` reduced to the smallest step along the same ray
fn direction(from: Point, to: Point) -> Point {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let step = gcd(dx, dy);
    (dx / step, dy / step)
}

/// Clockwise order of directions starting straight up
fn clockwise(a: Point, b: Point) -> Ordering {
    let half = |(dx, dy): Point| u8::from(!(dx > 0 || (dx == 0 && dy < 0)));
    let cross = a.0 * b.1 - a.1 * b.0;
    half(a).cmp(&half(b)).then_with(|| 0.cmp(&cross))
}

/// Asteroids with a direct line of sight from `station`
pub fn visible_from(asteroids: &[Point], station: Point) -> usize {
    asteroids
        .iter()
        .filter(|&&other| other != station)
        .map(|&other| direction(station, other))
        .collect::<HashSet<_>>()
        .len()
}

/// The asteroid seeing the most others, earliest in reading order on ties
pub fn best_station(asteroids: &[Point]) -> Option<(Point, usize)> {
    asteroids
        .iter()
        .map(|&station| (station, visible_from(asteroids, station)))
        .fold(None, |best, candidate| match best {
            Some((_, seen)) if seen >= candidate.1 => best,
            _ => Some(candidate),
        })
}

/// Every other asteroid in the order the laser hits it. Each sweep only
/// reaches the nearest asteroid left on a ray.
pub fn vaporization_order(asteroids: &[Point], station: Point) -> Vec<Point> {
    let mut rays: HashMap<Point, Vec<Point>> = HashMap::new();
    for &asteroid in asteroids.iter().filter(|&&a| a != station) {
        rays.entry(direction(station, asteroid))
            .or_default()
            .push(asteroid);
    }

    let mut rays: Vec<(Point, Vec<Point>)> = rays.into_iter().collect();
    rays.sort_by(|(a, _), (b, _)| clockwise(*a, *b));
    for (_, ray) in &mut rays {
        // farthest first so `pop` yields the nearest
        ray.sort_by_key(|&(x, y)| Reverse((x - station.0).abs() + (y - station.1).abs()));
    }

    let mut order = Vec::with_capacity(asteroids.len().saturating_sub(1));
    while !rays.is_empty() {
        order.extend(rays.iter_mut().filter_map(|(_, ray)| ray.pop()));
        rays.retain(|(_, ray)| !ray.is_empty());
    }
    order
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Point>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut asteroids = Vec::new();
        for (y, line) in input.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
            for (x, cell) in line.chars().enumerate() {
                match cell {
                    '#' => asteroids.push((x as i64, y as i64)),
                    '.' => {}
                    other => {
                        return Err(ParseError::InvalidFormat(format!(
                            "(line {}) unexpected {:?} at column {}",
                            y + 1,
                            other,
                            x + 1
                        )));
                    }
                }
            }
        }
        if asteroids.is_empty() {
            return Err(ParseError::MissingData("empty input".to_string()));
        }
        Ok(asteroids)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (station, seen) = best_station(shared)
            .ok_or_else(|| SolveError::NoSolution("no asteroids".to_string()))?;
        log::debug!("best station at {:?}", station);
        Ok(seen.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (station, _) = best_station(shared)
            .ok_or_else(|| SolveError::NoSolution("no asteroids".to_string()))?;
        let order = vaporization_order(shared, station);
        let (x, y) = order.get(BET_INDEX - 1).copied().ok_or_else(|| {
            SolveError::NoSolution(format!(
                "only {} asteroids to vaporize, need {}",
                order.len(),
                BET_INDEX
            ))
        })?;
        Ok((x * 100 + y).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SMALL: &str = ".#..#\n.....\n#####\n....#\n...##\n";

    const LARGE: &str = "\
.#..##.###...#######
##.############..##.
.#.######.########.#
.###.#######.####.#.
#####.##.#.##.###.##
..#####..#.#########
####################
#.####....###.#.#.##
##.#################
#####.##.###..####..
..######..##.#######
####.##.####...##..#
.#####..#.######.###
##...#.##########...
#.##########.#######
.####.#.###.###.#.##
....##.##.###..#####
.#.#.###########.###
#.#.#.#####.####.###
###.##.####.##.#..##
";

    #[test]
    fn test_best_station_examples() {
        let examples = [
            (
                "......#.#.\n#..#.#....\n..#######.\n.#.#.###..\n.#..#.....\n\
..#....#.#\n#..#....#.\n.##.#..###\n##...#..#.\n.#....####\n",
                (5, 8),
                33,
            ),
            (
                "#.#...#.#.\n.###....#.\n.#....#...\n##.#.#.#.#\n....#.#.#.\n\
.##..###.#\n..#...##..\n..##....##\n......#...\n.####.###.\n",
                (1, 2),
                35,
            ),
            (
                ".#..#..###\n####.###.#\n....###.#.\n..###.##.#\n##.##.#.#.\n\
....###..#\n..#.#..#.#\n#..#.#.###\n.##...##.#\n.....#.#..\n",
                (6, 3),
                41,
            ),
            (SMALL, (3, 4), 8),
            (LARGE, (11, 13), 210),
        ];
        for (input, station, seen) in examples {
            let asteroids = Solver::parse(input).unwrap();
            assert_eq!(best_station(&asteroids), Some((station, seen)), "{}", input);
        }
    }

    #[test]
    fn test_vaporization_sweeps_clockwise() {
        let asteroids = Solver::parse(
            ".#....#####...#..\n##...##.#####..##\n##...#...#.#####.\n..#.....#...###..\n..#.#.....#....##\n",
        )
        .unwrap();
        let order = vaporization_order(&asteroids, (8, 3));
        assert_eq!(
            order[..9],
            [(8, 1), (9, 0), (9, 1), (10, 0), (9, 2), (11, 1), (12, 1), (11, 2), (15, 1)]
        );
        assert_eq!(order.len(), asteroids.len() - 1);
    }

    #[test]
    fn test_second_sweep_reaches_hidden_asteroids() {
        // three asteroids straight above the station, one to the right
        let asteroids = vec![(0, 0), (0, 1), (0, 2), (1, 3), (0, 3)];
        assert_eq!(
            vaporization_order(&asteroids, (0, 3)),
            vec![(0, 2), (1, 3), (0, 1), (0, 0)]
        );
    }

    #[test]
    fn test_solve_large_example() {
        let mut asteroids = Solver::parse(LARGE).unwrap();
        assert_eq!(Solver::solve_part(&mut asteroids, 1).unwrap(), "210");
        assert_eq!(Solver::solve_part(&mut asteroids, 2).unwrap(), "802");
    }

    #[test]
    fn test_too_few_asteroids_for_the_bet() {
        let mut asteroids = Solver::parse(SMALL).unwrap();
        assert!(matches!(
            Solver::solve_part(&mut asteroids, 2),
            Err(SolveError::NoSolution(_))
        ));
    }

    #[test]
    fn test_bad_map() {
        assert!(matches!(Solver::parse("...\n..."), Err(ParseError::MissingData(_))));
        assert!(matches!(
            Solver::parse(".#.\n.X.\n"),
            Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(line 2)")
        ));
    }
}
