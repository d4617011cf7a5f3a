//! Marble Mania: the winning score of the elves' marble game.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use std::collections::VecDeque;
use std::sync::LazyLock;

static GAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+) players?; last marble is worth (\d+) points?$").unwrap()
});

const SCORING_MULTIPLE: u32 = 23;
const SCORING_OFFSET: usize = 7;
const LONGER_GAME: u32 = 100;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 9, tags = ["2018", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    pub players: usize,
    pub last_marble: u32,
}

/// Highest score once `last_marble` has been played.
///
/// The current marble is kept at the back of the deque, so clockwise is
/// towards the front and every move is a short rotation.
pub fn high_score(game: Game) -> u64 {
    if game.players == 0 {
        return 0;
    }
    let mut circle = VecDeque::with_capacity(game.last_marble as usize + 1);
    circle.push_back(0u32);
    let mut scores = vec![0u64; game.players];

    for marble in 1..=game.last_marble {
        if marble % SCORING_MULTIPLE == 0 {
            circle.rotate_right(SCORING_OFFSET.min(circle.len() - 1));
            let removed = circle.pop_back().unwrap_or(0);
            let player = (marble as usize - 1) % game.players;
            scores[player] += u64::from(marble) + u64::from(removed);
            if !circle.is_empty() {
                circle.rotate_left(1);
            }
        } else {
            circle.rotate_left(1 % circle.len());
            circle.push_back(marble);
        }
    }
    scores.into_iter().max().unwrap_or(0)
}

impl AocParser for Solver {
    type SharedData<'a> = Game;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let line = input.trim();
        if line.is_empty() {
            return Err(ParseError::MissingData("empty input".to_string()));
        }
        let invalid = || {
            ParseError::InvalidFormat(format!(
                "expected `N players; last marble is worth M points`, got {:?}",
                line
            ))
        };
        let caps = GAME.captures(line).ok_or_else(invalid)?;
        let players: usize = caps[1].parse().map_err(|_| invalid())?;
        let last_marble: u32 = caps[2].parse().map_err(|_| invalid())?;
        if players == 0 {
            return Err(ParseError::InvalidFormat("a game needs at least one player".to_string()));
        }
        Ok(Game {
            players,
            last_marble,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(high_score(*shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let last_marble = shared.last_marble.checked_mul(LONGER_GAME).ok_or_else(|| {
            SolveError::NoSolution(format!("{} marbles is too many", shared.last_marble))
        })?;
        Ok(high_score(Game {
            players: shared.players,
            last_marble,
        })
        .to_string())
    }
}
