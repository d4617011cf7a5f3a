//! Amplification Circuit: best thruster signal over all amplifier phase orders.

use super::intcode::{self, Event, IntcodeError, Machine};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use std::ops::RangeInclusive;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 7, tags = ["2019", "intcode", "permutations"])]
pub struct Solver;

/// Run the amplifiers once in series, starting from signal 0
pub fn series_signal(program: &[i64], phases: &[i64]) -> Result<i64, IntcodeError> {
    phases.iter().try_fold(0, |signal, &phase| {
        Machine::new(program)
            .run(&[phase, signal])?
            .first()
            .copied()
            .ok_or(IntcodeError::NoOutput)
    })
}

/// Wire the last amplifier back into the first and loop until they halt.
/// The answer is the last signal the final amplifier sent.
pub fn feedback_signal(program: &[i64], phases: &[i64]) -> Result<i64, IntcodeError> {
    let mut amplifiers: Vec<Machine> = phases
        .iter()
        .map(|&phase| {
            let mut amplifier = Machine::new(program);
            amplifier.push_input(phase);
            amplifier
        })
        .collect();

    let mut signal = 0;
    let mut last_thrust = None;
    loop {
        for amplifier in &mut amplifiers {
            amplifier.push_input(signal);
            match amplifier.resume()? {
                Event::Output(value) => signal = value,
                Event::Halted => return last_thrust.ok_or(IntcodeError::NoOutput),
                Event::NeedsInput => return Err(IntcodeError::MissingInput(amplifier.ip())),
            }
        }
        last_thrust = Some(signal);
    }
}

/// Highest signal over every order of the phase settings in `phases`
pub fn best_signal(
    program: &[i64],
    phases: RangeInclusive<i64>,
    run: fn(&[i64], &[i64]) -> Result<i64, IntcodeError>,
) -> Result<i64, IntcodeError> {
    let count = phases.clone().count();
    phases
        .permutations(count)
        .map(|order| run(program, &order))
        .process_results(|signals| signals.max())?
        .ok_or(IntcodeError::NoOutput)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        intcode::parse_program(input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        best_signal(shared, 0..=4, series_signal)
            .map(|signal| signal.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        best_signal(shared, 5..=9, feedback_signal)
            .map(|signal| signal.to_string())
            .map_err(SolveError::failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SERIES: &str = "3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0";

    const FEEDBACK: &str = "3,26,1001,26,-4,26,3,27,1002,27,2,27,1,27,26,\
27,4,27,1001,28,-1,28,1005,28,6,99,0,0,5";

    const FEEDBACK_LONG: &str = "3,52,1001,52,-5,52,3,53,1,52,56,54,1007,54,5,55,1005,55,26,1001,54,\
-5,54,1105,1,12,1,53,54,53,1008,54,0,55,1001,55,1,55,2,53,55,53,4,\
53,1001,56,-1,56,1005,56,6,99,0,0,0,0,10";

    #[test]
    fn test_series_example() {
        let program = intcode::parse_program(SERIES).unwrap();
        assert_eq!(series_signal(&program, &[4, 3, 2, 1, 0]), Ok(43210));
        assert_eq!(best_signal(&program, 0..=4, series_signal), Ok(43210));
    }

    #[test]
    fn test_feedback_examples() {
        let program = intcode::parse_program(FEEDBACK).unwrap();
        assert_eq!(feedback_signal(&program, &[9, 8, 7, 6, 5]), Ok(139629729));
        assert_eq!(best_signal(&program, 5..=9, feedback_signal), Ok(139629729));

        let program = intcode::parse_program(FEEDBACK_LONG).unwrap();
        assert_eq!(feedback_signal(&program, &[9, 7, 8, 5, 6]), Ok(18216));
    }

    #[test]
    fn test_solve_parts() {
        let mut program = Solver::parse(SERIES).unwrap();
        assert_eq!(Solver::solve_part(&mut program, 1).unwrap(), "43210");

        let mut program = Solver::parse(FEEDBACK).unwrap();
        assert_eq!(Solver::solve_part(&mut program, 2).unwrap(), "139629729");
    }

    #[test]
    fn test_amplifier_that_never_answers() {
        let program = intcode::parse_program("3,0,99").unwrap();
        assert_eq!(series_signal(&program, &[0]), Err(IntcodeError::NoOutput));
        let program = intcode::parse_program("3,0,3,0,3,0,99").unwrap();
        assert_eq!(
            series_signal(&program, &[0]),
            Err(IntcodeError::MissingInput(4))
        );
        let program = intcode::parse_program("3,0,3,0,99").unwrap();
        assert_eq!(feedback_signal(&program, &[5]), Err(IntcodeError::NoOutput));
    }
}
