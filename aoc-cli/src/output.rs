//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &SolverResult) {
        match &result.answer {
            Ok(answer) if self.quiet => println!("{}", answer),
            Ok(_) => println!("{}", format_line(result)),
            Err(e) if self.quiet => eprintln!("Error: {}", e),
            Err(_) => eprintln!("{}", format_line(result)),
        }
    }

    /// Print a summary after all results
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let total = results.len();
        let successes = results.iter().filter(|r| r.answer.is_ok()).count();
        let failures = total - successes;

        let total_parse_time: TimeDelta = results.iter().filter_map(|r| r.parse_duration).sum();
        let total_solve_time: TimeDelta = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .map(|r| r.solve_duration)
            .sum();

        println!();
        println!("--- Summary ---");
        println!("Parts: {} solved, {} failed", successes, failures);
        println!("Total parse time: {}", format_duration(total_parse_time));
        println!("Total solve time: {}", format_duration(total_solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(self.start_time.elapsed())
        );
    }
}

/// `YYYY/DD Part P: answer (parse: t, solve: t)` or `YYYY/DD Part P: Error - ...`
fn format_line(result: &SolverResult) -> String {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);

    match &result.answer {
        Ok(answer) => {
            let parse_timing = result
                .parse_duration
                .map(|d| format!("parse: {}, ", format_duration(d)))
                .unwrap_or_default();
            format!(
                "{}: {} ({}solve: {})",
                prefix,
                answer,
                parse_timing,
                format_duration(result.solve_duration)
            )
        }
        Err(e) => format!("{}: Error - {}", prefix, e),
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CliError, InputError};
    use std::path::PathBuf;
    use std::sync::Arc;

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(TimeDelta::microseconds(250)), "250µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-5)), "-5µs");
    }

    #[test]
    fn test_format_line() {
        let solved = SolverResult {
            year: 2020,
            day: 5,
            part: 1,
            answer: Ok("820".to_string()),
            parse_duration: Some(TimeDelta::microseconds(12)),
            solve_duration: TimeDelta::microseconds(3),
        };
        assert_eq!(format_line(&solved), "2020/05 Part 1: 820 (parse: 12µs, solve: 3µs)");

        let second = SolverResult {
            part: 2,
            parse_duration: None,
            ..solved
        };
        assert_eq!(format_line(&second), "2020/05 Part 2: 820 (solve: 3µs)");

        let failed = SolverResult {
            year: 2020,
            day: 6,
            part: 2,
            answer: Err(Arc::new(CliError::Input(InputError::Missing {
                year: 2020,
                day: 6,
                path: PathBuf::from("inputs/2020_day06.txt"),
            }))),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        };
        assert_eq!(
            format_line(&failed),
            "2020/06 Part 2: Error - Input error: no input for 2020/06 at inputs/2020_day06.txt"
        );
    }
}
