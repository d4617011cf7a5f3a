//! Repose Record: which guard sleeps most, and on which minute.
//!
//! Log lines arrive in any order. Timestamps sort as plain text, so the log is
//! put back in order before shifts are replayed. Sleep only happens during the
//! midnight hour, and a guard is asleep from the minute they fall asleep up to
//! but not including the minute they wake.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

static ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{4}-\d{2}-\d{2} (\d{2}):(\d{2}))\] (.+)$").unwrap()
});
static SHIFT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Guard #(\d+) begins shift$").unwrap());

const MINUTES: usize = 60;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 4, tags = ["2018", "parsing"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    #[error("[{0}] no guard is on duty")]
    NoGuard(String),
    #[error("[{0}] guard falls asleep twice")]
    AlreadyAsleep(String),
    #[error("[{0}] guard wakes without sleeping")]
    NotAsleep(String),
    #[error("[{0}] sleep outside the midnight hour")]
    OutsideMidnight(String),
    #[error("guard #{0} is still asleep when the shift ends")]
    StillAsleep(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Shift(u32),
    Sleep,
    Wake,
}

/// For every guard, how many nights they were asleep on each minute of the midnight hour
pub type SleepLog = BTreeMap<u32, [u32; MINUTES]>;

/// Replay time-sorted `(timestamp, minute, event)` entries into per-minute tallies
fn tally(entries: &[(&str, Option<usize>, Event)]) -> Result<SleepLog, LogError> {
    let mut log = SleepLog::new();
    let mut guard = None;
    let mut asleep_since = None;
    for &(stamp, minute, event) in entries {
        match event {
            Event::Shift(id) => {
                if let (Some(prev), Some(_)) = (guard, asleep_since) {
                    return Err(LogError::StillAsleep(prev));
                }
                log.entry(id).or_insert([0; MINUTES]);
                guard = Some(id);
            }
            Event::Sleep => {
                guard.ok_or_else(|| LogError::NoGuard(stamp.to_string()))?;
                let minute = minute.ok_or_else(|| LogError::OutsideMidnight(stamp.to_string()))?;
                if asleep_since.replace(minute).is_some() {
                    return Err(LogError::AlreadyAsleep(stamp.to_string()));
                }
            }
            Event::Wake => {
                let id = guard.ok_or_else(|| LogError::NoGuard(stamp.to_string()))?;
                let minute = minute.ok_or_else(|| LogError::OutsideMidnight(stamp.to_string()))?;
                let since = asleep_since
                    .take()
                    .ok_or_else(|| LogError::NotAsleep(stamp.to_string()))?;
                let minutes = log.entry(id).or_insert([0; MINUTES]);
                for count in &mut minutes[since..minute.max(since)] {
                    *count += 1;
                }
            }
        }
    }
    match (guard, asleep_since) {
        (Some(id), Some(_)) => Err(LogError::StillAsleep(id)),
        _ => Ok(log),
    }
}

/// Minute the guard slept through most often, earliest on ties, with its count
fn sleepiest_minute(minutes: &[u32; MINUTES]) -> (usize, u32) {
    minutes
        .iter()
        .enumerate()
        .fold((0, 0), |best, (minute, &count)| {
            if count > best.1 { (minute, count) } else { best }
        })
}

/// Guard with the most minutes asleep times their sleepiest minute.
/// Ties go to the lowest guard ID.
pub fn most_asleep_guard(log: &SleepLog) -> Option<u64> {
    let (&id, minutes) = log.iter().fold(None, |best: Option<(&u32, &[u32; MINUTES])>, entry| {
        let total = |m: &[u32; MINUTES]| m.iter().sum::<u32>();
        match best {
            Some(b) if total(b.1) >= total(entry.1) => Some(b),
            _ => Some(entry),
        }
    })?;
    let (minute, _) = sleepiest_minute(minutes);
    Some(u64::from(id) * minute as u64)
}

/// Guard most often asleep on the same minute, times that minute.
/// Ties go to the lowest guard ID, then the earliest minute.
pub fn most_regular_guard(log: &SleepLog) -> Option<u64> {
    let (id, (minute, _)) = log
        .iter()
        .map(|(&id, minutes)| (id, sleepiest_minute(minutes)))
        .fold(None, |best: Option<(u32, (usize, u32))>, entry| match best {
            Some(b) if b.1.1 >= entry.1.1 => Some(b),
            _ => Some(entry),
        })?;
    Some(u64::from(id) * minute as u64)
}

impl AocParser for Solver {
    type SharedData<'a> = SleepLog;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut entries = Vec::new();
        for (line_idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let invalid = |what: &str| {
                ParseError::InvalidFormat(format!("(line {}) {}: {:?}", line_idx + 1, what, line))
            };
            let caps = ENTRY
                .captures(line)
                .ok_or_else(|| invalid("expected `[YYYY-MM-DD HH:MM] EVENT`"))?;
            let stamp = caps.get(1).map_or("", |m| m.as_str());
            let hour = &caps[2];
            let minute: usize = caps[3].parse().map_err(|_| invalid("bad minute"))?;
            if minute >= MINUTES {
                return Err(invalid("bad minute"));
            }
            let event = match caps.get(4).map_or("", |m| m.as_str()) {
                "falls asleep" => Event::Sleep,
                "wakes up" => Event::Wake,
                other => {
                    let id = SHIFT
                        .captures(other)
                        .and_then(|shift| shift[1].parse().ok())
                        .ok_or_else(|| invalid("unknown event"))?;
                    Event::Shift(id)
                }
            };
            entries.push((stamp, (hour == "00").then_some(minute), event));
        }
        if entries.is_empty() {
            return Err(ParseError::MissingData("empty input".to_string()));
        }
        entries.sort_by_key(|&(stamp, _, _)| stamp);
        tally(&entries).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        most_asleep_guard(shared)
            .map(|answer| answer.to_string())
            .ok_or_else(|| SolveError::NoSolution("no guards on duty".to_string()))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        most_regular_guard(shared)
            .map(|answer| answer.to_string())
            .ok_or_else(|| SolveError::NoSolution("no guards on duty".to_string()))
    }
}
