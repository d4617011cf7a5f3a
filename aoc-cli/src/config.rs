//! Configuration resolution from CLI args

use crate::cli::Args;
use crate::error::CliError;
use std::path::{Path, PathBuf};

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    /// Directory holding the puzzle inputs
    pub input_dir: PathBuf,
    /// Explicit input file, only used for `year_filter`/`day_filter`
    pub input_file: Option<PathBuf>,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args, expanding paths and checking flag combinations
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        if args.input.is_some() && (args.year.is_none() || args.day.is_none()) {
            return Err(CliError::Config(
                "--input needs both --year and --day".to_string(),
            ));
        }

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_dir: expand_tilde(&args.input_dir),
            input_file: args.input.as_deref().map(expand_tilde),
            quiet: args.quiet,
        })
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && let Some(rest) = path_str
            .strip_prefix("~/")
            .or_else(|| (path_str == "~").then_some(""))
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_input_requires_year_and_day() {
        let args = Args::try_parse_from(["aoc", "--input", "day7.txt", "--year", "2020"]).unwrap();
        assert!(matches!(Config::from_args(args), Err(CliError::Config(_))));

        let args = Args::try_parse_from(["aoc", "--input", "day7.txt", "-y", "2020", "-d", "7"])
            .unwrap();
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.input_file, Some(PathBuf::from("day7.txt")));
        assert_eq!((config.year_filter, config.day_filter), (Some(2020), Some(7)));
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(
            expand_tilde(Path::new("/tmp/inputs")),
            PathBuf::from("/tmp/inputs")
        );
        assert_eq!(expand_tilde(Path::new("inputs")), PathBuf::from("inputs"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/aoc")), home.join("aoc"));
            assert_eq!(expand_tilde(Path::new("~")), home);
        }
    }
}
