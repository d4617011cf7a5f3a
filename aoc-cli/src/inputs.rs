//! Local puzzle input files

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Read-only store of puzzle inputs
///
/// Directory structure: `{input_dir}/{year}_day{day:02}.txt`. A single
/// puzzle can be pointed at another file with [`InputStore::with_file`].
pub struct InputStore {
    input_dir: PathBuf,
    explicit: Option<(u16, u8, PathBuf)>,
}

impl InputStore {
    pub fn new(input_dir: PathBuf) -> Self {
        Self {
            input_dir,
            explicit: None,
        }
    }

    /// Read the input for `year`/`day` from `path` instead of the input directory
    pub fn with_file(mut self, year: u16, day: u8, path: PathBuf) -> Self {
        self.explicit = Some((year, day, path));
        self
    }

    /// Get the input path for a specific year/day
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        match &self.explicit {
            Some((y, d, path)) if *y == year && *d == day => path.clone(),
            _ => self.input_dir.join(format!("{}_day{:02}.txt", year, day)),
        }
    }

    /// Check if an input file exists
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    /// Read the input for a year/day
    pub fn get(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.input_path(year, day);
        match fs::read_to_string(&path) {
            Ok(content) => {
                log::debug!("read {} bytes from {}", content.len(), path.display());
                Ok(content)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(InputError::Missing { year, day, path })
            }
            Err(source) => Err(InputError::Read { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_input_path_format() {
        let store = InputStore::new(PathBuf::from("inputs"));
        assert_eq!(
            store.input_path(2020, 1),
            PathBuf::from("inputs/2020_day01.txt")
        );
        assert_eq!(
            store.input_path(2020, 25),
            PathBuf::from("inputs/2020_day25.txt")
        );
    }

    #[test]
    fn test_read_existing_and_missing() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(!store.contains(2020, 6));
        assert!(matches!(
            store.get(2020, 6),
            Err(InputError::Missing {
                year: 2020,
                day: 6,
                ..
            })
        ));

        let input = "abc\n\na\nb\nc\n";
        fs::write(temp.path().join("2020_day06.txt"), input).unwrap();
        assert!(store.contains(2020, 6));
        assert_eq!(store.get(2020, 6).unwrap(), input);
    }

    #[test]
    fn test_explicit_file_only_applies_to_its_day() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("rules.txt");
        fs::write(&file, "faded blue bags contain no other bags.\n").unwrap();

        let store = InputStore::new(temp.path().join("inputs")).with_file(2020, 7, file.clone());
        assert_eq!(store.input_path(2020, 7), file);
        assert!(store.contains(2020, 7));
        assert!(!store.contains(2020, 6));
        assert_eq!(
            store.input_path(2020, 6),
            temp.path().join("inputs").join("2020_day06.txt")
        );
    }
}
