//! High score table
//!
//! Scores live in a plain text file, one `"<score>, <name>"` per line.
//! Reading is lenient: malformed lines are logged and skipped, and the next
//! write drops them. Writing is strict: names that could not be read back
//! are refused, and the file is replaced as a whole through a temporary
//! sibling so an interrupted write never leaves half a table behind.

use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

/// Maximum number of high scores to keep
pub const MAX_SCORES: usize = 10;

/// Separates the score from the name on each line
pub const SEPARATOR: &str = ", ";

/// High score error types
#[derive(Debug, Error)]
pub enum TopTenError {
    #[error("score file {path} is unavailable: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("score file line {line} is malformed: {content:?}")]
    MalformedLine { line: usize, content: String },

    #[error("the name {0:?} cannot go on the score board (it is empty or contains \", \" or a line break)")]
    InvalidName(String),
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub score: i64,
    pub name: String,
}

impl ScoreEntry {
    pub fn new(score: i64, name: impl Into<String>) -> Self {
        Self {
            score,
            name: name.into(),
        }
    }

    /// Parse one line of the score file. `line` is 1-based, for the error.
    pub fn parse_line(line: usize, content: &str) -> Result<Self, TopTenError> {
        let malformed = || TopTenError::MalformedLine {
            line,
            content: content.to_string(),
        };

        let (score, name) = content.trim().split_once(SEPARATOR).ok_or_else(malformed)?;
        let score = score.trim().parse::<i64>().map_err(|_| malformed())?;
        if validate_name(name).is_err() {
            return Err(malformed());
        }
        Ok(Self::new(score, name))
    }

    /// The entry as written to the score file (no line terminator)
    pub fn to_line(&self) -> String {
        format!("{}{}{}", self.score, SEPARATOR, self.name)
    }

    /// The entry as shown to players
    pub fn format_ranked(&self, rank: usize) -> String {
        format!("{}. {}: {}", rank, self.name, self.score)
    }
}

/// Check that a name survives a write/read cycle of the score file.
pub fn validate_name(name: &str) -> Result<(), TopTenError> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed != name
        || name.contains(SEPARATOR)
        || name.contains(['\n', '\r'])
    {
        return Err(TopTenError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// High score table, sorted by score descending.
///
/// Equal scores keep their insertion order, so a newcomer ranks below
/// everyone it ties with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScores {
    entries: Vec<ScoreEntry>,
    capacity: usize,
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScores {
    /// Create a new empty high score table
    pub fn new() -> Self {
        Self::with_capacity(MAX_SCORES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Build a table from entries in any order.
    pub fn from_entries(capacity: usize, entries: impl IntoIterator<Item = ScoreEntry>) -> Self {
        let mut entries: Vec<ScoreEntry> = entries.into_iter().collect();
        // sort_by is stable
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    /// Add a new score entry, maintaining sorted order
    /// Returns the rank (1-indexed) if the score made it to the list
    pub fn add_score(&mut self, entry: ScoreEntry) -> Option<usize> {
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());

        if pos >= self.capacity {
            return None;
        }

        self.entries.insert(pos, entry);
        self.entries.truncate(self.capacity);

        Some(pos + 1)
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Check if a score would make the high score list
    pub fn would_qualify(&self, score: i64) -> bool {
        self.entries.len() < self.capacity
            || self.entries.last().is_some_and(|e| score > e.score)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for HighScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return write!(f, "No high scores yet!");
        }
        write!(f, "Top {} High Scores:", self.capacity)?;
        for line in display(&self.entries) {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}

/// Ranked display lines, 1-based.
pub fn display(entries: &[ScoreEntry]) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| entry.format_ranked(i + 1))
        .collect()
}

/// Outcome of [`ScoreFile::record`].
#[derive(Debug)]
pub struct Recorded {
    /// The table after the new entry was ranked
    pub scores: HighScores,
    /// Where the new entry landed, if it made the cut
    pub rank: Option<usize>,
    /// Storage problems met along the way. The table above is still valid
    /// in memory; it just may not be on disk.
    pub problems: Vec<TopTenError>,
}

/// The persisted high score table.
#[derive(Debug, Clone)]
pub struct ScoreFile {
    path: PathBuf,
    capacity: usize,
}

impl ScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_capacity(path, MAX_SCORES)
    }

    pub fn with_capacity(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Load high scores from file
    ///
    /// A missing file is an empty table. Malformed lines, including lines
    /// that are not valid UTF-8, are skipped.
    pub fn load(&self) -> Result<HighScores, TopTenError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(HighScores::with_capacity(self.capacity));
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let entries = bytes
            .split(|&b| b == b'\n')
            .enumerate()
            .filter(|(_, raw)| !raw.trim_ascii().is_empty())
            .filter_map(|(idx, raw)| match decode_line(idx + 1, raw) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(path = %self.path.display(), "skipping score: {e}");
                    None
                }
            });

        Ok(HighScores::from_entries(self.capacity, entries))
    }

    /// Replace the file with `scores`
    pub fn save(&self, scores: &HighScores) -> Result<(), TopTenError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let tmp = self.temp_path();
        self.write_lines(&tmp, scores)
            .and_then(|()| fs::rename(&tmp, &self.path))
            .map_err(|e| {
                let _ = fs::remove_file(&tmp);
                self.io_error(e)
            })?;

        debug!(path = %self.path.display(), entries = scores.len(), "scores saved");
        Ok(())
    }

    /// Rank a finished game and persist the table.
    ///
    /// Only an unstorable name is an error. When the existing file cannot be
    /// read, the new entry is ranked on an empty table and the file is left
    /// untouched so the old scores are not overwritten.
    pub fn record(&self, score: i64, name: &str) -> Result<Recorded, TopTenError> {
        validate_name(name)?;

        let mut problems = Vec::new();
        let (mut scores, readable) = match self.load() {
            Ok(scores) => (scores, true),
            Err(e) => {
                warn!("{e}");
                problems.push(e);
                (HighScores::with_capacity(self.capacity), false)
            }
        };

        let rank = scores.add_score(ScoreEntry::new(score, name));

        if readable {
            if let Err(e) = self.save(&scores) {
                warn!("{e}");
                problems.push(e);
            }
        }

        Ok(Recorded {
            scores,
            rank,
            problems,
        })
    }

    fn write_lines(&self, path: &Path, scores: &HighScores) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for entry in scores.entries() {
            writeln!(writer, "{}", entry.to_line())?;
        }
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("high_scores"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: io::Error) -> TopTenError {
        TopTenError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Parse one raw line of the score file
fn decode_line(line: usize, raw: &[u8]) -> Result<ScoreEntry, TopTenError> {
    match std::str::from_utf8(raw) {
        Ok(content) => ScoreEntry::parse_line(line, content),
        Err(_) => Err(TopTenError::MalformedLine {
            line,
            content: String::from_utf8_lossy(raw).into_owned(),
        }),
    }
}

/// Get the default high scores file path
pub fn default_scores_path() -> PathBuf {
    PathBuf::from("high_scores.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_score() {
        let mut scores = HighScores::new();

        let rank = scores.add_score(ScoreEntry::new(1000, "Alice"));
        assert_eq!(rank, Some(1));

        let rank = scores.add_score(ScoreEntry::new(2000, "Bob"));
        assert_eq!(rank, Some(1)); // Bob has higher score

        let rank = scores.add_score(ScoreEntry::new(500, "Charlie"));
        assert_eq!(rank, Some(3)); // Charlie has lowest score

        let names: Vec<_> = scores.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice", "Charlie"]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut scores = HighScores::new();
        scores.add_score(ScoreEntry::new(50, "First"));
        scores.add_score(ScoreEntry::new(50, "Second"));
        let rank = scores.add_score(ScoreEntry::new(50, "Third"));
        assert_eq!(rank, Some(3));

        let names: Vec<_> = scores.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_from_entries_sorts_stably_and_truncates() {
        let scores = HighScores::from_entries(
            3,
            [
                ScoreEntry::new(1, "a"),
                ScoreEntry::new(9, "b"),
                ScoreEntry::new(5, "c"),
                ScoreEntry::new(9, "d"),
                ScoreEntry::new(7, "e"),
            ],
        );
        let names: Vec<_> = scores.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "d", "e"]);
    }

    #[test]
    fn test_full_table_drops_low_scores() {
        let mut scores =
            HighScores::from_entries(MAX_SCORES, (1..=10).map(|i| ScoreEntry::new(i * 10, format!("p{i}"))));
        assert!(!scores.would_qualify(5));
        assert!(!scores.would_qualify(10)); // a tie with the last place is not enough
        assert!(scores.would_qualify(11));

        assert_eq!(scores.add_score(ScoreEntry::new(5, "Low")), None);
        assert_eq!(scores.len(), MAX_SCORES);

        assert_eq!(scores.add_score(ScoreEntry::new(55, "Mid")), Some(6));
        assert_eq!(scores.len(), MAX_SCORES);
        assert_eq!(scores.entries().last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(ScoreEntry::parse_line(1, "42, Ada").unwrap(), ScoreEntry::new(42, "Ada"));
        assert_eq!(ScoreEntry::parse_line(1, "  7, Jean Luc  \r").unwrap(), ScoreEntry::new(7, "Jean Luc"));
        assert_eq!(ScoreEntry::parse_line(1, "-3, Debtor").unwrap().score, -3);

        for bad in ["42 Ada", "many, Ada", "42, ", "42,Ada", "42, Ada, Lovelace", "42,  Ada", ""] {
            let err = ScoreEntry::parse_line(4, bad).unwrap_err();
            assert!(
                matches!(err, TopTenError::MalformedLine { line: 4, .. }),
                "{bad:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Ada").is_ok());
        assert!(validate_name("Anne Bonny").is_ok());
        assert!(validate_name("Smith,John").is_ok());

        for bad in ["", "   ", " Ada", "Ada ", "Read, Mary", "two\nlines"] {
            assert!(validate_name(bad).is_err(), "{bad:?} should be refused");
        }
    }

    #[test]
    fn test_format_entry() {
        let entry = ScoreEntry::new(12345, "TestPlayer");
        assert_eq!(entry.to_line(), "12345, TestPlayer");
        assert_eq!(entry.format_ranked(3), "3. TestPlayer: 12345");
    }

    #[test]
    fn test_display_table() {
        let empty = HighScores::new();
        assert_eq!(empty.to_string(), "No high scores yet!");

        let scores = HighScores::from_entries(MAX_SCORES, [ScoreEntry::new(5, "B"), ScoreEntry::new(9, "A")]);
        assert_eq!(scores.to_string(), "Top 10 High Scores:\n1. A: 9\n2. B: 5");
    }

    #[test]
    fn test_temp_path_is_a_sibling() {
        let file = ScoreFile::new("saves/high_scores.txt");
        assert_eq!(file.temp_path(), PathBuf::from("saves/high_scores.txt.tmp"));
    }

    #[test]
    fn test_record_refuses_bad_names() {
        let dir = tempfile::tempdir().unwrap();
        let file = ScoreFile::new(dir.path().join("scores.txt"));
        assert!(matches!(file.record(10, "Read, Mary"), Err(TopTenError::InvalidName(_))));
        assert!(!file.path().exists());
    }
}
