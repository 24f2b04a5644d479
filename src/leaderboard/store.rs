//! Durable leaderboard storage.
//!
//! ## Format
//!
//! One JSON object per line, append-only:
//!
//! ```text
//! {"id":1,"date":"2026-08-29","name":"Al","score":25}
//! ```
//!
//! `id` is the insertion sequence number and breaks ties beyond the
//! documented sort key (score descending, then date descending). Appends
//! write the whole line in a single buffered write followed by a flush,
//! and the in-memory snapshot only advances once the write lands.
//!
//! A crash or I/O failure mid-append can still tear the trailing row on
//! disk. Because rows are newline-terminated, the tear is recognizable:
//! the next [`Leaderboard::open`] drops an unparsable unterminated tail
//! and truncates the file back to its last intact row, so every intact
//! row stays reachable. An unparsable *terminated* line is real
//! corruption and is still reported as [`StoreError::Corrupt`].
//!
//! ## Ranking
//!
//! The rank of a new entry is `1 +` the number of existing entries that
//! strictly outrank it: a higher score, or an equal score with a strictly
//! later date. The append and the rank computation observe the same
//! snapshot under the single-writer model (`&mut self`).

use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Entries exposed by default through the read API.
pub const DEFAULT_DISPLAY_LIMIT: usize = 10;

/// A leaderboard record as seen by readers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub date: NaiveDate,
    pub name: String,
    pub score: u32,
}

/// On-disk row; `id` is the insertion sequence number.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct StoredRow {
    id: u64,
    date: NaiveDate,
    name: String,
    score: u32,
}

/// Rows replayed at open, plus what was found at the end of the file:
/// `clean_len` is the byte length of the intact prefix, and
/// `needs_terminator` flags a final row that parsed but lost its
/// newline.
struct ReplayedRows {
    rows: Vec<StoredRow>,
    clean_len: usize,
    needs_terminator: bool,
}

/// Leaderboard storage failure.
#[derive(Debug)]
pub enum StoreError {
    /// Operation attempted after [`Leaderboard::close`].
    Closed,
    /// Underlying file I/O failed; nothing was applied.
    Io(io::Error),
    /// An unparsable row was found while opening the store.
    Corrupt {
        line: usize,
        source: serde_json::Error,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "leaderboard store is closed"),
            Self::Io(e) => write!(f, "leaderboard I/O error: {e}"),
            Self::Corrupt { line, source } => {
                write!(f, "corrupt leaderboard row at line {line}: {source}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Closed => None,
            Self::Io(e) => Some(e),
            Self::Corrupt { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Append-only ranked score store backed by a JSON-lines file.
///
/// All rows ever inserted are retained; only reads truncate. The handle
/// serializes writers by taking `&mut self` - wrap it in a mutex if it
/// must ever be shared.
#[derive(Debug)]
pub struct Leaderboard {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    rows: Vec<StoredRow>,
    next_id: u64,
}

impl Leaderboard {
    /// Open or create the store at `path`, replaying any existing rows.
    ///
    /// Idempotent: opening an existing store re-reads what previous
    /// handles appended. A torn trailing row left by an interrupted
    /// append is dropped and truncated away; an unparsable interior
    /// line fails with [`StoreError::Corrupt`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut needs_terminator = false;
        let rows = match fs::read_to_string(&path) {
            Ok(contents) => {
                let replay = Self::parse_rows(&contents)?;
                if replay.clean_len < contents.len() {
                    // Torn tail from an interrupted append: cut the file
                    // back to its last intact row so later appends start
                    // on a fresh line.
                    warn!(
                        "dropping {} bytes of torn trailing row in {}",
                        contents.len() - replay.clean_len,
                        path.display()
                    );
                    let file = OpenOptions::new().write(true).open(&path)?;
                    file.set_len(replay.clean_len as u64)?;
                }
                needs_terminator = replay.needs_terminator;
                replay.rows
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        let next_id = rows.iter().map(|r| r.id).max().map_or(1, |id| id + 1);

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        if needs_terminator {
            // The last row parsed but lost its newline; repair it.
            file.write_all(b"\n")?;
        }
        info!(
            "leaderboard opened at {} with {} rows",
            path.display(),
            rows.len()
        );

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            rows,
            next_id,
        })
    }

    fn parse_rows(contents: &str) -> Result<ReplayedRows, StoreError> {
        let mut rows = Vec::new();
        let mut clean_len = 0;
        let mut needs_terminator = false;
        for (index, segment) in contents.split_inclusive('\n').enumerate() {
            let terminated = segment.ends_with('\n');
            let line = segment.trim_end();
            if line.is_empty() {
                if terminated {
                    clean_len += segment.len();
                }
                continue;
            }
            match serde_json::from_str(line) {
                Ok(row) => {
                    rows.push(row);
                    clean_len += segment.len();
                    needs_terminator = !terminated;
                }
                // An unterminated final fragment is a torn append, not
                // corruption; the caller truncates it away.
                Err(_) if !terminated => break,
                Err(source) => {
                    return Err(StoreError::Corrupt {
                        line: index + 1,
                        source,
                    })
                }
            }
        }
        Ok(ReplayedRows {
            rows,
            clean_len,
            needs_terminator,
        })
    }

    /// Append a score stamped with today's local date and return its
    /// 1-based rank.
    pub fn add_score(&mut self, name: &str, score: u32) -> Result<usize, StoreError> {
        self.add_score_on(name, score, Local::now().date_naive())
    }

    /// Append a score with an explicit date and return its 1-based rank.
    ///
    /// Gameplay goes through [`Leaderboard::add_score`]; the date
    /// parameter exists for deterministic tests and backfill.
    pub fn add_score_on(
        &mut self,
        name: &str,
        score: u32,
        date: NaiveDate,
    ) -> Result<usize, StoreError> {
        let writer = self.writer.as_mut().ok_or(StoreError::Closed)?;

        let row = StoredRow {
            id: self.next_id,
            date,
            name: name.to_owned(),
            score,
        };
        // Whole row, newline included, in one write; the snapshot below
        // only advances once the write lands, and a tear the filesystem
        // still manages to leave is dropped at the next open.
        let mut line = serde_json::to_string(&row)
            .map_err(|e| StoreError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        line.push('\n');
        writer.write_all(line.as_bytes())?;
        writer.flush()?;

        self.rows.push(row);
        self.next_id += 1;

        let rank = 1 + self
            .rows
            .iter()
            .filter(|r| r.score > score || (r.score == score && r.date > date))
            .count();
        debug!("leaderboard append: {name} scored {score} -> rank {rank}");
        Ok(rank)
    }

    /// The top `limit` entries: score descending, date descending on
    /// ties, then insertion order. Read-only and restartable.
    pub fn top_scores(&self, limit: usize) -> Result<Vec<ScoreEntry>, StoreError> {
        if self.writer.is_none() {
            return Err(StoreError::Closed);
        }

        let mut sorted: Vec<&StoredRow> = self.rows.iter().collect();
        sorted.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(b.date.cmp(&a.date))
                .then(a.id.cmp(&b.id))
        });

        Ok(sorted
            .into_iter()
            .take(limit)
            .map(|r| ScoreEntry {
                date: r.date,
                name: r.name.clone(),
                score: r.score,
            })
            .collect())
    }

    /// Flush and release the underlying file. Subsequent operations fail
    /// with [`StoreError::Closed`]; closing twice is a no-op.
    pub fn close(&mut self) -> Result<(), StoreError> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
            debug!("leaderboard at {} closed", self.path.display());
        }
        Ok(())
    }

    /// Total rows ever inserted (retention is unbounded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no rows have been inserted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Path this store persists to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(tag: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "higher_lower_store_{tag}_{}.jsonl",
            std::process::id()
        ));
        let _ = fs::remove_file(&p);
        p
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_open_creates_empty_store() {
        let path = scratch_path("open");
        let board = Leaderboard::open(&path).unwrap();
        assert!(board.is_empty());
        assert_eq!(board.top_scores(10).unwrap(), vec![]);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_rank_counts_strictly_better_rows() {
        let path = scratch_path("rank");
        let mut board = Leaderboard::open(&path).unwrap();
        let day = date("2026-08-29");

        assert_eq!(board.add_score_on("A", 50, day).unwrap(), 1);
        assert_eq!(board.add_score_on("B", 30, day).unwrap(), 2);
        assert_eq!(board.add_score_on("C", 80, day).unwrap(), 1);

        let top = board.top_scores(2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!((top[0].name.as_str(), top[0].score), ("C", 80));
        assert_eq!((top[1].name.as_str(), top[1].score), ("A", 50));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_equal_score_later_date_ranks_higher() {
        let path = scratch_path("tie");
        let mut board = Leaderboard::open(&path).unwrap();

        board.add_score_on("A", 50, date("2026-08-01")).unwrap();
        // Same score on a later date outranks A.
        assert_eq!(board.add_score_on("D", 50, date("2026-08-15")).unwrap(), 1);

        let top = board.top_scores(10).unwrap();
        assert_eq!(top[0].name, "D");
        assert_eq!(top[1].name, "A");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_equal_score_and_date_keep_insertion_order() {
        let path = scratch_path("stable");
        let mut board = Leaderboard::open(&path).unwrap();
        let day = date("2026-08-29");

        board.add_score_on("first", 10, day).unwrap();
        // An exact tie does not outrank the earlier insert.
        assert_eq!(board.add_score_on("second", 10, day).unwrap(), 1);

        let top = board.top_scores(10).unwrap();
        assert_eq!(top[0].name, "first");
        assert_eq!(top[1].name, "second");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_closed_store_rejects_operations() {
        let path = scratch_path("closed");
        let mut board = Leaderboard::open(&path).unwrap();
        board.add_score_on("A", 1, date("2026-08-29")).unwrap();
        board.close().unwrap();

        assert!(matches!(
            board.add_score("B", 2),
            Err(StoreError::Closed)
        ));
        assert!(matches!(board.top_scores(10), Err(StoreError::Closed)));
        // Idempotent close.
        board.close().unwrap();
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_torn_trailing_row_is_dropped_on_open() {
        let path = scratch_path("torn");
        fs::write(
            &path,
            "{\"id\":1,\"date\":\"2026-08-29\",\"name\":\"A\",\"score\":5}\n{\"id\":2,\"date\":\"2026-0",
        )
        .unwrap();

        let mut board = Leaderboard::open(&path).unwrap();
        assert_eq!(board.len(), 1);

        // The tail was truncated away, so the next append starts a clean
        // row that survives a reopen.
        board.add_score_on("B", 9, date("2026-08-30")).unwrap();
        board.close().unwrap();

        let board = Leaderboard::open(&path).unwrap();
        assert_eq!(board.len(), 2);
        let top = board.top_scores(10).unwrap();
        assert_eq!(top[0].name, "B");
        assert_eq!(top[1].name, "A");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unterminated_final_row_is_kept_and_repaired() {
        let path = scratch_path("unterminated");
        // A complete row that lost only its newline.
        fs::write(
            &path,
            "{\"id\":1,\"date\":\"2026-08-29\",\"name\":\"A\",\"score\":5}",
        )
        .unwrap();

        let mut board = Leaderboard::open(&path).unwrap();
        assert_eq!(board.len(), 1);

        board.add_score_on("B", 9, date("2026-08-30")).unwrap();
        board.close().unwrap();

        let board = Leaderboard::open(&path).unwrap();
        assert_eq!(board.len(), 2);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_line_reports_position() {
        let path = scratch_path("corrupt");
        fs::write(&path, "{\"id\":1,\"date\":\"2026-08-29\",\"name\":\"A\",\"score\":5}\nnot json\n").unwrap();

        match Leaderboard::open(&path) {
            Err(StoreError::Corrupt { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected Corrupt error, got {other:?}"),
        }
        let _ = fs::remove_file(&path);
    }
}
