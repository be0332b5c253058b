//! Run configuration
//!
//! All file locations for a tabulation run live in one explicit value passed
//! to the loaders and writers. There are no module-level path constants and
//! no process-wide state: two runs with different configurations cannot
//! interfere.

use crate::store::{load_bucket, Bucket};
use crate::TabulateError;
use phonotab_rules::Cascade;
use std::path::{Path, PathBuf};

/// Conventional prediction file names, as produced by the external harness.
pub const FILE_CORRECT: &str = "correct-made.txt";
pub const FILE_MISSED: &str = "correct-missed.txt";
pub const FILE_INCORRECT: &str = "incorrect-made.txt";

/// Every path a tabulation run touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabulationPaths {
    pub correct: PathBuf,
    pub missed: PathBuf,
    pub incorrect: PathBuf,
    pub cascade: PathBuf,
    pub out_counts: PathBuf,
    pub out_correct_examples: PathBuf,
    pub out_incorrect_examples: PathBuf,
}

impl TabulationPaths {
    /// Conventional layout: the three prediction files under
    /// `predictions_dir`, report files under `out_dir`.
    pub fn conventional(predictions_dir: &Path, cascade: &Path, out_dir: &Path) -> Self {
        TabulationPaths {
            correct: predictions_dir.join(FILE_CORRECT),
            missed: predictions_dir.join(FILE_MISSED),
            incorrect: predictions_dir.join(FILE_INCORRECT),
            cascade: cascade.to_path_buf(),
            out_counts: out_dir.join("count.tsv"),
            out_correct_examples: out_dir.join("correct-examples.tsv"),
            out_incorrect_examples: out_dir.join("incorrect-examples.tsv"),
        }
    }

    /// Load all three buckets. Any missing file or malformed line is fatal;
    /// no partial tabulation is produced.
    pub fn load_buckets(&self) -> Result<(Bucket, Bucket, Bucket), TabulateError> {
        Ok((
            load_bucket(&self.correct)?,
            load_bucket(&self.missed)?,
            load_bucket(&self.incorrect)?,
        ))
    }

    pub fn load_cascade(&self) -> Result<Cascade, TabulateError> {
        let text = std::fs::read_to_string(&self.cascade).map_err(|source| {
            TabulateError::Read {
                path: self.cascade.clone(),
                source,
            }
        })?;
        Cascade::readrules(&text).map_err(|source| TabulateError::Cascade {
            path: self.cascade.clone(),
            source,
        })
    }
}
