//! Prediction buckets
//!
//! A prediction source is a sequence of lines `<underlying> <surface>`
//! (whitespace-delimited, one record per line, no header). A line with any
//! other field count is a hard load error: silently dropping a prediction
//! would undercount every downstream aggregate.

use crate::TabulateError;
use phonotab_rules::FiringSignature;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One word-level prediction. The firing signature is derived, not loaded:
/// the tabulator computes it once and caches it here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub underlying: String,
    pub surface: String,
    pub signature: Option<FiringSignature>,
}

/// One of the three named prediction partitions, keyed by underlying form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bucket {
    entries: BTreeMap<String, Prediction>,
}

impl Bucket {
    pub fn new() -> Self {
        Bucket::default()
    }

    /// Build a bucket from (underlying, surface) pairs. Later pairs overwrite
    /// earlier ones with the same underlying form, as with file loading.
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut bucket = Bucket::new();
        for (underlying, surface) in pairs {
            bucket.insert(underlying.into(), surface.into());
        }
        bucket
    }

    /// Insert a prediction; a duplicate underlying form overwrites the earlier
    /// entry (last wins). Returns the displaced prediction, if any.
    pub fn insert(&mut self, underlying: String, surface: String) -> Option<Prediction> {
        let displaced = self.entries.insert(
            underlying.clone(),
            Prediction {
                underlying,
                surface,
                signature: None,
            },
        );
        if let Some(old) = &displaced {
            tracing::debug!(
                underlying = %old.underlying,
                old_surface = %old.surface,
                "duplicate underlying form, last entry wins"
            );
        }
        displaced
    }

    pub fn get(&self, underlying: &str) -> Option<&Prediction> {
        self.entries.get(underlying)
    }

    pub fn contains(&self, underlying: &str) -> bool {
        self.entries.contains_key(underlying)
    }

    pub fn remove(&mut self, underlying: &str) -> Option<Prediction> {
        self.entries.remove(underlying)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Predictions in underlying-form order.
    pub fn iter(&self) -> impl Iterator<Item = &Prediction> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Prediction> {
        self.entries.values_mut()
    }

    /// Parse a prediction source. `path` is only used for error attribution.
    pub fn parse(text: &str, path: &Path) -> Result<Bucket, TabulateError> {
        let mut bucket = Bucket::new();
        for (idx, raw) in text.lines().enumerate() {
            let fields: Vec<&str> = raw.split_whitespace().collect();
            match fields.as_slice() {
                [] => continue,
                [underlying, surface] => {
                    bucket.insert((*underlying).to_string(), (*surface).to_string());
                }
                other => {
                    return Err(TabulateError::MalformedLine {
                        path: path.to_path_buf(),
                        line: idx + 1,
                        found: other.len(),
                    })
                }
            }
        }
        Ok(bucket)
    }

    /// Render back to the on-disk line format (tab-delimited, underlying-form
    /// order).
    pub fn render(&self) -> String {
        let mut out = String::new();
        for p in self.iter() {
            out.push_str(&p.underlying);
            out.push('\t');
            out.push_str(&p.surface);
            out.push('\n');
        }
        out
    }
}

pub fn load_bucket(path: &Path) -> Result<Bucket, TabulateError> {
    let text = std::fs::read_to_string(path).map_err(|source| TabulateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Bucket::parse(&text, path)
}

pub fn save_bucket(bucket: &Bucket, path: &Path) -> Result<(), TabulateError> {
    std::fs::write(path, bucket.render()).map_err(|source| TabulateError::Write {
        path: path.to_path_buf(),
        source,
    })
}
