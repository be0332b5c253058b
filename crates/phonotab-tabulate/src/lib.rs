//! Prediction tabulation over rule-firing signatures
//!
//! An external harness runs a rewrite-rule cascade over a test corpus and
//! records three word-level prediction files: matched-correct, missed-correct,
//! and wrongly-produced. This crate answers *why* each prediction came out the
//! way it did:
//!
//! - [`store`] loads the three buckets (fail-fast on malformed lines),
//! - [`reconcile`] migrates false negatives (forms "wrongly produced" with
//!   exactly the surface form recorded as missed) into the correct bucket,
//! - [`tabulate`] replays every underlying form through the cascade and
//!   aggregates correct/incorrect counts per firing signature, and
//! - [`report`] serializes the signature table and per-signature example
//!   listings to delimited text (or JSON).
//!
//! Everything is synchronous and deterministic: buckets are `BTreeMap`s, the
//! signature table iterates in signature order, and no step recomputes what an
//! earlier step produced.

pub mod config;
pub mod reconcile;
pub mod report;
pub mod store;
pub mod tabulate;

pub use config::TabulationPaths;
pub use reconcile::{reconcile, MovedForm, Reconciliation};
pub use store::{load_bucket, save_bucket, Bucket, Prediction};
pub use tabulate::{tabulate, Outcome, SignatureRow, SignatureTable, Tabulation, TraceFailure};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TabulateError {
    #[error("failed to read `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write `{path}`: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed prediction line {line} in `{path}`: expected 2 fields, got {found}")]
    MalformedLine {
        path: PathBuf,
        line: usize,
        found: usize,
    },
    #[error("failed to read cascade `{path}`: {source}")]
    Cascade {
        path: PathBuf,
        #[source]
        source: phonotab_rules::CascadeParseError,
    },
    #[error(
        "underlying form `{underlying}` is in both the correct and incorrect buckets; \
         reconciliation or loading broke a bucket invariant"
    )]
    BucketOverlap { underlying: String },
}
