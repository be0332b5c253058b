//! Signature tabulation
//!
//! The tabulator replays every *underlying* form in the post-reconciliation
//! `correct` and `incorrect` buckets through the cascade and aggregates
//! correct/incorrect counts per firing signature. The cascade transduces
//! underlying to surface, so tracing recovers exactly which rules the
//! system's own engine invoked for that prediction.
//!
//! Rows are created lazily on first observation of a signature, mutated by
//! increment only, and never deleted. Counts are associative and commutative,
//! so processing order cannot change the result.

use crate::store::Bucket;
use crate::TabulateError;
use phonotab_rules::{trace, Cascade, FiringSignature};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Correct => write!(f, "correct"),
            Outcome::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// Per-signature aggregate: the rendered signature plus one counter per
/// outcome kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRow {
    pub signature: String,
    pub correct: u64,
    pub incorrect: u64,
}

impl SignatureRow {
    pub fn total(&self) -> u64 {
        self.correct + self.incorrect
    }
}

/// The tabulation result: one row per distinct firing signature observed,
/// iterated in signature order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureTable {
    rows: BTreeMap<FiringSignature, SignatureRow>,
}

impl SignatureTable {
    pub fn new() -> Self {
        SignatureTable::default()
    }

    fn increment(&mut self, signature: &FiringSignature, outcome: Outcome) {
        let row = self
            .rows
            .entry(signature.clone())
            .or_insert_with(|| SignatureRow {
                signature: signature.to_string(),
                correct: 0,
                incorrect: 0,
            });
        match outcome {
            Outcome::Correct => row.correct += 1,
            Outcome::Incorrect => row.incorrect += 1,
        }
    }

    pub fn get(&self, signature: &FiringSignature) -> Option<&SignatureRow> {
        self.rows.get(signature)
    }

    /// Rows in signature order.
    pub fn rows(&self) -> impl Iterator<Item = &SignatureRow> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn correct_total(&self) -> u64 {
        self.rows.values().map(|r| r.correct).sum()
    }

    pub fn incorrect_total(&self) -> u64 {
        self.rows.values().map(|r| r.incorrect).sum()
    }
}

/// A per-item trace failure: reported, excluded from counts, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceFailure {
    pub underlying: String,
    pub outcome: Outcome,
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct Tabulation {
    pub table: SignatureTable,
    pub failures: Vec<TraceFailure>,
}

/// Tabulate the post-reconciliation buckets.
///
/// Side effect: each successfully traced prediction gets its firing signature
/// cached on it, for the example-listing writer.
///
/// An underlying form present in both buckets is a broken invariant upstream
/// (loader or reconciler) and aborts the run.
pub fn tabulate(
    cascade: &Cascade,
    correct: &mut Bucket,
    incorrect: &mut Bucket,
) -> Result<Tabulation, TabulateError> {
    for prediction in correct.iter() {
        if incorrect.contains(&prediction.underlying) {
            return Err(TabulateError::BucketOverlap {
                underlying: prediction.underlying.clone(),
            });
        }
    }

    let mut table = SignatureTable::new();
    let mut failures = Vec::new();

    for (bucket, outcome) in [
        (&mut *correct, Outcome::Correct),
        (&mut *incorrect, Outcome::Incorrect),
    ] {
        for prediction in bucket.iter_mut() {
            match trace(cascade, &prediction.underlying) {
                Ok(t) => {
                    table.increment(&t.fired, outcome);
                    prediction.signature = Some(t.fired);
                }
                Err(err) => {
                    tracing::warn!(
                        underlying = %prediction.underlying,
                        %outcome,
                        error = %err,
                        "trace failed; excluding from counts"
                    );
                    failures.push(TraceFailure {
                        underlying: prediction.underlying.clone(),
                        outcome,
                        error: err.to_string(),
                    });
                }
            }
        }
    }

    Ok(Tabulation { table, failures })
}
