//! Cascade replay: recover which rules actually changed a word.
//!
//! Tracing drives every rule in cascade order over the evolving form and
//! records the name of each rule whose output differed from its input. The
//! loop is bounded by the cascade length; there is no early exit and no
//! skipping, so the result is always an ordered subsequence of the cascade's
//! declared rule order.

use crate::cascade::{Cascade, RuleError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The ordered subsequence of rule names that changed a word.
///
/// Rendered as a bracketed key (`[devoice][raise]`); the empty signature
/// renders as the empty string and is a valid key that groups the words no
/// rule touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FiringSignature(Vec<String>);

impl FiringSignature {
    pub fn new(names: Vec<String>) -> Self {
        FiringSignature(names)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl std::fmt::Display for FiringSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for name in &self.0 {
            write!(f, "[{name}]")?;
        }
        Ok(())
    }
}

/// Result of replaying one word through a cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// The fully transduced surface form.
    pub surface: String,
    /// Which rules fired, in cascade order.
    pub fired: FiringSignature,
}

/// One fired rule during a derivation, with the form it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationStep {
    pub rule: String,
    pub output: String,
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("`{form}` contains symbol `{symbol}` outside the cascade alphabet")]
    UnknownSymbol { form: String, symbol: char },
    #[error("rule `{rule}` failed on `{form}`: {source}")]
    Rule {
        rule: String,
        form: String,
        source: RuleError,
    },
}

/// Replay `word` through the cascade.
///
/// Pure and deterministic: the same (cascade, word) pair always yields the
/// same trace. An empty cascade returns the word unchanged with an empty
/// signature.
pub fn trace(cascade: &Cascade, word: &str) -> Result<Trace, TraceError> {
    if let Some(symbol) = cascade.undeclared_symbol(word) {
        return Err(TraceError::UnknownSymbol {
            form: word.to_string(),
            symbol,
        });
    }

    let mut current = word.to_string();
    let mut fired = Vec::new();
    for rule in cascade.rules() {
        let next = rule.apply(&current).map_err(|source| TraceError::Rule {
            rule: rule.name().to_string(),
            form: current.clone(),
            source,
        })?;
        if next != current {
            fired.push(rule.name().to_string());
        }
        current = next;
    }

    Ok(Trace {
        surface: current,
        fired: FiringSignature(fired),
    })
}

/// Like [`trace`], but keeps the intermediate form after each fired rule.
/// Used by the single-word diagnostic mode, not by tabulation.
pub fn derivation(cascade: &Cascade, word: &str) -> Result<Vec<DerivationStep>, TraceError> {
    if let Some(symbol) = cascade.undeclared_symbol(word) {
        return Err(TraceError::UnknownSymbol {
            form: word.to_string(),
            symbol,
        });
    }

    let mut current = word.to_string();
    let mut steps = Vec::new();
    for rule in cascade.rules() {
        let next = rule.apply(&current).map_err(|source| TraceError::Rule {
            rule: rule.name().to_string(),
            form: current.clone(),
            source,
        })?;
        if next != current {
            steps.push(DerivationStep {
                rule: rule.name().to_string(),
                output: next.clone(),
            });
        }
        current = next;
    }
    Ok(steps)
}
