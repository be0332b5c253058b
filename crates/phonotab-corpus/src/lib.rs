//! Corpus tooling for the rule-cascade workflow
//!
//! Everything here is deliberately plain data shuffling around the tabulation
//! core:
//! - [`orth`]: the orthographic bank (inflected form, lemma, tag triples),
//! - [`phon`]: the phonetic bank (segment rows, stress/syllable stripping,
//!   ASCII → IPA normalization),
//! - [`translit`]: grapheme → phoneme transliteration from a mapping table,
//! - [`features`]: phoneme/feature tables and `define` line formatting,
//! - [`lexicon`]: lexc-style lexicon source-text templating.

pub mod features;
pub mod lexicon;
pub mod orth;
pub mod phon;
pub mod translit;

pub use features::FeatureTable;
pub use orth::OrthBank;
pub use phon::PhonBank;
pub use translit::Transliterator;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed line {line} in `{path}`: {message}")]
    MalformedLine {
        path: PathBuf,
        line: usize,
        message: String,
    },
}
