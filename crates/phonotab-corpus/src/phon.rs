//! Phonetic bank
//!
//! One transcription per line, segments separated by spaces. Stress digits
//! and syllable boundaries are stripped, and the corpus's ASCII segment names
//! are normalized to IPA before anything downstream sees them.

use crate::CorpusError;
use std::collections::BTreeSet;
use std::path::Path;

/// ASCII segment name → IPA, as used by the source transcriptions.
const IPA_MAP: &[(&str, &str)] = &[
    ("ax", "ə"),
    ("L", "ʎ"),
    ("B", "β"),
    ("S", "ʃ"),
    ("E", "ɛ"),
    ("O", "ɔ"),
    ("D", "ð"),
    ("tS", "t͡ʃ"),
    ("ts", "t͡ʃ"),
    ("Z", "ʒ"),
    ("G", "ɣ"),
    ("g", "ɡ"),
    ("dZ", "d͡ʒ"),
    ("N", "ŋ"),
    ("J", "ɲ"),
    ("rr", "r"),
    ("r", "ɾ"),
];

fn to_ipa(segment: &str) -> &str {
    IPA_MAP
        .iter()
        .find(|(ascii, _)| *ascii == segment)
        .map_or(segment, |(_, ipa)| ipa)
}

#[derive(Debug, Clone, Default)]
pub struct PhonBank {
    rows: Vec<String>,
    phonemes: BTreeSet<String>,
}

impl PhonBank {
    pub fn parse(text: &str) -> PhonBank {
        let mut rows = Vec::new();
        let mut phonemes = BTreeSet::new();
        for raw in text.lines() {
            let segments: Vec<&str> = raw
                .split_whitespace()
                .map(|seg| to_ipa(strip_markup(seg)))
                .collect();
            for seg in &segments {
                if !seg.is_empty() {
                    phonemes.insert((*seg).to_string());
                }
            }
            rows.push(segments.join(" "));
        }
        PhonBank { rows, phonemes }
    }

    pub fn load(path: &Path) -> Result<PhonBank, CorpusError> {
        let text = std::fs::read_to_string(path).map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(PhonBank::parse(&text))
    }

    /// Normalized transcriptions, one per source line.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Option<&str> {
        self.rows.get(idx).map(String::as_str)
    }

    /// The phoneme inventory observed across all rows.
    pub fn phonemes(&self) -> &BTreeSet<String> {
        &self.phonemes
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Strip stress digits and syllable boundaries from one segment.
fn strip_markup(segment: &str) -> &str {
    // Markup only ever trails the segment name ("a1", "a-"), so trimming is
    // enough; interior hyphens do not occur in the corpus.
    segment.trim_end_matches(['1', '-'])
}
