//! Grapheme → phoneme transliteration
//!
//! The mapping lives in a two-field file, one `<grapheme> <phonemes>` pair
//! per line. Transliteration is greedy longest-match over the grapheme keys;
//! characters with no mapping pass through unchanged, so punctuation and
//! already-phonemic input survive.

use crate::CorpusError;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Transliterator {
    map: BTreeMap<String, String>,
    max_key_chars: usize,
}

impl Transliterator {
    pub fn parse(text: &str, path: &Path) -> Result<Transliterator, CorpusError> {
        let mut map = BTreeMap::new();
        for (idx, raw) in text.lines().enumerate() {
            let fields: Vec<&str> = raw.split_whitespace().collect();
            match fields.as_slice() {
                [] => continue,
                [grapheme, phonemes] => {
                    map.insert((*grapheme).to_string(), (*phonemes).to_string());
                }
                other => {
                    return Err(CorpusError::MalformedLine {
                        path: path.to_path_buf(),
                        line: idx + 1,
                        message: format!("expected 2 fields, got {}", other.len()),
                    })
                }
            }
        }
        let max_key_chars = map.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        Ok(Transliterator { map, max_key_chars })
    }

    pub fn load(path: &Path) -> Result<Transliterator, CorpusError> {
        let text = std::fs::read_to_string(path).map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Transliterator::parse(&text, path)
    }

    pub fn transliterate(&self, word: &str) -> String {
        let chars: Vec<char> = word.chars().collect();
        let mut out = String::new();
        let mut i = 0usize;
        while i < chars.len() {
            let mut matched = false;
            let longest = self.max_key_chars.min(chars.len() - i);
            for len in (1..=longest).rev() {
                let candidate: String = chars[i..i + len].iter().collect();
                if let Some(phonemes) = self.map.get(&candidate) {
                    out.push_str(phonemes);
                    i += len;
                    matched = true;
                    break;
                }
            }
            if !matched {
                out.push(chars[i]);
                i += 1;
            }
        }
        out
    }
}
