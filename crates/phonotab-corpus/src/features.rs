//! Phonological feature tables
//!
//! The feature table is a delimited file: `<phoneme> <±feature> ...`, one
//! phoneme per line. Both directions are exposed, phoneme to feature set and
//! its inversion, and both can be rendered as rule-compiler `define` lines:
//!
//! ```text
//! define +syll [ i | e | ɛ | a | ɔ | o | u ];
//! ```

use crate::CorpusError;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    by_phoneme: BTreeMap<String, Vec<String>>,
}

impl FeatureTable {
    pub fn parse(text: &str, path: &Path) -> Result<FeatureTable, CorpusError> {
        let mut by_phoneme = BTreeMap::new();
        for (idx, raw) in text.lines().enumerate() {
            let mut fields = raw.split_whitespace();
            let Some(phoneme) = fields.next() else {
                continue;
            };
            let features: Vec<String> = fields.map(str::to_string).collect();
            for feature in &features {
                if !feature.starts_with(['+', '-']) {
                    return Err(CorpusError::MalformedLine {
                        path: path.to_path_buf(),
                        line: idx + 1,
                        message: format!("feature `{feature}` must start with `+` or `-`"),
                    });
                }
            }
            by_phoneme.insert(phoneme.to_string(), features);
        }
        Ok(FeatureTable { by_phoneme })
    }

    pub fn load(path: &Path) -> Result<FeatureTable, CorpusError> {
        let text = std::fs::read_to_string(path).map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        FeatureTable::parse(&text, path)
    }

    pub fn phoneme_feature_sets(&self) -> &BTreeMap<String, Vec<String>> {
        &self.by_phoneme
    }

    /// Invert to feature → phoneme set.
    pub fn feature_phoneme_sets(&self) -> BTreeMap<String, BTreeSet<String>> {
        let mut inverted: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (phoneme, features) in &self.by_phoneme {
            for feature in features {
                inverted
                    .entry(feature.clone())
                    .or_default()
                    .insert(phoneme.clone());
            }
        }
        inverted
    }

    /// `define` lines for feature → phoneme sets.
    pub fn format_feature_defs(&self) -> String {
        format_defs(
            self.feature_phoneme_sets()
                .iter()
                .map(|(name, elements)| (name.as_str(), elements.iter().map(String::as_str))),
            "",
        )
    }

    /// `define` lines for phoneme → feature sets. Phoneme names are prefixed
    /// with `%` so the rule compiler reads them as literal symbols.
    pub fn format_phoneme_defs(&self) -> String {
        format_defs(
            self.by_phoneme
                .iter()
                .map(|(name, elements)| (name.as_str(), elements.iter().map(String::as_str))),
            "%",
        )
    }
}

fn format_defs<'a, I, E>(defs: I, prefix: &str) -> String
where
    I: Iterator<Item = (&'a str, E)>,
    E: Iterator<Item = &'a str>,
{
    let mut out = String::new();
    for (name, elements) in defs {
        let body = elements
            .map(|e| format!("{prefix}{e}"))
            .collect::<Vec<_>>()
            .join(" | ");
        out.push_str(&format!("define {name} [ {body} ];\n"));
    }
    out
}
