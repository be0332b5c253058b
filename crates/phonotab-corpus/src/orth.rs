//! Orthographic bank
//!
//! Space-delimited three-field rows: inflected form, lemma (the underlying
//! form's citation spelling), and a part-of-speech tag. Lemmas keep their
//! first-appearance order so generated output is stable against the source
//! file.

use crate::CorpusError;
use std::collections::BTreeMap;
use std::path::Path;

/// EAGLES-style adjective tags used by the source corpus.
pub const TAG_FEM_SG: &str = "AQ0FS0";
pub const TAG_FEM_PL: &str = "AQ0FP0";
pub const TAG_MASC_SG: &str = "AQ0MS0";
pub const TAG_MASC_PL: &str = "AQ0MP0";
pub const TAG_NEUT_SG: &str = "AQ0CS0";
pub const TAG_NEUT_PL: &str = "AQ0CP0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrthRow {
    pub inflected: String,
    pub lemma: String,
    pub tag: String,
}

#[derive(Debug, Clone, Default)]
pub struct OrthBank {
    rows: Vec<OrthRow>,
    lemma_order: Vec<String>,
    by_lemma: BTreeMap<String, BTreeMap<String, String>>,
}

impl OrthBank {
    pub fn parse(text: &str, path: &Path) -> Result<OrthBank, CorpusError> {
        let mut bank = OrthBank::default();
        for (idx, raw) in text.lines().enumerate() {
            let fields: Vec<&str> = raw.split_whitespace().collect();
            match fields.as_slice() {
                [] => continue,
                [inflected, lemma, tag] => bank.push(OrthRow {
                    inflected: (*inflected).to_string(),
                    lemma: (*lemma).to_string(),
                    tag: (*tag).to_string(),
                }),
                other => {
                    return Err(CorpusError::MalformedLine {
                        path: path.to_path_buf(),
                        line: idx + 1,
                        message: format!("expected 3 fields, got {}", other.len()),
                    })
                }
            }
        }
        Ok(bank)
    }

    pub fn load(path: &Path) -> Result<OrthBank, CorpusError> {
        let text = std::fs::read_to_string(path).map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        OrthBank::parse(&text, path)
    }

    fn push(&mut self, row: OrthRow) {
        let tags = self.by_lemma.entry(row.lemma.clone()).or_insert_with(|| {
            self.lemma_order.push(row.lemma.clone());
            BTreeMap::new()
        });
        tags.insert(row.tag.clone(), row.inflected.clone());
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[OrthRow] {
        &self.rows
    }

    /// Lemmas in first-appearance order.
    pub fn lemmas(&self) -> impl Iterator<Item = &str> {
        self.lemma_order.iter().map(String::as_str)
    }

    /// Tag → inflected form for one lemma.
    pub fn inflections(&self, lemma: &str) -> Option<&BTreeMap<String, String>> {
        self.by_lemma.get(lemma)
    }

    /// Whether the lemma has a neuter-singular row (those are skipped by the
    /// lexicon formatter, as in the source corpus).
    pub fn is_neuter(&self, lemma: &str) -> bool {
        self.inflections(lemma)
            .is_some_and(|tags| tags.contains_key(TAG_NEUT_SG))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn label() -> PathBuf {
        PathBuf::from("adj.orth")
    }

    #[test]
    fn groups_inflections_by_lemma_in_first_appearance_order() {
        let text = "seca sec AQ0FS0\nsec sec AQ0MS0\nalta alt AQ0FS0\n";
        let bank = OrthBank::parse(text, &label()).expect("parse");
        let lemmas: Vec<&str> = bank.lemmas().collect();
        assert_eq!(lemmas, vec!["sec", "alt"]);
        let tags = bank.inflections("sec").expect("sec");
        assert_eq!(tags.get(TAG_FEM_SG).map(String::as_str), Some("seca"));
        assert_eq!(tags.get(TAG_MASC_SG).map(String::as_str), Some("sec"));
    }

    #[test]
    fn flags_neuter_lemmas() {
        let text = "tal tal AQ0CS0\nsec sec AQ0MS0\n";
        let bank = OrthBank::parse(text, &label()).expect("parse");
        assert!(bank.is_neuter("tal"));
        assert!(!bank.is_neuter("sec"));
    }

    #[test]
    fn wrong_field_count_is_an_error() {
        let err = OrthBank::parse("seca sec\n", &label()).expect_err("must fail");
        assert!(matches!(err, CorpusError::MalformedLine { line: 1, .. }));
    }
}
