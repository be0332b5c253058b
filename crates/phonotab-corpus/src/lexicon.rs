//! Lexicon source-text templating
//!
//! Renders the orthographic bank as lexc-style grammar source: a root lexicon
//! of underlying forms (transliterated to phonemes) plus the adjectival
//! inflection continuation class. Neuter-only lemmas are skipped, matching
//! the source corpus.

use crate::orth::OrthBank;
use crate::translit::Transliterator;

pub const ADJ: &str = "+Adj";
pub const MASC: &str = "+Masc";
pub const FEM: &str = "+Fem";
pub const SG: &str = "+Sg";
pub const PL: &str = "+Pl";
pub const ADJ_INF: &str = "AdjInf";

/// Underlying-form entries for the `Adj` lexicon, one `<ur> AdjInf;` line per
/// non-neuter lemma, in bank order.
pub fn format_underlying_forms(bank: &OrthBank, translit: &Transliterator) -> String {
    bank.lemmas()
        .filter(|lemma| !bank.is_neuter(lemma))
        .map(|lemma| format!("{} {ADJ_INF};", translit.transliterate(lemma)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The full lexc lexicon source.
pub fn format_lexicon(bank: &OrthBank, translit: &Transliterator) -> String {
    format!(
        "\nMultichar_Symbols {ADJ} {MASC} {SG} {PL}\n\
         \nLEXICON Root\n\
         \nAdj ;\n\
         \nLEXICON Adj\n\
         \n{urs}\n\
         \nLEXICON {ADJ_INF}\n\
         \n{ADJ}{MASC}{SG}:0   #;\n\
         {ADJ}{MASC}{PL}:s   #;\n\
         \n{ADJ}{FEM}{SG}:0    #;\n\
         {ADJ}{FEM}{PL}:s    #;\n",
        urs = format_underlying_forms(bank, translit),
    )
}

/// Two-column `orthographic-lemma phonemic-form` listing, one non-neuter
/// lemma per line.
pub fn format_orth_to_phon(bank: &OrthBank, translit: &Transliterator) -> String {
    bank.lemmas()
        .filter(|lemma| !bank.is_neuter(lemma))
        .map(|lemma| format!("{lemma} {}", translit.transliterate(lemma)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixtures() -> (OrthBank, Transliterator) {
        let orth = OrthBank::parse(
            "seca sec AQ0FS0\nsec sec AQ0MS0\ntal tal AQ0CS0\nalta alt AQ0FS0\n",
            &PathBuf::from("adj.orth"),
        )
        .expect("orth");
        let translit =
            Transliterator::parse("c k\ns s\ne ɛ\na a\nl l\nt t\n", &PathBuf::from("g2p.txt"))
                .expect("g2p");
        (orth, translit)
    }

    #[test]
    fn skips_neuter_lemmas_and_transliterates() {
        let (orth, translit) = fixtures();
        assert_eq!(
            format_underlying_forms(&orth, &translit),
            "sɛk AdjInf;\nalt AdjInf;"
        );
    }

    #[test]
    fn lexicon_template_declares_multichar_symbols() {
        let (orth, translit) = fixtures();
        let text = format_lexicon(&orth, &translit);
        assert!(text.contains("Multichar_Symbols +Adj +Masc +Sg +Pl"));
        assert!(text.contains("LEXICON Root"));
        assert!(text.contains("sɛk AdjInf;"));
        assert!(text.contains("+Adj+Fem+Pl:s"));
    }

    #[test]
    fn orth_to_phon_pairs_spelling_with_phonemes() {
        let (orth, translit) = fixtures();
        assert_eq!(format_orth_to_phon(&orth, &translit), "sec sɛk\nalt alt");
    }
}
