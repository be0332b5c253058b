//! `corpus` subcommands: lexicon and definition formatting.

use anyhow::Result;
use clap::Subcommand;
use phonotab_corpus::{lexicon, FeatureTable, OrthBank, Transliterator};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum CorpusCommands {
    /// Print the lexc lexicon source built from the orthographic bank.
    Lexicon {
        /// Orthographic bank (inflected form, lemma, tag rows)
        #[arg(long)]
        orth: PathBuf,
        /// Grapheme-to-phoneme mapping file
        #[arg(long)]
        g2p: PathBuf,
    },
    /// Print `define` lines mapping each feature to its phoneme set.
    FeatureDefs {
        /// Feature table (phoneme, ±feature... rows)
        #[arg(long)]
        features: PathBuf,
    },
    /// Print `define` lines mapping each phoneme to its feature set.
    PhonemeDefs {
        /// Feature table (phoneme, ±feature... rows)
        #[arg(long)]
        features: PathBuf,
    },
    /// Print the orthographic-lemma to phonemic-form listing.
    UrOrthToPhon {
        #[arg(long)]
        orth: PathBuf,
        #[arg(long)]
        g2p: PathBuf,
    },
}

pub fn cmd_corpus(command: CorpusCommands) -> Result<()> {
    match command {
        CorpusCommands::Lexicon { orth, g2p } => {
            let bank = OrthBank::load(&orth)?;
            let translit = Transliterator::load(&g2p)?;
            println!("{}", lexicon::format_lexicon(&bank, &translit));
        }
        CorpusCommands::FeatureDefs { features } => {
            let table = FeatureTable::load(&features)?;
            print!("{}", table.format_feature_defs());
        }
        CorpusCommands::PhonemeDefs { features } => {
            let table = FeatureTable::load(&features)?;
            print!("{}", table.format_phoneme_defs());
        }
        CorpusCommands::UrOrthToPhon { orth, g2p } => {
            let bank = OrthBank::load(&orth)?;
            let translit = Transliterator::load(&g2p)?;
            println!("{}", lexicon::format_orth_to_phon(&bank, &translit));
        }
    }
    Ok(())
}
