//! Phonotab CLI
//!
//! Command-line interface for the rule-cascade prediction workflow:
//! - Tabulating harness predictions by rule-firing signature (`tabulate`)
//! - Reconciling false negatives back into the correct bucket (`reconcile`)
//! - Replaying one word through the cascade (`trace`)
//! - Corpus/lexicon formatting utilities (`corpus`)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use phonotab_rules::derivation;
use std::path::PathBuf;

mod corpus;
mod tabulation;

#[derive(Parser)]
#[command(name = "phonotab")]
#[command(
    author,
    version,
    about = "Phonotab: rule-trace and prediction tabulation for phonological grammars"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile predictions, tabulate them by firing signature, and write
    /// the count table plus per-signature example listings.
    Tabulate {
        /// Cascade source file (rule definitions, in order)
        #[arg(short, long)]
        grammar: PathBuf,
        /// Directory holding correct-made.txt, correct-missed.txt,
        /// incorrect-made.txt
        #[arg(short, long)]
        predictions_dir: PathBuf,
        /// Output directory for the report files
        #[arg(short, long)]
        out: PathBuf,
        /// Report only correct-prediction counts and examples
        #[arg(long)]
        correct_only: bool,
        /// Report only incorrect-prediction counts and examples
        #[arg(long)]
        incorrect_only: bool,
        /// Count table format
        #[arg(long, default_value = "text")]
        format: String,
        /// Append to the count file instead of overwriting it
        #[arg(short, long)]
        append: bool,
    },

    /// Run the reconciliation pass standalone: rewrite the three prediction
    /// files with false negatives migrated, and write the side tables.
    Reconcile {
        /// Directory holding correct-made.txt, correct-missed.txt,
        /// incorrect-made.txt (rewritten in place)
        #[arg(short, long)]
        predictions_dir: PathBuf,
    },

    /// Replay one underlying form through the cascade and print its
    /// derivation.
    Trace {
        /// Cascade source file
        #[arg(short, long)]
        grammar: PathBuf,
        /// The underlying form to trace
        word: String,
    },

    /// Corpus and lexicon formatting utilities.
    Corpus {
        #[command(subcommand)]
        command: corpus::CorpusCommands,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Tabulate {
            grammar,
            predictions_dir,
            out,
            correct_only,
            incorrect_only,
            format,
            append,
        } => {
            let filter = tabulation::outcome_filter(correct_only, incorrect_only)?;
            tabulation::cmd_tabulate(&grammar, &predictions_dir, &out, filter, &format, append)
        }
        Commands::Reconcile { predictions_dir } => tabulation::cmd_reconcile(&predictions_dir),
        Commands::Trace { grammar, word } => cmd_trace(&grammar, &word),
        Commands::Corpus { command } => corpus::cmd_corpus(command),
    }
}

fn cmd_trace(grammar: &PathBuf, word: &str) -> Result<()> {
    let text = std::fs::read_to_string(grammar)
        .with_context(|| format!("failed to read cascade `{}`", grammar.display()))?;
    let cascade = phonotab_rules::Cascade::readrules(&text)?;

    let steps = derivation(&cascade, word)?;
    println!("{word}");
    let mut surface = word.to_string();
    for step in &steps {
        println!("  {} {}", step.rule.cyan(), step.output);
        surface = step.output.clone();
    }
    if steps.is_empty() {
        println!("  {}", "(no rules fired)".dimmed());
    }
    println!("{}", surface.green().bold());
    Ok(())
}
