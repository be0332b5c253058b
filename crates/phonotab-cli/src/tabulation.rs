//! `tabulate` and `reconcile` commands.

use anyhow::{anyhow, Result};
use colored::Colorize;
use phonotab_tabulate::config::{FILE_CORRECT, FILE_INCORRECT, FILE_MISSED};
use phonotab_tabulate::reconcile::render_moved;
use phonotab_tabulate::report::{count_report, render_count_table, render_example_listing};
use phonotab_tabulate::store::{load_bucket, save_bucket};
use phonotab_tabulate::{reconcile, tabulate, Bucket, Outcome, TabulationPaths};
use std::fs;
use std::io::Write as _;
use std::path::Path;

/// Derive the example-listing filter from the two exclusive flags.
///
/// A conflicting pair is a usage error, rejected before any file is read.
pub fn outcome_filter(correct_only: bool, incorrect_only: bool) -> Result<Option<Outcome>> {
    match (correct_only, incorrect_only) {
        (true, true) => Err(anyhow!(
            "--correct-only and --incorrect-only are mutually exclusive"
        )),
        (true, false) => Ok(Some(Outcome::Correct)),
        (false, true) => Ok(Some(Outcome::Incorrect)),
        (false, false) => Ok(None),
    }
}

pub fn cmd_tabulate(
    grammar: &Path,
    predictions_dir: &Path,
    out_dir: &Path,
    filter: Option<Outcome>,
    format: &str,
    append: bool,
) -> Result<()> {
    let format = format.trim().to_ascii_lowercase();
    if !matches!(format.as_str(), "text" | "json") {
        return Err(anyhow!("unknown --format `{format}` (expected text|json)"));
    }

    let paths = TabulationPaths::conventional(predictions_dir, grammar, out_dir);
    let cascade = paths.load_cascade()?;
    let (correct, missed, incorrect) = paths.load_buckets()?;

    let r = reconcile(&correct, &missed, &incorrect);
    if !r.moved.is_empty() {
        println!(
            "{} {} false negative(s) reconciled into the correct bucket",
            "reconciled".yellow(),
            r.moved.len()
        );
    }

    let (mut correct, missed, mut incorrect) = (r.correct, r.missed, r.incorrect);
    let t = tabulate(&cascade, &mut correct, &mut incorrect)?;

    for failure in &t.failures {
        eprintln!(
            "{} could not trace `{}` ({} bucket): {}",
            "warning:".yellow().bold(),
            failure.underlying,
            failure.outcome,
            failure.error
        );
    }

    fs::create_dir_all(out_dir)?;

    let rule_order = cascade.rule_order();
    match format.as_str() {
        "json" => {
            let report = count_report(&t.table, Some(&rule_order), &t.failures);
            let path = paths.out_counts.with_extension("json");
            fs::write(&path, serde_json::to_string_pretty(&report)?)?;
            println!("wrote {}", path.display());
        }
        _ => {
            let text = render_count_table(&t.table, Some(&rule_order));
            if append {
                let mut file = fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&paths.out_counts)?;
                file.write_all(text.as_bytes())?;
            } else {
                fs::write(&paths.out_counts, text)?;
            }
            println!("wrote {}", paths.out_counts.display());
        }
    }

    if filter != Some(Outcome::Incorrect) {
        let text = render_example_listing(&t.table, &correct, &correct, Outcome::Correct);
        fs::write(&paths.out_correct_examples, text)?;
        println!("wrote {}", paths.out_correct_examples.display());
    }
    if filter != Some(Outcome::Correct) {
        let text = render_example_listing(&t.table, &incorrect, &missed, Outcome::Incorrect);
        fs::write(&paths.out_incorrect_examples, text)?;
        println!("wrote {}", paths.out_incorrect_examples.display());
    }

    println!(
        "{} {} signature(s), {} correct / {} incorrect prediction(s)",
        "tabulated".green().bold(),
        t.table.len(),
        t.table.correct_total(),
        t.table.incorrect_total()
    );
    Ok(())
}

pub fn cmd_reconcile(predictions_dir: &Path) -> Result<()> {
    let correct_path = predictions_dir.join(FILE_CORRECT);
    let missed_path = predictions_dir.join(FILE_MISSED);
    let incorrect_path = predictions_dir.join(FILE_INCORRECT);

    let correct = load_bucket(&correct_path)?;
    let missed = load_bucket(&missed_path)?;
    let incorrect = load_bucket(&incorrect_path)?;

    let r = reconcile(&correct, &missed, &incorrect);
    save_bucket(&r.correct, &correct_path)?;
    save_bucket(&r.missed, &missed_path)?;
    save_bucket(&r.incorrect, &incorrect_path)?;

    // Side table of what was fixed.
    let moved_path = predictions_dir.join("reconciled.txt");
    fs::write(&moved_path, render_moved(&r.moved))?;
    println!("wrote {}", moved_path.display());

    // Remaining true mismatches: incorrect forms whose gold form is known,
    // paired (produced, gold) for inspection.
    let tabulated_path = predictions_dir.join("incorrect-tabulated.txt");
    fs::write(&tabulated_path, render_mismatches(&r.incorrect, &r.missed))?;
    println!("wrote {}", tabulated_path.display());

    println!(
        "{} {} form(s) migrated, {} mismatch(es) remain",
        "reconciled".green().bold(),
        r.moved.len(),
        r.incorrect.len()
    );
    Ok(())
}

fn render_mismatches(incorrect: &Bucket, missed: &Bucket) -> String {
    let mut out = String::new();
    for p in incorrect.iter() {
        if let Some(gold) = missed.get(&p.underlying) {
            out.push_str(&format!("{}\t{}\t{}\n", p.underlying, p.surface, gold.surface));
        }
    }
    out
}
