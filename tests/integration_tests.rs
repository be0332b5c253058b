//! Integration tests for the complete phonotab pipeline
//!
//! These tests verify end-to-end functionality across crates:
//! - cascade source → parser → tracer
//! - prediction files → store → reconciler → tabulator → reports
//!
//! Run with: cargo test --test integration_tests

use std::fs;
use tempfile::tempdir;

use phonotab_rules::{trace, Cascade, FiringSignature};
use phonotab_tabulate::report::{render_count_table, render_example_listing};
use phonotab_tabulate::{reconcile, tabulate, Outcome, TabulationPaths};

const CASCADE: &str = "\
! toy Catalan-ish adjective grammar
rule devoice: b -> p / _ #
rule raise: a -> ə
rule apocope: ə -> 0 / _ #
";

// ============================================================================
// Tracing
// ============================================================================

#[test]
fn test_trace_recovers_rule_interaction() {
    let cascade = Cascade::readrules(CASCADE).expect("parse cascade");

    // devoice feeds nothing; raise feeds apocope word-finally.
    let t = trace(&cascade, "soba").expect("trace");
    assert_eq!(t.surface, "sob");
    assert_eq!(t.fired.to_string(), "[raise][apocope]");

    let t = trace(&cascade, "kab").expect("trace");
    assert_eq!(t.surface, "kəp");
    assert_eq!(t.fired.to_string(), "[devoice][raise]");
}

// ============================================================================
// Full pipeline over real files
// ============================================================================

#[test]
fn test_reconcile_tabulate_report_end_to_end() {
    let dir = tempdir().expect("tempdir");
    let predictions = dir.path().join("predictions");
    let out = dir.path().join("out");
    fs::create_dir_all(&predictions).expect("mkdir");

    // `gos` is a false negative: wrongly-produced surface equals the missed
    // gold form, so reconciliation must migrate it into correct.
    fs::write(predictions.join("correct-made.txt"), "gat gat\nkab kəp\n").expect("write");
    fs::write(predictions.join("correct-missed.txt"), "gos gok\nmar maɾ\n").expect("write");
    fs::write(
        predictions.join("incorrect-made.txt"),
        "gos gok\nmar mar\nsa s\n",
    )
    .expect("write");
    let cascade_path = dir.path().join("rules.grammar");
    fs::write(&cascade_path, CASCADE).expect("write");

    let paths = TabulationPaths::conventional(&predictions, &cascade_path, &out);
    let cascade = paths.load_cascade().expect("cascade");
    let (correct, missed, incorrect) = paths.load_buckets().expect("buckets");

    let r = reconcile(&correct, &missed, &incorrect);
    assert_eq!(r.moved.len(), 1);
    assert_eq!(r.moved[0].underlying, "gos");
    assert_eq!(r.correct.len(), 3);
    assert_eq!(r.missed.len(), 1);
    assert_eq!(r.incorrect.len(), 2);

    let (mut correct, missed, mut incorrect) = (r.correct, r.missed, r.incorrect);
    let t = tabulate(&cascade, &mut correct, &mut incorrect).expect("tabulate");
    assert!(t.failures.is_empty());

    // Count conservation across signatures.
    assert_eq!(t.table.correct_total() as usize, correct.len());
    assert_eq!(t.table.incorrect_total() as usize, incorrect.len());

    // `gos` fires nothing; `gat` and `mar` fire raise; `kab` fires
    // devoice+raise; `sa` fires raise then apocope.
    let empty = t.table.get(&FiringSignature::default()).expect("empty row");
    assert_eq!((empty.correct, empty.incorrect), (1, 0));
    let raise = t
        .table
        .get(&FiringSignature::new(vec!["raise".to_string()]))
        .expect("raise row");
    assert_eq!((raise.correct, raise.incorrect), (1, 1));

    let count_table = render_count_table(&t.table, Some(&cascade.rule_order()));
    let lines: Vec<&str> = count_table.lines().collect();
    assert_eq!(lines[0], "signature\tcorrect\tincorrect\trule-order");
    assert!(lines.last().unwrap().starts_with("TOTAL\t3\t2"));

    let listing = render_example_listing(&t.table, &incorrect, &missed, Outcome::Incorrect);
    // `mar` still has a gold form in missed; `sa` does not.
    assert!(listing.contains("mar\tmar\tmaɾ\n"));
    assert!(listing.contains("sa\ts\t-\n"));
}

#[test]
fn test_malformed_prediction_line_fails_before_tracing() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("correct-made.txt"), "gat gat extra\n").expect("write");
    fs::write(dir.path().join("correct-missed.txt"), "").expect("write");
    fs::write(dir.path().join("incorrect-made.txt"), "").expect("write");
    let cascade_path = dir.path().join("rules.grammar");
    fs::write(&cascade_path, CASCADE).expect("write");

    let paths = TabulationPaths::conventional(dir.path(), &cascade_path, dir.path());
    let err = paths.load_buckets().expect_err("must fail");
    let message = err.to_string();
    assert!(message.contains("correct-made.txt"));
    assert!(message.contains("line 1"));
}

// ============================================================================
// Corpus → cascade handoff
// ============================================================================

#[test]
fn test_transliterated_lemmas_trace_through_the_cascade() {
    use phonotab_corpus::{OrthBank, Transliterator};
    use std::path::PathBuf;

    let orth = OrthBank::parse("seba seb AQ0FS0\nseb seb AQ0MS0\n", &PathBuf::from("adj.orth"))
        .expect("orth");
    let translit = Transliterator::parse("s s\ne e\nb b\na a\n", &PathBuf::from("g2p.txt"))
        .expect("g2p");
    let cascade = Cascade::readrules(CASCADE).expect("parse cascade");

    let lemma = orth.lemmas().next().expect("lemma");
    let underlying = translit.transliterate(lemma);
    assert_eq!(underlying, "seb");

    let t = trace(&cascade, &underlying).expect("trace");
    assert_eq!(t.surface, "sep");
    assert_eq!(t.fired.to_string(), "[devoice]");
}

#[test]
fn test_empty_cascade_groups_everything_under_the_empty_signature() {
    let cascade = Cascade::empty();
    let mut correct = phonotab_tabulate::Bucket::from_pairs([("gat", "gat"), ("gos", "gos")]);
    let mut incorrect = phonotab_tabulate::Bucket::from_pairs([("mar", "mar")]);

    let t = tabulate(&cascade, &mut correct, &mut incorrect).expect("tabulate");
    assert_eq!(t.table.len(), 1);
    let row = t.table.get(&FiringSignature::default()).expect("row");
    assert_eq!((row.correct, row.incorrect), (2, 1));
}
