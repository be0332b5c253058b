//! Report serialization
//!
//! Two outputs, both pure serializations of the signature table and the
//! post-reconciliation buckets; no counts or signatures are recomputed here.
//!
//! - The **count table**: one tab-delimited row per signature (sorted by
//!   signature string), a trailing totals row, and an optional side column
//!   carrying the cascade's declared rule order for human cross-reference.
//! - The **example listing**: per-signature groups ordered ascending by that
//!   signature's error count, so the most error-prone rule paths end up last,
//!   where a reader scanning top to bottom lands. Headers repeat per group
//!   with a blank spacer row between groups.

use crate::store::Bucket;
use crate::tabulate::{Outcome, SignatureRow, SignatureTable, TraceFailure};
use serde::Serialize;

/// Render the count table as tab-delimited text.
///
/// `rule_order`, when given, is laid alongside the rows purely as annotation:
/// it never affects sorting or totals, and when the cascade has more rules
/// than there are signature rows the surplus rules get otherwise-empty rows.
pub fn render_count_table(table: &SignatureTable, rule_order: Option<&[String]>) -> String {
    let mut out = String::new();
    out.push_str("signature\tcorrect\tincorrect");
    if rule_order.is_some() {
        out.push_str("\trule-order");
    }
    out.push('\n');

    let mut rows: Vec<&SignatureRow> = table.rows().collect();
    rows.sort_by(|a, b| a.signature.cmp(&b.signature));
    let order_len = rule_order.map_or(0, <[String]>::len);
    let body_lines = rows.len().max(order_len);

    for i in 0..body_lines {
        match rows.get(i) {
            Some(row) => {
                out.push_str(&format!("{}\t{}\t{}", row.signature, row.correct, row.incorrect))
            }
            None => out.push_str("\t\t"),
        }
        if let Some(order) = rule_order {
            out.push('\t');
            if let Some(rule) = order.get(i) {
                out.push_str(rule);
            }
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "TOTAL\t{}\t{}",
        table.correct_total(),
        table.incorrect_total()
    ));
    if rule_order.is_some() {
        out.push('\t');
    }
    out.push('\n');
    out
}

/// Render the per-signature example listing for `bucket`.
///
/// Groups are ordered ascending by the signature's count for `outcome` (ties
/// broken by signature string, so output is fully deterministic). Each row
/// pairs the prediction with its gold form looked up in `gold`; a form with
/// no gold entry renders `-`. For the correct-predictions listing, pass the
/// bucket itself as `gold`.
///
/// Predictions without a cached signature (per-item trace failures) are
/// omitted; they are reported separately.
pub fn render_example_listing(
    table: &SignatureTable,
    bucket: &Bucket,
    gold: &Bucket,
    outcome: Outcome,
) -> String {
    // Group predictions by their cached signature string.
    let mut groups: Vec<(&SignatureRow, Vec<&crate::store::Prediction>)> = Vec::new();
    for row in table.rows() {
        let members: Vec<&crate::store::Prediction> = bucket
            .iter()
            .filter(|p| {
                p.signature
                    .as_ref()
                    .is_some_and(|s| s.to_string() == row.signature)
            })
            .collect();
        if !members.is_empty() {
            groups.push((row, members));
        }
    }

    let sort_count = |row: &SignatureRow| match outcome {
        Outcome::Correct => row.correct,
        Outcome::Incorrect => row.incorrect,
    };
    groups.sort_by(|(a, _), (b, _)| {
        sort_count(a)
            .cmp(&sort_count(b))
            .then_with(|| a.signature.cmp(&b.signature))
    });

    let mut out = String::new();
    for (idx, (row, members)) in groups.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(&format!("signature\t{}\n", row.signature));
        out.push_str("underlying\tpredicted\tgold\n");
        for p in members {
            let gold_surface = gold.get(&p.underlying).map_or("-", |g| g.surface.as_str());
            out.push_str(&format!("{}\t{}\t{}\n", p.underlying, p.surface, gold_surface));
        }
    }
    out
}

/// JSON form of the count table, with explicit per-row and grand totals.
#[derive(Debug, Serialize)]
pub struct CountReport<'a> {
    pub rows: Vec<CountReportRow<'a>>,
    pub correct_total: u64,
    pub incorrect_total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_order: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trace_failures: Vec<&'a TraceFailure>,
}

#[derive(Debug, Serialize)]
pub struct CountReportRow<'a> {
    pub signature: &'a str,
    pub correct: u64,
    pub incorrect: u64,
    pub total: u64,
}

pub fn count_report<'a>(
    table: &'a SignatureTable,
    rule_order: Option<&'a [String]>,
    failures: &'a [TraceFailure],
) -> CountReport<'a> {
    CountReport {
        rows: table
            .rows()
            .map(|r| CountReportRow {
                signature: &r.signature,
                correct: r.correct,
                incorrect: r.incorrect,
                total: r.total(),
            })
            .collect(),
        correct_total: table.correct_total(),
        incorrect_total: table.incorrect_total(),
        rule_order,
        trace_failures: failures.iter().collect(),
    }
}
