//! Reconciliation of false negatives
//!
//! The external harness compares predicted and gold forms with a strict check,
//! so a "wrongly produced" form can coincidentally equal the gold form it
//! recorded under "missed" (e.g. a normalization mismatch on its side). Those
//! predictions are really correct; this pass migrates them before tabulation.
//!
//! The pass is a pure partition: it produces three new buckets rather than
//! mutating its inputs. Running it on its own output is a no-op: safe, just
//! unnecessary.

use crate::store::Bucket;
use serde::{Deserialize, Serialize};

/// A form migrated into the correct bucket, with the surface forms it carried
/// in both source buckets. The migration condition makes the two equal today;
/// keeping both fields keeps the diagnostic format stable if the equivalence
/// is ever relaxed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovedForm {
    pub underlying: String,
    pub produced: String,
    pub gold: String,
}

#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub correct: Bucket,
    pub missed: Bucket,
    pub incorrect: Bucket,
    /// Side table of what was "fixed", for diagnostic reporting only.
    pub moved: Vec<MovedForm>,
}

/// For every underlying form present in both `incorrect` and `missed` with
/// string-equal surface forms, move it into `correct` (using the surface form
/// from `incorrect`) and drop it from the other two. Everything else passes
/// through untouched.
pub fn reconcile(correct: &Bucket, missed: &Bucket, incorrect: &Bucket) -> Reconciliation {
    let mut new_correct = correct.clone();
    let mut new_missed = missed.clone();
    let mut new_incorrect = incorrect.clone();
    let mut moved = Vec::new();

    for prediction in incorrect.iter() {
        let Some(gold) = missed.get(&prediction.underlying) else {
            continue;
        };
        if gold.surface != prediction.surface {
            continue;
        }
        tracing::debug!(
            underlying = %prediction.underlying,
            surface = %prediction.surface,
            "reconciled false negative into correct bucket"
        );
        new_correct.insert(prediction.underlying.clone(), prediction.surface.clone());
        new_missed.remove(&prediction.underlying);
        new_incorrect.remove(&prediction.underlying);
        moved.push(MovedForm {
            underlying: prediction.underlying.clone(),
            produced: prediction.surface.clone(),
            gold: gold.surface.clone(),
        });
    }

    Reconciliation {
        correct: new_correct,
        missed: new_missed,
        incorrect: new_incorrect,
        moved,
    }
}

/// Render the moved-forms side table in the bucket line format:
/// `underlying<TAB>produced<TAB>gold`, underlying-form order.
pub fn render_moved(moved: &[MovedForm]) -> String {
    let mut rows: Vec<&MovedForm> = moved.iter().collect();
    rows.sort_by(|a, b| a.underlying.cmp(&b.underlying));
    let mut out = String::new();
    for m in rows {
        out.push_str(&format!("{}\t{}\t{}\n", m.underlying, m.produced, m.gold));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrates_matching_forms_into_correct() {
        let correct = Bucket::from_pairs([("gat", "gat")]);
        let missed = Bucket::from_pairs([("gos", "gok")]);
        let incorrect = Bucket::from_pairs([("gos", "gok")]);

        let r = reconcile(&correct, &missed, &incorrect);
        assert_eq!(r.correct.len(), 2);
        assert_eq!(r.correct.get("gos").unwrap().surface, "gok");
        assert!(r.missed.is_empty());
        assert!(r.incorrect.is_empty());
        assert_eq!(
            r.moved,
            vec![MovedForm {
                underlying: "gos".to_string(),
                produced: "gok".to_string(),
                gold: "gok".to_string(),
            }]
        );
    }

    #[test]
    fn leaves_non_matching_forms_alone() {
        let correct = Bucket::new();
        let missed = Bucket::from_pairs([("gos", "gok"), ("mar", "maɾ")]);
        let incorrect = Bucket::from_pairs([("gos", "goz"), ("pel", "pel")]);

        let r = reconcile(&correct, &missed, &incorrect);
        assert!(r.correct.is_empty());
        assert_eq!(r.missed.len(), 2);
        assert_eq!(r.incorrect.len(), 2);
        assert!(r.moved.is_empty());
    }

    #[test]
    fn reconciling_twice_equals_reconciling_once() {
        let correct = Bucket::from_pairs([("gat", "gat")]);
        let missed = Bucket::from_pairs([("gos", "gok"), ("mar", "maɾ")]);
        let incorrect = Bucket::from_pairs([("gos", "gok"), ("pel", "peʎ")]);

        let once = reconcile(&correct, &missed, &incorrect);
        let twice = reconcile(&once.correct, &once.missed, &once.incorrect);
        assert_eq!(once.correct, twice.correct);
        assert_eq!(once.missed, twice.missed);
        assert_eq!(once.incorrect, twice.incorrect);
        assert!(twice.moved.is_empty());
    }

    #[test]
    fn inputs_are_not_mutated() {
        let correct = Bucket::new();
        let missed = Bucket::from_pairs([("gos", "gok")]);
        let incorrect = Bucket::from_pairs([("gos", "gok")]);

        let _ = reconcile(&correct, &missed, &incorrect);
        assert!(missed.contains("gos"));
        assert!(incorrect.contains("gos"));
    }

    #[test]
    fn renders_moved_side_table_sorted() {
        let moved = vec![
            MovedForm {
                underlying: "z".into(),
                produced: "z".into(),
                gold: "z".into(),
            },
            MovedForm {
                underlying: "a".into(),
                produced: "b".into(),
                gold: "b".into(),
            },
        ];
        assert_eq!(render_moved(&moved), "a\tb\tb\nz\tz\tz\n");
    }
}
