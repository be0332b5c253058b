use phonotab_rules::Cascade;
use phonotab_tabulate::{reconcile, tabulate, Bucket};
use proptest::prelude::*;

fn cascade_source() -> &'static str {
    "rule devoice: b -> p / _ #\n\
     rule raise: a -> ə\n\
     rule apocope: ə -> 0 / _ #\n"
}

fn form() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[abkpst]{1,6}").unwrap()
}

fn pairs(max: usize) -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::vec((form(), form()), 0..=max)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn counts_are_conserved_across_signatures(
        correct_pairs in pairs(12),
        incorrect_pairs in pairs(12),
    ) {
        let cascade = Cascade::readrules(cascade_source()).expect("parse");
        let mut correct = Bucket::from_pairs(correct_pairs);
        let mut incorrect = Bucket::from_pairs(incorrect_pairs);
        // Keep the bucket invariant: an underlying form may not be in both.
        let shared: Vec<String> = correct
            .iter()
            .filter(|p| incorrect.contains(&p.underlying))
            .map(|p| p.underlying.clone())
            .collect();
        for u in shared {
            incorrect.remove(&u);
        }

        let t = tabulate(&cascade, &mut correct, &mut incorrect).expect("tabulate");
        prop_assert!(t.failures.is_empty());
        prop_assert_eq!(t.table.correct_total() as usize, correct.len());
        prop_assert_eq!(t.table.incorrect_total() as usize, incorrect.len());
    }

    #[test]
    fn reconciliation_is_sound_and_idempotent(
        correct_pairs in pairs(8),
        missed_pairs in pairs(8),
        incorrect_pairs in pairs(8),
    ) {
        let correct = Bucket::from_pairs(correct_pairs);
        let missed = Bucket::from_pairs(missed_pairs);
        let incorrect = Bucket::from_pairs(incorrect_pairs);

        let once = reconcile(&correct, &missed, &incorrect);

        // Soundness: every form that met the migration condition moved.
        for p in incorrect.iter() {
            let matched = missed
                .get(&p.underlying)
                .is_some_and(|g| g.surface == p.surface);
            if matched {
                let moved = once.correct.get(&p.underlying).expect("moved to correct");
                prop_assert_eq!(&moved.surface, &p.surface);
                prop_assert!(!once.incorrect.contains(&p.underlying));
                prop_assert!(!once.missed.contains(&p.underlying));
            } else {
                prop_assert!(once.incorrect.contains(&p.underlying));
            }
        }

        // Idempotence: reconciling the output again changes nothing.
        let twice = reconcile(&once.correct, &once.missed, &once.incorrect);
        prop_assert_eq!(&twice.correct, &once.correct);
        prop_assert_eq!(&twice.missed, &once.missed);
        prop_assert_eq!(&twice.incorrect, &once.incorrect);
        prop_assert!(twice.moved.is_empty());
    }
}
