use phonotab_rules::{trace, Cascade};
use proptest::prelude::*;

fn cascade_source() -> &'static str {
    "rule devoice: b -> p / _ #\n\
     rule raise: a -> ə\n\
     rule spirantize: d -> ð / a _\n\
     rule apocope: ə -> 0 / _ #\n"
}

fn word() -> impl Strategy<Value = String> {
    // Words over the cascade's own segment inventory, plus a few bystanders.
    proptest::string::string_regex("[abdkpəsð]{0,10}").unwrap()
}

/// `needle` appears in `haystack` in order (possibly with gaps).
fn is_ordered_subsequence(needle: &[String], haystack: &[String]) -> bool {
    let mut it = haystack.iter();
    needle.iter().all(|n| it.any(|h| h == n))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn signature_is_an_ordered_subsequence_of_the_cascade(w in word()) {
        let cascade = Cascade::readrules(cascade_source()).expect("parse");
        let t = trace(&cascade, &w).expect("trace");
        prop_assert!(t.fired.len() <= cascade.len());
        prop_assert!(is_ordered_subsequence(t.fired.names(), &cascade.rule_order()));
    }

    #[test]
    fn tracing_twice_yields_identical_results(w in word()) {
        let cascade = Cascade::readrules(cascade_source()).expect("parse");
        let a = trace(&cascade, &w).expect("trace");
        let b = trace(&cascade, &w).expect("trace");
        prop_assert_eq!(a, b);
    }

    #[test]
    fn fired_rules_never_repeat(w in word()) {
        let cascade = Cascade::readrules(cascade_source()).expect("parse");
        let t = trace(&cascade, &w).expect("trace");
        let mut names = t.fired.names().to_vec();
        names.dedup();
        prop_assert_eq!(names.len(), t.fired.len());
    }

    #[test]
    fn empty_cascade_is_the_identity(w in word()) {
        let cascade = Cascade::empty();
        let t = trace(&cascade, &w).expect("trace");
        prop_assert_eq!(t.surface, w);
        prop_assert!(t.fired.is_empty());
    }
}
