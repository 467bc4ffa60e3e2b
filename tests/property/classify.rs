use proptest::prelude::*;
use well_known_bots::pattern::{CompiledPatternSet, classify};
use well_known_bots::types::PatternSet;

/// Small always-valid regex sources over a tiny alphabet, so that random
/// candidates hit and miss them often.
fn pattern() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ab]{1,3}",
        "[ab]{1,2}".prop_map(|s| format!("^{}", s)),
        "[ab]{1,2}".prop_map(|s| format!("{}$", s)),
        Just("a|b".to_string()),
        Just("(ab)+".to_string()),
    ]
}

fn patterns(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(pattern(), 0..=max)
}

fn candidate() -> impl Strategy<Value = String> {
    "[ab]{0,6}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // classify is deterministic
    #[test]
    fn classify_is_pure(accepted in patterns(3), forbidden in patterns(3), s in candidate()) {
        let set = PatternSet { accepted, forbidden };
        let first = classify(&set, &s).unwrap();
        prop_assert_eq!(classify(&set, &s).unwrap(), first);
        prop_assert_eq!(CompiledPatternSet::compile(&set).unwrap().classify(&s), first);
    }

    // Adding a forbidden pattern can only turn true into false
    #[test]
    fn monotonic_in_forbidden(
        accepted in patterns(3),
        forbidden in patterns(3),
        extra in pattern(),
        s in candidate(),
    ) {
        let before = classify(&PatternSet { accepted: accepted.clone(), forbidden: forbidden.clone() }, &s).unwrap();
        let mut more = forbidden;
        more.push(extra);
        let after = classify(&PatternSet { accepted, forbidden: more }, &s).unwrap();
        prop_assert!(!after || before);
    }

    // Adding an accepted pattern can only turn true into false
    #[test]
    fn monotonic_in_accepted(
        accepted in patterns(3),
        forbidden in patterns(3),
        extra in pattern(),
        s in candidate(),
    ) {
        let before = classify(&PatternSet { accepted: accepted.clone(), forbidden: forbidden.clone() }, &s).unwrap();
        let mut more = accepted;
        more.push(extra);
        let after = classify(&PatternSet { accepted: more, forbidden }, &s).unwrap();
        prop_assert!(!after || before);
    }

    // classify == all(accepted) && !any(forbidden), checked regex by regex
    #[test]
    fn conjunction_and_negated_disjunction(accepted in patterns(3), forbidden in patterns(3), s in candidate()) {
        let hits = |p: &String| regress::Regex::new(p).unwrap().find(&s).is_some();
        let expected = accepted.iter().all(hits) && !forbidden.iter().any(hits);
        prop_assert_eq!(classify(&PatternSet { accepted, forbidden }, &s).unwrap(), expected);
    }

    // explain agrees with classify
    #[test]
    fn explain_agrees_with_classify(accepted in patterns(3), forbidden in patterns(3), s in candidate()) {
        let compiled = CompiledPatternSet::compile(&PatternSet { accepted, forbidden }).unwrap();
        prop_assert_eq!(compiled.explain(&s).is_match(), compiled.classify(&s));
    }
}
