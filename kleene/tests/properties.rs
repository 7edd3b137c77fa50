//! Property-based tests for cross-stage invariants of the compiler
//! pipeline, run over small randomly generated regexes and strings over a
//! two-letter alphabet.

use kleene::Regex;
use proptest::prelude::*;

/// A tiny regex grammar over `{a, b}`, generated recursively so every
/// produced string is guaranteed to parse (this is deliberately simpler
/// than the full surface syntax under test — it only needs to *generate*
/// valid input, not exercise every corner of the parser).
fn arb_regex() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![Just("a".to_string()), Just("b".to_string()), Just("ε".to_string())];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("{l}{r}")),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("({l}|{r})")),
            inner.clone().prop_map(|x| format!("({x})*")),
        ]
    })
}

fn arb_string() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just('a'), Just('b')], 0..8)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn cross_stage_language_equivalence(expr in arb_regex(), input in arb_string()) {
        let compiled = Regex::compile(&expr).unwrap();
        let nfa_verdict = compiled.nfa().accepts(&input);
        let dfa_verdict = compiled.dfa().accepts(&input);
        let min_verdict = compiled.minimized_dfa().accepts(&input);
        prop_assert_eq!(nfa_verdict, dfa_verdict);
        prop_assert_eq!(dfa_verdict, min_verdict);
    }

    #[test]
    fn minimality_never_increases_state_count(expr in arb_regex()) {
        let compiled = Regex::compile(&expr).unwrap();
        prop_assert!(compiled.minimized_dfa().states.len() <= compiled.dfa().states.len());
    }

    #[test]
    fn minimizing_an_already_minimal_dfa_is_a_no_op(expr in arb_regex()) {
        let compiled = Regex::compile(&expr).unwrap();
        let once = compiled.minimized_dfa();
        let twice = once.minimize();
        prop_assert_eq!(once.states.len(), twice.states.len());
    }

    #[test]
    fn determinism_of_repeated_compilation(expr in arb_regex()) {
        let a = Regex::compile(&expr).unwrap();
        let b = Regex::compile(&expr).unwrap();
        prop_assert_eq!(a.dfa().states.len(), b.dfa().states.len());
        prop_assert_eq!(a.minimized_dfa().states.len(), b.minimized_dfa().states.len());
    }

    #[test]
    fn plus_desugaring_law(expr in arb_regex(), input in arb_string()) {
        let plus = Regex::compile(&format!("({expr})+")).unwrap();
        let expanded = Regex::compile(&format!("({expr})({expr})*")).unwrap();
        prop_assert_eq!(plus.accepts(&input), expanded.accepts(&input));
    }

    #[test]
    fn question_desugaring_law(expr in arb_regex(), input in arb_string()) {
        let question = Regex::compile(&format!("({expr})?")).unwrap();
        let expanded = Regex::compile(&format!("(({expr})|ε)")).unwrap();
        prop_assert_eq!(question.accepts(&input), expanded.accepts(&input));
    }

    #[test]
    fn epsilon_neutrality(expr in arb_regex(), input in arb_string()) {
        let r = Regex::compile(&expr).unwrap();
        let suffixed = Regex::compile(&format!("({expr})ε")).unwrap();
        let prefixed = Regex::compile(&format!("ε({expr})")).unwrap();
        prop_assert_eq!(r.accepts(&input), suffixed.accepts(&input));
        prop_assert_eq!(r.accepts(&input), prefixed.accepts(&input));
    }

    #[test]
    fn normalization_is_idempotent_on_ascii_input(expr in arb_regex()) {
        let once = kleene::parser::normalize(&expr);
        let twice = kleene::parser::normalize(&once);
        prop_assert_eq!(once, twice);
    }
}

/// Differential check against the `regex` crate for the subset of syntax
/// both engines understand (no Kleene-star-only shorthand ambiguity here:
/// just literal concatenation and alternation, which both engines agree on
/// byte-for-byte).
#[test]
fn agrees_with_the_regex_crate_on_plain_alternation() {
    let reference = regex::Regex::new(r"^(cat|dog|bird)$").unwrap();
    let compiled = Regex::compile("cat|dog|bird").unwrap();
    for candidate in ["cat", "dog", "bird", "fish", "", "catdog"] {
        assert_eq!(
            reference.is_match(candidate),
            compiled.accepts(candidate),
            "candidate {candidate:?}"
        );
    }
}
