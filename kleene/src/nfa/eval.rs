//! Incremental NFA stepping, split out from whole-string [`super::Nfa::accepts`]
//! so a caller can feed input one symbol at a time (used by the CLI's
//! `batch` command to report how many symbols were consumed before a
//! rejection).

use super::Nfa;
use std::collections::BTreeSet;

/// Holds the current set of live states for one simulation run.
pub struct NfaEvaluator<'a> {
    nfa: &'a Nfa,
    current: BTreeSet<usize>,
}

impl<'a> From<&'a Nfa> for NfaEvaluator<'a> {
    fn from(nfa: &'a Nfa) -> Self {
        let current = nfa.epsilon_closure(&BTreeSet::from([nfa.start]));
        NfaEvaluator { nfa, current }
    }
}

impl<'a> NfaEvaluator<'a> {
    pub fn is_accepting(&self) -> bool {
        self.current.iter().any(|&s| self.nfa.states[s].accepting)
    }

    pub fn current_states(&self) -> &BTreeSet<usize> {
        &self.current
    }

    /// Advance by one input symbol. Returns `false` (and leaves `self` in
    /// the empty-set "dead" state) if there is no transition on `symbol`.
    pub fn step(&mut self, symbol: char) -> bool {
        let targets: BTreeSet<usize> = self
            .current
            .iter()
            .filter_map(|&s| self.nfa.states[s].transitions.get(&symbol))
            .flatten()
            .copied()
            .collect();
        if targets.is_empty() {
            self.current = BTreeSet::new();
            return false;
        }
        self.current = self.nfa.epsilon_closure(&targets);
        true
    }

    /// Step through every symbol of `input`, stopping early (and reporting
    /// how many symbols were consumed) if the automaton dies.
    pub fn step_all(&mut self, input: &str) -> usize {
        let mut consumed = 0;
        for symbol in input.chars() {
            if !self.step(symbol) {
                break;
            }
            consumed += 1;
        }
        consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build_ast;
    use crate::parser::infix_to_postfix;

    fn nfa_of(expr: &str) -> Nfa {
        Nfa::from_ast(&build_ast(&infix_to_postfix(expr).unwrap()).unwrap())
    }

    #[test]
    fn step_mirrors_whole_string_accept() {
        let nfa = nfa_of("(a|b)*abb");
        let mut eval = NfaEvaluator::from(&nfa);
        let consumed = eval.step_all("aabb");
        assert_eq!(consumed, 4);
        assert!(eval.is_accepting());
    }

    #[test]
    fn dead_end_reports_partial_consumption() {
        let nfa = nfa_of("ab");
        let mut eval = NfaEvaluator::from(&nfa);
        let consumed = eval.step_all("ac");
        assert_eq!(consumed, 1);
        assert!(!eval.is_accepting());
    }
}
