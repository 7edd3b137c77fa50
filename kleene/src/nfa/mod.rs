//! Nondeterministic finite automata: Thompson construction from an AST,
//! the NFA data model, the NFA simulator, and the subset-construction
//! determinizer.
//!
//! States live in an arena — `Vec<NfaState>` indexed by `usize` — rather
//! than a pointer graph, so the (generally cyclic) state graph never fights
//! Rust's ownership rules.

pub mod eval;

use crate::ast::{BinaryOp, Leaf, Node, UnaryOp};
use crate::dfa::{Dfa, DfaState};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

/// A single NFA state: an id, a finality flag, a transition table keyed by
/// input symbol, and a separate set of epsilon targets.
#[derive(Debug, Clone)]
pub struct NfaState {
    pub id: usize,
    pub accepting: bool,
    pub transitions: BTreeMap<char, BTreeSet<usize>>,
    pub epsilon_transitions: BTreeSet<usize>,
}

impl NfaState {
    fn new(id: usize) -> Self {
        NfaState {
            id,
            accepting: false,
            transitions: BTreeMap::new(),
            epsilon_transitions: BTreeSet::new(),
        }
    }
}

/// A nondeterministic finite automaton built by Thompson's construction.
///
/// Invariant: every state in `states` is reachable from `start`; `alphabet`
/// never contains `ε`.
#[derive(Debug, Clone)]
pub struct Nfa {
    pub states: Vec<NfaState>,
    pub start: usize,
    pub alphabet: BTreeSet<char>,
}

/// A start/accept pair threaded through the recursive construction; exactly
/// one of each per constructed subexpression.
struct Fragment {
    start: usize,
    accept: usize,
}

struct Builder {
    states: Vec<NfaState>,
}

impl Builder {
    fn fresh(&mut self) -> usize {
        let id = self.states.len();
        self.states.push(NfaState::new(id));
        id
    }

    fn add_epsilon(&mut self, from: usize, to: usize) {
        self.states[from].epsilon_transitions.insert(to);
    }

    fn add_transition(&mut self, from: usize, symbol: char, to: usize) {
        self.states[from].transitions.entry(symbol).or_default().insert(to);
    }

    /// Construct a fragment for one AST node, recursively.
    fn build(&mut self, node: &Node) -> Fragment {
        match node {
            Node::Leaf { symbol: Leaf::Epsilon, .. } => {
                let start = self.fresh();
                let accept = self.fresh();
                self.add_epsilon(start, accept);
                Fragment { start, accept }
            }
            Node::Leaf { symbol: Leaf::Char(c), .. } => {
                let start = self.fresh();
                let accept = self.fresh();
                self.add_transition(start, *c, accept);
                Fragment { start, accept }
            }
            Node::Binary { op: BinaryOp::Concat, left, right, .. } => {
                let l = self.build(left);
                let r = self.build(right);
                self.add_epsilon(l.accept, r.start);
                self.states[l.accept].accepting = false;
                Fragment { start: l.start, accept: r.accept }
            }
            Node::Binary { op: BinaryOp::Union, left, right, .. } => {
                let l = self.build(left);
                let r = self.build(right);
                let start = self.fresh();
                let accept = self.fresh();
                self.add_epsilon(start, l.start);
                self.add_epsilon(start, r.start);
                self.add_epsilon(l.accept, accept);
                self.add_epsilon(r.accept, accept);
                self.states[l.accept].accepting = false;
                self.states[r.accept].accepting = false;
                Fragment { start, accept }
            }
            Node::Unary { op: UnaryOp::Star, child, .. } => {
                let c = self.build(child);
                let start = self.fresh();
                let accept = self.fresh();
                self.add_epsilon(start, accept);
                self.add_epsilon(start, c.start);
                self.add_epsilon(c.accept, c.start);
                self.add_epsilon(c.accept, accept);
                self.states[c.accept].accepting = false;
                Fragment { start, accept }
            }
        }
    }
}

impl Nfa {
    /// Thompson-construct an NFA from an AST.
    pub fn from_ast(ast: &Node) -> Nfa {
        let mut builder = Builder { states: Vec::new() };
        let fragment = builder.build(ast);
        builder.states[fragment.accept].accepting = true;

        let alphabet = builder
            .states
            .iter()
            .flat_map(|s| s.transitions.keys().copied())
            .collect();

        Nfa {
            states: builder.states,
            start: fragment.start,
            alphabet,
        }
    }

    /// The least fixed point of `S ∪ ⋃ δ(s, ε)`, computed by worklist.
    pub fn epsilon_closure(&self, states: &BTreeSet<usize>) -> BTreeSet<usize> {
        let mut closure = states.clone();
        let mut worklist: VecDeque<usize> = states.iter().copied().collect();
        while let Some(s) = worklist.pop_front() {
            for &t in &self.states[s].epsilon_transitions {
                if closure.insert(t) {
                    worklist.push_back(t);
                }
            }
        }
        closure
    }

    fn accepts_any(&self, states: &BTreeSet<usize>) -> bool {
        states.iter().any(|&s| self.states[s].accepting)
    }

    /// Whole-string membership test: `simulate(nfa, input)`.
    pub fn accepts(&self, input: &str) -> bool {
        let mut current = self.epsilon_closure(&BTreeSet::from([self.start]));
        for symbol in input.chars() {
            let targets: BTreeSet<usize> = current
                .iter()
                .filter_map(|&s| self.states[s].transitions.get(&symbol))
                .flatten()
                .copied()
                .collect();
            if targets.is_empty() {
                return false;
            }
            current = self.epsilon_closure(&targets);
        }
        self.accepts_any(&current)
    }

    /// Canonical memo key for a set of NFA state ids: a sorted tuple, so
    /// that identical reachable sets always map to the same DFA state.
    fn canonical_key(states: &BTreeSet<usize>) -> Vec<usize> {
        states.iter().copied().collect()
    }

    /// Subset construction. The worklist doubles as the visited set via the
    /// `memo` map: a state is enqueued exactly once, the moment its key is
    /// first seen, so there is no separate "processed" set to keep in sync.
    pub fn to_dfa(&self) -> Dfa {
        let mut dfa_states: Vec<DfaState> = Vec::new();
        let mut memo: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut worklist: VecDeque<usize> = VecDeque::new();

        let start_set = self.epsilon_closure(&BTreeSet::from([self.start]));
        let start_key = Self::canonical_key(&start_set);
        memo.insert(start_key, 0);
        dfa_states.push(DfaState {
            id: 0,
            nfa_states: start_set.clone(),
            accepting: self.accepts_any(&start_set),
            transitions: BTreeMap::new(),
        });
        worklist.push_back(0);

        while let Some(d_idx) = worklist.pop_front() {
            let set = dfa_states[d_idx].nfa_states.clone();
            for &symbol in &self.alphabet {
                let moved: BTreeSet<usize> = set
                    .iter()
                    .filter_map(|&s| self.states[s].transitions.get(&symbol))
                    .flatten()
                    .copied()
                    .collect();
                if moved.is_empty() {
                    continue;
                }
                let closure = self.epsilon_closure(&moved);
                let key = Self::canonical_key(&closure);
                let target = match memo.get(&key) {
                    Some(&idx) => idx,
                    None => {
                        let idx = dfa_states.len();
                        memo.insert(key, idx);
                        dfa_states.push(DfaState {
                            id: idx,
                            accepting: self.accepts_any(&closure),
                            nfa_states: closure,
                            transitions: BTreeMap::new(),
                        });
                        worklist.push_back(idx);
                        idx
                    }
                };
                dfa_states[d_idx].transitions.insert(symbol, target);
            }
        }

        Dfa {
            states: dfa_states,
            start: 0,
            alphabet: self.alphabet.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build_ast;
    use crate::parser::infix_to_postfix;

    fn nfa_of(expr: &str) -> Nfa {
        let postfix = infix_to_postfix(expr).unwrap();
        let ast = build_ast(&postfix).unwrap();
        Nfa::from_ast(&ast)
    }

    #[test]
    fn exactly_one_accept_state() {
        let nfa = nfa_of("(a|b)*abb");
        let accepting: Vec<_> = nfa.states.iter().filter(|s| s.accepting).collect();
        assert_eq!(accepting.len(), 1);
    }

    #[test]
    fn alphabet_excludes_epsilon() {
        let nfa = nfa_of("a|ε");
        assert!(!nfa.alphabet.contains(&'\u{03B5}'));
        assert_eq!(nfa.alphabet, BTreeSet::from(['a']));
    }

    #[test]
    fn scenario_union() {
        let nfa = nfa_of("a|b");
        assert!(!nfa.accepts(""));
        assert!(nfa.accepts("a"));
        assert!(nfa.accepts("b"));
        assert!(!nfa.accepts("ab"));
    }

    #[test]
    fn scenario_star_union_then_suffix() {
        let nfa = nfa_of("(a|b)*abb");
        assert!(nfa.accepts("abb"));
        assert!(nfa.accepts("aabb"));
        assert!(nfa.accepts("babb"));
        assert!(!nfa.accepts("ab"));
        assert!(!nfa.accepts(""));
    }

    #[test]
    fn scenario_kleene_star() {
        let nfa = nfa_of("a*");
        assert!(nfa.accepts(""));
        assert!(nfa.accepts("aaaa"));
        assert!(!nfa.accepts("ab"));
    }

    #[test]
    fn scenario_plus() {
        let nfa = nfa_of("(a|b)+");
        assert!(!nfa.accepts(""));
        assert!(nfa.accepts("a"));
        assert!(nfa.accepts("abba"));
    }

    #[test]
    fn scenario_optional_chain() {
        let nfa = nfa_of("0?(1?)?0*");
        assert!(nfa.accepts(""));
        assert!(nfa.accepts("0"));
        assert!(nfa.accepts("10"));
        assert!(nfa.accepts("010"));
        assert!(!nfa.accepts("11"));
    }

    #[test]
    fn scenario_escaped_parens() {
        let nfa = nfa_of(r"\(a\)");
        assert!(nfa.accepts("(a)"));
        assert!(!nfa.accepts("a"));
    }

    #[test]
    fn subset_construction_produces_deterministic_transitions() {
        let nfa = nfa_of("(a|b)*abb");
        let dfa = nfa.to_dfa();
        for state in &dfa.states {
            // BTreeMap<char, usize> is deterministic by construction; this
            // asserts there's exactly one target per symbol reachable.
            assert!(state.transitions.len() <= dfa.alphabet.len());
        }
    }
}
