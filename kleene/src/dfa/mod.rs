//! Deterministic finite automata: the DFA data model, the DFA simulator
//! and partition-refinement minimization.

pub mod eval;

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A single DFA state. `nfa_states` retains which NFA states this state
/// represents, for traceability back through the subset construction; it is
/// left empty on states produced by minimization, which aggregate several
/// determinized states and so have no single originating NFA-state set.
#[derive(Debug, Clone)]
pub struct DfaState {
    pub id: usize,
    pub nfa_states: BTreeSet<usize>,
    pub accepting: bool,
    pub transitions: BTreeMap<char, usize>,
}

/// Invariant: for every state and symbol, `transitions` holds at most one
/// target (total function into `Option<usize>`); the DFA need not be total.
#[derive(Debug, Clone)]
pub struct Dfa {
    pub states: Vec<DfaState>,
    pub start: usize,
    pub alphabet: BTreeSet<char>,
}

impl Dfa {
    /// `simulate(dfa, input)`: walk the deterministic transition function,
    /// rejecting immediately on an undefined transition.
    pub fn accepts(&self, input: &str) -> bool {
        let mut current = self.start;
        for symbol in input.chars() {
            match self.states[current].transitions.get(&symbol) {
                Some(&next) => current = next,
                None => return false,
            }
        }
        self.states[current].accepting
    }

    /// Partition-refinement minimization. Returns a new, independent DFA;
    /// `self` is left untouched.
    pub fn minimize(&self) -> Dfa {
        let (accepting, non_accepting): (Vec<usize>, Vec<usize>) = self
            .states
            .iter()
            .map(|s| s.id)
            .partition(|&id| self.states[id].accepting);

        let mut classes: Vec<BTreeSet<usize>> = Vec::new();
        if !accepting.is_empty() {
            classes.push(accepting.into_iter().collect());
        }
        if !non_accepting.is_empty() {
            classes.push(non_accepting.into_iter().collect());
        }

        loop {
            let class_of = Self::class_index(&classes, self.states.len());
            let mut changed = false;
            let mut next_classes: Vec<BTreeSet<usize>> = Vec::new();

            for class in &classes {
                let mut groups: HashMap<Vec<Option<usize>>, BTreeSet<usize>> = HashMap::new();
                for &state in class {
                    let signature: Vec<Option<usize>> = self
                        .alphabet
                        .iter()
                        .map(|symbol| {
                            self.states[state]
                                .transitions
                                .get(symbol)
                                .map(|&target| class_of[target])
                        })
                        .collect();
                    groups.entry(signature).or_default().insert(state);
                }
                if groups.len() > 1 {
                    changed = true;
                }
                next_classes.extend(groups.into_values());
            }

            classes = next_classes;
            if !changed {
                break;
            }
        }

        self.build_from_classes(classes)
    }

    fn class_index(classes: &[BTreeSet<usize>], state_count: usize) -> Vec<usize> {
        let mut index = vec![0usize; state_count];
        for (class_idx, class) in classes.iter().enumerate() {
            for &state in class {
                index[state] = class_idx;
            }
        }
        index
    }

    fn build_from_classes(&self, classes: Vec<BTreeSet<usize>>) -> Dfa {
        let class_of = Self::class_index(&classes, self.states.len());

        let mut new_states: Vec<DfaState> = classes
            .iter()
            .enumerate()
            .map(|(idx, class)| {
                let representative = *class.iter().next().expect("classes are never empty");
                let transitions = self.states[representative]
                    .transitions
                    .iter()
                    .map(|(&symbol, &target)| (symbol, class_of[target]))
                    .collect();
                DfaState {
                    id: idx,
                    nfa_states: BTreeSet::new(),
                    accepting: class.iter().any(|&s| self.states[s].accepting),
                    transitions,
                }
            })
            .collect();

        new_states.sort_by_key(|s| s.id);

        Dfa {
            start: class_of[self.start],
            states: new_states,
            alphabet: self.alphabet.clone(),
        }
    }
}
