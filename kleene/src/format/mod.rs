//! The automaton interchange format: a plain-text table naming a
//! start state, accepting states and a transition function, parsed with
//! `nom` and serialized back through the same shape described as the
//! visualization collaborator's node/edge enumeration.
//!
//! Header line: alphabet symbols, space-separated; an NFA header carries a
//! trailing `ε` column. Each state line: `name flags col...`, where `flags`
//! is `-`, `>` (initial), `*` (accepting) or `>*` (both), and each `col` is
//! `-` (no transition) or a comma-separated list of target state names (an
//! NFA cell may list several; a DFA cell names at most one).

pub mod error;

use crate::dfa::{Dfa, DfaState};
use crate::nfa::{Nfa, NfaState};
use error::FormatError;
use nom::bytes::complete::is_not;
use nom::character::complete::space1;
use nom::combinator::all_consuming;
use nom::multi::separated_list1;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

pub struct ParsedState {
    pub name: String,
    pub initial: bool,
    pub accepting: bool,
    /// One entry per alphabet column, plus a trailing epsilon column if the
    /// header declared one.
    pub transitions: Vec<Vec<String>>,
}

pub struct ParsedAutomaton {
    pub alphabet: Vec<String>,
    pub has_epsilon_column: bool,
    pub states: Vec<ParsedState>,
}

fn tokenize_line(line: &str) -> Result<Vec<&str>, FormatError> {
    let trimmed = line.trim();
    all_consuming::<_, _, nom::error::Error<&str>, _>(separated_list1(space1, is_not(" \t")))(
        trimmed,
    )
        .map(|(_, tokens)| tokens)
        .map_err(|e| FormatError::Syntax(format!("{e}")))
}

/// Parse the header line and every state line of a table (shared by the NFA
/// and DFA interchange formats; the two differ only in how cells are
/// interpreted, handled by the `TryFrom` impls below).
pub fn parse_table(input: &str) -> Result<ParsedAutomaton, FormatError> {
    let mut lines = input
        .lines()
        .filter(|l| !l.trim().is_empty() && !l.trim().starts_with('#'));

    let header = lines
        .next()
        .ok_or_else(|| FormatError::Syntax("empty input".into()))?;
    let header_tokens = tokenize_line(header)?;
    let has_epsilon_column = header_tokens
        .last()
        .is_some_and(|t| *t == "ε" || *t == "eps");
    let alphabet: Vec<String> = if has_epsilon_column {
        header_tokens[..header_tokens.len() - 1]
            .iter()
            .map(|s| s.to_string())
            .collect()
    } else {
        header_tokens.iter().map(|s| s.to_string()).collect()
    };

    let mut seen = HashSet::new();
    for symbol in &alphabet {
        if symbol.chars().count() != 1 {
            return Err(FormatError::NotASingleChar(symbol.clone()));
        }
        if !seen.insert(symbol.clone()) {
            return Err(FormatError::DuplicateAlphabetSymbol(symbol.clone()));
        }
    }

    let expected_cols = alphabet.len() + has_epsilon_column as usize;
    let mut states = Vec::new();
    for line in lines {
        let tokens = tokenize_line(line)?;
        if tokens.len() < 2 {
            return Err(FormatError::Syntax(format!("malformed state line: {line:?}")));
        }
        let name = tokens[0].to_string();
        let flags = tokens[1];
        let initial = flags.contains('>');
        let accepting = flags.contains('*');
        let cells = &tokens[2..];
        if cells.len() != expected_cols {
            return Err(FormatError::WrongArity(name, cells.len(), expected_cols));
        }
        let transitions = cells
            .iter()
            .map(|cell| {
                if *cell == "-" {
                    Vec::new()
                } else {
                    cell.split(',').map(|s| s.to_string()).collect()
                }
            })
            .collect();
        states.push(ParsedState {
            name,
            initial,
            accepting,
            transitions,
        });
    }

    Ok(ParsedAutomaton {
        alphabet,
        has_epsilon_column,
        states,
    })
}

/// Every alphabet entry must be exactly one character. `parse_table` already
/// checks this for tables it parses itself, but `ParsedAutomaton`'s fields
/// are public, so a caller can build one by hand with a malformed alphabet;
/// the `TryFrom` impls re-check here rather than trust that invariant in.
fn single_chars(alphabet: &[String]) -> Result<Vec<char>, FormatError> {
    alphabet
        .iter()
        .map(|s| {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(FormatError::NotASingleChar(s.clone())),
            }
        })
        .collect()
}

fn name_index(states: &[ParsedState]) -> Result<HashMap<&str, usize>, FormatError> {
    let mut map = HashMap::new();
    for (i, s) in states.iter().enumerate() {
        if map.insert(s.name.as_str(), i).is_some() {
            return Err(FormatError::DuplicateStateName(s.name.clone()));
        }
    }
    Ok(map)
}

fn resolve_targets(
    state_name: &str,
    names: &[String],
    index: &HashMap<&str, usize>,
) -> Result<BTreeSet<usize>, FormatError> {
    names
        .iter()
        .map(|target| {
            index
                .get(target.as_str())
                .copied()
                .ok_or_else(|| FormatError::UnknownTarget(state_name.to_string(), target.clone()))
        })
        .collect()
}

impl TryFrom<ParsedAutomaton> for Nfa {
    type Error = FormatError;

    fn try_from(value: ParsedAutomaton) -> Result<Self, FormatError> {
        let ParsedAutomaton {
            alphabet,
            has_epsilon_column,
            states,
        } = value;
        let alphabet_chars = single_chars(&alphabet)?;
        let index = name_index(&states)?;

        let mut start = None;
        let mut nfa_states = Vec::with_capacity(states.len());
        for (i, s) in states.iter().enumerate() {
            if s.initial {
                if start.is_some() {
                    return Err(FormatError::MultipleInitialStates);
                }
                start = Some(i);
            }

            let mut transitions = BTreeMap::new();
            for (col, symbol) in alphabet_chars.iter().enumerate() {
                let targets = resolve_targets(&s.name, &s.transitions[col], &index)?;
                if !targets.is_empty() {
                    transitions.insert(*symbol, targets);
                }
            }
            let epsilon_transitions = if has_epsilon_column {
                resolve_targets(&s.name, &s.transitions[alphabet.len()], &index)?
            } else {
                BTreeSet::new()
            };

            nfa_states.push(NfaState {
                id: i,
                accepting: s.accepting,
                transitions,
                epsilon_transitions,
            });
        }

        Ok(Nfa {
            start: start.ok_or(FormatError::MissingInitialState)?,
            states: nfa_states,
            alphabet: alphabet_chars.into_iter().collect(),
        })
    }
}

impl TryFrom<ParsedAutomaton> for Dfa {
    type Error = FormatError;

    fn try_from(value: ParsedAutomaton) -> Result<Self, FormatError> {
        let ParsedAutomaton {
            alphabet,
            has_epsilon_column: _,
            states,
        } = value;
        let alphabet_chars = single_chars(&alphabet)?;
        let index = name_index(&states)?;

        let mut start = None;
        let mut dfa_states = Vec::with_capacity(states.len());
        for (i, s) in states.iter().enumerate() {
            if s.initial {
                if start.is_some() {
                    return Err(FormatError::MultipleInitialStates);
                }
                start = Some(i);
            }

            let mut transitions = BTreeMap::new();
            for (col, symbol) in alphabet_chars.iter().enumerate() {
                let targets = resolve_targets(&s.name, &s.transitions[col], &index)?;
                match targets.len() {
                    0 => {}
                    1 => {
                        transitions.insert(*symbol, *targets.iter().next().unwrap());
                    }
                    _ => return Err(FormatError::NotDeterministic(s.name.clone())),
                }
            }

            dfa_states.push(DfaState {
                id: i,
                nfa_states: BTreeSet::new(),
                accepting: s.accepting,
                transitions,
            });
        }

        Ok(Dfa {
            start: start.ok_or(FormatError::MissingInitialState)?,
            states: dfa_states,
            alphabet: alphabet_chars.into_iter().collect(),
        })
    }
}

fn join_targets(names: impl Iterator<Item = String>) -> String {
    let joined: Vec<String> = names.collect();
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined.join(",")
    }
}

/// Serialize an NFA to the interchange format (the reverse of
/// `Nfa::try_from(parse_table(..))`).
pub fn nfa_to_table(nfa: &Nfa) -> String {
    let alphabet: Vec<char> = nfa.alphabet.iter().copied().collect();
    let mut out = String::new();
    for symbol in &alphabet {
        out.push(*symbol);
        out.push(' ');
    }
    out.push_str("ε\n");

    for state in &nfa.states {
        let mut flags = String::new();
        if state.id == nfa.start {
            flags.push('>');
        }
        if state.accepting {
            flags.push('*');
        }
        if flags.is_empty() {
            flags.push('-');
        }
        out.push_str(&format!("q{} {}", state.id, flags));
        for symbol in &alphabet {
            let cell = join_targets(
                state
                    .transitions
                    .get(symbol)
                    .into_iter()
                    .flatten()
                    .map(|t| format!("q{t}")),
            );
            out.push(' ');
            out.push_str(&cell);
        }
        let eps = join_targets(state.epsilon_transitions.iter().map(|t| format!("q{t}")));
        out.push(' ');
        out.push_str(&eps);
        out.push('\n');
    }
    out
}

/// Serialize a DFA to the interchange format.
pub fn dfa_to_table(dfa: &Dfa) -> String {
    let alphabet: Vec<char> = dfa.alphabet.iter().copied().collect();
    let mut out = String::new();
    for symbol in &alphabet {
        out.push(*symbol);
        out.push(' ');
    }
    out = out.trim_end().to_string();
    out.push('\n');

    for state in &dfa.states {
        let mut flags = String::new();
        if state.id == dfa.start {
            flags.push('>');
        }
        if state.accepting {
            flags.push('*');
        }
        if flags.is_empty() {
            flags.push('-');
        }
        out.push_str(&format!("q{} {}", state.id, flags));
        for symbol in &alphabet {
            let cell = state
                .transitions
                .get(symbol)
                .map(|t| format!("q{t}"))
                .unwrap_or_else(|| "-".to_string());
            out.push(' ');
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build_ast;
    use crate::parser::infix_to_postfix;

    fn dfa_of(expr: &str) -> Dfa {
        crate::nfa::Nfa::from_ast(&build_ast(&infix_to_postfix(expr).unwrap()).unwrap()).to_dfa()
    }

    #[test]
    fn dfa_round_trips_through_the_table_format() {
        let dfa = dfa_of("(a|b)*abb");
        let table = dfa_to_table(&dfa);
        let parsed = parse_table(&table).unwrap();
        let reloaded: Dfa = parsed.try_into().unwrap();
        for input in ["abb", "aabb", "ab", "", "babb"] {
            assert_eq!(dfa.accepts(input), reloaded.accepts(input), "input {input:?}");
        }
    }

    #[test]
    fn nfa_round_trips_through_the_table_format() {
        let postfix = infix_to_postfix("a|b*").unwrap();
        let nfa = crate::nfa::Nfa::from_ast(&build_ast(&postfix).unwrap());
        let table = nfa_to_table(&nfa);
        let parsed = parse_table(&table).unwrap();
        let reloaded: Nfa = parsed.try_into().unwrap();
        for input in ["a", "", "bbb", "ab"] {
            assert_eq!(nfa.accepts(input), reloaded.accepts(input), "input {input:?}");
        }
    }

    #[test]
    fn missing_initial_state_is_rejected() {
        let table = "a\nq0 - q0\n";
        let parsed = parse_table(table).unwrap();
        let result: Result<Dfa, _> = parsed.try_into();
        assert_eq!(result.unwrap_err(), FormatError::MissingInitialState);
    }

    #[test]
    fn unknown_transition_target_is_rejected() {
        let table = "a\nq0 > q1\n";
        let parsed = parse_table(table).unwrap();
        let result: Result<Dfa, _> = parsed.try_into();
        assert_eq!(
            result.unwrap_err(),
            FormatError::UnknownTarget("q0".to_string(), "q1".to_string())
        );
    }

    #[test]
    fn ambiguous_dfa_cell_is_rejected() {
        let table = "a\nq0 > q0,q1\nq1 * -\n";
        let parsed = parse_table(table).unwrap();
        let result: Result<Dfa, _> = parsed.try_into();
        assert!(matches!(result, Err(FormatError::NotDeterministic(_))));
    }

    #[test]
    fn hand_built_multi_char_alphabet_is_rejected_not_panicked() {
        let parsed = ParsedAutomaton {
            alphabet: vec!["ab".to_string()],
            has_epsilon_column: false,
            states: vec![ParsedState {
                name: "q0".to_string(),
                initial: true,
                accepting: true,
                transitions: vec![Vec::new()],
            }],
        };
        let result: Result<Dfa, _> = parsed.try_into();
        assert_eq!(
            result.unwrap_err(),
            FormatError::NotASingleChar("ab".to_string())
        );
    }

    #[test]
    fn hand_built_empty_alphabet_symbol_is_rejected_not_panicked() {
        let parsed = ParsedAutomaton {
            alphabet: vec!["".to_string()],
            has_epsilon_column: false,
            states: vec![ParsedState {
                name: "q0".to_string(),
                initial: true,
                accepting: true,
                transitions: vec![Vec::new()],
            }],
        };
        let result: Result<Nfa, _> = parsed.try_into();
        assert_eq!(result.unwrap_err(), FormatError::NotASingleChar(String::new()));
    }
}
