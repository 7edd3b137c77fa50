//! Errors for the automaton interchange format. Kept separate from
//! [`crate::error::Error`] since it reports against a different input (a
//! table file, not a regex string) with a different failure vocabulary.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("could not parse table: {0}")]
    Syntax(String),
    #[error("alphabet symbol '{0}' must be a single character")]
    NotASingleChar(String),
    #[error("'{0}' appears twice in the alphabet")]
    DuplicateAlphabetSymbol(String),
    #[error("state '{0}' defined multiple times")]
    DuplicateStateName(String),
    #[error("state '{1}' does not exist (in a transition from '{0}')")]
    UnknownTarget(String, String),
    #[error("wrong number of transition columns for state '{0}': has {1}, expected {2}")]
    WrongArity(String, usize, usize),
    #[error("there is no initial state")]
    MissingInitialState,
    #[error("there is more than one initial state")]
    MultipleInitialStates,
    #[error("a DFA transition cell named more than one target state for '{0}'")]
    NotDeterministic(String),
}
