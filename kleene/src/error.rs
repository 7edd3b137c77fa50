//! Error taxonomy for the regex compilation pipeline.
//!
//! Every fallible operation up to and including AST construction returns
//! [`Error`]. Later stages (Thompson construction, subset construction,
//! minimization) are total given a well-formed AST and never fail.

use std::fmt;
use thiserror::Error;

/// The pipeline stage that detected a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parser,
    AstBuilder,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Parser => write!(f, "parser"),
            Stage::AstBuilder => write!(f, "ast builder"),
        }
    }
}

/// Errors produced while compiling a regular expression.
///
/// Both variants carry the byte offset into the original (pre-normalization)
/// input at which the problem was detected, and the stage that detected it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("malformed expression at byte {position} ({stage}): {reason}")]
    MalformedExpression {
        position: usize,
        stage: Stage,
        reason: &'static str,
    },
    #[error("unsupported token '{token}' at byte {position} ({stage})")]
    UnsupportedToken {
        position: usize,
        stage: Stage,
        token: char,
    },
}

impl Error {
    pub fn malformed(position: usize, stage: Stage, reason: &'static str) -> Self {
        Error::MalformedExpression {
            position,
            stage,
            reason,
        }
    }

    pub fn unsupported(position: usize, stage: Stage, token: char) -> Self {
        Error::UnsupportedToken {
            position,
            stage,
            token,
        }
    }
}
