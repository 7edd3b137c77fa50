use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "kleene", about = "Compile regular expressions to NFAs, DFAs and minimized DFAs")]
pub struct Cli {
    /// Suppress human-facing progress output; only print results.
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutomatonKind {
    Nfa,
    Dfa,
    #[value(name = "min-dfa")]
    MinDfa,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a regular expression and report verdicts for candidate strings.
    Compile {
        /// The regular expression, in the usual infix surface syntax.
        expr: String,
        /// Candidate strings to test (in addition to any from --strings-file).
        #[arg(long = "string")]
        strings: Vec<String>,
        /// A file with one candidate string per line.
        #[arg(long)]
        strings_file: Option<String>,
        /// After reporting verdicts, also print the named automaton in the
        /// interchange format to stdout.
        #[arg(long)]
        emit_table: Option<AutomatonKind>,
    },
    /// Load an automaton from an interchange-format file and report
    /// verdicts for candidate strings, bypassing the regex pipeline.
    Table {
        /// Path to a file in the interchange format.
        path: String,
        /// Whether the file describes an NFA or a DFA.
        #[arg(value_enum)]
        kind: TableKind,
        /// Candidate strings to test.
        #[arg(long = "string")]
        strings: Vec<String>,
        #[arg(long)]
        strings_file: Option<String>,
    },
    /// Compile many expressions and test each against many strings, reporting
    /// the cross-product of verdicts.
    Batch {
        /// Expressions to compile (in addition to any from --expressions-file).
        #[arg(long = "expr")]
        expressions: Vec<String>,
        /// A file with one expression per line.
        #[arg(long)]
        expressions_file: Option<String>,
        /// Candidate strings to test (in addition to any from --strings-file).
        #[arg(long = "string")]
        strings: Vec<String>,
        /// A file with one candidate string per line.
        #[arg(long)]
        strings_file: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableKind {
    Nfa,
    Dfa,
}
