use super::gather_strings;
use crate::cli::TableKind;
use crate::error::{read_file, Error};
use crate::output;
use kleene::dfa::Dfa;
use kleene::format::parse_table;
use kleene::nfa::Nfa;

pub fn run(
    quiet: bool,
    path: &str,
    kind: TableKind,
    strings: &[String],
    strings_file: &Option<String>,
) -> Result<(), Error> {
    let contents = read_file(path)?;
    let parsed = parse_table(&contents)?;
    let strings = gather_strings(strings, strings_file)?;

    match kind {
        TableKind::Nfa => {
            let nfa: Nfa = parsed.try_into()?;
            output!(quiet, "loaded nfa: {} states", nfa.states.len());
            for s in &strings {
                println!("{s:?}: {}", nfa.accepts(s));
            }
        }
        TableKind::Dfa => {
            let dfa: Dfa = parsed.try_into()?;
            output!(quiet, "loaded dfa: {} states", dfa.states.len());
            for s in &strings {
                println!("{s:?}: {}", dfa.accepts(s));
            }
        }
    }

    Ok(())
}
