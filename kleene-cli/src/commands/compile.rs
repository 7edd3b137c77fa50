use super::gather_strings;
use crate::cli::AutomatonKind;
use crate::error::Error;
use crate::output;
use kleene::format::{dfa_to_table, nfa_to_table};
use kleene::Regex;

pub fn run(
    quiet: bool,
    expr: &str,
    strings: &[String],
    strings_file: &Option<String>,
    emit_table: Option<AutomatonKind>,
) -> Result<(), Error> {
    output!(quiet, "compiling {expr:?}");
    let compiled = Regex::compile(expr)?;
    output!(
        quiet,
        "  nfa: {} states, dfa: {} states, minimized dfa: {} states",
        compiled.nfa().states.len(),
        compiled.dfa().states.len(),
        compiled.minimized_dfa().states.len()
    );

    let strings = gather_strings(strings, strings_file)?;
    for s in &strings {
        let nfa = compiled.nfa().accepts(s);
        let dfa = compiled.dfa().accepts(s);
        let min_dfa = compiled.minimized_dfa().accepts(s);
        println!("{s:?}: nfa={nfa} dfa={dfa} min_dfa={min_dfa}");
        if nfa != dfa || dfa != min_dfa {
            output!(quiet, "  warning: the three automata disagree on {s:?}");
        }
    }

    if let Some(kind) = emit_table {
        let table = match kind {
            AutomatonKind::Nfa => nfa_to_table(compiled.nfa()),
            AutomatonKind::Dfa => dfa_to_table(compiled.dfa()),
            AutomatonKind::MinDfa => dfa_to_table(compiled.minimized_dfa()),
        };
        print!("{table}");
    }

    Ok(())
}
