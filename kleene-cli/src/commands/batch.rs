use super::gather_strings;
use crate::error::Error;
use crate::output;
use kleene::dfa::eval::DfaEvaluator;
use kleene::nfa::eval::NfaEvaluator;
use kleene::Regex;

/// Compile every expression and test it against every string, reporting the
/// cross-product of verdicts. On a rejection, also reports how many symbols
/// the NFA and the minimized DFA each consumed before dying, mirroring how a
/// line-by-line test run would point at the first bad prefix instead of
/// just saying "no" — and flagging it if the two steppers disagree on where
/// the string died, which would mean the compiler produced non-equivalent
/// automata.
pub fn run(
    quiet: bool,
    expressions: &[String],
    expressions_file: &Option<String>,
    strings: &[String],
    strings_file: &Option<String>,
) -> Result<(), Error> {
    let expressions = gather_strings(expressions, expressions_file)?;
    let strings = gather_strings(strings, strings_file)?;

    let mut total = 0;
    let mut passed = 0;

    for expr in &expressions {
        output!(quiet, "compiling {expr:?}");
        let compiled = Regex::compile(expr)?;

        for s in &strings {
            total += 1;
            let accepted = compiled.accepts(s);
            if accepted {
                passed += 1;
                println!("[ OK ] {expr:?} accepts {s:?}");
            } else {
                let mut nfa_eval = NfaEvaluator::from(compiled.nfa());
                let nfa_consumed = nfa_eval.step_all(s);
                let mut dfa_eval = DfaEvaluator::from(compiled.minimized_dfa());
                let dfa_consumed = dfa_eval.step_all(s);
                println!(
                    "[FAIL] {expr:?} rejects {s:?} (nfa consumed {nfa_consumed}, min_dfa consumed {dfa_consumed} of {} symbols)",
                    s.chars().count()
                );
                if nfa_consumed != dfa_consumed {
                    output!(
                        quiet,
                        "  warning: nfa and minimized dfa died at different prefixes for {s:?}"
                    );
                }
            }
        }
    }

    output!(quiet, "{passed}/{total} expression-string pairs accepted");
    Ok(())
}
