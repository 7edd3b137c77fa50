//! Infix-to-postfix conversion: Unicode normalization, `+`/`?`
//! desugaring, escape handling, implicit-concatenation insertion and
//! shunting-yard, in that order.
//!
//! The surface syntax is scanned into a token stream up front rather than
//! rewritten as text, unlike the textual substitution the legacy
//! implementation this crate's design was distilled from performs: this
//! gives every later pass exact byte positions to blame in its errors, and
//! lets normalization run exactly once, before anything downstream can see
//! an un-normalized character.

pub mod token;

use crate::error::{Error, Stage};
use token::{Postfix, Spanned, Token};

/// Replace the Unicode "mathematical italic" letters and symbols this
/// surface syntax accepts with their ASCII/canonical equivalents. A fixed
/// translation table is sufficient; general NFC/NFKC normalization is out
/// of scope.
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '\u{1D44E}'..='\u{1D467}' => {
                // 𝑎-𝑧 (U+1D44E..U+1D467), mathematical italic lowercase
                let offset = c as u32 - '\u{1D44E}' as u32;
                char::from_u32('a' as u32 + offset).unwrap_or(c)
            }
            '\u{1D441}' => 'N',      // 𝑁
            '\u{1D700}' => 'ε',      // 𝜀 -> canonical epsilon
            '\u{2217}' => '*',       // ∗ -> ASCII star
            other => other,
        })
        .collect()
}

/// Scan a normalized expression into spanned tokens.
fn tokenize(input: &str) -> Result<Vec<Spanned>, Error> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '|' => Token::Union,
            '*' => Token::Star,
            '?' => Token::Question,
            '+' => Token::Plus,
            '(' => Token::LParen,
            ')' => Token::RParen,
            'ε' => Token::Epsilon,
            '\\' => match chars.next() {
                Some((_, escaped)) => Token::Literal(escaped),
                None => return Err(Error::malformed(pos, Stage::Parser, "trailing backslash")),
            },
            c if c.is_alphanumeric() => Token::Symbol(c),
            other => return Err(Error::unsupported(pos, Stage::Parser, other)),
        };
        tokens.push(Spanned { token, position: pos });
    }

    Ok(tokens)
}

/// Find the span of the operand immediately to the left of `before`: either
/// a single operand token, or a balanced-parenthesis group ending in `)`.
fn left_operand_span(tokens: &[Spanned], before: usize) -> Result<std::ops::Range<usize>, Error> {
    if before == 0 {
        let pos = tokens.get(before).map(|s| s.position).unwrap_or(0);
        return Err(Error::malformed(
            pos,
            Stage::Parser,
            "operator with no preceding operand",
        ));
    }

    let last = &tokens[before - 1];
    if last.token == Token::RParen {
        let mut depth = 0i32;
        let mut i = before;
        while i > 0 {
            i -= 1;
            match tokens[i].token {
                Token::RParen => depth += 1,
                Token::LParen => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(i..before);
                    }
                }
                _ => {}
            }
        }
        Err(Error::malformed(
            last.position,
            Stage::Parser,
            "unbalanced parentheses",
        ))
    } else if last.token.is_operand() {
        Ok((before - 1)..before)
    } else {
        Err(Error::malformed(
            last.position,
            Stage::Parser,
            "operator with no preceding operand",
        ))
    }
}

/// Desugar every `+`: `X+` becomes `X(X)*`, leftmost first, rescanning so
/// that newly introduced forms are also covered.
fn desugar_plus(mut tokens: Vec<Spanned>) -> Result<Vec<Spanned>, Error> {
    loop {
        let Some(plus_idx) = tokens.iter().position(|s| s.token == Token::Plus) else {
            return Ok(tokens);
        };
        let span = left_operand_span(&tokens, plus_idx)?;
        let pos = tokens[plus_idx].position;
        let operand: Vec<Spanned> = tokens[span.clone()].to_vec();

        let mut replacement = Vec::with_capacity(operand.len() * 2 + 3);
        replacement.extend(operand.iter().copied());
        replacement.push(Spanned { token: Token::LParen, position: pos });
        replacement.extend(operand.iter().copied());
        replacement.push(Spanned { token: Token::RParen, position: pos });
        replacement.push(Spanned { token: Token::Star, position: pos });

        tokens.splice(span.start..=plus_idx, replacement);
    }
}

/// Desugar every `?`, processing right-to-left: `X?` becomes `(X|ε)` using
/// only the general rule — no substring special-casing of specific inputs.
fn desugar_question(mut tokens: Vec<Spanned>) -> Result<Vec<Spanned>, Error> {
    loop {
        let Some(q_idx) = tokens.iter().rposition(|s| s.token == Token::Question) else {
            return Ok(tokens);
        };
        let span = left_operand_span(&tokens, q_idx)?;
        let pos = tokens[q_idx].position;
        let operand: Vec<Spanned> = tokens[span.clone()].to_vec();

        let mut replacement = Vec::with_capacity(operand.len() + 4);
        replacement.push(Spanned { token: Token::LParen, position: pos });
        replacement.extend(operand);
        replacement.push(Spanned { token: Token::Union, position: pos });
        replacement.push(Spanned { token: Token::Epsilon, position: pos });
        replacement.push(Spanned { token: Token::RParen, position: pos });

        tokens.splice(span.start..=q_idx, replacement);
    }
}

/// Insert explicit `.` tokens wherever implicit concatenation is required.
/// Runs after normalization and desugaring, so `*` is the only star token
/// this rule ever sees.
fn insert_concatenation(tokens: Vec<Spanned>) -> Vec<Spanned> {
    let mut out = Vec::with_capacity(tokens.len() * 2);
    let mut iter = tokens.into_iter().peekable();
    while let Some(t) = iter.next() {
        let position = t.position;
        out.push(t);
        if let Some(next) = iter.peek() {
            if t.token.concat_left() && next.token.concat_right() {
                out.push(Spanned { token: Token::Concat, position });
            }
        }
    }
    out
}

fn precedence(op: Token) -> u8 {
    match op {
        Token::Star => 4,
        Token::Concat => 3,
        Token::Union => 2,
        Token::LParen => 1,
        _ => 0,
    }
}

/// Dijkstra's shunting-yard, converting the (desugared, concatenation-explicit)
/// infix token stream to postfix.
fn shunting_yard(tokens: Vec<Spanned>) -> Result<Postfix, Error> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<Spanned> = Vec::new();

    for t in tokens {
        match t.token {
            _ if t.token.is_operand() => output.push(t),
            Token::LParen => operators.push(t),
            Token::RParen => loop {
                match operators.pop() {
                    Some(op) if op.token == Token::LParen => break,
                    Some(op) => output.push(op),
                    None => {
                        return Err(Error::malformed(
                            t.position,
                            Stage::Parser,
                            "unmatched closing parenthesis",
                        ))
                    }
                }
            },
            op => {
                while let Some(top) = operators.last() {
                    if top.token != Token::LParen && precedence(top.token) >= precedence(op) {
                        output.push(operators.pop().unwrap());
                    } else {
                        break;
                    }
                }
                operators.push(t);
            }
        }
    }

    while let Some(op) = operators.pop() {
        if op.token == Token::LParen {
            return Err(Error::malformed(
                op.position,
                Stage::Parser,
                "unmatched opening parenthesis",
            ));
        }
        output.push(op);
    }

    Ok(output)
}

/// Run the full pipeline from raw surface syntax to a postfix token stream.
pub fn infix_to_postfix(input: &str) -> Result<Postfix, Error> {
    let normalized = normalize(input);
    let tokens = tokenize(&normalized)?;
    let tokens = desugar_plus(tokens)?;
    let tokens = desugar_question(tokens)?;
    let tokens = insert_concatenation(tokens);
    shunting_yard(tokens)
}
