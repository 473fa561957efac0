//! Character-level tokenizer.
//!
//! Scans a single statement (the caller is responsible for having already
//! split on `;`/newline) into a flat [`Token`] sequence. Numeric literals,
//! operators (including the two-character relational lookaheads `<= >=
//! == !=`), parenthesized grouping, variables, and function calls are all
//! recognized here; a function call's argument expression is lexed
//! recursively between its parentheses, since [`Token::Function`] and
//! [`Token::Call`] carry their argument as an already-tokenized sequence.
//!
//! Every lexical problem is recoverable: the tokenizer reports a
//! [`CalcError`] through [`crate::diagnostics::warn`] and keeps scanning
//! rather than aborting.

use crate::diagnostics::{self, CalcError, DiagnosticsHandler};
use crate::decimal::Decimal;
use crate::token::{ArithOp, FunctionName, RelOp, Token};

/// Tokenizes `input` (one statement, no `;`/newline inside it) into a flat
/// token sequence. Does not append [`Token::EndOfStatement`] — that is
/// [`crate::parser::parse`]'s job.
pub fn lex(input: &str, handler: &mut dyn DiagnosticsHandler) -> Vec<Token> {
    let chars: Vec<char> = input.chars().collect();
    let mut pos = 0;
    lex_until(&chars, &mut pos, false, handler)
}

fn next_significant(chars: &[char], pos: usize) -> Option<char> {
    let mut i = pos;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    chars.get(i).copied()
}

fn is_unary_position(tokens: &[Token]) -> bool {
    !matches!(
        tokens.last(),
        Some(Token::Number(_) | Token::Variable(_) | Token::RParen | Token::Function { .. } | Token::Call { .. })
    )
}

fn lex_until(chars: &[char], pos: &mut usize, stop_at_rparen: bool, handler: &mut dyn DiagnosticsHandler) -> Vec<Token> {
    let mut tokens = Vec::new();

    while *pos < chars.len() {
        let c = chars[*pos];
        if c.is_whitespace() {
            *pos += 1;
            continue;
        }
        if stop_at_rparen && c == ')' {
            break;
        }

        match c {
            '0'..='9' | '.' => tokens.push(lex_number(chars, pos, handler)),
            c if c.is_alphabetic() || c == '_' => tokens.push(lex_ident(chars, pos, handler)),
            '+' => {
                *pos += 1;
                tokens.push(Token::Arithmetic(ArithOp::Add));
            }
            '-' => {
                *pos += 1;
                if is_unary_position(&tokens) {
                    let ok = matches!(
                        next_significant(chars, *pos),
                        Some(c) if c.is_ascii_digit() || c == '.' || c.is_alphabetic() || c == '_' || c == '(' || c == '-'
                    );
                    if !ok {
                        diagnostics::warn(handler, CalcError::DanglingUnaryMinus);
                    }
                    tokens.push(Token::Negate);
                } else {
                    tokens.push(Token::Arithmetic(ArithOp::Sub));
                }
            }
            '*' => {
                *pos += 1;
                tokens.push(Token::Arithmetic(ArithOp::Mul));
            }
            '/' => {
                *pos += 1;
                tokens.push(Token::Arithmetic(ArithOp::Div));
            }
            '%' => {
                *pos += 1;
                tokens.push(Token::Arithmetic(ArithOp::Mod));
            }
            '^' => {
                *pos += 1;
                tokens.push(Token::Arithmetic(ArithOp::Pow));
            }
            '(' => {
                *pos += 1;
                tokens.push(Token::LParen);
            }
            ')' => {
                *pos += 1;
                tokens.push(Token::RParen);
            }
            '<' => {
                *pos += 1;
                if chars.get(*pos) == Some(&'=') {
                    *pos += 1;
                    tokens.push(Token::Relational(RelOp::Le));
                } else {
                    tokens.push(Token::Relational(RelOp::Lt));
                }
            }
            '>' => {
                *pos += 1;
                if chars.get(*pos) == Some(&'=') {
                    *pos += 1;
                    tokens.push(Token::Relational(RelOp::Ge));
                } else {
                    tokens.push(Token::Relational(RelOp::Gt));
                }
            }
            '=' => {
                *pos += 1;
                if chars.get(*pos) == Some(&'=') {
                    *pos += 1;
                    tokens.push(Token::Relational(RelOp::Eq));
                } else {
                    tokens.push(Token::Assign);
                }
            }
            '!' => {
                *pos += 1;
                if chars.get(*pos) == Some(&'=') {
                    *pos += 1;
                    tokens.push(Token::Relational(RelOp::Ne));
                } else {
                    diagnostics::warn(handler, CalcError::UnexpectedChar('!'));
                }
            }
            other => {
                *pos += 1;
                diagnostics::warn(handler, CalcError::UnexpectedChar(other));
            }
        }
    }

    tokens
}

fn lex_number(chars: &[char], pos: &mut usize, handler: &mut dyn DiagnosticsHandler) -> Token {
    let start = *pos;
    let mut dot_count = 0;

    while *pos < chars.len() {
        match chars[*pos] {
            d if d.is_ascii_digit() => *pos += 1,
            '.' => {
                dot_count += 1;
                if dot_count > 1 {
                    diagnostics::warn(handler, CalcError::MultipleDecimalPoints);
                    break;
                }
                *pos += 1;
            }
            _ => break,
        }
    }

    let text: String = chars[start..*pos].iter().collect();
    Token::Number(Decimal::from_str_lossy(&text))
}

fn lex_ident(chars: &[char], pos: &mut usize, handler: &mut dyn DiagnosticsHandler) -> Token {
    let start = *pos;
    while *pos < chars.len() && (chars[*pos].is_alphanumeric() || chars[*pos] == '_') {
        *pos += 1;
    }
    let name: String = chars[start..*pos].iter().collect();

    let probe = {
        let mut i = *pos;
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        i
    };

    if chars.get(probe) != Some(&'(') {
        return Token::Variable(name);
    }

    *pos = probe + 1;
    let args = lex_until(chars, pos, true, handler);
    if chars.get(*pos) == Some(&')') {
        *pos += 1;
    } else {
        diagnostics::warn(handler, CalcError::UnmatchedParen);
    }

    match FunctionName::lookup(&name) {
        Some(name) => Token::Function { name, args },
        None => Token::Call { name, args },
    }
}
