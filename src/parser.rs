//! Builds the infix token sequence for a single statement.
//!
//! This is a thin driver over [`crate::lexer::lex`]: it tokenizes the
//! statement and appends a terminating [`Token::EndOfStatement`], which
//! [`crate::evaluator`] uses to know where one statement's shunting-yard
//! conversion ends. Splitting a multi-statement input on `;`/newline
//! happens one level up, in [`crate::context::CalculatorContext::execute`].

use crate::diagnostics::DiagnosticsHandler;
use crate::lexer;
use crate::token::Token;

/// Tokenizes one statement and terminates it with [`Token::EndOfStatement`].
pub fn parse(input: &str, handler: &mut dyn DiagnosticsHandler) -> Vec<Token> {
    let mut tokens = lexer::lex(input, handler);
    tokens.push(Token::EndOfStatement);
    tokens
}
