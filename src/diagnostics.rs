//! A single recoverable-error sink shared by every component.
//!
//! Lexical, syntactic, and evaluation errors never panic or abort a
//! statement: the offending component reports a [`CalcError`] through
//! [`warn`], the evaluator substitutes a best-effort value (usually zero)
//! and carries on. `warn` always emits a `tracing::warn!` event; callers
//! that also want to see, count, or escalate diagnostics install a
//! [`DiagnosticsHandler`] on the owning [`crate::CalculatorContext`].

use std::fmt;

/// Every recoverable error a calculator component can report.
///
/// Each variant corresponds to a row in the error table: lexical errors
/// (`UnexpectedChar`, `MultipleDecimalPoints`), syntactic errors
/// (`UnmatchedParen`, `DanglingUnaryMinus`, `AssignToNonVariable`,
/// `StackExhausted`), and evaluation errors (`DivisionByZero`,
/// `NegativeSqrt`, `NonIntegerExponent`, `UnknownFunction`). None of them
/// is fatal: the component that detects one still returns a value (the
/// evaluator's convention is zero) and reports through [`warn`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    #[error("multiple decimal points in numeric literal")]
    MultipleDecimalPoints,

    #[error("unmatched parenthesis")]
    UnmatchedParen,

    #[error("unary minus applied before an operator")]
    DanglingUnaryMinus,

    #[error("assignment target is not a variable")]
    AssignToNonVariable,

    #[error("division by zero")]
    DivisionByZero,

    #[error("square root of a negative number")]
    NegativeSqrt,

    #[error("exponent is not an integer")]
    NonIntegerExponent,

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("stack exhausted while matching ')'")]
    StackExhausted,
}

/// Receives every diagnostic reported through [`warn`], in addition to the
/// `tracing::warn!` event that is always emitted.
pub trait DiagnosticsHandler {
    fn handle(&mut self, error: &CalcError);
}

/// The default handler: does nothing beyond the unconditional `tracing`
/// event `warn` already emits.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHandler;

impl DiagnosticsHandler for NullHandler {
    fn handle(&mut self, _error: &CalcError) {}
}

impl fmt::Debug for dyn DiagnosticsHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<diagnostics handler>")
    }
}

/// Reports a recoverable error: logs a `tracing::warn!` event and forwards
/// it to the installed handler. Does not return a value — callers are
/// responsible for substituting whatever best-effort result fits (almost
/// always [`crate::Decimal::zero`]).
pub fn warn(handler: &mut dyn DiagnosticsHandler, error: CalcError) {
    tracing::warn!(error = %error, "calculator diagnostic");
    handler.handle(&error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_handler_observes_nothing() {
        let mut handler = NullHandler;
        warn(&mut handler, CalcError::DivisionByZero);
    }

    #[test]
    fn custom_handler_records_errors() {
        struct Recorder(Vec<CalcError>);
        impl DiagnosticsHandler for Recorder {
            fn handle(&mut self, error: &CalcError) {
                self.0.push(error.clone());
            }
        }

        let mut recorder = Recorder(Vec::new());
        warn(&mut recorder, CalcError::NegativeSqrt);
        warn(&mut recorder, CalcError::UnknownFunction("foo".into()));
        assert_eq!(recorder.0.len(), 2);
        assert_eq!(recorder.0[0], CalcError::NegativeSqrt);
    }
}
