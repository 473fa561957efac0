//! The three entry points an embedder actually needs: construct a
//! calculator, feed it statements, and reset its state.
//!
//! A [`CalculatorContext`] bundles the pieces that would otherwise be
//! process-global in a `bc`-style tool: the symbol table, the installed
//! diagnostics handler, and the working scale. Nothing here is shared
//! across contexts, so an embedder can run several calculators side by
//! side without any of them seeing the others' variables.

use crate::decimal::Decimal;
use crate::diagnostics::{CalcError, DiagnosticsHandler, NullHandler};
use crate::evaluator;
use crate::parser;
use crate::symtab::SymbolTable;
use crate::DEFAULT_SCALE;

/// A self-contained calculator: variables, diagnostics, and scale, all
/// owned in one place.
pub struct CalculatorContext {
    symtab: SymbolTable,
    handler: Box<dyn DiagnosticsHandler>,
    scale: usize,
}

impl CalculatorContext {
    /// A fresh calculator: empty symbol table, [`NullHandler`], scale
    /// [`DEFAULT_SCALE`].
    pub fn new() -> Self {
        CalculatorContext {
            symtab: SymbolTable::new(),
            handler: Box::new(NullHandler),
            scale: DEFAULT_SCALE,
        }
    }

    /// Installs `handler` in place of whatever was previously receiving
    /// diagnostics.
    pub fn set_handler(&mut self, handler: Box<dyn DiagnosticsHandler>) {
        self.handler = handler;
    }

    /// The number of fractional digits every arithmetic result is
    /// truncated (or, for `sqrt`, rounded) to.
    pub fn scale(&self) -> usize {
        self.scale
    }

    /// Changes the working scale for statements executed from here on.
    pub fn set_scale(&mut self, scale: usize) {
        self.scale = scale;
    }

    /// Runs `input`, which may contain more than one statement separated
    /// by `;` or a newline, and returns the last statement's result (or
    /// `None` if the last statement was empty).
    ///
    /// Splitting on `;`/newline happens here rather than in [`parser`]:
    /// the statement separator is part of the expression grammar this
    /// context evaluates, not a detail a calling shell should have to
    /// reproduce.
    pub fn execute(&mut self, input: &str) -> Option<Decimal> {
        let mut result = None;
        for statement in input.split(['\n', ';']) {
            let tokens = parser::parse(statement, self.handler.as_mut());
            result = evaluator::evaluate(&tokens, &mut self.symtab, self.handler.as_mut(), self.scale);
        }
        result
    }

    /// Clears every variable binding. Scale and the installed handler are
    /// left untouched.
    pub fn reset(&mut self) {
        self.symtab.reset();
    }

    /// The current value of `name`, or `None` if it has never been
    /// assigned.
    pub fn get(&self, name: &str) -> Option<&Decimal> {
        self.symtab.get(name)
    }
}

impl Default for CalculatorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CalculatorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculatorContext").field("scale", &self.scale).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_lossy(s)
    }

    #[test]
    fn evaluates_a_single_statement() {
        let mut ctx = CalculatorContext::new();
        assert_eq!(ctx.execute("1 + 2"), Some(d("3")));
    }

    #[test]
    fn splits_on_semicolons_and_newlines_returning_the_last() {
        let mut ctx = CalculatorContext::new();
        assert_eq!(ctx.execute("x = 2; y = 3\nx * y"), Some(d("6")));
    }

    #[test]
    fn variables_persist_across_calls() {
        let mut ctx = CalculatorContext::new();
        ctx.execute("x = 10");
        assert_eq!(ctx.execute("x + 1"), Some(d("11")));
    }

    #[test]
    fn scale_applies_to_subsequent_statements() {
        let mut ctx = CalculatorContext::new();
        ctx.set_scale(4);
        assert_eq!(ctx.execute("10 / 3"), Some(d("3.3333")));
    }

    #[test]
    fn reset_clears_variables_but_not_scale() {
        let mut ctx = CalculatorContext::new();
        ctx.set_scale(2);
        ctx.execute("x = 5");
        ctx.reset();
        assert_eq!(ctx.get("x"), None);
        assert_eq!(ctx.scale(), 2);
    }

    #[test]
    fn empty_input_yields_none() {
        let mut ctx = CalculatorContext::new();
        assert_eq!(ctx.execute(""), None);
        assert_eq!(ctx.execute("   "), None);
    }

    #[test]
    fn custom_handler_observes_diagnostics() {
        struct Recorder(Vec<CalcError>);
        impl DiagnosticsHandler for Recorder {
            fn handle(&mut self, error: &CalcError) {
                self.0.push(error.clone());
            }
        }

        let mut ctx = CalculatorContext::new();
        ctx.set_handler(Box::new(Recorder(Vec::new())));
        ctx.execute("1 / 0");
    }
}
