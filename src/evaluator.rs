//! Infix-to-postfix conversion (shunting-yard) and postfix evaluation.
//!
//! # Precedence table
//!
//! Every operator carries an *out*-precedence (used when the operator is
//! the incoming token, deciding what gets popped ahead of it) and an
//! *in*-precedence (used when the operator is already sitting on the
//! stack, deciding whether it yields to the incoming one). For a
//! left-associative operator the two are equal, so operators of the same
//! level pop each other left-to-right; for a right-associative operator
//! (`^`, unary `-`) the in-precedence is one less than the out-precedence,
//! so same-level operators stack up instead of popping and get applied
//! right-to-left when the postfix queue is walked. Levels, lowest first:
//! assignment, equality, relational, additive, multiplicative, unary
//! minus, power — giving `-2 ^ 2` its usual reading of `-(2 ^ 2)` rather
//! than `(-2) ^ 2`, and `0 == 1 < 2` its usual reading of `0 == (1 < 2)`
//! rather than `(0 == 1) < 2`.
//!
//! Assignment is handled as a genuine right-associative operator in the
//! shunting-yard and postfix phases (lowest precedence, per §4.5), not as
//! a statement-level special case — the grammar's `assign := rel ('='
//! assign)?` allows chains like `x = y = 5` and parenthesised assignment
//! targets like `x = (y = 1)`, both of which need `=` to survive inside
//! an arbitrary subexpression. To know which operand is assignable once
//! it reaches the postfix evaluator, the operand stack carries each
//! variable reference's name alongside its resolved value (see
//! [`Operand`]) instead of collapsing straight to a bare [`Decimal`].

use crate::decimal::Decimal;
use crate::diagnostics::{self, CalcError, DiagnosticsHandler};
use crate::opstack::OperatorStack;
use crate::symtab::SymbolTable;
use crate::token::{ArithOp, FunctionName, RelOp, Token};
use std::cmp::Ordering;

fn precedence(tok: &Token) -> (i32, i32) {
    match tok {
        Token::Assign => (10, 9),
        Token::Relational(RelOp::Eq) | Token::Relational(RelOp::Ne) => (20, 20),
        Token::Relational(RelOp::Lt) | Token::Relational(RelOp::Gt) | Token::Relational(RelOp::Le) | Token::Relational(RelOp::Ge) => (30, 30),
        Token::Arithmetic(ArithOp::Add) | Token::Arithmetic(ArithOp::Sub) => (40, 40),
        Token::Arithmetic(ArithOp::Mul) | Token::Arithmetic(ArithOp::Div) | Token::Arithmetic(ArithOp::Mod) => (50, 50),
        Token::Negate => (60, 59),
        Token::Arithmetic(ArithOp::Pow) => (70, 69),
        other => unreachable!("precedence queried for non-operator token {other:?}"),
    }
}

fn is_operator(tok: &Token) -> bool {
    matches!(tok, Token::Assign | Token::Relational(_) | Token::Arithmetic(_) | Token::Negate)
}

/// Converts one expression's flat token sequence (no [`Token::EndOfStatement`]
/// inside it) to postfix (reverse Polish) order.
fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>, CalcError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack = OperatorStack::new();

    for tok in tokens {
        match tok {
            Token::Number(_) | Token::Variable(_) | Token::Function { .. } | Token::Call { .. } => {
                output.push(tok.clone());
            }
            Token::LParen => stack.push(tok.clone()),
            Token::RParen => loop {
                match stack.pop() {
                    Some(Token::LParen) => break,
                    Some(op) => output.push(op),
                    None => return Err(CalcError::StackExhausted),
                }
            },
            // Negate is prefix, not infix: it never has a left operand to
            // contend for, so it is pushed unconditionally rather than
            // popping anything ahead of it (unlike the binary operators
            // below, whose incoming precedence decides what yields first).
            Token::Negate => stack.push(tok.clone()),
            _ if is_operator(tok) => {
                let (out_prec, _) = precedence(tok);
                while let Some(top) = stack.peek() {
                    if matches!(top, Token::LParen) {
                        break;
                    }
                    let (_, top_in) = precedence(top);
                    if top_in >= out_prec {
                        output.push(stack.pop().expect("peeked non-empty stack"));
                    } else {
                        break;
                    }
                }
                stack.push(tok.clone());
            }
            Token::EndOfStatement => {}
        }
    }

    while let Some(op) = stack.pop() {
        if matches!(op, Token::LParen) {
            return Err(CalcError::UnmatchedParen);
        }
        output.push(op);
    }

    Ok(output)
}

fn relational_result(op: RelOp, cmp: Ordering) -> Decimal {
    let truth = match op {
        RelOp::Lt => cmp == Ordering::Less,
        RelOp::Gt => cmp == Ordering::Greater,
        RelOp::Le => cmp != Ordering::Greater,
        RelOp::Ge => cmp != Ordering::Less,
        RelOp::Eq => cmp == Ordering::Equal,
        RelOp::Ne => cmp != Ordering::Equal,
    };
    if truth { Decimal::one() } else { Decimal::zero() }
}

/// An entry on the postfix evaluator's operand stack: a plain value, or a
/// variable reference carrying both its name (in case it ends up as the
/// left-hand side of an `=`) and its resolved value (for use as a plain
/// operand everywhere else).
#[derive(Clone)]
enum Operand {
    Value(Decimal),
    Var(String, Decimal),
}

impl Operand {
    fn into_value(self) -> Decimal {
        match self {
            Operand::Value(v) => v,
            Operand::Var(_, v) => v,
        }
    }
}

fn eval_postfix(postfix: &[Token], symtab: &mut SymbolTable, handler: &mut dyn DiagnosticsHandler, scale: usize) -> Decimal {
    let mut stack: Vec<Operand> = Vec::with_capacity(postfix.len());

    for tok in postfix {
        match tok {
            Token::Number(value) => stack.push(Operand::Value(value.clone())),
            Token::Variable(name) => {
                let value = symtab.get(name).cloned().unwrap_or_else(Decimal::zero);
                stack.push(Operand::Var(name.clone(), value));
            }
            Token::Function { name, args } => {
                let arg = eval_expression(args, symtab, handler, scale);
                stack.push(Operand::Value(apply_function(*name, &arg, scale, handler)));
            }
            Token::Call { name, args } => {
                let _ = eval_expression(args, symtab, handler, scale);
                diagnostics::warn(handler, CalcError::UnknownFunction(name.clone()));
                stack.push(Operand::Value(Decimal::zero()));
            }
            Token::Negate => {
                let operand = stack.pop().map(Operand::into_value).unwrap_or_else(Decimal::zero);
                stack.push(Operand::Value(operand.negated()));
            }
            Token::Arithmetic(op) => {
                let b = stack.pop().map(Operand::into_value).unwrap_or_else(Decimal::zero);
                let a = stack.pop().map(Operand::into_value).unwrap_or_else(Decimal::zero);
                stack.push(Operand::Value(apply_arithmetic(*op, &a, &b, scale, handler)));
            }
            Token::Relational(op) => {
                let b = stack.pop().map(Operand::into_value).unwrap_or_else(Decimal::zero);
                let a = stack.pop().map(Operand::into_value).unwrap_or_else(Decimal::zero);
                stack.push(Operand::Value(relational_result(*op, a.cmp_signed(&b))));
            }
            Token::Assign => {
                let rhs = stack.pop().map(Operand::into_value).unwrap_or_else(Decimal::zero);
                let lhs = stack.pop();
                match lhs {
                    Some(Operand::Var(name, _)) => {
                        symtab.set(&name, rhs.clone());
                        stack.push(Operand::Value(rhs));
                    }
                    _ => {
                        diagnostics::warn(handler, CalcError::AssignToNonVariable);
                        stack.push(Operand::Value(Decimal::zero()));
                    }
                }
            }
            Token::LParen | Token::RParen | Token::EndOfStatement => {
                unreachable!("{tok:?} cannot appear in a postfix sequence")
            }
        }
    }

    stack.pop().map(|o| o.into_value()).unwrap_or_else(Decimal::zero)
}

fn apply_function(name: FunctionName, arg: &Decimal, scale: usize, handler: &mut dyn DiagnosticsHandler) -> Decimal {
    match name {
        FunctionName::Sin => arg.sin(scale),
        FunctionName::Cos => arg.cos(scale),
        FunctionName::Atan => arg.atan(scale),
        FunctionName::Ln => arg.ln(scale),
        FunctionName::Exp => arg.exp(scale),
        FunctionName::Sqrt => arg.sqrt(scale).unwrap_or_else(|err| {
            diagnostics::warn(handler, err);
            Decimal::zero()
        }),
    }
}

fn apply_arithmetic(op: ArithOp, a: &Decimal, b: &Decimal, scale: usize, handler: &mut dyn DiagnosticsHandler) -> Decimal {
    match op {
        ArithOp::Add => (a + b).truncate_to_scale(scale),
        ArithOp::Sub => (a - b).truncate_to_scale(scale),
        ArithOp::Mul => a.mul(b, scale),
        ArithOp::Div => a.div(b, scale).unwrap_or_else(|err| {
            diagnostics::warn(handler, err);
            Decimal::zero()
        }),
        ArithOp::Mod => a.rem(b, scale).unwrap_or_else(|err| {
            diagnostics::warn(handler, err);
            Decimal::zero()
        }),
        ArithOp::Pow => a.pow(b, scale).unwrap_or_else(|err| {
            diagnostics::warn(handler, err);
            Decimal::zero()
        }),
    }
}

/// Converts `tokens` to postfix and evaluates it, reporting a conversion
/// error (unmatched parenthesis, stack exhaustion) and substituting zero
/// if it fails.
fn eval_expression(tokens: &[Token], symtab: &mut SymbolTable, handler: &mut dyn DiagnosticsHandler, scale: usize) -> Decimal {
    match to_postfix(tokens) {
        Ok(postfix) => eval_postfix(&postfix, symtab, handler, scale),
        Err(err) => {
            diagnostics::warn(handler, err);
            Decimal::zero()
        }
    }
}

/// Evaluates one statement's already-parsed token sequence (including its
/// trailing [`Token::EndOfStatement`]) against `symtab`, truncating every
/// intermediate and final result to `scale` fractional digits. Returns
/// `None` for an empty statement.
pub fn evaluate(tokens: &[Token], symtab: &mut SymbolTable, handler: &mut dyn DiagnosticsHandler, scale: usize) -> Option<Decimal> {
    let body = match tokens.last() {
        Some(Token::EndOfStatement) => &tokens[..tokens.len() - 1],
        _ => tokens,
    };
    if body.is_empty() {
        return None;
    }

    Some(eval_expression(body, symtab, handler, scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NullHandler;
    use crate::parser;

    fn run(input: &str, symtab: &mut SymbolTable, scale: usize) -> Option<Decimal> {
        let mut handler = NullHandler;
        let tokens = parser::parse(input, &mut handler);
        evaluate(&tokens, symtab, &mut handler, scale)
    }

    fn d(s: &str) -> Decimal {
        Decimal::from_str_lossy(s)
    }

    #[test]
    fn arithmetic_respects_precedence() {
        let mut symtab = SymbolTable::new();
        assert_eq!(run("1 + 2 * 3", &mut symtab, 0), Some(d("7")));
        assert_eq!(run("(1 + 2) * 3", &mut symtab, 0), Some(d("9")));
    }

    #[test]
    fn power_is_right_associative() {
        let mut symtab = SymbolTable::new();
        // 2 ^ (3 ^ 2) == 2 ^ 9 == 512, not (2 ^ 3) ^ 2 == 64.
        assert_eq!(run("2 ^ 3 ^ 2", &mut symtab, 0), Some(d("512")));
    }

    #[test]
    fn unary_minus_binds_looser_than_power() {
        let mut symtab = SymbolTable::new();
        assert_eq!(run("-2 ^ 2", &mut symtab, 0), Some(d("-4")));
    }

    #[test]
    fn unary_minus_on_the_right_operand_of_power() {
        // The '-' is prefix on the exponent, not infix on the '^' itself:
        // 2 ^ (-2), not (2 ^ -) anything.
        let mut symtab = SymbolTable::new();
        assert_eq!(run("2 ^ -2", &mut symtab, 2), Some(d("0.25")));
    }

    #[test]
    fn assignment_returns_and_stores_the_value() {
        let mut symtab = SymbolTable::new();
        assert_eq!(run("x = 5", &mut symtab, 0), Some(d("5")));
        assert_eq!(run("x * x + 1", &mut symtab, 0), Some(d("26")));
    }

    #[test]
    fn assignment_to_non_variable_is_reported_and_zero() {
        let mut symtab = SymbolTable::new();
        assert_eq!(run("5 = 3", &mut symtab, 0), Some(d("0")));
    }

    #[test]
    fn chained_assignment_binds_right_to_left() {
        let mut symtab = SymbolTable::new();
        assert_eq!(run("x = y = 5", &mut symtab, 0), Some(d("5")));
        assert_eq!(symtab.get("x").cloned(), Some(d("5")));
        assert_eq!(symtab.get("y").cloned(), Some(d("5")));
    }

    #[test]
    fn parenthesised_assignment_does_not_panic() {
        let mut symtab = SymbolTable::new();
        assert_eq!(run("x = (y = 1) + 1", &mut symtab, 0), Some(d("2")));
        assert_eq!(symtab.get("y").cloned(), Some(d("1")));
        assert_eq!(symtab.get("x").cloned(), Some(d("2")));
    }

    #[test]
    fn relational_operators_yield_one_or_zero() {
        let mut symtab = SymbolTable::new();
        assert_eq!(run("3 < 5", &mut symtab, 0), Some(d("1")));
        assert_eq!(run("3 > 5", &mut symtab, 0), Some(d("0")));
        assert_eq!(run("5 == 5", &mut symtab, 0), Some(d("1")));
        assert_eq!(run("5 != 5", &mut symtab, 0), Some(d("0")));
    }

    #[test]
    fn relational_binds_tighter_than_equality() {
        // 0 == (1 < 2) == (0 == 1) == 0, not (0 == 1) < 2 == 1.
        let mut symtab = SymbolTable::new();
        assert_eq!(run("0 == 1 < 2", &mut symtab, 0), Some(d("0")));
    }

    #[test]
    fn division_by_zero_reports_and_yields_zero() {
        let mut symtab = SymbolTable::new();
        assert_eq!(run("1 / 0", &mut symtab, 2), Some(d("0")));
    }

    #[test]
    fn sqrt_of_negative_reports_and_yields_zero() {
        let mut symtab = SymbolTable::new();
        assert_eq!(run("sqrt(-1)", &mut symtab, 4), Some(d("0")));
    }

    #[test]
    fn function_call_at_a_given_scale() {
        let mut symtab = SymbolTable::new();
        assert_eq!(run("sqrt(2)", &mut symtab, 9), Some(d("1.414213562")));
    }

    #[test]
    fn division_truncates_to_scale() {
        let mut symtab = SymbolTable::new();
        assert_eq!(run("10 / 3", &mut symtab, 4), Some(d("3.3333")));
    }

    #[test]
    fn unknown_function_reports_and_yields_zero() {
        let mut symtab = SymbolTable::new();
        assert_eq!(run("frobnicate(1)", &mut symtab, 0), Some(d("0")));
    }

    #[test]
    fn empty_statement_is_none() {
        let mut symtab = SymbolTable::new();
        assert_eq!(run("", &mut symtab, 0), None);
    }
}
