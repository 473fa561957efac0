//! An interactive arbitrary-precision decimal calculator engine.
//!
//! This crate provides the core of a `bc`-style calculator: exact (or
//! configurably truncated) decimal arithmetic, an infix expression parser,
//! and an evaluator that threads variable assignments through a symbol
//! table. It does not provide a shell, argument parsing, or interactive
//! history — those are external collaborators that consume the three
//! entry points on [`CalculatorContext`].
//!
//! # Module overview
//!
//! - `decimal`
//!   Arbitrary-precision signed decimal arithmetic: construction,
//!   comparison, the four basic operations, square root, integer
//!   exponentiation, and host-precision transcendental functions.
//!
//! - `token`
//!   The tagged token record produced by the lexer and consumed by the
//!   parser and evaluator.
//!
//! - `lexer` / `parser`
//!   String to infix token sequence, including recursive parsing of
//!   function-call argument lists.
//!
//! - `opstack`
//!   The growable operator stack used by the shunting-yard conversion.
//!
//! - `symtab`
//!   A fixed-bucket-count hash table mapping variable name to decimal
//!   value.
//!
//! - `evaluator`
//!   Infix-to-postfix conversion (shunting-yard) and postfix evaluation
//!   against a symbol table.
//!
//! - `diagnostics`
//!   A single warning sink with an installable handler, used by every
//!   component to report recoverable errors without aborting evaluation.
//!
//! - `context`
//!   The three entry points a caller actually needs:
//!   [`CalculatorContext::new`], [`CalculatorContext::execute`], and
//!   [`CalculatorContext::reset`].
//!
//! # Design goals
//!
//! - No process-wide mutable state: every calculator is an explicit
//!   [`CalculatorContext`], so a caller can run more than one independently.
//! - Recoverable errors never panic or abort a statement; they are routed
//!   through `diagnostics::warn` and the offending subexpression evaluates
//!   to zero.
//! - Scale (fractional digit count) is tracked explicitly and is never
//!   trimmed implicitly — `to_string` always emits exactly the carried
//!   scale.

pub mod context;
pub mod decimal;
pub mod diagnostics;
pub mod evaluator;
pub mod lexer;
pub mod opstack;
pub mod parser;
pub mod symtab;
pub mod token;

pub use context::CalculatorContext;
pub use decimal::Decimal;
pub use diagnostics::CalcError;

/// Default bucket count for a fresh [`symtab::SymbolTable`].
pub const DEFAULT_SYMTAB_BUCKETS: usize = 1000;

/// Default scale used when a caller does not request one explicitly
/// (`bc`-style: zero fractional digits).
pub const DEFAULT_SCALE: usize = 0;

/// Initial capacity of a freshly constructed [`opstack::OperatorStack`].
pub const OPSTACK_INITIAL_CAPACITY: usize = 20;

/// Growth increment applied each time an [`opstack::OperatorStack`] fills.
pub const OPSTACK_GROWTH_INCREMENT: usize = 20;
