//! A minimal line-at-a-time driver for [`decicalc::CalculatorContext`].
//!
//! Reads statements from stdin until EOF, printing each result (or nothing,
//! for an empty statement) to stdout. No argument parsing, prompt banner,
//! or line history — those are left to whatever wraps this for real use.

use decicalc::CalculatorContext;
use std::io::{self, BufRead, Write};

fn main() {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let mut ctx = CalculatorContext::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                tracing::error!(%err, "failed to read stdin");
                break;
            }
        };

        if let Some(result) = ctx.execute(&line) {
            let _ = writeln!(stdout, "{result}");
        }
    }
}
