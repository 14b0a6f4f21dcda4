//! # logic-calc: a propositional logic calculator
//!
//! **`logic-calc`** reads boolean formulas written in a loose, human-friendly notation,
//! turns them into expression trees, and lets you evaluate, rewrite and tabulate them.
//!
//! ## Notation
//!
//! Variables are single lowercase letters `a`--`z`. Constants are `V` or `T` (true) and `F` (false).
//! Every connective accepts several spellings, from keywords to ASCII art to Unicode glyphs:
//!
//! | Connective  | Spellings                              | Precedence |
//! |-------------|----------------------------------------|------------|
//! | not         | `NOT` `!` `~` `¬`                      | highest    |
//! | nand        | `NAND` `↑`                             |            |
//! | and         | `AND` `&&` `&` `.` `∧` `^`             |            |
//! | xor         | `XOR` `⊻` `⊕`                          |            |
//! | nor         | `NOR` `↓`                              |            |
//! | or          | `OR` `\|\|` `\|` `+` `∨`               |            |
//! | implies     | `IMPLIES` `->` `→` `⇒`                 |            |
//! | equivalent  | `EQUAL` `<->` `⟷` `≡` `==` `⇔`         | lowest     |
//!
//! Binary connectives are left-associative, except implication: `p -> q -> r` means `p -> (q -> r)`.
//! Adjacent characters are matched greedily, so `NOTp` reads as `NOT p` and `&&&` as `&& &`.
//!
//! ## Basic Usage
//!
//! ```rust
//! use logic_calc::expr::Assignment;
//!
//! let formula = logic_calc::parse("p & !q -> r").unwrap();
//! assert_eq!(formula.to_string(), "((p ∧ (¬q)) → r)");
//!
//! let mut assignment = Assignment::new();
//! assignment.insert("p".to_string(), true);
//! assignment.insert("q".to_string(), false);
//! assignment.insert("r".to_string(), false);
//! assert!(!formula.evaluate(&assignment).unwrap());
//!
//! let table = formula.truth_table().unwrap();
//! assert_eq!(table.rows.len(), 8);
//! ```
//!
//! ## Rewriting
//!
//! [`Expr::normalize`][crate::expr::Expr::normalize] expands the derived connectives
//! (implication, equivalence, xor, nand, nor) into and/or/not.
//! The [`simplify`] module applies algebraic laws (identity, idempotence, complement, absorption)
//! until the formula stops changing:
//!
//! ```rust
//! use logic_calc::expr::Expr;
//! use logic_calc::simplify::simplify;
//!
//! let p = Expr::var("p");
//! let q = Expr::var("q");
//! assert_eq!(simplify((p.clone() & q) | p.clone()), p);
//! ```
//!
//! ## Core Components
//!
//! - **[`lexer`]**: Longest-match tokenizer over the symbol [`trie`].
//! - **[`parser`]**: Two-stack precedence parser producing an [`Expr`][crate::expr::Expr].
//! - **[`expr`]**: The expression tree: evaluation, rendering, normalization.
//! - **[`simplify`]**: Fixed-point rewriting with the rules from [`pattern`].
//! - **[`table`]**: Truth table generation.
//! - **[`calculator`]**: Everything above behind a single `parse` call.

pub mod calculator;
pub mod error;
pub mod expr;
pub mod lexer;
pub mod parser;
pub mod pattern;
pub mod simplify;
pub mod source;
pub mod symbol;
pub mod table;
pub mod trie;

pub use calculator::{parse, Calculator, CalculatorConfig, Formula};
pub use error::{Error, Result};
pub use expr::Expr;
