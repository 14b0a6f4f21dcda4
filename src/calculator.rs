//! Line-oriented front end: tokenize, parse, and optionally rewrite a formula.

use std::fmt;

use log::debug;

use crate::error::{EvalError, Result};
use crate::expr::{Assignment, Expr, Variables};
use crate::lexer::{Token, TokenStream};
use crate::parser::{self, Parser};
use crate::simplify::{Simplifier, SimplifierConfig};
use crate::table::{Table, TruthTable};

/// Post-processing applied to every parsed formula.
///
/// # Examples
///
/// ```
/// use logic_calc::calculator::{Calculator, CalculatorConfig};
///
/// let mut calculator = Calculator::new(CalculatorConfig {
///     simplify: true,
///     ..Default::default()
/// });
/// let formula = calculator.parse("p | !p").unwrap();
/// assert_eq!(formula.to_string(), "V");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CalculatorConfig {
    /// Rewrite into the And/Or/Not subset after parsing.
    pub normalize: bool,
    /// Run the simplifier after parsing (and after normalizing, if enabled).
    pub simplify: bool,
    pub simplifier: SimplifierConfig,
}

/// A parsed formula and the tokens it was read from.
#[derive(Debug, Clone)]
pub struct Formula {
    pub expr: Expr,
    pub variables: Variables,
    pub tokens: Vec<Token>,
}

impl Formula {
    /// Whether the input used only And, Or and Not connectives.
    pub fn is_canonical(&self) -> bool {
        parser::is_canonical(&self.tokens)
    }

    pub fn evaluate(&self, assignment: &Assignment) -> Result<bool, EvalError> {
        self.expr.evaluate(assignment)
    }

    pub fn truth_table(&self) -> Result<Table, EvalError> {
        TruthTable::new(&self.expr, self.variables.iter().cloned()).generate()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

#[derive(Debug, Default)]
pub struct Calculator {
    config: CalculatorConfig,
    parser: Parser,
}

impl Calculator {
    pub fn new(config: CalculatorConfig) -> Self {
        Self {
            config,
            parser: Parser::new(),
        }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn parse(&mut self, line: &str) -> Result<Formula> {
        let tokens = TokenStream::new(line).tokenize()?;
        let (mut expr, mut variables) = self.parser.parse(&tokens)?;
        debug!("parsed {:?} as {}", line, expr);

        if self.config.normalize {
            expr = expr.normalize();
            debug!("normalized: {}", expr);
        }
        if self.config.simplify {
            expr = Simplifier::new(self.config.simplifier).simplify(expr);
            variables = expr.variables();
            debug!("simplified: {}", expr);
        }

        Ok(Formula {
            expr,
            variables,
            tokens,
        })
    }
}

/// Parse one line with the default configuration.
pub fn parse(line: &str) -> Result<Formula> {
    Calculator::default().parse(line)
}
