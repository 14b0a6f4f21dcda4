//! Truth tables.
//!
//! Rows enumerate every assignment of the formula's variables. The first
//! variable (alphabetically) varies slowest and the first row assigns `true`
//! to everything, so for `p ∨ q` the rows are `VV`, `VF`, `FV`, `FF`.

use std::fmt;

use crate::error::EvalError;
use crate::expr::{Assignment, Expr};

/// Text shown for a truth value.
pub fn literal(value: bool) -> &'static str {
    if value {
        "V"
    } else {
        "F"
    }
}

/// Truth table generator for one formula.
#[derive(Debug, Clone)]
pub struct TruthTable<'e> {
    expr: &'e Expr,
    variables: Vec<String>,
}

impl<'e> TruthTable<'e> {
    /// Table for `expr` over `variables`, taken in the given order.
    pub fn new<I, S>(expr: &'e Expr, variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expr,
            variables: variables.into_iter().map(Into::into).collect(),
        }
    }

    /// Table for `expr` over its own variables.
    pub fn of(expr: &'e Expr) -> Self {
        Self::new(expr, expr.variables())
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn row_count(&self) -> usize {
        1 << self.variables.len()
    }

    /// Variable names followed by the rendered formula.
    pub fn header(&self) -> Vec<String> {
        let mut header = self.variables.clone();
        header.push(self.expr.to_string());
        header
    }

    /// The assignment for row `row`.
    pub fn assignment(&self, row: usize) -> Assignment {
        let n = self.variables.len();
        self.variables
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), (row >> (n - 1 - i)) & 1 == 0))
            .collect()
    }

    pub fn assignments(&self) -> impl Iterator<Item = Assignment> + '_ {
        (0..self.row_count()).map(move |row| self.assignment(row))
    }

    /// Evaluate every row.
    pub fn generate(&self) -> Result<Table, EvalError> {
        let rows = self
            .assignments()
            .map(|assignment| {
                let result = self.expr.evaluate(&assignment)?;
                let mut row: Vec<bool> = self.variables.iter().map(|name| assignment[name]).collect();
                row.push(result);
                Ok(row)
            })
            .collect::<Result<Vec<_>, EvalError>>()?;

        Ok(Table {
            header: self.header(),
            rows,
        })
    }
}

/// Evaluated truth table. Each row holds the variable values followed by the
/// value of the formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<bool>>,
}

impl Table {
    /// Formula values, one per row.
    pub fn results(&self) -> Vec<bool> {
        self.rows.iter().filter_map(|row| row.last().copied()).collect()
    }

    pub fn is_tautology(&self) -> bool {
        self.results().into_iter().all(|value| value)
    }

    pub fn is_contradiction(&self) -> bool {
        self.results().into_iter().all(|value| !value)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header.join("\t"))?;
        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(|&value| literal(value)).collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        Ok(())
    }
}
