//! Error types for lexing, parsing and evaluating formulas.

use thiserror::Error;

/// Failure to turn input text into tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// The character starts no registered literal and is not a variable.
    #[error("bad token `{found}` at position {position}")]
    BadToken { found: char, position: usize },
}

/// Structural violation detected while building the expression tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty formula")]
    Empty,

    #[error("operator `{after}` is missing an operand")]
    MissingOperand { after: String },

    #[error("expected a variable, constant or parenthesis, found `{found}`")]
    ExpectedOperand { found: String },

    #[error("expected an operator or closing parenthesis, found `{found}`")]
    ExpectedOperator { found: String },

    #[error("opening parenthesis has no matching closing parenthesis")]
    UnclosedParenthesis,

    #[error("closing parenthesis has no matching opening parenthesis")]
    UnmatchedClose,

    #[error("no operand for negation `{negation}`")]
    NothingToNegate { negation: String },
}

/// Failure to evaluate an expression under an assignment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("variable `{0}` has no assigned value")]
    UnassignedVariable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_token_message() {
        let err = LexError::BadToken { found: '#', position: 3 };
        let msg = err.to_string();
        assert!(msg.contains('#'));
        assert!(msg.contains("position 3"));
    }

    #[test]
    fn test_parse_error_converts() {
        let err: Error = ParseError::UnclosedParenthesis.into();
        assert!(matches!(err, Error::Parse(ParseError::UnclosedParenthesis)));
        assert_eq!(err.to_string(), ParseError::UnclosedParenthesis.to_string());
    }

    #[test]
    fn test_eval_error_names_variable() {
        let err = EvalError::UnassignedVariable("q".to_string());
        assert!(err.to_string().contains("`q`"));
    }
}
