//! End-to-end tests: text in, trees, tables and errors out.

use logic_calc::calculator::{Calculator, CalculatorConfig};
use logic_calc::error::{Error, LexError, ParseError};
use logic_calc::expr::{Assignment, Expr};
use logic_calc::parse;

fn assign(pairs: &[(&str, bool)]) -> Assignment {
    pairs.iter().map(|&(name, value)| (name.to_string(), value)).collect()
}

fn simplified(line: &str) -> Expr {
    let mut calculator = Calculator::new(CalculatorConfig {
        simplify: true,
        ..Default::default()
    });
    calculator.parse(line).unwrap().expr
}

// ─── Parsing ───────────────────────────────────────────────────────────────────

#[test]
fn spellings_are_interchangeable() {
    let expected = parse("p & q | !r").unwrap().expr;
    for line in [
        "p AND q OR NOT r",
        "p && q || ~r",
        "p . q + ¬r",
        "p∧q∨¬r",
        "p ^ q ∨ !r",
        "(p & q) | (!r)",
    ] {
        assert_eq!(parse(line).unwrap().expr, expected, "{}", line);
    }
}

#[test]
fn implication_is_right_associative() {
    let chained = parse("p -> q -> r").unwrap().expr;
    let right = parse("p -> (q -> r)").unwrap().expr;
    let left = parse("(p -> q) -> r").unwrap().expr;
    assert_eq!(chained, right);
    assert_ne!(chained, left);

    let witness = assign(&[("p", false), ("q", true), ("r", false)]);
    assert_eq!(chained.evaluate(&witness), Ok(true));
    assert_eq!(left.evaluate(&witness), Ok(false));
}

#[test]
fn rendering_round_trips() {
    for line in [
        "p & q | !r",
        "p -> q <-> r",
        "p NAND q NOR r XOR s",
        "!(p | T) & F",
        "v & t & f",
    ] {
        let first = parse(line).unwrap();
        let again = parse(&first.to_string()).unwrap();
        assert_eq!(again.expr, first.expr, "{}", line);
        assert_eq!(again.to_string(), first.to_string());
    }
}

#[test]
fn canonical_check_uses_input_tokens() {
    assert!(parse("!(p & q) | r").unwrap().is_canonical());
    assert!(parse("T").unwrap().is_canonical());
    assert!(!parse("p <-> q").unwrap().is_canonical());
    assert!(!parse("p XOR q").unwrap().is_canonical());
}

// ─── Truth tables ──────────────────────────────────────────────────────────────

#[test]
fn disjunction_table() {
    let table = parse("p | q").unwrap().truth_table().unwrap();
    assert_eq!(table.header, ["p", "q", "(p ∨ q)"]);
    assert_eq!(table.rows.len(), 4);
    assert_eq!(table.results(), [true, true, true, false]);
}

#[test]
fn constant_formula_has_a_single_row() {
    let table = parse("T & F").unwrap().truth_table().unwrap();
    assert_eq!(table.rows, vec![vec![false]]);

    let table = parse("V").unwrap().truth_table().unwrap();
    assert_eq!(table.rows, vec![vec![true]]);
}

#[test]
fn tautologies() {
    for line in ["p | !p", "p -> p", "(p -> q) <-> (!q -> !p)", "p XOR q <-> !(p <-> q)"] {
        let table = parse(line).unwrap().truth_table().unwrap();
        assert!(table.is_tautology(), "{}", line);
    }
    assert!(parse("p & !p").unwrap().truth_table().unwrap().is_contradiction());
}

// ─── Simplification ────────────────────────────────────────────────────────────

#[test]
fn simplification_examples() {
    assert_eq!(simplified("p & p"), Expr::var("p"));
    assert_eq!(simplified("p | !p"), Expr::True);
    assert_eq!(simplified("(p & q) | p"), Expr::var("p"));
    assert_eq!(simplified("p & F"), Expr::False);
    assert_eq!(simplified("!!q"), Expr::var("q"));
}

#[test]
fn simplified_table_loses_eliminated_variables() {
    let mut calculator = Calculator::new(CalculatorConfig {
        simplify: true,
        ..Default::default()
    });
    let formula = calculator.parse("q | (p & !p)").unwrap();
    assert_eq!(formula.expr, Expr::var("q"));
    let table = formula.truth_table().unwrap();
    assert_eq!(table.header, ["q", "q"]);
    assert_eq!(table.results(), [true, false]);
}

// ─── Errors ────────────────────────────────────────────────────────────────────

#[test]
fn unclosed_parenthesis() {
    assert_eq!(parse("(p & q").unwrap_err(), Error::Parse(ParseError::UnclosedParenthesis));
}

#[test]
fn missing_operand() {
    assert_eq!(
        parse("p &").unwrap_err(),
        Error::Parse(ParseError::MissingOperand { after: "&".to_string() })
    );
}

#[test]
fn bad_token() {
    assert_eq!(
        parse("p => q").unwrap_err(),
        Error::Lex(LexError::BadToken { found: '=', position: 2 })
    );
    assert!(matches!(parse("P | q").unwrap_err(), Error::Lex(_)));
}

#[test]
fn unassigned_variable() {
    let formula = parse("p & q").unwrap();
    let err = formula.evaluate(&assign(&[("p", true)])).unwrap_err();
    assert_eq!(err.to_string(), "variable `q` has no assigned value");
}
