//! Rewrite rules over a small pattern language.
//!
//! A [`Pattern`] is matched one way against an [`Expr`]: metavariables in the
//! pattern bind subtrees of the expression, the expression itself is never
//! instantiated. `And` and `Or` patterns match in either operand order.

use std::fmt;

use crate::expr::Expr;

/// Number of metavariable slots a rule may use.
pub const SLOTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Matches any subtree without binding it.
    Any,
    /// Binds a subtree; repeated occurrences must bind structurally-equal trees.
    Meta(usize),
    True,
    False,
    Not(Box<Pattern>),
    And(Box<Pattern>, Box<Pattern>),
    Or(Box<Pattern>, Box<Pattern>),
}

impl Pattern {
    pub fn meta(slot: usize) -> Self {
        assert!(slot < SLOTS, "metavariable slot {} out of range", slot);
        Pattern::Meta(slot)
    }

    pub fn not(p: Self) -> Self {
        Pattern::Not(Box::new(p))
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Pattern::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Pattern::Or(Box::new(lhs), Box::new(rhs))
    }

    fn has_wildcard(&self) -> bool {
        match self {
            Pattern::Any => true,
            Pattern::Meta(_) | Pattern::True | Pattern::False => false,
            Pattern::Not(p) => p.has_wildcard(),
            Pattern::And(l, r) | Pattern::Or(l, r) => l.has_wildcard() || r.has_wildcard(),
        }
    }

    /// Match `expr` against this pattern, starting from no bindings.
    pub fn matches<'e>(&self, expr: &'e Expr) -> Option<Bindings<'e>> {
        let mut bindings = Bindings::default();
        if unify(self, expr, &mut bindings) {
            Some(bindings)
        } else {
            None
        }
    }

    /// Build the expression described by this pattern.
    ///
    /// Returns `None` if the pattern contains a wildcard or an unbound
    /// metavariable.
    pub fn instantiate(&self, bindings: &Bindings<'_>) -> Option<Expr> {
        let expr = match self {
            Pattern::Any => return None,
            Pattern::Meta(slot) => bindings.get(*slot)?.clone(),
            Pattern::True => Expr::True,
            Pattern::False => Expr::False,
            Pattern::Not(p) => Expr::not(p.instantiate(bindings)?),
            Pattern::And(l, r) => Expr::and(l.instantiate(bindings)?, r.instantiate(bindings)?),
            Pattern::Or(l, r) => Expr::or(l.instantiate(bindings)?, r.instantiate(bindings)?),
        };
        Some(expr)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Any => f.write_str("_"),
            Pattern::Meta(slot) => write!(f, "{}", (b'a' + *slot as u8) as char),
            Pattern::True => f.write_str("V"),
            Pattern::False => f.write_str("F"),
            Pattern::Not(p) => write!(f, "(¬{})", p),
            Pattern::And(l, r) => write!(f, "({} ∧ {})", l, r),
            Pattern::Or(l, r) => write!(f, "({} ∨ {})", l, r),
        }
    }
}

/// Subtrees bound to metavariable slots during a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bindings<'e> {
    slots: [Option<&'e Expr>; SLOTS],
}

impl<'e> Bindings<'e> {
    pub fn get(&self, slot: usize) -> Option<&'e Expr> {
        self.slots.get(slot).copied().flatten()
    }

    /// Bind `slot` to `expr`, or check it against an existing binding.
    ///
    /// A slot outside the supported range never matches.
    fn bind(&mut self, slot: usize, expr: &'e Expr) -> bool {
        let Some(entry) = self.slots.get_mut(slot) else {
            return false;
        };
        match entry {
            Some(bound) => *bound == expr,
            None => {
                *entry = Some(expr);
                true
            }
        }
    }
}

fn unify<'e>(pattern: &Pattern, expr: &'e Expr, bindings: &mut Bindings<'e>) -> bool {
    match (pattern, expr) {
        (Pattern::Any, _) => true,
        (Pattern::Meta(slot), e) => bindings.bind(*slot, e),
        (Pattern::True, Expr::True) | (Pattern::False, Expr::False) => true,
        (Pattern::Not(p), Expr::Not(e)) => unify(p, e, bindings),
        (Pattern::And(pl, pr), Expr::And(el, er)) | (Pattern::Or(pl, pr), Expr::Or(el, er)) => {
            unify_commutative(pl, pr, el, er, bindings)
        }
        _ => false,
    }
}

/// Try both operand orders, restoring the bindings before the second attempt.
fn unify_commutative<'e>(
    pl: &Pattern,
    pr: &Pattern,
    el: &'e Expr,
    er: &'e Expr,
    bindings: &mut Bindings<'e>,
) -> bool {
    let saved = *bindings;
    if unify(pl, el, bindings) && unify(pr, er, bindings) {
        return true;
    }
    *bindings = saved;
    if unify(pl, er, bindings) && unify(pr, el, bindings) {
        return true;
    }
    *bindings = saved;
    false
}

/// Named `pattern -> replacement` pair.
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: &'static str,
    pub pattern: Pattern,
    pub replacement: Pattern,
}

impl Rule {
    /// # Panics
    ///
    /// Panics if `replacement` contains a wildcard.
    pub fn new(name: &'static str, pattern: Pattern, replacement: Pattern) -> Self {
        assert!(
            !replacement.has_wildcard(),
            "rule {}: replacement {} contains a wildcard",
            name,
            replacement
        );
        Self {
            name,
            pattern,
            replacement,
        }
    }

    /// Rewrite `expr` if the pattern matches it at the root.
    pub fn apply(&self, expr: &Expr) -> Option<Expr> {
        let bindings = self.pattern.matches(expr)?;
        self.replacement.instantiate(&bindings)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} => {}", self.name, self.pattern, self.replacement)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn p() -> Expr {
        Expr::var("p")
    }

    fn q() -> Expr {
        Expr::var("q")
    }

    #[test]
    fn test_meta_binds_subtree() {
        let pattern = Pattern::not(Pattern::not(Pattern::meta(0)));
        let expr = !!(p() & q());
        let bindings = pattern.matches(&expr).unwrap();
        assert_eq!(bindings.get(0), Some(&(p() & q())));
        assert_eq!(bindings.get(1), None);
        assert!(pattern.matches(&!p()).is_none());
    }

    #[test]
    fn test_repeated_meta_requires_equal_subtrees() {
        let pattern = Pattern::and(Pattern::meta(0), Pattern::meta(0));
        assert!(pattern.matches(&(p() & p())).is_some());
        assert!(pattern.matches(&(p() & q())).is_none());
        // Equality of bound subtrees is itself commutative.
        assert!(pattern.matches(&((p() | q()) & (q() | p()))).is_some());
    }

    #[test]
    fn test_commutative_match_backtracks() {
        // a ∧ ¬a, written with the negation first.
        let pattern = Pattern::and(Pattern::meta(0), Pattern::not(Pattern::meta(0)));
        let expr = !q() & q();
        let bindings = pattern.matches(&expr).unwrap();
        assert_eq!(bindings.get(0), Some(&q()));

        let nested = Pattern::and(Pattern::meta(0), Pattern::and(Pattern::not(Pattern::meta(0)), Pattern::Any));
        assert!(nested.matches(&((q() & !p()) & p())).is_some());
        assert!(nested.matches(&((q() & !p()) & q())).is_none());
    }

    #[test]
    fn test_wildcard_does_not_bind() {
        let pattern = Pattern::or(Pattern::Any, Pattern::True);
        let expr = p() | Expr::True;
        let bindings = pattern.matches(&expr).unwrap();
        assert_eq!(bindings, Bindings::default());
        assert!(pattern.matches(&(p() & Expr::True)).is_none());
    }

    #[test]
    fn test_rule_apply() {
        let rule = Rule::new(
            "regroup",
            Pattern::and(Pattern::meta(0), Pattern::and(Pattern::meta(0), Pattern::meta(1))),
            Pattern::and(Pattern::meta(0), Pattern::meta(1)),
        );
        assert_eq!(rule.apply(&((q() & p()) & p())), Some(p() & q()));
        assert_eq!(rule.apply(&(p() & q())), None);
        assert_eq!(rule.to_string(), "regroup: (a ∧ (a ∧ b)) => (a ∧ b)");
    }

    #[test]
    fn test_out_of_range_slot_does_not_match() {
        let pattern = Pattern::Meta(SLOTS + 3);
        assert!(pattern.matches(&p()).is_none());
        let nested = Pattern::and(Pattern::meta(0), Pattern::Meta(SLOTS));
        assert!(nested.matches(&(p() & q())).is_none());
        assert_eq!(Rule::new("unbound", Pattern::Meta(5), Pattern::Meta(5)).apply(&p()), None);
    }

    #[test]
    #[should_panic(expected = "contains a wildcard")]
    fn test_rule_rejects_wildcard_replacement() {
        Rule::new("bad", Pattern::meta(0), Pattern::Any);
    }

    #[test]
    fn test_instantiate_unbound_meta() {
        assert_eq!(Pattern::meta(1).instantiate(&Bindings::default()), None);
        assert_eq!(Pattern::not(Pattern::False).instantiate(&Bindings::default()), Some(!Expr::False));
    }
}
