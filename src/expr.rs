//! Propositional formula trees.
//!
//! [`Expr`] is a closed sum type: constants, variables, negation, and the
//! seven binary connectives. Every node exclusively owns its children.
//!
//! Equality is structural and ignores operand order for the commutative
//! connectives `∧`, `∨` and `⟷`, so `p ∧ q == q ∧ p`.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

use crate::error::EvalError;
use crate::symbol::LogicalSymbol;

/// Values for the variables of a formula.
pub type Assignment = HashMap<String, bool>;

/// Display strings substituted for variable names by [`Expr::stringify`].
pub type RenderMap = HashMap<String, String>;

/// Variable names, in alphabetical order.
pub type Variables = BTreeSet<String>;

#[derive(Debug, Clone)]
pub enum Expr {
    True,
    False,
    Var(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Implies(Box<Expr>, Box<Expr>),
    Equivalent(Box<Expr>, Box<Expr>),
    Xor(Box<Expr>, Box<Expr>),
    Nand(Box<Expr>, Box<Expr>),
    Nor(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn constant(value: bool) -> Self {
        if value {
            Expr::True
        } else {
            Expr::False
        }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn not(operand: Self) -> Self {
        Expr::Not(Box::new(operand))
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Expr::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Expr::Or(Box::new(lhs), Box::new(rhs))
    }

    pub fn implies(lhs: Self, rhs: Self) -> Self {
        Expr::Implies(Box::new(lhs), Box::new(rhs))
    }

    pub fn equivalent(lhs: Self, rhs: Self) -> Self {
        Expr::Equivalent(Box::new(lhs), Box::new(rhs))
    }

    pub fn xor(lhs: Self, rhs: Self) -> Self {
        Expr::Xor(Box::new(lhs), Box::new(rhs))
    }

    pub fn nand(lhs: Self, rhs: Self) -> Self {
        Expr::Nand(Box::new(lhs), Box::new(rhs))
    }

    pub fn nor(lhs: Self, rhs: Self) -> Self {
        Expr::Nor(Box::new(lhs), Box::new(rhs))
    }

    /// Build the binary node for an operator symbol.
    ///
    /// Returns `None` if `symbol` is not a binary connective.
    pub fn binary(symbol: LogicalSymbol, lhs: Self, rhs: Self) -> Option<Self> {
        let expr = match symbol {
            LogicalSymbol::And => Expr::and(lhs, rhs),
            LogicalSymbol::Or => Expr::or(lhs, rhs),
            LogicalSymbol::Implies => Expr::implies(lhs, rhs),
            LogicalSymbol::Equivalent => Expr::equivalent(lhs, rhs),
            LogicalSymbol::Xor => Expr::xor(lhs, rhs),
            LogicalSymbol::Nand => Expr::nand(lhs, rhs),
            LogicalSymbol::Nor => Expr::nor(lhs, rhs),
            _ => return None,
        };
        Some(expr)
    }

    /// The lexical symbol this node was built from.
    pub fn symbol(&self) -> LogicalSymbol {
        match self {
            Expr::True | Expr::False => LogicalSymbol::Constant,
            Expr::Var(_) => LogicalSymbol::Var,
            Expr::Not(_) => LogicalSymbol::Not,
            Expr::And(..) => LogicalSymbol::And,
            Expr::Or(..) => LogicalSymbol::Or,
            Expr::Implies(..) => LogicalSymbol::Implies,
            Expr::Equivalent(..) => LogicalSymbol::Equivalent,
            Expr::Xor(..) => LogicalSymbol::Xor,
            Expr::Nand(..) => LogicalSymbol::Nand,
            Expr::Nor(..) => LogicalSymbol::Nor,
        }
    }

    /// Glyph used when rendering a connective.
    pub fn glyph(&self) -> Option<&'static str> {
        match self {
            Expr::True | Expr::False | Expr::Var(_) => None,
            Expr::Not(_) => Some("¬"),
            Expr::And(..) => Some("∧"),
            Expr::Or(..) => Some("∨"),
            Expr::Implies(..) => Some("→"),
            Expr::Equivalent(..) => Some("⟷"),
            Expr::Xor(..) => Some("⊻"),
            Expr::Nand(..) => Some("↑"),
            Expr::Nor(..) => Some("↓"),
        }
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, Expr::True | Expr::False | Expr::Var(_))
    }

    /// Whether this node is a connective outside the And/Or/Not subset.
    pub fn is_derived(&self) -> bool {
        matches!(
            self,
            Expr::Implies(..) | Expr::Equivalent(..) | Expr::Xor(..) | Expr::Nand(..) | Expr::Nor(..)
        )
    }

    /// Operands of a binary node.
    pub fn operands(&self) -> Option<(&Expr, &Expr)> {
        match self {
            Expr::And(l, r)
            | Expr::Or(l, r)
            | Expr::Implies(l, r)
            | Expr::Equivalent(l, r)
            | Expr::Xor(l, r)
            | Expr::Nand(l, r)
            | Expr::Nor(l, r) => Some((l, r)),
            _ => None,
        }
    }

    /// Rebuild the node with every child replaced by `f(child)`.
    pub fn fmap<F>(self, mut f: F) -> Self
    where
        F: FnMut(Expr) -> Expr,
    {
        match self {
            Expr::True | Expr::False | Expr::Var(_) => self,
            Expr::Not(a) => Expr::not(f(*a)),
            Expr::And(a, b) => Expr::and(f(*a), f(*b)),
            Expr::Or(a, b) => Expr::or(f(*a), f(*b)),
            Expr::Implies(a, b) => Expr::implies(f(*a), f(*b)),
            Expr::Equivalent(a, b) => Expr::equivalent(f(*a), f(*b)),
            Expr::Xor(a, b) => Expr::xor(f(*a), f(*b)),
            Expr::Nand(a, b) => Expr::nand(f(*a), f(*b)),
            Expr::Nor(a, b) => Expr::nor(f(*a), f(*b)),
        }
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        match self {
            Expr::True | Expr::False | Expr::Var(_) => 1,
            Expr::Not(a) => 1 + a.size(),
            _ => match self.operands() {
                Some((l, r)) => 1 + l.size() + r.size(),
                None => 1,
            },
        }
    }

    /// Depth of the tree (0 for leaves).
    pub fn depth(&self) -> usize {
        match self {
            Expr::True | Expr::False | Expr::Var(_) => 0,
            Expr::Not(a) => 1 + a.depth(),
            _ => match self.operands() {
                Some((l, r)) => 1 + l.depth().max(r.depth()),
                None => 0,
            },
        }
    }

    /// Number of derived-connective nodes in the tree.
    pub fn derived_count(&self) -> usize {
        let own = usize::from(self.is_derived());
        match self {
            Expr::True | Expr::False | Expr::Var(_) => 0,
            Expr::Not(a) => a.derived_count(),
            _ => match self.operands() {
                Some((l, r)) => own + l.derived_count() + r.derived_count(),
                None => own,
            },
        }
    }

    /// Whether the tree uses only And, Or, Not, variables and constants.
    pub fn is_canonical(&self) -> bool {
        self.derived_count() == 0
    }

    pub fn variables(&self) -> Variables {
        let mut variables = Variables::new();
        self.collect_variables(&mut variables);
        variables
    }

    fn collect_variables(&self, out: &mut Variables) {
        match self {
            Expr::True | Expr::False => {}
            Expr::Var(name) => {
                out.insert(name.clone());
            }
            Expr::Not(a) => a.collect_variables(out),
            _ => {
                if let Some((l, r)) = self.operands() {
                    l.collect_variables(out);
                    r.collect_variables(out);
                }
            }
        }
    }

    /// Truth value under `assignment`.
    ///
    /// Both operands of every connective are evaluated. Every variable must be
    /// assigned; a missing one is an [`EvalError::UnassignedVariable`].
    pub fn evaluate(&self, assignment: &Assignment) -> Result<bool, EvalError> {
        let value = match self {
            Expr::True => true,
            Expr::False => false,
            Expr::Var(name) => *assignment
                .get(name)
                .ok_or_else(|| EvalError::UnassignedVariable(name.clone()))?,
            Expr::Not(a) => !a.evaluate(assignment)?,
            Expr::And(l, r) => {
                let (l, r) = (l.evaluate(assignment)?, r.evaluate(assignment)?);
                l & r
            }
            Expr::Or(l, r) => {
                let (l, r) = (l.evaluate(assignment)?, r.evaluate(assignment)?);
                l | r
            }
            Expr::Implies(l, r) => {
                let (l, r) = (l.evaluate(assignment)?, r.evaluate(assignment)?);
                !l | r
            }
            Expr::Equivalent(l, r) => l.evaluate(assignment)? == r.evaluate(assignment)?,
            Expr::Xor(l, r) => l.evaluate(assignment)? != r.evaluate(assignment)?,
            Expr::Nand(l, r) => {
                let (l, r) = (l.evaluate(assignment)?, r.evaluate(assignment)?);
                !(l & r)
            }
            Expr::Nor(l, r) => {
                let (l, r) = (l.evaluate(assignment)?, r.evaluate(assignment)?);
                !(l | r)
            }
        };
        Ok(value)
    }

    /// Render as fully parenthesized infix text.
    ///
    /// Variables listed in `names` are shown as their mapped string; the rest
    /// keep their own name. Constants render as `V` and `F`.
    pub fn stringify(&self, names: &RenderMap) -> String {
        Rendered { expr: self, names: Some(names) }.to_string()
    }

    /// Rewrite into the And/Or/Not subset by definitional substitution.
    ///
    /// Children are normalized first, so the result contains no derived
    /// connective at any depth.
    pub fn normalize(self) -> Expr {
        match self.fmap(Expr::normalize) {
            Expr::Implies(l, r) => Expr::or(Expr::not(*l), *r),
            Expr::Equivalent(l, r) => Expr::and(
                Expr::or(Expr::not((*l).clone()), (*r).clone()),
                Expr::or(Expr::not(*r), *l),
            ),
            Expr::Nand(l, r) => Expr::not(Expr::and(*l, *r)),
            Expr::Nor(l, r) => Expr::not(Expr::or(*l, *r)),
            Expr::Xor(l, r) => Expr::and(
                Expr::or((*l).clone(), (*r).clone()),
                Expr::not(Expr::and(*l, *r)),
            ),
            other => other,
        }
    }

    /// Forms definitionally equal to this node, one rewriting step deep.
    pub fn equivalences(&self) -> Vec<Expr> {
        let (a, b) = match self {
            Expr::True | Expr::False | Expr::Var(_) => return Vec::new(),
            Expr::Not(a) => {
                return vec![Expr::nand((**a).clone(), (**a).clone()), Expr::nor((**a).clone(), (**a).clone())];
            }
            _ => match self.operands() {
                Some((l, r)) => (l.clone(), r.clone()),
                None => return Vec::new(),
            },
        };
        match self {
            Expr::And(..) => vec![!(!a | !b)],
            Expr::Or(..) => vec![!(!a & !b)],
            Expr::Implies(..) => vec![!a.clone() | b.clone(), !(a & !b)],
            Expr::Equivalent(..) => vec![Expr::implies(a.clone(), b.clone()) & Expr::implies(b, a)],
            Expr::Nand(..) => vec![!(a.clone() & b.clone()), !a | !b],
            Expr::Nor(..) => vec![!(a.clone() | b.clone()), !a & !b],
            Expr::Xor(..) => vec![
                !Expr::equivalent(a.clone(), b.clone()),
                (a.clone() | b.clone()) & !(a & b),
            ],
            _ => Vec::new(),
        }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expr::True, Expr::True) | (Expr::False, Expr::False) => true,
            (Expr::Var(a), Expr::Var(b)) => a == b,
            (Expr::Not(a), Expr::Not(b)) => a == b,
            (Expr::And(a, b), Expr::And(c, d))
            | (Expr::Or(a, b), Expr::Or(c, d))
            | (Expr::Equivalent(a, b), Expr::Equivalent(c, d)) => (a == c && b == d) || (a == d && b == c),
            (Expr::Implies(a, b), Expr::Implies(c, d))
            | (Expr::Xor(a, b), Expr::Xor(c, d))
            | (Expr::Nand(a, b), Expr::Nand(c, d))
            | (Expr::Nor(a, b), Expr::Nor(c, d)) => a == c && b == d,
            _ => false,
        }
    }
}

impl Eq for Expr {}

struct Rendered<'a> {
    expr: &'a Expr,
    names: Option<&'a RenderMap>,
}

impl<'a> Rendered<'a> {
    fn child(&self, expr: &'a Expr) -> Rendered<'a> {
        Rendered { expr, names: self.names }
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expr {
            Expr::True => f.write_str("V"),
            Expr::False => f.write_str("F"),
            Expr::Var(name) => match self.names.and_then(|names| names.get(name)) {
                Some(shown) => f.write_str(shown),
                None => f.write_str(name),
            },
            Expr::Not(a) => write!(f, "(¬{})", self.child(a)),
            expr => match (expr.operands(), expr.glyph()) {
                (Some((l, r)), Some(glyph)) => write!(f, "({} {} {})", self.child(l), glyph, self.child(r)),
                _ => Ok(()),
            },
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Rendered { expr: self, names: None }.fmt(f)
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Self::Output {
        Expr::not(self)
    }
}

impl BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Self) -> Self::Output {
        Expr::and(self, rhs)
    }
}

impl BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Self) -> Self::Output {
        Expr::or(self, rhs)
    }
}

impl BitXor for Expr {
    type Output = Expr;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Expr::xor(self, rhs)
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

    fn all_assignments() -> Vec<Assignment> {
        let mut result = Vec::new();
        for bits in 0..4u8 {
            let mut assignment = Assignment::new();
            assignment.insert("p".to_string(), bits & 2 != 0);
            assignment.insert("q".to_string(), bits & 1 != 0);
            result.push(assignment);
        }
        result
    }

    fn table(expr: &Expr) -> Vec<bool> {
        all_assignments().iter().map(|a| expr.evaluate(a).unwrap()).collect()
    }

    #[test]
    fn test_evaluate_connectives() {
        // Rows: (p, q) = FF, FT, TF, TT
        assert_eq!(table(&(p() & q())), [false, false, false, true]);
        assert_eq!(table(&(p() | q())), [false, true, true, true]);
        assert_eq!(table(&Expr::implies(p(), q())), [true, true, false, true]);
        assert_eq!(table(&Expr::equivalent(p(), q())), [true, false, false, true]);
        assert_eq!(table(&(p() ^ q())), [false, true, true, false]);
        assert_eq!(table(&Expr::nand(p(), q())), [true, true, true, false]);
        assert_eq!(table(&Expr::nor(p(), q())), [true, false, false, false]);
        assert_eq!(table(&!p()), [true, true, false, false]);
    }

    #[test]
    fn test_evaluate_unassigned_variable() {
        let expr = p() & Expr::var("r");
        let mut assignment = Assignment::new();
        assignment.insert("p".to_string(), true);
        assert_eq!(
            expr.evaluate(&assignment),
            Err(EvalError::UnassignedVariable("r".to_string()))
        );
        assert_eq!(Expr::True.evaluate(&Assignment::new()), Ok(true));
    }

    #[test]
    fn test_stringify() {
        let expr = Expr::implies(p() & !q(), Expr::False);
        assert_eq!(expr.to_string(), "((p ∧ (¬q)) → F)");
        let mut names = RenderMap::new();
        names.insert("p".to_string(), "rain".to_string());
        assert_eq!(expr.stringify(&names), "((rain ∧ (¬q)) → F)");
        assert_eq!(Expr::True.to_string(), "V");
    }

    #[test]
    fn test_stringify_glyphs() {
        assert_eq!(Expr::equivalent(p(), q()).to_string(), "(p ⟷ q)");
        assert_eq!((p() ^ q()).to_string(), "(p ⊻ q)");
        assert_eq!(Expr::nand(p(), q()).to_string(), "(p ↑ q)");
        assert_eq!(Expr::nor(p(), q()).to_string(), "(p ↓ q)");
        assert_eq!((p() | q()).to_string(), "(p ∨ q)");
    }

    #[test]
    fn test_commutative_equality() {
        assert_eq!(p() & q(), q() & p());
        assert_eq!(p() | q(), q() | p());
        assert_eq!(Expr::equivalent(p(), q()), Expr::equivalent(q(), p()));
        assert_ne!(Expr::implies(p(), q()), Expr::implies(q(), p()));
        assert_ne!(p() & q(), p() | q());
        assert_eq!(!(p() & q()), !(q() & p()));
        assert_ne!(!p(), p());
    }

    #[test]
    fn test_normalize_removes_derived_connectives() {
        let exprs = [
            Expr::implies(p(), q()),
            Expr::equivalent(p(), q()),
            p() ^ q(),
            Expr::nand(p(), q()),
            Expr::nor(p(), q()),
            Expr::implies(Expr::nor(p(), q()), p() ^ q()),
        ];
        for expr in exprs {
            let normalized = expr.clone().normalize();
            assert!(normalized.is_canonical(), "{}", normalized);
            assert_eq!(table(&normalized), table(&expr), "{}", expr);
        }
    }

    #[test]
    fn test_normalize_shapes() {
        assert_eq!(Expr::implies(p(), q()).normalize(), !p() | q());
        assert_eq!(Expr::nand(p(), q()).normalize(), !(p() & q()));
        assert_eq!(Expr::nor(p(), q()).normalize(), !(p() | q()));
        assert_eq!((p() ^ q()).normalize(), (p() | q()) & !(p() & q()));
        assert_eq!(Expr::equivalent(p(), q()).normalize(), (!p() | q()) & (!q() | p()));
    }

    #[test]
    fn test_equivalences_agree() {
        let exprs = [
            !p(),
            p() & q(),
            p() | q(),
            Expr::implies(p(), q()),
            Expr::equivalent(p(), q()),
            p() ^ q(),
            Expr::nand(p(), q()),
            Expr::nor(p(), q()),
        ];
        for expr in exprs {
            let forms = expr.equivalences();
            assert!(!forms.is_empty(), "{}", expr);
            for form in forms {
                assert_eq!(table(&form), table(&expr), "{} vs {}", form, expr);
            }
        }
        assert!(p().equivalences().is_empty());
    }

    #[test]
    fn test_de_morgan_duals() {
        let mut assignment = Assignment::new();
        assignment.insert("p".to_string(), true);
        assignment.insert("q".to_string(), false);

        assert_eq!((p() & q()).equivalences(), vec![!(!p() | !q())]);
        assert_eq!((p() | q()).equivalences(), vec![!(!p() & !q())]);
        for expr in [p() & q(), p() | q()] {
            let expected = expr.evaluate(&assignment);
            for form in expr.equivalences() {
                assert_eq!(form.evaluate(&assignment), expected, "{} vs {}", form, expr);
            }
        }
    }

    #[test]
    fn test_metrics() {
        let expr = Expr::implies(p() & q(), !p());
        assert_eq!(expr.size(), 6);
        assert_eq!(expr.depth(), 2);
        assert_eq!(expr.derived_count(), 1);
        assert!(!expr.is_canonical());
        assert_eq!(expr.variables().into_iter().collect::<Vec<_>>(), ["p", "q"]);
    }

    #[test]
    fn test_binary_from_symbol() {
        assert_eq!(Expr::binary(LogicalSymbol::Nor, p(), q()), Some(Expr::nor(p(), q())));
        assert_eq!(Expr::binary(LogicalSymbol::Not, p(), q()), None);
        assert_eq!(Expr::nor(p(), q()).symbol(), LogicalSymbol::Nor);
    }
}
