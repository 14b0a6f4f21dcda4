//! Fixed-point algebraic simplification.
//!
//! A simplification step rewrites the tree bottom-up: children first, then the
//! first matching [`Rule`] of the rebuilt node. Derived connectives are first
//! replaced by their And/Or/Not definitions. Steps repeat until the tree stops
//! changing.
//!
//! Every rule removes at least one node and every normalization removes a
//! derived connective, so each effective step strictly decreases the
//! [`Measure`] of the tree. The loop checks this and also stops after
//! [`SimplifierConfig::max_steps`] steps, so it always terminates.
//!
//! The result is equivalent to the input but not necessarily minimal.

use std::sync::OnceLock;

use log::{debug, warn};

use crate::expr::Expr;
use crate::pattern::{Pattern, Rule};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SimplifierConfig {
    /// Upper bound on the number of simplification steps.
    pub max_steps: usize,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self { max_steps: 256 }
    }
}

/// Termination measure, ordered lexicographically.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Measure {
    pub derived_count: usize,
    pub size: usize,
}

impl Measure {
    pub fn of(expr: &Expr) -> Self {
        Self {
            derived_count: expr.derived_count(),
            size: expr.size(),
        }
    }
}

/// Rewrite rules for each canonical connective, in priority order.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub not: Vec<Rule>,
    pub and: Vec<Rule>,
    pub or: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        use Pattern::{Any, False, True};
        let a = || Pattern::meta(0);
        let b = || Pattern::meta(1);

        let not = vec![
            Rule::new("double negation", Pattern::not(Pattern::not(a())), a()),
            Rule::new("negate true", Pattern::not(True), False),
            Rule::new("negate false", Pattern::not(False), True),
        ];

        let and = vec![
            Rule::new("and idempotence", Pattern::and(a(), a()), a()),
            Rule::new("and identity", Pattern::and(a(), True), a()),
            Rule::new("and annihilation", Pattern::and(Any, False), False),
            Rule::new("and complement", Pattern::and(a(), Pattern::not(a())), False),
            Rule::new(
                "and nested complement",
                Pattern::and(a(), Pattern::and(Pattern::not(a()), Any)),
                False,
            ),
            Rule::new(
                "and nested complement",
                Pattern::and(Pattern::not(a()), Pattern::and(a(), Any)),
                False,
            ),
            Rule::new("and absorption", Pattern::and(a(), Pattern::or(a(), Any)), a()),
            Rule::new(
                "and regrouping",
                Pattern::and(a(), Pattern::and(a(), b())),
                Pattern::and(a(), b()),
            ),
        ];

        let or = vec![
            Rule::new("or idempotence", Pattern::or(a(), a()), a()),
            Rule::new("or identity", Pattern::or(a(), False), a()),
            Rule::new("or annihilation", Pattern::or(Any, True), True),
            Rule::new("or complement", Pattern::or(a(), Pattern::not(a())), True),
            Rule::new(
                "or nested complement",
                Pattern::or(a(), Pattern::or(Pattern::not(a()), Any)),
                True,
            ),
            Rule::new(
                "or nested complement",
                Pattern::or(Pattern::not(a()), Pattern::or(a(), Any)),
                True,
            ),
            Rule::new("or absorption", Pattern::or(a(), Pattern::and(a(), Any)), a()),
            Rule::new(
                "or regrouping",
                Pattern::or(a(), Pattern::or(a(), b())),
                Pattern::or(a(), b()),
            ),
        ];

        Self { not, and, or }
    }

    /// The built-in rules, built on first use.
    pub fn standard() -> &'static RuleSet {
        static RULES: OnceLock<RuleSet> = OnceLock::new();
        RULES.get_or_init(RuleSet::new)
    }

    /// Rules that may fire at the root of `expr`.
    pub fn rules_for(&self, expr: &Expr) -> &[Rule] {
        match expr {
            Expr::Not(_) => &self.not,
            Expr::And(..) => &self.and,
            Expr::Or(..) => &self.or,
            _ => &[],
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Simplifier<'r> {
    config: SimplifierConfig,
    rules: &'r RuleSet,
}

impl Simplifier<'static> {
    pub fn new(config: SimplifierConfig) -> Self {
        Self::with_rules(config, RuleSet::standard())
    }
}

impl<'r> Simplifier<'r> {
    pub fn with_rules(config: SimplifierConfig, rules: &'r RuleSet) -> Self {
        Self { config, rules }
    }

    pub fn config(&self) -> &SimplifierConfig {
        &self.config
    }

    /// One bottom-up rewriting pass.
    pub fn step(&self, expr: Expr) -> Expr {
        if expr.is_derived() {
            return self.step(expr.normalize());
        }
        let expr = expr.fmap(|child| self.step(child));
        self.rewrite(expr)
    }

    fn rewrite(&self, expr: Expr) -> Expr {
        for rule in self.rules.rules_for(&expr) {
            if let Some(result) = rule.apply(&expr) {
                debug!("rule '{}' fired: {} => {}", rule.name, expr, result);
                return result;
            }
        }
        expr
    }

    /// Repeat [`Simplifier::step`] until the tree no longer changes.
    ///
    /// If a step fails to decrease the [`Measure`], or the step budget runs
    /// out, the last accepted tree is returned.
    pub fn simplify(&self, expr: Expr) -> Expr {
        let mut current = expr;
        let mut measure = Measure::of(&current);

        for steps in 0..self.config.max_steps {
            let next = self.step(current.clone());
            if next == current {
                debug!("simplify: fixed point after {} steps: {}", steps, next);
                return next;
            }

            let next_measure = Measure::of(&next);
            if next_measure >= measure {
                warn!(
                    "simplify: step did not shrink {} ({:?} -> {:?}), stopping",
                    current, measure, next_measure
                );
                return current;
            }

            current = next;
            measure = next_measure;
        }

        warn!(
            "simplify: step budget of {} exhausted, stopping at {}",
            self.config.max_steps, current
        );
        current
    }
}

impl Default for Simplifier<'static> {
    fn default() -> Self {
        Self::new(SimplifierConfig::default())
    }
}

/// Simplify with the built-in rules and default configuration.
pub fn simplify(expr: Expr) -> Expr {
    Simplifier::default().simplify(expr)
}
