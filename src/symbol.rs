//! Logical symbols, their literals, and the shared lookup tables.
//!
//! The forward table lists every literal accepted for each [`LogicalSymbol`].
//! [`SymbolTable`] inverts it into a `literal -> symbol` map and builds the
//! [`WordTree`] used for longest-match lexing. The standard table is built
//! once per process and never mutated afterwards.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::trie::WordTree;

/// Kind of a lexical element.
///
/// The declaration order is the binary-operator precedence: a symbol declared
/// earlier binds looser. [`LogicalSymbol::Eof`] is the loosest of all so that
/// the end marker forces every pending reduction.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum LogicalSymbol {
    Eof,
    Equivalent,
    Implies,
    Or,
    Nor,
    Xor,
    And,
    Nand,
    Not,
    Close,
    Open,
    Var,
    Constant,
}

impl LogicalSymbol {
    pub const ALL: [LogicalSymbol; 13] = [
        LogicalSymbol::Eof,
        LogicalSymbol::Equivalent,
        LogicalSymbol::Implies,
        LogicalSymbol::Or,
        LogicalSymbol::Nor,
        LogicalSymbol::Xor,
        LogicalSymbol::And,
        LogicalSymbol::Nand,
        LogicalSymbol::Not,
        LogicalSymbol::Close,
        LogicalSymbol::Open,
        LogicalSymbol::Var,
        LogicalSymbol::Constant,
    ];

    /// Binding strength. Lower binds looser; the end marker is `-1`.
    pub fn precedence(self) -> i8 {
        self as i8 - 1
    }

    pub fn is_binary_operator(self) -> bool {
        matches!(
            self,
            LogicalSymbol::Equivalent
                | LogicalSymbol::Implies
                | LogicalSymbol::Or
                | LogicalSymbol::Nor
                | LogicalSymbol::Xor
                | LogicalSymbol::And
                | LogicalSymbol::Nand
        )
    }

    pub fn is_operand(self) -> bool {
        matches!(self, LogicalSymbol::Var | LogicalSymbol::Constant)
    }

    /// Whether the symbol belongs to the And/Or/Not canonical subset.
    pub fn is_canonical(self) -> bool {
        matches!(
            self,
            LogicalSymbol::Open
                | LogicalSymbol::Close
                | LogicalSymbol::Constant
                | LogicalSymbol::Var
                | LogicalSymbol::And
                | LogicalSymbol::Or
                | LogicalSymbol::Not
                | LogicalSymbol::Eof
        )
    }

    /// Accepted literals. Empty for the end marker.
    pub fn literals(self) -> &'static [&'static str] {
        match self {
            LogicalSymbol::Eof => &[],
            LogicalSymbol::Equivalent => &["EQUAL", "<->", "⟷", "≡", "==", "⇔"],
            LogicalSymbol::Implies => &["IMPLIES", "->", "→", "⇒"],
            LogicalSymbol::Or => &["OR", "||", "|", "+", "∨"],
            LogicalSymbol::Nor => &["NOR", "↓"],
            LogicalSymbol::Xor => &["XOR", "⊻", "⊕"],
            LogicalSymbol::And => &["AND", "&&", "&", ".", "∧", "^"],
            LogicalSymbol::Nand => &["NAND", "↑"],
            LogicalSymbol::Not => &["NOT", "!", "~", "¬"],
            LogicalSymbol::Close => &[")"],
            LogicalSymbol::Open => &["("],
            LogicalSymbol::Var => VAR_LITERALS,
            LogicalSymbol::Constant => &["V", "T", "F"],
        }
    }
}

impl fmt::Display for LogicalSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogicalSymbol::Eof => "EOF",
            LogicalSymbol::Equivalent => "EQUIVALENT",
            LogicalSymbol::Implies => "IMPLIES",
            LogicalSymbol::Or => "OR",
            LogicalSymbol::Nor => "NOR",
            LogicalSymbol::Xor => "XOR",
            LogicalSymbol::And => "AND",
            LogicalSymbol::Nand => "NAND",
            LogicalSymbol::Not => "NOT",
            LogicalSymbol::Close => "CLOSE",
            LogicalSymbol::Open => "OPEN",
            LogicalSymbol::Var => "VAR",
            LogicalSymbol::Constant => "CONSTANT",
        };
        f.write_str(name)
    }
}

pub const TRUE_LITERALS: &[&str] = &["V", "T"];
pub const FALSE_LITERALS: &[&str] = &["F"];

const VAR_LITERALS: &[&str] = &[
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s", "t", "u", "v",
    "w", "x", "y", "z",
];

/// Reverse lookup and word tree over every literal.
#[derive(Debug)]
pub struct SymbolTable {
    reverse: HashMap<&'static str, LogicalSymbol>,
    constants: HashMap<char, bool>,
    trie: WordTree,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut reverse = HashMap::new();
        for symbol in LogicalSymbol::ALL {
            for &literal in symbol.literals() {
                let previous = reverse.insert(literal, symbol);
                assert!(
                    previous.is_none(),
                    "literal {:?} is registered for both {} and {}",
                    literal,
                    previous.unwrap_or(symbol),
                    symbol
                );
            }
        }

        let mut constants = HashMap::new();
        for (literals, value) in [(TRUE_LITERALS, true), (FALSE_LITERALS, false)] {
            for literal in literals {
                let mut chars = literal.chars();
                if let (Some(ch), None) = (chars.next(), chars.next()) {
                    constants.insert(ch, value);
                }
            }
        }

        let trie = WordTree::build(reverse.keys().copied());

        Self {
            reverse,
            constants,
            trie,
        }
    }

    /// The process-wide table, built on first use.
    pub fn standard() -> &'static SymbolTable {
        static TABLE: OnceLock<SymbolTable> = OnceLock::new();
        TABLE.get_or_init(SymbolTable::new)
    }

    pub fn lookup(&self, literal: &str) -> Option<LogicalSymbol> {
        self.reverse.get(literal).copied()
    }

    /// Boolean value of a single-character constant literal.
    pub fn constant(&self, ch: char) -> Option<bool> {
        self.constants.get(&ch).copied()
    }

    pub fn trie(&self) -> &WordTree {
        &self.trie
    }

    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
