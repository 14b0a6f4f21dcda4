//! Tokenizer driving a [`CharSource`] through the symbol [`WordTree`][crate::trie::WordTree].

use std::fmt;

use log::{debug, trace};

use crate::error::LexError;
use crate::source::CharSource;
use crate::symbol::{LogicalSymbol, SymbolTable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    /// Matched literal text.
    Literal(String),
    /// Value carried by a constant, independent of its spelling.
    Constant(bool),
    /// End of input.
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: LogicalSymbol,
    pub value: TokenValue,
}

impl Token {
    pub fn new(kind: LogicalSymbol, literal: impl Into<String>) -> Self {
        Self {
            kind,
            value: TokenValue::Literal(literal.into()),
        }
    }

    pub fn constant(value: bool) -> Self {
        Self {
            kind: LogicalSymbol::Constant,
            value: TokenValue::Constant(value),
        }
    }

    pub fn eof() -> Self {
        Self {
            kind: LogicalSymbol::Eof,
            value: TokenValue::End,
        }
    }

    pub fn literal(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Literal(text) => Some(text),
            _ => None,
        }
    }

    pub fn precedence(&self) -> i8 {
        self.kind.precedence()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            TokenValue::Literal(text) => f.write_str(text),
            TokenValue::Constant(true) => f.write_str("V"),
            TokenValue::Constant(false) => f.write_str("F"),
            TokenValue::End => f.write_str("EOF"),
        }
    }
}

/// Stream of tokens over one line of text.
///
/// Holds at most one pushed-back token. Each line gets its own stream; only
/// the [`SymbolTable`] is shared.
pub struct TokenStream<'a> {
    source: CharSource,
    table: &'a SymbolTable,
    buffer: Option<Token>,
}

impl TokenStream<'static> {
    pub fn new(text: &str) -> Self {
        Self::with_table(text, SymbolTable::standard())
    }
}

impl<'a> TokenStream<'a> {
    pub fn with_table(text: &str, table: &'a SymbolTable) -> Self {
        Self {
            source: CharSource::new(text),
            table,
            buffer: None,
        }
    }

    /// Next token; [`LogicalSymbol::Eof`] once the input is exhausted.
    pub fn get(&mut self) -> Result<Token, LexError> {
        if let Some(token) = self.buffer.take() {
            return Ok(token);
        }

        let position = self.source.position();
        let Some(ch) = self.source.get() else {
            return Ok(Token::eof());
        };

        if let Some(value) = self.table.constant(ch) {
            debug!("token: constant {}", value);
            return Ok(Token::constant(value));
        }

        if self.table.trie().root().has(ch) {
            if let Some(token) = self.match_longest(ch) {
                debug!("token: {} {:?}", token.kind, token.to_string());
                return Ok(token);
            }
        }

        Err(LexError::BadToken { found: ch, position })
    }

    /// Follow the trie from `first` and keep the longest registered literal.
    ///
    /// Characters consumed past that literal go back to the source in order.
    /// If no prefix is registered, every consumed character, `first` included,
    /// is pushed back and no token is produced.
    fn match_longest(&mut self, first: char) -> Option<Token> {
        let table = self.table;
        let Some(mut node) = table.trie().root().child(first) else {
            self.source.putback(first);
            return None;
        };

        let mut consumed = vec![first];
        let mut word = String::from(first);
        let mut best = table.lookup(&word).map(|kind| (consumed.len(), kind));

        while let Some(ch) = self.source.get_adjacent() {
            match node.child(ch) {
                Some(next) => {
                    node = next;
                    consumed.push(ch);
                    word.push(ch);
                    if let Some(kind) = table.lookup(&word) {
                        best = Some((consumed.len(), kind));
                    }
                }
                None => {
                    self.source.putback(ch);
                    break;
                }
            }
        }
        trace!("match_longest: consumed {:?}, best {:?}", word, best);

        match best {
            Some((len, kind)) => {
                self.source.putback_all(&consumed[len..]);
                Some(Token::new(kind, consumed[..len].iter().collect::<String>()))
            }
            None => {
                self.source.putback_all(&consumed);
                None
            }
        }
    }

    /// Return a token to the stream.
    ///
    /// # Panics
    ///
    /// Panics if a token is already buffered: the stream holds only one, and a
    /// second pushback means the caller broke the get/putback protocol.
    pub fn putback(&mut self, token: Token) {
        assert!(
            self.buffer.is_none(),
            "token buffer is full: cannot put back {:?}",
            token
        );
        self.buffer = Some(token);
    }

    pub fn peek(&mut self) -> Result<Token, LexError> {
        let token = self.get()?;
        self.putback(token.clone());
        Ok(token)
    }

    /// Collect every token, terminated by the [`LogicalSymbol::Eof`] sentinel.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while self.peek()?.kind != LogicalSymbol::Eof {
            tokens.push(self.get()?);
        }
        tokens.push(Token::eof());
        Ok(tokens)
    }
}

/// Tokenize one line with the standard symbol table.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    TokenStream::new(text).tokenize()
}
