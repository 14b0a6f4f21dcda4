//! Character source over one line of input.

/// Whitespace separates tokens and is otherwise ignored.
pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// Supplies the characters of a line, skipping whitespace, with pushback.
///
/// Pushed-back characters are returned before any fresh input, most recent
/// first. [`CharSource::putback_all`] restores a run of characters so that
/// they are read again in their original order.
#[derive(Debug, Clone)]
pub struct CharSource {
    chars: Vec<char>,
    pos: usize,
    pushback: Vec<char>,
}

impl CharSource {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            pushback: Vec::new(),
        }
    }

    /// Next non-whitespace character, or `None` when the line is exhausted.
    pub fn get(&mut self) -> Option<char> {
        if let Some(ch) = self.pushback.pop() {
            return Some(ch);
        }
        self.skip_whitespace();
        let ch = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        Some(ch)
    }

    /// Next character only if it directly follows the previous one.
    ///
    /// Returns `None` at whitespace or end of input without consuming anything,
    /// so a literal can never be continued across a separator.
    pub fn get_adjacent(&mut self) -> Option<char> {
        if let Some(ch) = self.pushback.pop() {
            return Some(ch);
        }
        let ch = self.chars.get(self.pos).copied()?;
        if is_whitespace(ch) {
            return None;
        }
        self.pos += 1;
        Some(ch)
    }

    pub fn putback(&mut self, ch: char) {
        self.pushback.push(ch);
    }

    /// Push back a run of characters; the first of them is read next.
    pub fn putback_all(&mut self, chars: &[char]) {
        self.pushback.extend(chars.iter().rev());
    }

    /// Index (in characters) of the next character to be read.
    pub fn position(&self) -> usize {
        if !self.pushback.is_empty() {
            return self.pos - self.pushback.len();
        }
        let mut pos = self.pos;
        while pos < self.chars.len() && is_whitespace(self.chars[pos]) {
            pos += 1;
        }
        pos
    }

    pub fn is_empty(&self) -> bool {
        self.pushback.is_empty() && self.chars[self.pos..].iter().all(|&ch| is_whitespace(ch))
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.chars.len() && is_whitespace(self.chars[self.pos]) {
            self.pos += 1;
        }
    }
}
