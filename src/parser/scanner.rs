/*
 * ==========================================================================
 * LAZYSCRIPT - Bindings that remember how they were made.
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 *
 * License:
 * This file is part of the LAZYSCRIPT programming language project.
 *
 * LAZYSCRIPT is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

//! Position-tracking cursor over raw source text.
//!
//! There is no token stream: the parser asks the scanner for exactly the
//! piece of syntax it expects next. Every reader either consumes what it
//! recognised or leaves the cursor where it was, so backtracking is a
//! matter of saving [`Scanner::position`] and calling [`Scanner::reset`].

use std::num::ParseIntError;

pub struct Scanner<'src> {
    source: &'src str,

    /// Byte offset of the next unread character.
    pos: usize,
}

/// Identifiers start with a letter, `_` or `$`.
pub fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

/// ...and continue with letters, digits, `_` or `$`.
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_ascii_digit()
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { source, pos: 0 }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Current cursor position, usable with [`Scanner::reset`].
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Restores a position previously returned by [`Scanner::position`].
    pub fn reset(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn has_more(&self) -> bool {
        self.pos < self.source.len()
    }

    fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    /// Checks for `literal` at the cursor without consuming it.
    pub fn check(&self, literal: &str) -> bool {
        self.rest().starts_with(literal)
    }

    /// Consumes `literal` iff the next characters equal it exactly.
    pub fn match_literal(&mut self, literal: &str) -> bool {
        if self.check(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Checks for `keyword` as a whole word without consuming it.
    pub fn check_keyword(&self, keyword: &str) -> bool {
        if !self.check(keyword) {
            return false;
        }

        let after = self.rest()[keyword.len()..].chars().next();
        !after.is_some_and(is_identifier_part)
    }

    /// Like [`Scanner::match_literal`], but refuses to split an identifier:
    /// `let` matches in `let x` and not in `letter`.
    pub fn match_keyword(&mut self, keyword: &str) -> bool {
        if self.check_keyword(keyword) {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    /// Reads an identifier, or returns `None` without moving.
    pub fn identifier(&mut self) -> Option<&'src str> {
        let start = self.pos;
        if !self.peek().is_some_and(is_identifier_start) {
            return None;
        }

        while self.peek().is_some_and(is_identifier_part) {
            self.bump();
        }

        Some(&self.source[start..self.pos])
    }

    /// Reads an integer literal with an optional leading `-`.
    ///
    /// A lone `-` is put back so it can still be read as an operator.
    /// `Some(Err(_))` means the digits were consumed but do not fit in an
    /// `i64`.
    pub fn number(&mut self) -> Option<Result<i64, ParseIntError>> {
        let start = self.pos;

        if self.peek() == Some('-') {
            if !self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
                return None;
            }
            self.bump();
        }

        if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos = start;
            return None;
        }

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }

        Some(self.source[start..self.pos].parse::<i64>())
    }

    /// Reads a `'` or `"` delimited string literal.
    ///
    /// `\n`, `\t` and `\r` are translated; any other escaped character is
    /// kept as is (`\"` gives `"`). Returns `None` and restores the cursor
    /// when the literal is not terminated.
    pub fn string(&mut self) -> Option<String> {
        let start = self.pos;
        let quote = match self.peek() {
            Some(q @ ('"' | '\'')) => q,
            _ => return None,
        };
        self.bump();

        let mut out = String::new();
        loop {
            match self.bump() {
                None => {
                    self.pos = start;
                    return None;
                }
                Some(ch) if ch == quote => return Some(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some(other) => out.push(other),
                    None => {
                        self.pos = start;
                        return None;
                    }
                },
                Some(ch) => out.push(ch),
            }
        }
    }

    /// Reads `true` or `false`.
    pub fn boolean(&mut self) -> Option<bool> {
        if self.match_keyword("true") {
            Some(true)
        } else if self.match_keyword("false") {
            Some(false)
        } else {
            None
        }
    }
}
