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

use crate::ast::Expr;
use crate::error::{Result, ScriptError};
use crate::parser::Parser;

/// Words that can never name a variable, parameter or function.
pub const RESERVED_WORDS: &[&str] = &["let", "const", "function", "return", "true", "false"];

pub fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

impl<'src> Parser<'src> {
    /// Syntax error at the current cursor position.
    pub(crate) fn error(&self, message: impl Into<String>) -> ScriptError {
        self.error_at(message, self.scanner.position())
    }

    pub(crate) fn error_at(&self, message: impl Into<String>, offset: usize) -> ScriptError {
        ScriptError::parse(message, self.scanner.source(), offset)
    }

    /// Skips whitespace, then consumes a required piece of punctuation.
    pub(crate) fn expect(&mut self, literal: &str, message: &str) -> Result<()> {
        self.scanner.skip_whitespace();
        if self.scanner.match_literal(literal) {
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    /// A `;` is optional after every statement.
    pub(crate) fn optional_semicolon(&mut self) {
        self.scanner.skip_whitespace();
        self.scanner.match_literal(";");
    }

    /// Reads a name for a new binding, rejecting reserved words.
    pub(crate) fn expect_binding_name(&mut self, what: &str) -> Result<String> {
        self.scanner.skip_whitespace();
        let start = self.scanner.position();

        match self.scanner.identifier() {
            Some(name) if is_reserved(name) => Err(self.error_at(
                format!("'{}' is a reserved word and cannot be used as a {}", name, what),
                start,
            )),
            Some(name) => Ok(name.to_string()),
            None => Err(self.error(format!("Expected {}", what))),
        }
    }

    /// Parses an expression, failing with `message` when none is present.
    pub(crate) fn expect_expression(&mut self, message: &str) -> Result<Expr> {
        match self.expression()? {
            Some(expr) => Ok(expr),
            None => Err(self.error(message)),
        }
    }

    /// Runs `f` one nesting level deeper, failing once the configured
    /// parse depth is exceeded.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.max_depth {
            return Err(self.error("Expression nested too deeply"));
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Runs a left-associative operator loop. Levels added by
    /// [`Parser::fold_level`] inside it are released when it ends.
    pub(crate) fn operator_chain<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let base = self.depth;
        let result = f(self);
        self.depth = base;
        result
    }

    /// Accounts for one more operator folded into the current chain.
    pub(crate) fn fold_level(&mut self, op_pos: usize) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(self.error_at("Expression nested too deeply", op_pos));
        }

        self.depth += 1;
        Ok(())
    }
}
