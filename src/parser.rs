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

//! Root module for the LAZYSCRIPT recursive-descent parser.
//!
//! ```text
//! Source → Scanner → Parser → Vec<Stmt> → Program
//! ```
//!
//! There is no separate lexing pass. The grammar logic is split across
//! extension modules via additional `impl Parser` blocks:
//! - `statements.rs`   → declarations, functions, expression statements
//! - `expressions.rs`  → assignment → additive → multiplicative → primary
//! - `helpers.rs`      → errors, required punctuation, reserved words

/// Character cursor with save/restore.
pub mod scanner;

/// Statement-level parsing.
pub mod statements;

/// Expression-level parsing and operator precedence.
pub mod expressions;

/// Shared parser helpers.
pub mod helpers;

use crate::ast::{Expr, Stmt};
use crate::config::InterpreterConfig;
use crate::error::Result;
use scanner::Scanner;

/// The core LAZYSCRIPT recursive-descent parser.
pub struct Parser<'src> {
    pub(crate) scanner: Scanner<'src>,

    /// Current parenthesis / call / function nesting.
    pub(crate) depth: usize,

    pub(crate) max_depth: usize,
}

/// Parses a whole program with the default limits.
///
/// # Example
/// ```
/// let stmts = lazyscript::parse("let a = 1; a + 2;").unwrap();
/// assert_eq!(stmts.len(), 2);
/// ```
pub fn parse(source: &str) -> Result<Vec<Stmt>> {
    parse_with_config(source, &InterpreterConfig::default())
}

pub fn parse_with_config(source: &str, config: &InterpreterConfig) -> Result<Vec<Stmt>> {
    Parser::new(source, config).parse_program()
}

/// Parses exactly one expression, optionally followed by `;`.
///
/// Used for values typed at the command prompt (`assign a b + 1`).
pub fn parse_expression(source: &str) -> Result<Expr> {
    Parser::new(source, &InterpreterConfig::default()).parse_standalone_expression()
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, config: &InterpreterConfig) -> Self {
        Self {
            scanner: Scanner::new(source),
            depth: 0,
            max_depth: config.max_parse_depth,
        }
    }

    /// Parses statements until the input is exhausted.
    pub fn parse_program(&mut self) -> Result<Vec<Stmt>> {
        let mut stmts = Vec::new();

        self.scanner.skip_whitespace();
        while self.scanner.has_more() {
            stmts.push(self.statement()?);
            self.scanner.skip_whitespace();
        }

        Ok(stmts)
    }

    fn parse_standalone_expression(&mut self) -> Result<Expr> {
        let expr = self.expect_expression("Expected an expression")?;
        self.optional_semicolon();

        self.scanner.skip_whitespace();
        if self.scanner.has_more() {
            return Err(self.error("Unexpected input after expression"));
        }
        Ok(expr)
    }
}
