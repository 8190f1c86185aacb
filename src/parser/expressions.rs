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

//! Expression grammar, lowest precedence first:
//!
//! ```text
//! expression     := assignment
//! assignment     := IDENT "=" expression | additive
//! additive       := multiplicative (("+" | "-") multiplicative)*
//! multiplicative := primary (("*" | "/") primary)*
//! primary        := INT | STRING | BOOL | IDENT ("(" args ")")? | "(" expression ")"
//! ```
//!
//! Each level returns `Ok(None)` when nothing at the cursor starts an
//! expression, leaving the caller to choose the error message.
//!
//! Operators are folded into left-deep trees, so every operator in a chain
//! adds one level of tree depth. Chains are counted against the same limit
//! as parentheses.

use crate::ast::{BinaryOp, Expr};
use crate::error::Result;
use crate::parser::helpers::is_reserved;
use crate::parser::Parser;
use crate::value::Value;

impl<'src> Parser<'src> {
    pub(crate) fn expression(&mut self) -> Result<Option<Expr>> {
        self.assignment()
    }

    /// Assignment is only recognised when an identifier is directly
    /// followed by `=`. Otherwise the cursor is rewound and the identifier
    /// is parsed again as an ordinary operand.
    fn assignment(&mut self) -> Result<Option<Expr>> {
        self.scanner.skip_whitespace();
        let start = self.scanner.position();

        if let Some(name) = self.scanner.identifier() {
            self.scanner.skip_whitespace();

            if self.scanner.match_literal("=") {
                if is_reserved(name) {
                    return Err(self.error_at(format!("Cannot assign to reserved word '{}'", name), start));
                }

                self.scanner.skip_whitespace();
                if self.scanner.peek() == Some('=') {
                    return Err(self.error(
                        "Invalid multiple assignment: '=' cannot follow an assignment expression",
                    ));
                }

                let value_pos = self.scanner.position();
                let value = self.expect_expression("Expected expression after '='")?;

                if matches!(value, Expr::Assignment { .. }) {
                    return Err(self.error_at(
                        "Chained assignment is not allowed: nested assignments inside assignment expressions",
                        value_pos,
                    ));
                }

                return Ok(Some(Expr::assign(name, value)));
            }

            self.scanner.reset(start);
        }

        let expr = self.additive()?;

        self.scanner.skip_whitespace();
        if expr.is_some() && self.scanner.peek() == Some('=') {
            return Err(self.error("Left hand side of assignment must be a valid identifier"));
        }

        Ok(expr)
    }

    fn additive(&mut self) -> Result<Option<Expr>> {
        self.operator_chain(|p| {
            let Some(mut left) = p.multiplicative()? else {
                return Ok(None);
            };

            loop {
                p.scanner.skip_whitespace();
                let op_pos = p.scanner.position();

                let op = if p.scanner.match_literal("+") {
                    BinaryOp::Add
                } else if p.scanner.match_literal("-") {
                    BinaryOp::Sub
                } else {
                    return Ok(Some(left));
                };

                p.fold_level(op_pos)?;
                let right = match p.multiplicative()? {
                    Some(right) => right,
                    None => return Err(p.error(format!("Expected expression after '{}'", op.symbol()))),
                };
                left = Expr::binary(op, left, right);
            }
        })
    }

    fn multiplicative(&mut self) -> Result<Option<Expr>> {
        self.operator_chain(|p| {
            let Some(mut left) = p.primary()? else {
                return Ok(None);
            };

            loop {
                p.scanner.skip_whitespace();
                let op_pos = p.scanner.position();

                let op = if p.scanner.match_literal("*") {
                    BinaryOp::Mul
                } else if p.scanner.match_literal("/") {
                    BinaryOp::Div
                } else {
                    return Ok(Some(left));
                };

                p.fold_level(op_pos)?;
                let right = match p.primary()? {
                    Some(right) => right,
                    None => return Err(p.error(format!("Expected expression after '{}'", op.symbol()))),
                };
                left = Expr::binary(op, left, right);
            }
        })
    }

    fn primary(&mut self) -> Result<Option<Expr>> {
        self.scanner.skip_whitespace();
        let start = self.scanner.position();

        // Integer literal (a leading '-' belongs to the literal)
        if let Some(number) = self.scanner.number() {
            return match number {
                Ok(n) => Ok(Some(Expr::Literal(Value::Int(n)))),
                Err(_) => Err(self.error_at("Integer literal is out of range", start)),
            };
        }

        // String literal
        if matches!(self.scanner.peek(), Some('"' | '\'')) {
            return match self.scanner.string() {
                Some(s) => Ok(Some(Expr::Literal(Value::String(s)))),
                None => Err(self.error_at("Unterminated string literal", start)),
            };
        }

        // Boolean literal
        if let Some(b) = self.scanner.boolean() {
            return Ok(Some(Expr::Literal(Value::Bool(b))));
        }

        // Variable reference or function call
        if let Some(name) = self.scanner.identifier() {
            if is_reserved(name) {
                return Err(self.error_at(format!("Unexpected keyword '{}'", name), start));
            }

            self.scanner.skip_whitespace();
            if self.scanner.match_literal("(") {
                let args = self.nested(|p| p.argument_list())?;
                self.expect(")", "Function call ')' should be closed")?;
                return Ok(Some(Expr::call(name, args)));
            }

            return Ok(Some(Expr::var(name)));
        }

        // Parenthesized expression
        if self.scanner.match_literal("(") {
            let expr = self.nested(|p| p.expect_expression("Expected expression after '('"))?;
            self.expect(")", "Expected ')' after an opening '('")?;
            return Ok(Some(expr));
        }

        if self.scanner.check(")") {
            return Err(self.error("Can't match the opening of ')'"));
        }

        Ok(None)
    }

    fn argument_list(&mut self) -> Result<Vec<Expr>> {
        let mut args = Vec::new();

        self.scanner.skip_whitespace();
        if self.scanner.check(")") {
            return Ok(args);
        }

        loop {
            args.push(self.expect_expression("Expected expression as function argument")?);

            self.scanner.skip_whitespace();
            if !self.scanner.match_literal(",") {
                break;
            }
        }

        Ok(args)
    }
}
