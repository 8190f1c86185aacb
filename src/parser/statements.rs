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

use crate::ast::{Expr, Modifier, Stmt};
use crate::error::Result;
use crate::parser::Parser;

impl<'src> Parser<'src> {
    /// Parses a single statement.
    ///
    /// ```text
    /// statement := "function" IDENT "(" params ")" "{" body "}"
    ///            | ("let" | "const") IDENT "=" expression ";"?
    ///            | expression ";"?
    /// ```
    pub(crate) fn statement(&mut self) -> Result<Stmt> {
        self.scanner.skip_whitespace();

        if self.scanner.match_keyword("function") {
            return self.function_declaration();
        }

        if self.scanner.match_keyword("let") {
            return self.declaration(Modifier::Mutable);
        }

        if self.scanner.match_keyword("const") {
            return self.declaration(Modifier::Const);
        }

        if self.scanner.check_keyword("return") {
            return Err(self.error("'return' is only allowed inside a function body"));
        }

        let expr = self.expect_expression("Expected a statement")?;
        self.optional_semicolon();

        Ok(Stmt::Expression(expr))
    }

    /// `let` / `const` declaration, keyword already consumed.
    ///
    /// `let x;` declares `x` with no initializer; `const` always needs one.
    fn declaration(&mut self, modifier: Modifier) -> Result<Stmt> {
        let name = self.expect_binding_name("variable name")?;

        self.scanner.skip_whitespace();
        if !self.scanner.match_literal("=") {
            let terminated = self.scanner.check(";") || self.scanner.check("}") || !self.scanner.has_more();

            if modifier == Modifier::Const {
                return Err(self.error(format!("const '{}' must be initialized", name)));
            }
            if !terminated {
                return Err(self.error("Expected '=' after variable name"));
            }

            self.optional_semicolon();
            return Ok(Stmt::Declaration {
                name,
                modifier,
                initializer: None,
            });
        }

        self.scanner.skip_whitespace();
        let init_pos = self.scanner.position();
        let initializer = self.expect_expression("Expected expression after '='")?;

        if matches!(initializer, Expr::Assignment { .. }) {
            return Err(self.error_at("Expected expression after '=', found an assignment", init_pos));
        }

        self.optional_semicolon();

        Ok(Stmt::Declaration {
            name,
            modifier,
            initializer: Some(initializer),
        })
    }

    /// `function name(a, b) { ... }`, keyword already consumed.
    fn function_declaration(&mut self) -> Result<Stmt> {
        let name = self.expect_binding_name("function name")?;

        self.expect("(", "Expected '(' after function name")?;
        let params = self.parameter_list()?;
        self.expect(")", "Expected ')' after parameter list")?;
        self.expect("{", "Expected '{' to begin function body")?;

        let body = self.nested(|p| p.function_body())?;

        Ok(Stmt::FunctionDeclaration { name, params, body })
    }

    fn parameter_list(&mut self) -> Result<Vec<String>> {
        let mut params: Vec<String> = Vec::new();

        self.scanner.skip_whitespace();
        if self.scanner.check(")") {
            return Ok(params);
        }

        loop {
            self.scanner.skip_whitespace();
            let start = self.scanner.position();
            let param = self.expect_binding_name("parameter name")?;

            if params.contains(&param) {
                return Err(self.error_at(format!("Duplicate parameter '{}'", param), start));
            }
            params.push(param);

            self.scanner.skip_whitespace();
            if !self.scanner.match_literal(",") {
                break;
            }
        }

        Ok(params)
    }

    /// Statements up to and including the closing `}`.
    ///
    /// A body must contain at least one `return`; its absence is a syntax
    /// error rather than a runtime one.
    fn function_body(&mut self) -> Result<Vec<Stmt>> {
        let mut body = Vec::new();
        let mut has_return = false;

        loop {
            self.scanner.skip_whitespace();

            if self.scanner.match_literal("}") {
                if !has_return {
                    return Err(self.error_at(
                        "Expected a return statement in function body",
                        self.scanner.position() - 1,
                    ));
                }
                return Ok(body);
            }

            if !self.scanner.has_more() {
                return Err(self.error("Expected '}' to end function body"));
            }

            if self.scanner.match_keyword("return") {
                has_return = true;
                body.push(self.return_statement()?);
                continue;
            }

            body.push(self.statement()?);
        }
    }

    /// `return expression? ;?`, keyword already consumed.
    fn return_statement(&mut self) -> Result<Stmt> {
        self.scanner.skip_whitespace();

        let value = if self.scanner.check(";") || self.scanner.check("}") {
            None
        } else {
            Some(self.expect_expression("Expected expression after 'return'")?)
        };

        self.optional_semicolon();
        Ok(Stmt::Return(value))
    }
}
