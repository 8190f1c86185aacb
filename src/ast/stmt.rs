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

use std::fmt;

use serde::Serialize;

use crate::ast::Expr;

/// Mutability of a variable, fixed when it is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Mutable, // let
    Const,   // const
}

impl Modifier {
    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Mutable => "let",
            Modifier::Const => "const",
        }
    }
}

/// All executable LAZYSCRIPT statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /* ----------------------------- */
    /* VARIABLES                     */
    /* ----------------------------- */

    // let x = ...  /  const x = ...
    Declaration {
        name: String,
        modifier: Modifier,
        initializer: Option<Expr>,
    },

    /* ----------------------------- */
    /* FUNCTIONS                     */
    /* ----------------------------- */

    FunctionDeclaration {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },

    Return(Option<Expr>),

    /* ----------------------------- */
    /* EXPRESSIONS                   */
    /* ----------------------------- */

    Expression(Expr),
}

impl Stmt {
    pub fn declare(modifier: Modifier, name: &str, initializer: Expr) -> Self {
        Stmt::Declaration {
            name: name.to_string(),
            modifier,
            initializer: Some(initializer),
        }
    }
}

/// Source-like rendering. Function bodies are elided.
impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Declaration { name, modifier, initializer: Some(init) } => {
                write!(f, "{} {} = {}", modifier.keyword(), name, init)
            }
            Stmt::Declaration { name, modifier, initializer: None } => {
                write!(f, "{} {}", modifier.keyword(), name)
            }
            Stmt::FunctionDeclaration { name, params, .. } => {
                write!(f, "function {}({}) {{ ... }}", name, params.join(", "))
            }
            Stmt::Return(Some(expr)) => write!(f, "return {}", expr),
            Stmt::Return(None) => write!(f, "return"),
            Stmt::Expression(expr) => write!(f, "{}", expr),
        }
    }
}
