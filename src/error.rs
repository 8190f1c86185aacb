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

use thiserror::Error;

use crate::span::Span;

/// Shorthand used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, ScriptError>;

/// The category of a [`ScriptError`].
///
/// Callers match on this instead of parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Syntax error. Always carries a span.
    Parse,
    /// Lookup of a name that was never declared.
    NotDeclared,
    /// A second declaration of a name in the same environment.
    AlreadyDeclared,
    /// Assignment to a `const` variable.
    ConstReassignment,
    /// Call with the wrong number of arguments.
    ArityMismatch,
    /// Operator applied to operands it does not support.
    TypeMismatch,
    DivisionByZero,
    /// A variable used as a function or the other way around.
    WrongKind,
    /// Evaluation nested deeper than the configured limit.
    StackExhausted,
    /// A binding whose expression would read the variable being bound.
    CyclicBinding,
    /// Integer arithmetic left the i64 range.
    Overflow,
    /// `eval_line` with a statement number the program does not have.
    LineOutOfRange,
    /// Interpreter invariant broken (e.g. `return` outside any function).
    Internal,
    /// Unreadable or malformed interpreter configuration.
    Config,
}

impl ErrorKind {
    /// Stable error code (E_PARSE, E_TYPE, …)
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Parse => "E_PARSE",
            ErrorKind::NotDeclared => "E_NOT_DECLARED",
            ErrorKind::AlreadyDeclared => "E_ALREADY_DECLARED",
            ErrorKind::ConstReassignment => "E_CONST",
            ErrorKind::ArityMismatch => "E_ARITY",
            ErrorKind::TypeMismatch => "E_TYPE",
            ErrorKind::DivisionByZero => "E_DIV_ZERO",
            ErrorKind::WrongKind => "E_WRONG_KIND",
            ErrorKind::StackExhausted => "E_STACK",
            ErrorKind::CyclicBinding => "E_CYCLE",
            ErrorKind::Overflow => "E_OVERFLOW",
            ErrorKind::LineOutOfRange => "E_LINE",
            ErrorKind::Internal => "E_INTERNAL",
            ErrorKind::Config => "E_CONFIG",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ScriptError {
    pub kind: ErrorKind,

    /// Human-readable error message
    pub message: String,

    /// Source location, known for parse errors only
    pub span: Option<Span>,

    /// Optional note / help text
    pub help: Option<String>,
}

impl ScriptError {
    /// Generic constructor
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
            help: None,
        }
    }

    /// Stable code of this error's kind.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Syntax error at `offset` in `source`.
    pub fn parse(message: impl Into<String>, source: &str, offset: usize) -> Self {
        Self {
            span: Some(Span::at(source, offset)),
            ..Self::new(ErrorKind::Parse, message)
        }
    }

    pub fn not_declared(name: &str) -> Self {
        Self::new(ErrorKind::NotDeclared, format!("Symbol '{}' is not declared", name))
    }

    pub fn already_declared(name: &str) -> Self {
        Self::new(
            ErrorKind::AlreadyDeclared,
            format!("Symbol '{}' is already declared", name),
        )
    }

    pub fn const_reassignment(name: &str) -> Self {
        Self::new(
            ErrorKind::ConstReassignment,
            format!("Can't reassign const variable '{}'", name),
        )
        .with_help(format!("declare '{}' with `let` to make it mutable", name))
    }

    pub fn arity_mismatch(name: &str, expected: usize, found: usize) -> Self {
        Self::new(
            ErrorKind::ArityMismatch,
            format!(
                "{} arguments passed to function '{}' that requires {} arguments",
                found, name, expected
            ),
        )
    }

    /// Operator applied to an unsupported operand combination.
    pub fn type_mismatch(op: &str, operands: &[String]) -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            format!("Unsupported operands for '{}': {}", op, operands.join(" and ")),
        )
    }

    pub fn division_by_zero() -> Self {
        Self::new(ErrorKind::DivisionByZero, "Division by zero")
    }

    pub fn wrong_kind(name: &str, expected: &str) -> Self {
        Self::new(ErrorKind::WrongKind, format!("'{}' is not a {}", name, expected))
    }

    pub fn stack_exhausted(limit: usize) -> Self {
        Self::new(
            ErrorKind::StackExhausted,
            format!("Evaluation exceeded the maximum depth of {}", limit),
        )
        .with_help("check for unbounded recursion")
    }

    pub fn cyclic_binding(name: &str) -> Self {
        Self::new(
            ErrorKind::CyclicBinding,
            format!("Binding '{}' would make it depend on itself", name),
        )
    }

    pub fn overflow(op: &str) -> Self {
        Self::new(ErrorKind::Overflow, format!("Integer overflow in '{}'", op))
    }

    pub fn line_out_of_range(line: usize, count: usize) -> Self {
        Self::new(
            ErrorKind::LineOutOfRange,
            format!("Line {} is out of range, the program has {} statements", line, count),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Attach a help message to the error (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}
