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

use crate::value::Value;

/// Binary operators understood by the evaluator.
///
/// Only the arithmetic ones have surface syntax; the logical and
/// comparison operators exist for trees built directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Gt,
    Lt,
    Gte,
    Lte,
    Eq,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Gt => ">",
            BinaryOp::Lt => "<",
            BinaryOp::Gte => ">=",
            BinaryOp::Lte => "<=",
            BinaryOp::Eq => "==",
        }
    }

    /// Binding strength, higher binds tighter.
    fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Eq => 3,
            BinaryOp::Gt | BinaryOp::Lt | BinaryOp::Gte | BinaryOp::Lte => 4,
            BinaryOp::Add | BinaryOp::Sub => 5,
            BinaryOp::Mul | BinaryOp::Div => 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    VariableReference(String),
    Literal(Value),
    Assignment { name: String, value: Box<Expr> },
    FunctionCall { name: String, args: Vec<Expr> },
    Binary { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Not(Box<Expr>),
}

impl Expr {
    pub fn var(name: &str) -> Self {
        Expr::VariableReference(name.to_string())
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn int(n: i64) -> Self {
        Expr::Literal(Value::Int(n))
    }

    pub fn assign(name: &str, value: Expr) -> Self {
        Expr::Assignment {
            name: name.to_string(),
            value: Box::new(value),
        }
    }

    pub fn call(name: &str, args: Vec<Expr>) -> Self {
        Expr::FunctionCall {
            name: name.to_string(),
            args,
        }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Calls `visit` with the name of every variable this expression reads
    /// directly. Function bodies are not entered: they run in their own
    /// environment.
    pub fn for_each_reference<'a>(&'a self, visit: &mut impl FnMut(&'a str)) {
        match self {
            Expr::VariableReference(name) => visit(name),
            Expr::Literal(_) => {}
            Expr::Assignment { value, .. } => value.for_each_reference(visit),
            Expr::FunctionCall { args, .. } => {
                for arg in args {
                    arg.for_each_reference(visit);
                }
            }
            Expr::Binary { lhs, rhs, .. } => {
                lhs.for_each_reference(visit);
                rhs.for_each_reference(visit);
            }
            Expr::Not(inner) => inner.for_each_reference(visit),
        }
    }

    fn write_operand(&self, f: &mut fmt::Formatter<'_>, parent: BinaryOp, right: bool) -> fmt::Result {
        let needs_parens = match self {
            Expr::Binary { op, .. } => {
                op.precedence() < parent.precedence()
                    || (right && op.precedence() == parent.precedence())
            }
            Expr::Assignment { .. } => true,
            _ => false,
        };

        if needs_parens {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

/// Renders the expression back to source form.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::VariableReference(name) => write!(f, "{}", name),
            Expr::Literal(Value::String(s)) => write!(f, "{:?}", s),
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Assignment { name, value } => write!(f, "{} = {}", name, value),
            Expr::FunctionCall { name, args } => {
                let args = args.iter().map(|a| a.to_string()).collect::<Vec<_>>();
                write!(f, "{}({})", name, args.join(", "))
            }
            Expr::Binary { op, lhs, rhs } => {
                lhs.write_operand(f, *op, false)?;
                write!(f, " {} ", op.symbol())?;
                rhs.write_operand(f, *op, true)
            }
            Expr::Not(inner) => match inner.as_ref() {
                Expr::Binary { .. } | Expr::Assignment { .. } => write!(f, "!({})", inner),
                _ => write!(f, "!{}", inner),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BinaryOp, Expr};

    #[test]
    fn display_keeps_required_parentheses() {
        let expr = Expr::binary(
            BinaryOp::Mul,
            Expr::binary(BinaryOp::Add, Expr::var("a"), Expr::var("b")),
            Expr::var("c"),
        );
        assert_eq!(expr.to_string(), "(a + b) * c");

        let expr = Expr::binary(
            BinaryOp::Sub,
            Expr::var("a"),
            Expr::binary(BinaryOp::Sub, Expr::var("b"), Expr::var("c")),
        );
        assert_eq!(expr.to_string(), "a - (b - c)");
    }

    #[test]
    fn display_renders_calls_and_strings() {
        let expr = Expr::call("greet", vec![Expr::literal("hi"), Expr::int(3)]);
        assert_eq!(expr.to_string(), "greet(\"hi\", 3)");
    }

    #[test]
    fn references_skip_literals() {
        let expr = Expr::binary(
            BinaryOp::Add,
            Expr::var("a"),
            Expr::call("f", vec![Expr::var("b"), Expr::int(1)]),
        );
        let mut names = Vec::new();
        expr.for_each_reference(&mut |name| names.push(name));
        assert_eq!(names, vec!["a", "b"]);
    }
}
