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

//! Expression evaluation.
//!
//! A plain recursive match over [`Expr`]. Operators are resolved by
//! [`Value::binary`]; names go through the [`Environment`].

use crate::ast::Expr;
use crate::error::Result;
use crate::interpreter::calls::call_function;
use crate::interpreter::ensure_sufficient_stack;
use crate::interpreter::environment::Environment;
use crate::value::Value;

/// Evaluates `expr` against `env`.
///
/// Both operands of a binary node are evaluated, left first, before the
/// operator is applied. There is no short-circuiting.
pub fn eval(expr: &Expr, env: &mut Environment) -> Result<Value> {
    ensure_sufficient_stack(|| match expr {
        Expr::Literal(value) => Ok(value.clone()),

        Expr::VariableReference(name) => env.get_variable(name),

        Expr::Assignment { name, value } => env.assign_variable(name, value),

        Expr::FunctionCall { name, args } => call_function(name, args, env),

        Expr::Binary { op, lhs, rhs } => {
            let left = eval(lhs, env)?;
            let right = eval(rhs, env)?;
            Value::binary(*op, &left, &right)
        }

        Expr::Not(inner) => eval(inner, env)?.not(),
    })
}

#[cfg(test)]
mod tests {
    use super::eval;
    use crate::ast::{BinaryOp, Expr, Modifier};
    use crate::error::ErrorKind;
    use crate::interpreter::environment::Environment;
    use crate::value::Value;

    #[test]
    fn arithmetic_follows_the_tree() {
        let mut env = Environment::new();
        let expr = Expr::binary(
            BinaryOp::Sub,
            Expr::int(10),
            Expr::binary(BinaryOp::Mul, Expr::int(2), Expr::int(3)),
        );
        assert_eq!(eval(&expr, &mut env).unwrap(), Value::Int(4));
    }

    #[test]
    fn logical_and_comparison_nodes() {
        let mut env = Environment::new();

        let expr = Expr::binary(
            BinaryOp::And,
            Expr::binary(BinaryOp::Gt, Expr::int(3), Expr::int(2)),
            Expr::Not(Box::new(Expr::literal(false))),
        );
        assert_eq!(eval(&expr, &mut env).unwrap(), Value::Bool(true));

        let expr = Expr::binary(BinaryOp::Or, Expr::int(0), Expr::int(-4));
        assert_eq!(eval(&expr, &mut env).unwrap(), Value::Bool(false));
    }

    #[test]
    fn assignment_returns_the_new_value() {
        let mut env = Environment::new();
        env.declare_variable("a", None, Modifier::Mutable).unwrap();

        let value = eval(&Expr::assign("a", Expr::literal("hi")), &mut env).unwrap();
        assert_eq!(value, Value::String("hi".into()));
        assert_eq!(env.get_variable("a").unwrap(), value);
    }

    #[test]
    fn unknown_names_fail() {
        let mut env = Environment::new();
        let err = eval(&Expr::var("ghost"), &mut env).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotDeclared);

        let err = eval(&Expr::call("ghost", vec![]), &mut env).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotDeclared);
    }
}
