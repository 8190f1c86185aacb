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

//! Statement execution.
//!
//! `return` is not an error: [`exec_stmt`] reports it as
//! [`ExecSignal::Return`] and [`exec_block`] stops there, handing the
//! signal to whoever ran the block. Only a function call consumes it.

use crate::ast::Stmt;
use crate::error::Result;
use crate::interpreter::environment::Environment;
use crate::interpreter::expressions::eval;
use crate::value::Value;

/* ============================================================================
 * Execution Control Signals
 * ============================================================================
 */

/// Outcome of running a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecSignal {
    /// Carry on with the next statement. Holds the statement's value:
    /// the initial value of a declaration, `Void` for a function
    /// declaration, the result of an expression statement.
    Continue(Value),

    /// A `return` was executed, with or without a value.
    Return(Option<Value>),
}

/// Executes a single statement inside `env`.
pub fn exec_stmt(stmt: &Stmt, env: &mut Environment) -> Result<ExecSignal> {
    match stmt {
        Stmt::Declaration {
            name,
            modifier,
            initializer,
        } => {
            let value = env.declare_variable(name, initializer.as_ref(), *modifier)?;
            Ok(ExecSignal::Continue(value))
        }

        Stmt::FunctionDeclaration { name, params, body } => {
            env.declare_function(name, params, body)?;
            Ok(ExecSignal::Continue(Value::Void))
        }

        Stmt::Return(expr) => {
            let value = expr.as_ref().map(|e| eval(e, env)).transpose()?;
            Ok(ExecSignal::Return(value))
        }

        Stmt::Expression(expr) => Ok(ExecSignal::Continue(eval(expr, env)?)),
    }
}

/// Runs statements in order until one returns or fails.
///
/// Falling off the end yields the value of the last statement (`Void` for
/// an empty block).
pub fn exec_block(stmts: &[Stmt], env: &mut Environment) -> Result<ExecSignal> {
    let mut last = Value::Void;

    for stmt in stmts {
        match exec_stmt(stmt, env)? {
            ExecSignal::Continue(value) => last = value,
            signal @ ExecSignal::Return(_) => return Ok(signal),
        }
    }

    Ok(ExecSignal::Continue(last))
}
