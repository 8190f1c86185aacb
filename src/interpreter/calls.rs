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

//! User-defined function calls.
//!
//! Each call runs in a brand-new [`Environment`] holding only the
//! parameters. The body cannot see the caller's variables or functions,
//! and the frame is dropped when the call ends.

use tracing::trace;

use crate::ast::{Expr, Modifier};
use crate::error::{Result, ScriptError};
use crate::interpreter::ensure_sufficient_stack;
use crate::interpreter::environment::{Environment, FunctionDef};
use crate::interpreter::expressions::eval;
use crate::interpreter::statements::{exec_block, ExecSignal};
use crate::value::Value;

/// Evaluates `name(args...)` in `env`.
///
/// The argument count is checked first; arguments are then evaluated left
/// to right in the caller's environment.
pub fn call_function(name: &str, args: &[Expr], env: &mut Environment) -> Result<Value> {
    let func = env.get_function(name)?.clone();

    if args.len() != func.params.len() {
        return Err(ScriptError::arity_mismatch(name, func.params.len(), args.len()));
    }

    let values = args
        .iter()
        .map(|arg| eval(arg, env))
        .collect::<Result<Vec<Value>>>()?;

    invoke(&func, values, env)
}

/// Runs `func` with already evaluated arguments.
///
/// The result is the value of the first `return` reached, or `Void` when
/// that `return` has no value or the body ends without one.
pub fn invoke(func: &FunctionDef, args: Vec<Value>, caller: &Environment) -> Result<Value> {
    if args.len() != func.params.len() {
        return Err(ScriptError::arity_mismatch(&func.name, func.params.len(), args.len()));
    }

    let mut frame = caller.for_call()?;
    for (param, value) in func.params.iter().zip(args) {
        frame.define_variable(param, value, Modifier::Mutable)?;
    }

    trace!(function = %func.name, depth = frame.depth(), "call");

    let signal = ensure_sufficient_stack(|| exec_block(&func.body, &mut frame))?;
    let result = match signal {
        ExecSignal::Return(Some(value)) => value,
        ExecSignal::Return(None) | ExecSignal::Continue(_) => Value::Void,
    };

    trace!(function = %func.name, result = %result, "return");
    Ok(result)
}
