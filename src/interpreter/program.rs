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

//! The `Program` facade: one environment plus the statements that were
//! parsed into it, and the command requests an interactive front end
//! sends to it.
//!
//! A `Program` is single-threaded. It holds `Rc`s internally and must not
//! be shared between threads.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::ast::{Expr, Stmt};
use crate::config::InterpreterConfig;
use crate::error::{Result, ScriptError};
use crate::interpreter::display::{render_table, SymbolInfo, HELP_TEXT};
use crate::interpreter::environment::{Environment, Symbol};
use crate::interpreter::expressions::eval;
use crate::interpreter::statements::{exec_stmt, ExecSignal};
use crate::parser::{parse_expression, parse_with_config};
use crate::span::Span;
use crate::value::Value;

/* ============================================================================
 * Requests
 * ============================================================================
 */

/// A single command from an interactive front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Re-run statement `n` (1-based).
    EvalLine(usize),

    AssignVar { name: String, value: Expr },

    /// Call a function; each argument is source text parsed on its own.
    InvokeFunction { name: String, args: Vec<String> },

    PrintInfo,
    PrintHelp,
}

/// Separator between the words of a command line, compiled once.
fn whitespace() -> Result<&'static Regex> {
    static WHITESPACE: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();

    WHITESPACE
        .get_or_init(|| Regex::new(r"\s+"))
        .as_ref()
        .map_err(|e| ScriptError::internal(format!("Invalid command pattern: {}", e)))
}

impl Request {
    /// Reads a command line such as `assign a b + 1` or `invoke add 1, 2`.
    ///
    /// Returns `Ok(None)` when the line is not a command at all, so the
    /// caller can treat it as source code instead. A recognised command
    /// with bad arguments is an error.
    pub fn parse_command(line: &str) -> Result<Option<Request>> {
        let line = line.trim();
        let parts: Vec<&str> = whitespace()?.splitn(line, 3).collect();

        let request = match parts.as_slice() {
            ["info"] => Request::PrintInfo,
            ["help"] => Request::PrintHelp,

            ["evalLine", rest @ ..] => match rest {
                [n] => match n.parse::<usize>() {
                    Ok(n) => Request::EvalLine(n),
                    Err(_) => return Err(usage(line, "evalLine expects a line number")),
                },
                _ => return Err(usage(line, "Usage: evalLine N")),
            },

            ["assign", rest @ ..] => match rest {
                [name, expr] => {
                    let base = line.len() - expr.len();
                    Request::AssignVar {
                        name: name.to_string(),
                        value: parse_expression(expr).map_err(|e| relocate(e, line, base))?,
                    }
                }
                _ => return Err(usage(line, "Usage: assign NAME EXPR")),
            },

            ["invoke", rest @ ..] => match rest {
                [name] => Request::InvokeFunction {
                    name: name.to_string(),
                    args: Vec::new(),
                },
                [name, args] => Request::InvokeFunction {
                    name: name.to_string(),
                    args: split_arguments(args),
                },
                _ => return Err(usage(line, "Usage: invoke NAME a, b, ...")),
            },

            _ => return Ok(None),
        };

        Ok(Some(request))
    }
}

fn usage(line: &str, message: &str) -> ScriptError {
    ScriptError::parse(message, line, line.len())
}

/// Moves a parse error's span from `line[base..]` onto `line` itself.
fn relocate(err: ScriptError, line: &str, base: usize) -> ScriptError {
    match err.span {
        Some(span) => ScriptError {
            span: Some(Span::at(line, base + span.offset)),
            ..err
        },
        None => err,
    }
}

/// Splits `a, f(b, c), "x,y"` on the commas that are not inside
/// parentheses or string literals.
fn split_arguments(text: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut parens = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in text.chars() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == q {
                    quote = None;
                }
            }
            None => match ch {
                '"' | '\'' => quote = Some(ch),
                '(' => parens += 1,
                ')' => parens = parens.saturating_sub(1),
                ',' if parens == 0 => {
                    args.push(current.trim().to_string());
                    current.clear();
                    continue;
                }
                _ => {}
            },
        }
        current.push(ch);
    }

    if !current.trim().is_empty() || !args.is_empty() {
        args.push(current.trim().to_string());
    }

    args
}

/* ============================================================================
 * Program
 * ============================================================================
 */

#[derive(Debug, Clone, Default)]
pub struct Program {
    env: Environment,
    stmts: Vec<Stmt>,
}

impl Program {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self::with_config(stmts, InterpreterConfig::default())
    }

    pub fn with_config(stmts: Vec<Stmt>, config: InterpreterConfig) -> Self {
        Self {
            env: Environment::with_config(config),
            stmts,
        }
    }

    /// Parses `source` into a program that has not run yet.
    pub fn from_source(source: &str) -> Result<Self> {
        Self::from_source_with_config(source, InterpreterConfig::default())
    }

    pub fn from_source_with_config(source: &str, config: InterpreterConfig) -> Result<Self> {
        let stmts = parse_with_config(source, &config)?;
        Ok(Self::with_config(stmts, config))
    }

    pub fn statements(&self) -> &[Stmt] {
        &self.stmts
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Runs every statement in order and returns the value of the last
    /// one (`Void` for an empty program).
    ///
    /// The first failure stops the run. Whatever was declared before it
    /// stays declared.
    pub fn execute(&mut self) -> Result<Value> {
        let mut last = Value::Void;

        for (i, stmt) in self.stmts.iter().enumerate() {
            debug!(line = i + 1, statement = %stmt, "execute");
            last = run_top_level(stmt, &mut self.env)?;
        }

        Ok(last)
    }

    /// Re-runs statement `line` (1-based) against the current state.
    pub fn eval_line(&mut self, line: usize) -> Result<Value> {
        let count = self.stmts.len();
        let stmt = line
            .checked_sub(1)
            .and_then(|i| self.stmts.get(i))
            .ok_or_else(|| ScriptError::line_out_of_range(line, count))?;

        debug!(line, statement = %stmt, "eval line");
        run_top_level(stmt, &mut self.env)
    }

    /// Parses more source and runs it statement by statement. Statements
    /// that ran successfully are kept, so later `evalLine` numbers count
    /// them.
    pub fn eval_source(&mut self, source: &str) -> Result<Value> {
        let stmts = parse_with_config(source, self.env.config())?;
        let mut last = Value::Void;

        for stmt in stmts {
            debug!(line = self.stmts.len() + 1, statement = %stmt, "execute");
            last = run_top_level(&stmt, &mut self.env)?;
            self.stmts.push(stmt);
        }

        Ok(last)
    }

    pub fn get_variable(&mut self, name: &str) -> Result<Value> {
        self.env.get_variable(name)
    }

    pub fn assign_variable(&mut self, name: &str, value: &Expr) -> Result<Value> {
        self.env.assign_variable(name, value)
    }

    /// Calls `name`, parsing every argument as a standalone expression.
    pub fn invoke_function<S: AsRef<str>>(&mut self, name: &str, args: &[S]) -> Result<Value> {
        let args = args
            .iter()
            .map(|arg| parse_expression(arg.as_ref()))
            .collect::<Result<Vec<Expr>>>()?;

        eval(&Expr::call(name, args), &mut self.env)
    }

    pub fn execute_request(&mut self, request: Request) -> Result<Value> {
        match request {
            Request::EvalLine(line) => self.eval_line(line),
            Request::AssignVar { name, value } => self.assign_variable(&name, &value),
            Request::InvokeFunction { name, args } => self.invoke_function(&name, &args),
            Request::PrintInfo => Ok(Value::String(self.info())),
            Request::PrintHelp => Ok(Value::String(HELP_TEXT.to_string())),
        }
    }

    /* ------------------------------------------------------------------
     * Inspection
     * ---------------------------------------------------------------- */

    /// Every declared symbol in declaration order, with variables read
    /// fresh.
    pub fn symbols(&mut self) -> Vec<SymbolInfo> {
        let snapshot: Vec<Symbol> = self.env.symbols().to_vec();

        snapshot
            .into_iter()
            .map(|symbol| match symbol {
                Symbol::Variable { name, modifier, .. } => {
                    let (value, error) = match self.env.get_variable(&name) {
                        Ok(value) => (Some(value), None),
                        Err(e) => (None, Some(e.message)),
                    };

                    SymbolInfo {
                        name,
                        kind: "variable",
                        modifier: Some(modifier),
                        params: None,
                        value,
                        error,
                    }
                }
                Symbol::Function(func) => SymbolInfo {
                    name: func.name,
                    kind: "function",
                    modifier: None,
                    params: Some(func.params),
                    value: None,
                    error: None,
                },
            })
            .collect()
    }

    pub fn symbols_json(&mut self) -> Result<String> {
        serde_json::to_string_pretty(&self.symbols())
            .map_err(|e| ScriptError::internal(format!("Failed to serialize symbols: {}", e)))
    }

    /// The symbol table as text, as printed by the `info` command.
    pub fn info(&mut self) -> String {
        render_table(&self.symbols())
    }

    /// Statement `line` (1-based) rendered back to source-like text.
    pub fn format_statement(&self, line: usize) -> Result<String> {
        line.checked_sub(1)
            .and_then(|i| self.stmts.get(i))
            .map(|stmt| stmt.to_string())
            .ok_or_else(|| ScriptError::line_out_of_range(line, self.stmts.len()))
    }
}

/// Runs a statement outside any function. A `return` cannot legally get
/// here from parsed source.
fn run_top_level(stmt: &Stmt, env: &mut Environment) -> Result<Value> {
    match exec_stmt(stmt, env)? {
        ExecSignal::Continue(value) => Ok(value),
        ExecSignal::Return(_) => Err(ScriptError::internal(
            "'return' reached the top level outside any function",
        )),
    }
}
