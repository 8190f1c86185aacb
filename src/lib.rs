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

//! LAZYSCRIPT: a tiny JavaScript-flavoured language whose variables
//! remember how they were made.
//!
//! ```text
//! let a = 1;
//! let b = 2;
//! let d = a + b;   // d is 3
//! a = 2;           // d now reads as 4
//! ```
//!
//! A variable keeps the expression it was declared or last assigned with,
//! and every read evaluates that expression again.
//!
//! ```
//! use lazyscript::{Program, Value};
//!
//! let mut program = Program::from_source("let a = 1; let b = 2; let d = a + b;").unwrap();
//! program.execute().unwrap();
//! program.eval_source("a = 2;").unwrap();
//! assert_eq!(program.get_variable("d").unwrap(), Value::Int(4));
//! ```

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod span;
pub mod value;

pub use ast::{BinaryOp, Expr, Modifier, Stmt};
pub use config::InterpreterConfig;
pub use diagnostics::DiagnosticPrinter;
pub use error::{ErrorKind, Result, ScriptError};
pub use interpreter::display::SymbolInfo;
pub use interpreter::{Environment, Program, Request};
pub use parser::{parse, parse_expression, parse_with_config};
pub use span::Span;
pub use value::Value;
