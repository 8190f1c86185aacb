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

//! LAZYSCRIPT Interpreter
//! ----------------------
//!
//! Tree-walking evaluation over the parsed [`Stmt`](crate::ast::Stmt) list.
//!
//! - `environment.rs` → symbol storage, declare / assign / read
//! - `expressions.rs` → `eval` over every [`Expr`](crate::ast::Expr) variant
//! - `statements.rs`  → `exec_stmt`, control signals
//! - `calls.rs`       → user-defined function invocation
//! - `display.rs`     → symbol table rendering and help text
//! - `program.rs`     → the `Program` facade and command requests
//!
//! Everything here is single-threaded. An `Environment` is owned by the
//! `Program` or call frame that created it and is never shared.

pub mod calls;
pub mod display;
pub mod environment;
pub mod expressions;
pub mod program;
pub mod statements;

pub use environment::{Environment, FunctionDef, Symbol};
pub use program::{Program, Request};
pub use statements::ExecSignal;

/// Keep this much stack free before recursing further.
const RED_ZONE: usize = 100 * 1024;

/// Grow the stack by this much when the red zone is reached.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, growing the native stack first when it is nearly exhausted.
///
/// The configured `max_depth` is what actually ends runaway recursion; this
/// only makes sure the host stack can hold that many frames.
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
