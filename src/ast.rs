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

//! Syntax tree produced by the parser and walked by the interpreter.
//!
//! Both trees are plain owned values: no node refers back to its parent
//! and a function declaration exclusively owns its body.

pub mod expr;
pub mod stmt;

pub use expr::{BinaryOp, Expr};
pub use stmt::{Modifier, Stmt};
