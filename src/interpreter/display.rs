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

//! Human-facing views of an environment: the symbol table printed by the
//! `info` command and the `help` text.

use serde::Serialize;

use crate::ast::Modifier;
use crate::value::Value;

/// Listing shown for the `help` command.
pub const HELP_TEXT: &str = "\
Commands:
  evalLine N           re-run statement N (1-based)
  assign NAME EXPR     rebind variable NAME to EXPR
  invoke NAME a, b     call function NAME with the given arguments
  info                 list declared symbols
  help                 show this message
Anything else is run as source code.";

/// Snapshot of one symbol, in a shape fit for printing or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolInfo {
    pub name: String,

    /// `"variable"` or `"function"`.
    pub kind: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<Modifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<String>>,

    /// Current value of a variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Why reading the variable failed, when it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SymbolInfo {
    /// Text for the KIND column: `let`, `const` or `function(a, b)`.
    pub fn kind_label(&self) -> String {
        match (&self.modifier, &self.params) {
            (Some(modifier), _) => modifier.keyword().to_string(),
            (None, Some(params)) => format!("function({})", params.join(", ")),
            (None, None) => self.kind.to_string(),
        }
    }

    /// Text for the VALUE column.
    pub fn value_label(&self) -> String {
        match (&self.value, &self.error) {
            (_, Some(error)) => format!("<error: {}>", error),
            (Some(Value::String(s)), None) => format!("{:?}", s),
            (Some(value), None) => value.to_string(),
            (None, None) => "-".to_string(),
        }
    }
}

/// Renders symbols as aligned `NAME | KIND | VALUE` columns.
pub fn render_table(symbols: &[SymbolInfo]) -> String {
    if symbols.is_empty() {
        return "No symbols declared".to_string();
    }

    let rows: Vec<[String; 3]> = symbols
        .iter()
        .map(|s| [s.name.clone(), s.kind_label(), s.value_label()])
        .collect();

    let name_width = rows.iter().map(|r| r[0].chars().count()).max().unwrap_or(0).max(4);
    let kind_width = rows.iter().map(|r| r[1].chars().count()).max().unwrap_or(0).max(4);

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format!("{:<name_width$} | {:<kind_width$} | VALUE", "NAME", "KIND"));
    for [name, kind, value] in rows {
        lines.push(format!("{:<name_width$} | {:<kind_width$} | {}", name, kind, value));
    }

    lines.join("\n")
}
