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

use std::fmt::Write;

use crate::error::ScriptError;

/// Renders compiler-style diagnostics for LAZYSCRIPT errors.
///
/// Syntax errors point into the source with a caret; runtime errors carry
/// no location and are printed as a header plus optional help. The output
/// uses no color.
pub struct DiagnosticPrinter {
    /// Full source code of the file being interpreted.
    source: String,

    /// Name shown in the `-->` line.
    file_name: String,
}

impl DiagnosticPrinter {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Formats `error` as a multi-line diagnostic.
    ///
    /// ```text
    /// error[E_PARSE]: Function call ')' should be closed
    ///   --> script.lz:3:14
    ///    |
    ///  3 | let x = add(1, 2;
    ///    |                 ^
    /// ```
    pub fn render(&self, error: &ScriptError) -> String {
        let mut out = format!("error[{}]: {}", error.code(), error.message);

        if let Some(span) = error.span {
            let src_line = self.source.lines().nth(span.line.saturating_sub(1)).unwrap_or("");

            let _ = write!(out, "\n  --> {}:{}", self.file_name, span);
            out.push_str("\n   |");
            let _ = write!(out, "\n{:>3} | {}", span.line, src_line);
            let _ = write!(out, "\n   | {}^", " ".repeat(span.column));
        }

        if let Some(help) = &error.help {
            let _ = write!(out, "\nhelp: {}", help);
        }

        out
    }

    /// Prints the rendered diagnostic to stderr.
    pub fn print(&self, error: &ScriptError) {
        eprintln!("{}", self.render(error));
    }
}

#[cfg(test)]
mod tests {
    use super::DiagnosticPrinter;
    use crate::error::ScriptError;

    #[test]
    fn caret_points_at_the_column() {
        let source = "let a = 1;\nlet b = (a + 2;";
        let err = ScriptError::parse("Expected ')' after an opening '('", source, source.len());
        let text = DiagnosticPrinter::new("demo.lz", source).render(&err);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "error[E_PARSE]: Expected ')' after an opening '('");
        assert_eq!(lines[1], "  --> demo.lz:2:16");
        assert_eq!(lines[3], "  2 | let b = (a + 2;");
        assert_eq!(lines[4], format!("   | {}^", " ".repeat(15)));
    }

    #[test]
    fn runtime_errors_have_no_location() {
        let err = ScriptError::const_reassignment("b");
        let text = DiagnosticPrinter::new("demo.lz", "").render(&err);

        assert_eq!(
            text,
            "error[E_CONST]: Can't reassign const variable 'b'\nhelp: declare 'b' with `let` to make it mutable"
        );
    }
}
