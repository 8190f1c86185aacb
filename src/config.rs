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

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, Result, ScriptError};

/// Resource limits for one interpreter instance.
///
/// Every field has a default, so a JSON file only needs to name the
/// limits it changes:
///
/// ```json
/// { "max_depth": 4000 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Maximum nesting of variable re-evaluation and function calls.
    pub max_depth: usize,

    /// Maximum depth of a parsed tree: parentheses, call arguments,
    /// function bodies and each operator in a `+ - * /` chain.
    pub max_parse_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_depth: 1000,
            max_parse_depth: 256,
        }
    }
}

impl InterpreterConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            ScriptError::new(ErrorKind::Config, format!("Invalid configuration: {}", e))
        })
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            ScriptError::new(
                ErrorKind::Config,
                format!("Failed to read configuration '{}': {}", path.display(), e),
            )
        })?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::InterpreterConfig;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = InterpreterConfig::from_json_str(r#"{ "max_depth": 12 }"#).unwrap();
        assert_eq!(config.max_depth, 12);
        assert_eq!(config.max_parse_depth, InterpreterConfig::default().max_parse_depth);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(InterpreterConfig::from_json_str("{ max_depth: ").is_err());
    }
}
