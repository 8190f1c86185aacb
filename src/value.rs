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

use std::fmt;

use serde::Serialize;

use crate::ast::BinaryOp;
use crate::error::{Result, ScriptError};

/// LAZYSCRIPT runtime value representation.
///
/// Every expression ultimately evaluates to one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    String(String),
    Bool(bool),

    /// Result of a function that returned without a value.
    Void,
}

impl Value {
    /// Returns a stable type name string (useful for errors).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int",
            Value::String(_) => "String",
            Value::Bool(_) => "Bool",
            Value::Void => "Void",
        }
    }

    /// Operand rendering used in type errors: `Int(3)`, `String("a")`, …
    pub fn describe(&self) -> String {
        match self {
            Value::Int(n) => format!("Int({})", n),
            Value::String(s) => format!("String({:?})", s),
            Value::Bool(b) => format!("Bool({})", b),
            Value::Void => "Void".to_string(),
        }
    }

    /// Numeric view: booleans count as 0 / 1.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Logical view: integers are truthy when greater than zero.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Int(n) => Some(*n > 0),
            _ => None,
        }
    }

    /// Text used when this value is concatenated onto a string.
    fn concat_text(&self) -> Option<String> {
        match self {
            Value::Void => None,
            other => Some(other.to_string()),
        }
    }

    /* ----------------------------------------------------------------------
     * Operator dispatch
     * -------------------------------------------------------------------- */

    /// Applies a binary operator. The rule is chosen from the runtime
    /// variants of both operands.
    pub fn binary(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value> {
        match op {
            BinaryOp::Add => lhs.add(rhs),
            BinaryOp::Sub => lhs.sub(rhs),
            BinaryOp::Mul => lhs.mul(rhs),
            BinaryOp::Div => lhs.div(rhs),
            BinaryOp::And => lhs.and(rhs),
            BinaryOp::Or => lhs.or(rhs),
            BinaryOp::Gt | BinaryOp::Lt | BinaryOp::Gte | BinaryOp::Lte | BinaryOp::Eq => {
                lhs.compare(op, rhs)
            }
        }
    }

    pub fn add(&self, other: &Value) -> Result<Value> {
        if matches!(self, Value::String(_)) || matches!(other, Value::String(_)) {
            return match (self.concat_text(), other.concat_text()) {
                (Some(a), Some(b)) => Ok(Value::String(a + &b)),
                _ => Err(mismatch(BinaryOp::Add, self, other)),
            };
        }

        let (a, b) = self.numeric_pair(BinaryOp::Add, other)?;
        a.checked_add(b)
            .map(Value::Int)
            .ok_or_else(|| ScriptError::overflow("+"))
    }

    pub fn sub(&self, other: &Value) -> Result<Value> {
        let (a, b) = self.numeric_pair(BinaryOp::Sub, other)?;
        a.checked_sub(b)
            .map(Value::Int)
            .ok_or_else(|| ScriptError::overflow("-"))
    }

    /// Numeric product, or `string * int` repetition. A repeat count of
    /// zero or less produces the empty string.
    pub fn mul(&self, other: &Value) -> Result<Value> {
        if let (Value::String(s), Value::Int(n)) = (self, other) {
            let count = usize::try_from(*n).unwrap_or(0);
            return Ok(Value::String(s.repeat(count)));
        }

        let (a, b) = self.numeric_pair(BinaryOp::Mul, other)?;
        a.checked_mul(b)
            .map(Value::Int)
            .ok_or_else(|| ScriptError::overflow("*"))
    }

    /// Integer division, truncating toward zero.
    pub fn div(&self, other: &Value) -> Result<Value> {
        let (a, b) = self.numeric_pair(BinaryOp::Div, other)?;
        if b == 0 {
            return Err(ScriptError::division_by_zero());
        }
        a.checked_div(b)
            .map(Value::Int)
            .ok_or_else(|| ScriptError::overflow("/"))
    }

    pub fn and(&self, other: &Value) -> Result<Value> {
        let (a, b) = self.logical_pair(BinaryOp::And, other)?;
        Ok(Value::Bool(a && b))
    }

    pub fn or(&self, other: &Value) -> Result<Value> {
        let (a, b) = self.logical_pair(BinaryOp::Or, other)?;
        Ok(Value::Bool(a || b))
    }

    pub fn not(&self) -> Result<Value> {
        self.as_bool()
            .map(|b| Value::Bool(!b))
            .ok_or_else(|| ScriptError::type_mismatch("!", &[self.describe()]))
    }

    fn compare(&self, op: BinaryOp, other: &Value) -> Result<Value> {
        let (a, b) = self.numeric_pair(op, other)?;
        let result = match op {
            BinaryOp::Gt => a > b,
            BinaryOp::Lt => a < b,
            BinaryOp::Gte => a >= b,
            BinaryOp::Lte => a <= b,
            BinaryOp::Eq => a == b,
            _ => return Err(mismatch(op, self, other)),
        };
        Ok(Value::Bool(result))
    }

    fn numeric_pair(&self, op: BinaryOp, other: &Value) -> Result<(i64, i64)> {
        match (self.as_int(), other.as_int()) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(mismatch(op, self, other)),
        }
    }

    fn logical_pair(&self, op: BinaryOp, other: &Value) -> Result<(bool, bool)> {
        match (self.as_bool(), other.as_bool()) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(mismatch(op, self, other)),
        }
    }
}

fn mismatch(op: BinaryOp, lhs: &Value, rhs: &Value) -> ScriptError {
    ScriptError::type_mismatch(op.symbol(), &[lhs.describe(), rhs.describe()])
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Void => write!(f, "undefined"),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::Value;
    use crate::ast::BinaryOp;
    use crate::error::ErrorKind;

    fn s(text: &str) -> Value {
        Value::from(text)
    }

    #[test]
    fn add_concatenates_when_either_side_is_a_string() {
        assert_eq!(s("a").add(&Value::Int(1)).unwrap(), s("a1"));
        assert_eq!(Value::Int(1).add(&s("a")).unwrap(), s("1a"));
        assert_eq!(s("x").add(&Value::Bool(true)).unwrap(), s("xtrue"));
    }

    #[test]
    fn booleans_coerce_to_integers() {
        assert_eq!(Value::Int(10).add(&Value::Bool(true)).unwrap(), Value::Int(11));
        assert_eq!(Value::Bool(true).add(&Value::Bool(true)).unwrap(), Value::Int(2));
        assert_eq!(Value::Bool(false).sub(&Value::Int(3)).unwrap(), Value::Int(-3));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let err = Value::Int(10).div(&Value::Int(0)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);

        let err = Value::Int(10).div(&Value::Bool(false)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
    }

    #[test]
    fn division_truncates() {
        assert_eq!(Value::Int(7).div(&Value::Int(2)).unwrap(), Value::Int(3));
        assert_eq!(Value::Int(-7).div(&Value::Int(2)).unwrap(), Value::Int(-3));
    }

    #[test]
    fn string_repetition() {
        assert_eq!(s("ab").mul(&Value::Int(3)).unwrap(), s("ababab"));
        assert_eq!(s("ab").mul(&Value::Int(0)).unwrap(), s(""));
        assert_eq!(s("ab").mul(&Value::Int(-2)).unwrap(), s(""));

        let err = Value::Int(3).mul(&s("ab")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeMismatch);
    }

    #[test]
    fn type_mismatch_names_operator_and_operands() {
        let err = s("a").sub(&Value::Int(1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeMismatch);
        assert!(err.message.contains("'-'"));
        assert!(err.message.contains("String(\"a\")"));
        assert!(err.message.contains("Int(1)"));
    }

    #[test]
    fn logic_treats_positive_integers_as_true() {
        assert_eq!(Value::Int(2).and(&Value::Bool(true)).unwrap(), Value::Bool(true));
        assert_eq!(Value::Int(0).or(&Value::Int(-1)).unwrap(), Value::Bool(false));
        assert_eq!(Value::Int(0).not().unwrap(), Value::Bool(true));
        assert!(s("yes").not().is_err());
    }

    #[test]
    fn comparisons_yield_booleans() {
        let cases = [
            (BinaryOp::Gt, 3, 2, true),
            (BinaryOp::Lt, 3, 2, false),
            (BinaryOp::Gte, 2, 2, true),
            (BinaryOp::Lte, 3, 2, false),
            (BinaryOp::Eq, 2, 2, true),
        ];
        for (op, a, b, expected) in cases {
            let result = Value::binary(op, &Value::Int(a), &Value::Int(b)).unwrap();
            assert_eq!(result, Value::Bool(expected), "{:?}", op);
        }

        assert_eq!(
            Value::binary(BinaryOp::Eq, &Value::Bool(true), &Value::Int(1)).unwrap(),
            Value::Bool(true)
        );
        assert!(Value::binary(BinaryOp::Eq, &s("a"), &s("a")).is_err());
    }

    #[test]
    fn overflow_is_reported() {
        let err = Value::Int(i64::MAX).add(&Value::Int(1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Overflow);
    }

    #[test]
    fn void_supports_no_operator() {
        assert!(Value::Void.add(&Value::Int(1)).is_err());
        assert!(s("a").add(&Value::Void).is_err());
        assert_eq!(Value::Void.to_string(), "undefined");
    }
}
