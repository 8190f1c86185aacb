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

//! Symbol storage for one program or call frame.
//!
//! An [`Environment`] owns its symbols outright. There is no parent link:
//! a call frame sees its parameters and whatever it declares itself,
//! nothing from the caller.
//!
//! Variables remember the expression that produced their value. Reading a
//! variable re-evaluates that expression against the current state, which
//! is how `let d = a + b` follows later assignments to `a`.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use tracing::{debug, trace};

use crate::ast::{Expr, Modifier, Stmt};
use crate::config::InterpreterConfig;
use crate::error::{Result, ScriptError};
use crate::interpreter::ensure_sufficient_stack;
use crate::interpreter::expressions::eval;
use crate::value::Value;

/// A user-defined function.
///
/// The body sits behind an `Rc` so a call can run it while the
/// environment it was looked up in stays mutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Rc<Vec<Stmt>>,
}

/// A named entry in an [`Environment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Variable {
        name: String,

        /// Value from the most recent evaluation.
        value: Value,

        modifier: Modifier,

        /// Expression re-evaluated on every read, if any.
        bound: Option<Rc<Expr>>,
    },

    Function(FunctionDef),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Variable { name, .. } => name,
            Symbol::Function(func) => &func.name,
        }
    }
}

/* ============================================================================
 * Environment
 * ============================================================================
 */

#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Symbols in declaration order.
    symbols: Vec<Symbol>,

    /// Name → position in `symbols`.
    index: HashMap<String, usize>,

    config: InterpreterConfig,

    /// Current evaluation nesting, shared down into call frames.
    depth: usize,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// A fresh, empty frame for a function call, one level deeper than
    /// this one.
    pub fn for_call(&self) -> Result<Environment> {
        if self.depth >= self.config.max_depth {
            return Err(ScriptError::stack_exhausted(self.config.max_depth));
        }

        Ok(Environment {
            depth: self.depth + 1,
            ..Environment::with_config(self.config)
        })
    }

    /// Runs `f` one evaluation level deeper.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.config.max_depth {
            return Err(ScriptError::stack_exhausted(self.config.max_depth));
        }

        self.depth += 1;
        let result = ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }

    /* ------------------------------------------------------------------
     * Lookup
     * ---------------------------------------------------------------- */

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&i| &self.symbols[i])
    }

    /// All symbols, oldest first.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| ScriptError::not_declared(name))
    }

    fn insert(&mut self, symbol: Symbol) -> Result<()> {
        let name = symbol.name();
        if self.contains(name) {
            return Err(ScriptError::already_declared(name));
        }

        self.index.insert(name.to_string(), self.symbols.len());
        self.symbols.push(symbol);
        Ok(())
    }

    /* ------------------------------------------------------------------
     * Declarations
     * ---------------------------------------------------------------- */

    /// Declares a variable, evaluating `initializer` now and keeping it for
    /// later reads. Without an initializer the value is `0`.
    ///
    /// On failure nothing is declared.
    pub fn declare_variable(
        &mut self,
        name: &str,
        initializer: Option<&Expr>,
        modifier: Modifier,
    ) -> Result<Value> {
        if self.contains(name) {
            return Err(ScriptError::already_declared(name));
        }

        let value = match initializer {
            Some(expr) => eval(expr, self)?,
            None => Value::Int(0),
        };

        debug!(symbol = name, modifier = modifier.keyword(), value = %value, "declare variable");

        self.insert(Symbol::Variable {
            name: name.to_string(),
            value: value.clone(),
            modifier,
            bound: initializer.map(|expr| Rc::new(expr.clone())),
        })?;

        Ok(value)
    }

    /// Declares a variable holding a plain value with nothing to
    /// re-evaluate. Used for call parameters.
    pub fn define_variable(&mut self, name: &str, value: Value, modifier: Modifier) -> Result<()> {
        self.insert(Symbol::Variable {
            name: name.to_string(),
            value,
            modifier,
            bound: None,
        })
    }

    pub fn declare_function(&mut self, name: &str, params: &[String], body: &[Stmt]) -> Result<()> {
        debug!(symbol = name, arity = params.len(), "declare function");

        self.insert(Symbol::Function(FunctionDef {
            name: name.to_string(),
            params: params.to_vec(),
            body: Rc::new(body.to_vec()),
        }))
    }

    /* ------------------------------------------------------------------
     * Assignment
     * ---------------------------------------------------------------- */

    /// Rebinds a `let` variable to `expr` and returns its new value.
    ///
    /// The binding is refused when `expr` would read `name`, directly or
    /// through the bound expressions of other variables.
    pub fn assign_variable(&mut self, name: &str, expr: &Expr) -> Result<Value> {
        let idx = self.position(name)?;

        match &self.symbols[idx] {
            Symbol::Function(_) => return Err(ScriptError::wrong_kind(name, "variable")),
            Symbol::Variable {
                modifier: Modifier::Const,
                ..
            } => return Err(ScriptError::const_reassignment(name)),
            Symbol::Variable { .. } => {}
        }

        self.check_acyclic(name, expr)?;

        let new_value = eval(expr, self)?;
        debug!(symbol = name, value = %new_value, "assign variable");

        if let Symbol::Variable { value, bound, .. } = &mut self.symbols[idx] {
            *value = new_value.clone();
            *bound = Some(Rc::new(expr.clone()));
        }

        Ok(new_value)
    }

    fn check_acyclic<'a>(&'a self, target: &str, expr: &'a Expr) -> Result<()> {
        let mut pending: Vec<&'a str> = Vec::new();
        let mut seen: HashSet<&'a str> = HashSet::new();

        expr.for_each_reference(&mut |name| pending.push(name));

        while let Some(name) = pending.pop() {
            if name == target {
                return Err(ScriptError::cyclic_binding(target));
            }
            if !seen.insert(name) {
                continue;
            }

            if let Some(Symbol::Variable {
                bound: Some(bound), ..
            }) = self.lookup(name)
            {
                bound.for_each_reference(&mut |name| pending.push(name));
            }
        }

        Ok(())
    }

    /* ------------------------------------------------------------------
     * Reads
     * ---------------------------------------------------------------- */

    /// Current value of a variable, re-evaluating its bound expression.
    pub fn get_variable(&mut self, name: &str) -> Result<Value> {
        let idx = self.position(name)?;

        let bound = match &self.symbols[idx] {
            Symbol::Variable {
                bound: Some(expr), ..
            } => Rc::clone(expr),
            Symbol::Variable { value, .. } => return Ok(value.clone()),
            Symbol::Function(_) => return Err(ScriptError::wrong_kind(name, "variable")),
        };

        trace!(symbol = name, depth = self.depth, "re-evaluate");
        let fresh = self.nested(|env| eval(&bound, env))?;

        // Only cache if the read did not rebind the variable meanwhile.
        if let Symbol::Variable {
            value,
            bound: Some(current),
            ..
        } = &mut self.symbols[idx]
        {
            if Rc::ptr_eq(current, &bound) {
                *value = fresh.clone();
            }
        }

        Ok(fresh)
    }

    /// Last computed value of a variable, without re-evaluating.
    pub fn cached_value(&self, name: &str) -> Result<&Value> {
        match self.lookup(name) {
            Some(Symbol::Variable { value, .. }) => Ok(value),
            Some(Symbol::Function(_)) => Err(ScriptError::wrong_kind(name, "variable")),
            None => Err(ScriptError::not_declared(name)),
        }
    }

    pub fn get_function(&self, name: &str) -> Result<&FunctionDef> {
        match self.lookup(name) {
            Some(Symbol::Function(func)) => Ok(func),
            Some(Symbol::Variable { .. }) => Err(ScriptError::wrong_kind(name, "function")),
            None => Err(ScriptError::not_declared(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;
    use crate::error::ErrorKind;

    fn sum(a: &str, b: &str) -> Expr {
        Expr::binary(BinaryOp::Add, Expr::var(a), Expr::var(b))
    }

    #[test]
    fn let_without_initializer_is_zero() {
        let mut env = Environment::new();
        env.declare_variable("x", None, Modifier::Mutable).unwrap();
        assert_eq!(env.get_variable("x").unwrap(), Value::Int(0));
    }

    #[test]
    fn redeclaration_leaves_state_unchanged() {
        let mut env = Environment::new();
        env.declare_variable("a", Some(&Expr::int(1)), Modifier::Mutable)
            .unwrap();

        let err = env
            .declare_variable("a", Some(&Expr::int(99)), Modifier::Const)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::AlreadyDeclared);

        assert_eq!(env.symbols().len(), 1);
        assert_eq!(env.get_variable("a").unwrap(), Value::Int(1));
        env.assign_variable("a", &Expr::int(5)).unwrap();
    }

    #[test]
    fn functions_and_variables_share_one_namespace() {
        let mut env = Environment::new();
        env.declare_function("f", &[], &[Stmt::Return(None)]).unwrap();

        let err = env.declare_variable("f", None, Modifier::Mutable).unwrap_err();
        assert_eq!(err.kind, ErrorKind::AlreadyDeclared);
    }

    #[test]
    fn reads_follow_assignments() {
        let mut env = Environment::new();
        env.declare_variable("a", Some(&Expr::int(1)), Modifier::Mutable)
            .unwrap();
        env.declare_variable("b", Some(&Expr::int(2)), Modifier::Mutable)
            .unwrap();
        env.declare_variable("d", Some(&sum("a", "b")), Modifier::Mutable)
            .unwrap();

        env.assign_variable("a", &Expr::int(2)).unwrap();

        assert_eq!(env.get_variable("d").unwrap(), Value::Int(4));
        assert_eq!(env.cached_value("d").unwrap(), &Value::Int(4));
    }

    #[test]
    fn const_is_never_reassigned() {
        let mut env = Environment::new();
        env.declare_variable("c", Some(&Expr::int(3)), Modifier::Const)
            .unwrap();
        env.get_variable("c").unwrap();

        let err = env.assign_variable("c", &Expr::int(4)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ConstReassignment);
        assert_eq!(env.get_variable("c").unwrap(), Value::Int(3));
    }

    #[test]
    fn self_reference_is_rejected() {
        let mut env = Environment::new();
        env.declare_variable("x", Some(&Expr::int(1)), Modifier::Mutable)
            .unwrap();

        let err = env
            .assign_variable("x", &Expr::binary(BinaryOp::Add, Expr::var("x"), Expr::int(1)))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::CyclicBinding);
        assert_eq!(env.get_variable("x").unwrap(), Value::Int(1));
    }

    #[test]
    fn indirect_self_reference_is_rejected() {
        let mut env = Environment::new();
        env.declare_variable("a", Some(&Expr::int(1)), Modifier::Mutable)
            .unwrap();
        env.declare_variable("b", Some(&Expr::var("a")), Modifier::Mutable)
            .unwrap();
        env.declare_variable("c", Some(&Expr::var("b")), Modifier::Mutable)
            .unwrap();

        let err = env.assign_variable("a", &Expr::var("c")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::CyclicBinding);

        // Unrelated rebinding still works.
        assert_eq!(env.assign_variable("a", &Expr::int(7)).unwrap(), Value::Int(7));
        assert_eq!(env.get_variable("c").unwrap(), Value::Int(7));
    }

    #[test]
    fn wrong_kind_lookups() {
        let mut env = Environment::new();
        env.declare_variable("v", None, Modifier::Mutable).unwrap();
        env.declare_function("f", &[], &[Stmt::Return(None)]).unwrap();

        assert_eq!(env.get_function("v").unwrap_err().kind, ErrorKind::WrongKind);
        assert_eq!(env.get_variable("f").unwrap_err().kind, ErrorKind::WrongKind);
        assert_eq!(
            env.assign_variable("f", &Expr::int(1)).unwrap_err().kind,
            ErrorKind::WrongKind
        );
        assert_eq!(env.get_variable("nope").unwrap_err().kind, ErrorKind::NotDeclared);
    }

    #[test]
    fn long_binding_chains_hit_the_depth_limit() {
        let config = InterpreterConfig {
            max_depth: 3,
            ..InterpreterConfig::default()
        };
        let mut env = Environment::with_config(config);

        env.declare_variable("a", Some(&Expr::int(1)), Modifier::Mutable)
            .unwrap();
        env.declare_variable("b", Some(&Expr::var("a")), Modifier::Mutable)
            .unwrap();
        env.declare_variable("c", Some(&Expr::var("b")), Modifier::Mutable)
            .unwrap();
        env.declare_variable("d", Some(&Expr::var("c")), Modifier::Mutable)
            .unwrap();

        let err = env
            .declare_variable("e", Some(&Expr::var("d")), Modifier::Mutable)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::StackExhausted);
        assert!(!env.contains("e"));
        assert_eq!(env.depth(), 0);
    }
}
