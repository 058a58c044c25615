//! Terms: constants, offset-bearing variables and function applications.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{LogicError, Result};

/// Payload of a constant term.
///
/// Only integer values take part in offset arithmetic; symbols are opaque atoms.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Value {
    /// Integer coordinate or count; shifts with offsets
    Int(i64),
    /// Named atom such as `BREEZE`
    Symbol(String),
}

impl Value {
    /// The integer payload, or `None` for a symbol.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Symbol(_) => None,
        }
    }

    /// Check whether this value can absorb an offset.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Symbol(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Symbol(s)
    }
}

/// A node of the logical language.
///
/// `Variable { name: "x", offset: 1 }` stands for `x + 1`. Equality, hashing and
/// ordering are structural so terms can live in clause literal sets.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    /// Constant value (`3`, `BREEZE`)
    Constant(Value),
    /// Variable `name + offset`; an offset of zero is the plain variable
    Variable { name: String, offset: i64 },
    /// Function application `name(args...)`, also used for atoms
    Function { name: String, args: Vec<Term> },
}

impl Term {
    /// Create a constant from an integer or a symbol name.
    pub fn constant(value: impl Into<Value>) -> Self {
        Term::Constant(value.into())
    }

    /// Create a variable with zero offset.
    pub fn variable(name: impl Into<String>) -> Self {
        Term::Variable {
            name: name.into(),
            offset: 0,
        }
    }

    /// Create a variable shifted by a fixed integer amount (`x + offset`).
    pub fn offset_variable(name: impl Into<String>, offset: i64) -> Self {
        Term::Variable {
            name: name.into(),
            offset,
        }
    }

    /// Create a function application; with no arguments it is a nullary atom.
    pub fn function(name: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Function {
            name: name.into(),
            args,
        }
    }

    /// Check if this term is a variable, whatever its offset.
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable { .. })
    }

    /// Name of the variable if this term is one.
    pub fn var_name(&self) -> Option<&str> {
        match self {
            Term::Variable { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Check whether the term contains no variables at all.
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Constant(_) => true,
            Term::Variable { .. } => false,
            Term::Function { args, .. } => args.iter().all(Term::is_ground),
        }
    }

    /// All variable names occurring in the term.
    pub fn variables(&self) -> BTreeSet<String> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    pub(crate) fn collect_variables(&self, vars: &mut BTreeSet<String>) {
        match self {
            Term::Constant(_) => {}
            Term::Variable { name, .. } => {
                vars.insert(name.clone());
            }
            Term::Function { args, .. } => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    /// Shift this term by `offset`.
    ///
    /// Variables absorb the offset and integer constants are adjusted. Symbols and
    /// function applications can only be shifted by zero; `None` otherwise, and also
    /// when the shifted value would overflow `i64`.
    pub fn shifted(&self, offset: i64) -> Option<Term> {
        if offset == 0 {
            return Some(self.clone());
        }
        match self {
            Term::Variable { name, offset: own } => Some(Term::Variable {
                name: name.clone(),
                offset: own.checked_add(offset)?,
            }),
            Term::Constant(Value::Int(n)) => {
                Some(Term::Constant(Value::Int(n.checked_add(offset)?)))
            }
            Term::Constant(Value::Symbol(_)) | Term::Function { .. } => None,
        }
    }

    /// Substitute every occurrence of `var_name` with `replacement`.
    ///
    /// An occurrence `var_name + k` becomes `replacement + k`. Shifting a function
    /// application or a symbolic constant by a non-zero amount is a structural error.
    pub fn replace(&self, var_name: &str, replacement: &Term) -> Result<Term> {
        match self {
            Term::Variable { name, offset } if name == var_name => replacement
                .shifted(*offset)
                .ok_or_else(|| LogicError::structural(name, *offset, replacement)),
            Term::Function { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| arg.replace(var_name, replacement))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Term::Function {
                    name: name.clone(),
                    args,
                })
            }
            _ => Ok(self.clone()),
        }
    }

    /// Append `_<suffix>` to every variable name in the subtree.
    pub fn rename_suffix(&self, suffix: &str) -> Term {
        self.map_variables(&mut |name| format!("{}_{}", name, suffix))
    }

    /// Rebuild the term with every variable renamed by `rename`, keeping offsets.
    pub fn map_variables(&self, rename: &mut impl FnMut(&str) -> String) -> Term {
        match self {
            Term::Constant(_) => self.clone(),
            Term::Variable { name, offset } => Term::Variable {
                name: rename(name),
                offset: *offset,
            },
            Term::Function { name, args } => Term::Function {
                name: name.clone(),
                args: args.iter().map(|arg| arg.map_variables(rename)).collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: Term, y: Term) -> Term {
        Term::function("pos", vec![x, y])
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Term::variable("x"), Term::offset_variable("x", 0));
        assert_ne!(Term::variable("x"), Term::offset_variable("x", 1));
        assert_ne!(Term::constant(1), Term::constant("1"));
        assert_ne!(
            Term::function("f", vec![Term::constant("a"), Term::constant("b")]),
            Term::function("f", vec![Term::constant("b"), Term::constant("a")])
        );
    }

    #[test]
    fn test_replace_plain_variable() {
        let term = pos(Term::variable("x"), Term::variable("y"));
        let replaced = term.replace("x", &Term::constant(3)).unwrap();
        assert_eq!(replaced, pos(Term::constant(3), Term::variable("y")));
    }

    #[test]
    fn test_replace_offset_variable_with_constant() {
        let term = Term::offset_variable("x", 1);
        assert_eq!(
            term.replace("x", &Term::constant(4)).unwrap(),
            Term::constant(5)
        );

        let term = Term::offset_variable("x", -1);
        assert_eq!(
            term.replace("x", &Term::constant(4)).unwrap(),
            Term::constant(3)
        );
    }

    #[test]
    fn test_replace_offset_variable_with_variable() {
        let term = Term::offset_variable("x", 2);
        let replaced = term
            .replace("x", &Term::offset_variable("y", -1))
            .unwrap();
        assert_eq!(replaced, Term::offset_variable("y", 1));
    }

    #[test]
    fn test_replace_offset_variable_with_function_fails() {
        let term = Term::function("pit", vec![Term::offset_variable("x", 1)]);
        let err = term
            .replace("x", &Term::function("f", vec![Term::constant(1)]))
            .unwrap_err();
        assert!(matches!(err, LogicError::Structural { offset: 1, .. }));
    }

    #[test]
    fn test_replace_offset_variable_with_symbol_fails() {
        let term = Term::offset_variable("x", -1);
        assert!(term.replace("x", &Term::constant("BREEZE")).is_err());
    }

    #[test]
    fn test_shifted_overflow() {
        assert_eq!(Term::constant(i64::MAX).shifted(1), None);
        assert_eq!(Term::offset_variable("x", i64::MIN).shifted(-1), None);
        assert_eq!(
            Term::constant(i64::MAX - 1).shifted(1),
            Some(Term::constant(i64::MAX))
        );

        let err = Term::offset_variable("x", 1)
            .replace("x", &Term::constant(i64::MAX))
            .unwrap_err();
        assert!(matches!(err, LogicError::Structural { offset: 1, .. }));
    }

    #[test]
    fn test_replace_zero_offset_with_function() {
        let f = Term::function("f", vec![Term::variable("z")]);
        assert_eq!(Term::variable("x").replace("x", &f).unwrap(), f);
    }

    #[test]
    fn test_replace_leaves_other_variables() {
        let term = Term::offset_variable("y", 1);
        assert_eq!(term.replace("x", &Term::constant(1)).unwrap(), term);
    }

    #[test]
    fn test_rename_suffix() {
        let term = pos(Term::offset_variable("x", 1), Term::constant("a"));
        let renamed = term.rename_suffix("3");
        assert_eq!(
            renamed,
            pos(Term::offset_variable("x_3", 1), Term::constant("a"))
        );
        assert_eq!(renamed.variables().into_iter().collect::<Vec<_>>(), ["x_3"]);
    }

    #[test]
    fn test_is_ground() {
        assert!(pos(Term::constant(1), Term::constant(2)).is_ground());
        assert!(!pos(Term::constant(1), Term::variable("y")).is_ground());
    }
}
