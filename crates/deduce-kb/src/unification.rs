//! # First-Order Unification with Offset Arithmetic
//!
//! Unification finds a substitution `θ` such that `sθ = tθ`. Besides the usual
//! variable/constant/function cases, variables here may carry an integer offset
//! (`x + 1`), which is folded into integer constants and other variables when a
//! binding is made:
//!
//! ```rust
//! use deduce_kb::{unify, Term};
//!
//! let subs = unify(&Term::offset_variable("x", 1), &Term::constant(5)).unwrap();
//! assert_eq!(subs.get("x"), Some(&Term::constant(4)));
//! ```
//!
//! ## Bindings
//!
//! A binding `x ↦ t` states the value of the *un-offset* variable `x`. Binding two
//! variables records both directions (`x ↦ y + k` and `y ↦ x - k`), so the variables
//! form an alias class. Dereferencing follows the chain of bindings and, when it runs
//! into such a cycle, answers with the smallest variable name of the cycle. Every
//! member of a class therefore resolves to the same representative.
//!
//! ## Occurs check
//!
//! None is performed: `x` may be bound to `f(x)`. [`Substitution::apply`] stops
//! expanding a variable it is already expanding, so applying such a binding yields a
//! finite term, but unifying two terms that both depend on cyclic bindings can
//! recurse without bound.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{LogicError, Result};
use crate::term::Term;

/// A substitution maps variable names to terms.
///
/// Bindings keep their insertion order, which makes printing and iteration
/// deterministic. Equality ignores that order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    bindings: IndexMap<String, Term>,
}

/// Result of following a variable through the binding chain.
enum Walk<'a> {
    /// Unbound variable, or the representative of an alias class.
    Free(&'a str, i64),
    /// The chain ends in a non-variable term that still needs `offset` applied.
    Bound {
        variable: &'a str,
        term: &'a Term,
        offset: i64,
    },
    /// The input was not a variable.
    Rigid(&'a Term),
}

impl Substitution {
    /// Create an empty substitution (identity).
    pub fn empty() -> Self {
        Substitution {
            bindings: IndexMap::new(),
        }
    }

    /// Create a substitution with a single binding.
    pub fn singleton(var: impl Into<String>, term: Term) -> Self {
        let mut subs = Substitution::empty();
        subs.bind(var, term);
        subs
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Get the direct binding for a variable, if it exists.
    pub fn get(&self, var: &str) -> Option<&Term> {
        self.bindings.get(var)
    }

    /// Add or overwrite a binding.
    pub fn bind(&mut self, var: impl Into<String>, term: Term) {
        self.bindings.insert(var.into(), term);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.bindings.iter().map(|(var, term)| (var.as_str(), term))
    }

    /// All bound variable names, in binding order.
    pub fn domain(&self) -> Vec<String> {
        self.bindings.keys().cloned().collect()
    }

    /// Follow `term` through the bindings, composing offsets along the way.
    ///
    /// Fails with [`LogicError::Structural`] when the composed offset overflows.
    fn walk<'a>(&'a self, term: &'a Term) -> Result<Walk<'a>> {
        let (mut name, mut offset) = match term {
            Term::Variable { name, offset } => (name.as_str(), *offset),
            _ => return Ok(Walk::Rigid(term)),
        };
        let mut path: Vec<(&str, i64)> = Vec::new();
        loop {
            if let Some(start) = path.iter().position(|(seen, _)| *seen == name) {
                let (rep, rep_offset) = path[start..]
                    .iter()
                    .copied()
                    .min_by(|a, b| a.0.cmp(b.0))
                    .unwrap_or((name, offset));
                return Ok(Walk::Free(rep, rep_offset));
            }
            path.push((name, offset));
            match self.bindings.get(name) {
                None => return Ok(Walk::Free(name, offset)),
                Some(Term::Variable {
                    name: next,
                    offset: step,
                }) => {
                    let Some(composed) = offset.checked_add(*step) else {
                        return Err(LogicError::structural(
                            name,
                            offset,
                            &Term::offset_variable(next.clone(), *step),
                        ));
                    };
                    name = next.as_str();
                    offset = composed;
                }
                Some(bound) => {
                    return Ok(Walk::Bound {
                        variable: name,
                        term: bound,
                        offset,
                    })
                }
            }
        }
    }

    /// Dereference the top-level variable of `term`.
    ///
    /// Non-variables come back unchanged. Returns `None` when the chain ends in a term
    /// that cannot absorb the accumulated offset, or when the offsets overflow.
    pub fn resolve(&self, term: &Term) -> Option<Term> {
        match self.walk(term).ok()? {
            Walk::Free(name, offset) => Some(Term::offset_variable(name, offset)),
            Walk::Bound { term, offset, .. } => term.shifted(offset),
            Walk::Rigid(term) => Some(term.clone()),
        }
    }

    /// Apply this substitution to a term, resolving bindings transitively.
    ///
    /// # Errors
    ///
    /// [`LogicError::Structural`] if an offset variable resolves to a function
    /// application or a symbolic constant, or if offset arithmetic overflows `i64`.
    pub fn apply(&self, term: &Term) -> Result<Term> {
        self.apply_guarded(term, &mut Vec::new())
    }

    fn apply_guarded<'a>(&'a self, term: &'a Term, expanding: &mut Vec<&'a str>) -> Result<Term> {
        match self.walk(term)? {
            Walk::Free(name, offset) => Ok(Term::offset_variable(name, offset)),
            Walk::Bound {
                variable,
                term: bound,
                offset,
            } => {
                // Cyclic binding left behind by the missing occurs check.
                if expanding.contains(&variable) {
                    return Ok(term.clone());
                }
                expanding.push(variable);
                let inner = self.apply_guarded(bound, expanding);
                expanding.pop();
                let inner = inner?;
                inner
                    .shifted(offset)
                    .ok_or_else(|| LogicError::structural(variable, offset, &inner))
            }
            Walk::Rigid(Term::Function { name, args }) => {
                let args = args
                    .iter()
                    .map(|arg| self.apply_guarded(arg, expanding))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Term::Function {
                    name: name.clone(),
                    args,
                })
            }
            Walk::Rigid(term) => Ok(term.clone()),
        }
    }
}

/// Unify two terms, returning the most general unifier.
///
/// `None` means the terms do not unify; this is an ordinary outcome, not an error.
///
/// # Examples
///
/// ```rust
/// use deduce_kb::{unify, Term};
///
/// let f_a = Term::function("f", vec![Term::constant("a")]);
/// let g_a = Term::function("g", vec![Term::constant("a")]);
/// assert!(unify(&f_a, &g_a).is_none());
///
/// let x = Term::variable("x");
/// let mgu = unify(&Term::function("f", vec![x.clone()]), &f_a).unwrap();
/// assert_eq!(mgu.apply(&x).unwrap(), Term::constant("a"));
/// ```
pub fn unify(a: &Term, b: &Term) -> Option<Substitution> {
    unify_with(a, b, Substitution::empty())
}

/// Unify two terms on top of the bindings already in `subs`.
pub fn unify_with(a: &Term, b: &Term, mut subs: Substitution) -> Option<Substitution> {
    if unify_into(a, b, &mut subs) {
        Some(subs)
    } else {
        None
    }
}

/// Check if two terms are unifiable (without keeping the unifier).
pub fn are_unifiable(a: &Term, b: &Term) -> bool {
    unify(a, b).is_some()
}

fn unify_into(a: &Term, b: &Term, subs: &mut Substitution) -> bool {
    match (a, b) {
        (Term::Constant(x), Term::Constant(y)) => x == y,
        (Term::Variable { .. }, _) => unify_variable(a, b, subs),
        (_, Term::Variable { .. }) => unify_variable(b, a, subs),
        (
            Term::Function {
                name: f,
                args: f_args,
            },
            Term::Function {
                name: g,
                args: g_args,
            },
        ) => {
            f == g
                && f_args.len() == g_args.len()
                && f_args
                    .iter()
                    .zip(g_args)
                    .all(|(x, y)| unify_into(x, y, subs))
        }
        _ => false,
    }
}

/// Unify `variable` with `other`, extending `subs`.
///
/// Both sides are first dereferenced through existing bindings. A non-zero offset
/// only binds against integer constants and other variables. Offset arithmetic that
/// overflows `i64` makes the terms non-unifiable.
fn unify_variable(variable: &Term, other: &Term, subs: &mut Substitution) -> bool {
    let left = match subs.resolve(variable) {
        Some(term) => term,
        None => return false,
    };
    let (name, offset) = match &left {
        Term::Variable { name, offset } => (name.clone(), *offset),
        _ => return unify_into(&left, other, subs),
    };
    let right = match subs.resolve(other) {
        Some(term) => term,
        None => return false,
    };

    match right {
        Term::Variable {
            name: other_name,
            offset: other_offset,
        } => {
            if other_name == name {
                return other_offset == offset;
            }
            let (Some(forward), Some(backward)) = (
                other_offset.checked_sub(offset),
                offset.checked_sub(other_offset),
            ) else {
                return false;
            };
            subs.bind(name.clone(), Term::offset_variable(other_name.clone(), forward));
            subs.bind(other_name, Term::offset_variable(name, backward));
            true
        }
        Term::Constant(ref value) if offset != 0 => {
            match value.as_int().and_then(|n| n.checked_sub(offset)) {
                Some(n) => {
                    subs.bind(name, Term::constant(n));
                    true
                }
                None => false,
            }
        }
        Term::Function { .. } if offset != 0 => false,
        rigid => {
            subs.bind(name, rigid);
            true
        }
    }
}
