//! Clauses: disjunctions split into positive and negative literal sets.
//!
//! A clause `(pos, neg)` denotes `(∨ pos) ∨ (∨ ¬neg)`. Literals are kept in ordered
//! sets, so duplicates vanish and two clauses with the same literals compare equal
//! regardless of how they were built.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::term::Term;
use crate::unification::{unify, Substitution};

/// A disjunction of positive and negated atoms.
///
/// Special cases:
/// - Empty clause (⊥): no literals at all, a derived contradiction
/// - Unit clause: single literal
/// - Horn clause: at most one positive literal
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Clause {
    pos: BTreeSet<Term>,
    neg: BTreeSet<Term>,
}

impl Clause {
    /// Create a clause from its positive and negated atoms; duplicates collapse.
    pub fn new(pos: impl IntoIterator<Item = Term>, neg: impl IntoIterator<Item = Term>) -> Self {
        Clause {
            pos: pos.into_iter().collect(),
            neg: neg.into_iter().collect(),
        }
    }

    /// Unit clause asserting `atom`.
    pub fn positive(atom: Term) -> Self {
        Clause {
            pos: BTreeSet::from([atom]),
            neg: BTreeSet::new(),
        }
    }

    /// Unit clause asserting `¬atom`.
    pub fn negative(atom: Term) -> Self {
        Clause {
            pos: BTreeSet::new(),
            neg: BTreeSet::from([atom]),
        }
    }

    /// The empty clause (contradiction).
    pub fn empty() -> Self {
        Clause::default()
    }

    /// Atoms occurring positively.
    pub fn pos(&self) -> &BTreeSet<Term> {
        &self.pos
    }

    /// Atoms occurring negated.
    pub fn neg(&self) -> &BTreeSet<Term> {
        &self.neg
    }

    /// Check if this is the empty clause (⊥).
    pub fn is_empty(&self) -> bool {
        self.pos.is_empty() && self.neg.is_empty()
    }

    /// Number of literals in the clause.
    pub fn len(&self) -> usize {
        self.pos.len() + self.neg.len()
    }

    /// Check if this is a unit clause (exactly one literal).
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// Check if this is a Horn clause (at most one positive literal).
    pub fn is_horn(&self) -> bool {
        self.pos.len() <= 1
    }

    /// Check if no literal contains a variable.
    pub fn is_ground(&self) -> bool {
        self.pos.iter().chain(&self.neg).all(Term::is_ground)
    }

    /// All variable names occurring in the clause.
    pub fn variables(&self) -> BTreeSet<String> {
        let mut vars = BTreeSet::new();
        for term in self.pos.iter().chain(&self.neg) {
            term.collect_variables(&mut vars);
        }
        vars
    }

    /// Swap the positive and negative literal sets.
    ///
    /// For a unit clause this is its logical negation. A clause `a ∨ b` becomes
    /// `¬a ∨ ¬b`, the negation of the conjunction `a ∧ b`.
    pub fn negate(&self) -> Clause {
        Clause {
            pos: self.neg.clone(),
            neg: self.pos.clone(),
        }
    }

    /// Rename every variable `v` to `v_<suffix>`.
    pub fn rename_suffix(&self, suffix: &str) -> Clause {
        Clause {
            pos: self.pos.iter().map(|t| t.rename_suffix(suffix)).collect(),
            neg: self.neg.iter().map(|t| t.rename_suffix(suffix)).collect(),
        }
    }

    /// Apply a substitution to every literal.
    pub fn apply(&self, subs: &Substitution) -> Result<Clause> {
        Ok(Clause {
            pos: self
                .pos
                .iter()
                .map(|t| subs.apply(t))
                .collect::<Result<_>>()?,
            neg: self
                .neg
                .iter()
                .map(|t| subs.apply(t))
                .collect::<Result<_>>()?,
        })
    }

    /// Check whether some positive literal unifies with some negative literal.
    ///
    /// Such a clause is trivially true and carries no information for refutation.
    pub fn is_tautological(&self) -> bool {
        self.pos
            .iter()
            .any(|p| self.neg.iter().any(|n| unify(p, n).is_some()))
    }

    /// Merge literals of the same sign that unify with each other.
    ///
    /// Repeats until no pair is left whose unifier shrinks the clause.
    pub fn factor(&self) -> Result<Clause> {
        let mut clause = self.clone();
        while let Some(merged) = clause.merge_once()? {
            clause = merged;
        }
        Ok(clause)
    }

    fn merge_once(&self) -> Result<Option<Clause>> {
        for literals in [&self.pos, &self.neg] {
            for (i, a) in literals.iter().enumerate() {
                for b in literals.iter().skip(i + 1) {
                    let Some(mgu) = unify(a, b) else {
                        continue;
                    };
                    let merged = self.apply(&mgu)?;
                    if merged.len() < self.len() {
                        return Ok(Some(merged));
                    }
                }
            }
        }
        Ok(None)
    }

    /// Rename variables to `_0`, `_1`, ... in a fixed order.
    ///
    /// Literals are ordered by sign and by their shape with variable names masked out,
    /// so clauses that differ only in variable names usually end up identical.
    pub fn canonicalize(&self) -> Clause {
        if self.is_ground() {
            return self.clone();
        }
        let mut literals: Vec<(bool, Term, &Term)> = self
            .pos
            .iter()
            .map(|t| (true, t))
            .chain(self.neg.iter().map(|t| (false, t)))
            .map(|(sign, t)| (sign, t.map_variables(&mut |_| String::new()), t))
            .collect();
        literals.sort_by(|a, b| (!a.0, &a.1).cmp(&(!b.0, &b.1)));

        let mut names: HashMap<String, String> = HashMap::new();
        let mut rename = |name: &str| {
            let next = names.len();
            names
                .entry(name.to_string())
                .or_insert_with(|| format!("_{}", next))
                .clone()
        };
        let mut clause = Clause::empty();
        for (sign, _, term) in literals {
            let renamed = term.map_variables(&mut rename);
            if sign {
                clause.pos.insert(renamed);
            } else {
                clause.neg.insert(renamed);
            }
        }
        clause
    }
}
