//! Display trait implementations for knowledge-base types.
//!
//! Provides human-readable string representations for debugging and error messages.

use std::fmt;

use crate::{
    clause::Clause,
    resolution::{Derivation, ResolutionStep},
    term::{Term, Value},
    unification::Substitution,
};

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Symbol(s) => write!(f, "{}", s),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Constant(value) => write!(f, "{}", value),
            Term::Variable { name, offset: 0 } => write!(f, "?{}", name),
            Term::Variable { name, offset } if *offset > 0 => write!(f, "?{}+{}", name, offset),
            Term::Variable { name, offset } => write!(f, "?{}{}", name, offset),
            Term::Function { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "⊥");
        }
        let literals = self
            .pos()
            .iter()
            .map(|atom| (true, atom))
            .chain(self.neg().iter().map(|atom| (false, atom)));
        for (i, (positive, atom)) in literals.enumerate() {
            if i > 0 {
                write!(f, " ∨ ")?;
            }
            if !positive {
                write!(f, "¬")?;
            }
            write!(f, "{}", atom)?;
        }
        Ok(())
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, term)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} ↦ {}", var, term)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for ResolutionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  ,  {}  ⊢  {}", self.left, self.right, self.resolvent)
    }
}

impl fmt::Display for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.iter().enumerate() {
            writeln!(f, "{:>3}. {}", i + 1, step)?;
        }
        Ok(())
    }
}
