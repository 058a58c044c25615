//! # Deduce KB
//!
//! **Resolution-refutation knowledge base over first-order terms with offset arithmetic**
//!
//! This crate is the reasoning core of a grid-world agent. Facts and rules are clauses
//! over first-order terms; queries are answered by adding the negated query to the
//! stored clauses and saturating with binary resolution until the empty clause appears
//! or nothing new can be derived.
//!
//! ## Core Components
//!
//! ### Terms ([`Term`])
//! - **Constants**: integers and symbols ([`Value`])
//! - **Variables**: named, with an integer offset (`x + 1`) for neighbour arithmetic
//! - **Functions**: named applications, also used as predicate atoms (`pit(x, y)`)
//!
//! ### Unification ([`unify`], [`Substitution`])
//! Most general unifiers, folding offsets into integer constants and aliasing
//! variables in both directions. Failure is `None`, not an error.
//!
//! ### Clauses ([`Clause`])
//! Disjunctions stored as sets of positive and negative atoms, with factoring,
//! tautology detection and canonical variable naming.
//!
//! ### Resolution ([`resolve`], [`ResolutionProver`])
//! Binary resolution and a saturation loop that reports a [`Derivation`] of the empty
//! clause, or the size of the saturated set.
//!
//! ### Knowledge Base ([`KnowledgeBase`])
//! `tell` renames each clause apart from the others; `ask` returns a three-valued
//! [`Answer`].
//!
//! ## Quick Start
//!
//! ```rust
//! use deduce_kb::{Answer, Clause, KnowledgeBase, Term};
//!
//! let pit = |x: Term, y: Term| Term::function("pit", vec![x, y]);
//! let breeze = |x: Term, y: Term| Term::function("breeze", vec![x, y]);
//! let (x, y) = (Term::variable("x"), Term::variable("y"));
//!
//! // A pit at (x, y) makes (x + 1, y) breezy.
//! let mut kb = KnowledgeBase::new([Clause::new(
//!     [breeze(Term::offset_variable("x", 1), y.clone())],
//!     [pit(x, y)],
//! )]);
//! kb.tell(Clause::positive(pit(Term::constant(2), Term::constant(3))));
//!
//! let query = Clause::positive(breeze(Term::constant(3), Term::constant(3)));
//! assert_eq!(kb.ask(&query).unwrap(), Answer::Proved);
//! ```
//!
//! ## Limits
//!
//! Saturation need not terminate on arbitrary first-order input. Set
//! [`ProverConfig::max_rounds`] or [`ProverConfig::max_clauses`] for a bounded search;
//! an exceeded cap is reported as [`LogicError::ResourceLimit`]. Unification performs
//! no occurs check.

mod clause;
pub mod config;
mod display;
mod error;
mod knowledge_base;
pub mod resolution;
mod term;
pub mod unification;

pub use clause::Clause;
pub use config::ProverConfig;
pub use error::{LogicError, Result};
pub use knowledge_base::{Answer, KnowledgeBase};
pub use resolution::{resolve, Derivation, ProofResult, ProverStats, ResolutionProver, ResolutionStep};
pub use term::{Term, Value};
pub use unification::{are_unifiable, unify, unify_with, Substitution};
