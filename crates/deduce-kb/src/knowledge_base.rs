//! The knowledge base: an append-only clause store answering queries by refutation.
//!
//! Every told clause gets its variables renamed with a suffix derived from a
//! generation counter, so no two stored clauses share a variable name. Queries run
//! on a private copy of the clauses; asking never changes what is stored.
//!
//! ```rust
//! use deduce_kb::{Answer, Clause, KnowledgeBase, Term};
//!
//! let f = |t: Term| Term::function("f", vec![t]);
//! let g = |t: Term| Term::function("g", vec![t]);
//! let x = Term::variable("x");
//!
//! let mut kb = KnowledgeBase::new([Clause::new([f(x.clone())], [g(x)])]);
//! kb.tell(Clause::positive(g(Term::constant(5))));
//!
//! assert_eq!(kb.ask(&Clause::positive(f(Term::constant(5)))).unwrap(), Answer::Proved);
//! assert_eq!(kb.ask(&Clause::positive(f(Term::constant(4)))).unwrap(), Answer::NotProved);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clause::Clause;
use crate::config::ProverConfig;
use crate::error::Result;
use crate::resolution::{ProofResult, ResolutionProver};

/// Suffix given to query variables before the query is negated.
const QUERY_SUFFIX: &str = "q";

/// Three-valued answer to a query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    /// The negated query contradicts the knowledge base
    Proved,
    /// Saturation finished without deriving a contradiction
    NotProved,
    /// The query mixes positive and negative literals and has no single reading
    Undetermined,
}

impl Answer {
    /// `Some(true)` for proved, `Some(false)` for not proved, `None` for an
    /// ill-formed query.
    pub fn as_option(self) -> Option<bool> {
        match self {
            Answer::Proved => Some(true),
            Answer::NotProved => Some(false),
            Answer::Undetermined => None,
        }
    }

    /// Check if the query was proved.
    pub fn is_proved(self) -> bool {
        self == Answer::Proved
    }
}

impl From<Answer> for Option<bool> {
    fn from(answer: Answer) -> Self {
        answer.as_option()
    }
}

/// An append-only store of clauses, standardized apart as they are told.
///
/// Searches are bounded only by the [`ProverConfig`] the knowledge base was built with.
#[derive(Clone, Debug, Default)]
pub struct KnowledgeBase {
    clauses: Vec<Clause>,
    generation: u64,
    config: ProverConfig,
}

impl KnowledgeBase {
    /// Create a knowledge base from axioms, standardizing them apart.
    pub fn new(axioms: impl IntoIterator<Item = Clause>) -> Self {
        Self::with_config(axioms, ProverConfig::default())
    }

    /// Create a knowledge base whose queries run under `config`.
    pub fn with_config(axioms: impl IntoIterator<Item = Clause>, config: ProverConfig) -> Self {
        let mut kb = KnowledgeBase {
            clauses: Vec::new(),
            generation: 0,
            config,
        };
        kb.tell_all(axioms);
        kb
    }

    /// Assert a clause, renaming its variables apart from every other stored clause.
    pub fn tell(&mut self, clause: Clause) {
        let renamed = clause.rename_suffix(&self.generation.to_string());
        self.generation += 1;
        debug!(clause = %renamed, generation = self.generation, "tell");
        self.clauses.push(renamed);
    }

    /// Assert each clause in turn, as [`tell`](Self::tell) does.
    pub fn tell_all(&mut self, clauses: impl IntoIterator<Item = Clause>) {
        for clause in clauses {
            self.tell(clause);
        }
    }

    /// Ask whether `query` follows from the stored clauses.
    ///
    /// A purely positive query `a ∨ b` asks for the conjunction `a ∧ b`; a purely
    /// negative one `¬a` asks whether `a` is false.
    ///
    /// # Errors
    ///
    /// [`LogicError::ResourceLimit`](crate::LogicError::ResourceLimit) when the
    /// configured caps stop the search before it finishes, and
    /// [`LogicError::Structural`](crate::LogicError::Structural) from substitution.
    pub fn ask(&self, query: &Clause) -> Result<Answer> {
        Ok(match self.prove(query)? {
            None => Answer::Undetermined,
            Some(result) if result.is_refuted() => Answer::Proved,
            Some(_) => Answer::NotProved,
        })
    }

    /// Like [`ask`](Self::ask), but returns the full proof result.
    ///
    /// `None` for an ill-formed query. The empty query is never proved unless the
    /// stored clauses are themselves contradictory.
    pub fn prove(&self, query: &Clause) -> Result<Option<ProofResult>> {
        if !query.pos().is_empty() && !query.neg().is_empty() {
            debug!(%query, "query mixes positive and negative literals");
            return Ok(None);
        }

        // The empty query negates to ⊥ itself, which must not count as a refutation.
        let negated = Some(query.rename_suffix(QUERY_SUFFIX).negate())
            .filter(|clause| !clause.is_empty());
        let working = self.clauses.iter().cloned().chain(negated);
        let mut prover = ResolutionProver::with_config(self.config.clone());
        let result = prover.refute(working)?;
        debug!(
            %query,
            refuted = result.is_refuted(),
            rounds = result.stats().rounds,
            "ask"
        );
        Ok(Some(result))
    }

    /// Stored clauses, in the order they were told, with renamed variables.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Number of stored clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Check if nothing has been told yet.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Number of `tell` calls so far; the next clause is renamed with this suffix.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Configuration used by `ask` and `prove`.
    pub fn config(&self) -> &ProverConfig {
        &self.config
    }
}
