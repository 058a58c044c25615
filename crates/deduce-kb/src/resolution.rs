//! # Resolution-Based Theorem Proving
//!
//! Resolution is a refutation procedure: to show `Γ ⊢ φ`, add `¬φ` to `Γ` and derive
//! the empty clause (⊥).
//!
//! ```text
//!     C₁ ∨ p    C₂ ∨ ¬n      σ = mgu(p, n)
//!     ─────────────────────────────────────
//!               (C₁ ∨ C₂)σ
//! ```
//!
//! Each resolvent is factored (literals of the same sign that unify are merged),
//! renamed into a canonical variable naming, and dropped if it is tautological.
//!
//! ## Saturation
//!
//! [`ResolutionProver::refute`] resolves every pair of known clauses, adds the new
//! resolvents, and repeats. It stops with [`ProofResult::Refuted`] as soon as the
//! empty clause appears, or with [`ProofResult::Saturated`] once a round adds nothing
//! new. Pairs of clauses that were both known in the previous round are not resolved
//! again; their resolvents are already in the set.
//!
//! ## Example
//!
//! ```rust
//! use deduce_kb::{Clause, ResolutionProver, Term};
//!
//! let p_a = Term::function("p", vec![Term::constant("a")]);
//!
//! let mut prover = ResolutionProver::new();
//! let result = prover
//!     .refute(vec![Clause::positive(p_a.clone()), Clause::negative(p_a)])
//!     .unwrap();
//! assert!(result.is_refuted());
//! ```

use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::clause::Clause;
use crate::config::ProverConfig;
use crate::error::{LogicError, Result};
use crate::unification::unify;

/// Statistics for resolution proof search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverStats {
    /// Saturation rounds started
    pub rounds: usize,
    /// Clause pairs handed to `resolve`
    pub pairs_examined: usize,
    /// Resolvents produced (after factoring, before deduplication)
    pub resolvents_generated: usize,
    /// Tautological resolvents discarded
    pub tautologies_removed: usize,
    /// Clauses in the working set when the search stopped
    pub clauses_retained: usize,
    /// Empty clause found
    pub empty_clause_found: bool,
}

/// A single resolution step in a proof.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionStep {
    /// First parent clause
    pub left: Clause,
    /// Second parent clause
    pub right: Clause,
    /// Resulting clause after resolution
    pub resolvent: Clause,
}

/// The resolution steps leading to the empty clause, parents before children.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derivation {
    pub steps: Vec<ResolutionStep>,
}

impl Derivation {
    /// Number of resolution steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolutionStep> {
        self.steps.iter()
    }

    /// The final step, whose resolvent is the empty clause.
    pub fn last(&self) -> Option<&ResolutionStep> {
        self.steps.last()
    }
}

/// Result of a refutation attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofResult {
    /// The empty clause was derived
    Refuted {
        derivation: Derivation,
        stats: ProverStats,
    },
    /// A round produced no new clause
    Saturated { clauses: usize, stats: ProverStats },
}

impl ProofResult {
    /// Check if the empty clause was derived.
    pub fn is_refuted(&self) -> bool {
        matches!(self, ProofResult::Refuted { .. })
    }

    pub fn is_saturated(&self) -> bool {
        matches!(self, ProofResult::Saturated { .. })
    }

    /// Search statistics, for either outcome.
    pub fn stats(&self) -> &ProverStats {
        match self {
            ProofResult::Refuted { stats, .. } | ProofResult::Saturated { stats, .. } => stats,
        }
    }

    /// The derivation of ⊥, if the clauses were refuted.
    pub fn derivation(&self) -> Option<&Derivation> {
        match self {
            ProofResult::Refuted { derivation, .. } => Some(derivation),
            ProofResult::Saturated { .. } => None,
        }
    }
}

/// Compute every binary resolvent of two clauses.
///
/// Both directions are tried: positive literals of `c1` against negative literals of
/// `c2`, and positive literals of `c2` against negative literals of `c1`. Clauses that
/// share variable names are standardized apart first.
///
/// # Errors
///
/// [`LogicError::Structural`] if applying a unifier offsets a function application.
///
/// # Example
///
/// ```rust
/// use deduce_kb::{resolve, Clause, Term};
///
/// let x = Term::variable("x");
/// let f = |t: Term| Term::function("f", vec![t]);
/// let g = |t: Term| Term::function("g", vec![t]);
///
/// // f(x) ∨ ¬g(x) and g(5) resolve to f(5)
/// let rule = Clause::new([f(x.clone())], [g(x)]);
/// let fact = Clause::positive(g(Term::constant(5)));
///
/// let resolvents = resolve(&rule, &fact).unwrap();
/// assert_eq!(resolvents.len(), 1);
/// assert!(resolvents.contains(&Clause::positive(f(Term::constant(5)))));
/// ```
pub fn resolve(c1: &Clause, c2: &Clause) -> Result<IndexSet<Clause>> {
    resolve_counted(c1, c2, &mut ProverStats::default())
}

fn resolve_counted(c1: &Clause, c2: &Clause, stats: &mut ProverStats) -> Result<IndexSet<Clause>> {
    let (left, right) = standardize_apart(c1, c2);
    let mut resolvents = IndexSet::new();

    for (with_pos, with_neg) in [(&left, &right), (&right, &left)] {
        for p in with_pos.pos() {
            for n in with_neg.neg() {
                let Some(mgu) = unify(p, n) else {
                    continue;
                };
                let pos = with_pos
                    .pos()
                    .iter()
                    .filter(|t| *t != p)
                    .chain(with_neg.pos())
                    .cloned();
                let neg = with_pos
                    .neg()
                    .iter()
                    .chain(with_neg.neg().iter().filter(|t| *t != n))
                    .cloned();
                let resolvent = Clause::new(pos, neg).apply(&mgu)?.factor()?.canonicalize();

                stats.resolvents_generated += 1;
                if resolvent.is_tautological() {
                    stats.tautologies_removed += 1;
                    continue;
                }
                trace!(%p, %n, %resolvent, "resolvent");
                resolvents.insert(resolvent);
            }
        }
    }

    Ok(resolvents)
}

fn standardize_apart(c1: &Clause, c2: &Clause) -> (Clause, Clause) {
    let shared = c1
        .variables()
        .intersection(&c2.variables())
        .next()
        .is_some();
    if shared {
        (c1.rename_suffix("l"), c2.rename_suffix("r"))
    } else {
        (c1.clone(), c2.clone())
    }
}

/// Saturation-based resolution prover.
#[derive(Clone, Debug, Default)]
pub struct ResolutionProver {
    config: ProverConfig,
    stats: ProverStats,
}

impl ResolutionProver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a prover with caps and derivation recording taken from `config`.
    pub fn with_config(config: ProverConfig) -> Self {
        ResolutionProver {
            config,
            stats: ProverStats::default(),
        }
    }

    pub fn config(&self) -> &ProverConfig {
        &self.config
    }

    /// Statistics of the most recent `refute` call.
    pub fn stats(&self) -> &ProverStats {
        &self.stats
    }

    /// Try to derive the empty clause from `clauses`.
    ///
    /// # Errors
    ///
    /// [`LogicError::ResourceLimit`] when a configured cap is exceeded, and
    /// [`LogicError::Structural`] from substitution.
    pub fn refute(&mut self, clauses: impl IntoIterator<Item = Clause>) -> Result<ProofResult> {
        self.stats = ProverStats::default();
        let mut known: IndexSet<Clause> = clauses.into_iter().collect();
        let mut parents: HashMap<usize, (usize, usize)> = HashMap::new();
        let span = tracing::debug_span!("refute", clauses = known.len());
        let _enter = span.enter();

        if known.iter().any(Clause::is_empty) {
            debug!("empty clause among the inputs");
            return Ok(self.refuted(Derivation::default(), known.len()));
        }

        let mut frontier = 0;
        loop {
            self.stats.rounds += 1;
            if let Some(max_rounds) = self.config.max_rounds {
                if self.stats.rounds > max_rounds {
                    return Err(self.limit_reached(known.len()));
                }
            }

            let total = known.len();
            let mut fresh: IndexSet<Clause> = IndexSet::new();
            let mut fresh_parents: Vec<(usize, usize)> = Vec::new();

            // Every pair with at least one member added in the previous round.
            for j in frontier..total {
                for i in 0..j {
                    self.stats.pairs_examined += 1;
                    let resolvents = resolve_counted(&known[i], &known[j], &mut self.stats)?;
                    for resolvent in resolvents {
                        if resolvent.is_empty() {
                            debug!(round = self.stats.rounds, "derived the empty clause");
                            let derivation = Self::derivation(&known, &parents, (i, j));
                            return Ok(self.refuted(derivation, total + fresh.len()));
                        }
                        if known.contains(&resolvent) || fresh.contains(&resolvent) {
                            continue;
                        }
                        fresh.insert(resolvent);
                        fresh_parents.push((i, j));
                    }
                }
            }

            debug!(
                round = self.stats.rounds,
                known = total,
                new = fresh.len(),
                "saturation round finished"
            );
            if fresh.is_empty() {
                self.stats.clauses_retained = total;
                return Ok(ProofResult::Saturated {
                    clauses: total,
                    stats: self.stats.clone(),
                });
            }

            frontier = total;
            for (clause, origin) in fresh.into_iter().zip(fresh_parents) {
                let (index, _) = known.insert_full(clause);
                if self.config.record_derivation {
                    parents.insert(index, origin);
                }
            }

            if let Some(max_clauses) = self.config.max_clauses {
                if known.len() > max_clauses {
                    return Err(self.limit_reached(known.len()));
                }
            }
        }
    }

    fn refuted(&mut self, derivation: Derivation, clauses: usize) -> ProofResult {
        self.stats.empty_clause_found = true;
        self.stats.clauses_retained = clauses;
        ProofResult::Refuted {
            derivation,
            stats: self.stats.clone(),
        }
    }

    fn limit_reached(&mut self, clauses: usize) -> LogicError {
        self.stats.clauses_retained = clauses;
        warn!(
            rounds = self.stats.rounds,
            clauses, "saturation stopped at resource limit"
        );
        LogicError::ResourceLimit {
            rounds: self.stats.rounds,
            clauses,
        }
    }

    /// Replay the parent links behind the final step `(i, j) ⊢ ⊥`.
    ///
    /// Without recorded links only the final step is returned.
    fn derivation(
        known: &IndexSet<Clause>,
        parents: &HashMap<usize, (usize, usize)>,
        last: (usize, usize),
    ) -> Derivation {
        let mut steps = Vec::new();
        let mut emitted: HashSet<usize> = HashSet::new();
        // (index, parents already expanded)
        let mut stack: Vec<(usize, bool)> = vec![(last.1, false), (last.0, false)];
        while let Some((index, expanded)) = stack.pop() {
            let Some(&(i, j)) = parents.get(&index) else {
                continue;
            };
            if expanded {
                if emitted.insert(index) {
                    steps.push(ResolutionStep {
                        left: known[i].clone(),
                        right: known[j].clone(),
                        resolvent: known[index].clone(),
                    });
                }
            } else if !emitted.contains(&index) {
                stack.push((index, true));
                stack.push((j, false));
                stack.push((i, false));
            }
        }

        steps.push(ResolutionStep {
            left: known[last.0].clone(),
            right: known[last.1].clone(),
            resolvent: Clause::empty(),
        });
        Derivation { steps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;

    fn p() -> Term {
        Term::function("P", vec![])
    }

    fn q() -> Term {
        Term::function("Q", vec![])
    }

    fn r() -> Term {
        Term::function("R", vec![])
    }

    fn f(arg: Term) -> Term {
        Term::function("f", vec![arg])
    }

    fn g(arg: Term) -> Term {
        Term::function("g", vec![arg])
    }

    #[test]
    fn test_resolve_ground() {
        let c1 = Clause::new([p()], [q()]);
        let c2 = Clause::positive(q());
        let resolvents = resolve(&c1, &c2).unwrap();
        assert_eq!(resolvents.len(), 1);
        assert!(resolvents.contains(&Clause::positive(p())));
    }

    #[test]
    fn test_resolve_is_symmetric() {
        let c1 = Clause::new([p()], [q()]);
        let c2 = Clause::positive(q());
        assert_eq!(resolve(&c1, &c2).unwrap(), resolve(&c2, &c1).unwrap());
    }

    #[test]
    fn test_resolve_complementary_units() {
        let resolvents = resolve(&Clause::positive(p()), &Clause::negative(p())).unwrap();
        assert_eq!(resolvents.len(), 1);
        assert!(resolvents[0].is_empty());
    }

    #[test]
    fn test_resolve_no_complement() {
        let resolvents = resolve(&Clause::positive(p()), &Clause::positive(q())).unwrap();
        assert!(resolvents.is_empty());
    }

    #[test]
    fn test_resolve_with_unification() {
        let rule = Clause::new([f(Term::variable("x"))], [g(Term::variable("x"))]);
        let fact = Clause::positive(g(Term::constant(5)));
        let resolvents = resolve(&rule, &fact).unwrap();
        assert_eq!(
            resolvents.into_iter().collect::<Vec<_>>(),
            [Clause::positive(f(Term::constant(5)))]
        );
    }

    #[test]
    fn test_resolve_standardizes_apart() {
        // P(x) and ¬P(f(x)) only resolve once their x's are told apart.
        let c1 = Clause::positive(Term::function("P", vec![Term::variable("x")]));
        let c2 = Clause::negative(Term::function("P", vec![f(Term::variable("x"))]));
        let resolvents = resolve(&c1, &c2).unwrap();
        assert_eq!(resolvents.len(), 1);
        assert!(resolvents[0].is_empty());
    }

    #[test]
    fn test_resolve_drops_tautologies() {
        // P ∨ Q and ¬P ∨ ¬Q resolve only into tautologies (Q ∨ ¬Q, P ∨ ¬P).
        let c1 = Clause::new([p(), q()], []);
        let c2 = Clause::new([], [p(), q()]);
        let mut stats = ProverStats::default();
        let resolvents = resolve_counted(&c1, &c2, &mut stats).unwrap();
        assert!(resolvents.is_empty());
        assert_eq!(stats.tautologies_removed, 2);
    }

    #[test]
    fn test_resolve_applies_factoring() {
        // f(x) ∨ f(y) ∨ ¬g(x) with g(1): gives f(1) ∨ f(y), factored to f(1).
        let c1 = Clause::new(
            [f(Term::variable("x")), f(Term::variable("y"))],
            [g(Term::variable("x"))],
        );
        let c2 = Clause::positive(g(Term::constant(1)));
        let resolvents = resolve(&c1, &c2).unwrap();
        assert!(resolvents.contains(&Clause::positive(f(Term::constant(1)))));
        assert!(resolvents.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn test_resolve_offset_arithmetic() {
        // near(x) ∨ ¬at(x+1) with at(3) gives near(2).
        let near = |t: Term| Term::function("near", vec![t]);
        let at = |t: Term| Term::function("at", vec![t]);
        let rule = Clause::new([near(Term::variable("x"))], [at(Term::offset_variable("x", 1))]);
        let resolvents = resolve(&rule, &Clause::positive(at(Term::constant(3)))).unwrap();
        assert!(resolvents.contains(&Clause::positive(near(Term::constant(2)))));
    }

    #[test]
    fn test_refute_basic() {
        let mut prover = ResolutionProver::new();
        let result = prover
            .refute(vec![Clause::positive(p()), Clause::negative(p())])
            .unwrap();
        assert!(result.is_refuted());
        assert!(prover.stats().empty_clause_found);
        assert!(prover.stats().pairs_examined > 0);
    }

    #[test]
    fn test_refute_modus_ponens() {
        // {P}, {¬P ∨ Q}, {¬Q} ⊢ ⊥
        let mut prover = ResolutionProver::new();
        let result = prover
            .refute(vec![
                Clause::positive(p()),
                Clause::new([q()], [p()]),
                Clause::negative(q()),
            ])
            .unwrap();
        assert!(result.is_refuted());
    }

    #[test]
    fn test_refute_three_clauses() {
        // {P ∨ Q}, {¬P ∨ R}, {¬Q}, {¬R} ⊢ ⊥
        let mut prover = ResolutionProver::new();
        let result = prover
            .refute(vec![
                Clause::new([p(), q()], []),
                Clause::new([r()], [p()]),
                Clause::negative(q()),
                Clause::negative(r()),
            ])
            .unwrap();
        assert!(result.is_refuted());
        let derivation = result.derivation().unwrap();
        assert!(derivation.len() >= 2);
        assert!(derivation.last().unwrap().resolvent.is_empty());
    }

    #[test]
    fn test_refute_saturates() {
        let mut prover = ResolutionProver::new();
        let result = prover
            .refute(vec![Clause::positive(p()), Clause::new([q()], [p()])])
            .unwrap();
        assert!(result.is_saturated());
        // P, ¬P ∨ Q, and the derived Q.
        assert_eq!(result.stats().clauses_retained, 3);
    }

    #[test]
    fn test_refute_empty_input_clause() {
        let mut prover = ResolutionProver::new();
        let result = prover.refute(vec![Clause::empty()]).unwrap();
        assert!(result.is_refuted());
        assert!(result.derivation().unwrap().is_empty());
    }

    #[test]
    fn test_derivation_orders_parents_first() {
        let mut prover = ResolutionProver::new();
        let result = prover
            .refute(vec![
                Clause::new([q()], [p()]),
                Clause::new([r()], [q()]),
                Clause::positive(p()),
                Clause::negative(r()),
            ])
            .unwrap();
        let derivation = result.derivation().unwrap();
        let mut available: Vec<Clause> = vec![
            Clause::new([q()], [p()]),
            Clause::new([r()], [q()]),
            Clause::positive(p()),
            Clause::negative(r()),
        ];
        for step in derivation.iter() {
            assert!(available.contains(&step.left));
            assert!(available.contains(&step.right));
            available.push(step.resolvent.clone());
        }
    }

    #[test]
    fn test_proof_result_json() {
        let mut prover = ResolutionProver::new();
        let result = prover
            .refute(vec![Clause::positive(p()), Clause::new([q()], [p()]), Clause::negative(q())])
            .unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let parsed: ProofResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_derivation_disabled() {
        let config = ProverConfig::default().with_derivation(false);
        let mut prover = ResolutionProver::with_config(config);
        let result = prover
            .refute(vec![
                Clause::positive(p()),
                Clause::new([q()], [p()]),
                Clause::negative(q()),
            ])
            .unwrap();
        assert!(result.is_refuted());
        assert_eq!(result.derivation().unwrap().len(), 1);
    }

    #[test]
    fn test_round_limit() {
        // nat(x) ⊢ nat(s(x)) never saturates.
        let nat = |t: Term| Term::function("nat", vec![t]);
        let s = |t: Term| Term::function("s", vec![t]);
        let clauses = vec![
            Clause::positive(nat(Term::constant(0))),
            Clause::new([nat(s(Term::variable("x")))], [nat(Term::variable("x"))]),
            Clause::negative(nat(Term::constant("never"))),
        ];
        let mut prover = ResolutionProver::with_config(ProverConfig::default().with_max_rounds(5));
        let err = prover.refute(clauses).unwrap_err();
        assert!(matches!(err, LogicError::ResourceLimit { rounds: 6, .. }));
    }

    #[test]
    fn test_clause_limit() {
        let nat = |t: Term| Term::function("nat", vec![t]);
        let s = |t: Term| Term::function("s", vec![t]);
        let clauses = vec![
            Clause::positive(nat(Term::constant(0))),
            Clause::new([nat(s(Term::variable("x")))], [nat(Term::variable("x"))]),
        ];
        let mut prover = ResolutionProver::with_config(ProverConfig::default().with_max_clauses(10));
        assert!(matches!(
            prover.refute(clauses),
            Err(LogicError::ResourceLimit { .. })
        ));
    }

    #[test]
    fn test_structural_error_aborts() {
        // A rule offsetting x, resolved against a fact binding x to a function.
        let at = |t: Term| Term::function("at", vec![t]);
        let near = |t: Term| Term::function("near", vec![t]);
        let rule = Clause::new([near(Term::offset_variable("x", 1))], [at(Term::variable("x"))]);
        let fact = Clause::positive(at(f(Term::constant(1))));
        assert!(matches!(
            resolve(&rule, &fact),
            Err(LogicError::Structural { .. })
        ));
    }
}
