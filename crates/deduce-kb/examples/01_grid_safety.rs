//! # Example 01: Grid Safety Reasoning
//!
//! An agent walks a grid, sensing breezes (next to pits) and stenches (next to the
//! wumpus). It tells its percepts to a knowledge base and asks which neighbouring
//! cells are safe to enter.
//!
//! ## What You'll Learn
//!
//! - Writing neighbour rules once with offset variables (`pos(x + 1, y)`)
//! - Telling percepts and asking positive, negative and ill-formed queries
//! - Reading the derivation behind a proof
//! - Bounding the search with `ProverConfig`

use deduce_kb::{Answer, Clause, KnowledgeBase, LogicError, ProverConfig, Term};

const BREEZE: &str = "BREEZE";
const STENCH: &str = "STENCH";

fn main() {
    println!("=== Grid Safety Reasoning ===\n");

    let config = ProverConfig::default().with_max_rounds(16);
    let mut kb = KnowledgeBase::with_config(axioms(), config);
    println!("Axioms: {} clauses\n", kb.len());

    // Example 1: The start cell is quiet
    example_1_quiet_start(&mut kb);

    // Example 2: Proof inspection
    example_2_derivation(&kb);

    // Example 3: A breeze narrows down the pit
    example_3_breeze();

    // Example 4: Ill-formed queries
    example_4_ill_formed(&kb);
}

fn example_1_quiet_start(kb: &mut KnowledgeBase) {
    println!("Example 1: No breeze, no stench at (0, 0)\n");

    kb.tell(Clause::negative(sense(BREEZE, cell(0, 0))));
    kb.tell(Clause::negative(sense(STENCH, cell(0, 0))));
    for (x, y) in [(1, 0), (0, 1)] {
        kb.tell(Clause::negative(obstacle(cell(x, y))));
    }

    for (x, y) in [(1, 0), (0, 1), (2, 2)] {
        report(kb, &format!("safe({}, {})", x, y), Clause::positive(safe(cell(x, y))));
    }
    println!();
}

fn example_2_derivation(kb: &KnowledgeBase) {
    println!("Example 2: Why is (1, 0) pit-free?\n");

    match kb.prove(&Clause::negative(pit(cell(1, 0)))) {
        Ok(Some(result)) => {
            if let Some(derivation) = result.derivation() {
                print!("{}", derivation);
            }
            let stats = result.stats();
            println!(
                "\n  rounds: {}, pairs: {}, resolvents: {}, tautologies: {}\n",
                stats.rounds, stats.pairs_examined, stats.resolvents_generated, stats.tautologies_removed
            );
        }
        Ok(None) => println!("  ill-formed query\n"),
        Err(err) => println!("  search failed: {}\n", err),
    }
}

fn example_3_breeze() {
    println!("Example 3: Breeze at (1, 1)\n");

    let mut kb = KnowledgeBase::new([pits_from_breeze()]);
    kb.tell(Clause::positive(sense(BREEZE, cell(1, 1))));
    kb.tell(Clause::negative(pit(cell(0, 1))));
    kb.tell(Clause::negative(pit(cell(1, 0))));
    report(&kb, "pit(1, 2) with two candidates", Clause::positive(pit(cell(1, 2))));

    kb.tell(Clause::negative(pit(cell(2, 1))));
    report(&kb, "pit(1, 2) after clearing (2, 1)", Clause::positive(pit(cell(1, 2))));
    println!();
}

fn example_4_ill_formed(kb: &KnowledgeBase) {
    println!("Example 4: Mixed-sign query\n");

    let query = Clause::new([safe(cell(1, 0))], [wumpus(cell(1, 0))]);
    report(kb, &query.to_string(), query.clone());
}

fn report(kb: &KnowledgeBase, label: &str, query: Clause) {
    match kb.ask(&query) {
        Ok(Answer::Proved) => println!("  {:<36} proved", label),
        Ok(Answer::NotProved) => println!("  {:<36} not provable", label),
        Ok(Answer::Undetermined) => println!("  {:<36} undetermined", label),
        Err(LogicError::ResourceLimit { rounds, clauses }) => println!(
            "  {:<36} unknown (stopped after {} rounds, {} clauses)",
            label, rounds, clauses
        ),
        Err(err) => println!("  {:<36} error: {}", label, err),
    }
}

// ============================================================================
// Grid vocabulary
// ============================================================================

fn pos(x: Term, y: Term) -> Term {
    Term::function("pos", vec![x, y])
}

fn cell(x: i64, y: i64) -> Term {
    pos(Term::constant(x), Term::constant(y))
}

fn here() -> Term {
    pos(Term::variable("x"), Term::variable("y"))
}

fn neighbours() -> [Term; 4] {
    [
        pos(Term::offset_variable("x", 1), Term::variable("y")),
        pos(Term::offset_variable("x", -1), Term::variable("y")),
        pos(Term::variable("x"), Term::offset_variable("y", 1)),
        pos(Term::variable("x"), Term::offset_variable("y", -1)),
    ]
}

fn sense(percept: &str, at: Term) -> Term {
    Term::function("sense", vec![Term::constant(percept), at])
}

fn pit(at: Term) -> Term {
    Term::function("pit", vec![at])
}

fn wumpus(at: Term) -> Term {
    Term::function("wumpus", vec![at])
}

fn obstacle(at: Term) -> Term {
    Term::function("obstacle", vec![at])
}

fn safe(at: Term) -> Term {
    Term::function("safe", vec![at])
}

fn pits_from_breeze() -> Clause {
    Clause::new(neighbours().map(pit), [sense(BREEZE, here())])
}

/// Percept and safety axioms.
fn axioms() -> Vec<Clause> {
    let mut axioms = Vec::new();
    for n in neighbours() {
        axioms.push(Clause::new([sense(BREEZE, here())], [pit(n.clone())]));
        axioms.push(Clause::new([sense(STENCH, here())], [wumpus(n)]));
    }
    axioms.push(Clause::new(
        [safe(here()), pit(here()), obstacle(here()), wumpus(here())],
        [],
    ));
    axioms.push(Clause::new([], [safe(here()), wumpus(here())]));
    axioms.push(Clause::new([], [safe(here()), pit(here())]));
    axioms
}
