//! Deduce - resolution reasoning for grid-world agents
//!
//! This is the top-level umbrella crate that re-exports the reasoning core and
//! provides logging setup for applications embedding it.
//!
//! # Architecture
//!
//! - **Core**: `kb` (terms, unification, clauses, resolution, knowledge base)
//! - **Ambient**: `logging` (tracing subscriber setup)
//!
//! ```rust
//! use deduce::kb::{Answer, Clause, KnowledgeBase, Term};
//!
//! let mut kb = KnowledgeBase::default();
//! kb.tell(Clause::positive(Term::function("visited", vec![Term::constant(0)])));
//! let query = Clause::positive(Term::function("visited", vec![Term::variable("x")]));
//! assert_eq!(kb.ask(&query).unwrap(), Answer::Proved);
//! ```

pub use deduce_kb as kb;

pub mod logging;

pub use logging::{init_logging, LogFormat, LogLevel, LoggingError, TracingLoggerBuilder};
