//! Phonotab rewrite-rule cascades
//!
//! This crate defines the ordered rewrite-rule cascade used by the prediction
//! tabulator and provides:
//! - the `Rule` seam (an ordered, named string → string rewrite; idempotent
//!   when inapplicable),
//! - a line-based parser for the bundled `ContextRule` dialect
//!   (`Cascade::readrules`), and
//! - the tracer, which replays a word through the cascade and recovers the
//!   ordered subsequence of rules that actually changed it.
//!
//! The cascade is an *adapter*: the tracer only ever asks a rule for its name
//! and its transduction of a string, so a cascade backed by an external
//! finite-state engine can implement `Rule` directly.

pub mod cascade;
pub mod trace;

pub use cascade::{Cascade, CascadeParseError, ContextRule, Rule, RuleError};
pub use trace::{derivation, trace, DerivationStep, FiringSignature, Trace, TraceError};
