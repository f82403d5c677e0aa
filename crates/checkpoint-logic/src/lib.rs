//! Pure verification logic for Checkpoint.
//!
//! This crate decides what is true about every traveler at the booth.
//! Given a seed, it generates the evidence the operator sees, computes
//! the verdict the operator's decision is graded against, and drives the
//! interrogation (spoken lines and the heart-rate reading). Functions take
//! plain data and return plain data. Nothing here touches a clock, a file,
//! or a renderer, so the same seed always yields the same subject.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`content`] | Fixed content tables (warrants, routes, discrepancies, records) |
//! | [`directive`] | Directive rules, exception predicates, verdict evaluation |
//! | [`director`] | Composition root: seed + directive → enriched subject, grading |
//! | [`error`] | Errors raised when parsing authored content |
//! | [`evidence`] | Evidence synthesis and report text |
//! | [`factory`] | Subject factory seam and procedural stand-in |
//! | [`interrogation`] | Response resolution, tone fallback, question catalog |
//! | [`random`] | Mulberry32-backed deterministic random source |
//! | [`session`] | Per-subject interrogation session with biometric readings |
//! | [`shift`] | Bundled shift directive presets and scenario parsing |
//! | [`subject`] | Subject seeds, traits, truth flags |
//! | [`tells`] | Behavioral tell simulation (BPM readings) |

pub mod content;
pub mod directive;
pub mod director;
pub mod error;
pub mod evidence;
pub mod factory;
pub mod interrogation;
pub mod random;
pub mod session;
pub mod shift;
pub mod subject;
pub mod tells;
