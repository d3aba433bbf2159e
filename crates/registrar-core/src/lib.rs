//! # registrar-core
//!
//! Core types, term arithmetic, and enrollment outcomes for Registrar.
//!
//! This crate provides the foundational types shared across all Registrar crates:
//! - Entity structs for the records database (students, courses, offerings, transcript)
//! - Read-model projections returned by catalog queries
//! - `Quarter` / `Term` and the month-to-quarter mapping
//! - Grade classification rules (failing, incomplete, passing)
//! - `Rejection` outcomes for enroll/withdraw validation
//! - Enrollment events published after commit
//! - Roster fixture types for bulk import
//! - Cross-cutting error types

pub mod entities;
pub mod errors;
pub mod events;
pub mod grade;
pub mod outcome;
pub mod roster;
pub mod term;
