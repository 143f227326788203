//! Common types and utilities for the tset interface type-set engine.
//!
//! This crate provides foundational types used across all tset crates:
//! - String interning (`Atom`, `Interner`)
//! - Source positions (`Pos`)
//! - Language version gating (`GoVersion`)
//! - Diagnostics and their message table
//! - Resolver limits

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, Interner};

// Source positions (byte offsets)
pub mod span;
pub use span::Pos;

// Minimum language version of a compilation unit
pub mod version;
pub use version::{GoVersion, ParseVersionError};

// Centralized limits and thresholds
pub mod limits;

// Diagnostic data model and message lookup
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation};
