//! Shared helpers for the vault contract suite.
//!
//! This crate provides:
//! - [`roles`]: single-holder role registry and caller predicates.
//! - [`math`]: wide multiply-divide and basis-point helpers used by every
//!   rate and fee computation.
//!
//! Helpers here never return contract errors directly. They report failure
//! through `Option` / `bool` so each contract can map it onto its own error
//! enum.

#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod math;
pub mod roles;

pub use math::*;
pub use roles::*;
