//! Core business logic for LeagueHQ.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `finance` - Transaction lifecycle, budget ledger arithmetic, and validation

pub mod finance;
