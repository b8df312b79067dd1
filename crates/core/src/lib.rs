//! Core business logic for payroll configuration.
//!
//! This crate contains the configuration lifecycle engine and the payroll
//! business rules with ZERO web or database dependencies. Persistence is
//! reached only through the store traits.
//!
//! # Modules
//!
//! - `lifecycle` - Draft/approve/reject state machine and the generic engine
//! - `rules` - Per-type validators for the configuration kinds
//! - `settings` - Company-wide settings singleton

pub mod lifecycle;
pub mod rules;
pub mod settings;
