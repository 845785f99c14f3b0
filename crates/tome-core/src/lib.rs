//! Core types, rules, and trait definitions for the Tome character sheet.
//!
//! This crate is deliberately free of HTTP and filesystem dependencies. The
//! rules engine (ability math, spellcasting tables and state machine, derived
//! stats) is synchronous and pure; storage and enrichment are expressed as
//! traits implemented by `tome-store-json` and `tome-srd`.

pub mod ability;
pub mod character;
pub mod derived;
pub mod enrich;
pub mod error;
pub mod race;
pub mod reference;
pub mod rules;
pub mod spellcasting;
pub mod store;

pub use error::{Error, Result};
