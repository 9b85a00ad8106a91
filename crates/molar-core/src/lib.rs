//! Molar Core Types
//!
//! This crate provides the foundational types shared by the Molar formula
//! parser and its facade crate:
//!
//! - **Composition**: Element symbol to atom count mapping ([`composition::Composition`])

pub mod composition;
