//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep console callers decoupled from storage details.

pub mod bill;
pub mod inventory_service;
