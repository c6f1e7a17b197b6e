//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate feed extraction and linkage into one constructor call.
//! - Keep CLI and downstream consumers decoupled from parser details.

pub mod load;
