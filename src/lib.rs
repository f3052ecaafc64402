//! Suraksha OS - terminal guide to cyber-safety awareness
//!
//! A small command interpreter walks citizens through five awareness
//! modules, remembers which ones they finished and turns that count into a
//! safety tier.
//!
//! # Architecture
//!
//! - **progress**: module universe, progress set and its durable record
//! - **safety**: count to tier scoring
//! - **repl**: command interpreter, transcript and terminal front-end
//! - **bootstrap**: session start and navigation signals from module pages
//! - **navigation**: deferred hand-off to module pages

pub mod errors;
pub mod progress;
pub mod safety;
pub mod navigation;
pub mod repl;
pub mod bootstrap;

// Re-export commonly used types
pub use errors::{Result, SurakshaError};

// Front-end plumbing
pub mod cli;
pub mod doctor;
pub mod logging;
