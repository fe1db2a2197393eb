//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters convert between domain resources and storage representations.
//! They contain no business logic.

pub mod persistence;
