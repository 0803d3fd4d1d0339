//! Utilitaires partagés

pub mod math;

pub use math::{entropy, gc_content, BaseComposition};
