//! Commandes de la CLI

pub mod render;
