// src/services/mod.rs

pub mod explainer;
pub mod quiz;
pub mod speech;
