// src/handlers/mod.rs

pub mod page;
pub mod quiz;
pub mod topics;
