// src/models/mod.rs

pub mod explanation;
pub mod score_record;
pub mod topic;
