// src/core/mod.rs

pub mod catalog;
pub mod engine;
pub mod progress;
pub mod query;
pub mod state;
pub mod types;
