// src/lib.rs

pub mod command;
pub mod config;
pub mod core;
pub mod error;
pub mod highlight;
pub mod persistence;
pub mod render;

pub use crate::config::Config;
pub use crate::core::engine::{Action, GuideEngine, GuideView};
pub use crate::error::{GuideError, Result};
