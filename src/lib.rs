// src/lib.rs

pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod persistence;

pub use crate::core::query::Query;
pub use crate::core::search::{Direction, Source};
pub use crate::core::types::{Entry, Glossary};
pub use crate::error::LookupError;
