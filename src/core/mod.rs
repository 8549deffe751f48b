pub mod format;
pub mod parser;
pub mod query;
pub mod search;
pub mod types;
