pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod formatter;
pub mod property;
pub mod report;
pub mod types;

pub use error::{AppError, Result};
