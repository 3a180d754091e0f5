pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod hosts;
pub mod infra;
pub mod logging;
pub mod terms;
pub mod types;
