pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod output;
pub mod store;
