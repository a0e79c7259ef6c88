//! Resume screener library

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod screening;
pub mod session;

pub use config::Config;
pub use error::{Result, ScreenerError};
