pub mod args;
pub mod commands;
mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod utils;


pub use config::Config;
pub use error::Error;
pub use error::Result;
