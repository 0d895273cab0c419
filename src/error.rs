//! Error types.
//!
//! The pure computations return small concrete errors that a caller can match on. Everything that
//! touches files or the command line reports through `anyhow`.

pub use crate::model::{AmountError, MonthKeyError};
pub use crate::report::InvalidRange;

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;
