//! Type definitions for spendtrack

mod error;
mod expense;

pub use error::*;
pub use expense::*;
