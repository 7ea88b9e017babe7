//! Utility functions for rule implementations.

pub mod allowance;
pub mod paths;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use allowance::{check_allow_with_reason, AllowCheck};
#[doc(inline)]
pub use paths::{normalize, relative_to};
