//! Request-scoped data models

mod result;
mod verdict;

pub use result::*;
pub use verdict::*;
