//! Data types for the grid engine.

mod column;
mod filter;
mod pagination;
mod sort;
mod value;

pub use column::*;
pub use filter::*;
pub use pagination::*;
pub use sort::*;
pub use value::*;
