pub mod task;
pub mod filter;

pub use task::*;
pub use filter::*;
