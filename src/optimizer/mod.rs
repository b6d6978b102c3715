pub mod coverage;
pub mod types;

pub use coverage::*;
pub use types::*;
