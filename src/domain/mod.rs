pub mod catalog;
pub mod species;
pub mod types;

pub use catalog::*;
pub use types::*;
