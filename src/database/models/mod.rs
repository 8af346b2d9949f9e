pub mod wish;

pub use wish::*;
