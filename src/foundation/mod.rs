pub mod error;
pub mod grid;
