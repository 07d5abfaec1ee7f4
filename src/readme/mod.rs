pub mod patch;
pub mod stats;
