#[cfg(feature = "gif")]
pub mod gif;
pub mod svg;
