pub mod contributions;
pub mod identity;
