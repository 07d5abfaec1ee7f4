pub mod layout;
pub mod levels;
pub mod stencil;
pub mod theme;
