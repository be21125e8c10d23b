pub mod color;
pub mod error;
