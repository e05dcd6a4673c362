//! Command implementations.

pub mod generate;
pub mod platforms;

pub use generate::GenerateArgs;
