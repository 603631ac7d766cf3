pub mod ecc;

// Re-export all modules
pub use ecc::*;
