//! Core type definitions for the places API

pub mod page;
pub mod place;
pub mod review;

// Re-export commonly used types
pub use page::*;
pub use place::*;
pub use review::*;
