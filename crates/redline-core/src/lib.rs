pub mod config;
pub mod negotiation;
pub mod segmenter;
pub mod session;
pub mod types;

pub use types::*;
