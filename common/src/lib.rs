pub mod config;
pub mod deck;
pub mod file_utils;

pub use config::*;
pub use deck::*;
pub use file_utils::*;
