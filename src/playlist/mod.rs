pub mod assembler;
pub mod config;
pub mod generator;
pub mod metadata;
pub mod parser;
pub mod prompt;
pub mod resolver;
pub mod utils;


pub use config::*;
pub use generator::*;
pub use metadata::*;
