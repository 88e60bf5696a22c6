// Storage module for persistent data
pub mod save_file;

pub use save_file::*;
