//! Command implementations

pub mod rename;

pub use rename::rename_files;
