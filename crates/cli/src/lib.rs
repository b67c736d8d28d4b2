//! Public library modules for the CLI crate
pub mod import;
pub mod server;
