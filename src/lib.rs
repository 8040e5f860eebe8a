// Library module for riptide
// Re-exports modules for use in integration tests and the binary

pub mod cli;
pub mod context;
pub mod credentials;
pub mod error;
pub mod paths;
pub mod snapshot;
pub mod store;
pub mod sync;
