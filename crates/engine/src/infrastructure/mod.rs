//! External dependency implementations: ports and their adapters.

pub mod clock;
pub mod memory;
pub mod persistence;
pub mod ports;
pub mod steam;
