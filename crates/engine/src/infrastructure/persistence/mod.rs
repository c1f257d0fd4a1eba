//! Durable persistence adapters.

mod user_store;

pub use user_store::SqliteUserStore;
