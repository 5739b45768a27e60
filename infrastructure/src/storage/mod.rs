//! Storage adapters for the session, issue and vote ports

mod local_store;

pub use local_store::LocalStore;
