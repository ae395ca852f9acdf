//! The signed-in user and bearer token, persisted through a pluggable
//! key/value backend.

pub mod storage;
pub mod store;

pub use storage::{MemoryStorage, SessionStorage, StorageError};
pub use store::{Session, SessionStore, STORAGE_NAMESPACE, TOKEN_KEY, USER_KEY};
