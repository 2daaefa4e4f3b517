pub mod backends;
pub mod config;
pub mod error;
pub mod timeout;
pub mod r#trait;

pub use backends::{MemoryStore, TestStore};
pub use config::{FileConfig, MemoryConfig, StoreConfig};
pub use error::{Result, StoreError};
pub use timeout::TimedStore;
pub use r#trait::KeyValueStore;
