pub mod address;
pub mod audit;
pub mod config;
pub mod logging;

pub use tracing;

pub use address::Mailbox;
pub use config::{EnvironmentConfig, PolicyField};
