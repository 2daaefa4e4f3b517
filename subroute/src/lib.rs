pub mod controller;
pub mod error;
pub mod splitter;

pub use controller::Subroute;
pub use error::ConfigError;
