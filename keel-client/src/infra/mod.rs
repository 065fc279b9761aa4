pub mod api_client;
pub mod config;
pub mod router;
pub mod services;

pub use api_client::ApiClient;
pub use config::{Config, ConfigError};
pub use router::LoggingRouter;
