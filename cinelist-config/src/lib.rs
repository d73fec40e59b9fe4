//! Configuration for Cinelist.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables (optionally seeded from a `.env` file). The result
//! is validated once and handed to the store as
//! [`cinelist_core::database::DatabaseOptions`].

pub mod error;
pub mod loader;
pub mod models;
pub mod sources;
pub mod telemetry;
pub mod util;

pub use error::ConfigLoadError;
pub use loader::{ConfigLoad, ConfigLoader};
pub use models::{Config, ConfigMetadata, DatabaseConfig, Environment};
