//! # swap-common
//!
//! Shared utilities including configuration, error handling, the acting-user
//! session handle, blob storage, and telemetry.

pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment, RedisConfig, StorageConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use session::Session;
pub use storage::{BlobStore, DiskStore, PutOptions, StorageError};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
