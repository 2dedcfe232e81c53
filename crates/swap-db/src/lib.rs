//! # swap-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `swap-core`. It handles:
//!
//! - Connection pool management
//! - Schema migrations (embedded, run at startup)
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! Aggregates the app never computes itself (unread totals, profile
//! ratings, completed-swap counts) live in SQL functions and triggers
//! shipped with the migrations; the repositories only read them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use swap_db::pool::{create_pool, DatabaseConfig};
//! use swap_db::repositories::PgOfferRepository;
//! use swap_core::traits::OfferRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     swap_db::run_migrations(&pool).await?;
//!     let offer_repo = PgOfferRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod migrate;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use migrate::{run_migrations, MIGRATOR};
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgConversationRepository, PgMessageRepository, PgOfferRepository, PgProfileRepository,
    PgReviewRepository,
};
