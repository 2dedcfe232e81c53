//! Entity to model mappers
//!
//! This module provides conversions between domain entities (swap-core)
//! and database models. `From<Model> for Entity` converts database rows
//! to domain objects; inserts bind entity fields directly in the
//! repositories.

mod conversation;
mod message;
mod offer;
mod profile;
mod review;
