//! myblog content collections
//!
//! This crate provides the content side of the myblog backend: news,
//! videos, downloadable materials, admin cards and profile comments.
//!
//! # Features
//! - One schema table describing every collection
//! - Store adapter with MongoDB and in-memory backends
//! - Generic CRUD routes instantiated once per collection
//! - Aggregate overview of all collections with summary counts

pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

pub use db::MongoDb;
pub use error::{ContentError, ContentResult};
pub use models::{Collection, Record};
pub use routes::AppState;
pub use services::{ContentService, ContentStore, MemoryStore, MongoStore};
